//! scenario-runner: headless host for the reallocation planner.
//!
//! Usage:
//!   scenario-runner --weeks 16 --sites 20 --data-dir ./data
//!   scenario-runner --ipc-mode

use anyhow::Result;
use realloc_core::{
    command::PlannerCommand,
    config::PlannerConfig,
    scenario::{ScenarioBanner, ScenarioSession},
    snapshot::ScenarioSnapshot,
    types::Weeks,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Command { command: PlannerCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let config = PlannerConfig::load(data_dir)?;
    let weeks: Weeks = parse_arg(&args, "--weeks", config.scenario.acceleration_weeks.default);
    let sites: u32 = parse_arg(&args, "--sites", config.scenario.additional_sites.default);

    let mut session = ScenarioSession::new(config);

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        println!("Reallocation planner — scenario-runner");
        println!("  weeks:     {weeks}");
        println!("  sites:     {sites}");
        println!("  data_dir:  {data_dir}");
        println!();

        session.set_weeks(weeks)?;
        session.set_sites(sites)?;
        session.optimise();
        print_summary(&session.snapshot());
    }

    Ok(())
}

fn run_ipc_loop(session: &mut ScenarioSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Unparseable IPC request: {e}");
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {
                writeln!(stdout, "{}", session.snapshot_json()?)?;
            }
            IpcRequest::Command { command } => match session.apply(command) {
                Ok(events) => {
                    for event in &events {
                        log::debug!("event: {event:?}");
                    }
                    writeln!(stdout, "{}", session.snapshot_json()?)?;
                }
                Err(e) => {
                    log::warn!("Rejected command: {e}");
                    write_error(&mut stdout, &e.to_string())?;
                    continue;
                }
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(snapshot: &ScenarioSnapshot) {
    let banner = match snapshot.banner {
        ScenarioBanner::AiRecommended => "AI recommended",
        ScenarioBanner::Optimised => "Optimised",
        ScenarioBanner::UserModified => "User modified",
    };

    println!("=== SCENARIO ({banner}) ===");
    println!("  target start:   {}", snapshot.target_date.format("%-d %B %Y"));
    println!(
        "  covered:        {}/{} FTE",
        snapshot.total_gap - snapshot.remaining_gap,
        snapshot.total_gap
    );
    println!("  from trials:    {} FTE", snapshot.total_reallocated);
    println!("  from bench:     {} FTE", snapshot.total_bench);

    println!();
    println!("=== COVERAGE BY ROLE ===");
    for row in snapshot.coverage.iter().filter(|r| r.gap > 0) {
        println!(
            "  {:<22} required {:>2} | available {:>2} | covered {}/{}",
            row.role, row.required, row.available, row.covered, row.gap
        );
    }
    if snapshot.coverage.iter().all(|r| r.gap == 0) {
        println!("  (No reallocation required at this acceleration level)");
    }

    if !snapshot.external_hiring.is_empty() {
        println!();
        println!("=== EXTERNAL HIRING REQUIRED ===");
        for (role, fte) in &snapshot.external_hiring {
            println!("  {role:<22} +{fte} FTE");
        }
    }

    println!();
    println!("=== TRIAL IMPACT ===");
    for impact in &snapshot.impacts {
        println!("  {} [{}] {}", impact.initiative_id, impact.risk.label(), impact.summary);
    }

    println!();
    println!("=== TRADE-OFFS ===");
    println!(
        "  verdict:        {} — {}",
        snapshot.verdict.label, snapshot.verdict.description
    );
    println!("  market lead:    +{} months", snapshot.market_lead_months);
    println!("  cost impact:    {}k", snapshot.cost);
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
