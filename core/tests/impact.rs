//! Impact calculator tests — linear slippage on source initiatives.

use realloc_core::{
    allocation::Allocation,
    config::PlannerConfig,
    impact::{initiative_impact, phase_impacts, InitiativeRisk},
};

fn slippage(impacts: &[realloc_core::impact::PhaseImpact], phase: &str) -> f64 {
    impacts
        .iter()
        .find(|p| p.phase_label == phase)
        .map(|p| p.slippage_weeks)
        .unwrap_or_else(|| panic!("phase {phase} missing"))
}

/// Every phase of the initiative is listed even when nothing was removed.
#[test]
fn untouched_initiative_lists_all_phases() {
    let config = PlannerConfig::demo();

    let impacts = phase_impacts("NP-HEM-215", &Allocation::new(), &config.reference.sources);

    let labels: Vec<&str> = impacts.iter().map(|p| p.phase_label.as_str()).collect();
    assert_eq!(labels, vec!["Recruitment", "Site Monitoring"]);
    assert!(impacts.iter().all(|p| !p.is_impacted && p.slippage_weeks == 0.0));
}

/// Slippage sums allocated FTE × weeks_per_fte across roles.
#[test]
fn slippage_sums_across_roles() {
    let config = PlannerConfig::demo();
    let mut allocation = Allocation::new();
    allocation.set("NP-MM-318", "Clinical Operations", 2);
    allocation.set("NP-MM-318", "Regulatory Affairs", 1);

    let impacts = phase_impacts("NP-MM-318", &allocation, &config.reference.sources);

    assert!((slippage(&impacts, "Recruitment") - 1.9).abs() < 1e-9);
    assert_eq!(slippage(&impacts, "Data Management"), 0.0);
    assert_eq!(impacts[0].display_weeks(), 1.9);
}

/// Doubling FTE removed doubles the slippage.
#[test]
fn slippage_is_linear() {
    let config = PlannerConfig::demo();
    let sources = &config.reference.sources;

    let mut one = Allocation::new();
    one.set("NP-HEM-215", "Data Management", 1);
    let mut two = Allocation::new();
    two.set("NP-HEM-215", "Data Management", 2);

    let a = slippage(&phase_impacts("NP-HEM-215", &one, sources), "Recruitment");
    let b = slippage(&phase_impacts("NP-HEM-215", &two, sources), "Recruitment");
    assert_eq!(b, 2.0 * a);
}

/// Draws from another initiative never slip this one.
#[test]
fn only_own_draws_count() {
    let config = PlannerConfig::demo();
    let mut allocation = Allocation::new();
    allocation.set("NP-MM-318", "Clinical Operations", 2);

    let impacts = phase_impacts("NP-HEM-215", &allocation, &config.reference.sources);

    assert!(impacts.iter().all(|p| !p.is_impacted));
}

/// Unknown initiatives produce no phases rather than an error.
#[test]
fn unknown_initiative_is_empty() {
    let config = PlannerConfig::demo();
    let mut allocation = Allocation::new();
    allocation.set("NP-XX-000", "Clinical Operations", 2);

    assert!(phase_impacts("NP-XX-000", &allocation, &config.reference.sources).is_empty());
}

/// Risk band and summary follow FTE removed.
#[test]
fn initiative_card_summary() {
    let config = PlannerConfig::demo();
    let sources = &config.reference.sources;
    let mut allocation = Allocation::new();
    allocation.set("NP-HEM-215", "Clinical Operations", 1);

    let hem = initiative_impact(&sources[0], &allocation, sources);
    assert_eq!(hem.fte_removed, 1);
    assert_eq!(hem.risk, InitiativeRisk::AtRisk);
    assert_eq!(hem.summary, "1 FTE removed — Recruitment +0.5w, Site Monitoring +1w.");

    let mm = initiative_impact(&sources[1], &allocation, sources);
    assert_eq!(mm.risk, InitiativeRisk::OnTrack);
    assert_eq!(mm.summary, "No FTEs reallocated — study unaffected.");
}
