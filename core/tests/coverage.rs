//! Coverage & gap calculator tests over hand-edited allocations.

use realloc_core::{
    allocation::{Allocation, BenchAllocation},
    coverage::{
        coverage_rows, covered_by_role, external_hiring_needed, remaining_gap, HiringAlert,
    },
    demand::ScaledRequirement,
};

fn req(role: &str, required: u32, available: u32) -> ScaledRequirement {
    ScaledRequirement {
        role: role.into(),
        baseline_required: required,
        available,
        required,
        gap: required.saturating_sub(available),
    }
}

fn requirements() -> Vec<ScaledRequirement> {
    vec![
        req("Clinical Operations", 8, 5),
        req("Biostatistics", 3, 2),
        req("Medical Affairs", 2, 2),
    ]
}

/// Source and bench draws for the same role add up.
#[test]
fn covered_sums_sources_and_bench() {
    let mut allocation = Allocation::new();
    allocation.set("NP-HEM-215", "Clinical Operations", 1);
    allocation.set("NP-MM-318", "Clinical Operations", 2);
    let mut bench = BenchAllocation::new();
    bench.set("Clinical Operations", 1);
    bench.set("Biostatistics", 1);

    let covered = covered_by_role(&allocation, &bench);

    assert_eq!(covered.get("Clinical Operations"), Some(&4));
    assert_eq!(covered.get("Biostatistics"), Some(&1));
    assert_eq!(covered.get("Medical Affairs"), None);
}

/// Over-allocating one role neither goes negative nor covers another role.
#[test]
fn over_allocation_capped_at_gap() {
    let allocation = Allocation::new();
    let mut bench = BenchAllocation::new();
    bench.set("Clinical Operations", 10);

    let scaled = requirements();

    assert_eq!(remaining_gap(&allocation, &bench, &scaled), 1, "Biostatistics still short");
    let hiring = external_hiring_needed(&allocation, &bench, &scaled);
    assert_eq!(hiring.len(), 1);
    assert_eq!(hiring.get("Biostatistics"), Some(&1));

    let rows = coverage_rows(&allocation, &bench, &scaled);
    assert_eq!(rows[0].covered, 3, "covered is capped at the gap");
    assert_eq!(rows[0].still_needed, 0);
}

/// Allocations for roles outside the requirement table are ignored.
#[test]
fn unknown_roles_do_not_count() {
    let mut allocation = Allocation::new();
    allocation.set("NP-HEM-215", "Pharmacovigilance", 5);

    let scaled = requirements();

    assert_eq!(remaining_gap(&allocation, &BenchAllocation::new(), &scaled), 4);
}

/// Zero remaining gap exactly when no external hiring is needed.
#[test]
fn remaining_gap_zero_iff_no_hiring() {
    let scaled = requirements();
    let mut allocation = Allocation::new();
    let mut bench = BenchAllocation::new();

    for step in 0..5 {
        let gap = remaining_gap(&allocation, &bench, &scaled);
        let hiring = external_hiring_needed(&allocation, &bench, &scaled);
        assert_eq!(gap == 0, hiring.is_empty(), "step {step}: gap={gap} hiring={hiring:?}");
        assert_eq!(gap, hiring.values().sum::<u32>());

        allocation.set("NP-MM-318", "Clinical Operations", step.min(3));
        bench.set("Biostatistics", (step / 2).min(1));
    }
    assert_eq!(remaining_gap(&allocation, &bench, &scaled), 0);
}

/// Rows keep reference order and report the shortfall per role.
#[test]
fn coverage_rows_report_still_needed() {
    let mut allocation = Allocation::new();
    allocation.set("NP-MM-318", "Clinical Operations", 2);

    let rows = coverage_rows(&allocation, &BenchAllocation::new(), &requirements());

    let roles: Vec<&str> = rows.iter().map(|r| r.role.as_str()).collect();
    assert_eq!(roles, vec!["Clinical Operations", "Biostatistics", "Medical Affairs"]);
    assert_eq!((rows[0].covered, rows[0].still_needed), (2, 1));
    assert_eq!((rows[1].covered, rows[1].still_needed), (0, 1));
    assert_eq!((rows[2].gap, rows[2].still_needed), (0, 0));
}

/// The hiring alert only exists when there is a shortfall.
#[test]
fn hiring_alert_totals() {
    assert!(HiringAlert::from_shortfall(16, Default::default()).is_none());

    let roles = [("Clinical Operations".to_string(), 2), ("Medical Affairs".to_string(), 1)];
    let alert = HiringAlert::from_shortfall(16, roles.into()).expect("alert expected");

    assert_eq!(alert.total_fte, 3);
    assert_eq!(alert.role_count, 2);
}
