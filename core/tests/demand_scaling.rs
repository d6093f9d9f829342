//! Demand scaler tests.

use realloc_core::{
    config::{PlannerConfig, RoleRequirement},
    demand::{gap_roles, scale_requirements, total_gap},
};

fn clinical_ops() -> Vec<RoleRequirement> {
    vec![RoleRequirement {
        role: "Clinical Operations".into(),
        baseline_required: 8,
        available: 5,
    }]
}

/// At the reference acceleration the baseline is returned unchanged.
#[test]
fn reference_weeks_keeps_baseline() {
    let scaled = scale_requirements(12, 12, &clinical_ops());

    assert_eq!(scaled[0].required, 8);
    assert_eq!(scaled[0].gap, 3, "gap = required - available");
}

/// Half the reference acceleration halves the requirement and can close the gap.
#[test]
fn half_acceleration_halves_requirement() {
    let scaled = scale_requirements(6, 12, &clinical_ops());

    assert_eq!(scaled[0].required, 4);
    assert_eq!(scaled[0].gap, 0, "available 5 exceeds required 4");
    assert_eq!(gap_roles(&scaled).count(), 0, "role must drop out of reallocation");
}

/// Increasing weeks never decreases any role's requirement.
#[test]
fn required_is_monotonic_in_weeks() {
    let config = PlannerConfig::demo();
    let reference = &config.reference;

    for weeks in 1..40 {
        let lower = scale_requirements(weeks, reference.reference_weeks, &reference.requirements);
        let higher =
            scale_requirements(weeks + 1, reference.reference_weeks, &reference.requirements);
        for (a, b) in lower.iter().zip(&higher) {
            assert!(
                a.required <= b.required,
                "{}: required fell from {} to {} between {weeks} and {} weeks",
                a.role,
                a.required,
                b.required,
                weeks + 1
            );
            assert!(a.gap <= b.gap, "{}: gap fell at {weeks} weeks", a.role);
        }
    }
}

/// The demo tables at 20 weeks produce the expected per-role gaps.
#[test]
fn demo_gaps_at_twenty_weeks() {
    let config = PlannerConfig::demo();
    let reference = &config.reference;
    let scaled = scale_requirements(20, reference.reference_weeks, &reference.requirements);

    let gaps: Vec<(&str, u32)> = scaled.iter().map(|r| (r.role.as_str(), r.gap)).collect();
    assert_eq!(
        gaps,
        vec![
            ("Clinical Operations", 8),
            ("Biostatistics", 3),
            ("Medical Affairs", 1),
            ("Regulatory Affairs", 2),
            ("Data Management", 3),
        ]
    );
    assert_eq!(total_gap(&scaled), 17);
}
