//! Demand scaling — baseline requirement at the reference acceleration
//! converted to the requirement at an arbitrary target.

use crate::{
    config::RoleRequirement,
    types::{Fte, Role, Weeks},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledRequirement {
    pub role: Role,
    pub baseline_required: Fte,
    pub available: Fte,
    /// Requirement at the target acceleration.
    pub required: Fte,
    /// `max(0, required - available)`.
    pub gap: Fte,
}

/// Scale every role's baseline requirement from `reference_weeks` to `weeks`.
///
/// `required = round(baseline × weeks / reference_weeks)`, rounded half away
/// from zero. Increasing `weeks` never decreases `required`.
pub fn scale_requirements(
    weeks: Weeks,
    reference_weeks: Weeks,
    baseline: &[RoleRequirement],
) -> Vec<ScaledRequirement> {
    baseline
        .iter()
        .map(|r| {
            let required = scaled_fte(r.baseline_required, weeks, reference_weeks);
            ScaledRequirement {
                role: r.role.clone(),
                baseline_required: r.baseline_required,
                available: r.available,
                required,
                gap: required.saturating_sub(r.available),
            }
        })
        .collect()
}

fn scaled_fte(baseline: Fte, weeks: Weeks, reference_weeks: Weeks) -> Fte {
    if reference_weeks == 0 {
        return baseline;
    }
    let exact = f64::from(baseline) * f64::from(weeks) / f64::from(reference_weeks);
    exact.round() as Fte
}

/// Sum of every role's gap at this acceleration.
pub fn total_gap(scaled: &[ScaledRequirement]) -> Fte {
    scaled.iter().map(|r| r.gap).sum()
}

/// Roles that actually need reallocation.
pub fn gap_roles(scaled: &[ScaledRequirement]) -> impl Iterator<Item = &ScaledRequirement> {
    scaled.iter().filter(|r| r.gap > 0)
}
