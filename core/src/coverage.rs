//! Coverage & gap aggregation over any allocation, engine-produced or
//! hand-edited. Over-allocation of a role is capped at that role's gap
//! and never spills into another role.

use crate::{
    allocation::{Allocation, BenchAllocation},
    demand::ScaledRequirement,
    types::{Fte, Role, Weeks},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// FTE per role summed across every source initiative and the bench.
pub fn covered_by_role(allocation: &Allocation, bench: &BenchAllocation) -> BTreeMap<Role, Fte> {
    let mut covered: BTreeMap<Role, Fte> = BTreeMap::new();
    for (_, role, fte) in allocation.iter() {
        *covered.entry(role.to_string()).or_default() += fte;
    }
    for (role, fte) in bench.iter() {
        *covered.entry(role.to_string()).or_default() += fte;
    }
    covered
}

/// Uncovered part of one role's gap.
fn shortfall(req: &ScaledRequirement, covered: &BTreeMap<Role, Fte>) -> Fte {
    let allocated = covered.get(&req.role).copied().unwrap_or(0);
    req.gap - allocated.min(req.gap)
}

/// Σ over roles of the uncovered gap.
pub fn remaining_gap(
    allocation: &Allocation,
    bench: &BenchAllocation,
    scaled: &[ScaledRequirement],
) -> Fte {
    let covered = covered_by_role(allocation, bench);
    scaled.iter().map(|r| shortfall(r, &covered)).sum()
}

/// Roles whose gap cannot be covered internally, with the shortfall.
/// Empty when no external hiring is needed.
pub fn external_hiring_needed(
    allocation: &Allocation,
    bench: &BenchAllocation,
    scaled: &[ScaledRequirement],
) -> BTreeMap<Role, Fte> {
    let covered = covered_by_role(allocation, bench);
    scaled
        .iter()
        .filter_map(|r| {
            let short = shortfall(r, &covered);
            (short > 0).then(|| (r.role.clone(), short))
        })
        .collect()
}

/// One row of the required-vs-covered breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCoverage {
    pub role: Role,
    pub required: Fte,
    pub available: Fte,
    pub gap: Fte,
    /// Allocated FTE counted against the gap, capped at the gap.
    pub covered: Fte,
    pub still_needed: Fte,
}

pub fn coverage_rows(
    allocation: &Allocation,
    bench: &BenchAllocation,
    scaled: &[ScaledRequirement],
) -> Vec<RoleCoverage> {
    let covered = covered_by_role(allocation, bench);
    scaled
        .iter()
        .map(|r| {
            let still_needed = shortfall(r, &covered);
            RoleCoverage {
                role: r.role.clone(),
                required: r.required,
                available: r.available,
                gap: r.gap,
                covered: r.gap - still_needed,
                still_needed,
            }
        })
        .collect()
}

/// Raised when an engine run still leaves a shortfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringAlert {
    pub weeks: Weeks,
    pub total_fte: Fte,
    pub role_count: usize,
    pub roles: BTreeMap<Role, Fte>,
}

impl HiringAlert {
    pub fn from_shortfall(weeks: Weeks, roles: BTreeMap<Role, Fte>) -> Option<Self> {
        if roles.is_empty() {
            return None;
        }
        Some(Self {
            weeks,
            total_fte: roles.values().sum(),
            role_count: roles.len(),
            roles,
        })
    }
}
