//! Snapshot — every derived value of a scenario at one instant, in a
//! shape the presentation layer can render directly.
//!
//! Snapshots are rebuilt from scratch on every request and never cached.

use crate::{
    allocation::AllocationPlan,
    coverage::RoleCoverage,
    demand::ScaledRequirement,
    impact::InitiativeImpact,
    scenario::ScenarioBanner,
    tradeoff::Verdict,
    types::{Fte, Role, Weeks},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub weeks: Weeks,
    pub sites: u32,
    pub target_date: NaiveDate,
    pub banner: ScenarioBanner,
    pub can_optimise: bool,
    pub plan: AllocationPlan,
    pub requirements: Vec<ScaledRequirement>,
    pub coverage: Vec<RoleCoverage>,
    pub covered_by_role: BTreeMap<Role, Fte>,
    pub total_gap: Fte,
    pub remaining_gap: Fte,
    pub external_hiring: BTreeMap<Role, Fte>,
    pub total_reallocated: Fte,
    pub total_bench: Fte,
    /// Thousands of currency units.
    pub cost: u64,
    pub market_lead_months: f64,
    pub verdict: Verdict,
    pub impacts: Vec<InitiativeImpact>,
}
