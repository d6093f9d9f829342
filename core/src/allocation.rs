//! Allocation values — who gives up how much headcount, and where the
//! current numbers came from.
//!
//! Maps are ordered so that iteration, serialization and equality are
//! stable across runs.

use crate::{
    config::{BenchPool, ReferenceData},
    types::{Fte, InitiativeId, Role, Weeks},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// initiative → role → FTE drawn from that initiative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<InitiativeId, BTreeMap<Role, Fte>>);

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, initiative_id: &str, role: &str) -> Fte {
        self.0
            .get(initiative_id)
            .and_then(|roles| roles.get(role))
            .copied()
            .unwrap_or(0)
    }

    pub fn set(&mut self, initiative_id: &str, role: &str, fte: Fte) {
        self.0
            .entry(initiative_id.to_string())
            .or_default()
            .insert(role.to_string(), fte);
    }

    /// Per-role draws from one initiative, if any were recorded.
    pub fn roles_for(&self, initiative_id: &str) -> Option<&BTreeMap<Role, Fte>> {
        self.0.get(initiative_id)
    }

    /// Every (initiative, role, fte) entry, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Fte)> {
        self.0.iter().flat_map(|(initiative, roles)| {
            roles
                .iter()
                .map(move |(role, fte)| (initiative.as_str(), role.as_str(), *fte))
        })
    }

    /// Total FTE removed from one initiative.
    pub fn removed_from(&self, initiative_id: &str) -> Fte {
        self.roles_for(initiative_id)
            .map_or(0, |roles| roles.values().sum())
    }

    /// Total FTE reallocated from all source initiatives.
    pub fn total(&self) -> Fte {
        self.iter().map(|(_, _, fte)| fte).sum()
    }
}

/// role → FTE drawn from the bench.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchAllocation(BTreeMap<Role, Fte>);

impl BenchAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: &str) -> Fte {
        self.0.get(role).copied().unwrap_or(0)
    }

    pub fn set(&mut self, role: &str, fte: Fte) {
        self.0.insert(role.to_string(), fte);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Fte)> {
        self.0.iter().map(|(role, fte)| (role.as_str(), *fte))
    }

    pub fn total(&self) -> Fte {
        self.0.values().sum()
    }
}

/// Where the current allocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AllocationOrigin {
    /// Produced by the allocation engine for this acceleration target.
    Engine { optimized_for_weeks: Weeks },
    /// Hand-edited after the last engine run.
    Manual,
}

impl AllocationOrigin {
    pub fn optimized_for_weeks(&self) -> Option<Weeks> {
        match self {
            Self::Engine { optimized_for_weeks } => Some(*optimized_for_weeks),
            Self::Manual => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub allocation: Allocation,
    pub bench: BenchAllocation,
    pub origin: AllocationOrigin,
}

impl AllocationPlan {
    /// An empty hand-built plan.
    pub fn manual() -> Self {
        Self {
            allocation: Allocation::new(),
            bench: BenchAllocation::new(),
            origin: AllocationOrigin::Manual,
        }
    }

    pub fn is_optimised_for(&self, weeks: Weeks) -> bool {
        self.origin.optimized_for_weeks() == Some(weeks)
    }

    /// Step one (initiative, role) cell by `delta`, clamped to `[0, max_fte]`.
    /// Any edit marks the plan as manual. Returns the new value.
    pub fn adjust_source(
        &mut self,
        reference: &ReferenceData,
        initiative_id: &str,
        role: &str,
        delta: i64,
    ) -> Fte {
        let cap = reference.source_cap(initiative_id, role);
        let current = self.allocation.get(initiative_id, role);
        let value = clamp_step(current, delta, cap);
        if i64::from(value) != i64::from(current).saturating_add(delta) {
            log::warn!(
                "Adjustment {delta:+} to {initiative_id}/{role} clamped to {value} (cap {cap})"
            );
        }
        self.allocation.set(initiative_id, role, value);
        self.origin = AllocationOrigin::Manual;
        value
    }

    /// Step one bench cell by `delta`, clamped to `[0, bench cap]`.
    pub fn adjust_bench(&mut self, bench_pool: &BenchPool, role: &str, delta: i64) -> Fte {
        let cap = bench_pool.cap(role);
        let current = self.bench.get(role);
        let value = clamp_step(current, delta, cap);
        if i64::from(value) != i64::from(current).saturating_add(delta) {
            log::warn!("Bench adjustment {delta:+} to {role} clamped to {value} (cap {cap})");
        }
        self.bench.set(role, value);
        self.origin = AllocationOrigin::Manual;
        value
    }
}

/// `min(cap, max(0, current + delta))`.
pub fn clamp_step(current: Fte, delta: i64, cap: Fte) -> Fte {
    let stepped = i64::from(current).saturating_add(delta).clamp(0, i64::from(cap));
    stepped as Fte
}
