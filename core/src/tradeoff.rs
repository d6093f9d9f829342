//! Trade-off evaluation — cost, market lead and the qualitative verdict.
//!
//! Costs are in thousands of currency units.

use crate::{
    allocation::{Allocation, BenchAllocation},
    coverage::{external_hiring_needed, remaining_gap},
    demand::ScaledRequirement,
    types::{Fte, Weeks},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeoffModel {
    pub site_cost_per_unit: u64,
    pub week_cost_per_unit: u64,
    pub hiring_cost_per_fte: u64,
    /// Highest cost still considered manageable.
    pub cost_threshold: u64,
    /// Largest remaining gap that is a caution rather than a risk.
    pub caution_gap: Fte,
}

impl Default for TradeoffModel {
    fn default() -> Self {
        Self {
            site_cost_per_unit: 120,
            week_cost_per_unit: 80,
            hiring_cost_per_fte: 200,
            cost_threshold: 5000,
            caution_gap: 2,
        }
    }
}

impl TradeoffModel {
    pub fn cost_impact(&self, weeks: Weeks, sites: u32, external_hiring_count: Fte) -> u64 {
        u64::from(sites) * self.site_cost_per_unit
            + u64::from(weeks) * self.week_cost_per_unit
            + u64::from(external_hiring_count) * self.hiring_cost_per_fte
    }

    /// Verdict for an arbitrary allocation. First match wins:
    /// covered and affordable, covered, small gap, large gap.
    pub fn verdict(
        &self,
        weeks: Weeks,
        sites: u32,
        allocation: &Allocation,
        bench: &BenchAllocation,
        scaled: &[ScaledRequirement],
    ) -> Verdict {
        let gap = remaining_gap(allocation, bench, scaled);
        let hiring: Fte = external_hiring_needed(allocation, bench, scaled).values().sum();
        let cost = self.cost_impact(weeks, sites, hiring);
        self.classify(gap, cost)
    }

    pub fn classify(&self, remaining_gap: Fte, cost: u64) -> Verdict {
        let level = match remaining_gap {
            0 if cost <= self.cost_threshold => VerdictLevel::Optimal,
            0 => VerdictLevel::Feasible,
            g if g <= self.caution_gap => VerdictLevel::Caution,
            _ => VerdictLevel::Risk,
        };
        Verdict::new(level, remaining_gap)
    }
}

/// Months of market lead gained, to one decimal.
/// Four weeks of acceleration buy three quarters of a month.
pub fn market_lead(weeks: Weeks) -> f64 {
    (f64::from(weeks) / 4.0 * 0.75 * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLevel {
    Optimal,
    Feasible,
    Caution,
    Risk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub level: VerdictLevel,
    pub label: String,
    pub description: String,
}

impl Verdict {
    fn new(level: VerdictLevel, remaining_gap: Fte) -> Self {
        let (label, description) = match level {
            VerdictLevel::Optimal => (
                "Optimal",
                "Full FTE coverage with manageable cost impact.".to_string(),
            ),
            VerdictLevel::Feasible => (
                "Feasible",
                "Full FTE coverage achieved but cost is high — review budget.".to_string(),
            ),
            VerdictLevel::Caution => (
                "Caution",
                format!(
                    "{remaining_gap} FTE gap remains — consider increasing reallocation or hiring."
                ),
            ),
            VerdictLevel::Risk => (
                "At Risk",
                format!(
                    "{remaining_gap} FTE gap unresolved — acceleration is at risk without additional headcount."
                ),
            ),
        };
        Self {
            level,
            label: label.to_string(),
            description,
        }
    }
}
