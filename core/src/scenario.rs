//! Scenario session — the host side of the planner.
//!
//! Owns the only mutable state (acceleration weeks, additional sites and
//! the current allocation plan) and re-derives everything else through
//! the pure calculators on demand.
//!
//! RULES:
//!   - Changing weeks never re-runs the engine; the plan stays as it was
//!     and the banner reports whether it still matches.
//!   - Any manual edit turns the plan's origin into Manual.
//!   - Parameter changes are range-checked here, not in the calculators.

use crate::{
    allocation::AllocationPlan,
    command::PlannerCommand,
    config::PlannerConfig,
    coverage::{self, HiringAlert},
    demand::{self, ScaledRequirement},
    engine,
    error::{PlanError, PlanResult},
    event::PlannerEvent,
    impact,
    snapshot::ScenarioSnapshot,
    tradeoff,
    types::{Fte, Weeks},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which story the current plan tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioBanner {
    /// Engine recommendation at the default acceleration target.
    AiRecommended,
    /// Engine output for the current (non-default) target.
    Optimised,
    /// Hand-edited, or optimised for a different target.
    UserModified,
}

pub struct ScenarioSession {
    config: PlannerConfig,
    weeks: Weeks,
    sites: u32,
    plan: AllocationPlan,
}

impl ScenarioSession {
    /// Start at the default parameters with the engine's recommendation.
    pub fn new(config: PlannerConfig) -> Self {
        let weeks = config.scenario.acceleration_weeks.default;
        let sites = config.scenario.additional_sites.default;
        let mut session = Self {
            config,
            weeks,
            sites,
            plan: AllocationPlan::manual(),
        };
        session.plan = session.engine_plan();
        session
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn weeks(&self) -> Weeks {
        self.weeks
    }

    pub fn sites(&self) -> u32 {
        self.sites
    }

    pub fn plan(&self) -> &AllocationPlan {
        &self.plan
    }

    pub fn scaled_requirements(&self) -> Vec<ScaledRequirement> {
        let reference = &self.config.reference;
        demand::scale_requirements(self.weeks, reference.reference_weeks, &reference.requirements)
    }

    fn engine_plan(&self) -> AllocationPlan {
        let reference = &self.config.reference;
        engine::optimal_allocation(
            self.weeks,
            &reference.sources,
            &reference.bench,
            &self.scaled_requirements(),
        )
    }

    pub fn set_weeks(&mut self, weeks: Weeks) -> PlanResult<Vec<PlannerEvent>> {
        let range = self.config.scenario.acceleration_weeks;
        if !range.contains(weeks) {
            return Err(PlanError::WeeksOutOfRange {
                weeks,
                min: range.min,
                max: range.max,
            });
        }
        if weeks == self.weeks {
            return Ok(vec![]);
        }
        let from = std::mem::replace(&mut self.weeks, weeks);
        log::info!("Acceleration target {from} -> {weeks} weeks");
        Ok(vec![PlannerEvent::WeeksChanged { from, to: weeks }])
    }

    pub fn set_sites(&mut self, sites: u32) -> PlanResult<Vec<PlannerEvent>> {
        let range = self.config.scenario.additional_sites;
        if !range.contains(sites) {
            return Err(PlanError::SitesOutOfRange {
                sites,
                min: range.min,
                max: range.max,
            });
        }
        if sites == self.sites {
            return Ok(vec![]);
        }
        let from = std::mem::replace(&mut self.sites, sites);
        Ok(vec![PlannerEvent::SitesChanged { from, to: sites }])
    }

    /// Replace the plan with the engine's allocation for the current weeks.
    pub fn optimise(&mut self) -> Vec<PlannerEvent> {
        self.plan = self.engine_plan();
        let scaled = self.scaled_requirements();
        let remaining_gap =
            coverage::remaining_gap(&self.plan.allocation, &self.plan.bench, &scaled);
        log::info!(
            "Optimised allocation for {} weeks: {} FTE from sources, {} from bench, gap {remaining_gap}",
            self.weeks,
            self.plan.allocation.total(),
            self.plan.bench.total()
        );

        let mut events = vec![PlannerEvent::AllocationOptimised {
            weeks: self.weeks,
            remaining_gap,
        }];
        if let Some(alert) = self.hiring_alert() {
            events.push(PlannerEvent::ExternalHiringRequired {
                weeks: alert.weeks,
                total_fte: alert.total_fte,
                roles: alert.roles,
            });
        }
        events
    }

    pub fn adjust_source(
        &mut self,
        initiative_id: &str,
        role: &str,
        delta: i64,
    ) -> Vec<PlannerEvent> {
        let value = self
            .plan
            .adjust_source(&self.config.reference, initiative_id, role, delta);
        vec![PlannerEvent::SourceAdjusted {
            initiative_id: initiative_id.to_string(),
            role: role.to_string(),
            value,
        }]
    }

    pub fn adjust_bench(&mut self, role: &str, delta: i64) -> Vec<PlannerEvent> {
        let value = self
            .plan
            .adjust_bench(&self.config.reference.bench, role, delta);
        vec![PlannerEvent::BenchAdjusted {
            role: role.to_string(),
            value,
        }]
    }

    pub fn apply(&mut self, command: PlannerCommand) -> PlanResult<Vec<PlannerEvent>> {
        match command {
            PlannerCommand::SetWeeks { weeks } => self.set_weeks(weeks),
            PlannerCommand::SetSites { sites } => self.set_sites(sites),
            PlannerCommand::Optimise => Ok(self.optimise()),
            PlannerCommand::AdjustSource { initiative_id, role, delta } => {
                Ok(self.adjust_source(&initiative_id, &role, delta))
            }
            PlannerCommand::AdjustBench { role, delta } => Ok(self.adjust_bench(&role, delta)),
        }
    }

    pub fn banner(&self) -> ScenarioBanner {
        let default_weeks = self.config.scenario.acceleration_weeks.default;
        if self.weeks == default_weeks && self.plan.is_optimised_for(default_weeks) {
            ScenarioBanner::AiRecommended
        } else if self.plan.is_optimised_for(self.weeks) {
            ScenarioBanner::Optimised
        } else {
            ScenarioBanner::UserModified
        }
    }

    /// False while the plan already is the engine's answer for these weeks.
    pub fn can_optimise(&self) -> bool {
        !self.plan.is_optimised_for(self.weeks)
    }

    /// Accelerated phase start: planned start brought forward by `weeks`.
    pub fn target_date(&self) -> NaiveDate {
        self.config.scenario.planned_phase_start - Duration::weeks(i64::from(self.weeks))
    }

    /// Shortfall the current plan leaves for external hiring, if any.
    pub fn hiring_alert(&self) -> Option<HiringAlert> {
        let scaled = self.scaled_requirements();
        let shortfall =
            coverage::external_hiring_needed(&self.plan.allocation, &self.plan.bench, &scaled);
        HiringAlert::from_shortfall(self.weeks, shortfall)
    }

    pub fn snapshot_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn snapshot(&self) -> ScenarioSnapshot {
        let reference = &self.config.reference;
        let model = &self.config.tradeoff;
        let scaled = self.scaled_requirements();
        let allocation = &self.plan.allocation;
        let bench = &self.plan.bench;

        let external_hiring = coverage::external_hiring_needed(allocation, bench, &scaled);
        let hiring_count: Fte = external_hiring.values().sum();

        ScenarioSnapshot {
            weeks: self.weeks,
            sites: self.sites,
            target_date: self.target_date(),
            banner: self.banner(),
            can_optimise: self.can_optimise(),
            plan: self.plan.clone(),
            coverage: coverage::coverage_rows(allocation, bench, &scaled),
            covered_by_role: coverage::covered_by_role(allocation, bench),
            total_gap: demand::total_gap(&scaled),
            remaining_gap: coverage::remaining_gap(allocation, bench, &scaled),
            external_hiring,
            total_reallocated: allocation.total(),
            total_bench: bench.total(),
            cost: model.cost_impact(self.weeks, self.sites, hiring_count),
            market_lead_months: tradeoff::market_lead(self.weeks),
            verdict: model.verdict(self.weeks, self.sites, allocation, bench, &scaled),
            impacts: reference
                .sources
                .iter()
                .map(|s| impact::initiative_impact(s, allocation, &reference.sources))
                .collect(),
            requirements: scaled,
        }
    }
}
