//! The allocation engine — greedy, per-role headcount reallocation.
//!
//! ORDER OF DRAWS (per role with a gap, roles independent):
//!   1. Bench capacity, up to the gap. Zero disruption.
//!   2. Source initiatives holding capacity for the role, ascending by
//!      aggregate slippage score (sum of weeks_per_fte over the phases the
//!      role affects). Ties keep reference-data order.
//!   3. Whatever is left is the external hiring shortfall. It is not
//!      recorded here; coverage.rs derives it.
//!
//! RULES:
//!   - Never allocate more than a role's gap.
//!   - Never exceed a (source, role) or bench cap.
//!   - Output depends only on the arguments. No prior allocation is read.
//!   - Caps are per (initiative, role); an initiative can release up to the
//!     sum of its role caps.

use crate::{
    allocation::{Allocation, AllocationOrigin, AllocationPlan, BenchAllocation},
    config::{BenchPool, SourcePool},
    demand::ScaledRequirement,
    types::{Fte, Weeks},
};

/// A source initiative able to release FTE for one role.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub initiative_id: &'a str,
    pub max_fte: Fte,
    pub slippage_score: f64,
}

/// Compute the least-disruptive allocation for `scaled` demand at `weeks`.
pub fn optimal_allocation(
    weeks: Weeks,
    sources: &[SourcePool],
    bench_pool: &BenchPool,
    scaled: &[ScaledRequirement],
) -> AllocationPlan {
    let mut allocation = Allocation::new();
    let mut bench = BenchAllocation::new();

    for req in scaled.iter().filter(|r| r.gap > 0) {
        let role = req.role.as_str();
        let mut remaining = req.gap;

        let from_bench = bench_pool.cap(role).min(remaining);
        if from_bench > 0 {
            bench.set(role, from_bench);
            remaining -= from_bench;
        }
        log::debug!("weeks={weeks} {role}: gap={} bench={from_bench}", req.gap);

        for candidate in ranked_candidates(sources, role) {
            if remaining == 0 {
                break;
            }
            let take = candidate.max_fte.min(remaining);
            let drawn = allocation.get(candidate.initiative_id, role);
            allocation.set(candidate.initiative_id, role, drawn + take);
            remaining -= take;
            log::debug!(
                "weeks={weeks} {role}: took {take} from {} (score {:.2})",
                candidate.initiative_id,
                candidate.slippage_score
            );
        }

        if remaining > 0 {
            log::debug!("weeks={weeks} {role}: {remaining} FTE uncovered internally");
        }
    }

    AllocationPlan {
        allocation,
        bench,
        origin: AllocationOrigin::Engine { optimized_for_weeks: weeks },
    }
}

/// Sources with capacity for `role`, cheapest slippage first.
/// Stable sort, so equal scores keep reference-data order.
pub fn ranked_candidates<'a>(sources: &'a [SourcePool], role: &str) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = sources
        .iter()
        .filter_map(|source| {
            let entry = source.role(role)?;
            (entry.max_fte > 0).then(|| Candidate {
                initiative_id: source.initiative_id.as_str(),
                max_fte: entry.max_fte,
                slippage_score: entry.slippage_score(),
            })
        })
        .collect();
    candidates.sort_by(|a, b| a.slippage_score.total_cmp(&b.slippage_score));
    candidates
}
