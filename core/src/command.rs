use crate::types::{InitiativeId, Role, Weeks};
use serde::{Deserialize, Serialize};

/// All host-issued commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlannerCommand {
    // ── Parameters ────────────────────────────────
    SetWeeks { weeks: Weeks },
    SetSites { sites: u32 },

    // ── Allocation ────────────────────────────────
    Optimise,
    AdjustSource {
        initiative_id: InitiativeId,
        role:          Role,
        delta:         i64,
    },
    AdjustBench {
        role:  Role,
        delta: i64,
    },
}
