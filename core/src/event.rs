//! Events emitted by scenario session operations.
//!
//! The host reacts to these (e.g. raising the hiring dialog) instead of
//! diffing state itself.

use crate::types::{Fte, InitiativeId, Role, Weeks};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannerEvent {
    WeeksChanged {
        from: Weeks,
        to: Weeks,
    },
    SitesChanged {
        from: u32,
        to: u32,
    },
    AllocationOptimised {
        weeks: Weeks,
        remaining_gap: Fte,
    },
    ExternalHiringRequired {
        weeks: Weeks,
        total_fte: Fte,
        roles: BTreeMap<Role, Fte>,
    },
    SourceAdjusted {
        initiative_id: InitiativeId,
        role: Role,
        value: Fte,
    },
    BenchAdjusted {
        role: Role,
        value: Fte,
    },
}
