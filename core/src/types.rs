//! Shared primitive types used across the planner.

/// A functional role, e.g. "Clinical Operations". Roles are matched by exact name.
pub type Role = String;

/// A stable identifier for an initiative (study), e.g. "NP-HEM-215".
pub type InitiativeId = String;

/// Whole full-time-equivalent headcount.
pub type Fte = u32;

/// Acceleration target in whole weeks.
pub type Weeks = u32;
