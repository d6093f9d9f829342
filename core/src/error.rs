use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid reference data: {reason}")]
    InvalidReferenceData { reason: String },

    #[error("Acceleration of {weeks} weeks outside allowed range {min}..={max}")]
    WeeksOutOfRange { weeks: u32, min: u32, max: u32 },

    #[error("{sites} additional sites outside allowed range {min}..={max}")]
    SitesOutOfRange { sites: u32, min: u32, max: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
