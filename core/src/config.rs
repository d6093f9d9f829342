use crate::{
    error::{PlanError, PlanResult},
    tradeoff::TradeoffModel,
    types::{Fte, InitiativeId, Role, Weeks},
};
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ── Reference data ─────────────────────────────────────────────────

/// Baseline staffing for one role of the priority initiative,
/// defined at `ReferenceData::reference_weeks` of acceleration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub role: Role,
    pub baseline_required: Fte,
    pub available: Fte,
}

/// Weeks of slippage a phase suffers per FTE removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeight {
    pub phase_label: String,
    pub weeks_per_fte: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRole {
    pub role: Role,
    pub max_fte: Fte,
    #[serde(default)]
    pub phase_impacts: Vec<PhaseWeight>,
}

impl SourceRole {
    /// Aggregate slippage per FTE across every phase this role touches.
    pub fn slippage_score(&self) -> f64 {
        self.phase_impacts.iter().map(|p| p.weeks_per_fte).sum()
    }
}

/// A lower-priority initiative that can release headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePool {
    pub initiative_id: InitiativeId,
    #[serde(default)]
    pub label: String,
    pub roles: Vec<SourceRole>,
}

impl SourcePool {
    pub fn role(&self, role: &str) -> Option<&SourceRole> {
        self.roles.iter().find(|r| r.role == role)
    }

    /// Releasable FTE for `role`; roles the pool does not list release nothing.
    pub fn max_fte(&self, role: &str) -> Fte {
        self.role(role).map_or(0, |r| r.max_fte)
    }

    /// Distinct phase labels in order of first appearance.
    pub fn phase_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for phase in self.roles.iter().flat_map(|r| &r.phase_impacts) {
            if !labels.contains(&phase.phase_label.as_str()) {
                labels.push(&phase.phase_label);
            }
        }
        labels
    }
}

/// Unstaffed capacity per role. Reallocating from here disrupts nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchPool {
    pub roles: HashMap<Role, Fte>,
}

impl BenchPool {
    pub fn cap(&self, role: &str) -> Fte {
        self.roles.get(role).copied().unwrap_or(0)
    }
}

/// Static, read-only tables the engine consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// The priority initiative being accelerated.
    pub initiative_id: InitiativeId,
    /// Acceleration level at which `baseline_required` is defined.
    pub reference_weeks: Weeks,
    pub requirements: Vec<RoleRequirement>,
    pub sources: Vec<SourcePool>,
    pub bench: BenchPool,
}

impl ReferenceData {
    pub fn source(&self, initiative_id: &str) -> Option<&SourcePool> {
        self.sources.iter().find(|s| s.initiative_id == initiative_id)
    }

    /// Cap for one (initiative, role) pair. Unknown identifiers are zero-capacity.
    pub fn source_cap(&self, initiative_id: &str, role: &str) -> Fte {
        self.source(initiative_id).map_or(0, |s| s.max_fte(role))
    }

    pub fn validate(&self) -> PlanResult<()> {
        if self.reference_weeks == 0 {
            return Err(invalid("reference_weeks must be positive".into()));
        }

        let mut roles = HashSet::new();
        for req in &self.requirements {
            if !roles.insert(req.role.as_str()) {
                return Err(invalid(format!("duplicate requirement role '{}'", req.role)));
            }
        }

        let mut initiatives = HashSet::new();
        for source in &self.sources {
            if !initiatives.insert(source.initiative_id.as_str()) {
                return Err(invalid(format!(
                    "duplicate source initiative '{}'",
                    source.initiative_id
                )));
            }
            if source.initiative_id == self.initiative_id {
                return Err(invalid(format!(
                    "priority initiative '{}' cannot also be a source",
                    source.initiative_id
                )));
            }

            let mut source_roles = HashSet::new();
            for role in &source.roles {
                if !source_roles.insert(role.role.as_str()) {
                    return Err(invalid(format!(
                        "role '{}' listed twice for '{}'",
                        role.role, source.initiative_id
                    )));
                }
                for phase in &role.phase_impacts {
                    if !phase.weeks_per_fte.is_finite() || phase.weeks_per_fte < 0.0 {
                        return Err(invalid(format!(
                            "weeks_per_fte for {}/{}/{} must be a non-negative number",
                            source.initiative_id, role.role, phase.phase_label
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> PlanError {
    PlanError::InvalidReferenceData { reason }
}

// ── Scenario defaults ──────────────────────────────────────────────

/// Inclusive range plus the recommended value for one host slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SliderRange {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    pub acceleration_weeks: SliderRange,
    pub additional_sites: SliderRange,
    /// Currently planned phase start of the priority initiative.
    pub planned_phase_start: NaiveDate,
}

// ── On-disk layout ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct RequirementsFile {
    initiative_id: InitiativeId,
    reference_weeks: Weeks,
    roles: Vec<RoleRequirement>,
}

#[derive(Debug, Clone, Deserialize)]
struct SourcePoolsFile {
    sources: Vec<SourcePool>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScenarioDefaultsFile {
    acceleration_weeks: SliderRange,
    additional_sites: SliderRange,
    planned_phase_start: NaiveDate,
    cost_model: TradeoffModel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub reference: ReferenceData,
    pub scenario: ScenarioDefaults,
    pub tradeoff: TradeoffModel,
}

impl PlannerConfig {
    /// Load from the data/ directory.
    /// In tests, use PlannerConfig::demo().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let requirements: RequirementsFile =
            read_json(&format!("{data_dir}/reference/fte_requirements.json"))?;
        let pools: SourcePoolsFile =
            read_json(&format!("{data_dir}/reference/source_pools.json"))?;
        let bench: BenchPool = read_json(&format!("{data_dir}/reference/bench_pool.json"))?;
        let defaults: ScenarioDefaultsFile =
            read_json(&format!("{data_dir}/scenario/scenario_defaults.json"))?;

        let config = Self {
            reference: ReferenceData {
                initiative_id: requirements.initiative_id,
                reference_weeks: requirements.reference_weeks,
                requirements: requirements.roles,
                sources: pools.sources,
                bench,
            },
            scenario: ScenarioDefaults {
                acceleration_weeks: defaults.acceleration_weeks,
                additional_sites: defaults.additional_sites,
                planned_phase_start: defaults.planned_phase_start,
            },
            tradeoff: defaults.cost_model,
        };
        config.validate()?;

        log::info!(
            "Loaded reference data for {}: {} roles, {} source initiatives",
            config.reference.initiative_id,
            config.reference.requirements.len(),
            config.reference.sources.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> PlanResult<()> {
        self.reference.validate()?;
        for (name, range) in [
            ("acceleration_weeks", &self.scenario.acceleration_weeks),
            ("additional_sites", &self.scenario.additional_sites),
        ] {
            if !(range.min <= range.default && range.default <= range.max) {
                return Err(invalid(format!(
                    "{name} default {} outside {}..={}",
                    range.default, range.min, range.max
                )));
            }
        }
        if self.scenario.acceleration_weeks.min == 0 {
            return Err(invalid("acceleration_weeks must start above zero".into()));
        }
        Ok(())
    }

    /// The NP-MM-401 acceleration scenario with hardcoded tables, for tests.
    pub fn demo() -> Self {
        let requirement = |role: &str, baseline_required: Fte, available: Fte| RoleRequirement {
            role: role.into(),
            baseline_required,
            available,
        };
        let source_role = |role: &str, max_fte: Fte, phases: &[(&str, f64)]| SourceRole {
            role: role.into(),
            max_fte,
            phase_impacts: phases
                .iter()
                .map(|(label, w)| PhaseWeight {
                    phase_label: (*label).into(),
                    weeks_per_fte: *w,
                })
                .collect(),
        };

        let sources = vec![
            SourcePool {
                initiative_id: "NP-HEM-215".into(),
                label: "NovaPharma BiTE Therapy (DLBCL)".into(),
                roles: vec![
                    source_role(
                        "Clinical Operations",
                        2,
                        &[("Recruitment", 0.5), ("Site Monitoring", 1.0)],
                    ),
                    source_role("Biostatistics", 1, &[("Site Monitoring", 0.5)]),
                    source_role("Data Management", 2, &[("Recruitment", 0.5)]),
                ],
            },
            SourcePool {
                initiative_id: "NP-MM-318".into(),
                label: "NovaPharma Bispecific rrMM".into(),
                roles: vec![
                    source_role("Clinical Operations", 2, &[("Recruitment", 0.8)]),
                    source_role("Regulatory Affairs", 1, &[("Recruitment", 0.3)]),
                    source_role("Data Management", 2, &[("Data Management", 1.0)]),
                ],
            },
        ];

        let bench = BenchPool {
            roles: [
                ("Clinical Operations".to_string(), 0),
                ("Biostatistics".to_string(), 1),
                ("Data Management".to_string(), 1),
            ]
            .into(),
        };

        Self {
            reference: ReferenceData {
                initiative_id: "NP-MM-401".into(),
                reference_weeks: 12,
                requirements: vec![
                    requirement("Clinical Operations", 8, 5),
                    requirement("Biostatistics", 3, 2),
                    requirement("Medical Affairs", 2, 2),
                    requirement("Regulatory Affairs", 2, 1),
                    requirement("Data Management", 3, 2),
                ],
                sources,
                bench,
            },
            scenario: ScenarioDefaults {
                acceleration_weeks: SliderRange { min: 4, max: 20, default: 12 },
                additional_sites: SliderRange { min: 5, max: 30, default: 15 },
                planned_phase_start: NaiveDate::from_ymd_opt(2025, 8, 4)
                    .unwrap_or_default(),
            },
            tradeoff: TradeoffModel::default(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels_are_distinct_and_ordered() {
        let config = PlannerConfig::demo();
        let hem = config.reference.source("NP-HEM-215").expect("source exists");
        assert_eq!(hem.phase_labels(), vec!["Recruitment", "Site Monitoring"]);
    }

    #[test]
    fn unknown_identifiers_are_zero_capacity() {
        let config = PlannerConfig::demo();
        assert_eq!(config.reference.source_cap("NP-XX-000", "Clinical Operations"), 0);
        assert_eq!(config.reference.source_cap("NP-MM-318", "Medical Affairs"), 0);
        assert_eq!(config.reference.bench.cap("Regulatory Affairs"), 0);
    }

    #[test]
    fn duplicate_source_rejected() {
        let mut config = PlannerConfig::demo();
        let copy = config.reference.sources[0].clone();
        config.reference.sources.push(copy);
        assert!(matches!(
            config.validate(),
            Err(PlanError::InvalidReferenceData { .. })
        ));
    }

    #[test]
    fn negative_weeks_per_fte_rejected() {
        let mut config = PlannerConfig::demo();
        config.reference.sources[1].roles[0].phase_impacts[0].weeks_per_fte = -0.1;
        assert!(config.validate().is_err());
    }
}
