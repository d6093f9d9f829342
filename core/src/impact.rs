//! Schedule impact on source initiatives.
//!
//! Slippage is linear: each FTE removed from a role adds that role's
//! weeks_per_fte to every phase it affects. No interaction between roles.
//! Bench draws never contribute.

use crate::{
    allocation::Allocation,
    config::SourcePool,
    types::{Fte, InitiativeId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseImpact {
    pub phase_label: String,
    /// Unrounded weeks of slippage.
    pub slippage_weeks: f64,
    pub is_impacted: bool,
}

impl PhaseImpact {
    /// Slippage rounded to one decimal for display.
    pub fn display_weeks(&self) -> f64 {
        round_to_tenth(self.slippage_weeks)
    }
}

/// Half away from zero, one decimal.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Slippage per phase of one source initiative under `allocation`.
///
/// Every phase referenced anywhere in the initiative's role table is
/// reported, impacted or not. Unknown initiatives yield no phases.
pub fn phase_impacts(
    initiative_id: &str,
    allocation: &Allocation,
    sources: &[SourcePool],
) -> Vec<PhaseImpact> {
    let Some(source) = sources.iter().find(|s| s.initiative_id == initiative_id) else {
        return Vec::new();
    };

    let mut impacts: Vec<PhaseImpact> = source
        .phase_labels()
        .into_iter()
        .map(|label| PhaseImpact {
            phase_label: label.to_string(),
            slippage_weeks: 0.0,
            is_impacted: false,
        })
        .collect();

    for role in &source.roles {
        let removed = allocation.get(initiative_id, &role.role);
        if removed == 0 {
            continue;
        }
        for weight in &role.phase_impacts {
            if let Some(impact) = impacts.iter_mut().find(|i| i.phase_label == weight.phase_label) {
                impact.slippage_weeks += f64::from(removed) * weight.weeks_per_fte;
            }
        }
    }

    for impact in &mut impacts {
        impact.is_impacted = impact.slippage_weeks > 0.0;
    }
    impacts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeRisk {
    OnTrack,
    AtRisk,
    SignificantlyImpacted,
}

impl InitiativeRisk {
    pub fn from_removed(fte_removed: Fte) -> Self {
        match fte_removed {
            0 => Self::OnTrack,
            1..=2 => Self::AtRisk,
            _ => Self::SignificantlyImpacted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::SignificantlyImpacted => "Significantly Impacted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeImpact {
    pub initiative_id: InitiativeId,
    pub label: String,
    pub fte_removed: Fte,
    pub risk: InitiativeRisk,
    pub phases: Vec<PhaseImpact>,
    pub summary: String,
}

/// Full impact card for one source initiative.
pub fn initiative_impact(
    source: &SourcePool,
    allocation: &Allocation,
    sources: &[SourcePool],
) -> InitiativeImpact {
    let fte_removed = allocation.removed_from(&source.initiative_id);
    let phases = phase_impacts(&source.initiative_id, allocation, sources);
    let summary = impact_summary(fte_removed, &phases);
    InitiativeImpact {
        initiative_id: source.initiative_id.clone(),
        label: source.label.clone(),
        fte_removed,
        risk: InitiativeRisk::from_removed(fte_removed),
        phases,
        summary,
    }
}

fn impact_summary(fte_removed: Fte, phases: &[PhaseImpact]) -> String {
    if fte_removed == 0 {
        return "No FTEs reallocated — study unaffected.".to_string();
    }
    let impacted: Vec<String> = phases
        .iter()
        .filter(|p| p.is_impacted)
        .map(|p| format!("{} +{}w", p.phase_label, p.display_weeks()))
        .collect();
    if impacted.is_empty() {
        format!("{fte_removed} FTE removed — phase impact minimal.")
    } else {
        format!("{fte_removed} FTE removed — {}.", impacted.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_happens_only_for_display() {
        let impact = PhaseImpact {
            phase_label: "Recruitment".into(),
            slippage_weeks: 0.1 + 0.2,
            is_impacted: true,
        };
        assert_ne!(impact.slippage_weeks, 0.3);
        assert_eq!(impact.display_weeks(), 0.3);
    }

    #[test]
    fn risk_thresholds() {
        assert_eq!(InitiativeRisk::from_removed(0), InitiativeRisk::OnTrack);
        assert_eq!(InitiativeRisk::from_removed(2), InitiativeRisk::AtRisk);
        assert_eq!(InitiativeRisk::from_removed(3), InitiativeRisk::SignificantlyImpacted);
    }

    #[test]
    fn summary_lists_impacted_phases() {
        let phases = vec![
            PhaseImpact { phase_label: "Recruitment".into(), slippage_weeks: 1.6, is_impacted: true },
            PhaseImpact { phase_label: "Data Management".into(), slippage_weeks: 0.0, is_impacted: false },
        ];
        assert_eq!(impact_summary(2, &phases), "2 FTE removed — Recruitment +1.6w.");
        assert_eq!(impact_summary(0, &phases), "No FTEs reallocated — study unaffected.");
    }
}
