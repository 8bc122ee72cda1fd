//! Interaction records and the agent directory, as handed over by the
//! hosting layer.
//!
//! Records are loosely populated by collaborators, so every field has an
//! explicit default and deserialization never fails on a missing key.

use crate::{
    catalog::RecommendedAction,
    types::{AgentId, RootCauseLabel, UNKNOWN_AGENT},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintSeverity {
    #[default]
    Low,
    Medium,
    High,
}

impl ComplaintSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low    => "Low",
            Self::Medium => "Medium",
            Self::High   => "High",
        }
    }
}

/// One customer contact. Immutable input apart from the derived
/// classification fields filled in by the classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Interaction {
    pub interaction_id: String,
    pub timestamp: Option<NaiveDateTime>,

    // Categorical
    pub channel: Option<String>,
    pub customer_segment: Option<String>,
    pub line_of_business: Option<String>,
    pub call_reason: Option<String>,
    pub product: Option<String>,
    pub region: Option<String>,
    pub team_leader: Option<String>,
    pub agent_id: Option<AgentId>,
    pub agent_name: Option<String>,
    pub disposition: Option<String>,

    // Numeric
    pub handling_time_seconds: u32,
    pub hold_time_seconds: u32,
    pub transfer_count: u32,
    pub estimated_cost_dollars: f64,

    // Flags
    pub is_complaint: bool,
    pub resolved_on_first_contact: bool,
    pub escalated: bool,
    pub digital_eligible: bool,
    pub deflection_attempted: bool,
    pub deflection_success: bool,

    // Complaint detail
    pub complaint_category: Option<String>,
    pub complaint_severity: Option<ComplaintSeverity>,
    pub complaint_text: Option<String>,
    pub agent_notes: Option<String>,
    pub digital_failure_reason: Option<String>,

    // Derived by classification
    pub root_cause_label: Option<RootCauseLabel>,
    pub root_cause_confidence: Option<f64>,
    pub recommended_actions: Vec<RecommendedAction>,
}

impl Interaction {
    pub fn agent(&self) -> &str {
        self.agent_id.as_deref().unwrap_or(UNKNOWN_AGENT)
    }

    pub fn severity(&self) -> ComplaintSeverity {
        self.complaint_severity.unwrap_or_default()
    }

    /// Label used for grouping, falling back to `default_label` for
    /// records that were never classified.
    pub fn label_or<'a>(&'a self, default_label: &'a str) -> &'a str {
        self.root_cause_label.as_deref().unwrap_or(default_label)
    }

    /// Complaint text if present and non-empty, else agent notes.
    pub fn example_text(&self) -> Option<&str> {
        [self.complaint_text.as_deref(), self.agent_notes.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
    }

    /// Complaint text and agent notes joined and lowercased, for
    /// substring matching.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {}",
            self.complaint_text.as_deref().unwrap_or_default(),
            self.agent_notes.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub team_leader: Option<String>,
    pub region: Option<String>,
    pub tenure_band: Option<String>,
}

/// Agent id → profile lookup supplied by the hosting layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentDirectory {
    agents: HashMap<AgentId, AgentProfile>,
}

impl AgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: AgentProfile) {
        self.agents.insert(profile.agent_id.clone(), profile);
    }

    pub fn get(&self, agent_id: &str) -> Option<&AgentProfile> {
        self.agents.get(agent_id)
    }

    /// Display name for an agent, or the id itself when unknown.
    pub fn display_name(&self, agent_id: &str) -> String {
        self.get(agent_id)
            .map(|p| p.agent_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| agent_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl FromIterator<AgentProfile> for AgentDirectory {
    fn from_iter<I: IntoIterator<Item = AgentProfile>>(iter: I) -> Self {
        let mut directory = Self::new();
        for profile in iter {
            directory.insert(profile);
        }
        directory
    }
}
