//! Root-cause aggregation and agent-concentration analysis.
//!
//! Groups classified interactions by label and, per group:
//!   1. Frequency (complaint subset if any, else whole group)
//!   2. Share of all complaints in the batch
//!   3. Handling time and FCR over the whole group
//!   4. Impact score = frequency × average handling minutes
//!   5. Agent concentration from the top agents' share of frequency
//!   6. Example texts and catalog actions
//!
//! Groups are ranked by impact score, descending. Ties keep the order in
//! which their labels were first seen.

use crate::{
    catalog::{RecommendedAction, DEFAULT_ROOT_CAUSE},
    config::InsightConfig,
    interaction::{AgentDirectory, Interaction},
    types::{ratio, round_to, AgentId, RootCauseLabel},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Concentration {
    #[serde(rename = "Agent-Concentrated")]
    AgentConcentrated,
    Systemic,
}

impl Concentration {
    /// `share` at or above `threshold` is agent-concentrated.
    pub fn from_share(share: f64, threshold: f64) -> Self {
        if share >= threshold {
            Self::AgentConcentrated
        } else {
            Self::Systemic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AgentConcentrated => "Agent-Concentrated",
            Self::Systemic          => "Systemic",
        }
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCount {
    pub agent_id: AgentId,
    pub count: u64,
    pub agent_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRootCause {
    pub root_cause_label: RootCauseLabel,
    pub description: String,
    pub frequency: u64,
    pub percentage: f64,
    pub avg_handling_time_minutes: f64,
    pub fcr_rate: f64,
    pub impact_score: f64,
    pub concentration: Concentration,
    pub top_agents: Vec<AgentCount>,
    pub top_agent_share: f64,
    pub example_complaints: Vec<String>,
    pub suggested_actions: Vec<RecommendedAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseReport {
    pub root_causes: Vec<AggregatedRootCause>,
    pub executive_summary: String,
    pub total_analyzed: u64,
    pub total_complaints: u64,
}

impl RootCauseReport {
    fn empty() -> Self {
        Self {
            root_causes: Vec::new(),
            executive_summary: "No interactions to analyze.".into(),
            total_analyzed: 0,
            total_complaints: 0,
        }
    }
}

pub struct RootCauseAnalyzer {
    config: Arc<InsightConfig>,
}

impl RootCauseAnalyzer {
    pub fn new(config: Arc<InsightConfig>) -> Self {
        Self { config }
    }

    pub fn analyze<'a, I>(&self, interactions: I, agents: &AgentDirectory) -> RootCauseReport
    where
        I: IntoIterator<Item = &'a Interaction>,
    {
        let interactions: Vec<&Interaction> = interactions.into_iter().collect();
        if interactions.is_empty() {
            return RootCauseReport::empty();
        }

        let total_complaints = interactions.iter().filter(|i| i.is_complaint).count() as u64;

        let mut root_causes: Vec<AggregatedRootCause> = group_by_label(&interactions)
            .into_iter()
            .filter_map(|(label, items)| {
                self.aggregate(label, &items, total_complaints, agents)
            })
            .collect();

        // sort_by is stable: equal scores keep first-seen order.
        root_causes.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));

        let executive_summary =
            executive_summary(&root_causes, interactions.len() as u64, total_complaints);

        log::info!(
            "root cause analysis: {} interactions, {} complaints, {} categories",
            interactions.len(),
            total_complaints,
            root_causes.len(),
        );

        RootCauseReport {
            root_causes,
            executive_summary,
            total_analyzed: interactions.len() as u64,
            total_complaints,
        }
    }

    fn aggregate(
        &self,
        label: &str,
        items: &[&Interaction],
        total_complaints: u64,
        agents: &AgentDirectory,
    ) -> Option<AggregatedRootCause> {
        let settings = &self.config.analysis;

        let complaint_items: Vec<&Interaction> =
            items.iter().copied().filter(|i| i.is_complaint).collect();
        // Frequency counts complaints when there are any; handling time
        // and FCR below always use the whole group.
        let basis: &[&Interaction] = if complaint_items.is_empty() {
            items
        } else {
            &complaint_items
        };
        let frequency = basis.len() as u64;
        if frequency == 0 {
            return None;
        }

        let group_size = items.len() as f64;
        let total_seconds: f64 = items
            .iter()
            .map(|i| f64::from(i.handling_time_seconds))
            .sum();
        let avg_seconds = ratio(total_seconds, group_size);
        let resolved = items.iter().filter(|i| i.resolved_on_first_contact).count() as f64;
        let fcr_rate = ratio(resolved, group_size) * 100.0;
        let impact_score = frequency as f64 * (avg_seconds / 60.0);

        let top_agents = top_agents(basis, settings.top_agent_count);
        let top_sum: u64 = top_agents.iter().map(|(_, count)| count).sum();
        let top_share = ratio(top_sum as f64, frequency as f64);
        let concentration =
            Concentration::from_share(top_share, settings.concentration_threshold);

        let example_complaints = basis
            .iter()
            .take(settings.example_count)
            .filter_map(|i| i.example_text())
            .map(|text| truncate_example(text, settings.example_max_chars))
            .collect();

        let category = self.config.catalog.get(label);
        if category.is_none() {
            log::warn!("root cause analysis: label '{label}' not in catalog, no actions attached");
        }

        Some(AggregatedRootCause {
            root_cause_label: label.to_string(),
            description: category.map(|c| c.description.clone()).unwrap_or_default(),
            frequency,
            percentage: round_to(frequency as f64 / total_complaints.max(1) as f64 * 100.0, 1),
            avg_handling_time_minutes: round_to(avg_seconds / 60.0, 1),
            fcr_rate: round_to(fcr_rate, 1),
            impact_score: round_to(impact_score, 1),
            concentration,
            top_agents: top_agents
                .into_iter()
                .map(|(agent_id, count)| AgentCount {
                    agent_name: agents.display_name(agent_id),
                    agent_id: agent_id.to_string(),
                    count,
                })
                .collect(),
            top_agent_share: round_to(top_share * 100.0, 1),
            example_complaints,
            suggested_actions: category
                .map(|c| c.recommended_actions.clone())
                .unwrap_or_default(),
        })
    }
}

/// Group records by label, keeping labels in first-seen order.
fn group_by_label<'a>(interactions: &[&'a Interaction]) -> Vec<(&'a str, Vec<&'a Interaction>)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a Interaction>)> = Vec::new();
    for &interaction in interactions {
        let label = interaction.label_or(DEFAULT_ROOT_CAUSE);
        match index.get(label) {
            Some(&slot) => groups[slot].1.push(interaction),
            None => {
                index.insert(label, groups.len());
                groups.push((label, vec![interaction]));
            }
        }
    }
    groups
}

/// Busiest agents by record count. Ties keep first-seen order.
fn top_agents<'a>(items: &[&'a Interaction], limit: usize) -> Vec<(&'a str, u64)> {
    let mut counts: Vec<(&'a str, u64)> = Vec::new();
    for item in items {
        let agent = item.agent();
        match counts.iter_mut().find(|(id, _)| *id == agent) {
            Some((_, count)) => *count += 1,
            None => counts.push((agent, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// Cut `text` to `max_chars` characters, appending "..." when cut.
pub fn truncate_example(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn executive_summary(
    root_causes: &[AggregatedRootCause],
    total: u64,
    complaints: u64,
) -> String {
    let Some(top) = root_causes.first() else {
        return "No significant patterns identified in the analyzed interactions.".into();
    };

    let mut summary = format!(
        "Analysis of {total} interactions ({complaints} complaints) identified {} root cause categories. ",
        root_causes.len()
    );
    summary.push_str(&format!(
        "The primary driver is **{}** ({:.1}% of complaints), which is **{}** with avg handling time of {:.1} min. ",
        top.root_cause_label, top.percentage, top.concentration, top.avg_handling_time_minutes,
    ));

    if let Some(second) = root_causes.get(1) {
        summary.push_str(&format!(
            "**{}** ({:.1}%) is the second priority. ",
            second.root_cause_label, second.percentage
        ));
    }

    let concentrated = root_causes
        .iter()
        .filter(|rc| rc.concentration == Concentration::AgentConcentrated)
        .count();
    if concentrated > 0 {
        summary.push_str(&format!(
            "\n\n**Immediate Action:** {concentrated} categories show agent concentration - recommend targeted coaching. "
        ));
    }

    if let Some(action) = top.suggested_actions.first() {
        summary.push_str(&format!("**Top Priority:** {}.", action.text));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        let long = "é".repeat(160);
        let cut = truncate_example(&long, 150);
        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_example("short", 150), "short");
    }
}
