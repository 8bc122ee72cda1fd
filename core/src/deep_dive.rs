//! Root-cause deep dive: sub-issues, cross-dimension correlations,
//! personalized actions and a predicted-impact estimate for a single
//! aggregated root cause.
//!
//! Everything except the reported confidence is deterministic. The
//! confidence roll goes through the injected `PhraseSource`.

use crate::{
    catalog::{RootCauseCategory, Tier},
    config::InsightConfig,
    interaction::Interaction,
    rng::PhraseSource,
    root_cause_analysis::{AggregatedRootCause, Concentration},
    types::{round_to, RootCauseLabel},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MAX_SUB_ISSUES: usize = 5;
pub const MAX_CORRELATIONS: usize = 4;
pub const MAX_PERSONALIZED_ACTIONS: usize = 5;

const CONFIDENCE_BASE: f64 = 0.78;
const CONFIDENCE_SPREAD: f64 = 0.15;
const DEFAULT_REDUCTION_RATE: f64 = 0.15;
const MIN_REDUCTION_RATE: f64 = 0.10;
const REDUCTION_PER_CONCENTRATION: f64 = 0.25;
const HIGH_CONFIDENCE_RATE: f64 = 0.25;
const IMPACT_TIMEFRAME: &str = "4-6 weeks";

/// Dimensions checked for concentration, in report order, with the share
/// the top value must exceed.
const CORRELATION_DIMENSIONS: [(Dimension, f64); 4] = [
    (Dimension::Channel, 0.5),
    (Dimension::CustomerSegment, 0.4),
    (Dimension::Region, 0.35),
    (Dimension::Product, 0.3),
];

/// Placeholder split used when no sub-issue pattern matches at all.
const PLACEHOLDER_SUB_ISSUES: [(&str, f64); 3] = [
    ("Primary pattern", 0.45),
    ("Secondary pattern", 0.30),
    ("Other", 0.25),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Channel,
    #[serde(rename = "Customer Segment")]
    CustomerSegment,
    Region,
    Product,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Channel         => "Channel",
            Self::CustomerSegment => "Customer Segment",
            Self::Region          => "Region",
            Self::Product         => "Product",
        }
    }

    fn value_of<'a>(&self, interaction: &'a Interaction) -> &'a str {
        let value = match self {
            Self::Channel         => interaction.channel.as_deref(),
            Self::CustomerSegment => interaction.customer_segment.as_deref(),
            Self::Region          => interaction.region.as_deref(),
            Self::Product         => interaction.product.as_deref(),
        };
        value.unwrap_or("Unknown")
    }

    fn insight(&self, value: &str, percentage: f64) -> String {
        match self {
            Self::Channel => format!("{percentage:.0}% of issues occur via {value} channel"),
            Self::CustomerSegment => format!("{value} customers disproportionately affected"),
            Self::Region => format!("Higher concentration in {value} region"),
            Self::Product => format!("{value} accounts for majority of issues"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubIssue {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub factor: Dimension,
    pub value: String,
    pub percentage: f64,
    pub insight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl From<Tier> for ActionPriority {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::High   => Self::High,
            Tier::Medium => Self::Medium,
            Tier::Low    => Self::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalizedKind {
    Technical,
    Product,
    Training,
    Process,
    Operations,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedAction {
    pub text: String,
    pub priority: ActionPriority,
    #[serde(rename = "type")]
    pub kind: PersonalizedKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactConfidence {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedImpact {
    pub estimated_reduction: u64,
    pub reduction_percentage: f64,
    pub confidence: ImpactConfidence,
    pub timeframe: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepDiveAnalysis {
    pub sub_issues: Vec<SubIssue>,
    pub correlations: Vec<Correlation>,
    pub personalized_actions: Vec<PersonalizedAction>,
    pub predicted_impact: PredictedImpact,
    pub confidence: f64,
    pub analysis_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedRootCause {
    #[serde(flatten)]
    pub root_cause: AggregatedRootCause,
    pub ai_analysis: DeepDiveAnalysis,
}

pub struct DeepDiveAnalyzer {
    config: Arc<InsightConfig>,
}

impl DeepDiveAnalyzer {
    pub fn new(config: Arc<InsightConfig>) -> Self {
        Self { config }
    }

    /// `interactions` are the records behind `root_cause`.
    pub fn enhance<'a, I>(
        &self,
        root_cause: &AggregatedRootCause,
        interactions: I,
        rng: &mut dyn PhraseSource,
    ) -> EnhancedRootCause
    where
        I: IntoIterator<Item = &'a Interaction>,
    {
        let interactions: Vec<&Interaction> = interactions.into_iter().collect();
        let label = &root_cause.root_cause_label;
        let category = self.config.catalog.get(label);

        let sub_issues = detect_sub_issues(category, &interactions);
        let correlations = detect_correlations(&interactions);
        let personalized_actions =
            personalized_actions(category, root_cause, &sub_issues, &correlations);
        let predicted_impact = predicted_impact(root_cause.frequency, &sub_issues);
        let analysis_summary = analysis_summary(category, &sub_issues, &correlations);

        log::info!(
            "deep dive '{label}': {} sub-issues, {} correlations, {} actions",
            sub_issues.len(),
            correlations.len(),
            personalized_actions.len(),
        );

        EnhancedRootCause {
            root_cause: root_cause.clone(),
            ai_analysis: DeepDiveAnalysis {
                sub_issues,
                correlations,
                personalized_actions,
                predicted_impact,
                confidence: CONFIDENCE_BASE + rng.unit() * CONFIDENCE_SPREAD,
                analysis_summary,
            },
        }
    }
}

/// Minimal base used when aggregation produced nothing for `label`.
pub fn minimal_root_cause(label: &str, frequency: u64) -> AggregatedRootCause {
    AggregatedRootCause {
        root_cause_label: RootCauseLabel::from(label),
        description: String::new(),
        frequency,
        percentage: 100.0,
        avg_handling_time_minutes: 0.0,
        fcr_rate: 0.0,
        impact_score: 0.0,
        concentration: Concentration::Systemic,
        top_agents: Vec::new(),
        top_agent_share: 0.0,
        example_complaints: Vec::new(),
        suggested_actions: Vec::new(),
    }
}

fn detect_sub_issues(
    category: Option<&RootCauseCategory>,
    interactions: &[&Interaction],
) -> Vec<SubIssue> {
    let patterns = category.map(|c| c.sub_issue_patterns.as_slice()).unwrap_or_default();
    let texts: Vec<String> = interactions.iter().map(|i| i.searchable_text()).collect();

    let mut sub_issues: Vec<SubIssue> = patterns
        .iter()
        .filter_map(|pattern| {
            let count = texts
                .iter()
                .filter(|text| pattern.keywords.iter().any(|kw| text.contains(kw.as_str())))
                .count() as u64;
            (count > 0).then(|| SubIssue {
                name: pattern.name.clone(),
                count,
                percentage: 0.0,
            })
        })
        .collect();

    let total_matched: u64 = sub_issues.iter().map(|s| s.count).sum();
    for sub in &mut sub_issues {
        sub.percentage = round_to(sub.count as f64 / total_matched.max(1) as f64 * 100.0, 1);
    }
    sub_issues.sort_by(|a, b| b.count.cmp(&a.count));

    if sub_issues.is_empty() && !interactions.is_empty() {
        let total = interactions.len() as f64;
        sub_issues = PLACEHOLDER_SUB_ISSUES
            .iter()
            .map(|(name, share)| SubIssue {
                name: name.to_string(),
                count: (total * share) as u64,
                percentage: round_to(share * 100.0, 1),
            })
            .collect();
    }

    sub_issues.truncate(MAX_SUB_ISSUES);
    sub_issues
}

fn detect_correlations(interactions: &[&Interaction]) -> Vec<Correlation> {
    if interactions.is_empty() {
        return Vec::new();
    }
    let total = interactions.len() as f64;

    let mut correlations: Vec<Correlation> = CORRELATION_DIMENSIONS
        .iter()
        .filter_map(|(dimension, min_share)| {
            let (value, count) = top_value(interactions, *dimension)?;
            let share = count as f64 / total;
            if share <= *min_share {
                return None;
            }
            let percentage = share * 100.0;
            Some(Correlation {
                factor: *dimension,
                value: value.to_string(),
                percentage: round_to(percentage, 1),
                insight: dimension.insight(value, percentage),
            })
        })
        .collect();

    correlations.truncate(MAX_CORRELATIONS);
    correlations
}

/// Most frequent value of `dimension`; the first one seen wins ties.
fn top_value<'a>(interactions: &[&'a Interaction], dimension: Dimension) -> Option<(&'a str, u64)> {
    let mut counts: Vec<(&'a str, u64)> = Vec::new();
    for &interaction in interactions {
        let value = dimension.value_of(interaction);
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    let mut best: Option<(&'a str, u64)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best
}

fn personalized_actions(
    category: Option<&RootCauseCategory>,
    root_cause: &AggregatedRootCause,
    sub_issues: &[SubIssue],
    correlations: &[Correlation],
) -> Vec<PersonalizedAction> {
    let mut actions = Vec::new();
    let mut push = |text: String, priority: ActionPriority, kind: PersonalizedKind| {
        actions.push(PersonalizedAction { text, priority, kind });
    };

    if let Some(top_sub) = sub_issues.first() {
        match root_cause.root_cause_label.as_str() {
            "Digital/App Experience" => {
                if top_sub.name.contains("Login") {
                    push(
                        "Investigate login authentication flow and add fallback mechanisms".into(),
                        ActionPriority::Critical,
                        PersonalizedKind::Technical,
                    );
                } else if top_sub.name.to_lowercase().contains("timeout") {
                    push(
                        "Review backend API latency and increase timeout thresholds".into(),
                        ActionPriority::High,
                        PersonalizedKind::Technical,
                    );
                }
            }
            "Policy/Fees Confusion" if top_sub.name.contains("Overdraft") => {
                push(
                    "Implement low balance alerts and overdraft protection enrollment".into(),
                    ActionPriority::High,
                    PersonalizedKind::Product,
                );
            }
            _ => {}
        }
    }

    if root_cause.concentration == Concentration::AgentConcentrated && !root_cause.top_agents.is_empty() {
        let names: Vec<&str> = root_cause
            .top_agents
            .iter()
            .take(3)
            .map(|a| a.agent_name.as_str())
            .collect();
        push(
            format!("Schedule focused coaching sessions for agents: {}", names.join(", ")),
            ActionPriority::High,
            PersonalizedKind::Training,
        );
    }

    for corr in correlations {
        match corr.factor {
            Dimension::Channel if corr.percentage > 60.0 => push(
                format!("Investigate {} channel-specific issues and processes", corr.value),
                ActionPriority::Medium,
                PersonalizedKind::Process,
            ),
            Dimension::Region if corr.percentage > 40.0 => push(
                format!("Review {} region operational practices and resources", corr.value),
                ActionPriority::Medium,
                PersonalizedKind::Operations,
            ),
            _ => {}
        }
    }

    let templates = category.map(|c| c.action_templates.as_slice()).unwrap_or_default();
    for template in templates.iter().take(2) {
        if !actions.iter().any(|a| a.text == template.text) {
            actions.push(PersonalizedAction {
                text: template.text.clone(),
                priority: template.impact.into(),
                kind: PersonalizedKind::Standard,
            });
        }
    }

    actions.truncate(MAX_PERSONALIZED_ACTIONS);
    actions
}

fn predicted_impact(frequency: u64, sub_issues: &[SubIssue]) -> PredictedImpact {
    let reduction_rate = match sub_issues.first() {
        None => DEFAULT_REDUCTION_RATE,
        Some(top) => MIN_REDUCTION_RATE + (top.percentage / 100.0) * REDUCTION_PER_CONCENTRATION,
    };
    let estimated_reduction = (frequency as f64 * reduction_rate) as u64;

    PredictedImpact {
        estimated_reduction,
        reduction_percentage: round_to(reduction_rate * 100.0, 0),
        confidence: if reduction_rate < HIGH_CONFIDENCE_RATE {
            ImpactConfidence::Medium
        } else {
            ImpactConfidence::High
        },
        timeframe: IMPACT_TIMEFRAME.into(),
        message: format!(
            "{estimated_reduction} fewer complaints/week if primary actions implemented"
        ),
    }
}

fn analysis_summary(
    category: Option<&RootCauseCategory>,
    sub_issues: &[SubIssue],
    correlations: &[Correlation],
) -> String {
    let mut parts = Vec::new();

    if sub_issues.len() > 1 {
        parts.push(format!(
            "This category shows {} distinct sub-patterns:",
            sub_issues.len()
        ));
        for sub in sub_issues.iter().take(3) {
            parts.push(format!("  • {} ({:.0}%)", sub.name, sub.percentage));
        }
    }

    if !correlations.is_empty() {
        let pairs: Vec<String> = correlations
            .iter()
            .take(2)
            .map(|c| format!("{}: {}", c.factor.label(), c.value))
            .collect();
        parts.push(format!("\nKey correlations identified: {}.", pairs.join("; ")));
    }

    if let Some(insight) = category.and_then(|c| c.insight.as_deref()) {
        parts.push(format!("\n{insight}"));
    }

    if parts.is_empty() {
        "Analysis complete. Review sub-issues and correlations for detailed insights.".into()
    } else {
        parts.join("\n")
    }
}
