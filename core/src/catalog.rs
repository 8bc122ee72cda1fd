//! Root-cause catalog: the static category table every component reads.
//!
//! RULE: catalog order is significant. The classifier breaks keyword-score
//! ties by iteration order, so entries must never be reordered once a
//! catalog is in use.

use crate::types::RootCauseLabel;
use serde::{Deserialize, Serialize};

/// Label every fallback path lands on when nothing better is known.
pub const DEFAULT_ROOT_CAUSE: &str = "Service Experience";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Policy,
    Digital,
    Training,
    Process,
}

/// Impact or effort rating on an action template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

/// Action attached to a classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
}

/// Action template consumed by the prioritizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub text: String,
    pub impact: Tier,
    pub effort: Tier,
}

/// Keyword family used to split a category into sub-issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubIssuePattern {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseCategory {
    pub label: RootCauseLabel,
    pub keywords: Vec<String>,
    pub description: String,
    pub recommended_actions: Vec<RecommendedAction>,
    pub action_templates: Vec<ActionTemplate>,
    #[serde(default)]
    pub sub_issue_patterns: Vec<SubIssuePattern>,
    #[serde(default)]
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseCatalog {
    pub categories: Vec<RootCauseCategory>,
}

impl RootCauseCatalog {
    pub fn get(&self, label: &str) -> Option<&RootCauseCategory> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RootCauseCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The seven built-in categories, in their canonical order.
    pub fn standard() -> Self {
        use ActionKind::*;
        use Tier::*;

        Self {
            categories: vec![
                category(
                    "Policy/Fees Confusion",
                    &["fee", "charge", "overdraft", "rate", "interest", "cost", "penalty",
                      "price", "billing", "statement"],
                    "Customers confused about fees, charges, and account policies leading to dissatisfaction.",
                    &[
                        ("Update fee disclosure documents with clearer language", Policy),
                        ("Implement proactive fee alerts before charges apply", Digital),
                        ("Train agents on fee waiver authority and escalation", Training),
                    ],
                    &[
                        ("Review fee disclosure clarity on statements and online", Medium, Low),
                        ("Implement proactive balance/fee alerts before charges", High, Medium),
                        ("Update agent fee waiver authority matrix", Medium, Low),
                    ],
                    &[
                        ("Overdraft fees", &["overdraft", "nsf", "insufficient"]),
                        ("Monthly maintenance fees", &["monthly", "maintenance", "service charge"]),
                        ("Wire transfer fees", &["wire", "transfer", "international"]),
                    ],
                    "Fee transparency improvements typically show quick ROI in complaint reduction.",
                ),
                category(
                    "Digital/App Experience",
                    &["app", "login", "error", "crash", "password", "otp", "mobile", "online",
                      "website", "frozen", "stuck", "load"],
                    "Technical issues with digital banking platforms preventing transactions.",
                    &[
                        ("Prioritize critical bug fixes in mobile app backlog", Digital),
                        ("Implement better error messaging with actionable guidance", Digital),
                        ("Add redundant authentication methods for OTP failures", Process),
                    ],
                    &[
                        ("Prioritize critical bug fixes in mobile app backlog", High, High),
                        ("Add fallback authentication for OTP delivery failures", High, Medium),
                        ("Improve error messaging with actionable guidance", Medium, Low),
                    ],
                    &[
                        ("Login failures", &["login", "password", "sign in", "access"]),
                        ("Transfer timeouts", &["timeout", "slow", "transfer", "pending"]),
                        ("UI/Navigation issues", &["find", "confusing", "navigate", "where"]),
                    ],
                    "Consider prioritizing technical fixes as these issues often have cascading impact on customer trust.",
                ),
                category(
                    "Processing Delays",
                    &["pending", "waiting", "approval", "slow", "days", "weeks", "delay",
                      "status", "long", "taking"],
                    "Extended processing times causing customer frustration and business impact.",
                    &[
                        ("Review and streamline approval workflows", Process),
                        ("Implement real-time status tracking notifications", Digital),
                        ("Set and communicate clear SLAs for transaction types", Policy),
                    ],
                    &[
                        ("Review and streamline approval workflows", High, High),
                        ("Implement real-time transaction status notifications", High, Medium),
                        ("Set and communicate clear SLAs to customers", Medium, Low),
                    ],
                    &[
                        ("Application processing", &["application", "approval", "waiting"]),
                        ("Transaction posting", &["post", "clear", "pending", "available"]),
                        ("Document verification", &["document", "verify", "review"]),
                    ],
                    "SLA visibility and proactive communication can reduce complaint severity even before fixing root delays.",
                ),
                category(
                    "Incorrect Info / Agent Knowledge Gap",
                    &["told me", "different answer", "inconsistent", "agent said", "wrong",
                      "misinformed", "confused", "didn't know"],
                    "Agents providing inconsistent or incorrect information requiring multiple contacts.",
                    &[
                        ("Enhance knowledge base with decision trees", Training),
                        ("Implement mandatory refresher training on policy updates", Training),
                        ("Create quality monitoring program with coaching feedback", Process),
                    ],
                    &[
                        ("Deploy updated knowledge base with decision trees", High, Medium),
                        ("Schedule mandatory policy refresh training", Medium, Medium),
                        ("Implement QA monitoring with coaching feedback", High, High),
                    ],
                    &[
                        ("Policy misinformation", &["policy", "told", "different", "wrong"]),
                        ("Product feature confusion", &["feature", "how to", "supposed"]),
                        ("Process guidance errors", &["process", "steps", "said"]),
                    ],
                    "Knowledge base and training investments show compounding returns over time.",
                ),
                category(
                    "Fraud & Disputes",
                    &["fraud", "dispute", "unauthorized", "chargeback", "stolen", "identity",
                      "theft", "suspicious", "scam"],
                    "Fraud incidents and dispute resolution creating anxiety and delays.",
                    &[
                        ("Streamline fraud claim submission process", Process),
                        ("Reduce provisional credit timeline for verified customers", Policy),
                        ("Enhance fraud detection to reduce false positives", Digital),
                    ],
                    &[
                        ("Streamline fraud claim submission and tracking", High, Medium),
                        ("Accelerate provisional credit for verified customers", High, Medium),
                        ("Enhance fraud detection to reduce false positives", Medium, High),
                    ],
                    &[
                        ("Unauthorized transactions", &["unauthorized", "fraud", "didn't"]),
                        ("Merchant disputes", &["merchant", "refund", "return"]),
                        ("Identity theft", &["identity", "account opened", "not me"]),
                    ],
                    "Speed of resolution is critical for fraud cases - customers are highly anxious.",
                ),
                category(
                    "Documentation / KYC Friction",
                    &["document", "id", "verification", "kyc", "upload", "proof", "identity",
                      "verify", "rejected", "submit"],
                    "Document requirements creating barriers to account access and onboarding.",
                    &[
                        ("Implement OCR to improve document acceptance rates", Digital),
                        ("Reduce re-verification frequency for established customers", Policy),
                        ("Provide clearer guidance on acceptable document formats", Process),
                    ],
                    &[
                        ("Implement OCR for improved document acceptance", High, High),
                        ("Reduce re-verification frequency for established customers", Medium, Low),
                        ("Provide clearer guidance on acceptable document formats", Medium, Low),
                    ],
                    &[
                        ("Document rejection", &["rejected", "not accepted", "blurry"]),
                        ("Repeated verification requests", &["again", "already", "sent"]),
                        ("Format/specification issues", &["format", "type", "size"]),
                    ],
                    "Digital document solutions can dramatically reduce this category if implemented well.",
                ),
                category(
                    DEFAULT_ROOT_CAUSE,
                    &["wait", "transfer", "rude", "callback", "hold", "disconnected", "hung up",
                      "attitude", "unprofessional"],
                    "Poor service interactions affecting customer satisfaction and loyalty.",
                    &[
                        ("Implement callback options to reduce hold times", Process),
                        ("Enhance soft skills training for agents", Training),
                        ("Create escalation paths that don't require transfers", Process),
                    ],
                    &[
                        ("Implement callback options to reduce hold times", High, Medium),
                        ("Enhance soft skills training for agents", Medium, Medium),
                        ("Create escalation paths that minimize transfers", High, Medium),
                    ],
                    &[
                        ("Long wait times", &["wait", "hold", "long"]),
                        ("Multiple transfers", &["transfer", "department", "again"]),
                        ("Agent attitude", &["rude", "attitude", "unprofessional"]),
                    ],
                    "Agent empowerment and reduced transfers address multiple pain points simultaneously.",
                ),
            ],
        }
    }
}

fn category(
    label: &str,
    keywords: &[&str],
    description: &str,
    recommended: &[(&str, ActionKind)],
    templates: &[(&str, Tier, Tier)],
    sub_issues: &[(&str, &[&str])],
    insight: &str,
) -> RootCauseCategory {
    RootCauseCategory {
        label: label.into(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        description: description.into(),
        recommended_actions: recommended
            .iter()
            .map(|(text, kind)| RecommendedAction {
                text: text.to_string(),
                kind: *kind,
            })
            .collect(),
        action_templates: templates
            .iter()
            .map(|(text, impact, effort)| ActionTemplate {
                text: text.to_string(),
                impact: *impact,
                effort: *effort,
            })
            .collect(),
        sub_issue_patterns: sub_issues
            .iter()
            .map(|(name, keywords)| SubIssuePattern {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect(),
        insight: Some(insight.into()),
    }
}
