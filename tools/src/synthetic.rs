//! Deterministic synthetic contact data for demo runs.
//!
//! Same seed = same agents, same interactions, same ids. Nothing here
//! reads the wall clock.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, NaiveDateTime};
use contact_insight_core::interaction::{AgentProfile, ComplaintSeverity, Interaction};
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use uuid::Builder;

const PERIOD_DAYS: u64 = 7;
const AGENT_COUNT: usize = 40;
const COST_PER_MINUTE: f64 = 0.75;

const REGIONS: [&str; 4] = ["East", "West", "Central", "Atlantic"];
const CHANNELS: [(&str, u32); 2] = [("Phone", 75), ("Chat", 25)];
const SEGMENTS: [&str; 3] = ["Mass", "Affluent", "Small Business"];
const TENURE_BANDS: [(&str, u32); 3] = [("< 6 months", 20), ("6-24 months", 35), ("2+ years", 45)];
const SEVERITIES: [(ComplaintSeverity, u32); 3] = [
    (ComplaintSeverity::Low, 50),
    (ComplaintSeverity::Medium, 35),
    (ComplaintSeverity::High, 15),
];

const CALL_REASONS: [(&str, u32); 7] = [
    ("New Business", 10),
    ("Existing Business", 25),
    ("Account Maintenance", 20),
    ("Payments & Transactions", 18),
    ("Digital Access", 12),
    ("Disputes & Issues", 10),
    ("Information Request", 5),
];

const PRODUCTS: [(&str, &str, u32); 8] = [
    ("ATM / Debit / Prepaid Card", "Retail Banking", 18),
    ("Checking Account", "Retail Banking", 22),
    ("Savings Account", "Retail Banking", 10),
    ("Credit Card", "Retail Banking", 20),
    ("Mortgage", "Lending", 8),
    ("Auto Loan", "Lending", 5),
    ("Personal Unsecured Loan", "Lending", 4),
    ("Commercial Loan / LOC", "Commercial Banking", 2),
];

const DIGITAL_PRODUCTS: [&str; 4] = [
    "ATM / Debit / Prepaid Card",
    "Checking Account",
    "Savings Account",
    "Credit Card",
];
const DIGITAL_REASONS: [&str; 4] = [
    "Digital Access",
    "Account Maintenance",
    "Payments & Transactions",
    "Information Request",
];
const DIGITAL_FAILURES: [&str; 5] = [
    "No self-serve available",
    "UX error",
    "Customer preference",
    "Authentication failed",
    "Policy requires agent",
];

/// Complaint category → example texts.
const COMPLAINT_TEXTS: [(&str, [&str; 4]); 7] = [
    ("Fees & Pricing", [
        "I was charged an overdraft fee but didn't expect it. No one explained the policy.",
        "The monthly fee is higher than what was quoted. Want a refund.",
        "Interest rate increased without notice. This feels deceptive.",
        "Late payment fee applied even though I paid on time.",
    ]),
    ("Processing Delays", [
        "My deposit has been pending for 5 days. When will it clear?",
        "Wire transfer should have arrived yesterday. Still waiting.",
        "Been waiting 3 weeks for my new card.",
        "Refund still pending after 2 weeks. Ridiculous.",
    ]),
    ("Digital Experience", [
        "Mobile app keeps crashing when I try to deposit a check.",
        "Can't login to my account. App shows error every time.",
        "OTP code never arrives. Been waiting 30 minutes.",
        "App is so slow it times out before I can finish.",
    ]),
    ("Agent / Information Quality", [
        "Last agent told me something completely different.",
        "Given incorrect information about my balance. Called 3 times.",
        "Different answer every time I call. Staff needs training.",
        "Inconsistent answers from your team. Frustrating.",
    ]),
    ("Fraud & Disputes", [
        "Unauthorized charge on my account. Need it reversed now.",
        "Didn't make this purchase. Card information was stolen.",
        "Chargeback filed 3 weeks ago. Still not resolved.",
        "Fraud claim denied but I have proof I didn't make purchase.",
    ]),
    ("Documentation / KYC", [
        "Uploaded ID three times. Why do you keep asking for it?",
        "Verification rejected my documents for no clear reason.",
        "Document upload keeps failing on website.",
        "Submitted all docs but account still restricted.",
    ]),
    ("Service Experience", [
        "Been on hold for 45 minutes. This is unacceptable.",
        "Transferred 4 times and still no resolution.",
        "Agent was rude and dismissive of my concerns.",
        "Promised callback but never received one.",
    ]),
];

const AGENT_NOTES: [&str; 8] = [
    "Customer was understanding after explanation provided.",
    "Escalated to supervisor per customer request.",
    "Provided account credit as goodwill gesture.",
    "Scheduled callback for follow-up.",
    "Customer declined offered solutions.",
    "Advised on policy and next steps.",
    "Verified identity and processed request.",
    "Explained digital self-service options.",
];

const FIRST_NAMES: [&str; 16] = [
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda",
    "William", "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
];
const LAST_NAMES: [&str; 16] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
];

/// Seeded generator for one synthetic period.
pub struct SyntheticBatch {
    rng: Pcg64Mcg,
    start: NaiveDate,
}

impl SyntheticBatch {
    pub fn new(seed: u64, start: NaiveDate) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            start,
        }
    }

    /// Agent roster, spread evenly across regions.
    pub fn agents(&mut self) -> Vec<AgentProfile> {
        (0..AGENT_COUNT)
            .map(|n| AgentProfile {
                agent_id: format!("AGT{:04}", n + 1),
                agent_name: format!(
                    "{} {}",
                    self.pick(&FIRST_NAMES),
                    self.pick(&LAST_NAMES)
                ),
                team_leader: None,
                region: Some(REGIONS[n % REGIONS.len()].to_string()),
                tenure_band: Some(self.weighted(&TENURE_BANDS).to_string()),
            })
            .collect()
    }

    /// `count` interactions over the period. Every tenth agent on the
    /// roster is complaint-prone so agent concentration shows up.
    pub fn interactions(&mut self, count: usize, roster: &[AgentProfile]) -> Result<Vec<Interaction>> {
        anyhow::ensure!(!roster.is_empty(), "synthetic batch needs at least one agent");
        let problem_agents: Vec<&str> = roster
            .iter()
            .step_by(10)
            .map(|a| a.agent_id.as_str())
            .collect();

        (0..count)
            .map(|_| {
                let agent = &roster[self.rng.gen_range(0..roster.len())];
                self.interaction(agent, &problem_agents)
            })
            .collect()
    }

    fn interaction(&mut self, agent: &AgentProfile, problem_agents: &[&str]) -> Result<Interaction> {
        let call_reason = self.weighted(&CALL_REASONS);
        let (product, line_of_business) = {
            let weights: Vec<(usize, u32)> =
                PRODUCTS.iter().enumerate().map(|(i, p)| (i, p.2)).collect();
            let idx = self.weighted(&weights);
            (PRODUCTS[idx].0, PRODUCTS[idx].1)
        };

        let mut complaint_rate: f64 = if problem_agents.contains(&agent.agent_id.as_str()) { 0.45 } else { 0.18 };
        if call_reason == "Disputes & Issues" {
            complaint_rate += 0.15;
        }
        if matches!(product, "Credit Card" | "Mortgage") {
            complaint_rate += 0.05;
        }
        let is_complaint = self.rng.gen_bool(complaint_rate.min(0.6));

        let (complaint_category, complaint_severity, complaint_text) = if is_complaint {
            let (category, texts) = COMPLAINT_TEXTS[self.rng.gen_range(0..COMPLAINT_TEXTS.len())];
            (
                Some(category.to_string()),
                Some(self.weighted(&SEVERITIES)),
                Some(self.pick(&texts).to_string()),
            )
        } else {
            (None, None, None)
        };

        let handling_time_seconds: u32 = if is_complaint {
            self.rng.gen_range(360..=1800)
        } else {
            self.rng.gen_range(120..=720)
        };
        let hold_time_seconds = self.rng.gen_range(0..=(handling_time_seconds / 3).min(600));
        let transfer_count = if is_complaint {
            self.weighted(&[(0, 40), (1, 35), (2, 20), (3, 5)])
        } else {
            self.weighted(&[(0, 70), (1, 25), (2, 5)])
        };
        let escalated = self.rng.gen_bool(if is_complaint { 0.25 } else { 0.08 });
        let resolved_on_first_contact = self.rng.gen_bool(if is_complaint { 0.55 } else { 0.78 });
        let disposition = if resolved_on_first_contact {
            "Resolved"
        } else if escalated {
            "Escalated"
        } else {
            self.pick(&["Resolved", "Follow-up Required"])
        };

        let digital_eligible =
            DIGITAL_PRODUCTS.contains(&product) && DIGITAL_REASONS.contains(&call_reason);
        let deflection_attempted = digital_eligible && self.rng.gen_bool(0.6);
        let success_rate = if is_complaint {
            0.2
        } else if call_reason == "Digital Access" {
            0.25
        } else {
            0.4
        };
        let deflection_success = deflection_attempted && self.rng.gen_bool(success_rate);
        let digital_failure_reason = (deflection_attempted && !deflection_success)
            .then(|| self.pick(&DIGITAL_FAILURES).to_string());

        let agent_notes = self
            .rng
            .gen_bool(0.6)
            .then(|| self.pick(&AGENT_NOTES).to_string());

        Ok(Interaction {
            interaction_id: self.next_id(),
            timestamp: Some(self.timestamp()?),
            channel: Some(self.weighted(&CHANNELS).to_string()),
            customer_segment: Some(self.pick(&SEGMENTS).to_string()),
            line_of_business: Some(line_of_business.to_string()),
            call_reason: Some(call_reason.to_string()),
            product: Some(product.to_string()),
            region: agent.region.clone(),
            team_leader: agent.team_leader.clone(),
            agent_id: Some(agent.agent_id.clone()),
            agent_name: Some(agent.agent_name.clone()),
            disposition: Some(disposition.to_string()),
            handling_time_seconds,
            hold_time_seconds,
            transfer_count,
            estimated_cost_dollars: (f64::from(handling_time_seconds) / 60.0 * COST_PER_MINUTE * 100.0)
                .round()
                / 100.0,
            is_complaint,
            resolved_on_first_contact,
            escalated,
            digital_eligible,
            deflection_attempted,
            deflection_success,
            complaint_category,
            complaint_severity,
            complaint_text,
            agent_notes,
            digital_failure_reason,
            ..Interaction::default()
        })
    }

    /// Business-hours timestamp somewhere in the period.
    fn timestamp(&mut self) -> Result<NaiveDateTime> {
        let day = self.rng.gen_range(0..PERIOD_DAYS);
        let date = self
            .start
            .checked_add_days(Days::new(day))
            .context("synthetic period runs past the calendar")?;
        date.and_hms_opt(
            self.rng.gen_range(8..=19),
            self.rng.gen_range(0..60),
            self.rng.gen_range(0..60),
        )
        .context("invalid synthetic time of day")
    }

    /// Random-version UUID drawn from the seeded stream.
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }

    fn weighted<T: Copy>(&mut self, items: &[(T, u32)]) -> T {
        let total: u32 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for (item, weight) in items {
            if roll < *weight {
                return *item;
            }
            roll -= weight;
        }
        items[items.len() - 1].0
    }
}
