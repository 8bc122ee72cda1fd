use contact_insight_core::{
    anomaly_detection::{Anomaly, AnomalyKind, AnomalySeverity},
    catalog::Tier,
    config::InsightConfig,
    deep_dive::minimal_root_cause,
    engine::InsightEngine,
    metrics::MetricsSnapshot,
    root_cause_analysis::AggregatedRootCause,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn root_cause(label: &str, percentage: f64) -> AggregatedRootCause {
    AggregatedRootCause {
        percentage,
        ..minimal_root_cause(label, 10)
    }
}

fn anomaly(kind: AnomalyKind) -> Anomaly {
    Anomaly {
        kind,
        severity: AnomalySeverity::Medium,
        message: String::new(),
    }
}

fn metrics() -> MetricsSnapshot {
    MetricsSnapshot {
        fcr_rate: 50.0,
        escalation_rate: 20.0,
        ..MetricsSnapshot::default()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn two_templates_per_root_cause_in_rank_order() {
    let engine = InsightEngine::standard();
    let ranked = vec![
        root_cause("Digital/App Experience", 40.0),
        root_cause("Policy/Fees Confusion", 15.5),
    ];

    let actions = engine.prioritize(&ranked, &[], &metrics());

    let summary: Vec<(usize, &str, &str)> = actions
        .iter()
        .map(|a| (a.priority, a.root_cause.as_str(), a.estimated_impact.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "Digital/App Experience", "-12-20% complaints"),
            (2, "Digital/App Experience", "-12-20% complaints"),
            (3, "Policy/Fees Confusion", "-3-4% complaints"),
            (4, "Policy/Fees Confusion", "-3-4% complaints"),
        ]
    );
    assert_eq!(actions[0].text, "Prioritize critical bug fixes in mobile app backlog");
    assert_eq!((actions[0].impact, actions[0].effort), (Tier::High, Tier::High));
}

#[test]
fn shared_action_text_is_attributed_to_first_root_cause() {
    let mut config = InsightConfig::standard();
    let shared = "Publish a single customer-facing status page";
    for category in config.catalog.categories.iter_mut() {
        if category.label == "Policy/Fees Confusion" || category.label == "Processing Delays" {
            category.action_templates[0].text = shared.to_string();
        }
    }
    let engine = InsightEngine::new(config).unwrap();
    let ranked = vec![
        root_cause("Processing Delays", 30.0),
        root_cause("Policy/Fees Confusion", 25.0),
    ];

    let actions = engine.prioritize(&ranked, &[], &MetricsSnapshot::default());

    let matching: Vec<&str> = actions
        .iter()
        .filter(|a| a.text == shared)
        .map(|a| a.root_cause.as_str())
        .collect();
    assert_eq!(matching, vec!["Processing Delays"], "first occurrence wins");
    assert_eq!(actions.len(), 3);
    let priorities: Vec<usize> = actions.iter().map(|a| a.priority).collect();
    assert_eq!(priorities, vec![1, 2, 3], "priorities stay contiguous after dedup");
}

#[test]
fn anomaly_actions_follow_root_cause_actions() {
    let engine = InsightEngine::standard();
    let ranked = vec![root_cause("Fraud & Disputes", 8.0)];
    let anomalies = vec![anomaly(AnomalyKind::LowFcr), anomaly(AnomalyKind::HighEscalation)];

    let actions = engine.prioritize(&ranked, &anomalies, &metrics());

    assert_eq!(actions.len(), 4);
    assert_eq!(actions[0].estimated_impact, "Incremental improvement");
    assert_eq!(actions[2].text, "Review resolution workflows and knowledge base coverage");
    assert_eq!(actions[2].root_cause, "FCR Gap");
    assert_eq!(actions[2].estimated_impact, "+10% FCR improvement");
    assert_eq!(actions[3].text, "Review escalation criteria and agent authorization levels");
    assert_eq!(actions[3].root_cause, "Escalation Rate");
    assert_eq!(actions[3].estimated_impact, "-4% escalations");
}

#[test]
fn unrelated_anomalies_add_nothing() {
    let engine = InsightEngine::standard();
    let anomalies = vec![
        anomaly(AnomalyKind::HighComplaintRate),
        anomaly(AnomalyKind::HighAht),
    ];
    assert!(engine.prioritize(&[], &anomalies, &metrics()).is_empty());
}

#[test]
fn list_is_capped_at_five() {
    let engine = InsightEngine::standard();
    let ranked = vec![
        root_cause("Digital/App Experience", 30.0),
        root_cause("Processing Delays", 25.0),
        root_cause("Fraud & Disputes", 20.0),
        root_cause("Service Experience", 15.0),
    ];
    let anomalies = vec![anomaly(AnomalyKind::LowFcr), anomaly(AnomalyKind::HighEscalation)];

    let actions = engine.prioritize(&ranked, &anomalies, &metrics());

    assert_eq!(actions.len(), 5);
    assert!(
        actions.iter().all(|a| a.root_cause != "Service Experience"),
        "only the top three root causes contribute"
    );
    assert!(actions.iter().all(|a| a.root_cause != "FCR Gap"), "anomaly actions fall past the cap");
}

#[test]
fn unknown_labels_contribute_nothing() {
    let engine = InsightEngine::standard();
    let ranked = vec![
        root_cause("Legacy Bucket", 60.0),
        root_cause("Fraud & Disputes", 40.0),
    ];

    let actions = engine.prioritize(&ranked, &[], &metrics());

    assert_eq!(actions.len(), 2);
    assert!(actions.iter().all(|a| a.root_cause == "Fraud & Disputes"));
    assert_eq!(actions[0].priority, 1);
}

#[test]
fn tiers_serialize_as_labels() {
    let engine = InsightEngine::standard();
    let actions = engine.prioritize(&[root_cause("Digital/App Experience", 40.0)], &[], &metrics());

    let json = serde_json::to_value(&actions[1]).unwrap();

    assert_eq!(json["impact"], "High");
    assert_eq!(json["effort"], "Medium");
}
