//! insight-runner: headless batch runner for the contact insight pipeline.
//!
//! Usage:
//!   insight-runner --synthetic 5000 --seed 12345
//!   insight-runner --input week.json --previous last_week.json --agents agents.json
//!   insight-runner --input week.json --deep-dive "Digital/App Experience" --json

mod synthetic;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use contact_insight_core::{
    config::InsightConfig,
    deep_dive::EnhancedRootCause,
    engine::InsightEngine,
    interaction::{AgentDirectory, AgentProfile, Interaction},
    metrics::{MetricsSnapshot, PeriodComparison},
    narrative::ExecutiveSummary,
    rng::SeededPhrases,
    root_cause_analysis::RootCauseReport,
};
use std::{env, fs, path::Path};
use synthetic::SyntheticBatch;

/// First day of the synthetic "current" week. Fixed so runs are replayable.
const SYNTHETIC_START: (i32, u32, u32) = (2025, 3, 3);

#[derive(serde::Serialize)]
struct RunReport<'a> {
    seed: u64,
    metrics: &'a MetricsSnapshot,
    comparison: Option<&'a PeriodComparison>,
    root_causes: &'a RootCauseReport,
    summary: &'a ExecutiveSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    deep_dive: Option<&'a EnhancedRootCause>,
}

struct Batch {
    current: Vec<Interaction>,
    previous: Option<Vec<Interaction>>,
    agents: AgentDirectory,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let synthetic = parse_arg(&args, "--synthetic", 1000usize);
    let json = args.iter().any(|a| a == "--json");
    let input = flag_value(&args, "--input");
    let previous = flag_value(&args, "--previous");
    let agents_path = flag_value(&args, "--agents");
    let config_path = flag_value(&args, "--config");
    let deep_dive_label = flag_value(&args, "--deep-dive");

    let config = match config_path {
        Some(path) => InsightConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid config in {path}"))?,
        None => InsightConfig::standard(),
    };
    let engine = InsightEngine::new(config)?;

    let mut batch = match input {
        Some(path) => load_batch(path, previous, agents_path)?,
        None => synthetic_batch(seed, synthetic)?,
    };

    if !json {
        println!("Contact Insight: insight-runner");
        println!("  seed:          {seed}");
        println!("  interactions:  {}", batch.current.len());
        println!("  agents:        {}", batch.agents.len());
        println!();
    }

    classify_unlabelled(&engine, &mut batch.current);
    if let Some(previous) = batch.previous.as_mut() {
        classify_unlabelled(&engine, previous);
    }

    let metrics = engine.metrics(&batch.current);
    let comparison = batch
        .previous
        .as_deref()
        .map(|previous| engine.compare(&batch.current, previous));
    let root_causes = engine.root_cause_report(&batch.current, &batch.agents);

    let mut phrases = SeededPhrases::new(seed);
    let filters = serde_json::json!({ "source": input.unwrap_or("synthetic") });
    let summary = engine.summarize(
        &batch.current,
        &batch.agents,
        comparison.as_ref(),
        Some(&filters),
        &mut phrases,
    );

    let deep_dive = match deep_dive_label {
        Some(label) => {
            let enhanced = engine.deep_dive(label, &batch.current, &batch.agents, &mut phrases);
            if enhanced.is_none() {
                log::warn!("Root cause not found: {label}");
            }
            enhanced
        }
        None => None,
    };

    if json {
        let report = RunReport {
            seed,
            metrics: &metrics,
            comparison: comparison.as_ref(),
            root_causes: &root_causes,
            summary: &summary,
            deep_dive: deep_dive.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&metrics, &root_causes, &summary);
        if let Some(enhanced) = &deep_dive {
            print_deep_dive(enhanced);
        }
    }

    Ok(())
}

fn load_batch(input: &str, previous: Option<&str>, agents: Option<&str>) -> Result<Batch> {
    let current: Vec<Interaction> = serde_json::from_str(&read(input)?)
        .with_context(|| format!("{input} is not a JSON array of interactions"))?;
    let previous = previous
        .map(|path| {
            serde_json::from_str::<Vec<Interaction>>(&read(path)?)
                .with_context(|| format!("{path} is not a JSON array of interactions"))
        })
        .transpose()?;
    let agents = match agents {
        Some(path) => serde_json::from_str::<Vec<AgentProfile>>(&read(path)?)
            .with_context(|| format!("{path} is not a JSON array of agent profiles"))?
            .into_iter()
            .collect(),
        None => AgentDirectory::new(),
    };
    Ok(Batch { current, previous, agents })
}

/// Current week from `seed`, prior week from the next seed.
fn synthetic_batch(seed: u64, count: usize) -> Result<Batch> {
    let (y, m, d) = SYNTHETIC_START;
    let start = NaiveDate::from_ymd_opt(y, m, d).context("invalid synthetic start date")?;
    let prior_start = start
        .checked_sub_days(Days::new(7))
        .context("invalid synthetic prior week")?;

    let mut current_gen = SyntheticBatch::new(seed, start);
    let roster = current_gen.agents();
    let current = current_gen.interactions(count, &roster)?;
    let previous = SyntheticBatch::new(seed.wrapping_add(1), prior_start).interactions(count, &roster)?;

    log::info!("generated {} + {} synthetic interactions", current.len(), previous.len());
    Ok(Batch {
        current,
        previous: Some(previous),
        agents: roster.into_iter().collect(),
    })
}

fn classify_unlabelled(engine: &InsightEngine, interactions: &mut [Interaction]) {
    let mut classified = 0usize;
    for interaction in interactions.iter_mut().filter(|i| i.root_cause_label.is_none()) {
        engine.classify_interaction(interaction);
        classified += 1;
    }
    log::debug!("classified {classified} unlabelled interactions");
}

fn print_summary(metrics: &MetricsSnapshot, report: &RootCauseReport, summary: &ExecutiveSummary) {
    println!("=== METRICS ===");
    println!("  interactions:   {}", metrics.total_interactions);
    println!("  complaints:     {}", metrics.total_complaints);
    println!("  complaint rate: {:.1}%", metrics.complaint_rate);
    println!("  fcr rate:       {:.1}%", metrics.fcr_rate);
    println!("  avg handling:   {:.2} min", metrics.avg_handling_time_minutes);
    println!("  escalation:     {:.1}%", metrics.escalation_rate);
    println!("  total cost:     ${:.2}", metrics.total_cost);

    println!();
    println!("=== ROOT CAUSES ===");
    if report.root_causes.is_empty() {
        println!("  (No root causes identified)");
    }
    for rc in &report.root_causes {
        println!(
            "  {:<40} | {:>5} | {:>5.1}% | AHT {:>4.1} | {}",
            rc.root_cause_label, rc.frequency, rc.percentage, rc.avg_handling_time_minutes, rc.concentration
        );
    }

    println!();
    println!("=== EXECUTIVE SUMMARY ===");
    println!("{}", summary.generated_summary);
    for anomaly in &summary.anomalies {
        println!("  ! {}", anomaly.message);
    }
}

fn print_deep_dive(enhanced: &EnhancedRootCause) {
    let analysis = &enhanced.ai_analysis;
    println!();
    println!("=== DEEP DIVE: {} ===", enhanced.root_cause.root_cause_label);
    for sub in &analysis.sub_issues {
        println!("  {:<32} {:>5} ({:.1}%)", sub.name, sub.count, sub.percentage);
    }
    for corr in &analysis.correlations {
        println!("  ~ {}", corr.insight);
    }
    for action in &analysis.personalized_actions {
        println!("  [{:?}] {}", action.priority, action.text);
    }
    println!("  {}", analysis.predicted_impact.message);
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {path}"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
