pub mod action_prioritizer;
pub mod anomaly_detection;
pub mod brief;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod deep_dive;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod metrics;
pub mod narrative;
pub mod phrases;
pub mod rng;
pub mod root_cause_analysis;
pub mod types;
