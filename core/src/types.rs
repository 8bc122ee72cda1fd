//! Shared primitive types used across the entire pipeline.

/// Identifier of the agent who handled an interaction.
pub type AgentId = String;

/// A root-cause category label, e.g. "Digital/App Experience".
/// Labels are plain strings because the catalog can be overridden at
/// load time; lookups against unknown labels degrade silently.
pub type RootCauseLabel = String;

/// Opaque, caller-owned filter description. Carried through for
/// attribution and never interpreted.
pub type FilterContext = serde_json::Value;

/// Agent id used when a record carries none.
pub const UNKNOWN_AGENT: &str = "unknown";

/// Round to `places` decimal places. Exact decimal ties go to the even
/// neighbour, so 0.25 rounds to 0.2 and 0.75 to 0.8.
///
/// The decision is made on the exact value of the double, not on the
/// product `value * 10^places`: 0.15 is stored just below the tie and
/// rounds to 0.1 even though `0.15 * 10.0 == 1.5`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let nearest = scaled.round();
    if (nearest - scaled).abs() != 0.5 {
        return nearest / factor;
    }

    // `scaled` sits on a half. The product's rounding error says which side
    // the exact value is on; zero error means a true tie.
    let error = value.mul_add(factor, -scaled);
    let lower = scaled.floor();
    let rounded = if error > 0.0 {
        lower + 1.0
    } else if error < 0.0 {
        lower
    } else if lower % 2.0 == 0.0 {
        lower
    } else {
        lower + 1.0
    };
    rounded / factor
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
