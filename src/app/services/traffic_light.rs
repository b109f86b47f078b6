//! Traffic-light classification engine
//!
//! Pure derivation of a record's urgency state from its health status and
//! the days elapsed since the mating event. Precedence is fixed: a
//! medication flag always wins, then the day bands in order.

use serde::{Deserialize, Serialize};

use crate::app::models::TrafficLight;
use crate::constants::{MEDICATION_KEYWORDS, thresholds};

/// Day-band thresholds for the green/yellow/red classification.
///
/// Invariant: every stored record is classified against the same threshold
/// set at any instant; changing thresholds re-classifies the whole store in
/// one pass (see `SowStore::set_thresholds`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub green_min: i32,
    pub green_max: i32,
    pub yellow_min: i32,
    pub yellow_max: i32,
    pub red_min: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            green_min: thresholds::GREEN_MIN,
            green_max: thresholds::GREEN_MAX,
            yellow_min: thresholds::YELLOW_MIN,
            yellow_max: thresholds::YELLOW_MAX,
            red_min: thresholds::RED_MIN,
        }
    }
}

/// Classify one record.
///
/// Precedence, first match wins:
/// 1. `Purple` when the health status contains a medication keyword
/// 2. `Green`, `Yellow`, `Red` by day band
/// 3. `Unknown` otherwise (negative days, i.e. missing or future date)
pub fn classify(
    health_status: Option<&str>,
    days_since_event: i32,
    thresholds: &Thresholds,
) -> TrafficLight {
    if let Some(health) = health_status {
        let lower = health.to_lowercase();
        if MEDICATION_KEYWORDS
            .iter()
            .any(|keyword| lower.contains(keyword))
        {
            return TrafficLight::Purple;
        }
    }

    let days = days_since_event;
    if days >= thresholds.green_min && days <= thresholds.green_max {
        TrafficLight::Green
    } else if days >= thresholds.yellow_min && days <= thresholds.yellow_max {
        TrafficLight::Yellow
    } else if days >= thresholds.red_min {
        TrafficLight::Red
    } else {
        TrafficLight::Unknown
    }
}
