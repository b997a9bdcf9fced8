use crate::core::timestamp::parse_timestamp_utc;
use crate::domain::model::{
    CanonicalTrackingRecord, DelayAssessment, DelaySeverity, DelayStatus, RawCarrierPayload,
};
use chrono::{DateTime, Utc};

const PENDING_THRESHOLD_HOURS: f64 = 24.0;
const STUCK_THRESHOLD_HOURS: f64 = 36.0;
const POSSIBLE_DELAY_THRESHOLD_HOURS: f64 = 48.0;
const DELAYED_THRESHOLD_HOURS: f64 = 72.0;

pub const EXCEPTION_STATUSES: &[&str] = &["exception", "alert", "undelivered"];

/// 最後更新時間的三種情況，各自對應一條明確的分支
#[derive(Debug, Clone, PartialEq)]
pub enum LastUpdate {
    Missing,
    Unparseable(String),
    At(DateTime<Utc>),
}

impl LastUpdate {
    pub fn from_raw(raw: &RawCarrierPayload) -> Self {
        let text = raw.first_text(&["update_at", "latest_checkpoint_time"]);
        if text.is_empty() {
            return LastUpdate::Missing;
        }
        match parse_timestamp_utc(&text) {
            Some(parsed) => LastUpdate::At(parsed),
            None => LastUpdate::Unparseable(text),
        }
    }
}

/// Everything the rules look at, pulled out of the raw payload and the canonical record.
#[derive(Debug, Clone)]
pub struct DelaySignals<'a> {
    /// Lowercased `delivery_status`.
    pub delivery_status: String,
    pub last_update: LastUpdate,
    pub latest_location: Option<&'a str>,
    pub previous_location: Option<&'a str>,
    pub carrier_name: &'a str,
}

impl<'a> DelaySignals<'a> {
    pub fn collect(raw: &RawCarrierPayload, record: &'a CanonicalTrackingRecord) -> Self {
        Self {
            delivery_status: raw.first_text(&["delivery_status"]).to_lowercase(),
            last_update: LastUpdate::from_raw(raw),
            latest_location: record.events.first().map(|e| e.location.as_str()),
            previous_location: record.events.get(1).map(|e| e.location.as_str()),
            carrier_name: &record.carrier_name,
        }
    }
}

fn assessment(status: DelayStatus, severity: DelaySeverity, message: String, hours: f64) -> DelayAssessment {
    DelayAssessment {
        status,
        severity,
        message,
        hours_since_update: hours,
    }
}

/// Applies the delay rules in order. Later rules overwrite earlier verdicts;
/// delivered, missing and unparseable timestamps return early.
pub fn classify(signals: &DelaySignals<'_>, now: DateTime<Utc>) -> DelayAssessment {
    let mut verdict = assessment(
        DelayStatus::Normal,
        DelaySeverity::None,
        "Shipment is progressing normally".to_string(),
        0.0,
    );

    if signals.delivery_status == "delivered" {
        verdict.message = "Shipment has been delivered".to_string();
        return verdict;
    }

    let last_update = match &signals.last_update {
        LastUpdate::Missing => {
            verdict.status = DelayStatus::Unknown;
            verdict.message = "No tracking updates available yet".to_string();
            return verdict;
        }
        LastUpdate::Unparseable(text) => {
            tracing::warn!("Unparseable last-update timestamp '{}', skipping delay rules", text);
            return verdict;
        }
        LastUpdate::At(parsed) => *parsed,
    };

    let elapsed_seconds = now.signed_duration_since(last_update).num_milliseconds() as f64 / 1000.0;
    let hours = (elapsed_seconds / 3600.0).max(0.0);
    let whole_hours = hours.trunc() as i64;
    verdict.hours_since_update = (hours * 10.0).round() / 10.0;

    if signals.delivery_status == "pending" && hours > PENDING_THRESHOLD_HOURS {
        verdict = assessment(
            DelayStatus::PossibleDelay,
            DelaySeverity::Low,
            format!(
                "No movement detected for {} hours. Shipment may still be awaiting pickup.",
                whole_hours
            ),
            verdict.hours_since_update,
        );
    } else if hours > DELAYED_THRESHOLD_HOURS {
        verdict = assessment(
            DelayStatus::Delayed,
            DelaySeverity::High,
            format!(
                "Shipment has not moved for {} hours. This is unusual and may indicate a delay.",
                whole_hours
            ),
            verdict.hours_since_update,
        );
    } else if hours > POSSIBLE_DELAY_THRESHOLD_HOURS {
        verdict = assessment(
            DelayStatus::PossibleDelay,
            DelaySeverity::Medium,
            format!(
                "No updates for {} hours. Shipment may be delayed at a sorting facility.",
                whole_hours
            ),
            verdict.hours_since_update,
        );
    }

    if let (Some(latest), Some(previous)) = (signals.latest_location, signals.previous_location) {
        if !latest.is_empty() && latest == previous && hours > STUCK_THRESHOLD_HOURS {
            verdict = assessment(
                DelayStatus::Delayed,
                DelaySeverity::High,
                format!("Shipment stuck at {} for {} hours.", latest, whole_hours),
                verdict.hours_since_update,
            );
        }
    }

    if EXCEPTION_STATUSES.contains(&signals.delivery_status.as_str()) {
        verdict = assessment(
            DelayStatus::Exception,
            DelaySeverity::High,
            format!(
                "Shipment encountered an exception. Please contact {} for details.",
                signals.carrier_name
            ),
            verdict.hours_since_update,
        );
    }

    verdict
}
