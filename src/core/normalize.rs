use crate::core::timestamp::parse_timestamp_utc;
use crate::domain::model::{
    first_text, text_field, CanonicalStatus, CanonicalTrackingRecord, RawCarrierPayload,
    TrackingEvent,
};

const UNKNOWN_LOCATION: &str = "Unknown location";

/// 將原始資料正規化為標準記錄。tracking_number 與 carrier_name 由呼叫端填入。
///
/// 每個欄位都有預設值，不會失敗。
pub fn normalize_payload(raw: &RawCarrierPayload) -> CanonicalTrackingRecord {
    let mut events = extract_events(raw);
    sort_events_most_recent_first(&mut events);

    let status = map_status(raw);
    let origin = resolve_origin(raw, &events);
    let destination = resolve_destination(raw, &status, &events);
    let last_updated = raw.first_text(&["update_date", "update_at", "updated_at"]);

    CanonicalTrackingRecord {
        tracking_number: String::new(),
        carrier_name: String::new(),
        status,
        origin,
        destination,
        last_updated,
        events,
    }
}

/// Reads `origin_info.trackinfo` in provider order.
pub fn extract_events(raw: &RawCarrierPayload) -> Vec<TrackingEvent> {
    let Some(checkpoints) = raw
        .section("origin_info")
        .and_then(|origin| origin.get("trackinfo"))
        .and_then(|trackinfo| trackinfo.as_array())
    else {
        return Vec::new();
    };

    checkpoints
        .iter()
        .filter_map(|checkpoint| {
            let detail = first_text(checkpoint, &["tracking_detail", "Details"]);
            let status = first_text(checkpoint, &["checkpoint_status", "StatusDescription"]);
            let timestamp = first_text(checkpoint, &["checkpoint_date", "Date"]);
            let office = text_field(checkpoint, "location");

            let location = build_location(&office, &detail);
            if location.is_empty() && status.is_empty() {
                return None;
            }
            Some(TrackingEvent {
                location,
                status,
                timestamp,
            })
        })
        .collect()
}

fn build_location(office: &str, detail: &str) -> String {
    match (office.is_empty(), detail.is_empty()) {
        (false, false) => format!("{} - {}", office, detail),
        (false, true) => office.to_string(),
        (true, false) => detail.to_string(),
        (true, true) => UNKNOWN_LOCATION.to_string(),
    }
}

/// Stable sort, newest first. Missing or unparseable timestamps go last in extraction order.
pub fn sort_events_most_recent_first(events: &mut [TrackingEvent]) {
    let unparseable = events
        .iter()
        .filter(|event| parse_timestamp_utc(&event.timestamp).is_none())
        .count();
    if unparseable > 0 {
        tracing::debug!("{} event(s) without a parseable timestamp sorted last", unparseable);
    }
    events.sort_by_cached_key(|event| std::cmp::Reverse(parse_timestamp_utc(&event.timestamp)));
}

pub fn map_status(raw: &RawCarrierPayload) -> CanonicalStatus {
    let delivery_status = text_field(raw.as_value(), "delivery_status");
    let status = if !delivery_status.is_empty() {
        delivery_status
    } else if raw.as_value().get("substatus").is_some() {
        text_field(raw.as_value(), "substatus")
    } else {
        "unknown".to_string()
    };
    CanonicalStatus::from_raw(&status)
}

fn resolve_origin(raw: &RawCarrierPayload, events: &[TrackingEvent]) -> String {
    let mut origin = String::new();
    if let Some(origin_info) = raw.section("origin_info") {
        let country = text_field(origin_info, "country_name");
        let postal = text_field(origin_info, "postal_code");
        origin = match (postal.is_empty(), country.is_empty()) {
            (false, false) => format!("{}, {}", postal, country),
            (false, true) => postal,
            (true, false) => country,
            (true, true) => String::new(),
        };
    }

    if origin.is_empty() {
        if let Some(oldest) = events.last() {
            origin = oldest.location.clone();
        }
    }
    origin
}

fn resolve_destination(
    raw: &RawCarrierPayload,
    status: &CanonicalStatus,
    events: &[TrackingEvent],
) -> String {
    let mut destination = String::new();
    if let Some(destination_info) = raw.section("destination_info") {
        let city = text_field(destination_info, "recipient_city");
        let state = text_field(destination_info, "recipient_state");
        let postal = text_field(destination_info, "recipient_postal");

        let mut parts = Vec::new();
        if !city.is_empty() {
            parts.push(city.clone());
        }
        if !state.is_empty() && state != city {
            parts.push(state);
        }
        if !postal.is_empty() {
            parts.push(postal);
        }

        destination = if parts.is_empty() {
            text_field(destination_info, "recipient_address")
        } else {
            parts.join(", ")
        };
    }

    if destination.is_empty() && *status == CanonicalStatus::Delivered {
        if let Some(latest) = events.first() {
            destination = latest.location.clone();
        }
    }
    destination
}
