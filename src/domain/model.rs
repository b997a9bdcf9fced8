use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 承運商的靜態身分資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierDescriptor {
    pub code: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default)]
    pub icon: String,
}

impl CarrierDescriptor {
    pub fn new(code: &str, display_name: &str, icon: &str) -> Self {
        Self {
            code: code.trim().to_lowercase(),
            display_name: display_name.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// 追蹤服務回傳的原始 JSON，各承運商欄位名稱不一
#[derive(Debug, Clone, PartialEq)]
pub struct RawCarrierPayload(serde_json::Value);

impl RawCarrierPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// 依序嘗試欄位，回傳第一個非空字串；缺漏、null、空字串都會往下找
    pub fn first_text(&self, keys: &[&str]) -> String {
        first_text(&self.0, keys)
    }

    pub fn section(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key).filter(|v| v.is_object())
    }
}

impl From<serde_json::Value> for RawCarrierPayload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Reads a scalar field as text. Numbers and booleans are rendered, everything else is empty.
pub fn text_field(value: &serde_json::Value, key: &str) -> String {
    match value.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn first_text(value: &serde_json::Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text_field(value, key))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingEvent {
    pub location: String,
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalStatus {
    Delivered,
    InTransit,
    ReadyForPickup,
    Exception,
    Expired,
    Pending,
    NotFound,
    InfoReceived,
    Unknown,
    /// 未知的原始狀態，已轉為 title case
    Other(String),
}

impl CanonicalStatus {
    /// Case-insensitive lookup of the provider vocabulary.
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "delivered" => CanonicalStatus::Delivered,
            "transit" => CanonicalStatus::InTransit,
            "pickup" => CanonicalStatus::ReadyForPickup,
            "exception" => CanonicalStatus::Exception,
            "expired" => CanonicalStatus::Expired,
            "pending" => CanonicalStatus::Pending,
            "notfound" => CanonicalStatus::NotFound,
            "infotreceived" | "inforeceived" => CanonicalStatus::InfoReceived,
            "unknown" | "" => CanonicalStatus::Unknown,
            _ => CanonicalStatus::Other(title_case(raw)),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CanonicalStatus::Delivered => "Delivered",
            CanonicalStatus::InTransit => "In Transit",
            CanonicalStatus::ReadyForPickup => "Ready for Pickup",
            CanonicalStatus::Exception => "Exception",
            CanonicalStatus::Expired => "Expired",
            CanonicalStatus::Pending => "Pending",
            CanonicalStatus::NotFound => "Not Found",
            CanonicalStatus::InfoReceived => "Info Received",
            CanonicalStatus::Unknown => "Unknown",
            CanonicalStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CanonicalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest,
/// so `"out_for_DELIVERY"` becomes `"Out_For_Delivery"`.
pub fn title_case(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut previous_alphabetic = false;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalTrackingRecord {
    pub tracking_number: String,
    #[serde(rename = "carrier")]
    pub carrier_name: String,
    pub status: CanonicalStatus,
    pub origin: String,
    pub destination: String,
    pub last_updated: String,
    pub events: Vec<TrackingEvent>,
}

impl CanonicalTrackingRecord {
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.events.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DelayStatus {
    Normal,
    #[serde(rename = "Possible Delay")]
    PossibleDelay,
    Delayed,
    Exception,
    Unknown,
}

impl fmt::Display for DelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DelayStatus::Normal => "Normal",
            DelayStatus::PossibleDelay => "Possible Delay",
            DelayStatus::Delayed => "Delayed",
            DelayStatus::Exception => "Exception",
            DelayStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DelaySeverity {
    None,
    Low,
    Medium,
    High,
}

impl fmt::Display for DelaySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DelaySeverity::None => "none",
            DelaySeverity::Low => "low",
            DelaySeverity::Medium => "medium",
            DelaySeverity::High => "high",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayAssessment {
    pub status: DelayStatus,
    pub severity: DelaySeverity,
    pub message: String,
    pub hours_since_update: f64,
}

/// 對外回傳的完整結果：正規化記錄、延誤判斷與摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingReport {
    #[serde(flatten)]
    pub record: CanonicalTrackingRecord,
    pub delay_info: DelayAssessment,
    pub smart_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping_is_case_insensitive() {
        assert_eq!(CanonicalStatus::from_raw("DELIVERED"), CanonicalStatus::Delivered);
        assert_eq!(CanonicalStatus::from_raw("Transit"), CanonicalStatus::InTransit);
        assert_eq!(CanonicalStatus::from_raw("InfoReceived"), CanonicalStatus::InfoReceived);
        assert_eq!(CanonicalStatus::from_raw("inforeceived"), CanonicalStatus::InfoReceived);
        assert_eq!(CanonicalStatus::from_raw("unknown"), CanonicalStatus::Unknown);
        assert_eq!(CanonicalStatus::from_raw(""), CanonicalStatus::Unknown);
    }

    #[test]
    fn test_unrecognized_status_is_title_cased() {
        let status = CanonicalStatus::from_raw("out for DELIVERY");
        assert_eq!(status, CanonicalStatus::Other("Out For Delivery".to_string()));
        assert_eq!(status.to_string(), "Out For Delivery");
        assert_eq!(title_case("in_transit02"), "In_Transit02");
    }

    #[test]
    fn test_first_text_skips_empty_and_null() {
        let value = json!({"tracking_detail": "", "Details": null, "location": 400001});
        assert_eq!(first_text(&value, &["tracking_detail", "Details"]), "");
        assert_eq!(first_text(&value, &["tracking_detail", "location"]), "400001");
    }

    #[test]
    fn test_report_serializes_in_response_shape() {
        let report = TrackingReport {
            record: CanonicalTrackingRecord {
                tracking_number: "EE123456789IN".to_string(),
                carrier_name: "India Post".to_string(),
                status: CanonicalStatus::InTransit,
                origin: String::new(),
                destination: String::new(),
                last_updated: String::new(),
                events: vec![],
            },
            delay_info: DelayAssessment {
                status: DelayStatus::PossibleDelay,
                severity: DelaySeverity::Medium,
                message: "No updates".to_string(),
                hours_since_update: 50.0,
            },
            smart_summary: "summary".to_string(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["carrier"], "India Post");
        assert_eq!(value["status"], "In Transit");
        assert_eq!(value["delay_info"]["status"], "Possible Delay");
        assert_eq!(value["delay_info"]["severity"], "medium");
        assert_eq!(value["smart_summary"], "summary");
    }
}
