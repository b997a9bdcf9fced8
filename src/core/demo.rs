use crate::domain::model::RawCarrierPayload;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

pub const DEMO_TRACKING_NUMBER: &str = "DEMO12345IN";
pub const DEMO_CARRIER_CODE: &str = "india-post";

fn at(now: DateTime<Utc>, ago: Duration) -> String {
    (now - ago).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 示範資料：運輸中、最後更新在 78 小時前，會觸發延誤判斷
pub fn demo_payload(now: DateTime<Utc>) -> RawCarrierPayload {
    let last_scan = at(now, Duration::days(3) + Duration::hours(6));
    RawCarrierPayload::new(serde_json::json!({
        "tracking_number": DEMO_TRACKING_NUMBER,
        "courier_code": DEMO_CARRIER_CODE,
        "delivery_status": "transit",
        "update_date": last_scan,
        "update_at": last_scan,
        "origin_info": {
            "country_name": "India",
            "postal_code": "400001",
            "trackinfo": [
                {
                    "location": "Mumbai Sorting Center",
                    "tracking_detail": "Package received",
                    "checkpoint_status": "In Transit",
                    "checkpoint_date": at(now, Duration::days(5)),
                },
                {
                    "location": "Mumbai Central",
                    "tracking_detail": "Dispatched to Delhi",
                    "checkpoint_status": "In Transit",
                    "checkpoint_date": at(now, Duration::days(4) + Duration::hours(18)),
                },
                {
                    "location": "Delhi Regional Hub",
                    "tracking_detail": "Arrived",
                    "checkpoint_status": "In Transit",
                    "checkpoint_date": at(now, Duration::days(3) + Duration::hours(12)),
                },
                {
                    "location": "Delhi Sorting Center",
                    "tracking_detail": "Processing",
                    "checkpoint_status": "In Transit",
                    "checkpoint_date": last_scan,
                }
            ]
        },
        "destination_info": {
            "recipient_city": "Delhi",
            "recipient_state": "NCR"
        }
    }))
}
