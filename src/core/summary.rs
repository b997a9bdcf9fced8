use crate::core::delay::EXCEPTION_STATUSES;
use crate::domain::model::{DelayAssessment, DelayStatus, TrackingEvent};

/// 依狀態與延誤判斷挑選摘要文字，任何輸入都會得到非空字串
pub fn summarize(
    delivery_status: &str,
    latest_event: Option<&TrackingEvent>,
    assessment: &DelayAssessment,
    carrier_name: &str,
) -> String {
    let delivery_status = delivery_status.to_lowercase();

    if delivery_status == "delivered" {
        return "🎉 Great news! Your parcel has been delivered successfully.".to_string();
    }

    if EXCEPTION_STATUSES.contains(&delivery_status.as_str()) {
        return format!(
            "⚠️ Your shipment has encountered an issue. Please contact {} customer service for assistance.",
            carrier_name
        );
    }

    if let Some(event) = latest_event {
        let location = event.location.as_str();
        let event_status = event.status.to_lowercase();
        let whole_hours = assessment.hours_since_update.trunc() as i64;

        if delivery_status == "transit" || event_status.contains("transit") {
            return if assessment.status == DelayStatus::Delayed {
                format!(
                    "⏸️ Your parcel is currently at {}, but hasn't moved for {} hours. Expect possible delays.",
                    location, whole_hours
                )
            } else {
                format!(
                    "📦 Your parcel is in transit. Last location: {}. Delivery expected soon.",
                    location
                )
            };
        }

        if event_status.contains("out for delivery") || delivery_status == "pickup" {
            return format!(
                "🚚 Excellent! Your parcel is out for delivery from {}. You should receive it today.",
                location
            );
        }

        if event_status.contains("pickup") {
            return format!(
                "📬 Your parcel is ready for pickup at {}. Please collect it at your convenience.",
                location
            );
        }

        if delivery_status == "pending" || event_status.contains("booked") {
            return if assessment.hours_since_update > 24.0 {
                format!(
                    "⏳ Your parcel was registered at {} but hasn't started moving yet. This may take 24-48 hours.",
                    location
                )
            } else {
                format!(
                    "✅ Your parcel has been booked at {} and will begin its journey soon.",
                    location
                )
            };
        }
    }

    if delivery_status == "pending" {
        return format!(
            "⏳ Your tracking number is registered. Waiting for {} to scan and dispatch the parcel.",
            carrier_name
        );
    }

    "📦 Your parcel is being processed. Check back soon for detailed updates.".to_string()
}
