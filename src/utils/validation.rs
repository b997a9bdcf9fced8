use crate::utils::error::{TrackingError, Result};
use url::Url;

/// 追蹤號碼最短長度，短於此值不會送出任何外部請求
pub const MIN_TRACKING_NUMBER_LEN: usize = 8;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_tracking_number(tracking_number: &str) -> Result<()> {
    if tracking_number.chars().count() < MIN_TRACKING_NUMBER_LEN {
        return Err(TrackingError::InvalidTrackingNumber {
            tracking_number: tracking_number.to_string(),
            reason: format!("must be at least {} characters", MIN_TRACKING_NUMBER_LEN),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TrackingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TrackingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TrackingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackingError::InvalidConfigValueError {
            field: field_name.to_string(),
            // 不回顯原值，api_key 也走這裡
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TrackingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_carrier_code(field_name: &str, code: &str) -> Result<()> {
    validate_non_empty_string(field_name, code)?;
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TrackingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Carrier codes may only contain letters, digits, '-' and '_'".to_string(),
        });
    }
    Ok(())
}
