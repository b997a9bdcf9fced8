use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Invalid tracking number '{tracking_number}': {reason}")]
    InvalidTrackingNumber {
        tracking_number: String,
        reason: String,
    },

    #[error("Carrier '{code}' is not supported")]
    UnsupportedCarrier { code: String },

    #[error("No tracking data available yet for {tracking_number}")]
    NoDataYet { tracking_number: String },

    #[error("Tracking information not found: {message}")]
    UpstreamNotFound { message: String },

    #[error("Tracking provider rejected the API credentials")]
    UpstreamAuthFailure,

    #[error("Tracking provider timed out: {message}")]
    UpstreamTimeout { message: String },

    #[error("Tracking provider unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("Malformed provider payload: {message}")]
    NormalizationDefect { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Output rendering error: {0}")]
    OutputError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, TrackingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入錯誤
    Input,
    /// 外部追蹤服務錯誤
    Upstream,
    /// 追蹤資料尚未就緒
    Pending,
    /// 配置錯誤
    Configuration,
    /// 本地系統錯誤
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl From<reqwest::Error> for TrackingError {
    fn from(err: reqwest::Error) -> Self {
        // 不帶 URL，避免查詢參數外洩
        let err = err.without_url();
        if err.is_timeout() {
            TrackingError::UpstreamTimeout {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TrackingError::NormalizationDefect {
                message: err.to_string(),
            }
        } else {
            TrackingError::UpstreamUnavailable {
                message: err.to_string(),
            }
        }
    }
}

impl TrackingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackingError::InvalidTrackingNumber { .. } | TrackingError::UnsupportedCarrier { .. } => {
                ErrorCategory::Input
            }
            TrackingError::NoDataYet { .. } => ErrorCategory::Pending,
            TrackingError::UpstreamNotFound { .. }
            | TrackingError::UpstreamAuthFailure
            | TrackingError::UpstreamTimeout { .. }
            | TrackingError::UpstreamUnavailable { .. }
            | TrackingError::NormalizationDefect { .. } => ErrorCategory::Upstream,
            TrackingError::ConfigError { .. }
            | TrackingError::MissingConfigError { .. }
            | TrackingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TrackingError::IoError(_)
            | TrackingError::SerializationError(_)
            | TrackingError::OutputError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackingError::NoDataYet { .. } => ErrorSeverity::Low,
            TrackingError::UpstreamNotFound { .. }
            | TrackingError::UpstreamTimeout { .. }
            | TrackingError::UpstreamUnavailable { .. } => ErrorSeverity::Medium,
            TrackingError::InvalidTrackingNumber { .. }
            | TrackingError::UnsupportedCarrier { .. }
            | TrackingError::NormalizationDefect { .. } => ErrorSeverity::High,
            TrackingError::UpstreamAuthFailure
            | TrackingError::ConfigError { .. }
            | TrackingError::MissingConfigError { .. }
            | TrackingError::InvalidConfigValueError { .. }
            | TrackingError::IoError(_)
            | TrackingError::SerializationError(_)
            | TrackingError::OutputError(_) => ErrorSeverity::Critical,
        }
    }

    /// 對應到 HTTP 邊界層應回傳的狀態碼
    pub fn http_status(&self) -> u16 {
        match self {
            TrackingError::InvalidTrackingNumber { .. } | TrackingError::UnsupportedCarrier { .. } => 400,
            TrackingError::NoDataYet { .. } | TrackingError::UpstreamNotFound { .. } => 404,
            TrackingError::UpstreamTimeout { .. } => 504,
            TrackingError::UpstreamUnavailable { .. } => 503,
            _ => 500,
        }
    }

    /// 給終端使用者看的訊息，不含憑證或傳輸層細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackingError::InvalidTrackingNumber { .. } => "Invalid tracking number format".to_string(),
            TrackingError::UnsupportedCarrier { code } => {
                format!("Carrier '{}' is not supported", code)
            }
            TrackingError::NoDataYet { .. } => {
                "No tracking data available yet. The carrier may still be processing this shipment."
                    .to_string()
            }
            TrackingError::UpstreamNotFound { message } => {
                format!("Tracking information not found: {}", message)
            }
            TrackingError::UpstreamAuthFailure => "API authentication failed".to_string(),
            TrackingError::UpstreamTimeout { .. } => {
                "Tracking service timeout. Please try again.".to_string()
            }
            TrackingError::UpstreamUnavailable { .. } => {
                "Unable to connect to tracking service".to_string()
            }
            TrackingError::NormalizationDefect { .. } => {
                "The tracking service returned data we could not read".to_string()
            }
            TrackingError::ConfigError { .. }
            | TrackingError::MissingConfigError { .. }
            | TrackingError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            TrackingError::IoError(_)
            | TrackingError::SerializationError(_)
            | TrackingError::OutputError(_) => "Internal error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check the tracking number (at least 8 characters) and pick a carrier from `dakdash carriers`"
            }
            ErrorCategory::Pending => "Wait a few minutes and track the shipment again",
            ErrorCategory::Upstream => match self {
                TrackingError::UpstreamAuthFailure => {
                    "Verify TRACKINGMORE_API_KEY or provider.api_key in the config file"
                }
                _ => "Retry later; the tracking provider may be temporarily unavailable",
            },
            ErrorCategory::Configuration => "Fix the configuration file or environment variables",
            ErrorCategory::System => "Re-run with --verbose and check the logs",
        }
    }
}
