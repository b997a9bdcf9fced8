pub mod adapter;
pub mod delay;
pub mod demo;
pub mod normalize;
pub mod registry;
pub mod service;
pub mod summary;
pub mod timestamp;

pub use crate::domain::model::{
    CanonicalStatus, CanonicalTrackingRecord, CarrierDescriptor, DelayAssessment, DelaySeverity,
    DelayStatus, RawCarrierPayload, TrackingEvent, TrackingReport,
};
pub use crate::domain::ports::{Clock, ConfigProvider, TrackingProvider};
pub use crate::utils::error::Result;
