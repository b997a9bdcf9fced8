use crate::core::normalize::normalize_payload;
use crate::domain::model::{CanonicalTrackingRecord, CarrierDescriptor, RawCarrierPayload};
use crate::domain::ports::{Clock, TrackingProvider};
use crate::utils::error::Result;
use std::time::Duration;

/// 單一承運商的轉接器。所有承運商共用同一實作，只差在 descriptor。
pub struct CarrierAdapter<'a, P: TrackingProvider, K: Clock> {
    descriptor: &'a CarrierDescriptor,
    provider: &'a P,
    clock: &'a K,
    ingest_wait: Duration,
}

impl<'a, P: TrackingProvider, K: Clock> CarrierAdapter<'a, P, K> {
    pub fn new(
        descriptor: &'a CarrierDescriptor,
        provider: &'a P,
        clock: &'a K,
        ingest_wait: Duration,
    ) -> Self {
        Self {
            descriptor,
            provider,
            clock,
            ingest_wait,
        }
    }

    pub fn carrier_name(&self) -> &str {
        &self.descriptor.display_name
    }

    pub fn carrier_code(&self) -> &str {
        &self.descriptor.code
    }

    pub async fn create_tracking(&self, tracking_number: &str) -> Result<serde_json::Value> {
        self.provider
            .create_tracking(tracking_number, self.carrier_code())
            .await
    }

    pub async fn get_tracking(&self, tracking_number: &str) -> Result<RawCarrierPayload> {
        self.provider
            .get_tracking(tracking_number, self.carrier_code())
            .await
    }

    /// Registers the number, waits for the provider to ingest it, then fetches once.
    /// Registration failures (including "already exists") are logged and ignored.
    pub async fn fetch(&self, tracking_number: &str) -> Result<RawCarrierPayload> {
        tracing::debug!(
            "📡 Registering {} with courier '{}'",
            tracking_number,
            self.carrier_code()
        );
        if let Err(e) = self.create_tracking(tracking_number).await {
            tracing::warn!(
                "Registration of {} for '{}' failed, continuing: {}",
                tracking_number,
                self.carrier_code(),
                e
            );
        }

        if !self.ingest_wait.is_zero() {
            tracing::debug!("⏳ Waiting {:?} for provider ingestion", self.ingest_wait);
            self.clock.sleep(self.ingest_wait).await;
        }

        self.get_tracking(tracking_number).await
    }

    pub fn normalize(&self, tracking_number: &str, raw: &RawCarrierPayload) -> CanonicalTrackingRecord {
        let mut record = normalize_payload(raw);
        record.tracking_number = tracking_number.to_string();
        record.carrier_name = self.carrier_name().to_string();
        record
    }
}
