use crate::config::ServiceSettings;
use crate::core::adapter::CarrierAdapter;
use crate::core::delay::{classify, DelaySignals};
use crate::core::demo::{demo_payload, DEMO_CARRIER_CODE, DEMO_TRACKING_NUMBER};
use crate::core::registry::CarrierRegistry;
use crate::core::summary::summarize;
use crate::domain::model::{CarrierDescriptor, RawCarrierPayload, TrackingReport};
use crate::domain::ports::{Clock, TrackingProvider};
use crate::utils::error::{Result, TrackingError};
use crate::utils::validation::validate_tracking_number;

/// 對外服務邊界：驗證輸入、解析承運商、呼叫追蹤服務並組出報告。
///
/// 每個請求各自獨立，沒有跨請求的可變狀態；同一追蹤號碼的並行查詢不會合併。
pub struct TrackingService<P: TrackingProvider, K: Clock> {
    registry: CarrierRegistry,
    provider: P,
    clock: K,
    settings: ServiceSettings,
}

impl<P: TrackingProvider, K: Clock> TrackingService<P, K> {
    pub fn new(provider: P, clock: K, settings: ServiceSettings) -> Self {
        Self {
            registry: CarrierRegistry::with_extra(&settings.extra_carriers),
            provider,
            clock,
            settings,
        }
    }

    pub fn list_carriers(&self) -> &[CarrierDescriptor] {
        self.registry.list()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub async fn resolve_and_track(
        &self,
        tracking_number: &str,
        carrier_code: &str,
    ) -> Result<TrackingReport> {
        validate_tracking_number(tracking_number)?;
        let descriptor = self.registry.resolve(carrier_code)?;

        tracing::info!(
            "🔎 Tracking {} via {} ({})",
            tracking_number,
            descriptor.display_name,
            descriptor.code
        );

        let adapter = CarrierAdapter::new(
            descriptor,
            &self.provider,
            &self.clock,
            self.settings.ingest_wait,
        );

        let budget = self.settings.request_timeout;
        let raw = tokio::time::timeout(budget, adapter.fetch(tracking_number))
            .await
            .map_err(|_| TrackingError::UpstreamTimeout {
                message: format!("no response within {:?}", budget),
            })??;

        let report = self.compose(&adapter, tracking_number, &raw);
        tracing::info!(
            "✅ {}: {} / {} ({} events)",
            tracking_number,
            report.record.status,
            report.delay_info.status,
            report.record.events.len()
        );
        Ok(report)
    }

    /// Canned in-transit shipment with a stale last scan. Runs the same
    /// normalize/classify/summarize path without touching the network.
    pub fn demo_report(&self) -> Result<TrackingReport> {
        let descriptor = self.registry.resolve(DEMO_CARRIER_CODE)?;
        let adapter = CarrierAdapter::new(
            descriptor,
            &self.provider,
            &self.clock,
            self.settings.ingest_wait,
        );
        let raw = demo_payload(self.clock.now());
        Ok(self.compose(&adapter, DEMO_TRACKING_NUMBER, &raw))
    }

    fn compose(
        &self,
        adapter: &CarrierAdapter<'_, P, K>,
        tracking_number: &str,
        raw: &RawCarrierPayload,
    ) -> TrackingReport {
        let record = adapter.normalize(tracking_number, raw);
        let delay_info = classify(&DelaySignals::collect(raw, &record), self.clock.now());
        let smart_summary = summarize(
            &raw.first_text(&["delivery_status"]),
            record.latest_event(),
            &delay_info,
            &record.carrier_name,
        );

        TrackingReport {
            record,
            delay_info,
            smart_summary,
        }
    }
}
