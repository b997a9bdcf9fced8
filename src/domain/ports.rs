use crate::domain::model::{CarrierDescriptor, RawCarrierPayload};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 外部追蹤服務（TrackingMore 相容）的呼叫介面
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    /// 註冊追蹤號碼；回傳原始回應，呼叫端可忽略失敗
    async fn create_tracking(
        &self,
        tracking_number: &str,
        courier_code: &str,
    ) -> Result<serde_json::Value>;

    /// 取得第一筆追蹤資料
    async fn get_tracking(
        &self,
        tracking_number: &str,
        courier_code: &str,
    ) -> Result<RawCarrierPayload>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn ingest_wait(&self) -> Duration;
    fn extra_carriers(&self) -> &[CarrierDescriptor];
}
