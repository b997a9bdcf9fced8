use chrono::{TimeZone, Utc};
use dakdash::core::{CanonicalStatus, DelaySeverity, DelayStatus};
use dakdash::{FixedClock, ServiceSettings, TrackingError, TrackingMoreClient, TrackingService};
use httpmock::prelude::*;
use std::time::Duration;

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 28, 12, 0, 0).unwrap())
}

fn service_for(server: &MockServer, clock: FixedClock) -> TrackingService<TrackingMoreClient, FixedClock> {
    let settings = ServiceSettings {
        api_base_url: server.base_url(),
        api_key: "test-key".to_string(),
        request_timeout: Duration::from_secs(5),
        ingest_wait: Duration::from_secs(2),
        extra_carriers: Vec::new(),
    };
    let client = TrackingMoreClient::new(&settings.api_base_url, &settings.api_key, settings.request_timeout)
        .unwrap();
    TrackingService::new(client, clock, settings)
}

#[tokio::test]
async fn test_end_to_end_tracking_report() {
    let server = MockServer::start_async().await;

    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/trackings/create")
                .header("Tracking-Api-Key", "test-key")
                .json_body(serde_json::json!({
                    "tracking_number": "EE123456789IN",
                    "courier_code": "india-post"
                }));
            then.status(200).json_body(serde_json::json!({
                "meta": {"code": 200, "message": "Request response is successful"}
            }));
        })
        .await;

    let get_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/trackings/get")
                .header("Tracking-Api-Key", "test-key")
                .query_param("tracking_numbers", "EE123456789IN")
                .query_param("courier_code", "india-post");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "meta": {"code": 200, "message": "Request response is successful"},
                    "data": [{
                        "tracking_number": "EE123456789IN",
                        "delivery_status": "transit",
                        "update_at": "2026-01-25T08:00:00+05:30",
                        "update_date": "2026-01-25T08:00:00+05:30",
                        "origin_info": {
                            "country_name": "India",
                            "postal_code": "560001",
                            "trackinfo": [
                                {
                                    "location": "Bengaluru GPO",
                                    "tracking_detail": "Item Booked",
                                    "checkpoint_status": "Booked",
                                    "checkpoint_date": "2026-01-23T10:00:00+05:30"
                                },
                                {
                                    "location": "Nagpur NSH",
                                    "tracking_detail": "Item Dispatched",
                                    "checkpoint_status": "In Transit",
                                    "checkpoint_date": "2026-01-25T08:00:00+05:30"
                                },
                                {
                                    "location": "Bengaluru NSH",
                                    "tracking_detail": "Bag Closed",
                                    "checkpoint_status": "In Transit",
                                    "checkpoint_date": "2026-01-24T09:30:00+05:30"
                                }
                            ]
                        },
                        "destination_info": {
                            "recipient_city": "Nagpur",
                            "recipient_state": "Maharashtra",
                            "recipient_postal": "440001"
                        }
                    }]
                }));
        })
        .await;

    let clock = clock();
    let service = service_for(&server, clock.clone());
    let report = service
        .resolve_and_track("EE123456789IN", "india-post")
        .await
        .unwrap();

    create_mock.assert_async().await;
    get_mock.assert_async().await;
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(2)]);

    assert_eq!(report.record.tracking_number, "EE123456789IN");
    assert_eq!(report.record.carrier_name, "India Post");
    assert_eq!(report.record.status, CanonicalStatus::InTransit);
    assert_eq!(report.record.origin, "560001, India");
    assert_eq!(report.record.destination, "Nagpur, Maharashtra, 440001");
    assert_eq!(report.record.last_updated, "2026-01-25T08:00:00+05:30");

    let locations: Vec<&str> = report
        .record
        .events
        .iter()
        .map(|event| event.location.as_str())
        .collect();
    assert_eq!(
        locations,
        vec![
            "Nagpur NSH - Item Dispatched",
            "Bengaluru NSH - Bag Closed",
            "Bengaluru GPO - Item Booked"
        ]
    );

    // 2026-01-25 02:30 UTC -> 2026-01-28 12:00 UTC
    assert_eq!(report.delay_info.status, DelayStatus::Delayed);
    assert_eq!(report.delay_info.severity, DelaySeverity::High);
    assert_eq!(report.delay_info.hours_since_update, 81.5);
    assert!(report.smart_summary.contains("hasn't moved for 81 hours"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["carrier"], "India Post");
    assert_eq!(json["status"], "In Transit");
    assert_eq!(json["delay_info"]["status"], "Delayed");
    assert_eq!(json["delay_info"]["severity"], "high");
    assert_eq!(json["events"][0]["status"], "In Transit");
}

#[tokio::test]
async fn test_registration_failure_is_not_fatal() {
    let server = MockServer::start_async().await;

    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/trackings/create");
            then.status(400).json_body(serde_json::json!({
                "meta": {"code": 4016, "message": "Tracking No. already exists."}
            }));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/trackings/get");
            then.status(200).json_body(serde_json::json!({
                "meta": {"code": 200, "message": "ok"},
                "data": [{"delivery_status": "delivered", "update_at": "2026-01-20T10:00:00Z"}]
            }));
        })
        .await;

    let service = service_for(&server, clock());
    let report = service.resolve_and_track("1234567890", "dtdc").await.unwrap();

    create_mock.assert_async().await;
    assert_eq!(report.record.carrier_name, "DTDC");
    assert_eq!(report.record.status, CanonicalStatus::Delivered);
    assert_eq!(report.delay_info.status, DelayStatus::Normal);
    assert_eq!(report.delay_info.message, "Shipment has been delivered");
}

#[tokio::test]
async fn test_invalid_api_key_is_auth_failure() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/trackings/create");
            then.status(401);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/trackings/get");
            then.status(401).json_body(serde_json::json!({
                "meta": {"code": 401, "message": "Invalid API key"}
            }));
        })
        .await;

    let service = service_for(&server, clock());
    let result = service.resolve_and_track("EE123456789IN", "india-post").await;

    let error = result.unwrap_err();
    assert!(matches!(error, TrackingError::UpstreamAuthFailure));
    assert_eq!(error.http_status(), 500);
}

#[tokio::test]
async fn test_empty_data_is_no_data_yet() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/trackings/create");
            then.status(200)
                .json_body(serde_json::json!({"meta": {"code": 200, "message": "ok"}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/trackings/get");
            then.status(200)
                .json_body(serde_json::json!({"meta": {"code": 200, "message": "ok"}, "data": []}));
        })
        .await;

    let service = service_for(&server, clock());
    let result = service.resolve_and_track("EE123456789IN", "india-post").await;

    let error = result.unwrap_err();
    assert!(matches!(error, TrackingError::NoDataYet { .. }));
    assert_eq!(error.http_status(), 404);
}

#[tokio::test]
async fn test_rejected_requests_never_reach_provider() {
    let server = MockServer::start_async().await;

    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/trackings/create");
            then.status(200);
        })
        .await;
    let get_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/trackings/get");
            then.status(200);
        })
        .await;

    let service = service_for(&server, clock());

    let unsupported = service.resolve_and_track("EE123456789IN", "fedex").await;
    assert!(matches!(
        unsupported,
        Err(TrackingError::UnsupportedCarrier { ref code }) if code == "fedex"
    ));

    let too_short = service.resolve_and_track("1234567", "india-post").await;
    assert!(matches!(too_short, Err(TrackingError::InvalidTrackingNumber { .. })));

    create_mock.assert_hits_async(0).await;
    get_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_configured_carrier_is_trackable() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/trackings/create");
            then.status(200)
                .json_body(serde_json::json!({"meta": {"code": 200, "message": "ok"}}));
        })
        .await;
    let get_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/trackings/get")
                .query_param("courier_code", "xpressbees");
            then.status(200).json_body(serde_json::json!({
                "meta": {"code": 200, "message": "ok"},
                "data": [{
                    "delivery_status": "pickup",
                    "update_at": "2026-01-28T09:00:00Z",
                    "origin_info": {"trackinfo": [{
                        "location": "Pune Hub",
                        "tracking_detail": "Out for delivery",
                        "checkpoint_status": "Out For Delivery",
                        "checkpoint_date": "2026-01-28T09:00:00Z"
                    }]}
                }]
            }));
        })
        .await;

    let settings = ServiceSettings {
        api_base_url: server.base_url(),
        api_key: "test-key".to_string(),
        request_timeout: Duration::from_secs(5),
        ingest_wait: Duration::ZERO,
        extra_carriers: vec![dakdash::core::CarrierDescriptor::new("XpressBees", "XpressBees", "🐝")],
    };
    let client = TrackingMoreClient::new(&settings.api_base_url, &settings.api_key, settings.request_timeout)
        .unwrap();
    let clock = clock();
    let service = TrackingService::new(client, clock.clone(), settings);

    let report = service
        .resolve_and_track("XB1234567890", "xpressbees")
        .await
        .unwrap();

    get_mock.assert_async().await;
    assert!(clock.sleeps().is_empty());
    assert_eq!(report.record.carrier_name, "XpressBees");
    assert_eq!(report.record.status, CanonicalStatus::ReadyForPickup);
    assert_eq!(report.delay_info.status, DelayStatus::Normal);
    assert!(report
        .smart_summary
        .contains("out for delivery from Pune Hub - Out for delivery"));
}
