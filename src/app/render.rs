use crate::domain::model::{CarrierDescriptor, TrackingReport};
use crate::utils::error::{Result, TrackingError};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Pretty JSON in the API response shape
    #[default]
    Json,
    /// Event timeline as CSV
    Csv,
    /// Human-readable summary
    Text,
}

pub fn render_report(report: &TrackingReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_timeline_csv(report),
        OutputFormat::Text => Ok(render_report_text(report)),
    }
}

fn render_timeline_csv(report: &TrackingReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["tracking_number", "timestamp", "status", "location"])?;
    for event in &report.record.events {
        writer.write_record([
            report.record.tracking_number.as_str(),
            event.timestamp.as_str(),
            event.status.as_str(),
            event.location.as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TrackingError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn render_report_text(report: &TrackingReport) -> String {
    let record = &report.record;
    let mut out = String::new();
    let _ = writeln!(out, "📦 {} ({})", record.tracking_number, record.carrier_name);
    let _ = writeln!(out, "Status:       {}", record.status);
    let _ = writeln!(out, "Route:        {} → {}", or_dash(&record.origin), or_dash(&record.destination));
    let _ = writeln!(out, "Last updated: {}", or_dash(&record.last_updated));
    let _ = writeln!(
        out,
        "Delay:        {} [{}] {}",
        report.delay_info.status, report.delay_info.severity, report.delay_info.message
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.smart_summary);

    if !record.events.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Timeline:");
        for event in &record.events {
            let _ = writeln!(
                out,
                "  {:<25}  {:<20}  {}",
                or_dash(&event.timestamp),
                or_dash(&event.status),
                event.location
            );
        }
    }
    out
}

pub fn render_carriers(carriers: &[CarrierDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &serde_json::json!({ "carriers": carriers }),
        )?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["code", "name", "icon"])?;
            for carrier in carriers {
                writer.write_record([&carrier.code, &carrier.display_name, &carrier.icon])?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| TrackingError::IoError(e.into_error()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Text => Ok(carriers
            .iter()
            .map(|c| format!("{} {:<14} {}\n", c.icon, c.code, c.display_name))
            .collect()),
    }
}
