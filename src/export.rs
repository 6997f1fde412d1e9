use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::models::{AlertRecord, Severity};

#[derive(Serialize)]
struct HistoryRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    alert_type: &'a str,
    severity: Severity,
    location: &'a str,
    timestamp: String,
    status: String,
    description: &'a str,
    anomaly_score: Option<f64>,
    snapshot: &'a str,
}

/// Writes the history table in the order given. Returns the row count.
pub fn write_history_csv(path: &Path, records: &[AlertRecord]) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for record in records {
        writer.serialize(HistoryRow {
            id: &record.id,
            alert_type: &record.alert_type,
            severity: record.severity,
            location: &record.location,
            timestamp: record.timestamp.to_rfc3339(),
            status: record.status.map(|s| s.to_string()).unwrap_or_default(),
            description: record.description.as_deref().unwrap_or(""),
            anomaly_score: record.anomaly_score,
            snapshot: record.snapshot.as_deref().unwrap_or(""),
        })?;
    }

    writer.flush()?;
    Ok(records.len())
}
