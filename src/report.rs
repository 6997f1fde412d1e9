use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::classify::{recommended_actions, SeverityCategory, Tone};
use crate::config::Settings;
use crate::models::{AlertRecord, HazardSnapshot, SystemStatus};
use crate::sort::{SortField, SortOrder, SortState};

fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Critical => "ALERT",
        Tone::Warning => "CAUTION",
        Tone::Normal => "MONITORING",
    }
}

fn write_actions(output: &mut String, hazard_type: &str, indent: &str) {
    for (step, action) in recommended_actions(hazard_type).iter().enumerate() {
        let _ = writeln!(output, "{indent}{}. {action}", step + 1);
    }
}

pub fn render_dashboard(snapshot: Option<&HazardSnapshot>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# SentinelX Dashboard");
    let _ = writeln!(output);

    let Some(snapshot) = snapshot else {
        let _ = writeln!(output, "All clear: no active hazards detected.");
        return output;
    };

    let _ = writeln!(
        output,
        "Status:      {}",
        tone_label(snapshot.risk_level.category().tone())
    );
    let _ = writeln!(output, "Hazard:      {}", snapshot.hazard_type);
    let _ = writeln!(
        output,
        "Risk level:  {} [{}]",
        snapshot.risk_level,
        snapshot.risk_level.category()
    );
    let _ = writeln!(output, "Location:    {}", snapshot.location);
    let _ = writeln!(output, "Detected at: {}", format_time(&snapshot.timestamp));
    if let Some(confidence) = snapshot.confidence {
        let _ = writeln!(output, "Confidence:  {confidence:.0}%");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Actions");
    write_actions(&mut output, &snapshot.hazard_type, "");

    output
}

pub fn render_feed_line(snapshot: Option<&HazardSnapshot>, received_at: &DateTime<Utc>) -> String {
    match snapshot {
        Some(snapshot) => {
            let confidence = snapshot
                .confidence
                .map(|c| format!(" ({c:.0}% confidence)"))
                .unwrap_or_default();
            format!(
                "{} [{}] {} at {}{}",
                received_at.format("%H:%M:%S"),
                snapshot.risk_level.category(),
                snapshot.hazard_type,
                snapshot.location,
                confidence
            )
        }
        None => format!("{} [CLEAR] no hazard detected", received_at.format("%H:%M:%S")),
    }
}

pub fn render_alerts(records: &[AlertRecord], settings: &Settings) -> String {
    let active: Vec<&AlertRecord> = records.iter().filter(|r| r.is_active()).collect();

    let mut output = String::new();
    let highest = active
        .iter()
        .map(|r| SeverityCategory::of_severity(r.severity))
        .max_by_key(|category| category.rank());

    let Some(highest) = highest else {
        let _ = writeln!(output, "# Active Alerts (0)");
        let _ = writeln!(output);
        let _ = writeln!(output, "No active alerts.");
        return output;
    };

    let _ = writeln!(output, "# Active Alerts ({}, highest {highest})", active.len());
    let _ = writeln!(output);

    for record in active {
        let _ = writeln!(
            output,
            "- [{}] {} at {} ({})",
            SeverityCategory::of_severity(record.severity),
            record.alert_type,
            record.location,
            format_time(&record.timestamp)
        );
        if let Some(description) = &record.description {
            let _ = writeln!(output, "  {description}");
        }
        if let Some(score) = record.anomaly_score {
            let _ = writeln!(output, "  Anomaly score: {score:.2}");
        }
        if let Some(snapshot) = &record.snapshot {
            let _ = writeln!(output, "  Snapshot: {}", settings.snapshot_url(snapshot));
        }
        write_actions(&mut output, &record.alert_type, "    ");
    }

    output
}

fn sort_marker(state: &SortState, field: SortField) -> &'static str {
    match (state.field == field, state.order) {
        (false, _) => "",
        (true, SortOrder::Asc) => " ^",
        (true, SortOrder::Desc) => " v",
    }
}

pub fn render_history(records: &[AlertRecord], state: &SortState) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Alert History");
    let _ = writeln!(output);

    if records.is_empty() {
        let _ = writeln!(output, "No alerts recorded.");
        return output;
    }

    let _ = writeln!(
        output,
        "{:<12} {:<24} {:<10} {:<20} {:<24} {}",
        "ID",
        format!("Type{}", sort_marker(state, SortField::Type)),
        format!("Severity{}", sort_marker(state, SortField::Severity)),
        "Location",
        format!("Time{}", sort_marker(state, SortField::Timestamp)),
        "Status"
    );

    for record in records {
        let status = record
            .status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            output,
            "{:<12} {:<24} {:<10} {:<20} {:<24} {}",
            record.id,
            record.alert_type,
            record.severity,
            record.location,
            format_time(&record.timestamp),
            status
        );
    }

    output
}

pub fn render_system(status: &SystemStatus) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# System Status");
    let _ = writeln!(output);
    let _ = writeln!(output, "System:        {}", status.system);
    let _ = writeln!(output, "Monitoring:    {}", status.monitoring);
    let _ = writeln!(output, "Anomaly score: {}", status.anomaly_score);
    let _ = writeln!(
        output,
        "Risk level:    {} [{}]",
        status.risk_level,
        status.risk_level.category()
    );
    output
}

pub fn render_actions(hazard_type: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Recommended actions for \"{hazard_type}\":");
    write_actions(&mut output, hazard_type, "");
    output
}
