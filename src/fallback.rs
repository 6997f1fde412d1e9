use chrono::{DateTime, Duration, Utc};

use crate::models::{AlertRecord, AlertStatus, HazardSnapshot, RawSeverityText, Severity, SystemStatus};

fn at(unix_secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(unix_secs)
}

pub fn detection() -> Option<HazardSnapshot> {
    Some(HazardSnapshot {
        hazard_type: "Smoke Detected".to_string(),
        risk_level: RawSeverityText::new("High"),
        location: "Module A-12".to_string(),
        timestamp: at(1_736_937_000),
        confidence: Some(92.0),
    })
}

pub fn alerts() -> Vec<AlertRecord> {
    let alerts = [
        (
            "1",
            "Smoke Detected",
            Severity::High,
            "Module A-12",
            1_736_937_000,
            AlertStatus::Active,
            "Dense smoke plume picked up by camera 3",
        ),
        (
            "2",
            "Electrical Spark",
            Severity::Medium,
            "Server Room B",
            1_736_936_100,
            AlertStatus::Active,
            "Intermittent arcing near rack power distribution",
        ),
        (
            "3",
            "Overheating",
            Severity::Low,
            "Kitchen Module",
            1_736_934_300,
            AlertStatus::Resolved,
            "Cooktop surface above normal operating temperature",
        ),
        (
            "4",
            "Fire Detected",
            Severity::High,
            "Storage Bay C",
            1_736_932_800,
            AlertStatus::Resolved,
            "Open flame confirmed, suppression system triggered",
        ),
    ];

    alerts
        .into_iter()
        .map(|(id, alert_type, severity, location, timestamp, status, description)| AlertRecord {
            id: id.to_string(),
            alert_type: alert_type.to_string(),
            severity,
            location: location.to_string(),
            timestamp: at(timestamp),
            status: Some(status),
            description: Some(description.to_string()),
            anomaly_score: None,
            snapshot: None,
        })
        .collect()
}

pub fn system_status() -> SystemStatus {
    SystemStatus {
        system: "SentinelX".to_string(),
        monitoring: "active".to_string(),
        anomaly_score: 18,
        risk_level: RawSeverityText::new("LOW"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_are_fixed_and_ordered() {
        let first = alerts();
        let ids: Vec<&str> = first.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(first, alerts());
    }

    #[test]
    fn detection_populates_every_dashboard_field() {
        let snapshot = detection().unwrap();
        assert_eq!(snapshot.risk_level.as_str(), "High");
        assert_eq!(snapshot.location, "Module A-12");
        assert_eq!(snapshot.confidence, Some(92.0));
        assert_eq!(snapshot.timestamp.to_rfc3339(), "2025-01-15T10:30:00+00:00");
    }
}
