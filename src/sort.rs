use std::cmp::Ordering;

use clap::ValueEnum;

use crate::models::AlertRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Timestamp,
    Severity,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Timestamp,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    /// Selecting the active field flips the order; a new field starts descending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.flipped();
        } else {
            self.field = field;
            self.order = SortOrder::Desc;
        }
    }

    pub fn apply(&self, records: &[AlertRecord]) -> Vec<AlertRecord> {
        sort_alerts(records, self.field, self.order)
    }
}

fn compare(a: &AlertRecord, b: &AlertRecord, field: SortField) -> Ordering {
    match field {
        SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortField::Severity => a.severity.rank().cmp(&b.severity.rank()),
        SortField::Type => compare_text(&a.alert_type, &b.alert_type),
    }
}

// Case-folded first so "fire" and "Fire" sit together; lower case wins the tie.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Returns a sorted copy. Equal keys keep their input order in both directions.
pub fn sort_alerts(records: &[AlertRecord], field: SortField, order: SortOrder) -> Vec<AlertRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use chrono::{Duration, TimeZone, Utc};

    fn record(id: &str, alert_type: &str, severity: Severity, minutes: i64) -> AlertRecord {
        AlertRecord {
            id: id.to_string(),
            alert_type: alert_type.to_string(),
            severity,
            location: "Module A-12".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap()
                + Duration::minutes(minutes),
            status: None,
            description: None,
            anomaly_score: None,
            snapshot: None,
        }
    }

    fn ids(records: &[AlertRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn sample() -> Vec<AlertRecord> {
        vec![
            record("a", "Smoke", Severity::Medium, 10),
            record("b", "fire", Severity::High, 30),
            record("c", "Electrical", Severity::Low, 20),
            record("d", "Gas Leak", Severity::High, 5),
        ]
    }

    #[test]
    fn timestamp_desc_puts_newest_first() {
        let sorted = sort_alerts(&sample(), SortField::Timestamp, SortOrder::Desc);
        assert_eq!(ids(&sorted), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn severity_uses_rank_not_name() {
        let sorted = sort_alerts(&sample(), SortField::Severity, SortOrder::Asc);
        assert_eq!(ids(&sorted), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn type_ignores_case() {
        let sorted = sort_alerts(&sample(), SortField::Type, SortOrder::Asc);
        assert_eq!(ids(&sorted), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn lower_case_type_sorts_before_capitalised() {
        let records = vec![
            record("upper", "Fire", Severity::High, 1),
            record("lower", "fire", Severity::High, 2),
            record("gas", "Gas", Severity::High, 3),
        ];

        let asc = sort_alerts(&records, SortField::Type, SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["lower", "upper", "gas"]);

        let desc = sort_alerts(&records, SortField::Type, SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["gas", "upper", "lower"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let records = sample();
        let _ = sort_alerts(&records, SortField::Type, SortOrder::Desc);
        assert_eq!(ids(&records), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        for field in [SortField::Timestamp, SortField::Severity, SortField::Type] {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let once = sort_alerts(&sample(), field, order);
                let twice = sort_alerts(&once, field, order);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn equal_severities_keep_relative_order() {
        let records = vec![
            record("x", "Smoke", Severity::High, 1),
            record("y", "Smoke", Severity::Low, 2),
            record("z", "Smoke", Severity::High, 3),
        ];

        let desc = sort_alerts(&records, SortField::Severity, SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["x", "z", "y"]);

        let asc = sort_alerts(&records, SortField::Severity, SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["y", "x", "z"]);
    }

    #[test]
    fn selecting_active_field_flips_order() {
        let mut state = SortState::default();
        assert_eq!(state, SortState { field: SortField::Timestamp, order: SortOrder::Desc });

        state.select(SortField::Timestamp);
        assert_eq!(state.field, SortField::Timestamp);
        assert_eq!(state.order, SortOrder::Asc);

        state.select(SortField::Timestamp);
        assert_eq!(state.order, SortOrder::Desc);
    }

    #[test]
    fn selecting_new_field_resets_to_desc() {
        let mut state = SortState::default();
        state.select(SortField::Timestamp);
        state.select(SortField::Severity);
        assert_eq!(state, SortState { field: SortField::Severity, order: SortOrder::Desc });
    }
}
