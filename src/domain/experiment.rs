use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Experiment definitions keyed by id, as delivered by the loader.
pub type Experiments = BTreeMap<String, Experiment>;

/// An experiment record from the Test Pilot web app.
///
/// Only the fields the effects layer reads are typed; everything else is kept
/// in `extra` so the record can be handed back to collaborators untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub addon_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Retirement date as the web app sent it: a date string or epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uninstalled: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Experiment {
    pub fn new(addon_id: impl Into<String>) -> Self {
        Self {
            addon_id: addon_id.into(),
            title: None,
            uninstalled: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_uninstalled(mut self, uninstalled: impl Into<Value>) -> Self {
        self.uninstalled = Some(uninstalled.into());
        self
    }

    /// Parsed `uninstalled` timestamp. Empty, zero, or unparseable values
    /// yield `None`.
    pub fn uninstalled_at(&self) -> Option<DateTime<Utc>> {
        match self.uninstalled.as_ref()? {
            Value::String(raw) => parse_timestamp(raw),
            Value::Number(millis) => millis
                .as_i64()
                .or_else(|| millis.as_f64().map(|ms| ms as i64))
                .filter(|ms| *ms != 0)
                .and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }

    /// True once the experiment's retirement date has passed.
    pub fn is_retired(&self, now: DateTime<Utc>) -> bool {
        self.uninstalled_at().is_some_and(|at| at < now)
    }
}

/// Accepts RFC 3339 timestamps, zone-less date-times and bare dates.
/// Zone-less values are read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn bare_date_in_the_past_is_retired() {
        let experiment = Experiment::new("a").with_uninstalled("2000-01-01");
        assert_eq!(
            experiment.uninstalled_at(),
            Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(experiment.is_retired(now()));
    }

    #[test]
    fn future_timestamp_is_not_retired() {
        let experiment = Experiment::new("a").with_uninstalled("2017-06-02T00:00:00Z");
        assert!(!experiment.is_retired(now()));
    }

    #[test]
    fn offset_timestamps_are_normalised() {
        let experiment = Experiment::new("a").with_uninstalled("2017-06-01T13:30:00+02:00");
        assert!(experiment.is_retired(now()));
    }

    #[test]
    fn zone_less_datetime_is_read_as_utc() {
        let experiment = Experiment::new("a").with_uninstalled("2017-06-01T11:59:59.500");
        assert!(experiment.is_retired(now()));
    }

    #[test]
    fn missing_empty_or_garbage_dates_never_retire() {
        assert!(!Experiment::new("a").is_retired(now()));
        assert!(!Experiment::new("a").with_uninstalled("").is_retired(now()));
        assert!(!Experiment::new("a").with_uninstalled("someday").is_retired(now()));
        assert!(!Experiment::new("a").with_uninstalled(true).is_retired(now()));
        assert!(!Experiment::new("a").with_uninstalled(0).is_retired(now()));
    }

    #[test]
    fn epoch_millis_are_accepted() {
        let past = Experiment::new("a").with_uninstalled(946_684_800_000_i64);
        assert_eq!(
            past.uninstalled_at(),
            Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(past.is_retired(now()));

        let future = Experiment::new("a").with_uninstalled(32_503_680_000_000.0);
        assert!(!future.is_retired(now()));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let json = serde_json::json!({
            "addon_id": "@min-vid",
            "title": "Min Vid",
            "created": "2016-05-01T00:00:00Z",
            "contributors": [{ "display_name": "dave" }]
        });
        let experiment: Experiment = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(experiment.addon_id, "@min-vid");
        assert_eq!(experiment.uninstalled, None);
        assert!(experiment.extra.contains_key("contributors"));
        assert_eq!(serde_json::to_value(&experiment).unwrap(), json);
    }
}
