use chrono::{DateTime, Utc};

use crate::{
    error::DecodeError,
    token::Severity,
    wire::{self, ObjectReader, ObjectWriter, Record, WireMapping},
};

/// A severe weather warning issued by a governmental authority.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    /// Names of the regions covered by the alert.
    pub regions: Vec<String>,
    pub severity: Severity,
    /// When the alert was issued.
    pub time: DateTime<Utc>,
    pub expires: Option<DateTime<Utc>>,
    pub description: String,
    /// Link to the full alert text.
    pub uri: String,
}

impl Alert {
    /// Whether the alert has expired at `now`. Alerts without an expiry
    /// never do.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

impl Record for Alert {
    const MAPPING: &'static WireMapping = &wire::ALERT;

    fn read(r: &ObjectReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            title: r.required("title")?,
            regions: r.required("regions")?,
            severity: r.required_token("severity")?,
            time: r.required_time("time")?,
            expires: r.time("expires")?,
            description: r.required("description")?,
            uri: r.required("uri")?,
        })
    }

    fn write(&self, w: &mut ObjectWriter) {
        w.string("title", Some(self.title.as_str()));
        w.strings("regions", &self.regions);
        w.token("severity", Some(&self.severity));
        w.time("time", Some(&self.time));
        w.time("expires", self.expires.as_ref());
        w.string("description", Some(self.description.as_str()));
        w.string("uri", Some(self.uri.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_value, to_value};
    use serde_json::json;

    fn flood_watch() -> serde_json::Value {
        json!({
            "title": "Flood Watch for Mason, WA",
            "regions": ["Mason"],
            "severity": "watch",
            "time": 1509993360,
            "expires": 1510036680,
            "description": "...FLOOD WATCH REMAINS IN EFFECT THROUGH LATE TUESDAY NIGHT...",
            "uri": "https://alerts.weather.gov/cap/wwacapget.php?x=WA1255E4DB8494.FloodWatch",
        })
    }

    #[test]
    fn alert_roundtrip() {
        let payload = flood_watch();
        let alert: Alert = from_value(&payload).unwrap();

        assert_eq!(alert.severity, Severity::Watch);
        assert_eq!(alert.regions, vec!["Mason".to_string()]);
        assert_eq!(to_value(&alert), payload);
    }

    #[test]
    fn expiry_check() {
        let alert: Alert = from_value(&flood_watch()).unwrap();
        let before = DateTime::from_timestamp(1_510_000_000, 0).unwrap();
        let after = DateTime::from_timestamp(1_510_036_680, 0).unwrap();

        assert!(!alert.is_expired_at(before));
        assert!(alert.is_expired_at(after));
    }

    #[test]
    fn missing_title_fails() {
        let mut payload = flood_watch();
        payload.as_object_mut().unwrap().remove("title");

        let err = from_value::<Alert>(&payload).unwrap_err();
        assert_eq!(err.path(), Some("title"));
    }
}
