use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Storage key under which the consent record is persisted.
pub const CONSENT_STORAGE_KEY: &str = "cf-consent-state";

/// Current consent-policy revision. Bump when the cookie policy changes;
/// records captured under an older revision are treated as absent.
pub const CONSENT_VERSION: &str = "1.0";

/// How long a stored decision stays valid.
pub const RETENTION: Duration = Duration::days(365);

/// The user's consent decision.
///
/// `timestamp_ms == 0` means the record was never explicitly set (the
/// default profile). `necessary` is true in every record the store hands
/// out; it is not externally settable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub necessary: bool,
    pub performance: bool,
    pub functional: bool,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(rename = "version")]
    pub schema_version: String,
}

impl Default for ConsentRecord {
    fn default() -> Self {
        Self {
            necessary: true,
            performance: false,
            functional: false,
            timestamp_ms: 0,
            schema_version: CONSENT_VERSION.to_string(),
        }
    }
}

impl ConsentRecord {
    /// Whether this record represents an explicit user decision.
    pub fn is_decided(&self) -> bool {
        self.timestamp_ms > 0
    }

    /// Whether a stored record is still usable: captured under the current
    /// policy revision and younger than the retention window.
    pub fn is_current(&self, now_ms: i64) -> bool {
        self.schema_version == CONSENT_VERSION
            && self.timestamp_ms > 0
            && now_ms - self.timestamp_ms < RETENTION.whole_milliseconds() as i64
    }
}

/// Partial update to a consent record. Only the optional categories are
/// representable; `necessary` is stamped true on every commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentUpdate {
    pub performance: Option<bool>,
    pub functional: Option<bool>,
}

impl ConsentUpdate {
    /// Grant every optional category ("Accept All").
    pub fn accept_all() -> Self {
        Self {
            performance: Some(true),
            functional: Some(true),
        }
    }

    /// Decline every optional category ("Necessary Only").
    pub fn necessary_only() -> Self {
        Self {
            performance: Some(false),
            functional: Some(false),
        }
    }
}

/// Current wall-clock time as epoch milliseconds.
pub(crate) fn now_ms() -> i64 {
    let now = OffsetDateTime::now_utc();
    (now.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = ConsentRecord::default();
        assert!(record.necessary);
        assert!(!record.performance);
        assert!(!record.functional);
        assert_eq!(record.timestamp_ms, 0);
        assert!(!record.is_decided());
    }

    #[test]
    fn test_wire_form_field_names() {
        let record = ConsentRecord {
            performance: true,
            timestamp_ms: 1700000000000,
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"timestamp\":1700000000000"));
        assert!(json.contains("\"version\":\"1.0\""));
        assert!(!json.contains("timestamp_ms"));

        let back: ConsentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_is_current_within_retention() {
        let now = 1_700_000_000_000;
        let record = ConsentRecord {
            timestamp_ms: now - 1000,
            ..Default::default()
        };
        assert!(record.is_current(now));
    }

    #[test]
    fn test_is_current_rejects_expired() {
        let now = 1_700_000_000_000;
        let record = ConsentRecord {
            timestamp_ms: now - RETENTION.whole_milliseconds() as i64 - 1,
            ..Default::default()
        };
        assert!(!record.is_current(now));
    }

    #[test]
    fn test_is_current_rejects_version_mismatch() {
        let now = 1_700_000_000_000;
        let record = ConsentRecord {
            timestamp_ms: now - 1000,
            schema_version: "0.9".to_string(),
            ..Default::default()
        };
        assert!(!record.is_current(now));
    }

    #[test]
    fn test_is_current_rejects_unset_timestamp() {
        assert!(!ConsentRecord::default().is_current(1_700_000_000_000));
    }

    #[test]
    fn test_update_presets() {
        assert_eq!(
            ConsentUpdate::accept_all(),
            ConsentUpdate {
                performance: Some(true),
                functional: Some(true)
            }
        );
        assert_eq!(
            ConsentUpdate::necessary_only(),
            ConsentUpdate {
                performance: Some(false),
                functional: Some(false)
            }
        );
    }
}
