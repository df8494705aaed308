//! Request fingerprints used as cache keys.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Composite key built from the mandatory request fields.
///
/// Compared field by field, so distinct itineraries never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    origin: String,
    destination: String,
    origin_date_time: DateTime<Utc>,
}

impl Fingerprint {
    pub fn new(origin: &str, destination: &str, origin_date_time: DateTime<Utc>) -> Self {
        Self { origin: origin.to_string(), destination: destination.to_string(), origin_date_time }
    }

    /// Stable SHA-256 hex digest for logs and debug output.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.origin.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.destination.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.origin_date_time.to_rfc3339_opts(SecondsFormat::AutoSi, true).as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} @ {}", self.origin, self.destination, self.origin_date_time.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_digest_stability() {
        let a = Fingerprint::new("Moscow", "Sochi", departure());
        let b = Fingerprint::new("Moscow", "Sochi", departure());
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_field_boundaries() {
        let a = Fingerprint::new("AB", "C", departure());
        let b = Fingerprint::new("A", "BC", departure());
        assert_ne!(a, b);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_format() {
        let digest = Fingerprint::new("Moscow", "Sochi", departure()).digest();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_display() {
        let fp = Fingerprint::new("Moscow", "Sochi", departure());
        assert_eq!(fp.to_string(), "Moscow -> Sochi @ 2026-11-02T09:30:00+00:00");
    }
}
