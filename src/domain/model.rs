use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One predicted visible pass of the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    /// Unix epoch seconds.
    pub risetime: i64,
    /// Visible duration in seconds.
    pub duration: u64,
}

/// Upstream order, soonest first.
pub type PassList = Vec<PassRecord>;

impl PassRecord {
    pub fn rise_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.risetime, 0)
    }

    pub fn describe<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self.rise_time() {
            Some(rise) => format!(
                "Next pass at {} for {} seconds!",
                rise.with_timezone(tz).format("%a %b %d %Y %H:%M:%S %Z"),
                self.duration
            ),
            None => format!(
                "Next pass at epoch {} for {} seconds!",
                self.risetime, self.duration
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_in_utc() {
        let pass = PassRecord {
            risetime: 1_622_577_695,
            duration: 465,
        };

        assert_eq!(
            pass.describe(&Utc),
            "Next pass at Tue Jun 01 2021 20:01:35 UTC for 465 seconds!"
        );
    }

    #[test]
    fn test_pass_record_deserializes_from_upstream_shape() {
        let pass: PassRecord =
            serde_json::from_str(r#"{"risetime": 134564234, "duration": 600}"#).unwrap();

        assert_eq!(
            pass,
            PassRecord {
                risetime: 134_564_234,
                duration: 600
            }
        );
        assert!(pass.rise_time().is_some());
    }
}
