use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::error::LookupError;

/// RFC3339 timestamp guaranteed to be UTC.
///
/// The data provider keys historical rows by full timestamp; the price series
/// collapses those to pure calendar dates via [`UtcDateTime::date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| {
            LookupError::InvalidInput {
                reason: format!("timestamp must be RFC3339 UTC: '{input}'"),
            }
        })?;

        Self::from_offset_datetime(parsed)
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, LookupError> {
        if value.offset() != UtcOffset::UTC {
            return Err(LookupError::InvalidInput {
                reason: format!("timestamp must be UTC, got offset {}", value.offset()),
            });
        }

        Ok(Self(value))
    }

    /// Calendar date of the timestamp, dropping the time-of-day component.
    pub fn date(self) -> Date {
        self.0.date()
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("UtcDateTime must be RFC3339 formattable")
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_utc_timestamp_and_drops_time_of_day() {
        let parsed = UtcDateTime::parse("2022-01-03T16:30:00Z").expect("must parse");
        assert_eq!(parsed.date(), date!(2022 - 01 - 03));
    }

    #[test]
    fn rejects_non_utc_timestamp() {
        let err = UtcDateTime::parse("2022-01-03T01:00:00+01:00").expect_err("must fail");
        assert!(matches!(err, LookupError::InvalidInput { .. }));
    }
}
