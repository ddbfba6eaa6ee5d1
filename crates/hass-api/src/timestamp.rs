// Timestamp codec for Home Assistant's wire format.
//
// State and event payloads carry timestamps as
// `yyyy-MM-ddTHH:mm:ss.ffffff+hh:mm` -- a fixed fractional-second width and
// a mandatory UTC offset. This is close to RFC 3339 but stricter: the
// fraction must be present and have exactly the configured digit count.
//
// Current servers emit six fractional digits; some historical payloads used
// three. The serde adapter used by the models is fixed to six, and
// [`parse`] takes the digit count explicitly for callers that need the
// three-digit variant.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Timestamp text does not match the fixed wire shape.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The fractional-second part is absent or has the wrong width.
    #[error("timestamp fraction must be exactly {expected} digits: {text:?}")]
    Fraction { expected: usize, text: String },

    /// Everything else chrono rejects (non-numeric fields, missing
    /// offset, out-of-range values).
    #[error("invalid timestamp {text:?}: {source}")]
    Chrono {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// How many fractional-second digits the timestamp text carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsecondDigits {
    /// Millisecond precision (`.fff`), seen in historical payloads.
    Three,
    /// Microsecond precision (`.ffffff`), what current servers emit.
    Six,
}

impl SubsecondDigits {
    fn format_str(self) -> &'static str {
        match self {
            Self::Three => "%Y-%m-%dT%H:%M:%S%.3f%:z",
            Self::Six => "%Y-%m-%dT%H:%M:%S%.6f%:z",
        }
    }

    fn count(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Six => 6,
        }
    }
}

/// Parse timestamp text with the given fractional width, preserving the
/// UTC offset. Fails if the text deviates from the shape at all: wrong
/// digit count, missing fraction or offset, non-numeric fields.
pub fn parse(text: &str, digits: SubsecondDigits) -> Result<DateTime<FixedOffset>, ParseError> {
    // chrono's fixed-width `%.Nf` treats the whole fraction as optional
    // when parsing, so its presence and width are checked up front.
    let fraction_width = text
        .find('.')
        .map(|dot| text[dot + 1..].chars().take_while(char::is_ascii_digit).count());
    if fraction_width != Some(digits.count()) {
        return Err(ParseError::Fraction {
            expected: digits.count(),
            text: text.to_owned(),
        });
    }

    DateTime::parse_from_str(text, digits.format_str()).map_err(|source| ParseError::Chrono {
        text: text.to_owned(),
        source,
    })
}

/// Render a timestamp in the six-digit wire shape.
pub fn format(dt: &DateTime<FixedOffset>) -> String {
    dt.format(SubsecondDigits::Six.format_str()).to_string()
}

/// Serde adapter for required timestamp fields (six-digit shape).
///
/// Usage: `#[serde(with = "crate::timestamp::iso_fixed")]`
pub(crate) mod iso_fixed {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SubsecondDigits;

    pub fn serialize<S>(dt: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse(&text, SubsecondDigits::Six).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional timestamp fields (six-digit shape).
///
/// Pair with `#[serde(default)]` so absent fields decode as `None`.
pub(crate) mod iso_fixed_opt {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SubsecondDigits;

    pub fn serialize<S>(
        dt: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_str(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => super::parse(&text, SubsecondDigits::Six)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{SubsecondDigits, format, parse};

    #[test]
    fn parses_six_digit_fraction_preserving_offset() {
        let dt = parse("2025-03-25T04:50:56.076866+00:00", SubsecondDigits::Six).unwrap();
        let expected = Utc
            .with_ymd_and_hms(2025, 3, 25, 4, 50, 56)
            .unwrap()
            .checked_add_signed(chrono::TimeDelta::microseconds(76_866))
            .unwrap();
        assert_eq!(dt.with_timezone(&Utc), expected);
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn keeps_nonzero_offset() {
        let dt = parse("2025-06-01T12:00:00.000000+02:00", SubsecondDigits::Six).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
        let utc = dt.with_timezone(&Utc);
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn parses_three_digit_variant() {
        let dt = parse("2025-03-25T04:50:56.076+00:00", SubsecondDigits::Three).unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 76);
    }

    #[test]
    fn rejects_wrong_fraction_width() {
        assert!(parse("2025-03-25T04:50:56.076+00:00", SubsecondDigits::Six).is_err());
        assert!(parse("2025-03-25T04:50:56.076866+00:00", SubsecondDigits::Three).is_err());
        assert!(parse("2025-03-25T04:50:56.0768660+00:00", SubsecondDigits::Six).is_err());
        assert!(parse("2025-03-25T04:50:56.+00:00", SubsecondDigits::Six).is_err());
    }

    #[test]
    fn rejects_missing_fraction_or_offset() {
        // No fraction at all must fail even though the rest is well-formed.
        let whole_seconds = parse("2025-03-25T04:50:56+00:00", SubsecondDigits::Six);
        assert!(matches!(
            whole_seconds,
            Err(super::ParseError::Fraction { expected: 6, .. })
        ));
        assert!(parse("2025-03-25T04:50:56+00:00", SubsecondDigits::Three).is_err());
        assert!(parse("2025-03-25T04:50:56.076866", SubsecondDigits::Six).is_err());
        assert!(parse("2025-03-25T04:50:56.076866Z", SubsecondDigits::Six).is_err());
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(parse("2025-03-xxT04:50:56.076866+00:00", SubsecondDigits::Six).is_err());
        assert!(parse("not a timestamp", SubsecondDigits::Six).is_err());
    }

    #[test]
    fn format_round_trips() {
        let text = "2025-03-25T04:50:56.076866+00:00";
        let dt = parse(text, SubsecondDigits::Six).unwrap();
        assert_eq!(format(&dt), text);
    }
}
