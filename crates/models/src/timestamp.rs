//! UTC-normalized timestamps for input shapes.
//!
//! A value without offset is taken as UTC. A zero offset (`Z`, `+00:00`,
//! `+0000`, `+00`) is accepted and any other offset is rejected.
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ModelError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Length of `YYYY-MM-DD`; offset signs are only looked for after it.
const DATE_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct UtcDateTime(DateTime<Utc>);

impl UtcDateTime {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        parse_utc(raw).map(Self)
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for UtcDateTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<UtcDateTime> for DateTime<Utc> {
    fn from(value: UtcDateTime) -> Self {
        value.0
    }
}

impl TryFrom<String> for UtcDateTime {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for UtcDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, ModelError> {
    let s = raw.trim();
    let invalid = || ModelError::validation(format!("invalid datetime: {s}"));
    let (local, offset) = split_offset(s);
    if let Some(offset) = offset {
        if offset_seconds(offset).ok_or_else(invalid)? != 0 {
            return Err(ModelError::validation(format!("non-UTC timezone in {s}")));
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(local, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}

/// Splits a trailing `Z` or `±HH[[:]MM]` designator off the local part.
fn split_offset(s: &str) -> (&str, Option<&str>) {
    if let Some(local) = s.strip_suffix(['Z', 'z']) {
        return (local, Some("+00"));
    }
    let sign = s.get(DATE_LEN..).and_then(|time| time.rfind(['+', '-']));
    match sign {
        Some(i) => {
            let (local, offset) = s.split_at(DATE_LEN + i);
            (local, Some(offset))
        }
        None => (s, None),
    }
}

/// Seconds east of UTC for `±HH`, `±HHMM` or `±HH:MM`.
fn offset_seconds(offset: &str) -> Option<i32> {
    let (sign, digits) = match offset.split_at(1) {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let digits: String = match digits.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 => format!("{h}{m}"),
        Some(_) => return None,
        None => digits.to_owned(),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expected() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn naive_is_assumed_utc() {
        assert_eq!(parse_utc("2024-03-01T12:30:00").unwrap(), expected());
        assert_eq!(parse_utc("2024-03-01 12:30:00").unwrap(), expected());
        assert_eq!(parse_utc("2024-03-01T12:30").unwrap(), expected());
    }

    #[test]
    fn utc_offsets_are_accepted() {
        for raw in [
            "2024-03-01T12:30:00Z",
            "2024-03-01T12:30:00+00:00",
            "2024-03-01T12:30:00+0000",
            "2024-03-01T12:30:00+00",
            "2024-03-01T12:30:00-00:00",
            "2024-03-01T12:30Z",
            "2024-03-01 12:30:00Z",
            "2024-03-01 12:30+00:00",
        ] {
            assert_eq!(parse_utc(raw).unwrap(), expected(), "{raw}");
        }
    }

    #[test]
    fn every_naive_form_has_an_offset_form() {
        for naive in ["2024-03-01T12:30:00", "2024-03-01 12:30:00", "2024-03-01T12:30", "2024-03-01 12:30"] {
            assert_eq!(parse_utc(naive).unwrap(), expected(), "{naive}");
            assert_eq!(parse_utc(&format!("{naive}Z")).unwrap(), expected(), "{naive}Z");
        }
    }

    #[test]
    fn malformed_offsets_are_invalid_not_non_utc() {
        for raw in ["2024-03-01T12:30:00+0", "2024-03-01T12:30:00+00:0", "2024-03-01T12:30:00+ab"] {
            let err = parse_utc(raw).unwrap_err();
            assert!(err.to_string().contains("invalid datetime"), "{raw}: {err}");
        }
    }

    #[test]
    fn fractional_seconds_survive() {
        let dt = parse_utc("2024-03-01T12:30:00.250Z").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn non_utc_offset_is_rejected() {
        for raw in ["2024-03-01T12:30:00+02:00", "2024-03-01T12:30:00-0500", "2024-03-01T12:30+01"] {
            let err = parse_utc(raw).unwrap_err();
            assert!(err.to_string().contains("non-UTC"), "{raw}: {err}");
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_utc("yesterday").is_err());
        assert!(parse_utc("").is_err());
    }

    #[test]
    fn deserializes_from_json_string() {
        let v: UtcDateTime = serde_json::from_str("\"2024-03-01T12:30:00\"").unwrap();
        assert_eq!(v.into_inner(), expected());
        assert!(serde_json::from_str::<UtcDateTime>("\"2024-03-01T12:30:00-05:00\"").is_err());
    }
}
