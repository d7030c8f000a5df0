//! Time zone the reader sees rendered timestamps in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest offset accepted, exclusive (a full day).
const MAX_OFFSET_SECONDS: i32 = 24 * 3600;

/// Error for zone strings that are neither a keyword nor a `±HH:MM` offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid zone {0:?}: expected \"local\", \"utc\" or an offset like +05:30")]
pub struct ZoneParseError(String);

/// Where rendered timestamps are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The zone of the machine doing the rendering.
    #[default]
    Local,
    Utc,
    /// A fixed offset east of UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// Converts a UTC instant into this zone.
    pub fn convert(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Local => instant.with_timezone(&Local).fixed_offset(),
            Self::Utc => instant.fixed_offset(),
            Self::Fixed(offset) => instant.with_timezone(&offset),
        }
    }

    /// Human name for the zone, when one is known without configuration.
    ///
    /// Fixed offsets have no canonical name.
    pub fn system_label(self) -> Option<String> {
        match self {
            Self::Local => match iana_time_zone::get_timezone() {
                Ok(name) => Some(name),
                Err(e) => {
                    tracing::debug!(error = %e, "could not determine local zone name");
                    None
                }
            },
            Self::Utc => Some("UTC".to_string()),
            Self::Fixed(_) => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for Zone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::Utc);
        }
        parse_offset(trimmed)
            .map(Self::Fixed)
            .ok_or_else(|| ZoneParseError(s.to_string()))
    }
}

/// Parses `+HH:MM`, `+HHMM` or `+HH` (and the `-` forms).
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    if seconds >= MAX_OFFSET_SECONDS {
        return None;
    }
    FixedOffset::east_opt(sign * seconds)
}

impl Serialize for Zone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
