//! Rendering machine-readable timestamps for a human reader.
//!
//! Locale and zone come from an explicit [`RenderContext`] rather than the
//! process environment, so rendering is reproducible under test. Every
//! successful rendering ends with the numeric UTC offset of the display
//! zone, whatever the date/time format says.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::pattern::TimestampPattern;
use crate::zone::Zone;

/// Shown in place of a timestamp that matched the pattern but is not a
/// valid instant. Must never match the pattern itself.
pub const INVALID_TIMESTAMP: &str = "invalid timestamp";

/// Default date/time format: the locale's date followed by its time.
pub const DEFAULT_FORMAT: &str = "%x %X";

/// Instants a format is checked against before it is accepted: the 15th of
/// every month and the first week of January, each in the morning and the
/// evening. Together they cover every month name, weekday name and AM/PM
/// marker, plus one- and two-digit days.
fn sample_instants() -> impl Iterator<Item = DateTime<Utc>> {
    let months = (1..=12).filter_map(|month| NaiveDate::from_ymd_opt(2024, month, 15));
    let weekdays = (1..=7).filter_map(|day| NaiveDate::from_ymd_opt(2024, 1, day));
    months
        .chain(weekdays)
        .flat_map(|date| [8, 20].into_iter().filter_map(move |hour| date.and_hms_opt(hour, 3, 14)))
        .map(|naive| naive.and_utc())
}

/// Errors raised while building a renderer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("invalid date/time format: {0:?}")]
    InvalidFormat(String),

    /// The format renders text the timestamp pattern would match again.
    #[error("format {format:?} renders {sample:?}, which looks like a machine-readable timestamp")]
    SelfMatching { format: String, sample: String },
}

/// Produces the display string for one matched timestamp.
pub trait Render {
    fn render(&self, original: &str) -> String;
}

impl<F> Render for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, original: &str) -> String {
        self(original)
    }
}

/// Locale, zone and format a renderer works in.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub locale: Locale,
    pub zone: Zone,
    /// Name shown after the offset. Falls back to [`Zone::system_label`].
    pub zone_label: Option<String>,
    pub format: String,
}

impl RenderContext {
    /// Builds a context from a locale name such as `en_US` or `POSIX`.
    pub fn new(locale: &str, zone: Zone, format: impl Into<String>) -> Result<Self, RenderError> {
        let locale =
            Locale::try_from(locale).map_err(|_| RenderError::UnknownLocale(locale.to_string()))?;
        Ok(Self {
            locale,
            zone,
            zone_label: None,
            format: format.into(),
        })
    }

    #[must_use]
    pub fn with_zone_label(mut self, label: impl Into<String>) -> Self {
        self.zone_label = Some(label.into());
        self
    }
}

/// Parses a matched timestamp as an absolute instant.
///
/// Accepts RFC 3339 and the seconds-less `YYYY-MM-DDTHH:MMZ` form.
pub fn parse_instant(original: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(original) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(original, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Renders timestamps in a fixed locale and zone.
#[derive(Debug, Clone)]
pub struct LocalizedRenderer {
    context: RenderContext,
    label: Option<String>,
}

impl LocalizedRenderer {
    /// Validates the context and resolves the zone label once.
    pub fn new(context: RenderContext) -> Result<Self, RenderError> {
        let has_error = StrftimeItems::new_with_locale(&context.format, context.locale)
            .any(|item| matches!(item, Item::Error));
        if has_error {
            return Err(RenderError::InvalidFormat(context.format));
        }

        let label = context
            .zone_label
            .clone()
            .or_else(|| context.zone.system_label());
        let renderer = Self { context, label };

        let pattern = TimestampPattern::new();
        for instant in sample_instants() {
            let sample = renderer
                .format_instant(instant)
                .ok_or_else(|| RenderError::InvalidFormat(renderer.context.format.clone()))?;
            if pattern.is_match(&sample) {
                return Err(RenderError::SelfMatching {
                    format: renderer.context.format,
                    sample,
                });
            }
        }

        Ok(renderer)
    }

    /// Formats an instant as `{date/time} {offset}` plus ` ({label})`.
    pub fn format_instant(&self, instant: DateTime<Utc>) -> Option<String> {
        let local = self.context.zone.convert(instant);
        let mut out = String::new();
        write!(
            out,
            "{} {}",
            local.format_localized(&self.context.format, self.context.locale),
            local.format("%:z")
        )
        .ok()?;
        if let Some(label) = &self.label {
            write!(out, " ({label})").ok()?;
        }
        Some(out)
    }
}

impl Render for LocalizedRenderer {
    fn render(&self, original: &str) -> String {
        let rendered = parse_instant(original).and_then(|instant| self.format_instant(instant));
        rendered.unwrap_or_else(|| {
            tracing::warn!(original, "timestamp is not a valid instant, rendering fallback");
            INVALID_TIMESTAMP.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(locale: &str, zone: &str, format: &str) -> LocalizedRenderer {
        let context = RenderContext::new(locale, zone.parse().unwrap(), format).unwrap();
        LocalizedRenderer::new(context).unwrap()
    }

    #[test]
    fn renders_in_fixed_zone_with_offset() {
        let r = renderer("POSIX", "+01:00", "%Y-%m-%d %H:%M:%S");
        assert_eq!(r.render("2024-02-08T20:03:14Z"), "2024-02-08 21:03:14 +01:00");
    }

    #[test]
    fn crosses_date_boundary() {
        let r = renderer("POSIX", "+01:00", "%Y-%m-%d %H:%M");
        assert_eq!(r.render("2024-02-09T23:30:00Z"), "2024-02-10 00:30 +01:00");

        let r = renderer("POSIX", "-08:00", "%Y-%m-%d %H:%M");
        assert_eq!(r.render("2024-02-09T04:16:56Z"), "2024-02-08 20:16 -08:00");
    }

    #[test]
    fn utc_zone_names_itself() {
        let r = renderer("POSIX", "utc", "%H:%M");
        assert_eq!(r.render("2024-02-08T20:03:14Z"), "20:03 +00:00 (UTC)");
    }

    #[test]
    fn configured_label_is_appended() {
        let context = RenderContext::new("POSIX", "+01:00".parse().unwrap(), "%H:%M")
            .unwrap()
            .with_zone_label("Europe/Berlin");
        let r = LocalizedRenderer::new(context).unwrap();
        assert_eq!(r.render("2024-02-08T20:03:14Z"), "21:03 +01:00 (Europe/Berlin)");
    }

    #[test]
    fn accepts_fractional_and_minute_precision() {
        let r = renderer("POSIX", "+00:00", "%H:%M:%S");
        assert_eq!(r.render("2024-02-08T20:03:14.987Z"), "20:03:14 +00:00");
        assert_eq!(r.render("2024-02-08T20:03Z"), "20:03:00 +00:00");
    }

    #[test]
    fn localizes_names() {
        let r = renderer("fr_FR", "+01:00", "%A %d %B %Y");
        let rendered = r.render("2024-02-08T20:03:14Z");
        assert!(rendered.contains("février"), "got {rendered:?}");
        assert!(rendered.ends_with("+01:00"));
    }

    #[test]
    fn default_format_always_carries_zone() {
        let r = renderer("en_US", "+01:00", DEFAULT_FORMAT);
        for ts in [
            "2024-02-08T20:03:14Z",
            "1999-12-31T23:59:59Z",
            "2030-06-15T00:00:00.5Z",
        ] {
            let rendered = r.render(ts);
            assert!(rendered.ends_with(" +01:00"), "{ts} rendered as {rendered:?}");
            assert!(!TimestampPattern::new().is_match(&rendered));
        }
    }

    #[test]
    fn unparseable_match_renders_fallback() {
        let r = renderer("POSIX", "utc", "%H:%M");
        for bad in ["2024-02-08Z", "2024-13-45T00:00:00Z", "2024-02-08T99:99:99Z", "2024-02-08T-Z"] {
            assert!(TimestampPattern::new().is_exact_match(bad));
            assert_eq!(r.render(bad), INVALID_TIMESTAMP);
        }
        assert!(!TimestampPattern::new().is_match(INVALID_TIMESTAMP));
    }

    #[test]
    fn rejects_unknown_locale() {
        let err = RenderContext::new("xx_XX", Zone::Utc, DEFAULT_FORMAT).unwrap_err();
        assert_eq!(err, RenderError::UnknownLocale("xx_XX".to_string()));
    }

    #[test]
    fn rejects_invalid_format() {
        let context = RenderContext::new("POSIX", Zone::Utc, "%Y %Q").unwrap();
        assert!(matches!(
            LocalizedRenderer::new(context),
            Err(RenderError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_format_that_would_match_again() {
        let context = RenderContext::new("POSIX", Zone::Utc, "%Y-%m-%dT%H:%M:%SZ").unwrap();
        let err = LocalizedRenderer::new(context).unwrap_err();
        assert!(matches!(err, RenderError::SelfMatching { .. }), "got {err:?}");
    }

    #[test]
    fn rejects_format_that_matches_only_on_some_days() {
        // `%e` pads single-digit days with a space, which breaks the pattern.
        let context = RenderContext::new("POSIX", Zone::Utc, "%Y-%m-%eZ").unwrap();
        let err = LocalizedRenderer::new(context).unwrap_err();
        assert!(
            matches!(&err, RenderError::SelfMatching { sample, .. } if sample.starts_with("2024-01-15Z")),
            "got {err:?}"
        );
    }

    #[test]
    fn samples_cover_months_weekdays_and_half_days() {
        use chrono::{Datelike, Timelike};
        use std::collections::BTreeSet;

        let samples: Vec<_> = sample_instants().collect();
        let months: BTreeSet<_> = samples.iter().map(|s| s.month()).collect();
        let weekdays: BTreeSet<_> = samples.iter().map(|s| s.weekday().num_days_from_monday()).collect();
        let half_days: BTreeSet<_> = samples.iter().map(|s| s.hour12().0).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(weekdays.len(), 7);
        assert_eq!(half_days.len(), 2);
    }

    #[test]
    fn closures_render() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(upper.render("2024-02-08t00:00:00z"), "2024-02-08T00:00:00Z");
    }
}
