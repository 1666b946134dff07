//! Validated time window for a metadata query.

use super::error::MetadataError;

/// Default look-back when no start time is supplied.
pub const DEFAULT_WINDOW_SECONDS: i64 = 3600;

/// Longest window the upstream accepts (72 hours).
pub const MAX_WINDOW_SECONDS: i64 = 259_200;

/// A bounded query interval in epoch seconds.
///
/// Always satisfies `start < stop` and `stop - start <= MAX_WINDOW_SECONDS`;
/// the only way to obtain one is through [`TimeRange::resolve`] or
/// [`TimeRange::new`], both of which enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: i64,
    stop: i64,
}

impl TimeRange {
    /// Builds a range from already-parsed bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Validation`] when the bounds are inverted or the
    /// span exceeds 72 hours.
    pub fn new(start: i64, stop: i64) -> Result<Self, MetadataError> {
        if start >= stop {
            return Err(MetadataError::validation(
                "start time must be before stop time",
            ));
        }

        // Overflow means the span is far beyond any limit.
        match stop.checked_sub(start) {
            Some(span) if span <= MAX_WINDOW_SECONDS => {}
            _ => {
                return Err(MetadataError::validation(
                    "time interval exceeds 72-hour limit",
                ));
            }
        }

        Ok(Self { start, stop })
    }

    /// Resolves raw query inputs against the supplied clock reading.
    ///
    /// # Defaults
    ///
    /// - missing `raw_start`: `now - 3600` (saturating)
    /// - missing `raw_stop`: `now`
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Validation`] if a value is not a base-10 integer,
    /// or if the resulting range violates the bounds checked by [`TimeRange::new`].
    pub fn resolve(
        raw_start: Option<&str>,
        raw_stop: Option<&str>,
        now: i64,
    ) -> Result<Self, MetadataError> {
        let start =
            parse_bound(raw_start)?.unwrap_or(now.saturating_sub(DEFAULT_WINDOW_SECONDS));
        let stop = parse_bound(raw_stop)?.unwrap_or(now);

        Self::new(start, stop)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn span_seconds(&self) -> i64 {
        self.stop.saturating_sub(self.start)
    }

    /// Span in hours, rounded to two decimal places.
    pub fn duration_hours(&self) -> f64 {
        (self.span_seconds() as f64 / 3600.0 * 100.0).round() / 100.0
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<i64>, MetadataError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| MetadataError::validation("invalid time parameter")),
    }
}
