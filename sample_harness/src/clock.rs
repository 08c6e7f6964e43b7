//! Injectable time source for generated-file headers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Auto-generated marker written as the first line of every example file.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use sample_harness::clock::{FixedClock, header_line};
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
/// assert_eq!(
///     header_line(&clock),
///     "[//]: # (** auto-generated 2024-05-01T12:00:00.000Z **)"
/// );
/// ```
#[must_use]
pub fn header_line(clock: &dyn Clock) -> String {
    let stamp = clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("[//]: # (** auto-generated {stamp} **)")
}
