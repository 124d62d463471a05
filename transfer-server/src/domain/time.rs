//! Service-day time handling.
//!
//! Timetables express times relative to the start of a service day. A trip
//! that leaves at 23:50 and arrives after midnight has arrival times such as
//! "24:20", so hours are not bounded by 23.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Seconds since the start of the service day.
///
/// Signed, so that reverse searches may step slightly before the start of
/// the day without special handling.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::TransitTime;
///
/// let time = TransitTime::parse("10:15").unwrap();
/// assert_eq!(time.as_secs(), 36_900);
/// assert_eq!(time.to_string(), "10:15");
///
/// // Service days run past midnight
/// assert_eq!(TransitTime::parse("25:10").unwrap().to_string(), "25:10");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransitTime(i32);

impl TransitTime {
    /// Start of the service day.
    pub const MIDNIGHT: TransitTime = TransitTime(0);

    /// Create a time from seconds since the start of the service day.
    pub const fn from_secs(secs: i32) -> Self {
        Self(secs)
    }

    /// Create a time from hours, minutes and seconds.
    pub const fn from_hms(hours: i32, minutes: i32, seconds: i32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    /// Returns the number of seconds since the start of the service day.
    pub const fn as_secs(self) -> i32 {
        self.0
    }

    /// Parse a time in "HH:MM" or "HH:MM:SS" format.
    ///
    /// The hour may have one or more digits and may exceed 23. A leading `-`
    /// is accepted so that every displayed time parses back.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_server::domain::TransitTime;
    ///
    /// assert!(TransitTime::parse("9:05").is_ok());
    /// assert!(TransitTime::parse("10:15:30").is_ok());
    ///
    /// assert!(TransitTime::parse("1015").is_err());
    /// assert!(TransitTime::parse("10:60").is_err());
    /// assert!(TransitTime::parse("10:5").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut parts = body.split(':');
        let hours = parts
            .next()
            .ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS"))?;
        let minutes = parts
            .next()
            .ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS"))?;
        let seconds = parts.next();
        if parts.next().is_some() {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS"));
        }

        if hours.is_empty() || hours.len() > 3 || !hours.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: i32 = hours
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;

        let minutes =
            parse_two_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = match seconds {
            Some(s) => {
                let secs = parse_two_digits(s)
                    .ok_or_else(|| TimeError::new("invalid second digits"))?;
                if secs > 59 {
                    return Err(TimeError::new("second must be 0-59"));
                }
                secs
            }
            None => 0,
        };

        let secs = hours * 3600 + minutes * 60 + seconds;
        Ok(Self(if negative { -secs } else { secs }))
    }

    /// Returns this time shifted by a signed number of seconds.
    ///
    /// Saturates at the bounds of the representation.
    pub const fn plus_secs(self, secs: i32) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Returns this time shifted back by a signed number of seconds.
    pub const fn minus_secs(self, secs: i32) -> Self {
        Self(self.0.saturating_sub(secs))
    }
}

fn parse_two_digits(s: &str) -> Option<i32> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(i32::from(bytes[0] - b'0') * 10 + i32::from(bytes[1] - b'0'))
}

fn clamp_secs(d: Duration) -> i32 {
    let secs = d.num_seconds().clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    secs as i32
}

impl Add<Duration> for TransitTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.plus_secs(clamp_secs(rhs))
    }
}

impl Sub<Duration> for TransitTime {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.minus_secs(clamp_secs(rhs))
    }
}

impl TryFrom<String> for TransitTime {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TransitTime> for String {
    fn from(time: TransitTime) -> Self {
        time.to_string()
    }
}

impl fmt::Debug for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransitTime({self})")
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (hours, minutes, seconds) = (abs / 3600, (abs % 3600) / 60, abs % 60);
        if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: display then parse returns the original time
        #[test]
        fn display_parse_roundtrip(secs in -86_400i32..(3 * 86_400)) {
            let time = TransitTime::from_secs(secs);
            prop_assert_eq!(TransitTime::parse(&time.to_string()).unwrap(), time);
        }

        /// Ordering follows seconds
        #[test]
        fn ordering_matches_seconds(a in 0i32..200_000, b in 0i32..200_000) {
            let (ta, tb) = (TransitTime::from_secs(a), TransitTime::from_secs(b));
            prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        }

        /// Adding then subtracting a duration is the identity
        #[test]
        fn add_sub_inverse(secs in 0i32..200_000, delta in 0i64..20_000) {
            let time = TransitTime::from_secs(secs);
            let d = Duration::seconds(delta);
            prop_assert_eq!((time + d) - d, time);
        }
    }
}
