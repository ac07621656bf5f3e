//! Timestamp value type.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Nanoseconds per second.
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Nanoseconds per millisecond.
const NANOS_PER_MILLI: i64 = 1_000_000;

/// A point in time as seconds since the Unix epoch plus a nanosecond
/// fraction.
///
/// The fraction always lies in `[0, 1_000_000_000)`; constructors normalize
/// by borrowing from the seconds, so one instant has exactly one
/// representation and pre-epoch times carry a negative second count with a
/// positive fraction. The zero value (the epoch itself) is the field default
/// and stays off the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    /// Builds a timestamp from seconds and a signed nanosecond adjustment.
    ///
    /// `nanos` may lie outside `[0, 1_000_000_000)`; whole seconds are
    /// carried over. Second overflow saturates at the `i64` range.
    pub fn new(seconds: i64, nanos: i64) -> Self {
        let carry = nanos.div_euclid(NANOS_PER_SEC);
        Self {
            seconds: seconds.saturating_add(carry),
            nanos: nanos.rem_euclid(NANOS_PER_SEC) as u32,
        }
    }

    /// Builds a timestamp from a millisecond count relative to the epoch.
    ///
    /// Negative counts borrow from the seconds: −1 ms becomes −1 s plus
    /// 999 ms of nanoseconds.
    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanos: (millis.rem_euclid(1_000) * NANOS_PER_MILLI) as u32,
        }
    }

    /// Seconds since the epoch; negative before it.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// The sub-second fraction in nanoseconds, in `[0, 1_000_000_000)`.
    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Whether this is the zero value, which is omitted from the wire.
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    /// Converts to [SystemTime], or `None` when the platform clock cannot
    /// represent the instant.
    pub fn system_time(&self) -> Option<SystemTime> {
        if self.seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::new(self.seconds as u64, self.nanos))
        } else {
            // -3s +400ns is 2.6s before the epoch.
            let back = Duration::new(self.seconds.unsigned_abs(), 0);
            UNIX_EPOCH
                .checked_sub(back)?
                .checked_add(Duration::new(0, self.nanos))
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => Self {
                seconds: d.as_secs() as i64,
                nanos: d.subsec_nanos(),
            },
            Err(e) => {
                let d = e.duration();
                Self::new(-(d.as_secs() as i64), -i64::from(d.subsec_nanos()))
            }
        }
    }
}
