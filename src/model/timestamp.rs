use std::fmt;

use serde::{Deserialize, Serialize};

/// Absolute wall-clock time in whole seconds since the Unix epoch.
///
/// Serializes as a bare integer, which is what the save format stores in
/// `const_t_end`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnixTime(i64);

impl UnixTime {
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> i64 {
        self.0
    }

    pub fn plus_secs(self, secs: i64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds from `self` until `later`. Negative if `later` is in the past.
    pub fn secs_until(self, later: UnixTime) -> i64 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// How long one construction step takes.
///
/// A build time of zero seconds is the catalog's "instant" marker (walls):
/// the construction completes synchronously and no timer is armed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum BuildTime {
    Instant,
    Seconds(u32),
}

impl BuildTime {
    pub fn from_secs(secs: u32) -> Self {
        if secs == 0 {
            BuildTime::Instant
        } else {
            BuildTime::Seconds(secs)
        }
    }

    pub fn is_instant(self) -> bool {
        matches!(self, BuildTime::Instant)
    }

    pub fn as_secs(self) -> u32 {
        match self {
            BuildTime::Instant => 0,
            BuildTime::Seconds(s) => s,
        }
    }
}

impl From<u32> for BuildTime {
    fn from(secs: u32) -> Self {
        Self::from_secs(secs)
    }
}

impl From<BuildTime> for u32 {
    fn from(t: BuildTime) -> Self {
        t.as_secs()
    }
}
