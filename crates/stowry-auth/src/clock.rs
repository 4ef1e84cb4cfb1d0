//! Time sources for issuance and verification.
//!
//! Both the [`Client`](crate::client::Client) and the
//! [`Verifier`](crate::verifier::Verifier) read the clock exactly once per
//! call. Production code uses [`SystemClock`]; tests pin the time with
//! [`FixedClock`].

/// A source of the current Unix time in whole seconds.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now_unix(&self) -> i64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at a single instant.
///
/// # Examples
///
/// ```
/// use stowry_auth::clock::{Clock, FixedClock};
///
/// let clock = FixedClock(1_736_956_800);
/// assert_eq!(clock.now_unix(), 1_736_956_800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}
