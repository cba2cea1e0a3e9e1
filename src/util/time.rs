//! Wall-clock access for registration timestamps.
//!
//! The browser clock is the only clock this client has. Host-side builds
//! (tests) pin zero so flows stay deterministic.

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            js_sys::Date::now() as u64
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        0
    }
}
