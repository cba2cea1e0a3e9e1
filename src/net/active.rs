//! Process-wide platform handle for browser builds.
//!
//! DESIGN
//! ======
//! The platform pair holds `Rc` internals, so it cannot live in signals or
//! context. It is installed once at startup into a thread-local (the browser
//! is single-threaded) and fetched inside event handlers and spawned tasks,
//! which therefore capture nothing but signals. Tests bypass this entirely by
//! passing the in-memory implementations straight into the flows.

#[cfg(feature = "csr")]
use std::cell::RefCell;

use crate::net::platform::Platform;

#[cfg(feature = "csr")]
thread_local! {
    static ACTIVE: RefCell<Option<Platform>> = const { RefCell::new(None) };
}

/// Install the platform pair. Called once from the app entry before any page
/// renders.
#[cfg(feature = "csr")]
pub fn install(platform: Platform) {
    ACTIVE.with(|slot| *slot.borrow_mut() = Some(platform));
}

/// The installed platform pair.
///
/// # Panics
///
/// Panics if called before [`install`]; the entry point installs the
/// platform before mounting, so this is a bootstrap invariant, not a
/// runtime condition.
#[cfg(feature = "csr")]
#[must_use]
pub fn platform() -> Platform {
    ACTIVE.with(|slot| slot.borrow().clone().expect("platform installed before mount"))
}

#[cfg(not(feature = "csr"))]
#[must_use]
pub fn platform() -> Platform {
    use std::rc::Rc;

    use crate::net::memory::{MemoryAuth, MemoryStore};

    Platform { auth: Rc::new(MemoryAuth::new()), store: Rc::new(MemoryStore::new()) }
}
