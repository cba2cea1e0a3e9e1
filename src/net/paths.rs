//! Document path conventions.
//!
//! All store paths are built here so the layout can change in one place.
//! Profiles live at the flat `users/{uid}`; provider listings and customer
//! bookings are per-user collections.

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;

/// Profile document for a user.
#[must_use]
pub fn user_profile(uid: &str) -> String {
    format!("users/{uid}")
}

/// Collection of all user profiles.
pub const USERS: &str = "users";

/// A provider's listings collection.
#[must_use]
pub fn provider_listings(uid: &str) -> String {
    format!("providers/{uid}/listings")
}

/// A single provider listing.
#[must_use]
pub fn provider_listing(uid: &str, listing_id: &str) -> String {
    format!("providers/{uid}/listings/{listing_id}")
}

/// A customer's bookings collection.
#[must_use]
pub fn user_bookings(uid: &str) -> String {
    format!("bookings/{uid}")
}

/// A single booking.
#[must_use]
pub fn user_booking(uid: &str, booking_id: &str) -> String {
    format!("bookings/{uid}/{booking_id}")
}
