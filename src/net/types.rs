//! Shared DTOs for the platform boundary.
//!
//! DESIGN
//! ======
//! These types mirror the platform's document shapes so serde round-trips
//! stay lossless. Optional onboarding fields are plain `Option`s; absent
//! fields are omitted on the wire rather than serialized as null.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::auth::role::{ProviderKind, RoleTag};

/// The authenticated identity returned by the auth platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque platform user id.
    pub uid: String,
    /// Email the credential was created with.
    pub email: String,
}

/// Principal plus the display name supplied by a federated identity
/// provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FederatedPrincipal {
    pub principal: Principal,
    pub display_name: String,
}

/// Account lifecycle marker recorded at registration.
///
/// `Active` is written for admins; everyone else starts `Pending` for a
/// future approval pass. Nothing in the client enforces it yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Active,
}

/// The persisted profile document at `users/{uid}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub role: RoleTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_registration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_fleet_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_kind: Option<ProviderKind>,
    pub status: AccountStatus,
    /// Milliseconds since the Unix epoch, taken from the browser clock.
    pub registered_at: u64,
}

impl UserProfile {
    /// Minimal profile for a freshly registered account.
    #[must_use]
    pub fn new(email: String, role: RoleTag, registered_at: u64) -> Self {
        let status = if role == RoleTag::Admin { AccountStatus::Active } else { AccountStatus::Pending };
        Self {
            email,
            role,
            first_name: None,
            last_name: None,
            mobile: None,
            company_name: None,
            license_number: None,
            hotel_registration_id: None,
            vehicle_fleet_size: None,
            provider_kind: None,
            status,
            registered_at,
        }
    }
}

/// A service listing owned by a provider, stored under
/// `providers/{uid}/listings/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    /// Service category, e.g. `"hotel"`, `"guide"`, `"transport"`.
    pub category: String,
    pub city: String,
    /// Daily price in minor currency units.
    pub price_per_day: u64,
    pub created_at: u64,
}

/// Decode listed `(id, doc)` pairs into typed rows, dropping (and logging)
/// documents that no longer match the expected shape.
#[must_use]
pub fn parse_entries<T: serde::de::DeserializeOwned>(
    entries: Vec<(String, serde_json::Value)>,
) -> Vec<(String, T)> {
    entries
        .into_iter()
        .filter_map(|(id, doc)| match serde_json::from_value(doc) {
            Ok(parsed) => Some((id, parsed)),
            Err(error) => {
                log::warn!("skipping malformed document {id}: {error}");
                None
            }
        })
        .collect()
}

/// A customer booking, stored under `bookings/{uid}/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Booked service kind, e.g. `"flight"`, `"hotel"`, `"package"`.
    pub kind: String,
    pub title: String,
    /// Travel date as an ISO `YYYY-MM-DD` string.
    pub date: String,
    /// Booking state, e.g. `"confirmed"`, `"cancelled"`.
    pub status: String,
    pub booked_at: u64,
}
