//! Role model for the three dashboard areas.
//!
//! DESIGN
//! ======
//! Roles are a closed enum rather than free-form strings so routing code can
//! match exhaustively. Call sites that only care about the coarse bucket
//! (customer vs. provider vs. admin) go through [`RoleTag::coarsen`] instead
//! of listing provider variants individually.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use serde::{Deserialize, Serialize};

/// A user's role as persisted in the profile document.
///
/// Provider sub-variants exist because provider onboarding asks for a
/// concrete service category; the plain `ServiceProvider` tag remains valid
/// for accounts created before sub-typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    Customer,
    ServiceProvider,
    GuideProvider,
    HotelProvider,
    TransportProvider,
    Admin,
}

/// Coarse routing bucket for a [`RoleTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleClass {
    Customer,
    Provider,
    Admin,
}

/// Service category chosen during provider registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Guide,
    Hotel,
    Transport,
}

impl RoleTag {
    /// Wire representation used in profile documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::ServiceProvider => "service_provider",
            Self::GuideProvider => "guide_provider",
            Self::HotelProvider => "hotel_provider",
            Self::TransportProvider => "transport_provider",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role string. Returns `None` for anything outside the
    /// closed set; callers decide the fallback.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Self::Customer),
            "service_provider" => Some(Self::ServiceProvider),
            "guide_provider" => Some(Self::GuideProvider),
            "hotel_provider" => Some(Self::HotelProvider),
            "transport_provider" => Some(Self::TransportProvider),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Collapse provider sub-variants into the coarse routing bucket.
    #[must_use]
    pub fn coarsen(self) -> RoleClass {
        match self {
            Self::Customer => RoleClass::Customer,
            Self::ServiceProvider
            | Self::GuideProvider
            | Self::HotelProvider
            | Self::TransportProvider => RoleClass::Provider,
            Self::Admin => RoleClass::Admin,
        }
    }

    /// Default landing route for this role.
    #[must_use]
    pub fn dashboard_path(self) -> &'static str {
        match self.coarsen() {
            RoleClass::Customer => "/customer-dashboard",
            RoleClass::Provider => "/service-dashboard",
            RoleClass::Admin => "/admin-dashboard",
        }
    }
}

impl ProviderKind {
    /// The sub-typed role written to the profile document.
    #[must_use]
    pub fn role(self) -> RoleTag {
        match self {
            Self::Guide => RoleTag::GuideProvider,
            Self::Hotel => RoleTag::HotelProvider,
            Self::Transport => RoleTag::TransportProvider,
        }
    }

    /// Human label for the category picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Guide => "Tour Guide",
            Self::Hotel => "Hotel",
            Self::Transport => "Transport",
        }
    }

    /// All selectable categories, in display order.
    pub const ALL: [Self; 3] = [Self::Guide, Self::Hotel, Self::Transport];
}
