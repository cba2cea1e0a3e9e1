//! Trait seam over the hosted auth + document platform.
//!
//! ARCHITECTURE
//! ============
//! The application never talks to the platform SDK directly; everything goes
//! through these two traits so flows can be exercised against the in-memory
//! implementation in unit tests and the REST implementation in the browser.
//! Futures are `?Send` because the browser target is single-threaded.
//!
//! ERROR HANDLING
//! ==============
//! Every platform failure maps onto one [`PlatformError`] variant; UI code
//! renders [`PlatformError::user_message`] and nothing else, so raw platform
//! payloads never reach the page.

use std::rc::Rc;

use async_trait::async_trait;

use crate::net::types::{FederatedPrincipal, Principal};

/// A document store value. Typed DTOs serialize through this at the call
/// site.
pub type Document = serde_json::Value;

/// Classified platform failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("email already in use")]
    EmailInUse,
    #[error("invalid email")]
    InvalidEmail,
    #[error("weak password")]
    WeakPassword,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("rate limited")]
    RateLimited,
    #[error("permission denied")]
    PermissionDenied,
    #[error("service unavailable")]
    Unavailable,
    #[error("network error: {0}")]
    Network(String),
    #[error("platform error: {0}")]
    Other(String),
}

impl PlatformError {
    /// One fixed sentence per known failure; everything unrecognized gets
    /// the generic fallback.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmailInUse => "An account with this email already exists.",
            Self::InvalidEmail => "Enter a valid email address.",
            Self::WeakPassword => "Password must be at least 6 characters.",
            Self::InvalidCredentials => "Invalid email or password.",
            Self::RateLimited => "Too many attempts. Try again later.",
            Self::PermissionDenied => "You do not have permission to do that.",
            Self::Unavailable => "Service is temporarily unavailable. Try again.",
            Self::Network(_) | Self::Other(_) => "Something went wrong. Please try again.",
        }
    }
}

/// Callback invoked on every session change with the new principal, or
/// `None` after sign-out.
pub type SessionListener = Rc<dyn Fn(Option<Principal>)>;

/// RAII handle for a session subscription; dropping it unsubscribes.
pub struct SessionSubscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl SessionSubscription {
    #[must_use]
    pub fn new(unsubscribe: Box<dyn FnOnce()>) -> Self {
        Self { unsubscribe: Some(unsubscribe) }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Credential and session operations of the hosted auth service.
#[async_trait(?Send)]
pub trait AuthPlatform {
    /// Create an email/password credential and sign the new user in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Principal, PlatformError>;

    /// Sign in with an existing email/password credential.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Principal, PlatformError>;

    /// Run the federated (Google) sign-in flow.
    async fn federated_authenticate(&self) -> Result<FederatedPrincipal, PlatformError>;

    /// Sign the current user out.
    async fn end_session(&self) -> Result<(), PlatformError>;

    /// Send a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), PlatformError>;

    /// Delete a credential. Used as the compensating action when profile
    /// creation fails after sign-up, and by the provider delete-profile
    /// action.
    async fn delete_account(&self, uid: &str) -> Result<(), PlatformError>;

    /// The currently signed-in principal, if any.
    fn current_principal(&self) -> Option<Principal>;

    /// Register a session-change listener. The listener fires once with the
    /// current session and again on every later change until the returned
    /// subscription is dropped.
    fn subscribe_sessions(&self, listener: SessionListener) -> SessionSubscription;
}

/// Document operations of the hosted store.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Read a document. `Ok(None)` means the document does not exist;
    /// transport and permission failures are errors.
    async fn read(&self, path: &str) -> Result<Option<Document>, PlatformError>;

    /// Write a document, replacing it or merging fields into it.
    async fn write(&self, path: &str, doc: Document, merge: bool) -> Result<(), PlatformError>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete(&self, path: &str) -> Result<(), PlatformError>;

    /// List the direct children of a collection path as `(id, doc)` pairs.
    async fn list(&self, prefix: &str) -> Result<Vec<(String, Document)>, PlatformError>;
}

/// The injected pair of platform handles, provided once at the app root.
#[derive(Clone)]
pub struct Platform {
    pub auth: Rc<dyn AuthPlatform>,
    pub store: Rc<dyn DocumentStore>,
}
