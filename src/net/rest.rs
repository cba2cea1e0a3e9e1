//! REST implementation of the platform traits.
//!
//! Client-side (csr): real HTTP calls via `gloo-net` against the hosted
//! identity and document endpoints. Host-side builds get stubs that report
//! the platform as unavailable, since these calls are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Identity errors arrive as a machine code in the response body
//! (`EMAIL_EXISTS`, `INVALID_PASSWORD`, ...); document errors are plain HTTP
//! statuses. Both are classified into [`PlatformError`] here so nothing
//! upstream ever sees a raw payload.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::config::PlatformConfig;
use crate::net::platform::{
    AuthPlatform, Document, DocumentStore, Platform, PlatformError, SessionListener,
    SessionSubscription,
};
use crate::net::types::{FederatedPrincipal, Principal};

#[cfg(feature = "csr")]
const SESSION_STORAGE_KEY: &str = "tripdeck_session";
#[cfg(feature = "csr")]
const FEDERATED_HANDOFF_KEY: &str = "tripdeck_federated";
#[cfg(feature = "csr")]
const FEDERATED_POLL_MS: u32 = 250;
#[cfg(feature = "csr")]
const FEDERATED_POLL_LIMIT: u32 = 240;

/// A signed-in session as cached locally.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct StoredSession {
    id_token: String,
    uid: String,
    email: String,
}

impl StoredSession {
    fn principal(&self) -> Principal {
        Principal { uid: self.uid.clone(), email: self.email.clone() }
    }
}

#[derive(Default)]
struct SessionCache {
    session: Option<StoredSession>,
    listeners: Vec<(u64, SessionListener)>,
    next_listener_id: u64,
}

/// REST [`AuthPlatform`] over the hosted identity API.
#[derive(Clone)]
pub struct RestAuth {
    config: PlatformConfig,
    cache: Rc<RefCell<SessionCache>>,
}

/// REST [`DocumentStore`] sharing the auth session for bearer tokens.
#[derive(Clone)]
pub struct RestStore {
    config: PlatformConfig,
    cache: Rc<RefCell<SessionCache>>,
}

/// Build the REST-backed platform pair with a shared session cache.
#[must_use]
pub fn rest_platform(config: &PlatformConfig) -> Platform {
    let cache = Rc::new(RefCell::new(SessionCache::default()));
    Platform {
        auth: Rc::new(RestAuth { config: config.clone(), cache: Rc::clone(&cache) }),
        store: Rc::new(RestStore { config: config.clone(), cache }),
    }
}

// -----------------------------------------------------------------------------
// Endpoint and classification helpers (pure; unit-tested on the host)
// -----------------------------------------------------------------------------

#[cfg(any(test, feature = "csr"))]
fn identity_endpoint(config: &PlatformConfig, op: &str) -> String {
    format!("{}/v1/accounts:{op}?key={}", config.api_base, config.api_key)
}

#[cfg(any(test, feature = "csr"))]
fn document_endpoint(config: &PlatformConfig, path: &str) -> String {
    format!("{}/v1/documents/{path}?key={}", config.api_base, config.api_key)
}

#[cfg(any(test, feature = "csr"))]
fn collection_endpoint(config: &PlatformConfig, prefix: &str) -> String {
    format!(
        "{}/v1/documents/{}?key={}&list=true",
        config.api_base,
        prefix.trim_end_matches('/'),
        config.api_key
    )
}

#[cfg(any(test, feature = "csr"))]
fn federated_start_url(config: &PlatformConfig) -> String {
    format!("{}/v1/oauth/google/start?key={}", config.api_base, config.api_key)
}

/// Map an identity-API error code to a classified error.
#[cfg(any(test, feature = "csr"))]
fn classify_identity_code(code: &str) -> PlatformError {
    // Codes may carry a trailing explanation, e.g.
    // "WEAK_PASSWORD : Password should be at least 6 characters".
    let code = code.split(|c: char| c == ':' || c.is_whitespace()).next().unwrap_or("");
    match code {
        "EMAIL_EXISTS" => PlatformError::EmailInUse,
        "INVALID_EMAIL" | "MISSING_EMAIL" => PlatformError::InvalidEmail,
        "WEAK_PASSWORD" | "MISSING_PASSWORD" => PlatformError::WeakPassword,
        "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "INVALID_LOGIN_CREDENTIALS" => {
            PlatformError::InvalidCredentials
        }
        "TOO_MANY_ATTEMPTS_TRY_LATER" => PlatformError::RateLimited,
        "USER_DISABLED" | "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" => PlatformError::PermissionDenied,
        other => PlatformError::Other(other.to_owned()),
    }
}

/// Map a document-API HTTP status to a classified error. 404 is handled by
/// callers (missing document is not an error).
#[cfg(any(test, feature = "csr"))]
fn classify_document_status(status: u16) -> PlatformError {
    match status {
        401 | 403 => PlatformError::PermissionDenied,
        429 => PlatformError::RateLimited,
        500..=599 => PlatformError::Unavailable,
        other => PlatformError::Other(format!("document request failed: {other}")),
    }
}

// -----------------------------------------------------------------------------
// Browser-only plumbing
// -----------------------------------------------------------------------------

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct IdentityResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
    email: String,
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct IdentityErrorBody {
    error: IdentityErrorDetail,
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct IdentityErrorDetail {
    message: String,
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct ListEntry {
    id: String,
    data: Document,
}

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
struct FederatedHandoff {
    uid: String,
    email: String,
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "csr")]
fn load_stored_session() -> Option<StoredSession> {
    let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

#[cfg(feature = "csr")]
fn persist_session(session: Option<&StoredSession>) {
    let Some(storage) = local_storage() else { return };
    match session.and_then(|s| serde_json::to_string(s).ok()) {
        Some(raw) => {
            let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
        }
        None => {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

#[cfg(feature = "csr")]
async fn identity_call(
    config: &PlatformConfig,
    op: &str,
    payload: &serde_json::Value,
) -> Result<IdentityResponse, PlatformError> {
    let resp = gloo_net::http::Request::post(&identity_endpoint(config, op))
        .json(payload)
        .map_err(|e| PlatformError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| PlatformError::Network(e.to_string()))?;
    if resp.ok() {
        return resp
            .json::<IdentityResponse>()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()));
    }
    Err(identity_error(&resp).await)
}

#[cfg(feature = "csr")]
async fn identity_error(resp: &gloo_net::http::Response) -> PlatformError {
    match resp.json::<IdentityErrorBody>().await {
        Ok(body) => classify_identity_code(&body.error.message),
        Err(_) => classify_document_status(resp.status()),
    }
}

impl RestAuth {
    #[cfg(feature = "csr")]
    fn notify(&self, principal: Option<Principal>) {
        let listeners: Vec<SessionListener> =
            self.cache.borrow().listeners.iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(principal.clone());
        }
    }

    #[cfg(feature = "csr")]
    fn install_session(&self, session: StoredSession) -> Principal {
        let principal = session.principal();
        persist_session(Some(&session));
        self.cache.borrow_mut().session = Some(session);
        self.notify(Some(principal.clone()));
        principal
    }

    #[cfg(feature = "csr")]
    fn clear_session(&self) {
        persist_session(None);
        self.cache.borrow_mut().session = None;
        self.notify(None);
    }
}

#[async_trait(?Send)]
impl AuthPlatform for RestAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Principal, PlatformError> {
        #[cfg(feature = "csr")]
        {
            let payload =
                serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
            let resp = identity_call(&self.config, "signUp", &payload).await?;
            Ok(self.install_session(StoredSession {
                id_token: resp.id_token,
                uid: resp.local_id,
                email: resp.email,
            }))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(PlatformError::Unavailable)
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Principal, PlatformError> {
        #[cfg(feature = "csr")]
        {
            let payload =
                serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
            let resp = identity_call(&self.config, "signInWithPassword", &payload).await?;
            Ok(self.install_session(StoredSession {
                id_token: resp.id_token,
                uid: resp.local_id,
                email: resp.email,
            }))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(PlatformError::Unavailable)
        }
    }

    async fn federated_authenticate(&self) -> Result<FederatedPrincipal, PlatformError> {
        #[cfg(feature = "csr")]
        {
            let window = web_sys::window().ok_or(PlatformError::Unavailable)?;
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(FEDERATED_HANDOFF_KEY);
            }
            let popup = window
                .open_with_url_and_target(&federated_start_url(&self.config), "tripdeck-oauth")
                .ok()
                .flatten();
            if popup.is_none() {
                return Err(PlatformError::Other("popup blocked".to_owned()));
            }

            // The popup writes the handoff payload to localStorage and
            // closes itself; poll until it shows up or the user gives up.
            for _ in 0..FEDERATED_POLL_LIMIT {
                gloo_timers::future::TimeoutFuture::new(FEDERATED_POLL_MS).await;
                let Some(storage) = local_storage() else { continue };
                let Ok(Some(raw)) = storage.get_item(FEDERATED_HANDOFF_KEY) else { continue };
                let _ = storage.remove_item(FEDERATED_HANDOFF_KEY);
                let handoff: FederatedHandoff = serde_json::from_str(&raw)
                    .map_err(|e| PlatformError::Other(format!("bad federated handoff: {e}")))?;
                let principal = self.install_session(StoredSession {
                    id_token: handoff.id_token,
                    uid: handoff.uid,
                    email: handoff.email,
                });
                return Ok(FederatedPrincipal { principal, display_name: handoff.display_name });
            }
            Err(PlatformError::Other("federated sign-in timed out".to_owned()))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(PlatformError::Unavailable)
        }
    }

    async fn end_session(&self) -> Result<(), PlatformError> {
        #[cfg(feature = "csr")]
        {
            self.clear_session();
        }
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), PlatformError> {
        #[cfg(feature = "csr")]
        {
            let payload = serde_json::json!({ "requestType": "PASSWORD_RESET", "email": email });
            let resp = gloo_net::http::Request::post(&identity_endpoint(&self.config, "sendOobCode"))
                .json(&payload)
                .map_err(|e| PlatformError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            if resp.ok() { Ok(()) } else { Err(identity_error(&resp).await) }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = email;
            Err(PlatformError::Unavailable)
        }
    }

    async fn delete_account(&self, uid: &str) -> Result<(), PlatformError> {
        #[cfg(feature = "csr")]
        {
            // The client may only delete the credential it holds a token
            // for.
            let session = self.cache.borrow().session.clone();
            let Some(session) = session.filter(|s| s.uid == uid) else {
                return Err(PlatformError::PermissionDenied);
            };
            let payload = serde_json::json!({ "idToken": session.id_token });
            let resp = gloo_net::http::Request::post(&identity_endpoint(&self.config, "delete"))
                .json(&payload)
                .map_err(|e| PlatformError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(identity_error(&resp).await);
            }
            self.clear_session();
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = uid;
            Err(PlatformError::Unavailable)
        }
    }

    fn current_principal(&self) -> Option<Principal> {
        self.cache.borrow().session.as_ref().map(StoredSession::principal)
    }

    fn subscribe_sessions(&self, listener: SessionListener) -> SessionSubscription {
        #[cfg(feature = "csr")]
        {
            // Restore the cached browser session before the initial emit so
            // a reloaded tab stays signed in.
            if self.cache.borrow().session.is_none() {
                if let Some(stored) = load_stored_session() {
                    self.cache.borrow_mut().session = Some(stored);
                }
            }
        }
        let (id, current) = {
            let mut cache = self.cache.borrow_mut();
            let id = cache.next_listener_id;
            cache.next_listener_id += 1;
            cache.listeners.push((id, listener.clone()));
            (id, cache.session.as_ref().map(StoredSession::principal))
        };
        listener(current);

        let cache = Rc::clone(&self.cache);
        SessionSubscription::new(Box::new(move || {
            cache.borrow_mut().listeners.retain(|(listener_id, _)| *listener_id != id);
        }))
    }
}

#[cfg(feature = "csr")]
impl RestStore {
    fn bearer(&self) -> Option<String> {
        self.cache.borrow().session.as_ref().map(|s| format!("Bearer {}", s.id_token))
    }

    fn request(&self, method: &str, url: &str) -> gloo_net::http::RequestBuilder {
        let builder = match method {
            "PATCH" => gloo_net::http::Request::patch(url),
            "DELETE" => gloo_net::http::Request::delete(url),
            _ => gloo_net::http::Request::get(url),
        };
        match self.bearer() {
            Some(token) => builder.header("Authorization", &token),
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl DocumentStore for RestStore {
    async fn read(&self, path: &str) -> Result<Option<Document>, PlatformError> {
        #[cfg(feature = "csr")]
        {
            let url = document_endpoint(&self.config, path);
            let resp = self
                .request("GET", &url)
                .send()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            if resp.status() == 404 {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(classify_document_status(resp.status()));
            }
            let doc =
                resp.json::<Document>().await.map_err(|e| PlatformError::Network(e.to_string()))?;
            Ok(Some(doc))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
            Err(PlatformError::Unavailable)
        }
    }

    async fn write(&self, path: &str, doc: Document, merge: bool) -> Result<(), PlatformError> {
        #[cfg(feature = "csr")]
        {
            let mut url = document_endpoint(&self.config, path);
            if merge {
                url.push_str("&merge=true");
            }
            let resp = self
                .request("PATCH", &url)
                .json(&doc)
                .map_err(|e| PlatformError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            if resp.ok() { Ok(()) } else { Err(classify_document_status(resp.status())) }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (path, doc, merge);
            Err(PlatformError::Unavailable)
        }
    }

    async fn delete(&self, path: &str) -> Result<(), PlatformError> {
        #[cfg(feature = "csr")]
        {
            let url = document_endpoint(&self.config, path);
            let resp = self
                .request("DELETE", &url)
                .send()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            if resp.ok() || resp.status() == 404 {
                Ok(())
            } else {
                Err(classify_document_status(resp.status()))
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
            Err(PlatformError::Unavailable)
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Document)>, PlatformError> {
        #[cfg(feature = "csr")]
        {
            let url = collection_endpoint(&self.config, prefix);
            let resp = self
                .request("GET", &url)
                .send()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            if resp.status() == 404 {
                return Ok(Vec::new());
            }
            if !resp.ok() {
                return Err(classify_document_status(resp.status()));
            }
            let entries = resp
                .json::<Vec<ListEntry>>()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))?;
            Ok(entries.into_iter().map(|entry| (entry.id, entry.data)).collect())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = prefix;
            Err(PlatformError::Unavailable)
        }
    }
}
