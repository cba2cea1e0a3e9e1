//! Deterministic in-memory platform implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the host-side build (where no browser network stack exists) and the
//! unit tests for every auth flow. Supports scripted federated results and
//! injectable per-operation failures so error paths are as testable as happy
//! paths.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::net::platform::{
    AuthPlatform, Document, DocumentStore, PlatformError, SessionListener, SessionSubscription,
};
use crate::net::types::{FederatedPrincipal, Principal};

struct Account {
    uid: String,
    password: String,
}

#[derive(Default)]
struct AuthInner {
    accounts: BTreeMap<String, Account>,
    current: Option<Principal>,
    listeners: Vec<(u64, SessionListener)>,
    next_listener_id: u64,
    next_uid: u64,
    scripted_federated: Option<Result<FederatedPrincipal, PlatformError>>,
    fail_create: Option<PlatformError>,
    fail_delete: Option<PlatformError>,
    reset_emails: Vec<String>,
    deleted_uids: Vec<String>,
    create_calls: u32,
}

/// In-memory [`AuthPlatform`].
#[derive(Clone, Default)]
pub struct MemoryAuth {
    inner: Rc<RefCell<AuthInner>>,
}

impl MemoryAuth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create an account without signing anyone in. Returns the uid.
    pub fn seed_account(&self, email: &str, password: &str) -> String {
        let mut inner = self.inner.borrow_mut();
        let uid = format!("uid-{}", inner.next_uid);
        inner.next_uid += 1;
        inner
            .accounts
            .insert(email.to_owned(), Account { uid: uid.clone(), password: password.to_owned() });
        uid
    }

    /// Script the outcome of the next `federated_authenticate` call.
    pub fn script_federated(&self, result: Result<FederatedPrincipal, PlatformError>) {
        self.inner.borrow_mut().scripted_federated = Some(result);
    }

    /// Make every `create_account` call fail with `error` until cleared.
    pub fn fail_create(&self, error: Option<PlatformError>) {
        self.inner.borrow_mut().fail_create = error;
    }

    /// Make every `delete_account` call fail with `error` until cleared.
    pub fn fail_delete(&self, error: Option<PlatformError>) {
        self.inner.borrow_mut().fail_delete = error;
    }

    /// Emails that password-reset messages were sent to.
    #[must_use]
    pub fn reset_emails(&self) -> Vec<String> {
        self.inner.borrow().reset_emails.clone()
    }

    /// Uids whose credentials have been deleted.
    #[must_use]
    pub fn deleted_uids(&self) -> Vec<String> {
        self.inner.borrow().deleted_uids.clone()
    }

    /// Number of `create_account` calls observed.
    #[must_use]
    pub fn create_calls(&self) -> u32 {
        self.inner.borrow().create_calls
    }

    #[must_use]
    pub fn account_exists(&self, email: &str) -> bool {
        self.inner.borrow().accounts.contains_key(email)
    }

    fn notify(&self, principal: Option<Principal>) {
        // Clone the listener list first; a listener may call back into the
        // platform.
        let listeners: Vec<SessionListener> =
            self.inner.borrow().listeners.iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(principal.clone());
        }
    }

    fn sign_in(&self, principal: Principal) {
        self.inner.borrow_mut().current = Some(principal.clone());
        self.notify(Some(principal));
    }
}

#[async_trait(?Send)]
impl AuthPlatform for MemoryAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Principal, PlatformError> {
        let principal = {
            let mut inner = self.inner.borrow_mut();
            inner.create_calls += 1;
            if let Some(error) = inner.fail_create.clone() {
                return Err(error);
            }
            if inner.accounts.contains_key(email) {
                return Err(PlatformError::EmailInUse);
            }
            let uid = format!("uid-{}", inner.next_uid);
            inner.next_uid += 1;
            inner
                .accounts
                .insert(email.to_owned(), Account { uid: uid.clone(), password: password.to_owned() });
            Principal { uid, email: email.to_owned() }
        };
        self.sign_in(principal.clone());
        Ok(principal)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Principal, PlatformError> {
        let principal = {
            let inner = self.inner.borrow();
            let account = inner.accounts.get(email).ok_or(PlatformError::InvalidCredentials)?;
            if account.password != password {
                return Err(PlatformError::InvalidCredentials);
            }
            Principal { uid: account.uid.clone(), email: email.to_owned() }
        };
        self.sign_in(principal.clone());
        Ok(principal)
    }

    async fn federated_authenticate(&self) -> Result<FederatedPrincipal, PlatformError> {
        let scripted = self.inner.borrow_mut().scripted_federated.take();
        match scripted {
            Some(Ok(federated)) => {
                self.sign_in(federated.principal.clone());
                Ok(federated)
            }
            Some(Err(error)) => Err(error),
            None => Err(PlatformError::Unavailable),
        }
    }

    async fn end_session(&self) -> Result<(), PlatformError> {
        self.inner.borrow_mut().current = None;
        self.notify(None);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), PlatformError> {
        self.inner.borrow_mut().reset_emails.push(email.to_owned());
        Ok(())
    }

    async fn delete_account(&self, uid: &str) -> Result<(), PlatformError> {
        let signed_out = {
            let mut inner = self.inner.borrow_mut();
            if let Some(error) = inner.fail_delete.clone() {
                return Err(error);
            }
            inner.accounts.retain(|_, account| account.uid != uid);
            inner.deleted_uids.push(uid.to_owned());
            if inner.current.as_ref().is_some_and(|p| p.uid == uid) {
                inner.current = None;
                true
            } else {
                false
            }
        };
        if signed_out {
            self.notify(None);
        }
        Ok(())
    }

    fn current_principal(&self) -> Option<Principal> {
        self.inner.borrow().current.clone()
    }

    fn subscribe_sessions(&self, listener: SessionListener) -> SessionSubscription {
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.current.clone())
        };
        // Initial emit with the session as of subscription.
        listener(current);

        let inner = Rc::clone(&self.inner);
        SessionSubscription::new(Box::new(move || {
            inner.borrow_mut().listeners.retain(|(listener_id, _)| *listener_id != id);
        }))
    }
}

#[derive(Default)]
struct StoreInner {
    docs: BTreeMap<String, Document>,
    fail_read: Option<PlatformError>,
    fail_write: Option<PlatformError>,
    read_delay_polls: u32,
}

/// Future that stays pending for a fixed number of polls, waking itself each
/// time. Lets tests interleave other work between a read's start and its
/// completion.
struct Staller(u32);

impl std::future::Future for Staller {
    type Output = ();

    fn poll(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<()> {
        if self.0 == 0 {
            std::task::Poll::Ready(())
        } else {
            self.0 -= 1;
            cx.waker().wake_by_ref();
            std::task::Poll::Pending
        }
    }
}

/// In-memory [`DocumentStore`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document directly, bypassing failure injection.
    pub fn seed(&self, path: &str, doc: Document) {
        self.inner.borrow_mut().docs.insert(path.to_owned(), doc);
    }

    /// Snapshot of a document, if present.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Document> {
        self.inner.borrow().docs.get(path).cloned()
    }

    /// Make every `read`/`list` call fail with `error` until cleared.
    pub fn fail_read(&self, error: Option<PlatformError>) {
        self.inner.borrow_mut().fail_read = error;
    }

    /// Make every `write` call fail with `error` until cleared.
    pub fn fail_write(&self, error: Option<PlatformError>) {
        self.inner.borrow_mut().fail_write = error;
    }

    /// Make every `read`/`list` call stay pending for `polls` polls before
    /// completing.
    pub fn delay_reads(&self, polls: u32) {
        self.inner.borrow_mut().read_delay_polls = polls;
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn read(&self, path: &str) -> Result<Option<Document>, PlatformError> {
        Staller(self.inner.borrow().read_delay_polls).await;
        let inner = self.inner.borrow();
        if let Some(error) = inner.fail_read.clone() {
            return Err(error);
        }
        Ok(inner.docs.get(path).cloned())
    }

    async fn write(&self, path: &str, doc: Document, merge: bool) -> Result<(), PlatformError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(error) = inner.fail_write.clone() {
            return Err(error);
        }
        if merge {
            if let Some(serde_json::Value::Object(existing)) = inner.docs.get_mut(path) {
                if let serde_json::Value::Object(incoming) = doc {
                    for (key, value) in incoming {
                        existing.insert(key, value);
                    }
                    return Ok(());
                }
            }
        }
        inner.docs.insert(path.to_owned(), doc);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), PlatformError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(error) = inner.fail_write.clone() {
            return Err(error);
        }
        inner.docs.remove(path);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Document)>, PlatformError> {
        Staller(self.inner.borrow().read_delay_polls).await;
        let inner = self.inner.borrow();
        if let Some(error) = inner.fail_read.clone() {
            return Err(error);
        }
        let collection = format!("{}/", prefix.trim_end_matches('/'));
        let items = inner
            .docs
            .iter()
            .filter_map(|(path, doc)| {
                let id = path.strip_prefix(&collection)?;
                // Direct children only; deeper nesting belongs to other
                // collections.
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some((id.to_owned(), doc.clone()))
            })
            .collect();
        Ok(items)
    }
}
