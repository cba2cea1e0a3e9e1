//! Role resolution from the profile document.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use crate::auth::role::RoleTag;
use crate::net::paths;
use crate::net::platform::{DocumentStore, PlatformError};

/// Look up the stored role for a user.
///
/// A missing profile document is not an error; accounts that predate profile
/// writes default to `Customer`. Unrecognized role strings also default to
/// `Customer` rather than locking the user out of every area. Transport and
/// permission failures propagate so the session layer can fail closed.
pub async fn resolve_role(store: &dyn DocumentStore, uid: &str) -> Result<RoleTag, PlatformError> {
    let doc = store.read(&paths::user_profile(uid)).await?;
    let Some(doc) = doc else {
        return Ok(RoleTag::Customer);
    };
    let role = doc.get("role").and_then(|v| v.as_str()).and_then(RoleTag::parse);
    match role {
        Some(role) => Ok(role),
        None => {
            log::warn!("profile {uid} has no usable role; defaulting to customer");
            Ok(RoleTag::Customer)
        }
    }
}
