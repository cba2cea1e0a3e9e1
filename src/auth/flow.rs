//! Submit flows for login, registration, and account recovery.
//!
//! ARCHITECTURE
//! ============
//! Each flow is an async function over the platform traits: validate first,
//! then credential call, then profile document, in that order. Validation
//! failures return field-level errors before any network call; platform
//! failures come back as classified [`PlatformError`]s for the page to
//! render. Pages drive flows through a [`SubmitPhase`] guard so a
//! double-click cannot issue two credential calls.
//!
//! TRADE-OFFS
//! ==========
//! Registration is two platform writes (credential, then profile) with no
//! transaction across them. When the profile write fails the just-created
//! credential is deleted as a compensating action; if that delete also fails
//! the orphaned credential is accepted and the original error is still
//! surfaced.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use crate::auth::resolve::resolve_role;
use crate::auth::role::{ProviderKind, RoleTag};
use crate::auth::validate::{
    validate_email, validate_mobile, validate_name, validate_password, validate_phone,
    validate_required,
};
use crate::net::paths;
use crate::net::platform::{AuthPlatform, DocumentStore, PlatformError};
use crate::net::types::{Principal, UserProfile};

/// Submit lifecycle for a form. Re-entrant submits while `Submitting` are
/// ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Done,
}

impl SubmitPhase {
    /// Claim the in-flight slot. Returns `false` if a submission is already
    /// running.
    pub fn try_begin(&mut self) -> bool {
        if *self == Self::Submitting {
            return false;
        }
        *self = Self::Submitting;
        true
    }

    /// Release the slot: `Done` on success, back to `Idle` on failure so the
    /// user can correct and retry.
    pub fn finish(&mut self, success: bool) {
        *self = if success { Self::Done } else { Self::Idle };
    }

    #[must_use]
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }
}

/// A flow failure: either local field errors (no network call was made for
/// the failing submit) or a classified platform error.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowError<E> {
    Invalid(E),
    Platform(PlatformError),
}

impl<E> From<PlatformError> for FlowError<E> {
    fn from(error: PlatformError) -> Self {
        Self::Platform(error)
    }
}

/// Successful sign-in: who, and which dashboard they belong on.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSuccess {
    pub principal: Principal,
    pub role: RoleTag,
}

impl LoginSuccess {
    /// Where to navigate after login: back to the remembered origin when one
    /// was captured, otherwise the role's dashboard.
    #[must_use]
    pub fn destination(&self, remembered: Option<String>) -> String {
        remembered.unwrap_or_else(|| self.role.dashboard_path().to_owned())
    }
}

// -----------------------------------------------------------------------------
// Login
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    #[must_use]
    pub fn ok(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> LoginErrors {
        LoginErrors {
            email: validate_email(self.email.trim()).err(),
            password: if self.password.is_empty() { Some("Password is required.") } else { None },
        }
    }
}

/// Email/password sign-in followed by role lookup.
pub async fn login(
    auth: &dyn AuthPlatform,
    store: &dyn DocumentStore,
    form: &LoginForm,
) -> Result<LoginSuccess, FlowError<LoginErrors>> {
    let errors = form.validate();
    if !errors.ok() {
        return Err(FlowError::Invalid(errors));
    }
    let principal = auth.authenticate(form.email.trim(), &form.password).await?;
    let role = resolve_role(store, &principal.uid).await?;
    log::info!("signed in {} as {}", principal.uid, role.as_str());
    Ok(LoginSuccess { principal, role })
}

// -----------------------------------------------------------------------------
// Customer registration
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub mobile: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl CustomerErrors {
    #[must_use]
    pub fn ok(&self) -> bool {
        self == &Self::default()
    }
}

impl CustomerRegistration {
    #[must_use]
    pub fn validate(&self) -> CustomerErrors {
        CustomerErrors {
            first_name: validate_name(self.first_name.trim()).err(),
            last_name: validate_name(self.last_name.trim()).err(),
            mobile: validate_phone(self.mobile.trim()).err(),
            email: validate_email(self.email.trim()).err(),
            password: validate_password(&self.password).err(),
            confirm_password: confirm_matches(&self.password, &self.confirm_password),
        }
    }

    fn profile(&self, registered_at: u64) -> UserProfile {
        let mut profile =
            UserProfile::new(self.email.trim().to_owned(), RoleTag::Customer, registered_at);
        profile.first_name = Some(self.first_name.trim().to_owned());
        profile.last_name = Some(self.last_name.trim().to_owned());
        profile.mobile = Some(self.mobile.trim().to_owned());
        profile
    }
}

/// Create a customer credential and its profile document.
pub async fn register_customer(
    auth: &dyn AuthPlatform,
    store: &dyn DocumentStore,
    form: &CustomerRegistration,
    registered_at: u64,
) -> Result<Principal, FlowError<CustomerErrors>> {
    let errors = form.validate();
    if !errors.ok() {
        return Err(FlowError::Invalid(errors));
    }
    let principal = auth.create_account(form.email.trim(), &form.password).await?;
    write_profile_or_compensate(auth, store, &principal, &form.profile(registered_at)).await?;
    Ok(principal)
}

// -----------------------------------------------------------------------------
// Provider registration (multi-step)
// -----------------------------------------------------------------------------

/// The three steps of provider onboarding, validated independently so the
/// form can gate step transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderStep {
    Contact,
    Service,
    Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderRegistration {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub company_name: String,
    pub kind: Option<ProviderKind>,
    pub license_number: String,
    pub hotel_registration_id: String,
    pub vehicle_fleet_size: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub mobile: Option<&'static str>,
    pub company_name: Option<&'static str>,
    pub kind: Option<&'static str>,
    pub license_number: Option<&'static str>,
    pub hotel_registration_id: Option<&'static str>,
    pub vehicle_fleet_size: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl ProviderErrors {
    #[must_use]
    pub fn ok(&self) -> bool {
        self == &Self::default()
    }

    fn merge(mut self, other: Self) -> Self {
        macro_rules! take {
            ($field:ident) => {
                if self.$field.is_none() {
                    self.$field = other.$field;
                }
            };
        }
        take!(first_name);
        take!(last_name);
        take!(mobile);
        take!(company_name);
        take!(kind);
        take!(license_number);
        take!(hotel_registration_id);
        take!(vehicle_fleet_size);
        take!(email);
        take!(password);
        take!(confirm_password);
        self
    }
}

impl ProviderRegistration {
    /// Validate one step of the wizard.
    #[must_use]
    pub fn validate_step(&self, step: ProviderStep) -> ProviderErrors {
        let mut errors = ProviderErrors::default();
        match step {
            ProviderStep::Contact => {
                errors.first_name = validate_name(self.first_name.trim()).err();
                errors.last_name = validate_name(self.last_name.trim()).err();
                errors.mobile = validate_mobile(self.mobile.trim()).err();
                errors.company_name =
                    validate_required(&self.company_name, "Company name is required.").err();
            }
            ProviderStep::Service => match self.kind {
                None => errors.kind = Some("Select a service category."),
                Some(ProviderKind::Guide) => {
                    errors.license_number =
                        validate_required(&self.license_number, "License number is required.").err();
                }
                Some(ProviderKind::Hotel) => {
                    errors.hotel_registration_id = validate_required(
                        &self.hotel_registration_id,
                        "Hotel registration ID is required.",
                    )
                    .err();
                }
                Some(ProviderKind::Transport) => {
                    errors.license_number =
                        validate_required(&self.license_number, "License number is required.").err();
                    errors.vehicle_fleet_size = fleet_size_error(&self.vehicle_fleet_size);
                }
            },
            ProviderStep::Credentials => {
                errors.email = validate_email(self.email.trim()).err();
                errors.password = validate_password(&self.password).err();
                errors.confirm_password = confirm_matches(&self.password, &self.confirm_password);
            }
        }
        errors
    }

    /// Validate the whole form; used as the final pre-submit check.
    #[must_use]
    pub fn validate(&self) -> ProviderErrors {
        self.validate_step(ProviderStep::Contact)
            .merge(self.validate_step(ProviderStep::Service))
            .merge(self.validate_step(ProviderStep::Credentials))
    }

    fn profile(&self, kind: ProviderKind, registered_at: u64) -> UserProfile {
        let mut profile =
            UserProfile::new(self.email.trim().to_owned(), kind.role(), registered_at);
        profile.first_name = Some(self.first_name.trim().to_owned());
        profile.last_name = Some(self.last_name.trim().to_owned());
        profile.mobile = Some(self.mobile.trim().to_owned());
        profile.company_name = Some(self.company_name.trim().to_owned());
        profile.provider_kind = Some(kind);
        match kind {
            ProviderKind::Guide => {
                profile.license_number = Some(self.license_number.trim().to_owned());
            }
            ProviderKind::Hotel => {
                profile.hotel_registration_id =
                    Some(self.hotel_registration_id.trim().to_owned());
            }
            ProviderKind::Transport => {
                profile.license_number = Some(self.license_number.trim().to_owned());
                profile.vehicle_fleet_size = self.vehicle_fleet_size.trim().parse().ok();
            }
        }
        profile
    }
}

/// Create a provider credential and its sub-typed profile document.
pub async fn register_provider(
    auth: &dyn AuthPlatform,
    store: &dyn DocumentStore,
    form: &ProviderRegistration,
    registered_at: u64,
) -> Result<Principal, FlowError<ProviderErrors>> {
    let errors = form.validate();
    if !errors.ok() {
        return Err(FlowError::Invalid(errors));
    }
    // validate() guarantees a kind is selected.
    let Some(kind) = form.kind else {
        return Err(FlowError::Invalid(ProviderErrors {
            kind: Some("Select a service category."),
            ..ProviderErrors::default()
        }));
    };
    let principal = auth.create_account(form.email.trim(), &form.password).await?;
    write_profile_or_compensate(auth, store, &principal, &form.profile(kind, registered_at))
        .await?;
    Ok(principal)
}

// -----------------------------------------------------------------------------
// Federated sign-in
// -----------------------------------------------------------------------------

/// Federated (Google) sign-in. A pre-existing profile's stored role wins
/// over `selected_role`; a first-time federated user gets a profile built
/// from their display name and the role selected on screen.
pub async fn federated_login(
    auth: &dyn AuthPlatform,
    store: &dyn DocumentStore,
    selected_role: RoleTag,
    registered_at: u64,
) -> Result<LoginSuccess, PlatformError> {
    let federated = auth.federated_authenticate().await?;
    let principal = federated.principal.clone();
    let profile_path = paths::user_profile(&principal.uid);

    if let Some(doc) = store.read(&profile_path).await? {
        let role = doc
            .get("role")
            .and_then(|v| v.as_str())
            .and_then(RoleTag::parse)
            .unwrap_or(RoleTag::Customer);
        return Ok(LoginSuccess { principal, role });
    }

    let (first_name, last_name) = split_display_name(&federated.display_name);
    let mut profile = UserProfile::new(principal.email.clone(), selected_role, registered_at);
    profile.first_name = first_name;
    profile.last_name = last_name;
    let doc = serde_json::to_value(&profile)
        .map_err(|e| PlatformError::Other(format!("profile encode failed: {e}")))?;
    store.write(&profile_path, doc, false).await?;
    Ok(LoginSuccess { principal, role: selected_role })
}

/// Best-effort split of a federated display name: first whitespace token is
/// the first name, the remainder the last name.
#[must_use]
pub fn split_display_name(display_name: &str) -> (Option<String>, Option<String>) {
    let mut tokens = display_name.split_whitespace();
    let first = tokens.next().map(str::to_owned);
    let rest = tokens.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() { None } else { Some(rest) };
    (first, last)
}

// -----------------------------------------------------------------------------
// Password reset and sign-out
// -----------------------------------------------------------------------------

/// Send a reset email to whatever is in the email field; an empty field is a
/// local error and no platform call is made.
pub async fn forgot_password(
    auth: &dyn AuthPlatform,
    email: &str,
) -> Result<(), FlowError<&'static str>> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FlowError::Invalid("Enter your email address first."));
    }
    auth.send_password_reset(email).await?;
    Ok(())
}

/// End the current session; the session subscription propagates the state
/// change.
pub async fn sign_out(auth: &dyn AuthPlatform) -> Result<(), PlatformError> {
    auth.end_session().await
}

/// Provider "delete profile": remove the profile document, then the
/// credential. The credential delete also ends the session.
pub async fn delete_profile(
    auth: &dyn AuthPlatform,
    store: &dyn DocumentStore,
    uid: &str,
) -> Result<(), PlatformError> {
    store.delete(&paths::user_profile(uid)).await?;
    auth.delete_account(uid).await
}

// -----------------------------------------------------------------------------
// Shared pieces
// -----------------------------------------------------------------------------

fn confirm_matches(password: &str, confirm: &str) -> Option<&'static str> {
    if confirm.is_empty() {
        Some("Confirm your password.")
    } else if password != confirm {
        Some("Passwords do not match.")
    } else {
        None
    }
}

fn fleet_size_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Vehicle fleet size is required.");
    }
    match value.parse::<u32>() {
        Ok(n) if n > 0 => None,
        _ => Some("Fleet size must be a positive number."),
    }
}

/// Write the profile document for a fresh credential; on failure delete the
/// credential so no login exists without a profile, then surface the write
/// error either way.
async fn write_profile_or_compensate<E>(
    auth: &dyn AuthPlatform,
    store: &dyn DocumentStore,
    principal: &Principal,
    profile: &UserProfile,
) -> Result<(), FlowError<E>> {
    let doc = serde_json::to_value(profile)
        .map_err(|e| PlatformError::Other(format!("profile encode failed: {e}")))?;
    let Err(write_error) = store.write(&paths::user_profile(&principal.uid), doc, false).await
    else {
        return Ok(());
    };

    log::warn!("profile write failed for {}: {write_error}; deleting credential", principal.uid);
    if let Err(delete_error) = auth.delete_account(&principal.uid).await {
        log::warn!("compensating credential delete failed for {}: {delete_error}", principal.uid);
    }
    Err(FlowError::Platform(write_error))
}
