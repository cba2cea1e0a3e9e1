//! Build-time platform configuration.
//!
//! The browser bundle has no environment or config files at runtime, so the
//! platform endpoint and API key are baked in at compile time and default to
//! the hosted project.

/// Connection settings for the hosted platform.
#[derive(Clone, Debug)]
pub struct PlatformConfig {
    /// Base URL of the platform REST API, no trailing slash.
    pub api_base: String,
    /// Project API key appended to every request.
    pub api_key: String,
}

impl PlatformConfig {
    /// Settings from `TRIPDECK_API_BASE` / `TRIPDECK_API_KEY` at build time,
    /// falling back to the hosted defaults.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            api_base: option_env!("TRIPDECK_API_BASE")
                .unwrap_or("https://platform.tripdeck.app")
                .trim_end_matches('/')
                .to_owned(),
            api_key: option_env!("TRIPDECK_API_KEY").unwrap_or("tripdeck-web").to_owned(),
        }
    }
}
