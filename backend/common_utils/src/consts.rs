use base64::engine::general_purpose;

/// Standard padded base64 engine used for signatures
pub const BASE64_ENGINE: general_purpose::GeneralPurpose = general_purpose::STANDARD;

/// Header carrying the request id generated (or propagated) by the service
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header selecting which configured merchant store handles the request
pub const X_MERCHANT_ID: &str = "x-merchant-id";

/// Prefix for environment variables overriding configuration values
pub const ENV_PREFIX: &str = "IPG";

/// Environment variable selecting the runtime environment
pub const RUN_ENV: &str = "RUN_ENV";

/// A string constant representing a redacted or masked value.
pub const REDACTED: &str = "Redacted";

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Environment selected through `RUN_ENV`, falling back to the build profile.
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(if cfg!(debug_assertions) {
                Self::Development
            } else {
                Self::Production
            })
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
