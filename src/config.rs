/// Placeholder user id used when the host bridge supplies none. Preserved
/// deliberately so the app stays usable in local/dev runs outside Telegram.
pub const FALLBACK_USER_ID: i64 = 12345;

/// Cache-busting version tag appended to every API request URL.
pub const APP_VERSION: &str = "FIXED_NAMES_V1";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, including the `/api` prefix.
    pub api_base: String,
    /// Value of the `?v=` query parameter on every JSON call.
    pub app_version: String,
    /// User id assumed when the host provides no identity.
    pub fallback_user_id: i64,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            app_version: APP_VERSION.to_string(),
            fallback_user_id: FALLBACK_USER_ID,
        }
    }
}
