use crate::escape::encode_uri_component;

/// Used when `PUBLIC_BASE_URL` is unset.
pub const DEFAULT_PUBLIC_BASE: &str = "https://gardn.dev";

/// Where the widget talks to and links back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    public_base: String,
}

impl WidgetConfig {
    /// Trailing slashes on `public_base` are dropped.
    pub fn new(public_base: &str) -> Self {
        Self {
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Public base from `PUBLIC_BASE_URL`, falling back to [`DEFAULT_PUBLIC_BASE`].
    pub fn from_env() -> Self {
        let base = std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE.to_string());
        Self::new(&base)
    }

    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// `<base>/api/<username>/plant.json`
    pub fn plant_json_url(&self, username: &str) -> String {
        format!("{}/api/{}/plant.json", self.public_base, encode_uri_component(username))
    }

    /// `<base>/api/<username>/roll.json`
    pub fn roll_json_url(&self, username: &str) -> String {
        format!("{}/api/{}/roll.json", self.public_base, encode_uri_component(username))
    }

    /// `<base>/u/<username>/`, the fallback link target.
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/u/{}/", self.public_base, encode_uri_component(username))
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_BASE)
    }
}
