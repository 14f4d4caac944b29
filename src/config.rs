use anyhow::Context;
use derive_builder::Builder;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const GROUNDING_PROMPT: &str = "Find 'Ortaköy Mantı Evi' in Istanbul on Google Maps. Provide a summary description, the exact address, the aggregate rating, and summarize 3 key positive reviews. Structure the response clearly.";
pub const VENUE_LATITUDE: f64 = 41.0544;
pub const VENUE_LONGITUDE: f64 = 29.0220;

/// Everything the content provider needs. Only the credential is meant to
/// vary between deployments.
#[derive(Builder, Clone)]
#[builder(default)]
pub struct ProviderSettings {
    #[builder(setter(into, strip_option))]
    pub api_key: Option<String>,
    #[builder(setter(into))]
    pub base_url: String,
    #[builder(setter(into))]
    pub model: String,
    #[builder(setter(into))]
    pub prompt: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
            prompt: GROUNDING_PROMPT.to_string(),
            latitude: VENUE_LATITUDE,
            longitude: VENUE_LONGITUDE,
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub provider: ProviderSettings,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // set-but-empty counts as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut provider = ProviderSettingsBuilder::default();
        if let Some(key) = var("API_KEY").or_else(|| var("GEMINI_API_KEY")) {
            provider.api_key(key);
        }
        let provider = provider
            .build()
            .context("fail to build provider settings")?;

        let port = match var("BIND_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("invalid BIND_PORT {port}"))?,
            None => 8080,
        };

        Ok(Self {
            host: var("BIND_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            cors_origin: var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string()),
            provider,
        })
    }
}
