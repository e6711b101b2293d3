use std::env;

const DEFAULT_COMPLETION_URL: &str = "https://api.asi1.ai";
const DEFAULT_COMPLETION_MODEL: &str = "asi1-mini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Block-explorer API key (optional — public instances work without one)
    pub explorer_api_key: Option<String>,

    // Completion API credentials (optional — absence forces the local
    // narration fallback)
    pub completion_api_key: Option<String>,
    pub completion_api_url: String,
    pub completion_model: String,

    // Upper bound on merged transactions per analysis
    pub tx_fetch_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            explorer_api_key: env::var("BLOCKSCOUT_API_KEY").ok(),

            completion_api_key: env::var("ASI_API_KEY").ok(),
            completion_api_url: env::var("ASI_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.into()),
            completion_model: env::var("ASI_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.into()),

            tx_fetch_limit: env::var("TX_FETCH_LIMIT")
                .unwrap_or_else(|_| "250".into())
                .parse()
                .unwrap_or(250),
        })
    }

    /// Returns true if the completion API can be called at all.
    pub fn has_completion_auth(&self) -> bool {
        self.completion_api_key.is_some()
    }
}
