use std::env;

/// Process-wide configuration, loaded once at startup and read-only for the
/// lifetime of a request. Optional credentials map to explicit
/// enabled/disabled states rather than scattered null checks.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sources: SourcesConfig,
    pub synthesis: SynthesisConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Base URLs and credentials for the fact sources.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    /// Encyclopedia base URL (MediaWiki API + REST summary + page HTML).
    pub wikipedia_base: String,
    /// Market-data base URL (fundamentals timeseries).
    pub finance_base: String,
    pub news: NewsConfig,
}

/// News adapter state. Without a credential the adapter is disabled and
/// never touches the network.
#[derive(Debug, Clone)]
pub enum NewsConfig {
    Disabled,
    Enabled { api_base: String, api_key: String },
}

/// Model-provider state for the report synthesizer. `Disabled` skips the
/// synthesis path entirely; assembly falls back to rule-based merging.
#[derive(Debug, Clone)]
pub enum SynthesisConfig {
    Disabled,
    OpenAi {
        api_key: String,
        api_base: String,
        model: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let news = match env::var("NEWSAPI_KEY") {
            Ok(api_key) if !api_key.is_empty() => NewsConfig::Enabled {
                api_base: env::var("NEWSAPI_BASE_URL")
                    .unwrap_or_else(|_| "https://newsapi.org".to_string()),
                api_key,
            },
            _ => NewsConfig::Disabled,
        };

        let synthesis = match env::var("OPENAI_API_KEY") {
            Ok(api_key) if !api_key.is_empty() => SynthesisConfig::OpenAi {
                api_key,
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            _ => SynthesisConfig::Disabled,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            sources: SourcesConfig {
                wikipedia_base: env::var("WIKIPEDIA_BASE_URL")
                    .unwrap_or_else(|_| "https://en.wikipedia.org".to_string()),
                finance_base: env::var("FINANCE_BASE_URL")
                    .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
                news,
            },
            synthesis,
        })
    }
}

impl SynthesisConfig {
    /// True when a model provider is configured.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SynthesisConfig::Disabled)
    }
}
