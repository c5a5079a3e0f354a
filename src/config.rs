use crate::services::ResponseVersion;
use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::PathBuf;

const PLACEHOLDER_API_KEY: &str = "SUA_CHAVE_SECRETA_DA_PUSHPAY_AQUI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api-sandbox.pushinpay.com.br",
            Environment::Production => "https://api.pushinpay.com.br",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}

/// Provider bearer token. Never printed through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // PushinPay
    pub api_key: Option<ApiKey>,
    pub provider_base_url: String,
    pub response_version: ResponseVersion,
    pub ca_bundle: Option<PathBuf>,

    // Charge defaults
    pub webhook_url: String,
    pub charge_description: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Self::parse_environment(lookup("ENVIRONMENT"))?;

        let config = Self {
            environment,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            api_key: Self::parse_api_key(lookup("PUSHINPAY_API_KEY")),
            provider_base_url: lookup("PROVIDER_BASE_URL")
                .unwrap_or_else(|| environment.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
            response_version: lookup("PROVIDER_RESPONSE_VERSION")
                .map(|v| v.parse::<ResponseVersion>())
                .transpose()
                .context("Invalid PROVIDER_RESPONSE_VERSION")?
                .unwrap_or_default(),
            ca_bundle: lookup("PROVIDER_CA_BUNDLE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            webhook_url: lookup("PIX_WEBHOOK_URL")
                .unwrap_or_else(|| "https://example.com/webhooks/pix".to_string()),
            charge_description: lookup("PIX_CHARGE_DESCRIPTION")
                .unwrap_or_else(|| "Pagamento de Assinatura".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment(value: Option<String>) -> Result<Environment> {
        let env = value.unwrap_or_else(|| "sandbox".to_string());

        match env.to_lowercase().as_str() {
            "sandbox" | "development" | "dev" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    fn parse_api_key(value: Option<String>) -> Option<ApiKey> {
        let key = value?.trim().to_string();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return None;
        }
        Some(ApiKey(key))
    }

    fn validate(&self) -> Result<()> {
        if !self.provider_base_url.starts_with("http") {
            bail!("PROVIDER_BASE_URL must be HTTP(S) URL");
        }
        if !self.webhook_url.starts_with("http") {
            bail!("PIX_WEBHOOK_URL must be HTTP(S) URL");
        }

        if self.api_key.is_none() {
            tracing::warn!("PUSHINPAY_API_KEY not configured, charges will be refused");
        }

        tracing::info!(
            "Configuration validated for {} environment",
            self.environment.as_str()
        );

        Ok(())
    }

    pub fn charge_url(&self) -> String {
        format!("{}/api/pix/cashIn", self.provider_base_url)
    }
}
