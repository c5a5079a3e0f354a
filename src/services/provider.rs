use crate::config::{ApiKey, Config};
use crate::error::GatewayError;
use crate::models::{ProviderPayload, ProviderResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Certificate;
use std::path::Path;

/// Outbound side of a charge: one POST, raw status and body back.
#[async_trait]
pub trait PixProvider: Send + Sync {
    async fn create_charge(
        &self,
        api_key: &ApiKey,
        payload: &ProviderPayload,
    ) -> Result<ProviderResponse, GatewayError>;
}

pub struct PushinPayClient {
    charge_url: String,
    client: reqwest::Client,
}

impl PushinPayClient {
    pub fn new(charge_url: String, ca_bundle: Option<&Path>) -> Result<Self> {
        // Certificate validation stays on; a bundle only adds trust anchors.
        let mut builder = reqwest::Client::builder().tls_built_in_root_certs(true);

        if let Some(path) = ca_bundle {
            for certificate in load_ca_bundle(path)? {
                builder = builder.add_root_certificate(certificate);
            }
            tracing::info!("Trusting extra CA bundle from {}", path.display());
        }

        let client = builder
            .build()
            .context("Failed to build PushinPay HTTP client")?;

        Ok(Self { charge_url, client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.charge_url(), config.ca_bundle.as_deref())
    }

    pub fn charge_url(&self) -> &str {
        &self.charge_url
    }
}

#[async_trait]
impl PixProvider for PushinPayClient {
    async fn create_charge(
        &self,
        api_key: &ApiKey,
        payload: &ProviderPayload,
    ) -> Result<ProviderResponse, GatewayError> {
        tracing::debug!(
            "POST {} value={} centavos",
            self.charge_url,
            payload.value
        );

        let response = self
            .client
            .post(&self.charge_url)
            .bearer_auth(api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                GatewayError::InternalError(format!("Request to PushinPay failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            GatewayError::InternalError(format!("Failed to read PushinPay response: {}", e))
        })?;

        tracing::debug!("PushinPay answered with status {}", status);

        Ok(ProviderResponse { status, body })
    }
}

fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path)
        .with_context(|| format!("Failed to read CA bundle {}", path.display()))?;

    let certificates = Certificate::from_pem_bundle(&pem)
        .with_context(|| format!("Invalid certificate in {}", path.display()))?;

    if certificates.is_empty() {
        anyhow::bail!("No certificates found in {}", path.display());
    }

    Ok(certificates)
}
