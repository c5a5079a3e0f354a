use crate::error::ErrorResponse;
use crate::models::{ChargeRequest, ChargeResponse};
use anyhow::{bail, Context, Result};
use reqwest::Client;

/// Talks to a running gateway the way the front-end does.
pub struct ChargeClient {
    base_url: String,
    client: Client,
}

impl ChargeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub async fn request_charge(&self, amount_reais: f64) -> Result<ChargeResponse> {
        let url = format!("{}/gerar-pix", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChargeRequest::from_reais(amount_reais))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ChargeResponse>()
                .await
                .context("Invalid charge response");
        }

        let text = response
            .text()
            .await
            .context("Failed to read gateway error body")?;
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(error) => match error.details {
                Some(details) => bail!(
                    "Gateway returned {} ({}): {} - {}",
                    status,
                    error.error_code,
                    error.message,
                    details
                ),
                None => bail!(
                    "Gateway returned {} ({}): {}",
                    status,
                    error.error_code,
                    error.message
                ),
            },
            Err(_) => bail!("Gateway returned {}: {}", status, text),
        }
    }
}
