use crate::config::{ApiKey, Config};
use crate::error::GatewayError;
use crate::models::{ChargeRequest, ChargeResult, ChargeStatus, ProviderPayload, ProviderResponse};
use crate::services::{PixProvider, ResponseVersion};
use serde_json::Value;
use std::sync::Arc;

pub struct ChargeGateway {
    provider: Arc<dyn PixProvider>,
    api_key: Option<ApiKey>,
    webhook_url: String,
    description: String,
    response_version: ResponseVersion,
}

impl ChargeGateway {
    pub fn new(config: &Config, provider: Arc<dyn PixProvider>) -> Self {
        tracing::info!(
            "Charge gateway initialized (api key configured: {}, response mapping: {})",
            config.api_key.is_some(),
            config.response_version
        );

        Self {
            provider,
            api_key: config.api_key.clone(),
            webhook_url: config.webhook_url.clone(),
            description: config.charge_description.clone(),
            response_version: config.response_version,
        }
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn response_version(&self) -> ResponseVersion {
        self.response_version
    }

    /// Validates the amount, asks the provider for a PIX charge and maps the
    /// answer. A missing API key is reported before the amount is looked at.
    pub async fn create_charge(
        &self,
        request: &ChargeRequest,
    ) -> Result<ChargeResult, GatewayError> {
        let outcome = self.run_charge(request).await;

        match &outcome {
            Ok(_) => tracing::info!(status = ?ChargeStatus::from(&outcome), "PIX charge created"),
            Err(e) => tracing::warn!(
                status = ?ChargeStatus::from(&outcome),
                error_code = e.error_code(),
                "PIX charge not created"
            ),
        }

        outcome
    }

    async fn run_charge(&self, request: &ChargeRequest) -> Result<ChargeResult, GatewayError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(GatewayError::ConfigurationMissing)?;

        let amount = request.amount()?;
        let payload = ProviderPayload::new(
            amount.to_minor_units()?,
            &self.webhook_url,
            &self.description,
        );

        tracing::info!(
            status = ?ChargeStatus::Pending,
            "Requesting PIX charge of {} ({} centavos)",
            amount,
            payload.value
        );

        let response = self.provider.create_charge(api_key, &payload).await?;
        self.interpret(response)
    }

    fn interpret(&self, response: ProviderResponse) -> Result<ChargeResult, GatewayError> {
        match response.status {
            200 | 201 => {
                let body: Value = serde_json::from_str(&response.body).map_err(|e| {
                    GatewayError::InternalError(format!(
                        "Malformed PushinPay response body: {}",
                        e
                    ))
                })?;
                self.response_version.extract(&body)
            }
            400..=599 => {
                tracing::warn!(
                    "PushinPay rejected the charge ({}): {}",
                    response.status,
                    response.body
                );
                Err(GatewayError::ProviderRejected {
                    status: response.status,
                    body: response.body,
                })
            }
            other => Err(GatewayError::InternalError(format!(
                "Unexpected PushinPay status {}",
                other
            ))),
        }
    }
}
