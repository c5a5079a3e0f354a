use crate::error::GatewayError;
use crate::services::amount::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound body of `POST /gerar-pix`.
///
/// `value` is the amount in Reais. `valor_em_centavos` is the older
/// integer-cents form still sent by some front-end builds; `value` wins
/// when both are present. Fields are kept as raw JSON so that a wrong
/// type surfaces as an invalid amount instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChargeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_em_centavos: Option<Value>,
}

impl ChargeRequest {
    pub fn from_reais(value: f64) -> Self {
        Self {
            value: serde_json::Number::from_f64(value).map(Value::Number),
            valor_em_centavos: None,
        }
    }

    pub fn from_cents(cents: i64) -> Self {
        Self {
            value: None,
            valor_em_centavos: Some(Value::from(cents)),
        }
    }

    pub fn amount(&self) -> Result<Amount, GatewayError> {
        match (&self.value, &self.valor_em_centavos) {
            (Some(reais), _) => Amount::from_json_reais(reais),
            (None, Some(cents)) => Amount::from_json_cents(cents),
            (None, None) => Err(GatewayError::InvalidAmount(
                "no amount supplied".to_string(),
            )),
        }
    }
}

/// Body sent to the provider's cash-in endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPayload {
    pub value: i64,
    pub webhook_url: String,
    pub split_rules: Vec<SplitRule>,
    pub description: String,
}

impl ProviderPayload {
    pub fn new(value: i64, webhook_url: &str, description: &str) -> Self {
        Self {
            value,
            webhook_url: webhook_url.to_string(),
            split_rules: Vec::new(),
            description: description.to_string(),
        }
    }
}

/// Revenue split entry. Charges are never split, the list is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRule {
    pub value: i64,
    pub account_id: String,
}

/// Raw outcome of one provider call, before classification.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeResult {
    pub qr_code_text: String,
    pub qr_code_image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Pending,
    Completed,
    Failed,
}

impl<T, E> From<&Result<T, E>> for ChargeStatus {
    fn from(outcome: &Result<T, E>) -> Self {
        match outcome {
            Ok(_) => ChargeStatus::Completed,
            Err(_) => ChargeStatus::Failed,
        }
    }
}
