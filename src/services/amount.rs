use crate::error::GatewayError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Smallest chargeable amount is anything strictly above R$ 0,50.
pub fn minimum_amount() -> Decimal {
    Decimal::new(50, 2)
}

/// A validated charge amount in Reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub fn from_reais(reais: Decimal) -> Result<Self, GatewayError> {
        if reais <= minimum_amount() {
            return Err(GatewayError::InvalidAmount(format!(
                "{} is not above the minimum of {}",
                reais,
                minimum_amount()
            )));
        }
        Ok(Self(reais))
    }

    pub fn from_cents(cents: i64) -> Result<Self, GatewayError> {
        Self::from_reais(Decimal::new(cents, 2))
    }

    /// Parses a binary float through its shortest decimal representation,
    /// so `19.99_f64` becomes exactly `19.99` rather than `19.98999...`.
    pub fn from_f64(reais: f64) -> Result<Self, GatewayError> {
        if !reais.is_finite() {
            return Err(GatewayError::InvalidAmount(format!(
                "{} is not a finite number",
                reais
            )));
        }
        Self::from_reais(parse_decimal(&reais.to_string())?)
    }

    pub fn from_json_reais(value: &Value) -> Result<Self, GatewayError> {
        match value {
            Value::Number(number) => Self::from_reais(parse_decimal(&number.to_string())?),
            other => Err(GatewayError::InvalidAmount(format!(
                "expected a number, got {}",
                other
            ))),
        }
    }

    pub fn from_json_cents(value: &Value) -> Result<Self, GatewayError> {
        value.as_i64().map(Self::from_cents).unwrap_or_else(|| {
            Err(GatewayError::InvalidAmount(format!(
                "expected an integer amount in cents, got {}",
                value
            )))
        })
    }

    pub fn reais(&self) -> Decimal {
        self.0
    }

    /// Rounds half-up to two places and returns the amount in centavos.
    pub fn to_minor_units(&self) -> Result<i64, GatewayError> {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .ok_or_else(|| {
                GatewayError::InvalidAmount(format!("{} is too large to charge", self.0))
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}", self.0)
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, GatewayError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| GatewayError::InvalidAmount(format!("{} is not a representable amount", raw)))
}
