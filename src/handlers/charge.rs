use crate::{
    error::GatewayError,
    handlers::AppState,
    models::{ChargeRequest, ChargeResponse},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

pub async fn create_pix_charge(
    State(state): State<AppState>,
    payload: Result<Json<ChargeRequest>, JsonRejection>,
) -> Result<Json<ChargeResponse>, GatewayError> {
    // An unreadable body has no amount; the gateway still checks the key first.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Unreadable charge request body: {}", rejection.body_text());
            ChargeRequest::default()
        }
    };

    let result = state.gateway.create_charge(&request).await?;

    Ok(Json(ChargeResponse {
        qrcode_url: result.qr_code_image,
        pix_code: result.qr_code_text,
        message: "PIX gerado com sucesso.".to_string(),
    }))
}
