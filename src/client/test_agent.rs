use anyhow::{Context, Result};
use pix_gateway::client::ChargeClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let base_url = std::env::var("PIX_GATEWAY_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());
    let amount: f64 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "49.90".to_string())
        .parse()
        .context("Amount must be a number in Reais, e.g. 49.90")?;

    println!("PIX Gateway Test Client");
    println!("=======================");
    println!("Server: {}", base_url);
    println!("Amount: R$ {:.2}", amount);
    println!();

    let client = ChargeClient::new(base_url);

    match client.request_charge(amount).await {
        Ok(charge) => {
            println!("[SUCCESS] {}", charge.message);
            println!("PIX copia e cola:");
            println!("{}", charge.pix_code);
            println!();
            println!("QR code ({} chars):", charge.qrcode_url.len());
            println!("{}", charge.qrcode_url);
        }
        Err(e) => {
            println!("[FAILED] {:#}", e);
        }
    }

    Ok(())
}
