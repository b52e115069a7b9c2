//! Run the USSD insurance-status check for registrations given on the
//! command line.
//!
//! ```bash
//! export MIDTOOLS_API_ENDPOINT=https://nic.example.com
//! export MIDTOOLS_API_KEY=your-api-key
//! cargo run --example batch_status -- GR123422 AS1234GH DV123422
//! ```

use midtools::MidClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> midtools::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cars: Vec<String> = std::env::args().skip(1).collect();
    if cars.is_empty() {
        eprintln!("usage: batch_status <registration> [registration ...]");
        std::process::exit(2);
    }

    let client = MidClient::from_env()?;
    let results = client.ussd_checks(&cars.join(",")).await?;

    for result in results {
        let marker = if result.status { "ok " } else { "FAIL" };
        println!("[{marker}] {}: {}", result.car_number, result.message);
    }
    Ok(())
}
