use anyhow::Result;
use idscan_screening::{ScreeningClient, ScreeningConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Usage: cargo run --example screen_driver_license -- CA D1234567 Jane Doe
// Reads IDSCAN_SCREENING_TOKEN (and optional overrides) from the environment or .env.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idscan_screening=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [state, license, first_name, last_name] = args.as_slice() else {
        anyhow::bail!("usage: screen_driver_license <STATE> <LICENSE> <FIRST> <LAST>");
    };

    let config = ScreeningConfig::from_env()?;
    let client = ScreeningClient::from_config(config)?;

    println!("=== Driver's License Verification ===\n");

    let result = client
        .screen_dl(state, license, first_name, last_name)
        .await?;

    if result.is_unsupported_state() {
        println!("⚠ {} is not covered yet: {}", state, result.error.unwrap_or_default());
        return Ok(());
    }

    println!("✓ {} ({})", result.service_name, result.service_id);
    for profile in &result.profiles {
        println!("  Profile: {}", profile.full_name());
        if let Some(dlv) = &profile.drivers_license_verification_result {
            let mismatches = dlv.mismatched_fields();
            if mismatches.is_empty() {
                println!("    All reported fields match");
            } else {
                println!("    Mismatched: {}", mismatches.join(", "));
            }
        }
    }

    Ok(())
}
