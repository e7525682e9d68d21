//! Validates a signup form with one simulated uniqueness lookup.
//!
//! Run with `RUST_LOG=fieldcheck_validator=trace cargo run --example signup_form`.

use std::time::Duration;

use fieldcheck_validator::prelude::*;
use tracing_subscriber::EnvFilter;

/// Pretend user directory; `ana@example.com` is already taken.
async fn email_is_free(email: String) -> Result<bool, CheckError> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(email != "ana@example.com")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let name = ValidationBuilder::field("name")
        .required()
        .min(3, "Name must have at least 3 characters")
        .build()?;
    let cpf = ValidationBuilder::field("cpf")
        .required()
        .cpf()
        .not_repeated_digits(11)
        .build()?;
    let email = AsyncValidationBuilder::field("email")
        .rules(|b| b.required().email())
        .check(email_is_free)
        .message("Email already registered")
        .build()?;

    let config = AsyncValidationConfig::default().with_check_timeout(Duration::from_secs(1));
    let schema = AsyncValidationComposite::from_chains_with_config(
        [AsyncChain::from(name), AsyncChain::from(cpf), email],
        config,
    )?;

    for form in [
        [("name", "Bia Souza"), ("cpf", "529.982.247-25"), ("email", "bia@example.com")],
        [("name", "Al"), ("cpf", "111.111.111-11"), ("email", "ana@example.com")],
    ] {
        match schema.validate(&form).await {
            Outcome::Complete(Ok(())) => println!("{form:?}: valid"),
            Outcome::Complete(Err(report)) => {
                println!("{form:?}:");
                for (field, message) in report.messages() {
                    println!("  {field}: {message}");
                }
            }
            Outcome::Superseded => println!("{form:?}: superseded"),
        }
    }

    Ok(())
}
