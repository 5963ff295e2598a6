//! Mint a bearer token for a subject using the server's JWT settings.
//!
//! Usage: `issue-token <subject>`

use anyhow::Context;

use posts_core::ports::TokenService;
use posts_infra::JwtTokenService;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();

    let subject = std::env::args()
        .nth(1)
        .filter(|s| !s.trim().is_empty())
        .context("usage: issue-token <subject>")?;

    let service = JwtTokenService::from_env();
    let token = service
        .generate_token(&subject)
        .context("failed to sign token")?;

    println!("{token}");
    eprintln!("expires in {}s", service.expiration_seconds());

    Ok(())
}
