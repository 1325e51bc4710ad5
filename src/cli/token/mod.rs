//! Token command - mints a bearer token for local development

use clap::Args;

use crate::config::{AppConfig, AuthConfig};
use crate::infrastructure::auth::{JwtGenerator, JwtService};

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Subject (`sub` claim) of the token
    #[arg(long)]
    pub subject: String,

    /// Lifetime in hours; defaults to `auth.expiration_hours`
    #[arg(long)]
    pub hours: Option<u64>,
}

/// Print a signed token to stdout
pub async fn run(args: TokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let token = mint_token(&config.auth, &args)?;

    println!("{}", token);

    Ok(())
}

fn mint_token(auth: &AuthConfig, args: &TokenArgs) -> anyhow::Result<String> {
    let secret = auth.resolve_secret().ok_or_else(|| {
        anyhow::anyhow!(
            "No JWT secret configured. Set auth.jwt_secret or JWT_SECRET so the server accepts the token"
        )
    })?;

    let service = JwtService::new(crate::jwt_config(auth, secret));
    let hours = args.hours.unwrap_or(auth.expiration_hours);

    Ok(service.generate_with_expiration(&args.subject, hours)?)
}
