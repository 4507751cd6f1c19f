use std::sync::Arc;

use anyhow::Context;

use factura_api::app::build_app;
use factura_api::app::services::{self, AppServices};
use factura_auth::{Role, UserRecord};
use factura_core::UserId;
use factura_store::UserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    factura_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let services = Arc::new(services::build_services());
    seed_admin(&services)?;

    let app = build_app(&jwt_secret, services);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Seed an administrator account from the environment so a fresh deployment
/// has a caller able to grant roles. No-op when `SEED_ADMIN_EMAIL` is unset.
fn seed_admin(services: &AppServices) -> anyhow::Result<()> {
    let email = match std::env::var("SEED_ADMIN_EMAIL") {
        Ok(v) => v,
        Err(_) => return Ok(()),
    };
    let id = match std::env::var("SEED_ADMIN_ID") {
        Ok(raw) => raw
            .parse::<UserId>()
            .with_context(|| format!("SEED_ADMIN_ID '{raw}' is not a valid UUID"))?,
        Err(_) => UserId::new(),
    };

    let admin = UserRecord::new(id, email, "Administrator", "", Role::Administrator)
        .context("SEED_ADMIN_EMAIL rejected by account validation")?;
    services.users.upsert(admin)?;
    tracing::info!(user_id = %id, "seeded administrator account");
    Ok(())
}
