//! Backend entry-point: wires the store, token signer, and versioned
//! REST surface.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use chrono::Duration;
use rand::RngCore;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use eventify_backend::domain::UserDraft;
use eventify_backend::domain::ports::UserStore;
use eventify_backend::inbound::http::headers::security_headers;
use eventify_backend::inbound::http::routes;
use eventify_backend::inbound::http::state::HttpState;
use eventify_backend::outbound::persistence::MemoryStore;
use eventify_backend::outbound::token::HmacTokenSigner;

const TOKEN_TTL_HOURS: i64 = 8;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_token_key()?;
    let store = Arc::new(MemoryStore::new());
    seed_admin(&store).await?;

    let state = web::Data::new(HttpState::for_store(
        store,
        Arc::new(HmacTokenSigner::new(key)),
        Duration::hours(TOKEN_TTL_HOURS),
    ));

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

/// Read the token signing key, falling back to an ephemeral key in
/// debug builds or when explicitly allowed. An ephemeral key invalidates
/// all outstanding tokens on restart.
fn load_token_key() -> std::io::Result<Vec<u8>> {
    let key_path =
        env::var("TOKEN_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/token_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary token key (dev only)");
                let mut key = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut key);
                Ok(key)
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read token key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Seed the development admin account so the API is reachable on a
/// fresh store.
async fn seed_admin(store: &Arc<MemoryStore>) -> std::io::Result<()> {
    let draft = UserDraft::try_new("admin", "admin@eventify.local", "password", "Admin")
        .map_err(|e| std::io::Error::other(format!("seed user rejected: {e}")))?;
    store
        .insert_user(draft)
        .await
        .map_err(|e| std::io::Error::other(format!("seed insert failed: {e}")))?;
    Ok(())
}
