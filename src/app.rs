/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (backend, ID token verifier, session mirror) → Router 組み立て
 * - Middleware の適用 (route gate / HTTP / CORS / security headers)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repos::{InMemoryBackend, PgEnrollmentRepo, PgIdentityRepo};
use crate::services::auth::build_verifier;
use crate::session::SessionMirror;
use crate::state::AppState;
use crate::{api, middleware, pages};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,coursegate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting coursegate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Process-level services, injected into the shared application state.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let verifier = build_verifier(config)?;
    let mirror = SessionMirror::new(config.cookie_policy());

    let state = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("connect to DATABASE_URL")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("run migrations")?;

            AppState::new(
                Arc::new(PgIdentityRepo::new(pool.clone())),
                Arc::new(PgEnrollmentRepo::new(pool)),
                verifier,
                mirror,
                config.admin_setup_enabled,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set: using the in-memory backend, data is not persisted");
            let backend = Arc::new(InMemoryBackend::new());

            AppState::new(
                backend.clone(),
                backend,
                verifier,
                mirror,
                config.admin_setup_enabled,
            )
        }
    };

    Ok(state)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .merge(pages::routes())
        .with_state(state.clone());

    // innermost first: the gate sees requests after request-id / tracing are set up
    let router = middleware::route_gate::apply(router, state);
    let router = middleware::http::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::security_headers::apply(router, config)
}
