use crate::{
    config::config_model::DotEnvyConfig,
    domain::repositories::{
        companies::CompanyRepository, resource_counters::ResourceCounterRepository,
    },
    infrastructure::{
        axum_http::{
            auth::JwtVerifier,
            default_routers,
            routers::{self, plans::PlansState},
        },
        postgres::postgres_connection::PgPoolSquad,
    },
};
use anyhow::Result;
use axum::{
    Extension, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// API routes without the transport layers; used by `start` and by tests.
pub fn app<C, R>(state: PlansState<C, R>, verifier: JwtVerifier) -> Router
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1/plans", routers::plans::routes(state.clone()))
        .nest("/api/v1/admin", routers::admin_plans::routes(state))
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(Extension(Arc::new(verifier)))
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let state = routers::plans::postgres_state(Arc::clone(&db_pool), &config.plan_cache);
    let verifier = JwtVerifier::new(&config.auth.jwt_secret);

    let app = app(state, verifier)
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any), // TODO restrict to the dashboard origin once it is configurable
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(
        port = config.server.port,
        plan_cache_ttl_seconds = config.plan_cache.ttl_seconds,
        "Server is running"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
