use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::{
    domain::entities::{pricing_plans::PricingPlanEntity, testimonials::TestimonialEntity},
    infra::memory::content_stores::ContentStores,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};

pub fn build_router(config: &DotEnvyConfig, stores: &ContentStores) -> Result<Router> {
    let uploads_path = format!("/{}", config.uploads.public_prefix.trim_matches('/'));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/pricing",
            routers::content::routes::<PricingPlanEntity, _>(Arc::clone(&stores.pricing_plans)),
        )
        .nest(
            "/api/programs",
            routers::programs::routes(Arc::clone(&stores.programs), &config.uploads),
        )
        .nest(
            "/api/testimonials",
            routers::content::routes::<TestimonialEntity, _>(Arc::clone(&stores.testimonials)),
        )
        .route("/api/health-check", get(default_routers::health_check))
        .nest_service(&uploads_path, ServeDir::new(&config.uploads.dir))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

pub async fn start(config: Arc<DotEnvyConfig>, stores: ContentStores) -> Result<()> {
    let app = build_router(&config, &stores)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(
        stage = %config.stage,
        upload_dir = %config.uploads.dir.display(),
        "Server is running on port {}",
        config.backend_server.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    stores.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to install SIGTERM handler");
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
