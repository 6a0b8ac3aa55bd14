use crate::cli::ServeArgs;
use crate::infra::{Backend, Observability};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use realty_listings::config::AppConfig;
use realty_listings::error::AppError;
use realty_listings::seed::reseed;
use realty_listings::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let backend = if args.in_memory {
        Backend::in_memory(&config.storage)
    } else {
        Backend::connect(&config.storage).await?
    };

    if args.seed {
        let report = reseed(&backend.catalog).await?;
        info!(
            removed = report.removed,
            inserted = report.inserted.len(),
            "sample listings loaded"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let observability = Observability {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router(backend.state(config.server.public_dir.clone()))
        .layer(Extension(observability))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "listing site ready");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    readiness_flag.store(false, Ordering::Release);
    backend.close().await;
    served?;

    info!("listing site stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
