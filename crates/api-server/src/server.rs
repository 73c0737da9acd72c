//! API server: builds the router and serves HTTP until shutdown.

use crate::account_rest;
use crate::auth;
use crate::report_rest;
use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use adsim_cache::StructureCache;
use adsim_core::config::AppConfig;
use adsim_reporting::ReportBuilder;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Main API server. Owns the structure cache shared by every request.
pub struct ApiServer {
    config: AppConfig,
    cache: Arc<StructureCache>,
}

impl ApiServer {
    pub fn new(config: AppConfig) -> Self {
        Self::with_cache(config, Arc::new(StructureCache::new()))
    }

    pub fn with_cache(config: AppConfig, cache: Arc<StructureCache>) -> Self {
        Self { config, cache }
    }

    /// Assemble the full HTTP application.
    pub fn router(&self) -> Router {
        let state = AppState {
            builder: Arc::new(ReportBuilder::from_config(
                self.cache.clone(),
                &self.config.reports,
            )),
            reports: Arc::new(self.config.reports.clone()),
            environment: self.config.environment.clone(),
            start_time: Instant::now(),
        };

        let gads = Router::new()
            .route("/accounts", get(account_rest::list_accounts))
            .route("/accounts/:id", get(account_rest::get_account))
            .route("/accounts/:id/campaigns", get(account_rest::list_campaigns))
            .route(
                "/accounts/:id/campaigns/:campaign_id/ad-groups",
                get(account_rest::list_ad_groups),
            )
            .route(
                "/accounts/:id/ad-groups/:ad_group_id/keywords",
                get(account_rest::list_keywords),
            )
            .route("/accounts/:id/reports", get(report_rest::query_report))
            .route("/reports", post(report_rest::create_report));

        let api = Router::new()
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            .nest("/gads", gads);

        Router::new()
            .nest("/api/v1", api)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .fallback(rest::not_found)
            // Middleware
            .layer(middleware::from_fn(auth::mock_auth))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server and serve until `shutdown` resolves.
    pub async fn start_http<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Start the Prometheus exporter on its own port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
