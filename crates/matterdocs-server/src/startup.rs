use color_eyre::owo_colors::OwoColorize;
use eyre::Result;
use http::Method;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::Any;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use axum::{Router, body::Body, http::Request, routing::get, serve::Serve};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_request_id::{RequestId, RequestIdLayer};
use tracing::{Level, error, error_span, info};

use crate::configuration::ApplicationSettings;
use crate::routes::{health_check, list_documents};
use crate::{DocumentLogic, Environment, OutputValidator, ShapeValidator};

/// Everything a handler needs, injected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
    pub logic: Arc<dyn DocumentLogic>,
    pub validator: Arc<dyn OutputValidator>,
}

impl AppState {
    #[must_use]
    pub fn new(environment: Environment, logic: Arc<dyn DocumentLogic>) -> Self {
        Self {
            environment,
            logic,
            validator: Arc::new(ShapeValidator::default()),
        }
    }
}

#[derive(Debug)]
pub struct Application {
    pub port: u16,
    pub host: IpAddr,
    pub server: Serve<Router, Router>,
}

impl Application {
    /// Binds to the configured address, falling back to any free port on the
    /// same interface when it is taken.
    ///
    /// # Errors
    /// Fails if no port can be bound or the local address can't be read.
    pub async fn build(
        configuration: &ApplicationSettings,
        logic: Arc<dyn DocumentLogic>,
    ) -> Result<Self> {
        let address = format!("{}:{}", configuration.host, configuration.port);

        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(err) => {
                error!("{err}. Trying another port...");
                match TcpListener::bind(format!("{}:0", configuration.host)).await {
                    Ok(listener) => listener,
                    Err(err) => {
                        error!("No ports available, shutting down...");
                        return Err(err.into());
                    }
                }
            }
        };

        let port = listener.local_addr()?.port();
        let host = configuration.host;

        let state = AppState::new(configuration.environment, logic);
        let server = build_server(listener, state);

        Ok(Self { port, host, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> String {
        self.host.to_string()
    }

    /// # Errors
    /// Returns the I/O error that stopped the server.
    ///
    /// # Panics
    /// Panics if the signal handlers can't be installed.
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server
            .with_graceful_shutdown(async move {
                let ctrl_c = async {
                    signal::ctrl_c()
                        .await
                        .expect("Failed to install the Ctrl+C handler");
                };
                #[cfg(unix)]
                let terminate = async {
                    signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                        .expect("Failed to install the SIGTERM handler")
                        .recv()
                        .await;
                };

                #[cfg(not(unix))]
                let terminate = std::future::pending::<()>();

                tokio::select! {
                    () = ctrl_c => {
                        info!("ctrl+c received.")
                    },
                    () = terminate => {
                        info!("SIGTERM received.")
                    },
                }
            })
            .await
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/matters/:matter_id/documents", get(list_documents));

    let mut router = api_routes.with_state(state);

    if cfg!(debug_assertions) {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);

        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            let request_id = request
                                .extensions()
                                .get::<RequestId>()
                                .map_or_else(|| "unknown".into(), ToString::to_string);

                            error_span!(
                                "request",
                                id = %request_id,
                                method = %request.method().blue().bold(),
                                uri = %request.uri()
                            )
                        })
                        .on_response(
                            DefaultOnResponse::new()
                                .include_headers(true)
                                .level(Level::INFO),
                        ),
                )
                .layer(RequestIdLayer),
        )
        .layer(CompressionLayer::new())
}

pub fn build_server(listener: TcpListener, state: AppState) -> Serve<Router, Router> {
    axum::serve(listener, build_router(state))
}

pub async fn run_server(
    configuration: ApplicationSettings,
    start: Instant,
    logic: Arc<dyn DocumentLogic>,
) -> Result<()> {
    let app = match Application::build(&configuration, logic).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start the server: {e:?}");
            return Err(e);
        }
    };

    let url = format!("http://{}:{}", app.host(), app.port());

    println!(
        "\n\n  {} {} ready in {} ms\n",
        configuration.name.to_uppercase().bold().bright_green(),
        configuration.environment.green(),
        start.elapsed().as_millis().bold().bright_white(),
    );

    println!(
        "  {}  {}:  {}\n\n",
        "➜".bold().bright_green(),
        "Local".bold().bright_white(),
        url.bright_cyan().underline()
    );

    if !configuration.environment.is_development_or_testing() {
        info!(
            "Running in {}: document listing answers 501 Not Implemented.",
            configuration.environment
        );
    }

    if let Err(e) = app.run_until_stopped().await {
        error!("Error while running the HTTP server: {:?}", e);
        return Err(e.into());
    }

    Ok(())
}
