//! Application startup and lifecycle management.

use axum::{
    routing::{delete, get, post},
    Router,
};
use mongodb::{options::ClientOptions, Client};
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::handlers;
use crate::services::{ParcelRepository, StripeClient};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub config: Config,
    pub repository: ParcelRepository,
    pub stripe: StripeClient,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let mut client_options = ClientOptions::parse(config.database.url.expose_secret()).await?;
        client_options.app_name = Some("parcel-service".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database.db_name);

        let repository = ParcelRepository::new(&db);
        repository.init_indexes().await?;

        let stripe = StripeClient::new(config.stripe.clone());
        if stripe.is_configured() {
            tracing::info!("Stripe client initialized");
        } else {
            tracing::warn!("Stripe secret key not configured - payment intents will fail");
        }

        let state = AppState {
            db,
            config: config.clone(),
            repository,
            stripe,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &mongodb::Database {
        &self.state.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        let router = Router::new()
            .route("/", get(handlers::banner))
            .route("/health", get(handlers::health_check))
            .route("/api/parcels", get(handlers::list_parcels))
            .route("/api/parcels", post(handlers::create_parcel))
            .route("/api/parcels/:id", get(handlers::get_parcel))
            .route("/api/parcels/:id", delete(handlers::delete_parcel))
            .route(
                "/api/create-payment-intent",
                post(handlers::create_payment_intent),
            )
            .route("/api/payment-success", post(handlers::payment_success))
            .route("/api/payments", get(handlers::list_payments))
            .layer(CorsLayer::permissive())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            .with_state(self.state);

        tracing::info!("Listening on port {}", self.port);
        axum::serve(self.listener, router).await?;

        Ok(())
    }
}
