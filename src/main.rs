//! Atelia Server - appointment booking for independent service providers

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelia_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{reminders, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("atelia_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atelia Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.booking.clone(),
        config.reminders.clone(),
        Arc::new(reminders::LogNotifier),
    );

    // Periodic duties: day-ahead reminders, hour-ahead reminders, cleanup
    reminders::spawn_workers(services.reminders.clone());
    tracing::info!("Reminder and cleanup workers started");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Providers
        .route("/specialties", get(api::providers::list_specialties))
        .route("/providers", get(api::providers::list_providers))
        .route("/providers", post(api::providers::register_provider))
        .route("/providers/:id", get(api::providers::get_provider))
        .route("/providers/:id/verify-secret", post(api::providers::verify_secret))
        .route("/providers/:id/rotate-secret", post(api::providers::rotate_secret))
        // Offerings
        .route("/providers/:id/offerings", get(api::offerings::list_offerings))
        .route("/providers/:id/offerings", post(api::offerings::create_offering))
        .route("/providers/:id/offerings", delete(api::offerings::delete_all_offerings))
        .route("/offerings/:id", delete(api::offerings::delete_offering))
        // Schedules
        .route("/providers/:id/windows", get(api::schedules::list_windows))
        .route("/providers/:id/windows", post(api::schedules::create_window))
        .route("/providers/:id/windows", delete(api::schedules::delete_all_windows))
        .route("/windows/:id", delete(api::schedules::delete_window))
        // Availability
        .route("/providers/:id/dates", get(api::schedules::available_dates))
        .route("/providers/:id/slots", get(api::availability::available_slots))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id/cancel", post(api::bookings::cancel_booking))
        .route("/clients/:id/bookings", get(api::bookings::client_bookings))
        .route("/providers/:id/bookings", get(api::bookings::provider_bookings))
        // Clients
        .route("/clients/:id", put(api::clients::touch_client))
        .route("/clients/:id", get(api::clients::get_client))
        // Periodic duties, for external schedulers
        .route("/tasks/reminders/day-ahead", post(api::tasks::run_day_ahead))
        .route("/tasks/reminders/hour-ahead", post(api::tasks::run_hour_ahead))
        .route("/tasks/cleanup", post(api::tasks::run_cleanup))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
