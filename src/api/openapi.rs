//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, clients, health, offerings, providers, schedules, tasks};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelia API",
        version = "0.3.0",
        description = "Appointment booking REST API for independent service providers",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Providers
        providers::list_specialties,
        providers::list_providers,
        providers::get_provider,
        providers::register_provider,
        providers::verify_secret,
        providers::rotate_secret,
        // Offerings
        offerings::list_offerings,
        offerings::create_offering,
        offerings::delete_offering,
        offerings::delete_all_offerings,
        // Schedules
        schedules::list_windows,
        schedules::create_window,
        schedules::delete_window,
        schedules::delete_all_windows,
        schedules::available_dates,
        // Availability
        availability::available_slots,
        // Bookings
        bookings::create_booking,
        bookings::get_booking,
        bookings::cancel_booking,
        bookings::client_bookings,
        bookings::provider_bookings,
        // Clients
        clients::touch_client,
        clients::get_client,
        // Tasks
        tasks::run_day_ahead,
        tasks::run_hour_ahead,
        tasks::run_cleanup,
    ),
    components(
        schemas(
            // Providers
            crate::models::provider::Provider,
            crate::models::provider::ProviderSummary,
            crate::models::provider::RegisterProvider,
            crate::models::provider::VerifySecret,
            crate::models::provider::RotateSecret,
            // Offerings
            crate::models::offering::Offering,
            crate::models::offering::CreateOffering,
            // Schedules
            crate::models::schedule::WorkWindow,
            crate::models::schedule::CreateWorkWindow,
            crate::models::schedule::SlotQuery,
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::BookingConfirmation,
            // Clients
            crate::models::client::Client,
            crate::models::client::TouchClient,
            // Tasks
            tasks::TaskRunResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "providers", description = "Provider registration and browsing"),
        (name = "offerings", description = "Service catalog management"),
        (name = "schedules", description = "Working-time window management"),
        (name = "availability", description = "Date and slot resolution"),
        (name = "bookings", description = "Booking commit and lifecycle"),
        (name = "clients", description = "Client identities"),
        (name = "tasks", description = "Periodic duties")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
