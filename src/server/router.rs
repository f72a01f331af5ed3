//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered through utoipa-axum so its OpenAPI annotation is
//! collected into one document, served at `/api/docs/openapi.json` with Swagger UI
//! at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI.
///
/// # Registered Endpoints
/// - `POST /api/auth/telegram` - Log in with init data
/// - `GET /api/auth/session` - Current session
/// - `POST /api/auth/refresh` - Extend the current session
/// - `POST /api/auth/logout` - Invalidate the current session
/// - `POST /api/posts/{post_id}/premium` - Create a premium payment invoice
/// - `GET /api/payments` - Payments of the current user
/// - `POST /api/admin/payments/{payment_id}/refund` - Refund a payment
/// - `POST /api/admin/payments/reconcile` - Reconcile payments
/// - `GET /api/admin/stars/balance` - Cached star balance
/// - `DELETE /api/admin/stars/balance` - Clear the balance cache
/// - `POST /api/telegram/webhook` - Telegram updates
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Starling", description = "Starling API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Telegram login and session routes"),
        (name = controller::payment::PAYMENT_TAG, description = "Premium post payments"),
        (name = controller::admin::ADMIN_TAG, description = "Administrator payment operations"),
        (name = controller::webhook::WEBHOOK_TAG, description = "Telegram Bot API webhook"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::telegram_login))
        .routes(routes!(controller::auth::get_session))
        .routes(routes!(controller::auth::refresh_session))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::payment::create_premium_payment))
        .routes(routes!(controller::payment::list_payments))
        .routes(routes!(controller::admin::refund_payment))
        .routes(routes!(controller::admin::reconcile_payments))
        .routes(routes!(
            controller::admin::get_star_balance,
            controller::admin::clear_star_balance
        ))
        .routes(routes!(controller::webhook::telegram_webhook))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
