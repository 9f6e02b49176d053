// --- File: crates/services/salomo_backend/src/lib.rs ---
pub mod app_state;
pub mod origin;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use app_state::AppState;
use origin::{require_allowed_origin, AllowedOrigins};

/// Builds the full HTTP application: checkout routes behind CORS and the origin guard.
pub fn build_app(state: AppState) -> Router {
    let allowed = Arc::new(AllowedOrigins::from_config(&state.config.client));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .route("/", get(|| async { "Welcome to the SALOMO checkout API!" }))
        .merge(salomo_stripe::routes(state.config.clone(), state.processor.clone()));

    #[cfg(feature = "openapi")]
    {
        use salomo_stripe::doc::StripeApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        tracing::info!("Adding Swagger UI at /docs");
        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", StripeApiDoc::openapi()));
    }

    app.layer(allowed.cors_layer())
        .layer(middleware::from_fn_with_state(allowed, require_allowed_origin))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
