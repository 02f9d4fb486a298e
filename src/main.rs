//! Service entry point.
//!
//! Loads configuration, connects to PostgreSQL, wires the application
//! handlers to their adapters, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use mentor_desk::adapters::http::{mentoring_router, webhook_router, MentoringState};
use mentor_desk::adapters::postgres::{
    PostgresAvailabilityRepository, PostgresMentorProfileRepository, PostgresReviewRepository,
    PostgresSessionRepository,
};
use mentor_desk::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use mentor_desk::application::handlers::booking::{
    BookSessionHandler, CreateSessionCheckoutHandler,
};
use mentor_desk::application::handlers::lifecycle::{
    CreateReviewHandler, UpdateSessionStatusHandler,
};
use mentor_desk::application::handlers::payment::{
    HandlePaymentWebhookHandler, VerifySessionPaymentHandler,
};
use mentor_desk::application::handlers::profile::{
    CreateMentorProfileHandler, UpdateMentorProfileHandler,
};
use mentor_desk::application::handlers::scheduling::{
    CreateAvailabilityHandler, DeleteAvailabilityHandler, ListAvailableSlotsHandler,
    SlotConflictResolver, UpdateAvailabilityHandler,
};
use mentor_desk::application::handlers::sessions::{GetSessionHandler, ListSessionsHandler};
use mentor_desk::config::AppConfig;
use mentor_desk::ports::{
    AvailabilityRepository, MentorProfileRepository, PaymentProvider, ReviewRepository,
    SessionRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .json()
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        port = config.server.port,
        "Starting mentor-desk"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let availability_repository: Arc<dyn AvailabilityRepository> =
        Arc::new(PostgresAvailabilityRepository::new(pool.clone()));
    let profile_repository: Arc<dyn MentorProfileRepository> =
        Arc::new(PostgresMentorProfileRepository::new(pool.clone()));
    let session_repository: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let review_repository: Arc<dyn ReviewRepository> =
        Arc::new(PostgresReviewRepository::new(pool.clone()));
    let payment_provider: Arc<dyn PaymentProvider> = Arc::new(StripePaymentAdapter::new(
        StripeConfig::from_payment_config(&config.payment),
    ));

    let resolver = Arc::new(SlotConflictResolver::new(
        availability_repository.clone(),
        session_repository.clone(),
    ));

    let state = MentoringState {
        create_availability: Arc::new(CreateAvailabilityHandler::new(
            availability_repository.clone(),
        )),
        update_availability: Arc::new(UpdateAvailabilityHandler::new(
            availability_repository.clone(),
        )),
        delete_availability: Arc::new(DeleteAvailabilityHandler::new(
            availability_repository.clone(),
        )),
        list_available_slots: Arc::new(ListAvailableSlotsHandler::new(
            availability_repository.clone(),
            resolver.clone(),
        )),
        create_mentor_profile: Arc::new(CreateMentorProfileHandler::new(
            profile_repository.clone(),
        )),
        update_mentor_profile: Arc::new(UpdateMentorProfileHandler::new(
            profile_repository.clone(),
        )),
        book_session: Arc::new(BookSessionHandler::new(
            profile_repository.clone(),
            session_repository.clone(),
            resolver,
        )),
        create_session_checkout: Arc::new(CreateSessionCheckoutHandler::new(
            session_repository.clone(),
            payment_provider.clone(),
            config.booking.clone(),
        )),
        verify_session_payment: Arc::new(VerifySessionPaymentHandler::new(
            session_repository.clone(),
            payment_provider.clone(),
        )),
        handle_payment_webhook: Arc::new(HandlePaymentWebhookHandler::new(
            session_repository.clone(),
            payment_provider,
        )),
        update_session_status: Arc::new(UpdateSessionStatusHandler::new(
            session_repository.clone(),
        )),
        create_review: Arc::new(CreateReviewHandler::new(
            session_repository.clone(),
            review_repository,
            profile_repository,
        )),
        get_session: Arc::new(GetSessionHandler::new(session_repository.clone())),
        list_sessions: Arc::new(ListSessionsHandler::new(session_repository)),
    };

    let app = Router::new()
        .nest("/api/mentoring", mentoring_router(state.clone()))
        .nest("/api/webhooks", webhook_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
