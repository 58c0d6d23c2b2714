use attendance_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth::require_bearer_auth, cors::permissive_cors, rate_limit},
    routes, AppState,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);
    app_state.auth_service.ensure_default_admin().await?;

    let base_routes = Router::new().route("/health", get(routes::health::health));

    // Scan submission is public (the station holds no admin token) and sits
    // behind the transport-edge rate limiter.
    let scan_api = Router::new()
        .route("/api/scan", post(routes::scan::process_scan))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.scan_rps),
            rate_limit::rps_middleware,
        ));

    let public_api = Router::new().route("/api/auth/login", post(routes::auth::login));

    let admin_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/students",
            get(routes::students::list_students).post(routes::students::create_student),
        )
        .route(
            "/api/students/bulk",
            post(routes::students::bulk_import_students),
        )
        .route(
            "/api/students/:roll_no",
            delete(routes::students::delete_student),
        )
        .route(
            "/api/events",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .route(
            "/api/events/:id",
            get(routes::events::get_event)
                .put(routes::events::update_event)
                .delete(routes::events::delete_event),
        )
        .route("/api/events/:id/stats", get(routes::events::event_stats))
        .route(
            "/api/events/:id/finalize",
            post(routes::events::finalize_event),
        )
        .route(
            "/api/attendance/event/:id",
            get(routes::attendance::list_event_attendance),
        )
        .route(
            "/api/attendance/event/:id/export",
            get(routes::attendance::export_event_attendance),
        )
        .route(
            "/api/attendance/:id/override",
            put(routes::attendance::override_status),
        )
        .layer(axum::middleware::from_fn(require_bearer_auth));

    let app = base_routes
        .merge(scan_api)
        .merge(public_api)
        .merge(admin_api)
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
