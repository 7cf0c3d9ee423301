use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use reqwest::Client;
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use mealmate_backend::config::Config;
use mealmate_backend::db::{
    meal_plan_repository::MealPlanRepository, order_repository::OrderRepository,
    postgres_meal_plan_repository::PostgresMealPlanRepository,
    postgres_order_repository::PostgresOrderRepository,
    postgres_session_repository::PostgresSessionRepository,
    postgres_user_repository::PostgresUserRepository, session_repository::SessionRepository,
    user_repository::UserRepository,
};
use mealmate_backend::responses::JsonResponse;
use mealmate_backend::routes::auth::{
    admin_profile, handle_login, handle_logout, handle_verify,
};
use mealmate_backend::routes::orders::{create_order, verify_payment, webhook};
use mealmate_backend::services::razorpay::RazorpayClient;
use mealmate_backend::services::smtp_mailer::SmtpMailer;
use mealmate_backend::state::AppState;
use mealmate_backend::utils::jwt::JwtKeys;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config = Config::from_env();
    let jwt_keys = Arc::new(JwtKeys::from_env().expect("JWT secret must be usable"));

    let pg_pool = establish_connection(&config.database_url).await;

    let users = Arc::new(PostgresUserRepository {
        pool: pg_pool.clone(),
    }) as Arc<dyn UserRepository>;
    let sessions = Arc::new(PostgresSessionRepository {
        pool: pg_pool.clone(),
    }) as Arc<dyn SessionRepository>;
    let orders = Arc::new(PostgresOrderRepository {
        pool: pg_pool.clone(),
    }) as Arc<dyn OrderRepository>;
    let meal_plans = Arc::new(PostgresMealPlanRepository {
        pool: pg_pool.clone(),
    }) as Arc<dyn MealPlanRepository>;

    // Expired rows are inert either way; sweeping at boot keeps the table small.
    match sessions.delete_expired().await {
        Ok(purged) if purged > 0 => info!("purged {purged} expired sessions"),
        Ok(_) => {}
        Err(e) => warn!("expired-session sweep failed: {:?}", e),
    }

    let mailer = Arc::new(SmtpMailer::new().expect("Failed to initialize mailer"));
    let http_client = Arc::new(Client::new());
    let gateway = Arc::new(RazorpayClient::new(
        http_client.clone(),
        config.razorpay.key_id.clone(),
        config.razorpay.key_secret.clone(),
    ));

    let rate_limit_ms: u64 = std::env::var("RATE_LIMITER_MILLISECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        // Default: 200ms/token (~5 req/sec)
        .unwrap_or(200);
    let rate_limit_burst: u32 = std::env::var("RATE_LIMITER_BURST")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(20);
    let global_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(rate_limit_ms)
            .burst_size(rate_limit_burst)
            .use_headers()
            .error_handler(|_err| {
                JsonResponse::too_many_requests(
                    "Too many requests. Please wait a moment and try again.",
                )
                .into_response()
            })
            .finish()
            .unwrap(),
    );

    // Background task to cleanup old IPs
    let governor_limiter = global_governor_conf.limiter().clone();
    std::thread::spawn(move || {
        let interval = std::time::Duration::from_secs(60);
        loop {
            std::thread::sleep(interval);
            governor_limiter.retain_recent();
        }
    });

    let rate_limit_auth_s: u64 = std::env::var("RATE_LIMITER_AUTH_SECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1);
    let rate_limit_auth_burst: u32 = std::env::var("RATE_LIMITER_AUTH_BURST")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10);
    // Stricter limiter for /api/auth/*
    let auth_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(rate_limit_auth_s)
            .burst_size(rate_limit_auth_burst)
            .use_headers()
            .error_handler(|_err| {
                JsonResponse::too_many_requests(
                    "Too many requests. Please wait a moment and try again.",
                )
                .into_response()
            })
            .finish()
            .unwrap(),
    );

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    let state = AppState {
        users,
        sessions,
        orders,
        meal_plans,
        mailer,
        gateway,
        http_client,
        config: Arc::new(config),
        jwt_keys,
    };

    let auth_routes = Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/verify", get(handle_verify))
        .route("/admin/profile", get(admin_profile))
        .layer(GovernorLayer {
            config: auth_governor_conf.clone(),
        });

    // The webhook sits here unauthenticated; its HMAC check is the gate.
    let order_routes = Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/webhook", post(webhook));

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth_routes)
        .nest("/api/order", order_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer {
            config: global_governor_conf.clone(),
        })
        .layer(cors);

    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    let listener = TcpListener::bind(addr).await.unwrap();
    info!("Listening at http://{}", addr);
    axum::serve(listener, make_service).await.unwrap();
}

/// A simple root route.
async fn root() -> Response {
    JsonResponse::success("Hello, MealMate!").into_response()
}

/// Establish a connection to the database and verify it.
async fn establish_connection(database_url: &str) -> PgPool {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .expect("Failed to verify database connection");

    info!("Successfully connected to the database");
    pool
}
