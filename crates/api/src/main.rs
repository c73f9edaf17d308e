use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sagedo_api::config::ServerConfig;
use sagedo_api::{background, notifications, payment, router, state, ws};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sagedo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sagedo_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    sagedo_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    sagedo_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin bootstrap ---
    bootstrap_admin(&pool, &config).await;

    // Cancellation token shared by the periodic background tasks.
    let task_cancel = tokio_util::sync::CancellationToken::new();

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager), task_cancel.clone());

    // --- Event bus ---
    let event_bus = Arc::new(sagedo_events::EventBus::default());
    tracing::info!("Event bus created");

    // Spawn event persistence (writes all events to the database).
    let persistence_handle = tokio::spawn(sagedo_events::EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    // Spawn notification router (pushes events to browsers via WebSocket).
    let notification_router =
        notifications::NotificationRouter::new(pool.clone(), Arc::clone(&ws_manager));
    let router_handle = tokio::spawn(notification_router.run(event_bus.subscribe()));

    // Spawn email delivery when SMTP is configured.
    let email_handle = sagedo_events::EmailConfig::from_env().map(|email_config| {
        tracing::info!(host = %email_config.smtp_host, "Email delivery enabled");
        tokio::spawn(sagedo_events::EmailDelivery::new(email_config).run(event_bus.subscribe()))
    });
    if email_handle.is_none() {
        tracing::info!("SMTP_HOST not set, email delivery disabled");
    }

    // Spawn hourly cleanup of expired refresh sessions.
    let cleanup_handle = background::start_session_cleanup(pool.clone(), task_cancel.clone());

    tracing::info!("Background services started");

    // --- Payment gateway ---
    let payment_client = config
        .payment
        .clone()
        .map(|cfg| Arc::new(payment::PaymentClient::new(cfg)));
    if payment_client.is_none() {
        tracing::info!("PAYMENT_KEY_ID not set, gateway payments disabled");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
        payment: payment_client,
    };

    // --- Router ---
    let app = router::build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the heartbeat and session cleanup tasks.
    task_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), heartbeat_handle).await;

    // Drop the event bus sender to close the broadcast channel.
    // This signals persistence, notifications, and email to shut down.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), persistence_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), router_handle).await;
    if let Some(handle) = email_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Event services shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
}

/// Create the admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD` if it does
/// not exist yet. An existing account with that email is left untouched.
async fn bootstrap_admin(pool: &sagedo_db::DbPool, config: &ServerConfig) {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return;
    };

    use sagedo_db::models::user::CreateUser;
    use sagedo_db::repositories::UserRepo;

    match UserRepo::find_by_email(pool, email).await {
        Ok(Some(_)) => {
            tracing::info!(email = %email, "Admin account already exists");
        }
        Ok(None) => {
            let password_hash = sagedo_api::auth::password::hash_password(password)
                .expect("Failed to hash admin password");
            UserRepo::create(
                pool,
                &CreateUser {
                    email: email.to_lowercase(),
                    password_hash,
                    name: "Admin".to_string(),
                    is_admin: true,
                },
            )
            .await
            .expect("Failed to create admin account");
            tracing::info!(email = %email, "Admin account created");
        }
        Err(e) => panic!("Admin bootstrap query failed: {e}"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
