use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use shelter_core::clock::{Clock, SystemClock};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelter_api::background::daily_tasks::{DailyTaskJob, PgDailyTaskStore};
use shelter_api::config::{BootstrapAdminConfig, ServerConfig};
use shelter_api::mail::Mailer;
use shelter_api::router::build_app_router;
use shelter_api::state::AppState;

/// How long shutdown waits for the daily task job to stop.
const JOB_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = shelter_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    shelter_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    shelter_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if let Some(admin) = BootstrapAdminConfig::from_env() {
        shelter_api::bootstrap::ensure_admin(&pool, &admin, config.accounts.min_password_length)
            .await
            .expect("Failed to create bootstrap admin");
    }

    // --- Mail ---
    let mailer = config.email.as_ref().map(|email| {
        tracing::info!(smtp_host = %email.smtp_host, "SMTP delivery enabled");
        Arc::new(Mailer::new(email).expect("Invalid SMTP configuration"))
    });
    if mailer.is_none() {
        tracing::warn!("SMTP_HOST not set, password reset mails will not be sent");
    }

    // --- App state ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        clock: Arc::clone(&clock),
        mailer,
    };

    // --- Daily task job ---
    let job_cancel = CancellationToken::new();
    let job_handle = if config.daily_tasks.enabled {
        let job = DailyTaskJob::new(
            PgDailyTaskStore::new(pool.clone()),
            Arc::clone(&clock),
            config.daily_tasks.run_at,
        );
        let cancel = job_cancel.clone();
        Some(tokio::spawn(async move { job.run(cancel).await }))
    } else {
        tracing::info!("Daily task job disabled");
        None
    };

    // --- Router ---
    let app = build_app_router(state, &config);

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

    job_cancel.cancel();
    if let Some(handle) = job_handle {
        if tokio::time::timeout(JOB_SHUTDOWN_TIMEOUT, handle).await.is_err() {
            tracing::warn!("Daily task job did not stop in time");
        } else {
            tracing::info!("Daily task job stopped");
        }
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelter_api=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for SIGINT or SIGTERM (on Unix) to initiate graceful shutdown.
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
