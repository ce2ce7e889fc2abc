use std::sync::Arc;

use shelter_core::clock::Clock;

use crate::config::ServerConfig;
use crate::mail::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shelter_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "now" for dates, lockouts and completion stamps.
    pub clock: Arc<dyn Clock>,
    /// SMTP mailer, absent when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
