//! Background tasks and scheduled jobs.
//!
//! Each submodule provides a long-running async job intended to be spawned
//! via `tokio::spawn`. All jobs accept a [`CancellationToken`] for graceful
//! shutdown.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod daily_tasks;
