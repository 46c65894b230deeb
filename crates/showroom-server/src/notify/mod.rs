//! Operator notifications for new contact requests
//!
//! Delivery is best-effort: [`dispatch`] runs the notifier on a detached task,
//! logs the outcome, and never reports back to the request that triggered it.

pub mod telegram;

use async_trait::async_trait;
use showroom_common::types::ConnectionRequest;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::Config;

pub use telegram::TelegramNotifier;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    async fn notify(&self, request: &ConnectionRequest) -> Result<(), NotifyError>;
}

/// Notifier that only writes the request to the log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, request: &ConnectionRequest) -> Result<(), NotifyError> {
        tracing::info!(
            request_id = %request.id,
            source = %request.source,
            name = %request.name,
            email = %request.email,
            "New contact request"
        );
        Ok(())
    }
}

/// Pick the notifier backend from configuration
pub fn from_config(config: &Config) -> Result<Arc<dyn Notifier>, NotifyError> {
    match &config.telegram {
        Some(telegram) => Ok(Arc::new(TelegramNotifier::new(telegram.clone())?)),
        None => {
            tracing::warn!(
                "Telegram credentials not configured, contact requests will only be logged"
            );
            Ok(Arc::new(LogNotifier))
        },
    }
}

/// Send the notification on a detached task.
///
/// The returned handle may be dropped; failures are logged inside the task.
pub fn dispatch(notifier: Arc<dyn Notifier>, request: ConnectionRequest) -> JoinHandle<()> {
    let span = tracing::info_span!("notify", backend = notifier.name(), request_id = %request.id);

    tokio::spawn(
        async move {
            match notifier.notify(&request).await {
                Ok(()) => tracing::info!("Contact notification sent"),
                Err(e) => tracing::error!(error = %e, "Failed to send contact notification"),
            }
        }
        .instrument(span),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct Counting(AtomicUsize);

    #[async_trait]
    impl Notifier for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn notify(&self, _request: &ConnectionRequest) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError::Rejected {
                status: 500,
                body: "down".into(),
            })
        }
    }

    fn request() -> ConnectionRequest {
        ConnectionRequest {
            id: Uuid::new_v4(),
            source: "portfolio".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let notifier = Arc::new(Counting(AtomicUsize::new(0)));
        dispatch(notifier.clone(), request()).await.unwrap();
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        assert!(LogNotifier.notify(&request()).await.is_ok());
    }

    #[test]
    fn test_from_config_without_telegram_logs_only() {
        let notifier = from_config(&Config::default()).unwrap();
        assert_eq!(notifier.name(), "log");
    }
}
