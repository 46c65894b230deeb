//! Send contact request command
//!
//! Persists the submission, then hands the stored record to the notifier on
//! a detached task. The receipt is returned without waiting for delivery.

use serde::{Deserialize, Serialize};
use showroom_common::{types::ContactSubmission, ShowroomError};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{ConnectionRequestStore, StoreError},
    notify::{self, Notifier},
};

/// Acknowledgement text returned to the sender
pub const RECEIPT_MESSAGE: &str = "Your words are in my inbox. Thanks for connecting!";

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SendContactCommand {
    pub submission: ContactSubmission,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum SendContactError {
    #[error(transparent)]
    Invalid(#[from] ShowroomError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip_all, fields(source = ?command.submission.source))]
pub async fn handle(
    store: &dyn ConnectionRequestStore,
    notifier: Arc<dyn Notifier>,
    command: SendContactCommand,
) -> Result<ContactReceipt, SendContactError> {
    let request = command.submission.into_request()?;

    let stored = store.insert_request(request).await?;
    tracing::info!(request_id = %stored.id, "Connection request created");

    let id = stored.id;
    notify::dispatch(notifier, stored);

    Ok(ContactReceipt {
        message: RECEIPT_MESSAGE.to_string(),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::memory::MemoryStore, notify::LogNotifier};

    fn command(message: Option<&str>) -> SendContactCommand {
        SendContactCommand {
            submission: ContactSubmission {
                source: Some("portfolio".into()),
                name: Some("Grace".into()),
                email: Some("grace@example.com".into()),
                message: message.map(str::to_string),
            },
        }
    }

    #[tokio::test]
    async fn test_stores_and_acknowledges() {
        let store = MemoryStore::default();
        let receipt = handle(&store, Arc::new(LogNotifier), command(Some("Let's talk")))
            .await
            .unwrap();

        assert_eq!(receipt.message, RECEIPT_MESSAGE);
        let stored = store.get_request(receipt.id).await.unwrap().unwrap();
        assert_eq!(stored.message, "Let's talk");
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let store = MemoryStore::default();
        let err = handle(&store, Arc::new(LogNotifier), command(None)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: source, name, email, message"
        );
    }
}
