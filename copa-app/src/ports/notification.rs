use thiserror::Error;

/// Fire-and-forget message delivery. Callers treat a failed send as
/// non-fatal.
pub trait NotificationPort {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendNotificationError>;

    /// Sends the same message to every recipient in order. A failed send does
    /// not stop the remaining ones; the first failure is returned.
    fn send_bulk(
        &self,
        recipients: &[&str],
        subject: &str,
        body: &str,
    ) -> Result<(), SendNotificationError> {
        let mut first_error = None;
        for to in recipients {
            if let Err(e) = self.send(to, subject, body) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[derive(Debug, Clone, Error)]
pub enum SendNotificationError {
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("notifier unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockNotificationPort;

    #[test]
    fn test_send_bulk_reaches_every_recipient() {
        let notifier = MockNotificationPort::new();
        notifier
            .send_bulk(&["a@example.com", "b@example.com"], "Aviso", "Corpo")
            .unwrap();

        let sent = notifier.sent();
        let recipients: Vec<&str> = sent.iter().map(|n| n.to.as_str()).collect();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
        assert!(sent.iter().all(|n| n.subject == "Aviso" && n.body == "Corpo"));
    }

    #[test]
    fn test_send_bulk_reports_failure() {
        let notifier = MockNotificationPort::unavailable();
        assert!(matches!(
            notifier.send_bulk(&["a@example.com"], "Aviso", "Corpo"),
            Err(SendNotificationError::Unavailable(_))
        ));
        assert!(notifier.send_bulk(&[], "Aviso", "Corpo").is_ok());
    }
}
