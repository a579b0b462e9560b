use copa_app::ports::notification::{NotificationPort, SendNotificationError};

/// Notifier that writes each message to the log instead of delivering it.
pub struct LogNotificationAdapter {
    target: &'static str,
}

impl LogNotificationAdapter {
    pub fn new() -> Self {
        Self { target: "notify" }
    }
}

impl Default for LogNotificationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPort for LogNotificationAdapter {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendNotificationError> {
        if to.trim().is_empty() {
            return Err(SendNotificationError::InvalidRecipient(to.to_string()));
        }
        log::info!(
            target: self.target,
            "[NOTIFY] Para: {} | Assunto: {}\n{}\n",
            to,
            subject,
            body
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_recipient() {
        let adapter = LogNotificationAdapter::new();
        assert!(matches!(
            adapter.send("  ", "Assunto", "Corpo"),
            Err(SendNotificationError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn test_accepts_any_non_blank_recipient() {
        let adapter = LogNotificationAdapter::new();
        assert!(adapter.send("organizers@copapab.local", "Assunto", "Corpo").is_ok());
        assert!(adapter.send("+55 11 99999-0000", "Assunto", "Corpo").is_ok());
    }

    #[test]
    fn test_bulk_continues_past_blank_recipient() {
        let adapter = LogNotificationAdapter::new();
        let result = adapter.send_bulk(&["", "ana@example.com", " "], "Assunto", "Corpo");
        assert!(matches!(
            result,
            Err(SendNotificationError::InvalidRecipient(to)) if to.is_empty()
        ));
    }
}
