//! Best-effort user notifications through the bot.

pub struct NotificationService<'a> {
    telegram_client: &'a telegram::Client,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(telegram_client: &'a telegram::Client) -> Self {
        Self { telegram_client }
    }

    /// Send `text` to the private chat with `user_id`.
    ///
    /// Failures are logged and never returned; a missed notification must not undo a
    /// payment state change that already happened.
    pub async fn notify(&self, user_id: i64, text: &str) {
        if let Err(e) = self.telegram_client.send_message(user_id, text).await {
            tracing::warn!(user_id, error = %e, "Failed to notify user");
        }
    }
}
