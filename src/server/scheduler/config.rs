pub mod reconciliation {
    /// Cron expression for payment reconciliation
    /// Runs every 30 minutes (00:00, 00:30, 01:00, etc.)
    pub const CRON_EXPRESSION: &str = "0 */30 * * * *";
}

pub mod payment_expiry {
    /// Cron expression for stale invoice expiry
    /// Runs hourly at 15 minutes past the hour, away from reconciliation runs
    pub const CRON_EXPRESSION: &str = "0 15 * * * *";
}
