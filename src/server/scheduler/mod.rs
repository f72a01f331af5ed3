//! Scheduler for periodic payment maintenance.
//!
//! Runs reconciliation against Telegram's transaction log and expires invoices that
//! were never paid. Job failures are logged; they never stop the scheduler.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::Error,
    service::payment::{reconcile::ReconciliationService, PaymentService},
};

pub mod config;

#[cfg(test)]
mod tests;

use self::config::{payment_expiry as payment_expiry_config, reconciliation as reconciliation_config};

/// Reconcile recent payments, returning the number of payments updated.
pub async fn run_reconciliation(
    db: DatabaseConnection,
    telegram_client: telegram::Client,
) -> Result<usize, Error> {
    let summary = ReconciliationService::new(&db, &telegram_client)
        .reconcile()
        .await?;

    for error in &summary.errors {
        tracing::warn!(
            payment_id = %error.payment_id,
            error = %error.error,
            "Payment could not be reconciled"
        );
    }

    Ok(summary.counts.updated)
}

/// Expire stale invoices, returning the number of payments expired.
pub async fn run_payment_expiry(
    db: DatabaseConnection,
    telegram_client: telegram::Client,
) -> Result<usize, Error> {
    PaymentService::new(&db, &telegram_client)
        .expire_stale_payments()
        .await
}

/// Job scheduler for payment maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    telegram_client: telegram::Client,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, telegram_client: telegram::Client) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            db,
            telegram_client,
            sched,
        })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Payment reconciliation every 30 minutes
    /// - Stale invoice expiry every hour
    ///
    /// # Returns
    /// - `Ok(())` - All jobs successfully registered and scheduler started
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            reconciliation_config::CRON_EXPRESSION,
            "payment reconciliation",
            run_reconciliation,
        )
        .await?;

        self.schedule_job(
            payment_expiry_config::CRON_EXPRESSION,
            "stale payment expiry",
            run_payment_expiry,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// On execution the job logs how many payments it changed, or the error it failed
    /// with.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds (e.g., "0 0 * * * *" for hourly)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job returning the number of payments it changed
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection, telegram::Client) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let job = build_job(
            cron,
            name,
            self.db.clone(),
            self.telegram_client.clone(),
            function,
        )?;
        self.sched.add(job).await?;

        Ok(())
    }
}

fn build_job<F, Fut>(
    cron: &str,
    name: &str,
    db: DatabaseConnection,
    telegram_client: telegram::Client,
    function: F,
) -> Result<Job, Error>
where
    F: Fn(DatabaseConnection, telegram::Client) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
{
    let name = name.to_string();
    let function = Arc::new(function);

    let job = Job::new_async(cron, move |_, _| {
        let db = db.clone();
        let telegram_client = telegram_client.clone();
        let name = name.clone();
        let function = Arc::clone(&function);

        Box::pin(async move {
            match function(db, telegram_client).await {
                Ok(count) => tracing::info!("Finished {}: {} payment(s) changed", name, count),
                Err(e) => tracing::error!("Error running {}: {:?}", name, e),
            }
        })
    })?;

    Ok(job)
}
