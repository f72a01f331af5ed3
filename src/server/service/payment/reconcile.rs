//! Reconciliation of local payments against Telegram's star transaction log.
//!
//! Webhook deliveries can be lost and the refund workflow writes the provider and the
//! database separately, so local payment rows may drift from what Telegram recorded.
//! A reconciliation run pages through recent transactions, derives a verdict for
//! every local payment with a charge ID and applies the differences that are legal
//! status transitions. Any other difference is reported as a conflict.

use std::{collections::HashMap, time::Duration};

use chrono::Utc;
use entity::payment::PaymentStatus;
use sea_orm::DatabaseConnection;
use telegram::model::StarTransaction;
use tokio::time::Instant;

use crate::{
    model::payment::{
        ReconciliationAnomaly, ReconciliationConflict, ReconciliationCounts,
        ReconciliationItemError,
        ReconciliationSummary, ReconciliationUpdate,
    },
    server::{
        data::{payment::PaymentRepository, post::PostRepository},
        error::{payment::PaymentError, Error},
        model::db::PaymentModel,
    },
};

/// Only payments created within this many days are reconciled.
pub const LOOKBACK_DAYS: i64 = 30;

pub const DEFAULT_PAGE_LIMIT: u32 = telegram::MAX_STAR_TRANSACTIONS_LIMIT;
pub const DEFAULT_MAX_PAGES: u32 = 10;
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Status a provider transaction implies for its local payment, if any.
///
/// A negative amount or a receiver means the stars went back to the user; a positive
/// amount paid by a source means the payment went through.
pub fn transaction_verdict(transaction: &StarTransaction) -> Option<PaymentStatus> {
    if transaction.amount < 0 || transaction.receiver.is_some() {
        Some(PaymentStatus::Refunded)
    } else if transaction.amount > 0 && transaction.source.is_some() {
        Some(PaymentStatus::Succeeded)
    } else {
        None
    }
}

/// Transactions fetched by one run.
struct FetchedTransactions {
    transactions: Vec<StarTransaction>,
    /// Paging stopped early; the newest transactions may be missing
    possibly_incomplete: bool,
}

pub struct ReconciliationService<'a> {
    db: &'a DatabaseConnection,
    telegram_client: &'a telegram::Client,
    page_limit: u32,
    max_pages: u32,
    deadline: Duration,
}

impl<'a> ReconciliationService<'a> {
    /// Creates a new instance of [`ReconciliationService`] fetching up to 10 pages of
    /// 100 transactions within 30 seconds.
    pub fn new(db: &'a DatabaseConnection, telegram_client: &'a telegram::Client) -> Self {
        Self {
            db,
            telegram_client,
            page_limit: DEFAULT_PAGE_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_paging(mut self, page_limit: u32, max_pages: u32) -> Self {
        self.page_limit = page_limit.clamp(1, telegram::MAX_STAR_TRANSACTIONS_LIMIT);
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Runs one reconciliation pass.
    ///
    /// Failures while updating a single payment are recorded in the summary and the
    /// pass continues with the next payment.
    ///
    /// # Returns
    /// - `Ok(ReconciliationSummary)` - Pass completed, possibly with per-payment errors
    /// - `Err(Error)` - Transactions or local payments could not be loaded
    pub async fn reconcile(&self) -> Result<ReconciliationSummary, Error> {
        let fetched = self.fetch_transactions().await?;

        let since = Utc::now().naive_utc() - chrono::Duration::days(LOOKBACK_DAYS);
        let payments = PaymentRepository::new(self.db)
            .get_created_since(since)
            .await?;

        let mut by_charge_id: HashMap<&str, &StarTransaction> = HashMap::new();
        for transaction in &fetched.transactions {
            by_charge_id
                .entry(transaction.id.as_str())
                .and_modify(|existing| {
                    // A refund shares the charge ID of the payment it reverses
                    if transaction_verdict(transaction) == Some(PaymentStatus::Refunded) {
                        *existing = transaction;
                    }
                })
                .or_insert(transaction);
        }

        let mut summary = ReconciliationSummary {
            possibly_incomplete: fetched.possibly_incomplete,
            transactions_fetched: fetched.transactions.len(),
            ..Default::default()
        };

        for payment in payments {
            let Some(charge_id) = payment.telegram_payment_charge_id.clone() else {
                continue;
            };

            let Some(transaction) = by_charge_id.get(charge_id.as_str()) else {
                if payment.status == PaymentStatus::Succeeded {
                    summary.not_found.push(ReconciliationAnomaly {
                        payment_id: payment.id,
                        telegram_payment_charge_id: charge_id,
                    });
                }
                continue;
            };

            let Some(verdict) = transaction_verdict(transaction) else {
                continue;
            };

            if verdict == payment.status {
                summary.unchanged.push(payment.id);
                continue;
            }

            if !payment.status.can_transition_to(verdict) {
                tracing::warn!(
                    payment_id = %payment.id,
                    local_status = %payment.status,
                    provider_status = %verdict,
                    "Provider status is not a legal transition, leaving payment unchanged"
                );
                summary.conflicts.push(ReconciliationConflict {
                    payment_id: payment.id,
                    local_status: payment.status,
                    provider_status: verdict,
                });
                continue;
            }

            let old_status = payment.status;
            match self.apply_verdict(&payment, verdict).await {
                Ok(()) => {
                    tracing::info!(
                        payment_id = %payment.id,
                        old_status = %old_status,
                        new_status = %verdict,
                        "Reconciled payment status"
                    );
                    summary.updated.push(ReconciliationUpdate {
                        payment_id: payment.id,
                        old_status,
                        new_status: verdict,
                    });
                }
                Err(e) => {
                    tracing::error!(
                        payment_id = %payment.id,
                        error = %e,
                        "Failed to reconcile payment"
                    );
                    summary.errors.push(ReconciliationItemError {
                        payment_id: payment.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        summary.counts = ReconciliationCounts {
            updated: summary.updated.len(),
            unchanged: summary.unchanged.len(),
            not_found: summary.not_found.len(),
            conflicts: summary.conflicts.len(),
            errors: summary.errors.len(),
        };

        if summary.possibly_incomplete {
            tracing::warn!(
                transactions = summary.transactions_fetched,
                "Reconciliation stopped paging early, newer payments may be missed"
            );
        }

        tracing::info!(
            updated = summary.counts.updated,
            unchanged = summary.counts.unchanged,
            not_found = summary.counts.not_found,
            conflicts = summary.counts.conflicts,
            errors = summary.counts.errors,
            "Reconciliation finished"
        );

        Ok(summary)
    }

    async fn apply_verdict(&self, payment: &PaymentModel, verdict: PaymentStatus) -> Result<(), Error> {
        PaymentRepository::new(self.db)
            .update_status(&payment.id, verdict, None, None)
            .await?
            .ok_or_else(|| PaymentError::PaymentNotFound(payment.id.clone()))?;

        if verdict == PaymentStatus::Refunded {
            PostRepository::new(self.db)
                .revoke_premium(payment.post_id, &payment.id)
                .await?;
        }

        Ok(())
    }

    /// Pages through transactions until a short page, the page ceiling or the deadline.
    ///
    /// Pages come oldest first, so stopping early drops the newest transactions.
    async fn fetch_transactions(&self) -> Result<FetchedTransactions, Error> {
        let started = Instant::now();
        let mut transactions = Vec::new();
        let mut offset = 0;

        for _ in 0..self.max_pages {
            let elapsed = started.elapsed();
            if elapsed >= self.deadline {
                return Ok(FetchedTransactions {
                    transactions,
                    possibly_incomplete: true,
                });
            }
            let remaining = self.deadline - elapsed;

            let page = match tokio::time::timeout(
                remaining,
                self.telegram_client
                    .get_star_transactions(offset, self.page_limit),
            )
            .await
            {
                Ok(page) => page?.transactions,
                Err(_) => {
                    return Ok(FetchedTransactions {
                        transactions,
                        possibly_incomplete: true,
                    })
                }
            };

            let page_len = page.len();
            transactions.extend(page);

            if page_len < self.page_limit as usize {
                return Ok(FetchedTransactions {
                    transactions,
                    possibly_incomplete: false,
                });
            }

            offset += page_len as u32;
        }

        // Every page was full, more may remain
        Ok(FetchedTransactions {
            transactions,
            possibly_incomplete: true,
        })
    }
}
