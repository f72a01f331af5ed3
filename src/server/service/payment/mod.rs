//! Payment ledger: invoices, status changes, refunds and stale invoice expiry.

pub mod balance;
pub mod reconcile;
pub mod webhook;


use chrono::{NaiveDateTime, Utc};
use entity::payment::PaymentStatus;
use sea_orm::DatabaseConnection;
use telegram::model::{CreateInvoiceLink, LabeledPrice};

use crate::server::{
    data::{
        payment::{ChargeIds, PaymentRepository},
        post::PostRepository,
    },
    error::{payment::PaymentError, Error},
    model::{
        db::{PaymentModel, PostModel},
        payment::InvoicePayload,
    },
    service::{notification::NotificationService, retry::RetryContext},
};

pub const MIN_STAR_AMOUNT: i32 = 1;
pub const MAX_STAR_AMOUNT: i32 = 10;

/// Refunds are only possible this long after the payment was created.
pub const REFUND_WINDOW_HOURS: i64 = 168;

/// Invoices still unpaid after this long are marked failed.
pub const STALE_PAYMENT_HOURS: i64 = 24;

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    telegram_client: &'a telegram::Client,
    retry: RetryContext,
}

impl<'a> PaymentService<'a> {
    /// Creates a new instance of [`PaymentService`]
    pub fn new(db: &'a DatabaseConnection, telegram_client: &'a telegram::Client) -> Self {
        Self {
            db,
            telegram_client,
            retry: RetryContext::new(),
        }
    }

    /// Replaces the retry policy used for refunds.
    pub fn with_retry(mut self, retry: RetryContext) -> Self {
        self.retry = retry;
        self
    }

    /// Checks `post_id` exists, belongs to `user_id` and can be paid for.
    ///
    /// # Returns
    /// - `Ok(PostModel)` - Post may receive a new premium payment
    /// - `Err(PaymentError::PostNotFound)` - No such post
    /// - `Err(PaymentError::PostNotOwned)` - Post belongs to another user
    /// - `Err(PaymentError::PostAlreadyPremium)` - Post already has an active premium payment
    /// - `Err(PaymentError::PaymentAlreadyPending)` - An invoice for the post is outstanding
    pub async fn ensure_post_payable(&self, user_id: i64, post_id: i32) -> Result<PostModel, Error> {
        let post = PostRepository::new(self.db)
            .get_by_id(post_id)
            .await?
            .ok_or(PaymentError::PostNotFound(post_id))?;

        if post.user_id != user_id {
            return Err(PaymentError::PostNotOwned(post_id).into());
        }
        if post.is_premium() {
            return Err(PaymentError::PostAlreadyPremium(post_id).into());
        }
        if post.payment_pending {
            return Err(PaymentError::PaymentAlreadyPending(post_id).into());
        }

        Ok(post)
    }

    /// Creates a payment and its Stars invoice link.
    ///
    /// The caller has already checked the post with [`Self::ensure_post_payable`]. When
    /// the invoice cannot be created the payment is marked `failed` and the Bot API
    /// error is returned without retrying.
    ///
    /// # Returns
    /// - `Ok((PaymentModel, String))` - The `created` payment and the invoice URL
    /// - `Err(PaymentError::InvalidStarAmount)` - Amount outside 1..=10
    /// - `Err(Error::TelegramError)` - Invoice creation failed
    pub async fn create_payment(
        &self,
        user_id: i64,
        post_id: i32,
        star_amount: i32,
    ) -> Result<(PaymentModel, String), Error> {
        if !(MIN_STAR_AMOUNT..=MAX_STAR_AMOUNT).contains(&star_amount) {
            return Err(PaymentError::InvalidStarAmount(star_amount).into());
        }

        let payment_repository = PaymentRepository::new(self.db);

        let payment_id = uuid::Uuid::new_v4().to_string();
        let payload = serde_json::to_string(&InvoicePayload {
            post_id,
            user_id,
            payment_id: payment_id.clone(),
            timestamp: Utc::now().timestamp_millis(),
        })?;

        let payment = payment_repository
            .create(&payment_id, &payload, user_id, post_id, star_amount)
            .await?;

        let invoice = CreateInvoiceLink {
            title: format!("Premium post #{}", post_id),
            description: format!(
                "Feature post #{} as premium for {} stars",
                post_id, star_amount
            ),
            payload,
            provider_token: String::new(),
            currency: telegram::STARS_CURRENCY.to_string(),
            prices: vec![LabeledPrice {
                label: "Premium post".to_string(),
                amount: star_amount as i64,
            }],
        };

        let invoice_url = match self.telegram_client.create_invoice_link(&invoice).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(
                    payment_id = %payment_id,
                    error = %e,
                    "Failed to create invoice link"
                );
                payment_repository
                    .update_status(&payment_id, PaymentStatus::Failed, None, None)
                    .await?;
                return Err(e.into());
            }
        };

        PostRepository::new(self.db)
            .set_payment_pending(post_id, true)
            .await?;

        tracing::info!(
            payment_id = %payment_id,
            post_id,
            user_id,
            star_amount,
            "Created payment"
        );

        Ok((payment, invoice_url))
    }

    /// Overwrites the status of a payment without checking the transition.
    ///
    /// # Returns
    /// - `Ok(PaymentModel)` - The updated payment
    /// - `Err(PaymentError::PaymentNotFound)` - No payment with that ID
    pub async fn update_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        charge_ids: Option<ChargeIds>,
        raw_update: Option<String>,
    ) -> Result<PaymentModel, Error> {
        let payment = PaymentRepository::new(self.db)
            .update_status(payment_id, status, charge_ids, raw_update)
            .await?
            .ok_or_else(|| PaymentError::PaymentNotFound(payment_id.to_string()))?;

        tracing::debug!(payment_id, status = %status, "Updated payment status");

        Ok(payment)
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentModel, Error> {
        PaymentRepository::new(self.db)
            .get_by_id(payment_id)
            .await?
            .ok_or_else(|| PaymentError::PaymentNotFound(payment_id.to_string()).into())
    }

    /// Payments of `user_id`, newest first.
    pub async fn list_user_payments(&self, user_id: i64) -> Result<Vec<PaymentModel>, Error> {
        Ok(PaymentRepository::new(self.db)
            .get_by_user_id(user_id)
            .await?)
    }

    /// Refunds a payment through the Bot API.
    ///
    /// Only checks eligibility and performs the provider call; the local status is left
    /// untouched. Transient provider failures are retried per the retry context.
    ///
    /// # Returns
    /// - `Ok(())` - Telegram accepted the refund
    /// - `Err(PaymentError::PaymentNotFound)` - No payment with that ID
    /// - `Err(PaymentError::RefundNotEligible)` - Eligibility rules failed, nothing was sent
    /// - `Err(Error::TelegramError)` - Refund failed permanently or after all attempts
    pub async fn refund_payment(&self, payment_id: &str) -> Result<(), Error> {
        let payment = self.get_payment(payment_id).await?;
        let charge_id = check_refund_eligibility(&payment, Utc::now().naive_utc())?;

        let description = format!("refund for payment ID {}", payment_id);
        self.retry
            .execute_with_retry(&description, || async {
                self.telegram_client
                    .refund_star_payment(payment.user_id, charge_id)
                    .await
                    .map_err(Error::from)
            })
            .await?;

        tracing::info!(payment_id, user_id = payment.user_id, "Refunded payment");

        Ok(())
    }

    /// Refunds a payment, marks it `refunded`, revokes the post's premium status and
    /// tells the user.
    ///
    /// A refund Telegram reports as already done counts as success so a retried
    /// workflow converges. If the process stops between the refund and the local
    /// update, reconciliation applies the local update later.
    pub async fn refund_and_revoke(&self, payment_id: &str) -> Result<PaymentModel, Error> {
        match self.refund_payment(payment_id).await {
            Ok(()) => {}
            Err(e) if e.is_already_refunded() => {
                tracing::warn!(
                    payment_id,
                    "Telegram reports payment as already refunded, updating local state"
                );
            }
            Err(e) => return Err(e),
        }

        let payment = self
            .update_status(payment_id, PaymentStatus::Refunded, None, None)
            .await?;

        PostRepository::new(self.db)
            .revoke_premium(payment.post_id, &payment.id)
            .await?;

        NotificationService::new(self.telegram_client)
            .notify(
                payment.user_id,
                &format!(
                    "Your payment of {} stars for post #{} has been refunded.",
                    payment.star_amount, payment.post_id
                ),
            )
            .await;

        Ok(payment)
    }

    /// Marks invoices unpaid for longer than [`STALE_PAYMENT_HOURS`] as `failed` and
    /// clears their post's pending flag.
    ///
    /// Returns the number of payments expired.
    pub async fn expire_stale_payments(&self) -> Result<usize, Error> {
        let cutoff = Utc::now().naive_utc() - chrono::Duration::hours(STALE_PAYMENT_HOURS);

        let payment_repository = PaymentRepository::new(self.db);
        let post_repository = PostRepository::new(self.db);

        let stale = payment_repository.get_unsettled_before(cutoff).await?;
        let mut expired = 0;

        for payment in stale {
            payment_repository
                .update_status(&payment.id, PaymentStatus::Failed, None, None)
                .await?;
            post_repository
                .set_payment_pending(payment.post_id, false)
                .await?;

            tracing::debug!(payment_id = %payment.id, "Expired stale payment");
            expired += 1;
        }

        if expired > 0 {
            tracing::info!(expired, "Expired stale payments");
        }

        Ok(expired)
    }
}

/// Checks a payment may be refunded as of `now`, returning its Telegram charge ID.
///
/// A payment is refundable when it `succeeded`, was created no more than
/// [`REFUND_WINDOW_HOURS`] ago and carries a Telegram charge ID.
pub fn check_refund_eligibility(
    payment: &PaymentModel,
    now: NaiveDateTime,
) -> Result<&str, PaymentError> {
    if payment.status != PaymentStatus::Succeeded {
        return Err(PaymentError::RefundNotEligible(format!(
            "payment status is {}",
            payment.status
        )));
    }

    if now - payment.created_at > chrono::Duration::hours(REFUND_WINDOW_HOURS) {
        return Err(PaymentError::RefundNotEligible(format!(
            "refund window of {} hours has passed",
            REFUND_WINDOW_HOURS
        )));
    }

    payment
        .telegram_payment_charge_id
        .as_deref()
        .filter(|charge_id| !charge_id.is_empty())
        .ok_or_else(|| PaymentError::RefundNotEligible("missing charge ID".to_string()))
}
