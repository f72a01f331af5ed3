//! Applies payment updates delivered by the Telegram webhook.
//!
//! Telegram may deliver an update more than once, so every handler checks the payment
//! can legally move to the new status and ignores the update otherwise.

use entity::payment::PaymentStatus;
use sea_orm::DatabaseConnection;
use telegram::model::{PreCheckoutQuery, RefundedPayment, SuccessfulPayment, Update};

use crate::server::{
    data::{
        payment::{ChargeIds, PaymentRepository},
        post::PostRepository,
    },
    error::Error,
    model::{db::PaymentModel, payment::InvoicePayload},
    service::notification::NotificationService,
};

/// What the webhook did with an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Pre-checkout query answered with the given verdict
    PreCheckoutAnswered { approved: bool },
    PaymentSucceeded { payment_id: String },
    PaymentRefunded { payment_id: String },
    /// Update carried nothing to act on or would have been an illegal transition
    Ignored,
}

pub struct WebhookService<'a> {
    db: &'a DatabaseConnection,
    telegram_client: &'a telegram::Client,
}

impl<'a> WebhookService<'a> {
    /// Creates a new instance of [`WebhookService`]
    pub fn new(db: &'a DatabaseConnection, telegram_client: &'a telegram::Client) -> Self {
        Self {
            db,
            telegram_client,
        }
    }

    pub async fn handle_update(&self, update: &Update) -> Result<WebhookOutcome, Error> {
        if let Some(query) = &update.pre_checkout_query {
            return self.handle_pre_checkout_query(query).await;
        }

        let Some(message) = &update.message else {
            return Ok(WebhookOutcome::Ignored);
        };

        if let Some(payment) = &message.successful_payment {
            let raw_update = serde_json::to_string(update)?;
            return self.handle_successful_payment(payment, raw_update).await;
        }

        if let Some(refund) = &message.refunded_payment {
            return self.handle_refunded_payment(refund).await;
        }

        Ok(WebhookOutcome::Ignored)
    }

    /// Approves the checkout iff the payment exists, is unpaid and the amount matches.
    async fn handle_pre_checkout_query(
        &self,
        query: &PreCheckoutQuery,
    ) -> Result<WebhookOutcome, Error> {
        let rejection = match self.find_by_payload(&query.invoice_payload).await? {
            None => Some("This invoice is no longer valid."),
            Some(payment)
                if !matches!(payment.status, PaymentStatus::Created | PaymentStatus::Pending) =>
            {
                Some("This invoice has already been processed.")
            }
            Some(payment)
                if query.currency != telegram::STARS_CURRENCY
                    || query.total_amount != payment.star_amount as i64 =>
            {
                Some("The invoice amount does not match.")
            }
            Some(payment) => {
                if payment.status == PaymentStatus::Created {
                    PaymentRepository::new(self.db)
                        .update_status(&payment.id, PaymentStatus::Pending, None, None)
                        .await?;
                }
                None
            }
        };

        self.telegram_client
            .answer_pre_checkout_query(&query.id, rejection.is_none(), rejection)
            .await?;

        if let Some(reason) = rejection {
            tracing::warn!(query_id = %query.id, reason, "Rejected pre-checkout query");
        }

        Ok(WebhookOutcome::PreCheckoutAnswered {
            approved: rejection.is_none(),
        })
    }

    async fn handle_successful_payment(
        &self,
        successful_payment: &SuccessfulPayment,
        raw_update: String,
    ) -> Result<WebhookOutcome, Error> {
        let Some(payment) = self
            .find_by_payload(&successful_payment.invoice_payload)
            .await?
        else {
            tracing::warn!(
                charge_id = %successful_payment.telegram_payment_charge_id,
                "Successful payment for unknown invoice"
            );
            return Ok(WebhookOutcome::Ignored);
        };

        if !payment.status.can_transition_to(PaymentStatus::Succeeded) {
            tracing::warn!(
                payment_id = %payment.id,
                status = %payment.status,
                "Ignoring successful payment for payment that cannot succeed"
            );
            return Ok(WebhookOutcome::Ignored);
        }

        let charge_ids = ChargeIds {
            telegram_payment_charge_id: successful_payment.telegram_payment_charge_id.clone(),
            provider_payment_charge_id: Some(
                successful_payment.provider_payment_charge_id.clone(),
            )
            .filter(|id| !id.is_empty()),
        };

        PaymentRepository::new(self.db)
            .update_status(
                &payment.id,
                PaymentStatus::Succeeded,
                Some(charge_ids),
                Some(raw_update),
            )
            .await?;

        PostRepository::new(self.db)
            .grant_premium(payment.post_id, &payment.id, payment.star_amount)
            .await?;

        tracing::info!(
            payment_id = %payment.id,
            post_id = payment.post_id,
            "Payment succeeded"
        );

        NotificationService::new(self.telegram_client)
            .notify(
                payment.user_id,
                &format!(
                    "Thank you! Post #{} is now premium with {} stars.",
                    payment.post_id, payment.star_amount
                ),
            )
            .await;

        Ok(WebhookOutcome::PaymentSucceeded {
            payment_id: payment.id,
        })
    }

    async fn handle_refunded_payment(
        &self,
        refunded_payment: &RefundedPayment,
    ) -> Result<WebhookOutcome, Error> {
        let Some(payment) = PaymentRepository::new(self.db)
            .get_by_telegram_charge_id(&refunded_payment.telegram_payment_charge_id)
            .await?
        else {
            tracing::warn!(
                charge_id = %refunded_payment.telegram_payment_charge_id,
                "Refund for unknown charge"
            );
            return Ok(WebhookOutcome::Ignored);
        };

        if !payment.status.can_transition_to(PaymentStatus::Refunded) {
            tracing::debug!(
                payment_id = %payment.id,
                status = %payment.status,
                "Ignoring refund for payment that is not succeeded"
            );
            return Ok(WebhookOutcome::Ignored);
        }

        PaymentRepository::new(self.db)
            .update_status(&payment.id, PaymentStatus::Refunded, None, None)
            .await?;

        PostRepository::new(self.db)
            .revoke_premium(payment.post_id, &payment.id)
            .await?;

        tracing::info!(payment_id = %payment.id, "Payment refunded");

        NotificationService::new(self.telegram_client)
            .notify(
                payment.user_id,
                &format!(
                    "Your payment of {} stars for post #{} has been refunded.",
                    payment.star_amount, payment.post_id
                ),
            )
            .await;

        Ok(WebhookOutcome::PaymentRefunded {
            payment_id: payment.id,
        })
    }

    async fn find_by_payload(&self, invoice_payload: &str) -> Result<Option<PaymentModel>, Error> {
        let payload: InvoicePayload = match serde_json::from_str(invoice_payload) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable invoice payload");
                return Ok(None);
            }
        };

        let payment = PaymentRepository::new(self.db)
            .get_by_id(&payload.payment_id)
            .await?;

        match payment {
            Some(payment)
                if payment.post_id != payload.post_id || payment.user_id != payload.user_id =>
            {
                tracing::warn!(
                    payment_id = %payment.id,
                    "Invoice payload does not match the stored payment"
                );
                Ok(None)
            }
            payment => Ok(payment),
        }
    }
}
