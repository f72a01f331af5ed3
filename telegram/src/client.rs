use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::Error,
    model::{CreateInvoiceLink, Message, StarAmount, StarTransactions},
    MAX_STAR_TRANSACTIONS_LIMIT,
};

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Bot API response envelope.
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
    parameters: Option<ResponseParameters>,
}

#[derive(Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

/// Telegram Bot API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    bot_token: String,
}

impl std::fmt::Debug for Client {
    // The bot token is a credential and stays out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    api_url: Option<String>,
    bot_token: Option<String>,
}

impl ClientBuilder {
    /// Base URL of the Bot API, defaults to `https://api.telegram.org`.
    pub fn api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.trim_end_matches('/').to_string());
        self
    }

    pub fn bot_token(mut self, bot_token: &str) -> Self {
        self.bot_token = Some(bot_token.to_string());
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let bot_token = self
            .bot_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::ConfigError("bot token is required".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Client {
            http,
            api_url: self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            bot_token,
        })
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Creates a link for an invoice, returning the link URL.
    pub async fn create_invoice_link(&self, params: &CreateInvoiceLink) -> Result<String, Error> {
        self.call("createInvoiceLink", params).await
    }

    /// Refunds a successful payment in Telegram Stars.
    pub async fn refund_star_payment(
        &self,
        user_id: i64,
        telegram_payment_charge_id: &str,
    ) -> Result<bool, Error> {
        self.call(
            "refundStarPayment",
            &json!({
                "user_id": user_id,
                "telegram_payment_charge_id": telegram_payment_charge_id,
            }),
        )
        .await
    }

    /// Returns one page of the bot's star transactions in chronological order,
    /// oldest first.
    ///
    /// `limit` is clamped to the Bot API maximum of 100.
    pub async fn get_star_transactions(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<StarTransactions, Error> {
        self.call(
            "getStarTransactions",
            &json!({
                "offset": offset,
                "limit": limit.clamp(1, MAX_STAR_TRANSACTIONS_LIMIT),
            }),
        )
        .await
    }

    /// Returns the bot's current Telegram Stars balance.
    pub async fn get_my_star_balance(&self) -> Result<StarAmount, Error> {
        self.call("getMyStarBalance", &json!({})).await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, Error> {
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
            }),
        )
        .await
    }

    /// Answers a pre-checkout query. `error_message` is required by Telegram when
    /// `ok` is false.
    pub async fn answer_pre_checkout_query(
        &self,
        pre_checkout_query_id: &str,
        ok: bool,
        error_message: Option<&str>,
    ) -> Result<bool, Error> {
        let mut params = json!({
            "pre_checkout_query_id": pre_checkout_query_id,
            "ok": ok,
        });
        if let Some(message) = error_message {
            params["error_message"] = json!(message);
        }

        self.call("answerPreCheckoutQuery", &params).await
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, Error>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.api_url, self.bot_token, method);

        tracing::debug!(method, "Calling Telegram Bot API");

        // reqwest errors carry the request URL, which embeds the bot token
        let response = self
            .http
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| Error::from(e.without_url()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::from(e.without_url()))?;

        let envelope: ApiResponse<R> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(source) => {
                if !status.is_success() {
                    return Err(Error::HttpError {
                        method: method.to_string(),
                        status: status.as_u16(),
                    });
                }
                return Err(Error::DecodeError {
                    method: method.to_string(),
                    source,
                });
            }
        };

        if !envelope.ok {
            return Err(Error::ApiError {
                method: method.to_string(),
                code: envelope.error_code.unwrap_or(status.as_u16()),
                description: envelope.description.unwrap_or_default(),
                retry_after: envelope.parameters.and_then(|p| p.retry_after),
            });
        }

        match envelope.result {
            Some(result) => Ok(result),
            None => Err(Error::HttpError {
                method: method.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
