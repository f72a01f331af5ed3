//! Telegram payloads: signed init data, transactions and webhook updates.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use telegram::model::{
    Chat, Message, PreCheckoutQuery, RefundedPayment, StarTransaction, SuccessfulPayment,
    TransactionPartner, Update, User,
};

use crate::constant::TEST_BOT_TOKEN;

type HmacSha256 = Hmac<Sha256>;

/// A Telegram user as it appears in updates.
pub fn mock_user(user_id: i64) -> User {
    User {
        id: user_id,
        is_bot: false,
        first_name: "Test".to_string(),
        last_name: Some("User".to_string()),
        username: Some("test_user".to_string()),
        language_code: Some("en".to_string()),
        is_premium: None,
    }
}

/// The `user` field of init data, passing every identity validation rule.
pub fn mock_init_data_user(user_id: i64) -> serde_json::Value {
    json!({
        "id": user_id,
        "first_name": "Test",
        "last_name": "User",
        "username": "test_user",
        "language_code": "en",
        "is_premium": true,
        "photo_url": "https://t.me/i/userpic/320/test_user.jpg",
    })
}

/// Sign `fields` the way Telegram signs Mini App init data and return the
/// URL-encoded string including the `hash` field.
pub fn sign_init_data(fields: &[(&str, String)], bot_token: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = fields.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let check_string = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n");

    let mut secret = HmacSha256::new_from_slice(b"WebAppData").unwrap();
    secret.update(bot_token.as_bytes());
    let secret_key = secret.finalize().into_bytes();

    let mut mac = HmacSha256::new_from_slice(&secret_key).unwrap();
    mac.update(check_string.as_bytes());
    let hash = hex::encode(mac.finalize().into_bytes());

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.append_pair("hash", &hash);
    serializer.finish()
}

/// Init data for `user` signed with [`TEST_BOT_TOKEN`].
pub fn mock_init_data_for(user: &serde_json::Value, auth_date: i64) -> String {
    sign_init_data(
        &[
            ("query_id", "AAHdF6IQAAAAAN0XohDhrOrc".to_string()),
            ("user", user.to_string()),
            ("auth_date", auth_date.to_string()),
        ],
        TEST_BOT_TOKEN,
    )
}

/// Fresh init data for `user_id` signed with [`TEST_BOT_TOKEN`].
pub fn mock_init_data(user_id: i64) -> String {
    mock_init_data_for(&mock_init_data_user(user_id), Utc::now().timestamp())
}

/// Incoming star payment from `user_id`.
pub fn mock_incoming_transaction(charge_id: &str, amount: i64, user_id: i64) -> StarTransaction {
    StarTransaction {
        id: charge_id.to_string(),
        amount,
        nanostar_amount: None,
        date: Utc::now().timestamp(),
        source: Some(TransactionPartner::User {
            user: mock_user(user_id),
            invoice_payload: None,
        }),
        receiver: None,
    }
}

/// Outgoing refund of a star payment to `user_id`.
pub fn mock_refund_transaction(charge_id: &str, amount: i64, user_id: i64) -> StarTransaction {
    StarTransaction {
        id: charge_id.to_string(),
        amount,
        nanostar_amount: None,
        date: Utc::now().timestamp(),
        source: None,
        receiver: Some(TransactionPartner::User {
            user: mock_user(user_id),
            invoice_payload: None,
        }),
    }
}

pub fn mock_message(chat_id: i64, text: &str) -> Message {
    Message {
        message_id: 1,
        from: None,
        chat: Chat {
            id: chat_id,
            kind: "private".to_string(),
        },
        date: Utc::now().timestamp(),
        text: Some(text.to_string()),
        successful_payment: None,
        refunded_payment: None,
    }
}

pub fn mock_pre_checkout_update(
    query_id: &str,
    user_id: i64,
    invoice_payload: &str,
    total_amount: i64,
) -> Update {
    Update {
        update_id: 1,
        message: None,
        pre_checkout_query: Some(PreCheckoutQuery {
            id: query_id.to_string(),
            from: mock_user(user_id),
            currency: telegram::STARS_CURRENCY.to_string(),
            total_amount,
            invoice_payload: invoice_payload.to_string(),
        }),
    }
}

pub fn mock_successful_payment_update(
    user_id: i64,
    invoice_payload: &str,
    total_amount: i64,
    charge_id: &str,
) -> Update {
    let mut message = mock_message(user_id, "");
    message.text = None;
    message.from = Some(mock_user(user_id));
    message.successful_payment = Some(SuccessfulPayment {
        currency: telegram::STARS_CURRENCY.to_string(),
        total_amount,
        invoice_payload: invoice_payload.to_string(),
        telegram_payment_charge_id: charge_id.to_string(),
        provider_payment_charge_id: format!("provider-{}", charge_id),
    });

    Update {
        update_id: 2,
        message: Some(message),
        pre_checkout_query: None,
    }
}

pub fn mock_refunded_payment_update(
    user_id: i64,
    invoice_payload: &str,
    total_amount: i64,
    charge_id: &str,
) -> Update {
    let mut message = mock_message(user_id, "");
    message.text = None;
    message.from = Some(mock_user(user_id));
    message.refunded_payment = Some(RefundedPayment {
        currency: telegram::STARS_CURRENCY.to_string(),
        total_amount,
        invoice_payload: invoice_payload.to_string(),
        telegram_payment_charge_id: charge_id.to_string(),
        provider_payment_charge_id: None,
    });

    Update {
        update_id: 3,
        message: Some(message),
        pre_checkout_query: None,
    }
}
