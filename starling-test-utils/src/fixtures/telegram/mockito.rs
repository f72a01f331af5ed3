//! Bot API mock endpoint creation.
//!
//! Every endpoint answers with the Bot API `{ok, result}` envelope and verifies it was
//! called exactly `expected_requests` times.

use mockito::{Matcher, Mock};
use serde_json::json;
use telegram::model::StarTransaction;

use crate::{
    constant::TEST_INVOICE_URL,
    fixtures::telegram::{bot_method_path, factory, TelegramFixtures},
};

impl<'a> TelegramFixtures<'a> {
    fn ok_endpoint(
        &mut self,
        method: &str,
        body_matcher: Option<Matcher>,
        result: serde_json::Value,
        expected_requests: usize,
    ) -> Mock {
        let mut mock = self
            .test
            .server
            .mock("POST", bot_method_path(method).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "ok": true, "result": result }).to_string());

        if let Some(matcher) = body_matcher {
            mock = mock.match_body(matcher);
        }

        mock.expect(expected_requests).create()
    }

    /// `createInvoiceLink` returning [`TEST_INVOICE_URL`].
    pub fn create_invoice_link_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.ok_endpoint(
            "createInvoiceLink",
            None,
            json!(TEST_INVOICE_URL),
            expected_requests,
        )
    }

    /// `refundStarPayment` succeeding.
    pub fn create_refund_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.ok_endpoint("refundStarPayment", None, json!(true), expected_requests)
    }

    /// `getStarTransactions` answering requests for page `offset`.
    pub fn create_star_transactions_endpoint(
        &mut self,
        offset: u32,
        transactions: Vec<StarTransaction>,
        expected_requests: usize,
    ) -> Mock {
        self.ok_endpoint(
            "getStarTransactions",
            Some(Matcher::PartialJson(json!({ "offset": offset }))),
            json!({ "transactions": transactions }),
            expected_requests,
        )
    }

    /// `getMyStarBalance` returning `amount` stars.
    pub fn create_star_balance_endpoint(&mut self, amount: i64, expected_requests: usize) -> Mock {
        self.ok_endpoint(
            "getMyStarBalance",
            None,
            json!({ "amount": amount }),
            expected_requests,
        )
    }

    /// `sendMessage` echoing a text message.
    pub fn create_send_message_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.ok_endpoint(
            "sendMessage",
            None,
            serde_json::to_value(factory::mock_message(1, "ok")).unwrap(),
            expected_requests,
        )
    }

    /// `answerPreCheckoutQuery` expecting the given `ok` answer.
    pub fn create_answer_pre_checkout_endpoint(
        &mut self,
        ok: bool,
        expected_requests: usize,
    ) -> Mock {
        self.ok_endpoint(
            "answerPreCheckoutQuery",
            Some(Matcher::PartialJson(json!({ "ok": ok }))),
            json!(true),
            expected_requests,
        )
    }

    /// Any method answering with a Bot API error envelope.
    pub fn create_api_error_endpoint(
        &mut self,
        method: &str,
        error_code: u16,
        description: &str,
        expected_requests: usize,
    ) -> Mock {
        self.test
            .server
            .mock("POST", bot_method_path(method).as_str())
            .with_status(error_code as usize)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "ok": false,
                    "error_code": error_code,
                    "description": description,
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }
}
