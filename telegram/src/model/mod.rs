//! Bot API object models.

pub mod payment;
pub mod stars;
pub mod update;

pub use payment::{CreateInvoiceLink, LabeledPrice, PreCheckoutQuery, RefundedPayment, SuccessfulPayment};
pub use stars::{StarAmount, StarTransaction, StarTransactions, TransactionPartner};
pub use update::{Chat, Message, Update, User};
