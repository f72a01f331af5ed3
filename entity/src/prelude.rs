pub use super::payment::Entity as Payment;
pub use super::post::Entity as Post;
