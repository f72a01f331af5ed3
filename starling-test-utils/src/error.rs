use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    TelegramError(#[from] telegram::Error),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Error returned by the code under test
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
