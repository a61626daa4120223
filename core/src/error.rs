use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Data integrity violation: {0}")]
    InternalInconsistency(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;

/// Business-rule denials.
///
/// RULE: A denial is an outcome, not an error. Operations return these
/// inside `Ok`, never mutate state on a denial path, and the caller may
/// retry once the condition clears.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("user {0} does not exist")]
    AccountNotFound(String),

    #[error("contribution must be greater than 0")]
    InvalidStake,

    #[error("not enough coins, current balance is {balance}")]
    InsufficientFunds { balance: i64 },

    #[error("wipe bomb reward bands are misconfigured")]
    ConfigurationError,

    #[error("you cannot steal from your own pond")]
    SelfTarget,

    #[error("steal on cooldown, try again in {remaining_minutes} minutes")]
    CooldownActive { remaining_minutes: i64 },

    #[error("{victim}'s pond is empty")]
    EmptyTarget { victim: String },
}
