use basalt_types::Address;
use thiserror::Error;

/// Errors raised by the validator registry and slashing engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakingError {
    #[error("validator {0} is already registered")]
    AlreadyRegistered(Address),

    #[error("validator {0} is not registered")]
    UnknownValidator(Address),

    #[error("delegation amount must be nonzero")]
    ZeroAmount,

    #[error("undelegate amount {amount} exceeds delegated stake {delegated}")]
    InsufficientDelegatedStake { amount: String, delegated: String },
}
