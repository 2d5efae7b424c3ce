//! Contract execution failure modes (spec.md §6/§7). This crate only
//! defines the boundary a contract VM calls into — these are the errors
//! that boundary can raise, not an executor's internal error set.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("out of gas: needed {needed}, had {remaining}")]
    OutOfGas { needed: u64, remaining: u64 },

    #[error("contract reverted: {0}")]
    ContractRevert(String),

    #[error("contract not found at the called address")]
    ContractNotFound,

    #[error("call depth exceeded the maximum of {0}")]
    CallDepthExceeded(u32),
}
