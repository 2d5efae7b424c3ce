use thiserror::Error;

/// Errors raised while decoding a block/transaction wire payload.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Codec(#[from] basalt_codec::CodecError),

    #[error("transaction count {count} exceeds configured limit {max}")]
    TooManyTransactions { count: u64, max: u64 },
}
