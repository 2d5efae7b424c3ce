//! `Block` wire layout (spec.md §6): a [`Header`] followed by
//! `varint(tx_count)` and that many length-prefixed transactions. The
//! count is rejected if it exceeds a node-configured limit — there is no
//! single correct cap, so callers supply one (`ChainConfig::max_block_transactions`).

use crate::errors::ChainError;
use crate::header::Header;
use crate::transaction::Transaction;
use basalt_codec::{Reader, Writer};
use basalt_types::Hash256;

/// Tunable limits for block/transaction decoding.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub max_block_transactions: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_block_transactions: 10_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        let mut w = Writer::new();
        w.write_raw(&self.header.encode()?);
        w.write_varint(self.transactions.len() as u64);
        for tx in &self.transactions {
            w.write_bytes(&tx.encode()?)?;
        }
        Ok(w.into_vec())
    }

    pub fn decode(bytes: &[u8], config: &ChainConfig) -> Result<Self, ChainError> {
        // The header has no separate length prefix; decode it first and
        // let the reader continue from wherever it left off.
        let header = Header::decode(bytes)?;
        let header_len = header.encode()?.len();

        let mut r = Reader::new(&bytes[header_len..]);
        let count = r.read_varint()?;
        if count > config.max_block_transactions {
            return Err(ChainError::TooManyTransactions {
                count,
                max: config.max_block_transactions,
            });
        }

        let mut transactions = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let tx_bytes = r.read_bytes()?;
            transactions.push(Transaction::decode(&tx_bytes)?);
        }

        Ok(Self { header, transactions })
    }

    pub fn hash(&self) -> Result<Hash256, ChainError> {
        self.header.hash()
    }
}
