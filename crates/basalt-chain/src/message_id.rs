//! Gossip message ID derivation (spec.md §4.7/§6): transactions and blocks
//! are deduplicated by their own content hash; consensus messages (which
//! have no independent content hash) are identified by
//! `BLAKE3(serialized message)`.

use crate::block::Block;
use crate::errors::ChainError;
use crate::transaction::Transaction;
use basalt_types::Hash256;

/// A gossip-level message identity, used by the seen-message cache to
/// dedupe relays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub Hash256);

impl MessageId {
    pub fn for_transaction(tx: &Transaction) -> Result<Self, ChainError> {
        Ok(MessageId(tx.hash()?))
    }

    pub fn for_block(block: &Block) -> Result<Self, ChainError> {
        Ok(MessageId(block.hash()?))
    }

    /// Consensus messages carry no independent content hash of their own,
    /// so their id is the hash of however they were serialized for the
    /// wire.
    pub fn for_consensus_message(serialized: &[u8]) -> Self {
        MessageId(basalt_crypto::blake3_hash(serialized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use crate::transaction::TransactionType;
    use basalt_types::{Address, PublicKey, Signature, UInt256};

    fn sample_tx() -> Transaction {
        Transaction {
            transaction_type: TransactionType::Transfer,
            nonce: 0,
            sender: Address::ZERO,
            to: Address::ZERO,
            value: UInt256::ZERO,
            gas_limit: 21000,
            gas_price: UInt256::ZERO,
            max_fee_per_gas: UInt256::ZERO,
            max_priority_fee_per_gas: UInt256::ZERO,
            data: vec![],
            priority: 0,
            chain_id: 1,
            signature: Signature::ZERO,
            sender_public_key: PublicKey::ZERO,
            compliance_proofs: vec![],
        }
    }

    #[test]
    fn transaction_message_id_matches_content_hash() {
        let tx = sample_tx();
        let id = MessageId::for_transaction(&tx).unwrap();
        assert_eq!(id.0, tx.hash().unwrap());
    }

    #[test]
    fn block_message_id_matches_header_hash() {
        let header = Header {
            number: 1,
            parent_hash: Hash256::ZERO,
            state_root: Hash256::ZERO,
            transactions_root: Hash256::ZERO,
            receipts_root: Hash256::ZERO,
            timestamp: 0,
            proposer: Address::ZERO,
            chain_id: 1,
            gas_used: 0,
            gas_limit: 1,
            base_fee: UInt256::ZERO,
            protocol_version: 1,
            extra_data: vec![],
        };
        let block = crate::block::Block {
            header: header.clone(),
            transactions: vec![],
        };
        let id = MessageId::for_block(&block).unwrap();
        assert_eq!(id.0, header.hash().unwrap());
    }

    #[test]
    fn consensus_message_id_is_content_sensitive() {
        let a = MessageId::for_consensus_message(b"vote-round-1");
        let b = MessageId::for_consensus_message(b"vote-round-2");
        assert_ne!(a, b);
    }
}
