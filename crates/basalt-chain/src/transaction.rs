//! `Transaction` wire layout (spec.md §6): `type(u8) ‖ nonce(u64_le) ‖
//! sender(20B) ‖ to(20B) ‖ value(32B) ‖ gas_limit(u64_le) ‖ gas_price(32B)
//! ‖ max_fee_per_gas(32B) ‖ max_priority_fee_per_gas(32B) ‖ bytes(data) ‖
//! priority(u8) ‖ chain_id(u32_le) ‖ signature(64B) ‖ sender_public_key(32B)
//! ‖ varint(count) ‖ compliance_proofs[count]`.

use crate::errors::ChainError;
use basalt_codec::{Reader, Writer};
use basalt_types::{Address, PublicKey, Signature, UInt256};

/// Upper bound on `compliance_proofs.len()` (spec.md §6).
pub const MAX_COMPLIANCE_PROOFS: u64 = 1024;

/// Tagged-sum transaction kind (spec.md §3's "Transfer | ContractDeploy |
/// ContractCall | StakeDeposit | StakeWithdraw | ValidatorRegister | …").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionType {
    Transfer,
    ContractDeploy,
    ContractCall,
    StakeDeposit,
    StakeWithdraw,
    ValidatorRegister,
}

impl TransactionType {
    fn tag(self) -> u8 {
        match self {
            TransactionType::Transfer => 0,
            TransactionType::ContractDeploy => 1,
            TransactionType::ContractCall => 2,
            TransactionType::StakeDeposit => 3,
            TransactionType::StakeWithdraw => 4,
            TransactionType::ValidatorRegister => 5,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, basalt_codec::CodecError> {
        match tag {
            0 => Ok(TransactionType::Transfer),
            1 => Ok(TransactionType::ContractDeploy),
            2 => Ok(TransactionType::ContractCall),
            3 => Ok(TransactionType::StakeDeposit),
            4 => Ok(TransactionType::StakeWithdraw),
            5 => Ok(TransactionType::ValidatorRegister),
            other => Err(basalt_codec::CodecError::UnknownTag { tag: other }),
        }
    }
}

/// A single length-prefixed compliance attestation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplianceProof(pub Vec<u8>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub nonce: u64,
    pub sender: Address,
    pub to: Address,
    pub value: UInt256,
    pub gas_limit: u64,
    pub gas_price: UInt256,
    pub max_fee_per_gas: UInt256,
    pub max_priority_fee_per_gas: UInt256,
    pub data: Vec<u8>,
    pub priority: u8,
    pub chain_id: u32,
    pub signature: Signature,
    pub sender_public_key: PublicKey,
    pub compliance_proofs: Vec<ComplianceProof>,
}

impl Transaction {
    fn write_fields(&self, w: &mut Writer, include_signature: bool) -> Result<(), ChainError> {
        w.write_u8(self.transaction_type.tag());
        w.write_u64_le(self.nonce);
        w.write_raw(self.sender.as_bytes());
        w.write_raw(self.to.as_bytes());
        w.write_raw(&self.value.to_be_bytes());
        w.write_u64_le(self.gas_limit);
        w.write_raw(&self.gas_price.to_be_bytes());
        w.write_raw(&self.max_fee_per_gas.to_be_bytes());
        w.write_raw(&self.max_priority_fee_per_gas.to_be_bytes());
        w.write_bytes(&self.data)?;
        w.write_u8(self.priority);
        w.write_u32_le(self.chain_id);
        if include_signature {
            w.write_raw(self.signature.as_bytes());
            w.write_raw(self.sender_public_key.as_bytes());
        }
        w.write_varint(self.compliance_proofs.len() as u64);
        for proof in &self.compliance_proofs {
            w.write_bytes(&proof.0)?;
        }
        Ok(())
    }

    /// Full wire encoding, including signature and sender public key.
    pub fn encode(&self) -> Result<Vec<u8>, ChainError> {
        let mut w = Writer::new();
        self.write_fields(&mut w, true)?;
        Ok(w.into_vec())
    }

    /// The bytes actually signed / hashed: every field except `signature`
    /// and `sender_public_key` (spec.md §6: "`Transaction.hash =
    /// BLAKE3(serialized tx excluding signature and sender_public_key)`").
    pub fn encode_unsigned(&self) -> Result<Vec<u8>, ChainError> {
        let mut w = Writer::new();
        self.write_fields(&mut w, false)?;
        Ok(w.into_vec())
    }

    /// Content hash used as this transaction's gossip `MessageId`.
    pub fn hash(&self) -> Result<basalt_types::Hash256, ChainError> {
        Ok(basalt_crypto::blake3_hash(&self.encode_unsigned()?))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ChainError> {
        let mut r = Reader::new(bytes);
        let transaction_type = TransactionType::from_tag(r.read_u8()?)?;
        let nonce = r.read_u64_le()?;
        let sender = Address(r.read_fixed::<20>()?);
        let to = Address(r.read_fixed::<20>()?);
        let value = UInt256::from_be_bytes(&r.read_fixed::<32>()?);
        let gas_limit = r.read_u64_le()?;
        let gas_price = UInt256::from_be_bytes(&r.read_fixed::<32>()?);
        let max_fee_per_gas = UInt256::from_be_bytes(&r.read_fixed::<32>()?);
        let max_priority_fee_per_gas = UInt256::from_be_bytes(&r.read_fixed::<32>()?);
        let data = r.read_bytes()?;
        let priority = r.read_u8()?;
        let chain_id = r.read_u32_le()?;
        let signature = Signature(r.read_fixed::<64>()?);
        let sender_public_key = PublicKey(r.read_fixed::<32>()?);

        let count = r.read_bounded_count(MAX_COMPLIANCE_PROOFS)? as usize;
        let mut compliance_proofs = Vec::with_capacity(count);
        for _ in 0..count {
            compliance_proofs.push(ComplianceProof(r.read_bytes()?));
        }

        Ok(Self {
            transaction_type,
            nonce,
            sender,
            to,
            value,
            gas_limit,
            gas_price,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            data,
            priority,
            chain_id,
            signature,
            sender_public_key,
            compliance_proofs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            transaction_type: TransactionType::Transfer,
            nonce: 1,
            sender: Address([1u8; 20]),
            to: Address([2u8; 20]),
            value: UInt256::from_u64(100),
            gas_limit: 21000,
            gas_price: UInt256::from_u64(10),
            max_fee_per_gas: UInt256::from_u64(20),
            max_priority_fee_per_gas: UInt256::from_u64(1),
            data: vec![],
            priority: 0,
            chain_id: 1,
            signature: Signature([7u8; 64]),
            sender_public_key: PublicKey([8u8; 32]),
            compliance_proofs: vec![],
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let tx = sample();
        let encoded = tx.encode().unwrap();
        let decoded = Transaction::decode(&encoded).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn hash_excludes_signature_and_public_key() {
        let mut tx_a = sample();
        let mut tx_b = sample();
        tx_b.signature = Signature([0xFF; 64]);
        tx_b.sender_public_key = PublicKey([0xEE; 32]);
        assert_eq!(tx_a.hash().unwrap(), tx_b.hash().unwrap());

        tx_a.nonce = 2;
        assert_ne!(tx_a.hash().unwrap(), tx_b.hash().unwrap());
    }

    #[test]
    fn compliance_proofs_roundtrip() {
        let mut tx = sample();
        tx.compliance_proofs = vec![ComplianceProof(vec![1, 2, 3]), ComplianceProof(vec![4, 5])];
        let encoded = tx.encode().unwrap();
        let decoded = Transaction::decode(&encoded).unwrap();
        assert_eq!(decoded.compliance_proofs, tx.compliance_proofs);
    }

    #[test]
    fn decode_rejects_truncated_buffer() {
        let tx = sample();
        let mut encoded = tx.encode().unwrap();
        encoded.truncate(5);
        assert!(Transaction::decode(&encoded).is_err());
    }
}
