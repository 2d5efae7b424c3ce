//! `HostContext` (spec.md §6): the boundary a contract execution calls
//! into. Deliberately just a trait — no executor lives in this crate,
//! only the shape a caller and a VM must agree on.

use crate::errors::HostError;
use crate::event::Event;
use crate::gas::GasMeter;
use basalt_types::Hash256;

pub trait HostContext {
    fn storage_read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, HostError>;
    fn storage_write(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), HostError>;
    fn storage_delete(&mut self, key: &[u8]) -> Result<(), HostError>;
    fn emit_event(&mut self, signature_hash: Hash256, topics: Vec<Hash256>, data: Vec<u8>);
    fn gas_meter(&mut self) -> &mut GasMeter;

    /// Unwind the current call with [`HostError::ContractRevert`] if
    /// `condition` is false.
    fn require(&self, condition: bool, reason: &str) -> Result<(), HostError> {
        if condition {
            Ok(())
        } else {
            Err(HostError::ContractRevert(reason.to_string()))
        }
    }
}

/// Minimal in-memory [`HostContext`] used to exercise the trait boundary
/// in tests; not a production contract runtime.
pub struct InMemoryHost {
    storage: std::collections::HashMap<Vec<u8>, Vec<u8>>,
    events: Vec<Event>,
    gas: GasMeter,
}

impl InMemoryHost {
    pub fn new(gas_limit: u64) -> Self {
        Self { storage: std::collections::HashMap::new(), events: Vec::new(), gas: GasMeter::new(gas_limit) }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl HostContext for InMemoryHost {
    fn storage_read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.storage.get(key).cloned())
    }

    fn storage_write(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), HostError> {
        self.storage.insert(key.to_vec(), value);
        Ok(())
    }

    fn storage_delete(&mut self, key: &[u8]) -> Result<(), HostError> {
        self.storage.remove(key);
        Ok(())
    }

    fn emit_event(&mut self, signature_hash: Hash256, topics: Vec<Hash256>, data: Vec<u8>) {
        self.events.push(Event { signature_hash, topics, data });
    }

    fn gas_meter(&mut self) -> &mut GasMeter {
        &mut self.gas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_roundtrips() {
        let mut host = InMemoryHost::new(1000);
        host.storage_write(b"k", b"v".to_vec()).unwrap();
        assert_eq!(host.storage_read(b"k").unwrap(), Some(b"v".to_vec()));
        host.storage_delete(b"k").unwrap();
        assert_eq!(host.storage_read(b"k").unwrap(), None);
    }

    #[test]
    fn require_false_reverts_with_reason() {
        let host = InMemoryHost::new(1000);
        let err = host.require(false, "balance too low").unwrap_err();
        assert_eq!(err, HostError::ContractRevert("balance too low".into()));
    }

    #[test]
    fn require_true_is_a_no_op() {
        let host = InMemoryHost::new(1000);
        assert!(host.require(true, "unreachable").is_ok());
    }

    #[test]
    fn gas_meter_is_reachable_through_the_trait() {
        let mut host = InMemoryHost::new(100);
        host.gas_meter().consume(30).unwrap();
        assert_eq!(host.gas_meter().remaining(), 70);
    }

    #[test]
    fn emitted_events_are_recorded_in_order() {
        let mut host = InMemoryHost::new(1000);
        host.emit_event(Hash256::ZERO, vec![], b"first".to_vec());
        host.emit_event(Hash256::ZERO, vec![], b"second".to_vec());
        assert_eq!(host.events().len(), 2);
        assert_eq!(host.events()[0].data, b"first");
    }
}
