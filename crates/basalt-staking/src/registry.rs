//! Validator registry and the atomic slash transaction (spec.md §4.9).

use crate::errors::StakingError;
use basalt_types::{Address, BlsPublicKey, UInt256};
use parking_lot::Mutex;
use std::collections::HashMap;

/// One validator's bonded stake. `total_stake == self_stake + delegated_stake`
/// always holds; `is_active` implies `total_stake >= min_validator_stake`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeInfo {
    pub self_stake: UInt256,
    pub delegated_stake: UInt256,
    pub total_stake: UInt256,
    pub is_active: bool,
    pub bls_public_key: Option<BlsPublicKey>,
}

impl StakeInfo {
    fn new(self_stake: UInt256, min_validator_stake: UInt256) -> Self {
        Self {
            self_stake,
            delegated_stake: UInt256::ZERO,
            total_stake: self_stake,
            is_active: self_stake >= min_validator_stake,
            bls_public_key: None,
        }
    }
}

/// The full validator registry, keyed by address, behind one lock so
/// `apply_slash`'s read-modify-write runs atomically with every other
/// mutation (spec.md §5: "single registry lock protecting the entire
/// apply_slash transaction; delegation and undelegation take the same
/// lock").
pub struct StakingState {
    min_validator_stake: UInt256,
    validators: Mutex<HashMap<Address, StakeInfo>>,
}

impl StakingState {
    pub fn new(min_validator_stake: UInt256) -> Self {
        Self {
            min_validator_stake,
            validators: Mutex::new(HashMap::new()),
        }
    }

    pub fn min_validator_stake(&self) -> UInt256 {
        self.min_validator_stake
    }

    pub fn get(&self, validator: &Address) -> Option<StakeInfo> {
        self.validators.lock().get(validator).cloned()
    }

    pub fn is_registered(&self, validator: &Address) -> bool {
        self.validators.lock().contains_key(validator)
    }

    /// Insert a new validator with `self_stake` bonded. `is_active` is set
    /// immediately from the comparison against `min_validator_stake`.
    pub fn register_validator(
        &self,
        validator: Address,
        self_stake: UInt256,
    ) -> Result<(), StakingError> {
        let mut guard = self.validators.lock();
        if guard.contains_key(&validator) {
            return Err(StakingError::AlreadyRegistered(validator));
        }
        guard.insert(validator, StakeInfo::new(self_stake, self.min_validator_stake));
        Ok(())
    }

    /// Increment `delegated_stake` and `total_stake` atomically.
    pub fn delegate(&self, validator: Address, amount: UInt256) -> Result<(), StakingError> {
        if amount.is_zero() {
            return Err(StakingError::ZeroAmount);
        }
        let mut guard = self.validators.lock();
        let info = guard
            .get_mut(&validator)
            .ok_or(StakingError::UnknownValidator(validator))?;
        info.delegated_stake = info.delegated_stake.saturating_add(&amount);
        info.total_stake = info.total_stake.saturating_add(&amount);
        info.is_active = info.total_stake >= self.min_validator_stake;
        Ok(())
    }

    /// Symmetric to [`delegate`](Self::delegate).
    pub fn undelegate(&self, validator: Address, amount: UInt256) -> Result<(), StakingError> {
        if amount.is_zero() {
            return Err(StakingError::ZeroAmount);
        }
        let mut guard = self.validators.lock();
        let info = guard
            .get_mut(&validator)
            .ok_or(StakingError::UnknownValidator(validator))?;
        if amount > info.delegated_stake {
            return Err(StakingError::InsufficientDelegatedStake {
                amount: amount.to_string(),
                delegated: info.delegated_stake.to_string(),
            });
        }
        info.delegated_stake = info.delegated_stake.saturating_sub(&amount);
        info.total_stake = info.total_stake.saturating_sub(&amount);
        info.is_active = info.total_stake >= self.min_validator_stake;
        Ok(())
    }

    /// The atomic slash transaction (spec.md §4.9):
    /// 1. Cap `penalty` at `total_stake`.
    /// 2. Deduct from `self_stake` first; overflow into `delegated_stake`.
    /// 3. Recompute `total_stake`.
    /// 4. Deactivate iff `total_stake < min_validator_stake`.
    ///
    /// Returns the amount actually applied, or an error (with no state
    /// change) if `validator` is unknown.
    pub fn apply_slash(&self, validator: Address, penalty: UInt256) -> Result<UInt256, StakingError> {
        let mut guard = self.validators.lock();
        let info = guard
            .get_mut(&validator)
            .ok_or(StakingError::UnknownValidator(validator))?;

        let applied = if penalty > info.total_stake {
            info.total_stake
        } else {
            penalty
        };

        let from_self = if applied > info.self_stake { info.self_stake } else { applied };
        let from_delegated = applied.saturating_sub(&from_self);

        info.self_stake = info.self_stake.saturating_sub(&from_self);
        info.delegated_stake = info.delegated_stake.saturating_sub(&from_delegated);
        info.total_stake = info.self_stake.saturating_add(&info.delegated_stake);
        info.is_active = info.total_stake >= self.min_validator_stake;

        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    fn min() -> UInt256 {
        UInt256::from_u64(1000)
    }

    #[test]
    fn register_sets_active_from_min_stake_comparison() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(1000)).unwrap();
        state.register_validator(addr(2), UInt256::from_u64(500)).unwrap();

        assert!(state.get(&addr(1)).unwrap().is_active);
        assert!(!state.get(&addr(2)).unwrap().is_active);
    }

    #[test]
    fn double_registration_is_rejected() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(1000)).unwrap();
        assert_eq!(
            state.register_validator(addr(1), UInt256::from_u64(1000)),
            Err(StakingError::AlreadyRegistered(addr(1)))
        );
    }

    #[test]
    fn delegate_and_undelegate_keep_total_consistent() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(1000)).unwrap();
        state.delegate(addr(1), UInt256::from_u64(500)).unwrap();

        let info = state.get(&addr(1)).unwrap();
        assert_eq!(info.delegated_stake, UInt256::from_u64(500));
        assert_eq!(info.total_stake, UInt256::from_u64(1500));
        assert_eq!(info.self_stake.saturating_add(&info.delegated_stake), info.total_stake);

        state.undelegate(addr(1), UInt256::from_u64(500)).unwrap();
        let info = state.get(&addr(1)).unwrap();
        assert_eq!(info.delegated_stake, UInt256::ZERO);
        assert_eq!(info.total_stake, UInt256::from_u64(1000));
    }

    #[test]
    fn undelegate_more_than_delegated_is_rejected() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(1000)).unwrap();
        assert!(state.undelegate(addr(1), UInt256::from_u64(1)).is_err());
    }

    /// Scenario 5 from spec.md §8: double-sign slash wipes a validator.
    #[test]
    fn double_sign_slash_zeroes_validator_and_deactivates() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(3000)).unwrap();
        state.delegate(addr(1), UInt256::from_u64(7000)).unwrap();

        let applied = state.apply_slash(addr(1), UInt256::from_u64(10_000)).unwrap();
        assert_eq!(applied, UInt256::from_u64(10_000));

        let info = state.get(&addr(1)).unwrap();
        assert_eq!(info.self_stake, UInt256::ZERO);
        assert_eq!(info.delegated_stake, UInt256::ZERO);
        assert_eq!(info.total_stake, UInt256::ZERO);
        assert!(!info.is_active);
    }

    #[test]
    fn slash_deducts_self_stake_before_delegated() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(100)).unwrap();
        state.delegate(addr(1), UInt256::from_u64(900)).unwrap();

        state.apply_slash(addr(1), UInt256::from_u64(150)).unwrap();
        let info = state.get(&addr(1)).unwrap();
        assert_eq!(info.self_stake, UInt256::ZERO);
        assert_eq!(info.delegated_stake, UInt256::from_u64(850));
    }

    #[test]
    fn slash_is_capped_at_total_stake() {
        let state = StakingState::new(min());
        state.register_validator(addr(1), UInt256::from_u64(100)).unwrap();
        let applied = state.apply_slash(addr(1), UInt256::from_u64(1_000_000)).unwrap();
        assert_eq!(applied, UInt256::from_u64(100));
    }

    #[test]
    fn slash_unknown_validator_is_error_with_no_state_change() {
        let state = StakingState::new(min());
        assert_eq!(
            state.apply_slash(addr(1), UInt256::from_u64(1)),
            Err(StakingError::UnknownValidator(addr(1)))
        );
    }

    #[test]
    fn successive_slashes_compound_on_current_total() {
        let state = StakingState::new(UInt256::ZERO);
        state.register_validator(addr(1), UInt256::from_u64(1000)).unwrap();

        // 5% of 1000 = 50
        let first = state.apply_slash(addr(1), UInt256::from_u64(50)).unwrap();
        assert_eq!(first, UInt256::from_u64(50));
        // 1% of the *new* total (950) = 9 (truncated), applied as given here.
        let second = state.apply_slash(addr(1), UInt256::from_u64(9)).unwrap();
        assert_eq!(second, UInt256::from_u64(9));

        let info = state.get(&addr(1)).unwrap();
        assert_eq!(info.total_stake, UInt256::from_u64(941));
    }
}
