//! Tiered slashing engine and the append-only slash log (spec.md §4.9).

use crate::errors::StakingError;
use crate::registry::StakingState;
use basalt_types::{Address, UInt256};
use parking_lot::Mutex;
use primitive_types::U256;

/// Reasons a validator can be slashed, each with a fixed percentage of
/// `total_stake` (spec.md §4.9's table).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlashReason {
    DoubleSign,
    ExtendedInactivity,
    InvalidBlockProposal,
}

impl SlashReason {
    fn percent(self) -> u64 {
        match self {
            SlashReason::DoubleSign => 100,
            SlashReason::ExtendedInactivity => 5,
            SlashReason::InvalidBlockProposal => 1,
        }
    }

    fn penalty_for(self, total_stake: UInt256) -> UInt256 {
        UInt256(total_stake.0 * U256::from(self.percent()) / U256::from(100u64))
    }
}

/// One immutable entry in the slash history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashingEvent {
    pub validator: Address,
    pub reason: SlashReason,
    pub penalty: UInt256,
    pub block_number: u64,
    pub description: String,
    pub timestamp: u64,
}

/// Chooses the penalty for a [`SlashReason`], calls
/// [`StakingState::apply_slash`] (never touches registry fields directly),
/// then appends an immutable [`SlashingEvent`]. The log is append-only:
/// nothing here ever rewrites or removes a past entry.
pub struct SlashingEngine<'a> {
    staking: &'a StakingState,
    log: Mutex<Vec<SlashingEvent>>,
}

impl<'a> SlashingEngine<'a> {
    pub fn new(staking: &'a StakingState) -> Self {
        Self {
            staking,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Slash `validator` for `reason` at `block_number`. Returns an error
    /// with no state change if the validator is unknown.
    pub fn slash(
        &self,
        validator: Address,
        reason: SlashReason,
        block_number: u64,
        description: impl Into<String>,
        timestamp: u64,
    ) -> Result<UInt256, StakingError> {
        let current = self
            .staking
            .get(&validator)
            .ok_or(StakingError::UnknownValidator(validator))?;
        let penalty = reason.penalty_for(current.total_stake);

        let applied = self.staking.apply_slash(validator, penalty)?;

        self.log.lock().push(SlashingEvent {
            validator,
            reason,
            penalty: applied,
            block_number,
            description: description.into(),
            timestamp,
        });

        Ok(applied)
    }

    /// A snapshot of every slash ever recorded, in the order applied.
    pub fn history(&self) -> Vec<SlashingEvent> {
        self.log.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn double_sign_takes_everything_and_logs_one_event() {
        let staking = StakingState::new(UInt256::from_u64(1000));
        staking.register_validator(addr(1), UInt256::from_u64(3000)).unwrap();
        staking.delegate(addr(1), UInt256::from_u64(7000)).unwrap();

        let engine = SlashingEngine::new(&staking);
        let applied = engine
            .slash(addr(1), SlashReason::DoubleSign, 42, "double-signed block 42", 1_700_000_000)
            .unwrap();

        assert_eq!(applied, UInt256::from_u64(10_000));
        let info = staking.get(&addr(1)).unwrap();
        assert_eq!(info.total_stake, UInt256::ZERO);
        assert!(!info.is_active);

        let history = engine.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].penalty, UInt256::from_u64(10_000));
    }

    #[test]
    fn inactivity_slash_takes_five_percent() {
        let staking = StakingState::new(UInt256::from_u64(1000));
        staking.register_validator(addr(1), UInt256::from_u64(10_000)).unwrap();

        let engine = SlashingEngine::new(&staking);
        let applied = engine
            .slash(addr(1), SlashReason::ExtendedInactivity, 1, "missed 200 blocks", 0)
            .unwrap();

        assert_eq!(applied, UInt256::from_u64(500));
    }

    #[test]
    fn invalid_proposal_slash_takes_one_percent() {
        let staking = StakingState::new(UInt256::from_u64(1000));
        staking.register_validator(addr(1), UInt256::from_u64(10_000)).unwrap();

        let engine = SlashingEngine::new(&staking);
        let applied = engine
            .slash(addr(1), SlashReason::InvalidBlockProposal, 1, "bad proposal", 0)
            .unwrap();

        assert_eq!(applied, UInt256::from_u64(100));
    }

    #[test]
    fn successive_slashes_compound_and_append_separate_events() {
        let staking = StakingState::new(UInt256::ZERO);
        staking.register_validator(addr(1), UInt256::from_u64(10_000)).unwrap();
        let engine = SlashingEngine::new(&staking);

        engine.slash(addr(1), SlashReason::ExtendedInactivity, 1, "a", 0).unwrap(); // -500 -> 9500
        engine.slash(addr(1), SlashReason::InvalidBlockProposal, 2, "b", 0).unwrap(); // -95 -> 9405

        let info = staking.get(&addr(1)).unwrap();
        assert_eq!(info.total_stake, UInt256::from_u64(9405));
        assert_eq!(engine.history().len(), 2);
    }

    /// Scenario 6 from spec.md §8: three successive 5% inactivity slashes
    /// against a total of 10,000, each computed on the post-slash total
    /// with integer floor division: 10000 -> 9500 -> 9025 -> 8574.
    #[test]
    fn three_successive_inactivity_slashes_floor_divide_each_step() {
        let staking = StakingState::new(UInt256::ZERO);
        staking.register_validator(addr(1), UInt256::from_u64(10_000)).unwrap();
        let engine = SlashingEngine::new(&staking);

        engine.slash(addr(1), SlashReason::ExtendedInactivity, 1, "a", 0).unwrap();
        assert_eq!(staking.get(&addr(1)).unwrap().total_stake, UInt256::from_u64(9_500));

        engine.slash(addr(1), SlashReason::ExtendedInactivity, 2, "b", 0).unwrap();
        assert_eq!(staking.get(&addr(1)).unwrap().total_stake, UInt256::from_u64(9_025));

        engine.slash(addr(1), SlashReason::ExtendedInactivity, 3, "c", 0).unwrap();
        assert_eq!(staking.get(&addr(1)).unwrap().total_stake, UInt256::from_u64(8_574));

        assert_eq!(engine.history().len(), 3);
    }

    #[test]
    fn slashing_unknown_validator_records_nothing() {
        let staking = StakingState::new(UInt256::ZERO);
        let engine = SlashingEngine::new(&staking);
        assert!(engine.slash(addr(1), SlashReason::DoubleSign, 1, "x", 0).is_err());
        assert!(engine.history().is_empty());
    }
}
