//! Quantized gas accounting (spec.md §6): every host operation consumes
//! gas up front; running out unwinds the current call with
//! [`HostError::OutOfGas`] rather than letting execution continue past
//! its budget.

use crate::errors::HostError;

pub struct GasMeter {
    remaining: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { remaining: limit }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn consume(&mut self, amount: u64) -> Result<(), HostError> {
        if amount > self.remaining {
            return Err(HostError::OutOfGas { needed: amount, remaining: self.remaining });
        }
        self.remaining -= amount;
        Ok(())
    }
}
