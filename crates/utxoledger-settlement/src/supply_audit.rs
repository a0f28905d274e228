//! Supply conservation invariant checker.
//!
//! Settlement never mints value: every accepted transaction moves value from
//! consumed UTXOs into new ones and drops its surplus. So at all times:
//! ```text
//! Σ(pool values) == opening supply - Σ(surplus of accepted transactions)
//! ```
//!
//! A mismatch means the commit loop itself is broken; it is reported as
//! [`LedgerError::SupplyInvariantViolation`].

use utxoledger_types::{Amount, LedgerError, Result};

/// Tracks the expected pool value across epochs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyAudit {
    /// Pool value when the engine was constructed.
    opening: Amount,
    /// Surplus dropped by every accepted transaction so far.
    surplus: Amount,
}

impl SupplyAudit {
    /// Start tracking from the given opening supply.
    #[must_use]
    pub fn new(opening: Amount) -> Self {
        Self {
            opening,
            surplus: Amount::ZERO,
        }
    }

    /// Record the surplus of an accepted transaction.
    pub fn record_surplus(&mut self, amount: Amount) -> Result<()> {
        self.surplus = self
            .surplus
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Expected pool value: opening supply minus recorded surplus.
    #[must_use]
    pub fn expected_supply(&self) -> Amount {
        self.opening.saturating_sub(self.surplus)
    }

    /// Verify that `actual_supply` (sum of pool values) matches expectations.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(LedgerError::SupplyInvariantViolation {
                reason: format!(
                    "pool holds {actual_supply}, expected {expected} \
                     (opening={}, surplus={})",
                    self.opening, self.surplus,
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn opening_supply(&self) -> Amount {
        self.opening
    }

    #[must_use]
    pub fn total_surplus(&self) -> Amount {
        self.surplus
    }
}
