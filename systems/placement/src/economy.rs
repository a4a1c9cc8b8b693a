use tower_defense_core::{Money, PlacementError};

/// The player's money balance.
///
/// The balance only ever changes through [`Purse::spend`], which refuses to
/// go below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purse {
    balance: Money,
}

impl Purse {
    /// Creates a purse holding `balance`.
    #[must_use]
    pub const fn new(balance: Money) -> Self {
        Self { balance }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Money {
        self.balance
    }

    /// Deducts `cost`, leaving the balance untouched when it falls short.
    pub fn spend(&mut self, cost: Money) -> Result<(), PlacementError> {
        self.balance = self
            .balance
            .checked_sub(cost)
            .ok_or(PlacementError::InsufficientFunds {
                cost,
                balance: self.balance,
            })?;
        Ok(())
    }
}
