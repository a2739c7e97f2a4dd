//! Economy ledger for the builder
//!
//! Tracks the player's balance. Placing a structure debits its price;
//! nothing is ever refunded.

/// Balance a new session (or a failed load) starts with
pub const STARTING_BALANCE: i64 = 10_000;

/// Whether a purchase may take the balance below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalancePolicy {
    /// Purchases always succeed and the balance may go negative
    #[default]
    AllowDebt,
    /// Purchases larger than the current balance are refused
    RequireFunds,
}

/// The player's money
#[derive(Debug, Clone)]
pub struct Ledger {
    balance: i64,
    policy: BalancePolicy,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE, BalancePolicy::default())
    }
}

impl Ledger {
    pub fn new(balance: i64, policy: BalancePolicy) -> Self {
        Self { balance, policy }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn policy(&self) -> BalancePolicy {
        self.policy
    }

    /// Replace the balance wholesale (used when loading a map)
    pub fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    /// Check if the player can pay `cost` under the current policy
    pub fn can_afford(&self, cost: u32) -> bool {
        match self.policy {
            BalancePolicy::AllowDebt => true,
            BalancePolicy::RequireFunds => self.balance >= i64::from(cost),
        }
    }

    /// Deduct money for a purchase
    /// Returns true if successful, false if the policy refused it
    pub fn spend(&mut self, cost: u32) -> bool {
        if self.can_afford(cost) {
            self.balance = self.balance.saturating_sub(i64::from(cost));
            true
        } else {
            false
        }
    }

    /// Balance as shown on the money label
    pub fn display(&self) -> String {
        format!("${}", self.balance)
    }
}
