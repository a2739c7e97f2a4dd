//! Session configuration shared by headless and UI modes

use std::path::PathBuf;

use super::catalog::StructureCatalog;
use super::economy::{BalancePolicy, STARTING_BALANCE};
use super::persistence::FileStore;

/// Settings a build session is created with
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Balance for new sessions and for loads that fall back to a fresh map
    pub starting_balance: i64,
    pub balance_policy: BalancePolicy,
    /// Directory the map file is written to
    pub save_dir: PathBuf,
    pub catalog: StructureCatalog,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            balance_policy: BalancePolicy::AllowDebt,
            save_dir: FileStore::default_dir(),
            catalog: StructureCatalog::default_city(),
        }
    }
}
