//! Configuration for the block progression harness

use crate::error::{EmulatorError, Result};
use serde::Deserialize;
use shared_types::KeyPair;
use std::env;

/// Default balance of the service account at genesis.
pub const DEFAULT_SERVICE_ACCOUNT_BALANCE: u64 = 1_000_000_000;

/// Default upper bound on a transaction's computation limit.
pub const DEFAULT_MAX_TRANSACTION_GAS_LIMIT: u64 = 9_999;

/// Default computation limit for scripts.
pub const DEFAULT_SCRIPT_GAS_LIMIT: u64 = 100_000;

/// Runtime configuration for the emulator
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Balance credited to the service account at genesis
    pub service_account_balance: u64,

    /// Hex-encoded 32-byte seed of the service key (random when absent)
    pub service_key_seed: Option<String>,

    /// Largest computation limit a transaction may request
    pub max_transaction_gas_limit: u64,

    /// Computation limit applied to every script
    pub script_gas_limit: u64,

    /// Scripts read the pending ledger instead of the last committed one
    pub scripts_see_pending: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            service_account_balance: DEFAULT_SERVICE_ACCOUNT_BALANCE,
            service_key_seed: None,
            max_transaction_gas_limit: DEFAULT_MAX_TRANSACTION_GAS_LIMIT,
            script_gas_limit: DEFAULT_SCRIPT_GAS_LIMIT,
            scripts_see_pending: false,
        }
    }
}

impl EmulatorConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LC_SERVICE_BALANCE`: Service account balance (default: 1000000000)
    /// - `LC_SERVICE_KEY_SEED`: Hex seed of the service key (default: random)
    /// - `LC_MAX_TX_GAS_LIMIT`: Transaction gas limit cap (default: 9999)
    /// - `LC_SCRIPT_GAS_LIMIT`: Script gas limit (default: 100000)
    /// - `LC_SCRIPTS_SEE_PENDING`: Scripts read pending state (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_account_balance: env::var("LC_SERVICE_BALANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.service_account_balance),

            service_key_seed: env::var("LC_SERVICE_KEY_SEED").ok().filter(|v| !v.is_empty()),

            max_transaction_gas_limit: env::var("LC_MAX_TX_GAS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_transaction_gas_limit),

            script_gas_limit: env::var("LC_SCRIPT_GAS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.script_gas_limit),

            scripts_see_pending: env::var("LC_SCRIPTS_SEE_PENDING")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.scripts_see_pending),
        }
    }

    /// Use a fixed service key seed.
    #[must_use]
    pub fn with_service_key_seed(mut self, seed: [u8; 32]) -> Self {
        self.service_key_seed = Some(hex::encode(seed));
        self
    }

    /// Check that the configuration can start an emulator.
    pub fn validate(&self) -> Result<()> {
        if self.max_transaction_gas_limit == 0 {
            return Err(EmulatorError::InvalidConfig(
                "max_transaction_gas_limit must be positive".into(),
            ));
        }
        if self.script_gas_limit == 0 {
            return Err(EmulatorError::InvalidConfig(
                "script_gas_limit must be positive".into(),
            ));
        }
        if let Some(seed) = &self.service_key_seed {
            KeyPair::from_hex_seed(seed)
                .map_err(|e| EmulatorError::InvalidConfig(format!("service_key_seed: {e}")))?;
        }
        Ok(())
    }

    /// The service key this configuration describes, or a fresh random one.
    pub fn service_key(&self) -> Result<KeyPair> {
        match &self.service_key_seed {
            Some(seed) => Ok(KeyPair::from_hex_seed(seed)?),
            None => Ok(KeyPair::generate()),
        }
    }
}
