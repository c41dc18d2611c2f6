//! # Test Fixtures
//!
//! Builders shared by the integration flows and the benchmarks.

use lc_03_block_progression::prelude::{Emulator, EmulatorConfig, Result};
use serde_json::json;
use shared_types::{Address, FieldMap, Instruction, KeyPair, Transaction};

/// Seed of the service account key in every fixture emulator.
pub const SERVICE_KEY_SEED: [u8; 32] = [0x5e; 32];

/// Default configuration with a fixed service key.
pub fn test_config() -> EmulatorConfig {
    lc_telemetry::init_test_tracing();
    EmulatorConfig::default().with_service_key_seed(SERVICE_KEY_SEED)
}

/// A fresh emulator on the reference VM.
pub fn test_emulator() -> Result<Emulator> {
    Emulator::new(test_config())
}

/// An account created on the emulator, with its signing key.
pub struct TestAccount {
    /// Ledger address.
    pub address: Address,
    /// Key registered on the account.
    pub key: KeyPair,
}

impl TestAccount {
    /// Creates an account whose key is derived from `seed`.
    ///
    /// The creation lands in the pending block.
    pub fn create(emulator: &Emulator, seed: u8) -> Result<Self> {
        let key = KeyPair::from_seed([seed; 32]);
        let address = emulator.create_account(vec![key.public_key()])?;
        Ok(Self { address, key })
    }

    /// Signs `program` as proposer, payer and sole authorizer, using the
    /// account's current sequence number.
    pub fn transaction(
        &self,
        emulator: &Emulator,
        program: Vec<Instruction>,
    ) -> Result<Transaction> {
        sign_as(emulator, self.address, &self.key, program)
    }
}

/// Signs `program` for `signer` at its current sequence number.
pub fn sign_as(
    emulator: &Emulator,
    signer: Address,
    key: &KeyPair,
    program: Vec<Instruction>,
) -> Result<Transaction> {
    let sequence_number = emulator.sequence_number(&signer)?;
    let tx = Transaction::new(program)
        .with_proposal_key(signer, sequence_number)
        .with_payer(signer)
        .with_authorizer(signer)
        .sign(signer, key)?;
    Ok(tx)
}

/// A service-signed transaction.
pub fn service_transaction(
    emulator: &Emulator,
    program: Vec<Instruction>,
) -> Result<Transaction> {
    sign_as(
        emulator,
        emulator.service_address(),
        emulator.service_key(),
        program,
    )
}

/// Transfer instruction.
pub fn transfer(from: Address, to: Address, amount: u64) -> Instruction {
    Instruction::Transfer { from, to, amount }
}

/// Custom event with a single numeric `n` field.
pub fn tick(n: u64) -> Instruction {
    let mut fields = FieldMap::new();
    fields.insert("n".into(), json!(n));
    Instruction::Emit {
        event_type: "A.Fixture.Tick".into(),
        fields,
    }
}
