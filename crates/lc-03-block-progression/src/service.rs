//! # Emulator Service
//!
//! Drives the local chain: runs submitted transactions through the VM and
//! the result pipeline, accumulates their results in the pending block and
//! seals blocks on demand.
//!
//! ## Locking
//!
//! - `pending` (`Mutex`): serializes every operation that appends to or
//!   seals the pending block.
//! - `chain` (`RwLock`): sealed blocks and the last committed ledger. Only
//!   write-locked while a sealed block is published. Blocks and ledger
//!   snapshots are `Arc`s, so readers clone and release.
//!
//! Locks are always taken in the order `pending` then `chain`.

use crate::config::EmulatorConfig;
use crate::domain::{
    check_sequence_number, check_signatures, check_well_formed, Block, BlockId, BlockState,
    PendingBlock,
};
use crate::error::{EmulatorError, Result};
use crate::ports::inbound::BlockProgressionApi;
use lc_01_virtual_machine::domain::{event_types, LedgerState};
use lc_01_virtual_machine::interpreter::ReferenceVm;
use lc_01_virtual_machine::ports::inbound::VirtualMachine;
use lc_02_execution_results::domain::{ScriptResult, TransactionId, TransactionResult};
use lc_02_execution_results::pipeline::{assemble_script_result, assemble_transaction_result};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use shared_types::{Account, Address, Instruction, KeyPair, PublicKey, Script, Transaction};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Statistics for the emulator.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorStats {
    /// Transactions appended to a block.
    pub transactions_executed: u64,
    /// Appended transactions without an execution error.
    pub successful_transactions: u64,
    /// Appended transactions with an execution error.
    pub failed_transactions: u64,
    /// Transactions rejected before or instead of being appended.
    pub rejected_transactions: u64,
    /// Events carried by appended transactions.
    pub events_emitted: u64,
    /// Scripts executed.
    pub scripts_executed: u64,
    /// Blocks sealed after genesis.
    pub blocks_committed: u64,
}

/// Where a committed transaction lives.
#[derive(Clone, Copy, Debug)]
struct TxLocation {
    height: u64,
    index: usize,
}

/// Everything published by commit.
struct ChainView {
    /// Sealed blocks; position equals height.
    blocks: Vec<Arc<Block>>,
    latest: Arc<Block>,
    by_id: HashMap<BlockId, usize>,
    transactions: HashMap<TransactionId, TxLocation>,
    committed_ledger: Arc<LedgerState>,
}

impl ChainView {
    fn new(genesis: Block, ledger: LedgerState) -> Self {
        let genesis = Arc::new(genesis);
        let mut view = Self {
            blocks: Vec::new(),
            latest: Arc::clone(&genesis),
            by_id: HashMap::new(),
            transactions: HashMap::new(),
            committed_ledger: Arc::new(ledger),
        };
        view.publish(genesis);
        view
    }

    fn publish(&mut self, block: Arc<Block>) {
        let position = self.blocks.len();
        for (index, id) in block.transaction_ids().enumerate() {
            self.transactions.insert(
                id,
                TxLocation {
                    height: block.height,
                    index,
                },
            );
        }
        self.by_id.insert(block.id, position);
        self.latest = Arc::clone(&block);
        self.blocks.push(block);
    }

    fn block_at(&self, height: u64) -> Option<&Arc<Block>> {
        usize::try_from(height).ok().and_then(|h| self.blocks.get(h))
    }

    fn result(&self, id: &TransactionId) -> Option<TransactionResult> {
        let location = self.transactions.get(id)?;
        self.block_at(location.height)?
            .results
            .get(location.index)
            .cloned()
    }
}

/// The local chain emulator.
///
/// Generic over the virtual machine so tests can substitute their own.
/// `Send + Sync`; share it by reference or `Arc`.
pub struct Emulator<V: VirtualMachine = ReferenceVm> {
    /// Service configuration.
    config: EmulatorConfig,
    /// Program executor.
    vm: V,
    /// Key of the service account.
    service_key: KeyPair,
    /// Block under construction.
    pending: Mutex<PendingBlock>,
    /// Sealed blocks and committed ledger.
    chain: RwLock<ChainView>,
    /// Service statistics.
    stats: RwLock<EmulatorStats>,
}

impl Emulator<ReferenceVm> {
    /// Create an emulator backed by the reference VM.
    pub fn new(config: EmulatorConfig) -> Result<Self> {
        Self::with_vm(config, ReferenceVm::new())
    }
}

impl<V: VirtualMachine> Emulator<V> {
    /// Create an emulator backed by `vm`.
    ///
    /// Funds the service account and seals the genesis block at height 0.
    pub fn with_vm(config: EmulatorConfig, vm: V) -> Result<Self> {
        config.validate()?;
        let service_key = config.service_key()?;
        let ledger = LedgerState::with_service_account(
            service_key.public_key(),
            config.service_account_balance,
        );

        let genesis = Block::genesis();
        let pending = PendingBlock::new(1, genesis.id, ledger.clone());

        info!(
            genesis = %genesis.id,
            service_address = %Address::SERVICE,
            balance = config.service_account_balance,
            "Emulator started"
        );

        Ok(Self {
            config,
            vm,
            service_key,
            pending: Mutex::new(pending),
            chain: RwLock::new(ChainView::new(genesis, ledger)),
            stats: RwLock::new(EmulatorStats::default()),
        })
    }

    // =========================================================================
    // ACCOUNTS
    // =========================================================================

    /// Address of the service account.
    #[must_use]
    pub fn service_address(&self) -> Address {
        Address::SERVICE
    }

    /// Key pair of the service account.
    #[must_use]
    pub fn service_key(&self) -> &KeyPair {
        &self.service_key
    }

    /// Create an account holding `public_keys`.
    ///
    /// Runs as an ordinary service-signed transaction, so its result is
    /// appended to the pending block like any other.
    #[instrument(skip_all, fields(keys = public_keys.len()))]
    pub fn create_account(&self, public_keys: Vec<PublicKey>) -> Result<Address> {
        let mut pending = self.pending.lock();

        let service = Address::SERVICE;
        let sequence_number = pending
            .ledger
            .account(&service)
            .map(|a| a.sequence_number)
            .ok_or(EmulatorError::UnknownAccount(service))?;

        let gas_limit = self
            .config
            .max_transaction_gas_limit
            .min(Transaction::DEFAULT_GAS_LIMIT);
        let tx = Transaction::new(vec![Instruction::CreateAccount { public_keys }])
            .with_gas_limit(gas_limit)
            .with_proposal_key(service, sequence_number)
            .with_payer(service)
            .with_authorizer(service)
            .sign(service, &self.service_key)?;

        let outcome = self.execute_locked(&mut pending, &tx);
        self.record_submission(&outcome);
        let result = outcome?;

        if let Some(err) = result.error() {
            return Err(EmulatorError::AccountCreationFailed(err.message()));
        }

        let address = result
            .events()
            .iter()
            .filter(|e| e.event_type() == event_types::ACCOUNT_CREATED)
            .find_map(|e| e.field("address"))
            .and_then(|v| v.as_str())
            .and_then(Address::from_hex)
            .ok_or_else(|| {
                EmulatorError::AccountCreationFailed("no account creation event".into())
            })?;

        debug!(%address, "Account created");
        Ok(address)
    }

    /// Next sequence number expected from `address`, counting pending
    /// transactions.
    pub fn sequence_number(&self, address: &Address) -> Result<u64> {
        self.pending
            .lock()
            .ledger
            .account(address)
            .map(|a| a.sequence_number)
            .ok_or(EmulatorError::UnknownAccount(*address))
    }

    /// Account as of the last committed block.
    #[must_use]
    pub fn account(&self, address: &Address) -> Option<Account> {
        self.chain.read().committed_ledger.account(address).cloned()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Last sealed block.
    #[must_use]
    pub fn latest_block(&self) -> Arc<Block> {
        Arc::clone(&self.chain.read().latest)
    }

    /// Sealed block at `height`.
    #[must_use]
    pub fn block_by_height(&self, height: u64) -> Option<Arc<Block>> {
        self.chain.read().block_at(height).cloned()
    }

    /// Sealed block with `id`.
    #[must_use]
    pub fn block_by_id(&self, id: &BlockId) -> Option<Arc<Block>> {
        let chain = self.chain.read();
        chain.by_id.get(id).and_then(|&h| chain.blocks.get(h)).cloned()
    }

    /// Result of a pending or committed transaction.
    #[must_use]
    pub fn transaction_result(&self, id: &TransactionId) -> Option<TransactionResult> {
        if let Some(result) = self.pending.lock().result(id) {
            return Some(result.clone());
        }
        self.chain.read().result(id)
    }

    /// Number of results awaiting commit.
    #[must_use]
    pub fn pending_block_size(&self) -> usize {
        self.pending.lock().len()
    }

    /// Results awaiting commit, in submission order.
    #[must_use]
    pub fn pending_results(&self) -> Vec<TransactionResult> {
        self.pending.lock().results().to_vec()
    }

    /// Lifecycle state of the pending block.
    #[must_use]
    pub fn pending_state(&self) -> BlockState {
        self.pending.lock().state()
    }

    /// Get current service statistics.
    #[must_use]
    pub fn stats(&self) -> EmulatorStats {
        self.stats.read().clone()
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Checks, executes and appends `tx`. Caller holds the pending lock.
    ///
    /// The VM runs on a copy of the pending ledger; the copy replaces the
    /// pending ledger only once the result is known to be appendable.
    fn execute_locked(
        &self,
        pending: &mut PendingBlock,
        tx: &Transaction,
    ) -> Result<TransactionResult> {
        check_well_formed(tx, self.config.max_transaction_gas_limit)?;
        check_signatures(tx, &pending.ledger)?;
        check_sequence_number(tx, &pending.ledger)?;

        let tx_index = pending.next_transaction_index().ok_or(EmulatorError::BlockFull)?;

        let mut working = pending.ledger.clone();
        let procedure = self.vm.run_transaction(tx, &mut working)?;
        let result = assemble_transaction_result(&procedure, tx_index)?;

        let tx_id = result.transaction_id();
        if pending.contains(&tx_id) || self.chain.read().transactions.contains_key(&tx_id) {
            return Err(EmulatorError::DuplicateTransaction(tx_id));
        }

        let proposer = tx.body.proposal_key.address;
        if let Some(account) = working.account_mut(&proposer) {
            account.sequence_number += 1;
        }
        pending.ledger = working;
        pending.push(result.clone());

        info!(
            tx_id = %tx_id,
            tx_index,
            height = pending.height,
            events = result.events().len(),
            computation = procedure.computation_used,
            succeeded = result.succeeded(),
            "Transaction executed"
        );
        Ok(result)
    }

    fn record_submission(&self, outcome: &Result<TransactionResult>) {
        let mut stats = self.stats.write();
        match outcome {
            Ok(result) => {
                stats.transactions_executed += 1;
                stats.events_emitted += result.events().len() as u64;
                if result.succeeded() {
                    stats.successful_transactions += 1;
                } else {
                    stats.failed_transactions += 1;
                }
            }
            Err(e) => {
                stats.rejected_transactions += 1;
                warn!(error = %e, "Transaction rejected");
            }
        }
    }
}

impl<V: VirtualMachine> BlockProgressionApi for Emulator<V> {
    #[instrument(skip_all, fields(proposer = %tx.body.proposal_key.address))]
    fn submit_transaction(&self, tx: Transaction) -> Result<TransactionResult> {
        let mut pending = self.pending.lock();
        let outcome = self.execute_locked(&mut pending, &tx);
        drop(pending);

        self.record_submission(&outcome);
        outcome
    }

    #[instrument(skip_all, fields(instructions = script.program.len()))]
    fn execute_script(&self, script: Script) -> Result<ScriptResult> {
        let ledger = if self.config.scripts_see_pending {
            Arc::new(self.pending.lock().ledger.clone())
        } else {
            Arc::clone(&self.chain.read().committed_ledger)
        };

        let procedure = self
            .vm
            .run_script(&script, &ledger, self.config.script_gas_limit)?;
        let result = assemble_script_result(&procedure)?;

        self.stats.write().scripts_executed += 1;
        debug!(
            script_id = %result.script_id(),
            succeeded = result.succeeded(),
            computation = procedure.computation_used,
            "Script executed"
        );
        Ok(result)
    }

    #[instrument(skip_all)]
    fn commit_block(&self) -> Result<Arc<Block>> {
        let mut pending = self.pending.lock();
        let block = Arc::new(pending.seal());
        let ledger = Arc::new(pending.ledger.clone());

        {
            let mut chain = self.chain.write();
            chain.publish(Arc::clone(&block));
            chain.committed_ledger = ledger;
        }
        drop(pending);

        self.stats.write().blocks_committed += 1;
        info!(
            height = block.height,
            id = %block.id,
            transactions = block.len(),
            "Block committed"
        );
        Ok(block)
    }
}
