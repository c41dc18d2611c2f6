//! Inbound ports (API) for the Block Progression subsystem.

use crate::domain::Block;
use crate::error::Result;
use lc_02_execution_results::domain::{ScriptResult, TransactionResult};
use shared_types::{Script, Transaction};
use std::sync::Arc;

/// Primary API for driving the local chain.
///
/// Implementations are shared between threads; every method takes `&self`.
pub trait BlockProgressionApi: Send + Sync {
    /// Execute a transaction and append its result to the pending block.
    ///
    /// A transaction that fails during execution is still appended and
    /// returned as `Ok` with its `ExecutionError`. `Err` means the
    /// transaction was never appended.
    fn submit_transaction(&self, tx: Transaction) -> Result<TransactionResult>;

    /// Run a read-only script. Never touches the pending block.
    fn execute_script(&self, script: Script) -> Result<ScriptResult>;

    /// Seal the pending block, even if it is empty.
    fn commit_block(&self) -> Result<Arc<Block>>;
}
