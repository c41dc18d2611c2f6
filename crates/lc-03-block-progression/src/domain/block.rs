//! # Blocks
//!
//! A [`PendingBlock`] accumulates results until commit seals it into an
//! immutable [`Block`].

use lc_01_virtual_machine::domain::LedgerState;
use lc_02_execution_results::domain::{Event, TransactionId, TransactionResult};
use serde::{Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;

// =============================================================================
// BLOCK ID
// =============================================================================

/// SHA3-256 over the block's height, parent id and ordered transaction ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockId(pub [u8; 32]);

impl BlockId {
    /// Parent id of the genesis block.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Computes the id of a block.
    #[must_use]
    pub fn compute<'a>(
        height: u64,
        parent_id: &BlockId,
        transaction_ids: impl IntoIterator<Item = &'a TransactionId>,
    ) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(height.to_be_bytes());
        hasher.update(parent_id.0);
        for id in transaction_ids {
            hasher.update(id.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", hex::encode(self.0))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

// =============================================================================
// SEALED BLOCK
// =============================================================================

/// A committed block. Never mutated after sealing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    /// Height; genesis is 0.
    pub height: u64,
    /// Identifier.
    pub id: BlockId,
    /// Identifier of the previous block.
    pub parent_id: BlockId,
    /// Results in submission order.
    pub results: Vec<TransactionResult>,
}

impl Block {
    /// Seals `results` at `height` on top of `parent_id`.
    #[must_use]
    pub fn seal(height: u64, parent_id: BlockId, results: Vec<TransactionResult>) -> Self {
        let ids: Vec<TransactionId> =
            results.iter().map(TransactionResult::transaction_id).collect();
        let id = BlockId::compute(height, &parent_id, &ids);
        Self {
            height,
            id,
            parent_id,
            results,
        }
    }

    /// The empty block at height 0.
    #[must_use]
    pub fn genesis() -> Self {
        Self::seal(0, BlockId::ZERO, Vec::new())
    }

    /// Number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if the block holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Transaction ids in block order.
    pub fn transaction_ids(&self) -> impl Iterator<Item = TransactionId> + '_ {
        self.results.iter().map(TransactionResult::transaction_id)
    }

    /// All events of the block, in transaction then emission order.
    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.results.iter().flat_map(|r| r.events().iter())
    }
}

// =============================================================================
// PENDING BLOCK
// =============================================================================

/// Lifecycle state of the pending block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BlockState {
    /// No transaction since the last commit.
    Empty,
    /// At least one transaction awaits commit.
    Pending,
}

/// The block under construction and the ledger its transactions produced.
#[derive(Clone, Debug)]
pub struct PendingBlock {
    /// Height this block will be sealed at.
    pub height: u64,
    /// Id of the last sealed block.
    pub parent_id: BlockId,
    results: Vec<TransactionResult>,
    /// Ledger after every appended transaction.
    pub ledger: LedgerState,
}

impl PendingBlock {
    /// Starts an empty pending block.
    #[must_use]
    pub fn new(height: u64, parent_id: BlockId, ledger: LedgerState) -> Self {
        Self {
            height,
            parent_id,
            results: Vec::new(),
            ledger,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BlockState {
        if self.results.is_empty() {
            BlockState::Empty
        } else {
            BlockState::Pending
        }
    }

    /// Number of appended results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing was appended since the last commit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Appended results in submission order.
    #[must_use]
    pub fn results(&self) -> &[TransactionResult] {
        &self.results
    }

    /// Index the next appended transaction receives, if one fits.
    #[must_use]
    pub fn next_transaction_index(&self) -> Option<u32> {
        u32::try_from(self.results.len()).ok()
    }

    /// Looks up an appended result.
    #[must_use]
    pub fn result(&self, id: &TransactionId) -> Option<&TransactionResult> {
        self.results.iter().find(|r| r.transaction_id() == *id)
    }

    /// Returns true if a result with `id` was appended.
    #[must_use]
    pub fn contains(&self, id: &TransactionId) -> bool {
        self.result(id).is_some()
    }

    /// Appends a result.
    pub fn push(&mut self, result: TransactionResult) {
        self.results.push(result);
    }

    /// Seals the accumulated results and resets to an empty block at the
    /// next height on top of the sealed one. The ledger carries over.
    pub fn seal(&mut self) -> Block {
        let results = std::mem::take(&mut self.results);
        let block = Block::seal(self.height, self.parent_id, results);
        self.height += 1;
        self.parent_id = block.id;
        block
    }
}
