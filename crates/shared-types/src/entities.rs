//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Accounts**: `Address`, `Account`
//! - **Programs**: `Instruction`, `Script`
//! - **Transactions**: `TransactionBody`, `ProposalKey`, `Transaction`,
//!   `TransactionSignature`

use crate::errors::EncodingError;
use crate::keys::KeyPair;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::collections::BTreeMap;
use std::fmt;

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Free-form JSON value stored in accounts and carried by events.
pub use serde_json::Value;

/// JSON object with string keys, used for event fields.
pub type FieldMap = serde_json::Map<String, Value>;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// An 8-byte account address.
///
/// Addresses are handed out sequentially by the ledger; the service account
/// always owns index 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 8]);

impl Address {
    /// The zero address. Never assigned to an account.
    pub const ZERO: Self = Self([0u8; 8]);

    /// Address of the service (root) account.
    pub const SERVICE: Self = Self::from_index(1);

    /// Creates the address for the `index`-th account.
    #[must_use]
    pub const fn from_index(index: u64) -> Self {
        Self(index.to_be_bytes())
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 8]>::try_from(slice).ok().map(Self)
    }

    /// Parses a `0x`-prefixed or bare hex address.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s.trim_start_matches("0x")).ok()?;
        Self::from_slice(&bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 8]> for Address {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

/// Ledger record of one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// Token balance in base units.
    pub balance: u64,
    /// Keys allowed to sign on behalf of this account.
    pub public_keys: Vec<PublicKey>,
    /// Next expected proposal-key sequence number.
    pub sequence_number: u64,
    /// Key/value storage written by `Store` instructions.
    pub storage: BTreeMap<String, Value>,
}

impl Account {
    /// Creates an empty account with the given keys.
    #[must_use]
    pub fn new(address: Address, public_keys: Vec<PublicKey>) -> Self {
        Self {
            address,
            balance: 0,
            public_keys,
            sequence_number: 0,
            storage: BTreeMap::new(),
        }
    }

    /// Returns true if `key` is registered on this account.
    #[must_use]
    pub fn has_key(&self, key: &PublicKey) -> bool {
        self.public_keys.iter().any(|k| k == key)
    }
}

// =============================================================================
// CLUSTER B: PROGRAMS
// =============================================================================

/// One step of a transaction or script program.
///
/// Every instruction costs one unit of computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Append a line to the execution log.
    Log(String),
    /// Emit a custom event with the given fields.
    Emit {
        /// Fully qualified event type, e.g. `A.0x01.Token.Deposit`.
        event_type: String,
        /// Event payload.
        fields: FieldMap,
    },
    /// Create a new account holding `public_keys`.
    CreateAccount {
        /// Keys of the new account.
        public_keys: Vec<PublicKey>,
    },
    /// Create `amount` new tokens in `to`. Requires the service account.
    Mint {
        /// Recipient.
        to: Address,
        /// Amount to create.
        amount: u64,
    },
    /// Move tokens. `from` must authorize the transaction.
    Transfer {
        /// Source account.
        from: Address,
        /// Destination account.
        to: Address,
        /// Amount to move.
        amount: u64,
    },
    /// Write `value` under `key` in `account` storage.
    Store {
        /// Owner of the storage slot.
        account: Address,
        /// Storage key.
        key: String,
        /// Value to store.
        value: Value,
    },
    /// Return the balance of `account`.
    ReadBalance {
        /// Account to inspect.
        account: Address,
    },
    /// Return the value stored under `key` in `account` (null if unset).
    Load {
        /// Account to inspect.
        account: Address,
        /// Storage key.
        key: String,
    },
    /// Stop execution with a failure message.
    Abort(String),
}

impl Instruction {
    /// Returns true if this instruction writes to the ledger.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::CreateAccount { .. }
                | Self::Mint { .. }
                | Self::Transfer { .. }
                | Self::Store { .. }
        )
    }
}

/// A read-only program executed outside of any block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Instructions to run.
    pub program: Vec<Instruction>,
}

impl Script {
    /// Creates a script from a program.
    #[must_use]
    pub fn new(program: Vec<Instruction>) -> Self {
        Self { program }
    }

    /// Canonical byte encoding.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(bincode::serialize(self)?)
    }
}

// =============================================================================
// CLUSTER C: TRANSACTIONS
// =============================================================================

/// Proposal key: the account whose sequence number orders this transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalKey {
    /// Proposing account.
    pub address: Address,
    /// Expected sequence number of the proposing account.
    pub sequence_number: u64,
}

/// Everything in a transaction that is covered by signatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBody {
    /// Instructions to execute.
    pub program: Vec<Instruction>,
    /// Computation limit.
    pub gas_limit: u64,
    /// Proposal key.
    pub proposal_key: ProposalKey,
    /// Account paying for the transaction.
    pub payer: Address,
    /// Accounts authorizing the transaction.
    pub authorizers: Vec<Address>,
}

/// Signature of one account over the transaction body.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// Signing account.
    pub address: Address,
    /// Ed25519 signature over the canonical body bytes.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

/// A signed transaction as submitted to the emulator.
///
/// Built fluently:
///
/// ```ignore
/// let tx = Transaction::new(program)
///     .with_gas_limit(20)
///     .with_proposal_key(addr, seq)
///     .with_payer(addr)
///     .with_authorizer(addr)
///     .sign(addr, &key)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed content.
    pub body: TransactionBody,
    /// Signatures over `body`.
    pub signatures: Vec<TransactionSignature>,
}

impl Transaction {
    /// Default computation limit for new transactions.
    pub const DEFAULT_GAS_LIMIT: u64 = 100;

    /// Creates an unsigned transaction with zero-address roles.
    #[must_use]
    pub fn new(program: Vec<Instruction>) -> Self {
        Self {
            body: TransactionBody {
                program,
                gas_limit: Self::DEFAULT_GAS_LIMIT,
                proposal_key: ProposalKey {
                    address: Address::ZERO,
                    sequence_number: 0,
                },
                payer: Address::ZERO,
                authorizers: Vec::new(),
            },
            signatures: Vec::new(),
        }
    }

    /// Sets the computation limit.
    #[must_use]
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.body.gas_limit = gas_limit;
        self
    }

    /// Sets the proposal key.
    #[must_use]
    pub fn with_proposal_key(mut self, address: Address, sequence_number: u64) -> Self {
        self.body.proposal_key = ProposalKey {
            address,
            sequence_number,
        };
        self
    }

    /// Sets the payer.
    #[must_use]
    pub fn with_payer(mut self, payer: Address) -> Self {
        self.body.payer = payer;
        self
    }

    /// Adds an authorizer.
    #[must_use]
    pub fn with_authorizer(mut self, authorizer: Address) -> Self {
        self.body.authorizers.push(authorizer);
        self
    }

    /// Signs the current body as `address` and appends the signature.
    ///
    /// Sign after the body is final: any later change invalidates the
    /// signatures already attached.
    pub fn sign(mut self, address: Address, key: &KeyPair) -> Result<Self, EncodingError> {
        let payload = self.payload_bytes()?;
        self.signatures.push(TransactionSignature {
            address,
            signature: key.sign(&payload),
        });
        Ok(self)
    }

    /// Canonical encoding of the body; the message every signer signs.
    pub fn payload_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(bincode::serialize(&self.body)?)
    }

    /// Distinct accounts that must sign: proposer, payer, then authorizers.
    #[must_use]
    pub fn required_signers(&self) -> Vec<Address> {
        let mut signers = Vec::with_capacity(2 + self.body.authorizers.len());
        let candidates = [self.body.proposal_key.address, self.body.payer]
            .into_iter()
            .chain(self.body.authorizers.iter().copied());
        for address in candidates {
            if !signers.contains(&address) {
                signers.push(address);
            }
        }
        signers
    }
}

// =============================================================================
// TESTS
// =============================================================================
