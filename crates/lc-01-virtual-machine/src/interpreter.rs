//! # Reference Interpreter
//!
//! Runs a flat instruction list against a working copy of the ledger.
//! Every instruction costs one computation unit; the first error stops the
//! program and discards the working copy together with all emitted events.
//! Log lines survive a failure.

use crate::domain::entities::{
    event_types, RuntimeEvent, ScriptProcedure, TransactionProcedure,
};
use crate::domain::ledger::LedgerState;
use crate::domain::value_objects::VmIdentifier;
use crate::errors::VmError;
use crate::ports::inbound::VirtualMachine;
use serde_json::json;
use shared_types::{Address, FieldMap, Instruction, Script, Transaction, Value};
use tracing::{debug, instrument};

/// Interpreter state for one program run.
pub struct Interpreter<'a> {
    /// Working copy of the ledger.
    ledger: LedgerState,
    /// Accounts that authorized the run (empty for scripts).
    authorizers: &'a [Address],
    /// Account custom events are attributed to.
    emitter: Address,
    /// Scripts may not mutate.
    read_only: bool,
    /// Computation limit.
    gas_limit: u64,
    /// Computation consumed so far.
    gas_used: u64,
    /// Log lines.
    logs: Vec<String>,
    /// Events emitted so far.
    events: Vec<RuntimeEvent>,
    /// Last value produced by `ReadBalance` / `Load`.
    value: Option<Value>,
}

/// What a finished run leaves behind.
pub struct RunOutcome {
    /// Working ledger; only meaningful when `err` is `None`.
    pub ledger: LedgerState,
    /// First error raised, if any.
    pub err: Option<VmError>,
    /// Log lines (kept on failure).
    pub logs: Vec<String>,
    /// Events (empty on failure).
    pub events: Vec<RuntimeEvent>,
    /// Returned value (cleared on failure).
    pub value: Option<Value>,
    /// Computation consumed.
    pub gas_used: u64,
}

impl<'a> Interpreter<'a> {
    /// Interpreter for a transaction.
    pub fn for_transaction(tx: &'a Transaction, ledger: &LedgerState) -> Self {
        Self {
            ledger: ledger.clone(),
            authorizers: &tx.body.authorizers,
            emitter: tx.body.payer,
            read_only: false,
            gas_limit: tx.body.gas_limit,
            gas_used: 0,
            logs: Vec::new(),
            events: Vec::new(),
            value: None,
        }
    }

    /// Interpreter for a read-only script.
    pub fn for_script(ledger: &LedgerState, gas_limit: u64) -> Self {
        Self {
            ledger: ledger.clone(),
            authorizers: &[],
            emitter: Address::SERVICE,
            read_only: true,
            gas_limit,
            gas_used: 0,
            logs: Vec::new(),
            events: Vec::new(),
            value: None,
        }
    }

    /// Runs `program` to completion or first error.
    pub fn run(mut self, program: &[Instruction]) -> RunOutcome {
        let mut err = None;
        for instruction in program {
            if let Err(e) = self.step(instruction) {
                err = Some(e);
                break;
            }
        }

        if err.is_some() {
            self.events.clear();
            self.value = None;
        }

        RunOutcome {
            ledger: self.ledger,
            err,
            logs: self.logs,
            events: self.events,
            value: self.value,
            gas_used: self.gas_used,
        }
    }

    fn step(&mut self, instruction: &Instruction) -> Result<(), VmError> {
        self.charge()?;

        if self.read_only && instruction.is_mutating() {
            return Err(VmError::ReadOnlyViolation {
                instruction: instruction_name(instruction).to_string(),
            });
        }

        match instruction {
            Instruction::Log(line) => {
                self.logs.push(line.clone());
            }
            Instruction::Emit { event_type, fields } => {
                let event = RuntimeEvent::encode(event_type.as_str(), self.emitter, fields)?;
                self.events.push(event);
            }
            Instruction::CreateAccount { public_keys } => {
                let address = self.ledger.create_account(public_keys.clone());
                self.emit_builtin(
                    event_types::ACCOUNT_CREATED,
                    [("address", json!(address.to_string()))],
                )?;
            }
            Instruction::Mint { to, amount } => {
                self.require_authorizer(&Address::SERVICE)?;
                self.credit(to, *amount)?;
                self.emit_builtin(
                    event_types::TOKENS_MINTED,
                    [("to", json!(to.to_string())), ("amount", json!(amount))],
                )?;
            }
            Instruction::Transfer { from, to, amount } => {
                self.require_authorizer(from)?;
                if !self.ledger.contains(to) {
                    return Err(VmError::AccountNotFound(*to));
                }
                self.debit(from, *amount)?;
                self.credit(to, *amount)?;
                self.emit_builtin(
                    event_types::TOKENS_WITHDRAWN,
                    [("from", json!(from.to_string())), ("amount", json!(amount))],
                )?;
                self.emit_builtin(
                    event_types::TOKENS_DEPOSITED,
                    [("to", json!(to.to_string())), ("amount", json!(amount))],
                )?;
            }
            Instruction::Store {
                account,
                key,
                value,
            } => {
                self.require_authorizer(account)?;
                let target = self
                    .ledger
                    .account_mut(account)
                    .ok_or(VmError::AccountNotFound(*account))?;
                target.storage.insert(key.clone(), value.clone());
            }
            Instruction::ReadBalance { account } => {
                let balance = self
                    .ledger
                    .account(account)
                    .ok_or(VmError::AccountNotFound(*account))?
                    .balance;
                self.value = Some(json!(balance));
            }
            Instruction::Load { account, key } => {
                let stored = self
                    .ledger
                    .account(account)
                    .ok_or(VmError::AccountNotFound(*account))?
                    .storage
                    .get(key)
                    .cloned()
                    .unwrap_or(Value::Null);
                self.value = Some(stored);
            }
            Instruction::Abort(reason) => {
                return Err(VmError::Aborted(reason.clone()));
            }
        }
        Ok(())
    }

    fn charge(&mut self) -> Result<(), VmError> {
        if self.gas_used >= self.gas_limit {
            return Err(VmError::ComputationLimitExceeded {
                limit: self.gas_limit,
            });
        }
        self.gas_used += 1;
        Ok(())
    }

    fn require_authorizer(&self, account: &Address) -> Result<(), VmError> {
        if self.authorizers.contains(account) {
            Ok(())
        } else {
            Err(VmError::Unauthorized(*account))
        }
    }

    fn debit(&mut self, account: &Address, amount: u64) -> Result<(), VmError> {
        let source = self
            .ledger
            .account_mut(account)
            .ok_or(VmError::AccountNotFound(*account))?;
        if source.balance < amount {
            return Err(VmError::InsufficientBalance {
                account: *account,
                required: amount,
                available: source.balance,
            });
        }
        source.balance -= amount;
        Ok(())
    }

    fn credit(&mut self, account: &Address, amount: u64) -> Result<(), VmError> {
        let target = self
            .ledger
            .account_mut(account)
            .ok_or(VmError::AccountNotFound(*account))?;
        target.balance = target
            .balance
            .checked_add(amount)
            .ok_or(VmError::BalanceOverflow(*account))?;
        Ok(())
    }

    fn emit_builtin<const N: usize>(
        &mut self,
        event_type: &str,
        fields: [(&str, Value); N],
    ) -> Result<(), VmError> {
        let fields: FieldMap = fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let event = RuntimeEvent::encode(event_type, Address::SERVICE, &fields)?;
        self.events.push(event);
        Ok(())
    }
}

fn instruction_name(instruction: &Instruction) -> &'static str {
    match instruction {
        Instruction::Log(_) => "Log",
        Instruction::Emit { .. } => "Emit",
        Instruction::CreateAccount { .. } => "CreateAccount",
        Instruction::Mint { .. } => "Mint",
        Instruction::Transfer { .. } => "Transfer",
        Instruction::Store { .. } => "Store",
        Instruction::ReadBalance { .. } => "ReadBalance",
        Instruction::Load { .. } => "Load",
        Instruction::Abort(_) => "Abort",
    }
}

// =============================================================================
// REFERENCE VM
// =============================================================================

/// The emulator's built-in virtual machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceVm;

impl ReferenceVm {
    /// Creates the VM.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl VirtualMachine for ReferenceVm {
    #[instrument(skip_all, fields(instructions = tx.body.program.len()))]
    fn run_transaction(
        &self,
        tx: &Transaction,
        ledger: &mut LedgerState,
    ) -> Result<TransactionProcedure, VmError> {
        let payload = tx
            .payload_bytes()
            .map_err(|e| VmError::Internal(e.to_string()))?;
        let id = VmIdentifier::digest(&payload);

        let outcome = Interpreter::for_transaction(tx, ledger).run(&tx.body.program);

        match &outcome.err {
            None => {
                *ledger = outcome.ledger;
                debug!(
                    ?id,
                    computation = outcome.gas_used,
                    events = outcome.events.len(),
                    "Transaction executed"
                );
            }
            Some(e) => {
                debug!(?id, error = %e, "Transaction reverted");
            }
        }

        Ok(TransactionProcedure {
            id,
            err: outcome.err,
            logs: outcome.logs,
            events: outcome.events,
            computation_used: outcome.gas_used,
        })
    }

    #[instrument(skip_all, fields(instructions = script.program.len(), gas_limit = gas_limit))]
    fn run_script(
        &self,
        script: &Script,
        ledger: &LedgerState,
        gas_limit: u64,
    ) -> Result<ScriptProcedure, VmError> {
        let canonical = script
            .canonical_bytes()
            .map_err(|e| VmError::Internal(e.to_string()))?;
        let id = VmIdentifier::digest(&canonical);

        let outcome = Interpreter::for_script(ledger, gas_limit).run(&script.program);
        debug!(?id, failed = outcome.err.is_some(), "Script executed");

        Ok(ScriptProcedure {
            id,
            value: outcome.value,
            err: outcome.err,
            logs: outcome.logs,
            events: outcome.events,
            computation_used: outcome.gas_used,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
