//! End-to-end flows: submit, script and commit against a real emulator.

pub mod ledger_flows;
pub mod lifecycle;
