//! # Block Lifecycle Flows
//!
//! Submissions accumulate in the pending block, commit seals them, and the
//! sealed block is queryable by height, by id and per transaction.
//!
//! ## Flow Tested:
//!
//! 1. **Accounts**: creation and funding go through the pending block
//! 2. **Mixed block**: success, failure and custom events sealed together
//! 3. **Chain**: heights and parent links across commits
//! 4. **Serialization**: the JSON shape of a sealed block

#[cfg(test)]
mod tests {
    use lc_01_virtual_machine::prelude::event_types;
    use lc_02_execution_results::prelude::{ExecutionErrorKind, TransactionResult};
    use lc_03_block_progression::prelude::{BlockId, BlockProgressionApi, BlockState};
    use serde_json::json;
    use shared_types::{Instruction, Script};

    use crate::fixtures::{service_transaction, test_emulator, tick, transfer, TestAccount};

    // =============================================================================
    // ACCOUNTS
    // =============================================================================

    #[test]
    fn test_account_setup_lands_in_first_block() {
        let emulator = test_emulator().unwrap();
        let alice = TestAccount::create(&emulator, 1).unwrap();
        let mint = service_transaction(
            &emulator,
            vec![Instruction::Mint {
                to: alice.address,
                amount: 500,
            }],
        )
        .unwrap();
        emulator.submit_transaction(mint).unwrap();

        assert_eq!(emulator.pending_state(), BlockState::Pending);
        assert!(emulator.account(&alice.address).is_none());

        let block = emulator.commit_block().unwrap();

        assert_eq!(block.height, 1);
        assert_eq!(block.len(), 2);
        assert_eq!(
            block.results[0].events()[0].event_type(),
            event_types::ACCOUNT_CREATED
        );
        assert_eq!(
            block.results[1].events()[0].event_type(),
            event_types::TOKENS_MINTED
        );
        assert_eq!(emulator.account(&alice.address).unwrap().balance, 500);
    }

    // =============================================================================
    // MIXED BLOCK
    // =============================================================================

    #[test]
    fn test_mixed_block_is_queryable_after_commit() {
        let emulator = test_emulator().unwrap();
        let alice = TestAccount::create(&emulator, 1).unwrap();
        let bob = TestAccount::create(&emulator, 2).unwrap();
        let fund = service_transaction(
            &emulator,
            vec![Instruction::Mint {
                to: alice.address,
                amount: 100,
            }],
        )
        .unwrap();
        emulator.submit_transaction(fund).unwrap();
        emulator.commit_block().unwrap();

        let ok = alice
            .transaction(&emulator, vec![transfer(alice.address, bob.address, 30)])
            .unwrap();
        let ok = emulator.submit_transaction(ok).unwrap();
        let broke = bob
            .transaction(&emulator, vec![transfer(bob.address, alice.address, 1_000)])
            .unwrap();
        let broke = emulator.submit_transaction(broke).unwrap();
        let ticks = service_transaction(&emulator, vec![tick(1), tick(2)]).unwrap();
        let ticks = emulator.submit_transaction(ticks).unwrap();

        // Visible before commit through the pending block.
        assert_eq!(
            emulator.transaction_result(&broke.transaction_id()),
            Some(broke.clone())
        );
        assert_eq!(emulator.pending_results().len(), 3);

        let block = emulator.commit_block().unwrap();

        assert_eq!(block.height, 2);
        assert_eq!(block.results, vec![ok.clone(), broke.clone(), ticks.clone()]);
        assert_eq!(emulator.block_by_height(2).unwrap().id, block.id);
        assert_eq!(emulator.block_by_id(&block.id).unwrap().height, 2);

        for result in [&ok, &broke, &ticks] {
            let stored = emulator.transaction_result(&result.transaction_id()).unwrap();
            assert_eq!(&stored, result);
        }

        assert!(ok.succeeded());
        assert_eq!(broke.error().unwrap().kind(), ExecutionErrorKind::Execution);
        assert!(broke.events().is_empty());

        let indices: Vec<(u32, u32)> = ticks
            .events()
            .iter()
            .map(|e| (e.transaction_index(), e.event_index()))
            .collect();
        assert_eq!(indices, vec![(2, 0), (2, 1)]);

        // 2 creations, 1 mint, 3 submissions
        let stats = emulator.stats();
        assert_eq!(stats.transactions_executed, 6);
        assert_eq!(stats.failed_transactions, 1);
        assert_eq!(stats.blocks_committed, 2);
    }

    #[test]
    fn test_scripts_are_never_sealed() {
        let emulator = test_emulator().unwrap();
        let service = emulator.service_address();

        for _ in 0..3 {
            let result = emulator
                .execute_script(Script::new(vec![
                    Instruction::Log("probe".into()),
                    Instruction::ReadBalance { account: service },
                ]))
                .unwrap();
            assert_eq!(result.logs(), ["probe"]);
            assert!(emulator
                .transaction_result(&result.script_id())
                .is_none());
        }

        assert_eq!(emulator.pending_state(), BlockState::Empty);
        assert!(emulator.commit_block().unwrap().is_empty());
    }

    // =============================================================================
    // CHAIN
    // =============================================================================

    #[test]
    fn test_commits_link_parent_ids() {
        let emulator = test_emulator().unwrap();
        let genesis = emulator.latest_block();
        assert_eq!(genesis.height, 0);
        assert_eq!(genesis.parent_id, BlockId::ZERO);

        let mut parent = genesis.id;
        for height in 1..=4u64 {
            if height % 2 == 0 {
                let tx = service_transaction(&emulator, vec![tick(height)]).unwrap();
                emulator.submit_transaction(tx).unwrap();
            }
            let block = emulator.commit_block().unwrap();
            assert_eq!(block.height, height);
            assert_eq!(block.parent_id, parent);
            assert_eq!(block.len(), usize::from(height % 2 == 0));
            parent = block.id;
        }

        assert_eq!(emulator.latest_block().id, parent);
        assert!(emulator.block_by_height(5).is_none());
    }

    // =============================================================================
    // SERIALIZATION
    // =============================================================================

    #[test]
    fn test_block_json_shape() {
        let emulator = test_emulator().unwrap();
        let service = emulator.service_address();
        let ok = service_transaction(&emulator, vec![tick(7)]).unwrap();
        let ok: TransactionResult = emulator.submit_transaction(ok).unwrap();
        let aborted =
            service_transaction(&emulator, vec![Instruction::Abort("halt".into())]).unwrap();
        emulator.submit_transaction(aborted).unwrap();
        let block = emulator.commit_block().unwrap();

        let value = serde_json::to_value(&*block).unwrap();

        assert_eq!(value["height"], json!(1));
        assert_eq!(value["id"], json!(block.id.to_string()));
        let first = &value["results"][0];
        assert_eq!(first["transaction_id"], json!(ok.transaction_id().to_hex()));
        assert_eq!(first["error"], serde_json::Value::Null);
        assert_eq!(first["events"][0]["transaction_id"], first["transaction_id"]);
        assert_eq!(first["events"][0]["transaction_index"], json!(0));
        assert_eq!(first["events"][0]["fields"]["n"], json!(7));
        assert_eq!(
            first["events"][0]["emitter"],
            serde_json::to_value(service).unwrap()
        );

        let second = &value["results"][1];
        assert_eq!(second["error"]["kind"], json!("execution"));
        assert_eq!(second["error"]["message"], json!("execution aborted: halt"));
        assert_eq!(second["events"], json!([]));
    }
}
