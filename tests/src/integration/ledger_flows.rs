//! # Ledger Flows
//!
//! Token movements and stored values observed through transaction results,
//! committed balances and scripts.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lc_03_block_progression::prelude::{BlockProgressionApi, Emulator};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use serde_json::json;
    use shared_types::{Address, FieldMap, Instruction, Script};

    use crate::fixtures::{service_transaction, test_emulator, transfer, TestAccount};

    const START_BALANCE: u64 = 100;

    fn funded(emulator: &Emulator, n: u8) -> Vec<TestAccount> {
        let accounts: Vec<TestAccount> = (1..=n)
            .map(|seed| TestAccount::create(emulator, seed).unwrap())
            .collect();
        let mints = accounts
            .iter()
            .map(|a| Instruction::Mint {
                to: a.address,
                amount: START_BALANCE,
            })
            .collect();
        let tx = service_transaction(emulator, mints).unwrap();
        assert!(emulator.submit_transaction(tx).unwrap().succeeded());
        emulator.commit_block().unwrap();
        accounts
    }

    #[test]
    fn test_random_transfers_match_balance_model() {
        let emulator = test_emulator().unwrap();
        let accounts = funded(&emulator, 4);
        let mut model: HashMap<Address, u64> =
            accounts.iter().map(|a| (a.address, START_BALANCE)).collect();
        let mut rng = StdRng::seed_from_u64(0x1c);

        for _ in 0..40 {
            let from = rng.gen_range(0..accounts.len());
            let to = (from + rng.gen_range(1..accounts.len())) % accounts.len();
            let amount = rng.gen_range(1..=80u64);
            let (sender, receiver) = (&accounts[from], &accounts[to]);

            let tx = sender
                .transaction(
                    &emulator,
                    vec![transfer(sender.address, receiver.address, amount)],
                )
                .unwrap();
            let result = emulator.submit_transaction(tx).unwrap();

            let affordable = model[&sender.address] >= amount;
            assert_eq!(result.succeeded(), affordable);
            if affordable {
                *model.get_mut(&sender.address).unwrap() -= amount;
                *model.get_mut(&receiver.address).unwrap() += amount;
                assert_eq!(result.events().len(), 2);
            } else {
                assert!(result.events().is_empty());
                assert!(result.error_message().unwrap().contains("insufficient balance"));
            }
        }

        let block = emulator.commit_block().unwrap();
        assert_eq!(block.len(), 40);

        let mut total = 0;
        for account in &accounts {
            let balance = emulator.account(&account.address).unwrap().balance;
            assert_eq!(balance, model[&account.address]);
            total += balance;
        }
        assert_eq!(total, START_BALANCE * accounts.len() as u64);
    }

    #[test]
    fn test_sequence_numbers_count_failures() {
        let emulator = test_emulator().unwrap();
        let accounts = funded(&emulator, 2);
        let (alice, bob) = (&accounts[0], &accounts[1]);

        let plan = [10, 500, 20, 500, 500];
        for amount in plan {
            let tx = alice
                .transaction(&emulator, vec![transfer(alice.address, bob.address, amount)])
                .unwrap();
            emulator.submit_transaction(tx).unwrap();
        }

        assert_eq!(emulator.sequence_number(&alice.address).unwrap(), 5);
        assert_eq!(emulator.sequence_number(&bob.address).unwrap(), 0);

        let block = emulator.commit_block().unwrap();
        let outcomes: Vec<bool> = block.results.iter().map(|r| r.succeeded()).collect();
        assert_eq!(outcomes, vec![true, false, true, false, false]);
        assert_eq!(emulator.account(&alice.address).unwrap().balance, 70);
        assert_eq!(emulator.account(&alice.address).unwrap().sequence_number, 5);
    }

    #[test]
    fn test_custom_event_fields_survive_translation() {
        let emulator = test_emulator().unwrap();
        let mut fields = FieldMap::new();
        fields.insert("id".into(), json!(42));
        fields.insert("tags".into(), json!(["a", "b"]));
        fields.insert("meta".into(), json!({"owner": "x", "level": 3}));
        let tx = service_transaction(
            &emulator,
            vec![Instruction::Emit {
                event_type: "A.Market.Listed".into(),
                fields: fields.clone(),
            }],
        )
        .unwrap();

        let result = emulator.submit_transaction(tx).unwrap();

        let event = &result.events()[0];
        assert_eq!(event.event_type(), "A.Market.Listed");
        assert_eq!(event.fields(), &fields);
        assert_eq!(event.field("meta").unwrap()["level"], json!(3));
    }

    #[test]
    fn test_stored_value_readable_by_script_after_commit() {
        let emulator = test_emulator().unwrap();
        let accounts = funded(&emulator, 1);
        let owner = &accounts[0];

        let store = owner
            .transaction(
                &emulator,
                vec![Instruction::Store {
                    account: owner.address,
                    key: "profile".into(),
                    value: json!({"name": "owner"}),
                }],
            )
            .unwrap();
        assert!(emulator.submit_transaction(store).unwrap().succeeded());
        emulator.commit_block().unwrap();

        let result = emulator
            .execute_script(Script::new(vec![Instruction::Load {
                account: owner.address,
                key: "profile".into(),
            }]))
            .unwrap();

        assert_eq!(result.value(), Some(&json!({"name": "owner"})));
        assert!(result.events().is_empty());
    }
}
