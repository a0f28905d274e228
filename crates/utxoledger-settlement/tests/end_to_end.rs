//! End-to-end settlement tests.
//!
//! These run whole batches through the engine and check the resulting pool:
//! plain transfers, bad signatures, double spends within a batch, chained
//! spends, value rules, and determinism across engines.

use rust_decimal::Decimal;
use utxoledger_core::{TxRejection, UtxoPool};
use utxoledger_settlement::{SettlementEngine, compute_pool_root};
use utxoledger_types::testing::{TestKey, signed_spend};
use utxoledger_types::*;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

/// Pool with one coinbase output per `(owner, value)`, plus their ids.
fn seeded_pool(grants: &[(&TestKey, i64)]) -> (UtxoPool, Vec<UtxoId>) {
    let mut pool = UtxoPool::new();
    let mut ids = Vec::new();
    for (key, value) in grants {
        let mint = Transaction::coinbase(dec(*value), key.owner());
        pool.add_transaction_outputs(&mint);
        ids.push(UtxoId::new(mint.hash(), 0));
    }
    (pool, ids)
}

#[test]
fn scenario_a_full_transfer() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let tx = signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())]);
    let accepted = engine.handle_txs(std::slice::from_ref(&tx));

    assert_eq!(accepted, vec![tx.clone()]);
    let after = engine.pool();
    assert_eq!(after.len(), 1);
    assert!(!after.contains(&ids[0]));
    assert_eq!(
        after.get_tx_output(&UtxoId::new(tx.hash(), 0)),
        Some(&TxOutput::new(dec(10), bob.owner()))
    );
}

#[test]
fn scenario_b_bad_signature() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    // Bob signs Alice's output.
    let forged = signed_spend(&[(ids[0], &bob)], &[(dec(10), bob.owner())]);
    let report = engine.settle_epoch(&[forged]);

    assert!(report.accepted.is_empty());
    assert_eq!(
        report.rejection_at(0),
        Some(&TxRejection::InvalidSignature { input_index: 0 })
    );
    assert_eq!(engine.pool(), &pool);
}

#[test]
fn undecodable_owner_key_leaves_pool_unchanged() {
    let alice = TestKey::from_seed(1);
    let owner = (0u8..=u8::MAX)
        .map(|b| OwnerKey::from_pubkey([b; 32]))
        .find(|k| k.to_verifying_key().is_err())
        .expect("some repeated-byte encoding is off the curve");
    let id = UtxoId::new(TxHash([0x5A; 32]), 0);
    let pool: UtxoPool = [(id, TxOutput::new(dec(10), owner))].into_iter().collect();
    let mut engine = SettlementEngine::new(&pool);

    let tx = signed_spend(&[(id, &alice)], &[(dec(10), alice.owner())]);
    let report = engine.settle_epoch(&[tx]);

    assert!(report.accepted.is_empty());
    assert_eq!(
        report.rejection_at(0),
        Some(&TxRejection::InvalidSignature { input_index: 0 })
    );
    assert_eq!(engine.pool(), &pool);
}

#[test]
fn scenario_c_double_spend_first_wins() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let carol = TestKey::from_seed(3);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let to_bob = signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())]);
    let to_carol = signed_spend(&[(ids[0], &alice)], &[(dec(10), carol.owner())]);
    assert!(engine.is_valid_tx(&to_bob));
    assert!(engine.is_valid_tx(&to_carol));

    let report = engine.settle_epoch(&[to_bob.clone(), to_carol.clone()]);

    assert_eq!(report.accepted_hashes(), vec![to_bob.hash()]);
    assert_eq!(
        report.rejection_at(1),
        Some(&TxRejection::MissingUtxo {
            input_index: 0,
            utxo: ids[0]
        })
    );
    assert_eq!(engine.pool().len(), 1);
    assert!(engine.pool().contains(&UtxoId::new(to_bob.hash(), 0)));
    assert!(!engine.pool().contains(&UtxoId::new(to_carol.hash(), 0)));
}

#[test]
fn scenario_d_negative_output() {
    let alice = TestKey::from_seed(1);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let tx = signed_spend(
        &[(ids[0], &alice)],
        &[(dec(-1), alice.owner()), (dec(5), alice.owner())],
    );
    let report = engine.settle_epoch(&[tx]);

    assert!(report.accepted.is_empty());
    assert_eq!(
        report.rejection_at(0),
        Some(&TxRejection::NegativeOutput {
            output_index: 0,
            value: dec(-1)
        })
    );
    assert_eq!(engine.pool(), &pool);
}

#[test]
fn chained_spend_in_order_settles_both() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let carol = TestKey::from_seed(3);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let parent = signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())]);
    let child = signed_spend(
        &[(UtxoId::new(parent.hash(), 0), &bob)],
        &[(dec(9), carol.owner())],
    );

    let report = engine.settle_epoch(&[parent.clone(), child.clone()]);

    assert_eq!(report.accepted_hashes(), vec![parent.hash(), child.hash()]);
    assert_eq!(report.total_surplus, Some(dec(1)));
    assert_eq!(engine.pool().len(), 1);
    assert_eq!(
        engine.pool().get_tx_output(&UtxoId::new(child.hash(), 0)),
        Some(&TxOutput::new(dec(9), carol.owner()))
    );
}

#[test]
fn chained_spend_reversed_drops_child() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let carol = TestKey::from_seed(3);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let parent = signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())]);
    let child = signed_spend(
        &[(UtxoId::new(parent.hash(), 0), &bob)],
        &[(dec(10), carol.owner())],
    );

    let report = engine.settle_epoch(&[child.clone(), parent.clone()]);

    assert_eq!(report.accepted_hashes(), vec![parent.hash()]);
    assert!(matches!(
        report.rejection_at(0),
        Some(TxRejection::MissingUtxo { .. })
    ));
    // The child is valid now, in a later batch.
    assert_eq!(engine.handle_txs(&[child.clone()]), vec![child]);
}

#[test]
fn independent_spends_all_accepted() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 10), (&bob, 7)]);
    let mut engine = SettlementEngine::new(&pool);

    let a = signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())]);
    let b = signed_spend(&[(ids[1], &bob)], &[(dec(3), alice.owner()), (dec(4), bob.owner())]);

    let accepted = engine.handle_txs(&[a, b]);
    assert_eq!(accepted.len(), 2);
    assert_eq!(engine.pool().len(), 3);
    assert_eq!(engine.pool().total_value().unwrap(), dec(17));
}

#[test]
fn multi_input_spend_needs_every_signature() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 4), (&bob, 6)]);
    let mut engine = SettlementEngine::new(&pool);

    let joint = signed_spend(&[(ids[0], &alice), (ids[1], &bob)], &[(dec(10), alice.owner())]);
    let mut tampered = joint.clone();
    tampered
        .add_signature(1, vec![0u8; 64])
        .expect("input 1 exists");

    let report = engine.settle_epoch(&[tampered, joint.clone()]);
    assert_eq!(
        report.rejection_at(0),
        Some(&TxRejection::InvalidSignature { input_index: 1 })
    );
    assert_eq!(report.accepted_hashes(), vec![joint.hash()]);
}

#[test]
fn duplicate_input_rejected() {
    let alice = TestKey::from_seed(1);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let tx = signed_spend(
        &[(ids[0], &alice), (ids[0], &alice)],
        &[(dec(20), alice.owner())],
    );
    let report = engine.settle_epoch(&[tx]);
    assert_eq!(
        report.rejection_at(0),
        Some(&TxRejection::DuplicateInput {
            input_index: 1,
            utxo: ids[0]
        })
    );
    assert_eq!(engine.pool(), &pool);
}

#[test]
fn empty_batch_returns_nothing() {
    let alice = TestKey::from_seed(1);
    let (pool, _) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let report = engine.settle_epoch(&[]);
    assert!(report.accepted.is_empty());
    assert!(report.rejected.is_empty());
    assert_eq!(report.pool_root, compute_pool_root(&pool));
}

#[test]
fn same_transaction_twice_accepted_once() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let tx = signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())]);
    let report = engine.settle_epoch(&[tx.clone(), tx.clone()]);

    assert_eq!(report.accepted_hashes(), vec![tx.hash()]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].position, 1);
}

#[test]
fn accepted_transactions_satisfy_rules_in_commit_order() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let carol = TestKey::from_seed(3);
    let (pool, ids) = seeded_pool(&[(&alice, 10), (&bob, 5)]);

    let parent = signed_spend(&[(ids[0], &alice)], &[(dec(6), bob.owner()), (dec(4), alice.owner())]);
    let child = signed_spend(&[(UtxoId::new(parent.hash(), 0), &bob)], &[(dec(6), carol.owner())]);
    let conflict = signed_spend(&[(ids[0], &alice)], &[(dec(1), carol.owner())]);
    let greedy = signed_spend(&[(ids[1], &bob)], &[(dec(50), bob.owner())]);
    let batch = vec![parent, child, conflict, greedy];

    let mut engine = SettlementEngine::new(&pool);
    let accepted = engine.handle_txs(&batch);

    // Replay: each accepted tx is valid against the pool left by its predecessors.
    let mut replay = SettlementEngine::new(&pool);
    for tx in &accepted {
        let summary = replay.validate_tx(tx).expect("accepted tx must validate in order");
        assert!(summary.input_total >= summary.output_total);
        assert_eq!(replay.handle_txs(std::slice::from_ref(tx)).len(), 1);
    }
    assert_eq!(replay.pool(), engine.pool());

    // No UTXO consumed twice across the accepted set.
    let mut consumed = std::collections::HashSet::new();
    for tx in &accepted {
        for input in tx.inputs() {
            assert!(consumed.insert(input.utxo_id()));
        }
    }
    assert_eq!(accepted.len(), 2);
}

#[test]
fn two_engines_same_batch_same_roots() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 10), (&bob, 8)]);

    let batch = vec![
        signed_spend(&[(ids[0], &alice)], &[(dec(9), bob.owner())]),
        signed_spend(&[(ids[0], &alice)], &[(dec(10), alice.owner())]),
        signed_spend(&[(ids[1], &bob)], &[(dec(8), alice.owner())]),
    ];

    let mut first = SettlementEngine::new(&pool);
    let mut second = SettlementEngine::new(&pool);
    let r1 = first.settle_epoch(&batch);
    let r2 = second.settle_epoch(&batch);

    assert_eq!(r1.accepted_root, r2.accepted_root);
    assert_eq!(r1.pool_root, r2.pool_root);
    assert_eq!(first.pool(), second.pool());
}

#[test]
fn caller_pool_not_aliased() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (mut pool, ids) = seeded_pool(&[(&alice, 10)]);
    let original = pool.clone();
    let mut engine = SettlementEngine::new(&pool);

    engine.handle_txs(&[signed_spend(&[(ids[0], &alice)], &[(dec(10), bob.owner())])]);
    assert_eq!(pool, original);

    pool.remove_utxo(&ids[0]);
    assert_eq!(engine.pool().len(), 1);

    let mut snapshot = engine.pool_snapshot();
    snapshot.add_utxo(
        UtxoId::new(TxHash([7u8; 32]), 0),
        TxOutput::new(dec(1), bob.owner()),
    );
    assert_eq!(engine.pool().len(), 1);
}

#[test]
fn supply_tracks_surplus_across_epochs() {
    let alice = TestKey::from_seed(1);
    let bob = TestKey::from_seed(2);
    let (pool, ids) = seeded_pool(&[(&alice, 100)]);
    let mut engine = SettlementEngine::new(&pool);

    let first = signed_spend(&[(ids[0], &alice)], &[(dec(97), bob.owner())]);
    let r1 = engine.settle_epoch(std::slice::from_ref(&first));
    let second = signed_spend(&[(UtxoId::new(first.hash(), 0), &bob)], &[(dec(95), alice.owner())]);
    let r2 = engine.settle_epoch(&[second]);

    assert_eq!(r1.epoch_id, EpochId(0));
    assert_eq!(r2.epoch_id, EpochId(1));
    assert_eq!(r1.total_surplus, Some(dec(3)));
    assert_eq!(r2.total_surplus, Some(dec(2)));
    assert_eq!(engine.pool().total_value().unwrap(), dec(95));
    engine.verify_supply().unwrap();
}

#[test]
fn report_serializes() {
    let alice = TestKey::from_seed(1);
    let (pool, ids) = seeded_pool(&[(&alice, 10)]);
    let mut engine = SettlementEngine::new(&pool);

    let ok = signed_spend(&[(ids[0], &alice)], &[(dec(10), alice.owner())]);
    let bad = signed_spend(&[(ids[0], &alice)], &[(dec(10), alice.owner()), (dec(0), alice.owner())]);
    let report = engine.settle_epoch(&[ok, bad]);

    let json = serde_json::to_string(&report).unwrap();
    let back: utxoledger_settlement::EpochReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.accepted, report.accepted);
    assert_eq!(back.rejected, report.rejected);
    assert_eq!(back.pool_root, report.pool_root);
}
