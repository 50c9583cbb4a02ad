mod zk_fund_setup;

use multiversx_sc::types::{BigUint, ManagedBuffer};
use multiversx_sc_scenario::{api::DebugApi, managed_address, rust_biguint};
use zk_fund::storage::StorageModule;
use zk_fund::store::StoreModule;
use zk_fund::types::{
    OperationType, ProposalStatus, TransactionDraft, TransactionStatus, VoteChoice,
};
use zk_fund::views::ViewsModule;
use zk_fund::NAV_ONE_BPS;
use zk_fund_setup::{buffer, ZkFundSetup};

#[test]
fn create_fund_starts_empty() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    let fund_id = setup.create_fund(b"Alpha", b"3/5");
    assert_eq!(fund_id, 1);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let fund = sc.get_fund(1);
            assert_eq!(fund.name, buffer(b"Alpha"));
            assert_eq!(fund.tvl, BigUint::zero());
            assert_eq!(fund.nav_bps, NAV_ONE_BPS);
            assert_eq!(fund.nav_change_bps, 0);
            assert_eq!(fund.signers.required, 3);
            assert_eq!(fund.signers.total, 5);
            assert!(fund.allocation.is_empty());

            assert_eq!(sc.fund_count().get(), 1);
            assert_eq!(sc.get_stats().total_funds, 1);

            let latest = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(latest.action, buffer(b"New fund created: Alpha"));
            assert_eq!(latest.fund, buffer(b"Alpha"));
        })
        .assert_ok();
}

#[test]
fn create_fund_rejects_malformed_threshold() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup
        .b_mock
        .execute_tx(&setup.alice, &setup.contract, &rust_biguint!(0), |sc| {
            sc.create_fund(
                buffer(b"Alpha"),
                zk_fund::types::FundType::OtcTrading,
                3,
                buffer(b"three of five"),
            );
        })
        .assert_user_error("Invalid signer threshold");
}

#[test]
fn create_proposal_for_unknown_fund_is_a_no_op() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    let proposal_id = setup.create_proposal(42, b"Ghost proposal", 100);
    assert_eq!(proposal_id, None);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert_eq!(sc.proposal_count().get(), 0);
            assert_eq!(sc.get_stats().active_proposals, 0);
            assert_eq!(sc.get_activity().into_iter().count(), 0);
        })
        .assert_ok();
}

#[test]
fn create_proposal_copies_fund_threshold() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    let alice = setup.alice.clone();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let proposal = sc.get_proposal(proposal_id);
            assert_eq!(proposal.status, ProposalStatus::Active);
            assert_eq!(proposal.fund_name, buffer(b"Alpha"));
            assert_eq!(proposal.required_signatures.required, 3);
            assert_eq!(proposal.current_signatures, 0);
            assert_eq!(proposal.deadline, proposal.created_at + zk_fund::PROPOSAL_LIFETIME);
            assert_eq!(proposal.created_by, managed_address!(&alice));
            assert_eq!(proposal.amount, Some(BigUint::from(500u64)));
            assert_eq!(sc.get_stats().active_proposals, 1);

            let latest = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(latest.action, buffer(b"New proposal: Rebalance"));
        })
        .assert_ok();
}

#[test]
fn proposals_are_listed_newest_first() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    setup.create_proposal(1, b"First", 1);
    setup.create_proposal(1, b"Second", 2);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let titles: Vec<ManagedBuffer<DebugApi>> = sc
                .get_proposals()
                .into_iter()
                .map(|proposal| proposal.title)
                .collect();
            assert_eq!(titles, vec![buffer(b"Second"), buffer(b"First")]);
        })
        .assert_ok();
}

#[test]
fn three_of_five_executes_on_third_signature() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();

    setup.sign(proposal_id).assert_ok();
    setup.sign(proposal_id).assert_ok();
    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let proposal = sc.get_proposal(proposal_id);
            assert_eq!(proposal.current_signatures, 2);
            assert_eq!(proposal.status, ProposalStatus::Active);
            assert_eq!(sc.transaction_count().get(), 0);
        })
        .assert_ok();

    setup.sign(proposal_id).assert_ok();
    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let proposal = sc.get_proposal(proposal_id);
            assert_eq!(proposal.current_signatures, 3);
            assert_eq!(proposal.status, ProposalStatus::Executed);

            assert_eq!(sc.transaction_count().get(), 1);
            let transaction = sc.get_transaction(1);
            assert_eq!(transaction.status, TransactionStatus::Confirmed);
            assert_eq!(transaction.tx_type, OperationType::Allocation);
            assert_eq!(transaction.fund_name, buffer(b"Alpha"));
            assert_eq!(transaction.amount, BigUint::from(500u64));
            assert_eq!(transaction.asset, buffer(b"USDC"));
            assert_eq!(transaction.from, buffer(b"zk_pool_1"));
            assert!(transaction.to.to_boxed_bytes().as_slice().starts_with(b"strategy_"));
            assert_eq!(transaction.signatures, Some(buffer(b"3/5")));

            let stats = sc.get_stats();
            assert_eq!(stats.zk_proofs_generated, 3);
            assert_eq!(stats.private_transactions, 1);
            assert_eq!(stats.active_proposals, 0);

            let latest = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(latest.action, buffer(b"Proposal executed"));
        })
        .assert_ok();
}

#[test]
fn signatures_past_threshold_keep_executing() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();

    for _ in 0..5 {
        setup.sign(proposal_id).assert_ok();
    }

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let proposal = sc.get_proposal(proposal_id);
            assert_eq!(proposal.current_signatures, 5);
            assert_eq!(proposal.status, ProposalStatus::Executed);

            assert_eq!(sc.transaction_count().get(), 3);
            let latest = sc.get_transaction(3);
            assert_eq!(latest.status, TransactionStatus::Confirmed);
            assert_eq!(latest.signatures, Some(buffer(b"5/5")));

            let stats = sc.get_stats();
            assert_eq!(stats.zk_proofs_generated, 5);
            assert_eq!(stats.private_transactions, 3);
            assert_eq!(stats.active_proposals, 0);

            let activity = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(activity.action, buffer(b"Proposal executed"));
        })
        .assert_ok();
}

#[test]
fn withdraw_proposal_pays_out_to_stealth_address() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Solo", b"1/1");
    setup
        .b_mock
        .execute_tx(&setup.alice, &setup.contract, &rust_biguint!(0), |sc| {
            sc.create_proposal(
                buffer(b"Sweep"),
                buffer(b"Sweep to cold storage"),
                OperationType::Withdraw,
                1,
                multiversx_sc::codec::multi_types::OptionalValue::None,
            );
        })
        .assert_ok();
    setup.sign(1).assert_ok();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let transaction = sc.get_transaction(1);
            assert_eq!(transaction.tx_type, OperationType::Withdraw);
            assert_eq!(transaction.amount, BigUint::zero());
            assert!(transaction.to.to_boxed_bytes().as_slice().starts_with(b"stealth_"));
            assert_eq!(transaction.signatures, Some(buffer(b"1/1")));
        })
        .assert_ok();
}

#[test]
fn signing_unknown_or_rejected_proposal_fails() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.sign(7).assert_user_error("Proposal does not exist");

    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    setup.reject(proposal_id).assert_ok();
    setup
        .sign(proposal_id)
        .assert_user_error("Proposal has been rejected");
}

#[test]
fn reject_floors_active_proposals_at_zero() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();

    setup.reject(proposal_id).assert_ok();
    setup.reject(proposal_id).assert_ok();
    setup.reject(proposal_id).assert_ok();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert_eq!(
                sc.get_proposal(proposal_id).status,
                ProposalStatus::Rejected
            );
            assert_eq!(sc.get_stats().active_proposals, 0);

            let latest = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(latest.action, buffer(b"Proposal rejected"));
        })
        .assert_ok();
}

#[test]
fn rejecting_executed_proposal_fails() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Solo", b"1/1");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    setup.sign(proposal_id).assert_ok();

    setup
        .reject(proposal_id)
        .assert_user_error("Proposal has already been executed");
}

#[test]
fn approve_increments_only_votes_for() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    let vote_id = setup.open_vote(proposal_id, 3, 3_600);
    let alice = setup.alice.clone();

    setup.cast_vote(&alice, vote_id, b"Approve").assert_ok();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let vote = sc.get_vote(vote_id);
            assert_eq!(vote.votes_for, 1);
            assert_eq!(vote.votes_against, 0);
            assert_eq!(vote.abstain, 0);
            assert!(vote.user_voted);
            assert_eq!(vote.user_choice, Some(VoteChoice::Approve));

            let stats = sc.get_stats();
            assert_eq!(stats.zk_proofs_generated, 1);
            assert_eq!(stats.pending_votes, 0);

            let latest = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(latest.action, buffer(b"Vote submitted (ZK Proof)"));
        })
        .assert_ok();
}

#[test]
fn repeat_votes_keep_counting_by_default() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    let vote_id = setup.open_vote(proposal_id, 3, 3_600);
    let alice = setup.alice.clone();

    setup.cast_vote(&alice, vote_id, b"Approve").assert_ok();
    setup.cast_vote(&alice, vote_id, b"Approve").assert_ok();
    setup.cast_vote(&alice, vote_id, b"Maybe").assert_ok();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let vote = sc.get_vote(vote_id);
            assert_eq!(vote.votes_for, 2);
            assert_eq!(vote.abstain, 1);
            assert_eq!(vote.user_choice, Some(VoteChoice::Abstain));

            let stats = sc.get_stats();
            assert_eq!(stats.zk_proofs_generated, 3);
            assert_eq!(stats.pending_votes, 0);
        })
        .assert_ok();
}

#[test]
fn single_vote_policy_refuses_second_ballot() {
    let mut setup = ZkFundSetup::with_options(zk_fund::contract_obj, false, true);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    let vote_id = setup.open_vote(proposal_id, 3, 3_600);
    let alice = setup.alice.clone();
    let bob = setup.bob.clone();

    setup.cast_vote(&alice, vote_id, b"Reject").assert_ok();
    setup
        .cast_vote(&alice, vote_id, b"Approve")
        .assert_user_error("Already voted");
    setup.cast_vote(&bob, vote_id, b"Approve").assert_ok();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let vote = sc.get_vote(vote_id);
            assert_eq!(vote.votes_for, 1);
            assert_eq!(vote.votes_against, 1);
            assert_eq!(
                sc.get_voter_choice(vote_id, &managed_address!(&alice))
                    .into_option(),
                Some(VoteChoice::Reject)
            );
        })
        .assert_ok();
}

#[test]
fn single_vote_policy_refuses_repeat_approve() {
    let mut setup = ZkFundSetup::with_options(zk_fund::contract_obj, false, true);
    setup.create_fund(b"Alpha", b"3/5");
    let proposal_id = setup.create_proposal(1, b"Rebalance", 500).unwrap();
    let vote_id = setup.open_vote(proposal_id, 3, 3_600);
    let alice = setup.alice.clone();

    setup.cast_vote(&alice, vote_id, b"Approve").assert_ok();
    setup
        .cast_vote(&alice, vote_id, b"Approve")
        .assert_user_error("Already voted");

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert_eq!(sc.get_vote(vote_id).votes_for, 1);
            assert_eq!(
                sc.get_voter_choice(vote_id, &managed_address!(&alice))
                    .into_option(),
                Some(VoteChoice::Approve)
            );
        })
        .assert_ok();
}

#[test]
fn casting_on_unknown_vote_fails() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    let alice = setup.alice.clone();
    setup
        .cast_vote(&alice, 9, b"Approve")
        .assert_user_error("Vote does not exist");
}

#[test]
fn add_transaction_records_pending_entry() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    let mut transaction_id = 0u64;
    setup
        .b_mock
        .execute_tx(&setup.alice, &setup.contract, &rust_biguint!(0), |sc| {
            transaction_id = sc.add_transaction(TransactionDraft {
                tx_type: OperationType::Swap,
                amount: BigUint::from(250u64),
                asset: buffer(b"USDC"),
                to_asset: Some(buffer(b"ETH")),
                to_amount: Some(BigUint::from(1u64)),
                fund_name: buffer(b"Stealth OTC Desk"),
                from: buffer(b"zk_pool_2"),
                to: buffer(b"otc_counterparty"),
                signatures: None,
            });
        })
        .assert_ok();
    assert_eq!(transaction_id, 1);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let transaction = sc.get_transaction(transaction_id);
            assert_eq!(transaction.status, TransactionStatus::Pending);
            assert_eq!(transaction.timestamp, 1_000);
            assert_eq!(transaction.to_asset, Some(buffer(b"ETH")));

            let hash = transaction.proof_hash.to_boxed_bytes();
            assert!(hash.as_slice().starts_with(b"0x"));
            assert_eq!(hash.len(), "0xabcd...ef01".len());
            assert_eq!(&hash.as_slice()[6..9], b"...");

            let stats = sc.get_stats();
            assert_eq!(stats.private_transactions, 1);
            assert_eq!(stats.zk_proofs_generated, 1);

            let latest = sc.get_activity().into_iter().next().unwrap();
            assert_eq!(latest.action, buffer(b"Swap initiated"));
        })
        .assert_ok();
}

#[test]
fn transactions_filter_by_type() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"1/1");
    let alice = setup.alice.clone();
    setup.deposit(&alice, 1, 100);
    setup.deposit(&alice, 1, 200);
    let proposal_id = setup.create_proposal(1, b"Rebalance", 50).unwrap();
    setup.sign(proposal_id).assert_ok();

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let deposits: Vec<u64> = sc
                .get_transactions_by_type(OperationType::Deposit)
                .into_iter()
                .map(|transaction| transaction.id)
                .collect();
            assert_eq!(deposits, vec![2, 1]);

            let allocations: Vec<u64> = sc
                .get_transactions_by_type(OperationType::Allocation)
                .into_iter()
                .map(|transaction| transaction.id)
                .collect();
            assert_eq!(allocations, vec![3]);

            assert_eq!(
                sc.get_transactions_by_type(OperationType::Swap)
                    .into_iter()
                    .count(),
                0
            );
        })
        .assert_ok();
}

#[test]
fn activity_feed_keeps_five_most_recent() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    let names: [&[u8]; 7] = [b"F1", b"F2", b"F3", b"F4", b"F5", b"F6", b"F7"];
    for name in names {
        setup.create_fund(name, b"2/3");
    }

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            let funds: Vec<ManagedBuffer<DebugApi>> = sc
                .get_activity()
                .into_iter()
                .map(|entry| entry.fund)
                .collect();
            assert_eq!(
                funds,
                vec![
                    buffer(b"F7"),
                    buffer(b"F6"),
                    buffer(b"F5"),
                    buffer(b"F4"),
                    buffer(b"F3"),
                ]
            );
            assert_eq!(sc.get_stats().total_funds, 7);
        })
        .assert_ok();
}

#[test]
fn total_value_locked_sums_funds() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup.create_fund(b"Alpha", b"1/1");
    setup.create_fund(b"Beta", b"1/1");
    let alice = setup.alice.clone();
    setup.deposit(&alice, 1, 700);
    setup.deposit(&alice, 2, 300);

    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert_eq!(sc.get_total_value_locked(), BigUint::from(1_000u64));
        })
        .assert_ok();
}

#[test]
fn modal_flags_are_per_caller() {
    let mut setup = ZkFundSetup::new(zk_fund::contract_obj);
    setup
        .b_mock
        .execute_tx(&setup.alice, &setup.contract, &rust_biguint!(0), |sc| {
            sc.set_create_fund_modal_open(true);
            sc.set_create_proposal_modal_open(true);
        })
        .assert_ok();
    setup
        .b_mock
        .execute_tx(&setup.alice, &setup.contract, &rust_biguint!(0), |sc| {
            sc.set_create_proposal_modal_open(false);
        })
        .assert_ok();

    let alice = setup.alice.clone();
    let bob = setup.bob.clone();
    setup
        .b_mock
        .execute_query(&setup.contract, |sc| {
            assert!(sc.is_create_fund_modal_open(&managed_address!(&alice)));
            assert!(!sc.is_create_proposal_modal_open(&managed_address!(&alice)));
            assert!(!sc.is_create_fund_modal_open(&managed_address!(&bob)));
        })
        .assert_ok();
}
