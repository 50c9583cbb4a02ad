#![allow(dead_code)]

use multiversx_sc::codec::multi_types::OptionalValue;
use multiversx_sc::types::{Address, BigUint, ManagedBuffer};
use multiversx_sc_scenario::{api::DebugApi, rust_biguint, whitebox_legacy::*};

use zk_fund::ballots::BallotsModule;
use zk_fund::store::StoreModule;
use zk_fund::types::{FundType, OperationType};
use zk_fund::workflow::WorkflowModule;
use zk_fund::ZkFund;

pub const WASM_PATH: &str = "output/zk-fund.wasm";
pub const GENESIS_TIMESTAMP: u64 = 1_000;

pub fn buffer(bytes: &[u8]) -> ManagedBuffer<DebugApi> {
    ManagedBuffer::new_from_bytes(bytes)
}

pub struct ZkFundSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> zk_fund::ContractObj<DebugApi>,
{
    pub b_mock: BlockchainStateWrapper,
    pub owner: Address,
    pub alice: Address,
    pub bob: Address,
    pub now: u64,
    pub contract: ContractObjWrapper<zk_fund::ContractObj<DebugApi>, Builder>,
}

impl<Builder> ZkFundSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> zk_fund::ContractObj<DebugApi>,
{
    pub fn new(builder: Builder) -> Self {
        Self::with_options(builder, false, false)
    }

    pub fn with_options(builder: Builder, seed_demo_data: bool, single_vote: bool) -> Self {
        let mut b_mock = BlockchainStateWrapper::new();
        let owner = b_mock.create_user_account(&rust_biguint!(0));
        let alice = b_mock.create_user_account(&rust_biguint!(0));
        let bob = b_mock.create_user_account(&rust_biguint!(0));
        let contract =
            b_mock.create_sc_account(&rust_biguint!(0), Some(&owner), builder, WASM_PATH);

        b_mock.set_block_timestamp(GENESIS_TIMESTAMP);
        b_mock
            .execute_tx(&owner, &contract, &rust_biguint!(0), |sc| {
                sc.init(seed_demo_data, single_vote);
            })
            .assert_ok();

        ZkFundSetup {
            b_mock,
            owner,
            alice,
            bob,
            now: GENESIS_TIMESTAMP,
            contract,
        }
    }

    pub fn create_fund(&mut self, name: &[u8], signers: &[u8]) -> u64 {
        let mut fund_id = 0u64;
        self.b_mock
            .execute_tx(&self.alice, &self.contract, &rust_biguint!(0), |sc| {
                fund_id = sc.create_fund(buffer(name), FundType::DaoTreasury, 5, buffer(signers));
            })
            .assert_ok();
        fund_id
    }

    pub fn create_proposal(&mut self, fund_id: u64, title: &[u8], amount: u64) -> Option<u64> {
        let mut proposal_id = None;
        self.b_mock
            .execute_tx(&self.alice, &self.contract, &rust_biguint!(0), |sc| {
                proposal_id = sc
                    .create_proposal(
                        buffer(title),
                        buffer(b"Move funds into the strategy"),
                        OperationType::Allocation,
                        fund_id,
                        OptionalValue::Some(BigUint::from(amount)),
                    )
                    .into_option();
            })
            .assert_ok();
        proposal_id
    }

    pub fn sign(&mut self, proposal_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(&self.alice, &self.contract, &rust_biguint!(0), |sc| {
                sc.sign_proposal(proposal_id);
            })
    }

    pub fn reject(&mut self, proposal_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(&self.bob, &self.contract, &rust_biguint!(0), |sc| {
                sc.reject_proposal(proposal_id);
            })
    }

    pub fn open_vote(&mut self, proposal_id: u64, quorum: u64, duration: u64) -> u64 {
        let mut vote_id = 0u64;
        self.b_mock
            .execute_tx(&self.alice, &self.contract, &rust_biguint!(0), |sc| {
                vote_id = sc.open_vote(proposal_id, quorum, duration);
            })
            .assert_ok();
        vote_id
    }

    pub fn cast_vote(&mut self, voter: &Address, vote_id: u64, choice: &[u8]) -> TxResult {
        self.b_mock
            .execute_tx(voter, &self.contract, &rust_biguint!(0), |sc| {
                sc.cast_vote(vote_id, buffer(choice));
            })
    }

    pub fn request_deposit(&mut self, user: &Address, fund_id: u64, amount: u64) -> u64 {
        let mut job_id = 0u64;
        self.b_mock
            .execute_tx(user, &self.contract, &rust_biguint!(0), |sc| {
                job_id = sc.request_deposit(fund_id, BigUint::from(amount), buffer(b"USDC"));
            })
            .assert_ok();
        job_id
    }

    pub fn complete_proof(&mut self, user: &Address, job_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(user, &self.contract, &rust_biguint!(0), |sc| {
                sc.complete_proof(job_id);
            })
    }

    pub fn cancel_proof(&mut self, user: &Address, job_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(user, &self.contract, &rust_biguint!(0), |sc| {
                sc.cancel_proof(job_id);
            })
    }

    /// Runs a deposit through the proof workflow and advances the clock
    /// past its delay.
    pub fn deposit(&mut self, user: &Address, fund_id: u64, amount: u64) {
        let job_id = self.request_deposit(user, fund_id, amount);
        self.advance(10);
        self.complete_proof(user, job_id).assert_ok();
    }

    pub fn advance(&mut self, seconds: u64) {
        self.now += seconds;
        self.b_mock.set_block_timestamp(self.now);
    }
}
