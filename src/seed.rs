multiversx_sc::imports!();

use crate::types::{
    ActivityEntry, AllocationEntry, Fund, FundStatus, FundType, OperationType, Proposal,
    ProposalStatus, SignerThreshold, Stats, Transaction, TransactionStatus, Vote, VoteResult,
    VoteStatus,
};
use crate::{format, storage, PROPOSAL_LIFETIME};

const DAY: u64 = 86_400;

/// Demo collections for a freshly deployed dashboard: three funds with
/// proposals, ballots and history, plus matching aggregate stats.
#[multiversx_sc::module]
pub trait SeedModule: storage::StorageModule {
    fn seed_demo_data(&self) {
        let now = self.blockchain().get_block_timestamp();

        let alpha = self.seed_fund(
            b"Alpha Privacy Fund",
            FundType::PrivateEquity,
            12_500_000,
            11_240,
            850,
            12,
            SignerThreshold::new(3, 5),
            FundStatus::Active,
            &[("ETH", 4_500), ("USDC", 3_500), ("WBTC", 2_000)],
        );
        let otc = self.seed_fund(
            b"Stealth OTC Desk",
            FundType::OtcTrading,
            8_200_000,
            10_870,
            320,
            5,
            SignerThreshold::new(2, 3),
            FundStatus::Active,
            &[("USDC", 6_000), ("ETH", 4_000)],
        );
        let treasury = self.seed_fund(
            b"Shielded DAO Treasury",
            FundType::DaoTreasury,
            4_750_000,
            9_910,
            -90,
            48,
            SignerThreshold::new(5, 9),
            FundStatus::Pending,
            &[("USDC", 7_000), ("DAI", 3_000)],
        );

        let rebalance = self.seed_proposal(
            &alpha,
            b"Rebalance into ETH staking",
            b"Move 15% of the stablecoin sleeve into liquid staking.",
            OperationType::Allocation,
            ProposalStatus::Active,
            2,
            Some(1_875_000),
            now,
        );
        self.seed_proposal(
            &otc,
            b"Private swap USDC to ETH",
            b"Fill the pending OTC order through the shielded pool.",
            OperationType::Swap,
            ProposalStatus::Pending,
            1,
            Some(500_000),
            now,
        );
        let grants = self.seed_proposal(
            &treasury,
            b"Q3 grants budget",
            b"Approve the contributor grants budget for the next quarter.",
            OperationType::Governance,
            ProposalStatus::Voting,
            0,
            None,
            now,
        );
        self.seed_proposal(
            &alpha,
            b"Withdraw to cold storage",
            b"Quarterly sweep of realised gains to cold storage.",
            OperationType::Withdraw,
            ProposalStatus::Executed,
            3,
            Some(250_000),
            now.saturating_sub(3 * DAY),
        );

        self.seed_vote(&grants, &treasury, VoteStatus::Active, now + 2 * DAY, [18, 6, 3], None);
        self.seed_vote(
            &rebalance,
            &alpha,
            VoteStatus::Ended,
            now.saturating_sub(DAY),
            [9, 2, 1],
            Some(VoteResult::Passed),
        );

        self.seed_transaction(
            OperationType::Deposit,
            2_000_000,
            &alpha,
            TransactionStatus::Confirmed,
            now.saturating_sub(2 * DAY),
            None,
        );
        self.seed_transaction(
            OperationType::Withdraw,
            250_000,
            &alpha,
            TransactionStatus::Confirmed,
            now.saturating_sub(3 * DAY),
            Some(format::progress(3, 5)),
        );
        self.seed_transaction(
            OperationType::Swap,
            500_000,
            &otc,
            TransactionStatus::Pending,
            now.saturating_sub(DAY / 2),
            Some(format::progress(1, 3)),
        );
        self.seed_transaction(
            OperationType::Deposit,
            750_000,
            &treasury,
            TransactionStatus::Failed,
            now.saturating_sub(4 * DAY),
            None,
        );

        self.stats().set(Stats {
            total_funds: 3,
            active_proposals: 3,
            zk_proofs_generated: 1_247,
            private_transactions: 89,
            pending_votes: 1,
        });

        self.seed_activity(now.saturating_sub(4 * DAY), b"Deposit failed", &treasury);
        self.seed_activity(now.saturating_sub(3 * DAY), b"Proposal executed", &alpha);
        self.seed_activity(now.saturating_sub(2 * DAY), b"Deposit confirmed", &alpha);
        self.seed_activity(now.saturating_sub(DAY), b"Ballot closed", &alpha);
        self.seed_activity(now.saturating_sub(DAY / 2), b"Swap initiated", &otc);
    }

    fn seed_fund(
        &self,
        name: &[u8],
        fund_type: FundType,
        tvl: u64,
        nav_bps: u64,
        nav_change_bps: i64,
        members: u32,
        signers: SignerThreshold,
        status: FundStatus,
        allocation: &[(&str, u32)],
    ) -> Fund<Self::Api> {
        let mut entries = ManagedVec::new();
        for (asset, percentage_bps) in allocation {
            entries.push(AllocationEntry {
                asset: ManagedBuffer::from(*asset),
                percentage_bps: *percentage_bps,
            });
        }

        let fund_id = self.fund_count().get() + 1;
        let fund = Fund {
            id: fund_id,
            name: ManagedBuffer::from(name),
            fund_type,
            tvl: BigUint::from(tvl),
            nav_bps,
            nav_change_bps,
            members,
            signers,
            status,
            allocation: entries,
        };
        self.funds(fund_id).set(&fund);
        self.fund_count().set(fund_id);
        fund
    }

    fn seed_proposal(
        &self,
        fund: &Fund<Self::Api>,
        title: &[u8],
        description: &[u8],
        proposal_type: OperationType,
        status: ProposalStatus,
        current_signatures: u32,
        amount: Option<u64>,
        created_at: u64,
    ) -> Proposal<Self::Api> {
        let proposal_id = self.proposal_count().get() + 1;
        let proposal = Proposal {
            id: proposal_id,
            title: ManagedBuffer::from(title),
            description: ManagedBuffer::from(description),
            proposal_type,
            status,
            fund_id: fund.id,
            fund_name: fund.name.clone(),
            required_signatures: fund.signers,
            current_signatures,
            deadline: created_at + PROPOSAL_LIFETIME,
            created_at,
            created_by: self.blockchain().get_owner_address(),
            amount: amount.map(BigUint::from),
            votes_for: None,
            votes_against: None,
            total_votes: None,
        };
        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);
        proposal
    }

    fn seed_vote(
        &self,
        proposal: &Proposal<Self::Api>,
        fund: &Fund<Self::Api>,
        status: VoteStatus,
        end_time: u64,
        tally: [u64; 3],
        result: Option<VoteResult>,
    ) {
        let vote_id = self.vote_count().get() + 1;
        let vote = Vote {
            id: vote_id,
            proposal_id: proposal.id,
            proposal_title: proposal.title.clone(),
            fund_name: fund.name.clone(),
            status,
            end_time,
            votes_for: tally[0],
            votes_against: tally[1],
            abstain: tally[2],
            total_votes: u64::from(fund.members),
            quorum: u64::from(fund.members) / 2 + 1,
            user_voted: false,
            user_choice: None,
            result,
        };
        self.votes(vote_id).set(&vote);
        self.vote_count().set(vote_id);
    }

    fn seed_transaction(
        &self,
        tx_type: OperationType,
        amount: u64,
        fund: &Fund<Self::Api>,
        status: TransactionStatus,
        timestamp: u64,
        signatures: Option<ManagedBuffer<Self::Api>>,
    ) {
        let transaction_id = self.transaction_count().get() + 1;
        let (from, to) = match tx_type {
            OperationType::Deposit => (
                format::prefixed_id(b"wallet_", transaction_id),
                format::prefixed_id(b"zk_pool_", fund.id),
            ),
            _ => (
                format::prefixed_id(b"zk_pool_", fund.id),
                format::prefixed_id(b"stealth_", transaction_id),
            ),
        };
        let transaction = Transaction {
            id: transaction_id,
            tx_type,
            amount: BigUint::from(amount),
            asset: ManagedBuffer::from(b"USDC"),
            to_asset: None,
            to_amount: None,
            fund_name: fund.name.clone(),
            status,
            timestamp,
            proof_hash: format::prefixed_id(b"0xseed", transaction_id),
            from,
            to,
            signatures,
        };
        self.transactions(transaction_id).set(&transaction);
        self.transaction_count().set(transaction_id);
    }

    fn seed_activity(&self, timestamp: u64, action: &[u8], fund: &Fund<Self::Api>) {
        let head = self.activity_head().get();
        let entry = ActivityEntry {
            timestamp,
            action: ManagedBuffer::from(action),
            fund: fund.name.clone(),
        };
        self.activity_slot(head % crate::ACTIVITY_WINDOW).set(&entry);
        self.activity_head().set(head + 1);
    }
}
