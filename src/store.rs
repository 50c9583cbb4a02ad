multiversx_sc::imports!();

use crate::{config, events, format, storage};
use crate::types::{
    ActivityEntry, Fund, FundDraft, FundStatus, FundType, OperationType, ProofKind, Proposal,
    ProposalDraft, ProposalStatus, SignerThreshold, Transaction, TransactionDraft,
    TransactionStatus, VoteChoice,
};
use crate::{ACTIVITY_WINDOW, DEFAULT_ASSET, NAV_ONE_BPS, PROPOSAL_LIFETIME};

const MAX_THRESHOLD_LEN: usize = 16;
const MAX_CHOICE_LEN: usize = 16;

/// The mutation path of the dashboard: every endpoint here updates the
/// records, the aggregate stats and the activity feed in one transaction.
#[multiversx_sc::module]
pub trait StoreModule:
    storage::StorageModule + config::ConfigModule + events::EventsModule
{
    // ========================================================
    // Modal flags
    // ========================================================

    #[endpoint(setCreateFundModalOpen)]
    fn set_create_fund_modal_open(&self, open: bool) {
        let caller = self.blockchain().get_caller();
        if !open {
            require!(
                !self.is_generating(&caller, ProofKind::CreateFund),
                "Proof generation in progress"
            );
        }
        self.create_fund_modal_open(&caller).set(open);
        self.modal_toggled_event(&caller, &ManagedBuffer::from(b"createFund"), open);
    }

    #[endpoint(setCreateProposalModalOpen)]
    fn set_create_proposal_modal_open(&self, open: bool) {
        let caller = self.blockchain().get_caller();
        if !open {
            require!(
                !self.is_generating(&caller, ProofKind::CreateProposal),
                "Proof generation in progress"
            );
        }
        self.create_proposal_modal_open(&caller).set(open);
        self.modal_toggled_event(&caller, &ManagedBuffer::from(b"createProposal"), open);
    }

    fn is_generating(&self, user: &ManagedAddress, kind: ProofKind) -> bool {
        let mapper = self.active_proof_job(user);
        if mapper.is_empty() {
            return false;
        }
        self.proof_jobs(mapper.get()).get().request.kind() == kind
    }

    // ========================================================
    // ENDPOINT: createFund
    // ========================================================

    #[endpoint(createFund)]
    fn create_fund(
        &self,
        name: ManagedBuffer,
        fund_type: FundType,
        members: u32,
        signers: ManagedBuffer,
    ) -> u64 {
        let signers = self.parse_threshold(&signers);
        self.insert_fund(FundDraft {
            name,
            fund_type,
            members,
            signers,
        })
    }

    fn insert_fund(&self, draft: FundDraft<Self::Api>) -> u64 {
        let fund_id = self.fund_count().get() + 1;
        let fund = Fund {
            id: fund_id,
            name: draft.name,
            fund_type: draft.fund_type,
            tvl: BigUint::zero(),
            nav_bps: NAV_ONE_BPS,
            nav_change_bps: 0,
            members: draft.members,
            signers: draft.signers,
            status: FundStatus::Active,
            allocation: ManagedVec::new(),
        };
        self.funds(fund_id).set(&fund);
        self.fund_count().set(fund_id);
        self.stats().update(|stats| stats.total_funds += 1);

        let mut action = ManagedBuffer::from(b"New fund created: ");
        action.append(&fund.name);
        self.push_activity(action, fund.name.clone());

        self.fund_created_event(fund_id, fund.fund_type, &fund.name);
        fund_id
    }

    // ========================================================
    // ENDPOINT: createProposal
    // Unknown fund ids are skipped without an error.
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        title: ManagedBuffer,
        description: ManagedBuffer,
        proposal_type: OperationType,
        fund_id: u64,
        opt_amount: OptionalValue<BigUint>,
    ) -> OptionalValue<u64> {
        let caller = self.blockchain().get_caller();
        let draft = ProposalDraft {
            title,
            description,
            proposal_type,
            fund_id,
            amount: opt_amount.into_option(),
        };
        self.insert_proposal(draft, &caller).into()
    }

    fn insert_proposal(
        &self,
        draft: ProposalDraft<Self::Api>,
        creator: &ManagedAddress,
    ) -> Option<u64> {
        if self.funds(draft.fund_id).is_empty() {
            return None;
        }
        let fund = self.funds(draft.fund_id).get();

        let proposal_id = self.proposal_count().get() + 1;
        let now = self.blockchain().get_block_timestamp();
        let proposal = Proposal {
            id: proposal_id,
            title: draft.title,
            description: draft.description,
            proposal_type: draft.proposal_type,
            status: ProposalStatus::Active,
            fund_id: fund.id,
            fund_name: fund.name,
            required_signatures: fund.signers,
            current_signatures: 0,
            deadline: now + PROPOSAL_LIFETIME,
            created_at: now,
            created_by: creator.clone(),
            amount: draft.amount,
            votes_for: None,
            votes_against: None,
            total_votes: None,
        };
        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);
        self.stats().update(|stats| stats.active_proposals += 1);

        let mut action = ManagedBuffer::from(b"New proposal: ");
        action.append(&proposal.title);
        self.push_activity(action, proposal.fund_name.clone());

        self.proposal_created_event(proposal_id, proposal.fund_id, creator, proposal.deadline);
        Some(proposal_id)
    }

    // ========================================================
    // ENDPOINT: signProposal
    // Signatures are never clamped. Every signature at or past the
    // threshold numerator executes the proposal and records a
    // confirmed transaction.
    // ========================================================

    #[endpoint(signProposal)]
    fn sign_proposal(&self, proposal_id: u64) {
        let caller = self.blockchain().get_caller();
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            proposal.status != ProposalStatus::Rejected,
            "Proposal has been rejected"
        );

        let first_execution = proposal.status != ProposalStatus::Executed;
        proposal.current_signatures += 1;
        let executes = proposal.required_signatures.is_met_by(proposal.current_signatures);

        let mut transaction_id = 0u64;
        if executes {
            proposal.status = ProposalStatus::Executed;
            transaction_id = self.record_execution(&proposal);
        }
        self.proposals(proposal_id).set(&proposal);

        self.stats().update(|stats| {
            stats.zk_proofs_generated += 1;
            if executes {
                stats.private_transactions += 1;
                if first_execution {
                    stats.active_proposals = stats.active_proposals.saturating_sub(1);
                }
            }
        });

        let action: &[u8] = if executes {
            b"Proposal executed"
        } else {
            b"Signature added (ZK Proof)"
        };
        self.push_activity(ManagedBuffer::from(action), proposal.fund_name.clone());

        self.proposal_signed_event(proposal_id, &caller, proposal.current_signatures);
        if executes {
            self.proposal_executed_event(proposal_id, transaction_id);
        }
    }

    /// Writes the confirmed transaction for a proposal that just executed.
    fn record_execution(&self, proposal: &Proposal<Self::Api>) -> u64 {
        let to_prefix: &[u8] = if proposal.proposal_type == OperationType::Withdraw {
            b"stealth_"
        } else {
            b"strategy_"
        };
        let draft = TransactionDraft {
            tx_type: proposal.proposal_type,
            amount: proposal.amount.clone().unwrap_or_else(BigUint::zero),
            asset: ManagedBuffer::from(DEFAULT_ASSET),
            to_asset: None,
            to_amount: None,
            fund_name: proposal.fund_name.clone(),
            from: format::prefixed_id(b"zk_pool_", proposal.fund_id),
            to: self.synthetic_address(to_prefix),
            signatures: Some(format::progress(
                proposal.current_signatures,
                proposal.required_signatures.total,
            )),
        };
        self.write_transaction(draft, TransactionStatus::Confirmed)
    }

    // ========================================================
    // ENDPOINT: rejectProposal
    // ========================================================

    #[endpoint(rejectProposal)]
    fn reject_proposal(&self, proposal_id: u64) {
        let caller = self.blockchain().get_caller();
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            proposal.status != ProposalStatus::Executed,
            "Proposal has already been executed"
        );

        let was_open = proposal.status != ProposalStatus::Rejected;
        proposal.status = ProposalStatus::Rejected;
        self.proposals(proposal_id).set(&proposal);

        if was_open {
            self.stats().update(|stats| {
                stats.active_proposals = stats.active_proposals.saturating_sub(1)
            });
        }
        self.push_activity(
            ManagedBuffer::from(b"Proposal rejected"),
            proposal.fund_name.clone(),
        );

        self.proposal_rejected_event(proposal_id, &caller);
    }

    // ========================================================
    // ENDPOINT: castVote
    // ========================================================

    #[endpoint(castVote)]
    fn cast_vote(&self, vote_id: u64, choice: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        let choice = self.parse_choice(&choice);
        self.record_vote(vote_id, choice, &caller);
    }

    fn record_vote(&self, vote_id: u64, choice: VoteChoice, voter: &ManagedAddress) {
        require!(!self.votes(vote_id).is_empty(), "Vote does not exist");
        if self.single_vote_per_address().get() {
            require!(
                !self.has_voted(vote_id, voter).get(),
                "Already voted"
            );
        }

        let mut vote = self.votes(vote_id).get();
        vote.tally(choice);
        self.votes(vote_id).set(&vote);
        self.has_voted(vote_id, voter).set(true);
        self.voter_choice(vote_id, voter).set(choice);

        self.stats().update(|stats| {
            stats.zk_proofs_generated += 1;
            stats.pending_votes = stats.pending_votes.saturating_sub(1);
        });
        self.push_activity(
            ManagedBuffer::from(b"Vote submitted (ZK Proof)"),
            vote.fund_name.clone(),
        );

        self.vote_cast_event(vote_id, voter, choice);
    }

    // ========================================================
    // ENDPOINT: addTransaction
    // ========================================================

    #[endpoint(addTransaction)]
    fn add_transaction(&self, draft: TransactionDraft<Self::Api>) -> u64 {
        self.write_transaction(draft, TransactionStatus::Pending)
    }

    fn write_transaction(
        &self,
        draft: TransactionDraft<Self::Api>,
        status: TransactionStatus,
    ) -> u64 {
        let transaction_id = self.transaction_count().get() + 1;
        let transaction = Transaction {
            id: transaction_id,
            tx_type: draft.tx_type,
            amount: draft.amount,
            asset: draft.asset,
            to_asset: draft.to_asset,
            to_amount: draft.to_amount,
            fund_name: draft.fund_name,
            status,
            timestamp: self.blockchain().get_block_timestamp(),
            proof_hash: self.proof_hash(),
            from: draft.from,
            to: draft.to,
            signatures: draft.signatures,
        };
        self.transactions(transaction_id).set(&transaction);
        self.transaction_count().set(transaction_id);

        // Executions count their own private transaction.
        if status == TransactionStatus::Pending {
            self.stats().update(|stats| {
                stats.private_transactions += 1;
                stats.zk_proofs_generated += 1;
            });
            let mut action = ManagedBuffer::from(transaction.tx_type.label());
            action.append_bytes(b" initiated");
            self.push_activity(action, transaction.fund_name.clone());
        }

        self.transaction_recorded_event(transaction_id, transaction.tx_type, &transaction.amount);
        transaction_id
    }

    // ========================================================
    // Fund balance adjustments (deposit / withdraw settlement)
    // ========================================================

    fn credit_fund(&self, fund_id: u64, amount: &BigUint) {
        let mut fund = self.funds(fund_id).get();
        fund.tvl += amount;
        self.funds(fund_id).set(&fund);
        self.fund_tvl_changed_event(fund_id, &fund.tvl);
    }

    fn debit_fund(&self, fund_id: u64, amount: &BigUint) {
        let mut fund = self.funds(fund_id).get();
        if fund.tvl >= *amount {
            fund.tvl -= amount;
        } else {
            fund.tvl = BigUint::zero();
        }
        self.funds(fund_id).set(&fund);
        self.fund_tvl_changed_event(fund_id, &fund.tvl);
    }

    // ========================================================
    // INTERNAL: activity feed
    // Most recent first, bounded to ACTIVITY_WINDOW entries.
    // ========================================================

    fn push_activity(&self, action: ManagedBuffer, fund: ManagedBuffer) {
        let head = self.activity_head().get();
        let entry = ActivityEntry {
            timestamp: self.blockchain().get_block_timestamp(),
            action,
            fund,
        };
        self.activity_slot(head % ACTIVITY_WINDOW).set(&entry);
        self.activity_head().set(head + 1);
    }

    // ========================================================
    // INTERNAL: cosmetic digests
    // ========================================================

    fn next_digest(&self) -> [u8; 32] {
        let nonce = self.digest_nonce().get() + 1;
        self.digest_nonce().set(nonce);

        let mut seed = format::prefixed_id::<Self::Api>(b"zk-fund:", nonce);
        seed.append_bytes(b":");
        format::append_u64(&mut seed, self.blockchain().get_block_timestamp());
        seed.append(self.blockchain().get_block_random_seed().as_managed_buffer());
        self.crypto().keccak256(&seed).to_byte_array()
    }

    fn proof_hash(&self) -> ManagedBuffer {
        format::short_digest(b"0x", &self.next_digest())
    }

    fn synthetic_address(&self, prefix: &[u8]) -> ManagedBuffer {
        format::short_digest(prefix, &self.next_digest())
    }

    fn wallet_label(&self, address: &ManagedAddress) -> ManagedBuffer {
        format::short_digest(b"wallet_0x", &address.to_byte_array())
    }

    // ========================================================
    // INTERNAL: input parsing
    // ========================================================

    fn parse_threshold(&self, raw: &ManagedBuffer) -> SignerThreshold {
        require!(raw.len() <= MAX_THRESHOLD_LEN, "Invalid signer threshold");
        let mut bytes = [0u8; MAX_THRESHOLD_LEN];
        let slice = raw.load_to_byte_array(&mut bytes);
        match SignerThreshold::parse(slice) {
            Some(threshold) => threshold,
            None => sc_panic!("Invalid signer threshold"),
        }
    }

    fn parse_choice(&self, raw: &ManagedBuffer) -> VoteChoice {
        if raw.len() > MAX_CHOICE_LEN {
            return VoteChoice::Abstain;
        }
        let mut bytes = [0u8; MAX_CHOICE_LEN];
        VoteChoice::from_label(raw.load_to_byte_array(&mut bytes))
    }
}
