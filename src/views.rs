multiversx_sc::imports!();

use crate::storage;
use crate::types::{
    ActivityEntry, Fund, OperationType, ProofJob, ProofRequest, ProofStatus, Proposal,
    ProposalStatus, Stats, Transaction, Vote, VoteChoice,
};
use crate::ACTIVITY_WINDOW;

#[multiversx_sc::module]
pub trait ViewsModule: storage::StorageModule {
    // ── Funds ──

    #[view(getFund)]
    fn get_fund(&self, id: u64) -> Fund<Self::Api> {
        require!(!self.funds(id).is_empty(), "Fund does not exist");
        self.funds(id).get()
    }

    /// In creation order.
    #[view(getFunds)]
    fn get_funds(&self) -> MultiValueEncoded<Fund<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for id in 1..=self.fund_count().get() {
            result.push(self.funds(id).get());
        }
        result
    }

    /// Sum of every fund's TVL, recomputed on each read.
    #[view(getTotalValueLocked)]
    fn get_total_value_locked(&self) -> BigUint {
        let mut total = BigUint::zero();
        for id in 1..=self.fund_count().get() {
            total += self.funds(id).get().tvl;
        }
        total
    }

    // ── Proposals ──

    #[view(getProposal)]
    fn get_proposal(&self, id: u64) -> Proposal<Self::Api> {
        require!(!self.proposals(id).is_empty(), "Proposal does not exist");
        self.proposals(id).get()
    }

    /// Newest first.
    #[view(getProposals)]
    fn get_proposals(&self) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for id in (1..=self.proposal_count().get()).rev() {
            result.push(self.proposals(id).get());
        }
        result
    }

    #[view(getProposalsByStatus)]
    fn get_proposals_by_status(
        &self,
        status: ProposalStatus,
    ) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for id in (1..=self.proposal_count().get()).rev() {
            let proposal = self.proposals(id).get();
            if proposal.status == status {
                result.push(proposal);
            }
        }
        result
    }

    // ── Votes ──

    #[view(getVote)]
    fn get_vote(&self, id: u64) -> Vote<Self::Api> {
        require!(!self.votes(id).is_empty(), "Vote does not exist");
        self.votes(id).get()
    }

    #[view(getVotes)]
    fn get_votes(&self) -> MultiValueEncoded<Vote<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for id in 1..=self.vote_count().get() {
            result.push(self.votes(id).get());
        }
        result
    }

    #[view(getVoterChoice)]
    fn get_voter_choice(&self, vote_id: u64, voter: &ManagedAddress) -> OptionalValue<VoteChoice> {
        if self.has_voted(vote_id, voter).get() {
            OptionalValue::Some(self.voter_choice(vote_id, voter).get())
        } else {
            OptionalValue::None
        }
    }

    // ── Transactions ──

    #[view(getTransaction)]
    fn get_transaction(&self, id: u64) -> Transaction<Self::Api> {
        require!(!self.transactions(id).is_empty(), "Transaction does not exist");
        self.transactions(id).get()
    }

    /// Newest first.
    #[view(getTransactions)]
    fn get_transactions(&self) -> MultiValueEncoded<Transaction<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for id in (1..=self.transaction_count().get()).rev() {
            result.push(self.transactions(id).get());
        }
        result
    }

    /// Newest first.
    #[view(getTransactionsByType)]
    fn get_transactions_by_type(
        &self,
        tx_type: OperationType,
    ) -> MultiValueEncoded<Transaction<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for id in (1..=self.transaction_count().get()).rev() {
            let transaction = self.transactions(id).get();
            if transaction.tx_type == tx_type {
                result.push(transaction);
            }
        }
        result
    }

    // ── Stats & activity ──

    #[view(getStats)]
    fn get_stats(&self) -> Stats {
        self.stats().get()
    }

    /// At most `ACTIVITY_WINDOW` entries, most recent first.
    #[view(getActivity)]
    fn get_activity(&self) -> MultiValueEncoded<ActivityEntry<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let head = self.activity_head().get();
        let count = core::cmp::min(head, ACTIVITY_WINDOW);
        for offset in 1..=count {
            result.push(self.activity_slot((head - offset) % ACTIVITY_WINDOW).get());
        }
        result
    }

    // ── UI session state ──

    #[view(isCreateFundModalOpen)]
    fn is_create_fund_modal_open(&self, user: &ManagedAddress) -> bool {
        self.create_fund_modal_open(user).get()
    }

    #[view(isCreateProposalModalOpen)]
    fn is_create_proposal_modal_open(&self, user: &ManagedAddress) -> bool {
        self.create_proposal_modal_open(user).get()
    }

    // ── Proof jobs ──

    #[view(getProofJob)]
    fn get_proof_job(&self, job_id: u64) -> ProofJob<Self::Api> {
        require!(!self.proof_jobs(job_id).is_empty(), "Proof job does not exist");
        self.proof_jobs(job_id).get()
    }

    #[view(getActiveProofJob)]
    fn get_active_proof_job(&self, user: &ManagedAddress) -> OptionalValue<u64> {
        let mapper = self.active_proof_job(user);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    /// (steps completed, total steps, ready to complete)
    #[view(getProofProgress)]
    fn get_proof_progress(&self, job_id: u64) -> MultiValue3<u32, u32, bool> {
        let job = self.get_proof_job(job_id);
        let now = self.blockchain().get_block_timestamp();
        let multisig = self.is_multisig_withdrawal(&job);
        let total = job.request.kind().checklist(multisig).len() as u32;
        let completed = job.steps_completed(now, total);
        let ready = job.status == ProofStatus::Generating && now >= job.ready_at;
        (completed, total, ready).into()
    }

    #[view(getProofChecklist)]
    fn get_proof_checklist(
        &self,
        job_id: u64,
    ) -> MultiValueEncoded<MultiValue2<ManagedBuffer<Self::Api>, bool>> {
        let job = self.get_proof_job(job_id);
        let now = self.blockchain().get_block_timestamp();
        let multisig = self.is_multisig_withdrawal(&job);
        let steps = job.request.kind().checklist(multisig);
        let completed = job.steps_completed(now, steps.len() as u32) as usize;

        let mut result = MultiValueEncoded::new();
        for (index, label) in steps.iter().enumerate() {
            result.push((ManagedBuffer::from(*label), index < completed).into());
        }
        result
    }

    fn is_multisig_withdrawal(&self, job: &ProofJob<Self::Api>) -> bool {
        match &job.request {
            ProofRequest::Withdraw(draft) => self.funds(draft.fund_id).get().signers.is_multisig(),
            _ => false,
        }
    }
}
