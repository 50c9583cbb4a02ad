multiversx_sc::imports!();

use crate::types::{ActivityEntry, Fund, ProofJob, Proposal, Stats, Transaction, Vote, VoteChoice};

#[multiversx_sc::module]
pub trait StorageModule {
    // ── Funds ──

    #[storage_mapper("fundCount")]
    fn fund_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("funds")]
    fn funds(&self, id: u64) -> SingleValueMapper<Fund<Self::Api>>;

    // ── Proposals ──

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    // ── Votes ──

    #[storage_mapper("voteCount")]
    fn vote_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("votes")]
    fn votes(&self, id: u64) -> SingleValueMapper<Vote<Self::Api>>;

    #[storage_mapper("hasVoted")]
    fn has_voted(&self, vote_id: u64, voter: &ManagedAddress) -> SingleValueMapper<bool>;

    #[storage_mapper("voterChoice")]
    fn voter_choice(&self, vote_id: u64, voter: &ManagedAddress) -> SingleValueMapper<VoteChoice>;

    // ── Transactions ──

    #[storage_mapper("transactionCount")]
    fn transaction_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("transactions")]
    fn transactions(&self, id: u64) -> SingleValueMapper<Transaction<Self::Api>>;

    // ── Stats & activity ──

    #[storage_mapper("stats")]
    fn stats(&self) -> SingleValueMapper<Stats>;

    /// Number of activity entries ever written; the feed keeps the last
    /// `ACTIVITY_WINDOW` of them in a ring of slots.
    #[storage_mapper("activityHead")]
    fn activity_head(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("activitySlot")]
    fn activity_slot(&self, slot: u64) -> SingleValueMapper<ActivityEntry<Self::Api>>;

    #[storage_mapper("digestNonce")]
    fn digest_nonce(&self) -> SingleValueMapper<u64>;

    // ── UI session state ──

    #[storage_mapper("createFundModalOpen")]
    fn create_fund_modal_open(&self, user: &ManagedAddress) -> SingleValueMapper<bool>;

    #[storage_mapper("createProposalModalOpen")]
    fn create_proposal_modal_open(&self, user: &ManagedAddress) -> SingleValueMapper<bool>;

    // ── Proof jobs ──

    #[storage_mapper("proofJobCount")]
    fn proof_job_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proofJobs")]
    fn proof_jobs(&self, id: u64) -> SingleValueMapper<ProofJob<Self::Api>>;

    /// The caller's in-flight job; empty when nothing is generating.
    #[storage_mapper("activeProofJob")]
    fn active_proof_job(&self, user: &ManagedAddress) -> SingleValueMapper<u64>;
}
