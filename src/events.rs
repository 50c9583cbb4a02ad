multiversx_sc::imports!();

use crate::types::{FundType, OperationType, ProofKind, VoteChoice, VoteResult};

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("fundCreated")]
    fn fund_created_event(
        &self,
        #[indexed] fund_id: u64,
        #[indexed] fund_type: FundType,
        name: &ManagedBuffer,
    );

    #[event("fundTvlChanged")]
    fn fund_tvl_changed_event(&self, #[indexed] fund_id: u64, tvl: &BigUint);

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] fund_id: u64,
        #[indexed] creator: &ManagedAddress,
        deadline: u64,
    );

    #[event("proposalSigned")]
    fn proposal_signed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] signer: &ManagedAddress,
        signatures: u32,
    );

    #[event("proposalExecuted")]
    fn proposal_executed_event(&self, #[indexed] proposal_id: u64, transaction_id: u64);

    #[event("proposalRejected")]
    fn proposal_rejected_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] rejecter: &ManagedAddress,
    );

    #[event("voteOpened")]
    fn vote_opened_event(
        &self,
        #[indexed] vote_id: u64,
        #[indexed] proposal_id: u64,
        end_time: u64,
    );

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] vote_id: u64,
        #[indexed] voter: &ManagedAddress,
        choice: VoteChoice,
    );

    #[event("voteClosed")]
    fn vote_closed_event(&self, #[indexed] vote_id: u64, result: VoteResult);

    #[event("transactionRecorded")]
    fn transaction_recorded_event(
        &self,
        #[indexed] transaction_id: u64,
        #[indexed] tx_type: OperationType,
        amount: &BigUint,
    );

    #[event("proofRequested")]
    fn proof_requested_event(
        &self,
        #[indexed] job_id: u64,
        #[indexed] requester: &ManagedAddress,
        #[indexed] kind: ProofKind,
        ready_at: u64,
    );

    #[event("proofCompleted")]
    fn proof_completed_event(&self, #[indexed] job_id: u64, #[indexed] kind: ProofKind);

    #[event("proofCancelled")]
    fn proof_cancelled_event(&self, #[indexed] job_id: u64, #[indexed] kind: ProofKind);

    #[event("modalToggled")]
    fn modal_toggled_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] modal: &ManagedBuffer,
        open: bool,
    );
}
