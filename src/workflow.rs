multiversx_sc::imports!();

use crate::types::{
    BallotDraft, DepositDraft, FundDraft, FundType, OperationType, ProofJob, ProofKind,
    ProofRequest, ProofStatus, ProposalDraft, TransactionDraft, TransactionStatus, VoteStatus,
    WithdrawDraft,
};
use crate::{config, events, format, storage, store};
use crate::{MAX_FUND_MEMBERS, MIN_FUND_MEMBERS};

/// Proof-gated workflows. A `request*` endpoint validates the form and
/// starts a proof job; `completeProof` applies the store action once the
/// simulated proving time has elapsed; `cancelProof` drops it.
#[multiversx_sc::module]
pub trait WorkflowModule:
    storage::StorageModule + config::ConfigModule + events::EventsModule + store::StoreModule
{
    // ========================================================
    // ENDPOINTS: requests
    // ========================================================

    #[endpoint(requestCreateFund)]
    fn request_create_fund(
        &self,
        name: ManagedBuffer,
        fund_type: FundType,
        members: u32,
        signers: ManagedBuffer,
    ) -> u64 {
        require!(!name.is_empty(), "Fund name is required");
        require!(
            (MIN_FUND_MEMBERS..=MAX_FUND_MEMBERS).contains(&members),
            "Members must be between 2 and 100"
        );
        let signers = self.parse_threshold(&signers);
        require!(
            signers.required <= signers.total,
            "Threshold exceeds signer count"
        );

        self.start_proof_job(ProofRequest::CreateFund(FundDraft {
            name,
            fund_type,
            members,
            signers,
        }))
    }

    #[endpoint(requestCreateProposal)]
    fn request_create_proposal(
        &self,
        title: ManagedBuffer,
        description: ManagedBuffer,
        proposal_type: OperationType,
        fund_id: u64,
        opt_amount: OptionalValue<BigUint>,
    ) -> u64 {
        require!(!title.is_empty(), "Proposal title is required");
        require!(fund_id != 0, "A fund must be selected");

        self.start_proof_job(ProofRequest::CreateProposal(ProposalDraft {
            title,
            description,
            proposal_type,
            fund_id,
            amount: opt_amount.into_option(),
        }))
    }

    #[endpoint(requestDeposit)]
    fn request_deposit(&self, fund_id: u64, amount: BigUint, asset: ManagedBuffer) -> u64 {
        require!(!self.funds(fund_id).is_empty(), "Fund does not exist");
        require!(amount > 0u64, "Amount must be positive");
        require!(!asset.is_empty(), "Asset is required");

        self.start_proof_job(ProofRequest::Deposit(DepositDraft {
            fund_id,
            amount,
            asset,
        }))
    }

    #[endpoint(requestWithdraw)]
    fn request_withdraw(
        &self,
        fund_id: u64,
        amount: BigUint,
        asset: ManagedBuffer,
        opt_destination: OptionalValue<ManagedBuffer>,
    ) -> u64 {
        require!(!self.funds(fund_id).is_empty(), "Fund does not exist");
        require!(amount > 0u64, "Amount must be positive");
        require!(!asset.is_empty(), "Asset is required");
        let fund = self.funds(fund_id).get();
        require!(amount <= fund.tvl, "Amount exceeds available balance");

        let destination = opt_destination
            .into_option()
            .filter(|destination| !destination.is_empty());
        self.start_proof_job(ProofRequest::Withdraw(WithdrawDraft {
            fund_id,
            amount,
            asset,
            destination,
        }))
    }

    #[endpoint(requestVote)]
    fn request_vote(&self, vote_id: u64, choice: ManagedBuffer) -> u64 {
        let caller = self.blockchain().get_caller();
        require!(!self.votes(vote_id).is_empty(), "Vote does not exist");
        let vote = self.votes(vote_id).get();
        require!(vote.status == VoteStatus::Active, "Vote has ended");
        require!(
            !self.has_voted(vote_id, &caller).get(),
            "Already voted"
        );

        let choice = self.parse_choice(&choice);
        self.start_proof_job(ProofRequest::Vote(BallotDraft { vote_id, choice }))
    }

    fn start_proof_job(&self, request: ProofRequest<Self::Api>) -> u64 {
        let caller = self.blockchain().get_caller();
        require!(
            self.active_proof_job(&caller).is_empty(),
            "A proof is already being generated"
        );

        let kind = request.kind();
        let now = self.blockchain().get_block_timestamp();
        let job_id = self.proof_job_count().get() + 1;
        let job = ProofJob {
            id: job_id,
            requester: caller.clone(),
            request,
            requested_at: now,
            ready_at: now + self.proof_delay(kind).get(),
            status: ProofStatus::Generating,
        };
        self.proof_jobs(job_id).set(&job);
        self.proof_job_count().set(job_id);
        self.active_proof_job(&caller).set(job_id);

        self.proof_requested_event(job_id, &caller, kind, job.ready_at);
        job_id
    }

    // ========================================================
    // ENDPOINT: completeProof
    // ========================================================

    #[endpoint(completeProof)]
    fn complete_proof(&self, job_id: u64) {
        let caller = self.blockchain().get_caller();
        let mut job = self.generating_job(job_id, &caller);
        let now = self.blockchain().get_block_timestamp();
        require!(now >= job.ready_at, "Proof is still being generated");

        job.status = ProofStatus::Completed;
        self.proof_jobs(job_id).set(&job);
        self.active_proof_job(&caller).clear();

        let kind = job.request.kind();
        match job.request {
            ProofRequest::CreateFund(draft) => {
                self.insert_fund(draft);
                self.create_fund_modal_open(&caller).set(false);
            }
            ProofRequest::CreateProposal(draft) => {
                self.insert_proposal(draft, &caller);
                self.create_proposal_modal_open(&caller).set(false);
            }
            ProofRequest::Deposit(draft) => self.settle_deposit(draft, &caller),
            ProofRequest::Withdraw(draft) => self.settle_withdraw(draft, &caller),
            ProofRequest::Vote(ballot) => {
                require!(
                    self.votes(ballot.vote_id).get().status == VoteStatus::Active,
                    "Vote has ended"
                );
                self.record_vote(ballot.vote_id, ballot.choice, &caller);
            }
        }

        self.proof_completed_event(job_id, kind);
    }

    // ========================================================
    // ENDPOINT: cancelProof
    // ========================================================

    #[endpoint(cancelProof)]
    fn cancel_proof(&self, job_id: u64) {
        let caller = self.blockchain().get_caller();
        let mut job = self.generating_job(job_id, &caller);

        job.status = ProofStatus::Cancelled;
        self.proof_jobs(job_id).set(&job);
        self.active_proof_job(&caller).clear();

        self.proof_cancelled_event(job_id, job.request.kind());
    }

    fn generating_job(&self, job_id: u64, caller: &ManagedAddress) -> ProofJob<Self::Api> {
        require!(!self.proof_jobs(job_id).is_empty(), "Proof job does not exist");
        let job = self.proof_jobs(job_id).get();
        require!(&job.requester == caller, "Only the requester can settle a proof job");
        require!(
            job.status == ProofStatus::Generating,
            "Proof job is no longer generating"
        );
        job
    }

    // ========================================================
    // INTERNAL: settlement
    // ========================================================

    fn settle_deposit(&self, draft: DepositDraft<Self::Api>, depositor: &ManagedAddress) {
        let fund = self.funds(draft.fund_id).get();
        let transaction = TransactionDraft {
            tx_type: OperationType::Deposit,
            amount: draft.amount.clone(),
            asset: draft.asset,
            to_asset: None,
            to_amount: None,
            fund_name: fund.name,
            from: self.wallet_label(depositor),
            to: format::prefixed_id(b"zk_pool_", fund.id),
            signatures: None,
        };
        self.write_transaction(transaction, TransactionStatus::Pending);
        self.credit_fund(draft.fund_id, &draft.amount);
    }

    /// Multisig funds turn a withdrawal into a proposal; single-signer
    /// funds pay out straight away.
    fn settle_withdraw(&self, draft: WithdrawDraft<Self::Api>, requester: &ManagedAddress) {
        let fund = self.funds(draft.fund_id).get();

        if fund.signers.is_multisig() {
            let mut title = ManagedBuffer::from(b"Withdraw ");
            title.append(&draft.amount.to_display());
            title.append_bytes(b" ");
            title.append(&draft.asset);

            let mut description = title.clone();
            description.append_bytes(b" to stealth address");

            self.insert_proposal(
                ProposalDraft {
                    title,
                    description,
                    proposal_type: OperationType::Withdraw,
                    fund_id: fund.id,
                    amount: Some(draft.amount),
                },
                requester,
            );
            return;
        }

        let to = match draft.destination {
            Some(destination) => destination,
            None => self.synthetic_address(b"stealth_0x"),
        };
        let transaction = TransactionDraft {
            tx_type: OperationType::Withdraw,
            amount: draft.amount.clone(),
            asset: draft.asset,
            to_asset: None,
            to_amount: None,
            fund_name: fund.name,
            from: format::prefixed_id(b"zk_pool_", fund.id),
            to,
            signatures: None,
        };
        self.write_transaction(transaction, TransactionStatus::Pending);
        self.debit_fund(draft.fund_id, &draft.amount);
    }
}
