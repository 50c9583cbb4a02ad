multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Funds
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum FundType {
    PrivateEquity,
    OtcTrading,
    DaoTreasury,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum FundStatus {
    Active,
    /// Seeded funds still waiting on member onboarding.
    Pending,
}

/// Multisig threshold, written as `required/total` (e.g. "3/5").
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub struct SignerThreshold {
    pub required: u32,
    pub total: u32,
}

impl SignerThreshold {
    pub const fn new(required: u32, total: u32) -> Self {
        SignerThreshold { required, total }
    }

    /// Parses `required/total`. Both sides must be non-empty decimal
    /// numbers and the numerator must be at least one.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let split = raw.iter().position(|b| *b == b'/')?;
        let required = parse_decimal(&raw[..split])?;
        let total = parse_decimal(&raw[split + 1..])?;
        if required == 0 || total == 0 {
            return None;
        }
        Some(SignerThreshold { required, total })
    }

    pub fn is_multisig(&self) -> bool {
        self.required > 1
    }

    pub fn is_met_by(&self, signatures: u32) -> bool {
        signatures >= self.required
    }
}

fn parse_decimal(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for digit in digits {
        if !digit.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_add(u32::from(digit - b'0'))?;
    }
    Some(value)
}

#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, ManagedVecItem, Clone, PartialEq, Debug,
)]
pub struct AllocationEntry<M: ManagedTypeApi> {
    pub asset: ManagedBuffer<M>,
    pub percentage_bps: u32,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Fund<M: ManagedTypeApi> {
    pub id: u64,
    pub name: ManagedBuffer<M>,
    pub fund_type: FundType,
    pub tvl: BigUint<M>,
    /// NAV multiplier in basis points (10_000 = 1.0)
    pub nav_bps: u64,
    /// NAV change in basis points, signed
    pub nav_change_bps: i64,
    pub members: u32,
    pub signers: SignerThreshold,
    pub status: FundStatus,
    pub allocation: ManagedVec<M, AllocationEntry<M>>,
}

// ============================================================
// Proposals
// ============================================================

/// What a proposal or a transaction moves. Shared so an executed
/// proposal can hand its type straight to the synthesized transaction.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum OperationType {
    Deposit,
    Withdraw,
    Allocation,
    Swap,
    Governance,
}

impl OperationType {
    pub fn label(&self) -> &'static [u8] {
        match self {
            OperationType::Deposit => b"Deposit",
            OperationType::Withdraw => b"Withdrawal",
            OperationType::Allocation => b"Allocation",
            OperationType::Swap => b"Swap",
            OperationType::Governance => b"Governance",
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProposalStatus {
    /// Collecting signatures.
    Active,
    /// Waiting on an off-chain precondition (seed data only).
    Pending,
    /// A ballot is open for this proposal.
    Voting,
    /// Signature threshold reached. Terminal.
    Executed,
    /// Rejected by a signer. Terminal.
    Rejected,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Executed | ProposalStatus::Rejected)
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub title: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub proposal_type: OperationType,
    pub status: ProposalStatus,
    pub fund_id: u64,
    pub fund_name: ManagedBuffer<M>,
    pub required_signatures: SignerThreshold,
    pub current_signatures: u32,
    pub deadline: u64,
    pub created_at: u64,
    pub created_by: ManagedAddress<M>,
    pub amount: Option<BigUint<M>>,
    pub votes_for: Option<u64>,
    pub votes_against: Option<u64>,
    pub total_votes: Option<u64>,
}

// ============================================================
// Votes
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VoteChoice {
    Approve,
    Reject,
    Abstain,
}

impl VoteChoice {
    /// "Approve" and "Reject" map to themselves; any other label abstains.
    pub fn from_label(label: &[u8]) -> Self {
        match label {
            b"Approve" => VoteChoice::Approve,
            b"Reject" => VoteChoice::Reject,
            _ => VoteChoice::Abstain,
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VoteStatus {
    Active,
    Ended,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VoteResult {
    Passed,
    Rejected,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Vote<M: ManagedTypeApi> {
    pub id: u64,
    pub proposal_id: u64,
    pub proposal_title: ManagedBuffer<M>,
    pub fund_name: ManagedBuffer<M>,
    pub status: VoteStatus,
    pub end_time: u64,
    pub votes_for: u64,
    pub votes_against: u64,
    pub abstain: u64,
    /// Eligible voters
    pub total_votes: u64,
    pub quorum: u64,
    pub user_voted: bool,
    pub user_choice: Option<VoteChoice>,
    pub result: Option<VoteResult>,
}

impl<M: ManagedTypeApi> Vote<M> {
    pub fn tally(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Approve => self.votes_for += 1,
            VoteChoice::Reject => self.votes_against += 1,
            VoteChoice::Abstain => self.abstain += 1,
        }
        self.user_voted = true;
        self.user_choice = Some(choice);
    }

    pub fn ballots_cast(&self) -> u64 {
        self.votes_for + self.votes_against + self.abstain
    }

    pub fn quorum_reached(&self) -> bool {
        self.ballots_cast() >= self.quorum
    }

    pub fn outcome(&self) -> VoteResult {
        if self.quorum_reached() && self.votes_for > self.votes_against {
            VoteResult::Passed
        } else {
            VoteResult::Rejected
        }
    }
}

// ============================================================
// Transactions
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Transaction<M: ManagedTypeApi> {
    pub id: u64,
    pub tx_type: OperationType,
    pub amount: BigUint<M>,
    pub asset: ManagedBuffer<M>,
    pub to_asset: Option<ManagedBuffer<M>>,
    pub to_amount: Option<BigUint<M>>,
    pub fund_name: ManagedBuffer<M>,
    pub status: TransactionStatus,
    pub timestamp: u64,
    /// Cosmetic, not a real proof identifier.
    pub proof_hash: ManagedBuffer<M>,
    pub from: ManagedBuffer<M>,
    pub to: ManagedBuffer<M>,
    pub signatures: Option<ManagedBuffer<M>>,
}

/// Caller-supplied part of a transaction; the store fills in the id,
/// status, timestamp and proof hash.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct TransactionDraft<M: ManagedTypeApi> {
    pub tx_type: OperationType,
    pub amount: BigUint<M>,
    pub asset: ManagedBuffer<M>,
    pub to_asset: Option<ManagedBuffer<M>>,
    pub to_amount: Option<BigUint<M>>,
    pub fund_name: ManagedBuffer<M>,
    pub from: ManagedBuffer<M>,
    pub to: ManagedBuffer<M>,
    pub signatures: Option<ManagedBuffer<M>>,
}

// ============================================================
// Stats & activity
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug, Default)]
pub struct Stats {
    pub total_funds: u64,
    pub active_proposals: u64,
    pub zk_proofs_generated: u64,
    pub private_transactions: u64,
    pub pending_votes: u64,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ActivityEntry<M: ManagedTypeApi> {
    pub timestamp: u64,
    pub action: ManagedBuffer<M>,
    pub fund: ManagedBuffer<M>,
}

// ============================================================
// Proof jobs
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProofKind {
    CreateFund,
    CreateProposal,
    Deposit,
    Withdraw,
    Vote,
}

impl ProofKind {
    pub const ALL: [ProofKind; 5] = [
        ProofKind::CreateFund,
        ProofKind::CreateProposal,
        ProofKind::Deposit,
        ProofKind::Withdraw,
        ProofKind::Vote,
    ];

    /// Seconds of simulated proving before the job can be completed.
    /// Block time has one-second resolution, so the 1.5 s proposal pause
    /// and the 3.5 s vote pause round up to 2 and 4.
    pub fn default_delay(&self) -> u64 {
        match self {
            ProofKind::CreateFund => 2,
            ProofKind::CreateProposal => 2,
            ProofKind::Deposit => 3,
            ProofKind::Withdraw => 3,
            ProofKind::Vote => 4,
        }
    }

    /// Steps shown while the proof is generating. `multisig` only
    /// changes the last withdrawal step.
    pub fn checklist(&self, multisig: bool) -> &'static [&'static [u8]] {
        match self {
            ProofKind::CreateFund => &[
                b"Generating membership proofs",
                b"Deploying multisig treasury",
                b"Initializing shielded pool",
            ],
            ProofKind::CreateProposal => &[
                b"Encrypting proposal details",
                b"Submitting to ZK network",
            ],
            ProofKind::Deposit => &[
                b"Verifying wallet balance",
                b"Computing commitment hash",
                b"Generating SNARK proof",
                b"Preparing stealth deposit",
            ],
            ProofKind::Withdraw if multisig => &[
                b"Computing nullifier hash",
                b"Generating stealth address",
                b"Creating withdrawal proof",
                b"Submitting proposal",
            ],
            ProofKind::Withdraw => &[
                b"Computing nullifier hash",
                b"Generating stealth address",
                b"Creating withdrawal proof",
                b"Broadcasting transaction",
            ],
            ProofKind::Vote => &[
                b"Verifying voter eligibility",
                b"Generating SNARK proof",
                b"Creating anonymous vote proof",
            ],
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProofStatus {
    Generating,
    Completed,
    Cancelled,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct FundDraft<M: ManagedTypeApi> {
    pub name: ManagedBuffer<M>,
    pub fund_type: FundType,
    pub members: u32,
    pub signers: SignerThreshold,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ProposalDraft<M: ManagedTypeApi> {
    pub title: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub proposal_type: OperationType,
    pub fund_id: u64,
    pub amount: Option<BigUint<M>>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct DepositDraft<M: ManagedTypeApi> {
    pub fund_id: u64,
    pub amount: BigUint<M>,
    pub asset: ManagedBuffer<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct WithdrawDraft<M: ManagedTypeApi> {
    pub fund_id: u64,
    pub amount: BigUint<M>,
    pub asset: ManagedBuffer<M>,
    pub destination: Option<ManagedBuffer<M>>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub struct BallotDraft {
    pub vote_id: u64,
    pub choice: VoteChoice,
}

/// The store action a proof job applies once it completes.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub enum ProofRequest<M: ManagedTypeApi> {
    CreateFund(FundDraft<M>),
    CreateProposal(ProposalDraft<M>),
    Deposit(DepositDraft<M>),
    Withdraw(WithdrawDraft<M>),
    Vote(BallotDraft),
}

impl<M: ManagedTypeApi> ProofRequest<M> {
    pub fn kind(&self) -> ProofKind {
        match self {
            ProofRequest::CreateFund(_) => ProofKind::CreateFund,
            ProofRequest::CreateProposal(_) => ProofKind::CreateProposal,
            ProofRequest::Deposit(_) => ProofKind::Deposit,
            ProofRequest::Withdraw(_) => ProofKind::Withdraw,
            ProofRequest::Vote(_) => ProofKind::Vote,
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ProofJob<M: ManagedTypeApi> {
    pub id: u64,
    pub requester: ManagedAddress<M>,
    pub request: ProofRequest<M>,
    pub requested_at: u64,
    pub ready_at: u64,
    pub status: ProofStatus,
}

impl<M: ManagedTypeApi> ProofJob<M> {
    /// Checklist steps completed at `now`, out of `total`.
    pub fn steps_completed(&self, now: u64, total: u32) -> u32 {
        match self.status {
            ProofStatus::Completed => total,
            ProofStatus::Cancelled => 0,
            ProofStatus::Generating => {
                let duration = self.ready_at.saturating_sub(self.requested_at);
                if duration == 0 || now >= self.ready_at {
                    return total;
                }
                let elapsed = now.saturating_sub(self.requested_at);
                (elapsed * u64::from(total) / duration) as u32
            }
        }
    }
}
