multiversx_sc::imports!();

use crate::types::{ProposalStatus, Vote, VoteResult, VoteStatus};
use crate::{config, events, storage, store};

#[multiversx_sc::module]
pub trait BallotsModule:
    storage::StorageModule + config::ConfigModule + events::EventsModule + store::StoreModule
{
    // ========================================================
    // ENDPOINT: openVote
    // Puts a proposal to a member ballot.
    // ========================================================

    #[endpoint(openVote)]
    fn open_vote(&self, proposal_id: u64, quorum: u64, duration: u64) -> u64 {
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );
        let mut proposal = self.proposals(proposal_id).get();
        require!(
            !proposal.status.is_terminal(),
            "Proposal is already finalized"
        );
        require!(
            proposal.status != ProposalStatus::Voting,
            "Proposal is already being voted on"
        );
        require!(duration > 0, "Voting window must be positive");

        let fund = self.funds(proposal.fund_id).get();
        let now = self.blockchain().get_block_timestamp();
        let vote_id = self.vote_count().get() + 1;
        let vote = Vote {
            id: vote_id,
            proposal_id,
            proposal_title: proposal.title.clone(),
            fund_name: proposal.fund_name.clone(),
            status: VoteStatus::Active,
            end_time: now + duration,
            votes_for: 0,
            votes_against: 0,
            abstain: 0,
            total_votes: u64::from(fund.members),
            quorum,
            user_voted: false,
            user_choice: None,
            result: None,
        };
        self.votes(vote_id).set(&vote);
        self.vote_count().set(vote_id);

        proposal.status = ProposalStatus::Voting;
        proposal.votes_for = Some(0);
        proposal.votes_against = Some(0);
        proposal.total_votes = Some(vote.total_votes);
        self.proposals(proposal_id).set(&proposal);

        self.stats().update(|stats| stats.pending_votes += 1);
        self.push_activity(
            ManagedBuffer::from(b"Ballot opened"),
            proposal.fund_name.clone(),
        );

        self.vote_opened_event(vote_id, proposal_id, vote.end_time);
        vote_id
    }

    // ========================================================
    // ENDPOINT: closeVote
    // After the window: Passed when quorum is met and for > against.
    // A passed proposal goes back to collecting signatures, a failed
    // one is rejected.
    // ========================================================

    #[endpoint(closeVote)]
    fn close_vote(&self, vote_id: u64) {
        require!(!self.votes(vote_id).is_empty(), "Vote does not exist");
        let mut vote = self.votes(vote_id).get();
        require!(vote.status == VoteStatus::Active, "Vote has ended");

        let now = self.blockchain().get_block_timestamp();
        require!(now > vote.end_time, "Voting period has not ended");

        let result = vote.outcome();
        vote.status = VoteStatus::Ended;
        vote.result = Some(result);
        self.votes(vote_id).set(&vote);

        if !self.proposals(vote.proposal_id).is_empty() {
            let mut proposal = self.proposals(vote.proposal_id).get();
            proposal.votes_for = Some(vote.votes_for);
            proposal.votes_against = Some(vote.votes_against);
            if proposal.status == ProposalStatus::Voting {
                proposal.status = match result {
                    VoteResult::Passed => ProposalStatus::Active,
                    VoteResult::Rejected => ProposalStatus::Rejected,
                };
                if result == VoteResult::Rejected {
                    self.stats().update(|stats| {
                        stats.active_proposals = stats.active_proposals.saturating_sub(1)
                    });
                }
            }
            self.proposals(vote.proposal_id).set(&proposal);
        }

        // A ballot nobody voted on still holds the pending vote it opened with.
        if !vote.user_voted {
            self.stats().update(|stats| {
                stats.pending_votes = stats.pending_votes.saturating_sub(1)
            });
        }
        self.push_activity(ManagedBuffer::from(b"Ballot closed"), vote.fund_name.clone());
        self.vote_closed_event(vote_id, result);
    }
}
