multiversx_sc::imports!();

use crate::types::ProofKind;

#[multiversx_sc::module]
pub trait ConfigModule {
    fn init_config(&self, single_vote_per_address: bool) {
        for kind in ProofKind::ALL {
            self.proof_delay(kind).set(kind.default_delay());
        }
        self.single_vote_per_address().set(single_vote_per_address);
    }

    #[endpoint(setProofDelay)]
    fn set_proof_delay(&self, kind: ProofKind, seconds: u64) {
        self.require_owner();
        self.proof_delay(kind).set(seconds);
    }

    /// When set, `castVote` refuses a second ballot from the same address.
    #[endpoint(setSingleVotePerAddress)]
    fn set_single_vote_per_address(&self, enabled: bool) {
        self.require_owner();
        self.single_vote_per_address().set(enabled);
    }

    fn require_owner(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.blockchain().get_owner_address(),
            "Only the owner can change configuration"
        );
    }

    #[view(getConfig)]
    fn get_config(&self) -> MultiValue6<u64, u64, u64, u64, u64, bool> {
        (
            self.proof_delay(ProofKind::CreateFund).get(),
            self.proof_delay(ProofKind::CreateProposal).get(),
            self.proof_delay(ProofKind::Deposit).get(),
            self.proof_delay(ProofKind::Withdraw).get(),
            self.proof_delay(ProofKind::Vote).get(),
            self.single_vote_per_address().get(),
        )
            .into()
    }

    #[storage_mapper("proofDelay")]
    fn proof_delay(&self, kind: ProofKind) -> SingleValueMapper<u64>;

    #[storage_mapper("singleVotePerAddress")]
    fn single_vote_per_address(&self) -> SingleValueMapper<bool>;
}
