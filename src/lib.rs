#![no_std]

multiversx_sc::imports!();

pub mod ballots;
pub mod config;
pub mod events;
pub mod format;
pub mod seed;
pub mod storage;
pub mod store;
pub mod types;
pub mod views;
pub mod workflow;

use types::Stats;

// ============================================================
// Constants
// ============================================================

/// Entries kept in the recent-activity feed
pub const ACTIVITY_WINDOW: u64 = 5;

/// Proposal deadline: 7 days after creation, in seconds
pub const PROPOSAL_LIFETIME: u64 = 7 * 86_400;

/// NAV of a freshly created fund (1.0 in basis points)
pub const NAV_ONE_BPS: u64 = 10_000;

/// Asset used for transactions synthesized from executed proposals
pub const DEFAULT_ASSET: &[u8] = b"USDC";

/// Bounds on the initial member count of a fund created through the
/// proof workflow.
pub const MIN_FUND_MEMBERS: u32 = 2;
pub const MAX_FUND_MEMBERS: u32 = 100;

// ============================================================
// Contract
// ============================================================

/// Demo dashboard for a privacy-preserving fund: funds, multisig
/// proposals, ballots and a shielded transaction log, with simulated
/// proof generation gating every interactive workflow.
#[multiversx_sc::contract]
pub trait ZkFund:
    storage::StorageModule
    + config::ConfigModule
    + events::EventsModule
    + store::StoreModule
    + workflow::WorkflowModule
    + ballots::BallotsModule
    + views::ViewsModule
    + seed::SeedModule
{
    #[init]
    fn init(&self, seed_demo_data: bool, single_vote_per_address: bool) {
        self.init_config(single_vote_per_address);
        self.stats().set(Stats::default());
        if seed_demo_data {
            self.seed_demo_data();
        }
    }

    #[upgrade]
    fn upgrade(&self) {}
}
