use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::Item;

pub const CONFIG: Item<RaffleConfig> = Item::new("config");
pub const ROUND: Item<Round> = Item::new("round");
pub const LIFECYCLE: Item<RaffleLifecycle> = Item::new("lifecycle");
/// Absent between draws; present iff a randomness request is in flight.
pub const PENDING_REQUEST: Item<PendingRequest> = Item::new("pending_request");
pub const RECENT_WINNER: Item<Addr> = Item::new("recent_winner");
pub const NEXT_REQUEST_ID: Item<u64> = Item::new("next_request_id");
pub const STATS: Item<RaffleStats> = Item::new("stats");

/// Immutable post-instantiation.
#[cw_serde]
pub struct RaffleConfig {
    pub vrf_coordinator: Addr,
    pub entrance_fee: Uint128,
    pub prize_denom: String,
    /// Minimum seconds between settlement and the next draw trigger.
    pub interval_seconds: u64,
    pub callback_gas_limit: u64,
}

#[cw_serde]
pub enum RaffleLifecycle {
    /// Accepting entries.
    Open,
    /// A draw is in flight; entries and new draw triggers are rejected.
    Calculating,
}

/// The current round's ledger. Players are kept in entry order and an address
/// may appear once per entry it made, each slot weighted equally at selection.
#[cw_serde]
pub struct Round {
    pub players: Vec<Addr>,
    pub prize_pool: Uint128,
    pub last_settled_at: Timestamp,
}

#[cw_serde]
pub struct PendingRequest {
    pub request_id: u64,
    pub requested_at: Timestamp,
}

#[cw_serde]
pub struct RaffleStats {
    pub rounds_settled: u64,
    pub total_paid_out: Uint128,
}
