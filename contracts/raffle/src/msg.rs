use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128, Uint256};

use crate::state::{PendingRequest, RaffleConfig, RaffleLifecycle, RaffleStats, Round};
use crate::upkeep::UpkeepEvaluation;

#[cw_serde]
pub struct InstantiateMsg {
    pub vrf_coordinator: String,
    /// Fixed entry fee; must be positive.
    pub entrance_fee: Uint128,
    pub prize_denom: String,
    /// Minimum seconds between draws.
    pub interval_seconds: u64,
    pub callback_gas_limit: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Enter the current round. At least the entrance fee must be attached
    /// in the prize denom; the full payment joins the pot.
    Enter {},
    /// Trigger a draw if the upkeep predicate holds at call time. Open to
    /// anyone; typically invoked by an external automation caller.
    PerformUpkeep {},
    /// Randomness delivery callback. Only the VRF coordinator may call.
    FulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RaffleConfig)]
    Config {},

    /// The current round's ledger: players, pot, last settlement time.
    #[returns(Round)]
    Round {},

    #[returns(Option<Addr>)]
    Player { index: u32 },

    #[returns(u32)]
    NumPlayers {},

    #[returns(RaffleLifecycle)]
    Lifecycle {},

    #[returns(Option<Addr>)]
    RecentWinner {},

    #[returns(Option<PendingRequest>)]
    PendingRequest {},

    /// Pure upkeep predicate with its context; idempotent, never mutates.
    #[returns(UpkeepEvaluation)]
    CheckUpkeep {},

    #[returns(RaffleStats)]
    Stats {},
}

#[cw_serde]
pub struct MigrateMsg {}
