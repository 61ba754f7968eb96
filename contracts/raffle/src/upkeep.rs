use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Env, StdResult, Storage, Uint128};

use crate::state::{RaffleLifecycle, CONFIG, LIFECYCLE, ROUND};

/// The upkeep verdict together with each conjunct that produced it.
#[cw_serde]
pub struct UpkeepEvaluation {
    pub upkeep_needed: bool,
    pub is_open: bool,
    pub interval_elapsed: bool,
    pub has_players: bool,
    pub has_balance: bool,
    pub num_players: u32,
    pub prize_pool: Uint128,
    pub seconds_since_settlement: u64,
}

/// Evaluate whether a draw may start. Read-only: callable from the query
/// path and re-checked inside `perform_upkeep` against stale triggers.
///
/// Needed iff the interval has elapsed since the last settlement, the round
/// is open, the pot is non-zero, and at least one player has entered.
pub fn evaluate(storage: &dyn Storage, env: &Env) -> StdResult<UpkeepEvaluation> {
    let config = CONFIG.load(storage)?;
    let round = ROUND.load(storage)?;
    let lifecycle = LIFECYCLE.load(storage)?;

    let seconds_since_settlement = env
        .block
        .time
        .seconds()
        .saturating_sub(round.last_settled_at.seconds());

    let is_open = lifecycle == RaffleLifecycle::Open;
    let interval_elapsed = seconds_since_settlement >= config.interval_seconds;
    let has_players = !round.players.is_empty();
    let has_balance = !round.prize_pool.is_zero();

    Ok(UpkeepEvaluation {
        upkeep_needed: is_open && interval_elapsed && has_players && has_balance,
        is_open,
        interval_elapsed,
        has_players,
        has_balance,
        num_players: round.players.len() as u32,
        prize_pool: round.prize_pool,
        seconds_since_settlement,
    })
}
