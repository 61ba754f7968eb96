use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdResult};

use crate::state::{CONFIG, LIFECYCLE, PENDING_REQUEST, RECENT_WINNER, ROUND, STATS};
use crate::upkeep;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_round(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round)
}

pub fn query_player(deps: Deps, index: u32) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.players.get(index as usize))
}

pub fn query_num_players(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&(round.players.len() as u32))
}

pub fn query_lifecycle(deps: Deps) -> StdResult<Binary> {
    let lifecycle = LIFECYCLE.load(deps.storage)?;
    to_json_binary(&lifecycle)
}

pub fn query_recent_winner(deps: Deps) -> StdResult<Binary> {
    let winner = RECENT_WINNER.may_load(deps.storage)?;
    to_json_binary(&winner)
}

pub fn query_pending_request(deps: Deps) -> StdResult<Binary> {
    let pending = PENDING_REQUEST.may_load(deps.storage)?;
    to_json_binary(&pending)
}

pub fn query_check_upkeep(deps: Deps, env: Env) -> StdResult<Binary> {
    let evaluation = upkeep::evaluate(deps.storage, &env)?;
    to_json_binary(&evaluation)
}

pub fn query_stats(deps: Deps) -> StdResult<Binary> {
    let stats = STATS.load(deps.storage)?;
    to_json_binary(&stats)
}
