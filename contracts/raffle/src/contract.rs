use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{
    RaffleConfig, RaffleLifecycle, RaffleStats, Round, CONFIG, LIFECYCLE, NEXT_REQUEST_ID, ROUND,
    STATS,
};

const CONTRACT_NAME: &str = "crates.io:fairdraw-raffle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.entrance_fee.is_zero() {
        return Err(ContractError::InvalidEntranceFee);
    }

    let config = RaffleConfig {
        vrf_coordinator: deps.api.addr_validate(&msg.vrf_coordinator)?,
        entrance_fee: msg.entrance_fee,
        prize_denom: msg.prize_denom,
        interval_seconds: msg.interval_seconds,
        callback_gas_limit: msg.callback_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;

    ROUND.save(
        deps.storage,
        &Round {
            players: vec![],
            prize_pool: Uint128::zero(),
            last_settled_at: env.block.time,
        },
    )?;
    LIFECYCLE.save(deps.storage, &RaffleLifecycle::Open)?;
    NEXT_REQUEST_ID.save(deps.storage, &1u64)?;
    STATS.save(
        deps.storage,
        &RaffleStats {
            rounds_settled: 0,
            total_paid_out: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle")
        .add_attribute("entrance_fee", config.entrance_fee.to_string())
        .add_attribute("interval_seconds", config.interval_seconds.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Enter {} => execute::enter(deps, env, info),
        ExecuteMsg::PerformUpkeep {} => execute::perform_upkeep(deps, env, info),
        ExecuteMsg::FulfillRandomWords {
            request_id,
            random_words,
        } => execute::fulfill_random_words(deps, env, info, request_id, random_words),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Round {} => query::query_round(deps),
        QueryMsg::Player { index } => query::query_player(deps, index),
        QueryMsg::NumPlayers {} => query::query_num_players(deps),
        QueryMsg::Lifecycle {} => query::query_lifecycle(deps),
        QueryMsg::RecentWinner {} => query::query_recent_winner(deps),
        QueryMsg::PendingRequest {} => query::query_pending_request(deps),
        QueryMsg::CheckUpkeep {} => query::query_check_upkeep(deps, env),
        QueryMsg::Stats {} => query::query_stats(deps),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "cannot migrate from a different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
