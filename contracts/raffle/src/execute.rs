use cosmwasm_std::{
    coins, to_json_binary, BankMsg, DepsMut, Env, Event, MessageInfo, Response, Uint128, Uint256,
    WasmMsg,
};
use fairdraw_common::vrf::CoordinatorExecuteMsg;

use crate::error::ContractError;
use crate::state::{
    PendingRequest, RaffleLifecycle, CONFIG, LIFECYCLE, NEXT_REQUEST_ID, PENDING_REQUEST,
    RECENT_WINNER, ROUND, STATS,
};
use crate::upkeep;

/// Winner selection consumes exactly one word.
pub const NUM_WORDS: u32 = 1;
/// Confirmations the coordinator waits for before fulfilling.
pub const REQUEST_CONFIRMATIONS: u16 = 3;

/// Enter the current round. The full attached payment joins the pot; an
/// address may enter any number of times, one selection slot per entry.
pub fn enter(deps: DepsMut, _env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if let Some(coin) = info.funds.iter().find(|c| c.denom != config.prize_denom) {
        return Err(ContractError::InvalidFunds {
            denom: coin.denom.clone(),
        });
    }
    let payment: Uint128 = info
        .funds
        .iter()
        .filter(|c| c.denom == config.prize_denom)
        .map(|c| c.amount)
        .sum();
    if payment < config.entrance_fee {
        return Err(ContractError::InsufficientPayment {
            sent: payment,
            required: config.entrance_fee,
        });
    }

    if LIFECYCLE.load(deps.storage)? != RaffleLifecycle::Open {
        return Err(ContractError::RoundNotOpen);
    }

    let mut round = ROUND.load(deps.storage)?;
    round.players.push(info.sender.clone());
    round.prize_pool += payment;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "enter")
        .add_attribute("player", info.sender.to_string())
        .add_event(
            Event::new("fairdraw_entered")
                .add_attribute("player", info.sender.to_string())
                .add_attribute("payment", payment.to_string())
                .add_attribute("num_players", round.players.len().to_string())
                .add_attribute("prize_pool", round.prize_pool.to_string()),
        ))
}

/// Start a draw: re-validate the upkeep predicate, flip to Calculating and
/// issue a single randomness request to the coordinator. Open to anyone.
pub fn perform_upkeep(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
) -> Result<Response, ContractError> {
    let evaluation = upkeep::evaluate(deps.storage, &env)?;
    if !evaluation.upkeep_needed {
        return Err(ContractError::UpkeepNotNeeded {
            prize_pool: evaluation.prize_pool,
            num_players: evaluation.num_players,
            seconds_since_settlement: evaluation.seconds_since_settlement,
        });
    }

    // Backstop: at most one request may ever be outstanding.
    if PENDING_REQUEST.may_load(deps.storage)?.is_some() {
        return Err(ContractError::InvariantViolation {
            reason: "pending request exists while round is open".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;

    let request_id = NEXT_REQUEST_ID.load(deps.storage)?;
    NEXT_REQUEST_ID.save(deps.storage, &(request_id + 1))?;

    LIFECYCLE.save(deps.storage, &RaffleLifecycle::Calculating)?;
    PENDING_REQUEST.save(
        deps.storage,
        &PendingRequest {
            request_id,
            requested_at: env.block.time,
        },
    )?;

    let request_msg = WasmMsg::Execute {
        contract_addr: config.vrf_coordinator.to_string(),
        msg: to_json_binary(&CoordinatorExecuteMsg::RequestRandomWords {
            request_id,
            num_words: NUM_WORDS,
            request_confirmations: REQUEST_CONFIRMATIONS,
            callback_gas_limit: config.callback_gas_limit,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(request_msg)
        .add_attribute("action", "perform_upkeep")
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("fairdraw_draw_requested")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("num_players", evaluation.num_players.to_string())
                .add_attribute("prize_pool", evaluation.prize_pool.to_string()),
        ))
}

/// Settle the round from a delivered random word: select the winner, pay the
/// whole pot, reset the ledger and reopen. Coordinator only.
///
/// The request correlation is checked before anything else so that unknown,
/// already consumed, or stale ids fail without touching state.
pub fn fulfill_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_words: Vec<Uint256>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.vrf_coordinator {
        return Err(ContractError::Unauthorized {
            reason: "only the VRF coordinator can deliver random words".to_string(),
        });
    }

    let pending = PENDING_REQUEST
        .may_load(deps.storage)?
        .ok_or(ContractError::UnknownRequest { request_id })?;
    if pending.request_id != request_id {
        return Err(ContractError::UnknownRequest { request_id });
    }

    if LIFECYCLE.load(deps.storage)? != RaffleLifecycle::Calculating {
        return Err(ContractError::InvariantViolation {
            reason: "pending request exists while round is open".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    let num_players = round.players.len() as u64;
    if num_players == 0 {
        return Err(ContractError::InvariantViolation {
            reason: "no players at settlement".to_string(),
        });
    }
    let word = *random_words
        .first()
        .ok_or_else(|| ContractError::InvariantViolation {
            reason: "empty random words".to_string(),
        })?;

    let winner_index = word % Uint256::from(num_players);
    let winner_index = Uint128::try_from(winner_index)
        .map_err(|_| ContractError::InvariantViolation {
            reason: "winner index out of range".to_string(),
        })?
        .u128() as usize;
    let winner = round.players[winner_index].clone();
    let prize = round.prize_pool;

    // The contract must hold the pot it is about to pay. If it does not,
    // abort: the round stays Calculating and the request stays pending, so
    // the operator can re-trigger delivery once funds are reconciled.
    let balance = deps
        .querier
        .query_balance(env.contract.address.clone(), config.prize_denom.clone())?;
    if balance.amount < prize {
        return Err(ContractError::PayoutFailed {
            needed: prize,
            available: balance.amount,
        });
    }

    round.players.clear();
    round.prize_pool = Uint128::zero();
    round.last_settled_at = env.block.time;
    ROUND.save(deps.storage, &round)?;
    PENDING_REQUEST.remove(deps.storage);
    LIFECYCLE.save(deps.storage, &RaffleLifecycle::Open)?;
    RECENT_WINNER.save(deps.storage, &winner)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.rounds_settled += 1;
    stats.total_paid_out += prize;
    STATS.save(deps.storage, &stats)?;

    let pay_msg = BankMsg::Send {
        to_address: winner.to_string(),
        amount: coins(prize.u128(), &config.prize_denom),
    };

    Ok(Response::new()
        .add_message(pay_msg)
        .add_attribute("action", "fulfill_random_words")
        .add_attribute("winner", winner.to_string())
        .add_attribute("prize", prize.to_string())
        .add_event(
            Event::new("fairdraw_winner_picked")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("winner", winner.to_string())
                .add_attribute("prize", prize.to_string())
                .add_attribute("winner_index", winner_index.to_string())
                .add_attribute("num_players", num_players.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}
