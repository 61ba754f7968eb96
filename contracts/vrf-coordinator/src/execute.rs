use cosmwasm_std::{
    to_json_binary, DepsMut, Env, Event, MessageInfo, Response, WasmMsg,
};
use fairdraw_common::randomness::derive_random_words;
use fairdraw_common::vrf::ConsumerExecuteMsg;

use crate::error::ContractError;
use crate::state::{VrfRequest, CONFIG, REQUESTS, TOTAL_REQUESTS};

/// Upper bound keeps the callback payload small.
pub const MAX_NUM_WORDS: u32 = 10;

/// Register a randomness request for the calling contract.
pub fn request_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    num_words: u32,
    request_confirmations: u16,
    callback_gas_limit: u64,
) -> Result<Response, ContractError> {
    if num_words == 0 || num_words > MAX_NUM_WORDS {
        return Err(ContractError::InvalidNumWords { got: num_words });
    }

    if REQUESTS.has(deps.storage, (&info.sender, request_id)) {
        return Err(ContractError::RequestAlreadyExists { request_id });
    }

    let request = VrfRequest {
        consumer: info.sender.clone(),
        request_id,
        num_words,
        request_confirmations,
        callback_gas_limit,
        fulfilled: false,
        requested_at: env.block.time,
        fulfilled_at: None,
    };
    REQUESTS.save(deps.storage, (&info.sender, request_id), &request)?;

    let total = TOTAL_REQUESTS.load(deps.storage)? + 1;
    TOTAL_REQUESTS.save(deps.storage, &total)?;

    Ok(Response::new()
        .add_attribute("action", "request_random_words")
        .add_attribute("consumer", info.sender.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("fairdraw_random_words_requested")
                .add_attribute("consumer", info.sender.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("num_words", num_words.to_string()),
        ))
}

/// Fulfill a pending request. Operators only.
///
/// Words are derived deterministically from (consumer, request_id, index) so
/// that tests and off-chain observers can reproduce them; a production
/// deployment would verify an oracle proof here instead.
pub fn fulfill_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    consumer: String,
    request_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can fulfill requests".to_string(),
        });
    }

    let consumer_addr = deps.api.addr_validate(&consumer)?;
    let mut request = REQUESTS
        .may_load(deps.storage, (&consumer_addr, request_id))?
        .ok_or_else(|| ContractError::RequestNotFound {
            consumer: consumer.clone(),
            request_id,
        })?;

    if request.fulfilled {
        return Err(ContractError::RequestAlreadyFulfilled { request_id });
    }

    let random_words = derive_random_words(consumer_addr.as_str(), request_id, request.num_words);

    request.fulfilled = true;
    request.fulfilled_at = Some(env.block.time);
    REQUESTS.save(deps.storage, (&consumer_addr, request_id), &request)?;

    let callback = WasmMsg::Execute {
        contract_addr: consumer_addr.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::FulfillRandomWords {
            request_id,
            random_words: random_words.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback)
        .add_attribute("action", "fulfill_random_words")
        .add_attribute("consumer", consumer_addr.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("fairdraw_random_words_fulfilled")
                .add_attribute("consumer", consumer_addr.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("first_word", random_words[0].to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update the operator list. Admin only.
pub fn update_operators(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.operators.retain(|a| *a != addr);
    }

    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(",")))
}
