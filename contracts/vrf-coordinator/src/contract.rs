use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{CoordinatorConfig, CONFIG, TOTAL_REQUESTS};

const CONTRACT_NAME: &str = "crates.io:fairdraw-vrf-coordinator";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut operators = Vec::new();
    for op in &msg.operators {
        operators.push(deps.api.addr_validate(op)?);
    }

    let config = CoordinatorConfig {
        admin: info.sender.clone(),
        operators,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_REQUESTS.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "vrf-coordinator")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestRandomWords {
            request_id,
            num_words,
            request_confirmations,
            callback_gas_limit,
        } => execute::request_random_words(
            deps,
            env,
            info,
            request_id,
            num_words,
            request_confirmations,
            callback_gas_limit,
        ),
        ExecuteMsg::FulfillRandomWords {
            consumer,
            request_id,
        } => execute::fulfill_random_words(deps, env, info, consumer, request_id),
        ExecuteMsg::UpdateOperators { add, remove } => {
            execute::update_operators(deps, env, info, add, remove)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Request {
            consumer,
            request_id,
        } => query::query_request(deps, consumer, request_id),
        QueryMsg::TotalRequests {} => query::query_total_requests(deps),
    }
}
