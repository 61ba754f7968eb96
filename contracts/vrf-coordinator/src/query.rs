use cosmwasm_std::{to_json_binary, Binary, Deps, StdResult};

use crate::state::{CONFIG, REQUESTS, TOTAL_REQUESTS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_request(deps: Deps, consumer: String, request_id: u64) -> StdResult<Binary> {
    let consumer = deps.api.addr_validate(&consumer)?;
    let request = REQUESTS.may_load(deps.storage, (&consumer, request_id))?;
    to_json_binary(&request)
}

pub fn query_total_requests(deps: Deps) -> StdResult<Binary> {
    let total = TOTAL_REQUESTS.may_load(deps.storage)?.unwrap_or(0);
    to_json_binary(&total)
}
