use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<CoordinatorConfig> = Item::new("config");
/// Requests keyed by (consumer, consumer-allocated request id).
pub const REQUESTS: Map<(&Addr, u64), VrfRequest> = Map::new("requests");
pub const TOTAL_REQUESTS: Item<u64> = Item::new("total_requests");

#[cw_serde]
pub struct CoordinatorConfig {
    pub admin: Addr,
    /// Accounts allowed to fulfill pending requests.
    pub operators: Vec<Addr>,
}

#[cw_serde]
pub struct VrfRequest {
    pub consumer: Addr,
    pub request_id: u64,
    pub num_words: u32,
    pub request_confirmations: u16,
    pub callback_gas_limit: u64,
    pub fulfilled: bool,
    pub requested_at: Timestamp,
    pub fulfilled_at: Option<Timestamp>,
}
