use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::state::{CoordinatorConfig, VrfRequest};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a randomness request. Open to any contract; the request id
    /// is allocated by the caller and scoped to its address.
    RequestRandomWords {
        request_id: u64,
        num_words: u32,
        request_confirmations: u16,
        callback_gas_limit: u64,
    },
    /// Fulfill a pending request: derive the words and dispatch the callback
    /// to the consumer. Operators only.
    FulfillRandomWords { consumer: String, request_id: u64 },
    /// Update the operator list. Admin only.
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CoordinatorConfig)]
    Config {},

    #[returns(Option<VrfRequest>)]
    Request { consumer: String, request_id: u64 },

    #[returns(u64)]
    TotalRequests {},
}
