use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint256;

/// The coordinator's request interface, as seen by a consumer contract.
/// Mirrors the `RequestRandomWords` variant of the coordinator's own
/// `ExecuteMsg`; the two serialize identically on the wire.
#[cw_serde]
pub enum CoordinatorExecuteMsg {
    RequestRandomWords {
        /// Consumer-allocated identifier, scoped by consumer address.
        request_id: u64,
        num_words: u32,
        request_confirmations: u16,
        callback_gas_limit: u64,
    },
}

/// The callback a consumer must accept, as dispatched by the coordinator.
/// Consumers expose a matching `FulfillRandomWords` variant in their own
/// `ExecuteMsg`.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    FulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
}
