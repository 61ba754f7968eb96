use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("entrance fee must be positive")]
    InvalidEntranceFee,

    #[error("unsupported denom attached: {denom}")]
    InvalidFunds { denom: String },

    #[error("insufficient payment: sent {sent}, entrance fee is {required}")]
    InsufficientPayment { sent: Uint128, required: Uint128 },

    #[error("round is not open for entries")]
    RoundNotOpen,

    #[error(
        "upkeep not needed (pool: {prize_pool}, players: {num_players}, \
         elapsed: {seconds_since_settlement}s)"
    )]
    UpkeepNotNeeded {
        prize_pool: Uint128,
        num_players: u32,
        seconds_since_settlement: u64,
    },

    #[error("unknown or already consumed request id {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("invariant violation: {reason}")]
    InvariantViolation { reason: String },

    #[error("payout failed: pot is {needed} but contract holds {available}")]
    PayoutFailed { needed: Uint128, available: Uint128 },
}
