use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid number of words: {got}")]
    InvalidNumWords { got: u32 },

    #[error("request {request_id} already exists for this consumer")]
    RequestAlreadyExists { request_id: u64 },

    #[error("request {request_id} not found for consumer {consumer}")]
    RequestNotFound { consumer: String, request_id: u64 },

    #[error("request {request_id} has already been fulfilled")]
    RequestAlreadyFulfilled { request_id: u64 },
}
