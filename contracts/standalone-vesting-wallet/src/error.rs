use cosmwasm_std::StdError;
use cw_controllers::AdminError;
use thiserror::Error;

use vesting_utils::ScheduleError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("vesting is not started")]
    NotActive {},

    #[error("vesting schedule is active")]
    ScheduleActive {},

    #[error("vesting schedule is not revocable")]
    NotRevocable {},

    #[error("beneficiary is zero address")]
    InvalidBeneficiary {},

    #[error("vesting cannot start in the past")]
    StartInPast {},

    #[error("no contracts to connect to")]
    EmptyContractList {},

    #[error("contract address is empty")]
    EmptyContractAddress {},

    #[error("no token connected")]
    NoTokenConnected {},

    #[error("no tokens to vest")]
    InsufficientBalance {},

    #[error("previously connected token still has balance")]
    RemainingTokens {},

    #[error("nothing to release")]
    NothingToRelease {},

    #[error("nothing to withdraw")]
    NothingToWithdraw {},
}
