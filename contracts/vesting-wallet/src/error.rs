use cosmwasm_std::StdError;
use thiserror::Error;

use vesting_utils::ScheduleError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("no permission")]
    Unauthorized {},

    #[error("vesting is not started")]
    NotActive {},

    #[error("vesting is already active")]
    AlreadyActive {},

    #[error("beneficiary is zero address")]
    InvalidBeneficiary {},

    #[error("nothing to release")]
    NothingToRelease {},
}
