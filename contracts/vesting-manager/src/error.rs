use cosmwasm_std::StdError;
use cw_controllers::AdminError;
use cw_utils::{ParseReplyError, PaymentError};
use thiserror::Error;

use vesting_utils::ScheduleError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    ParseReply(#[from] ParseReplyError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("vesting already started")]
    AlreadyStarted {},

    #[error("beneficiary is zero address")]
    InvalidBeneficiary {},

    #[error("no vesting wallets to deposit to")]
    NoVestingWallets {},

    #[error("deposit too small to be split between wallets")]
    DepositTooSmall {},

    #[error("list of vesters is empty")]
    InvalidUserList {},

    #[error("{0} has no vesting wallet")]
    UnknownVester(String),

    #[error("vesting wallet of {0} is not active")]
    WalletNotActive(String),

    #[error("{0} is listed more than once")]
    DuplicateVester(String),

    #[error("token {0} is not accepted for deposits")]
    TokenNotAllowed(String),

    #[error("nothing to withdraw")]
    NothingToWithdraw {},

    #[error("unrecognised reply id: {0}")]
    UnrecognisedReply(u64),
}
