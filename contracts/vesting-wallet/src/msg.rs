use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw20::Cw20ReceiveMsg;

use vesting_utils::Asset;

#[cw_serde]
pub struct InstantiateMsg {
    pub manager: String,
    pub beneficiary: String,
    /// Vesting start, seconds since epoch
    pub start: u64,
    /// Vesting duration in seconds
    pub duration: u64,
    pub native_denom: String,
}

/// Wherever an `asset` is optional, `None` addresses the native currency and `Some` the
/// address of a cw20 contract.
#[cw_serde]
pub enum ExecuteMsg {
    /// Re-arms a cancelled wallet. Manager only.
    StartVesting {
        beneficiary: String,
        start: u64,
        duration: u64,
    },
    /// Pays everything vested so far to the beneficiary. Anyone may trigger it.
    Release { asset: Option<String> },
    /// Settles vested funds to the beneficiary, returns the rest to the manager and
    /// deactivates the wallet. Manager only.
    CancelVesting {},
    ChangeBeneficiary { beneficiary: String },
    ChangeVestingManager { manager: String },
    /// Adds a cw20 token to the ones settled on cancellation. Manager only.
    TrackToken { token: String },
    /// cw20 deposit hook, does not change what the wallet tracks
    Receive(Cw20ReceiveMsg),
}

#[cw_serde]
pub enum ReceiveMsg {
    Deposit {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(InfoResponse)]
    Info {},
    #[returns(BeneficiaryResponse)]
    Beneficiary {},
    #[returns(StartResponse)]
    Start {},
    #[returns(DurationResponse)]
    Duration {},
    #[returns(VestingManagerResponse)]
    VestingManager {},
    /// cw20 tokens registered by the manager
    #[returns(TokensResponse)]
    Tokens {},
    #[returns(AmountResponse)]
    VestedAmount {
        asset: Option<String>,
        timestamp: u64,
    },
    #[returns(AmountResponse)]
    ReleasableAmount { asset: Option<String> },
    #[returns(AmountResponse)]
    Released { asset: Option<String> },
}

#[cw_serde]
pub struct InfoResponse {
    pub manager: Addr,
    pub beneficiary: Addr,
    pub start: u64,
    pub duration: u64,
    pub end: u64,
    pub active: bool,
    pub native_denom: String,
}

#[cw_serde]
pub struct BeneficiaryResponse {
    pub beneficiary: Addr,
}

#[cw_serde]
pub struct StartResponse {
    pub start: u64,
}

#[cw_serde]
pub struct DurationResponse {
    pub duration: u64,
}

#[cw_serde]
pub struct VestingManagerResponse {
    pub manager: Addr,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<Addr>,
}

#[cw_serde]
pub struct AmountResponse {
    pub asset: Asset,
    pub amount: Uint128,
}
