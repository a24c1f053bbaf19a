use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner of the wallet, the sender if not set
    pub owner: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Binds the wallet to the first of `contracts`, a cw20 token. Only while paused.
    ConnectToOtherContracts { contracts: Vec<String> },
    /// Starts vesting the current token balance. Only while paused.
    CreateVestingSchedule {
        beneficiary: String,
        start: u64,
        duration: u64,
        revocable: bool,
    },
    Release {},
    /// Settles vested tokens to the beneficiary, returns the rest to the owner and pauses
    /// the wallet
    RevokeVestingSchedule {},
    /// Sweeps all tokens to the owner. Only while paused.
    EmergencyWithdraw {},
    UpdateAdmin { admin: Option<String> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(InfoResponse)]
    Info {},
    #[returns(TokensResponse)]
    Tokens {},
    #[returns(AmountResponse)]
    VestedAmount { timestamp: u64 },
    #[returns(AmountResponse)]
    ReleasableAmount {},
    #[returns(AmountResponse)]
    Released {},
    #[returns(cw_controllers::AdminResponse)]
    Admin {},
}

#[cw_serde]
pub struct VestingInfo {
    pub beneficiary: Addr,
    pub start: u64,
    pub duration: u64,
    pub end: u64,
    pub revocable: bool,
    pub active: bool,
}

#[cw_serde]
pub struct InfoResponse {
    pub token: Option<Addr>,
    /// Last created schedule if any
    pub vesting: Option<VestingInfo>,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<Addr>,
}

#[cw_serde]
pub struct AmountResponse {
    pub amount: Uint128,
}
