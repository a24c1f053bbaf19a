use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw20::Cw20ReceiveMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner of the manager, the sender if not set
    pub owner: Option<String>,
    /// Code id of the vesting wallet contract
    pub wallet_code_id: u64,
    pub native_denom: String,
    /// cw20 tokens accepted for deposits from the start
    pub allowed_tokens: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Creates a vesting wallet for `vester` starting now, or re-arms its cancelled one.
    AddNewVesting {
        vester: String,
        beneficiary: String,
        duration: u64,
    },
    /// Splits the sent native funds equally between all active wallets
    DepositAndProvideNative {},
    /// Splits `amount` of `token` equally between all active wallets, pulling it from the
    /// sender's allowance
    DepositAndProvideCw20 { token: String, amount: Uint128 },
    /// Splits the sent native funds equally between wallets of the given vesters
    DepositToVestingWallets { vesters: Vec<String> },
    /// Allowance based cw20 deposit to wallets of the given vesters
    DepositCw20ToVestingWallets {
        token: String,
        vesters: Vec<String>,
        amount: Uint128,
    },
    Receive(Cw20ReceiveMsg),
    CancelVesting { vester: String },
    /// Called by a vester to redirect releases of its own wallet
    ChangeBeneficiary { beneficiary: String },
    WithdrawNative {},
    WithdrawCw20 { token: String },
    /// Accepts deposits of another cw20 token. Admin only.
    AllowToken { token: String },
    UpdateAdmin { admin: Option<String> },
}

#[cw_serde]
pub enum ReceiveMsg {
    /// Forwards the received tokens to all active wallets, or only the listed vesters' ones
    Provide { vesters: Option<Vec<String>> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(cw_controllers::AdminResponse)]
    Admin {},
    #[returns(VestingWalletResponse)]
    VestingWallet { vester: String },
    #[returns(VestingWalletListResponse)]
    ListVestingWallets {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(AllowedTokensResponse)]
    AllowedTokens {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub wallet_code_id: u64,
    pub native_denom: String,
}

#[cw_serde]
pub struct VestingWalletResponse {
    pub vester: Addr,
    /// `None` if the vester was never added
    pub wallet: Option<Addr>,
}

#[cw_serde]
pub struct VestingWalletInfo {
    pub vester: Addr,
    pub wallet: Addr,
}

#[cw_serde]
pub struct VestingWalletListResponse {
    pub wallets: Vec<VestingWalletInfo>,
}

#[cw_serde]
pub struct AllowedTokensResponse {
    pub tokens: Vec<Addr>,
}
