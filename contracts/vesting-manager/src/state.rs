use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Code id used to instantiate new vesting wallets
    pub wallet_code_id: u64,
    pub native_denom: String,
}

/// Vesting being set up while its wallet instantiation is in flight
#[cw_serde]
pub struct PendingVesting {
    pub vester: Addr,
    pub beneficiary: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const ADMIN: Admin = Admin::new("admin");

/// Wallet of every vester ever added. Entries are never removed.
pub const WALLETS: Map<&Addr, Addr> = Map::new("wallets");
pub const PENDING_VESTING: Item<PendingVesting> = Item::new("pending_vesting");

/// cw20 tokens accepted for deposits, each one gets registered on the wallets it is sent to
pub const ALLOWED_TOKENS: Map<&Addr, Empty> = Map::new("allowed_tokens");
