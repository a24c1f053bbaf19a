use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use vesting_utils::{Asset, Schedule};

#[cw_serde]
pub struct Config {
    /// Denom treated as the native currency of the wallet
    pub native_denom: String,
}

#[cw_serde]
pub struct VestingWallet {
    /// Administrative authority, may start, cancel and re-point the wallet
    pub manager: Addr,
    /// Receives every released amount
    pub beneficiary: Addr,
    pub schedule: Schedule,
    /// Cleared by cancellation, set again by `StartVesting`
    pub active: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const WALLET: Item<VestingWallet> = Item::new("vesting_wallet");

/// Cumulative amount released so far, keyed by `Asset::key`
pub const RELEASED: Map<&str, Uint128> = Map::new("released");
/// cw20 contracts registered by the manager, settled on cancellation
pub const TOKENS: Map<&Addr, Empty> = Map::new("tokens");

pub fn released(storage: &dyn Storage, asset: &Asset) -> StdResult<Uint128> {
    Ok(RELEASED
        .may_load(storage, &asset.key())?
        .unwrap_or_default())
}

pub fn tokens(storage: &dyn Storage) -> StdResult<Vec<Addr>> {
    TOKENS
        .keys(storage, None, None, Order::Ascending)
        .collect()
}

/// Native currency followed by every tracked cw20 token
pub fn assets(storage: &dyn Storage) -> StdResult<Vec<Asset>> {
    let config = CONFIG.load(storage)?;
    let mut assets = vec![Asset::Native(config.native_denom)];
    assets.extend(tokens(storage)?.into_iter().map(Asset::Cw20));
    Ok(assets)
}
