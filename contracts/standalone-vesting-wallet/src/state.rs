use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_controllers::Admin;
use cw_storage_plus::Item;

use vesting_utils::Schedule;

#[cw_serde]
pub struct VestingSchedule {
    pub beneficiary: Addr,
    pub schedule: Schedule,
    /// Fixed on creation
    pub revocable: bool,
    /// Cleared on revocation
    pub active: bool,
}

pub const ADMIN: Admin = Admin::new("admin");

/// The only cw20 token vested by the wallet
pub const TOKEN: Item<Addr> = Item::new("token");
/// Last created schedule
pub const VESTING: Item<VestingSchedule> = Item::new("vesting");
/// Released under the last created schedule
pub const RELEASED: Item<Uint128> = Item::new("released");

pub fn is_active(storage: &dyn Storage) -> StdResult<bool> {
    Ok(VESTING
        .may_load(storage)?
        .map_or(false, |vesting| vesting.active))
}
