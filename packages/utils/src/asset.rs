use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, to_binary, Addr, Api, BankMsg, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

/// Something a vesting wallet can hold: the chain native currency, or a cw20 token.
#[cw_serde]
pub enum Asset {
    Native(String),
    Cw20(Addr),
}

impl Asset {
    /// Picks the asset a message refers to. Messages address the native currency by leaving
    /// the asset out, and a cw20 token by its contract address.
    pub fn resolve(api: &dyn Api, native_denom: &str, asset: Option<String>) -> StdResult<Self> {
        match asset {
            None => Ok(Asset::Native(native_denom.to_owned())),
            Some(addr) => Ok(Asset::Cw20(api.addr_validate(&addr)?)),
        }
    }

    /// Storage key under which per-asset accounting is kept
    pub fn key(&self) -> String {
        match self {
            Asset::Native(denom) => format!("native:{}", denom),
            Asset::Cw20(addr) => format!("cw20:{}", addr),
        }
    }

    /// Live balance of `holder` in this asset
    pub fn balance_of(
        &self,
        querier: &QuerierWrapper,
        holder: impl Into<String>,
    ) -> StdResult<Uint128> {
        match self {
            Asset::Native(denom) => Ok(querier.query_balance(holder, denom)?.amount),
            Asset::Cw20(token) => {
                let resp: BalanceResponse = querier.query_wasm_smart(
                    token,
                    &Cw20QueryMsg::Balance {
                        address: holder.into(),
                    },
                )?;
                Ok(resp.balance)
            }
        }
    }

    /// Message moving `amount` of this asset from the calling contract to `recipient`
    pub fn transfer_msg(
        &self,
        recipient: impl Into<String>,
        amount: Uint128,
    ) -> StdResult<CosmosMsg> {
        let msg = match self {
            Asset::Native(denom) => BankMsg::Send {
                to_address: recipient.into(),
                amount: coins(amount.u128(), denom),
            }
            .into(),
            Asset::Cw20(token) => WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: recipient.into(),
                    amount,
                })?,
                funds: vec![],
            }
            .into(),
        };
        Ok(msg)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
