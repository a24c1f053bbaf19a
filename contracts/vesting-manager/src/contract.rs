#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_binary, to_binary, Addr, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo, Order,
    Reply, Response, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_storage_plus::Bound;
use cw_utils::{must_pay, parse_reply_instantiate_data};

use vesting_utils::{Asset, Schedule};
use vesting_wallet::msg::{
    ExecuteMsg as WalletExecuteMsg, InfoResponse as WalletInfoResponse,
    InstantiateMsg as WalletInstantiateMsg, QueryMsg as WalletQueryMsg,
    ReceiveMsg as WalletReceiveMsg,
};

use crate::error::ContractError;
use crate::msg::{
    AllowedTokensResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, ReceiveMsg,
    VestingWalletInfo, VestingWalletListResponse, VestingWalletResponse,
};
use crate::state::{
    Config, PendingVesting, ADMIN, ALLOWED_TOKENS, CONFIG, PENDING_VESTING, WALLETS,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:vesting-manager";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const INSTANTIATE_WALLET_REPLY_ID: u64 = 1;

// settings for pagination
const MAX_LIMIT: u32 = 30;
const DEFAULT_LIMIT: u32 = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    ADMIN.set(deps.branch(), Some(owner.clone()))?;

    CONFIG.save(
        deps.storage,
        &Config {
            wallet_code_id: msg.wallet_code_id,
            native_denom: msg.native_denom,
        },
    )?;

    for token in msg.allowed_tokens {
        let token = deps.api.addr_validate(&token)?;
        ALLOWED_TOKENS.save(deps.storage, &token, &Empty {})?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    use ExecuteMsg::*;

    match msg {
        AddNewVesting {
            vester,
            beneficiary,
            duration,
        } => execute_add_new_vesting(deps, env, info, vester, beneficiary, duration),
        DepositAndProvideNative {} => execute_deposit_native(deps, info, None),
        DepositAndProvideCw20 { token, amount } => {
            execute_deposit_cw20(deps, info, token, None, amount)
        }
        DepositToVestingWallets { vesters } => execute_deposit_native(deps, info, Some(vesters)),
        DepositCw20ToVestingWallets {
            token,
            vesters,
            amount,
        } => execute_deposit_cw20(deps, info, token, Some(vesters), amount),
        Receive(msg) => execute_receive(deps, info, msg),
        CancelVesting { vester } => execute_cancel_vesting(deps, info, vester),
        ChangeBeneficiary { beneficiary } => execute_change_beneficiary(deps, info, beneficiary),
        WithdrawNative {} => {
            let asset = Asset::Native(CONFIG.load(deps.storage)?.native_denom);
            execute_withdraw(deps, env, info, asset)
        }
        WithdrawCw20 { token } => {
            let asset = Asset::Cw20(deps.api.addr_validate(&token)?);
            execute_withdraw(deps, env, info, asset)
        }
        AllowToken { token } => execute_allow_token(deps, info, token),
        UpdateAdmin { admin } => {
            let admin = admin
                .map(|admin| deps.api.addr_validate(&admin))
                .transpose()?;
            Ok(ADMIN.execute_update_admin(deps, info, admin)?)
        }
    }
}

fn start_event(vester: &Addr, beneficiary: &Addr, wallet: &Addr) -> Event {
    Event::new("start_new_vesting")
        .add_attribute("vester", vester.as_str())
        .add_attribute("beneficiary", beneficiary.as_str())
        .add_attribute("wallet", wallet.as_str())
}

fn wallet_info(deps: Deps, wallet: &Addr) -> StdResult<WalletInfoResponse> {
    deps.querier
        .query_wasm_smart(wallet, &WalletQueryMsg::Info {})
}

pub fn execute_add_new_vesting(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vester: String,
    beneficiary: String,
    duration: u64,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;

    let vester = deps.api.addr_validate(&vester)?;
    if beneficiary.is_empty() {
        return Err(ContractError::InvalidBeneficiary {});
    }
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    let start = env.block.time.seconds();
    Schedule::new(start, duration)?;

    let res = Response::new()
        .add_attribute("action", "add_new_vesting")
        .add_attribute("sender", info.sender)
        .add_attribute("vester", vester.as_str());

    match WALLETS.may_load(deps.storage, &vester)? {
        Some(wallet) => {
            if wallet_info(deps.as_ref(), &wallet)?.active {
                return Err(ContractError::AlreadyStarted {});
            }

            // cancelled wallet is started again instead of creating a second one
            let msg = WasmMsg::Execute {
                contract_addr: wallet.to_string(),
                msg: to_binary(&WalletExecuteMsg::StartVesting {
                    beneficiary: beneficiary.to_string(),
                    start,
                    duration,
                })?,
                funds: vec![],
            };
            Ok(res
                .add_message(msg)
                .add_event(start_event(&vester, &beneficiary, &wallet)))
        }
        None => {
            let config = CONFIG.load(deps.storage)?;
            let msg = WasmMsg::Instantiate {
                admin: None,
                code_id: config.wallet_code_id,
                msg: to_binary(&WalletInstantiateMsg {
                    manager: env.contract.address.to_string(),
                    beneficiary: beneficiary.to_string(),
                    start,
                    duration,
                    native_denom: config.native_denom,
                })?,
                funds: vec![],
                label: format!("vesting wallet of {}", vester),
            };

            PENDING_VESTING.save(
                deps.storage,
                &PendingVesting {
                    vester,
                    beneficiary,
                },
            )?;

            Ok(res.add_submessage(SubMsg::reply_on_success(
                msg,
                INSTANTIATE_WALLET_REPLY_ID,
            )))
        }
    }
}

/// Active wallets of all vesters, in vester order
fn active_wallets(deps: Deps) -> Result<Vec<Addr>, ContractError> {
    let wallets: Vec<Addr> = WALLETS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, wallet)| wallet))
        .collect::<StdResult<_>>()?;

    let mut active = Vec::with_capacity(wallets.len());
    for wallet in wallets {
        if wallet_info(deps, &wallet)?.active {
            active.push(wallet);
        }
    }
    Ok(active)
}

fn listed_wallets(deps: Deps, vesters: Vec<String>) -> Result<Vec<Addr>, ContractError> {
    if vesters.is_empty() {
        return Err(ContractError::InvalidUserList {});
    }

    let mut wallets = Vec::with_capacity(vesters.len());
    for vester in vesters {
        let vester = deps.api.addr_validate(&vester)?;
        let wallet = WALLETS
            .may_load(deps.storage, &vester)?
            .ok_or_else(|| ContractError::UnknownVester(vester.to_string()))?;
        // every vester has its own wallet
        if wallets.contains(&wallet) {
            return Err(ContractError::DuplicateVester(vester.into_string()));
        }
        if !wallet_info(deps, &wallet)?.active {
            return Err(ContractError::WalletNotActive(vester.into_string()));
        }
        wallets.push(wallet);
    }
    Ok(wallets)
}

fn recipients(deps: Deps, vesters: Option<Vec<String>>) -> Result<Vec<Addr>, ContractError> {
    match vesters {
        Some(vesters) => listed_wallets(deps, vesters),
        None => active_wallets(deps),
    }
}

/// Equal part of `amount` for each of `wallets`, rounded down
fn share_per_wallet(amount: Uint128, wallets: usize) -> Result<Uint128, ContractError> {
    if wallets == 0 {
        return Err(ContractError::NoVestingWallets {});
    }
    let share = amount / Uint128::from(wallets as u128);
    if share.is_zero() {
        return Err(ContractError::DepositTooSmall {});
    }
    Ok(share)
}

fn deposit_event(asset: &Asset, share: Uint128, wallets: &[Addr]) -> Event {
    Event::new("deposit")
        .add_attribute("asset", asset.to_string())
        .add_attribute("share", share)
        .add_attribute("wallets", wallets.len().to_string())
}

fn assert_token_allowed(deps: Deps, token: &Addr) -> Result<(), ContractError> {
    if !ALLOWED_TOKENS.has(deps.storage, token) {
        return Err(ContractError::TokenNotAllowed(token.to_string()));
    }
    Ok(())
}

/// Moves `share` of `token` into the receive hook of every wallet and registers the token
/// there. With `owner` set the tokens are taken from its allowance, otherwise from the
/// manager's own balance.
fn cw20_deposit_msgs(
    token: &Addr,
    owner: Option<&Addr>,
    wallets: &[Addr],
    share: Uint128,
) -> StdResult<Vec<WasmMsg>> {
    let hook = to_binary(&WalletReceiveMsg::Deposit {})?;
    let mut msgs = Vec::with_capacity(wallets.len() * 2);

    for wallet in wallets {
        let msg = match owner {
            Some(owner) => Cw20ExecuteMsg::SendFrom {
                owner: owner.to_string(),
                contract: wallet.to_string(),
                amount: share,
                msg: hook.clone(),
            },
            None => Cw20ExecuteMsg::Send {
                contract: wallet.to_string(),
                amount: share,
                msg: hook.clone(),
            },
        };
        msgs.push(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_binary(&msg)?,
            funds: vec![],
        });
        msgs.push(WasmMsg::Execute {
            contract_addr: wallet.to_string(),
            msg: to_binary(&WalletExecuteMsg::TrackToken {
                token: token.to_string(),
            })?,
            funds: vec![],
        });
    }

    Ok(msgs)
}

pub fn execute_deposit_native(
    deps: DepsMut,
    info: MessageInfo,
    vesters: Option<Vec<String>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = must_pay(&info, &config.native_denom)?;

    let wallets = recipients(deps.as_ref(), vesters)?;
    let share = share_per_wallet(amount, wallets.len())?;

    let asset = Asset::Native(config.native_denom);
    let msgs = wallets
        .iter()
        .map(|wallet| asset.transfer_msg(wallet, share))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "deposit")
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount)
        .add_event(deposit_event(&asset, share, &wallets)))
}

pub fn execute_deposit_cw20(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    vesters: Option<Vec<String>>,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let token = deps.api.addr_validate(&token)?;
    assert_token_allowed(deps.as_ref(), &token)?;

    let wallets = recipients(deps.as_ref(), vesters)?;
    let share = share_per_wallet(amount, wallets.len())?;

    // the remainder never leaves the depositor
    let msgs = cw20_deposit_msgs(&token, Some(&info.sender), &wallets, share)?;

    let asset = Asset::Cw20(token);
    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "deposit")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("amount", amount)
        .add_event(deposit_event(&asset, share, &wallets)))
}

pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    // info.sender is the cw20 contract, the tokens are already on the manager
    let token = info.sender;
    assert_token_allowed(deps.as_ref(), &token)?;
    let vesters = match from_binary(&wrapper.msg)? {
        ReceiveMsg::Provide { vesters } => vesters,
    };

    let wallets = recipients(deps.as_ref(), vesters)?;
    let share = share_per_wallet(wrapper.amount, wallets.len())?;

    let msgs = cw20_deposit_msgs(&token, None, &wallets, share)?;

    let asset = Asset::Cw20(token);
    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "deposit")
        .add_attribute("sender", wrapper.sender)
        .add_attribute("amount", wrapper.amount)
        .add_event(deposit_event(&asset, share, &wallets)))
}

pub fn execute_cancel_vesting(
    deps: DepsMut,
    info: MessageInfo,
    vester: String,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;

    let vester = deps.api.addr_validate(&vester)?;
    let wallet = WALLETS
        .may_load(deps.storage, &vester)?
        .ok_or_else(|| ContractError::UnknownVester(vester.to_string()))?;

    // refunded part lands on the manager
    let msg = WasmMsg::Execute {
        contract_addr: wallet.to_string(),
        msg: to_binary(&WalletExecuteMsg::CancelVesting {})?,
        funds: vec![],
    };

    let evt = Event::new("cancel_vesting")
        .add_attribute("vester", vester.as_str())
        .add_attribute("wallet", wallet.as_str());
    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "cancel_vesting")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

pub fn execute_change_beneficiary(
    deps: DepsMut,
    info: MessageInfo,
    beneficiary: String,
) -> Result<Response, ContractError> {
    let wallet = WALLETS
        .may_load(deps.storage, &info.sender)?
        .ok_or_else(|| ContractError::UnknownVester(info.sender.to_string()))?;

    if beneficiary.is_empty() {
        return Err(ContractError::InvalidBeneficiary {});
    }
    let beneficiary = deps.api.addr_validate(&beneficiary)?;

    let msg = WasmMsg::Execute {
        contract_addr: wallet.to_string(),
        msg: to_binary(&WalletExecuteMsg::ChangeBeneficiary {
            beneficiary: beneficiary.to_string(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "change_beneficiary")
        .add_attribute("sender", info.sender)
        .add_attribute("beneficiary", beneficiary))
}

pub fn execute_allow_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;

    let token = deps.api.addr_validate(&token)?;
    ALLOWED_TOKENS.save(deps.storage, &token, &Empty {})?;

    Ok(Response::new()
        .add_attribute("action", "allow_token")
        .add_attribute("sender", info.sender)
        .add_attribute("token", token))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: Asset,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;

    let amount = asset.balance_of(&deps.querier, &env.contract.address)?;
    if amount.is_zero() {
        return Err(ContractError::NothingToWithdraw {});
    }

    let evt = Event::new("withdraw")
        .add_attribute("asset", asset.to_string())
        .add_attribute("amount", amount);
    Ok(Response::new()
        .add_message(asset.transfer_msg(&info.sender, amount)?)
        .add_attribute("action", "withdraw")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_WALLET_REPLY_ID => wallet_instantiated(deps, msg),
        id => Err(ContractError::UnrecognisedReply(id)),
    }
}

fn wallet_instantiated(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let res = parse_reply_instantiate_data(msg)?;
    let wallet = deps.api.addr_validate(&res.contract_address)?;

    let pending = PENDING_VESTING.load(deps.storage)?;
    PENDING_VESTING.remove(deps.storage);
    WALLETS.save(deps.storage, &pending.vester, &wallet)?;

    Ok(Response::new().add_event(start_event(&pending.vester, &pending.beneficiary, &wallet)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::Admin {} => to_binary(&ADMIN.query_admin(deps)?),
        QueryMsg::VestingWallet { vester } => to_binary(&query_vesting_wallet(deps, vester)?),
        QueryMsg::ListVestingWallets { start_after, limit } => {
            to_binary(&list_vesting_wallets(deps, start_after, limit)?)
        }
        QueryMsg::AllowedTokens {} => to_binary(&query_allowed_tokens(deps)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        wallet_code_id: config.wallet_code_id,
        native_denom: config.native_denom,
    })
}

fn query_allowed_tokens(deps: Deps) -> StdResult<AllowedTokensResponse> {
    let tokens = ALLOWED_TOKENS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;
    Ok(AllowedTokensResponse { tokens })
}

fn query_vesting_wallet(deps: Deps, vester: String) -> StdResult<VestingWalletResponse> {
    let vester = deps.api.addr_validate(&vester)?;
    let wallet = WALLETS.may_load(deps.storage, &vester)?;
    Ok(VestingWalletResponse { vester, wallet })
}

fn list_vesting_wallets(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<VestingWalletListResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after
        .map(|vester| deps.api.addr_validate(&vester))
        .transpose()?;

    let wallets = WALLETS
        .range(
            deps.storage,
            start.as_ref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map(|item| item.map(|(vester, wallet)| VestingWalletInfo { vester, wallet }))
        .collect::<StdResult<_>>()?;

    Ok(VestingWalletListResponse { wallets })
}
