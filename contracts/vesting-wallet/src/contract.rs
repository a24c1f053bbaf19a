#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_binary, to_binary, Addr, Api, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo,
    Order, Response, StdError, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::Cw20ReceiveMsg;

use vesting_utils::{Asset, Schedule, Settlement};

use crate::error::ContractError;
use crate::msg::{
    AmountResponse, BeneficiaryResponse, DurationResponse, ExecuteMsg, InfoResponse,
    InstantiateMsg, QueryMsg, ReceiveMsg, StartResponse, TokensResponse, VestingManagerResponse,
};
use crate::state::{
    assets, released, tokens, Config, VestingWallet, CONFIG, RELEASED, TOKENS, WALLET,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:vesting-wallet";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let manager = deps.api.addr_validate(&msg.manager)?;
    let beneficiary = validate_beneficiary(deps.api, &msg.beneficiary)?;
    let schedule = Schedule::new(msg.start, msg.duration)?;

    CONFIG.save(
        deps.storage,
        &Config {
            native_denom: msg.native_denom,
        },
    )?;

    let wallet = VestingWallet {
        manager,
        beneficiary,
        schedule,
        active: true,
    };
    WALLET.save(deps.storage, &wallet)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_event(start_event(&wallet)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::StartVesting {
            beneficiary,
            start,
            duration,
        } => execute_start_vesting(deps, info, beneficiary, start, duration),
        ExecuteMsg::Release { asset } => execute_release(deps, env, info, asset),
        ExecuteMsg::CancelVesting {} => execute_cancel_vesting(deps, env, info),
        ExecuteMsg::ChangeBeneficiary { beneficiary } => {
            execute_change_beneficiary(deps, info, beneficiary)
        }
        ExecuteMsg::ChangeVestingManager { manager } => {
            execute_change_vesting_manager(deps, info, manager)
        }
        ExecuteMsg::TrackToken { token } => execute_track_token(deps, info, token),
        ExecuteMsg::Receive(msg) => execute_receive(info, msg),
    }
}

fn validate_beneficiary(api: &dyn Api, beneficiary: &str) -> Result<Addr, ContractError> {
    if beneficiary.is_empty() {
        return Err(ContractError::InvalidBeneficiary {});
    }
    Ok(api.addr_validate(beneficiary)?)
}

fn assert_manager(wallet: &VestingWallet, sender: &Addr) -> Result<(), ContractError> {
    if wallet.manager != *sender {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn start_event(wallet: &VestingWallet) -> Event {
    Event::new("start_vesting")
        .add_attribute("beneficiary", wallet.beneficiary.as_str())
        .add_attribute("start", wallet.schedule.start.to_string())
        .add_attribute("duration", wallet.schedule.duration.to_string())
}

pub fn execute_start_vesting(
    deps: DepsMut,
    info: MessageInfo,
    beneficiary: String,
    start: u64,
    duration: u64,
) -> Result<Response, ContractError> {
    let mut wallet = WALLET.load(deps.storage)?;
    assert_manager(&wallet, &info.sender)?;
    if wallet.active {
        return Err(ContractError::AlreadyActive {});
    }

    wallet.beneficiary = validate_beneficiary(deps.api, &beneficiary)?;
    wallet.schedule = Schedule::new(start, duration)?;
    wallet.active = true;
    WALLET.save(deps.storage, &wallet)?;

    // the new schedule vests whatever the wallet holds from now on
    let keys = RELEASED
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<String>>>()?;
    for key in keys {
        RELEASED.remove(deps.storage, &key);
    }

    Ok(Response::new()
        .add_attribute("action", "start_vesting")
        .add_attribute("sender", info.sender)
        .add_event(start_event(&wallet)))
}

pub fn execute_release(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: Option<String>,
) -> Result<Response, ContractError> {
    let wallet = WALLET.load(deps.storage)?;
    if !wallet.active {
        return Err(ContractError::NotActive {});
    }

    let config = CONFIG.load(deps.storage)?;
    let asset = Asset::resolve(deps.api, &config.native_denom, asset)?;

    let already_released = released(deps.storage, &asset)?;
    let balance = asset.balance_of(&deps.querier, &env.contract.address)?;
    let total = balance
        .checked_add(already_released)
        .map_err(StdError::from)?;
    let amount = wallet
        .schedule
        .releasable(total, already_released, env.block.time.seconds());
    if amount.is_zero() {
        return Err(ContractError::NothingToRelease {});
    }

    RELEASED.save(deps.storage, &asset.key(), &(already_released + amount))?;

    let evt = Event::new("release")
        .add_attribute("asset", asset.to_string())
        .add_attribute("beneficiary", wallet.beneficiary.as_str())
        .add_attribute("amount", amount.to_string());

    Ok(Response::new()
        .add_message(asset.transfer_msg(&wallet.beneficiary, amount)?)
        .add_attribute("action", "release")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

pub fn execute_cancel_vesting(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut wallet = WALLET.load(deps.storage)?;
    assert_manager(&wallet, &info.sender)?;
    if !wallet.active {
        return Err(ContractError::NotActive {});
    }

    let now = env.block.time.seconds();
    let mut res = Response::new()
        .add_attribute("action", "cancel_vesting")
        .add_attribute("sender", info.sender.as_str());
    let mut evt = Event::new("cancel_vesting")
        .add_attribute("beneficiary", wallet.beneficiary.as_str())
        .add_attribute("refund_to", info.sender.as_str());

    for asset in assets(deps.storage)? {
        let already_released = released(deps.storage, &asset)?;
        let balance = asset.balance_of(&deps.querier, &env.contract.address)?;
        let settlement = Settlement::compute(&wallet.schedule, balance, already_released, now)?;

        if !settlement.to_beneficiary.is_zero() {
            RELEASED.save(
                deps.storage,
                &asset.key(),
                &(already_released + settlement.to_beneficiary),
            )?;
            let msg = asset.transfer_msg(&wallet.beneficiary, settlement.to_beneficiary)?;
            res = res.add_message(msg);
        }
        if !settlement.refund.is_zero() {
            res = res.add_message(asset.transfer_msg(&info.sender, settlement.refund)?);
        }

        evt = evt.add_attribute(
            asset.key(),
            format!("{}/{}", settlement.to_beneficiary, settlement.refund),
        );
    }

    wallet.active = false;
    WALLET.save(deps.storage, &wallet)?;

    Ok(res.add_event(evt))
}

pub fn execute_change_beneficiary(
    deps: DepsMut,
    info: MessageInfo,
    beneficiary: String,
) -> Result<Response, ContractError> {
    let mut wallet = WALLET.load(deps.storage)?;
    assert_manager(&wallet, &info.sender)?;
    if !wallet.active {
        return Err(ContractError::NotActive {});
    }

    wallet.beneficiary = validate_beneficiary(deps.api, &beneficiary)?;
    WALLET.save(deps.storage, &wallet)?;

    let evt = Event::new("change_beneficiary")
        .add_attribute("beneficiary", wallet.beneficiary.as_str());
    Ok(Response::new()
        .add_attribute("action", "change_beneficiary")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

pub fn execute_change_vesting_manager(
    deps: DepsMut,
    info: MessageInfo,
    manager: String,
) -> Result<Response, ContractError> {
    let mut wallet = WALLET.load(deps.storage)?;
    assert_manager(&wallet, &info.sender)?;

    wallet.manager = deps.api.addr_validate(&manager)?;
    WALLET.save(deps.storage, &wallet)?;

    let evt = Event::new("change_vesting_manager")
        .add_attribute("manager", wallet.manager.as_str());
    Ok(Response::new()
        .add_attribute("action", "change_vesting_manager")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

pub fn execute_track_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    let wallet = WALLET.load(deps.storage)?;
    assert_manager(&wallet, &info.sender)?;

    let token = deps.api.addr_validate(&token)?;
    TOKENS.save(deps.storage, &token, &Empty {})?;

    Ok(Response::new()
        .add_attribute("action", "track_token")
        .add_attribute("sender", info.sender)
        .add_attribute("token", token))
}

pub fn execute_receive(
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    // info.sender is the cw20 contract, wrapper.sender the account that sent the tokens.
    // Neither is trusted, only the manager registers tokens.
    let ReceiveMsg::Deposit {} = from_binary::<ReceiveMsg>(&wrapper.msg)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("sender", wrapper.sender)
        .add_attribute("token", info.sender)
        .add_attribute("amount", wrapper.amount))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    use QueryMsg::*;

    match msg {
        Info {} => to_binary(&query_info(deps)?),
        Beneficiary {} => to_binary(&BeneficiaryResponse {
            beneficiary: WALLET.load(deps.storage)?.beneficiary,
        }),
        Start {} => to_binary(&StartResponse {
            start: WALLET.load(deps.storage)?.schedule.start,
        }),
        Duration {} => to_binary(&DurationResponse {
            duration: WALLET.load(deps.storage)?.schedule.duration,
        }),
        VestingManager {} => to_binary(&VestingManagerResponse {
            manager: WALLET.load(deps.storage)?.manager,
        }),
        Tokens {} => to_binary(&TokensResponse {
            tokens: tokens(deps.storage)?,
        }),
        VestedAmount { asset, timestamp } => {
            to_binary(&query_vested_amount(deps, env, asset, timestamp)?)
        }
        ReleasableAmount { asset } => to_binary(&query_releasable_amount(deps, env, asset)?),
        Released { asset } => to_binary(&query_released(deps, asset)?),
    }
}

fn query_info(deps: Deps) -> StdResult<InfoResponse> {
    let wallet = WALLET.load(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    Ok(InfoResponse {
        start: wallet.schedule.start,
        duration: wallet.schedule.duration,
        end: wallet.schedule.end(),
        manager: wallet.manager,
        beneficiary: wallet.beneficiary,
        active: wallet.active,
        native_denom: config.native_denom,
    })
}

/// Returns the asset together with its live balance and the amount released so far
fn asset_position(
    deps: Deps,
    env: &Env,
    asset: Option<String>,
) -> StdResult<(Asset, Uint128, Uint128)> {
    let config = CONFIG.load(deps.storage)?;
    let asset = Asset::resolve(deps.api, &config.native_denom, asset)?;
    let balance = asset.balance_of(&deps.querier, &env.contract.address)?;
    let released = released(deps.storage, &asset)?;
    Ok((asset, balance, released))
}

fn query_vested_amount(
    deps: Deps,
    env: Env,
    asset: Option<String>,
    timestamp: u64,
) -> StdResult<AmountResponse> {
    let wallet = WALLET.load(deps.storage)?;
    let (asset, balance, released) = asset_position(deps, &env, asset)?;
    let amount = wallet
        .schedule
        .vested_amount(balance.checked_add(released)?, timestamp);
    Ok(AmountResponse { asset, amount })
}

fn query_releasable_amount(
    deps: Deps,
    env: Env,
    asset: Option<String>,
) -> StdResult<AmountResponse> {
    let wallet = WALLET.load(deps.storage)?;
    let (asset, balance, released) = asset_position(deps, &env, asset)?;
    let amount = wallet.schedule.releasable(
        balance.checked_add(released)?,
        released,
        env.block.time.seconds(),
    );
    Ok(AmountResponse { asset, amount })
}

fn query_released(deps: Deps, asset: Option<String>) -> StdResult<AmountResponse> {
    let config = CONFIG.load(deps.storage)?;
    let asset = Asset::resolve(deps.api, &config.native_denom, asset)?;
    let amount = released(deps.storage, &asset)?;
    Ok(AmountResponse { asset, amount })
}
