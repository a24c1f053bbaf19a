#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use vesting_utils::{Asset, Schedule, Settlement};

use crate::error::ContractError;
use crate::msg::{
    AmountResponse, ExecuteMsg, InfoResponse, InstantiateMsg, QueryMsg, TokensResponse,
    VestingInfo,
};
use crate::state::{is_active, VestingSchedule, ADMIN, RELEASED, TOKEN, VESTING};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:standalone-vesting-wallet";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

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
    RELEASED.save(deps.storage, &Uint128::zero())?;

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
        ConnectToOtherContracts { contracts } => execute_connect(deps, env, info, contracts),
        CreateVestingSchedule {
            beneficiary,
            start,
            duration,
            revocable,
        } => execute_create_vesting_schedule(
            deps,
            env,
            info,
            beneficiary,
            start,
            duration,
            revocable,
        ),
        Release {} => execute_release(deps, env, info),
        RevokeVestingSchedule {} => execute_revoke(deps, env, info),
        EmergencyWithdraw {} => execute_emergency_withdraw(deps, env, info),
        UpdateAdmin { admin } => {
            let admin = admin
                .map(|admin| deps.api.addr_validate(&admin))
                .transpose()?;
            Ok(ADMIN.execute_update_admin(deps, info, admin)?)
        }
    }
}

fn assert_paused(deps: Deps) -> Result<(), ContractError> {
    if is_active(deps.storage)? {
        return Err(ContractError::ScheduleActive {});
    }
    Ok(())
}

fn connected_token(deps: Deps) -> Result<Asset, ContractError> {
    TOKEN
        .may_load(deps.storage)?
        .map(Asset::Cw20)
        .ok_or(ContractError::NoTokenConnected {})
}

pub fn execute_connect(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    contracts: Vec<String>,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    assert_paused(deps.as_ref())?;

    // every entry must be a valid address, only the first one gets bound
    let contracts = contracts
        .iter()
        .map(|contract| {
            if contract.is_empty() {
                return Err(ContractError::EmptyContractAddress {});
            }
            Ok(deps.api.addr_validate(contract)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let token = contracts
        .into_iter()
        .next()
        .ok_or(ContractError::EmptyContractList {})?;

    // switching tokens would strand whatever is left of the old one
    if let Some(previous) = TOKEN.may_load(deps.storage)? {
        if previous != token
            && !Asset::Cw20(previous)
                .balance_of(&deps.querier, &env.contract.address)?
                .is_zero()
        {
            return Err(ContractError::RemainingTokens {});
        }
    }
    TOKEN.save(deps.storage, &token)?;

    let evt = Event::new("connect_to_other_contracts").add_attribute("token", token.as_str());
    Ok(Response::new()
        .add_attribute("action", "connect_to_other_contracts")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

pub fn execute_create_vesting_schedule(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiary: String,
    start: u64,
    duration: u64,
    revocable: bool,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    assert_paused(deps.as_ref())?;
    let token = connected_token(deps.as_ref())?;

    if beneficiary.is_empty() {
        return Err(ContractError::InvalidBeneficiary {});
    }
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    if start < env.block.time.seconds() {
        return Err(ContractError::StartInPast {});
    }
    let schedule = Schedule::new(start, duration)?;

    let balance = token.balance_of(&deps.querier, &env.contract.address)?;
    if balance.is_zero() {
        return Err(ContractError::InsufficientBalance {});
    }

    VESTING.save(
        deps.storage,
        &VestingSchedule {
            beneficiary: beneficiary.clone(),
            schedule,
            revocable,
            active: true,
        },
    )?;
    RELEASED.save(deps.storage, &Uint128::zero())?;

    let evt = Event::new("create_vesting_schedule")
        .add_attribute("beneficiary", beneficiary.as_str())
        .add_attribute("start", start.to_string())
        .add_attribute("duration", duration.to_string())
        .add_attribute("revocable", revocable.to_string())
        .add_attribute("amount", balance);
    Ok(Response::new()
        .add_attribute("action", "create_vesting_schedule")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

/// Schedule in force, failing if the wallet is paused
fn active_vesting(deps: Deps) -> Result<VestingSchedule, ContractError> {
    match VESTING.may_load(deps.storage)? {
        Some(vesting) if vesting.active => Ok(vesting),
        _ => Err(ContractError::NotActive {}),
    }
}

pub fn execute_release(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let vesting = active_vesting(deps.as_ref())?;
    let token = connected_token(deps.as_ref())?;

    let released = RELEASED.load(deps.storage)?;
    let balance = token.balance_of(&deps.querier, &env.contract.address)?;
    let total = balance.checked_add(released).map_err(StdError::from)?;
    let amount = vesting
        .schedule
        .releasable(total, released, env.block.time.seconds());
    if amount.is_zero() {
        return Err(ContractError::NothingToRelease {});
    }
    RELEASED.save(deps.storage, &(released + amount))?;

    let evt = Event::new("release")
        .add_attribute("beneficiary", vesting.beneficiary.as_str())
        .add_attribute("amount", amount);
    Ok(Response::new()
        .add_message(token.transfer_msg(&vesting.beneficiary, amount)?)
        .add_attribute("action", "release")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

pub fn execute_revoke(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    let mut vesting = active_vesting(deps.as_ref())?;
    if !vesting.revocable {
        return Err(ContractError::NotRevocable {});
    }
    let token = connected_token(deps.as_ref())?;

    let released = RELEASED.load(deps.storage)?;
    let balance = token.balance_of(&deps.querier, &env.contract.address)?;
    let settlement = Settlement::compute(
        &vesting.schedule,
        balance,
        released,
        env.block.time.seconds(),
    )?;

    RELEASED.save(deps.storage, &(released + settlement.to_beneficiary))?;
    vesting.active = false;
    VESTING.save(deps.storage, &vesting)?;

    let mut res = Response::new()
        .add_attribute("action", "revoke_vesting_schedule")
        .add_attribute("sender", info.sender.as_str());
    if !settlement.to_beneficiary.is_zero() {
        let msg = token.transfer_msg(&vesting.beneficiary, settlement.to_beneficiary)?;
        res = res.add_message(msg);
    }
    if !settlement.refund.is_zero() {
        res = res.add_message(token.transfer_msg(&info.sender, settlement.refund)?);
    }

    let evt = Event::new("revoke_vesting_schedule")
        .add_attribute("beneficiary", vesting.beneficiary.as_str())
        .add_attribute("paid", settlement.to_beneficiary)
        .add_attribute("refund", settlement.refund);
    Ok(res.add_event(evt))
}

pub fn execute_emergency_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    assert_paused(deps.as_ref())?;
    let token = connected_token(deps.as_ref())?;

    let amount = token.balance_of(&deps.querier, &env.contract.address)?;
    if amount.is_zero() {
        return Err(ContractError::NothingToWithdraw {});
    }

    let evt = Event::new("emergency_withdraw")
        .add_attribute("token", token.to_string())
        .add_attribute("amount", amount);
    Ok(Response::new()
        .add_message(token.transfer_msg(&info.sender, amount)?)
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("sender", info.sender)
        .add_event(evt))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    use QueryMsg::*;

    match msg {
        Info {} => to_binary(&query_info(deps)?),
        Tokens {} => to_binary(&TokensResponse {
            tokens: TOKEN.may_load(deps.storage)?.into_iter().collect(),
        }),
        VestedAmount { timestamp } => to_binary(&query_vested_amount(deps, &env, timestamp)?),
        ReleasableAmount {} => to_binary(&query_releasable_amount(deps, &env)?),
        Released {} => to_binary(&AmountResponse {
            amount: RELEASED.load(deps.storage)?,
        }),
        Admin {} => to_binary(&ADMIN.query_admin(deps)?),
    }
}

fn query_info(deps: Deps) -> StdResult<InfoResponse> {
    let vesting = VESTING.may_load(deps.storage)?.map(|vesting| VestingInfo {
        beneficiary: vesting.beneficiary,
        start: vesting.schedule.start,
        duration: vesting.schedule.duration,
        end: vesting.schedule.end(),
        revocable: vesting.revocable,
        active: vesting.active,
    });

    Ok(InfoResponse {
        token: TOKEN.may_load(deps.storage)?,
        vesting,
    })
}

/// Schedule, vesting base and released amount; `None` before the first schedule
fn position(deps: Deps, env: &Env) -> StdResult<Option<(VestingSchedule, Uint128, Uint128)>> {
    let (vesting, token) = match (VESTING.may_load(deps.storage)?, TOKEN.may_load(deps.storage)?) {
        (Some(vesting), Some(token)) => (vesting, token),
        _ => return Ok(None),
    };
    let released = RELEASED.load(deps.storage)?;
    let balance = Asset::Cw20(token).balance_of(&deps.querier, &env.contract.address)?;
    Ok(Some((vesting, balance.checked_add(released)?, released)))
}

fn query_vested_amount(deps: Deps, env: &Env, timestamp: u64) -> StdResult<AmountResponse> {
    let amount = position(deps, env)?
        .map(|(vesting, total, _)| vesting.schedule.vested_amount(total, timestamp))
        .unwrap_or_default();
    Ok(AmountResponse { amount })
}

fn query_releasable_amount(deps: Deps, env: &Env) -> StdResult<AmountResponse> {
    let amount = match position(deps, env)? {
        Some((vesting, total, released)) if vesting.active => {
            vesting
                .schedule
                .releasable(total, released, env.block.time.seconds())
        }
        _ => Uint128::zero(),
    };
    Ok(AmountResponse { amount })
}
