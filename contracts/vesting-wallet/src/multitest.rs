
use crate::error::ContractError;
use suite::{Suite, SuiteBuilder, HOUR};

use assert_matches::assert_matches;
use vesting_utils::ScheduleError;

const ANYONE: &str = "anyone";

#[test]
fn native_funds_vest_linearly() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();
    let beneficiary = suite.beneficiary.clone();

    assert_eq!(suite.releasable_native().unwrap(), 0);
    let err = suite.release_native(ANYONE).unwrap_err();
    assert_eq!(ContractError::NothingToRelease {}, err.downcast().unwrap());

    suite.advance_seconds(2 * HOUR);
    assert_eq!(suite.releasable_native().unwrap(), 60);
    suite.release_native(ANYONE).unwrap();
    assert_eq!(suite.native_balance(&beneficiary).unwrap(), 60);
    assert_eq!(suite.released_native().unwrap(), 60);

    // released part counts towards the total, so the curve does not move
    assert_eq!(suite.vested_native(suite.start + 5 * HOUR).unwrap(), 150);

    suite.advance_seconds(10 * HOUR);
    assert_eq!(suite.releasable_native().unwrap(), 240);
    suite.release_native(ANYONE).unwrap();
    assert_eq!(suite.native_balance(&beneficiary).unwrap(), 300);
    assert_eq!(suite.native_balance(&suite.wallet.clone()).unwrap(), 0);

    let err = suite.release_native(ANYONE).unwrap_err();
    assert_eq!(ContractError::NothingToRelease {}, err.downcast().unwrap());
}

#[test]
fn nothing_vests_before_start() {
    let mut suite = SuiteBuilder::new()
        .with_native_funds(300)
        .with_start_delay(HOUR)
        .build();

    suite.advance_seconds(HOUR / 2);
    assert_eq!(suite.releasable_native().unwrap(), 0);
    assert_eq!(suite.vested_native(suite.start - 1).unwrap(), 0);
    assert_eq!(suite.vested_native(suite.start + 10 * HOUR).unwrap(), 300);

    let err = suite.release_native(ANYONE).unwrap_err();
    assert_eq!(ContractError::NothingToRelease {}, err.downcast().unwrap());
}

#[test]
fn late_deposit_joins_schedule() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();
    let beneficiary = suite.beneficiary.clone();

    suite.advance_seconds(2 * HOUR);
    suite.release_native(ANYONE).unwrap();

    suite.deposit_native(200).unwrap();
    suite.advance_seconds(3 * HOUR);

    // total is 240 + 200 live plus 60 released, half of it vested
    assert_eq!(suite.releasable_native().unwrap(), 190);
    suite.release_native(ANYONE).unwrap();
    assert_eq!(suite.native_balance(&beneficiary).unwrap(), 250);
}

#[test]
fn cw20_funds_vest_linearly() {
    let mut suite = SuiteBuilder::new().with_token_funds(1000).build();
    let beneficiary = suite.beneficiary.clone();
    assert_eq!(suite.tokens().unwrap(), vec![suite.token.clone()]);

    suite.advance_seconds(5 * HOUR);
    assert_eq!(suite.releasable_token().unwrap(), 500);
    suite.release_token(ANYONE).unwrap();
    assert_eq!(suite.token_balance(&beneficiary).unwrap(), 500);

    suite.advance_seconds(5 * HOUR);
    suite.release_token(ANYONE).unwrap();
    assert_eq!(suite.token_balance(&beneficiary).unwrap(), 1000);
}

#[test]
fn untracked_token_still_releases() {
    let mut suite = SuiteBuilder::new().build();
    let beneficiary = suite.beneficiary.clone();

    suite.transfer_token(1000).unwrap();
    suite.advance_seconds(5 * HOUR);
    suite.release_token(ANYONE).unwrap();
    assert_eq!(suite.token_balance(&beneficiary).unwrap(), 500);

    // releasing does not register the token
    assert_eq!(suite.tokens().unwrap(), Vec::<cosmwasm_std::Addr>::new());
}

#[test]
fn only_manager_registers_tokens() {
    let mut suite = SuiteBuilder::new().build();
    let token = suite.token.to_string();

    let err = suite.track_token(ANYONE, &token).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    suite.receive_hook(ANYONE, 1).unwrap();
    assert_eq!(suite.tokens().unwrap(), Vec::<cosmwasm_std::Addr>::new());

    suite.track_token("manager", &token).unwrap();
    assert_eq!(suite.tokens().unwrap(), vec![suite.token.clone()]);
}

#[test]
fn forged_receive_does_not_block_cancel() {
    let mut suite = SuiteBuilder::new()
        .with_native_funds(300)
        .with_token_funds(1000)
        .build();
    let beneficiary = suite.beneficiary.clone();
    let manager = suite.manager.clone();

    // a plain account pretending to be a cw20 contract
    suite.receive_hook("attacker", 1).unwrap();
    assert_eq!(suite.tokens().unwrap(), vec![suite.token.clone()]);

    suite.advance_seconds(2 * HOUR);
    suite.cancel_vesting("manager").unwrap();

    assert_eq!(suite.native_balance(&beneficiary).unwrap(), 60);
    assert_eq!(suite.token_balance(&beneficiary).unwrap(), 200);
    assert_eq!(
        suite.native_balance(&manager).unwrap(),
        Suite::INITIAL - 300 + 240
    );
    assert_eq!(
        suite.token_balance(&manager).unwrap(),
        Suite::INITIAL - 1000 + 800
    );
    assert!(!suite.info().unwrap().active);
}

#[test]
fn cancel_splits_every_asset() {
    let mut suite = SuiteBuilder::new()
        .with_native_funds(300)
        .with_token_funds(1000)
        .build();
    let beneficiary = suite.beneficiary.clone();
    let manager = suite.manager.clone();

    suite.advance_seconds(2 * HOUR);
    suite.release_native(ANYONE).unwrap();

    suite.advance_seconds(3 * HOUR);
    let resp = suite.cancel_vesting("manager").unwrap();
    let evt = resp
        .events
        .iter()
        .find(|evt| evt.ty == "wasm-cancel_vesting")
        .unwrap();
    assert!(evt
        .attributes
        .iter()
        .any(|attr| attr.key == "native:ujuno" && attr.value == "90/150"));

    assert_eq!(suite.native_balance(&beneficiary).unwrap(), 150);
    assert_eq!(
        suite.native_balance(&manager).unwrap(),
        Suite::INITIAL - 300 + 150
    );
    assert_eq!(suite.token_balance(&beneficiary).unwrap(), 500);
    assert_eq!(
        suite.token_balance(&manager).unwrap(),
        Suite::INITIAL - 1000 + 500
    );
    assert_eq!(suite.native_balance(&suite.wallet.clone()).unwrap(), 0);
    assert_eq!(suite.token_balance(&suite.wallet.clone()).unwrap(), 0);
    assert_eq!(suite.released_native().unwrap(), 150);
    assert!(!suite.info().unwrap().active);
}

#[test]
fn cancel_after_completion_refunds_nothing() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();
    let beneficiary = suite.beneficiary.clone();
    let manager = suite.manager.clone();

    suite.advance_seconds(11 * HOUR);
    suite.cancel_vesting("manager").unwrap();

    assert_eq!(suite.native_balance(&beneficiary).unwrap(), 300);
    assert_eq!(
        suite.native_balance(&manager).unwrap(),
        Suite::INITIAL - 300
    );
}

#[test]
fn cancelled_wallet_is_paused() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();

    suite.advance_seconds(HOUR);
    suite.cancel_vesting("manager").unwrap();
    suite.deposit_native(100).unwrap();
    suite.advance_seconds(HOUR);

    let err = suite.release_native(ANYONE).unwrap_err();
    assert_eq!(ContractError::NotActive {}, err.downcast().unwrap());

    let err = suite.cancel_vesting("manager").unwrap_err();
    assert_eq!(ContractError::NotActive {}, err.downcast().unwrap());

    let err = suite.change_beneficiary("manager", "other").unwrap_err();
    assert_eq!(ContractError::NotActive {}, err.downcast().unwrap());
}

#[test]
fn only_manager_controls_wallet() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();

    let err = suite.cancel_vesting("beneficiary").unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    let err = suite.change_beneficiary(ANYONE, ANYONE).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    let err = suite.change_vesting_manager(ANYONE, ANYONE).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    let now = suite.now();
    let err = suite
        .start_vesting(ANYONE, "beneficiary", now, HOUR)
        .unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    let err = suite
        .start_vesting("manager", "beneficiary", now, HOUR)
        .unwrap_err();
    assert_eq!(ContractError::AlreadyActive {}, err.downcast().unwrap());
}

#[test]
fn restart_after_cancel() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();

    suite.advance_seconds(10 * HOUR);
    suite.cancel_vesting("manager").unwrap();
    assert_eq!(suite.released_native().unwrap(), 300);

    suite.deposit_native(100).unwrap();
    let now = suite.now();

    let err = suite.start_vesting("manager", "", now, HOUR).unwrap_err();
    assert_eq!(
        ContractError::InvalidBeneficiary {},
        err.downcast().unwrap()
    );

    let err = suite.start_vesting("manager", "newcomer", now, 0).unwrap_err();
    assert_eq!(
        ContractError::Schedule(ScheduleError::ZeroDuration {}),
        err.downcast().unwrap()
    );

    suite.start_vesting("manager", "newcomer", now, HOUR).unwrap();
    let info = suite.info().unwrap();
    assert!(info.active);
    assert_eq!(info.beneficiary, "newcomer");
    assert_eq!(info.end, now + HOUR);
    // accounting starts over with the new schedule
    assert_eq!(suite.released_native().unwrap(), 0);

    suite.advance_seconds(HOUR);
    suite.release_native(ANYONE).unwrap();
    assert_eq!(
        suite
            .native_balance(&cosmwasm_std::Addr::unchecked("newcomer"))
            .unwrap(),
        100
    );
}

#[test]
fn changed_beneficiary_receives_releases() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();

    suite.advance_seconds(2 * HOUR);
    suite.release_native(ANYONE).unwrap();

    let err = suite.change_beneficiary("manager", "").unwrap_err();
    assert_eq!(
        ContractError::InvalidBeneficiary {},
        err.downcast().unwrap()
    );

    suite.change_beneficiary("manager", "heir").unwrap();
    suite.advance_seconds(HOUR);
    suite.release_native(ANYONE).unwrap();

    let heir = cosmwasm_std::Addr::unchecked("heir");
    assert_eq!(suite.native_balance(&heir).unwrap(), 30);
    assert_eq!(
        suite.native_balance(&suite.beneficiary.clone()).unwrap(),
        60
    );
}

#[test]
fn new_manager_takes_over() {
    let mut suite = SuiteBuilder::new().with_native_funds(300).build();

    suite.change_vesting_manager("manager", "successor").unwrap();
    assert_eq!(suite.info().unwrap().manager, "successor");

    let err = suite.cancel_vesting("manager").unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    suite.advance_seconds(5 * HOUR);
    suite.cancel_vesting("successor").unwrap();

    let successor = cosmwasm_std::Addr::unchecked("successor");
    assert_eq!(suite.native_balance(&successor).unwrap(), 150);
}

#[test]
fn manager_may_be_changed_while_paused() {
    let mut suite = SuiteBuilder::new().build();

    suite.cancel_vesting("manager").unwrap();
    assert_matches!(suite.change_vesting_manager("manager", "successor"), Ok(_));
}
