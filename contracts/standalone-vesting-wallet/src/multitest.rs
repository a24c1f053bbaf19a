
use cosmwasm_std::Addr;
use cw_controllers::AdminError;

use crate::error::ContractError;
use suite::{Suite, SuiteBuilder, HOUR};

#[test]
fn schedule_requires_connected_and_funded_wallet() {
    let mut suite = SuiteBuilder::new().build();
    let now = suite.now();

    let err = suite
        .create_schedule("owner", "alice", now, 10 * HOUR, true)
        .unwrap_err();
    assert_eq!(ContractError::NoTokenConnected {}, err.downcast().unwrap());

    let err = suite.connect("owner", &[]).unwrap_err();
    assert_eq!(ContractError::EmptyContractList {}, err.downcast().unwrap());

    let token = suite.token.clone();
    suite.connect("owner", &[&token]).unwrap();
    assert_eq!(suite.tokens().unwrap(), vec![token.clone()]);

    let err = suite
        .create_schedule("owner", "alice", now, 10 * HOUR, true)
        .unwrap_err();
    assert_eq!(
        ContractError::InsufficientBalance {},
        err.downcast().unwrap()
    );

    suite.fund(&token, 1000).unwrap();

    let err = suite
        .create_schedule("owner", "alice", now - 1, 10 * HOUR, true)
        .unwrap_err();
    assert_eq!(ContractError::StartInPast {}, err.downcast().unwrap());

    let err = suite
        .create_schedule("owner", "", now, 10 * HOUR, true)
        .unwrap_err();
    assert_eq!(
        ContractError::InvalidBeneficiary {},
        err.downcast().unwrap()
    );

    let err = suite
        .create_schedule("owner", "alice", now, 0, true)
        .unwrap_err();
    assert_eq!(
        ContractError::Schedule(vesting_utils::ScheduleError::ZeroDuration {}),
        err.downcast().unwrap()
    );

    let err = suite
        .create_schedule("alice", "alice", now, 10 * HOUR, true)
        .unwrap_err();
    assert_eq!(
        ContractError::Admin(AdminError::NotAdmin {}),
        err.downcast().unwrap()
    );

    suite
        .create_schedule("owner", "alice", now, 10 * HOUR, true)
        .unwrap();
    let vesting = suite.info().unwrap().vesting.unwrap();
    assert!(vesting.active);
    assert!(vesting.revocable);
    assert_eq!(vesting.end, now + 10 * HOUR);
}

#[test]
fn tokens_vest_linearly() {
    let mut suite = SuiteBuilder::new().connected().with_funds(1000).build();
    let alice = Addr::unchecked("alice");
    let token = suite.token.clone();
    let start = suite.now() + HOUR;

    suite
        .create_schedule("owner", "alice", start, 10 * HOUR, false)
        .unwrap();

    suite.advance_seconds(HOUR);
    let err = suite.release("anyone").unwrap_err();
    assert_eq!(ContractError::NothingToRelease {}, err.downcast().unwrap());

    suite.advance_seconds(2 * HOUR);
    assert_eq!(suite.releasable().unwrap(), 200);
    suite.release("anyone").unwrap();
    assert_eq!(suite.balance(&token, &alice).unwrap(), 200);
    assert_eq!(suite.released().unwrap(), 200);
    assert_eq!(suite.vested(start + 5 * HOUR).unwrap(), 500);

    suite.advance_seconds(20 * HOUR);
    suite.release("anyone").unwrap();
    assert_eq!(suite.balance(&token, &alice).unwrap(), 1000);
    assert_eq!(suite.releasable().unwrap(), 0);

    // a completed schedule still holds the wallet
    let now = suite.now();
    let err = suite
        .create_schedule("owner", "bob", now, HOUR, false)
        .unwrap_err();
    assert_eq!(ContractError::ScheduleActive {}, err.downcast().unwrap());
}

#[test]
fn revoke_settles_vested_part() {
    let mut suite = SuiteBuilder::new().connected().with_funds(1000).build();
    let alice = Addr::unchecked("alice");
    let token = suite.token.clone();
    let owner = suite.owner.clone();
    let wallet = suite.wallet.clone();
    let now = suite.now();

    suite
        .create_schedule("owner", "alice", now, 10 * HOUR, true)
        .unwrap();
    suite.advance_seconds(5 * HOUR);
    suite.release("anyone").unwrap();

    suite.advance_seconds(3 * HOUR);
    let err = suite.revoke("alice").unwrap_err();
    assert_eq!(
        ContractError::Admin(AdminError::NotAdmin {}),
        err.downcast().unwrap()
    );

    suite.revoke("owner").unwrap();
    assert_eq!(suite.balance(&token, &alice).unwrap(), 800);
    assert_eq!(
        suite.balance(&token, &owner).unwrap(),
        Suite::INITIAL - 1000 + 200
    );
    assert_eq!(suite.balance(&token, &wallet).unwrap(), 0);
    assert_eq!(suite.released().unwrap(), 800);
    assert!(!suite.info().unwrap().vesting.unwrap().active);

    let err = suite.release("anyone").unwrap_err();
    assert_eq!(ContractError::NotActive {}, err.downcast().unwrap());
    let err = suite.revoke("owner").unwrap_err();
    assert_eq!(ContractError::NotActive {}, err.downcast().unwrap());

    // paused wallet takes a new schedule
    suite.fund(&token, 100).unwrap();
    let now = suite.now();
    suite
        .create_schedule("owner", "bob", now, HOUR, true)
        .unwrap();
    assert_eq!(suite.released().unwrap(), 0);
}

#[test]
fn irrevocable_schedule_cannot_be_revoked() {
    let mut suite = SuiteBuilder::new().connected().with_funds(1000).build();
    let now = suite.now();

    suite
        .create_schedule("owner", "alice", now, 10 * HOUR, false)
        .unwrap();

    let err = suite.revoke("owner").unwrap_err();
    assert_eq!(ContractError::NotRevocable {}, err.downcast().unwrap());
}

#[test]
fn emergency_withdraw_only_while_paused() {
    let mut suite = SuiteBuilder::new().connected().with_funds(1000).build();
    let token = suite.token.clone();
    let owner = suite.owner.clone();
    let now = suite.now();

    suite
        .create_schedule("owner", "alice", now, 10 * HOUR, true)
        .unwrap();
    let err = suite.emergency_withdraw("owner").unwrap_err();
    assert_eq!(ContractError::ScheduleActive {}, err.downcast().unwrap());

    suite.revoke("owner").unwrap();
    suite.fund(&token, 300).unwrap();

    let err = suite.emergency_withdraw("alice").unwrap_err();
    assert_eq!(
        ContractError::Admin(AdminError::NotAdmin {}),
        err.downcast().unwrap()
    );

    suite.emergency_withdraw("owner").unwrap();
    assert_eq!(suite.balance(&token, &owner).unwrap(), Suite::INITIAL);

    let err = suite.emergency_withdraw("owner").unwrap_err();
    assert_eq!(ContractError::NothingToWithdraw {}, err.downcast().unwrap());
}

#[test]
fn reconnect_requires_empty_wallet() {
    let mut suite = SuiteBuilder::new().connected().with_funds(1000).build();
    let token = suite.token.clone();
    let other = suite.other_token.clone();

    let err = suite.connect("owner", &[&other]).unwrap_err();
    assert_eq!(ContractError::RemainingTokens {}, err.downcast().unwrap());

    // same token may be connected again
    suite.connect("owner", &[&token]).unwrap();

    suite.emergency_withdraw("owner").unwrap();
    suite.connect("owner", &[&other, &token]).unwrap();
    assert_eq!(suite.tokens().unwrap(), vec![other.clone()]);

    suite.fund(&other, 500).unwrap();
    let now = suite.now();
    suite
        .create_schedule("owner", "alice", now, HOUR, true)
        .unwrap();

    let err = suite.connect("owner", &[&token]).unwrap_err();
    assert_eq!(ContractError::ScheduleActive {}, err.downcast().unwrap());
}

#[test]
fn ownership_transfer() {
    let mut suite = SuiteBuilder::new().connected().with_funds(1000).build();

    suite.update_admin("owner", "successor").unwrap();

    let now = suite.now();
    let err = suite
        .create_schedule("owner", "alice", now, HOUR, true)
        .unwrap_err();
    assert_eq!(
        ContractError::Admin(AdminError::NotAdmin {}),
        err.downcast().unwrap()
    );

    suite
        .create_schedule("successor", "alice", now, HOUR, true)
        .unwrap();
    suite.advance_seconds(HOUR / 2);
    suite.revoke("successor").unwrap();

    let successor = Addr::unchecked("successor");
    let token = suite.token.clone();
    assert_eq!(suite.balance(&token, &successor).unwrap(), 500);
}
