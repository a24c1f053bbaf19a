use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Vesting duration must be greater than zero")]
    ZeroDuration {},

    #[error("Settlement of {balance} with {released} released would not conserve funds")]
    ConservationViolation { balance: Uint128, released: Uint128 },
}

/// Linear release curve: nothing before `start`, everything from `start + duration` on,
/// and a straight line in between. Times are in seconds.
#[cw_serde]
#[derive(Copy)]
pub struct Schedule {
    pub start: u64,
    pub duration: u64,
}

impl Schedule {
    pub fn new(start: u64, duration: u64) -> Result<Self, ScheduleError> {
        if duration == 0 {
            return Err(ScheduleError::ZeroDuration {});
        }
        Ok(Schedule { start, duration })
    }

    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }

    pub fn is_completed(&self, at: u64) -> bool {
        at >= self.end()
    }

    /// Portion of `total` matured at `at`. `total` is everything ever attributable to the
    /// schedule, that is the live balance plus what was already released.
    pub fn vested_amount(&self, total: Uint128, at: u64) -> Uint128 {
        if at < self.start {
            Uint128::zero()
        } else if self.is_completed(at) {
            total
        } else {
            total.multiply_ratio(at - self.start, self.duration)
        }
    }

    pub fn releasable(&self, total: Uint128, released: Uint128, at: u64) -> Uint128 {
        self.vested_amount(total, at).saturating_sub(released)
    }
}

/// Split of a wallet balance on cancellation
#[cw_serde]
#[derive(Copy)]
pub struct Settlement {
    /// Vested but not yet released, goes to the beneficiary
    pub to_beneficiary: Uint128,
    /// Not vested yet, goes back to the controlling authority
    pub refund: Uint128,
}

impl Settlement {
    pub fn compute(
        schedule: &Schedule,
        balance: Uint128,
        released: Uint128,
        at: u64,
    ) -> Result<Self, ScheduleError> {
        let violation = || ScheduleError::ConservationViolation { balance, released };

        let total = balance.checked_add(released).map_err(|_| violation())?;
        let to_beneficiary = schedule
            .vested_amount(total, at)
            .checked_sub(released)
            .map_err(|_| violation())?;
        let refund = balance.checked_sub(to_beneficiary).map_err(|_| violation())?;

        Ok(Settlement {
            to_beneficiary,
            refund,
        })
    }
}
