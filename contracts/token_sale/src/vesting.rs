//! Linear vesting math. Pure functions of time and a buyer's purchased
//! amount; the sale ledger owns all mutable state.

use crate::errors::Error;

/// Vesting starts at the sale's effective end time: the scheduled close, or
/// the moment the hard cap was reached. `None` while the sale is running.
pub fn vesting_start(ended_early: bool, end_time: u64, now: u64) -> Option<u64> {
    if ended_early || now >= end_time {
        Some(end_time)
    } else {
        None
    }
}

/// Tokens vested for a buyer who purchased `purchased` in total, at `now`.
/// Continuous per-second accrual: `purchased * min(elapsed, duration) /
/// duration`, exact integer ratio, floor division. A zero duration means the
/// whole amount vests the instant vesting starts.
pub fn vested_amount(
    purchased: i128,
    vesting_start: u64,
    duration: u64,
    now: u64,
) -> Result<i128, Error> {
    if purchased <= 0 || now <= vesting_start {
        return Ok(0);
    }
    if duration == 0 {
        return Ok(purchased);
    }

    let elapsed = now - vesting_start;
    if elapsed >= duration {
        return Ok(purchased);
    }

    let vested = purchased
        .checked_mul(elapsed as i128)
        .ok_or(Error::MathOverflow)?
        / duration as i128;
    Ok(vested)
}

/// What the buyer may withdraw right now, given what was already released.
pub fn claimable_amount(vested: i128, claimed: i128) -> i128 {
    if vested > claimed {
        vested - claimed
    } else {
        0
    }
}
