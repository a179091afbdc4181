//! State transitions for the protocol ledger.
//!
//! Each transition takes the current snapshot by value and returns either the
//! complete replacement state or an `Error`. Callers commit the returned state
//! only on success, so a failed operation never leaves a partial write behind.

use crate::constants::*;
use crate::storage::{Loan, LoanStatus, Position, ProtocolState};
use crate::Error;

/// Value of `total_collateral` at `reference_price`, saturating at `u128::MAX`.
pub fn collateral_value(total_collateral: u128, reference_price: u128) -> u128 {
    total_collateral.saturating_mul(reference_price)
}

/// Largest `total_borrowed` the collateral supports, rounded down.
pub fn borrow_capacity(total_collateral: u128, reference_price: u128) -> u128 {
    let value = collateral_value(total_collateral, reference_price);
    // floor(value * BPS / RATIO) split so the multiplication cannot overflow
    let whole = value / MIN_COLLATERAL_RATIO_BPS;
    let rem = value % MIN_COLLATERAL_RATIO_BPS;
    whole * BPS_DENOMINATOR + rem * BPS_DENOMINATOR / MIN_COLLATERAL_RATIO_BPS
}

pub fn ensure_initialized(state: &ProtocolState) -> Result<(), Error> {
    if !state.initialized {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

pub fn initialize(
    state: &ProtocolState,
    caller_is_admin: bool,
    reference_price: u128,
) -> Result<ProtocolState, Error> {
    if state.initialized {
        return Err(Error::AlreadyInitialized);
    }
    if !caller_is_admin {
        return Err(Error::Unauthorized);
    }
    if reference_price == 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(ProtocolState {
        initialized: true,
        reference_price,
    })
}

pub fn provide_collateral(
    state: &ProtocolState,
    position: Option<Position>,
    amount: u128,
) -> Result<Position, Error> {
    ensure_initialized(state)?;
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    let mut position = position.unwrap_or_default();
    position.total_collateral = position
        .total_collateral
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    Ok(position)
}

pub fn take_loan(
    state: &ProtocolState,
    position: Option<Position>,
    loan: Option<&Loan>,
    amount: u128,
    now: u64,
) -> Result<(Position, Loan), Error> {
    ensure_initialized(state)?;
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    if loan.is_some() {
        return Err(Error::LoanAlreadyActive);
    }
    let mut position = position.unwrap_or_default();
    let total_borrowed = position
        .total_borrowed
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    if total_borrowed > borrow_capacity(position.total_collateral, state.reference_price) {
        return Err(Error::InsufficientCollateral);
    }
    position.total_borrowed = total_borrowed;
    position.loan_count = position
        .loan_count
        .checked_add(1)
        .ok_or(Error::InvalidAmount)?;
    let loan = Loan {
        principal: amount,
        status: LoanStatus::Active,
        opened_at: now,
    };
    Ok((position, loan))
}

/// Returns the updated position and the loan that remains, `None` once the
/// principal is fully repaid.
pub fn repay_loan(
    state: &ProtocolState,
    position: Option<Position>,
    loan: Option<Loan>,
    amount: u128,
) -> Result<(Position, Option<Loan>), Error> {
    ensure_initialized(state)?;
    let mut loan = loan.ok_or(Error::NoActiveLoan)?;
    if amount == 0 || amount > loan.principal {
        return Err(Error::InvalidAmount);
    }
    let mut position = position.unwrap_or_default();
    position.total_borrowed = position
        .total_borrowed
        .checked_sub(amount)
        .ok_or(Error::InvalidAmount)?;
    loan.principal -= amount;
    if loan.principal == 0 {
        return Ok((position, None));
    }
    Ok((position, Some(loan)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(price: u128) -> ProtocolState {
        ProtocolState {
            initialized: true,
            reference_price: price,
        }
    }

    fn funded(collateral: u128) -> Option<Position> {
        Some(Position {
            total_collateral: collateral,
            ..Position::default()
        })
    }

    #[test]
    fn capacity_rounds_down() {
        // 10 * 1 * 2 / 3 = 6.66..
        assert_eq!(borrow_capacity(10, 1), 6);
        assert_eq!(borrow_capacity(3, 1), 2);
        assert_eq!(borrow_capacity(1, 1), 0);
        assert_eq!(borrow_capacity(0, 50_000), 0);
        assert_eq!(borrow_capacity(1_000_000, 50_000), 33_333_333_333);
    }

    #[test]
    fn capacity_saturates_instead_of_overflowing() {
        let cap = borrow_capacity(u128::MAX, 2);
        assert_eq!(cap, u128::MAX / 3 * 2);
    }

    #[test]
    fn initialize_checks_in_order() {
        let fresh = ProtocolState::default();
        assert_eq!(
            initialize(&live(1), false, 0),
            Err(Error::AlreadyInitialized)
        );
        assert_eq!(initialize(&fresh, false, 0), Err(Error::Unauthorized));
        assert_eq!(initialize(&fresh, true, 0), Err(Error::InvalidAmount));
        assert_eq!(initialize(&fresh, true, 50_000), Ok(live(50_000)));
    }

    #[test]
    fn collateral_requires_initialized_and_positive_amount() {
        assert_eq!(
            provide_collateral(&ProtocolState::default(), None, 10),
            Err(Error::NotInitialized)
        );
        assert_eq!(
            provide_collateral(&live(1), None, 0),
            Err(Error::InvalidAmount)
        );
    }

    #[test]
    fn collateral_overflow_is_rejected() {
        assert_eq!(
            provide_collateral(&live(1), funded(u128::MAX), 1),
            Err(Error::InvalidAmount)
        );
    }

    #[test]
    fn collateral_accumulates() {
        let first = provide_collateral(&live(1), None, 400).unwrap();
        let second = provide_collateral(&live(1), Some(first), 600).unwrap();
        assert_eq!(second.total_collateral, 1_000);
        assert_eq!(second.total_borrowed, 0);
        assert_eq!(second.loan_count, 0);
    }

    #[test]
    fn take_loan_at_exact_capacity() {
        let (position, loan) = take_loan(&live(1), funded(30), None, 20, 7).unwrap();
        assert_eq!(position.total_borrowed, 20);
        assert_eq!(position.loan_count, 1);
        assert_eq!(loan.principal, 20);
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.opened_at, 7);

        assert_eq!(
            take_loan(&live(1), funded(30), None, 21, 7),
            Err(Error::InsufficientCollateral)
        );
    }

    #[test]
    fn take_loan_precedence() {
        let active = Loan {
            principal: 1,
            status: LoanStatus::Active,
            opened_at: 0,
        };
        assert_eq!(
            take_loan(&ProtocolState::default(), None, Some(&active), 0, 0),
            Err(Error::NotInitialized)
        );
        assert_eq!(
            take_loan(&live(1), None, Some(&active), 0, 0),
            Err(Error::InvalidAmount)
        );
        assert_eq!(
            take_loan(&live(1), None, Some(&active), 5, 0),
            Err(Error::LoanAlreadyActive)
        );
        assert_eq!(
            take_loan(&live(1), None, None, 5, 0),
            Err(Error::InsufficientCollateral)
        );
    }

    #[test]
    fn take_loan_counts_existing_debt() {
        let position = Some(Position {
            total_collateral: 30,
            total_borrowed: 15,
            loan_count: 3,
        });
        assert_eq!(
            take_loan(&live(1), position.clone(), None, 6, 0),
            Err(Error::InsufficientCollateral)
        );
        let (next, _) = take_loan(&live(1), position, None, 5, 0).unwrap();
        assert_eq!(next.total_borrowed, 20);
        assert_eq!(next.loan_count, 4);
    }

    #[test]
    fn repay_full_removes_loan() {
        let (position, loan) = take_loan(&live(1), funded(30), None, 20, 0).unwrap();
        let (position, loan) = repay_loan(&live(1), Some(position), Some(loan), 20).unwrap();
        assert_eq!(loan, None);
        assert_eq!(position.total_borrowed, 0);
        assert_eq!(position.loan_count, 1);
    }

    #[test]
    fn repay_partial_keeps_loan_active() {
        let (position, loan) = take_loan(&live(1), funded(30), None, 20, 0).unwrap();
        let (position, loan) = repay_loan(&live(1), Some(position), Some(loan), 8).unwrap();
        let loan = loan.unwrap();
        assert_eq!(loan.principal, 12);
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(position.total_borrowed, 12);
    }

    #[test]
    fn repay_rejects_bad_requests() {
        let (position, loan) = take_loan(&live(1), funded(30), None, 20, 0).unwrap();
        assert_eq!(
            repay_loan(
                &ProtocolState::default(),
                Some(position.clone()),
                Some(loan.clone()),
                1
            ),
            Err(Error::NotInitialized)
        );
        assert_eq!(
            repay_loan(&live(1), Some(position.clone()), None, 0),
            Err(Error::NoActiveLoan)
        );
        assert_eq!(
            repay_loan(&live(1), Some(position.clone()), Some(loan.clone()), 0),
            Err(Error::InvalidAmount)
        );
        assert_eq!(
            repay_loan(&live(1), Some(position), Some(loan), 21),
            Err(Error::InvalidAmount)
        );
    }
}
