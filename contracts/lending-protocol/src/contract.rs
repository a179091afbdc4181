use soroban_sdk::{contract, contractimpl, Address, Env};

use crate::events::*;
use crate::helpers::*;
use crate::ledger;
use crate::storage::*;
use crate::Error;

#[contract]
pub struct LendingProtocol;

#[contractimpl]
impl LendingProtocol {
    /// Fixes the administrator at deployment. The protocol stays
    /// uninitialized until that administrator calls `initialize`.
    pub fn __constructor(env: Env, admin: Address) {
        write_admin(&env, &admin);
        write_state(&env, &ProtocolState::default());
    }

    /// Sets the reference price and opens the protocol. Runs exactly once.
    pub fn initialize(env: Env, admin: Address, reference_price: u128) -> Result<(), Error> {
        let state = read_state(&env);
        let next = ledger::initialize(&state, is_admin(&env, &admin), reference_price)?;
        admin.require_auth();
        write_state(&env, &next);
        ProtocolInitialized {
            admin,
            reference_price,
        }
        .publish(&env);
        Ok(())
    }

    pub fn provide_collateral(env: Env, user: Address, amount: u128) -> Result<(), Error> {
        user.require_auth();
        let state = read_state(&env);
        let position = ledger::provide_collateral(&state, read_position(&env, &user), amount)?;

        write_position(&env, &user, &position);
        CollateralProvided {
            account: user,
            amount,
            total_collateral: position.total_collateral,
        }
        .publish(&env);
        Ok(())
    }

    /// Originates the caller's single active loan against their collateral.
    pub fn take_loan(env: Env, user: Address, amount: u128) -> Result<(), Error> {
        user.require_auth();
        let state = read_state(&env);
        let current = read_loan(&env, &user);
        let (position, loan) = ledger::take_loan(
            &state,
            read_position(&env, &user),
            current.as_ref(),
            amount,
            env.ledger().timestamp(),
        )?;

        write_position(&env, &user, &position);
        write_loan(&env, &user, &loan);
        LoanTaken {
            account: user,
            principal: loan.principal,
            total_borrowed: position.total_borrowed,
            loan_count: position.loan_count,
        }
        .publish(&env);
        Ok(())
    }

    /// Repays up to the outstanding principal. Clearing it deletes the loan.
    pub fn repay_loan(env: Env, user: Address, amount: u128) -> Result<(), Error> {
        user.require_auth();
        let state = read_state(&env);
        let (position, loan) = ledger::repay_loan(
            &state,
            read_position(&env, &user),
            read_loan(&env, &user),
            amount,
        )?;

        write_position(&env, &user, &position);
        let remaining_principal = match &loan {
            Some(loan) => {
                write_loan(&env, &user, loan);
                loan.principal
            }
            None => {
                remove_loan(&env, &user);
                0
            }
        };
        LoanRepaid {
            account: user.clone(),
            amount,
            remaining_principal,
            total_borrowed: position.total_borrowed,
        }
        .publish(&env);
        if loan.is_none() {
            LoanClosed { account: user }.publish(&env);
        }
        Ok(())
    }

    pub fn get_position(env: Env, user: Address) -> Option<Position> {
        read_position(&env, &user)
    }

    pub fn get_loan(env: Env, user: Address) -> Option<Loan> {
        read_loan(&env, &user)
    }

    pub fn get_admin(env: Env) -> Address {
        read_admin(&env)
    }

    pub fn get_protocol_state(env: Env) -> ProtocolState {
        read_state(&env)
    }

    /// Borrowing capacity of the user's collateral at the reference price.
    pub fn max_borrowable(env: Env, user: Address) -> u128 {
        let state = read_state(&env);
        if !state.initialized {
            return 0;
        }
        read_position(&env, &user)
            .map(|p| ledger::borrow_capacity(p.total_collateral, state.reference_price))
            .unwrap_or(0)
    }

    pub fn available_to_borrow(env: Env, user: Address) -> u128 {
        let borrowed = read_position(&env, &user)
            .map(|p| p.total_borrowed)
            .unwrap_or(0);
        Self::max_borrowable(env, user).saturating_sub(borrowed)
    }
}
