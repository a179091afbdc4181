use soroban_sdk::{contracttype, Address, Env};

use crate::helpers::{bump_core_ttl, bump_loan_ttl, bump_position_ttl};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    State,
    Position(Address), // aggregate totals per account
    Loan(Address),     // at most one active loan per account
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProtocolState {
    pub initialized: bool,
    pub reference_price: u128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub total_collateral: u128,
    pub total_borrowed: u128,
    /// Lifetime count of originated loans; repayment never lowers it.
    pub loan_count: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoanStatus {
    Active,
    /// Reserved for the data model; closed loans are deleted rather than stored.
    Closed,
}

/// A live loan. Closing a loan deletes the record, so stored loans are always `Active`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub principal: u128,
    pub status: LoanStatus,
    pub opened_at: u64,
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_admin(env: &Env) -> Address {
    bump_core_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("admin not set")
}

pub fn read_state(env: &Env) -> ProtocolState {
    bump_core_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_default()
}

pub fn write_state(env: &Env, state: &ProtocolState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_core_ttl(env);
}

pub fn read_position(env: &Env, user: &Address) -> Option<Position> {
    bump_position_ttl(env, user);
    env.storage()
        .persistent()
        .get(&DataKey::Position(user.clone()))
}

pub fn write_position(env: &Env, user: &Address, position: &Position) {
    env.storage()
        .persistent()
        .set(&DataKey::Position(user.clone()), position);
    bump_position_ttl(env, user);
}

pub fn read_loan(env: &Env, user: &Address) -> Option<Loan> {
    bump_loan_ttl(env, user);
    env.storage().persistent().get(&DataKey::Loan(user.clone()))
}

pub fn write_loan(env: &Env, user: &Address, loan: &Loan) {
    env.storage()
        .persistent()
        .set(&DataKey::Loan(user.clone()), loan);
    bump_loan_ttl(env, user);
}

pub fn remove_loan(env: &Env, user: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Loan(user.clone()));
}
