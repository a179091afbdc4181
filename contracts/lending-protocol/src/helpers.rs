use soroban_sdk::{Address, Env};

use crate::constants::*;
use crate::storage::{read_admin, DataKey};

/// Whether `caller` is the administrator fixed at deployment.
pub fn is_admin(env: &Env, caller: &Address) -> bool {
    read_admin(env) == *caller
}

pub fn bump_core_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn bump_position_ttl(env: &Env, user: &Address) {
    let key = DataKey::Position(user.clone());
    let persistent = env.storage().persistent();
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn bump_loan_ttl(env: &Env, user: &Address) {
    let key = DataKey::Loan(user.clone());
    let persistent = env.storage().persistent();
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
