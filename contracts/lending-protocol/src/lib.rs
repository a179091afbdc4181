#![no_std]
use soroban_sdk::contracterror;

mod constants;
mod contract;
mod events;
mod helpers;
mod ledger;
mod storage;

pub use crate::constants::*;
pub use crate::contract::*;
pub use crate::events::*;
pub use crate::storage::{Loan, LoanStatus, Position, ProtocolState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    LoanAlreadyActive = 5,
    InsufficientCollateral = 6,
    NoActiveLoan = 7,
}
