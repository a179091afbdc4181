use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolInitialized {
    #[topic]
    pub admin: Address,
    pub reference_price: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralProvided {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub total_collateral: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanTaken {
    #[topic]
    pub account: Address,
    pub principal: u128,
    pub total_borrowed: u128,
    pub loan_count: u64,
}

/// Emitted on every repayment, full or partial.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRepaid {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub remaining_principal: u128,
    pub total_borrowed: u128,
}

/// Emitted after `LoanRepaid` when the repayment cleared the principal.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanClosed {
    #[topic]
    pub account: Address,
}
