pub const BPS_DENOMINATOR: u128 = 10_000u128;
/// Collateral value must stay at or above 150% of outstanding principal.
pub const MIN_COLLATERAL_RATIO_BPS: u128 = 15_000u128;
pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
