use ethnum::U256;

/// The pool's current price and tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// Fee growth recorded on the far side of an initialized tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TickOutside {
    pub fee_growth_outside_0_x128: U256,
    pub fee_growth_outside_1_x128: U256,
}

/// `positions(key)` of a pool: the fund's liquidity and its last fee checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PoolPositionSnapshot {
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

/// `positions(poolIndex, positionIndex)` of a fund.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FundPositionInfo {
    pub tick_lower: i32,
    pub tick_upper: i32,
}
