use alloy_primitives::Address;
use ethnum::U256;

use crate::chain::{PoolReader, TickOutside};


/// A tick boundary of the range could not be read from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeGrowthInsideError {
    LowerTickUnavailable,
    UpperTickUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeGrowthInsideParams {
    pub pool: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub tick_current: i32,
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
}

/// Reads both boundary ticks of the range and returns the fee growth inside it.
pub fn get_fee_growth_inside<R: PoolReader>(
    chain: &R,
    params: &FeeGrowthInsideParams,
) -> Result<(U256, U256), FeeGrowthInsideError> {
    let lower_info = chain
        .ticks(params.pool, params.tick_lower)
        .map_err(|_| FeeGrowthInsideError::LowerTickUnavailable)?;
    let upper_info = chain
        .ticks(params.pool, params.tick_upper)
        .map_err(|_| FeeGrowthInsideError::UpperTickUnavailable)?;

    Ok(fee_growth_inside_from_ticks(
        params,
        &lower_info,
        &upper_info,
    ))
}

/// Fee growth inside a range from the fee growth recorded outside its boundaries.
///
/// All subtractions wrap modulo 2^256: the accumulators are allowed to overflow.
pub fn fee_growth_inside_from_ticks(
    params: &FeeGrowthInsideParams,
    lower_info: &TickOutside,
    upper_info: &TickOutside,
) -> (U256, U256) {
    let (fee_growth_below_0_x128, fee_growth_below_1_x128) =
        if params.tick_current >= params.tick_lower {
            (
                lower_info.fee_growth_outside_0_x128,
                lower_info.fee_growth_outside_1_x128,
            )
        } else {
            (
                params
                    .fee_growth_global_0_x128
                    .wrapping_sub(lower_info.fee_growth_outside_0_x128),
                params
                    .fee_growth_global_1_x128
                    .wrapping_sub(lower_info.fee_growth_outside_1_x128),
            )
        };

    let (fee_growth_above_0_x128, fee_growth_above_1_x128) =
        if params.tick_current < params.tick_upper {
            (
                upper_info.fee_growth_outside_0_x128,
                upper_info.fee_growth_outside_1_x128,
            )
        } else {
            (
                params
                    .fee_growth_global_0_x128
                    .wrapping_sub(upper_info.fee_growth_outside_0_x128),
                params
                    .fee_growth_global_1_x128
                    .wrapping_sub(upper_info.fee_growth_outside_1_x128),
            )
        };

    (
        params
            .fee_growth_global_0_x128
            .wrapping_sub(fee_growth_below_0_x128)
            .wrapping_sub(fee_growth_above_0_x128),
        params
            .fee_growth_global_1_x128
            .wrapping_sub(fee_growth_below_1_x128)
            .wrapping_sub(fee_growth_above_1_x128),
    )
}
