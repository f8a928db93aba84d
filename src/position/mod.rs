use alloy_primitives::{keccak256, Address, B256};
use bigdecimal::BigDecimal;
use ethnum::U256;

use crate::{
    chain::{PoolPositionSnapshot, PoolReader},
    libraries::{
        amount_delta::{get_amount_0_delta, get_amount_1_delta, AmountDeltaError},
        constants::Q128,
        decimal_math::{convert_token_to_decimal, safe_div},
        full_math::{mul_div, FullMathError},
        tick_math::{get_sqrt_ratio_at_tick, TickMathError},
    },
    tick::{get_fee_growth_inside, FeeGrowthInsideError, FeeGrowthInsideParams},
};
use types::{DeltaFees, PoolValuationParams, Position, PositionValuation};

pub mod types;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
    FeeGrowth(FeeGrowthInsideError),
    TickMath(TickMathError),
    AmountDelta(AmountDeltaError),
    FullMath(FullMathError),
}

impl From<FeeGrowthInsideError> for ValuationError {
    fn from(e: FeeGrowthInsideError) -> Self {
        ValuationError::FeeGrowth(e)
    }
}

impl From<TickMathError> for ValuationError {
    fn from(e: TickMathError) -> Self {
        ValuationError::TickMath(e)
    }
}

impl From<AmountDeltaError> for ValuationError {
    fn from(e: AmountDeltaError) -> Self {
        ValuationError::AmountDelta(e)
    }
}

impl From<FullMathError> for ValuationError {
    fn from(e: FullMathError) -> Self {
        ValuationError::FullMath(e)
    }
}

/// Key of `owner`'s position in a pool: keccak256(owner ‖ int24 tick_lower ‖ int24 tick_upper).
pub fn position_key(owner: Address, tick_lower: i32, tick_upper: i32) -> B256 {
    let mut packed = Vec::with_capacity(26);
    packed.extend_from_slice(owner.as_slice());
    packed.extend_from_slice(&int24_bytes(tick_lower));
    packed.extend_from_slice(&int24_bytes(tick_upper));
    keccak256(packed)
}

fn int24_bytes(tick: i32) -> [u8; 3] {
    let masked = (tick as u32) & 0x00ff_ffff;
    let [_, b0, b1, b2] = masked.to_be_bytes();
    [b0, b1, b2]
}

/// Token amount owed for `fee_growth_delta_x128` of fee growth on `liquidity`.
fn fees_owed(
    fee_growth_delta_x128: U256,
    liquidity: u128,
    decimals: u32,
) -> Result<BigDecimal, FullMathError> {
    let raw = mul_div(fee_growth_delta_x128, U256::from(liquidity), *Q128)?;
    Ok(convert_token_to_decimal(raw, decimals))
}

/// USD value of the fees the stored position earned since its checkpoint.
///
/// The current fee growth inside the range comes from the pool's tick data, unless the
/// pool position holds no liquidity, in which case its own last checkpoint stands in.
/// A checkpoint that was never set is seeded with the current value, so the first
/// observation accrues nothing.
pub fn cal_delta_fees_of_position<R: PoolReader>(
    chain: &R,
    pool: Address,
    params: &PoolValuationParams,
    position: &Position,
    snapshot: &PoolPositionSnapshot,
) -> Result<DeltaFees, ValuationError> {
    let (fee_growth_inside_0_x128, fee_growth_inside_1_x128) = if snapshot.liquidity == 0 {
        (
            snapshot.fee_growth_inside_0_last_x128,
            snapshot.fee_growth_inside_1_last_x128,
        )
    } else {
        get_fee_growth_inside(
            chain,
            &FeeGrowthInsideParams {
                pool,
                tick_lower: position.tick_lower,
                tick_upper: position.tick_upper,
                tick_current: params.tick_current,
                fee_growth_global_0_x128: params.fee_growth_global_0_x128,
                fee_growth_global_1_x128: params.fee_growth_global_1_x128,
            },
        )?
    };

    let (last_0_x128, last_1_x128) = if position.fee_growth_inside_0_last_x128 == U256::ZERO
        && position.fee_growth_inside_1_last_x128 == U256::ZERO
    {
        (fee_growth_inside_0_x128, fee_growth_inside_1_x128)
    } else {
        (
            position.fee_growth_inside_0_last_x128,
            position.fee_growth_inside_1_last_x128,
        )
    };

    let amount0 = fees_owed(
        fee_growth_inside_0_x128.wrapping_sub(last_0_x128),
        position.liquidity,
        params.decimals0,
    )?;
    let amount1 = fees_owed(
        fee_growth_inside_1_x128.wrapping_sub(last_1_x128),
        position.liquidity,
        params.decimals1,
    )?;

    Ok(DeltaFees {
        fees_usd: amount0 * &params.token0_price_usd + amount1 * &params.token1_price_usd,
        fee_growth_inside_0_x128,
        fee_growth_inside_1_x128,
    })
}

/// Composition and uncollected fees of the pool position behind `position`.
///
/// `position` must already carry the current fee growth inside its range; the fees are
/// what accrued since the pool position's own checkpoint plus what it already owes.
pub fn cal_position_valuation(
    params: &PoolValuationParams,
    position: &Position,
    snapshot: &PoolPositionSnapshot,
) -> Result<PositionValuation, ValuationError> {
    let liquidity = snapshot.liquidity;
    if liquidity == 0 {
        return Ok(PositionValuation::default());
    }

    let fees0 = fees_owed(
        position
            .fee_growth_inside_0_last_x128
            .wrapping_sub(snapshot.fee_growth_inside_0_last_x128),
        liquidity,
        params.decimals0,
    )? + convert_token_to_decimal(U256::from(snapshot.tokens_owed_0), params.decimals0);
    let fees1 = fees_owed(
        position
            .fee_growth_inside_1_last_x128
            .wrapping_sub(snapshot.fee_growth_inside_1_last_x128),
        liquidity,
        params.decimals1,
    )? + convert_token_to_decimal(U256::from(snapshot.tokens_owed_1), params.decimals1);

    let fees_usd = &fees0 * &params.token0_price_usd + &fees1 * &params.token1_price_usd;
    let fees = safe_div(&fees_usd, &params.fund_token_price_usd);

    let sqrt_ratio_lower = get_sqrt_ratio_at_tick(position.tick_lower)?;
    let sqrt_ratio_upper = get_sqrt_ratio_at_tick(position.tick_upper)?;

    let (raw_amount0, raw_amount1) = if params.tick_current < position.tick_lower {
        // below the range: everything sits in token0
        (
            get_amount_0_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, true)?,
            U256::ZERO,
        )
    } else if params.tick_current < position.tick_upper {
        (
            get_amount_0_delta(params.sqrt_price_x96, sqrt_ratio_upper, liquidity, true)?,
            get_amount_1_delta(sqrt_ratio_lower, params.sqrt_price_x96, liquidity, true)?,
        )
    } else {
        // above the range: everything sits in token1
        (
            U256::ZERO,
            get_amount_1_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, true)?,
        )
    };

    let amount0 = convert_token_to_decimal(raw_amount0, params.decimals0);
    let amount1 = convert_token_to_decimal(raw_amount1, params.decimals1);
    let amount_usd = &amount0 * &params.token0_price_usd + &amount1 * &params.token1_price_usd;
    let amount = safe_div(&amount_usd, &params.fund_token_price_usd);

    Ok(PositionValuation {
        fees0,
        fees1,
        fees,
        fees_usd,
        amount0,
        amount1,
        amount,
        amount_usd,
    })
}
