use super::{
    constants::Q96,
    full_math::{div_rounding_up, mul_div, mul_div_rounding_up},
};

use ethnum::U256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountDeltaError {
    InvalidPrice,
    Overflow,
}

const FIXED_POINT_96_RESOLUTION: u8 = 96;

fn sorted(sqrt_price_a_x96: U256, sqrt_price_b_x96: U256) -> (U256, U256) {
    if sqrt_price_a_x96 > sqrt_price_b_x96 {
        (sqrt_price_b_x96, sqrt_price_a_x96)
    } else {
        (sqrt_price_a_x96, sqrt_price_b_x96)
    }
}

/// Amount of token0 held by `liquidity` between two sqrt prices:
/// liquidity * 2^96 * (sqrt(upper) - sqrt(lower)) / sqrt(upper) / sqrt(lower).
///
/// The product is floored by sqrt(upper) first; only the final division by
/// sqrt(lower) honors `round_up`.
pub fn get_amount_0_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, AmountDeltaError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);

    if sqrt_lower == U256::ZERO {
        return Err(AmountDeltaError::InvalidPrice);
    }

    let numerator1 = U256::from(liquidity) << FIXED_POINT_96_RESOLUTION;
    let numerator2 = sqrt_upper - sqrt_lower;

    let scaled =
        mul_div(numerator1, numerator2, sqrt_upper).map_err(|_e| AmountDeltaError::Overflow)?;
    if round_up {
        Ok(div_rounding_up(scaled, sqrt_lower))
    } else {
        Ok(scaled / sqrt_lower)
    }
}

/// Amount of token1 held by `liquidity` between two sqrt prices:
/// liquidity * (sqrt(upper) - sqrt(lower)) / 2^96.
pub fn get_amount_1_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, AmountDeltaError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    let liquidity = U256::from(liquidity);
    let numerator = sqrt_upper - sqrt_lower;

    if round_up {
        mul_div_rounding_up(liquidity, numerator, *Q96).map_err(|_e| AmountDeltaError::Overflow)
    } else {
        mul_div(liquidity, numerator, *Q96).map_err(|_e| AmountDeltaError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::tick_math::get_sqrt_ratio_at_tick;
    use lazy_static::lazy_static;
    use proptest::prelude::*;

    lazy_static! {
        static ref SQRT_PRICE_1_1: U256 =
            U256::from_str_radix("79228162514264337593543950336", 10).unwrap();
        static ref SQRT_PRICE_2_1: U256 =
            U256::from_str_radix("112045541949572279837463876454", 10).unwrap();
        static ref SQRT_PRICE_121_100: U256 =
            U256::from_str_radix("87150978765690771352898345369", 10).unwrap();
    }

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn amount_0_is_zero_without_liquidity() {
        assert_eq!(
            get_amount_0_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_2_1, 0, true),
            Ok(U256::ZERO)
        );
    }

    #[test]
    fn amount_0_is_zero_for_equal_prices() {
        assert_eq!(
            get_amount_0_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_1_1, ONE_ETHER, true),
            Ok(U256::ZERO)
        );
    }

    #[test]
    fn amount_0_rejects_zero_price() {
        assert_eq!(
            get_amount_0_delta(U256::ZERO, U256::ONE, 1, true),
            Err(AmountDeltaError::InvalidPrice)
        );
    }

    #[test]
    fn amount_0_for_price_of_1_to_1_21() {
        let up = get_amount_0_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_121_100, ONE_ETHER, true).unwrap();
        assert_eq!(up, U256::from(90909090909090910_u128));

        let down =
            get_amount_0_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_121_100, ONE_ETHER, false).unwrap();
        assert_eq!(down, up - U256::ONE);
    }

    #[test]
    fn amount_0_sorts_its_bounds() {
        assert_eq!(
            get_amount_0_delta(*SQRT_PRICE_121_100, *SQRT_PRICE_1_1, ONE_ETHER, true),
            get_amount_0_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_121_100, ONE_ETHER, true),
        );
    }

    #[test]
    fn amount_0_survives_prices_whose_product_overflows() {
        let sqrt_p_1 =
            U256::from_str_radix("2787593149816327892691964784081045188247552", 10).unwrap();
        let sqrt_p_2 =
            U256::from_str_radix("22300745198530623141535718272648361505980416", 10).unwrap();

        let up = get_amount_0_delta(sqrt_p_1, sqrt_p_2, ONE_ETHER, true).unwrap();
        let down = get_amount_0_delta(sqrt_p_1, sqrt_p_2, ONE_ETHER, false).unwrap();

        assert_eq!(up, down + U256::ONE);
    }

    #[test]
    fn amount_1_is_zero_without_liquidity() {
        assert_eq!(
            get_amount_1_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_2_1, 0, true),
            Ok(U256::ZERO)
        );
    }

    #[test]
    fn amount_1_for_price_of_1_to_1_21() {
        let up = get_amount_1_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_121_100, ONE_ETHER, true).unwrap();
        assert_eq!(up, U256::from(100000000000000000_u128));

        let down =
            get_amount_1_delta(*SQRT_PRICE_1_1, *SQRT_PRICE_121_100, ONE_ETHER, false).unwrap();
        assert_eq!(down, up - U256::ONE);
    }

    proptest! {
        #[test]
        fn ceiling_never_below_floor(
            tick_a in -200_000i32..200_000,
            width in 1i32..50_000,
            liquidity in any::<u64>(),
        ) {
            let sqrt_a = get_sqrt_ratio_at_tick(tick_a).unwrap();
            let sqrt_b = get_sqrt_ratio_at_tick(tick_a + width).unwrap();
            let liquidity = liquidity as u128;

            let up0 = get_amount_0_delta(sqrt_a, sqrt_b, liquidity, true).unwrap();
            let down0 = get_amount_0_delta(sqrt_a, sqrt_b, liquidity, false).unwrap();
            prop_assert!(up0 >= down0);

            let up1 = get_amount_1_delta(sqrt_a, sqrt_b, liquidity, true).unwrap();
            let down1 = get_amount_1_delta(sqrt_a, sqrt_b, liquidity, false).unwrap();
            prop_assert!(up1 >= down1);
        }
    }
}
