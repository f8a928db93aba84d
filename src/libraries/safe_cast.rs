use bigdecimal::BigDecimal;
use ethnum::U256;
use num_bigint::{BigInt, BigUint};

pub fn big_uint_to_u256(biguint: BigUint) -> Result<U256, String> {
    let value_bytes = biguint.to_bytes_be();
    let mut value_u256 = [0u8; 32];
    if value_bytes.len() <= 32 {
        value_u256[32 - value_bytes.len()..].copy_from_slice(&value_bytes);
    } else {
        return Err(format!("does not fit in a U256: {}", biguint));
    }
    Ok(U256::from_be_bytes(value_u256))
}

pub fn u256_to_big_uint(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes())
}

pub fn u256_to_big_int(value: U256) -> BigInt {
    BigInt::from(u256_to_big_uint(value))
}

/// Exact integer-valued decimal.
pub fn u256_to_big_decimal(value: U256) -> BigDecimal {
    BigDecimal::new(u256_to_big_int(value), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn u256_max_survives_big_uint() {
        assert_eq!(
            big_uint_to_u256(u256_to_big_uint(U256::MAX)),
            Ok(U256::MAX)
        );
    }

    #[test]
    fn rejects_values_wider_than_256_bits() {
        assert!(big_uint_to_u256(BigUint::one() << 256).is_err());
    }

    #[test]
    fn decimal_is_integer_valued() {
        assert_eq!(
            u256_to_big_decimal(U256::from(1234_u32)),
            BigDecimal::from(1234)
        );
    }
}
