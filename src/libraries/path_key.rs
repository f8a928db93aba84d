use alloy_primitives::Address;

const ADDR_SIZE: usize = 20;
const FEE_SIZE: usize = 3;
const NEXT_OFFSET: usize = ADDR_SIZE + FEE_SIZE;
const POP_OFFSET: usize = NEXT_OFFSET + ADDR_SIZE;

/// One hop of a packed swap route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKey {
    pub token_in: Address,
    pub fee: u32,
    pub token_out: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    TooShort { len: usize },
    TrailingBytes { len: usize },
}

impl PathKey {
    /// # Returns
    /// `(token0, token1, zero_for_one)`
    pub fn pool_tokens_and_direction(&self) -> (Address, Address, bool) {
        let (token0, token1) = if self.token_in < self.token_out {
            (self.token_in, self.token_out)
        } else {
            (self.token_out, self.token_in)
        };
        (token0, token1, self.token_in == token0)
    }
}

/// Splits a packed route `token ‖ fee(3) ‖ token ‖ fee(3) ‖ … ‖ token` into hops.
pub fn decode_path(path: &[u8]) -> Result<Vec<PathKey>, PathError> {
    if path.len() < POP_OFFSET {
        return Err(PathError::TooShort { len: path.len() });
    }
    if (path.len() - ADDR_SIZE) % NEXT_OFFSET != 0 {
        return Err(PathError::TrailingBytes { len: path.len() });
    }

    let hops = (path.len() - ADDR_SIZE) / NEXT_OFFSET;
    let mut keys = Vec::with_capacity(hops);
    for i in 0..hops {
        let start = i * NEXT_OFFSET;
        let token_in = Address::from_slice(&path[start..start + ADDR_SIZE]);
        let fee_bytes = &path[start + ADDR_SIZE..start + NEXT_OFFSET];
        let fee = u32::from_be_bytes([0, fee_bytes[0], fee_bytes[1], fee_bytes[2]]);
        let token_out = Address::from_slice(&path[start + NEXT_OFFSET..start + POP_OFFSET]);
        keys.push(PathKey {
            token_in,
            fee,
            token_out,
        });
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(tokens: &[Address], fees: &[u32]) -> Vec<u8> {
        let mut out = tokens[0].to_vec();
        for (token, fee) in tokens[1..].iter().zip(fees) {
            out.extend_from_slice(&fee.to_be_bytes()[1..]);
            out.extend_from_slice(token.as_slice());
        }
        out
    }

    #[test]
    fn decodes_a_two_hop_route() {
        let a = Address::repeat_byte(0x0a);
        let b = Address::repeat_byte(0x0b);
        let c = Address::repeat_byte(0x0c);
        let hops = decode_path(&pack(&[a, b, c], &[3000, 500])).unwrap();

        assert_eq!(
            hops,
            vec![
                PathKey {
                    token_in: a,
                    fee: 3000,
                    token_out: b
                },
                PathKey {
                    token_in: b,
                    fee: 500,
                    token_out: c
                },
            ]
        );
    }

    #[test]
    fn rejects_a_single_token() {
        assert_eq!(
            decode_path(Address::repeat_byte(1).as_slice()),
            Err(PathError::TooShort { len: 20 })
        );
    }

    #[test]
    fn rejects_a_dangling_fee() {
        let mut path = pack(&[Address::repeat_byte(1), Address::repeat_byte(2)], &[500]);
        path.extend_from_slice(&[0, 0x01, 0xf4]);
        assert_eq!(
            decode_path(&path),
            Err(PathError::TrailingBytes { len: 46 })
        );
    }

    #[test]
    fn direction_follows_address_order() {
        let low = Address::repeat_byte(0x01);
        let high = Address::repeat_byte(0xf0);
        let key = PathKey {
            token_in: high,
            fee: 10000,
            token_out: low,
        };
        assert_eq!(key.pool_tokens_and_direction(), (low, high, false));
    }
}
