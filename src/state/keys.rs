//! Structured identities of the stored records.
//!
//! `Display` produces the storage key: lower-case `0x` addresses joined by `-`.

use alloy_primitives::Address;
use std::fmt;

/// Singleton records (fund summary, bundle) live under this key.
pub const SINGLETON_KEY: &str = "1";

pub fn address_key(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FundId(pub Address);

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&address_key(&self.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolId {
    pub fund: Address,
    pub index: u32,
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", address_key(&self.fund), self.index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionId {
    pub fund: Address,
    pub pool_index: u32,
    pub position_index: u32,
}

impl PositionId {
    pub fn pool(&self) -> PoolId {
        PoolId {
            fund: self.fund,
            index: self.pool_index,
        }
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            address_key(&self.fund),
            self.pool_index,
            self.position_index
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvestorId {
    pub fund: Address,
    pub owner: Address,
}

impl fmt::Display for InvestorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", address_key(&self.fund), address_key(&self.owner))
    }
}

/// A fund's bucket for one UTC day (`timestamp / 86400`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FundDayId {
    pub fund: Address,
    pub day: u64,
}

impl fmt::Display for FundDayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", address_key(&self.fund), self.day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvestorDayId {
    pub investor: InvestorId,
    pub day: u64,
}

impl fmt::Display for InvestorDayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.investor, self.day)
    }
}

/// Route a fund swaps along to reach `dist_token`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathId {
    pub fund: Address,
    pub dist_token: Address,
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            address_key(&self.fund),
            address_key(&self.dist_token)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathPoolId {
    pub path: PathId,
    pub hop: u32,
}

impl fmt::Display for PathPoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.path, self.hop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn keys_use_lower_case_hex() {
        let fund = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(
            FundId(fund).to_string(),
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        );
        assert_eq!(
            PositionId {
                fund,
                pool_index: 2,
                position_index: 0
            }
            .to_string(),
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48-2-0"
        );
    }

    #[test]
    fn day_keys_append_the_day_number() {
        let investor = InvestorId {
            fund: Address::repeat_byte(0x11),
            owner: Address::repeat_byte(0x22),
        };
        let id = InvestorDayId { investor, day: 19000 };
        assert!(id.to_string().ends_with("-0x2222222222222222222222222222222222222222-19000"));
    }
}
