use alloy_primitives::Address;
use minicbor::{Decode, Encode};

/// Swap route a fund uses to convert into `dist_token`.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Path {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub fund: Address,
    #[cbor(n(1), with = "crate::cbor::address")]
    pub dist_token: Address,
    /// The packed route as emitted by the fund.
    #[cbor(n(2), with = "minicbor::bytes")]
    pub path: Vec<u8>,
    #[n(3)]
    pub path_pools_length: u32,
}

/// One hop of a [`Path`].
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct PathPool {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub token_in: Address,
    #[n(1)]
    pub fee: u32,
    #[cbor(n(2), with = "crate::cbor::address")]
    pub token_out: Address,
    #[n(3)]
    pub zero_for_one: bool,
    /// Zero when the registry has no pool for the hop.
    #[cbor(n(4), with = "crate::cbor::address")]
    pub address: Address,
}
