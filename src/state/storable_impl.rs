use ic_stable_structures::{storable::Bound, storable::Storable};
use std::borrow::Cow;

use crate::{
    fund::types::{Bundle, Fund, FundSummary, Manager},
    historical::types::{FundDayData, InvestorDayData},
    investor::types::{Investor, InvestorSummary},
    path::types::{Path, PathPool},
    pool::types::Pool,
    position::types::Position,
    token::types::Token,
};

macro_rules! impl_storable_minicbor {
    ($type:ty ) => {
        impl Storable for $type {
            fn to_bytes(&self) -> Cow<[u8]> {
                let mut buf = Vec::new();
                minicbor::encode(self, &mut buf).expect("minicbor encoding should always succeed");
                Cow::Owned(buf)
            }

            fn from_bytes(bytes: Cow<[u8]>) -> Self {
                minicbor::decode(bytes.as_ref()).unwrap_or_else(|e| {
                    panic!(
                        "failed to decode minicbor bytes {}: {}",
                        hex::encode(&bytes),
                        e
                    )
                })
            }
            const BOUND: Bound = Bound::Unbounded;
        }
    };
}

impl_storable_minicbor!(Token);
impl_storable_minicbor!(Fund);
impl_storable_minicbor!(Manager);
impl_storable_minicbor!(FundSummary);
impl_storable_minicbor!(Bundle);
impl_storable_minicbor!(Pool);
impl_storable_minicbor!(Position);
impl_storable_minicbor!(Investor);
impl_storable_minicbor!(InvestorSummary);
impl_storable_minicbor!(FundDayData);
impl_storable_minicbor!(InvestorDayData);
impl_storable_minicbor!(Path);
impl_storable_minicbor!(PathPool);
