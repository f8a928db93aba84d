//! `minicbor` field codecs for the types the derive macros cannot encode on their own.
//! Used through `#[cbor(n(..), with = "crate::cbor::<module>")]`.

use minicbor::decode::Error as DecodeError;
use minicbor::encode::{Error as EncodeError, Write};
use minicbor::{Decoder, Encoder};

fn decode_fixed<const N: usize>(d: &mut Decoder<'_>) -> Result<[u8; N], DecodeError> {
    let bytes = d.bytes()?;
    if bytes.len() != N {
        return Err(DecodeError::message(format!(
            "expected {N} bytes, got {}",
            bytes.len()
        )));
    }
    let mut buf = [0u8; N];
    buf.copy_from_slice(bytes);
    Ok(buf)
}

pub mod u256 {
    use super::*;
    use ethnum::U256;

    pub fn encode<Ctx, W: Write>(
        v: &U256,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), EncodeError<W::Error>> {
        e.bytes(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<U256, DecodeError> {
        decode_fixed::<32>(d).map(U256::from_be_bytes)
    }
}

pub mod u128 {
    use super::*;

    pub fn encode<Ctx, W: Write>(
        v: &u128,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), EncodeError<W::Error>> {
        e.bytes(&v.to_be_bytes())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<u128, DecodeError> {
        decode_fixed::<16>(d).map(u128::from_be_bytes)
    }
}

pub mod address {
    use super::*;
    use alloy_primitives::Address;

    pub fn encode<Ctx, W: Write>(
        v: &Address,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), EncodeError<W::Error>> {
        e.bytes(v.as_slice())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<Address, DecodeError> {
        decode_fixed::<20>(d).map(Address::from)
    }
}

pub mod address_vec {
    use super::*;
    use alloy_primitives::Address;

    pub fn encode<Ctx, W: Write>(
        v: &[Address],
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), EncodeError<W::Error>> {
        e.array(v.len() as u64)?;
        for address in v {
            e.bytes(address.as_slice())?;
        }
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<Vec<Address>, DecodeError> {
        let len = d
            .array()?
            .ok_or_else(|| DecodeError::message("expected a definite length array"))?;
        (0..len)
            .map(|_| decode_fixed::<20>(d).map(Address::from))
            .collect()
    }
}

pub mod b256 {
    use super::*;
    use alloy_primitives::B256;

    pub fn encode<Ctx, W: Write>(
        v: &B256,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), EncodeError<W::Error>> {
        e.bytes(v.as_slice())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<B256, DecodeError> {
        decode_fixed::<32>(d).map(B256::from)
    }
}

/// Decimals are stored as their canonical string form so no precision is lost.
pub mod big_decimal {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    pub fn encode<Ctx, W: Write>(
        v: &BigDecimal,
        e: &mut Encoder<W>,
        _ctx: &mut Ctx,
    ) -> Result<(), EncodeError<W::Error>> {
        e.str(&v.to_string())?;
        Ok(())
    }

    pub fn decode<Ctx>(d: &mut Decoder<'_>, _ctx: &mut Ctx) -> Result<BigDecimal, DecodeError> {
        let s = d.str()?;
        BigDecimal::from_str(s)
            .map_err(|e| DecodeError::message(format!("invalid decimal {s}: {e}")))
    }
}
