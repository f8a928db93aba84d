//! USD prices derived from pool prices.
//!
//! Everything is bootstrapped from one reference USD/WETH pool. A token is then
//! priced through its WETH pool and through each stable token pool, and the
//! candidate backed by the most liquidity wins.

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use ic_canister_log::log;

use crate::{
    chain::{Erc20Reader, PoolReader, PoolRegistry},
    config::IndexerConfig,
    libraries::{
        constants::{DEFAULT_TOKEN_DECIMALS, ONE_BD, Q96_BD, ZERO_BD},
        decimal_math::{convert_token_to_decimal, exponent_to_big_decimal, safe_div},
        safe_cast::u256_to_big_decimal,
    },
    logs::DEBUG,
    token::{fetch_token_balance_of, fetch_token_decimals, types::Token},
};

#[cfg(test)]
mod tests;

/// `(sqrtPriceX96 / 2^96)^2`: raw token1 per raw token0.
pub fn raw_price_from_sqrt(sqrt_price_x96: U256) -> BigDecimal {
    let sqrt_price = u256_to_big_decimal(sqrt_price_x96) / &*Q96_BD;
    &sqrt_price * &sqrt_price
}

/// Raw pool price of `pool`, zero when `slot0` reverts.
fn pool_raw_price<R: PoolReader>(chain: &R, pool: Address) -> BigDecimal {
    match chain.slot0(pool) {
        Ok(slot0) => raw_price_from_sqrt(slot0.sqrt_price_x96),
        Err(err) => {
            log!(DEBUG, "[get_token_price_usd]: {err:?}, pool price is zero");
            ZERO_BD.clone()
        }
    }
}

/// Units of `quote` per unit of `base`, from the raw price of their pool.
///
/// The pool orders its tokens by address, so the raw price is token1 per token0 and
/// is inverted when `base` is token1.
fn price_in_quote(
    raw_price: &BigDecimal,
    base: Address,
    base_decimals: u32,
    quote: Address,
    quote_decimals: u32,
) -> BigDecimal {
    if base < quote {
        raw_price * exponent_to_big_decimal(base_decimals) / exponent_to_big_decimal(quote_decimals)
    } else {
        let quote_per_base = raw_price * exponent_to_big_decimal(quote_decimals)
            / exponent_to_big_decimal(base_decimals);
        safe_div(&ONE_BD, &quote_per_base)
    }
}

/// USD per WETH, read from the reference pool. Zero when the pool cannot be read.
pub fn eth_price_in_usd<R: PoolReader>(config: &IndexerConfig, chain: &R) -> BigDecimal {
    match chain.slot0(config.usd_weth_reference_pool) {
        Ok(slot0) => price_in_quote(
            &raw_price_from_sqrt(slot0.sqrt_price_x96),
            config.weth_address,
            config.weth_decimals,
            config.usd_reference_token,
            config.usd_reference_decimals,
        ),
        Err(err) => {
            log!(DEBUG, "[eth_price_in_usd]: {err:?}, using zero");
            ZERO_BD.clone()
        }
    }
}

/// First pool of the pair found across the configured fee tiers.
pub fn get_available_pool<R: PoolRegistry>(
    config: &IndexerConfig,
    chain: &R,
    token_a: Address,
    token_b: Address,
) -> Option<Address> {
    config
        .fee_tiers
        .iter()
        .find_map(|fee| chain.get_pool(token_a, token_b, *fee))
}

pub fn get_token_price_usd<R>(config: &IndexerConfig, chain: &R, token: &Token) -> BigDecimal
where
    R: PoolReader + PoolRegistry + Erc20Reader,
{
    let eth_price_usd = eth_price_in_usd(config, chain);
    if token.address == config.weth_address {
        return eth_price_usd;
    }

    let mut largest_liquidity_usd = ZERO_BD.clone();
    let mut price_so_far = ZERO_BD.clone();

    if let Some(pool) = get_available_pool(config, chain, token.address, config.weth_address) {
        let weth_balance = fetch_token_balance_of(chain, config.weth_address, pool);
        largest_liquidity_usd =
            convert_token_to_decimal(weth_balance, config.weth_decimals) * &eth_price_usd;

        let price_in_weth = price_in_quote(
            &pool_raw_price(chain, pool),
            token.address,
            token.decimals,
            config.weth_address,
            config.weth_decimals,
        );
        price_so_far = price_in_weth * &eth_price_usd;
    }

    for stable in &config.stable_tokens {
        if token.address == *stable {
            return ONE_BD.clone();
        }

        let Some(pool) = get_available_pool(config, chain, token.address, *stable) else {
            continue;
        };

        let stable_decimals = fetch_token_decimals(chain, *stable)
            .map(u32::from)
            .unwrap_or(DEFAULT_TOKEN_DECIMALS);
        let price = price_in_quote(
            &pool_raw_price(chain, pool),
            token.address,
            token.decimals,
            *stable,
            stable_decimals,
        );

        let liquidity = convert_token_to_decimal(
            fetch_token_balance_of(chain, *stable, pool),
            stable_decimals,
        );
        if largest_liquidity_usd < liquidity {
            largest_liquidity_usd = liquidity;
            price_so_far = price;
        }
    }

    price_so_far
}
