use alloy_primitives::{address, Address};
use bigdecimal::BigDecimal;
use ethnum::U256;
use num_traits::Zero;

use super::*;
use crate::{chain::Slot0, tests::mock_chain::MockChain};

const DAI: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
const USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
const WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
// sorts below every reference token, so it is always token0
const TOKEN: Address = address!("1111111111111111111111111111111111111111");

fn q96_times(n: u64) -> U256 {
    U256::from(n) << 96
}

fn token(decimals: u32) -> Token {
    Token {
        address: TOKEN,
        decimals,
        ..Default::default()
    }
}

fn set_price(chain: &mut MockChain, pool: Address, sqrt_price_x96: U256) {
    chain.pool_mut(pool).slot0 = Some(Slot0 {
        sqrt_price_x96,
        tick: 0,
    });
}

/// Reference pool at 2500 USD per WETH.
fn chain_with_reference_pool(config: &IndexerConfig) -> MockChain {
    let mut chain = MockChain::default();
    chain.add_pool(config.usd_weth_reference_pool, USDC, WETH, 3000);
    // USDC is token0: 1 USDC = 0.0004 WETH, raw 4e8 = 20000^2
    set_price(&mut chain, config.usd_weth_reference_pool, q96_times(20_000));
    chain.add_token(DAI, "DAI", 6);
    chain.add_token(USDC, "USDC", 6);
    chain
}

#[test]
fn eth_price_from_reference_pool() {
    let config = IndexerConfig::default();
    let chain = chain_with_reference_pool(&config);
    assert_eq!(eth_price_in_usd(&config, &chain), BigDecimal::from(2500));
}

#[test]
fn eth_price_is_zero_when_reference_pool_reverts() {
    let config = IndexerConfig::default();
    let chain = MockChain::default();
    assert!(eth_price_in_usd(&config, &chain).is_zero());
}

#[test]
fn weth_is_priced_at_the_eth_price() {
    let config = IndexerConfig::default();
    let chain = chain_with_reference_pool(&config);
    let weth = Token {
        address: WETH,
        decimals: 18,
        ..Default::default()
    };
    assert_eq!(get_token_price_usd(&config, &chain, &weth), BigDecimal::from(2500));
}

#[test]
fn stable_token_is_worth_one() {
    let config = IndexerConfig::default();
    let chain = chain_with_reference_pool(&config);
    let usdc = Token {
        address: USDC,
        decimals: 6,
        ..Default::default()
    };
    assert_eq!(get_token_price_usd(&config, &chain, &usdc), BigDecimal::from(1));
}

#[test]
fn token_without_pools_is_worth_zero() {
    let config = IndexerConfig::default();
    let chain = chain_with_reference_pool(&config);
    assert!(get_token_price_usd(&config, &chain, &token(18)).is_zero());
}

#[test]
fn fee_tiers_are_searched_in_order() {
    let config = IndexerConfig::default();
    let mut chain = MockChain::default();
    chain.add_pool(Address::repeat_byte(0x30), TOKEN, DAI, 3000);
    chain.add_pool(Address::repeat_byte(0x99), TOKEN, DAI, 10000);

    assert_eq!(
        get_available_pool(&config, &chain, TOKEN, DAI),
        Some(Address::repeat_byte(0x30))
    );
    assert_eq!(get_available_pool(&config, &chain, TOKEN, USDC), None);
}

#[test]
fn deepest_stable_pool_sets_the_price() {
    let config = IndexerConfig::default();
    let mut chain = chain_with_reference_pool(&config);
    let dai_pool = Address::repeat_byte(0x01);
    let usdc_pool = Address::repeat_byte(0x02);
    chain.add_pool(dai_pool, TOKEN, DAI, 500);
    chain.add_pool(usdc_pool, TOKEN, USDC, 3000);
    set_price(&mut chain, dai_pool, q96_times(2));
    set_price(&mut chain, usdc_pool, q96_times(3));
    chain.set_balance(DAI, dai_pool, U256::from(100_000_000_u64));
    chain.set_balance(USDC, usdc_pool, U256::from(1_000_000_000_u64));

    assert_eq!(get_token_price_usd(&config, &chain, &token(6)), BigDecimal::from(9));
}

#[test]
fn equal_liquidity_keeps_the_first_candidate() {
    let config = IndexerConfig::default();
    let mut chain = chain_with_reference_pool(&config);
    let dai_pool = Address::repeat_byte(0x01);
    let usdc_pool = Address::repeat_byte(0x02);
    chain.add_pool(dai_pool, TOKEN, DAI, 500);
    chain.add_pool(usdc_pool, TOKEN, USDC, 500);
    set_price(&mut chain, dai_pool, q96_times(2));
    set_price(&mut chain, usdc_pool, q96_times(3));
    chain.set_balance(DAI, dai_pool, U256::from(500_000_000_u64));
    chain.set_balance(USDC, usdc_pool, U256::from(500_000_000_u64));

    assert_eq!(get_token_price_usd(&config, &chain, &token(6)), BigDecimal::from(4));
}

#[test]
fn weth_pool_wins_when_it_is_deeper() {
    let config = IndexerConfig::default();
    let mut chain = chain_with_reference_pool(&config);
    let weth_pool = Address::repeat_byte(0x03);
    let dai_pool = Address::repeat_byte(0x01);
    chain.add_pool(weth_pool, TOKEN, WETH, 3000);
    chain.add_pool(dai_pool, TOKEN, DAI, 500);
    // 1 TOKEN = 0.0004 WETH = 1 USD
    set_price(&mut chain, weth_pool, q96_times(20_000));
    set_price(&mut chain, dai_pool, q96_times(2));
    // 10 WETH = 25000 USD of depth against 100 DAI
    chain.set_balance(WETH, weth_pool, U256::from(10_u64) * U256::from(10_u64).pow(18));
    chain.set_balance(DAI, dai_pool, U256::from(100_000_000_u64));

    assert_eq!(get_token_price_usd(&config, &chain, &token(6)), BigDecimal::from(1));

    chain.set_balance(DAI, dai_pool, U256::from(30_000_000_000_u64));
    assert_eq!(get_token_price_usd(&config, &chain, &token(6)), BigDecimal::from(4));
}
