//! Best-effort ERC20 metadata. Every read falls back to a default when the token
//! does not implement the call.

use alloy_primitives::{Address, B256};
use ethnum::U256;
use ic_canister_log::log;
use ic_stable_structures::Memory;

use crate::{
    chain::Erc20Reader,
    libraries::{
        constants::{DEFAULT_TOKEN_DECIMALS, NULL_ETH_VALUE, UNKNOWN, ZERO_BD},
        decimal_math::convert_token_to_decimal,
    },
    logs::{DEBUG, INFO},
    state::State,
};
use types::Token;

pub mod types;


/// `symbol()`, falling back to the legacy `bytes32` variant.
pub fn fetch_token_symbol<R: Erc20Reader>(chain: &R, token: Address) -> String {
    match chain.symbol(token) {
        Ok(symbol) => symbol,
        Err(_) => chain
            .symbol_bytes(token)
            .ok()
            .and_then(decode_bytes32)
            .unwrap_or_else(|| {
                log!(DEBUG, "[fetch_token_symbol]: no symbol for {token}");
                UNKNOWN.to_string()
            }),
    }
}

/// `name()`, falling back to the legacy `bytes32` variant.
pub fn fetch_token_name<R: Erc20Reader>(chain: &R, token: Address) -> String {
    match chain.name(token) {
        Ok(name) => name,
        Err(_) => chain
            .name_bytes(token)
            .ok()
            .and_then(decode_bytes32)
            .unwrap_or_else(|| {
                log!(DEBUG, "[fetch_token_name]: no name for {token}");
                UNKNOWN.to_string()
            }),
    }
}

pub fn fetch_token_decimals<R: Erc20Reader>(chain: &R, token: Address) -> Option<u8> {
    chain.decimals(token).ok()
}

pub fn fetch_token_total_supply<R: Erc20Reader>(chain: &R, token: Address) -> U256 {
    chain.total_supply(token).unwrap_or_else(|err| {
        log!(DEBUG, "[fetch_token_total_supply]: {err:?}, using zero");
        U256::ZERO
    })
}

pub fn fetch_token_balance_of<R: Erc20Reader>(chain: &R, token: Address, owner: Address) -> U256 {
    chain.balance_of(token, owner).unwrap_or_else(|err| {
        log!(DEBUG, "[fetch_token_balance_of]: {err:?}, using zero");
        U256::ZERO
    })
}

/// Loads the token record, or builds a fresh one from on-chain metadata.
///
/// The returned flag is `true` when the record did not exist yet. A fresh record is
/// not persisted; callers save it once they are done with it.
pub fn get_or_create_token<R: Erc20Reader, M: Memory>(
    state: &State<M>,
    chain: &R,
    address: Address,
) -> (Token, bool) {
    if let Some(token) = state.get_token(&address) {
        return (token, false);
    }

    let decimals = match fetch_token_decimals(chain, address) {
        Some(decimals) => decimals as u32,
        None => {
            log!(
                DEBUG,
                "[get_or_create_token]: decimals of {address} unavailable, defaulting to {DEFAULT_TOKEN_DECIMALS}"
            );
            DEFAULT_TOKEN_DECIMALS
        }
    };

    let token = Token {
        address,
        symbol: fetch_token_symbol(chain, address),
        name: fetch_token_name(chain, address),
        decimals,
        total_supply: fetch_token_total_supply(chain, address),
        is_verified: false,
        fund_income: ZERO_BD.clone(),
    };
    (token, true)
}

/// Marks `address` as (un)verified by the controller and refreshes the controller's
/// holdings of it.
pub fn change_verified_token<R: Erc20Reader, M: Memory>(
    state: &mut State<M>,
    chain: &R,
    controller: Address,
    address: Address,
    is_verified: bool,
) -> Token {
    let (mut token, _) = get_or_create_token(state, chain, address);
    token.is_verified = is_verified;
    token.fund_income = convert_token_to_decimal(
        fetch_token_balance_of(chain, address, controller),
        token.decimals,
    );
    state.set_token(token.clone());

    log!(INFO, "[change_verified_token]: {} verified: {is_verified}", token.symbol);
    token
}

/// Decodes a `bytes32` string, `None` for the null sentinel.
fn decode_bytes32(value: B256) -> Option<String> {
    if value == NULL_ETH_VALUE {
        return None;
    }
    let bytes = value.as_slice();
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
}
