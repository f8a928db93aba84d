use alloy_primitives::{Address, address};
use ic_stable_structures::DefaultMemoryImpl;

use super::*;
use crate::{libraries::path_key::PathError, tests::mock_chain::MockChain};

fn pack(tokens: &[Address], fees: &[u32]) -> Vec<u8> {
    let mut out = tokens[0].to_vec();
    for (token, fee) in tokens[1..].iter().zip(fees) {
        out.extend_from_slice(&fee.to_be_bytes()[1..]);
        out.extend_from_slice(token.as_slice());
    }
    out
}

const FUND: Address = address!("0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f");
const DIST: Address = address!("0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c");

#[test]
fn stores_each_hop_with_its_pool() {
    let a = Address::repeat_byte(0x0a);
    let b = Address::repeat_byte(0x0b);
    let pool_ab = Address::repeat_byte(0x50);

    let mut chain = MockChain::default();
    chain.add_pool(pool_ab, a, b, 3000);
    let mut state = State::init(DefaultMemoryImpl::default());

    let packed = pack(&[a, b, DIST], &[3000, 500]);
    let path = set_path(&mut state, &chain, FUND, DIST, &packed).unwrap();

    assert_eq!(path.path_pools_length, 2);
    assert_eq!(path.path, packed);

    let id = PathId {
        fund: FUND,
        dist_token: DIST,
    };
    assert_eq!(state.get_path(&id), Some(path));

    let first = state.get_path_pool(&PathPoolId { path: id, hop: 0 }).unwrap();
    assert_eq!(first.address, pool_ab);
    assert!(first.zero_for_one);

    // no pool registered for b -> dist at 0.05%
    let second = state.get_path_pool(&PathPoolId { path: id, hop: 1 }).unwrap();
    assert_eq!(second.address, Address::ZERO);
    assert_eq!(second.fee, 500);
    assert!(second.zero_for_one);
}

#[test]
fn rejects_a_route_without_a_hop() {
    let mut state = State::init(DefaultMemoryImpl::default());
    assert_eq!(
        set_path(
            &mut state,
            &MockChain::default(),
            FUND,
            DIST,
            DIST.as_slice()
        ),
        Err(IndexerError::InvalidPath {
            fund: FUND,
            dist_token: DIST,
            reason: PathError::TooShort { len: 20 },
        })
    );
    assert_eq!(
        state.get_path(&PathId {
            fund: FUND,
            dist_token: DIST
        }),
        None
    );
}
