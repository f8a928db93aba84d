use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::str::FromStr;

use super::fixture::*;
use crate::{
    events::EventType,
    fund::types::{Fund, FundSummary, Manager},
    investor::{protocol_fees, types::Investor},
    state::keys::{FundId, InvestorId, PositionId},
};

fn bd(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

fn fund(indexer: &TestIndexer) -> Fund {
    indexer.state.fund(&FundId(FUND)).unwrap()
}

fn manager(indexer: &TestIndexer) -> Manager {
    indexer.state.manager(&MANAGER).unwrap()
}

fn summary(indexer: &TestIndexer) -> FundSummary {
    indexer.state.fund_summary().unwrap()
}

fn investor(indexer: &TestIndexer, owner: alloy_primitives::Address) -> Investor {
    indexer
        .state
        .investor(&InvestorId { fund: FUND, owner })
        .unwrap()
}

fn assert_conserved(indexer: &TestIndexer) {
    let fund = fund(indexer);
    let manager = manager(indexer);
    let summary = summary(indexer);

    assert_eq!(summary.total_fees, fund.total_fees);
    assert_eq!(manager.total_fees, fund.total_fees);
    assert_eq!(
        fund.total_fees,
        &fund.total_pending_fees + &fund.total_withdrew_fees
    );
    assert_eq!(
        summary.total_fees,
        &summary.total_pending_fees + &summary.total_withdrew_fees
    );
}

mod lifecycle {
    use super::*;

    #[test]
    fn fees_are_conserved_through_deposit_withdraw_and_transfer() {
        let mut indexer = funded_indexer();
        assert_conserved(&indexer);

        accrue(&mut indexer.chain, 3);
        assert!(indexer.handle_block(&due_block()).unwrap());
        // 3 USD over 10 shares
        assert_eq!(fund(&indexer).lasted_settlement_price, bd("0.3"));
        assert_eq!(fund(&indexer).total_fees, BigDecimal::from(3));
        assert_conserved(&indexer);

        withdraw(&mut indexer, ALICE, 400, 4, 400);
        let alice = investor(&indexer, ALICE);
        assert_eq!(alice.total_fees, BigDecimal::from(3));
        // 0.3 on each of the 4 burned shares
        assert_eq!(alice.total_withdrew_fees, bd("1.2"));
        assert_eq!(alice.total_pending_fees, bd("1.8"));
        assert_eq!(fund(&indexer).total_pending_fees, bd("1.8"));
        assert_conserved(&indexer);

        indexer
            .handle_event(&event(
                FUND,
                EventType::Transfer {
                    from: ALICE,
                    to: BOB,
                    value: shares(2),
                },
            ))
            .unwrap();
        let alice = investor(&indexer, ALICE);
        let bob = investor(&indexer, BOB);
        // a third of Alice's pending fees leave with a third of her shares
        assert_eq!(alice.total_pending_fees, bd("1.2"));
        assert_eq!(alice.share, shares(4));
        assert_eq!(bob.share, shares(2));
        assert!(bob.total_fees.is_zero());
        assert_eq!(bob.lasted_settlement_price, bd("0.3"));
        assert_eq!(
            fund(&indexer).total_pending_fees,
            &alice.total_pending_fees + &bob.total_pending_fees
        );
        assert_conserved(&indexer);
    }

    #[test]
    fn late_depositor_does_not_share_earlier_fees() {
        let mut indexer = funded_indexer();
        accrue(&mut indexer.chain, 3);
        // the refresh inside the deposit settles the 3 USD on Alice's 10 shares only
        deposit(&mut indexer, BOB, 1_000, 10);

        assert_eq!(fund(&indexer).lasted_settlement_price, bd("0.3"));
        let bob = investor(&indexer, BOB);
        assert!(bob.total_fees.is_zero());
        assert_eq!(bob.lasted_settlement_price, bd("0.3"));

        accrue(&mut indexer.chain, 4);
        indexer.handle_block(&due_block()).unwrap();
        withdraw(&mut indexer, BOB, 1_000, 10, 1_000);
        withdraw(&mut indexer, ALICE, 1_000, 10, 1_000);

        // 4 USD over 20 shares after Bob joined
        assert_eq!(investor(&indexer, BOB).total_fees, bd("2"));
        assert_eq!(investor(&indexer, ALICE).total_fees, bd("5"));
        assert_eq!(fund(&indexer).total_fees, bd("7"));
        assert!(fund(&indexer).total_pending_fees.is_zero());
        assert_conserved(&indexer);
    }

    #[test]
    fn profitable_withdrawal_pays_protocol_fees() {
        let mut indexer = funded_indexer();
        withdraw(&mut indexer, ALICE, 500, 4, 400);

        // 100 USD of profit past the 440 USD base line, grossed up at 15%
        let expected = protocol_fees(&bd("500"), &bd("400"), &bd("0.1"), &bd("0.1"));
        let fund = fund(&indexer);
        assert!(expected > BigDecimal::zero());
        assert!((&fund.total_protocol_fees - &expected).abs() < bd("1e-50"));
        assert_eq!(
            investor(&indexer, ALICE).total_protocol_fees,
            fund.total_protocol_fees
        );
        assert_eq!(
            summary(&indexer).total_protocol_fees_usd,
            fund.total_protocol_fees_usd
        );
    }

    #[test]
    fn self_transfer_keeps_shares_and_fees() {
        let mut indexer = funded_indexer();
        accrue(&mut indexer.chain, 3);
        indexer.handle_block(&due_block()).unwrap();

        indexer
            .handle_event(&event(
                FUND,
                EventType::Transfer {
                    from: ALICE,
                    to: ALICE,
                    value: shares(5),
                },
            ))
            .unwrap();

        let alice = investor(&indexer, ALICE);
        assert_eq!(alice.share, shares(10));
        assert_eq!(alice.total_fees, BigDecimal::from(3));
        assert_conserved(&indexer);
    }
}

mod refresh {
    use super::*;

    #[test]
    fn immediate_second_refresh_accrues_nothing() {
        let mut indexer = funded_indexer();
        accrue(&mut indexer.chain, 3);

        let first = crate::fund::update_fees(
            &mut indexer.state,
            &indexer.config,
            &indexer.chain,
            &due_block(),
            FUND,
            None,
        )
        .unwrap();
        let price = fund(&indexer).lasted_settlement_price;
        let second = crate::fund::update_fees(
            &mut indexer.state,
            &indexer.config,
            &indexer.chain,
            &due_block(),
            FUND,
            None,
        )
        .unwrap();

        assert_eq!(first.delta_fees_usd, BigDecimal::from(3));
        assert!(second.delta_fees_usd.is_zero());
        assert_eq!(fund(&indexer).lasted_settlement_price, price);
    }

    #[test]
    fn in_range_position_splits_its_assets_into_amount_and_fees() {
        let mut indexer = funded_indexer();
        accrue(&mut indexer.chain, 3);
        indexer.handle_block(&due_block()).unwrap();

        let position = indexer
            .state
            .position(&PositionId {
                fund: FUND,
                pool_index: 0,
                position_index: 0,
            })
            .unwrap();

        assert!(position.amount0 > BigDecimal::zero());
        assert!(position.amount1 > BigDecimal::zero());
        assert_eq!(position.fees0, BigDecimal::from(3));
        assert!(position.fees1.is_zero());
        assert_eq!(position.asset_amount_usd, BigDecimal::from(500));
        assert_eq!(
            &position.amount_usd + &position.fees_usd,
            position.asset_amount_usd
        );
        assert_eq!(&position.amount + &position.fees, position.asset_amount);
    }

    #[test]
    fn move_settles_both_positions() {
        let mut indexer = funded_indexer();
        init_position(&mut indexer, 1, -200, 200, 200);
        accrue(&mut indexer.chain, 3);

        indexer
            .handle_event(&event(
                FUND,
                EventType::Move {
                    pool_index: 0,
                    sub_index: 0,
                    add_index: 1,
                    proportion_x128: ethnum::U256::ZERO,
                },
            ))
            .unwrap();

        // both positions accrue 3 USD on the first pass, nothing on the second
        assert_eq!(fund(&indexer).total_fees, BigDecimal::from(6));
        assert_conserved(&indexer);
    }

    #[test]
    fn add_reprices_the_flagged_position() {
        let mut indexer = funded_indexer();
        snapshot_mut(&mut indexer.chain, -100, 100).liquidity = 2 * LIQUIDITY;
        indexer
            .chain
            .fund_mut(FUND)
            .assets_of_position
            .insert((0, 0), usdc(900));

        indexer
            .handle_event(&event(
                FUND,
                EventType::Add {
                    pool_index: 0,
                    position_index: 0,
                    amount: usdc(400),
                },
            ))
            .unwrap();

        let id = PositionId {
            fund: FUND,
            pool_index: 0,
            position_index: 0,
        };
        let position = indexer.state.position(&id).unwrap();
        assert_eq!(position.liquidity, 2 * LIQUIDITY);
        assert_eq!(position.asset_amount, BigDecimal::from(900));
        assert!(!position.is_empty);
    }
}

mod valuation {
    use super::*;
    use crate::{
        chain::Slot0,
        libraries::constants::{Q96, Q128},
        price::get_token_price_usd,
    };
    use ethnum::U256;

    // USDC is token0 of the reference pool: sqrt(5e8) x 2^96 is 2000 USD per WETH
    const SQRT_PRICE_2000_USD: &str = "1771595571142957102961017161607260";

    fn close_to(value: &BigDecimal, expected: u64) -> bool {
        (value - BigDecimal::from(expected)).abs() < bd("1e-20")
    }

    /// Fund in USDC holding one position of `LIQUIDITY` over [-100, 100) in a
    /// USDC/WETH pool at tick 0, WETH priced by the reference pool.
    fn weth_usdc_indexer() -> TestIndexer {
        let mut indexer = indexer();
        let reference_pool = indexer.config.usd_weth_reference_pool;
        let chain = &mut indexer.chain;
        chain.registry.clear();
        chain.add_token(WETH, "WETH", 18);

        chain.add_pool(reference_pool, WETH, USDC, 3000);
        chain.pool_mut(reference_pool).slot0 = Some(Slot0 {
            sqrt_price_x96: U256::from_str_radix(SQRT_PRICE_2000_USD, 10).unwrap(),
            tick: 200_311,
        });

        chain.add_pool(POOL, WETH, USDC, 500);
        let pool = chain.pool_mut(POOL);
        pool.slot0 = Some(Slot0 {
            sqrt_price_x96: *Q96,
            tick: 0,
        });
        pool.fee_growth_global = Some((*Q128, *Q128));

        announce_fund(&mut indexer);
        deposit(&mut indexer, ALICE, 1_000, 10);
        init_position(&mut indexer, 0, -100, 100, 500);
        indexer
    }

    #[test]
    fn weth_is_priced_from_the_reference_pool() {
        let indexer = weth_usdc_indexer();
        let weth = indexer.state.token(&WETH).unwrap();
        let usdc = indexer.state.token(&USDC).unwrap();

        assert!(close_to(
            &get_token_price_usd(&indexer.config, &indexer.chain, &weth),
            2_000
        ));
        assert_eq!(
            get_token_price_usd(&indexer.config, &indexer.chain, &usdc),
            BigDecimal::from(1)
        );
    }

    #[test]
    fn in_range_position_at_2000_usd_per_eth() {
        let mut indexer = weth_usdc_indexer();
        let pool = indexer.chain.pool_mut(POOL);
        // one WETH of fees for the position
        pool.fee_growth_global = Some((*Q128, U256::from(2_u8) * *Q128));

        let refresh = crate::fund::update_fees(
            &mut indexer.state,
            &indexer.config,
            &indexer.chain,
            &due_block(),
            FUND,
            None,
        )
        .unwrap();
        assert!(close_to(&refresh.delta_fees_usd, 2_000));
        assert!(refresh.failed_positions.is_empty());

        let position = indexer
            .state
            .position(&PositionId {
                fund: FUND,
                pool_index: 0,
                position_index: 0,
            })
            .unwrap();
        assert!(position.amount0 > BigDecimal::zero());
        assert!(position.amount1 > BigDecimal::zero());
        assert!(position.fees0.is_zero());
        assert_eq!(position.fees1, BigDecimal::from(1));
        assert_eq!(position.asset_amount_usd, BigDecimal::from(500));
        assert_eq!(
            &position.amount_usd + &position.fees_usd,
            position.asset_amount_usd
        );

        let fund = fund(&indexer);
        assert!(close_to(&fund.total_fees, 2_000));
        assert!(close_to(&fund.lasted_settlement_price, 200));
        assert_conserved(&indexer);
    }
}
