use alloy::{
    primitives::{
        self, Address, B256, U256,
        aliases::{U80, U96},
        address, b256,
    },
    rpc::types::Log,
    sol_types::SolEvent,
};
use dex_ui::{
    Chain,
    abi::trading::Trading::{self, TradingEvents},
    display::{ActivityEvent, Normalizer, RawTrade},
    feed::NoFeed,
    format, num,
    types::{ProductId, RawEvent},
};
use fastnum::{dec256, udec128, udec256};
use tokio::sync::mpsc;

const TRADER: Address = address!("0x00000000000000000000000000000000000000aa");
const TX: B256 = b256!("0x2222222222222222222222222222222222222222222222222222222222222222");

fn position(product_id: u64, margin: u64, leverage: u64, timestamp: u64) -> Trading::Position {
    Trading::Position {
        productId: product_id,
        leverage,
        price: 2_000_00000000,
        margin,
        owner: TRADER,
        timestamp: U80::from(timestamp),
        isLong: true,
        isSettling: false,
    }
}

fn close_position() -> Trading::ClosePosition {
    Trading::ClosePosition {
        positionId: U256::from(7),
        user: TRADER,
        isFullClose: true,
        productId: 2,
        price: U256::from(30_000_00000000u64),
        entryPrice: U256::from(29_000_00000000u64),
        margin: U256::from(50_000_000u64),
        leverage: U256::from(10_00000000u64),
        pnl: U256::from(1_500_000_000_000_000_000u64),
        pnlIsNegative: true,
        wasLiquidated: false,
    }
}

#[test]
fn test_positions() {
    let chain = Chain::rinkeby();
    let (tx, mut rx) = mpsc::unbounded_channel::<ProductId>();
    let normalizer = Normalizer::new(&chain, tx);

    let positions = [
        position(1, 1_00000000, 2_00000000, 100),
        position(0, 0, 0, 0),
        position(2, 50_000_000, 10_00000000, 300),
    ];
    let records = normalizer.positions(&positions, &[11, 12, 13]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].position_id, Some(13));
    assert_eq!(records[0].product.as_deref(), Some("BTC-USD"));
    assert_eq!(records[0].amount, udec128!(5));
    assert_eq!(records[0].timestamp, 300);

    assert_eq!(records[1].position_id, Some(11));
    assert_eq!(records[1].product.as_deref(), Some("ETH-USD"));
    assert_eq!(records[1].margin, udec128!(1));
    assert_eq!(records[1].leverage, udec128!(2));
    assert_eq!(records[1].amount, udec128!(2));
    assert_eq!(records[1].price, udec128!(2000));
    assert!(records[1].is_long);

    assert_eq!(rx.try_recv().unwrap(), 1);
    assert_eq!(rx.try_recv().unwrap(), 2);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_positions_without_ids() {
    let chain = Chain::localhost();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let records = normalizer.positions(&[position(9, 1, 1, 1), position(3, 1, 1, 2)], &[]);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].product.as_deref(), Some("Gold"));
    assert_eq!(records[1].product, None);
    assert!(records.iter().all(|r| r.position_id.is_none()));
}

#[test]
fn test_trades() {
    let chain = Chain::arbitrum();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let own_tx = b256!("0x3333333333333333333333333333333333333333333333333333333333333333");

    let trades = [
        RawTrade {
            position_id: 1,
            product_id: 1,
            price: U256::from(1_900_00000000u64),
            entry_price: U256::from(2_000_00000000u64),
            margin: U256::from(1_00000000u64),
            leverage: U256::from(5_00000000u64),
            pnl: U256::from(25_000_000u64),
            pnl_is_negative: true,
            is_full_close: true,
            ..Default::default()
        },
        RawTrade {
            position_id: 2,
            product_id: 3,
            price: U256::from(1u64),
            close_price: Some(U256::from(1_10000000u64)),
            tx_hash: Some(own_tx),
            block_number: Some(99),
            ..Default::default()
        },
    ];
    let records = normalizer.trades(&trades, Some(42), Some(TX));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].product.as_deref(), Some("ETH-USD"));
    assert_eq!(records[0].price, udec256!(1900));
    assert_eq!(records[0].amount, udec256!(5));
    assert_eq!(records[0].pnl, udec256!(0.25));
    assert_eq!(records[0].signed_pnl(), dec256!(-0.25));
    assert_eq!(records[0].tx_hash, Some(TX));
    assert_eq!(records[0].block_number, Some(42));

    assert_eq!(records[1].product, None);
    assert_eq!(records[1].price, udec256!(1.1));
    assert_eq!(records[1].tx_hash, Some(own_tx));
    assert_eq!(records[1].block_number, Some(99));
    assert_eq!(records[1].signed_pnl(), dec256!(0));
}

#[test]
fn test_stakes() {
    let chain = Chain::rinkeby();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let stakes = [
        Trading::Stake {
            amount: 3_00000000,
            timestamp: 1_600_000_000,
            owner: TRADER,
        },
        Trading::Stake {
            amount: 0,
            timestamp: 0,
            owner: Address::ZERO,
        },
        Trading::Stake {
            amount: 25_000_000,
            timestamp: 1_700_000_000,
            owner: TRADER,
        },
    ];
    let records = normalizer.stakes(&stakes, &[4, 5, 6]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].stake_id, Some(6));
    assert_eq!(records[0].amount, udec128!(0.25));
    assert_eq!(records[1].stake_id, Some(4));
    assert_eq!(records[1].amount, udec128!(3));
    assert_eq!(records[1].timestamp, 1_600_000_000);
}

#[test]
fn test_vault() {
    let chain = Chain::rinkeby();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let vault = normalizer.vault(&Trading::Vault {
        cap: U96::from(1_000_00000000u64),
        balance: U96::from(250_50000000u64),
        staked: 200_00000000,
        lastCheckpointBalance: U80::ZERO,
        lastCheckpointTime: U80::ZERO,
        stakingPeriod: 2_592_000,
        redemptionPeriod: 28_800,
        maxDailyDrawdown: 1_050,
    });

    assert_eq!(vault.symbol, "ETH");
    assert_eq!(vault.cap, udec128!(1000));
    assert_eq!(vault.balance, udec128!(250.5));
    assert_eq!(vault.staked, udec128!(200));
    assert_eq!(vault.staking_period, 2_592_000);
    assert_eq!(vault.redemption_period, 28_800);
    assert_eq!(vault.max_daily_drawdown, udec128!(10.5));
}

#[test]
fn test_product() {
    let chain = Chain::rinkeby();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let feed = address!("0x00000000000000000000000000000000000000fe");
    let product = normalizer.product(
        &Trading::Product {
            feed,
            maxLeverage: 50_00000000,
            fee: 10,
            isActive: true,
            maxExposure: 10_000_00000000,
            openInterestLong: alloy::primitives::aliases::U48::from(120_00000000u64),
            openInterestShort: alloy::primitives::aliases::U48::from(80_00000000u64),
            interest: 1_500,
            settlementTime: 180,
            minTradeDuration: 900,
            liquidationThreshold: 8_000,
            liquidationBounty: 500,
        },
        5,
    );

    assert_eq!(product.symbol.as_deref(), Some("Gold"));
    assert_eq!(product.max_leverage, udec128!(50));
    assert_eq!(product.max_exposure, udec128!(10000));
    assert_eq!(product.open_interest_long, udec128!(120));
    assert_eq!(product.open_interest_short, udec128!(80));
    assert_eq!(product.fee, udec128!(0.1));
    assert_eq!(product.interest, udec128!(15));
    assert_eq!(product.liquidation_threshold, udec128!(80));
    assert_eq!(product.liquidation_bounty, udec128!(5));
    assert_eq!(product.feed, feed);
    assert_eq!(product.settlement_time, 180);
    assert_eq!(product.min_trade_duration, 900);
    assert!(product.is_active);
}

#[test]
fn test_close_position_event() {
    let chain = Chain::rinkeby();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let raw = RawEvent::new(
        TX,
        Some(10),
        0,
        TradingEvents::ClosePosition(close_position()),
    );

    let event = normalizer.event(&raw);
    assert_eq!(event.kind(), "ClosePosition");
    assert_eq!(event.tx_hash(), TX);
    assert_eq!(event.block_number(), Some(10));
    assert_eq!(event.product_id(), Some(2));

    let ActivityEvent::ClosePosition(close) = event else {
        panic!("unexpected event kind");
    };
    assert_eq!(close.position_id, 7);
    assert_eq!(close.product.as_deref(), Some("BTC-USD"));
    assert_eq!(close.price, udec256!(30000));
    assert_eq!(close.entry_price, udec256!(29000));
    assert_eq!(close.amount, udec256!(5));
    assert_eq!(close.pnl, udec256!(1.5));
    assert!(close.pnl_is_negative);
    assert!(close.is_full_close);
    assert!(!close.was_liquidated);
    assert_eq!(
        format::format_pnl(
            Some(close.pnl.to_signed().resize::<2>()),
            Some(close.pnl_is_negative),
            false
        ),
        "-1.50000"
    );
}

#[test]
fn test_activity_skips_unknown_events() {
    let chain = Chain::rinkeby();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let events = [
        RawEvent::new(
            TX,
            Some(1),
            0,
            TradingEvents::NewPosition(Trading::NewPosition {
                positionId: U256::from(3),
                user: TRADER,
                productId: 1,
                isLong: false,
                price: U256::from(1_800_00000000u64),
                margin: U256::from(2_00000000u64),
                leverage: U256::from(3_00000000u64),
            }),
        ),
        RawEvent::new(
            TX,
            Some(1),
            1,
            TradingEvents::AddMargin(Trading::AddMargin {
                positionId: U256::from(3),
                user: TRADER,
                margin: U256::from(1u64),
                newMargin: U256::from(2u64),
                newLeverage: U256::from(3u64),
            }),
        ),
        RawEvent::new(
            TX,
            Some(2),
            0,
            TradingEvents::Staked(Trading::Staked {
                stakeId: U256::from(8),
                user: TRADER,
                amount: U256::from(4_00000000u64),
            }),
        ),
        RawEvent::new(
            TX,
            None,
            0,
            TradingEvents::Redeemed(Trading::Redeemed {
                stakeId: U256::from(8),
                user: TRADER,
                amount: U256::from(1_00000000u64),
                isFullRedeem: false,
            }),
        ),
    ];

    let unknown = normalizer.event(&events[1]);
    assert!(unknown.is_unknown());
    assert_eq!(unknown.kind(), "AddMargin");
    assert_eq!(unknown.product_id(), None);

    let activity = normalizer.activity(&events);
    assert_eq!(
        activity.iter().map(ActivityEvent::kind).collect::<Vec<_>>(),
        vec!["NewPosition", "Staked", "Redeemed"]
    );

    let ActivityEvent::NewPosition(open) = &activity[0] else {
        panic!("unexpected event {:?}", activity[0]);
    };
    assert_eq!(open.product.as_deref(), Some("ETH-USD"));
    assert_eq!(open.amount, udec256!(6));
    assert!(!open.is_long);

    let ActivityEvent::Staked(stake) = &activity[1] else {
        panic!("unexpected event {:?}", activity[1]);
    };
    assert_eq!(stake.stake_id, 8);
    assert_eq!(stake.amount, udec256!(4));

    let ActivityEvent::Redeemed(redeem) = &activity[2] else {
        panic!("unexpected event {:?}", activity[2]);
    };
    assert_eq!(redeem.amount, udec256!(1));
    assert_eq!(redeem.block_number, None);
}

#[test]
fn test_event_from_log() {
    let contract = Chain::rinkeby().contract();
    let log = Log {
        inner: primitives::Log {
            address: contract,
            data: close_position().encode_log_data(),
        },
        transaction_hash: Some(TX),
        block_number: Some(123),
        log_index: Some(4),
        ..Default::default()
    };

    let raw = RawEvent::from_log(&log).unwrap();
    assert_eq!(raw.tx_hash(), TX);
    assert_eq!(raw.block_number(), Some(123));
    assert_eq!(raw.log_index(), 4);
    assert!(matches!(raw.event(), TradingEvents::ClosePosition(e) if e.productId == 2));

    let garbage = Log {
        inner: primitives::Log {
            address: contract,
            data: primitives::LogData::new_unchecked(vec![B256::ZERO], Default::default()),
        },
        ..Default::default()
    };
    assert!(RawEvent::from_log(&garbage).is_err());
}

#[test]
fn test_trades_at_full_width() {
    let chain = Chain::arbitrum();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let trades = [
        RawTrade {
            position_id: 1,
            product_id: 2,
            price: U256::from(1_900_00000000u64),
            close_price: Some(U256::ZERO),
            margin: U256::from(1u64) << 130,
            leverage: U256::from(1_00000000u64),
            pnl: U256::MAX,
            ..Default::default()
        },
    ];
    let records = normalizer.trades(&trades, None, None);

    assert_eq!(records[0].price, udec256!(1900));
    assert_eq!(records[0].margin, num::to_default_decimal(U256::from(1u64) << 130));
    assert_eq!(records[0].amount, records[0].margin);
    assert_eq!(records[0].pnl, num::to_default_decimal(U256::MAX));
    assert_eq!(
        num::Converter::new(8).to_unsigned(records[0].pnl).unwrap(),
        U256::MAX
    );
    assert!(records[0].signed_pnl() > dec256!(0));
}

#[test]
fn test_wide_event_amounts() {
    let chain = Chain::rinkeby();
    let normalizer = Normalizer::new(&chain, NoFeed);
    let margin = U256::from(1u64) << 130;
    let raw = RawEvent::new(
        TX,
        Some(5),
        0,
        TradingEvents::NewPosition(Trading::NewPosition {
            positionId: U256::from(9),
            user: TRADER,
            productId: 1,
            isLong: true,
            price: U256::from(1_800_00000000u64),
            margin,
            leverage: U256::from(2_00000000u64),
        }),
    );

    let ActivityEvent::NewPosition(open) = normalizer.event(&raw) else {
        panic!("unexpected event kind");
    };
    assert_eq!(open.margin, num::to_default_decimal(margin));
    assert_eq!(
        num::Converter::new(8).to_unsigned(open.amount).unwrap(),
        margin * U256::from(2u64)
    );
    assert_eq!(
        format::format_to_display(open.price.to_signed().resize(), None),
        "1800"
    );
}
