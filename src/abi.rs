/// Human-readable ABI of the Trading contract, in declaration order.
pub const TRADING_ABI: &[&str] = &[
    "function getLatestPrice(address feed, uint16 productId) view returns(uint256)",
    "function getVault() view returns(tuple(uint96 cap, uint96 balance, uint64 staked, uint80 lastCheckpointBalance, uint80 lastCheckpointTime, uint32 stakingPeriod, uint32 redemptionPeriod, uint32 maxDailyDrawdown))",
    "function getProduct(uint16 productId) view returns(tuple(address feed, uint64 maxLeverage, uint16 fee, bool isActive, uint64 maxExposure, uint48 openInterestLong, uint48 openInterestShort, uint16 interest, uint32 settlementTime, uint16 minTradeDuration, uint16 liquidationThreshold, uint16 liquidationBounty))",
    "function getPositions(uint256[] calldata positionIds) view returns(tuple(uint64 productId, uint64 leverage, uint64 price, uint64 margin, address owner, uint80 timestamp, bool isLong, bool isSettling)[] _positions)",
    "function getStakes(uint256[] calldata stakeIds) view returns(tuple(uint64 amount, uint32 timestamp, address owner)[] _stakes)",
    "function stake() payable",
    "function redeem(uint256 stakeId, uint256 amount)",
    "function openPosition(uint16 productId, bool isLong, uint256 leverage) payable",
    "function addMargin(uint256 positionId) payable",
    "function closePosition(uint256 positionId, uint256 margin, bool releaseMargin)",
    "event Staked(uint256 stakeId, address indexed user, uint256 amount)",
    "event Redeemed(uint256 stakeId, address indexed user, uint256 amount, bool isFullRedeem)",
    "event NewPosition(uint256 positionId, address indexed user, uint64 indexed productId, bool isLong, uint256 price, uint256 margin, uint256 leverage)",
    "event AddMargin(uint256 positionId, address indexed user, uint256 margin, uint256 newMargin, uint256 newLeverage)",
    "event ClosePosition(uint256 positionId, address indexed user, bool indexed isFullClose, uint64 indexed productId, uint256 price, uint256 entryPrice, uint256 margin, uint256 leverage, uint256 pnl, bool pnlIsNegative, bool wasLiquidated)",
    "event NewPositionSettled(uint256 positionId, address indexed user, uint256 price)",
    "event PositionLiquidated(uint256 positionId, address indexed by, uint256 vaultReward, uint256 liquidatorReward)",
];

#[allow(clippy::too_many_arguments)]
pub mod trading {
    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        contract Trading {
            struct Vault {
                uint96 cap;
                uint96 balance;
                uint64 staked;
                uint80 lastCheckpointBalance;
                uint80 lastCheckpointTime;
                uint32 stakingPeriod;
                uint32 redemptionPeriod;
                uint32 maxDailyDrawdown;
            }

            struct Product {
                address feed;
                uint64 maxLeverage;
                uint16 fee;
                bool isActive;
                uint64 maxExposure;
                uint48 openInterestLong;
                uint48 openInterestShort;
                uint16 interest;
                uint32 settlementTime;
                uint16 minTradeDuration;
                uint16 liquidationThreshold;
                uint16 liquidationBounty;
            }

            struct Position {
                uint64 productId;
                uint64 leverage;
                uint64 price;
                uint64 margin;
                address owner;
                uint80 timestamp;
                bool isLong;
                bool isSettling;
            }

            struct Stake {
                uint64 amount;
                uint32 timestamp;
                address owner;
            }

            function getLatestPrice(address feed, uint16 productId) external view returns (uint256);
            function getVault() external view returns (Vault memory);
            function getProduct(uint16 productId) external view returns (Product memory);
            function getPositions(uint256[] calldata positionIds) external view returns (Position[] memory _positions);
            function getStakes(uint256[] calldata stakeIds) external view returns (Stake[] memory _stakes);

            function stake() external payable;
            function redeem(uint256 stakeId, uint256 amount) external;
            function openPosition(uint16 productId, bool isLong, uint256 leverage) external payable;
            function addMargin(uint256 positionId) external payable;
            function closePosition(uint256 positionId, uint256 margin, bool releaseMargin) external;

            event Staked(uint256 stakeId, address indexed user, uint256 amount);
            event Redeemed(uint256 stakeId, address indexed user, uint256 amount, bool isFullRedeem);
            event NewPosition(uint256 positionId, address indexed user, uint64 indexed productId, bool isLong, uint256 price, uint256 margin, uint256 leverage);
            event AddMargin(uint256 positionId, address indexed user, uint256 margin, uint256 newMargin, uint256 newLeverage);
            event ClosePosition(uint256 positionId, address indexed user, bool indexed isFullClose, uint64 indexed productId, uint256 price, uint256 entryPrice, uint256 margin, uint256 leverage, uint256 pnl, bool pnlIsNegative, bool wasLiquidated);
            event NewPositionSettled(uint256 positionId, address indexed user, uint256 price);
            event PositionLiquidated(uint256 positionId, address indexed by, uint256 vaultReward, uint256 liquidatorReward);
        }
    );
}
