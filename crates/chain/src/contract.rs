//! `sol!`-generated binding for the marketplace contract, standing in for
//! the ~3,000 lines of hand-written bindings the original ships (§9
//! "Generated chain bindings"). In a real deployment this would be
//! generated from the contract's ABI JSON; here the interface is declared
//! inline from §6's wire format, which is equivalent input to the same
//! macro.

alloy_sol_types::sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMarketplace {
        struct OrderTuple {
            address maker;
            address nft;
            uint256 tokenId;
            address paymentToken;
            uint256 price;
            uint256 expiry;
            uint256 nonce;
            uint8 side;
        }

        function executeTrade(
            OrderTuple makerOrder,
            OrderTuple takerOrder,
            bytes makerSignature
        ) external;

        event TradeExecuted(
            address indexed maker,
            address indexed taker,
            address indexed nft,
            uint256 tokenId,
            address paymentToken,
            uint256 price,
            uint8 side,
            uint256 fee
        );

        event OrderCancelled(address indexed maker, uint256 indexed nonce);
    }
}

pub use IMarketplace::{
    executeTradeCall, IMarketplaceInstance, OrderCancelled, OrderTuple, TradeExecuted,
};

/// §4.6 `processLog` step 0: "attempt to parse the log as a `TradeExecuted`
/// event; non-matching logs are silently ignored" — `Ok(None)` is that
/// silent ignore, not an error.
pub fn decode_trade_executed(
    log: &alloy_rpc_types_eth::Log,
) -> anyhow::Result<Option<TradeExecuted>> {
    use alloy_sol_types::SolEvent;

    match TradeExecuted::decode_log(&log.inner, true) {
        Ok(decoded) => Ok(Some(decoded.data)),
        Err(_) => Ok(None),
    }
}
