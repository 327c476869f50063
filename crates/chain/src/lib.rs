//! EIP-712 signing/verification and marketplace contract bindings shared by
//! `order-service`, `execution-service`, and `indexer`.

pub mod contract;
pub mod domain;
pub mod executor;

pub use contract::{IMarketplaceInstance, OrderCancelled, OrderTuple, TradeExecuted};
pub use domain::{cancel_digest_and_recover, domain, order_digest_and_recover, RecoverError};
pub use executor::{
    http_provider, http_provider_readonly, to_order_tuple, ChainClient, ExecutorKey,
};
