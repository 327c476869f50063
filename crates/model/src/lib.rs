//! Shared domain types for the Oeasy Marketplace off-chain core.
//!
//! This crate is intentionally I/O-free: persistence (`database`), caching
//! (`cache`) and chain interaction (`chain`) crates all build on these types
//! rather than the other way around.

pub mod address;
pub mod numeric;
pub mod order;
pub mod trade_event;

pub use address::{Address, AddressParseError};
pub use order::{orders_compatible, Order, OrderStatus, Side, Signature, SignatureParseError};
pub use trade_event::TradeEvent;
