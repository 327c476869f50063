use alloy_sol_types::Eip712Domain;
use cache::OrderBookCache;
use database::PgPool;
use model::Address;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: OrderBookCache,
    pub domain: Eip712Domain,
    pub marketplace: Address,
}
