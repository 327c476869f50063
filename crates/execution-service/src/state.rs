use alloy_primitives::Address;
use chain::{ChainClient, ExecutorKey};

use crate::nonce::NonceManager;

pub struct AppState {
    pub chain: ChainClient<alloy_provider::DynProvider>,
    pub executor: ExecutorKey,
    pub nonce: NonceManager,
}

impl AppState {
    pub fn executor_address(&self) -> Address {
        self.executor.address()
    }
}
