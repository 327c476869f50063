//! The executor key-pair and RPC provider wiring used by C5 (§4.5) and read
//! by C6 for nonce lookups. Kept separate from `domain`/`contract` because
//! this is the one place in the codebase that touches the private key.

use std::{str::FromStr, sync::Arc};

use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use anyhow::Context;

use crate::contract::{IMarketplaceInstance, OrderTuple};

/// Holds the executor's signing key. `Debug` is hand-implemented to never
/// print the key material (§5 "Shared resources: Executor private key ...
/// never logged").
#[derive(Clone)]
pub struct ExecutorKey {
    signer: PrivateKeySigner,
}

impl std::fmt::Debug for ExecutorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

impl ExecutorKey {
    /// Parses `EXECUTOR_PRIVATE_KEY` (§6), accepted with or without a `0x`
    /// prefix. Returns `None` semantics are handled by the caller: absence
    /// of the env var entirely, not a parse failure, is what puts C5 into
    /// read-only mode (§4.5).
    pub fn from_hex(raw: &str) -> anyhow::Result<Self> {
        let stripped = raw.strip_prefix("0x").unwrap_or(raw);
        let signer =
            PrivateKeySigner::from_str(stripped).context("invalid EXECUTOR_PRIVATE_KEY")?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

/// A thin wrapper around the configured RPC provider plus the marketplace
/// contract instance, giving C5/C6 the handful of calls they need without
/// re-deriving provider wiring in each crate.
pub struct ChainClient<P> {
    provider: Arc<P>,
    marketplace: Address,
}

impl<P> ChainClient<P>
where
    P: Provider + Clone + 'static,
{
    pub fn new(provider: P, marketplace: Address) -> Self {
        Self {
            provider: Arc::new(provider),
            marketplace,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn contract(&self) -> IMarketplaceInstance<&P> {
        IMarketplaceInstance::new(self.marketplace, self.provider.as_ref())
    }

    /// §4.5 step 2: the executor's current pending nonce, as seen by the
    /// RPC endpoint (`eth_getTransactionCount(address, "pending")`).
    pub async fn pending_nonce(&self, address: Address) -> anyhow::Result<u64> {
        Ok(self.provider.get_transaction_count(address).pending().await?)
    }

    pub async fn suggested_gas_price(&self) -> anyhow::Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    pub async fn current_block_number(&self) -> anyhow::Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    /// §4.6 reconciliation sub-batch: all logs emitted by the marketplace
    /// contract in `[from_block, to_block]`. The indexer decodes each into
    /// a `TradeExecuted` (or silently skips it).
    pub async fn get_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> anyhow::Result<Vec<alloy_rpc_types_eth::Log>> {
        let filter = alloy_rpc_types_eth::Filter::new()
            .address(self.marketplace)
            .from_block(from_block)
            .to_block(to_block);
        Ok(self.provider.get_logs(&filter).await?)
    }

    /// §4.5 step 4: signs and submits `executeTrade` with an explicit nonce
    /// and the fixed 500,000 gas limit. The nonce is caller-assigned (the
    /// mutex-protected counter in `execution-service`), never filled by the
    /// provider, so nonce ordering is fully under our control.
    pub async fn submit_execute_trade(
        &self,
        maker_order: OrderTuple,
        taker_order: OrderTuple,
        maker_signature: Vec<u8>,
        nonce: u64,
        gas_price: u128,
    ) -> anyhow::Result<TxHash> {
        const GAS_LIMIT: u64 = 500_000;
        let call = self
            .contract()
            .executeTrade(maker_order, taker_order, maker_signature.into())
            .nonce(nonce)
            .gas(GAS_LIMIT)
            .gas_price(gas_price);
        let pending = call.send().await?;
        Ok(*pending.tx_hash())
    }
}

/// Type-erased so `ChainClient<DynProvider>` is nameable in a struct field —
/// `execution-service` and `indexer` both hold one past their `main`.
pub fn http_provider(rpc_url: &url::Url, signer: PrivateKeySigner) -> alloy_provider::DynProvider {
    ProviderBuilder::new()
        .wallet(signer)
        .connect_http(rpc_url.clone())
        .erased()
}

/// Like [`http_provider`] but without a wallet — for the indexer, which
/// only ever reads.
pub fn http_provider_readonly(rpc_url: &url::Url) -> alloy_provider::DynProvider {
    ProviderBuilder::new().connect_http(rpc_url.clone()).erased()
}

/// Converts a `model::Order`/typed-data tuple field set into the contract's
/// `OrderTuple`, per §6's "8-field tuple" wire format.
pub fn to_order_tuple(
    maker: Address,
    nft: Address,
    token_id: U256,
    payment_token: Address,
    price: U256,
    expiry: U256,
    nonce: U256,
    side: u8,
) -> OrderTuple {
    OrderTuple {
        maker,
        nft,
        tokenId: token_id,
        paymentToken: payment_token,
        price,
        expiry,
        nonce,
        side,
    }
}
