use std::time::Duration;

use chrono::Utc;
use model::Side;
use tracing::Instrument;
use url::Url;

use crate::{
    dto::ExecuteRequest,
    matcher::{MatchCandidate, match_tick},
};

pub struct RunLoop {
    pub cache: cache::OrderBookCache,
    pub http: reqwest::Client,
    pub execution_service_url: Url,
    pub tick_interval: Duration,
}

impl RunLoop {
    pub async fn run_forever(&self) -> ! {
        loop {
            self.single_tick().instrument(tracing::info_span!("tick")).await;
            tokio::time::sleep(self.tick_interval).await;
        }
    }

    async fn single_tick(&self) {
        let (asks, bids) = match self.load_book().await {
            Ok(book) => book,
            Err(err) => {
                tracing::error!(?err, "failed to read order book from cache");
                return;
            }
        };

        let pairs = match_tick(asks, bids, Utc::now());
        if pairs.is_empty() {
            return;
        }
        tracing::debug!(count = pairs.len(), "emitting matched pairs");

        for pair in pairs {
            self.dispatch(pair).await;
        }
    }

    async fn load_book(
        &self,
    ) -> Result<(Vec<cache::record::CachedOrder>, Vec<cache::record::CachedOrder>), cache::Error>
    {
        let asks = self.cache.list_all(Side::Ask).await?;
        let bids = self.cache.list_all(Side::Bid).await?;
        Ok((asks, bids))
    }

    /// §4.4 step 3: dispatch to C5; delete both C2 entries only on success,
    /// leaving them in place on failure so the pair is retried next tick.
    async fn dispatch(&self, pair: MatchCandidate) {
        let request = ExecuteRequest::from(&pair);
        let url = self
            .execution_service_url
            .join("/internal/execute")
            .expect("execution_service_url is a valid base");

        let result = self.http.post(url).json(&request).send().await;
        match result {
            Ok(response) if response.status().is_success() => {
                if let Err(err) = self.cache.delete(Side::Ask, &pair.ask.hash).await {
                    tracing::warn!(?err, hash = %pair.ask.hash, "failed to evict matched ask");
                }
                if let Err(err) = self.cache.delete(Side::Bid, &pair.bid.hash).await {
                    tracing::warn!(?err, hash = %pair.bid.hash, "failed to evict matched bid");
                }
            }
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    ask = %pair.ask.hash,
                    bid = %pair.bid.hash,
                    "execution service rejected dispatch; leaving pair for next tick"
                );
            }
            Err(err) => {
                tracing::warn!(?err, ask = %pair.ask.hash, bid = %pair.bid.hash, "failed to reach execution service");
            }
        }
    }
}
