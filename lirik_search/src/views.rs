//! Sampled song view counting.

use rand::Rng;
use tracing::warn;

use crate::{cache_key::view_counter_key, store::SharedKeyValueStore};


pub const DEFAULT_VIEW_SAMPLE_RATE: f64 = 0.25;


/// Approximate view counter.
///
/// Only a `sample_rate` fraction of views is written, each adding `1 / sample_rate`,
/// which keeps the expected value equal to the real view count.
/// Concurrent views may read the same base value, so counts can drift low under load.
pub struct ViewCounterSampler {
    store: Option<SharedKeyValueStore>,
    sample_rate: f64,
}

impl ViewCounterSampler {
    /// `sample_rate` is clamped to `0.0..=1.0`. A zero rate never writes.
    pub fn new(store: Option<SharedKeyValueStore>, sample_rate: f64) -> Self {
        let sample_rate = if sample_rate.is_finite() {
            sample_rate.clamp(0.0, 1.0)
        } else {
            DEFAULT_VIEW_SAMPLE_RATE
        };

        Self { store, sample_rate }
    }

    /// Records a view of the song and returns its estimated view count.
    pub async fn record_view(&self, slug: &str) -> f64 {
        let is_sampled = rand::thread_rng().gen_bool(self.sample_rate);

        self.record_view_with_sampling_decision(slug, is_sampled)
            .await
    }

    pub async fn record_view_with_rng<R>(&self, slug: &str, rng: &mut R) -> f64
    where
        R: Rng,
    {
        let is_sampled = rng.gen_bool(self.sample_rate);

        self.record_view_with_sampling_decision(slug, is_sampled)
            .await
    }

    async fn record_view_with_sampling_decision(&self, slug: &str, is_sampled: bool) -> f64 {
        let Some(store) = self.store.as_ref() else {
            return 0.0;
        };

        let key = view_counter_key(slug);

        let current_views = match store.get(&key).await {
            Ok(value) => parse_view_count(value.as_deref()),
            Err(error) => {
                warn!(error = %error, slug, "Failed to read view counter.");
                0.0
            }
        };

        if !is_sampled || self.sample_rate <= 0.0 {
            return current_views;
        }

        let estimated_views = current_views + 1.0 / self.sample_rate;

        if let Err(error) = store
            .put(&key, estimated_views.to_string(), None)
            .await
        {
            warn!(error = %error, slug, "Failed to write view counter.");
        }

        estimated_views
    }
}


/// Missing, non-numeric, non-finite and negative values count as zero.
fn parse_view_count(value: Option<&str>) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|views| views.is_finite() && *views >= 0.0)
        .unwrap_or(0.0)
}
