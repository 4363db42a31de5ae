//! Concurrent per-venue weather enrichment

use futures::future::try_join_all;
use tracing::{debug, instrument, warn};

use crate::models::{EnrichedVenue, RankedVenue};
use crate::providers::WeatherProvider;
use crate::{Result, SkateFinderError};

/// Fetch weather for every ranked venue concurrently and attach it.
///
/// All fetches are started together on the current task and joined. The
/// output keeps the input order no matter which response arrives first. The
/// first failing fetch fails the whole stage with a single
/// `AggregateEnrichmentFailure`; the fetches still outstanding are dropped.
#[instrument(skip_all, fields(venues = ranked.len()))]
pub async fn enrich(
    provider: &dyn WeatherProvider,
    ranked: Vec<RankedVenue>,
) -> Result<Vec<EnrichedVenue>> {
    let fetches = ranked.into_iter().map(|ranked| async move {
        match provider.fetch(ranked.venue.coordinate).await {
            Ok(weather) => Ok(EnrichedVenue { ranked, weather }),
            Err(e) => {
                warn!("Weather fetch failed for {}: {}", ranked.venue.name, e);
                Err(SkateFinderError::enrichment(&ranked.venue.name, &e))
            }
        }
    });

    let enriched = try_join_all(fetches).await?;
    debug!("Enriched {} venues", enriched.len());
    Ok(enriched)
}
