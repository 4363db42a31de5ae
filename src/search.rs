//! Top-level search orchestration
//!
//! A search run walks `ResolvingLocation → FetchingVenues → Ranking →
//! Enriching → Displaying`, or stops in `Failed`. Starting a new run cancels
//! the one in flight: the older run notices at its next suspension point,
//! returns [`SkateFinderError::Cancelled`] and leaves the state and the
//! presenter to the newer run.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::enrichment::enrich;
use crate::location_resolver::{LocationInput, LocationResolver, ResolvedLocation};
use crate::models::EnrichedVenue;
use crate::presentation::Presenter;
use crate::providers::ProviderSet;
use crate::ranking::rank;
use crate::{Result, SkateFinderError};

/// Where a search run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    ResolvingLocation,
    FetchingVenues,
    Ranking,
    Enriching,
    Displaying,
    Failed(String),
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchState::Idle => f.write_str("idle"),
            SearchState::ResolvingLocation => f.write_str("resolving location"),
            SearchState::FetchingVenues => f.write_str("fetching venues"),
            SearchState::Ranking => f.write_str("ranking"),
            SearchState::Enriching => f.write_str("enriching"),
            SearchState::Displaying => f.write_str("displaying"),
            SearchState::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// What started a search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTrigger {
    UserSearch,
    DeviceLocation,
    InitialLoad,
}

/// The result of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub origin: ResolvedLocation,
    pub venues: Vec<EnrichedVenue>,
}

/// Handle of one run; tells whether a newer run has replaced it
struct RunTicket {
    generation: u64,
    runs: watch::Receiver<u64>,
}

impl RunTicket {
    fn is_current(&self) -> bool {
        *self.runs.borrow() == self.generation
    }

    async fn superseded(&self) {
        let mut runs = self.runs.clone();
        let generation = self.generation;
        let closed = runs.wait_for(|current| *current != generation).await.is_err();
        if closed {
            // Orchestrator gone; nothing can supersede this run any more.
            std::future::pending::<()>().await;
        }
    }

    /// Await `future` unless a newer run starts first
    async fn guard<T>(&self, future: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            biased;
            () = self.superseded() => Err(SkateFinderError::Cancelled),
            result = future => result,
        }
    }
}

/// Drives search runs against a provider set and a presenter
pub struct SkateparkSearch {
    providers: ProviderSet,
    presenter: Arc<dyn Presenter>,
    state: Mutex<SearchState>,
    runs: watch::Sender<u64>,
}

impl SkateparkSearch {
    #[must_use]
    pub fn new(providers: ProviderSet, presenter: Arc<dyn Presenter>) -> Self {
        let (runs, _) = watch::channel(0);
        Self {
            providers,
            presenter,
            state: Mutex::new(SearchState::Idle),
            runs,
        }
    }

    /// Current state of the most recent run
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or(SearchState::Idle)
    }

    /// Run a full search, cancelling any run still in flight.
    ///
    /// Results and errors are reported to the presenter; the loading
    /// indicator is switched off again on success and on failure. A run that
    /// gets cancelled leaves the presenter alone.
    #[instrument(skip(self), fields(generation = tracing::field::Empty))]
    pub async fn search(&self, input: LocationInput, trigger: SearchTrigger) -> Result<SearchOutcome> {
        let ticket = self.begin_run();
        tracing::Span::current().record("generation", ticket.generation);
        info!("Starting search ({:?})", trigger);

        self.presenter.show_loading(true);
        self.presenter.hide_error();

        let result = self.execute(&ticket, input).await;

        if !ticket.is_current() {
            debug!("Run {} superseded, leaving presenter untouched", ticket.generation);
            return Err(SkateFinderError::Cancelled);
        }

        match &result {
            Ok(outcome) => {
                self.transition(&ticket, SearchState::Displaying);
                if outcome.venues.is_empty() {
                    self.presenter.show_empty();
                } else {
                    self.presenter.show_results(&outcome.venues);
                }
                info!(
                    "Search near '{}' found {} skateparks",
                    outcome.origin.label,
                    outcome.venues.len()
                );
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                self.transition(&ticket, SearchState::Failed(e.to_string()));
                self.presenter.show_error(&e.user_message());
            }
        }
        self.presenter.show_loading(false);

        result
    }

    async fn execute(&self, ticket: &RunTicket, input: LocationInput) -> Result<SearchOutcome> {
        self.transition(ticket, SearchState::ResolvingLocation);
        let origin = ticket
            .guard(LocationResolver::resolve_location(
                self.providers.position.as_ref(),
                self.providers.geocoder.as_ref(),
                input,
            ))
            .await?;
        self.presenter.show_location(&origin.label);

        self.transition(ticket, SearchState::FetchingVenues);
        let venues = ticket
            .guard(self.providers.venues.list(origin.coordinate))
            .await?;
        debug!("Venue source returned {} candidates", venues.len());

        self.transition(ticket, SearchState::Ranking);
        let ranked = rank(origin.coordinate, venues);

        self.transition(ticket, SearchState::Enriching);
        let venues = ticket
            .guard(enrich(self.providers.weather.as_ref(), ranked))
            .await?;

        Ok(SearchOutcome { origin, venues })
    }

    fn begin_run(&self) -> RunTicket {
        let mut generation = 0;
        self.runs.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        RunTicket {
            generation,
            runs: self.runs.subscribe(),
        }
    }

    fn transition(&self, ticket: &RunTicket, next: SearchState) {
        if !ticket.is_current() {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            debug!("Search state: {} -> {}", *state, next);
            *state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Venue};
    use crate::providers::VenueProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl Presenter for Recorder {
        fn show_loading(&self, loading: bool) {
            self.push(format!("loading:{loading}"));
        }
        fn show_error(&self, message: &str) {
            self.push(format!("error:{message}"));
        }
        fn hide_error(&self) {
            self.push("hide_error".to_string());
        }
        fn show_location(&self, label: &str) {
            self.push(format!("location:{label}"));
        }
        fn show_results(&self, venues: &[EnrichedVenue]) {
            self.push(format!("results:{}", venues.len()));
        }
        fn show_empty(&self) {
            self.push("empty".to_string());
        }
    }

    /// First call hangs, later calls answer with an empty list
    #[derive(Debug, Default)]
    struct SlowFirstVenues {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VenueProvider for SlowFirstVenues {
        async fn list(&self, _region: Coordinate) -> Result<Vec<Venue>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Ok(Vec::new())
        }
    }

    fn search_with(providers: ProviderSet) -> (SkateparkSearch, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let search = SkateparkSearch::new(providers, recorder.clone());
        (search, recorder)
    }

    #[tokio::test]
    async fn test_successful_run_ends_displaying() {
        let (search, recorder) = search_with(ProviderSet::offline());
        assert_eq!(search.state(), SearchState::Idle);

        let outcome = search
            .search(LocationInput::Text("Croydon".to_string()), SearchTrigger::UserSearch)
            .await
            .unwrap();

        assert_eq!(outcome.venues.len(), 4);
        assert_eq!(search.state(), SearchState::Displaying);
        assert_eq!(
            recorder.events(),
            [
                "loading:true",
                "hide_error",
                "location:Croydon",
                "results:4",
                "loading:false",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_run_restores_loading() {
        let (search, recorder) = search_with(ProviderSet::offline());

        let err = search
            .search(LocationInput::Text("   ".to_string()), SearchTrigger::UserSearch)
            .await
            .unwrap_err();

        assert!(matches!(err, SkateFinderError::InvalidInput { .. }));
        assert!(matches!(search.state(), SearchState::Failed(_)));
        assert_eq!(
            recorder.events(),
            [
                "loading:true",
                "hide_error",
                "error:Please enter a location",
                "loading:false",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_venue_list_signals_empty() {
        let mut providers = ProviderSet::offline();
        let venues = Arc::new(SlowFirstVenues::default());
        venues.calls.store(1, Ordering::SeqCst);
        providers.venues = venues;
        let (search, recorder) = search_with(providers);

        let outcome = search
            .search(LocationInput::Device, SearchTrigger::DeviceLocation)
            .await
            .unwrap();

        assert!(outcome.venues.is_empty());
        assert!(recorder.events().contains(&"empty".to_string()));
        assert_eq!(search.state(), SearchState::Displaying);
    }

    #[tokio::test]
    async fn test_new_search_cancels_in_flight_run() {
        let mut providers = ProviderSet::offline();
        providers.venues = Arc::new(SlowFirstVenues::default());
        let (search, recorder) = search_with(providers);

        let first = search.search(LocationInput::Text("Croydon".to_string()), SearchTrigger::InitialLoad);
        let second = async {
            // Let the first run reach its venue fetch.
            tokio::task::yield_now().await;
            search
                .search(LocationInput::Text("Stockwell".to_string()), SearchTrigger::UserSearch)
                .await
        };

        let (first, second) = tokio::time::timeout(Duration::from_secs(5), async {
            tokio::join!(first, second)
        })
        .await
        .expect("superseded run was not cancelled");

        assert!(first.unwrap_err().is_cancelled());
        assert!(second.unwrap().venues.is_empty());
        assert_eq!(search.state(), SearchState::Displaying);

        let events = recorder.events();
        assert_eq!(events.iter().filter(|e| e.as_str() == "empty").count(), 1);
        assert_eq!(events.last().map(String::as_str), Some("loading:false"));
    }
}
