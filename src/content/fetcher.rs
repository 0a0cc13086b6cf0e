use crate::{
    content::source::ContentSource,
    core::{config::FetchConfig, neighborhood::Place},
    runtime::LocalRuntime,
    MapError, Result,
};
use futures::future::{self, Either};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Lazily loads place descriptions.
///
/// A place is fetched at most once successfully per session. Failed or timed
/// out fetches leave the place unloaded so the next request retries. Requests
/// already in flight are not de-duplicated: two calls before the first
/// resolves issue two requests, and whichever resolves last wins.
pub struct ContentFetcher {
    source: Rc<dyn ContentSource>,
    runtime: Rc<dyn LocalRuntime>,
    timeout: Duration,
    fallback: String,
    issued: Cell<u64>,
}

impl ContentFetcher {
    pub fn new(
        source: Rc<dyn ContentSource>,
        runtime: Rc<dyn LocalRuntime>,
        config: &FetchConfig,
    ) -> Self {
        Self {
            source,
            runtime,
            timeout: config.timeout(),
            fallback: config.fallback_text.clone(),
            issued: Cell::new(0),
        }
    }

    /// Starts a description fetch for `place` unless it is already loaded.
    ///
    /// Returns as soon as the request is issued. The place's content changes,
    /// and its subscribers fire, on the later event-loop turn where the
    /// request resolves or times out.
    pub fn populate(&self, place: &Rc<Place>) {
        if place.content_loaded() {
            log::trace!("'{}' already loaded", place.name());
            return;
        }

        self.issued.set(self.issued.get() + 1);
        log::debug!("fetching description for '{}'", place.name());

        let source = self.source.clone();
        let timer = self.runtime.sleep(self.timeout);
        let timeout = self.timeout;
        let fallback = self.fallback.clone();
        let target = place.clone();

        let task = async move {
            let query = target.name().to_owned();
            let outcome = match future::select(source.fetch(&query), timer).await {
                Either::Left((outcome, _)) => outcome,
                Either::Right(((), _)) => Err(MapError::Timeout(timeout)),
            };
            apply_outcome(&target, outcome, &fallback);
        };

        if let Err(e) = self.runtime.spawn_local(Box::pin(task)) {
            log::error!("could not start fetch for '{}': {}", place.name(), e);
            apply_outcome(place, Err(e), &self.fallback);
        }
    }

    /// Number of requests issued so far
    pub fn requests_issued(&self) -> u64 {
        self.issued.get()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// The loaded flag is updated on the side that keeps "loaded implies fetched
// text" true while subscribers run.
fn apply_outcome(place: &Place, outcome: Result<String>, fallback: &str) {
    match outcome {
        Ok(text) => {
            log::info!("loaded description for '{}'", place.name());
            // Always publish: an empty description equals the initial content.
            place.content().replace(text);
            place.set_content_loaded(true);
        }
        Err(e) => {
            log::warn!("description fetch for '{}' failed: {}", place.name(), e);
            place.set_content_loaded(false);
            place.content().set(fallback.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::neighborhood::Neighborhood;
    use crate::runtime::spawners::manual::ManualRuntime;
    use crate::testing::ControlledSource;
    use futures::executor::LocalPool;
    use std::cell::RefCell;

    struct Harness {
        pool: LocalPool,
        runtime: Rc<ManualRuntime>,
        source: Rc<ControlledSource>,
        fetcher: ContentFetcher,
        hood: Neighborhood,
    }

    fn harness() -> Harness {
        let pool = LocalPool::new();
        let runtime = Rc::new(ManualRuntime::new(&pool));
        let source = Rc::new(ControlledSource::default());
        let fetcher = ContentFetcher::new(source.clone(), runtime.clone(), &FetchConfig::default());
        Harness {
            pool,
            runtime,
            source,
            fetcher,
            hood: Neighborhood::default(),
        }
    }

    #[test]
    fn test_success_loads_once() {
        let mut h = harness();
        let place = h.hood.place(2).unwrap().clone();

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert_eq!(h.source.calls(), 1);
        assert_eq!(h.source.pending_queries(), ["Het steen"]);

        assert!(h.source.resolve("Het steen", Ok("A medieval fortress.".to_string())));
        h.pool.run_until_stalled();
        assert_eq!(place.content().get(), "A medieval fortress.");
        assert!(place.content_loaded());

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert_eq!(h.source.calls(), 1);
        assert_eq!(h.fetcher.requests_issued(), 1);
        assert_eq!(h.runtime.pending_timers(), 0);
        assert_eq!(place.content().get(), "A medieval fortress.");
    }

    #[test]
    fn test_failure_sets_fallback_and_allows_retry() {
        let mut h = harness();
        let place = h.hood.place(0).unwrap().clone();

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        h.source.resolve(
            "Antwerpen-Centraal railway station",
            Err(MapError::MalformedResponse("[]".to_string())),
        );
        h.pool.run_until_stalled();
        assert_eq!(place.content().get(), "Could not fetch content.");
        assert!(!place.content_loaded());

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert_eq!(h.source.calls(), 2);

        h.source.resolve(
            "Antwerpen-Centraal railway station",
            Ok("The main railway station.".to_string()),
        );
        h.pool.run_until_stalled();
        assert_eq!(place.content().get(), "The main railway station.");
        assert!(place.content_loaded());
    }

    #[test]
    fn test_timeout_sets_fallback() {
        let mut h = harness();
        let place = h.hood.place(1).unwrap().clone();

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert_eq!(h.runtime.pending_timers(), 1);

        h.runtime.fire_timers();
        h.pool.run_until_stalled();
        assert_eq!(place.content().get(), "Could not fetch content.");
        assert!(!place.content_loaded());

        // The abandoned request can no longer deliver.
        assert!(!h.source.resolve("Cathedral of Our Lady", Ok("late".to_string())));
        h.pool.run_until_stalled();
        assert_eq!(place.content().get(), "Could not fetch content.");
    }

    #[test]
    fn test_subscribers_fire_on_resolution_not_on_populate() {
        let mut h = harness();
        let place = h.hood.place(1).unwrap().clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        place
            .content()
            .subscribe(move |text: &String| log.borrow_mut().push(text.clone()));

        h.fetcher.populate(&place);
        assert!(seen.borrow().is_empty());
        h.pool.run_until_stalled();
        assert!(seen.borrow().is_empty());

        h.source
            .resolve("Cathedral of Our Lady", Ok("A Gothic cathedral.".to_string()));
        h.pool.run_until_stalled();
        assert_eq!(*seen.borrow(), ["A Gothic cathedral."]);
    }

    #[test]
    fn test_duplicate_populate_issues_two_requests() {
        let mut h = harness();
        let place = h.hood.place(2).unwrap().clone();

        h.fetcher.populate(&place);
        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert_eq!(h.source.calls(), 2);

        h.source.resolve("Het steen", Ok("first".to_string()));
        h.pool.run_until_stalled();
        assert!(place.content_loaded());

        h.source.resolve("Het steen", Err(MapError::Timeout(Duration::from_millis(5000))));
        h.pool.run_until_stalled();
        assert_eq!(place.content().get(), "Could not fetch content.");
        assert!(!place.content_loaded());
    }

    #[test]
    fn test_empty_description_still_notifies() {
        let mut h = harness();
        let place = h.hood.place(2).unwrap().clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        place
            .content()
            .subscribe(move |text: &String| log.borrow_mut().push(text.clone()));

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert!(h.source.resolve("Het steen", Ok(String::new())));
        h.pool.run_until_stalled();
        assert_eq!(*seen.borrow(), [""]);
        assert!(place.content_loaded());

        h.fetcher.populate(&place);
        h.pool.run_until_stalled();
        assert_eq!(h.source.calls(), 1);
    }

    #[test]
    fn test_spawn_failure_sets_fallback() {
        let pool = LocalPool::new();
        let runtime = Rc::new(ManualRuntime::new(&pool));
        let source = Rc::new(ControlledSource::default());
        let fetcher = ContentFetcher::new(source.clone(), runtime, &FetchConfig::default());
        let hood = Neighborhood::default();
        let place = hood.place(0).unwrap().clone();
        drop(pool);

        fetcher.populate(&place);
        assert_eq!(place.content().get(), "Could not fetch content.");
        assert!(!place.content_loaded());
        assert_eq!(fetcher.requests_issued(), 1);
        assert_eq!(source.calls(), 0);
    }
}
