//! Session state for one search-and-display session.
//!
//! State transitions go through [`reduce`], a pure function that returns the
//! side effects to run. [`App`] owns the state plus a provider and executes
//! those effects.

use tracing::{debug, warn};

use crate::{WeatherProvider, WeatherRecord};

/// The only failure text users ever see.
pub const ERROR_MESSAGE: &str = "No such place in our API";

/// Everything a session holds in memory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// Record currently on display.
    pub record: WeatherRecord,
    /// Search text, stored verbatim.
    pub input: String,
    /// Set when the latest search failed.
    pub error: bool,
    /// Bumped on every accepted submission.
    pub generation: u64,
    /// Generation of the outstanding request, if any.
    pub pending: Option<u64>,
}

impl SessionState {
    pub fn new(record: WeatherRecord) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.then_some(ERROR_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Search text edited
    InputChanged(String),
    /// Search form submitted
    Submit,
    /// Result: fetch for `generation` succeeded
    FetchDidLoad {
        generation: u64,
        record: WeatherRecord,
    },
    /// Result: fetch for `generation` failed
    FetchDidError { generation: u64 },
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchWeather { city: String, generation: u64 },
}

#[derive(Debug, Default, PartialEq)]
pub struct Dispatch {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl Dispatch {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }
}

/// Apply `action` to `state`.
///
/// Results carry the generation they were requested for; anything but the
/// latest generation is dropped so an older, slower response can never
/// overwrite a newer one.
pub fn reduce(state: &mut SessionState, action: Action) -> Dispatch {
    match action {
        Action::InputChanged(text) => {
            state.input = text;
            Dispatch::changed()
        }

        Action::Submit => {
            if state.input.is_empty() {
                return Dispatch::unchanged();
            }

            let city = std::mem::take(&mut state.input);
            state.error = false;
            state.generation += 1;
            state.pending = Some(state.generation);
            Dispatch::changed_with(Effect::FetchWeather {
                city,
                generation: state.generation,
            })
        }

        Action::FetchDidLoad { generation, record } => {
            if generation != state.generation {
                debug!(generation, current = state.generation, "dropping stale result");
                return Dispatch::unchanged();
            }
            state.record = record;
            state.pending = None;
            Dispatch::changed()
        }

        Action::FetchDidError { generation } => {
            if generation != state.generation {
                debug!(generation, current = state.generation, "dropping stale error");
                return Dispatch::unchanged();
            }
            state.error = true;
            state.pending = None;
            Dispatch::changed()
        }
    }
}

/// App root: owns the session state and the provider it fetches from.
#[derive(Debug)]
pub struct App<P: WeatherProvider + ?Sized> {
    state: SessionState,
    provider: Box<P>,
}

impl<P: WeatherProvider + ?Sized> App<P> {
    pub fn new(provider: Box<P>) -> Self {
        Self::with_record(provider, WeatherRecord::default())
    }

    pub fn with_record(provider: Box<P>, record: WeatherRecord) -> Self {
        Self {
            state: SessionState::new(record),
            provider,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn record(&self) -> &WeatherRecord {
        &self.state.record
    }

    /// Replace the displayed record wholesale.
    pub fn update(&mut self, record: WeatherRecord) {
        self.state.record = record;
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        reduce(&mut self.state, action)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(Action::InputChanged(text.into()));
    }

    /// Submit the current input and wait for the fetch it triggers.
    ///
    /// Returns `false` when nothing was submitted (empty input).
    pub async fn submit(&mut self) -> bool {
        let dispatch = self.dispatch(Action::Submit);
        let submitted = !dispatch.effects.is_empty();

        for effect in dispatch.effects {
            let outcome = self.run_effect(effect).await;
            self.dispatch(outcome);
        }

        submitted
    }

    /// Convenience: set the input to `city` and submit it.
    pub async fn search(&mut self, city: &str) -> bool {
        self.set_input(city);
        self.submit().await
    }

    async fn run_effect(&self, effect: Effect) -> Action {
        match effect {
            Effect::FetchWeather { city, generation } => {
                match self.provider.current(&city).await {
                    Ok(record) => Action::FetchDidLoad { generation, record },
                    Err(e) => {
                        warn!(%city, error = %e, "weather fetch failed");
                        Action::FetchDidError { generation }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FetchError;
    use async_trait::async_trait;

    fn record(city: &str, temp: f64) -> WeatherRecord {
        WeatherRecord {
            city: city.to_string(),
            temp,
            temp_min: temp - 1.0,
            temp_max: temp + 1.0,
            humidity: 30.0,
            feels_like: temp,
            weather: "clear sky".to_string(),
        }
    }

    #[test]
    fn input_is_stored_verbatim() {
        let mut state = SessionState::default();
        let result = reduce(&mut state, Action::InputChanged("  New York ".into()));

        assert!(result.changed);
        assert_eq!(state.input, "  New York ");
    }

    #[test]
    fn empty_submit_does_nothing() {
        let mut state = SessionState {
            error: true,
            ..Default::default()
        };
        let before = state.clone();

        let result = reduce(&mut state, Action::Submit);

        assert_eq!(result, Dispatch::unchanged());
        assert_eq!(state, before);
    }

    #[test]
    fn submit_clears_input_and_error_before_fetch() {
        let mut state = SessionState {
            input: "Paris".into(),
            error: true,
            ..Default::default()
        };

        let result = reduce(&mut state, Action::Submit);

        assert!(result.changed);
        assert!(state.input.is_empty());
        assert!(!state.error);
        assert_eq!(state.pending, Some(1));
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                city: "Paris".into(),
                generation: 1
            }]
        );
    }

    #[test]
    fn load_replaces_record_wholesale() {
        let mut state = SessionState::default();
        state.input = "Oslo".into();
        reduce(&mut state, Action::Submit);

        let fresh = record("Oslo", 3.0);
        reduce(
            &mut state,
            Action::FetchDidLoad {
                generation: 1,
                record: fresh.clone(),
            },
        );

        assert_eq!(state.record, fresh);
        assert_eq!(state.pending, None);
        assert!(!state.error);
    }

    #[test]
    fn error_keeps_record_and_sets_flag() {
        let mut state = SessionState::default();
        let before = state.record.clone();
        state.input = "Atlantis".into();
        reduce(&mut state, Action::Submit);

        reduce(&mut state, Action::FetchDidError { generation: 1 });

        assert_eq!(state.record, before);
        assert!(state.error);
        assert_eq!(state.error_message(), Some(ERROR_MESSAGE));
        assert_eq!(state.pending, None);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut state = SessionState::default();
        state.input = "Slowtown".into();
        reduce(&mut state, Action::Submit);
        state.input = "Fastville".into();
        reduce(&mut state, Action::Submit);

        let fast = record("Fastville", 25.0);
        reduce(
            &mut state,
            Action::FetchDidLoad {
                generation: 2,
                record: fast.clone(),
            },
        );
        let late = reduce(
            &mut state,
            Action::FetchDidLoad {
                generation: 1,
                record: record("Slowtown", 5.0),
            },
        );
        let late_err = reduce(&mut state, Action::FetchDidError { generation: 1 });

        assert!(!late.changed);
        assert!(!late_err.changed);
        assert_eq!(state.record, fast);
        assert!(!state.error);
    }

    #[derive(Debug)]
    struct FakeProvider {
        known: Vec<WeatherRecord>,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
            self.known
                .iter()
                .find(|r| r.city == city)
                .cloned()
                .ok_or(FetchError::MissingCondition)
        }
    }

    fn app() -> App<FakeProvider> {
        App::new(Box::new(FakeProvider {
            known: vec![record("Tokyo", 22.0)],
        }))
    }

    #[tokio::test]
    async fn app_starts_with_seed_record() {
        let app = app();
        assert_eq!(app.record(), &WeatherRecord::default());
        assert!(!app.state().error);
    }

    #[tokio::test]
    async fn successful_search_replaces_record() {
        let mut app = app();

        assert!(app.search("Tokyo").await);

        assert_eq!(app.record(), &record("Tokyo", 22.0));
        assert!(!app.state().error);
        assert!(app.state().input.is_empty());
    }

    #[tokio::test]
    async fn failed_search_sets_error_and_keeps_record() {
        let mut app = app();
        app.search("Tokyo").await;
        let before = app.record().clone();

        assert!(app.search("Nowhere").await);

        assert_eq!(app.record(), &before);
        assert!(app.state().error);
        assert!(app.state().input.is_empty());
    }

    #[tokio::test]
    async fn next_success_clears_error() {
        let mut app = app();
        app.search("Nowhere").await;
        assert!(app.state().error);

        app.search("Tokyo").await;
        assert!(!app.state().error);
    }

    #[tokio::test]
    async fn empty_search_never_reaches_provider() {
        let mut app = app();
        assert!(!app.search("").await);
        assert_eq!(app.state().generation, 0);
    }

    #[test]
    fn update_replaces_record() {
        let mut app = app();
        let next = record("Lima", 19.0);
        app.update(next.clone());
        assert_eq!(app.record(), &next);
    }
}
