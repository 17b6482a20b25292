use tokio::sync::watch;

use crate::{NormalizedWeather, location::LocationResolver};

use super::WeatherApi;

/// The only failure text ever shown to a user, whatever went wrong.
pub const ERROR_MESSAGE: &str = "Error fetching weather data";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Loaded(NormalizedWeather),
    Failed(String),
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&NormalizedWeather> {
        match self {
            QueryState::Loaded(weather) => Some(weather),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One user's view onto the proxy.
///
/// Every state change is published on a watch channel so a renderer can follow
/// along. The watch channel only keeps the latest state; an observer set with
/// [`QuerySession::with_observer`] is called for every transition, in order.
/// Queries take `&mut self`, so a session never has more than one in flight.
pub struct QuerySession<A, L> {
    api: A,
    resolver: L,
    place: String,
    state: watch::Sender<QueryState>,
    observer: Option<Box<dyn Fn(&QueryState) + Send + Sync>>,
}

impl<A, L> QuerySession<A, L>
where
    A: WeatherApi,
    L: LocationResolver,
{
    pub fn new(api: A, resolver: L) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self { api, resolver, place: String::new(), state, observer: None }
    }

    pub fn with_observer(
        mut self,
        observer: impl Fn(&QueryState) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    /// Record typed input. Editing the place dismisses a previous error.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.place = text.into();
        if self.state.borrow().error().is_some() {
            self.publish(QueryState::Idle);
        }
    }

    /// Explicit submission of the typed place.
    pub async fn submit(&mut self) -> QueryState {
        let place = self.place.clone();
        self.query(&place).await
    }

    /// First-load behavior: look up the current location and, if one is
    /// found, query it once.
    pub async fn load(&mut self) -> QueryState {
        match self.resolver.resolve_current_location().await {
            Ok(place) => {
                tracing::info!(%place, "detected current location");
                self.place = place.clone();
                self.query(&place).await
            }
            Err(err) => {
                tracing::warn!(error = %err, "current location unavailable");
                self.state()
            }
        }
    }

    async fn query(&mut self, location: &str) -> QueryState {
        // Previous data or error must be gone before the request starts.
        self.publish(QueryState::Loading);

        let next = match self.api.fetch(location).await {
            Ok(weather) => QueryState::Loaded(weather),
            Err(err) => {
                tracing::error!(%location, error = %err, "failed to fetch weather");
                QueryState::Failed(ERROR_MESSAGE.to_string())
            }
        };

        self.publish(next.clone());
        next
    }

    fn publish(&self, state: QueryState) {
        if let Some(observer) = &self.observer {
            observer(&state);
        }
        self.state.send_replace(state);
    }
}
