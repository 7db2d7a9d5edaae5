use basu::error::BasuError;
use basu::event::Event;
use basu::Handle;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::sync::Arc;

use crate::common::current_time_millis;
use crate::errors::QuartermasterResult;

/// What changed in a [`FilterStore`](crate::store::FilterStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreEventKind {
    /// A condition or combinator was added, changed or removed.
    FiltersChanged,
    FiltersCleared,
    /// The asset type changed; filters were cleared with it.
    AssetTypeChanged,
    PageChanged,
    ActiveCharacterChanged,
}

impl Display for StoreEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreEventKind::FiltersChanged => write!(f, "FiltersChanged"),
            StoreEventKind::FiltersCleared => write!(f, "FiltersCleared"),
            StoreEventKind::AssetTypeChanged => write!(f, "AssetTypeChanged"),
            StoreEventKind::PageChanged => write!(f, "PageChanged"),
            StoreEventKind::ActiveCharacterChanged => write!(f, "ActiveCharacterChanged"),
        }
    }
}

/// Notification published after a store mutation has been applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    kind: StoreEventKind,
    session_id: String,
    timestamp: i64,
}

impl StoreEvent {
    /// Creates an event stamped with the current time.
    pub fn new(kind: StoreEventKind, session_id: &str) -> Self {
        StoreEvent {
            kind,
            session_id: session_id.to_string(),
            timestamp: current_time_millis(),
        }
    }

    pub fn kind(&self) -> StoreEventKind {
        self.kind
    }

    /// Id of the store that published the event.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Signature of store event callbacks. Any matching closure implements it.
pub trait StoreEventCallback: Send + Sync + Fn(StoreEvent) -> QuartermasterResult<()> {}

impl<F> StoreEventCallback for F where F: Send + Sync + Fn(StoreEvent) -> QuartermasterResult<()> {}

/// A subscriber to store events.
///
/// ```ignore
/// store.subscribe(StoreEventListener::new(|event| {
///     println!("{} changed", event.kind());
///     Ok(())
/// }))?;
/// ```
#[derive(Clone)]
pub struct StoreEventListener {
    on_event: Arc<dyn StoreEventCallback>,
}

impl StoreEventListener {
    pub fn new(on_event: impl StoreEventCallback + 'static) -> Self {
        StoreEventListener {
            on_event: Arc::new(on_event),
        }
    }
}

impl Handle<StoreEvent> for StoreEventListener {
    fn handle(&self, event: &Event<StoreEvent>) -> Result<(), BasuError> {
        (self.on_event)(event.data.clone()).map_err(|e| BasuError::HandlerError(anyhow::Error::from(e)))
    }
}

impl Debug for StoreEventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreEventListener").finish()
    }
}
