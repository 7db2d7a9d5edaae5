use basu::error::BasuError;
use basu::event::Event;
use basu::{EventBus, Handle, HandlerId};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::common::STORE_EVENT;
use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};

/// Typed publish/subscribe channel for one kind of event.
///
/// Listeners of type `L` receive every event of type `E` published after they
/// registered, on the publishing thread. Publishing without listeners is a
/// no-op.
///
/// ```ignore
/// let bus: QuartermasterEventBus<StoreEvent, StoreEventListener> = QuartermasterEventBus::new();
/// let subscriber = bus.register(listener)?;
/// bus.publish(event)?;
/// bus.deregister(subscriber)?;
/// ```
#[derive(Clone)]
pub struct QuartermasterEventBus<E, L> {
    inner: Arc<EventBusInner<E, L>>,
}

impl<E, L> Default for QuartermasterEventBus<E, L>
where
    L: Handle<E> + 'static,
    E: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, L> QuartermasterEventBus<E, L>
where
    L: Handle<E> + 'static,
    E: Send + Sync,
{
    pub fn new() -> Self {
        QuartermasterEventBus {
            inner: Arc::new(EventBusInner::new()),
        }
    }

    /// Registers a listener and returns the handle needed to remove it.
    pub fn register(&self, listener: L) -> QuartermasterResult<SubscriberRef> {
        self.inner.register(listener)
    }

    pub fn deregister(&self, subscriber: &SubscriberRef) -> QuartermasterResult<()> {
        self.inner.deregister(subscriber)
    }

    pub fn publish(&self, event: E) -> QuartermasterResult<()> {
        self.inner.publish(event)
    }

    /// Drops every listener.
    pub fn close(&self) -> QuartermasterResult<()> {
        self.inner.close()
    }

    pub fn has_listeners(&self) -> bool {
        self.inner.listener_count() > 0
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }
}

/// Handle of a registered listener.
pub struct SubscriberRef {
    pub(crate) inner: HandlerId,
}

impl SubscriberRef {
    pub fn new(inner: HandlerId) -> Self {
        SubscriberRef { inner }
    }
}

struct EventBusInner<E, L> {
    event_bus: EventBus<E>,
    phantom_data: PhantomData<L>,
}

impl<E, L> EventBusInner<E, L>
where
    L: Handle<E> + 'static,
    E: Send + Sync,
{
    fn new() -> Self {
        EventBusInner {
            event_bus: EventBus::new(),
            phantom_data: PhantomData,
        }
    }

    fn register(&self, listener: L) -> QuartermasterResult<SubscriberRef> {
        self.event_bus
            .subscribe(STORE_EVENT, Box::new(listener))
            .map(SubscriberRef::new)
            .map_err(Self::bus_error)
    }

    fn deregister(&self, subscriber: &SubscriberRef) -> QuartermasterResult<()> {
        self.event_bus
            .unsubscribe(STORE_EVENT, &subscriber.inner)
            .map_err(Self::bus_error)
    }

    fn publish(&self, event: E) -> QuartermasterResult<()> {
        if self.listener_count() == 0 {
            return Ok(());
        }

        self.event_bus
            .publish(STORE_EVENT, &Event::new(event))
            .map_err(Self::bus_error)
    }

    fn close(&self) -> QuartermasterResult<()> {
        self.event_bus.clear().map_err(Self::bus_error)
    }

    fn listener_count(&self) -> usize {
        match self.event_bus.get_handler_count(STORE_EVENT) {
            Ok(count) => count,
            Err(BasuError::EventTypeNotFOUND) => 0,
            Err(e) => {
                log::warn!("Failed to count listeners: {}, assuming none", e);
                0
            }
        }
    }

    fn bus_error(e: BasuError) -> QuartermasterError {
        let error = match e {
            BasuError::EventTypeNotFOUND => QuartermasterError::new(
                "Event bus error: no listener is registered for store events",
                ErrorKind::EventError,
            ),
            BasuError::MutexPoisoned => QuartermasterError::new(
                "Event bus error: internal mutex poisoned",
                ErrorKind::EventError,
            ),
            BasuError::HandlerError(e) => QuartermasterError::new(
                &format!("Event listener error: {}", e),
                ErrorKind::EventError,
            ),
        };
        log::error!("{}", error.message());
        error
    }
}
