use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::FieldCatalog;
use crate::common::{atomic, Atomic, QuartermasterEventBus, ReadExecutor, SubscriberRef, WriteExecutor};
use crate::config::QuartermasterConfig;
use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};
use crate::filter::{Combinator, Condition, FilterSequence};
use crate::inventory::{AssetList, Page};
use crate::record::{AssetType, Record};
use crate::store::{StoreEvent, StoreEventKind, StoreEventListener};

/// The filter state of one browsing session.
///
/// Every mutation is applied under a write lock and then announced to the
/// subscribers as a [StoreEvent]. Conditions are checked against the
/// [FieldCatalog] of the active asset type before they are applied, and any
/// change to the filters moves the session back to the first page.
///
/// Cloning is cheap; clones share state and subscribers.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::filter::{field, Combinator};
/// use quartermaster::record::AssetType;
/// use quartermaster::store::{FilterStore, StoreEventListener};
///
/// let store = FilterStore::new(QuartermasterConfig::default());
/// store.subscribe(StoreEventListener::new(|event| {
///     log::info!("{} in {}", event.kind(), event.session_id());
///     Ok(())
/// }))?;
///
/// store.set_asset_type(AssetType::Ship)?;
/// store.add_condition(field("crewCapacity").gte(4), Combinator::And)?;
/// let page = store.search(&ships)?;
/// ```
#[derive(Clone)]
pub struct FilterStore {
    inner: Arc<FilterStoreInner>,
}

impl Default for FilterStore {
    fn default() -> Self {
        FilterStore::new(QuartermasterConfig::default())
    }
}

impl FilterStore {
    /// Creates an empty session browsing items.
    pub fn new(config: QuartermasterConfig) -> Self {
        FilterStore {
            inner: Arc::new(FilterStoreInner::new(config)),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    pub fn config(&self) -> &QuartermasterConfig {
        &self.inner.config
    }

    /// Appends a condition; `combinator` joins it to the previous one.
    pub fn add_condition(&self, condition: Condition, combinator: Combinator) -> QuartermasterResult<()> {
        self.inner.add_condition(condition, combinator)
    }

    pub fn update_condition(&self, index: usize, condition: Condition) -> QuartermasterResult<()> {
        self.inner.update_condition(index, condition)
    }

    /// Removes the condition at `index` together with the combinator that
    /// joined it.
    pub fn remove_condition(&self, index: usize) -> QuartermasterResult<Condition> {
        self.inner.remove_condition(index)
    }

    /// Sets the combinator joining condition `index` to the next one.
    pub fn set_combinator(&self, index: usize, combinator: Combinator) -> QuartermasterResult<()> {
        self.inner.set_combinator(index, combinator)
    }

    /// Replaces the whole sequence, for example with a saved filter.
    ///
    /// Operators this version does not recognise are kept when the configured
    /// [`UnknownOperatorPolicy`](crate::filter::UnknownOperatorPolicy) is `Pass`.
    pub fn load_sequence(&self, sequence: FilterSequence) -> QuartermasterResult<()> {
        self.inner.load_sequence(sequence)
    }

    pub fn clear_filters(&self) -> QuartermasterResult<()> {
        self.inner.clear_filters()
    }

    /// Switches the asset type. Filters of the previous type are dropped.
    pub fn set_asset_type(&self, asset_type: AssetType) -> QuartermasterResult<()> {
        self.inner.set_asset_type(asset_type)
    }

    pub fn set_active_character(&self, character_id: Option<&str>) -> QuartermasterResult<()> {
        self.inner.set_active_character(character_id)
    }

    pub fn set_page(&self, page: usize) -> QuartermasterResult<()> {
        self.inner.set_page(page)
    }

    /// Snapshot of the current sequence.
    pub fn sequence(&self) -> FilterSequence {
        self.inner.state.read_with(|state| state.sequence.clone())
    }

    pub fn asset_type(&self) -> AssetType {
        self.inner.state.read_with(|state| state.asset_type)
    }

    pub fn active_character(&self) -> Option<String> {
        self.inner.state.read_with(|state| state.active_character.clone())
    }

    pub fn page(&self) -> usize {
        self.inner.state.read_with(|state| state.page)
    }

    /// The catalog of the active asset type.
    pub fn catalog(&self) -> &'static FieldCatalog {
        FieldCatalog::for_asset(self.asset_type())
    }

    /// Applies the current filters and page to `assets`.
    pub fn search(&self, assets: &AssetList) -> QuartermasterResult<Page<Record>> {
        self.inner.search(assets)
    }

    pub fn subscribe(&self, listener: StoreEventListener) -> QuartermasterResult<SubscriberRef> {
        self.inner.event_bus.register(listener)
    }

    pub fn unsubscribe(&self, subscriber: SubscriberRef) -> QuartermasterResult<()> {
        self.inner.event_bus.deregister(&subscriber)
    }

    pub fn has_listeners(&self) -> bool {
        self.inner.event_bus.has_listeners()
    }

    /// Drops all subscribers. The state stays readable and writable.
    pub fn close(&self) -> QuartermasterResult<()> {
        self.inner.event_bus.close()
    }
}

#[derive(Clone, Debug, Default)]
struct StoreState {
    sequence: FilterSequence,
    asset_type: AssetType,
    active_character: Option<String>,
    page: usize,
}

struct FilterStoreInner {
    session_id: String,
    config: QuartermasterConfig,
    state: Atomic<StoreState>,
    event_bus: QuartermasterEventBus<StoreEvent, StoreEventListener>,
}

impl FilterStoreInner {
    fn new(config: QuartermasterConfig) -> Self {
        FilterStoreInner {
            session_id: Uuid::new_v4().to_string(),
            config,
            state: atomic(StoreState::default()),
            event_bus: QuartermasterEventBus::new(),
        }
    }

    fn add_condition(&self, condition: Condition, combinator: Combinator) -> QuartermasterResult<()> {
        self.state.write_with(|state| {
            FieldCatalog::for_asset(state.asset_type).validate_condition(&condition)?;
            log::debug!("Session {} adds {} {}", self.session_id, combinator, condition);
            state.sequence.add_condition(condition, combinator);
            state.page = 0;
            Ok::<(), QuartermasterError>(())
        })?;
        self.publish(StoreEventKind::FiltersChanged)
    }

    fn update_condition(&self, index: usize, condition: Condition) -> QuartermasterResult<()> {
        self.state.write_with(|state| {
            FieldCatalog::for_asset(state.asset_type).validate_condition(&condition)?;
            log::debug!("Session {} sets condition {} to {}", self.session_id, index, condition);
            state.sequence.update_condition(index, condition)?;
            state.page = 0;
            Ok::<(), QuartermasterError>(())
        })?;
        self.publish(StoreEventKind::FiltersChanged)
    }

    fn remove_condition(&self, index: usize) -> QuartermasterResult<Condition> {
        let removed = self.state.write_with(|state| {
            let removed = state.sequence.remove_condition(index)?;
            log::debug!("Session {} removes {}", self.session_id, removed);
            state.page = 0;
            Ok::<Condition, QuartermasterError>(removed)
        })?;
        self.publish(StoreEventKind::FiltersChanged)?;
        Ok(removed)
    }

    fn set_combinator(&self, index: usize, combinator: Combinator) -> QuartermasterResult<()> {
        self.state.write_with(|state| {
            state.sequence.set_combinator(index, combinator)?;
            log::debug!("Session {} joins condition {} with {}", self.session_id, index, combinator);
            state.page = 0;
            Ok::<(), QuartermasterError>(())
        })?;
        self.publish(StoreEventKind::FiltersChanged)
    }

    fn load_sequence(&self, sequence: FilterSequence) -> QuartermasterResult<()> {
        self.state.write_with(|state| {
            FieldCatalog::for_asset(state.asset_type)
                .validate_with(&sequence, self.config.unknown_operator_policy())?;
            log::debug!("Session {} loads filter {}", self.session_id, sequence);
            state.sequence = sequence;
            state.page = 0;
            Ok::<(), QuartermasterError>(())
        })?;
        self.publish(StoreEventKind::FiltersChanged)
    }

    fn clear_filters(&self) -> QuartermasterResult<()> {
        self.state.write_with(|state| {
            state.sequence.clear();
            state.page = 0;
        });
        log::debug!("Session {} clears its filters", self.session_id);
        self.publish(StoreEventKind::FiltersCleared)
    }

    fn set_asset_type(&self, asset_type: AssetType) -> QuartermasterResult<()> {
        let changed = self.state.write_with(|state| {
            if state.asset_type == asset_type {
                return false;
            }
            state.asset_type = asset_type;
            state.sequence.clear();
            state.page = 0;
            true
        });

        if !changed {
            return Ok(());
        }
        log::debug!("Session {} now browses {}", self.session_id, asset_type);
        self.publish(StoreEventKind::AssetTypeChanged)
    }

    fn set_active_character(&self, character_id: Option<&str>) -> QuartermasterResult<()> {
        if let Some(id) = character_id {
            if id.trim().is_empty() {
                log::error!("Character id cannot be blank");
                return Err(QuartermasterError::new(
                    "Character id cannot be blank",
                    ErrorKind::ValidationError,
                ));
            }
        }

        self.state.write_with(|state| {
            state.active_character = character_id.map(str::to_string);
        });
        log::debug!("Session {} active character is {:?}", self.session_id, character_id);
        self.publish(StoreEventKind::ActiveCharacterChanged)
    }

    fn set_page(&self, page: usize) -> QuartermasterResult<()> {
        self.state.write_with(|state| state.page = page);
        self.publish(StoreEventKind::PageChanged)
    }

    fn search(&self, assets: &AssetList) -> QuartermasterResult<Page<Record>> {
        let (sequence, asset_type, page) = self
            .state
            .read_with(|state| (state.sequence.clone(), state.asset_type, state.page));

        if assets.asset_type() != asset_type {
            log::error!(
                "Session {} browses {} but was given {} assets",
                self.session_id,
                asset_type,
                assets.asset_type()
            );
            return Err(QuartermasterError::new(
                &format!("Expected {} assets, found {}", asset_type, assets.asset_type()),
                ErrorKind::InvalidOperation,
            ));
        }

        assets.search(&sequence, page, &self.config)
    }

    fn publish(&self, kind: StoreEventKind) -> QuartermasterResult<()> {
        self.event_bus.publish(StoreEvent::new(kind, &self.session_id))
    }
}
