use parking_lot::Mutex;
use quartermaster::config::QuartermasterConfig;
use quartermaster::errors::QuartermasterResult;
use quartermaster::inventory::AssetList;
use quartermaster::record::{AssetType, Record};
use quartermaster::store::{FilterStore, StoreEvent, StoreEventKind, StoreEventListener};
use std::sync::Arc;
use std::time::Duration;

const ITEMS_JSON: &str = r#"[
    {"quantity": 2, "model": {"name": "DL-44 Heavy Blaster Pistol", "type": "Weapon", "weight": 1.5, "stackable": false}},
    {"quantity": 12, "model": {"name": "Bacta Patch", "type": "Medical", "weight": 0.1, "stackable": true}},
    {"quantity": 6, "model": {"name": "Thermal Detonator", "type": "Explosive", "weight": 0.5, "stackable": true}},
    {"quantity": 40, "model": {"name": "Ration Pack", "type": "Food", "weight": 0.3, "stackable": true}},
    {"quantity": 1, "model": {"name": "Vibroblade", "type": "Weapon", "weight": 1.0, "stackable": false}},
    {"quantity": 3},
    {"quantity": 8, "model": {"name": null, "type": "Tool"}}
]"#;

const SHIPS_JSON: &str = r#"[
    {"name": "Millennium Falcon", "crewCapacity": 4, "cargoCapacity": 100, "passengerCapacity": 6,
     "model": {"name": "YT-1300 Light Freighter", "manufacturer": "Corellian Engineering Corporation"}},
    {"name": "Ghost", "crewCapacity": 6, "cargoCapacity": 70, "passengerCapacity": 8,
     "model": {"name": "VCX-100 Light Freighter", "manufacturer": "Corellian Engineering Corporation"}},
    {"name": "Tantive IV", "crewCapacity": 46, "cargoCapacity": 3000, "passengerCapacity": 600,
     "model": {"name": "CR90 Corvette", "manufacturer": "Corellian Engineering Corporation"}},
    {"name": "Devastator", "crewCapacity": 37085, "cargoCapacity": 36000, "passengerCapacity": 9700,
     "model": {"name": "Imperial I-class Star Destroyer", "manufacturer": "Kuat Drive Yards"}},
    {"name": "Home One", "crewCapacity": 5402, "cargoCapacity": 20000, "passengerCapacity": 1200,
     "model": {"name": "MC80 Star Cruiser", "manufacturer": "Mon Calamari Shipyards"}},
    {"name": "Unnamed Wreck"}
]"#;

const VEHICLES_JSON: &str = r#"[
    {"name": "AT-AT", "crewCapacity": 5, "cargoCapacity": 1000, "passengerCapacity": 40,
     "model": {"name": "All Terrain Armored Transport", "manufacturer": "Kuat Drive Yards"}},
    {"name": "74-Z Speeder Bike", "crewCapacity": 1, "cargoCapacity": 3, "passengerCapacity": 0,
     "model": {"name": "74-Z Speeder Bike", "manufacturer": "Aratech Repulsor Company"}},
    {"name": "T-47 Airspeeder", "crewCapacity": 2, "cargoCapacity": 10, "passengerCapacity": 0,
     "model": {"name": "T-47 Airspeeder", "manufacturer": "Incom Corporation"}}
]"#;

/// Runs `test` between `before` and `after`. `after` runs even when the test
/// fails, and a failure in any phase fails the test.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> QuartermasterResult<()>,
    B: Fn() -> QuartermasterResult<TestContext>,
    A: Fn(TestContext) -> QuartermasterResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test(ctx.clone())));
    let after_result = after(ctx);

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic) => std::panic::resume_unwind(panic),
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    store: FilterStore,
    items: AssetList,
    ships: AssetList,
    vehicles: AssetList,
}

impl TestContext {
    pub fn store(&self) -> FilterStore {
        self.store.clone()
    }

    pub fn items(&self) -> &AssetList {
        &self.items
    }

    pub fn ships(&self) -> &AssetList {
        &self.ships
    }

    pub fn vehicles(&self) -> &AssetList {
        &self.vehicles
    }

    pub fn assets(&self, asset_type: AssetType) -> &AssetList {
        match asset_type {
            AssetType::Item => &self.items,
            AssetType::Ship => &self.ships,
            AssetType::Vehicle => &self.vehicles,
        }
    }
}

pub fn create_test_context() -> QuartermasterResult<TestContext> {
    create_test_context_with(QuartermasterConfig::default())
}

pub fn create_test_context_with(config: QuartermasterConfig) -> QuartermasterResult<TestContext> {
    Ok(TestContext {
        store: FilterStore::new(config),
        items: test_items()?,
        ships: test_ships()?,
        vehicles: test_vehicles()?,
    })
}

pub fn cleanup(ctx: TestContext) -> QuartermasterResult<()> {
    ctx.store.close()
}

/// Seven items; the sixth has no `model` and the seventh a `null` name.
pub fn test_items() -> QuartermasterResult<AssetList> {
    AssetList::from_json(AssetType::Item, ITEMS_JSON)
}

/// Six ships; the last has no `model`.
pub fn test_ships() -> QuartermasterResult<AssetList> {
    AssetList::from_json(AssetType::Ship, SHIPS_JSON)
}

pub fn test_vehicles() -> QuartermasterResult<AssetList> {
    AssetList::from_json(AssetType::Vehicle, VEHICLES_JSON)
}

/// `count` items with quantities `0..count` named `Crate <n>`.
pub fn numbered_items(count: usize) -> QuartermasterResult<AssetList> {
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let mut record = Record::new();
        record.put("quantity", i)?;
        record.put("model.name", format!("Crate {}", i))?;
        records.push(record);
    }
    Ok(AssetList::new(AssetType::Item, records))
}

/// Names of the matched records, read from `name` or `model.name`.
pub fn names(records: &[&Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get("name").or_else(|| r.get("model.name")))
        .filter_map(|v| v.as_string().cloned())
        .collect()
}

/// Collects store events for assertions.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> StoreEventListener {
        let events = self.events.clone();
        StoreEventListener::new(move |event: StoreEvent| {
            events.lock().push(event);
            Ok(())
        })
    }

    pub fn kinds(&self) -> Vec<StoreEventKind> {
        self.events.lock().iter().map(|e| e.kind()).collect()
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn wait_for(&self, count: usize) {
        awaitility::at_most(Duration::from_secs(2)).until(|| self.len() >= count);
    }
}
