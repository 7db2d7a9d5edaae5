use quartermaster::config::QuartermasterConfig;
use quartermaster::errors::ErrorKind;
use quartermaster::filter::{field, Combinator};
use quartermaster::record::AssetType;
use quartermaster::store::StoreEventKind;
use quartermaster_int_test::test_util::{
    cleanup, create_test_context, create_test_context_with, numbered_items, run_test, EventRecorder,
};

#[test]
fn test_building_a_filter_publishes_changes() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let recorder = EventRecorder::new();
            store.subscribe(recorder.listener())?;

            store.add_condition(field("quantity").gt(5), Combinator::And)?;
            store.add_condition(field("model.stackable").eq(true), Combinator::Or)?;
            store.set_combinator(0, Combinator::And)?;
            store.remove_condition(1)?;

            recorder.wait_for(4);
            assert_eq!(recorder.kinds(), vec![StoreEventKind::FiltersChanged; 4]);
            assert!(recorder
                .events()
                .iter()
                .all(|event| event.session_id() == store.session_id()));

            let timestamps: Vec<i64> = recorder.events().iter().map(|e| e.timestamp()).collect();
            assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filter_change_resets_page() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set_page(3)?;
            assert_eq!(store.page(), 3);

            store.add_condition(field("quantity").gt(1), Combinator::And)?;
            assert_eq!(store.page(), 0);

            store.set_page(1)?;
            store.update_condition(0, field("quantity").gt(2))?;
            assert_eq!(store.page(), 0);

            store.set_page(1)?;
            store.clear_filters()?;
            assert_eq!(store.page(), 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_switching_asset_type() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let recorder = EventRecorder::new();
            store.subscribe(recorder.listener())?;

            store.add_condition(field("model.type").eq("weapon"), Combinator::And)?;
            store.set_asset_type(AssetType::Vehicle)?;
            assert!(store.sequence().is_empty());

            let err = store.add_condition(field("model.type").eq("weapon"), Combinator::And).err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::InvalidFieldName));

            store.add_condition(field("model.manufacturer").eq("kuat drive yards"), Combinator::And)?;
            let page = store.search(ctx.vehicles())?;
            assert_eq!(page.total_items, 1);

            recorder.wait_for(3);
            assert_eq!(
                recorder.kinds(),
                vec![
                    StoreEventKind::FiltersChanged,
                    StoreEventKind::AssetTypeChanged,
                    StoreEventKind::FiltersChanged,
                ]
            );

            let err = store.search(ctx.items()).err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::InvalidOperation));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_paging_through_store() {
    run_test(
        || create_test_context_with(QuartermasterConfig::builder().page_size(5).build()?),
        |ctx| {
            let store = ctx.store();
            let items = numbered_items(25)?;
            store.add_condition(field("quantity").gte(12), Combinator::And)?;

            let first = store.search(&items)?;
            assert_eq!((first.len(), first.total_pages), (5, 3));

            store.set_page(2)?;
            let last = store.search(&items)?;
            assert_eq!(last.len(), 3);
            assert!(!last.has_next());

            store.set_page(3)?;
            assert!(store.search(&items)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_active_character_and_listeners() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let recorder = EventRecorder::new();
            let subscriber = store.subscribe(recorder.listener())?;
            assert!(store.has_listeners());

            store.set_active_character(Some("char-7"))?;
            assert_eq!(store.active_character().as_deref(), Some("char-7"));
            recorder.wait_for(1);
            assert_eq!(recorder.kinds(), vec![StoreEventKind::ActiveCharacterChanged]);

            store.unsubscribe(subscriber)?;
            assert!(!store.has_listeners());
            store.set_active_character(None)?;
            assert_eq!(recorder.len(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_clones_share_session() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let other = store.clone();
            other.set_asset_type(AssetType::Ship)?;
            other.add_condition(field("name").starts_with("t"), Combinator::And)?;

            assert_eq!(store.asset_type(), AssetType::Ship);
            assert_eq!(store.sequence(), other.sequence());
            assert_eq!(store.session_id(), other.session_id());
            assert_eq!(store.search(ctx.ships())?.total_items, 1);
            Ok(())
        },
        cleanup,
    )
}
