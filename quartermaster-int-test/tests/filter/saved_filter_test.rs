use quartermaster::errors::ErrorKind;
use quartermaster::filter::{field, Combinator, FilterOperator, FilterSequence};
use quartermaster::record::AssetType;
use quartermaster_int_test::test_util::{cleanup, create_test_context, names, run_test};
use serde_json::json;

const CORELLIAN_CREWED: &str = r#"[
    {"field": "model.manufacturer", "operator": "equals", "value": "corellian engineering corporation"},
    {"value": "AND"},
    {"field": "crewCapacity", "operator": "greater_than", "value": "5"}
]"#;

#[test]
fn test_saved_filter_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            let sequence: FilterSequence = serde_json::from_str(CORELLIAN_CREWED)?;
            assert!(sequence.is_well_formed());
            assert_eq!(sequence.condition_count(), 2);
            assert_eq!(sequence.combinators().collect::<Vec<_>>(), vec![Combinator::And]);
            assert_eq!(names(&ctx.ships().filter(&sequence)), vec!["Ghost", "Tantive IV"]);

            let saved = serde_json::to_value(&sequence)?;
            let expected: serde_json::Value = serde_json::from_str(CORELLIAN_CREWED)?;
            assert_eq!(saved, expected);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_built_filter_serializes_as_tokens() {
    run_test(
        create_test_context,
        |_ctx| {
            let sequence = field("quantity").gt(5).or(field("model.stackable").eq(true));
            assert_eq!(
                serde_json::to_value(&sequence)?,
                json!([
                    {"field": "quantity", "operator": "greater_than", "value": "5"},
                    {"value": "OR"},
                    {"field": "model.stackable", "operator": "equals", "value": "true"}
                ])
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_unknown_operator_survives_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            let json = r#"[{"field": "quantity", "operator": "between", "value": "1,5"}]"#;
            let sequence: FilterSequence = serde_json::from_str(json)?;
            let condition = sequence.condition(0).cloned().unwrap_or_else(|| field("quantity").eq(0));
            assert_eq!(condition.operator(), &FilterOperator::Unknown("between".to_string()));
            assert_eq!(ctx.items().filter(&sequence).len(), ctx.items().len());

            let saved = serde_json::to_string(&sequence)?;
            assert!(saved.contains("\"between\""));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_load_saved_filter_into_store() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let sequence: FilterSequence = serde_json::from_str(CORELLIAN_CREWED)?;

            // ship fields are not item fields
            let err = store.load_sequence(sequence.clone()).err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::ValidationError));

            store.set_asset_type(AssetType::Ship)?;
            store.load_sequence(sequence)?;
            let page = store.search(ctx.ships())?;
            assert_eq!(page.total_items, 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_store_keeps_saved_unknown_operator() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let json = r#"[{"field": "quantity", "operator": "between", "value": "1,5"}]"#;
            store.load_sequence(serde_json::from_str(json)?)?;

            let page = store.search(ctx.items())?;
            assert_eq!(page.total_items, ctx.items().len());
            let expected: serde_json::Value = serde_json::from_str(json)?;
            assert_eq!(serde_json::to_value(store.sequence())?, expected);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_malformed_saved_filter() {
    run_test(
        create_test_context,
        |_ctx| {
            let err = serde_json::from_str::<FilterSequence>(r#"[{"field": "quantity"}]"#);
            assert!(err.is_err());

            let err = serde_json::from_str::<FilterSequence>(r#"[{"value": "XOR"}]"#);
            assert!(err.is_err());
            Ok(())
        },
        cleanup,
    )
}
