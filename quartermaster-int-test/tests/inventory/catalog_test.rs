use quartermaster::catalog::FieldCatalog;
use quartermaster::common::FieldKind;
use quartermaster::errors::ErrorKind;
use quartermaster::filter::{field, FilterOperator, FilterSequence};
use quartermaster::record::AssetType;
use quartermaster_int_test::test_util::{cleanup, create_test_context, names, run_test};

#[test]
fn test_every_asset_type_has_a_catalog() {
    run_test(
        create_test_context,
        |_ctx| {
            for asset_type in AssetType::all() {
                let catalog = FieldCatalog::for_asset(asset_type);
                assert_eq!(catalog.asset_type(), asset_type);
                assert!(!catalog.is_empty());
                for descriptor in catalog.fields() {
                    assert!(!descriptor.operators().is_empty());
                    assert!(!descriptor.label().is_empty());
                }
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_catalog_fields_resolve_in_fixtures() {
    run_test(
        create_test_context,
        |ctx| {
            for asset_type in AssetType::all() {
                let assets = ctx.assets(asset_type);
                let catalog = FieldCatalog::for_asset(asset_type);
                let first = &assets.records()[0];
                for descriptor in catalog.fields() {
                    let value = first.get(descriptor.path().as_str());
                    assert_eq!(
                        value.and_then(|v| v.kind()),
                        Some(descriptor.kind()),
                        "{} of {}",
                        descriptor.path(),
                        asset_type
                    );
                }
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_form_input_becomes_conditions() {
    run_test(
        create_test_context,
        |ctx| {
            let ships = FieldCatalog::for_asset(AssetType::Ship);
            let crewed = ships.condition("crewCapacity", "greater_than_or_equal", "46")?;
            let corellian = ships.condition("model.manufacturer", "contains", "corellian")?;
            let sequence: FilterSequence = crewed.and(corellian);
            ships.validate(&sequence)?;
            assert_eq!(names(&ctx.ships().filter(&sequence)), vec!["Tantive IV"]);

            let items = FieldCatalog::for_asset(AssetType::Item);
            assert_eq!(
                items.operators_for("model.stackable")?,
                &[FilterOperator::Equals, FilterOperator::NotEquals]
            );
            assert_eq!(items.descriptor("model.weight").map(|d| d.kind()), Some(FieldKind::Number));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_catalog_rejects_bad_input() {
    run_test(
        create_test_context,
        |_ctx| {
            let vehicles = FieldCatalog::for_asset(AssetType::Vehicle);

            let err = vehicles.condition("quantity", "equals", "1").err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::InvalidFieldName));

            let err = vehicles.condition("name", "less_than", "z").err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::FilterError));

            let err = vehicles.condition("crewCapacity", "like", "2").err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::FilterError));

            let err = vehicles.condition("cargoCapacity", "greater_than", "lots").err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::InvalidDataType));

            let sequence = field("name").eq("AT-AT").or(field("model.weight").gt(3));
            let err = vehicles.validate(&sequence).err();
            assert_eq!(err.as_ref().map(|e| e.kind().clone()), Some(ErrorKind::ValidationError));
            let cause = err.as_ref().and_then(|e| e.cause()).map(|c| c.kind().clone());
            assert_eq!(cause, Some(ErrorKind::InvalidFieldName));
            Ok(())
        },
        cleanup,
    )
}
