use quartermaster::common::Value;
use quartermaster::filter::{
    field, Combinator, Condition, FilterOperator, FilterSequence, FilterToken, OperatorToken, UnknownOperatorPolicy,
};
use quartermaster::record;
use quartermaster_int_test::test_util::{cleanup, create_test_context, names, run_test};

#[test]
fn test_empty_sequence_matches_everything() {
    run_test(
        create_test_context,
        |ctx| {
            let all = FilterSequence::new();
            assert_eq!(ctx.items().filter(&all).len(), ctx.items().len());
            assert_eq!(ctx.ships().filter(&all).len(), 6);
            assert_eq!(ctx.vehicles().filter(&all).len(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_null_and_missing_fields_never_match() {
    run_test(
        create_test_context,
        |ctx| {
            // one item has no model, another a null name
            let matches = ctx.items().filter(&field("model.name").ne("anything").into());
            assert_eq!(matches.len(), 5);

            for operator in ["equals", "not_equals", "contains", "not_contains", "starts_with", "ends_with"] {
                let condition = Condition::new("model.name", FilterOperator::from_name(operator), "x");
                let null_name = &ctx.items().records()[6];
                assert!(!condition.evaluate(null_name), "{} matched a null name", operator);
                let no_model = &ctx.items().records()[5];
                assert!(!condition.evaluate(no_model), "{} matched a missing model", operator);
            }

            let mut record = record! { quantity: 4 };
            record.put("model.weight", Value::Null)?;
            assert!(!field("model.weight").ne(1).and(field("quantity").eq(4)).evaluate(&record));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_string_comparisons_ignore_case() {
    run_test(
        create_test_context,
        |ctx| {
            let items = ctx.items();
            assert_eq!(names(&items.filter(&field("model.name").eq("bacta PATCH").into())), vec!["Bacta Patch"]);
            assert_eq!(
                names(&items.filter(&field("model.name").contains("BLASTER").into())),
                vec!["DL-44 Heavy Blaster Pistol"]
            );
            assert_eq!(
                names(&items.filter(&field("model.name").starts_with("thermal").into())),
                vec!["Thermal Detonator"]
            );
            assert_eq!(names(&items.filter(&field("model.name").ends_with("PACK").into())), vec!["Ration Pack"]);
            assert_eq!(items.filter(&field("model.name").not_contains("blade").into()).len(), 4);

            let alice = record! { name: "ALICE" };
            assert!(field("name").eq("alice").evaluate(&alice));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_left_to_right_combination() {
    run_test(
        create_test_context,
        |ctx| {
            let falcon = &ctx.ships().records()[0];
            let c1 = field("name").eq("millennium falcon");
            let c2 = field("crewCapacity").gt(1000);
            let c3 = field("model.manufacturer").eq("Kuat Drive Yards");
            assert!(c1.evaluate(falcon));
            assert!(!c2.evaluate(falcon));
            assert!(!c3.evaluate(falcon));

            // (C1 OR C2) AND C3, not C1 OR (C2 AND C3)
            let sequence = c1.clone().or(c2.clone()).and(c3.clone());
            assert!(!sequence.evaluate(falcon));

            let sequence = c2.and(c3).or(c1);
            assert!(sequence.evaluate(falcon));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_numeric_comparisons() {
    run_test(
        create_test_context,
        |ctx| {
            let more_than_five = field("quantity").gt("5");
            assert!(more_than_five.evaluate(&record! { quantity: 10 }));
            assert!(!more_than_five.evaluate(&record! { quantity: 3 }));

            // quantities 2, 12, 6, 40, 1, 3, 8
            assert_eq!(ctx.items().filter(&more_than_five.into()).len(), 4);
            assert_eq!(ctx.items().filter(&field("quantity").gte(6).into()).len(), 4);
            assert_eq!(ctx.items().filter(&field("quantity").lt(3).into()).len(), 2);
            assert_eq!(ctx.items().filter(&field("quantity").lte(3).into()).len(), 3);
            assert_eq!(ctx.items().filter(&field("quantity").eq(" 12 ").into()).len(), 1);
            assert_eq!(ctx.items().filter(&field("quantity").ne(12).into()).len(), 6);
            assert_eq!(ctx.items().filter(&field("model.weight").lte(1).into()).len(), 4);

            // a literal that is not a number matches nothing
            assert!(ctx.items().filter(&field("quantity").gt("plenty").into()).is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_nested_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let kuat = field("model.manufacturer").eq("Kuat Drive Yards");
            assert_eq!(names(&ctx.ships().filter(&kuat.clone().into())), vec!["Devastator"]);
            assert_eq!(names(&ctx.vehicles().filter(&kuat.clone().into())), vec!["AT-AT"]);

            let wreck = &ctx.ships().records()[5];
            assert!(!kuat.evaluate(wreck));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_boolean_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let stackable = ctx.items().filter(&field("model.stackable").eq(true).into());
            assert_eq!(names(&stackable), vec!["Bacta Patch", "Thermal Detonator", "Ration Pack"]);

            let not_stackable = ctx.items().filter(&field("model.stackable").ne("true").into());
            assert_eq!(names(&not_stackable), vec!["DL-44 Heavy Blaster Pistol", "Vibroblade"]);

            // anything but the exact literal "true" means false
            let loose = ctx.items().filter(&field("model.stackable").eq("TRUE").into());
            assert_eq!(names(&loose), vec!["DL-44 Heavy Blaster Pistol", "Vibroblade"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_unknown_operator_policy() {
    run_test(
        create_test_context,
        |ctx| {
            let between: FilterSequence = Condition::new("quantity", FilterOperator::from_name("between"), "1").into();
            assert_eq!(ctx.items().filter(&between).len(), 7);
            assert!(ctx.items().filter_with(&between, UnknownOperatorPolicy::Reject).is_empty());

            // an operator without semantics for strings follows the same policy
            let greater: FilterSequence = field("model.name").gt("a").into();
            assert_eq!(ctx.items().filter(&greater).len(), 5);
            assert!(ctx.items().filter_with(&greater, UnknownOperatorPolicy::Reject).is_empty());

            // the whole model record is not a scalar
            let whole_model: FilterSequence = field("model").eq("x").into();
            assert_eq!(ctx.items().filter(&whole_model).len(), 6);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_malformed_sequences() {
    run_test(
        create_test_context,
        |ctx| {
            let cheap = field("quantity").lt(3);
            let trailing = FilterSequence::from_tokens(vec![
                FilterToken::Condition(cheap.clone()),
                FilterToken::Operator(OperatorToken::new(Combinator::Or)),
            ]);
            assert!(!trailing.is_well_formed());
            assert_eq!(ctx.items().filter(&trailing), ctx.items().filter(&cheap.clone().into()));

            let operator_first = FilterSequence::from_tokens(vec![
                FilterToken::Operator(OperatorToken::new(Combinator::And)),
                FilterToken::Operator(OperatorToken::new(Combinator::Or)),
                FilterToken::Condition(cheap.clone()),
            ]);
            // false OR cheap
            assert_eq!(ctx.items().filter(&operator_first).len(), 2);
            Ok(())
        },
        cleanup,
    )
}
