use quartermaster::config::QuartermasterConfig;
use quartermaster::errors::ErrorKind;
use quartermaster::filter::{field, FilterSequence, UnknownOperatorPolicy};
use quartermaster::inventory::Paginator;
use quartermaster_int_test::test_util::{cleanup, create_test_context, numbered_items, run_test};

#[test]
fn test_thirteen_matches_make_two_pages() {
    run_test(
        create_test_context,
        |_ctx| {
            let items = numbered_items(25)?;
            let sequence: FilterSequence = field("quantity").gte(12).into();
            assert_eq!(items.filter(&sequence).len(), 13);

            let config = QuartermasterConfig::default();
            let first = items.search(&sequence, 0, &config)?;
            assert_eq!(first.total_pages, 2);
            assert_eq!(first.len(), 10);
            assert!(first.has_next());

            let second = items.search(&sequence, 1, &config)?;
            assert_eq!(second.len(), 3);
            assert!(!second.has_next());
            let quantities: Vec<i64> = second
                .items
                .iter()
                .filter_map(|r| r.get("quantity").and_then(|v| v.as_i64()))
                .collect();
            assert_eq!(quantities, vec![22, 23, 24]);

            assert!(items.search(&sequence, 2, &config)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_configured_page_size() {
    run_test(
        create_test_context,
        |_ctx| {
            let items = numbered_items(25)?;
            let config = QuartermasterConfig::builder().page_size(4).build()?;
            let page = items.search(&FilterSequence::new(), 6, &config)?;
            assert_eq!(page.total_pages, 7);
            assert_eq!(page.len(), 1);
            assert!(page.has_previous());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_search_follows_configured_policy() {
    run_test(
        create_test_context,
        |ctx| {
            let sequence: FilterSequence = field("model.name").lt("m").into();
            let pass = QuartermasterConfig::default();
            let reject = QuartermasterConfig::builder()
                .unknown_operator_policy(UnknownOperatorPolicy::Reject)
                .build()?;

            assert_eq!(ctx.items().search(&sequence, 0, &pass)?.total_items, 5);
            assert_eq!(ctx.items().search(&sequence, 0, &reject)?.total_items, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_no_matches_means_no_pages() {
    run_test(
        create_test_context,
        |ctx| {
            let sequence: FilterSequence = field("quantity").gt(1000).into();
            let page = ctx.items().search(&sequence, 0, &QuartermasterConfig::default())?;
            assert_eq!(page.total_items, 0);
            assert_eq!(page.total_pages, 0);
            assert!(page.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_zero_page_size_is_invalid() {
    run_test(
        create_test_context,
        |_ctx| {
            let err = Paginator::new(0).err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::ValidationError));

            let err = QuartermasterConfig::builder().page_size(0).build().err();
            assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::ValidationError));
            Ok(())
        },
        cleanup,
    )
}
