use property_portfolio::sources::seed::seed_records;
use property_portfolio::{
    filter, filter_view, Category, FilterCriteria, Portfolio, PropertyRecord, Status, View,
};

fn collections() -> Vec<Vec<PropertyRecord>> {
    let seed = seed_records();

    let mut with_archived = seed_records();
    with_archived[0].status = Status::Archived;
    with_archived[4].status = Status::Archived;

    let mut reversed = seed_records();
    reversed.reverse();

    vec![Vec::new(), seed, with_archived, reversed]
}

fn criteria_grid() -> Vec<FilterCriteria> {
    let mut grid = Vec::new();
    for query in ["", "conakry", "DIXINN", "xyz-no-match"] {
        grid.push(FilterCriteria::default().with_query(query));
        for category in Category::ALL {
            grid.push(FilterCriteria::default().with_query(query).with_category(category));
            for status in Status::ALL {
                grid.push(
                    FilterCriteria::default()
                        .with_query(query)
                        .with_category(category)
                        .with_status(status),
                );
            }
        }
        for status in Status::ALL {
            grid.push(FilterCriteria::default().with_query(query).with_status(status));
        }
    }
    grid
}

fn position(records: &[PropertyRecord], record: &PropertyRecord) -> Option<usize> {
    records.iter().position(|r| std::ptr::eq(r, record))
}

#[test]
fn empty_criteria_returns_everything_in_order() {
    for records in collections() {
        let result = filter(&records, &FilterCriteria::default());
        let expected: Vec<&PropertyRecord> = records.iter().collect();
        assert_eq!(result, expected);
    }
}

#[test]
fn result_is_an_ordered_subset() {
    for records in collections() {
        for criteria in criteria_grid() {
            let result = filter(&records, &criteria);
            assert!(result.len() <= records.len());

            let positions: Vec<usize> = result
                .iter()
                .map(|r| position(&records, r).expect("result element comes from input"))
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "order broken for {:?}", criteria);
        }
    }
}

#[test]
fn predicates_compose_with_and() {
    for records in collections() {
        for criteria in criteria_grid() {
            let combined = filter(&records, &criteria);

            let by_query = filter(
                &records,
                &FilterCriteria::default().with_query(criteria.query.clone()),
            );
            let by_category = filter(
                &records,
                &FilterCriteria { category: criteria.category, ..Default::default() },
            );
            let by_status = filter(
                &records,
                &FilterCriteria { status: criteria.status, ..Default::default() },
            );

            let intersection: Vec<&PropertyRecord> = records
                .iter()
                .filter(|r| {
                    by_query.iter().any(|m| std::ptr::eq(*m, *r))
                        && by_category.iter().any(|m| std::ptr::eq(*m, *r))
                        && by_status.iter().any(|m| std::ptr::eq(*m, *r))
                })
                .collect();
            assert_eq!(combined, intersection, "mismatch for {:?}", criteria);
        }
    }
}

#[test]
fn query_ignores_case() {
    let records = seed_records();
    for (upper, lower) in [("VILLA", "villa"), ("ENTREPÔT", "entrepôt"), ("Conakry", "cONAKRY")] {
        assert_eq!(
            filter(&records, &FilterCriteria::default().with_query(upper)),
            filter(&records, &FilterCriteria::default().with_query(lower)),
        );
    }
}

#[test]
fn active_and_archived_views_partition() {
    for records in collections() {
        let criteria = FilterCriteria::default();
        let active = filter_view(&records, View::Active, &criteria);
        let archived = filter_view(&records, View::Archived, &criteria);

        assert_eq!(active.len() + archived.len(), records.len());
        for record in &records {
            let in_active = active.iter().any(|r| std::ptr::eq(*r, record));
            let in_archived = archived.iter().any(|r| std::ptr::eq(*r, record));
            assert!(in_active ^ in_archived);
        }
    }
}

#[test]
fn seed_scenarios() {
    let records = seed_records();
    let ids = |criteria: FilterCriteria| -> Vec<String> {
        filter(&records, &criteria).iter().map(|r| r.id.clone()).collect()
    };

    assert_eq!(ids(FilterCriteria::default().with_query("kaloum")), vec!["b-1001"]);
    assert_eq!(
        ids(FilterCriteria::default().with_category(Category::Warehouse)),
        vec!["b-1006"]
    );
    assert_eq!(
        ids(FilterCriteria::default().with_status(Status::Vacant)),
        vec!["b-1002", "b-1006"]
    );
    assert!(ids(FilterCriteria::default().with_query("xyz-no-match")).is_empty());
    assert_eq!(
        ids(FilterCriteria::default()),
        vec!["b-1001", "b-1002", "b-1003", "b-1004", "b-1005", "b-1006"]
    );
}

#[test]
fn filtering_leaves_input_untouched() {
    let records = seed_records();
    let criteria = FilterCriteria::default().with_query("dixinn").with_status(Status::Rented);
    let first = filter(&records, &criteria);
    let second = filter(&records, &criteria);
    assert_eq!(first, second);
    assert_eq!(records, seed_records());
}

#[test]
fn archiving_moves_between_views() {
    let mut portfolio = Portfolio::from_records(seed_records()).unwrap();
    let criteria = FilterCriteria::default().with_category(Category::House);

    assert_eq!(portfolio.view(View::Active, &criteria).len(), 1);
    portfolio.archive("b-1001").unwrap();
    assert!(portfolio.view(View::Active, &criteria).is_empty());
    assert_eq!(portfolio.view(View::Archived, &criteria)[0].id, "b-1001");

    portfolio.restore("b-1001").unwrap();
    let active = portfolio.view(View::Active, &criteria);
    assert_eq!(active[0].status, Status::Vacant);
}
