use super::*;

#[test]
fn partition_skips_identity_and_splits_on_nullability() {
    let p = partition(&employee_columns());
    let required: Vec<&str> = p.required.iter().map(|c| c.name.as_str()).collect();
    let optional: Vec<&str> = p.optional.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(required, vec!["Name"]);
    assert_eq!(optional, vec!["Nickname"]);
}

#[test]
fn employee_plan_excludes_identity() {
    let plan = build_plan(
        "Employee",
        &employee_columns(),
        &names(&["Nickname"]),
        &values(&[("Name", "Ann"), ("Nickname", "Annie")]),
        UnknownTypePolicy::PassThrough,
    )
    .unwrap();

    assert_eq!(plan.table(), "Employee");
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.get("Name"), Some(&TypedValue::Text("Ann".to_string())));
    assert_eq!(plan.get("Nickname"), Some(&TypedValue::Text("Annie".to_string())));
    assert_eq!(plan.get("Id"), None);
}

#[test]
fn unselected_optional_column_is_left_out() {
    let plan = build_plan(
        "Employee",
        &employee_columns(),
        &[],
        &values(&[("Name", "Ann")]),
        UnknownTypePolicy::PassThrough,
    )
    .unwrap();
    let cols: Vec<&str> = plan.entries().iter().map(|e| e.column.as_str()).collect();
    assert_eq!(cols, vec!["Name"]);
}

#[test]
fn missing_required_value_fails() {
    let err = build_plan(
        "Employee",
        &employee_columns(),
        &[],
        &[],
        UnknownTypePolicy::PassThrough,
    )
    .unwrap_err();
    assert_eq!(
        err,
        InsertError::MissingValue {
            table: "Employee".to_string(),
            column: "Name".to_string()
        }
    );
}

#[test]
fn value_for_identity_column_is_rejected() {
    let err = build_plan(
        "Employee",
        &employee_columns(),
        &[],
        &values(&[("Id", "5"), ("Name", "Ann")]),
        UnknownTypePolicy::PassThrough,
    )
    .unwrap_err();
    assert!(matches!(err, InsertError::UnknownColumn { ref column, .. } if column == "Id"));
}

#[test]
fn repeated_value_for_a_column_is_rejected() {
    let err = build_plan(
        "Employee",
        &employee_columns(),
        &[],
        &values(&[("Name", "a"), ("Name", "b")]),
        UnknownTypePolicy::PassThrough,
    )
    .unwrap_err();
    assert_eq!(
        err,
        InsertError::DuplicateValue {
            table: "Employee".to_string(),
            column: "Name".to_string()
        }
    );
}

#[test]
fn selecting_a_required_or_unknown_column_is_rejected() {
    for bogus in ["Name", "Salary", "Id"] {
        let err = build_plan(
            "Employee",
            &employee_columns(),
            &names(&[bogus]),
            &values(&[("Name", "Ann")]),
            UnknownTypePolicy::PassThrough,
        )
        .unwrap_err();
        assert!(matches!(err, InsertError::UnknownColumn { .. }), "{bogus}: {err}");
    }
}

#[test]
fn identity_only_table_has_nothing_to_plan() {
    let columns = vec![ColumnMetadata::new("Id", "int").identity()];
    let err = build_plan("Counter", &columns, &[], &[], UnknownTypePolicy::PassThrough).unwrap_err();
    assert_eq!(
        err,
        InsertError::EmptyPlan {
            table: "Counter".to_string()
        }
    );
}

#[test]
fn bad_value_fails_the_whole_plan() {
    let columns = vec![
        ColumnMetadata::new("Name", "nvarchar(50)"),
        ColumnMetadata::new("Age", "int"),
    ];
    let err = build_plan(
        "Person",
        &columns,
        &[],
        &values(&[("Name", "Ann"), ("Age", "thirty")]),
        UnknownTypePolicy::PassThrough,
    )
    .unwrap_err();
    let InsertError::ValueCoercion { table, source } = err else {
        panic!("expected a coercion failure, got {err:?}");
    };
    assert_eq!(table, "Person");
    assert_eq!(source.column, "Age");
    assert_eq!(source.raw, "thirty");
}

#[test]
fn statement_binds_every_value_as_a_parameter() {
    let plan = build_plan(
        "Employee",
        &employee_columns(),
        &names(&["Nickname"]),
        &values(&[("Nickname", "x'); DROP TABLE [Employee]; --"), ("Name", "Ann")]),
        UnknownTypePolicy::PassThrough,
    )
    .unwrap();
    let stmt = plan.statement();

    assert_eq!(
        stmt.sql,
        "INSERT INTO [Employee] ([Name], [Nickname]) VALUES (@p1, @p2);"
    );
    assert!(!stmt.sql.contains("DROP"));
    let bound: Vec<(&str, &TypedValue)> = stmt.params.iter().map(|p| (p.name.as_str(), &p.value)).collect();
    assert_eq!(bound[0], ("@p1", &TypedValue::Text("Ann".to_string())));
    assert_eq!(bound[1].0, "@p2");
}

#[test]
fn schema_failures_are_reported_per_table() {
    let mut broken = BrokenCatalog(CatalogError::Introspection {
        reason: "timeout".to_string(),
    });
    assert_eq!(
        fetch_columns(&mut broken, "Employee"),
        Err(InsertError::SchemaFetch {
            table: "Employee".to_string(),
            reason: "timeout".to_string()
        })
    );

    let mut missing = BrokenCatalog(CatalogError::NoSuchTable {
        table: "Ghost".to_string(),
    });
    assert!(matches!(
        fetch_columns(&mut missing, "Ghost"),
        Err(InsertError::NoSuchTable { .. })
    ));
}

#[test]
fn empty_column_list_means_no_such_table() {
    let mut db = RecordingDb::default();
    assert_eq!(
        fetch_columns(&mut db, "T"),
        Err(InsertError::NoSuchTable {
            table: "T".to_string()
        })
    );
}
