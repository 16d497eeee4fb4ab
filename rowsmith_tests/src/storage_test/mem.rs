use super::*;

#[test]
fn created_table_reports_column_metadata() {
    let mut db = people_db();

    assert_eq!(db.list_tables().unwrap(), vec!["People".to_string()]);
    assert_eq!(
        db.list_columns("people").unwrap(),
        vec![
            ColumnMetadata::new("Id", "int").identity(),
            ColumnMetadata::new("Name", "nvarchar(40)"),
            ColumnMetadata::new("Email", "nvarchar(80)").nullable(),
        ]
    );
}

#[test]
fn unknown_table_is_a_catalog_error() {
    let mut db = MemDatabase::in_memory();
    assert_eq!(
        db.list_columns("Nope"),
        Err(CatalogError::NoSuchTable {
            table: "Nope".to_string()
        })
    );
}

#[test]
fn identity_values_increase_per_row() {
    let mut db = people_db();
    assert_eq!(insert_person(&mut db, "Ann"), 1);
    insert_person(&mut db, "Bo");

    let rs = select(&mut db, "People");
    assert_eq!(rs.columns, vec!["Id", "Name", "Email"]);
    assert_eq!(rs.rows[0], vec![Some(TypedValue::Int(1)), Some(text("Ann")), None]);
    assert_eq!(rs.rows[1][0], Some(TypedValue::Int(2)));
}

#[test]
fn missing_non_null_value_is_rejected() {
    let mut db = people_db();
    let err = db
        .execute(
            "INSERT INTO [People] ([Email]) VALUES (@p1);",
            &[param(1, text("a@b.c"))],
        )
        .unwrap_err();
    assert!(err.message.contains("Cannot insert the value NULL into column 'Name'"), "{err}");
    assert!(select(&mut db, "People").rows.is_empty());
}

#[test]
fn explicit_identity_value_is_rejected() {
    let mut db = people_db();
    let err = db
        .execute(
            "INSERT INTO [People] ([Id], [Name]) VALUES (@p1, @p2);",
            &[param(1, TypedValue::Int(9)), param(2, text("Ann"))],
        )
        .unwrap_err();
    assert!(err.message.contains("identity column 'Id'"), "{err}");
}

#[test]
fn duplicate_primary_key_leaves_table_unchanged() {
    let mut db = MemDatabase::in_memory();
    db.execute("CREATE TABLE [Tag] ([Code] nvarchar(10) PRIMARY KEY NOT NULL);", &[])
        .unwrap();
    let insert = "INSERT INTO [Tag] ([Code]) VALUES (@p1);";
    db.execute(insert, &[param(1, text("red"))]).unwrap();

    let err = db.execute(insert, &[param(1, text("red"))]).unwrap_err();

    assert!(err.message.contains("Violation of PRIMARY KEY"), "{err}");
    assert_eq!(select(&mut db, "Tag").rows.len(), 1);
}

#[test]
fn value_of_wrong_type_is_a_type_clash() {
    let mut db = MemDatabase::in_memory();
    db.execute("CREATE TABLE [N] ([V] int NOT NULL);", &[]).unwrap();
    let err = db
        .execute("INSERT INTO [N] ([V]) VALUES (@p1);", &[param(1, text("7"))])
        .unwrap_err();
    assert!(err.message.starts_with("Operand type clash"), "{err}");
}

#[test]
fn undeclared_parameter_is_rejected() {
    let mut db = people_db();
    let err = db
        .execute("INSERT INTO [People] ([Name]) VALUES (@p1);", &[param(2, text("Ann"))])
        .unwrap_err();
    assert!(err.message.contains("@p1"), "{err}");
}

#[test]
fn literal_values_are_not_accepted() {
    let mut db = people_db();
    let err = db
        .execute("INSERT INTO [People] ([Name]) VALUES ('Ann');", &[])
        .unwrap_err();
    assert!(select(&mut db, "People").rows.is_empty(), "{err}");
}

#[test]
fn table_names_clash_case_insensitively() {
    let mut db = people_db();
    let err = db
        .execute("CREATE TABLE [PEOPLE] ([X] int NULL);", &[])
        .unwrap_err();
    assert!(err.message.contains("already an object named"), "{err}");
}

#[test]
fn identity_on_non_integer_column_is_rejected() {
    let mut db = MemDatabase::in_memory();
    let err = db
        .execute("CREATE TABLE [T] ([Id] decimal(5,0) PRIMARY KEY IDENTITY(1,1) NOT NULL);", &[])
        .unwrap_err();
    assert!(err.message.contains("integer data type"), "{err}");
    assert!(db.list_tables().unwrap().is_empty());
}

#[test]
fn drop_removes_table() {
    let mut db = people_db();
    db.execute("DROP TABLE [People];", &[]).unwrap();
    assert!(db.list_tables().unwrap().is_empty());

    let err = db.execute("DROP TABLE [People];", &[]).unwrap_err();
    assert!(err.message.contains("Invalid object name"), "{err}");
}

#[test]
fn bracketed_names_may_contain_closing_brackets() {
    let mut db = MemDatabase::in_memory();
    db.execute("CREATE TABLE [a]]b] ([c d] int NULL);", &[]).unwrap();
    assert_eq!(db.list_tables().unwrap(), vec!["a]b".to_string()]);
    assert_eq!(db.list_columns("a]b").unwrap()[0].name, "c d");
}

#[test]
fn narrow_integer_columns_reject_wide_values() {
    let mut db = MemDatabase::in_memory();
    db.execute("CREATE TABLE [S] ([v] smallint NOT NULL, [b] tinyint NULL);", &[])
        .unwrap();
    let insert = "INSERT INTO [S] ([v]) VALUES (@p1);";

    let err = db.execute(insert, &[param(1, TypedValue::Int(70000))]).unwrap_err();
    assert!(err.message.starts_with("Operand type clash"), "{err}");

    let err = db
        .execute(
            "INSERT INTO [S] ([v], [b]) VALUES (@p1, @p2);",
            &[param(1, TypedValue::Int(1)), param(2, TypedValue::Int(-5))],
        )
        .unwrap_err();
    assert!(err.message.starts_with("Operand type clash"), "{err}");

    db.execute(insert, &[param(1, TypedValue::Int(32767))]).unwrap();
    assert_eq!(select(&mut db, "S").rows.len(), 1);
}

#[test]
fn rows_come_back_ordered_with_nulls_first() {
    let mut db = people_db();
    for (name, email) in [("Cy", Some("c@x")), ("ann", None), ("Bo", Some("a@x"))] {
        let mut params = vec![param(1, text(name))];
        let sql = match email {
            Some(e) => {
                params.push(param(2, text(e)));
                "INSERT INTO [People] ([Name], [Email]) VALUES (@p1, @p2);"
            }
            None => "INSERT INTO [People] ([Name]) VALUES (@p1);",
        };
        db.execute(sql, &params).unwrap();
    }

    let sorted = |db: &mut MemDatabase, sql: &str| -> Vec<String> {
        match db.execute(sql, &[]).unwrap() {
            ExecOutcome::Rows(rs) => rs
                .rows
                .iter()
                .map(|r| match &r[1] {
                    Some(TypedValue::Text(s)) => s.clone(),
                    other => panic!("unexpected name cell {other:?}"),
                })
                .collect(),
            other => panic!("expected rows, got {other:?}"),
        }
    };

    assert_eq!(
        sorted(&mut db, "SELECT * FROM [People] ORDER BY [Name] ASC;"),
        vec!["ann", "Bo", "Cy"]
    );
    assert_eq!(
        sorted(&mut db, "SELECT * FROM [People] ORDER BY [Email] ASC;"),
        vec!["ann", "Bo", "Cy"]
    );
    assert_eq!(
        sorted(&mut db, "SELECT * FROM [People] ORDER BY [Id] DESC;"),
        vec!["Bo", "ann", "Cy"]
    );
}

#[test]
fn ordering_by_unknown_column_fails() {
    let mut db = people_db();
    let err = db
        .execute("SELECT * FROM [People] ORDER BY [Salary] ASC;", &[])
        .unwrap_err();
    assert!(err.message.contains("Invalid column name 'Salary'"), "{err}");
}
