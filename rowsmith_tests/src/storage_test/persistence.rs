use super::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[test]
fn tables_and_rows_survive_reopen() -> anyhow::Result<()> {
    let dir = temp_dir("reopen");
    let file = dir.join("data.json");

    {
        let mut db = MemDatabase::open(&file)?;
        db.execute(PEOPLE_DDL, &[])?;
        insert_person(&mut db, "Ann");
        db.execute(
            "CREATE TABLE [Ledger] ([At] datetime NOT NULL, [Amount] decimal(10,2) NOT NULL, [Blob] varbinary(8) NULL);",
            &[],
        )?;
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();
        db.execute(
            "INSERT INTO [Ledger] ([At], [Amount], [Blob]) VALUES (@p1, @p2, @p3);",
            &[
                param(1, TypedValue::DateTime(at)),
                param(2, TypedValue::Decimal(Decimal::new(1050, 2))),
                param(3, TypedValue::Binary(vec![1, 2, 3])),
            ],
        )?;
    }

    let mut db = MemDatabase::open(&file)?;
    assert_eq!(db.path(), Some(file.as_path()));
    assert_eq!(db.list_tables()?.len(), 2);
    let ledger = select(&mut db, "Ledger");
    assert_eq!(ledger.rows[0][1], Some(TypedValue::Decimal(Decimal::new(1050, 2))));
    assert_eq!(ledger.rows[0][2], Some(TypedValue::Binary(vec![1, 2, 3])));

    // Identity keeps counting after reopen.
    insert_person(&mut db, "Bo");
    assert_eq!(select(&mut db, "People").rows[1][0], Some(TypedValue::Int(2)));
    Ok(())
}

#[test]
fn data_file_is_plain_json() -> anyhow::Result<()> {
    let dir = temp_dir("json");
    let file = dir.join("data.json");
    let mut db = MemDatabase::open(&file)?;
    db.execute(PEOPLE_DDL, &[])?;

    let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    assert_eq!(doc["tables"][0]["name"], "People");
    assert_eq!(doc["tables"][0]["columns"][0]["is_identity"], true);
    Ok(())
}

#[test]
fn failed_statement_does_not_touch_the_file() -> anyhow::Result<()> {
    let dir = temp_dir("rollback");
    let file = dir.join("data.json");
    let mut db = MemDatabase::open(&file)?;
    db.execute(PEOPLE_DDL, &[])?;
    let before = std::fs::read_to_string(&file)?;

    assert!(db
        .execute("INSERT INTO [People] ([Email]) VALUES (@p1);", &[param(1, text("x"))])
        .is_err());

    assert_eq!(std::fs::read_to_string(&file)?, before);
    Ok(())
}

#[test]
fn missing_or_blank_file_is_empty_database() -> anyhow::Result<()> {
    let dir = temp_dir("blank");
    let mut fresh = MemDatabase::open(dir.join("absent.json"))?;
    assert!(fresh.list_tables()?.is_empty());

    let blank = dir.join("blank.json");
    std::fs::write(&blank, "  \n")?;
    let mut db = MemDatabase::open(&blank)?;
    assert!(db.list_tables()?.is_empty());
    Ok(())
}

#[test]
fn malformed_file_is_reported() {
    let dir = temp_dir("malformed");
    let file = dir.join("data.json");
    std::fs::write(&file, "{ not json").unwrap();

    let err = MemDatabase::open(&file).unwrap_err();
    assert!(matches!(err, StoreError::Malformed(_)), "{err}");
}

#[test]
fn failed_write_through_takes_back_the_change() -> anyhow::Result<()> {
    let dir = temp_dir("write_fail");
    let file = dir.join("data.json");
    let mut db = MemDatabase::open(&file)?;
    db.execute(PEOPLE_DDL, &[])?;
    insert_person(&mut db, "Ann");

    std::fs::remove_dir_all(&dir)?;

    let insert = "INSERT INTO [People] ([Name]) VALUES (@p1);";
    assert!(db.execute(insert, &[param(1, text("Bo"))]).is_err());
    assert_eq!(select(&mut db, "People").rows.len(), 1);
    assert!(db.execute("DROP TABLE [People];", &[]).is_err());
    assert_eq!(db.list_tables()?, vec!["People".to_string()]);
    assert!(db.execute("CREATE TABLE [Other] ([X] int NULL);", &[]).is_err());
    assert_eq!(db.list_tables()?.len(), 1);

    // The identity counter was rolled back with the row.
    std::fs::create_dir_all(&dir)?;
    insert_person(&mut db, "Cy");
    assert_eq!(select(&mut db, "People").rows[1][0], Some(TypedValue::Int(2)));
    Ok(())
}
