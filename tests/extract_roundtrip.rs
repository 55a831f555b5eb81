// End-to-end wrapper flow against a real engine library. Every test skips
// when no engine is installed; the binding contract itself is covered by
// the unit tests.
use dataextract::api::{
    Collation, ColumnType, Engine, ErrorKind, Extract, Interval, Row, TableDefinition, engine,
};
use time::PrimitiveDateTime;
use time::macros::{date, time};

fn engine_or_skip() -> Option<&'static Engine> {
    match engine::global() {
        Ok(engine) => Some(engine),
        Err(_) => {
            eprintln!("skipping: extract engine library unavailable");
            None
        }
    }
}

fn orders_definition() -> TableDefinition {
    let mut definition = TableDefinition::new().expect("definition");
    definition
        .set_default_collation(Collation::EnUsCi)
        .expect("default collation");
    definition
        .add_column("Order ID", ColumnType::Integer)
        .expect("column");
    definition
        .add_column("Product", ColumnType::UnicodeString)
        .expect("column");
    definition
        .add_column_with_collation("Produkt", ColumnType::UnicodeString, Collation::De)
        .expect("column");
    definition
        .add_column("Ordered At", ColumnType::DateTime)
        .expect("column");
    definition
        .add_column("Lead Time", ColumnType::Duration)
        .expect("column");
    definition
}

#[test]
fn create_insert_reopen_flow() {
    if engine_or_skip().is_none() {
        return;
    }
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("orders.extract");

    let mut definition = orders_definition();

    let mut extract = Extract::create(&path).expect("create");
    let mut table = extract.add_table("Orders", &definition).expect("add table");

    let mut row = Row::new(&definition).expect("row");
    row.set_long_integer(0, 42).expect("set id");
    row.set_string(1, "Widget").expect("set product");
    row.set_string(2, "Straße").expect("set produkt");
    row.set_date_time(3, PrimitiveDateTime::new(date!(2026 - 02 - 01), time!(12:00:00)))
        .expect("set ordered");
    row.set_duration(4, Interval::new(2, 12, 0, 0)).expect("set lead time");
    for _ in 0..10 {
        table.insert(&row).expect("insert");
    }

    row.close().expect("close row");
    table.close().expect("close table");
    definition.close().expect("close definition");
    extract.close().expect("close extract");

    let mut reopened = Extract::open(&path).expect("open");
    assert!(reopened.has_table("Orders").expect("has table"));
    assert!(!reopened.has_table("Returns").expect("has table"));

    let table = reopened.open_table("Orders").expect("open table");
    let definition = table.definition().expect("definition");
    assert_eq!(definition.column_count().expect("count"), 5);
    assert_eq!(definition.column_name(0).expect("name"), "Order ID");
    assert_eq!(
        definition.column_type(1).expect("type"),
        ColumnType::UnicodeString
    );
    assert_eq!(
        definition.column_collation(1).expect("collation"),
        Collation::EnUsCi
    );
    assert_eq!(
        definition.column_collation(2).expect("collation"),
        Collation::De
    );
}

#[test]
fn close_is_idempotent_and_late_calls_fail() {
    if engine_or_skip().is_none() {
        return;
    }
    let mut definition = orders_definition();
    definition.close().expect("first close");
    definition.close().expect("second close is a no-op");

    let err = definition
        .add_column("Late", ColumnType::Double)
        .expect_err("closed definition rejects columns");
    assert_eq!(err.kind(), ErrorKind::BadHandle);
}

#[test]
fn null_and_wrong_type_cells() {
    if engine_or_skip().is_none() {
        return;
    }
    let definition = orders_definition();
    let mut row = Row::new(&definition).expect("row");

    row.set_null(0).expect("null id");

    let err = row
        .set_double(1, 1.5)
        .expect_err("double into a string column");
    assert_eq!(err.kind(), ErrorKind::WrongType);
    assert_eq!(err.column(), Some(1));

    let err = row.set_integer(99, 7).expect_err("index out of range");
    assert_eq!(err.kind(), ErrorKind::BadIndex);
}

#[test]
fn create_refuses_existing_file() {
    if engine_or_skip().is_none() {
        return;
    }
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("dup.extract");

    let mut extract = Extract::create(&path).expect("create");
    extract.close().expect("close");

    let err = Extract::create(&path).expect_err("second create");
    assert_eq!(err.kind(), ErrorKind::FileExists);
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn open_missing_file_reports_not_found() {
    if engine_or_skip().is_none() {
        return;
    }
    let temp = tempfile::tempdir().expect("tempdir");
    let err = Extract::open(temp.path().join("absent.extract")).expect_err("open");
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}
