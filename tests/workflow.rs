use rangetable::catalog::*;
use rangetable::engine::Memory;
use rangetable::pipeline::*;
use rangetable::record::*;
use rangetable::save::SaveMode;
use rangetable::schema::*;
use std::sync::Arc;

fn declaration() -> (TableSchema, TableOptions) {
    let (schema, key) = Customer::schema().build().unwrap();
    let options = TableOptions::new(rangetable::REPLICAS, key).unwrap();
    (schema, options)
}

#[tokio::test]
async fn demo_workflow_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let sink = dir.path().join("save");
    let engine = Arc::new(Memory::default());
    let (schema, options) = declaration();
    let table = engine
        .ensure_fresh_table(rangetable::TABLE, schema, options)
        .await
        .unwrap();
    let report = insert_all(
        engine.clone(),
        &Customer::samples(),
        &table,
        OnRecordError::FailFast,
    )
    .await
    .unwrap();
    assert_eq!(report.inserted, 3);
    let set = scan_all(engine.as_ref(), &table, &Master::default())
        .await
        .unwrap();
    let mut customers = set.records::<Customer>().unwrap();
    customers.sort();
    let mut expected = Customer::samples();
    expected.sort();
    assert_eq!(customers, expected);
    set.save(&sink, SaveMode::ErrorIfExists).unwrap();
    let back = rangetable::save::load(&sink).unwrap();
    assert_eq!(back, set);
    let mut persisted = back.records::<Customer>().unwrap();
    persisted.sort();
    assert_eq!(persisted, expected);
    assert!(set.save(&sink, SaveMode::ErrorIfExists).is_err());
    set.save(&sink, SaveMode::Overwrite).unwrap();
    assert_eq!(rangetable::save::load(&sink).unwrap(), set);
}

#[tokio::test]
async fn rerun_starts_from_an_empty_table() {
    let engine = Arc::new(Memory::default());
    let (schema, options) = declaration();
    let table = engine
        .ensure_fresh_table(rangetable::TABLE, schema.clone(), options.clone())
        .await
        .unwrap();
    insert_all(
        engine.clone(),
        &Customer::samples(),
        &table,
        OnRecordError::FailFast,
    )
    .await
    .unwrap();
    let table = engine
        .ensure_fresh_table(rangetable::TABLE, schema, options)
        .await
        .unwrap();
    let set = scan_all(engine.as_ref(), &table, &Master::default())
        .await
        .unwrap();
    assert!(set.is_empty());
    let report = insert_all(
        engine.clone(),
        &Customer::samples(),
        &table,
        OnRecordError::FailFast,
    )
    .await
    .unwrap();
    assert_eq!(report.inserted, 3);
}

#[tokio::test]
async fn zero_records_persist_an_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(Memory::default());
    let (schema, options) = declaration();
    let table = engine
        .ensure_fresh_table(rangetable::TABLE, schema, options)
        .await
        .unwrap();
    let report = insert_all::<_, Customer>(engine.clone(), &[], &table, OnRecordError::FailFast)
        .await
        .unwrap();
    assert_eq!(report.inserted, 0);
    let set = scan_all(engine.as_ref(), &table, &Master::default())
        .await
        .unwrap();
    assert!(set.is_empty());
    let sink = dir.path().join("save");
    set.save(&sink, SaveMode::ErrorIfExists).unwrap();
    assert!(rangetable::save::load(&sink).unwrap().is_empty());
}

#[test]
fn duplicate_field_is_a_schema_error() {
    let built = SchemaBuilder::new()
        .field("name", Kind::String, false)
        .field("name", Kind::Int32, false)
        .key(["name"])
        .build();
    assert!(matches!(built, Err(rangetable::Error::Schema(_))));
}

#[tokio::test]
async fn split_table_keeps_rows_across_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(Memory::default());
    let (schema, options) = declaration();
    let options = options.split(&schema, vec![Value::from("i")]).unwrap();
    let table = engine
        .ensure_fresh_table("split_customers", schema, options)
        .await
        .unwrap();
    let report = Pool::with(engine.clone(), 2)
        .insert_all(&Customer::samples(), &table, OnRecordError::FailFast)
        .await
        .unwrap();
    assert_eq!(report.inserted, 3);
    let set = scan_all(engine.as_ref(), &table, &Master::new("localhost", 7051))
        .await
        .unwrap();
    assert_eq!(set.partitions().len(), 2);
    assert_eq!(set.partitions()[0].len(), 1);
    assert_eq!(set.partitions()[1].len(), 2);
    set.save(dir.path(), SaveMode::Overwrite).unwrap();
    assert_eq!(rangetable::save::load(dir.path()).unwrap(), set);
}
