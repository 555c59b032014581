use super::*;
use sl_db::{Database, DuckDbBackend, DuckDbConfigStore};

fn store_with_table() -> (DuckDbBackend, DuckDbConfigStore) {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute(
        "CREATE TABLE configuration_item (config_key VARCHAR PRIMARY KEY, config_value VARCHAR)",
    )
    .unwrap();
    let store = DuckDbConfigStore::from_backend(&db).unwrap();
    (db, store)
}

#[test]
fn test_read_absent_marker() {
    let (_db, store) = store_with_table();
    assert_eq!(read_version_marker(&store).unwrap(), None);
}

#[test]
fn test_write_then_read_marker() {
    let (_db, store) = store_with_table();
    let version = sl_core::SchemaVersion::new("1.2");
    write_version_marker(&store, &version).unwrap();
    assert_eq!(read_version_marker(&store).unwrap(), Some(version));
}

#[test]
fn test_write_updates_existing_marker() {
    let (db, store) = store_with_table();
    write_version_marker(&store, &sl_core::SchemaVersion::new("1.0")).unwrap();
    write_version_marker(&store, &sl_core::SchemaVersion::new("1.1")).unwrap();

    assert_eq!(
        read_version_marker(&store).unwrap(),
        Some(sl_core::SchemaVersion::new("1.1"))
    );

    // still exactly one marker row
    let deleted = db.execute("DELETE FROM configuration_item").unwrap();
    assert_eq!(deleted, 1);
}

#[test]
fn test_empty_value_reads_as_none() {
    let (db, store) = store_with_table();
    db.execute("INSERT INTO configuration_item VALUES ('schema_version', '')")
        .unwrap();
    assert_eq!(read_version_marker(&store).unwrap(), None);
}

#[test]
fn test_null_value_reads_as_none() {
    let (db, store) = store_with_table();
    db.execute("INSERT INTO configuration_item VALUES ('schema_version', NULL)")
        .unwrap();
    assert_eq!(read_version_marker(&store).unwrap(), None);
}

#[test]
fn test_unparseable_value_reads_as_none() {
    let (db, store) = store_with_table();
    db.execute("INSERT INTO configuration_item VALUES ('schema_version', 'garbage')")
        .unwrap();
    assert_eq!(read_version_marker(&store).unwrap(), None);
}
