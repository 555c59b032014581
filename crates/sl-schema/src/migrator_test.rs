use super::*;
use sl_core::RELEASE_SQL_FILE;
use sl_db::{DuckDbBackend, DuckDbConfigStore};
use std::fs;
use tempfile::TempDir;

const V1_0_SQL: &str = "-- initial schema\n\n\
CREATE TABLE configuration_item (\n\
    config_key VARCHAR PRIMARY KEY,\n\
    config_value VARCHAR\n\
);\n\n\
CREATE TABLE customer (\n\
    customer_id INTEGER PRIMARY KEY,\n\
    name VARCHAR NOT NULL\n\
);\n";

const V1_1_SQL: &str = "ALTER TABLE customer ADD COLUMN email VARCHAR;\n";

fn write_release(dir: &TempDir, version: &str, sql: Option<&str>) {
    let vdir = dir.path().join(version);
    fs::create_dir(&vdir).unwrap();
    if let Some(sql) = sql {
        fs::write(vdir.join(RELEASE_SQL_FILE), sql).unwrap();
    }
}

fn setup(releases: &[(&str, Option<&str>)]) -> (TempDir, Migrator, Arc<DuckDbBackend>) {
    let dir = TempDir::new().unwrap();
    for (version, sql) in releases {
        write_release(&dir, version, *sql);
    }
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());
    let store = Arc::new(DuckDbConfigStore::from_backend(&backend).unwrap());
    let catalog = ReleaseCatalog::new(dir.path());
    let migrator = Migrator::new(catalog, store, backend.clone());
    (dir, migrator, backend)
}

#[test]
fn test_current_version_on_empty_database_is_none() {
    let (_dir, migrator, _db) = setup(&[]);
    assert_eq!(migrator.current_version().unwrap(), None);
}

#[test]
fn test_current_version_with_unknown_tables_is_inconsistent() {
    let (_dir, migrator, db) = setup(&[]);
    db.execute("CREATE TABLE rogue (id INTEGER)").unwrap();

    let err = migrator.current_version().unwrap_err();
    assert!(matches!(err, SchemaError::Inconsistent(_)));
    assert!(err.to_string().contains("unknown tables"));
}

#[test]
fn test_current_version_without_marker_is_inconsistent() {
    let (_dir, migrator, db) = setup(&[]);
    db.execute("CREATE TABLE configuration_item (config_key VARCHAR, config_value VARCHAR)")
        .unwrap();

    let err = migrator.current_version().unwrap_err();
    assert!(matches!(err, SchemaError::Inconsistent(_)));
    assert!(err.to_string().contains("Unable to determine"));
}

#[test]
fn test_upgrade_to_latest_from_empty_database() {
    let (_dir, mut migrator, db) = setup(&[("1.0", Some(V1_0_SQL)), ("1.1", Some(V1_1_SQL))]);

    migrator.upgrade_to_latest().unwrap();

    assert_eq!(
        migrator.current_version().unwrap(),
        Some(SchemaVersion::new("1.1"))
    );
    // both release files fully applied: 1.1 added the email column
    let inserted = db
        .execute("INSERT INTO customer VALUES (1, 'Ada', 'ada@example.com')")
        .unwrap();
    assert_eq!(inserted, 1);
}

#[test]
fn test_upgrade_to_latest_twice_is_noop() {
    let (_dir, mut migrator, _db) = setup(&[("1.0", Some(V1_0_SQL)), ("1.1", Some(V1_1_SQL))]);

    migrator.upgrade_to_latest().unwrap();
    migrator.upgrade_to_latest().unwrap();

    assert_eq!(
        migrator.current_version().unwrap(),
        Some(SchemaVersion::new("1.1"))
    );
}

#[test]
fn test_upgrade_to_latest_with_empty_catalog_is_noop() {
    let (_dir, mut migrator, _db) = setup(&[]);
    migrator.upgrade_to_latest().unwrap();
    assert_eq!(migrator.current_version().unwrap(), None);
}

#[test]
fn test_upgrade_stops_at_target_version() {
    let (_dir, mut migrator, db) = setup(&[
        ("1.0", Some(V1_0_SQL)),
        ("1.1", Some(V1_1_SQL)),
        ("2.0", Some("CREATE TABLE v2_table (id INTEGER);\n")),
    ]);

    migrator
        .upgrade_to_version(&SchemaVersion::new("1.1"))
        .unwrap();

    assert_eq!(
        migrator.current_version().unwrap(),
        Some(SchemaVersion::new("1.1"))
    );
    assert!(!db.tables_exist(&["v2_table"]).unwrap());
}

#[test]
fn test_upgrade_to_unknown_version_is_invalid() {
    let (_dir, mut migrator, _db) = setup(&[("1.0", Some(V1_0_SQL))]);

    let err = migrator
        .upgrade_to_version(&SchemaVersion::new("9.9"))
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidTargetVersion { .. }));
    // no writes happened
    assert_eq!(migrator.current_version().unwrap(), None);
}

#[test]
fn test_upgrade_to_current_or_older_version_is_invalid() {
    let (_dir, mut migrator, _db) = setup(&[("1.0", Some(V1_0_SQL)), ("1.1", Some(V1_1_SQL))]);
    migrator.upgrade_to_latest().unwrap();

    for version in ["1.1", "1.0"] {
        let err = migrator
            .upgrade_to_version(&SchemaVersion::new(version))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTargetVersion { .. }));
    }
    assert_eq!(
        migrator.current_version().unwrap(),
        Some(SchemaVersion::new("1.1"))
    );
}

#[test]
fn test_failed_release_leaves_marker_untouched() {
    let (dir, mut migrator, db) = setup(&[("1.0", Some(V1_0_SQL))]);
    migrator.upgrade_to_latest().unwrap();

    write_release(
        &dir,
        "1.1",
        Some("CREATE TABLE before_failure (id INTEGER);\nCREATE TABEL broken (id INTEGER);\n"),
    );

    let err = migrator.upgrade_to_latest().unwrap_err();
    match err {
        SchemaError::Apply { line, .. } => assert_eq!(line, 2),
        other => panic!("expected Apply error, got {other:?}"),
    }

    // statements before the failing one stay applied, the marker does not move
    assert!(db.tables_exist(&["before_failure"]).unwrap());
    assert_eq!(
        migrator.current_version().unwrap(),
        Some(SchemaVersion::new("1.0"))
    );
}

#[test]
fn test_release_without_sql_file_advances_marker() {
    let (_dir, mut migrator, _db) = setup(&[("1.0", Some(V1_0_SQL)), ("1.1", None)]);

    migrator.upgrade_to_latest().unwrap();

    assert_eq!(
        migrator.current_version().unwrap(),
        Some(SchemaVersion::new("1.1"))
    );
}

#[test]
fn test_schema_versions_delegates_to_catalog() {
    let (_dir, migrator, _db) = setup(&[("2.0", None), ("1.0", None), ("10.0", None)]);

    let all = migrator.schema_versions(None);
    let names: Vec<&str> = all.iter().map(|v| v.as_str()).collect();
    assert_eq!(names, vec!["1.0", "2.0", "10.0"]);

    let since = SchemaVersion::new("2.0");
    let newer = migrator.schema_versions(Some(&since));
    assert_eq!(newer.len(), 1);
    assert_eq!(newer[0], "10.0");
}

#[test]
fn test_empty_all_tables_clears_rows_keeps_tables() {
    let (_dir, mut migrator, db) = setup(&[("1.0", Some(V1_0_SQL))]);
    migrator.upgrade_to_latest().unwrap();
    db.execute("INSERT INTO customer VALUES (1, 'Ada')").unwrap();

    migrator.empty_all_tables().unwrap();

    let deleted = db.execute("DELETE FROM customer").unwrap();
    assert_eq!(deleted, 0);
    assert!(db.tables_exist(&["customer", "configuration_item"]).unwrap());
}
