// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::{PersistenceError, SqlitePersistence};
use labourdesk::Command;
use labourdesk_domain::Role;

use super::{TEST_PASSWORD, apply_and_persist, create_test_officer};

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    let mut db2: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    apply_and_persist(
        &mut db1,
        Command::CreateOfficer {
            officer: create_test_officer("comm", Role::Commissioner, None),
        },
        Some(TEST_PASSWORD),
    );

    assert_eq!(db1.count_officers().unwrap(), 1, "db1 should have 1 officer");
    assert_eq!(db2.count_officers().unwrap(), 0, "db2 should be isolated");
}

#[test]
fn test_file_database_survives_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "labourdesk_reopen_{}.db",
        std::process::id()
    ));

    {
        let mut persistence: SqlitePersistence =
            SqlitePersistence::new_with_file(&path).unwrap();
        apply_and_persist(
            &mut persistence,
            Command::CreateOfficer {
                officer: create_test_officer("comm", Role::Commissioner, None),
            },
            Some(TEST_PASSWORD),
        );
    }

    let mut reopened: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_officers().unwrap(), 1);
    drop(reopened);

    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
