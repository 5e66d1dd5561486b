// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations used locally and in CI for the labourdesk
//! workspace.
//!
//! ### Migration Verification
//!
//! `cargo xtask verify-migrations` applies the embedded `SQLite` migrations
//! to an in-memory database, checks that the officer directory, sessions,
//! monthly returns, and audit trail tables carry their keys and indexes,
//! then reverts and re-applies the migrations to confirm `down.sql` undoes
//! `up.sql` exactly. No external services are required.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check if README.md is up-to-date
    #[command(visible_alias = "cr")]
    CheckReadme,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    // Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Verify that the `SQLite` migrations apply and revert cleanly
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::CheckReadme => check_readme(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::LintMarkdown => lint_markdown(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Run cargo-rdme to check if README.md is up-to-date with the library documentation
fn check_readme() -> Result<()> {
    run_cargo(vec!["rdme", "--workspace-project", "labourdesk", "--check"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs (and a soft fail on markdown)
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("known issue: markdownlint is currently noisy and can be ignored: {err}");
    }
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Lint markdown files using [markdownlint-cli2](https://github.com/DavidAnson/markdownlint-cli2)
fn lint_markdown() -> Result<()> {
    cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_with_trace()?;

    Ok(())
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Fix typos in the project
fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_with_trace()?;
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}


/// Tables the persistence layer expects, with the foreign keys each carries
/// as `(column, referenced table)`.
const EXPECTED_TABLES: &[(&str, &[(&str, &str)])] = &[
    ("audit_events", &[]),
    ("monthly_returns", &[("officer_id", "officers")]),
    ("officers", &[("superior_id", "officers")]),
    ("sessions", &[("officer_id", "officers")]),
];

/// Verify the `SQLite` migrations
///
/// ## What This Command Does
///
/// 1. Opens an in-memory `SQLite` database with foreign keys enabled
/// 2. Applies the embedded migrations from `crates/persistence/migrations`
/// 3. Introspects the resulting schema and checks the expected tables,
///    primary keys, and foreign keys are present
/// 4. Reverts every migration and checks no tables remain
/// 5. Re-applies the migrations and checks the schema is identical
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-migrations
/// ```
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Migrations applied successfully");

    let schema = introspect_sqlite_schema(&mut conn)?;
    check_expected_schema(&schema)?;

    tracing::info!("Reverting all migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;

    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        let leftover: Vec<&String> = reverted.tables.keys().collect();
        return Err(eyre!(
            "❌ Migration verification FAILED: tables left after revert: {leftover:?}"
        ));
    }

    tracing::info!("Re-applying migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;

    let reapplied = introspect_sqlite_schema(&mut conn)?;
    if reapplied != schema {
        return Err(eyre!(
            "❌ Migration verification FAILED: schema differs after revert and re-apply"
        ));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    name: String,
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Introspect `SQLite` schema
#[allow(clippy::too_many_lines)]
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    use diesel::RunQueryDsl;

    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Integer)]
        #[allow(dead_code)]
        cid: i32,
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        #[allow(dead_code)]
        unique: i32,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    // Get all tables
    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        // Get columns
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            let normalized_type = normalize_sqlite_type(&col.r#type);
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    name: col.name.clone(),
                    normalized_type,
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        // Get foreign keys
        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        // Get indexes and unique constraints
        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // If origin is 'u', it's a unique constraint (including sqlite_autoindex_*)
            if idx.origin == "u" {
                table_info.unique_constraints.insert(UniqueConstraint {
                    columns: column_names,
                });
            } else if !idx.name.starts_with("sqlite_autoindex_") {
                // Regular index (skip auto-generated indexes that aren't unique constraints)
                table_info.indexes.insert(Index {
                    name: idx.name,
                    columns: column_names,
                });
            }
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("TEXT")
        || normalized.contains("CHAR")
        || normalized.contains("CLOB")
    {
        "text".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else {
        "text".to_string() // Default for SQLite
    }
}


/// Check the introspected schema against [`EXPECTED_TABLES`]
fn check_expected_schema(schema: &Schema) -> Result<()> {
    let expected: BTreeSet<&str> = EXPECTED_TABLES.iter().map(|(name, _)| *name).collect();
    let actual: BTreeSet<&str> = schema.tables.keys().map(String::as_str).collect();

    if expected != actual {
        let mut errors = Vec::new();

        for table in expected.difference(&actual) {
            errors.push(format!("  - Table '{table}' is missing"));
        }

        for table in actual.difference(&expected) {
            errors.push(format!("  - Table '{table}' is not expected"));
        }

        return Err(eyre!(
            "❌ Migration verification FAILED: Table mismatch\n{}",
            errors.join("\n")
        ));
    }

    for (table_name, foreign_keys) in EXPECTED_TABLES {
        let table = &schema.tables[*table_name];

        if table.primary_keys.len() != 1 {
            return Err(eyre!(
                "❌ Migration verification FAILED: table '{}' should have a single-column primary key, found {:?}",
                table_name,
                table.primary_keys
            ));
        }

        for pk in &table.primary_keys {
            let nullable = table.columns.get(pk).is_none_or(|c| c.nullable);
            if nullable {
                return Err(eyre!(
                    "❌ Migration verification FAILED: primary key '{table_name}.{pk}' is nullable"
                ));
            }
        }

        for (from_column, to_table) in *foreign_keys {
            let present = table
                .foreign_keys
                .iter()
                .any(|fk| fk.from_column == *from_column && fk.to_table == *to_table);

            if !present {
                return Err(eyre!(
                    "❌ Migration verification FAILED: missing foreign key {table_name}.{from_column} -> {to_table}"
                ));
            }

            let indexed = table
                .indexes
                .iter()
                .any(|idx| idx.columns.first().is_some_and(|c| c == from_column));

            if !indexed {
                tracing::warn!(
                    "foreign key column {}.{} has no index",
                    table_name,
                    from_column
                );
            }
        }

        tracing::debug!(
            "table {}: {} columns, {} unique constraints, {} indexes",
            table_name,
            table.columns.len(),
            table.unique_constraints.len(),
            table.indexes.len()
        );
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
