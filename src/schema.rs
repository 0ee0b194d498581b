//! Explicit, versioned schema for the `things` table.
//! Migrations, the SQL repository and the validators all read names from here.

/// Column of a table as created by migrations.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub primary_key: bool,
    pub default: Option<&'static str>,
    /// Migration version that introduced the column.
    pub since: i64,
}

#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl ColumnDef {
    /// Column definition as used in CREATE TABLE / ADD COLUMN.
    pub fn ddl(&self) -> String {
        let mut def = format!("{} {}", self.name, self.sql_type);
        if self.primary_key {
            def.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(d) = self.default {
            def.push_str(" DEFAULT ");
            def.push_str(d);
        }
        def
    }
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns introduced by the given migration version.
    pub fn columns_since(&self, version: i64) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(move |c| c.since == version)
    }

    /// Comma-separated column list in declaration order, for SELECT / RETURNING.
    pub fn select_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub mod things {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";

    /// Name of the unique index guarding `name`.
    pub const NAME_UNIQUE_INDEX: &str = "index_things_on_name";
}

pub const THINGS: TableDef = TableDef {
    name: "things",
    columns: &[
        ColumnDef { name: things::ID, sql_type: "BIGSERIAL", nullable: false, primary_key: true, default: None, since: 1 },
        ColumnDef { name: things::NAME, sql_type: "TEXT", nullable: false, primary_key: false, default: None, since: 1 },
        ColumnDef { name: things::CREATED_AT, sql_type: "TIMESTAMPTZ", nullable: false, primary_key: false, default: Some("NOW()"), since: 1 },
        ColumnDef { name: things::UPDATED_AT, sql_type: "TIMESTAMPTZ", nullable: false, primary_key: false, default: Some("NOW()"), since: 1 },
        ColumnDef { name: things::DESCRIPTION, sql_type: "TEXT", nullable: true, primary_key: false, default: None, since: 2 },
    ],
};

/// Version the binary expects the database to be at. Equals the last migration's version.
pub const SCHEMA_VERSION: i64 = 3;
