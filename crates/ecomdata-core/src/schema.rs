use serde::Serialize;

/// Storage type of a column, declared explicitly per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Exact integer (identifiers, counts).
    Integer,
    /// Floating-point number (currency columns).
    Real,
    /// Free text passed through unchanged.
    Text,
    /// Calendar date stored as `YYYY-MM-DD`.
    Date,
}

impl ColumnKind {
    /// SQL type name used when declaring the column.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text => "TEXT",
            ColumnKind::Date => "DATE",
        }
    }
}

/// Column definition preserving flat-file order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnDef {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Single-column foreign key reference.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

/// A table of the dataset together with its flat-file artifact.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableDef {
    pub name: &'static str,
    pub file_name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
}

impl TableDef {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Names of the tables this table references.
    pub fn parents(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.foreign_keys.iter().map(|fk| fk.references_table)
    }
}
