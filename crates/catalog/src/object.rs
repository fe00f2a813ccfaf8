// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use quarry_core::error::diagnostic::catalog::{
    column_already_exists, column_not_found, not_a_table,
};
use quarry_core::{Type, return_error};
use serde::{Deserialize, Serialize};

/// Kind-specific payload of a catalog object. The catalog itself never
/// interprets payloads beyond applying [`Alteration`]s; binders and planners
/// consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogObject {
    Table(TableDef),
    View(ViewDef),
    Function(FunctionDef),
    SumType(SumTypeDef),
}

impl CatalogObject {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogObject::Table(_) => "table",
            CatalogObject::View(_) => "view",
            CatalogObject::Function(_) => "function",
            CatalogObject::SumType(_) => "sumtype",
        }
    }

    /// Applies `alteration` to a copy of this payload, leaving `self`
    /// untouched. The caller links the result as a new chain head.
    pub fn apply(&self, entry: &str, alteration: &Alteration) -> crate::Result<CatalogObject> {
        let CatalogObject::Table(table) = self else {
            return_error!(not_a_table(entry));
        };
        let mut table = table.clone();
        match alteration {
            Alteration::AddColumn(column) => {
                if table.columns.iter().any(|c| c.name == column.name) {
                    return_error!(column_already_exists(entry, &column.name));
                }
                table.columns.push(column.clone());
            }
            Alteration::DropColumn(name) => {
                let Some(position) = table.columns.iter().position(|c| &c.name == name) else {
                    return_error!(column_not_found(entry, name));
                };
                table.columns.remove(position);
            }
            Alteration::RenameColumn { from, to } => {
                if table.columns.iter().any(|c| &c.name == to) {
                    return_error!(column_already_exists(entry, to));
                }
                let Some(column) = table.columns.iter_mut().find(|c| &c.name == from) else {
                    return_error!(column_not_found(entry, from));
                };
                column.name = to.clone();
            }
        }
        Ok(CatalogObject::Table(table))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDef {
    pub query: String,
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub arg_types: Vec<Type>,
    pub return_type: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumTypeDef {
    pub variants: Vec<String>,
}

/// Description of an AlterEntry, applied to a copy of the current payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Alteration {
    AddColumn(ColumnDef),
    DropColumn(String),
    RenameColumn { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CatalogObject {
        CatalogObject::Table(TableDef {
            columns: vec![ColumnDef::new("id", Type::Int8), ColumnDef::new("name", Type::Utf8)],
        })
    }

    #[test]
    fn test_add_column() {
        let altered = table()
            .apply("t", &Alteration::AddColumn(ColumnDef::new("age", Type::Int4)))
            .unwrap();
        let CatalogObject::Table(def) = altered else { panic!() };
        assert_eq!(def.columns.len(), 3);
        assert_eq!(def.columns[2].name, "age");
    }

    #[test]
    fn test_add_duplicate_column() {
        let err = table()
            .apply("t", &Alteration::AddColumn(ColumnDef::new("id", Type::Int4)))
            .unwrap_err();
        assert_eq!(err.diagnostic().code, "CA_005");
    }

    #[test]
    fn test_drop_missing_column() {
        let err = table().apply("t", &Alteration::DropColumn("nope".to_string())).unwrap_err();
        assert_eq!(err.diagnostic().code, "CA_006");
    }

    #[test]
    fn test_rename_column() {
        let altered = table()
            .apply(
                "t",
                &Alteration::RenameColumn { from: "name".to_string(), to: "title".to_string() },
            )
            .unwrap();
        let CatalogObject::Table(def) = altered else { panic!() };
        assert_eq!(def.columns[1].name, "title");
    }

    #[test]
    fn test_alter_view_rejected() {
        let view =
            CatalogObject::View(ViewDef { query: "from t".to_string(), columns: vec![] });
        let err = view
            .apply("v", &Alteration::AddColumn(ColumnDef::new("x", Type::Bool)))
            .unwrap_err();
        assert_eq!(err.diagnostic().code, "CA_004");
    }
}
