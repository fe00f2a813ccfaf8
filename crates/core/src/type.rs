// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Logical value type carried by column metadata in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Int1,
    Int2,
    Int4,
    Int8,
    Uint1,
    Uint2,
    Uint4,
    Uint8,
    Float4,
    Float8,
    Utf8,
    Blob,
    Date,
    DateTime,
    Interval,
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Bool => "BOOL",
            Type::Int1 => "INT1",
            Type::Int2 => "INT2",
            Type::Int4 => "INT4",
            Type::Int8 => "INT8",
            Type::Uint1 => "UINT1",
            Type::Uint2 => "UINT2",
            Type::Uint4 => "UINT4",
            Type::Uint8 => "UINT8",
            Type::Float4 => "FLOAT4",
            Type::Float8 => "FLOAT8",
            Type::Utf8 => "UTF8",
            Type::Blob => "BLOB",
            Type::Date => "DATE",
            Type::DateTime => "DATETIME",
            Type::Interval => "INTERVAL",
        };
        f.write_str(name)
    }
}
