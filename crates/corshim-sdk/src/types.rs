//! Type codes of the origin type system

use std::fmt;

/// Origin type code, numbered as the origin numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeCode {
    /// Null reference
    Empty = 0,
    /// General reference type
    Object = 1,
    /// Database null
    DBNull = 2,
    /// Boolean
    Boolean = 3,
    /// UTF-16 code unit
    Char = 4,
    /// Signed 8-bit integer
    SByte = 5,
    /// Unsigned 8-bit integer
    Byte = 6,
    /// Signed 16-bit integer
    Int16 = 7,
    /// Unsigned 16-bit integer
    UInt16 = 8,
    /// Signed 32-bit integer
    Int32 = 9,
    /// Unsigned 32-bit integer
    UInt32 = 10,
    /// Signed 64-bit integer
    Int64 = 11,
    /// Unsigned 64-bit integer
    UInt64 = 12,
    /// 32-bit IEEE float
    Single = 13,
    /// 64-bit IEEE float
    Double = 14,
    /// 128-bit decimal
    Decimal = 15,
    /// Date and time
    DateTime = 16,
    /// String
    String = 18,
}

impl TypeCode {
    /// Origin type name
    pub fn name(self) -> &'static str {
        match self {
            TypeCode::Empty => "Empty",
            TypeCode::Object => "Object",
            TypeCode::DBNull => "DBNull",
            TypeCode::Boolean => "Boolean",
            TypeCode::Char => "Char",
            TypeCode::SByte => "SByte",
            TypeCode::Byte => "Byte",
            TypeCode::Int16 => "Int16",
            TypeCode::UInt16 => "UInt16",
            TypeCode::Int32 => "Int32",
            TypeCode::UInt32 => "UInt32",
            TypeCode::Int64 => "Int64",
            TypeCode::UInt64 => "UInt64",
            TypeCode::Single => "Single",
            TypeCode::Double => "Double",
            TypeCode::Decimal => "Decimal",
            TypeCode::DateTime => "DateTime",
            TypeCode::String => "String",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
