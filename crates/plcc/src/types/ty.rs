//! Value types of the PLC language

use std::fmt;

/// Value type of a PLC expression or declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Boolean,
    String,
    /// Packed integer RGB color
    Color,
    /// Floating point RGB color
    ColorFloat,
    Image,
    /// The console, a read source and write sink
    Console,
}

impl Type {
    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Boolean => "boolean",
            Type::String => "string",
            Type::Color => "color",
            Type::ColorFloat => "colorfloat",
            Type::Image => "image",
            Type::Console => "console",
        }
    }

    /// Types a read or write may name as its console/file endpoint
    pub fn is_io_endpoint(&self) -> bool {
        matches!(self, Type::Console | Type::String)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
