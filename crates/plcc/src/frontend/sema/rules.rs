//! Typing rules for PLC operators and assignments
//!
//! Every table here is a pure function of the operand types. The checker
//! walks the tree and asks these functions what a node's type is and which
//! operands need an implicit conversion.

use crate::frontend::ast::{BinaryOp, OpClass, UnaryOp};
use crate::types::Type;

/// Result type of a unary operator, or `None` if the operand is not accepted
pub fn unary_result(op: UnaryOp, operand: Type) -> Option<Type> {
    match (op, operand) {
        (UnaryOp::Not, Type::Boolean) => Some(Type::Boolean),
        (UnaryOp::Neg, Type::Int) => Some(Type::Int),
        (UnaryOp::Neg, Type::Float) => Some(Type::Float),
        // An int operand is a packed pixel
        (UnaryOp::Channel(_), Type::Int | Type::Color) => Some(Type::Int),
        (UnaryOp::Channel(_), Type::Image) => Some(Type::Image),
        (UnaryOp::Image(_), Type::Image) => Some(Type::Int),
        _ => None,
    }
}

/// Outcome of a binary operator: the result type plus the conversion, if
/// any, each operand needs first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryRule {
    pub result: Type,
    pub coerce_left: Option<Type>,
    pub coerce_right: Option<Type>,
}

impl BinaryRule {
    fn plain(result: Type) -> Self {
        Self {
            result,
            coerce_left: None,
            coerce_right: None,
        }
    }

    fn left(result: Type, to: Type) -> Self {
        Self {
            coerce_left: Some(to),
            ..Self::plain(result)
        }
    }

    fn right(result: Type, to: Type) -> Self {
        Self {
            coerce_right: Some(to),
            ..Self::plain(result)
        }
    }

    fn both(result: Type, to: Type) -> Self {
        Self {
            result,
            coerce_left: Some(to),
            coerce_right: Some(to),
        }
    }
}

/// Look up the rule for `left op right`
pub fn binary_rule(op: BinaryOp, left: Type, right: Type) -> Option<BinaryRule> {
    match op.class() {
        OpClass::Logical => {
            (left == Type::Boolean && right == Type::Boolean).then(|| BinaryRule::plain(Type::Boolean))
        }
        OpClass::Equality => (left == right).then(|| BinaryRule::plain(Type::Boolean)),
        OpClass::Additive => additive(left, right),
        OpClass::Multiplicative => scaling(left, right),
        OpClass::Relational => relational(left, right),
    }
}

fn additive(left: Type, right: Type) -> Option<BinaryRule> {
    use Type::{Color, ColorFloat, Float, Image, Int};

    let rule = match (left, right) {
        (Int, Int) => BinaryRule::plain(Int),
        (Float, Float) => BinaryRule::plain(Float),
        (Int, Float) => BinaryRule::left(Float, Float),
        (Float, Int) => BinaryRule::right(Float, Float),
        (Color, Color) => BinaryRule::plain(Color),
        (ColorFloat, ColorFloat) => BinaryRule::plain(ColorFloat),
        (Color, ColorFloat) => BinaryRule::left(ColorFloat, ColorFloat),
        (ColorFloat, Color) => BinaryRule::right(ColorFloat, ColorFloat),
        (Image, Image) => BinaryRule::plain(Image),
        _ => return None,
    };
    Some(rule)
}

/// Scalar/aggregate forms accepted by `*`, `/` and `%`
fn scaling(left: Type, right: Type) -> Option<BinaryRule> {
    use Type::{Color, ColorFloat, Float, Image, Int};

    let rule = match (left, right) {
        (Image, Int | Float) | (Int | Float, Image) => BinaryRule::plain(Image),
        (Int, Color) => BinaryRule::left(Color, Color),
        (Color, Int) => BinaryRule::right(Color, Color),
        (Float, Color) | (Color, Float) => BinaryRule::both(ColorFloat, ColorFloat),
        _ => return None,
    };
    Some(rule)
}

fn relational(left: Type, right: Type) -> Option<BinaryRule> {
    use Type::{Boolean, Float, Int};

    let rule = match (left, right) {
        (Int, Int) | (Float, Float) => BinaryRule::plain(Boolean),
        (Int, Float) => BinaryRule::left(Boolean, Float),
        (Float, Int) => BinaryRule::right(Boolean, Float),
        _ => return None,
    };
    Some(rule)
}

/// Conversion applied to the value side of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// The value is stored as is
    Identity,
    /// The value is converted to the given type first
    To(Type),
}

/// Assignment or `=` initialization of a non-image variable
pub fn assign_coercion(target: Type, value: Type) -> Option<Coercion> {
    if target == value {
        return Some(Coercion::Identity);
    }
    match (target, value) {
        (Type::Int, Type::Float | Type::Color)
        | (Type::Float, Type::Int)
        | (Type::Color, Type::Int) => Some(Coercion::To(target)),
        _ => None,
    }
}

/// Whole-image assignment without a pixel selector: the value fills every pixel
pub fn image_fill_coercion(value: Type) -> Option<Coercion> {
    match value {
        Type::Color | Type::ColorFloat => Some(Coercion::Identity),
        Type::Int => Some(Coercion::To(Type::Color)),
        Type::Float => Some(Coercion::To(Type::ColorFloat)),
        _ => None,
    }
}

/// Per-pixel assignment `im[x, y] = value`; the stored pixel is always a color
pub fn pixel_write_coercion(value: Type) -> Option<Coercion> {
    match value {
        Type::Color => Some(Coercion::Identity),
        Type::Int | Type::Float | Type::ColorFloat => Some(Coercion::To(Type::Color)),
        _ => None,
    }
}
