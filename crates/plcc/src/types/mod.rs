//! The PLC type lattice
//!
//! A closed set of value types. Compatibility between them is expressed
//! only by the rule tables in `frontend::sema::rules`.

mod ty;

pub use ty::Type;
