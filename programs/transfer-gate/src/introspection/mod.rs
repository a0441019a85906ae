//! Transaction introspection core
//!
//! Security-critical parsing of the instructions sysvar. The buffer is
//! attacker-influenced (the caller chooses which instructions precede the
//! gate), so every length field is validated before use. All reads go
//! through the bounds-checked [`cursor::Cursor`]; the accessor in
//! [`sysvar`] is the single choke point for out-of-bounds and truncation
//! conditions, so [`transfer`] and [`verify`] can assume well-formed
//! records.

pub mod cursor;
pub mod sysvar;
pub mod transfer;
pub mod verify;

pub use sysvar::*;
pub use transfer::*;
pub use verify::*;
