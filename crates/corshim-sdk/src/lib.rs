//! Corshim SDK - the host boundary
//!
//! This crate holds everything the core consumes from the host platform
//! rather than implements itself:
//! - **Atomic Slot Accessor**: ordered word access by base pointer + offset (`slots`)
//! - **Host Introspection**: per-type member listings with merged modifiers (`introspection`)
//! - **Numeric Formatting**: standard format strings and canonical float text (`format`)
//!
//! plus the shared error taxonomy and origin type codes.
//!
//! Each collaborator comes with a reference implementation backed by the
//! running process (`NativeSlots`, `StandardFormatter`). Hosts with their own
//! primitives install them once at startup.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod format;
pub mod introspection;
pub mod slots;
pub mod types;

pub use error::{ShimError, ShimResult};
pub use format::{
    install_number_formatter, number_formatter, NumberArg, NumberFormatInfo, NumberFormatter,
    StandardFormatter,
};
pub use introspection::{HostIntrospection, HostMember, HostMemberKind, HostModifiers, HostTypeId};
pub use slots::{
    install_slot_accessor, slot_accessor, InlineSlot, NativeSlots, SlotAccessor, WordWidth,
};
pub use types::TypeCode;
