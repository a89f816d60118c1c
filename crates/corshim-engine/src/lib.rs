//! Corshim Engine
//!
//! Two compatibility pieces that let code written against a managed object
//! model run on a host platform with a different one:
//!
//! - **Boxed values** (`boxed`): primitives wrapped as reference objects,
//!   either owning their payload inline or aliasing an element of a host
//!   array, with the origin's equality, ordering, hashing, formatting and
//!   conversion semantics.
//! - **Member enumeration** (`reflect`): binding-flags queries answered by
//!   walking the host's per-type member lists.
//!
//! Host primitives (atomic slot access, introspection, number formatting)
//! are consumed through the traits in `corshim_sdk`.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod boxed;
pub mod defaults;
pub mod options;
pub mod reflect;

pub use boxed::{BoxedValue, Convertible, HostArray, Indirection, Primitive, ValueObject};
pub use options::{OptionsError, ShimOptions};
pub use reflect::{
    collect_members, enumerate_members, find_first, BindingFlags, EnumerationOptions,
    MemberEnumerator, MemberTypes, TypeRegistry,
};

pub use corshim_sdk::{ShimError, ShimResult, TypeCode};
