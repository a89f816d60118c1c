//! Binding-flags member enumeration
//!
//! - `binding`: qualifier set and member categories
//! - `enumerate`: the walk over host per-type member lists
//! - `registry`: an in-memory host for embedders and tests

mod binding;
mod enumerate;
mod registry;

pub use binding::{BindingFlags, MemberTypes};
pub use enumerate::{
    collect_members, enumerate_members, find_first, EnumerationOptions, MemberEnumerator,
    MemberQuery,
};
pub use registry::{HostType, TypeRegistry};
