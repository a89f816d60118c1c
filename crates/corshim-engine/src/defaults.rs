//! Default constants for the shim.

/// Field enumeration stops before the root type unless configured otherwise.
/// The host injects bookkeeping fields on its root type that origin code must
/// never see.
pub const DEFAULT_HIDE_ROOT_FIELDS: bool = true;

/// Name under which [`TypeRegistry`](crate::reflect::TypeRegistry) registers the root type.
pub const ROOT_TYPE_NAME: &str = "Object";

/// Host-injected fields on the root type.
pub const ROOT_SYNTHETIC_FIELDS: &[&str] = &["shadow$_klass_", "shadow$_monitor_"];

/// Name the host gives constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";
