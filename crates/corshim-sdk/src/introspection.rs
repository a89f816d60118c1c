//! Host Introspection API
//!
//! The host reports members one declaring type at a time, never flattened
//! across a hierarchy, and describes each member with a single merged
//! modifier bit field that mixes visibility with static/instance.

use std::fmt;

bitflags::bitflags! {
    /// Host member modifiers, numbered as the host numbers them
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HostModifiers: u32 {
        /// Visible everywhere
        const PUBLIC = 0x0001;
        /// Visible to the declaring type only
        const PRIVATE = 0x0002;
        /// Visible to subtypes
        const PROTECTED = 0x0004;
        /// Belongs to the type, not to instances
        const STATIC = 0x0008;
        /// Cannot be overridden or reassigned
        const FINAL = 0x0010;
        /// Takes the instance monitor
        const SYNCHRONIZED = 0x0020;
        /// Volatile field
        const VOLATILE = 0x0040;
        /// Skipped by serialization
        const TRANSIENT = 0x0080;
        /// Implemented natively
        const NATIVE = 0x0100;
        /// Interface type
        const INTERFACE = 0x0200;
        /// No implementation
        const ABSTRACT = 0x0400;
        /// Strict floating point
        const STRICT = 0x0800;
        /// Injected by the host toolchain
        const SYNTHETIC = 0x1000;
    }
}

/// Handle of a host type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostTypeId(pub usize);

impl HostTypeId {
    /// Numeric handle value
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for HostTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Member kinds the host can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostMemberKind {
    /// Constructor
    Constructor,
    /// Method
    Method,
    /// Field
    Field,
}

/// A declared member as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMember {
    /// Member name
    pub name: String,
    /// Member kind
    pub kind: HostMemberKind,
    /// Type that declares the member
    pub declaring_type: HostTypeId,
    /// Merged modifier bit field
    pub modifiers: HostModifiers,
}

impl HostMember {
    /// Create a member description
    pub fn new(
        name: impl Into<String>,
        kind: HostMemberKind,
        declaring_type: HostTypeId,
        modifiers: HostModifiers,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            declaring_type,
            modifiers,
        }
    }

    /// Whether the static bit is set
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(HostModifiers::STATIC)
    }
}

/// Per-type introspection surface of the host platform
pub trait HostIntrospection {
    /// Members of `kind` declared directly on `ty`, in declaration order
    fn declared_members(&self, ty: HostTypeId, kind: HostMemberKind) -> Vec<HostMember>;

    /// Single parent of `ty`, `None` for the root type
    fn base_type(&self, ty: HostTypeId) -> Option<HostTypeId>;

    /// The universal root type every chain ends in
    fn root_type(&self) -> HostTypeId;
}

impl<H: HostIntrospection + ?Sized> HostIntrospection for &H {
    fn declared_members(&self, ty: HostTypeId, kind: HostMemberKind) -> Vec<HostMember> {
        (**self).declared_members(ty, kind)
    }

    fn base_type(&self, ty: HostTypeId) -> Option<HostTypeId> {
        (**self).base_type(ty)
    }

    fn root_type(&self) -> HostTypeId {
        (**self).root_type()
    }
}
