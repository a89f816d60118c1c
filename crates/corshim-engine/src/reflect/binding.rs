//! Binding qualifiers and member categories, numbered as the origin numbers them

bitflags::bitflags! {
    /// Qualifier set controlling which members an enumeration yields
    ///
    /// Only the four enumeration axes (visibility, instance/static, declared
    /// only) are meaningful here. The invocation bits exist so that callers
    /// passing them get a clear error instead of silently ignored bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BindingFlags: u32 {
        /// Case-insensitive name matching
        const IGNORE_CASE = 0x0000_0001;
        /// Members declared on the starting type only
        const DECLARED_ONLY = 0x0000_0002;
        /// Instance members
        const INSTANCE = 0x0000_0004;
        /// Static members
        const STATIC = 0x0000_0008;
        /// Public members
        const PUBLIC = 0x0000_0010;
        /// Non-public members
        const NON_PUBLIC = 0x0000_0020;
        /// Static members of base types
        const FLATTEN_HIERARCHY = 0x0000_0040;
        /// Invoke a method
        const INVOKE_METHOD = 0x0000_0100;
        /// Create an instance
        const CREATE_INSTANCE = 0x0000_0200;
        /// Read a field
        const GET_FIELD = 0x0000_0400;
        /// Write a field
        const SET_FIELD = 0x0000_0800;
        /// Read a property
        const GET_PROPERTY = 0x0000_1000;
        /// Write a property
        const SET_PROPERTY = 0x0000_2000;
        /// COM put
        const PUT_DISP_PROPERTY = 0x0000_4000;
        /// COM put by reference
        const PUT_REF_DISP_PROPERTY = 0x0000_8000;
        /// Exact argument types only
        const EXACT_BINDING = 0x0001_0000;
        /// No argument type coercion
        const SUPPRESS_CHANGE_TYPE = 0x0002_0000;
        /// Bind by parameter count including optionals
        const OPTIONAL_PARAM_BINDING = 0x0004_0000;
        /// Discard the return value
        const IGNORE_RETURN = 0x0100_0000;
        /// Surface exceptions unwrapped
        const DO_NOT_WRAP_EXCEPTIONS = 0x0200_0000;
    }
}

impl BindingFlags {
    /// Visibility axis
    pub const VISIBILITY: Self = Self::PUBLIC.union(Self::NON_PUBLIC);

    /// Instance/static axis
    pub const LIFETIME: Self = Self::INSTANCE.union(Self::STATIC);

    /// Every bit the enumeration engine understands
    pub const ENUMERATION: Self = Self::VISIBILITY
        .union(Self::LIFETIME)
        .union(Self::DECLARED_ONLY);

    /// The customary default query: public instance and static members
    pub const DEFAULT_LOOKUP: Self = Self::PUBLIC
        .union(Self::INSTANCE)
        .union(Self::STATIC);
}

bitflags::bitflags! {
    /// Member category
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberTypes: u32 {
        /// Constructor
        const CONSTRUCTOR = 0x01;
        /// Event
        const EVENT = 0x02;
        /// Field
        const FIELD = 0x04;
        /// Method
        const METHOD = 0x08;
        /// Property
        const PROPERTY = 0x10;
        /// Type
        const TYPE_INFO = 0x20;
        /// Custom member
        const CUSTOM = 0x40;
        /// Nested type
        const NESTED_TYPE = 0x80;
        /// Every category
        const ALL = 0xBF;
    }
}
