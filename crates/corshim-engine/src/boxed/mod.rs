//! Boxed primitive values
//!
//! A [`BoxedValue`] is a primitive wrapped as a reference object. It either
//! owns its payload inline or aliases one element of a [`HostArray`]. One
//! generic component serves all ten primitive widths; per-width behavior is
//! the data carried by each [`Primitive`] impl.

mod convert;
mod indirection;
mod object;
mod primitive;
mod value;

pub use convert::{ConvertedValue, Convertible};
pub use indirection::Indirection;
pub use object::ValueObject;
pub use primitive::{indirection_supported, Access, NativeWidth, Number, NumberFormat, Primitive};
pub use value::{BoxedValue, HostArray};

/// Boxed `SByte`
pub type BoxedSByte = BoxedValue<i8>;
/// Boxed `Byte`
pub type BoxedByte = BoxedValue<u8>;
/// Boxed `Int16`
pub type BoxedInt16 = BoxedValue<i16>;
/// Boxed `UInt16`
pub type BoxedUInt16 = BoxedValue<u16>;
/// Boxed `Int32`
pub type BoxedInt32 = BoxedValue<i32>;
/// Boxed `UInt32`
pub type BoxedUInt32 = BoxedValue<u32>;
/// Boxed `Int64`
pub type BoxedInt64 = BoxedValue<i64>;
/// Boxed `UInt64`
pub type BoxedUInt64 = BoxedValue<u64>;
/// Boxed `Single`
pub type BoxedSingle = BoxedValue<f32>;
/// Boxed `Double`
pub type BoxedDouble = BoxedValue<f64>;
