//! Conversions between boxed primitives and the origin's value types

use std::fmt;

use corshim_sdk::{ShimError, ShimResult, TypeCode};

use super::primitive::{Number, Primitive};
use super::value::BoxedValue;

/// Result of [`Convertible::to_type`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedValue {
    /// Boolean
    Boolean(bool),
    /// UTF-16 code unit
    Char(u16),
    /// Signed 8-bit integer
    SByte(i8),
    /// Unsigned 8-bit integer
    Byte(u8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// 32-bit float
    Single(f32),
    /// 64-bit float
    Double(f64),
    /// Canonical text
    String(String),
}

impl ConvertedValue {
    /// Type code of the converted value
    pub fn type_code(&self) -> TypeCode {
        match self {
            ConvertedValue::Boolean(_) => TypeCode::Boolean,
            ConvertedValue::Char(_) => TypeCode::Char,
            ConvertedValue::SByte(_) => TypeCode::SByte,
            ConvertedValue::Byte(_) => TypeCode::Byte,
            ConvertedValue::Int16(_) => TypeCode::Int16,
            ConvertedValue::UInt16(_) => TypeCode::UInt16,
            ConvertedValue::Int32(_) => TypeCode::Int32,
            ConvertedValue::UInt32(_) => TypeCode::UInt32,
            ConvertedValue::Int64(_) => TypeCode::Int64,
            ConvertedValue::UInt64(_) => TypeCode::UInt64,
            ConvertedValue::Single(_) => TypeCode::Single,
            ConvertedValue::Double(_) => TypeCode::Double,
            ConvertedValue::String(_) => TypeCode::String,
        }
    }
}

/// Integral value of `number` for an integer target
///
/// Floats round half to even; NaN and infinities never fit.
fn integral(number: Number, target: TypeCode) -> ShimResult<i128> {
    match number {
        Number::Integer(v) => Ok(v),
        Number::Float(v) if v.is_finite() => Ok(v.round_ties_even() as i128),
        Number::Float(_) => Err(ShimError::overflow(target.name())),
    }
}

fn narrow<R: TryFrom<i128>>(number: Number, target: TypeCode) -> ShimResult<R> {
    R::try_from(integral(number, target)?).map_err(|_| ShimError::overflow(target.name()))
}

/// The origin's conversion surface over a boxed primitive
pub trait Convertible: fmt::Display {
    /// Type code of the source value
    fn type_code(&self) -> TypeCode;

    /// Source value, widened
    fn number(&self) -> Number;

    /// Nonzero is true; NaN is true
    fn to_boolean(&self) -> ShimResult<bool> {
        Ok(match self.number() {
            Number::Integer(v) => v != 0,
            Number::Float(v) => v != 0.0,
        })
    }

    /// UTF-16 code unit; floats have no char conversion
    fn to_char(&self) -> ShimResult<u16> {
        match self.number() {
            Number::Float(_) => Err(ShimError::invalid_cast(self.type_code().name(), "Char")),
            number => narrow(number, TypeCode::Char),
        }
    }

    /// Range-checked signed 8-bit value
    fn to_sbyte(&self) -> ShimResult<i8> {
        narrow(self.number(), TypeCode::SByte)
    }

    /// Range-checked unsigned 8-bit value
    fn to_byte(&self) -> ShimResult<u8> {
        narrow(self.number(), TypeCode::Byte)
    }

    /// Range-checked signed 16-bit value
    fn to_int16(&self) -> ShimResult<i16> {
        narrow(self.number(), TypeCode::Int16)
    }

    /// Range-checked unsigned 16-bit value
    fn to_uint16(&self) -> ShimResult<u16> {
        narrow(self.number(), TypeCode::UInt16)
    }

    /// Range-checked signed 32-bit value
    fn to_int32(&self) -> ShimResult<i32> {
        narrow(self.number(), TypeCode::Int32)
    }

    /// Range-checked unsigned 32-bit value
    fn to_uint32(&self) -> ShimResult<u32> {
        narrow(self.number(), TypeCode::UInt32)
    }

    /// Range-checked signed 64-bit value
    fn to_int64(&self) -> ShimResult<i64> {
        narrow(self.number(), TypeCode::Int64)
    }

    /// Range-checked unsigned 64-bit value
    fn to_uint64(&self) -> ShimResult<u64> {
        narrow(self.number(), TypeCode::UInt64)
    }

    /// Nearest single
    fn to_single(&self) -> ShimResult<f32> {
        Ok(match self.number() {
            Number::Integer(v) => v as f32,
            Number::Float(v) => v as f32,
        })
    }

    /// Nearest double
    fn to_double(&self) -> ShimResult<f64> {
        Ok(match self.number() {
            Number::Integer(v) => v as f64,
            Number::Float(v) => v,
        })
    }

    /// Numbers are never dates
    fn to_date_time(&self) -> ShimResult<std::time::SystemTime> {
        Err(ShimError::invalid_cast(self.type_code().name(), "DateTime"))
    }

    /// Convert to the value type named by `target`
    fn to_type(&self, target: TypeCode) -> ShimResult<ConvertedValue> {
        Ok(match target {
            TypeCode::Boolean => ConvertedValue::Boolean(self.to_boolean()?),
            TypeCode::Char => ConvertedValue::Char(self.to_char()?),
            TypeCode::SByte => ConvertedValue::SByte(self.to_sbyte()?),
            TypeCode::Byte => ConvertedValue::Byte(self.to_byte()?),
            TypeCode::Int16 => ConvertedValue::Int16(self.to_int16()?),
            TypeCode::UInt16 => ConvertedValue::UInt16(self.to_uint16()?),
            TypeCode::Int32 => ConvertedValue::Int32(self.to_int32()?),
            TypeCode::UInt32 => ConvertedValue::UInt32(self.to_uint32()?),
            TypeCode::Int64 => ConvertedValue::Int64(self.to_int64()?),
            TypeCode::UInt64 => ConvertedValue::UInt64(self.to_uint64()?),
            TypeCode::Single => ConvertedValue::Single(self.to_single()?),
            TypeCode::Double => ConvertedValue::Double(self.to_double()?),
            TypeCode::String => ConvertedValue::String(self.to_string()),
            TypeCode::Object if self.type_code() != TypeCode::Object => {
                return self.to_type(self.type_code())
            }
            TypeCode::Decimal => {
                return Err(ShimError::not_supported("Decimal conversion", self.type_code().name()))
            }
            other => return Err(ShimError::invalid_cast(self.type_code().name(), other.name())),
        })
    }
}

impl<T: Primitive> Convertible for BoxedValue<T> {
    fn type_code(&self) -> TypeCode {
        T::TYPE_CODE
    }

    fn number(&self) -> Number {
        self.get().number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_boolean() {
        assert!(!BoxedValue::new(0u8).to_boolean().unwrap());
        assert!(BoxedValue::new(-3i64).to_boolean().unwrap());
        assert!(BoxedValue::new(f32::NAN).to_boolean().unwrap());
        assert!(!BoxedValue::new(-0.0f64).to_boolean().unwrap());
    }

    #[test]
    fn test_integer_range_checks() {
        assert_eq!(BoxedValue::new(200u8).to_sbyte(), Err(ShimError::overflow("SByte")));
        assert_eq!(BoxedValue::new(-1i32).to_uint32(), Err(ShimError::overflow("UInt32")));
        assert_eq!(BoxedValue::new(127i64).to_sbyte().unwrap(), 127);
        assert_eq!(BoxedValue::new(u64::MAX).to_int64(), Err(ShimError::overflow("Int64")));
        assert_eq!(BoxedValue::new(u64::MAX).to_uint64().unwrap(), u64::MAX);
    }

    #[test]
    fn test_float_rounds_half_to_even() {
        assert_eq!(BoxedValue::new(2.5f64).to_int32().unwrap(), 2);
        assert_eq!(BoxedValue::new(3.5f64).to_int32().unwrap(), 4);
        assert_eq!(BoxedValue::new(-2.5f32).to_int16().unwrap(), -2);
        assert_eq!(BoxedValue::new(255.4f64).to_byte().unwrap(), 255);
        assert_eq!(BoxedValue::new(255.5f64).to_byte(), Err(ShimError::overflow("Byte")));
        assert_eq!(BoxedValue::new(-0.4f64).to_uint32().unwrap(), 0);
    }

    #[test]
    fn test_non_finite_to_integer_overflows() {
        assert_eq!(BoxedValue::new(f64::NAN).to_int32(), Err(ShimError::overflow("Int32")));
        assert_eq!(
            BoxedValue::new(f32::INFINITY).to_uint64(),
            Err(ShimError::overflow("UInt64"))
        );
    }

    #[test]
    fn test_to_char() {
        assert_eq!(BoxedValue::new(65i32).to_char().unwrap(), 65);
        assert_eq!(BoxedValue::new(-1i32).to_char(), Err(ShimError::overflow("Char")));
        assert_eq!(
            BoxedValue::new(65.0f32).to_char(),
            Err(ShimError::invalid_cast("Single", "Char"))
        );
    }

    #[test]
    fn test_to_floats() {
        assert_eq!(BoxedValue::new(3u16).to_double().unwrap(), 3.0);
        assert_eq!(BoxedValue::new(0.1f64).to_single().unwrap(), 0.1f32);
        assert_eq!(BoxedValue::new(0.5f32).to_double().unwrap(), 0.5);
    }

    #[test]
    fn test_to_date_time_is_invalid_cast() {
        assert!(matches!(
            BoxedValue::new(1i32).to_date_time(),
            Err(ShimError::InvalidCast(_))
        ));
    }

    #[test]
    fn test_to_type() {
        let b = BoxedValue::new(42i32);
        assert_eq!(b.to_type(TypeCode::Int64).unwrap(), ConvertedValue::Int64(42));
        assert_eq!(
            b.to_type(TypeCode::String).unwrap(),
            ConvertedValue::String("42".to_string())
        );
        assert_eq!(b.to_type(TypeCode::Object).unwrap(), ConvertedValue::Int32(42));
        assert_eq!(b.to_type(TypeCode::Byte).unwrap().type_code(), TypeCode::Byte);
        assert!(matches!(b.to_type(TypeCode::Decimal), Err(ShimError::NotSupported(_))));
        for target in [TypeCode::DateTime, TypeCode::Empty, TypeCode::DBNull] {
            assert!(matches!(b.to_type(target), Err(ShimError::InvalidCast(_))));
        }
    }
}
