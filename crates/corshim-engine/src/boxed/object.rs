//! Type-erased boxes
//!
//! Code that holds boxes of mixed payload types (argument lists, field
//! snapshots) works through `dyn ValueObject`.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use corshim_sdk::{NumberFormatInfo, ShimError, ShimResult};

use super::convert::Convertible;
use super::indirection::Indirection;
use super::primitive::Primitive;
use super::value::BoxedValue;

/// Object-safe surface shared by every boxed primitive
pub trait ValueObject: Convertible + Indirection + fmt::Debug + Send + Sync {
    /// Concrete box, for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Same type code and equal payloads
    fn equals_object(&self, other: &dyn ValueObject) -> bool;

    /// Order against another object; `None` sorts first
    fn compare_to_object(&self, other: Option<&dyn ValueObject>) -> ShimResult<Ordering>;

    /// Origin hash code
    fn hash_code(&self) -> i32;

    /// Format with a standard format string; empty means canonical text
    fn format(&self, format: Option<&str>, provider: Option<&NumberFormatInfo>)
        -> ShimResult<String>;

    /// Reset the payload to zero
    fn clear(&self);

    /// Copy this payload into a box of the same type
    fn copy_to_object(&self, target: &dyn ValueObject) -> ShimResult<()>;

    /// Fresh inline copy
    fn clone_value(&self) -> Box<dyn ValueObject>;
}

impl<T: Primitive> BoxedValue<T> {
    fn same_type<'a>(&self, other: &'a dyn ValueObject) -> Option<&'a Self> {
        other.as_any().downcast_ref::<Self>()
    }
}

impl<T: Primitive> ValueObject for BoxedValue<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equals_object(&self, other: &dyn ValueObject) -> bool {
        self.same_type(other).is_some_and(|other| self.equals(other))
    }

    fn compare_to_object(&self, other: Option<&dyn ValueObject>) -> ShimResult<Ordering> {
        let Some(other) = other else {
            return Ok(Ordering::Greater);
        };
        match self.same_type(other) {
            Some(other) => Ok(self.compare_to(other.get())),
            None => Err(ShimError::Argument(format!(
                "Object must be of type {}",
                T::TYPE_CODE
            ))),
        }
    }

    fn hash_code(&self) -> i32 {
        BoxedValue::hash_code(self)
    }

    fn format(
        &self,
        format: Option<&str>,
        provider: Option<&NumberFormatInfo>,
    ) -> ShimResult<String> {
        BoxedValue::format(self, format, provider)
    }

    fn clear(&self) {
        BoxedValue::clear(self)
    }

    fn copy_to_object(&self, target: &dyn ValueObject) -> ShimResult<()> {
        let target = self.same_type(target).ok_or_else(|| {
            ShimError::invalid_cast(T::TYPE_CODE.name(), target.type_code().name())
        })?;
        self.copy_to(target);
        Ok(())
    }

    fn clone_value(&self) -> Box<dyn ValueObject> {
        Box::new(self.clone())
    }
}
