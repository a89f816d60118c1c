//! Member enumeration engine
//!
//! Translates a [`BindingFlags`] query into a walk over the host's per-type
//! member lists. The host reports one declaring type at a time with a merged
//! modifier field, so the query is compiled once into a (mask, value) pair
//! over [`HostModifiers`] and applied to every member on the way up the
//! hierarchy.
//!
//! Only the host `STATIC` bit takes part in the filter. Visibility is not
//! masked: any non-empty visibility axis yields members of every visibility.

use std::ops::ControlFlow;

use corshim_sdk::{
    HostIntrospection, HostMember, HostMemberKind, HostModifiers, HostTypeId, ShimError,
    ShimResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::binding::{BindingFlags, MemberTypes};
use crate::defaults::DEFAULT_HIDE_ROOT_FIELDS;

/// Tunables of the enumeration walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationOptions {
    /// Stop field walks before the host root type
    pub hide_root_fields: bool,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            hide_root_fields: DEFAULT_HIDE_ROOT_FIELDS,
        }
    }
}

/// A query compiled against host modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberQuery {
    /// Host modifier bits that take part in the match
    pub mask: HostModifiers,
    /// Required value of the masked bits
    pub value: HostModifiers,
    /// Stop after the starting type
    pub declared_only: bool,
}

impl MemberQuery {
    /// Compile `flags`; `Ok(None)` means the query can match nothing
    ///
    /// An empty visibility or instance/static axis short-circuits before the
    /// remaining bits are validated.
    pub fn compile(flags: BindingFlags) -> ShimResult<Option<Self>> {
        if !flags.intersects(BindingFlags::VISIBILITY) || !flags.intersects(BindingFlags::LIFETIME)
        {
            return Ok(None);
        }

        let (mask, value) = match (
            flags.contains(BindingFlags::INSTANCE),
            flags.contains(BindingFlags::STATIC),
        ) {
            (true, false) => (HostModifiers::STATIC, HostModifiers::empty()),
            (false, true) => (HostModifiers::STATIC, HostModifiers::STATIC),
            _ => (HostModifiers::empty(), HostModifiers::empty()),
        };

        let residual = flags.difference(BindingFlags::ENUMERATION);
        if !residual.is_empty() {
            return Err(ShimError::PlatformNotSupported(format!(
                "bad binding flags {:#x}",
                residual.bits()
            )));
        }

        Ok(Some(Self {
            mask,
            value,
            declared_only: flags.contains(BindingFlags::DECLARED_ONLY),
        }))
    }

    /// Whether a member with `modifiers` passes the filter
    pub fn matches(&self, modifiers: HostModifiers) -> bool {
        modifiers.intersection(self.mask) == self.value
    }
}

/// Host member kind enumerated for `member_type`
fn member_kind(member_type: MemberTypes) -> ShimResult<HostMemberKind> {
    if member_type == MemberTypes::CONSTRUCTOR {
        Ok(HostMemberKind::Constructor)
    } else if member_type == MemberTypes::METHOD {
        Ok(HostMemberKind::Method)
    } else if member_type == MemberTypes::FIELD {
        Ok(HostMemberKind::Field)
    } else {
        Err(ShimError::Argument(format!(
            "member type {:#x} cannot be enumerated",
            member_type.bits()
        )))
    }
}

/// Enumeration engine bound to a host
#[derive(Debug, Clone)]
pub struct MemberEnumerator<H> {
    host: H,
    options: EnumerationOptions,
}

impl<H: HostIntrospection> MemberEnumerator<H> {
    /// Engine with default options
    pub fn new(host: H) -> Self {
        Self::with_options(host, EnumerationOptions::default())
    }

    /// Engine with explicit options
    pub fn with_options(host: H, options: EnumerationOptions) -> Self {
        Self { host, options }
    }

    /// Active options
    pub fn options(&self) -> &EnumerationOptions {
        &self.options
    }

    /// Underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Offer every matching member to `visitor`, most derived type first
    ///
    /// A `Break` from the visitor ends the walk; nothing further is fetched
    /// from the host.
    pub fn enumerate<F>(
        &self,
        flags: BindingFlags,
        initial_type: HostTypeId,
        member_type: MemberTypes,
        mut visitor: F,
    ) -> ShimResult<()>
    where
        F: FnMut(&HostMember) -> ControlFlow<()>,
    {
        let Some(query) = MemberQuery::compile(flags)? else {
            debug!(flags = flags.bits(), "binding flags match nothing");
            return Ok(());
        };
        let kind = member_kind(member_type).inspect_err(|_| {
            debug!(member_type = member_type.bits(), "unsupported member type");
        })?;

        let hide_root = kind == HostMemberKind::Field && self.options.hide_root_fields;
        let root = self.host.root_type();
        let mut current = Some(initial_type);

        while let Some(ty) = current {
            if hide_root && ty == root {
                trace!(%ty, "stopping field walk at root type");
                break;
            }
            trace!(%ty, ?kind, "walking declared members");

            for member in self.host.declared_members(ty, kind) {
                if !query.matches(member.modifiers) {
                    continue;
                }
                if visitor(&member).is_break() {
                    debug!(%ty, member = %member.name, "visitor stopped enumeration");
                    return Ok(());
                }
            }

            if query.declared_only {
                break;
            }
            current = self.host.base_type(ty);
        }
        Ok(())
    }

    /// All matching members, in walk order
    pub fn collect(
        &self,
        flags: BindingFlags,
        initial_type: HostTypeId,
        member_type: MemberTypes,
    ) -> ShimResult<Vec<HostMember>> {
        let mut members = Vec::new();
        self.enumerate(flags, initial_type, member_type, |member| {
            members.push(member.clone());
            ControlFlow::Continue(())
        })?;
        Ok(members)
    }

    /// First matching member named `name`
    pub fn find_first(
        &self,
        flags: BindingFlags,
        initial_type: HostTypeId,
        member_type: MemberTypes,
        name: &str,
    ) -> ShimResult<Option<HostMember>> {
        let mut found = None;
        self.enumerate(flags, initial_type, member_type, |member| {
            if member.name == name {
                found = Some(member.clone());
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(found)
    }
}

/// Enumerate members of `initial_type` and its bases with default options
pub fn enumerate_members<H, F>(
    host: &H,
    flags: BindingFlags,
    initial_type: HostTypeId,
    member_type: MemberTypes,
    visitor: F,
) -> ShimResult<()>
where
    H: HostIntrospection + ?Sized,
    F: FnMut(&HostMember) -> ControlFlow<()>,
{
    MemberEnumerator::new(host).enumerate(flags, initial_type, member_type, visitor)
}

/// Collect members of `initial_type` and its bases with default options
pub fn collect_members<H>(
    host: &H,
    flags: BindingFlags,
    initial_type: HostTypeId,
    member_type: MemberTypes,
) -> ShimResult<Vec<HostMember>>
where
    H: HostIntrospection + ?Sized,
{
    MemberEnumerator::new(host).collect(flags, initial_type, member_type)
}

/// First member named `name` with default options
pub fn find_first<H>(
    host: &H,
    flags: BindingFlags,
    initial_type: HostTypeId,
    member_type: MemberTypes,
    name: &str,
) -> ShimResult<Option<HostMember>>
where
    H: HostIntrospection + ?Sized,
{
    MemberEnumerator::new(host).find_first(flags, initial_type, member_type, name)
}
