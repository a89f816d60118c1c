//! In-memory host type registry
//!
//! A [`HostIntrospection`] implementation for embedding hosts that describe
//! their types up front, and for tests. The root type is registered on
//! construction together with the synthetic fields the host injects there.

use corshim_sdk::{
    HostIntrospection, HostMember, HostMemberKind, HostModifiers, HostTypeId, ShimError,
    ShimResult,
};
use rustc_hash::FxHashMap;

use crate::defaults::{CONSTRUCTOR_NAME, ROOT_SYNTHETIC_FIELDS, ROOT_TYPE_NAME};

/// Runtime metadata of one host type
#[derive(Debug, Clone)]
pub struct HostType {
    /// Type handle
    pub id: HostTypeId,
    /// Type name
    pub name: String,
    /// Single parent; `None` only for the root type
    pub parent: Option<HostTypeId>,
    members: Vec<HostMember>,
}

impl HostType {
    fn new(id: HostTypeId, name: String, parent: Option<HostTypeId>) -> Self {
        Self {
            id,
            name,
            parent,
            members: Vec::new(),
        }
    }

    /// Declared members of `kind`, in declaration order
    pub fn members(&self, kind: HostMemberKind) -> impl Iterator<Item = &HostMember> + '_ {
        self.members.iter().filter(move |m| m.kind == kind)
    }
}

/// Type registry for an embedding host
#[derive(Debug)]
pub struct TypeRegistry {
    /// Types indexed by handle
    types: Vec<HostType>,
    /// Type name to handle mapping
    name_to_id: FxHashMap<String, HostTypeId>,
}

impl TypeRegistry {
    /// Create a registry holding only the root type
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            name_to_id: FxHashMap::default(),
        };
        let root = registry.insert(ROOT_TYPE_NAME.to_string(), None);
        registry.populate_root(root);
        registry
    }

    fn populate_root(&mut self, root: HostTypeId) {
        let public = HostModifiers::PUBLIC;
        let native = HostModifiers::NATIVE;
        let declared = [
            (CONSTRUCTOR_NAME, HostMemberKind::Constructor, public),
            ("equals", HostMemberKind::Method, public),
            ("hashCode", HostMemberKind::Method, public | native),
            ("toString", HostMemberKind::Method, public),
            ("getClass", HostMemberKind::Method, public | HostModifiers::FINAL | native),
            ("clone", HostMemberKind::Method, HostModifiers::PROTECTED | native),
            ("finalize", HostMemberKind::Method, HostModifiers::PROTECTED),
        ];
        let synthetic = HostModifiers::PRIVATE | HostModifiers::TRANSIENT | HostModifiers::SYNTHETIC;
        let fields = ROOT_SYNTHETIC_FIELDS
            .iter()
            .map(|&name| (name, HostMemberKind::Field, synthetic));

        let ty = &mut self.types[root.as_usize()];
        for (name, kind, modifiers) in declared.into_iter().chain(fields) {
            ty.members.push(HostMember::new(name, kind, root, modifiers));
        }
    }

    fn insert(&mut self, name: String, parent: Option<HostTypeId>) -> HostTypeId {
        let id = HostTypeId(self.types.len());
        self.name_to_id.insert(name.clone(), id);
        self.types.push(HostType::new(id, name, parent));
        id
    }

    /// Register a type deriving from `base`, or from the root when `None`
    pub fn define_type(
        &mut self,
        name: impl Into<String>,
        base: Option<HostTypeId>,
    ) -> ShimResult<HostTypeId> {
        let name = name.into();
        if self.name_to_id.contains_key(&name) {
            return Err(ShimError::Argument(format!("type {} already defined", name)));
        }
        let parent = base.unwrap_or_else(|| self.root());
        if self.get_type(parent).is_none() {
            return Err(ShimError::Argument(format!("unknown base type {}", parent)));
        }
        Ok(self.insert(name, Some(parent)))
    }

    /// Declare a member on `ty`
    pub fn add_member(
        &mut self,
        ty: HostTypeId,
        name: impl Into<String>,
        kind: HostMemberKind,
        modifiers: HostModifiers,
    ) -> ShimResult<&mut Self> {
        let host_type = self
            .types
            .get_mut(ty.as_usize())
            .ok_or_else(|| ShimError::Argument(format!("unknown type {}", ty)))?;
        host_type
            .members
            .push(HostMember::new(name, kind, ty, modifiers));
        Ok(self)
    }

    /// Declare a constructor on `ty`
    pub fn add_constructor(
        &mut self,
        ty: HostTypeId,
        modifiers: HostModifiers,
    ) -> ShimResult<&mut Self> {
        self.add_member(ty, CONSTRUCTOR_NAME, HostMemberKind::Constructor, modifiers)
    }

    /// Declare a method on `ty`
    pub fn add_method(
        &mut self,
        ty: HostTypeId,
        name: impl Into<String>,
        modifiers: HostModifiers,
    ) -> ShimResult<&mut Self> {
        self.add_member(ty, name, HostMemberKind::Method, modifiers)
    }

    /// Declare a field on `ty`
    pub fn add_field(
        &mut self,
        ty: HostTypeId,
        name: impl Into<String>,
        modifiers: HostModifiers,
    ) -> ShimResult<&mut Self> {
        self.add_member(ty, name, HostMemberKind::Field, modifiers)
    }

    /// The root type handle
    pub fn root(&self) -> HostTypeId {
        HostTypeId(0)
    }

    /// Get type by handle
    pub fn get_type(&self, id: HostTypeId) -> Option<&HostType> {
        self.types.get(id.as_usize())
    }

    /// Get type by name
    pub fn get_type_by_name(&self, name: &str) -> Option<&HostType> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.get_type(*id))
    }

    /// Next handle `define_type` will hand out
    pub fn next_type_id(&self) -> HostTypeId {
        HostTypeId(self.types.len())
    }

    /// Chain from `ty` up to and including the root
    pub fn hierarchy(&self, ty: HostTypeId) -> Vec<HostTypeId> {
        let mut chain = Vec::new();
        let mut current = self.get_type(ty);
        while let Some(host_type) = current {
            chain.push(host_type.id);
            current = host_type.parent.and_then(|p| self.get_type(p));
        }
        chain
    }

    /// Iterate over all types
    pub fn iter(&self) -> impl Iterator<Item = &HostType> {
        self.types.iter()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HostIntrospection for TypeRegistry {
    fn declared_members(&self, ty: HostTypeId, kind: HostMemberKind) -> Vec<HostMember> {
        self.get_type(ty)
            .map(|t| t.members(kind).cloned().collect())
            .unwrap_or_default()
    }

    fn base_type(&self, ty: HostTypeId) -> Option<HostTypeId> {
        self.get_type(ty).and_then(|t| t.parent)
    }

    fn root_type(&self) -> HostTypeId {
        self.root()
    }
}
