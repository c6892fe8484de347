use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{AccessorInfo, FieldInfo, ObjectInfo};

/// Decides which members of an object type may be bound.
///
/// Members excluded by their [`Modifiers`](crate::info::Modifiers) never reach
/// the strategy.
pub trait VisibilityStrategy: Send + Sync {
    fn is_field_visible(&self, owner: &ObjectInfo, field: &FieldInfo) -> bool;

    fn is_accessor_visible(&self, owner: &ObjectInfo, accessor: &AccessorInfo) -> bool;
}

/// Public members only, plus an allow-list of `(type path, member)` pairs.
///
/// # Example
///
/// ```
/// use vc_bind::Bind;
/// use vc_bind::customize::{PublicOnly, VisibilityStrategy};
///
/// #[derive(Bind, Default)]
/// struct Account {
///     pub owner: String,
///     balance: u64,
/// }
///
/// let info = Account::type_info().as_object().unwrap();
/// let balance = info.field("balance").unwrap();
///
/// assert!(!PublicOnly::new().is_field_visible(info, balance));
///
/// let strategy = PublicOnly::new().allow(info.raw().path(), "balance");
/// assert!(strategy.is_field_visible(info, balance));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PublicOnly {
    allowed: Vec<(String, String)>,
}

impl PublicOnly {
    #[inline]
    pub const fn new() -> Self {
        Self {
            allowed: Vec::new(),
        }
    }

    /// Allows the member `member` of the type whose definition lives at `raw_path`.
    pub fn allow(mut self, raw_path: impl Into<String>, member: impl Into<String>) -> Self {
        self.allowed.push((raw_path.into(), member.into()));
        self
    }

    fn is_allowed(&self, owner: &ObjectInfo, member: &str) -> bool {
        let path = owner.raw().path();
        self.allowed
            .iter()
            .any(|(raw, name)| raw == path && name == member)
    }
}

impl VisibilityStrategy for PublicOnly {
    fn is_field_visible(&self, owner: &ObjectInfo, field: &FieldInfo) -> bool {
        field.modifiers().is_public() || self.is_allowed(owner, field.name())
    }

    fn is_accessor_visible(&self, owner: &ObjectInfo, accessor: &AccessorInfo) -> bool {
        accessor.modifiers().is_public() || self.is_allowed(owner, accessor.name())
    }
}

/// Every member is visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllMembers;

impl VisibilityStrategy for AllMembers {
    #[inline]
    fn is_field_visible(&self, _: &ObjectInfo, _: &FieldInfo) -> bool {
        true
    }

    #[inline]
    fn is_accessor_visible(&self, _: &ObjectInfo, _: &AccessorInfo) -> bool {
        true
    }
}
