//! Payload type tags.
//!
//! A [`TypeTag`] names one payload type at runtime without carrying the
//! type itself. Tags key the store's pool registry and every per-type
//! index built on top of the store, which lets type-erased callers (a
//! queued destroy action, a query created for a type never attached yet)
//! refer to a payload type.

use std::any::TypeId;

/// Runtime identity of a payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag {
    /// Compiler-assigned type identity.
    id: TypeId,
    /// Fully qualified type name, for diagnostics only.
    name: &'static str,
}

impl TypeTag {
    /// Return the tag of payload type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Return the fully qualified type name.
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Return the type name without its module path.
    pub fn short_name(self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl core::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Damage;
    struct Hit;

    #[test]
    fn tags_distinguish_types() {
        assert_eq!(TypeTag::of::<Damage>(), TypeTag::of::<Damage>());
        assert_ne!(TypeTag::of::<Damage>(), TypeTag::of::<Hit>());
    }

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(TypeTag::of::<Damage>().short_name(), "Damage");
        assert!(TypeTag::of::<Damage>().name().ends_with("::Damage"));
        assert_eq!(TypeTag::of::<Vec<u8>>().short_name(), "Vec");
    }
}
