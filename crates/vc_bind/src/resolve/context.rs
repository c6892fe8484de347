use alloc::vec::Vec;

use crate::info::{ObjectInfo, TypeDescriptor, TypeExpr};

/// The state of one generic parameter in a [`BindingContext`].
#[derive(Debug, Clone)]
pub struct Binding<'a> {
    pub name: &'static str,
    /// The argument of the current instantiation, if any.
    pub arg: Option<TypeDescriptor>,
    /// The declared upper bound, if any.
    pub bound: Option<&'a TypeExpr>,
}

/// Maps the generic parameters of one object type to their arguments.
///
/// A context is never modified; nested scopes get their own context, built
/// from the descriptor resolved in the enclosing one.
#[derive(Debug, Clone)]
pub struct BindingContext<'a> {
    owner: &'static str,
    bindings: Vec<Binding<'a>>,
}

impl<'a> BindingContext<'a> {
    /// A context without parameters.
    #[inline]
    pub fn empty(owner: &'static str) -> Self {
        Self {
            owner,
            bindings: Vec::new(),
        }
    }

    /// The context of `info` instantiated with `args`, in parameter order.
    ///
    /// Missing arguments are taken from the instantiation recorded in `info`.
    pub fn for_object(info: &'a ObjectInfo, args: &[TypeDescriptor]) -> Self {
        let bindings = info
            .generics()
            .iter()
            .enumerate()
            .map(|(index, param)| Binding {
                name: param.name(),
                arg: match args.get(index) {
                    Some(arg) => Some(arg.clone()),
                    None => param.arg().map(|arg| arg.descriptor()),
                },
                bound: param.bound(),
            })
            .collect();
        Self {
            owner: info.raw().path(),
            bindings,
        }
    }

    /// Path of the type owning the parameters.
    #[inline]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn get(&self, name: &str) -> Option<&Binding<'a>> {
        self.bindings.iter().find(|binding| binding.name == name)
    }

    /// The resolved arguments, in parameter order.
    pub fn args(&self) -> impl Iterator<Item = Option<&TypeDescriptor>> {
        self.bindings.iter().map(|binding| binding.arg.as_ref())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
