use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::ResolutionError;
use crate::info::{TypeDescriptor, TypeExpr};
use crate::resolve::BindingContext;

/// Resolves a declared type against the bindings of its enclosing scope.
///
/// # Example
///
/// ```
/// use vc_bind::Bind;
/// use vc_bind::info::TypeDescriptor;
/// use vc_bind::resolve::{BindingContext, resolve};
///
/// #[derive(Bind, Default)]
/// struct Circle {
///     pub radius: f64,
/// }
///
/// #[derive(Bind, Default)]
/// struct Holder<T> {
///     pub items: Vec<T>,
/// }
///
/// let info = <Holder<Circle>>::type_info().as_object().unwrap();
/// let ctx = BindingContext::for_object(info, &[Circle::type_info().descriptor()]);
/// let items = resolve(info.field("items").unwrap().declared(), &ctx).unwrap();
/// assert_eq!(items.to_string(), "Vec<Circle>");
/// ```
pub fn resolve(
    expr: &TypeExpr,
    ctx: &BindingContext<'_>,
) -> Result<TypeDescriptor, ResolutionError> {
    Resolver {
        ctx,
        active: Vec::new(),
    }
    .resolve(expr)
}

struct Resolver<'c, 'a> {
    ctx: &'c BindingContext<'a>,
    // Parameters whose bound is being resolved.
    active: Vec<&'static str>,
}

impl Resolver<'_, '_> {
    fn resolve(&mut self, expr: &TypeExpr) -> Result<TypeDescriptor, ResolutionError> {
        match expr {
            TypeExpr::Param(name) => self.resolve_param(name),
            TypeExpr::Concrete(info) => Ok(info().descriptor()),
            TypeExpr::Parameterized(info, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(info().descriptor().with_args(args))
            }
            TypeExpr::Wildcard(kind, bounds) => {
                for bound in bounds.iter() {
                    let resolved = self.resolve(bound)?;
                    if resolved.is_concrete() {
                        return Ok(TypeDescriptor::Wildcard(*kind, Box::new(resolved)));
                    }
                }
                Ok(TypeDescriptor::Wildcard(*kind, Box::new(TypeDescriptor::Dynamic)))
            }
        }
    }

    fn resolve_param(&mut self, name: &'static str) -> Result<TypeDescriptor, ResolutionError> {
        let unbound = || ResolutionError::UnboundParameter {
            owner: self.ctx.owner().to_string(),
            param: name.to_string(),
        };
        let Some(binding) = self.ctx.get(name) else {
            return Err(unbound());
        };

        match (&binding.arg, binding.bound) {
            (Some(arg), _) if arg.is_concrete() => Ok(arg.clone()),
            (_, Some(bound)) if self.active.contains(&name) => Ok(erased_bound(bound)),
            (_, Some(bound)) => {
                self.active.push(name);
                let resolved = self.resolve(bound);
                self.active.pop();
                resolved
            }
            (Some(arg), None) => Ok(arg.clone()),
            (None, None) => Err(unbound()),
        }
    }
}

// A self-referencing bound stops at its raw type.
fn erased_bound(bound: &TypeExpr) -> TypeDescriptor {
    match bound {
        TypeExpr::Concrete(info) | TypeExpr::Parameterized(info, _) => info().descriptor().erased(),
        TypeExpr::Param(_) | TypeExpr::Wildcard(..) => TypeDescriptor::Dynamic,
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use alloc::sync::Arc;
    use alloc::vec;

    use crate::access::{BindMut, BindRef};
    use crate::cell::NonGenericTypeInfoCell;
    use crate::error::ResolutionError;
    use crate::info::{BoundKind, FieldInfo, GenericParam, ObjectInfo, RawType};
    use crate::info::{ScalarKind, TypeDescriptor, TypeExpr, TypeInfo};
    use crate::resolve::{BindingContext, resolve};
    use crate::{Bind, DynBind, DynValue};

    #[derive(Bind, Default)]
    struct Circle {
        pub radius: f64,
    }

    #[derive(Bind, Default)]
    #[bind(bound(T = Circle))]
    struct Bounded<T> {
        pub value: T,
    }

    #[derive(Bind, Default)]
    struct Open<T> {
        pub value: T,
    }

    #[derive(Bind, Default)]
    #[bind(bound(T = Node<T>))]
    struct Node<T> {
        pub next: Option<T>,
    }

    // A raw declaration: one parameter without argument or bound.
    struct Raw;

    impl Bind for Raw {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::Object(
                    ObjectInfo::new::<Raw>("tests::Raw", [] as [FieldInfo; 0])
                        .with_generics([GenericParam::unbound("T")].into()),
                )
            })
        }
    }

    impl DynBind for Raw {
        fn dyn_type_info(&self) -> &'static TypeInfo {
            Self::type_info()
        }

        fn bind_ref(&self) -> BindRef<'_> {
            BindRef::Value(self)
        }

        fn bind_mut(&mut self) -> BindMut<'_> {
            BindMut::Value(self)
        }
    }

    fn circle() -> TypeDescriptor {
        Circle::type_info().descriptor()
    }

    #[test]
    fn binding_wins_over_bound() {
        let info = <Bounded<DynValue>>::type_info().as_object().unwrap();
        let ctx = BindingContext::for_object(info, &[TypeDescriptor::Scalar(ScalarKind::I32)]);
        let value = resolve(info.field("value").unwrap().declared(), &ctx).unwrap();
        assert_eq!(value, TypeDescriptor::Scalar(ScalarKind::I32));
    }

    #[test]
    fn dynamic_argument_falls_back_to_bound() {
        let info = <Bounded<DynValue>>::type_info().as_object().unwrap();
        let ctx = BindingContext::for_object(info, &[]);
        let value = resolve(info.field("value").unwrap().declared(), &ctx).unwrap();
        assert_eq!(value, circle());
    }

    #[test]
    fn dynamic_argument_without_bound_stays_dynamic() {
        let info = <Open<DynValue>>::type_info().as_object().unwrap();
        let ctx = BindingContext::for_object(info, &[]);
        let value = resolve(info.field("value").unwrap().declared(), &ctx).unwrap();
        assert_eq!(value, TypeDescriptor::Dynamic);
    }

    #[test]
    fn unknown_parameter_fails() {
        let ctx = BindingContext::empty("tests::Empty");
        assert!(matches!(
            resolve(&TypeExpr::param("T"), &ctx),
            Err(ResolutionError::UnboundParameter { .. })
        ));
    }

    #[test]
    fn unbound_parameter_fails() {
        let info = Raw::type_info().as_object().unwrap();
        let ctx = BindingContext::for_object(info, &[]);
        let err = resolve(&TypeExpr::param("T"), &ctx).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::UnboundParameter {
                owner: "tests::Raw".to_string(),
                param: "T".to_string(),
            }
        );
    }

    #[test]
    fn self_reference_stops_after_one_level() {
        let info = <Node<DynValue>>::type_info().as_object().unwrap();
        let ctx = BindingContext::for_object(info, &[]);
        let next = resolve(info.field("next").unwrap().declared(), &ctx).unwrap();

        let raw = RawType::new(info.raw().path());
        let erased = TypeDescriptor::Object(raw, Arc::from(vec![]));
        let expected = TypeDescriptor::Optional(Box::new(TypeDescriptor::Object(
            raw,
            Arc::from(vec![erased]),
        )));
        assert_eq!(next, expected);
    }

    #[test]
    fn wildcard_takes_first_concrete_bound() {
        let ctx = BindingContext::empty("tests::Empty");
        let wildcard = TypeExpr::upper(vec![TypeExpr::of::<DynValue>(), TypeExpr::of::<Circle>()]);
        assert_eq!(
            resolve(&wildcard, &ctx).unwrap(),
            TypeDescriptor::Wildcard(BoundKind::Upper, Box::new(circle()))
        );

        let only_dynamic = TypeExpr::lower(vec![TypeExpr::of::<DynValue>()]);
        assert_eq!(
            resolve(&only_dynamic, &ctx).unwrap(),
            TypeDescriptor::Wildcard(BoundKind::Lower, Box::new(TypeDescriptor::Dynamic))
        );
    }

    #[test]
    fn parameterized_rebuilds_arguments() {
        let info = <Bounded<DynValue>>::type_info().as_object().unwrap();
        let ctx = BindingContext::for_object(info, &[circle()]);
        let expr = TypeExpr::parameterized::<alloc::collections::BTreeMap<alloc::string::String, DynValue>>(
            vec![TypeExpr::of::<alloc::string::String>(), TypeExpr::param("T")],
        );
        assert_eq!(
            resolve(&expr, &ctx).unwrap().to_string(),
            "BTreeMap<String, Circle>"
        );
    }
}
