use alloc::vec::Vec;

use crate::info::TypeDescriptor;

/// Combines the descriptor resolved for a member with the descriptor of the
/// type that actually stores it.
///
/// Dynamic slots on either side take the other side's shape, so a
/// `Vec<DynValue>` resolved as `Vec<Circle>` yields `Vec<Circle>`. Returns
/// `None` when the shapes differ.
///
/// # Example
///
/// ```
/// use vc_bind::{Bind, DynValue};
/// use vc_bind::resolve::reconcile;
///
/// let stored = <Vec<DynValue>>::type_info().descriptor();
/// let resolved = <Vec<f32>>::type_info().descriptor();
/// assert_eq!(reconcile(&resolved, &stored), Some(resolved.clone()));
///
/// let other = <Vec<String>>::type_info().descriptor();
/// assert_eq!(reconcile(&other, &resolved), None);
/// ```
pub fn reconcile(resolved: &TypeDescriptor, actual: &TypeDescriptor) -> Option<TypeDescriptor> {
    if !actual.is_concrete() {
        return Some(resolved.clone());
    }
    let resolved = resolved.unwrap_wildcard();
    if !resolved.is_concrete() {
        return Some(actual.clone());
    }
    if resolved == actual {
        return Some(actual.clone());
    }
    if resolved.erased() != actual.erased() {
        return None;
    }

    let resolved_args = resolved.args();
    let actual_args = actual.args();
    if resolved_args.len() != actual_args.len() {
        return None;
    }
    let args = resolved_args
        .into_iter()
        .zip(actual_args)
        .map(|(resolved, actual)| reconcile(resolved, actual))
        .collect::<Option<Vec<_>>>()?;
    Some(actual.with_args(args))
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::reconcile;
    use crate::info::{BoundKind, ScalarKind, TypeDescriptor};
    use crate::{Bind, DynValue};

    #[test]
    fn wildcards_are_looked_through() {
        let bound = TypeDescriptor::Wildcard(
            BoundKind::Upper,
            Box::new(TypeDescriptor::Scalar(ScalarKind::I32)),
        );
        assert_eq!(
            reconcile(&bound, &<DynValue>::type_info().descriptor()),
            Some(bound.clone())
        );
        assert_eq!(
            reconcile(&bound, &<i32>::type_info().descriptor()),
            Some(TypeDescriptor::Scalar(ScalarKind::I32))
        );
    }

    #[test]
    fn nested_dynamic_slots_take_the_resolved_shape() {
        let stored = <Option<Vec<DynValue>>>::type_info().descriptor();
        let resolved = <Option<Vec<u8>>>::type_info().descriptor();
        assert_eq!(reconcile(&resolved, &stored), Some(resolved.clone()));
        assert_eq!(reconcile(&stored, &resolved), Some(resolved.clone()));
        assert_eq!(
            reconcile(&<Option<u8>>::type_info().descriptor(), &stored),
            None
        );
    }
}
