use alloc::boxed::Box;
use alloc::collections::{BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use crate::access::{Sequence, downcast_value};
use crate::cell::GenericTypeInfoCell;
use crate::error::{BindError, ConstructionError};
use crate::impls::impl_dyn_bind;
use crate::info::{SequenceInfo, SequenceKind, TypeInfo};
use crate::registry::TypeRegistry;
use crate::{Bind, DynBind};

// -----------------------------------------------------------------------------
// Helpers

fn collect_items<C, T>(items: Vec<Box<dyn DynBind>>) -> Result<Box<dyn DynBind>, BindError>
where
    C: Bind + FromIterator<T>,
    T: Bind,
{
    let collected = items
        .into_iter()
        .map(downcast_value::<T>)
        .collect::<Result<C, BindError>>()?;
    Ok(Box::new(collected))
}

fn collect_array<T: Bind, const N: usize>(
    items: Vec<Box<dyn DynBind>>,
) -> Result<Box<dyn DynBind>, BindError> {
    let actual = items.len();
    let items = items
        .into_iter()
        .map(downcast_value::<T>)
        .collect::<Result<Vec<T>, BindError>>()?;
    let array: [T; N] = items.try_into().map_err(|_| ConstructionError::LengthMismatch {
        ty: core::any::type_name::<[T; N]>().into(),
        expected: N,
        actual,
    })?;
    Ok(Box::new(array))
}

macro_rules! sequence_info {
    ($variant:ident, $kind:expr, $collect:expr) => {{
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::$variant(SequenceInfo::new::<Self, T>($kind, $collect))
        })
    }};
}

// -----------------------------------------------------------------------------
// Arrays

impl<T: Bind> Bind for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Array, SequenceKind::Vec, collect_items::<Self, T>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind> DynBind for Vec<T> {
    impl_dyn_bind!(Sequence, Value);
}

impl<T: Bind> Sequence for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn DynBind))
    }
}

impl<T: Bind> Bind for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Array, SequenceKind::BoxedSlice, collect_items::<Self, T>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind> DynBind for Box<[T]> {
    impl_dyn_bind!(Sequence, Value);
}

impl<T: Bind> Sequence for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn DynBind))
    }
}

impl<T: Bind, const N: usize> Bind for [T; N] {
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Array, SequenceKind::Fixed(N), collect_array::<T, N>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind, const N: usize> DynBind for [T; N] {
    impl_dyn_bind!(Sequence, Value);
}

impl<T: Bind, const N: usize> Sequence for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn DynBind))
    }
}

// -----------------------------------------------------------------------------
// Collections

impl<T: Bind> Bind for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Collection, SequenceKind::VecDeque, collect_items::<Self, T>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind> DynBind for VecDeque<T> {
    impl_dyn_bind!(Sequence, Value);
}

impl<T: Bind> Sequence for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(VecDeque::iter(self).map(|item| item as &dyn DynBind))
    }
}

impl<T: Bind> Bind for LinkedList<T> {
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Collection, SequenceKind::LinkedList, collect_items::<Self, T>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind> DynBind for LinkedList<T> {
    impl_dyn_bind!(Sequence, Value);
}

impl<T: Bind> Sequence for LinkedList<T> {
    #[inline]
    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(LinkedList::iter(self).map(|item| item as &dyn DynBind))
    }
}

impl<T, S> Bind for HashSet<T, S>
where
    T: Bind + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Collection, SequenceKind::HashSet, collect_items::<Self, T>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T, S> DynBind for HashSet<T, S>
where
    T: Bind + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    impl_dyn_bind!(Sequence, Value);
}

impl<T, S> Sequence for HashSet<T, S>
where
    T: Bind + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(HashSet::iter(self).map(|item| item as &dyn DynBind))
    }
}

impl<T: Bind + Ord> Bind for BTreeSet<T> {
    fn type_info() -> &'static TypeInfo {
        sequence_info!(Collection, SequenceKind::BTreeSet, collect_items::<Self, T>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind + Ord> DynBind for BTreeSet<T> {
    impl_dyn_bind!(Sequence, Value);
}

impl<T: Bind + Ord> Sequence for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_> {
        Box::new(BTreeSet::iter(self).map(|item| item as &dyn DynBind))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::access::BindRef;
    use crate::info::{SequenceKind, TypeDescriptor, TypeKind};
    use crate::{Bind, DynBind};

    #[test]
    fn fixed_arrays_check_length() {
        let info = <[u8; 2]>::type_info().as_sequence().unwrap();
        assert_eq!(info.kind(), SequenceKind::Fixed(2));

        let ok = info.from_items(vec![Box::new(1_u8) as Box<dyn DynBind>, Box::new(2_u8)]);
        assert_eq!(ok.unwrap().downcast_ref::<[u8; 2]>(), Some(&[1, 2]));

        let short = info.from_items(vec![Box::new(1_u8) as Box<dyn DynBind>]);
        assert!(short.is_err());
    }

    #[test]
    fn collections_iterate_items() {
        let set: alloc::collections::BTreeSet<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(<alloc::collections::BTreeSet<i32>>::type_info().kind(), TypeKind::Collection);
        let BindRef::Sequence(items) = set.bind_ref() else {
            panic!("expected a sequence");
        };
        let values: alloc::vec::Vec<i32> = items
            .iter()
            .map(|item| *item.downcast_ref::<i32>().unwrap())
            .collect();
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn boxed_slice_descriptor() {
        assert_eq!(
            <Box<[u8]>>::type_info().descriptor().to_string(),
            "Box<[u8]>"
        );
        assert!(<Box<[u8]>>::type_info().descriptor().is_bytes());
        assert!(matches!(
            <Vec<u8>>::type_info().descriptor(),
            TypeDescriptor::Array(SequenceKind::Vec, _)
        ));
    }
}
