use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::access::{MapAccess, downcast_value};
use crate::cell::GenericTypeInfoCell;
use crate::error::BindError;
use crate::impls::impl_dyn_bind;
use crate::info::{MapInfo, MapKind, TypeInfo};
use crate::registry::TypeRegistry;
use crate::{Bind, DynBind};

fn collect_entries<C, K, V>(
    entries: Vec<(Box<dyn DynBind>, Box<dyn DynBind>)>,
) -> Result<Box<dyn DynBind>, BindError>
where
    C: Bind + FromIterator<(K, V)>,
    K: Bind,
    V: Bind,
{
    let collected = entries
        .into_iter()
        .map(|(key, value)| Ok((downcast_value::<K>(key)?, downcast_value::<V>(value)?)))
        .collect::<Result<C, BindError>>()?;
    Ok(Box::new(collected))
}

// -----------------------------------------------------------------------------
// HashMap

impl<K, V, S> Bind for HashMap<K, V, S>
where
    K: Bind + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self, K, V>(
                MapKind::HashMap,
                collect_entries::<Self, K, V>,
            ))
        })
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

impl<K, V, S> DynBind for HashMap<K, V, S>
where
    K: Bind + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    impl_dyn_bind!(Map, Value);
}

impl<K, V, S> MapAccess for HashMap<K, V, S>
where
    K: Bind + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn DynBind, &dyn DynBind)> + '_> {
        Box::new(
            HashMap::iter(self).map(|(key, value)| (key as &dyn DynBind, value as &dyn DynBind)),
        )
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: Bind + Ord, V: Bind> Bind for BTreeMap<K, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self, K, V>(
                MapKind::BTreeMap,
                collect_entries::<Self, K, V>,
            ))
        })
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

impl<K: Bind + Ord, V: Bind> DynBind for BTreeMap<K, V> {
    impl_dyn_bind!(Map, Value);
}

impl<K: Bind + Ord, V: Bind> MapAccess for BTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn DynBind, &dyn DynBind)> + '_> {
        Box::new(
            BTreeMap::iter(self).map(|(key, value)| (key as &dyn DynBind, value as &dyn DynBind)),
        )
    }
}
