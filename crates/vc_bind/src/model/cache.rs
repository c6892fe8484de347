use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{Mutex, PoisonError, RwLock};

use log::debug;

use crate::error::{BindError, ModelError};
use crate::hash::HashMap;
use crate::info::{TypeDescriptor, TypeInfo};
use crate::model::ClassModel;

type Key = (TypeId, TypeDescriptor);

// `None` until the first successful build or model failure.
type Slot = Mutex<Option<Result<Arc<ClassModel>, ModelError>>>;

/// The class models of one [`Jsonb`](crate::Jsonb) instance.
///
/// Keyed by the storage type and the resolved descriptor, so two
/// instantiations of one generic definition get distinct models. Each key
/// has its own slot: concurrent requests for one key wait for a single
/// build, requests for other keys only share the short map lock.
///
/// [`ModelError`]s are cached and returned for every later request; any
/// other failure leaves the key free for another attempt.
#[derive(Default)]
pub struct ModelCache {
    entries: RwLock<HashMap<Key, Arc<Slot>>>,
}

impl ModelCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached model of `info` as `descriptor`, building it with
    /// `build` on first use.
    pub fn get_or_build(
        &self,
        info: &'static TypeInfo,
        descriptor: &TypeDescriptor,
        build: impl FnOnce() -> Result<ClassModel, BindError>,
    ) -> Result<Arc<ClassModel>, BindError> {
        let slot = self.slot(info.type_id(), descriptor);
        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(result) = slot.as_ref() {
            return result.clone().map_err(BindError::from);
        }

        match build() {
            Ok(model) => {
                debug!("built class model of `{descriptor}` for `{}`", info.type_path());
                let model = Arc::new(model);
                *slot = Some(Ok(model.clone()));
                Ok(model)
            }
            Err(BindError::Model(err)) => {
                debug!("class model of `{descriptor}` is unusable: {err}");
                *slot = Some(Err(err.clone()));
                Err(err.into())
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the cached outcome without building.
    pub fn get(
        &self,
        type_id: TypeId,
        descriptor: &TypeDescriptor,
    ) -> Option<Result<Arc<ClassModel>, ModelError>> {
        let slot = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(type_id, descriptor.clone()))
            .cloned()?;
        let slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    }

    /// Number of keys requested so far, settled or not.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, type_id: TypeId, descriptor: &TypeDescriptor) -> Arc<Slot> {
        let key = (type_id, descriptor.clone());
        if let Some(slot) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return slot.clone();
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_default()
            .clone()
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::Cell;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    use super::*;
    use crate::customize::{CustomizationRecord, NamingStrategy};
    use crate::error::ResolutionError;
    use crate::model::build;
    use crate::{Bind, Jsonb, JsonbConfig};

    #[derive(Bind, Default)]
    struct Plain {
        pub a: u8,
    }

    fn plain() -> (&'static TypeInfo, TypeDescriptor) {
        let info = Plain::type_info();
        (info, info.descriptor())
    }

    #[test]
    fn models_are_built_once() {
        let cache = ModelCache::new();
        let record = CustomizationRecord::default();
        let (info, descriptor) = plain();
        let builds = Cell::new(0);

        for _ in 0..3 {
            cache
                .get_or_build(info, &descriptor, || {
                    builds.set(builds.get() + 1);
                    build(info, &descriptor, &record)
                })
                .unwrap();
        }
        assert_eq!(builds.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn model_failures_are_permanent() {
        let cache = ModelCache::new();
        let (info, descriptor) = plain();
        let builds = Cell::new(0);
        let failing = || -> Result<ClassModel, BindError> {
            builds.set(builds.get() + 1);
            Err(ModelError::NotAnObject { ty: "x".into() }.into())
        };

        assert!(cache.get_or_build(info, &descriptor, failing).is_err());
        let again = cache.get_or_build(info, &descriptor, || {
            builds.set(builds.get() + 1);
            build(info, &descriptor, &CustomizationRecord::default())
        });
        assert!(matches!(again, Err(BindError::Model(ModelError::NotAnObject { .. }))));
        assert_eq!(builds.get(), 1);
        assert!(matches!(cache.get(info.type_id(), &descriptor), Some(Err(_))));
    }

    #[test]
    fn other_failures_are_retried() {
        let cache = ModelCache::new();
        let (info, descriptor) = plain();
        let unregistered = cache.get_or_build(info, &descriptor, || {
            Err(ResolutionError::Unregistered { descriptor: "x".into() }.into())
        });
        assert!(unregistered.is_err());
        assert!(cache.get(info.type_id(), &descriptor).is_none());

        let model = cache
            .get_or_build(info, &descriptor, || {
                build(info, &descriptor, &CustomizationRecord::default())
            })
            .unwrap();
        assert_eq!(model.properties().len(), 1);
    }

    #[test]
    fn concurrent_requests_share_one_build() {
        const THREADS: usize = 8;

        let cache = ModelCache::new();
        let record = CustomizationRecord::default();
        let (info, descriptor) = plain();
        let builds = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let models: Vec<Arc<ClassModel>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        cache
                            .get_or_build(info, &descriptor, || {
                                builds.fetch_add(1, Ordering::SeqCst);
                                build(info, &descriptor, &record)
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert!(models.iter().all(|model| Arc::ptr_eq(model, &models[0])));
    }

    #[derive(Bind, Default)]
    struct Named {
        pub name: u8,
    }

    #[test]
    fn engines_keep_separate_caches() {
        let identity = Jsonb::new();
        let camel = Jsonb::with_config(JsonbConfig::new().with_naming(NamingStrategy::UpperCamelCase));

        let first = identity.class_model::<Named>().unwrap();
        let second = camel.class_model::<Named>().unwrap();
        assert_eq!(first.properties()[0].write_name(), "name");
        assert_eq!(second.properties()[0].write_name(), "Name");
        assert!(!Arc::ptr_eq(&first, &second));

        assert_eq!(identity.models().len(), 1);
        assert_eq!(camel.models().len(), 1);
        assert_eq!(identity.to_json(&Named { name: 1 }).unwrap(), r#"{"name":1}"#);
        assert_eq!(camel.to_json(&Named { name: 1 }).unwrap(), r#"{"Name":1}"#);
    }
}
