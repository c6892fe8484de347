use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use log::trace;

use crate::config::JsonbConfig;
use crate::convert::{ComponentFactory, Converter};
use crate::error::ResolutionError;
use crate::hash::{HashMap, TypeIdMap};
use crate::info::{TypeInfo, TypeKind};

/// How a value is converted.
#[derive(Clone)]
pub enum Dispatch {
    /// A user supplied converter or adapter.
    Custom(Arc<dyn Converter>),
    /// The built-in converter of a non-object shape.
    Builtin(TypeKind),
    /// The class model of an object type.
    Object,
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom"),
            Self::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            Self::Object => f.write_str("Object"),
        }
    }
}

/// The converters of one [`Jsonb`](crate::Jsonb) instance.
///
/// Typed converters are fixed at construction. Named converters start with
/// the ones registered on the configuration; names missing there are handed
/// to the [`ComponentFactory`] once and the result is kept.
pub struct ConverterRegistry {
    typed: TypeIdMap<Arc<dyn Converter>>,
    named: RwLock<HashMap<String, Arc<dyn Converter>>>,
    factory: Option<Arc<dyn ComponentFactory>>,
}

impl ConverterRegistry {
    pub fn from_config(config: &JsonbConfig) -> Self {
        // Later registrations for the same type win.
        let typed = config
            .typed
            .iter()
            .map(|(ty, converter)| (ty.id(), converter.clone()))
            .collect();
        let named = config
            .named
            .iter()
            .map(|(name, converter)| (name.clone(), converter.clone()))
            .collect();
        Self {
            typed,
            named: RwLock::new(named),
            factory: config.component_factory.clone(),
        }
    }

    /// The converter registered for exactly this type.
    #[inline]
    pub fn typed(&self, type_id: TypeId) -> Option<Arc<dyn Converter>> {
        self.typed.get(&type_id).cloned()
    }

    /// Looks up a named converter, asking the component factory on a miss.
    pub fn named(&self, name: &str) -> Result<Arc<dyn Converter>, ResolutionError> {
        let cached = self
            .named
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        if let Some(converter) = cached {
            return Ok(converter);
        }

        let created = self.factory.as_ref().and_then(|factory| factory.create(name));
        let Some(converter) = created else {
            return Err(ResolutionError::UnknownConverter {
                name: name.to_string(),
            });
        };
        trace!("component factory created converter `{name}`");

        let mut named = self.named.write().unwrap_or_else(PoisonError::into_inner);
        Ok(named.entry(name.to_string()).or_insert(converter).clone())
    }

    /// Selects the converter of a value of type `info`.
    ///
    /// `member` is the converter named by the property being converted.
    pub fn dispatch(
        &self,
        info: &'static TypeInfo,
        member: Option<&str>,
    ) -> Result<Dispatch, ResolutionError> {
        if let Some(name) = member {
            trace!("`{}` uses the converter named `{name}`", info.type_path());
            return self.named(name).map(Dispatch::Custom);
        }
        if let Some(converter) = self.typed(info.type_id()) {
            trace!("`{}` uses a registered converter", info.type_path());
            return Ok(Dispatch::Custom(converter));
        }
        Ok(match info.kind() {
            TypeKind::Object => Dispatch::Object,
            kind => Dispatch::Builtin(kind),
        })
    }

    /// Returns `true` if no converter is registered.
    pub fn is_empty(&self) -> bool {
        self.typed.is_empty()
            && self.factory.is_none()
            && self.named.read().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let named = self.named.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ConverterRegistry")
            .field("typed", &self.typed.len())
            .field("named", &named.keys().collect::<alloc::vec::Vec<_>>())
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::*;
    use crate::error::BindError;
    use crate::marshal::Marshaller;
    use crate::unmarshal::Unmarshaller;
    use crate::{Bind, DynBind};

    struct Noop;

    impl Converter for Noop {
        fn encode(&self, _: &dyn DynBind, _: &mut Marshaller<'_>) -> Result<(), BindError> {
            Ok(())
        }

        fn decode(
            &self,
            _: &'static TypeInfo,
            _: &mut Unmarshaller<'_>,
        ) -> Result<Box<dyn DynBind>, BindError> {
            Ok(Box::new(0_u8))
        }
    }

    struct OnlyNoop;

    impl ComponentFactory for OnlyNoop {
        fn create(&self, name: &str) -> Option<Arc<dyn Converter>> {
            (name == "noop").then(|| Arc::new(Noop) as Arc<dyn Converter>)
        }
    }

    #[test]
    fn dispatch_order() {
        let registry =
            ConverterRegistry::from_config(&JsonbConfig::new().with_converter::<u8>(Noop));
        assert!(matches!(
            registry.dispatch(<u8>::type_info(), None),
            Ok(Dispatch::Custom(_))
        ));
        assert!(matches!(
            registry.dispatch(<u16>::type_info(), None),
            Ok(Dispatch::Builtin(TypeKind::Scalar))
        ));
        assert!(matches!(
            registry.dispatch(<u16>::type_info(), Some("missing")),
            Err(ResolutionError::UnknownConverter { .. })
        ));
    }

    #[test]
    fn factory_results_are_kept() {
        let config = JsonbConfig::new().with_component_factory(OnlyNoop);
        let registry = ConverterRegistry::from_config(&config);
        assert!(registry.named("noop").is_ok());
        assert!(registry.named("noop").is_ok());
        assert!(registry.named("other").is_err());
        assert_eq!(registry.named.read().unwrap().len(), 1);
    }
}
