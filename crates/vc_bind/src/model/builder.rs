use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::DateFormat;
use crate::convert::NumberFormat;
use crate::customize::{CustomizationRecord, MergedSide, merge_side};
use crate::error::{BindError, ModelError, ResolutionError};
use crate::hash::{HashMap, HashSet};
use crate::info::{AccessorInfo, AccessorKind, CreatorInfo, Customization, FieldInfo};
use crate::info::{ObjectInfo, TypeDescriptor, TypeInfo};
use crate::model::{Access, ClassModel, CreatorModel, CreatorParamModel, Member};
use crate::model::{PropertyModel, SideModel};
use crate::resolve::{BindingContext, reconcile, resolve};

static NO_LAYER: Customization = Customization::new();

/// Builds the class model of `info` instantiated as `descriptor`.
pub(crate) fn build(
    info: &'static TypeInfo,
    descriptor: &TypeDescriptor,
    record: &CustomizationRecord,
) -> Result<ClassModel, BindError> {
    let ty = info.type_path();
    let object = info
        .as_object()
        .map_err(|_| ModelError::NotAnObject { ty: ty.into() })?;
    let ctx = BindingContext::for_object(object, object_args(descriptor));

    let mut collector = Collector {
        record,
        properties: Vec::new(),
    };
    collector.collect(object, &ctx, &mut Vec::new())?;
    let mut properties = collector.properties;

    sort(object, record, &mut properties);
    let case_insensitive = record.naming.is_case_insensitive();
    let read_index = index(ty, case_insensitive, &properties)?;
    let creator = creator(ty, object, &properties, &read_index, case_insensitive)?;

    Ok(ClassModel {
        info,
        descriptor: descriptor.clone(),
        properties: properties.into_boxed_slice(),
        read_index,
        case_insensitive,
        creator,
    })
}

fn object_args(descriptor: &TypeDescriptor) -> &[TypeDescriptor] {
    match descriptor {
        TypeDescriptor::Object(_, args) => &args[..],
        _ => &[],
    }
}

// -----------------------------------------------------------------------------
// Candidates

struct Collector<'r> {
    record: &'r CustomizationRecord,
    properties: Vec<PropertyModel>,
}

impl Collector<'_> {
    /// Collects the properties of `object`, ancestors first.
    fn collect(
        &mut self,
        object: &'static ObjectInfo,
        ctx: &BindingContext<'_>,
        path: &mut Vec<usize>,
    ) -> Result<(), BindError> {
        for field in object.fields().iter().filter(|field| field.is_parent()) {
            let storage = field.type_info();
            let descriptor = resolve_member(field.name(), field, storage, ctx)?;
            let parent = storage.as_object().map_err(|_| ModelError::NotAnObject {
                ty: storage.type_path().into(),
            })?;
            let parent_ctx = BindingContext::for_object(parent, object_args(&descriptor));

            path.push(field.index());
            self.collect(parent, &parent_ctx, path)?;
            path.pop();
        }

        for name in member_names(object) {
            let candidate = self.candidate(object, ctx, path, name)?;
            let existing = self.properties.iter().position(|property| property.name == name);
            // The most derived declaration replaces the inherited one in place.
            match (existing, candidate) {
                (Some(position), Some(property)) => self.properties[position] = property,
                (Some(position), None) => {
                    self.properties.remove(position);
                }
                (None, Some(property)) => self.properties.push(property),
                (None, None) => {}
            }
        }
        Ok(())
    }

    fn candidate(
        &self,
        object: &'static ObjectInfo,
        ctx: &BindingContext<'_>,
        path: &[usize],
        name: &'static str,
    ) -> Result<Option<PropertyModel>, BindError> {
        let field = object
            .fields()
            .iter()
            .find(|field| !field.is_parent() && field.name() == name);
        if field.is_some_and(|field| field.modifiers().is_excluded()) {
            return Ok(None);
        }
        let getter = accessor(object, AccessorKind::Getter, name);
        let setter = accessor(object, AccessorKind::Setter, name);

        let visibility = &*self.record.visibility;
        let visible_field = field.filter(|field| visibility.is_field_visible(object, field));
        let field_access = visible_field.map(|field| Access::new(path, Member::Field(field.index())));
        let mut read = match getter {
            Some(getter) if visibility.is_accessor_visible(object, getter) => {
                Some(Access::new(path, Member::Getter(getter.index())))
            }
            _ => field_access.clone(),
        };
        let mut write = match setter {
            Some(setter) if visibility.is_accessor_visible(object, setter) => {
                Some(Access::new(path, Member::Setter(setter.index())))
            }
            _ => field_access,
        };

        let owner = object.raw();
        let package = self.record.package_layer(owner.module());
        let field_layer = field.map_or(&NO_LAYER, FieldInfo::customization);
        let getter_layer = getter.map_or(&NO_LAYER, AccessorInfo::customization);
        let setter_layer = setter.map_or(&NO_LAYER, AccessorInfo::customization);
        let type_layer = object.customization();
        let serialize = merge_side(
            owner.path(),
            name,
            &[package, type_layer, field_layer, getter_layer],
        )?;
        let deserialize = merge_side(
            owner.path(),
            name,
            &[package, type_layer, field_layer, setter_layer],
        )?;

        if serialize.excluded {
            read = None;
        }
        if deserialize.excluded {
            write = None;
        }
        if read.is_none() && write.is_none() {
            return Ok(None);
        }

        let (storage, descriptor) = match (field, getter.or(setter)) {
            (Some(field), _) => {
                let storage = field.type_info();
                (storage, resolve_member(name, field, storage, ctx)?)
            }
            (None, Some(accessor)) => {
                let storage = accessor.type_info();
                (storage, storage.descriptor())
            }
            (None, None) => return Ok(None),
        };

        let naming = &self.record.naming;
        let json_name = |side: &MergedSide| match &side.rename {
            Some(rename) => rename.to_string(),
            None => naming.translate(name),
        };

        Ok(Some(PropertyModel {
            name,
            owner,
            read_name: json_name(&deserialize),
            write_name: json_name(&serialize),
            descriptor,
            storage,
            getter: read,
            setter: write,
            serialize: side_model(serialize),
            deserialize: side_model(deserialize),
        }))
    }
}

/// Logical member names: fields in declaration order, then accessor-only names.
fn member_names(object: &ObjectInfo) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = object
        .fields()
        .iter()
        .filter(|field| !field.is_parent())
        .map(FieldInfo::name)
        .collect();
    for accessor in object.accessors() {
        if !names.contains(&accessor.name()) {
            names.push(accessor.name());
        }
    }
    names
}

fn accessor<'a>(
    object: &'a ObjectInfo,
    kind: AccessorKind,
    name: &str,
) -> Option<&'a AccessorInfo> {
    object
        .accessors_of(kind)
        .find(|accessor| accessor.name() == name && !accessor.modifiers().is_excluded())
}

fn resolve_member(
    name: &str,
    field: &FieldInfo,
    storage: &'static TypeInfo,
    ctx: &BindingContext<'_>,
) -> Result<TypeDescriptor, BindError> {
    let resolved = resolve(field.declared(), ctx)?;
    let actual = storage.descriptor();
    reconcile(&resolved, &actual).ok_or_else(|| {
        ResolutionError::IncompatibleBound {
            property: name.into(),
            resolved: resolved.to_string(),
            actual: actual.to_string(),
        }
        .into()
    })
}

fn side_model(merged: MergedSide) -> SideModel {
    SideModel {
        nillable: merged.nillable,
        date_format: merged.date_format.as_deref().map(DateFormat::parse),
        number_format: merged.number_format.as_deref().map(NumberFormat::parse),
        converter: merged.converter.map(Cow::into_owned),
    }
}

// -----------------------------------------------------------------------------
// Order and names

/// The explicit order first, then the ordering strategy over write names.
fn sort(object: &ObjectInfo, record: &CustomizationRecord, properties: &mut Vec<PropertyModel>) {
    let mut ordered = Vec::with_capacity(properties.len());
    if let Some(order) = object.order() {
        for name in order {
            if let Some(position) = properties.iter().position(|property| property.name == *name) {
                ordered.push(properties.remove(position));
            }
        }
    }
    record.ordering.sort(properties, PropertyModel::write_name);
    ordered.append(properties);
    *properties = ordered;
}

fn fold(name: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}

fn index(
    ty: &str,
    case_insensitive: bool,
    properties: &[PropertyModel],
) -> Result<HashMap<String, usize>, ModelError> {
    let clash = |name: &str| ModelError::PropertyNameClash {
        ty: ty.into(),
        name: name.into(),
    };

    let mut written: HashSet<&str> = HashSet::default();
    for property in properties.iter().filter(|property| property.is_readable()) {
        if !written.insert(property.write_name()) {
            return Err(clash(property.write_name()));
        }
    }

    // Read-only properties keep their keys so that they are skipped silently.
    let mut read_index = HashMap::default();
    for (index, property) in properties.iter().enumerate() {
        if !property.is_writable() {
            read_index.insert(fold(property.read_name(), case_insensitive), index);
        }
    }
    let mut read: HashSet<String> = HashSet::default();
    for (index, property) in properties.iter().enumerate() {
        if property.is_writable() {
            let key = fold(property.read_name(), case_insensitive);
            if !read.insert(key.clone()) {
                return Err(clash(property.read_name()));
            }
            read_index.insert(key, index);
        }
    }
    Ok(read_index)
}

// -----------------------------------------------------------------------------
// Creator

fn creator(
    ty: &str,
    object: &'static ObjectInfo,
    properties: &[PropertyModel],
    read_index: &HashMap<String, usize>,
    case_insensitive: bool,
) -> Result<Option<CreatorModel>, ModelError> {
    let designated: Vec<&'static CreatorInfo> = object
        .creators()
        .iter()
        .filter(|creator| creator.is_designated())
        .collect();
    let eligible = if designated.is_empty() {
        object.creators().iter().collect()
    } else {
        designated
    };

    let info = match eligible.as_slice() {
        [] => return Ok(None),
        [info] => *info,
        many => {
            return Err(ModelError::MultipleCreators {
                ty: ty.into(),
                count: many.len(),
            });
        }
    };

    let mut params = Vec::with_capacity(info.params().len());
    for (index, param) in info.params().iter().enumerate() {
        let Some(name) = param.name() else {
            return Err(ModelError::CreatorParameterNotAnnotated {
                ty: ty.into(),
                index,
                name: None,
            });
        };
        let storage = param.type_info();
        let actual = storage.descriptor();
        let property = read_index.get(&fold(name, case_insensitive)).copied();
        let descriptor = property
            .and_then(|index| properties.get(index))
            .and_then(|property| reconcile(property.descriptor(), &actual))
            .unwrap_or(actual);
        params.push(CreatorParamModel {
            name,
            descriptor,
            storage,
            property,
        });
    }

    Ok(Some(CreatorModel {
        info,
        params: params.into_boxed_slice(),
        case_insensitive,
    }))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::build;
    use crate::config::JsonbConfig;
    use crate::customize::{AllMembers, CustomizationRecord, NamingStrategy, PropertyOrdering};
    use crate::customize::PublicOnly;
    use crate::error::{BindError, ModelError, ResolutionError};
    use crate::info::TypeDescriptor;
    use crate::model::{ClassModel, Member};
    use crate::{Bind, DynValue};

    fn model_with<T: Bind>(config: JsonbConfig) -> Result<ClassModel, BindError> {
        let info = T::type_info();
        build(info, &info.descriptor(), &CustomizationRecord::from_config(&config))
    }

    fn model<T: Bind>() -> ClassModel {
        model_with::<T>(JsonbConfig::new()).unwrap()
    }

    fn write_names(model: &ClassModel) -> Vec<&str> {
        model.properties().iter().map(|p| p.write_name()).collect()
    }

    #[derive(Bind, Default)]
    #[bind(order("c"))]
    struct Ordered {
        pub b: u8,
        pub c: u8,
        pub a: u8,
    }

    #[test]
    fn explicit_order_precedes_strategy() {
        assert_eq!(write_names(&model::<Ordered>()), ["c", "b", "a"]);

        let config = JsonbConfig::new().with_ordering(PropertyOrdering::Lexicographical);
        assert_eq!(write_names(&model_with::<Ordered>(config).unwrap()), ["c", "a", "b"]);

        let config = JsonbConfig::new().with_ordering(PropertyOrdering::Reverse);
        assert_eq!(write_names(&model_with::<Ordered>(config).unwrap()), ["c", "b", "a"]);
    }

    #[derive(Bind, Default)]
    struct Account {
        pub owner: String,
        balance: u64,
        #[bind(skip)]
        pub cache: u8,
        #[bind(transient)]
        pub session: u8,
    }

    #[test]
    fn hidden_members_never_appear() {
        assert_eq!(write_names(&model::<Account>()), ["owner"]);

        let config = JsonbConfig::new().with_visibility(AllMembers);
        assert_eq!(write_names(&model_with::<Account>(config).unwrap()), ["owner", "balance"]);

        let raw = Account::type_info().as_object().unwrap().raw();
        let config = JsonbConfig::new().with_visibility(PublicOnly::new().allow(raw.path(), "balance"));
        assert_eq!(write_names(&model_with::<Account>(config).unwrap()), ["owner", "balance"]);
    }

    #[derive(Bind, Default)]
    #[bind(getter(name = "area", with = Self::area))]
    struct Square {
        pub side: f64,
    }

    impl Square {
        fn area(&self) -> f64 {
            self.side * self.side
        }
    }

    #[test]
    fn getter_only_properties_are_read_only() {
        let model = model::<Square>();
        let area = model.property("area").unwrap();
        assert!(area.is_readable());
        assert!(!area.is_writable());
        assert_eq!(area.getter().unwrap().member(), Member::Getter(0));
        assert!(model.property("side").unwrap().is_writable());
    }

    #[derive(Bind, Default)]
    struct Clash {
        pub first: u8,
        #[bind(rename = "first")]
        pub second: u8,
    }

    #[derive(Bind, Default)]
    struct Conflicted {
        #[bind(transient, rename = "v")]
        pub value: u8,
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(
            model_with::<Clash>(JsonbConfig::new()),
            Err(BindError::Model(ModelError::PropertyNameClash { name, .. })) if name == "first"
        ));
        assert!(matches!(
            model_with::<Conflicted>(JsonbConfig::new()),
            Err(BindError::Model(ModelError::TransientConflict { property, .. })) if property == "value"
        ));
    }

    #[derive(Bind, Default)]
    struct Base {
        pub id: u32,
        pub label: String,
    }

    #[derive(Bind, Default)]
    struct Derived {
        #[bind(parent)]
        pub base: Base,
        pub extra: bool,
        #[bind(rename = "title")]
        pub label: String,
    }

    #[test]
    fn inherited_properties_come_first() {
        let model = model::<Derived>();
        assert_eq!(write_names(&model), ["id", "title", "extra"]);

        let id = model.property("id").unwrap();
        assert_eq!(id.getter().unwrap().path(), [0]);
        assert_eq!(id.owner().name(), "Base");
        assert_eq!(model.property("label").unwrap().owner().name(), "Derived");
    }

    #[derive(Bind, Default)]
    struct Circle {
        pub radius: f64,
    }

    #[derive(Bind, Default)]
    struct Holder<T> {
        pub field: T,
        pub all: Vec<T>,
    }

    #[test]
    fn member_types_follow_the_requested_arguments() {
        let record = CustomizationRecord::default();
        let info = <Holder<DynValue>>::type_info();
        let descriptor = info.descriptor().with_args(vec![Circle::type_info().descriptor()]);

        let model = build(info, &descriptor, &record).unwrap();
        assert_eq!(model.property("field").unwrap().descriptor(), &Circle::type_info().descriptor());
        assert_eq!(model.property("all").unwrap().descriptor().to_string(), "Vec<Circle>");

        let open = build(info, &info.descriptor(), &record).unwrap();
        assert_eq!(open.property("field").unwrap().descriptor(), &TypeDescriptor::Dynamic);

        let concrete = <Holder<u8>>::type_info();
        assert!(matches!(
            build(concrete, &descriptor, &record),
            Err(BindError::Resolution(ResolutionError::IncompatibleBound { .. }))
        ));
    }

    #[derive(Bind)]
    #[bind(
        no_default,
        creator(with = Self::new, params("x": i32)),
        creator(with = Self::origin, params())
    )]
    struct TwoWays {
        pub x: i32,
    }

    #[derive(Bind)]
    #[bind(
        no_default,
        creator(with = Self::new, params("x": i32)),
        creator(with = Self::origin, params(), designated)
    )]
    struct Designated {
        pub x: i32,
    }

    #[derive(Bind)]
    #[bind(no_default, creator(with = Self::new, params("x": i32, _: i32)))]
    struct Unnamed {
        pub x: i32,
        pub y: i32,
    }

    impl TwoWays {
        fn new(x: i32) -> Self {
            Self { x }
        }

        fn origin() -> Self {
            Self { x: 0 }
        }
    }

    impl Designated {
        fn new(x: i32) -> Self {
            Self { x }
        }

        fn origin() -> Self {
            Self { x: 0 }
        }
    }

    impl Unnamed {
        fn new(x: i32, y: i32) -> Self {
            Self { x, y }
        }
    }

    #[test]
    fn creator_selection() {
        assert!(matches!(
            model_with::<TwoWays>(JsonbConfig::new()),
            Err(BindError::Model(ModelError::MultipleCreators { count: 2, .. }))
        ));

        let model = model::<Designated>();
        assert!(model.creator().unwrap().params().is_empty());

        assert!(matches!(
            model_with::<Unnamed>(JsonbConfig::new()),
            Err(BindError::Model(ModelError::CreatorParameterNotAnnotated {
                index: 1,
                name: None,
                ..
            }))
        ));
    }

    #[derive(Bind, Default)]
    struct Profile {
        pub nickname: String,
        #[bind(rename = "Mail")]
        pub email: String,
    }

    #[test]
    fn naming_strategies_apply_to_unrenamed_properties() {
        let config = JsonbConfig::new().with_naming(NamingStrategy::UpperCamelCase);
        let model = model_with::<Profile>(config).unwrap();
        assert_eq!(write_names(&model), ["Nickname", "Mail"]);

        let config = JsonbConfig::new().with_naming(NamingStrategy::CaseInsensitive);
        let model = model_with::<Profile>(config).unwrap();
        assert_eq!(model.property_for_key("NICKNAME").unwrap().name(), "nickname");
        assert_eq!(model.property_for_key("mail").unwrap().name(), "email");
    }
}
