use alloc::borrow::Cow;
use alloc::string::ToString;

use crate::error::ModelError;
use crate::info::Customization;

/// The customization of one side (serialization or deserialization) of a
/// property, after merging its layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedSide {
    /// The side is excluded by a `transient` marker.
    pub excluded: bool,
    /// The explicit JSON name, if any.
    pub rename: Option<Cow<'static, str>>,
    pub nillable: Option<bool>,
    pub date_format: Option<Cow<'static, str>>,
    pub number_format: Option<Cow<'static, str>>,
    pub converter: Option<Cow<'static, str>>,
}

/// Merges customization layers, ordered from the least to the most specific.
///
/// `ty` and `property` only name the failing member in errors.
///
/// A side whose winning `transient` marker meets a rename on any of its
/// layers is a [`ModelError::TransientConflict`].
///
/// # Example
///
/// ```
/// use vc_bind::customize::merge_side;
/// use vc_bind::info::Customization;
///
/// let field = Customization::new().with_transient(true);
/// let getter = Customization::new().with_nillable(true);
///
/// let read = merge_side("a::User", "key", &[&field, &getter]).unwrap();
/// assert!(read.excluded);
///
/// let getter = Customization::new().with_rename("id");
/// assert!(merge_side("a::User", "key", &[&field, &getter]).is_err());
/// ```
pub fn merge_side(
    ty: &str,
    property: &str,
    layers: &[&Customization],
) -> Result<MergedSide, ModelError> {
    let mut merged = MergedSide::default();
    let mut transient = false;

    for layer in layers {
        if let Some(value) = layer.transient {
            transient = value;
        }
        override_with(&mut merged.rename, &layer.rename);
        override_with(&mut merged.nillable, &layer.nillable);
        override_with(&mut merged.date_format, &layer.date_format);
        override_with(&mut merged.number_format, &layer.number_format);
        override_with(&mut merged.converter, &layer.converter);
    }

    if transient && merged.rename.is_some() {
        return Err(ModelError::TransientConflict {
            ty: ty.to_string(),
            property: property.to_string(),
        });
    }
    merged.excluded = transient;
    Ok(merged)
}

#[inline]
fn override_with<T: Clone>(slot: &mut Option<T>, layer: &Option<T>) {
    if layer.is_some() {
        slot.clone_from(layer);
    }
}

#[cfg(test)]
mod tests {
    use super::merge_side;
    use crate::error::ModelError;
    use crate::info::Customization;

    #[test]
    fn most_specific_layer_wins() {
        let package = Customization::new()
            .with_nillable(true)
            .with_date_format("%Y");
        let ty = Customization::new().with_date_format("%Y-%m");
        let field = Customization::new().with_rename("field_name");
        let accessor = Customization::new()
            .with_nillable(false)
            .with_rename("accessor_name");

        let merged = merge_side("a::T", "p", &[&package, &ty, &field, &accessor]).unwrap();
        assert_eq!(merged.nillable, Some(false));
        assert_eq!(merged.date_format.as_deref(), Some("%Y-%m"));
        assert_eq!(merged.rename.as_deref(), Some("accessor_name"));
        assert!(!merged.excluded);

        let merged = merge_side("a::T", "p", &[&package, &ty, &field]).unwrap();
        assert_eq!(merged.nillable, Some(true));
        assert_eq!(merged.rename.as_deref(), Some("field_name"));
    }

    #[test]
    fn transient_and_rename_on_one_layer_conflict() {
        let field = Customization::new().with_transient(true).with_rename("x");
        let err = merge_side("a::T", "p", &[&field]).unwrap_err();
        assert_eq!(
            err,
            ModelError::TransientConflict {
                ty: "a::T".into(),
                property: "p".into(),
            }
        );
    }

    #[test]
    fn transient_conflicts_with_renames_on_any_layer() {
        let conflict = ModelError::TransientConflict {
            ty: "a::T".into(),
            property: "p".into(),
        };

        let field = Customization::new().with_rename("x");
        let accessor = Customization::new().with_transient(true);
        assert_eq!(merge_side("a::T", "p", &[&field, &accessor]), Err(conflict.clone()));

        let field = Customization::new().with_transient(true);
        let accessor = Customization::new().with_rename("exposed");
        assert_eq!(merge_side("a::T", "p", &[&field, &accessor]), Err(conflict));
    }

    #[test]
    fn more_specific_layer_may_clear_the_marker() {
        let type_layer = Customization::new().with_transient(true);
        let field = Customization::new()
            .with_transient(false)
            .with_rename("x");
        let merged = merge_side("a::T", "p", &[&type_layer, &field]).unwrap();
        assert!(!merged.excluded);
        assert_eq!(merged.rename.as_deref(), Some("x"));

        let merged = merge_side("a::T", "p", &[&type_layer]).unwrap();
        assert!(merged.excluded);
    }
}
