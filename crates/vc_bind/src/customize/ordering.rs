use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;

/// A user supplied property order.
pub trait OrderStrategy: Send + Sync {
    /// Compares two JSON property names.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> OrderStrategy for F
where
    F: Fn(&str, &str) -> Ordering + Send + Sync,
{
    #[inline]
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Order of the properties written for an object.
///
/// Applies to the properties that the type's explicit order list does not
/// name; those are written after the listed ones.
#[derive(Clone, Default)]
pub enum PropertyOrdering {
    /// Declaration order, ancestors first.
    #[default]
    Any,
    /// By JSON name.
    Lexicographical,
    /// By JSON name, descending.
    Reverse,
    Custom(Arc<dyn OrderStrategy>),
}

impl PropertyOrdering {
    pub fn custom(strategy: impl OrderStrategy + 'static) -> Self {
        Self::Custom(Arc::new(strategy))
    }

    /// Stable-sorts `items` by the names `name` returns.
    ///
    /// # Example
    ///
    /// ```
    /// use vc_bind::customize::PropertyOrdering;
    ///
    /// let mut names = vec!["b", "c", "a"];
    /// PropertyOrdering::Reverse.sort(&mut names, |name| name);
    /// assert_eq!(names, ["c", "b", "a"]);
    ///
    /// PropertyOrdering::Any.sort(&mut names, |name| name);
    /// assert_eq!(names, ["c", "b", "a"]);
    /// ```
    pub fn sort<T>(&self, items: &mut [T], name: impl Fn(&T) -> &str) {
        match self {
            Self::Any => {}
            Self::Lexicographical => items.sort_by(|a, b| name(a).cmp(name(b))),
            Self::Reverse => items.sort_by(|a, b| name(b).cmp(name(a))),
            Self::Custom(strategy) => items.sort_by(|a, b| strategy.compare(name(a), name(b))),
        }
    }
}

impl fmt::Debug for PropertyOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Lexicographical => f.write_str("Lexicographical"),
            Self::Reverse => f.write_str("Reverse"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::PropertyOrdering;

    #[test]
    fn strategies_sort_by_name() {
        let mut names = vec!["dString", "aField", "cFirst", "bString"];
        PropertyOrdering::Lexicographical.sort(&mut names, |name| name);
        assert_eq!(names, ["aField", "bString", "cFirst", "dString"]);

        let by_len = PropertyOrdering::custom(|a: &str, b: &str| a.len().cmp(&b.len()));
        let mut names = vec!["ccc", "a", "bb", "d"];
        by_len.sort(&mut names, |name| name);
        assert_eq!(names, ["a", "d", "bb", "ccc"]);
    }
}
