use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

/// Names of the owner fields a notification refers to.
///
/// Kept sorted and free of duplicates. Most notifications point at a single
/// field, so one name is stored inline. An empty set marks an entity-level
/// notification; empty names are dropped, so `""` means entity-level too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldSet(SmallVec<[String; 1]>);

impl FieldSet {
    pub fn empty() -> Self {
        FieldSet(SmallVec::new())
    }

    pub fn single(field: impl Into<String>) -> Self {
        let field = field.into();
        if field.is_empty() {
            return FieldSet::empty();
        }

        let mut names = SmallVec::new();
        names.push(field);
        FieldSet(names)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.binary_search_by(|name| name.as_str().cmp(field)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_subset_of(&self, other: &FieldSet) -> bool {
        self.iter().all(|field| other.contains(field))
    }

    /// Whether a record carrying `existing` answers a lookup for `self`.
    ///
    /// Entity-level lookups only match entity-level records. Otherwise every
    /// requested field must be present on the record.
    pub fn matches(&self, existing: &FieldSet) -> bool {
        if self.is_empty() {
            existing.is_empty()
        } else {
            self.is_subset_of(existing)
        }
    }

    fn normalize(mut names: SmallVec<[String; 1]>) -> Self {
        names.retain(|name| !name.is_empty());
        names.sort();
        names.dedup();
        FieldSet(names)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::normalize(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for FieldSet {
    fn from(field: &str) -> Self {
        FieldSet::single(field)
    }
}

impl From<String> for FieldSet {
    fn from(field: String) -> Self {
        FieldSet::single(field)
    }
}

impl From<Option<&str>> for FieldSet {
    fn from(field: Option<&str>) -> Self {
        field.map_or_else(FieldSet::empty, FieldSet::single)
    }
}

impl<const N: usize> From<[&str; N]> for FieldSet {
    fn from(fields: [&str; N]) -> Self {
        fields.into_iter().collect()
    }
}

impl std::fmt::Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", itertools::join(self.iter(), ", "))
    }
}

impl Serialize for FieldSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}
