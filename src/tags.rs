use std::{fmt, slice, vec};

/// A single tag, consisting of a key and a value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Tag {
    key: String,
    value: String,
}

/// The set of tags attached to a routed metric.
///
/// Tags behave like a small string map: keys are unique, and inserting an
/// existing key replaces its value. This is what gives template application
/// its merge semantics: positionally extracted tags override a rule's fixed
/// tags, which in turn override the router-wide defaults.
///
/// ```rust
/// # fn main() -> Result<(), tagmatch::ParseError> {
/// # let router = tagmatch::Router::new("measurement.host")?;
/// let (_, tags) = router.route("cpu.server01");
///
/// // Get a specific value by key.
/// assert_eq!(tags.get("host"), Some("server01"));
///
/// // Iterate through the keys and values.
/// for (key, value) in tags.iter() {
///     println!("{}={}", key, value);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Tags {
    // Sorted by key. Lookup and insertion both binary search, keeping
    // iteration order deterministic regardless of insertion order.
    inner: Vec<Tag>,
}

impl Tags {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Returns the number of tags.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no tags in the set.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the value of the tag with the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.inner
            .binary_search_by(|tag| tag.key.as_str().cmp(key))
            .ok()
            .map(|i| self.inner[i].value.as_str())
    }

    /// Returns `true` if a tag with the given key exists.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key/value pair, replacing the value of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.inner.binary_search_by(|tag| tag.key.cmp(&key)) {
            Ok(i) => self.inner[i].value = value.into(),
            Err(i) => self.inner.insert(
                i,
                Tag {
                    key,
                    value: value.into(),
                },
            ),
        }
    }

    /// Returns an iterator over the tags, sorted by key.
    pub fn iter(&self) -> TagsIter<'_> {
        TagsIter {
            inner: self.inner.iter(),
        }
    }
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        tags.extend(iter);
        tags
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Tags {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'t> IntoIterator for &'t Tags {
    type Item = (&'t str, &'t str);
    type IntoIter = TagsIter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Tags {
    type Item = (String, String);
    type IntoIter = TagsIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        TagsIntoIter {
            inner: self.inner.into_iter(),
        }
    }
}

/// An iterator over the keys and values of a metric's [tags](crate::Tags).
pub struct TagsIter<'t> {
    inner: slice::Iter<'t, Tag>,
}

impl<'t> Iterator for TagsIter<'t> {
    type Item = (&'t str, &'t str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|tag| (tag.key.as_str(), tag.value.as_str()))
    }
}

impl ExactSizeIterator for TagsIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An owning iterator over a metric's [tags](crate::Tags).
pub struct TagsIntoIter {
    inner: vec::IntoIter<Tag>,
}

impl Iterator for TagsIntoIter {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|tag| (tag.key, tag.value))
    }
}

impl ExactSizeIterator for TagsIntoIter {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
