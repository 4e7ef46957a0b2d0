use super::SegmentId;

type Inner<V> = indexmap::IndexMap<SegmentId, V, rustc_hash::FxBuildHasher>;

/// Values keyed by segment, defaulting to values of f64.
///
/// Offers must be reproducible from identical inputs, so iteration order may not
/// depend on a randomized hasher. We use an IndexMap with a fixed hasher, which
/// also keeps the insertion order of the source file when round-tripping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SegmentMap<V = f64>(Inner<V>);

impl<V> SegmentMap<V> {
    /// The first of `ids` that has no entry in this map, if any
    pub fn first_missing(&self, ids: impl IntoIterator<Item = SegmentId>) -> Option<SegmentId> {
        ids.into_iter().find(|id| !self.0.contains_key(id))
    }
}

impl<V> Default for SegmentMap<V> {
    fn default() -> Self {
        Self(Inner::default())
    }
}

impl<V> std::ops::Deref for SegmentMap<V> {
    type Target = Inner<V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> std::ops::DerefMut for SegmentMap<V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<V> IntoIterator for SegmentMap<V> {
    type Item = (SegmentId, V);
    type IntoIter = indexmap::map::IntoIter<SegmentId, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V> FromIterator<(SegmentId, V)> for SegmentMap<V> {
    fn from_iter<I: IntoIterator<Item = (SegmentId, V)>>(iter: I) -> Self {
        Self(Inner::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_missing_reports_in_query_order() {
        let map: SegmentMap = [(SegmentId(1), 10.0), (SegmentId(3), -5.0)]
            .into_iter()
            .collect();

        assert_eq!(map.first_missing((1..=3).map(SegmentId)), Some(SegmentId(2)));
        assert_eq!(map.first_missing([SegmentId(3), SegmentId(1)]), None);
    }

    #[test]
    fn deserialize_integer_keys() {
        let map = serde_json::from_str::<SegmentMap>(r#"{ "2": 1.5, "1": -0.5 }"#).unwrap();
        let keys = map.keys().copied().collect::<Vec<_>>();
        assert_eq!(keys, vec![SegmentId(2), SegmentId(1)]);
        assert_eq!(map[&SegmentId(1)], -0.5);
    }
}
