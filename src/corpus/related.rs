//! Static rule-adjacency table for exception handling
//!
//! Many rulings flip on a nearby exception clause (who caused a condition,
//! when it happened, whether the ball was moving). This table maps a rule to
//! the exception-relevant rules a correct answer must also consider.

use std::collections::BTreeMap;

/// Mapping from a rule id to exception-relevant rule ids.
///
/// Lookups are by topic prefix: rule "13.1c" consults every entry whose key
/// shares the leading segment "13". Declarative data, loaded once.
pub struct RelatedRuleMap {
    entries: BTreeMap<&'static str, &'static [&'static str]>,
}

impl RelatedRuleMap {
    /// The standard adjacency table for the general rulebook
    pub fn standard() -> Self {
        let mut entries: BTreeMap<&'static str, &'static [&'static str]> = BTreeMap::new();
        // Putting green + conditions altered
        entries.insert("13.1", &["8.1d", "9.3", "9.4"]);
        entries.insert("13.1c", &["8.1d", "9.3"]);
        // Conditions + who caused them
        entries.insert("8.1", &["8.1d", "9.6", "9.3"]);
        // Ball moved + by whom
        entries.insert("9.1", &["9.4", "9.5", "9.6"]);
        // Natural forces
        entries.insert("9.3", &["8.1d", "14.2d"]);
        // Accidental movement
        entries.insert("9.4", &["9.5", "9.6", "13.1d"]);
        // Deliberate actions
        entries.insert("9.5", &["9.4", "9.6"]);
        // Outside influence
        entries.insert("9.6", &["8.1d", "9.3"]);
        // Ball in motion interactions
        entries.insert("11.1", &["11.2", "11.3"]);
        entries.insert("11.2", &["11.1", "11.3"]);
        // Lifting/replacing + movement
        entries.insert("14.2", &["14.2d", "9.3"]);
        entries.insert("14.2d", &["9.3", "13.1d"]);
        // Abnormal conditions
        entries.insert("16.1", &["16.1f", "8.1"]);
        // Penalty areas
        entries.insert("17.1", &["17.1d", "17.2"]);
        // Unplayable ball
        entries.insert("19", &["19.2", "19.3"]);
        Self { entries }
    }

    /// Empty map (useful for tests that want no adjacency)
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Exception-relevant rule ids for a topic prefix, in declaration order
    pub fn related_for<'a>(&'a self, topic_prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.split('.').next() == Some(topic_prefix))
            .flat_map(|(_, related)| related.iter().copied())
    }
}

impl Default for RelatedRuleMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_prefix_lookup_spans_sub_rules() {
        let map = RelatedRuleMap::standard();
        let related: Vec<_> = map.related_for("13").collect();
        // Both 13.1 and 13.1c entries contribute
        assert!(related.contains(&"8.1d"));
        assert!(related.contains(&"9.4"));
    }

    #[test]
    fn test_unknown_prefix_is_empty() {
        let map = RelatedRuleMap::standard();
        assert_eq!(map.related_for("99").count(), 0);
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let map = RelatedRuleMap::standard();
        let first: Vec<_> = map.related_for("9").collect();
        let second: Vec<_> = map.related_for("9").collect();
        assert_eq!(first, second);
    }
}
