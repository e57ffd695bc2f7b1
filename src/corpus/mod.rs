//! Rule corpus: static club-specific and general rule collections
//!
//! The corpus is supplied as in-memory data at process start and never
//! mutates afterwards. Club rules take precedence over general rules on id
//! lookup, mirroring how a local rule overrides the general rulebook.

pub mod builtin;
pub mod related;

pub use related::RelatedRuleMap;

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::LinksLogicError;
use crate::errors::Result;
use crate::models::RuleRecord;

/// Display name of the operating facility
pub const CLUB_NAME: &str = "Columbia Country Club";

/// Prefix marking club-specific rule ids
pub const CLUB_RULE_PREFIX: &str = "CCC-";

/// Immutable collection of club-specific and general rules
pub struct RuleCorpus {
    club_rules: Vec<Arc<RuleRecord>>,
    general_rules: Vec<Arc<RuleRecord>>,
}

impl RuleCorpus {
    /// Build a corpus from rule collections.
    ///
    /// Ids must be unique within their namespace; search text is recomputed
    /// for any record that arrived without it (e.g. deserialized data).
    pub fn new(club_rules: Vec<RuleRecord>, general_rules: Vec<RuleRecord>) -> Result<Self> {
        let club_rules = Self::process(club_rules, true)?;
        let general_rules = Self::process(general_rules, false)?;
        Ok(Self {
            club_rules,
            general_rules,
        })
    }

    /// Corpus with the built-in Columbia Country Club data set
    pub fn with_builtin() -> Self {
        Self::new(builtin::club_rules(), builtin::general_rules())
            .expect("built-in corpus is well-formed")
    }

    fn process(rules: Vec<RuleRecord>, is_local: bool) -> Result<Vec<Arc<RuleRecord>>> {
        let mut seen = HashSet::new();
        let mut processed = Vec::with_capacity(rules.len());

        for mut rule in rules {
            if !seen.insert(rule.id.clone()) {
                return Err(LinksLogicError::Corpus(format!(
                    "duplicate rule id: {}",
                    rule.id
                )));
            }
            rule.is_local = is_local;
            if rule.search_text.is_empty() {
                rule.search_text = rule.compose_search_text();
            }
            processed.push(Arc::new(rule));
        }

        Ok(processed)
    }

    /// All rules, club-specific first (insertion order is the tie-break order)
    pub fn all(&self) -> impl Iterator<Item = &Arc<RuleRecord>> + '_ {
        self.club_rules.iter().chain(self.general_rules.iter())
    }

    /// Look up a rule by id, checking the club store first
    pub fn get(&self, id: &str) -> Option<&Arc<RuleRecord>> {
        self.club_rules
            .iter()
            .find(|r| r.id == id)
            .or_else(|| self.general_rules.iter().find(|r| r.id == id))
    }

    pub fn club_count(&self) -> usize {
        self.club_rules.len()
    }

    pub fn general_count(&self) -> usize {
        self.general_rules.len()
    }

    pub fn len(&self) -> usize {
        self.club_rules.len() + self.general_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.club_rules.is_empty() && self.general_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> RuleRecord {
        RuleRecord::new(id, format!("Rule {id}"), "text", vec![], false, vec![])
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = RuleCorpus::new(vec![], vec![rule("9.1"), rule("9.1")]);
        assert!(matches!(result, Err(LinksLogicError::Corpus(_))));
    }

    #[test]
    fn test_same_id_allowed_across_namespaces() {
        let corpus = RuleCorpus::new(vec![rule("X-1")], vec![rule("X-1")]).unwrap();
        // Club store wins the lookup
        assert!(corpus.get("X-1").unwrap().is_local);
    }

    #[test]
    fn test_lookup_prefers_club_store() {
        let corpus = RuleCorpus::with_builtin();
        let found = corpus.get("CCC-6").expect("purple line rule exists");
        assert!(found.is_local);
        let found = corpus.get("9.3").expect("natural forces rule exists");
        assert!(!found.is_local);
    }

    #[test]
    fn test_iteration_order_is_club_first() {
        let corpus = RuleCorpus::with_builtin();
        let first_general = corpus.all().position(|r| !r.is_local).unwrap();
        assert_eq!(first_general, corpus.club_count());
    }
}
