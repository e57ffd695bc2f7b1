//! Context assembler properties

use std::sync::Arc;

use crate::config::RoutingConfig;
use crate::context::ContextAssembler;
use crate::corpus::RelatedRuleMap;
use crate::corpus::RuleCorpus;
use crate::models::SearchResult;

fn builtin_assembler() -> ContextAssembler {
    ContextAssembler::new(
        Arc::new(RuleCorpus::with_builtin()),
        RelatedRuleMap::standard(),
        &RoutingConfig::default(),
    )
}

fn result_for(corpus: &RuleCorpus, id: &str, similarity: f32) -> SearchResult {
    let rule = corpus.get(id).expect("rule exists").clone();
    let is_local = rule.is_local;
    SearchResult {
        rule,
        similarity,
        is_local,
    }
}

#[test]
fn test_exceptions_precede_conditions_for_every_builtin_rule() {
    let corpus = RuleCorpus::with_builtin();
    let assembler = builtin_assembler();

    for rule in corpus.all() {
        let has_exception = rule.conditions.iter().any(|c| c.is_exception());
        let has_ordinary = rule.conditions.iter().any(|c| !c.is_exception());
        if !(has_exception && has_ordinary) {
            continue;
        }

        let assembled = assembler.assemble(&[SearchResult {
            rule: rule.clone(),
            similarity: 0.9,
            is_local: rule.is_local,
        }]);
        let exceptions_at = assembled
            .text
            .find("!! EXCEPTIONS:")
            .unwrap_or_else(|| panic!("no exception block for {}", rule.id));
        let ordinary_at = assembled
            .text
            .find("Conditions and Applications:")
            .unwrap_or_else(|| panic!("no condition block for {}", rule.id));
        assert!(
            exceptions_at < ordinary_at,
            "exceptions demoted for rule {}",
            rule.id
        );
    }
}

#[test]
fn test_exception_flag_tracks_rule_families() {
    let corpus = RuleCorpus::with_builtin();
    let assembler = builtin_assembler();

    // 9.4 is itself exception-prone
    let assembled = assembler.assemble(&[result_for(&corpus, "9.4", 0.8)]);
    assert!(assembled.has_exceptions);

    // 18.2 is not, and its topic has no adjacency entries
    let assembled = assembler.assemble(&[result_for(&corpus, "18.2", 0.8)]);
    assert!(!assembled.has_exceptions);

    // 19 pulls in only 19.2/19.3, also outside the exception families
    let assembled = assembler.assemble(&[result_for(&corpus, "19", 0.8)]);
    assert!(!assembled.has_exceptions);
    assert!(assembled.rule_ids.contains(&"19.2".to_string()));
}

#[test]
fn test_related_rules_resolve_from_the_corpus() {
    let corpus = RuleCorpus::with_builtin();
    let assembler = builtin_assembler();

    // 13.1 adjacency adds 8.1d, 9.3, 9.4 from the general store
    let assembled = assembler.assemble(&[result_for(&corpus, "13.1", 0.9)]);
    for related in ["8.1d", "9.3", "9.4"] {
        assert!(
            assembled.rule_ids.contains(&related.to_string()),
            "missing related rule {related}"
        );
    }
    // Primary rule leads the id list
    assert_eq!(assembled.rule_ids[0], "13.1");
}

#[test]
fn test_related_section_respects_cap() {
    let corpus = RuleCorpus::with_builtin();
    let assembler = builtin_assembler();

    // 9.x rules fan out to many related entries; the section stays bounded
    let results = vec![
        result_for(&corpus, "9.1", 0.9),
        result_for(&corpus, "13.1", 0.8),
        result_for(&corpus, "8.1", 0.7),
    ];
    let assembled = assembler.assemble(&results);
    let related_count = assembled.rule_ids.len() - results.len();
    assert!(related_count <= 4, "related overflow: {related_count}");
}

#[test]
fn test_club_evidence_survives_general_volume() {
    let corpus = RuleCorpus::with_builtin();
    let assembler = builtin_assembler();

    // One club rule drowned in general matches: the club rule must remain
    let mut results = vec![result_for(&corpus, "CCC-2", 0.3)];
    for rule in corpus.all().filter(|r| !r.is_local).take(12) {
        results.push(SearchResult {
            rule: rule.clone(),
            similarity: 0.9,
            is_local: false,
        });
    }

    let assembled = assembler.assemble(&results);
    assert!(assembled.text.contains("COLUMBIA CC LOCAL RULE CCC-2"));
    assert!(assembled.rule_ids.contains(&"CCC-2".to_string()));
    // Club rules render ahead of the general matches
    let club_at = assembled.text.find("CCC-2").unwrap();
    let first_general = results[1].rule.id.clone();
    let general_at = assembled.text.find(&format!("Rule {first_general}:")).unwrap();
    assert!(club_at < general_at);
}
