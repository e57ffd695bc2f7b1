//! Official glossary store for terminology questions
//!
//! Questions phrased as definitions ("what is a bunker?") are answered from
//! this static store instead of spending a generative call. Consulted only
//! after the template matcher declines a question.

use serde::Serialize;

/// One glossary entry
#[derive(Debug, Clone, Serialize)]
pub struct Definition {
    pub id: &'static str,
    pub term: &'static str,
    pub definition: &'static str,
    pub keywords: &'static [&'static str],
    pub examples: &'static [&'static str],
    pub related_rules: &'static [&'static str],
    pub category: &'static str,
}

/// Phrasings that mark a question as asking for a definition
const DEFINITION_INDICATORS: &[&str] = &[
    "what is a",
    "what is an",
    "what are",
    "what does",
    "what do",
    "define",
    "definition of",
    "meaning of",
    "means",
    "what constitutes",
    "explain what",
];

/// Minimum relevance score for a keyword search hit
const MIN_RELEVANCE: u32 = 2;

/// Static store of official definitions
pub struct DefinitionStore {
    entries: Vec<Definition>,
}

impl DefinitionStore {
    /// Store with the built-in glossary
    pub fn with_builtin() -> Self {
        Self {
            entries: builtin_definitions(),
        }
    }

    /// Whether the question is phrased as a definition lookup
    pub fn is_definition_query(question: &str) -> bool {
        let question = question.to_lowercase();
        DEFINITION_INDICATORS
            .iter()
            .any(|indicator| question.contains(indicator))
    }

    /// Best-scoring definition mentioned in the question, if any.
    ///
    /// A term hit scores 2, each keyword hit 1; entries below the relevance
    /// floor are ignored. Ties keep the earliest entry.
    pub fn lookup(&self, question: &str) -> Option<&Definition> {
        let question = question.to_lowercase();
        let mut best: Option<(&Definition, u32)> = None;

        for entry in &self.entries {
            let mut score = 0;
            if question.contains(&entry.term.to_lowercase()) {
                score += 2;
            }
            for keyword in entry.keywords {
                if question.contains(keyword) {
                    score += 1;
                }
            }
            if score >= MIN_RELEVANCE && best.map_or(true, |(_, s)| score > s) {
                best = Some((entry, score));
            }
        }

        best.map(|(entry, _)| entry)
    }

    /// Entries matching a search term against term and keywords
    pub fn search(&self, term: &str) -> Vec<&Definition> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.term.to_lowercase().contains(&term)
                    || entry.keywords.iter().any(|k| k.contains(&term))
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Definition> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn by_category(&self, category: &str) -> Vec<&Definition> {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect()
    }

    pub fn all(&self) -> &[Definition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render a definition as an answer block
    pub fn format_answer(definition: &Definition) -> String {
        let mut answer = format!("**{}**: {}", definition.term, definition.definition);
        if !definition.examples.is_empty() {
            answer.push_str(&format!(
                "\n\n**Examples**: {}",
                definition.examples[..definition.examples.len().min(3)].join(", ")
            ));
        }
        if !definition.related_rules.is_empty() {
            answer.push_str(&format!(
                "\n\n**Related Rules**: {}",
                definition.related_rules[..definition.related_rules.len().min(3)].join(", ")
            ));
        }
        answer
    }
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::with_builtin()
    }
}

fn builtin_definitions() -> Vec<Definition> {
    vec![
        Definition {
            id: "ABNORMAL_COURSE_CONDITION",
            term: "Abnormal Course Condition",
            definition: "Any of these four defined conditions: Animal Hole, Ground Under \
                         Repair, Immovable Obstruction, or Temporary Water.",
            keywords: &["abnormal course condition", "animal hole", "ground under repair", "immovable obstruction", "temporary water"],
            examples: &["sprinkler head interference", "cart path obstruction", "puddles from rain"],
            related_rules: &["16.1"],
            category: "relief",
        },
        Definition {
            id: "BOUNDARY_OBJECT",
            term: "Boundary Object",
            definition: "Artificial objects defining or showing out of bounds, such as walls, \
                         fences, stakes and railings, from which free relief is not allowed. \
                         Boundary objects are treated as immovable even if they are movable.",
            keywords: &["boundary object", "out of bounds", "fence", "wall", "stakes", "railings"],
            examples: &["boundary fence", "out of bounds stakes", "property wall"],
            related_rules: &["8.1", "18.2"],
            category: "boundaries",
        },
        Definition {
            id: "BUNKER",
            term: "Bunker",
            definition: "A specially prepared area of sand, which is often a hollow from which \
                         turf or soil was removed. A lip, wall or face at the edge, and sand \
                         spilled outside the edge, are not part of the bunker.",
            keywords: &["bunker", "sand", "sand trap", "prepared area"],
            examples: &["sand bunker around green", "fairway bunker", "lip is not bunker"],
            related_rules: &["12", "16.1c"],
            category: "course_areas",
        },
        Definition {
            id: "CLUB_LENGTH",
            term: "Club-Length",
            definition: "The length of the longest club of the 14 or fewer clubs the player \
                         has during the round, other than a putter. Used in defining relief \
                         areas.",
            keywords: &["club-length", "club length", "relief area", "measuring"],
            examples: &["two club-lengths for lateral relief", "one club-length for free relief"],
            related_rules: &["14.3", "19.2"],
            category: "relief",
        },
        Definition {
            id: "GENERAL_AREA",
            term: "General Area",
            definition: "The area of the course that covers all of the course except the \
                         teeing area, all penalty areas, all bunkers, and the putting green of \
                         the hole being played.",
            keywords: &["general area", "fairway", "rough", "through the green"],
            examples: &["ball in the fairway", "ball in the rough"],
            related_rules: &["2.2"],
            category: "course_areas",
        },
        Definition {
            id: "GROUND_UNDER_REPAIR",
            term: "Ground Under Repair",
            definition: "Any part of the course the Committee defines as ground under repair, \
                         whether marked or not, and material piled for later removal. Free \
                         relief is available in the general area.",
            keywords: &["ground under repair", "gur", "marked area", "white lines"],
            examples: &["roped-off turf repair", "piled branches for removal"],
            related_rules: &["16.1"],
            category: "relief",
        },
        Definition {
            id: "LOOSE_IMPEDIMENT",
            term: "Loose Impediment",
            definition: "Any unattached natural object such as stones, loose grass, leaves, \
                         branches, and the like. May be removed without penalty anywhere on or \
                         off the course.",
            keywords: &["loose impediment", "leaves", "stones", "twigs", "natural object"],
            examples: &["leaf behind the ball", "pine cone on the line"],
            related_rules: &["15.1"],
            category: "relief",
        },
        Definition {
            id: "LOST_BALL",
            term: "Lost Ball",
            definition: "A ball not found within three minutes after the player or their \
                         caddie begins to search for it.",
            keywords: &["lost ball", "three minutes", "search time"],
            examples: &["ball in deep fescue not found", "search exceeds three minutes"],
            related_rules: &["18.2"],
            category: "boundaries",
        },
        Definition {
            id: "OUT_OF_BOUNDS",
            term: "Out of Bounds",
            definition: "All areas outside the boundary edge of the course. When defined by a \
                         painted line on the ground, the boundary edge is the course-side edge \
                         of the line, and the line itself is out of bounds.",
            keywords: &["out of bounds", "boundary edge", "white line", "white stakes", "ob"],
            examples: &["ball touching the white line", "ball beyond the boundary fence"],
            related_rules: &["18.2"],
            category: "boundaries",
        },
        Definition {
            id: "PENALTY_AREA",
            term: "Penalty Area",
            definition: "An area from which relief with one penalty stroke is allowed if the \
                         ball comes to rest there. Marked red or yellow; the marking determines \
                         the relief options.",
            keywords: &["penalty area", "water hazard", "red stakes", "yellow stakes", "pond", "creek"],
            examples: &["pond in front of the green", "creek crossing the fairway"],
            related_rules: &["17.1"],
            category: "course_areas",
        },
        Definition {
            id: "PROVISIONAL_BALL",
            term: "Provisional Ball",
            definition: "Another ball played in case the ball just played may be lost outside \
                         a penalty area or out of bounds, announced before the stroke.",
            keywords: &["provisional ball", "provisional", "announce", "may be lost"],
            examples: &["hitting a provisional off the tee", "announcing a provisional"],
            related_rules: &["18.3"],
            category: "procedure",
        },
        Definition {
            id: "PUTTING_GREEN",
            term: "Putting Green",
            definition: "The area on the hole being played that is specially prepared for \
                         putting, containing the hole. Special rules for marking, lifting, \
                         cleaning, and repairing damage apply.",
            keywords: &["putting green", "green", "flagstick", "hole"],
            examples: &["ball on the green", "repairing a ball mark"],
            related_rules: &["13.1"],
            category: "course_areas",
        },
        Definition {
            id: "TEMPORARY_WATER",
            term: "Temporary Water",
            definition: "Any temporary accumulation of water on the surface of the ground, \
                         such as puddles from rain or irrigation, that is not in a penalty \
                         area. Dew and frost are not temporary water.",
            keywords: &["temporary water", "casual water", "puddle", "standing water"],
            examples: &["puddle on the fairway after rain", "water visible around the stance"],
            related_rules: &["16.1"],
            category: "relief",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_query_detection() {
        assert!(DefinitionStore::is_definition_query("What is a bunker?"));
        assert!(DefinitionStore::is_definition_query("define temporary water"));
        assert!(!DefinitionStore::is_definition_query(
            "my ball is in the bunker, can I ground my club?"
        ));
    }

    #[test]
    fn test_lookup_finds_term_in_question() {
        let store = DefinitionStore::with_builtin();
        let hit = store.lookup("what is a penalty area?").expect("should match");
        assert_eq!(hit.id, "PENALTY_AREA");
    }

    #[test]
    fn test_lookup_ignores_weak_matches() {
        let store = DefinitionStore::with_builtin();
        // No glossary term or keyword pair present
        assert!(store.lookup("how far can I hit a seven iron?").is_none());
    }

    #[test]
    fn test_format_answer_caps_examples() {
        let store = DefinitionStore::with_builtin();
        let definition = store.get("ABNORMAL_COURSE_CONDITION").unwrap();
        let answer = DefinitionStore::format_answer(definition);
        assert!(answer.starts_with("**Abnormal Course Condition**"));
        assert!(answer.contains("**Related Rules**: 16.1"));
    }
}
