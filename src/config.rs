use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// Provider name: "openai" or "ollama"
    #[serde(default = "default_embedding_provider")]
    pub provider: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_embedding_provider() -> String {
    "openai".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_dimension() -> usize {
    1536
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            endpoint: default_openai_endpoint(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Upper bound on a single upstream call; a stalled call counts as failed
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_llm_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_openai_endpoint(),
            api_key: None,
            model: default_llm_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Tunables for the template confidence matcher.
///
/// The threshold constants are deliberately configuration, not code: the
/// heuristic is expected to be re-tuned against real question traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Confidence seeded when a template's critical concepts overlap the question
    #[serde(default = "default_concept_confidence")]
    pub concept_confidence: f32,
    /// Confidence for a verbatim trigger phrase hit
    #[serde(default = "default_exact_trigger_confidence")]
    pub exact_trigger_confidence: f32,
    /// Confidence when a trigger phrase spans most of the question
    #[serde(default = "default_span_trigger_confidence")]
    pub span_trigger_confidence: f32,
    /// Confidence when trigger words co-occur with a question verb
    #[serde(default = "default_cooccurrence_confidence")]
    pub cooccurrence_confidence: f32,
    /// Fraction of the question a phrase must cover for the span tier
    #[serde(default = "default_span_fraction")]
    pub span_fraction: f32,
    /// Multiplier applied when the question names the facility
    #[serde(default = "default_facility_boost")]
    pub facility_boost: f32,
    /// Multiplier applied when the question asks for the official standard
    #[serde(default = "default_official_penalty")]
    pub official_penalty: f32,
    /// Additive bonus for a template-specific boost phrase
    #[serde(default = "default_boost_bonus")]
    pub boost_bonus: f32,
    /// Questions longer than this many words are disqualified from templates
    #[serde(default = "default_max_question_words")]
    pub max_question_words: usize,
    /// More distinct action verbs than this disqualifies the question
    #[serde(default = "default_max_action_verbs")]
    pub max_action_verbs: usize,
}

fn default_concept_confidence() -> f32 {
    0.5
}

fn default_exact_trigger_confidence() -> f32 {
    0.8
}

fn default_span_trigger_confidence() -> f32 {
    0.6
}

fn default_cooccurrence_confidence() -> f32 {
    0.5
}

fn default_span_fraction() -> f32 {
    0.6
}

fn default_facility_boost() -> f32 {
    1.1
}

fn default_official_penalty() -> f32 {
    0.3
}

fn default_boost_bonus() -> f32 {
    0.1
}

fn default_max_question_words() -> usize {
    35
}

fn default_max_action_verbs() -> usize {
    2
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            concept_confidence: default_concept_confidence(),
            exact_trigger_confidence: default_exact_trigger_confidence(),
            span_trigger_confidence: default_span_trigger_confidence(),
            cooccurrence_confidence: default_cooccurrence_confidence(),
            span_fraction: default_span_fraction(),
            facility_boost: default_facility_boost(),
            official_penalty: default_official_penalty(),
            boost_bonus: default_boost_bonus(),
            max_question_words: default_max_question_words(),
            max_action_verbs: default_max_action_verbs(),
        }
    }
}

/// Routing thresholds and retrieval widths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Template confidence at or above this returns the canned answer verbatim
    #[serde(default = "default_template_high_threshold")]
    pub template_high_threshold: f32,
    /// Template confidence at or above this returns the canned answer with a note
    #[serde(default = "default_template_medium_threshold")]
    pub template_medium_threshold: f32,
    /// Multiplier applied to club-specific rule similarity during ranking
    #[serde(default = "default_precedence_factor")]
    pub precedence_factor: f32,
    /// At most this many club-specific rules enter the context
    #[serde(default = "default_local_context_cap")]
    pub local_context_cap: usize,
    /// At most this many general rules enter the context
    #[serde(default = "default_general_context_cap")]
    pub general_context_cap: usize,
    /// At most this many related exception rules are appended
    #[serde(default = "default_related_rules_cap")]
    pub related_rules_cap: usize,
    /// At most this many structured conditions are rendered per rule
    #[serde(default = "default_conditions_per_rule_cap")]
    pub conditions_per_rule_cap: usize,
    /// Consult the definitions store before falling through to retrieval
    #[serde(default = "default_enable_definitions")]
    pub enable_definitions: bool,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_top_n_position")]
    pub top_n_position: usize,
    #[serde(default = "default_top_n_relief")]
    pub top_n_relief: usize,
    #[serde(default = "default_top_n_penalty")]
    pub top_n_penalty: usize,
    #[serde(default = "default_top_n_procedure")]
    pub top_n_procedure: usize,
    #[serde(default = "default_top_n_other")]
    pub top_n_other: usize,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

fn default_template_high_threshold() -> f32 {
    0.75
}

fn default_template_medium_threshold() -> f32 {
    0.5
}

fn default_precedence_factor() -> f32 {
    1.5
}

fn default_local_context_cap() -> usize {
    4
}

fn default_general_context_cap() -> usize {
    8
}

fn default_related_rules_cap() -> usize {
    4
}

fn default_conditions_per_rule_cap() -> usize {
    5
}

fn default_enable_definitions() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_output_tokens() -> u32 {
    400
}

fn default_top_n_position() -> usize {
    6
}

fn default_top_n_relief() -> usize {
    12
}

fn default_top_n_penalty() -> usize {
    8
}

fn default_top_n_procedure() -> usize {
    10
}

fn default_top_n_other() -> usize {
    8
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            template_high_threshold: default_template_high_threshold(),
            template_medium_threshold: default_template_medium_threshold(),
            precedence_factor: default_precedence_factor(),
            local_context_cap: default_local_context_cap(),
            general_context_cap: default_general_context_cap(),
            related_rules_cap: default_related_rules_cap(),
            conditions_per_rule_cap: default_conditions_per_rule_cap(),
            enable_definitions: default_enable_definitions(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            top_n_position: default_top_n_position(),
            top_n_relief: default_top_n_relief(),
            top_n_penalty: default_top_n_penalty(),
            top_n_procedure: default_top_n_procedure(),
            top_n_other: default_top_n_other(),
            matcher: MatcherConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::LinksLogicError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.endpoint
    }

    /// Get LLM model name
    pub fn llm_model(&self) -> &str {
        &self.llm.model
    }

    /// Get log level
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consolidated_thresholds() {
        let routing = RoutingConfig::default();
        assert!((routing.template_high_threshold - 0.75).abs() < f32::EPSILON);
        assert!((routing.template_medium_threshold - 0.5).abs() < f32::EPSILON);
        assert!((routing.precedence_factor - 1.5).abs() < f32::EPSILON);
        assert_eq!(routing.local_context_cap, 4);
        assert_eq!(routing.general_context_cap, 8);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [routing]
            template_high_threshold = 0.8

            [llm]
            model = "gpt-4"
            "#,
        )
        .expect("partial config should parse");

        assert!((config.routing.template_high_threshold - 0.8).abs() < f32::EPSILON);
        assert!((config.routing.template_medium_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.embeddings.model, "text-embedding-3-small");
    }

    #[test]
    fn test_empty_toml_is_fully_defaulted() {
        let config: AppConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.routing.top_n_relief, 12);
        assert_eq!(config.routing.matcher.max_action_verbs, 2);
    }
}
