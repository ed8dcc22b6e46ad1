//! Compiled detection rules.
//!
//! Every pattern's `detection_rule` is compiled exactly once, when a
//! [`RuleSet`] is built. Rules use the `regex` crate's dialect: matching is
//! case-sensitive, `.` does not match `\n`, and nothing is implicitly
//! anchored. The engine runs in time linear in the input, so no rule can
//! backtrack catastrophically; lookaround and backreferences are outside the
//! dialect and such rules are rejected at compile time.
//!
//! A rule that fails to compile, or whose compiled program exceeds the
//! configured size budget, is recorded as a [`RejectedRule`] and skipped.
//! It never prevents the other rules from running.

use idiom_catalog::PatternCatalog;
use idiom_core::DetectConfig;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// A compiled rule bound to its pattern's position in the catalog.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Index of the pattern in catalog order.
    pub pattern_index: usize,
    /// The compiled expression.
    pub regex: Regex,
}

/// A rule that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRule {
    /// Id of the pattern whose rule was rejected.
    pub pattern_id: String,
    /// The rule text as written.
    pub rule: String,
    /// Why the rule was rejected.
    pub reason: String,
}

/// The compiled rules of one catalog, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    rejected: Vec<RejectedRule>,
}

impl RuleSet {
    /// Compiles every rule in `catalog`.
    ///
    /// Rules keep the relative order of their patterns, which is what the
    /// detector relies on to break confidence ties.
    #[must_use]
    pub fn compile(catalog: &PatternCatalog, config: &DetectConfig) -> Self {
        let mut rules = Vec::with_capacity(catalog.count());
        let mut rejected = Vec::new();

        for (pattern_index, pattern) in catalog.iter().enumerate() {
            let built = RegexBuilder::new(&pattern.detection_rule)
                .size_limit(config.rule_size_limit)
                .dfa_size_limit(config.rule_dfa_size_limit)
                .build();

            match built {
                Ok(regex) => rules.push(CompiledRule {
                    pattern_index,
                    regex,
                }),
                Err(e) => {
                    warn!(
                        pattern = %pattern.id,
                        rule = %pattern.detection_rule,
                        error = %e,
                        "Skipping detection rule that failed to compile"
                    );
                    rejected.push(RejectedRule {
                        pattern_id: pattern.id.clone(),
                        rule: pattern.detection_rule.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            compiled = rules.len(),
            rejected = rejected.len(),
            "Compiled detection rules"
        );

        Self { rules, rejected }
    }

    /// Returns the compiled rules in catalog order.
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Returns the rules that were skipped.
    #[inline]
    #[must_use]
    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }

    /// Returns the number of compiled rules.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule compiled.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
