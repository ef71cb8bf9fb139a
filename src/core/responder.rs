//! Pattern/response matcher
//!
//! Walks an ordered rule table, takes the first rule whose pattern matches
//! the start of the input and fills one of its templates with the captured
//! (pronoun-reflected) text.

use super::reflections::reflect;
use super::rules::{default_rules, Rule};
use super::text_normalizer::TextNormalizer;
use crate::error::{HalError, HalResult};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex, RegexBuilder};
use tracing::{debug, warn};

/// How input is prepared and patterns are compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_insensitive: bool,
    pub normalizer: TextNormalizer,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            normalizer: TextNormalizer::default(),
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    responses: Vec<String>,
}

/// First-match-wins responder over an ordered rule table
#[derive(Debug)]
pub struct Responder {
    rules: Vec<CompiledRule>,
    normalizer: TextNormalizer,
}

impl Responder {
    /// Compile `rules` with the default options
    pub fn new(rules: Vec<Rule>) -> HalResult<Self> {
        Self::with_options(rules, MatchOptions::default())
    }

    /// The stock HAL9000 responder
    pub fn hal9000() -> HalResult<Self> {
        Self::new(default_rules())
    }

    pub fn with_options(mut rules: Vec<Rule>, options: MatchOptions) -> HalResult<Self> {
        if !rules.iter().any(Rule::is_catch_all) {
            warn!("⚠️ Rule table has no catch-all, appending the default one");
            rules.push(Rule::catch_all());
        }

        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.responses.is_empty() {
                return Err(HalError::Rules(format!(
                    "pattern '{}' has no responses",
                    rule.pattern
                )));
            }
            // Anchored at the start; trailing input is allowed.
            let regex = RegexBuilder::new(&format!("^(?:{})", rule.pattern))
                .case_insensitive(options.case_insensitive)
                .build()?;
            compiled.push(CompiledRule {
                regex,
                responses: rule.responses,
            });
        }

        Ok(Self {
            rules: compiled,
            normalizer: options.normalizer,
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the rule that answers `input`
    pub fn matching_rule(&self, input: &str) -> Option<usize> {
        let text = self.normalizer.normalize(input);
        self.rules.iter().position(|rule| rule.regex.is_match(&text))
    }

    /// Answer `input` using the thread-local RNG
    pub fn respond(&self, input: &str) -> String {
        self.respond_with(input, &mut rand::thread_rng())
    }

    /// Answer `input`, drawing the template from `rng`
    pub fn respond_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> String {
        let text = self.normalizer.normalize(input);

        for (index, rule) in self.rules.iter().enumerate() {
            let Some(caps) = rule.regex.captures(&text) else {
                continue;
            };
            let Some(template) = rule.responses.choose(rng) else {
                continue;
            };
            debug!("🎯 Rule {} matched '{}'", index, text);
            return tidy_punctuation(fill_template(template, &caps));
        }

        // Unreachable with a catch-all in the table, but never leave the operator hanging.
        Rule::catch_all().responses[0].clone()
    }
}

/// Replace `%N` with reflected capture group N, scanning left to right.
/// Placeholders without a participating group stay as literal text.
fn fill_template(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().and_then(|d| d.to_digit(10)) {
            Some(group) => {
                chars.next();
                match caps.get(group as usize) {
                    Some(m) => out.push_str(&reflect(m.as_str())),
                    None => {
                        out.push('%');
                        out.push_str(&group.to_string());
                    }
                }
            }
            None => out.push('%'),
        }
    }

    out
}

fn tidy_punctuation(mut text: String) -> String {
    if text.ends_with("?.") || text.ends_with("??") {
        let last = text.pop();
        text.pop();
        if let Some(c) = last {
            text.push(c);
        }
    }
    text
}
