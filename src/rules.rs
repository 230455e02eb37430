//! Regex rewrite rules and ordered rule sets.
//!
//! Every transform in this crate is an ordered list of [`Rule`]s applied to
//! the raw source text. There is no token stream or syntax tree: a rule either
//! matches a span of characters and substitutes it, or it does nothing.

use regex::{Captures, Regex};

/// Numeric literal as it appears in layout code (`16`, `0.5`).
pub const NUMBER: &str = r"\d+(?:\.\d+)?";

/// How the matched span is rewritten.
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// Literal text with `${n}` back-references to capture groups.
    Template(&'static str),
    /// Replacement computed from the captures.
    Computed(fn(&Captures<'_>) -> String),
}

/// Post-match check on the text following a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Accept every match.
    None,
    /// Reject matches followed by a member access or identifier character,
    /// so `16.w` or `16.0.fz` are never wrapped a second time.
    BareLiteral,
}

/// A single (pattern, replacement) rewrite rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
    guard: Guard,
}

impl Rule {
    /// Compile a rule from a pattern string.
    pub fn new(
        name: &'static str,
        pattern: &str,
        replacement: Replacement,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
            guard: Guard::None,
        })
    }

    /// Attach a post-match guard.
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Apply the rule to every non-overlapping match in `text`.
    ///
    /// Matches rejected by the guard are copied through verbatim.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let end = caps.get(0).map_or(text.len(), |m| m.end());
                if self.guard == Guard::BareLiteral && continues_literal(&text[end..]) {
                    return caps[0].to_string();
                }
                match self.replacement {
                    Replacement::Template(template) => {
                        let mut out = String::new();
                        caps.expand(template, &mut out);
                        out
                    }
                    Replacement::Computed(compute) => compute(caps),
                }
            })
            .into_owned()
    }
}

fn continues_literal(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c == '.' || c == '_' || c.is_ascii_alphanumeric())
}

/// Outcome of running a rule set over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Rewrite carries the transformed text"]
pub struct Rewrite {
    /// The transformed text
    pub text: String,
    /// Whether `text` differs from the input
    pub changed: bool,
    /// Names of the rules that modified the text, in firing order
    pub applied: Vec<&'static str>,
}

impl Rewrite {
    /// A rewrite that left `text` untouched.
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            changed: false,
            applied: Vec::new(),
        }
    }
}

/// Ordered sequence of rules; order is significant.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run each rule once, in order, feeding each the previous rule's output.
    pub fn apply(&self, text: &str) -> Rewrite {
        let mut current = text.to_string();
        let mut applied = Vec::new();

        for rule in &self.rules {
            let next = rule.apply(&current);
            if next != current {
                applied.push(rule.name());
                current = next;
            }
        }

        Rewrite {
            changed: current != text,
            text: current,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(caps: &Captures<'_>) -> String {
        let n: u32 = caps[1].parse().unwrap();
        format!("n={}", n * 2)
    }

    #[test]
    fn template_expands_captures() {
        let rule = Rule::new("wrap", r"all\((\d+)\)", Replacement::Template("all(${1}.w)")).unwrap();
        assert_eq!(rule.apply("x all(4) y all(8)"), "x all(4.w) y all(8.w)");
    }

    #[test]
    fn computed_replacement() {
        let rule = Rule::new("double", r"n=(\d+)", Replacement::Computed(double)).unwrap();
        assert_eq!(rule.apply("n=3, n=5"), "n=6, n=10");
    }

    #[test]
    fn bare_literal_guard_rejects_member_access() {
        let rule = Rule::new(
            "font",
            &format!(r"fontSize:\s*({NUMBER})"),
            Replacement::Template("fontSize: ${1}.fz"),
        )
        .unwrap()
        .with_guard(Guard::BareLiteral);

        assert_eq!(rule.apply("fontSize: 14,"), "fontSize: 14.fz,");
        assert_eq!(rule.apply("fontSize: 14.fz,"), "fontSize: 14.fz,");
        assert_eq!(rule.apply("fontSize: 14.5.fz"), "fontSize: 14.5.fz");
        assert_eq!(rule.apply("fontSize: 14"), "fontSize: 14.fz");
        assert_eq!(rule.apply("fontSize: 14x"), "fontSize: 14x");
    }

    #[test]
    fn rejected_match_does_not_hide_later_matches() {
        let rule = Rule::new(
            "font",
            &format!(r"fontSize:\s*({NUMBER})"),
            Replacement::Template("fontSize: ${1}.fz"),
        )
        .unwrap()
        .with_guard(Guard::BareLiteral);

        assert_eq!(
            rule.apply("fontSize: 1.fz; fontSize: 2;"),
            "fontSize: 1.fz; fontSize: 2.fz;"
        );
    }

    #[test]
    fn rule_set_runs_in_order_and_records_fired_rules() {
        let set = RuleSet::new(vec![
            Rule::new("a-to-b", "a", Replacement::Template("b")).unwrap(),
            Rule::new("b-to-c", "b", Replacement::Template("c")).unwrap(),
            Rule::new("never", "zzz", Replacement::Template("q")).unwrap(),
        ]);

        let rewrite = set.apply("ab");
        assert_eq!(rewrite.text, "cc");
        assert!(rewrite.changed);
        assert_eq!(rewrite.applied, vec!["a-to-b", "b-to-c"]);
    }

    #[test]
    fn identical_replacement_is_not_a_change() {
        let set = RuleSet::new(vec![Rule::new("same", "x", Replacement::Template("x")).unwrap()]);
        let rewrite = set.apply("xyz");
        assert!(!rewrite.changed);
        assert!(rewrite.applied.is_empty());
        assert_eq!(rewrite, Rewrite::unchanged("xyz"));
    }
}
