//! Const repair: drop `const` from calls that now carry a scale marker.
//!
//! A scale marker (`.w`, `.h`, `.fz`, `.s`, `.r`) is computed from the screen
//! size at runtime, so `const SizedBox(height: 10.h)` no longer compiles. Only
//! the `const` directly in front of a known constructor is removed; qualifiers
//! on enclosing or nested expressions are out of reach of these patterns.
//!
//! Argument lists may span lines. Each pattern stops at the first `)`, so a
//! marker hidden behind a nested call (`SizedBox(height: f(1), width: 2.w)`)
//! is not seen.

use crate::rules::{Replacement, Rewrite, Rule, RuleSet};
use std::sync::LazyLock;

static RULES: LazyLock<RuleSet> =
    LazyLock::new(|| build_rules().expect("built-in const repair rules compile"));

fn build_rules() -> Result<RuleSet, regex::Error> {
    let keep_call = Replacement::Template("${1}");
    let catalogue: [(&'static str, &str); 7] = [
        ("text-font", r"(?s)\bconst\s+(Text\([^)]*?\.fz\b[^)]*?\))"),
        ("icon-size", r"(?s)\bconst\s+(Icon\([^)]*?\.s\b[^)]*?\))"),
        ("text-style-font", r"(?s)\bconst\s+(TextStyle\([^)]*?\.fz\b[^)]*?\))"),
        ("border-radius", r"(?s)\bconst\s+(BorderRadius\.\w+\([^)]*?\.r\b[^)]*?\))"),
        ("radius", r"(?s)\bconst\s+(Radius\.\w+\([^)]*?\.r\b[^)]*?\))"),
        ("edge-insets", r"(?s)\bconst\s+(EdgeInsets\.\w+\([^)]*?\.[wh]\b[^)]*?\))"),
        ("sized-box", r"(?s)\bconst\s+(SizedBox\([^)]*?\.[wh]\b[^)]*?\))"),
    ];

    let rules = catalogue
        .into_iter()
        .map(|(name, pattern)| Rule::new(name, pattern, keep_call))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RuleSet::new(rules))
}

/// The built-in const repair catalogue, in firing order.
pub fn rules() -> &'static RuleSet {
    &RULES
}

/// Const repair transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstRepair;

impl ConstRepair {
    pub fn apply(&self, source: &str) -> Rewrite {
        rules().apply(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repair(source: &str) -> String {
        ConstRepair.apply(source).text
    }

    #[test]
    fn catalogue_patterns_span_lines() {
        assert_eq!(rules().len(), 7);
        assert!(rules()
            .rules()
            .iter()
            .all(|rule| rule.pattern().as_str().starts_with("(?s)")));
    }

    #[test]
    fn sized_box_with_marker() {
        assert_eq!(repair("const SizedBox(height: 10.h)"), "SizedBox(height: 10.h)");
        assert_eq!(repair("const  SizedBox(width: 3.w)"), "SizedBox(width: 3.w)");
    }

    #[test]
    fn sized_box_without_marker_is_kept() {
        let rewrite = ConstRepair.apply("const SizedBox(height: 10)");
        assert!(!rewrite.changed);
        assert_eq!(rewrite.text, "const SizedBox(height: 10)");
    }

    #[test]
    fn text_with_font_marker_in_nested_style() {
        assert_eq!(
            repair("child: const Text('Hi', style: TextStyle(fontSize: 14.fz)),"),
            "child: Text('Hi', style: TextStyle(fontSize: 14.fz)),"
        );
    }

    #[test]
    fn text_style_and_icon() {
        assert_eq!(
            repair("style: const TextStyle(fontSize: 12.fz, color: Colors.red),"),
            "style: TextStyle(fontSize: 12.fz, color: Colors.red),"
        );
        assert_eq!(
            repair("const Icon(Icons.home, size: 20.s)"),
            "Icon(Icons.home, size: 20.s)"
        );
    }

    #[test]
    fn icon_marker_needs_word_boundary() {
        let input = "const Icon(Icons.home, color: theme.secondary)";
        assert_eq!(repair(input), input);
    }

    #[test]
    fn radius_forms() {
        assert_eq!(
            repair("const BorderRadius.all(Radius.circular(8.r))"),
            "BorderRadius.all(Radius.circular(8.r))"
        );
        assert_eq!(
            repair("topLeft: const Radius.circular(4.r),"),
            "topLeft: Radius.circular(4.r),"
        );
    }

    #[test]
    fn edge_insets_any_constructor() {
        assert_eq!(
            repair("const EdgeInsets.fromLTRB(4.w, 2.h, 4.w, 0)"),
            "EdgeInsets.fromLTRB(4.w, 2.h, 4.w, 0)"
        );
    }

    #[test]
    fn spans_multiple_lines() {
        let input = "const SizedBox(\n  height: 12.h,\n  child: x,\n)";
        let expected = "SizedBox(\n  height: 12.h,\n  child: x,\n)";
        assert_eq!(repair(input), expected);
    }

    #[test]
    fn outer_qualifier_is_not_touched() {
        let input = "const Padding(padding: EdgeInsets.all(16.w))";
        assert_eq!(repair(input), input);
    }

    #[test]
    fn unrelated_const_is_kept() {
        let input = "const Duration(milliseconds: 300)\nconst kGap = 8.0;";
        let rewrite = ConstRepair.apply(input);
        assert!(!rewrite.changed);
        assert_eq!(rewrite.text, input);
    }

    #[test]
    fn reports_fired_rules() {
        let rewrite = ConstRepair.apply("const SizedBox(width: 1.w); const Icon(Icons.x, size: 2.s);");
        assert_eq!(rewrite.applied, vec!["icon-size", "sized-box"]);
        assert_eq!(rewrite.text, "SizedBox(width: 1.w); Icon(Icons.x, size: 2.s);");
    }
}
