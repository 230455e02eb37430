//! Unit scaling: fixed layout literals to `flutter_scalify` responsive units.
//!
//! Each rule wraps a bare numeric literal with a scale marker:
//!
//! | Marker | Meaning                 | Produced for                              |
//! |--------|-------------------------|-------------------------------------------|
//! | `.w`   | width-relative          | `EdgeInsets` horizontal sides, `width:`   |
//! | `.h`   | height-relative         | `EdgeInsets` vertical sides, `height:`    |
//! | `.fz`  | font scale              | `fontSize:`                               |
//! | `.s`   | size scale              | `size:` (icons)                           |
//! | `.r`   | radius scale            | `*.circular(..)`, `blurRadius:`           |
//!
//! Literals already followed by a marker or member access are never touched,
//! so running the transform twice equals running it once.

use crate::rules::{Guard, Replacement, Rewrite, Rule, RuleSet, NUMBER};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Import URI of the responsive-unit helper package.
pub const DEFAULT_HELPER_IMPORT: &str = "package:flutter_scalify/flutter_scalify.dart";

/// Rule name reported when the helper import is inserted.
pub const HELPER_IMPORT_RULE: &str = "helper-import";

static RULES: LazyLock<RuleSet> =
    LazyLock::new(|| build_rules().expect("built-in scaling rules compile"));

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<side>\b[A-Za-z_]\w*)(?P<sep>\s*:\s*)(?P<value>{NUMBER})(?P<tail>\s*(?:,|$))"
    ))
    .expect("entry pattern compiles")
});

// `show`/`hide`/`as` clauses may continue on following lines.
static IMPORT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+['"][^'"\n]*['"][^;]*;"#).expect("import pattern compiles")
});

static LIBRARY_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*library\b[^;]*;").expect("library pattern compiles")
});

/// Screen axis a literal is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
}

impl Axis {
    fn suffix(self) -> &'static str {
        match self {
            Axis::Width => ".w",
            Axis::Height => ".h",
        }
    }
}

fn only_axis(side: &str) -> Option<Axis> {
    match side {
        "left" | "right" => Some(Axis::Width),
        "top" | "bottom" => Some(Axis::Height),
        _ => None,
    }
}

fn symmetric_axis(side: &str) -> Option<Axis> {
    match side {
        "horizontal" => Some(Axis::Width),
        "vertical" => Some(Axis::Height),
        _ => None,
    }
}

/// Scale every `side: N` entry of an argument list whose side maps to an axis.
///
/// Whitespace and line breaks between entries are kept as written. Returns
/// `None` when no entry was scaled.
fn scale_entries(args: &str, axis_for: fn(&str) -> Option<Axis>) -> Option<String> {
    let mut scaled = false;
    let out = ENTRY.replace_all(args, |caps: &Captures<'_>| match axis_for(&caps["side"]) {
        Some(axis) => {
            scaled = true;
            format!(
                "{}{}{}{}{}",
                &caps["side"],
                &caps["sep"],
                &caps["value"],
                axis.suffix(),
                &caps["tail"]
            )
        }
        None => caps[0].to_string(),
    });
    scaled.then(|| out.into_owned())
}

fn edge_insets_only(caps: &Captures<'_>) -> String {
    match scale_entries(&caps[1], only_axis) {
        Some(args) => format!("EdgeInsets.only({args})"),
        None => caps[0].to_string(),
    }
}

fn edge_insets_symmetric(caps: &Captures<'_>) -> String {
    match scale_entries(&caps[1], symmetric_axis) {
        Some(args) => format!("EdgeInsets.symmetric({args})"),
        None => caps[0].to_string(),
    }
}

fn build_rules() -> Result<RuleSet, regex::Error> {
    use Replacement::{Computed, Template};

    let n = NUMBER;
    let rules = vec![
        Rule::new(
            "edge-insets-all",
            &format!(r"(?:\bconst\s+)?\bEdgeInsets\.all\(\s*({n})\s*\)"),
            Template("EdgeInsets.all(${1}.w)"),
        )?,
        Rule::new(
            "edge-insets-symmetric",
            r"(?:\bconst\s+)?\bEdgeInsets\.symmetric\(([^()]*)\)",
            Computed(edge_insets_symmetric),
        )?,
        Rule::new(
            "edge-insets-only",
            r"(?:\bconst\s+)?\bEdgeInsets\.only\(([^()]*)\)",
            Computed(edge_insets_only),
        )?,
        Rule::new(
            "sized-box-height",
            &format!(r"(?:\bconst\s+)?\bSizedBox\(height:\s*({n})\)"),
            Template("SizedBox(height: ${1}.h)"),
        )?,
        Rule::new(
            "sized-box-width",
            &format!(r"(?:\bconst\s+)?\bSizedBox\(width:\s*({n})\)"),
            Template("SizedBox(width: ${1}.w)"),
        )?,
        Rule::new(
            "font-size",
            &format!(r"\bfontSize:\s*({n})"),
            Template("fontSize: ${1}.fz"),
        )?
        .with_guard(Guard::BareLiteral),
        Rule::new(
            "icon-size",
            &format!(r"\bsize:\s*({n})"),
            Template("size: ${1}.s"),
        )?
        .with_guard(Guard::BareLiteral),
        Rule::new(
            "border-radius-circular",
            &format!(r"\bBorderRadius\.circular\(({n})\)"),
            Template("BorderRadius.circular(${1}.r)"),
        )?,
        Rule::new(
            "radius-circular",
            &format!(r"\bRadius\.circular\(({n})\)"),
            Template("Radius.circular(${1}.r)"),
        )?,
        // Only when a field separator follows, so `width: 10 * ratio` is left alone.
        Rule::new(
            "width-field",
            &format!(r"\bwidth:\s*({n}),"),
            Template("width: ${1}.w,"),
        )?,
        Rule::new(
            "height-field",
            &format!(r"\bheight:\s*({n}),"),
            Template("height: ${1}.h,"),
        )?,
        Rule::new(
            "blur-radius",
            &format!(r"\bblurRadius:\s*({n})"),
            Template("blurRadius: ${1}.r"),
        )?
        .with_guard(Guard::BareLiteral),
    ];

    Ok(RuleSet::new(rules))
}

/// The built-in unit scaling catalogue, in firing order.
pub fn rules() -> &'static RuleSet {
    &RULES
}

/// Line terminator of the first line in `text`, `\n` when there is none.
fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Insert `import '<uri>';` unless the source already references `uri`.
///
/// The directive goes on its own line after the last existing import. A file
/// without imports gets it after a leading `library` directive, or at the very
/// top. The inserted line uses the line ending found at the insertion point.
/// Returns `None` if nothing was inserted.
pub fn ensure_import(source: &str, uri: &str) -> Option<String> {
    if source.contains(uri) {
        return None;
    }

    let directive = format!("import '{uri}';");
    let anchor = IMPORT_DIRECTIVE
        .find_iter(source)
        .last()
        .or_else(|| LIBRARY_DIRECTIVE.find(source));
    let inserted = match anchor {
        Some(last) => {
            let (head, rest) = source.split_at(last.end());
            format!("{head}{}{directive}{rest}", line_ending(rest))
        }
        None => format!("{directive}{}{source}", line_ending(source)),
    };
    Some(inserted)
}

/// Unit scaling transform.
#[derive(Debug, Clone)]
pub struct UnitScaling {
    helper_import: String,
}

impl Default for UnitScaling {
    fn default() -> Self {
        Self::new(DEFAULT_HELPER_IMPORT)
    }
}

impl UnitScaling {
    pub fn new(helper_import: impl Into<String>) -> Self {
        Self {
            helper_import: helper_import.into(),
        }
    }

    /// Scale literals, then add the helper import if anything was scaled.
    pub fn apply(&self, source: &str) -> Rewrite {
        let mut rewrite = rules().apply(source);
        if !rewrite.changed {
            return rewrite;
        }

        if let Some(text) = ensure_import(&rewrite.text, &self.helper_import) {
            rewrite.text = text;
            rewrite.applied.push(HELPER_IMPORT_RULE);
        }
        rewrite
    }
}
