//! Transform composition.
//!
//! A [`Pipeline`] chains transforms over one source text. Unit scaling must
//! run before const repair: the repair rules search for the markers that the
//! scaling rules insert.

use crate::const_fix::ConstRepair;
use crate::rules::Rewrite;
use crate::scale::UnitScaling;
use std::fmt;

/// A pure text-to-text rewrite.
pub trait Transform: Send + Sync {
    /// Short name used in reports
    fn name(&self) -> &'static str;

    /// Rewrite `source`, reporting whether anything changed.
    fn apply(&self, source: &str) -> Rewrite;
}

impl Transform for UnitScaling {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn apply(&self, source: &str) -> Rewrite {
        UnitScaling::apply(self, source)
    }
}

impl Transform for ConstRepair {
    fn name(&self) -> &'static str {
        "fix-const"
    }

    fn apply(&self, source: &str) -> Rewrite {
        ConstRepair::apply(self, source)
    }
}

/// Which transforms a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Unit scaling only
    Scale,
    /// Const repair only
    FixConst,
    /// Unit scaling followed by const repair
    All,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Scale => write!(f, "scale"),
            Mode::FixConst => write!(f, "fix-const"),
            Mode::All => write!(f, "all"),
        }
    }
}

/// Ordered chain of transforms applied to each file.
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    /// Build the pipeline for `mode`, scaling against `helper_import`.
    pub fn for_mode(mode: Mode, helper_import: &str) -> Self {
        let transforms: Vec<Box<dyn Transform>> = match mode {
            Mode::Scale => vec![Box::new(UnitScaling::new(helper_import))],
            Mode::FixConst => vec![Box::new(ConstRepair)],
            Mode::All => vec![
                Box::new(UnitScaling::new(helper_import)),
                Box::new(ConstRepair),
            ],
        };
        Self::new(transforms)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Run every transform in order, merging the fired rule names.
    pub fn apply(&self, source: &str) -> Rewrite {
        let mut text = source.to_string();
        let mut applied = Vec::new();

        for transform in &self.transforms {
            let rewrite = transform.apply(&text);
            if rewrite.changed {
                applied.extend(rewrite.applied);
                text = rewrite.text;
            }
        }

        Rewrite {
            changed: text != source,
            text,
            applied,
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("transforms", &self.names())
            .finish()
    }
}
