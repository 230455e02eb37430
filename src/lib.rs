//! Scalify Patcher: responsive-unit rewriting for Flutter sources
//!
//! Two regex-driven source transforms for Dart files:
//!
//! - **Unit scaling** wraps fixed layout literals in `flutter_scalify` scale
//!   markers (`EdgeInsets.all(16)` becomes `EdgeInsets.all(16.w)`) and adds
//!   the helper import when a file gains its first scaled unit.
//! - **Const repair** removes `const` from known constructor calls whose
//!   arguments now carry a scale marker (`const SizedBox(height: 10.h)`).
//!
//! # Architecture
//!
//! Every transform is an ordered [`RuleSet`] of (pattern, replacement) pairs
//! run over flat text. There is no parser: text a rule does not recognise
//! passes through byte-for-byte.
//!
//! File handling is a thin layer around the engine: [`select_files`] resolves
//! the target, [`update_file`] reads, rewrites and atomically writes back one
//! file, and [`run_batch`] drives a whole selection while isolating per-file
//! failures.
//!
//! # Example
//!
//! ```
//! use scalify_patcher::{Mode, Pipeline, DEFAULT_HELPER_IMPORT};
//!
//! let pipeline = Pipeline::for_mode(Mode::All, DEFAULT_HELPER_IMPORT);
//! let rewrite = pipeline.apply("final gap = const SizedBox(height: 10);\n");
//!
//! assert!(rewrite.changed);
//! assert!(rewrite.text.contains("SizedBox(height: 10.h)"));
//! ```

pub mod batch;
pub mod config;
pub mod const_fix;
pub mod rules;
pub mod scale;
pub mod select;
pub mod transform;
pub mod update;

// Re-exports
pub use batch::{run_batch, BatchSummary};
pub use config::{load_from_path, load_from_str, ConfigError, RewriteConfig};
pub use const_fix::ConstRepair;
pub use rules::{Guard, Replacement, Rewrite, Rule, RuleSet};
pub use scale::{UnitScaling, DEFAULT_HELPER_IMPORT};
pub use select::{select_files, FileFilter, SelectError, Selection};
pub use transform::{Mode, Pipeline, Transform};
pub use update::{update_file, FileOutcome, UpdateError, UpdateOptions};
