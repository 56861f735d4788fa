//! Phandle discovery and resolution for Devicetree Source text.
//!
//! Kernel-tree sources reference other nodes with `&label`, while a decompiled
//! DTB only keeps the raw integer handle plus a `__symbols__` node mapping
//! labels to node paths. This crate learns which property cells carry phandles
//! from the former and rewrites those cells back into labels in the latter.
//!
//! # Pipeline
//!
//! ```text
//! source text ─► Document (lines, comment-free code, node paths)
//!                   │
//!                   ├─► PropertyScanner ─► PropertyAssignment*
//!                   ├─► SymbolTable     (path → label)
//!                   └─► PhandleLocator  (value → path)
//!
//! kernel source:   assignments ─► learn   ─► PhandleRegistry
//! decompiled dump: assignments ─► replace ─► rewritten text
//! ```
//!
//! The [`PhandleRegistry`] is the only state that survives a run. Callers own
//! its lifecycle: load it, hand it to a pipeline, save it back.

/// Source-kind detection.
pub mod detect;
/// Line-oriented view of a source text.
pub mod document;
/// Fatal errors and recoverable warnings.
pub mod error;
/// Registry learning from label-bearing sources.
pub mod learn;
/// Phandle value to node path lookup.
pub mod locator;
/// Node paths and brace tracking.
pub mod path;
/// Run-level replacement over a parsed document.
pub mod pipeline;
/// Persisted `(property, cell)` knowledge.
pub mod registry;
/// Cell rewriting for decompiled sources.
pub mod replace;
/// Property assignment extraction.
pub mod scanner;
/// `__symbols__` block parsing.
pub mod symbols;

pub use detect::SourceKind;
pub use document::{Document, Line};
pub use error::{DtsError, Result, Warning};
pub use learn::{LearnReport, learn, learn_into};
pub use locator::{DuplicatePolicy, PhandleLocator, is_definition, parse_cell_value};
pub use path::{NodePath, PathTracker};
pub use pipeline::{ReplaceReport, replace_document};
pub use registry::{PHANDLE_PROPERTY, PhandleRegistry, REGISTRY_FILE, RegistryEntry};
pub use replace::{ReplaceOutcome, replace};
pub use scanner::{Cell, PropertyAssignment, PropertyScanner};
pub use symbols::SymbolTable;
