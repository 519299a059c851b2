//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types of the crate, so a single
//! `use vistrail_translate::prelude::*;` is enough to load, translate and inspect
//! documents.
//!
//! # Example
//!
//! ```rust,no_run
//! use vistrail_translate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/startup.json")?;
//! let old: Startup = serde_json::from_str(&text)?;
//!
//! let new = translate_startup(&old);
//! assert_eq!(new.version, TARGET_VERSION);
//! # Ok(())
//! # }
//! ```

// Translation entry points
pub use crate::translate::{
    FieldOverrides, Translator, TranslatorBuilder, translate_log, translate_registry,
    translate_startup, translate_vistrail, translate_workflow,
};
pub use crate::translate::{KeyRule, RuleTable, ValueConversion};

// Schema versions and the documents that are not versioned per schema
pub use crate::schema::{Configuration, Log, Startup, v1_0_2, v1_0_3};

// Extension points
pub use crate::id_scope::IdScope;
pub use crate::pipeline::{ActionReplay, Materialize, Pipeline};
pub use crate::transcode::UnresolvedPolicy;

// Error types
pub use crate::error::{DecodeError, MaterializeError, ParamExpError, TranslateError};

pub use crate::version::{SOURCE_VERSION, TARGET_VERSION};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
