//! # vistrail-translate - VisTrails Schema Translation Engine
//!
//! **vistrail-translate** upgrades VisTrails documents from schema version 1.0.2 to
//! 1.0.3. Translation is a pure, in-memory transformation: it borrows the old object
//! graph and returns a new one, so a failed call never leaves a half-upgraded document
//! behind.
//!
//! ## What changes between the versions
//!
//! 1.  **Port specs**: the packed `sigstring` / `defaults` / `labels` strings become a
//!     list of structured `PortSpecItem`s.
//! 2.  **Vistrail variables**: the reserved `__vistrail_vars__` annotation becomes a
//!     first-class `vistrail_variables` list.
//! 3.  **Parameter explorations**: every `__paramexp__` action annotation, an XML
//!     document referring to pipeline objects by raw id, becomes a structured
//!     `ParameterExploration`.
//! 4.  **Startup settings**: many configuration keys were renamed or dropped.
//!
//! Everything else is copied field for field, and every translated root carries the
//! version tag `"1.0.3"`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vistrail_translate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = std::fs::read_to_string("path/to/vistrail.json")?;
//!     let old: v1_0_2::Vistrail = serde_json::from_str(&text)?;
//!
//!     // Keep the rest of an exploration when one of its functions was deleted.
//!     let translator = Translator::builder()
//!         .with_unresolved_policy(UnresolvedPolicy::SkipEntry)
//!         .build();
//!
//!     let new = translator.translate_vistrail(&old)?;
//!     for variable in &new.vistrail_variables {
//!         println!("{} = {}", variable.name, variable.value);
//!     }
//!     println!("{} parameter explorations", new.parameter_explorations.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod id_scope;
pub mod literal;
pub mod pipeline;
pub mod prelude;
pub mod schema;
pub mod transcode;
pub mod translate;
pub mod version;
