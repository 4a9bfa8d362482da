//! Goal-card generation from engineering time-study sheets
//!
//! This module pulls (operation, standard-time) pairs out of a marker-bounded
//! region of an engineering sheet, expands each pair by a repeat count derived
//! from the target production rate, and writes the expanded list into a copied
//! goal-card template between `gcstart`/`gcend` sentinels, stamping floor,
//! comment and date placeholders on the way out.

pub mod extract;
pub mod inject;
pub mod substitute;
pub mod template;
pub mod types;

pub use extract::{extract_assembly, extract_frontback};
pub use inject::inject_operations;
pub use substitute::replace_marker;
pub use template::copy_template;
pub use types::OperationRecord;
