//! Core types and constants for goal-card generation

/// Inspection markers bounding the front/back section of an engineering sheet
pub const PANEL_INSPECTION: &str = "PANEL INSPECTION";
pub const MIDDLE_INSPECTION: &str = "MIDDLE INSPECTION";
pub const END_LINE_INSPECTION: &str = "END LINE INSPECTION";

/// Injection markers in the goal-card template (matched lowercase-trimmed)
pub const GC_START: &str = "gcstart";
pub const GC_END: &str = "gcend";

/// Metadata placeholders in the goal-card template (matched exactly)
pub const GC_FLOOR: &str = "gcfloor";
pub const GC_COMMENT: &str = "gccmt";
pub const GC_DATE: &str = "gcdate";

/// Sheet names the template must provide
pub const FRONTBACK_SHEET: &str = "frontback";
pub const ASSEMBLY_SHEET: &str = "assembly";

/// A single time-study operation pulled from the engineering sheet
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// Operation name, non-empty after trimming
    pub name: String,
    /// Standard time per unit, always positive
    pub std_time: f64,
}

impl OperationRecord {
    pub fn new(name: impl Into<String>, std_time: f64) -> Self {
        Self {
            name: name.into(),
            std_time,
        }
    }
}

/// How many consecutive times an operation row repeats in the goal card.
///
/// With a positive target rate this is `floor(target / std_time)`, clamped
/// to at least one so every operation appears. Without a usable target every
/// operation appears exactly once.
pub fn repeat_count(std_time: f64, target: Option<f64>) -> usize {
    match target {
        Some(t) if t > 0.0 => ((t / std_time).floor() as usize).max(1),
        _ => 1,
    }
}
