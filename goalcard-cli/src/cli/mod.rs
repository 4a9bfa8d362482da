//! Command-line interface for the goal-card generator

use clap::Parser;
use std::path::PathBuf;

/// Generate a production goal card from an engineering time-study sheet.
///
/// All positional inputs are validated by clap before any file is touched;
/// a missing argument aborts the run with a message naming it.
#[derive(Parser, Debug)]
#[command(name = "goalcard-cli", version, about)]
pub struct Args {
    /// Engineering sheet workbook (.xlsx) holding the time-study data
    pub engsheet: PathBuf,

    /// Sheet name within the engineering workbook
    pub sheet: String,

    /// Floor label stamped over the gcfloor placeholder
    pub floor: String,

    /// Comment label stamped over the gccmt placeholder
    pub comment: String,

    /// Target rate in units per hour; non-positive means no expansion
    #[arg(allow_negative_numbers = true)]
    pub target: f64,

    /// Date string stamped over the gcdate placeholder
    pub date: String,

    /// Output workbook path for the generated goal card
    pub output: PathBuf,

    /// Goal-card template workbook copied to the output path
    #[arg(long, default_value = "gctemplate.xlsx")]
    pub template: PathBuf,
}
