//! goalcard-cli: generate production goal cards from engineering sheets
//!
//! Pipeline: extract the front/back and assembly sections from the source
//! workbook, copy the goal-card template to the output path, inject each
//! section into its template sheet, then stamp the floor/comment/date
//! placeholders. The injection and substitution stages run independently;
//! one failing is logged and the rest still execute against the output file.

mod cli;
mod goalcard;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use goalcard::types::{
    ASSEMBLY_SHEET, FRONTBACK_SHEET, GC_COMMENT, GC_DATE, GC_FLOOR,
};
use goalcard::{
    copy_template, extract_assembly, extract_frontback, inject_operations, replace_marker,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();
    run(&args)
}

fn run(args: &cli::Args) -> Result<()> {
    log::debug!("arguments: {:?}", args);

    // A non-positive target degrades to one row per operation
    let target = (args.target > 0.0).then_some(args.target);

    let frontback = extract_frontback(&args.engsheet, &args.sheet, target)?;
    let assembly = extract_assembly(&args.engsheet, &args.sheet, target)?;
    log::info!(
        "Extracted {} front/back and {} assembly operations from '{}'.",
        frontback.len(),
        assembly.len(),
        args.sheet
    );

    copy_template(&args.template, &args.output)?;

    // Each injection and substitution stands alone: a failure is reported
    // and the remaining stages still run against the output file.
    run_stage(
        "inject frontback",
        inject_operations(&frontback, &args.output, FRONTBACK_SHEET),
    );
    run_stage(
        "inject assembly",
        inject_operations(&assembly, &args.output, ASSEMBLY_SHEET),
    );

    for sheet in [FRONTBACK_SHEET, ASSEMBLY_SHEET] {
        run_stage(
            "stamp floor",
            replace_marker(&args.output, sheet, GC_FLOOR, &args.floor),
        );
        run_stage(
            "stamp comment",
            replace_marker(&args.output, sheet, GC_COMMENT, &args.comment),
        );
        run_stage(
            "stamp date",
            replace_marker(&args.output, sheet, GC_DATE, &args.date),
        );
    }

    log::info!("Goal card written to '{}'.", args.output.display());
    Ok(())
}

fn run_stage(stage: &str, result: Result<()>) {
    if let Err(err) = result {
        log::error!("{} failed: {:#}", stage, err);
    }
}
