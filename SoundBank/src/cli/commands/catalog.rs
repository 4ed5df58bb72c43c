//! CLI command for decoding the sound metadata catalog

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DOCUMENT, LOOKING_GLASS, print_done, print_step};
use crate::formats::catalog::{SectionKind, decode_catalog};
use crate::formats::common::FileCursor;
use crate::options::DecodeOptions;
use crate::report::write_catalog_report;

/// Decode a catalog and print its report (or JSON)
///
/// # Errors
/// Returns an error if the catalog cannot be read or decoded, or output fails.
pub fn execute(source: &Path, options: &DecodeOptions, json: bool, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let show_progress = !quiet && !json;

    if show_progress {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading {}...", source.display()));
    }
    let mut cursor = FileCursor::open(source)
        .with_context(|| format!("Failed to open {}", source.display()))?;
    let catalog = decode_catalog(&mut cursor, options)
        .with_context(|| format!("Failed to decode catalog {}", source.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &catalog)?;
        writeln!(out)?;
        return Ok(());
    }

    if show_progress {
        print_step(2, 2, DOCUMENT, "Writing report...");
    }
    write_catalog_report(&catalog, &mut out)?;

    if show_progress {
        println!(
            "{} files, {} localized assets, {} sound items",
            catalog.entries(SectionKind::Files).len(),
            catalog.entries(SectionKind::LocalizedAssets).len(),
            catalog.entries(SectionKind::SoundItems).len()
        );
        print_done(started.elapsed());
    }
    Ok(())
}
