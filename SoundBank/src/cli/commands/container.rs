//! CLI command for decoding sound containers

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, PACKAGE, print_done, print_step, simple_spinner};
use crate::formats::container::read_container;
use crate::options::DecodeOptions;
use crate::report::write_container_report;

/// Decode a container, extract its blocks and print its report (or JSON)
///
/// # Errors
/// Returns an error if the container cannot be read, decoded or extracted, or output fails.
pub fn execute(source: &Path, options: &DecodeOptions, json: bool, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let show_progress = !quiet && !json;

    if show_progress {
        print_step(1, 2, PACKAGE, &format!("Decoding {}...", source.display()));
    }
    let pb = show_progress.then(|| simple_spinner("scanning blocks"));
    let result = read_container(source, options);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let decoded = result.with_context(|| format!("Failed to decode container {}", source.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &decoded.container)?;
        writeln!(out)?;
        return Ok(());
    }
    write_container_report(&decoded.container, &mut out)?;

    if show_progress {
        if decoded.extracted.is_empty() {
            print_step(2, 2, DISK, "No blocks extracted");
        } else {
            print_step(
                2,
                2,
                DISK,
                &format!("Extracted {} blocks", decoded.extracted.len()),
            );
            for path in &decoded.extracted {
                println!("  {}", path.display());
            }
        }
        print_done(started.elapsed());
    }
    Ok(())
}
