//! Console output formatting.
//!
//! Pure `format_*` functions build strings, thin `print_*` wrappers emit
//! them. Formatting stays unit-testable without capturing stdout.

use crate::process::{Outcome, ProcessEvent, ProcessReport};
use crate::scan::ScanManifest;

/// Summary line for the scan stage.
pub fn format_scan_summary(scan: &ScanManifest) -> String {
    format!(
        "Found {} albums, {} images",
        scan.albums.len(),
        scan.image_count()
    )
}

pub fn print_scan_summary(scan: &ScanManifest) {
    println!("{}", format_scan_summary(scan));
}

/// One line per progress event.
pub fn format_process_event(event: &ProcessEvent) -> String {
    match event {
        ProcessEvent::AlbumStarted { album, images } => {
            format!("{album}: {images} images")
        }
        ProcessEvent::ImageDone {
            album,
            file,
            thumbnail,
            web,
        } => {
            format!(
                "  {album}/{file}: thumb {}, web {}",
                outcome_word(*thumbnail),
                outcome_word(*web)
            )
        }
        ProcessEvent::ImageFailed { album, file, error } => {
            format!("  {album}/{file}: FAILED ({error})")
        }
    }
}

pub fn print_process_event(event: &ProcessEvent) {
    println!("{}", format_process_event(event));
}

fn outcome_word(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Generated => "generated",
        Outcome::Skipped => "skipped",
    }
}

/// Final summary: counters plus one line per failed file.
pub fn format_run_summary(report: &ProcessReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Done: {} derivatives generated, {} up to date, {} failed",
        report.generated,
        report.skipped,
        report.failed()
    )];
    for failure in &report.failures {
        lines.push(format!(
            "  failed: {}/{}: {}",
            failure.album, failure.file, failure.error
        ));
    }
    lines
}

pub fn print_run_summary(report: &ProcessReport) {
    for line in format_run_summary(report) {
        println!("{line}");
    }
}
