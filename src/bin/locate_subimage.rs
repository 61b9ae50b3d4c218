use graymap::config::locate;
use graymap::diagnostics::timing::TimingBreakdown;
use graymap::image::io::{load, write_json_file};
use graymap::ops::{locate_subimage, SubimageSearch};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = locate::load_config(Path::new(&config_path))?;

    let haystack = load(&config.haystack)
        .map_err(|e| format!("Failed to load {}: {e}", config.haystack.display()))?;
    let needle = load(&config.needle)
        .map_err(|e| format!("Failed to load {}: {e}", config.needle.display()))?;

    let mut timing = TimingBreakdown::default();
    let search = timing.measure("locate", || locate_subimage(&haystack, &needle));
    timing.total_ms = timing.stages.iter().map(|s| s.elapsed_ms).sum();

    match search.position {
        Some((x, y)) => println!("Subimage found at ({x}, {y})"),
        None => println!("Subimage not found"),
    }
    println!("Candidate positions compared: {}", search.comparisons);
    println!("Pixel comparisons: {}", search.pixel_comparisons);
    println!("Elapsed: {:.3} ms", timing.total_ms);

    if let Some(path) = &config.output.report_json {
        let report = LocateReport {
            haystack_size: [haystack.width(), haystack.height()],
            needle_size: [needle.width(), needle.height()],
            search,
            timing,
        };
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: locate_subimage <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateReport {
    haystack_size: [usize; 2],
    needle_size: [usize; 2],
    search: SubimageSearch,
    timing: TimingBreakdown,
}
