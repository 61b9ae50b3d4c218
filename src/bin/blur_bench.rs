use graymap::config::blur_bench::{self, BlurBenchConfig};
use graymap::diagnostics::counters::{self, CounterSnapshot};
use graymap::diagnostics::timing::{elapsed_ms, TimingBreakdown};
use graymap::image::io::{load, save, write_json_file};
use graymap::ops::{blur_with, BlurMethod};
use graymap::GrayImage;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = blur_bench::load_config(Path::new(&config_path))?;

    counters::reset();
    let start = Instant::now();
    let mut runs = Vec::with_capacity(config.inputs.len());
    for input in &config.inputs {
        let run = bench_one(&config, input)?;
        let stages = run
            .timing
            .stages
            .iter()
            .map(|s| format!("{} {:.3} ms", s.label, s.elapsed_ms))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} ({}x{}): {}{}",
            input.display(),
            run.width,
            run.height,
            stages,
            if run.methods_agree {
                ""
            } else {
                " [MISMATCH]"
            }
        );
        runs.push(run);
    }

    let report = BlurBenchReport {
        dx: config.blur.dx,
        dy: config.blur.dy,
        methods: config.blur.methods.clone(),
        total_ms: elapsed_ms(start),
        runs,
        counters: counters::snapshot(),
    };
    write_json_file(&config.output.report_json, &report)?;
    println!(
        "Saved report for {} inputs to {}",
        report.runs.len(),
        config.output.report_json.display()
    );

    if report.runs.iter().any(|r| !r.methods_agree) {
        return Err("blur methods produced different outputs".to_string());
    }
    Ok(())
}

fn bench_one(config: &BlurBenchConfig, input: &Path) -> Result<BlurRun, String> {
    let img = load(input).map_err(|e| format!("Failed to load {}: {e}", input.display()))?;
    let (dx, dy) = (config.blur.dx, config.blur.dy);

    let mut timing = TimingBreakdown::default();
    let mut outputs: Vec<GrayImage> = Vec::with_capacity(config.blur.methods.len());
    for &method in &config.blur.methods {
        let mut work = img.clone();
        timing.measure(method.label(), || blur_with(&mut work, dx, dy, method));
        outputs.push(work);
    }
    timing.total_ms = timing.stages.iter().map(|s| s.elapsed_ms).sum();
    let methods_agree = outputs.windows(2).all(|pair| pair[0] == pair[1]);

    if let (Some(dir), Some(blurred)) = (&config.output.blurred_dir, outputs.first()) {
        fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        let name = input
            .file_name()
            .ok_or_else(|| format!("Input {} has no file name", input.display()))?;
        let out_path = dir.join(name);
        save(blurred, &out_path)
            .map_err(|e| format!("Failed to save {}: {e}", out_path.display()))?;
    }

    Ok(BlurRun {
        input: input.to_path_buf(),
        width: img.width(),
        height: img.height(),
        timing,
        methods_agree,
    })
}

fn usage() -> String {
    "Usage: blur_bench <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlurRun {
    input: PathBuf,
    width: usize,
    height: usize,
    timing: TimingBreakdown,
    methods_agree: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlurBenchReport {
    dx: usize,
    dy: usize,
    methods: Vec<BlurMethod>,
    total_ms: f64,
    runs: Vec<BlurRun>,
    counters: CounterSnapshot,
}
