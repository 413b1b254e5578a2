mod analysis;
mod app;
mod calfile;
mod calib;
mod color;
mod data;
mod report;
mod state;
mod stats;
mod ui;

use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use eframe::egui;

use analysis::SensorKind;
use app::TriaxCalApp;
use state::AppState;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

struct Args {
    files: Vec<PathBuf>,
    sensor: SensorKind,
    write_cal: Option<PathBuf>,
}

fn print_usage(prog: &str) {
    println!("Usage: {prog} [options] <input_file> [<input_file> ...]");
    println!();
    println!("Options:");
    println!("  --accel             treat input as accelerometer data (gravity-scaled fit)");
    println!("  --write-cal <file>  write the fitted parameters as a key=value calibration file");
}

fn parse_args(prog: &str) -> Args {
    let mut files = Vec::new();
    let mut sensor = SensorKind::Magnetometer;
    let mut write_cal = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--accel" => sensor = SensorKind::Accelerometer,
            "--write-cal" => match args.next() {
                Some(path) => write_cal = Some(PathBuf::from(path)),
                None => {
                    print_usage(prog);
                    process::exit(-1);
                }
            },
            _ => files.push(PathBuf::from(arg)),
        }
    }

    Args {
        files,
        sensor,
        write_cal,
    }
}

// ---------------------------------------------------------------------------
// Entry point: load → fit → print → plot → block on the window
// ---------------------------------------------------------------------------

fn main() -> eframe::Result {
    env_logger::init();

    let prog = env::args().next().unwrap_or_else(|| "triaxcal".into());
    let args = parse_args(&prog);

    if args.files.is_empty() {
        print_usage(&prog);
        process::exit(-1);
    }

    // Every input must exist before any parsing starts.
    for path in &args.files {
        if !path.is_file() {
            println!("Error: data file \"{}\" not found.", path.display());
            process::exit(-1);
        }
    }

    let mut analyses = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match analysis::load_and_analyze(path, args.sensor) {
            Ok(analysis) => analyses.push(analysis),
            Err(e) => {
                println!("Error: {e}");
                process::exit(-1);
            }
        }
    }

    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = report::print_report(&mut out, &analyses) {
            log::error!("failed to write report: {e}");
        }
        out.flush().ok();
    }

    if let Some(path) = &args.write_cal {
        // The ellipsoid fit of the first dataset, matching the report.
        match calfile::write_calibration(path, args.sensor, &analyses[0].ellipsoid) {
            Ok(()) => log::info!(
                "wrote {} calibration to {}",
                args.sensor.cal_prefix(),
                path.display()
            ),
            Err(e) => {
                println!("Error: {e}");
                process::exit(-1);
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(analyses, args.sensor);
    eframe::run_native(
        "triaxcal – Sensor Calibration Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(TriaxCalApp::new(state)))),
    )
}
