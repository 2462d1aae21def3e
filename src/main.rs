//! Converts ID card scanner output into attendance CSVs for uploading to
//! D2L and similar systems. With a class list, the attendance carries the
//! class-list names and net ids, and an absence list can be written too.

mod config;
mod io;
mod state;
mod types;

use clap::Parser;
use config::Config;
use log::{info, warn};
use std::{
    error::Error,
    fs::File,
    path::{Path, PathBuf},
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scanner output files to convert (.txt or .xlsx)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write a .csv suitable for uploading to D2L and other systems
    #[arg(long, value_name = "FILE")]
    d2l: Option<PathBuf>,

    /// Include card ids starting with Z
    #[arg(long)]
    include_z: bool,

    /// Class list to match cards against (may be repeated)
    #[arg(long = "class-list", value_name = "FILE")]
    class_list: Vec<PathBuf>,

    /// Write the students who weren't scanned (requires --class-list)
    #[arg(long, value_name = "FILE")]
    absent: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::new(
        args.files,
        args.d2l,
        args.include_z,
        args.class_list,
        args.absent,
    )?;

    let mut lines = Vec::new();
    for path in &config.inputs {
        lines.extend(io::read_scan_lines(path)?);
    }

    let roster = if config.has_roster() {
        let mut roster = types::Roster::default();

        for path in &config.rosters {
            for result in io::RosterFileReader::new(path)? {
                let entry = result?;
                let pid = entry.pid.clone();
                if roster.insert(entry) {
                    warn!(
                        "{}: student id {} listed again; using the later row",
                        path.display(),
                        pid
                    );
                }
            }
        }

        info!("Loaded {} class list entries", roster.len());
        Some(roster)
    } else {
        None
    };

    let mut attendance = state::Attendance::new(roster, config.include_excluded);
    for (i, line) in lines.iter().enumerate() {
        attendance.process_line(i + 1, line);
    }
    let report = attendance.finish();
    info!("{} attending rows", report.attending().len());
    if let Some(roster) = report.roster() {
        info!("{} of {} students absent", roster.absent().count(), roster.len());
    }

    // Nothing is rolled back if the second file fails to write.
    if let Some(path) = &config.attendance_output {
        write_table(path, |f| report.write_attending(f))?;
    }

    if let Some(path) = &config.absent_output {
        write_table(path, |f| report.write_absent(f).map(|_| ()))?;
    }

    Ok(())
}

fn write_table<F>(path: &Path, write: F) -> Result<(), io::InputError>
where
    F: FnOnce(File) -> Result<(), csv::Error>,
{
    let file = File::create(path).map_err(|source| io::InputError::Write {
        path: path.into(),
        source: source.into(),
    })?;

    write(file).map_err(|source| io::InputError::Write {
        path: path.into(),
        source,
    })?;

    println!("Successfully generated {}", path.display());
    Ok(())
}
