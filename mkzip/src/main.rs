use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::*;
use structopt::*;

use memzip::{DosTimeZone, ZipBuilder, ZipOptions};

#[derive(Debug, StructOpt)]
#[structopt(name = "mkzip", about = "Packs files into a flat .zip archive")]
struct Opt {
    /// Pass multiple times for additional verbosity (info, debug, trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbosity: usize,

    /// DEFLATE level, 0 (store) through 9. Anything else means 6.
    #[structopt(short, long, default_value = "6")]
    level: u32,

    /// Record modification times in UTC instead of local time.
    #[structopt(long)]
    utc: bool,

    /// Where to write the archive. Defaults to stdout.
    #[structopt(short, long)]
    output: Option<PathBuf>,

    #[structopt(name("FILE"), required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Opt::from_args();

    let mut errlog = stderrlog::new();
    errlog.verbosity(args.verbosity + 1);
    errlog.init()?;

    let time_zone = if args.utc {
        DosTimeZone::Utc
    } else {
        DosTimeZone::Local
    };
    let options = ZipOptions::default()
        .compression_level(args.level)
        .time_zone(time_zone);
    let mut zip = ZipBuilder::with_options(options);

    for path in &args.files {
        let name = path
            .file_name()
            .with_context(|| format!("{} has no file name", path.display()))?;
        let contents =
            fs::read(path).with_context(|| format!("Couldn't read {}", path.display()))?;
        let modified = modified_time(path);

        let count = zip
            .add(name.to_string_lossy().as_bytes(), contents, modified)
            .with_context(|| format!("Couldn't add {}", path.display()))?;
        info!("{}: {}", count, path.display());
    }

    let archive = zip.export().context("Couldn't build archive")?;

    match &args.output {
        Some(output) => fs::write(output, &archive)
            .with_context(|| format!("Couldn't write {}", output.display()))?,
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&archive)?;
            lock.flush()?;
        }
    }
    info!("Wrote {} bytes", archive.len());
    Ok(())
}

/// The file's mtime in seconds since the Unix epoch,
/// or `None` (meaning "now") if the filesystem won't say.
fn modified_time(path: &Path) -> Option<i64> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|when| DateTime::<Utc>::from(when).timestamp())
        .map_err(|e| warn!("Couldn't get modification time of {}: {}", path.display(), e))
        .ok()
}
