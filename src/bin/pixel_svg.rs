//! Command-line front end.
//!
//! ```text
//! pixel_svg [-l] [-p] [-s] [-v] [-o OUTPUT] INPUT
//! pixel_svg [-l] [-p] [-s] [-v] --dir RASTER_DIR VECTOR_DIR
//! ```

use pixel_svg::utils::file_path::{sibling_vector_path, Destination};
use pixel_svg::utils::log::{init_logger, level_for};
use pixel_svg::{convert_if_missing_with, convert_one, ConvertOptions};
use std::env;
use std::path::PathBuf;
use std::process;

const USAGE: &str = "Usage:
  pixel_svg [-l] [-p] [-s] [-v] [-o OUTPUT] INPUT
  pixel_svg [-l] [-p] [-s] [-v] --dir RASTER_DIR VECTOR_DIR

Options:
  -l        limit colors to 4096 (#rgb fills)
  -p        paint merged rectangles in a highlight color
  -s        one rectangle per pixel, no merging
  -v        verbose logging
  -o FILE   output file, '-' for stdout (default: INPUT with .svg extension)";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Convert {
        input: PathBuf,
        output: Option<String>,
    },
    Batch {
        raster_dir: PathBuf,
        vector_dir: PathBuf,
    },
    Help,
}

fn parse_args(args: &[String]) -> Result<(Command, ConvertOptions), String> {
    let mut options = ConvertOptions::new();
    let mut output = None;
    let mut dirs: Option<(PathBuf, PathBuf)> = None;
    let mut positional = Vec::new();

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "-l" => options.quantize_colors = true,
            "-p" => options.highlight_merged_rectangles = true,
            "-s" => options.single_pixel_only = true,
            "-v" => options.verbose = true,
            "-h" | "--help" => return Ok((Command::Help, options)),
            "-o" => {
                let value = args.get(index + 1).ok_or("-o requires an argument")?;
                output = Some(value.clone());
                index += 1;
            }
            "--dir" => {
                let (Some(raster), Some(vector)) = (args.get(index + 1), args.get(index + 2)) else {
                    return Err("--dir requires RASTER_DIR and VECTOR_DIR".to_string());
                };
                dirs = Some((PathBuf::from(raster), PathBuf::from(vector)));
                index += 2;
            }
            // A lone "-" is a file name, not a flag
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option {flag}"));
            }
            value => positional.push(PathBuf::from(value)),
        }
        index += 1;
    }

    let command = match (dirs, positional.len()) {
        (Some(_), _) if output.is_some() => {
            return Err("-o cannot be combined with --dir".to_string());
        }
        (Some((raster_dir, vector_dir)), 0) => Command::Batch {
            raster_dir,
            vector_dir,
        },
        (None, 1) => Command::Convert {
            input: positional.remove(0),
            output,
        },
        (None, 0) => return Err("missing INPUT".to_string()),
        _ => return Err("too many arguments".to_string()),
    };
    Ok((command, options))
}

fn run(command: Command, options: &ConvertOptions) -> pixel_svg::Result<bool> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(true)
        }
        Command::Convert { input, output } => {
            let dest = match output {
                Some(arg) => PathBuf::from(arg.trim()),
                None => sibling_vector_path(&input),
            };
            let destination = Destination::from(dest.as_path());
            let report = convert_one(&input, &dest, options)?;
            log::info!(
                "{}x{} image: {} rectangles, {} bytes written to {}",
                report.width,
                report.height,
                report.stats.rectangles,
                report.bytes,
                destination
            );
            Ok(true)
        }
        Command::Batch {
            raster_dir,
            vector_dir,
        } => {
            let report = convert_if_missing_with(&raster_dir, &vector_dir, options)?;
            log::info!(
                "{} converted, {} skipped, {} failed",
                report.converted.len(),
                report.skipped.len(),
                report.failed.len()
            );
            for (path, err) in &report.failed {
                eprintln!("{}: {}", path.display(), err);
            }
            Ok(report.is_success())
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let (command, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("pixel_svg: {msg}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    init_logger(level_for(options.verbose));

    match run(command, &options) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("pixel_svg: {e}");
            process::exit(1);
        }
    }
}
