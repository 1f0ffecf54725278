use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use imgconv::ImageFormat;

/// Convert an image between BMP, PPM and JPEG, chosen by file extension.
#[derive(Parser, Debug)]
#[command(name = "imgconv", version, about)]
struct Cli {
    /// Source image (.bmp, .ppm, .jpg, .jpeg)
    input: PathBuf,
    /// Destination image (.bmp, .ppm, .jpg, .jpeg)
    output: PathBuf,
}

const EXIT_USAGE: u8 = 1;
const EXIT_UNKNOWN_INPUT: u8 = 2;
const EXIT_UNKNOWN_OUTPUT: u8 = 3;
const EXIT_LOAD_FAILED: u8 = 4;
const EXIT_SAVE_FAILED: u8 = 5;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if let Err(io_err) = err.print() {
                log::error!("failed to print usage: {io_err}");
            }
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let Some(in_format) = ImageFormat::from_path(&cli.input) else {
        log::error!("Unknown format of the input file: {}", cli.input.display());
        return EXIT_UNKNOWN_INPUT;
    };
    let Some(out_format) = ImageFormat::from_path(&cli.output) else {
        log::error!("Unknown format of the output file: {}", cli.output.display());
        return EXIT_UNKNOWN_OUTPUT;
    };

    let image = match in_format.load(&cli.input) {
        Ok(image) => image,
        Err(err) => {
            log::error!("Loading failed: {}: {err}", cli.input.display());
            return EXIT_LOAD_FAILED;
        }
    };

    if let Err(err) = out_format.save(&cli.output, &image) {
        log::error!("Saving failed: {}: {err}", cli.output.display());
        return EXIT_SAVE_FAILED;
    }

    println!("Successfully converted");
    0
}
