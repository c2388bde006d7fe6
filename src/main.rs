//! Iconpack - Command-line tool for generating React icon packages from upstream SVG sets

use std::process::ExitCode;

use iconpack::cli;

fn main() -> ExitCode {
    cli::run()
}
