//! pxf - Command-line tool for filtering RGB images

use std::process::ExitCode;

use pixelfilter::cli;

fn main() -> ExitCode {
    cli::run()
}
