//! Pffio CLI - Opens and closes a Personal Folder File using the libpff
//! native module, reporting success or the failing operation.

mod cli;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use pffio_core::AccessMode;
use pffio_core::PffFile;
use pffio_core::module;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.quiet);

    let mode = if cli.read_write {
        AccessMode::ReadWrite
    } else {
        AccessMode::ReadOnly
    };

    let module = module::load().map_err(error::convert_load_error)?;

    let mut file = PffFile::with_backend(module);
    file.open(&cli.file, mode)
        .map_err(|err| error::convert_open_error(err, &cli.file))?;
    file.close()
        .map_err(|err| error::convert_close_error(err, &cli.file))?;

    let report = output::OpenCloseReport {
        path: cli.file,
        access_mode: mode,
        library_version: module.version(),
    };
    formatter.format_open_close(&report)
}
