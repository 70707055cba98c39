//! rendition CLI binary entry point

use anyhow::Result;
use rendition_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
