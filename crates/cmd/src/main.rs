use anyhow::Result;
use clap::Parser;

/// Legacy TBMD registry and flat-file toolkit.
///
/// The toolkit is a library; this entry point only reports the
/// installed version. Set TBMD_LOG to see diagnostics from library
/// calls.
#[derive(Parser)]
#[command(name = "tbmd", version)]
struct Cli {}

fn main() -> Result<()> {
    diagnostics::init_diagnostics();
    let _cli = Cli::parse();
    Ok(())
}
