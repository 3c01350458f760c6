use clap::Parser;
use nwalign::align;

#[derive(Parser)]
#[command(version, about)]
enum Cli {
    /// Align every query record against every target record.
    Align(align::Cli),
}

fn main() -> anyhow::Result<()> {
    match Cli::parse() {
        Cli::Align(cli) => align::cli(cli),
    }
}
