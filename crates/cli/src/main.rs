use anyhow::Result;
use calcrepl_cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let code = cli.execute()?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
