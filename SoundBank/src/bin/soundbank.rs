//! `soundbank` command-line entry point

fn main() -> anyhow::Result<()> {
    soundbank::cli::run_cli()
}
