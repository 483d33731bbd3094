use anyhow::Result;
use concomp_cli::{cli_main, init_env_logger};

fn main() -> Result<()> {
    init_env_logger()?;
    if let Err(err) = cli_main(std::env::args_os()) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}
