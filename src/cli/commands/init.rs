use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// Creates the config directory and writes a default configuration file
/// (with `--api-url` baked in when given).
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rRaid…");

    let path = Config::init_all(cli.api_url.clone(), cli.test)?;

    println!("📄 Config file : {}", path.display());
    println!("🔑 Session     : {}", Config::session_file().display());

    success("rRaid initialization completed!");
    Ok(())
}
