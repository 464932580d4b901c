use crate::cli::parser::Cli;
use crate::cli::resolve_now;
use crate::core::schedule::ResetWindow;
use crate::errors::AppResult;
use crate::ui::render;

pub fn handle(cli: &Cli) -> AppResult<()> {
    let now = resolve_now(cli.at.as_deref())?;
    let window = ResetWindow::containing(&now);
    println!("{}", render::window(&window));
    Ok(())
}
