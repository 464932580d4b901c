use crate::config::Config;
use crate::core::session::SessionState;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let state = SessionState::load_from(&Config::session_file())?;

    info(format!("API: {}", cfg.api_url));
    match &state {
        SessionState::Authenticated(s) => {
            println!("Session : {}", state.label());
            println!("User    : {} (#{}, {})", s.name, s.user_id, s.line_user_id);
            println!(
                "Since   : {}",
                s.logged_in_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
            );
        }
        other => warning(format!("Session: {}", other.label())),
    }
    Ok(())
}
