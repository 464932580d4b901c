use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::models::LoginRequest;
use crate::ui::messages::{info, success};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login {
        id_token,
        user_id,
        name,
        picture,
    } = cmd
    {
        let mut ctx = AppContext::from_config(cfg)?;
        info(format!("Logging in to {}…", ctx.api.base_url()));

        let session = AuthLogic::login(
            &mut ctx,
            LoginRequest {
                id_token: id_token.clone(),
                user_id: user_id.clone(),
                name: name.clone(),
                picture: picture.clone(),
            },
        )
        .await?;

        success(format!(
            "Logged in as {} (user #{})",
            session.name, session.user_id
        ));
    }
    Ok(())
}
