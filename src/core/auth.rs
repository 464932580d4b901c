use tracing::info;

use crate::core::context::AppContext;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::LoginRequest;

pub struct AuthLogic;

impl AuthLogic {
    /// Identity exchange: Unauthenticated/Failed -> Authenticating ->
    /// Authenticated (session persisted) or Failed.
    pub async fn login(ctx: &mut AppContext, req: LoginRequest) -> AppResult<Session> {
        if req.id_token.trim().is_empty() || req.user_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Both the identity token and the user id are required".into(),
            ));
        }

        ctx.session.begin()?;

        let resp = match ctx.api.login(&req).await {
            Ok(r) => r,
            Err(e) => {
                // A rejected exchange also invalidates any earlier session.
                if matches!(e, AppError::AuthFailed(_)) {
                    std::fs::remove_file(&ctx.session_file).ok();
                }
                ctx.session.fail(e.to_string());
                return Err(e);
            }
        };

        let session = Session::from_login(resp, req.name, req.picture);
        if let Err(e) = session.save_to(&ctx.session_file) {
            ctx.session.fail(e.to_string());
            return Err(e);
        }

        info!(user_id = session.user_id, "logged in");
        ctx.session.complete(session.clone());
        Ok(session)
    }
}
