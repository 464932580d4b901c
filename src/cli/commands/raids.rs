use chrono::{DateTime, Local, Utc};

use crate::cli::commands::prompt::ask_confirmation;
use crate::cli::parser::{Cli, RaidCommands};
use crate::cli::resolve_now;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::raids::RaidLogic;
use crate::core::roster::RosterView;
use crate::core::schedule::ResetWindow;
use crate::core::validate::RaidDraft;
use crate::errors::{AppError, AppResult};
use crate::models::SignupRecord;
use crate::ui::messages::{header, info, success, warning};
use crate::ui::render;
use crate::utils::date;

pub async fn handle(cli: &Cli, action: &RaidCommands, cfg: &Config) -> AppResult<()> {
    let ctx = AppContext::from_config(cfg)?;
    let now = resolve_now(cli.at.as_deref())?;

    match action {
        RaidCommands::List { all, json } => {
            if *json {
                let board = RaidLogic::board(&ctx, &now, *all).await?;
                println!("{}", serde_json::to_string_pretty(&board.cards)?);
                Ok(())
            } else {
                print_board(&ctx, cfg, &now, *all).await
            }
        }

        RaidCommands::Roster { id } => {
            let signups = RaidLogic::roster(&ctx, *id).await?;
            print_roster(&ctx, *id, &signups);
            Ok(())
        }

        RaidCommands::Create {
            boss,
            start,
            subtitle,
            character,
        } => {
            let start_time: Option<DateTime<Utc>> = if start.trim().is_empty() {
                None
            } else {
                Some(date::parse_local(start)?.with_timezone(&Utc))
            };
            let draft = RaidDraft {
                boss: boss.clone(),
                subtitle: subtitle.clone(),
                start_time,
            };

            let created = RaidLogic::create(&ctx, draft, *character).await?;
            match created {
                Some(r) => success(format!("Raid #{} '{}' created", r.id, r.title)),
                None => success("Raid created"),
            }
            print_board(&ctx, cfg, &now, false).await
        }

        RaidCommands::Delete { id, yes } => {
            if !*yes
                && !ask_confirmation(&format!(
                    "Delete raid #{id}? All of its signups are deleted too."
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            let result = RaidLogic::delete(&ctx, *id).await;
            refresh_after(&ctx, cfg, &now, result, || {
                success(format!("Raid #{id} has been deleted."))
            })
            .await
        }

        RaidCommands::Join { id, character } => match RaidLogic::join(&ctx, *id, *character).await
        {
            Ok(outcome) => {
                success(format!(
                    "Signed up for raid #{} with {}",
                    id,
                    outcome.character.summary()
                ));
                print_roster(&ctx, *id, &outcome.roster);
                Ok(())
            }
            Err(e @ AppError::StaleView(_)) => {
                print_board(&ctx, cfg, &now, false).await?;
                Err(e)
            }
            Err(e) => Err(e),
        },

        RaidCommands::Cancel { id, yes } => {
            if !*yes && !ask_confirmation(&format!("Cancel your signup for raid #{id}?")) {
                info("Operation cancelled.");
                return Ok(());
            }

            match RaidLogic::cancel(&ctx, *id).await {
                Ok(roster) => {
                    success(format!("Your signup for raid #{id} has been cancelled."));
                    print_roster(&ctx, *id, &roster);
                    Ok(())
                }
                Err(e @ AppError::StaleView(_)) => {
                    print_board(&ctx, cfg, &now, false).await?;
                    Err(e)
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// After a mutation: on success report and re-list; on a stale target re-list
/// and still return the error.
async fn refresh_after<F: FnOnce()>(
    ctx: &AppContext,
    cfg: &Config,
    now: &DateTime<Local>,
    result: AppResult<()>,
    on_success: F,
) -> AppResult<()> {
    match result {
        Ok(()) => {
            on_success();
            print_board(ctx, cfg, now, false).await
        }
        Err(e @ AppError::StaleView(_)) => {
            print_board(ctx, cfg, now, false).await?;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

async fn print_board(
    ctx: &AppContext,
    cfg: &Config,
    now: &DateTime<Local>,
    all: bool,
) -> AppResult<()> {
    let board = RaidLogic::board(ctx, now, all).await?;
    let window = ResetWindow::containing(now);

    if board.is_empty() {
        if all {
            info("No raids found.");
        } else {
            info(format!(
                "No raids this cycle ({} to {}).",
                window.start.format("%a %m-%d %H:%M"),
                window.end.format("%a %m-%d %H:%M")
            ));
        }
        return Ok(());
    }

    if all {
        header("All raids");
    } else {
        header(format!(
            "Raids for the week of {}",
            window.start.format("%Y-%m-%d")
        ));
    }
    print!("{}", render::board(&board, &cfg.time_format));

    let unknown = board.cards.iter().filter(|c| c.signup_count.is_none()).count();
    if unknown > 0 {
        warning(format!("Signup count unavailable for {unknown} raid(s)."));
    }
    Ok(())
}

fn print_roster(ctx: &AppContext, raid_id: i64, signups: &[SignupRecord]) {
    if signups.is_empty() {
        info(format!("Nobody has signed up for raid #{raid_id} yet."));
        return;
    }
    let view = RosterView::build(signups, ctx.session.user_id());
    print!("{}", render::roster(&view, raid_id));
}
