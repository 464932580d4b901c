use crate::cli::commands::prompt::ask_confirmation;
use crate::cli::parser::CharCommands;
use crate::config::Config;
use crate::core::characters::{CharacterLogic, CharacterPatch};
use crate::core::context::AppContext;
use crate::core::validate;
use crate::errors::{AppError, AppResult};
use crate::models::Character;
use crate::ui::messages::{info, success};
use crate::ui::render;

pub async fn handle(action: &CharCommands, cfg: &Config) -> AppResult<()> {
    let ctx = AppContext::from_config(cfg)?;

    match action {
        CharCommands::List { json } => {
            let list = CharacterLogic::list(&ctx).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                print_list(&list, cfg);
            }
            Ok(())
        }

        CharCommands::Add {
            name,
            fields,
            default,
        } => {
            let form =
                validate::character_form(name, fields.job.as_deref(), fields.level, *default)?;
            let list = CharacterLogic::create(&ctx, form).await?;
            success(format!("Character '{}' created", name.trim()));
            print_list(&list, cfg);
            Ok(())
        }

        CharCommands::Edit {
            id,
            name,
            fields,
            default,
            no_default,
        } => {
            let patch = CharacterPatch {
                name: name.clone(),
                job: fields.job.clone(),
                level: fields.level,
                is_default: match (*default, *no_default) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };

            let result = CharacterLogic::update(&ctx, *id, patch).await;
            after_mutation(&ctx, cfg, result, &format!("Character #{id} updated")).await
        }

        CharCommands::Del { id, yes } => {
            if !*yes && !ask_confirmation(&format!("Delete character #{id}?")) {
                info("Operation cancelled.");
                return Ok(());
            }
            let result = CharacterLogic::delete(&ctx, *id).await;
            after_mutation(&ctx, cfg, result, &format!("Character #{id} deleted")).await
        }
    }
}

async fn after_mutation(
    ctx: &AppContext,
    cfg: &Config,
    result: AppResult<Vec<Character>>,
    done: &str,
) -> AppResult<()> {
    match result {
        Ok(list) => {
            success(done);
            print_list(&list, cfg);
            Ok(())
        }
        Err(e @ AppError::StaleView(_)) => {
            let list = CharacterLogic::list(ctx).await?;
            print_list(&list, cfg);
            Err(e)
        }
        Err(e) => Err(e),
    }
}

fn print_list(list: &[Character], cfg: &Config) {
    if list.is_empty() {
        info("No characters yet. Create one with `rraid chars add --name <NAME>`.");
    } else {
        print!("{}", render::characters(list, &cfg.time_format));
    }
}
