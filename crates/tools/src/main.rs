mod script;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{ActionKind, Engine, Entity, Intent, SessionConfig, TurnOutcome, save};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

/// Runs a dungeon session headlessly from a keystroke script.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file overriding session settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Keystroke script to feed the session
    #[arg(long)]
    script: Option<PathBuf>,
    /// Resume from this save instead of generating a new session
    #[arg(long)]
    load: Option<PathBuf>,
    /// Write the session here when the script ends
    #[arg(long)]
    save: Option<PathBuf>,
    /// Number of log lines to print at the end
    #[arg(long, default_value_t = 10)]
    log_lines: usize,
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn start_session(args: &Args) -> Result<Engine> {
    if let Some(path) = &args.load {
        let engine = save::load(path)
            .with_context(|| format!("Failed to load save file: {}", path.display()))?;
        info!(path = %path.display(), floor = engine.current_floor(), "resumed session");
        return Ok(engine);
    }
    let config = load_config(args.config.as_deref())?;
    Engine::new(args.seed, &config).context("Failed to start a new session")
}

fn player_hp(engine: &Engine) -> Option<(i32, i32)> {
    engine.player().and_then(Entity::as_actor).map(|a| (a.fighter.hp(), a.fighter.max_hp()))
}

/// Name of the held item an unaimed `UseItem` would fire at the player's own cell.
fn missing_target(engine: &Engine, intent: &Intent) -> Option<String> {
    let Intent::Action(ActionKind::UseItem { item, target: None }) = intent else {
        return None;
    };
    let held = engine.player()?.as_actor()?.inventory.get(*item)?;
    held.as_item().filter(|i| i.consumable.needs_target()).map(|_| held.name.clone())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut engine = start_session(&args)?;

    let intents = match &args.script {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read script file: {}", path.display()))?;
            script::parse(&source)?
        }
        None => Vec::new(),
    };

    let mut acted = 0usize;
    for intent in intents {
        if let Some(name) = missing_target(&engine, &intent) {
            warn!(item = %name, "skipping use without a target; write it as uN@x,y");
            continue;
        }
        let outcome = match engine.handle_intent(intent) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, "session hit an unrecoverable error");
                if let Some(path) = &args.save
                    && let Err(save_err) = save::write_atomic(path, &engine)
                {
                    warn!(%save_err, "emergency save failed");
                }
                return Err(err).context("Session aborted");
            }
        };
        match outcome {
            TurnOutcome::Acted => acted += 1,
            TurnOutcome::Rejected(reason) => info!(%reason, "intent rejected"),
            TurnOutcome::Quit => break,
            TurnOutcome::PlayerDead => {
                info!("the player is dead; ignoring the rest of the script");
                break;
            }
        }
    }

    if let Some(path) = &args.save {
        if engine.is_player_alive() {
            save::write_atomic(path, &engine)
                .with_context(|| format!("Failed to write save file: {}", path.display()))?;
            info!(path = %path.display(), "session saved");
        } else {
            info!("not saving a finished session");
        }
    }

    print!("{}", engine.map().draw_ascii());
    println!();
    match player_hp(&engine) {
        Some((hp, max_hp)) => println!("HP: {hp}/{max_hp}  Floor: {}", engine.current_floor()),
        None => println!("Floor: {}", engine.current_floor()),
    }
    println!("Seed: {}", engine.seed());
    let messages = engine.log().messages();
    for message in &messages[messages.len().saturating_sub(args.log_lines)..] {
        println!("{}", message.full_text());
    }
    println!("Turns acted: {acted}");
    println!("Snapshot Hash: {:016x}", engine.snapshot_hash());

    Ok(())
}

#[cfg(test)]
mod tests {
    use game_core::{Pos, content};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn partial_toml_config_keeps_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.toml");
        fs::write(&path, "map_width = 40\nmap_height = 30\nfov_radius = 5\n").expect("write");
        let config = load_config(Some(&path)).expect("config");
        assert_eq!(config.map_width, 40);
        assert_eq!(config.fov_radius, 5);
        assert_eq!(config.action_cost, SessionConfig::default().action_cost);
    }

    #[test]
    fn missing_config_file_reports_its_path() {
        let err = load_config(Some(Path::new("/nonexistent/session.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/session.toml"));
    }

    #[test]
    fn unaimed_use_is_flagged_only_for_targeted_items() {
        let mut engine = Engine::new(3, &SessionConfig::default()).expect("engine");
        let player = engine.player_id();
        let held = [content::health_potion(), content::fireball_scroll()];
        if let Some(actor) = engine.map_mut().get_mut(player).and_then(Entity::as_actor_mut) {
            for item in held {
                actor.inventory.add(item).expect("room in the pack");
            }
        }
        let unaimed = |item| Intent::Action(ActionKind::UseItem { item, target: None });

        assert_eq!(missing_target(&engine, &unaimed(0)), None);
        assert_eq!(missing_target(&engine, &unaimed(1)).as_deref(), Some("Fireball Scroll"));
        assert_eq!(missing_target(&engine, &unaimed(5)), None, "empty slots are left to the engine");
        let aimed = Intent::Action(ActionKind::UseItem { item: 1, target: Some(Pos { y: 1, x: 1 }) });
        assert_eq!(missing_target(&engine, &aimed), None);
    }
}
