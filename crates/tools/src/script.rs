//! Keystroke scripts for headless sessions.
//!
//! Tokens are separated by whitespace; `#` starts a comment that runs to the
//! end of the line.
//!
//! | token          | intent                                 |
//! |----------------|----------------------------------------|
//! | `h j k l`      | bump west, south, north, east          |
//! | `y u b n`      | bump north-west, north-east, south-west, south-east |
//! | `.`            | wait                                   |
//! | `g`            | pick up                                |
//! | `uN`, `uN@x,y` | use inventory slot `N`, optionally aimed at `(x, y)` |
//! | `dN`           | drop inventory slot `N`                |
//! | `>`            | take the stairs                        |
//! | `q`            | quit                                   |
//!
//! A bare `u` is the north-east bump; `u` followed by digits is always a use.

use anyhow::{Context, Result, bail};
use game_core::{ActionKind, Intent, Pos};

pub fn parse(source: &str) -> Result<Vec<Intent>> {
    let mut intents = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        for token in code.split_whitespace() {
            let intent = parse_token(token)
                .with_context(|| format!("line {}: bad token `{token}`", line_no + 1))?;
            intents.push(intent);
        }
    }
    Ok(intents)
}

pub fn parse_token(token: &str) -> Result<Intent> {
    if let Some((dx, dy)) = bump_direction(token) {
        return Ok(Intent::Action(ActionKind::Bump { dx, dy }));
    }
    let intent = match token {
        "." => Intent::Action(ActionKind::Wait),
        "g" => Intent::Action(ActionKind::PickUp),
        ">" => Intent::TakeStairs,
        "q" => Intent::Escape,
        _ => {
            if let Some(rest) = token.strip_prefix('u') {
                parse_use(rest)?
            } else if let Some(rest) = token.strip_prefix('d') {
                Intent::Action(ActionKind::DropItem { item: parse_slot(rest)? })
            } else {
                bail!("unknown command");
            }
        }
    };
    Ok(intent)
}

fn bump_direction(token: &str) -> Option<(i32, i32)> {
    let step = match token {
        "h" => (-1, 0),
        "j" => (0, 1),
        "k" => (0, -1),
        "l" => (1, 0),
        "y" => (-1, -1),
        "u" => (1, -1),
        "b" => (-1, 1),
        "n" => (1, 1),
        _ => return None,
    };
    Some(step)
}

fn parse_use(rest: &str) -> Result<Intent> {
    let (slot, target) = match rest.split_once('@') {
        Some((slot, target)) => (slot, Some(parse_pos(target)?)),
        None => (rest, None),
    };
    Ok(Intent::Action(ActionKind::UseItem { item: parse_slot(slot)?, target }))
}

fn parse_slot(digits: &str) -> Result<usize> {
    digits.parse().with_context(|| format!("`{digits}` is not an inventory slot"))
}

fn parse_pos(text: &str) -> Result<Pos> {
    let Some((x, y)) = text.split_once(',') else {
        bail!("target `{text}` should look like x,y");
    };
    let x = x.trim().parse().with_context(|| format!("bad x coordinate `{x}`"))?;
    let y = y.trim().parse().with_context(|| format!("bad y coordinate `{y}`"))?;
    Ok(Pos { y, x })
}
