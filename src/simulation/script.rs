//! Frame scripts for headless runs
//!
//! A script is a list of commands separated by `;` or newlines. Each command
//! produces one frame, except `point` which only moves the pointer and
//! `wait N` which produces N empty frames. `#` starts a comment.
//!
//! ```text
//! build 2 0; next; rotate; build 3 0
//! demolish 2 0
//! save; load
//! ```

use anyhow::{bail, Context, Result};

use super::builder::{BuildAction, BuildController, FrameInput, FrameReport};
use super::persistence::ObjectStore;
use super::types::Ray;

/// Most frames a single `wait` may produce
pub const MAX_WAIT_FRAMES: usize = 100_000;

/// Demo script used when headless mode is started without one
pub const DEFAULT_SCRIPT: &str = "\
# lay a short street
build 0 0; build 1 0; build 2 0
next; next; next
point 0 1; build; rotate; build 1 1
save
demolish 2 0
load";

/// Parse a script into frames
pub fn parse_script(text: &str) -> Result<Vec<FrameInput>> {
    let mut frames = Vec::new();
    let mut pointer = None;

    let commands = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|command| !command.is_empty());

    for command in commands {
        let words: Vec<&str> = command.split_whitespace().collect();
        let (name, args) = match words.split_first() {
            Some((name, args)) => (*name, args),
            None => continue,
        };

        let action = match name {
            "point" => {
                pointer = Some(parse_point(command, args)?);
                continue;
            }
            "clear-pointer" => {
                pointer = None;
                continue;
            }
            "wait" => {
                let count = match args {
                    [] => 1,
                    [n] => n
                        .parse::<usize>()
                        .with_context(|| format!("invalid frame count in '{command}'"))?,
                    _ => bail!("'wait' takes at most one argument: '{command}'"),
                };
                if count > MAX_WAIT_FRAMES {
                    bail!("'wait' is limited to {MAX_WAIT_FRAMES} frames: '{command}'");
                }
                frames.extend((0..count).map(|_| FrameInput::new(pointer, Vec::new())));
                continue;
            }
            "build" | "demolish" => {
                if !args.is_empty() {
                    pointer = Some(parse_point(command, args)?);
                }
                if name == "build" {
                    BuildAction::Build
                } else {
                    BuildAction::Demolish
                }
            }
            _ => {
                let action = match name {
                    "rotate" => BuildAction::Rotate,
                    "next" => BuildAction::NextStructure,
                    "prev" | "previous" => BuildAction::PreviousStructure,
                    "save" => BuildAction::Save,
                    "load" => BuildAction::Load,
                    other => bail!("unknown script command '{other}'"),
                };
                if !args.is_empty() {
                    bail!("'{name}' takes no arguments: '{command}'");
                }
                action
            }
        };

        frames.push(FrameInput::new(pointer, vec![action]));
    }

    Ok(frames)
}

fn parse_point(command: &str, args: &[&str]) -> Result<Ray> {
    let [x, z] = args else {
        bail!("expected two coordinates in '{command}'");
    };
    let x: f32 = x
        .parse()
        .with_context(|| format!("invalid x coordinate in '{command}'"))?;
    let z: f32 = z
        .parse()
        .with_context(|| format!("invalid z coordinate in '{command}'"))?;
    Ok(Ray::looking_down_at(x, z))
}

/// Feed every frame to the controller, returning one report per frame
pub fn run_script(
    controller: &mut BuildController,
    frames: &[FrameInput],
    delta_secs: f32,
    store: &mut dyn ObjectStore,
) -> Vec<FrameReport> {
    let mut reports = Vec::with_capacity(frames.len());
    for frame in frames {
        reports.push(controller.tick(frame, delta_secs, store));
    }
    reports
}
