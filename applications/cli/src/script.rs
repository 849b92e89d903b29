//! Command script parsing
//!
//! A script holds one instruction per line. Lines are either a JSON command
//! object (`{"action": "next", "playlist": "rock"}`) or a short form such as
//! `next rock`, `volume 40` or `tick 12.5`. Blank lines and `#` comments are
//! skipped.

use anyhow::{anyhow, bail, Context, Result};
use cadence_playback::{Command, PlayTarget};

/// One script instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Forward a command to the player
    Command(Command),

    /// Let the media element play for this many seconds
    Tick(f64),
}

/// Parse every instruction of a script
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    text.lines()
        .enumerate()
        .filter_map(|(number, line)| {
            parse_line(line)
                .with_context(|| format!("line {}: {}", number + 1, line.trim()))
                .transpose()
        })
        .collect()
}

/// Parse one line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Step>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        let command: Command = serde_json::from_str(line)?;
        return Ok(Some(Step::Command(command)));
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let playlist = args.first().map(|s| (*s).to_string());

    let command = match verb {
        "tick" => return Ok(Some(Step::Tick(number(&args, 0)?))),
        "play" => Command::Play(target(&args)?),
        "toggle" => Command::PlayPause(target(&args)?),
        "pause" => Command::Pause,
        "stop" => Command::Stop,
        "next" => Command::Next { playlist },
        "prev" => Command::Prev { playlist },
        "shuffle" => Command::ToggleShuffle { playlist },
        "repeat" => Command::ToggleRepeat,
        "speed" => Command::CyclePlaybackSpeed,
        "volume" => Command::SetVolume {
            percent: number(&args, 0)?,
        },
        "up" => Command::VolumeUp,
        "down" => Command::VolumeDown,
        "mute" => Command::ToggleMute,
        "seek" => Command::Seek {
            percent: number(&args, 0)?,
            song: args.get(1).map(|s| s.parse()).transpose()?,
        },
        "skip" => Command::SkipTo {
            song: number(&args, 0)?,
            seconds: number(&args, 1)?,
            playlist: args.get(2).map(|s| (*s).to_string()),
        },
        "ended" => Command::SongEnded,
        "time" => Command::TimeUpdate,
        other => bail!("unknown instruction '{}'", other),
    };

    Ok(Some(Step::Command(command)))
}

/// `play`, `play 3`, `play rock` or `play 3 rock`
fn target(args: &[&str]) -> Result<PlayTarget> {
    Ok(match args {
        [] => PlayTarget::main(),
        [first] => match first.parse::<usize>() {
            Ok(index) => PlayTarget::song(index),
            Err(_) => PlayTarget::playlist(*first),
        },
        [index, playlist, ..] => PlayTarget::song_in_playlist(index.parse()?, *playlist),
    })
}

fn number<T>(args: &[&str], position: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .get(position)
        .ok_or_else(|| anyhow!("missing argument {}", position + 1))?;
    Ok(raw.parse()?)
}
