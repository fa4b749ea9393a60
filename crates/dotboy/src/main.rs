use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotboy_gb::{Button, GameBoy, GameBoyConfig, RGB24_BYTES_PER_PIXEL, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Hold `button` from the start of `frame` to the end of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Hold {
    button: Button,
    frame: u32,
}

impl std::str::FromStr for Hold {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (button, frame) = s
            .split_once('@')
            .with_context(|| format!("expected BUTTON@FRAME, got `{s}`"))?;
        let button = button.parse::<Button>().map_err(anyhow::Error::msg)?;
        let frame = frame
            .parse()
            .with_context(|| format!("invalid frame number `{frame}`"))?;
        Ok(Self { button, frame })
    }
}

/// Run a Game Boy ROM headless and dump the last frame as raw RGB24.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to ROM file
    rom_path: PathBuf,

    /// Number of frames to run
    frames: u32,

    /// Output path for the 160x144 RGB24 frame
    out_path: PathBuf,

    /// Press BUTTON from FRAME on, e.g. `start@60` (repeatable)
    #[arg(long = "hold", value_name = "BUTTON@FRAME")]
    holds: Vec<Hold>,
}

fn run(args: Args) -> Result<()> {
    let rom = std::fs::read(&args.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", args.rom_path.display()))?;

    let mut gb = GameBoy::new(&rom, GameBoyConfig::default())
        .with_context(|| format!("failed to load '{}'", args.rom_path.display()))?;
    log::info!(
        "Loaded \"{}\" (type 0x{:02X})",
        gb.header().title,
        gb.header().cartridge_type
    );

    for frame in 0..args.frames {
        for hold in args.holds.iter().filter(|hold| hold.frame == frame) {
            log::info!("Frame {frame}: holding {:?}", hold.button);
            gb.press(hold.button);
        }
        gb.step_frame()
            .with_context(|| format!("emulation stopped during frame {frame}"))?;
    }

    let mut buffer = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * RGB24_BYTES_PER_PIXEL];
    gb.video_frame(&mut buffer);
    std::fs::write(&args.out_path, &buffer)
        .with_context(|| format!("failed to write '{}'", args.out_path.display()))?;

    log::info!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        buffer.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        args.frames,
        args.out_path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.frames == 0 && !args.holds.is_empty() {
        bail!("--hold has no effect when running zero frames");
    }
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_positionals_and_repeated_holds() {
        let args = Args::try_parse_from([
            "dotboy",
            "game.gb",
            "120",
            "frame.rgb",
            "--hold",
            "start@60",
            "--hold=Up@70",
        ])
        .unwrap();

        assert_eq!(args.rom_path, PathBuf::from("game.gb"));
        assert_eq!(args.frames, 120);
        assert_eq!(args.out_path, PathBuf::from("frame.rgb"));
        assert_eq!(
            args.holds,
            vec![
                Hold { button: Button::Start, frame: 60 },
                Hold { button: Button::Up, frame: 70 },
            ]
        );
    }

    #[test]
    fn rejects_malformed_hold() {
        assert!(Args::try_parse_from(["dotboy", "a.gb", "1", "o", "--hold", "start"]).is_err());
        assert!(Args::try_parse_from(["dotboy", "a.gb", "1", "o", "--hold", "turbo@3"]).is_err());
        assert!(Args::try_parse_from(["dotboy", "a.gb", "1"]).is_err());
    }
}
