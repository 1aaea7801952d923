use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "\
usage: gl-two-triangles [--size <W>x<H>] [--snapshot <PATH>]

  --size <W>x<H>     window size in physical pixels (default 800x600)
  --snapshot <PATH>  render one frame, check it, write it to PATH as PNG and exit
  --help             print this message

Log verbosity follows RUST_LOG (default: info).";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
    #[error("`{0}` expects a value")]
    MissingValue(&'static str),
    #[error("invalid window size `{0}`, expected <W>x<H> with both non-zero")]
    InvalidSize(String),
}

/// Window and run-mode settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Render a single frame to this PNG instead of running interactively.
    pub snapshot: Option<PathBuf>,
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Lab 1".to_string(),
            width: 800,
            height: 600,
            snapshot: None,
            show_help: false,
        }
    }
}

impl Config {
    /// Parses command-line arguments, without the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--size" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--size"))?;
                    let (width, height) = parse_size(&value)?;
                    config.width = width;
                    config.height = height;
                }
                "--snapshot" => {
                    let value = args
                        .next()
                        .ok_or(ConfigError::MissingValue("--snapshot"))?;
                    config.snapshot = Some(PathBuf::from(value));
                }
                "-h" | "--help" => config.show_help = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(config)
    }
}

fn parse_size(value: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidSize(value.to_string());
    let (w, h) = value.split_once('x').ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}
