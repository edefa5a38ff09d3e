use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::model::Extents;
use crate::slice::{DisplayMode, ImageStats, RatioPolicy};

#[derive(Debug, Parser)]
#[command(
    name = "fwview",
    version,
    about = "Fat/water slice navigation engine"
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Replays a session script against a phantom pair and prints the report.
    Run {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Derives one slice of a phantom pair and prints its statistics.
    Slice {
        #[arg(long, value_enum, default_value_t = ModeArg::RawA)]
        mode: ModeArg,
        #[arg(long)]
        depth: usize,
        #[arg(long, value_parser = parse_dims, default_value = "64x64x32")]
        dims: Extents,
        /// Slice along y instead of z.
        #[arg(long)]
        coronal: bool,
        /// Keep NaN where both channels are zero.
        #[arg(long)]
        propagate_nan: bool,
    },
    /// Prints the default viewer configuration as YAML.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum ModeArg {
    RawA,
    RawB,
    RatioA,
    RatioB,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::RawA => DisplayMode::RawChannelA,
            ModeArg::RawB => DisplayMode::RawChannelB,
            ModeArg::RatioA => DisplayMode::RatioA,
            ModeArg::RatioB => DisplayMode::RatioB,
        }
    }
}

pub(super) fn policy(propagate_nan: bool) -> RatioPolicy {
    if propagate_nan {
        RatioPolicy::Propagate
    } else {
        RatioPolicy::Zero
    }
}

/// Parses `XxYxZ`, for example `64x48x20`.
pub(super) fn parse_dims(raw: &str) -> Result<Extents, String> {
    let parts = raw
        .split(['x', 'X'])
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("invalid dimensions `{raw}`: {error}"))?;
    match parts.as_slice() {
        [x, y, z] if *x > 0 && *y > 0 && *z > 0 => Ok(Extents::new(*x, *y, *z)),
        [_, _, _] => Err(format!("dimensions `{raw}` must all be positive")),
        _ => Err(format!("dimensions `{raw}` must look like XxYxZ")),
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SliceInfo {
    pub(super) mode: DisplayMode,
    pub(super) orientation: &'static str,
    pub(super) depth: usize,
    pub(super) dims: Extents,
    pub(super) stats: ImageStats,
}
