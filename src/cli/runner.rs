use clap::Parser;

use crate::config::{ViewerConfig, load_config};
use crate::model::{Channel, phantom};
use crate::session::{load_script, run_session, save_report};
use crate::slice::{DisplayMode, derive_slice};

use super::types::{Cli, Commands, SliceInfo, policy};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            config,
            report,
        } => {
            let config = match config {
                Some(path) => load_config(&path).map_err(|error| error.to_string())?,
                None => ViewerConfig::default(),
            };
            let script = load_script(&script).map_err(|error| error.to_string())?;
            let session_report =
                run_session(&script, &config).map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                save_report(report_path, &session_report).map_err(|error| error.to_string())?;
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&session_report)
                    .map_err(|error| error.to_string())?
            );
        }
        Commands::Slice {
            mode,
            depth,
            dims,
            coronal,
            propagate_nan,
        } => {
            let pair = phantom(dims).map_err(|error| error.to_string())?;
            let mode = DisplayMode::from(mode);
            let image = derive_slice(
                pair.channel(Channel::A),
                pair.channel(Channel::B),
                mode,
                depth,
                !coronal,
                policy(propagate_nan),
            )
            .map_err(|error| error.to_string())?;
            let info = SliceInfo {
                mode,
                orientation: if coronal { "coronal" } else { "axial" },
                depth,
                dims,
                stats: image.stats(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
        Commands::Config => {
            print!(
                "{}",
                serde_yaml::to_string(&ViewerConfig::default())
                    .map_err(|error| error.to_string())?
            );
        }
    }

    Ok(())
}
