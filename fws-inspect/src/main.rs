//! fws-inspect - decode captured fws protocol frames
//!
//! Reads a capture of length-prefixed frames (as written by a stream
//! transport) or a single bare frame and prints one line per request.

use std::path::Path;
use std::process::ExitCode;

use tokio::io::AsyncReadExt;

use fws_protocol::FrameCodec;
use fws_utils::{init_logging_with_config, ConfigLoader, FwsConfig, FwsError, LogConfig, Result};

mod cli;
mod inspect;

use cli::Args;
use inspect::{inspect_raw, inspect_stream, Summary};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse_args();

    match run(args).await {
        Ok(summary) if summary.errors == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("fws-inspect error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<Summary> {
    let config = load_config(args.config.as_deref())?;

    let log_config = if args.verbose {
        LogConfig::development()
    } else {
        LogConfig::client().with_file_config(&config.logging)
    };
    init_logging_with_config(log_config.with_output(args.log_output()))?;
    tracing::debug!("CLI args: {:?}", args);

    let codec = FrameCodec::with_max_frame_size(config.transport.max_frame_size);
    let mut out = std::io::stdout();

    if args.raw {
        let frame = read_all(args.file.as_deref()).await?;
        return inspect_raw(&frame, &mut out);
    }

    match args.file {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .map_err(|e| FwsError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
            inspect_stream(file, codec, &mut out).await
        }
        None => inspect_stream(tokio::io::stdin(), codec, &mut out).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<FwsConfig> {
    match path {
        Some(path) => ConfigLoader::load_and_validate_from(path),
        None => ConfigLoader::load_and_validate(),
    }
}

async fn read_all(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => tokio::fs::read(path).await.map_err(|e| FwsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            Ok(buf)
        }
    }
}
