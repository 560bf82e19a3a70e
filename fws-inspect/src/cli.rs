//! Command-line argument parsing for fws-inspect

use clap::Parser;
use std::path::PathBuf;

use fws_utils::LogOutput;

/// fws-inspect - decode and print captured fws protocol frames
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input is a single bare frame rather than a stream of
    /// length-prefixed frames
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Configuration file (defaults to the XDG config location)
    #[arg(long, short = 'c', env = "FWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    /// Also append logs to a file, `fws.log` in the state log directory
    /// when no path is given
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub log_file: Option<Option<PathBuf>>,

    /// Capture file to read; stdin when omitted
    pub file: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Where logs go besides stderr
    pub fn log_output(&self) -> LogOutput {
        match &self.log_file {
            None => LogOutput::Stderr,
            Some(None) => LogOutput::default_file(),
            Some(Some(path)) => LogOutput::Both(path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["fws-inspect"]);
        assert!(!args.raw);
        assert!(!args.verbose);
        assert!(args.file.is_none());
    }

    #[test]
    fn test_raw_with_file() {
        let args = Args::parse_from(["fws-inspect", "--raw", "frame.bin"]);
        assert!(args.raw);
        assert_eq!(args.file, Some(PathBuf::from("frame.bin")));
    }

    #[test]
    fn test_config_short_flag() {
        let args = Args::parse_from(["fws-inspect", "-c", "/tmp/fws.toml", "-v"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/fws.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_log_file_flag() {
        let args = Args::parse_from(["fws-inspect", "capture.bin"]);
        assert_eq!(args.log_output(), LogOutput::Stderr);

        let args = Args::parse_from(["fws-inspect", "--log-file", "/tmp/inspect.log", "capture.bin"]);
        assert_eq!(args.log_output(), LogOutput::Both(PathBuf::from("/tmp/inspect.log")));
        assert_eq!(args.file, Some(PathBuf::from("capture.bin")));

        let args = Args::parse_from(["fws-inspect", "capture.bin", "--log-file"]);
        assert_eq!(args.log_output(), LogOutput::default_file());
        assert_eq!(args.file, Some(PathBuf::from("capture.bin")));
    }
}
