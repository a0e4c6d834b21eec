//! Logging setup for the CLI binary. The library itself only emits `log`
//! records; it is up to a binary to install an appender.

use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} - {m}{n}";

/// Install a log4rs config: always log to stderr, and additionally to
/// `log_filepath` if one was given. Returns the handle so the caller can
/// keep it alive for the duration of the run (dropping it tears down
/// logging).
pub fn init_logging(log_filepath: Option<&impl AsRef<Path>>) -> Handle {
    let stderr = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut builder =
        Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root_appenders = vec!["stderr".to_string()];

    if let Some(path) = log_filepath {
        match FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path.as_ref())
        {
            Ok(file) => {
                builder = builder
                    .appender(Appender::builder().build("logfile", Box::new(file)));
                root_appenders.push("logfile".to_string());
            }
            Err(e) => {
                eprintln!("failed to open log file {:?}: {e}", path.as_ref());
            }
        }
    }

    let config = builder
        .logger(Logger::builder().build("freqseq_miner", LevelFilter::Info))
        .build(
            Root::builder()
                .appenders(root_appenders)
                .build(LevelFilter::Info),
        )
        .expect("logging configuration is valid by construction");

    log4rs::init_config(config).expect("logging can only be initialized once per process")
}
