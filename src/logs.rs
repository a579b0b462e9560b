use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use crate::config::LogSettings;

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

type LoggerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub fn init_logger(settings: &LogSettings) -> LoggerResult {
    let file_level = LevelFilter::Debug;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
        .build();

    let mut config = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(settings.stderr_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(file) = &settings.file {
        let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
        let roller = FixedWindowRoller::builder().build(&file.archive_pattern, LOG_FILE_COUNT)?;
        let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

        let logfile = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
            .build(&file.path, Box::new(policy))?;

        config = config.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(file_level)))
                .build("logfile", Box::new(logfile)),
        );
        root = root.appender("logfile");
    }

    let config = config.build(root.build(LevelFilter::Trace))?;
    let _handle = log4rs::init_config(config)?;
    Ok(())
}
