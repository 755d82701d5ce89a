use std::{env, path::PathBuf};

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Root},
    encode::json::JsonEncoder,
    Config,
};

const LOG_FILE: &str = "tabgroup.log";
const LOG_LEVEL_ENV: &str = "TABGROUP_LOG";

#[macro_export]
macro_rules! logger {
    ($level:ident, $($arg:tt)+) => {
        ::log::$level!($($arg)+)
    };
}

pub struct Logger;

impl Logger {
    /// Writes JSON lines to `$XDG_STATE_HOME/tabgroup/tabgroup.log`.
    /// `TABGROUP_LOG` overrides the level (default: debug).
    pub fn init() -> Result<()> {
        let path = Self::log_path()?;

        let appender = FileAppender::builder()
            .encoder(Box::new(JsonEncoder::new()))
            .build(path)?;

        let config = Config::builder()
            .appender(Appender::builder().build("file", Box::new(appender)))
            .build(Root::builder().appender("file").build(Self::level()))?;

        log4rs::init_config(config)?;

        Ok(())
    }

    fn log_path() -> Result<PathBuf> {
        let base_dir = xdg::BaseDirectories::with_prefix("tabgroup")?;

        Ok(base_dir.place_state_file(LOG_FILE)?)
    }

    fn level() -> LevelFilter {
        env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Debug)
    }
}
