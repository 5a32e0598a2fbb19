//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::app::Settings;
use crate::i18n::{Locale, Translator};
use crate::source::{Proxy, DEFAULT_PROXY};

/// A live-updating RSS aggregator for the terminal.
#[derive(Debug, Parser)]
#[command(name = "rssline", version, about)]
pub struct Config {
    /// Feed URLs to add on startup, one after another.
    pub feeds: Vec<String>,

    /// CORS proxy every request is sent through.
    #[arg(long, default_value = DEFAULT_PROXY)]
    pub proxy: Url,

    /// Pause between the end of one refresh cycle and the start of the next.
    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Interface language.
    #[arg(long, value_enum, default_value_t = Locale::Ru)]
    pub locale: Locale,

    /// Write logs to this file (filtered by RUST_LOG, default `info`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            proxy: Proxy::new(self.proxy.clone()),
            interval: Duration::from_millis(self.interval_ms),
            translator: Translator::new(self.locale),
        }
    }
}
