//! Runtime settings.
//!
//! Settings are resolved from built-in defaults, then an optional TOML file (cargo
//! feature `config`), then command-line flags, later sources overriding earlier ones.

use crate::error::{Result, SiftError};
use crate::input::{DEFAULT_CHAR_LIMIT, DEFAULT_PLACEHOLDER};
use crate::render::ui::ColorTheme;
use crate::render::{RenderOptions, MIN_RESERVED_ROWS};
use crate::store::DEFAULT_CAPACITY_HINT;
use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

/// Default periodic re-render interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 250;

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Rows subtracted from the viewport height to cap matches
    pub reserved_rows: usize,
    /// Short results are padded up to `height - pad_reserve` rows
    pub pad_reserve: usize,
    /// Skip front padding entirely
    pub no_padding: bool,
    /// Lines pre-reserved in the line store
    pub capacity_hint: usize,
    /// Periodic re-render interval
    pub tick_ms: u64,
    /// Maximum filter length in characters
    pub char_limit: usize,
    /// Input row text while the filter is empty
    pub placeholder: String,
    /// Filter text the session starts with
    pub initial_filter: String,
    /// Draw without colors
    pub no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reserved_rows: 3,
            pad_reserve: 2,
            no_padding: false,
            capacity_hint: DEFAULT_CAPACITY_HINT,
            tick_ms: DEFAULT_TICK_MS,
            char_limit: DEFAULT_CHAR_LIMIT,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            initial_filter: String::new(),
            no_color: false,
        }
    }
}

impl Settings {
    /// Row budgeting passed to the render pipeline.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            reserved_rows: self.reserved_rows,
            pad_reserve: (!self.no_padding).then_some(self.pad_reserve),
        }
    }

    pub fn theme(&self) -> ColorTheme {
        if self.no_color {
            ColorTheme::monochrome()
        } else {
            ColorTheme::default()
        }
    }

    /// Periodic re-render interval, never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Reject values the render pipeline cannot lay out.
    pub fn validate(&self) -> Result<()> {
        if self.reserved_rows < MIN_RESERVED_ROWS {
            return Err(SiftError::invalid_argument(format!(
                "reserved-rows must be at least {MIN_RESERVED_ROWS}, got {}",
                self.reserved_rows
            )));
        }
        if self.pad_reserve < MIN_RESERVED_ROWS {
            return Err(SiftError::invalid_argument(format!(
                "pad-reserve must be at least {MIN_RESERVED_ROWS}, got {}",
                self.pad_reserve
            )));
        }
        if self.tick_ms == 0 {
            return Err(SiftError::invalid_argument("tick-ms must be at least 1"));
        }
        Ok(())
    }

    /// Command-line interface definition.
    pub fn command() -> Command {
        Command::new("tailsift")
            .version(crate::VERSION)
            .about("Interactively filter the tail of a live input stream")
            .long_about(
                "tailsift reads lines from standard input and shows the most recent ones \
                 that match a filter typed at the bottom of the screen. Terms are \
                 case-insensitive substrings; prefix a term with ! to exclude lines \
                 containing it. Enter, Esc or Ctrl-C quits.",
            )
            .arg(
                Arg::new("filter")
                    .long("filter")
                    .short('f')
                    .value_name("TEXT")
                    .help("Initial filter text"),
            )
            .arg(
                Arg::new("reserved-rows")
                    .long("reserved-rows")
                    .value_name("ROWS")
                    .value_parser(reserve_parser())
                    .help("Rows kept free of matches below the match window [default: 3]"),
            )
            .arg(
                Arg::new("pad-reserve")
                    .long("pad-reserve")
                    .value_name("ROWS")
                    .value_parser(reserve_parser())
                    .help("Pad short results with blank rows up to height minus ROWS [default: 2]"),
            )
            .arg(
                Arg::new("no-padding")
                    .long("no-padding")
                    .action(ArgAction::SetTrue)
                    .help("Do not pad short results with blank rows"),
            )
            .arg(
                Arg::new("capacity")
                    .long("capacity")
                    .value_name("LINES")
                    .value_parser(value_parser!(usize))
                    .help("Lines to pre-allocate in the line store [default: 10000000]"),
            )
            .arg(
                Arg::new("tick-ms")
                    .long("tick-ms")
                    .value_name("MS")
                    .value_parser(value_parser!(u64).range(1..))
                    .help("Redraw interval while idle, in milliseconds [default: 250]"),
            )
            .arg(
                Arg::new("char-limit")
                    .long("char-limit")
                    .value_name("CHARS")
                    .value_parser(value_parser!(usize))
                    .help("Maximum filter length [default: 1000]"),
            )
            .arg(
                Arg::new("placeholder")
                    .long("placeholder")
                    .value_name("TEXT")
                    .help("Text shown while the filter is empty"),
            )
            .arg(
                Arg::new("no-color")
                    .long("no-color")
                    .action(ArgAction::SetTrue)
                    .help("Draw without colors (also set by a non-empty NO_COLOR)"),
            )
            .arg(
                Arg::new("config")
                    .long("config")
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("Configuration file (requires the `config` feature)"),
            )
    }

    /// Resolve settings from parsed arguments, loading the config file if enabled.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config_path = matches.get_one::<PathBuf>("config").cloned();
        let mut settings = Self::load_file(config_path)?;
        settings.apply_matches(matches);
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay explicitly given flags onto these settings.
    pub fn apply_matches(&mut self, matches: &ArgMatches) {
        if let Some(filter) = matches.get_one::<String>("filter") {
            self.initial_filter = filter.clone();
        }
        if let Some(&rows) = matches.get_one::<usize>("reserved-rows") {
            self.reserved_rows = rows;
        }
        if let Some(&rows) = matches.get_one::<usize>("pad-reserve") {
            self.pad_reserve = rows;
        }
        if matches.get_flag("no-padding") {
            self.no_padding = true;
        }
        if let Some(&capacity) = matches.get_one::<usize>("capacity") {
            self.capacity_hint = capacity;
        }
        if let Some(&tick) = matches.get_one::<u64>("tick-ms") {
            self.tick_ms = tick;
        }
        if let Some(&limit) = matches.get_one::<usize>("char-limit") {
            self.char_limit = limit;
        }
        if let Some(placeholder) = matches.get_one::<String>("placeholder") {
            self.placeholder = placeholder.clone();
        }
        if matches.get_flag("no-color") {
            self.no_color = true;
        }
    }

    #[cfg(not(feature = "config"))]
    fn load_file(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Err(SiftError::config(format!(
                "cannot read {}: built without the `config` feature",
                path.display()
            ))),
            None => Ok(Self::default()),
        }
    }

    #[cfg(feature = "config")]
    fn load_file(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::read_file(&path, true),
            None => match file::default_path() {
                Some(path) => Self::read_file(&path, false),
                None => Ok(Self::default()),
            },
        }
    }

    /// Read one config file. A missing file is only an error when it was asked for.
    #[cfg(feature = "config")]
    fn read_file(path: &std::path::Path, explicit: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                log::info!("loading configuration from {}", path.display());
                let mut settings = Self::default();
                file::FileConfig::parse(&contents)?.apply(&mut settings);
                Ok(settings)
            }
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(SiftError::io(
                format!("reading config file {}", path.display()),
                err,
            )),
        }
    }
}

fn reserve_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(MIN_RESERVED_ROWS as u64..)
}

#[cfg(feature = "config")]
mod file {
    use super::Settings;
    use crate::error::{Result, SiftError};
    use serde::Deserialize;
    use std::path::PathBuf;

    /// `$XDG_CONFIG_HOME/tailsift/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tailsift").join("config.toml"))
    }

    /// On-disk configuration; every key is optional.
    #[derive(Debug, Default, Deserialize)]
    #[serde(deny_unknown_fields, rename_all = "kebab-case")]
    pub struct FileConfig {
        pub reserved_rows: Option<usize>,
        pub pad_reserve: Option<usize>,
        pub no_padding: Option<bool>,
        pub capacity: Option<usize>,
        pub tick_ms: Option<u64>,
        pub char_limit: Option<usize>,
        pub placeholder: Option<String>,
        pub filter: Option<String>,
        pub no_color: Option<bool>,
    }

    impl FileConfig {
        pub fn parse(contents: &str) -> Result<Self> {
            toml::from_str(contents).map_err(|err| SiftError::config(err.to_string()))
        }

        pub fn apply(self, settings: &mut Settings) {
            if let Some(v) = self.reserved_rows {
                settings.reserved_rows = v;
            }
            if let Some(v) = self.pad_reserve {
                settings.pad_reserve = v;
            }
            if let Some(v) = self.no_padding {
                settings.no_padding = v;
            }
            if let Some(v) = self.capacity {
                settings.capacity_hint = v;
            }
            if let Some(v) = self.tick_ms {
                settings.tick_ms = v;
            }
            if let Some(v) = self.char_limit {
                settings.char_limit = v;
            }
            if let Some(v) = self.placeholder {
                settings.placeholder = v;
            }
            if let Some(v) = self.filter {
                settings.initial_filter = v;
            }
            if let Some(v) = self.no_color {
                settings.no_color = v;
            }
        }
    }

}
