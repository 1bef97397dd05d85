use std::convert::Infallible;
use std::ffi::OsString;

use clap::{ArgAction, Parser};
use log::warn;
use thiserror::Error;
use topia_common::{SimulationConfig, TopiaError};

pub const USAGE: &str = "\
usage:
brace-topia [-h] [-t N] [-c N] [-d dim] [-s %str] [-v %vac] [-e %end]
";

pub const HELP: &str = "\
Option      Default   Example   Description
'-h'        NA        -h        print this usage message.
'-t N'      900000    -t 5000   microseconds cycle delay.
'-c N'      NA        -c4       count cycle maximum value.
'-d dim'    15        -d 7      width and height dimension.
'-s %str'   50        -s 30     strength of preference.
'-v %vac'   20        -v30      percent vacancies.
'-e %endl'  60        -e75      percent Endline braces. Others want Newline.
";

/// Command-line arguments. Short options only, parsed the way getopt would:
/// values may be attached (`-c4`) or separate, may start with a hyphen, and
/// the last occurrence of a repeated option wins.
#[derive(Parser, Debug)]
#[command(
    name = "brace-topia",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Args {
    /// Print the option table and exit
    #[arg(short = 'h', action = ArgAction::SetTrue)]
    pub help: bool,

    /// Microseconds between cycles in continuous mode
    #[arg(short = 't', value_name = "N", allow_hyphen_values = true, value_parser = parse_c_long)]
    pub delay: Option<i64>,

    /// Run cycles 0..=N, printing each, then exit
    #[arg(short = 'c', value_name = "N", allow_hyphen_values = true, value_parser = parse_c_long)]
    pub count: Option<i64>,

    /// Grid width and height
    #[arg(short = 'd', value_name = "dim", allow_hyphen_values = true, value_parser = parse_c_long)]
    pub dimension: Option<i64>,

    /// Strength of preference, percent
    #[arg(short = 's', value_name = "%str", allow_hyphen_values = true, value_parser = parse_c_long)]
    pub strength: Option<i64>,

    /// Percent of cells left vacant
    #[arg(short = 'v', value_name = "%vac", allow_hyphen_values = true, value_parser = parse_c_long)]
    pub vacancy: Option<i64>,

    /// Percent of agents that want Endline braces
    #[arg(short = 'e', value_name = "%end", allow_hyphen_values = true, value_parser = parse_c_long)]
    pub endline: Option<i64>,

    /// Stray operands; accepted and ignored
    #[arg(hide = true)]
    pub operands: Vec<String>,
}

/// Reads a decimal integer the way C's `strtol` does: leading whitespace and
/// a sign are allowed, parsing stops at the first non-digit, and text with no
/// digits reads as 0. Out-of-range magnitudes saturate.
pub fn parse_c_long(text: &str) -> Result<i64, Infallible> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    Ok(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("help requested")]
    Help,

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] TopiaError),
}

impl CliError {
    /// 2 for a value out of range, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(err) if err.is_out_of_range() => 2,
            _ => 1,
        }
    }

    /// Text for the error stream.
    pub fn message(&self) -> String {
        match self {
            CliError::Help => format!("{USAGE}{HELP}"),
            CliError::Usage(reason) => format!("{reason}\n{USAGE}"),
            CliError::Config(err) => format!("{err}\n{USAGE}"),
        }
    }
}

impl Args {
    /// Applies the options over the defaults, validating each one.
    pub fn into_config(self) -> Result<SimulationConfig, TopiaError> {
        if !self.operands.is_empty() {
            warn!("Ignoring operands: {:?}", self.operands);
        }

        let mut config = SimulationConfig::default();
        if let Some(delay) = self.delay {
            config = config.with_delay_micros(delay);
        }
        if let Some(count) = self.count {
            config = config.with_max_cycle(count)?;
        }
        if let Some(dimension) = self.dimension {
            config = config.with_dimension(dimension)?;
        }
        if let Some(strength) = self.strength {
            config = config.with_strength(strength)?;
        }
        if let Some(vacancy) = self.vacancy {
            config = config.with_vacancy(vacancy)?;
        }
        if let Some(endline) = self.endline {
            config = config.with_endline(endline)?;
        }
        Ok(config)
    }
}

/// Parses a full argument list (program name first) into a configuration.
pub fn parse_from<I, T>(args: I) -> Result<SimulationConfig, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args).map_err(|err| {
        let rendered = err.to_string();
        CliError::Usage(rendered.lines().next().unwrap_or_default().to_string())
    })?;
    if args.help {
        return Err(CliError::Help);
    }
    Ok(args.into_config()?)
}
