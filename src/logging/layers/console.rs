use serde::Deserialize;
use std::fmt;
use std::io;
use std::str::FromStr;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter};
use tracing_subscriber::registry::LookupSpan;

/// Compact, timestamp-free console layer.
pub type ConsoleFmtLayer<S> = tracing_fmt::Layer<
    S,
    format::DefaultFields,
    format::Format<format::Compact, ()>,
    BoxMakeWriter,
>;

/// Where console diagnostics go. Documents printed by commands always use
/// stdout, so the default keeps diagnostics off it.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleOutput {
    Stdout,
    #[default]
    Stderr,
    None,
}

impl fmt::Display for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConsoleOutput::Stdout => "stdout",
            ConsoleOutput::Stderr => "stderr",
            ConsoleOutput::None => "none",
        })
    }
}

impl FromStr for ConsoleOutput {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "stdout" => Ok(ConsoleOutput::Stdout),
            "stderr" => Ok(ConsoleOutput::Stderr),
            "none" => Ok(ConsoleOutput::None),
            _ => Err(format!(
                "invalid console output '{}'; expected stdout, stderr or none",
                value
            )),
        }
    }
}

impl ConsoleOutput {
    fn make_writer(self) -> BoxMakeWriter {
        match self {
            ConsoleOutput::Stdout => BoxMakeWriter::new(io::stdout),
            ConsoleOutput::Stderr => BoxMakeWriter::new(io::stderr),
            ConsoleOutput::None => BoxMakeWriter::new(io::sink),
        }
    }
}

/// Console layer for one CLI run. `verbose` adds event targets so debug
/// output can be traced back to the module that produced it.
pub fn console_layer<S>(output: ConsoleOutput, verbose: bool) -> ConsoleFmtLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_fmt::layer()
        .compact()
        .without_time()
        .with_ansi(false)
        .with_target(verbose)
        .with_writer(output.make_writer())
}
