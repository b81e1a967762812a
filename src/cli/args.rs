use crate::core::editor::InsertMode;
use crate::core::model::Path as StepPath;
use crate::core::types::GraphFormat;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Args)]
pub struct FmtArgs {
    /// Workflow file to normalize
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rewrite FILE in place instead of printing the result
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Workflow file to project
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format (default: output.graph_format from routeforge.toml)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<GraphFormat>,

    /// Only project the flow with this id
    #[arg(long, value_name = "ID")]
    pub entity: Option<String>,
}

#[derive(Args)]
pub struct LintArgs {
    /// Workflow file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Workflow file to edit (started from an empty document when missing)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the result back to FILE instead of printing it
    #[arg(long)]
    pub write: bool,

    /// Id of the flow to edit (default: the first flow)
    #[arg(long, value_name = "ID")]
    pub entity: Option<String>,

    #[command(subcommand)]
    pub action: EditAction,
}

#[derive(Subcommand)]
pub enum EditAction {
    /// Insert the default skeleton of a processor or component at PATH
    Add {
        /// Node path the new step is placed relative to
        #[arg(value_name = "PATH")]
        target: StepPath,

        /// Processor name (`log`, `choice`, ...) or component name with --component
        #[arg(value_name = "NAME")]
        name: String,

        /// Treat NAME as an endpoint component
        #[arg(long)]
        component: bool,

        /// Placement relative to PATH
        #[arg(long, value_enum, default_value_t = ModeArg::Append)]
        mode: ModeArg,
    },
    /// Remove the step at PATH
    Remove {
        #[arg(value_name = "PATH")]
        path: StepPath,
    },
    /// Move the step at FROM to the position of TO
    Move {
        #[arg(value_name = "FROM")]
        from: StepPath,
        #[arg(value_name = "TO")]
        to: StepPath,
    },
    /// Set a field value; VALUE is parsed as YAML
    Set {
        #[arg(value_name = "PATH")]
        path: StepPath,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Append a new flow (route, routeConfiguration, onException, onCompletion, rest)
    AddFlow {
        #[arg(value_name = "KIND")]
        kind: String,
    },
    /// Remove the flow with ID
    RemoveFlow {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Prepend,
    Append,
    Replace,
    Child,
    SpecialChild,
}

impl From<ModeArg> for InsertMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Prepend => InsertMode::Prepend,
            ModeArg::Append => InsertMode::Append,
            ModeArg::Replace => InsertMode::Replace,
            ModeArg::Child => InsertMode::Child,
            ModeArg::SpecialChild => InsertMode::SpecialChild,
        }
    }
}
