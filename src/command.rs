use std::path::PathBuf;

use clap::Parser;

use crate::ui::UpdatePolicy;

#[derive(Debug, Parser, Clone)]
#[clap(name = "tabgroup", about, version, arg_required_else_help = false)]
pub struct Command {
    /// Config file path [default: $XDG_CONFIG_HOME/tabgroup/config.yaml]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging to $XDG_STATE_HOME/tabgroup/tabgroup.log
    #[arg(short = 'l', long, default_value_t = false)]
    pub logging: bool,

    /// Which tabs receive input: broadcast | active-only [default: from config]
    #[arg(short = 'u', long, value_name = "POLICY")]
    pub update_policy: Option<UpdatePolicy>,
}
