use clap::Parser;

// Display order for the executable override (placed at top of help text)
const FLOW_BIN_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "flowcheck", version, about = "Run flow and report type errors as annotations", long_about = None)]
pub struct Cli {
    /// Path to the flow executable, may include leading arguments (e.g. "yarn flow")
    /// [env: INPUT_FLOW-BIN=] [default: node_modules/.bin/flow]
    #[arg(
        env = "INPUT_FLOW-BIN",
        hide_env = true,
        display_order = FLOW_BIN_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub flow_bin: Option<String>,

    /// Same as FLOW_BIN, takes precedence over it
    #[arg(long = "flow-bin", value_name = "FLOW_BIN", display_order = FLOW_BIN_DISPLAY_ORDER)]
    pub flow_bin_flag: Option<String>,

    /// Subtitle appended to the report title ("Flow - <subtitle>")
    #[arg(long, env = "INPUT_CHECK-RUN-SUBTITLE")]
    pub subtitle: Option<String>,

    /// Directory to run flow in [default: current directory]
    // Kept as a string: Actions exports unset inputs as empty values
    #[arg(long, env = "INPUT_CUSTOM-WORKING-DIRECTORY")]
    pub working_directory: Option<String>,

    /// Path to config file (ignored if it does not exist)
    #[arg(long, default_value = "flowcheck.toml")]
    pub config: String,

    /// Write annotations to a .json file instead of the console
    #[arg(long)]
    pub output: Option<String>,

    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: FLOWCHECK_LOG=] [default: info]
    #[arg(
        long,
        env = "FLOWCHECK_LOG",
        default_value = "info",
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,
}
