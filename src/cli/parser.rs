use clap::{Parser, Subcommand};

/// Command-line interface definition for punchkiosk
/// Unattended time-clock kiosk for shared store terminals
#[derive(Parser)]
#[command(
    name = "punchkiosk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Unattended time-clock kiosk: PIN sign-in, clock in/out, breaks and hours review",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of ~/.punchkiosk/punchkiosk.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the kiosk API base URL
    #[arg(global = true, long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the preconfigured store code
    #[arg(global = true, long = "store", value_name = "CODE")]
    pub store: Option<String>,

    /// Override the journal database path
    #[arg(global = true, long = "journal", value_name = "FILE")]
    pub journal: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the journal database
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report keys missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Resolve a store code against the API and print the store
    Verify {
        /// Store code as printed on the store's setup card
        code: String,
    },

    /// Run the interactive kiosk on this terminal
    Kiosk {
        /// Redraw without clearing the terminal
        #[arg(long = "plain")]
        plain: bool,
    },

    /// Print the kiosk journal
    Log {
        #[arg(long = "print", help = "Print rows from the kiosk journal")]
        print: bool,
    },
}
