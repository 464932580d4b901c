use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rRaid
/// CLI client to sign up for weekly raid events
#[derive(Parser)]
#[command(
    name = "rraid",
    version = env!("CARGO_PKG_VERSION"),
    about = "A raid signup CLI: manage characters, browse this reset week's raids and join them",
    long_about = None
)]
pub struct Cli {
    /// Override the API base URL (useful for tests or a staging server)
    #[arg(global = true, long = "api-url")]
    pub api_url: Option<String>,

    /// Pretend the current time is DATETIME (YYYY-MM-DD HH:MM, local time)
    #[arg(global = true, long = "at", value_name = "DATETIME")]
    pub at: Option<String>,

    /// Print debug logs to stderr
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Exchange an identity-provider token for a session
    Login {
        #[arg(long = "id-token", help = "Identity token issued by the identity provider")]
        id_token: String,

        #[arg(long = "user-id", help = "Identity-provider user id")]
        user_id: String,

        #[arg(long = "name", help = "Display name")]
        name: String,

        #[arg(long = "picture", help = "Avatar URL")]
        picture: Option<String>,
    },

    /// Show the session state
    Status,

    /// Show the current reset window (Thursday 08:00 to Thursday 08:00)
    Window,

    /// Browse, create and join raids
    Raids {
        #[command(subcommand)]
        action: RaidCommands,
    },

    /// Manage your characters
    Chars {
        #[command(subcommand)]
        action: CharCommands,
    },
}

#[derive(Subcommand)]
pub enum RaidCommands {
    /// List this reset week's raids
    List {
        #[arg(long = "all", help = "List every raid, ignoring the reset window")]
        all: bool,

        #[arg(long = "json", help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Show the roster of a raid
    Roster { id: i64 },

    /// Create a raid and join it
    Create {
        #[arg(long = "boss", help = "Boss name (used as the raid title)")]
        boss: String,

        #[arg(long = "start", help = "Start time (YYYY-MM-DD HH:MM, local time)")]
        start: String,

        #[arg(long = "subtitle", help = "Optional note")]
        subtitle: Option<String>,

        #[arg(long = "character", help = "Character id (default: your default character)")]
        character: Option<i64>,
    },

    /// Delete a raid and its roster
    Delete {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Sign up for a raid
    Join {
        id: i64,

        #[arg(long = "character", help = "Character id (default: your default character)")]
        character: Option<i64>,
    },

    /// Cancel your signup for a raid
    Cancel {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Args)]
pub struct CharFields {
    #[arg(long = "job", help = "Job / class")]
    pub job: Option<String>,

    #[arg(long = "level", help = "Character level")]
    pub level: Option<i32>,
}

#[derive(Subcommand)]
pub enum CharCommands {
    /// List your characters
    List {
        #[arg(long = "json", help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Create a character
    Add {
        #[arg(long = "name", help = "Character name")]
        name: String,

        #[command(flatten)]
        fields: CharFields,

        #[arg(long = "default", help = "Mark as your default character")]
        default: bool,
    },

    /// Edit a character
    Edit {
        id: i64,

        #[arg(long = "name", help = "New name")]
        name: Option<String>,

        #[command(flatten)]
        fields: CharFields,

        #[arg(long = "default", conflicts_with = "no_default", help = "Mark as default")]
        default: bool,

        #[arg(long = "no-default", help = "Unmark as default")]
        no_default: bool,
    },

    /// Delete a character
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
