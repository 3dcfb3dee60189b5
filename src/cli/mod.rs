//! Command-line interface.

pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod output;
pub mod password;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::manager::KeyManager;
use crate::core::store::Filesystem;
use crate::error::Result;

/// vrfkey - manage password-protected VRF keys.
#[derive(Parser)]
#[command(
    name = "vrfkey",
    about = "Create, import, export, delete and list password-protected VRF keys",
    version
)]
pub struct Cli {
    /// Home directory holding config.toml and the key store
    #[arg(long, global = true, env = constants::HOME_ENV, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new key in the store
    Create {
        /// File whose first line is the password
        #[arg(short, long, value_name = "FILE")]
        password: Option<PathBuf>,
    },

    /// Create a cheaply-encrypted key for testing and write it to a file only
    CreateWeak {
        /// Destination, which must not already exist
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// File whose first line is the password
        #[arg(short, long, value_name = "FILE")]
        password: Option<PathBuf>,
    },

    /// Import an encrypted key file into the store
    Import {
        /// Encrypted key file to import
        #[arg(short, long, value_name = "PATH")]
        file: PathBuf,
        /// File whose first line is the password
        #[arg(short, long, value_name = "FILE")]
        password: Option<PathBuf>,
    },

    /// Export a key from the store to an encrypted key file
    Export {
        /// Compressed public key (hex)
        #[arg(long = "public-key", visible_alias = "pk", value_name = "HEX")]
        public_key: String,
        /// Destination, which must not already exist
        #[arg(short, long, value_name = "PATH")]
        file: PathBuf,
    },

    /// Archive a key, or purge it with --hard
    Delete {
        /// Compressed public key (hex)
        #[arg(long = "public-key", visible_alias = "pk", value_name = "HEX")]
        public_key: String,
        /// Remove the key permanently instead of archiving it
        #[arg(long)]
        hard: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List keys in the store
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Include archived keys
        #[arg(long)]
        all: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Write a default config.toml if none exists
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Resolve and load the configuration for this invocation.
pub fn load_config(home: Option<PathBuf>) -> Result<Config> {
    let home = Config::resolve_home(home)?;
    Config::load(&home)
}

/// Build a manager over the configured filesystem store.
pub fn open_manager(home: Option<PathBuf>) -> Result<KeyManager<Filesystem>> {
    let config = load_config(home)?;
    Ok(KeyManager::new(Filesystem::open(&config)))
}

/// Execute a command.
pub fn execute(command: Command, home: Option<PathBuf>) -> Result<()> {
    match command {
        Command::Create { password } => create::execute(password.as_deref(), home),
        Command::CreateWeak { file, password } => {
            create::execute_weak(file.as_deref(), password.as_deref(), home)
        }
        Command::Import { file, password } => import::execute(&file, password.as_deref(), home),
        Command::Export { public_key, file } => export::execute(&public_key, &file, home),
        Command::Delete {
            public_key,
            hard,
            yes,
        } => delete::execute(&public_key, hard, yes, home),
        Command::List { json, all } => list::execute(json, all, home),
        Command::Config { init } => config::execute(init, home),
        Command::Completions { shell } => completions::execute(shell),
    }
}
