//! vrfkey - lifecycle manager for password-protected VRF keys.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── create        # Create a key (durable or weak throwaway)
//! │   ├── import        # Import an encrypted key file
//! │   ├── export        # Export a key to an encrypted file
//! │   ├── delete        # Archive or purge a key
//! │   ├── list          # Table / JSON listing
//! │   ├── password      # Password file or prompt
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # ~/.vrfkey/config.toml
//!     ├── key           # Public key codec and derived forms
//!     ├── keyfile       # Encrypted key file format
//!     ├── store/        # Keystore trait, filesystem and memory backends
//!     ├── manager       # Lifecycle operations and their safety checks
//!     └── presenter     # Display views with best-effort fields
//! ```
//!
//! The manager runs one operation per process and coordinates with no
//! other process. A service that already holds a key unlocked keeps it
//! after the key is deleted here.

pub mod cli;
pub mod core;
pub mod error;
