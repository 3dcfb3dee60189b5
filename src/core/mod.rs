//! Core library components.
//!
//! This module contains the key lifecycle logic, independent of the
//! command line: the public key codec, the encrypted key file format, the
//! keystore abstraction and the manager that orchestrates them.

pub mod config;
pub mod constants;
pub mod key;
pub mod keyfile;
pub mod manager;
pub mod presenter;
pub mod store;
