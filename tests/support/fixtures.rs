//! Test fixtures and constants.

/// Config with cheap argon2 parameters so tests run fast.
pub const FAST_CONFIG: &str = "[kdf]\nmemory_kib = 8\niterations = 1\nparallelism = 1\n";

/// Password used by the standard password file.
pub const PASSWORD: &str = "correct horse battery staple";

/// Name of the standard password file in the working directory.
pub const PASSWORD_FILE: &str = "password.txt";

/// A valid compressed key that is never in any test store (the curve generator).
pub const UNKNOWN_KEY: &str = "0x0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// A string that is not a public key.
pub const MALFORMED_KEY: &str = "0xdeadbeef";
