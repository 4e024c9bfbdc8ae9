//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Custom header carrying the per-account auth hash
pub const AUTH_HASH_HEADER: &str = "x-auth-token";

/// Standard header carrying the bearer token
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Storage key for the bearer token
pub const SESSION_TOKEN_KEY: &str = "userToken";

/// Storage key for the profile / auth hash object
pub const SESSION_PROFILE_KEY: &str = "auth";

/// Backend path returning the caller's credit state
pub const CREDITS_PATH: &str = "/user/credits";

/// Data directory name under the home directory
pub const DATA_DIR_NAME: &str = ".apiconsole";

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "apiconsole.log";

/// Hint attached to transport failures
pub const TRANSPORT_HINT: &str =
    "No response was received. Check the API base URL, your network connection and CORS/proxy settings.";

/// Application name
pub const APP_NAME: &str = "API Console";
