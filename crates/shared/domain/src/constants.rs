//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Configuration
// =============================================================================

/// Primary key of the one and only onboarding configuration row
pub const CONFIG_SINGLETON_ID: i32 = 1;

/// Version assigned to the configuration when it is first seeded
pub const INITIAL_CONFIG_VERSION: i64 = 1;

// =============================================================================
// Onboarding
// =============================================================================

/// Step collecting email and password
pub const STEP_CREDENTIALS: u8 = 1;

/// First admin-configurable profile step
pub const STEP_PROFILE_FIRST: u8 = 2;

/// Second admin-configurable profile step
pub const STEP_PROFILE_SECOND: u8 = 3;

// =============================================================================
// Session
// =============================================================================

/// Name of the cookie carrying the session identifier
pub const SESSION_COOKIE_NAME: &str = "uid";

/// Path scope of the session cookie
pub const SESSION_COOKIE_PATH: &str = "/";

/// Default session cookie lifetime in days
pub const DEFAULT_SESSION_MAX_AGE_DAYS: i64 = 30;

/// Seconds per day (for cookie max-age calculation)
pub const SECONDS_PER_DAY: i64 = 86_400;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 1;

/// Accepted birthdate layout when no time part is supplied
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";
