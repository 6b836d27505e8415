//! Application configuration constants
//!
//! Central location for configuration constants and defaults used
//! throughout the data core.

// ===== Folders =====

/// Icon identifier assigned to folders created without an explicit icon
pub const DEFAULT_FOLDER_ICON: &str = "folder";

/// Name assigned to folders created with an empty name
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

// ===== Assistant =====

/// Simulated latency for the mock assistant, in milliseconds.
/// Matches the delay the chat surface was designed against.
pub const ASSISTANT_RESPONSE_DELAY_MS: u64 = 1_500;

/// Reply used when the responder fails. The chat surface must always
/// receive an assistant message, never an error.
pub const ASSISTANT_FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't process that right now. Please try again.";

/// Greeting seeded into every new chat session
pub const ASSISTANT_GREETING: &str =
    "Hello! I can help you with your note. Ask me anything about it.";

// ===== Database =====

/// Maximum connections in the application pool
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// Busy timeout for SQLite connections, in seconds
pub const DB_BUSY_TIMEOUT_SECS: u64 = 5;
