//! Rich diagnostic error types for the aeon framework.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the aeon framework.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum AeonError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Cognition(#[from] CognitionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Serve(#[from] ServeError),
}

// ---------------------------------------------------------------------------
// Memory errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum MemoryError {
    #[error("failed to export memory to {path}: {source}")]
    #[diagnostic(
        code(aeon::memory::export),
        help(
            "A filesystem operation failed while writing the memory dump. \
             Check that the parent directory exists and is writable."
        )
    )]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize memory dump: {message}")]
    #[diagnostic(
        code(aeon::memory::serialize),
        help("The memory contents could not be encoded as JSON. This is a bug — file a report.")
    )]
    Serialize { message: String },
}

// ---------------------------------------------------------------------------
// Cognition errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CognitionError {
    #[error("reasoning backend unreachable at {url}")]
    #[diagnostic(
        code(aeon::cognition::unreachable),
        help(
            "The remote completion endpoint could not be contacted. \
             Check network access, or unset OPENAI_API_KEY to run rule-based only."
        )
    )]
    Unreachable { url: String },

    #[error("completion request failed: {message}")]
    #[diagnostic(
        code(aeon::cognition::request_failed),
        help("The completion endpoint rejected the request. Check the API key and model name.")
    )]
    RequestFailed { message: String },

    #[error("failed to parse completion response: {message}")]
    #[diagnostic(
        code(aeon::cognition::parse_error),
        help("The model returned an unexpected response shape.")
    )]
    ParseError { message: String },
}

// ---------------------------------------------------------------------------
// Agent errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AgentError {
    #[error("empty goal")]
    #[diagnostic(
        code(aeon::agent::empty_goal),
        help("Goal execution requires a non-empty goal description.")
    )]
    EmptyGoal,
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(
        code(aeon::config::read),
        help("Check that the config file exists and has read permissions.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    #[diagnostic(
        code(aeon::config::parse),
        help("The file is not valid TOML for AeonConfig. Check field names and types.")
    )]
    Parse { path: String, message: String },

    #[error("invalid bind address: {addr}")]
    #[diagnostic(
        code(aeon::config::bind_addr),
        help("The bind address must parse as `host:port`, e.g. \"127.0.0.1:8000\".")
    )]
    BindAddr { addr: String },
}

// ---------------------------------------------------------------------------
// Server errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    #[diagnostic(
        code(aeon::serve::bind),
        help("Check that the port is free and the bind address is local. Override with --bind/--port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {source}")]
    #[diagnostic(
        code(aeon::serve::io),
        help("The HTTP server stopped unexpectedly. Check the logs above for the cause.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// API client errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("cannot connect to aeon server at {url}")]
    #[diagnostic(
        code(aeon::client::unreachable),
        help("Make sure the server is running: `aeon serve`. Override the URL with --api-url.")
    )]
    Unreachable { url: String },

    #[error("server returned status {status} for {endpoint}")]
    #[diagnostic(
        code(aeon::client::status),
        help("The server rejected the request. Check the server logs for details.")
    )]
    Status { status: u16, endpoint: String },

    #[error("failed to decode server response from {endpoint}: {message}")]
    #[diagnostic(
        code(aeon::client::decode),
        help("The response body did not match the expected shape. Client and server versions may differ.")
    )]
    Decode { endpoint: String, message: String },
}

/// Convenience alias for functions returning aeon results.
pub type AeonResult<T> = std::result::Result<T, AeonError>;
