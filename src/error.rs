//! Error type for the status screen.
//!
//! Refresh operations never fail: a missing or stale element handle turns a
//! write into a no-op. Errors only come from the edges that allocate (canvas
//! elements, subscriptions, screen slots) or decode configuration.

use thiserror_no_std::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The canvas has no free element slots left
    #[error("Canvas capacity exceeded (max: {max})")]
    CanvasFull {
        /// Maximum number of live elements
        max: usize,
    },

    /// A handle passed as parent no longer refers to a live element
    #[error("Stale element handle")]
    StaleHandle,

    /// Text does not fit the element's buffer
    #[error("Text too long (max: {max})")]
    TextTooLong {
        /// Buffer capacity in bytes
        max: usize,
    },

    /// The screen's event subscriber table is full
    #[error("Subscriber table full (max: {max})")]
    SubscriberTableFull {
        /// Maximum number of subscriptions per screen
        max: usize,
    },

    /// The manager already holds its maximum number of screens
    #[error("Screen set full (max: {max})")]
    ScreenSetFull {
        /// Maximum number of live screens
        max: usize,
    },

    /// The configuration could not be encoded or decoded, or holds an
    /// unusable tick period
    #[error("Invalid status configuration")]
    Config,
}

/// Result type for status screen operations
pub type StatusResult<T> = Result<T, StatusError>;
