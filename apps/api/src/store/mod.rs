//! Document store accessors for the `interviews` and `feedback` collections.
//!
//! Read failures are NOT caught here — they propagate to the caller as
//! `sqlx::Error` and surface as fatal-to-the-request errors. Not-found is a
//! `None`/empty result, never an error.

pub mod feedback;
pub mod interviews;
