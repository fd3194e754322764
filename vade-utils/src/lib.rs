/// Shared formatting helpers (points, naira amounts, progress).
pub mod formatting;
/// Interval ticker shared by every polling feed.
pub mod poller;
/// Shared time helpers.
pub mod time;
