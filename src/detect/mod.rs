//! Change detection for watched targets.
//!
//! Detection runs in two strategies, chosen per fetch:
//! - **timestamp strategy**: compare `Last-Modified` header values with a
//!   debounce window, used whenever the server sends a usable header;
//! - **content strategy**: normalize the response body and diff it line by
//!   line against the previous snapshot, used otherwise.

mod detector;
mod diff;
mod fetch;

pub use detector::{ChangeDetector, ChangeEvent};
pub use diff::{LineChange, diff_lines, normalize};
pub use fetch::{FetchKind, Fetcher, parse_http_date};
