//! Offset pagination primitives shared by the property API and its client.
//!
//! The listing endpoint pages with classic offset/limit semantics: callers
//! send a one-based `page` and a page size `take`, the server skips
//! `(page - 1) * take` records and answers with the slice plus a
//! [`PageMeta`] block describing the filtered total.
//!
//! ```
//! use pagination::{PageMeta, PageRequest};
//!
//! let request = PageRequest::new(2, 10).expect("valid request");
//! assert_eq!(request.skip(), 10);
//!
//! let meta = PageMeta::new(request, 3, 13);
//! assert_eq!(meta.total_pages, 2);
//! ```

mod error;
mod meta;
mod request;

pub use error::PaginationError;
pub use meta::{PageMeta, Paginated};
pub use request::{DEFAULT_PAGE, DEFAULT_TAKE, MAX_TAKE, PageRequest};
