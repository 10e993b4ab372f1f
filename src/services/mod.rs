//! Grade record providers.
//!
//! [`RecordSource`] is the async trait every provider implements.
//! [`FileSource`] reads local exports, [`StaticSource`] serves a fixed table
//! and [`CachedSource`] puts a time-boxed cache in front of any source. The
//! remote sheet lives in [`crate::infra::sheets`].

mod cached;
mod file_source;
pub mod record_source;

pub use cached::CachedSource;
pub use file_source::FileSource;
pub use record_source::{RecordSource, StaticSource};
