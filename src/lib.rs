//! Deferred cleanup for fallible scopes.
//!
//! A [`Cleaner`] collects cleanup actions as resources are acquired and runs
//! them all on [`flush`][Cleaner::flush], in registration order, joining
//! every failure into a single [`Joined`] error rather than stopping at the
//! first. Flushing clears the registry, so one `Cleaner` can serve every
//! iteration of a loop, releasing each round's resources before the next
//! begins.
//!
//! ```
//! use std::io;
//!
//! use broom::Cleaner;
//!
//! let mut cleaner = Cleaner::new();
//! cleaner.add(|| Ok::<_, io::Error>(()));
//! cleaner.add_with_context(
//!     || Err(io::Error::other("already unmounted")),
//!     "unmount scratch space",
//! );
//!
//! let joined = cleaner.flush().unwrap_err();
//! assert_eq!(joined.to_string(), "unmount scratch space: already unmounted");
//! ```
//!
//! [`Cleaner::flush_into`] merges cleanup failures into a scope's own result,
//! so the operation's error and the errors of the cleanup it triggered end up
//! in the same report:
//!
//! ```
//! use std::io;
//!
//! use broom::{BoxError, Cleaner};
//!
//! let mut cleaner = Cleaner::new();
//! cleaner.add(|| Err(io::Error::other("close failed")));
//!
//! let mut outcome: Result<(), BoxError> = Err(io::Error::other("copy failed").into());
//! cleaner.flush_into(&mut outcome);
//! assert_eq!(outcome.unwrap_err().to_string(), "copy failed\nclose failed");
//! ```
//!
//! The `Cleaner` is a passive registry: guaranteeing that it flushes on every
//! exit path is the enclosing scope's job. Run the fallible body as a closure
//! producing its `Result`, then call `flush_into` on that result before
//! returning it.

#![deny(missing_debug_implementations)]

mod cleaner;
mod error;

pub use crate::{
    cleaner::Cleaner,
    error::{Annotated, BoxError, Joined},
};
