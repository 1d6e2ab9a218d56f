use std::{
    fmt::{self, Debug, Formatter},
    mem,
};

use log::{debug, trace};

use crate::error::{Annotated, BoxError, Joined};

type Action = Box<dyn FnOnce() -> Result<(), BoxError>>;

/// An ordered registry of deferred cleanup actions.
///
/// Actions run on [`flush`][Self::flush] in the order they were registered,
/// each exactly once. A failing action never prevents those after it from
/// running. Flushing clears the registry, so one `Cleaner` can serve every
/// iteration of a loop.
///
/// A `Cleaner` is confined to the scope which created it; it is not for
/// sharing across threads.
#[derive(Default)]
pub struct Cleaner {
    items: Vec<Action>,
}

impl Cleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cleanup action.
    pub fn add<F, E>(&mut self, action: F)
    where
        F: FnOnce() -> Result<(), E> + 'static,
        E: Into<BoxError>,
    {
        self.items.push(Box::new(move || action().map_err(Into::into)));
    }

    /// Registers a cleanup action whose failure, if any, will be wrapped as
    /// `<context>: <cause>` (see [`Annotated`]).
    pub fn add_with_context<F, E, C>(&mut self, action: F, context: C)
    where
        F: FnOnce() -> Result<(), E> + 'static,
        E: Into<BoxError>,
        C: Into<String>,
    {
        let context = context.into();
        self.items.push(Box::new(move || {
            action().map_err(|err| Annotated::new(context, err).into())
        }));
    }

    /// Runs every registered action in registration order, then clears the
    /// registry.
    ///
    /// No action is skipped, whatever the outcomes of those before it. Returns
    /// `Ok(())` if every action succeeded, otherwise the [`Joined`] failures
    /// in the order they occurred.
    pub fn flush(&mut self) -> Result<(), Joined> {
        trace!("flushing {} cleanup actions", self.items.len());

        let mut errors = Vec::new();
        for action in self.items.drain(..) {
            if let Err(err) = action() {
                debug!("cleanup action failed: {err}");
                errors.push(err);
            }
        }

        match Joined::join(errors) {
            Some(joined) => Err(joined),
            None => Ok(()),
        }
    }

    /// Runs [`flush`][Self::flush] and merges any failures into `outcome`.
    ///
    /// An error already in the slot is retained ahead of the cleanup
    /// failures; a clean flush leaves the slot untouched. Intended as the
    /// last act of a fallible scope, extending the scope's own result with
    /// whatever cleanup reported on the way out.
    pub fn flush_into(&mut self, outcome: &mut Result<(), BoxError>) {
        let Err(joined) = self.flush() else {
            return;
        };
        *outcome = Err(match mem::replace(outcome, Ok(())) {
            Ok(()) => joined.into(),
            Err(prior) => joined.preceded_by(prior).into(),
        });
    }
}

impl Debug for Cleaner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cleaner")
            .field("items", &format_args!("<{} pending>", self.items.len()))
            .finish()
    }
}
