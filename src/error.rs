use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use joinery::JoinableIterator;

/// The failure type accepted from cleanup actions.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error wrapped with a fixed descriptive label.
///
/// Renders as `<context>: <cause>`. The original cause remains reachable
/// through [`Error::source`], so downcast-based inspection sees through the
/// label.
#[derive(thiserror::Error, Debug)]
#[error("{context}: {source}")]
pub struct Annotated {
    context: String,

    #[source]
    source: BoxError,
}

impl Annotated {
    pub fn new(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// The join of one or more errors, in the order they occurred.
///
/// Renders each constituent's message on its own line. Never empty: an
/// aggregation of zero errors is `Ok(())`, not a `Joined`.
#[derive(Debug)]
pub struct Joined {
    errors: Vec<BoxError>,
}

impl Joined {
    pub(crate) fn join(errors: Vec<BoxError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self { errors })
    }

    /// Prepends `prior` to this join's constituents. A prior `Joined` is
    /// flattened so constituents stay individually addressable.
    pub(crate) fn preceded_by(mut self, prior: BoxError) -> Self {
        match prior.downcast::<Joined>() {
            Ok(prior) => {
                let mut errors = prior.errors;
                errors.append(&mut self.errors);
                Self { errors }
            }
            Err(prior) => {
                self.errors.insert(0, prior);
                self
            }
        }
    }

    /// The constituent errors, in the order they occurred.
    pub fn errors(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        self.errors
            .iter()
            .map(|err| err.as_ref() as &(dyn Error + 'static))
    }

    /// Searches every constituent's source chain for an `E`, returning the
    /// first found.
    pub fn find_cause<E: Error + 'static>(&self) -> Option<&E> {
        self.errors().find_map(|constituent| {
            let mut current = Some(constituent);
            while let Some(err) = current {
                if let Some(found) = err.downcast_ref::<E>() {
                    return Some(found);
                }
                current = err.source();
            }
            None
        })
    }
}

impl Display for Joined {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.iter().join_with('\n'))
    }
}

impl Error for Joined {}
