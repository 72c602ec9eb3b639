//! Capability lookup: from an arbitrary error value to a problem record
//!
//! The normalizer never inspects error types itself. It asks a
//! [`ProblemLookup`] whether the error can be viewed as a [`ProblemDetails`]
//! record and, for the fallback path, which category title describes it.
//! [`AdapterRegistry`] is the stock implementation, resolving adapters by the
//! concrete type of the error.

use std::any::TypeId;
use std::error::Error;
use std::fmt;

use crate::problem::{AsProblemDetails, ProblemDetails};

/// Injectable adapter lookup used by the normalizer.
pub trait ProblemLookup: Send + Sync {
    /// Adapt `error` into a problem record, or `None` if no adapter applies.
    fn lookup(&self, error: &(dyn Error + 'static)) -> Option<ProblemDetails>;

    /// Human-readable category title for errors without an adapter.
    fn category_title(&self, _error: &(dyn Error + 'static)) -> Option<&str> {
        None
    }
}

impl<F> ProblemLookup for F
where
    F: Fn(&(dyn Error + 'static)) -> Option<ProblemDetails> + Send + Sync,
{
    fn lookup(&self, error: &(dyn Error + 'static)) -> Option<ProblemDetails> {
        self(error)
    }
}

type AdaptFn = dyn Fn(&(dyn Error + 'static)) -> Option<ProblemDetails> + Send + Sync;

struct Adapter {
    type_id: TypeId,
    type_name: &'static str,
    adapt: Box<AdaptFn>,
}

struct CategoryTitle {
    type_id: TypeId,
    matches: fn(&(dyn Error + 'static)) -> bool,
    title: String,
}

fn is_type<E: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    error.is::<E>()
}

/// Registry of adapters and category titles keyed by concrete error type.
///
/// Registering a second adapter (or title) for the same type replaces the
/// first. The registry is read-only once handed to a renderer.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Adapter>,
    titles: Vec<CategoryTitle>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter factory for errors of type `E`.
    #[must_use]
    pub fn register<E, F>(mut self, factory: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> ProblemDetails + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();
        self.adapters.retain(|a| a.type_id != type_id);
        self.adapters.push(Adapter {
            type_id,
            type_name: std::any::type_name::<E>(),
            adapt: Box::new(move |error: &(dyn Error + 'static)| {
                error.downcast_ref::<E>().map(&factory)
            }),
        });
        self
    }

    /// Register an error type that provides its own problem details.
    #[must_use]
    pub fn register_native<E>(self) -> Self
    where
        E: Error + AsProblemDetails + 'static,
    {
        self.register::<E, _>(E::as_problem_details)
    }

    /// Register the category title used when `E` has no adapter.
    #[must_use]
    pub fn register_title<E>(mut self, title: impl Into<String>) -> Self
    where
        E: Error + 'static,
    {
        let type_id = TypeId::of::<E>();
        self.titles.retain(|t| t.type_id != type_id);
        self.titles.push(CategoryTitle {
            type_id,
            matches: is_type::<E>,
            title: title.into(),
        });
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl ProblemLookup for AdapterRegistry {
    fn lookup(&self, error: &(dyn Error + 'static)) -> Option<ProblemDetails> {
        self.adapters.iter().find_map(|a| (a.adapt)(error))
    }

    fn category_title(&self, error: &(dyn Error + 'static)) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| (t.matches)(error))
            .map(|t| t.title.as_str())
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let adapters: Vec<&str> = self.adapters.iter().map(|a| a.type_name).collect();
        f.debug_struct("AdapterRegistry")
            .field("adapters", &adapters)
            .field("titles", &self.titles.len())
            .finish()
    }
}
