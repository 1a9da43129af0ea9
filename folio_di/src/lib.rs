//! Minimal compile-time dependency injection.
//!
//! A provider (declared with [`provider!`]) owns the leaf dependencies, e.g.
//! configuration structs and externally constructed clients. Every other
//! service derives [`Build`] and is assembled from its fields on demand. Built
//! values are cached per provider, so each service type is constructed at most
//! once and then cloned.

extern crate self as folio_di;

pub use folio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provides for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Greeting(Arc<str>);

    #[derive(Debug, Clone, Default)]
    struct Counter(Arc<AtomicUsize>);

    #[derive(Debug, Clone, Build)]
    struct Greeter {
        greeting: Greeting,
        #[state]
        state: Counter,
    }

    #[derive(Debug, Clone, Build)]
    struct App<G> {
        greeter: G,
        greeting: Greeting,
    }

    provider! {
        TestProvider {
            greeting: Greeting,
        }
    }

    provider! {
        OuterTestProvider {
            ..inner: TestProvider {
                Greeting,
            }
        }
    }

    fn provider() -> TestProvider {
        TestProvider {
            _cache: Default::default(),
            greeting: Greeting("Hello".into()),
        }
    }

    #[test]
    fn build_from_fields() {
        let mut provider = provider();
        let app: App<Greeter> = provider.provide();
        assert_eq!(&*app.greeting.0, "Hello");
        assert_eq!(&*app.greeter.greeting.0, "Hello");
    }

    #[test]
    fn built_values_are_cached() {
        let mut provider = provider();
        let a: Greeter = provider.provide();
        a.state.0.fetch_add(1, Ordering::Relaxed);
        let b: Greeter = provider.provide();
        assert_eq!(b.state.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn build_from_base_provider() {
        let mut provider = OuterTestProvider {
            _cache: Default::default(),
            inner: provider(),
        };
        let greeter: Greeter = provider.provide();
        assert_eq!(&*greeter.greeting.0, "Hello");
    }
}
