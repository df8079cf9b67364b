//! A minimal dependency container with lazily-constructed singletons.
//!
//! [`ServiceCollection`] records one factory per type. Building it produces a
//! [`ServiceProvider`] that owns one singleton slot per registration. The
//! first resolution of a type runs its factory under a per-registration guard;
//! every later resolution returns a clone of the same `Arc`.
//!
//! ## Rules
//!
//! - A factory runs at most once per provider, even under concurrent first
//!   resolution.
//! - A failing factory is not cached; the next resolution tries again.
//! - Each provider built from a collection has its own singletons.
//! - Circular registrations are not supported (the guard is not re-entrant).

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::{BoxError, ServiceError};

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&ServiceProvider) -> Result<Instance, BoxError> + Send + Sync>;

#[derive(Clone)]
struct Descriptor {
    type_name: &'static str,
    factory: Factory,
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Registrations waiting to be turned into a [`ServiceProvider`].
#[derive(Clone, Default)]
pub struct ServiceCollection {
    descriptors: HashMap<TypeId, Descriptor>,
}

impl ServiceCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lazily-built singleton of type `T`, replacing any previous
    /// registration of `T`.
    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |provider: &ServiceProvider| {
            factory(provider).map(|value| value as Instance)
        });
        self.descriptors.insert(
            TypeId::of::<T>(),
            Descriptor {
                type_name: type_name::<T>(),
                factory,
            },
        );
        self
    }

    /// Registers a singleton of type `T` only if `T` has no registration yet.
    pub fn try_add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
    {
        if !self.contains::<T>() {
            self.add_singleton(factory);
        }
        self
    }

    /// Registers an already-built instance of `T`.
    pub fn add_instance<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.add_singleton(move |_| Ok(Arc::clone(&instance)))
    }

    /// Returns `true` if `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.descriptors.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Builds a provider with fresh singleton slots for every registration.
    pub fn build_service_provider(&self) -> ServiceProvider {
        let registrations = self
            .descriptors
            .iter()
            .map(|(id, descriptor)| {
                (
                    *id,
                    Registration {
                        descriptor: descriptor.clone(),
                        instance: OnceLock::new(),
                        init: Mutex::new(()),
                    },
                )
            })
            .collect();
        ServiceProvider { registrations }
    }
}

impl std::fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.descriptors.values().map(|d| d.type_name))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

struct Registration {
    descriptor: Descriptor,
    instance: OnceLock<Instance>,
    init: Mutex<()>,
}

impl Registration {
    fn resolve(&self, provider: &ServiceProvider) -> Result<Instance, ServiceError> {
        if let Some(instance) = self.instance.get() {
            return Ok(Arc::clone(instance));
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = self.instance.get() {
            return Ok(Arc::clone(instance));
        }

        debug!(service = self.descriptor.type_name, "Constructing singleton");
        let instance =
            (self.descriptor.factory)(provider).map_err(|source| ServiceError::Construction {
                type_name: self.descriptor.type_name,
                source,
            })?;
        Ok(Arc::clone(self.instance.get_or_init(|| instance)))
    }
}

/// Resolves services registered in a [`ServiceCollection`].
pub struct ServiceProvider {
    registrations: HashMap<TypeId, Registration>,
}

impl ServiceProvider {
    /// Resolves `T`, returning `Ok(None)` if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Construction`] if the factory fails.
    pub fn get_service<T>(&self) -> Result<Option<Arc<T>>, ServiceError>
    where
        T: Send + Sync + 'static,
    {
        let Some(registration) = self.registrations.get(&TypeId::of::<T>()) else {
            return Ok(None);
        };
        let instance = registration.resolve(self)?;
        // Keyed by TypeId, so the downcast only fails if the factory table is corrupt.
        instance
            .downcast::<T>()
            .map(Some)
            .map_err(|_| ServiceError::NotRegistered {
                type_name: type_name::<T>(),
            })
    }

    /// Resolves `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotRegistered`] if `T` has no registration, or
    /// [`ServiceError::Construction`] if the factory fails.
    pub fn get_required_service<T>(&self) -> Result<Arc<T>, ServiceError>
    where
        T: Send + Sync + 'static,
    {
        self.get_service::<T>()?
            .ok_or_else(|| ServiceError::NotRegistered {
                type_name: type_name::<T>(),
            })
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.registrations.values().map(|r| r.descriptor.type_name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Greeting(String);

    #[derive(Debug)]
    struct Greeter {
        greeting: Arc<Greeting>,
    }

    #[test]
    fn test_singleton_resolves_to_same_instance() {
        let mut services = ServiceCollection::new();
        services.add_singleton(|_| Ok(Arc::new(Greeting("hello".into()))));
        let provider = services.build_service_provider();

        let first = provider.get_required_service::<Greeting>().unwrap();
        let second = provider.get_required_service::<Greeting>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_factory_runs_lazily_and_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut services = ServiceCollection::new();
        services.add_singleton(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Greeting("hello".into())))
        });

        let provider = services.build_service_provider();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        provider.get_required_service::<Greeting>().unwrap();
        provider.get_required_service::<Greeting>().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_resolution_runs_factory_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut services = ServiceCollection::new();
        services.add_singleton(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(10));
            Ok(Arc::new(Greeting("hello".into())))
        });
        let provider = services.build_service_provider();

        let resolved: Vec<Arc<Greeting>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| provider.get_required_service::<Greeting>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(resolved.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_factory_can_resolve_dependencies() {
        let mut services = ServiceCollection::new();
        services
            .add_singleton(|_| Ok(Arc::new(Greeting("hi".into()))))
            .add_singleton(|sp| {
                Ok(Arc::new(Greeter {
                    greeting: sp.get_required_service::<Greeting>()?,
                }))
            });
        let provider = services.build_service_provider();

        let greeter = provider.get_required_service::<Greeter>().unwrap();
        let greeting = provider.get_required_service::<Greeting>().unwrap();

        assert!(Arc::ptr_eq(&greeter.greeting, &greeting));
    }

    #[test]
    fn test_unregistered_service() {
        let provider = ServiceCollection::new().build_service_provider();

        assert!(provider.get_service::<Greeting>().unwrap().is_none());
        assert!(matches!(
            provider.get_required_service::<Greeting>(),
            Err(ServiceError::NotRegistered { .. })
        ));
    }

    #[test]
    fn test_failed_construction_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut services = ServiceCollection::new();
        services.add_singleton(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err("first attempt fails".into());
            }
            Ok(Arc::new(Greeting("hello".into())))
        });
        let provider = services.build_service_provider();

        assert!(matches!(
            provider.get_required_service::<Greeting>(),
            Err(ServiceError::Construction { .. })
        ));
        assert!(provider.get_required_service::<Greeting>().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_try_add_keeps_first_registration() {
        let mut services = ServiceCollection::new();
        services
            .add_instance(Arc::new(Greeting("first".into())))
            .try_add_singleton(|_| Ok(Arc::new(Greeting("second".into()))));
        let provider = services.build_service_provider();

        assert_eq!(services.len(), 1);
        assert_eq!(provider.get_required_service::<Greeting>().unwrap().0, "first");
    }

    #[test]
    fn test_add_singleton_replaces_registration() {
        let mut services = ServiceCollection::new();
        services
            .add_instance(Arc::new(Greeting("first".into())))
            .add_instance(Arc::new(Greeting("second".into())));
        let provider = services.build_service_provider();

        assert_eq!(provider.get_required_service::<Greeting>().unwrap().0, "second");
    }

    #[test]
    fn test_each_provider_has_its_own_singletons() {
        let mut services = ServiceCollection::new();
        services.add_singleton(|_| Ok(Arc::new(Greeting("hello".into()))));

        let a = services.build_service_provider();
        let b = services.build_service_provider();

        assert!(!Arc::ptr_eq(
            &a.get_required_service::<Greeting>().unwrap(),
            &b.get_required_service::<Greeting>().unwrap()
        ));
    }
}
