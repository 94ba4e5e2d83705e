//! # registry
//!
//! Name-keyed registry of [`Encodable`] types and the envelope codec built on
//! top of it.
//!
//! Types are registered explicitly, usually once at startup. `dumps` turns an
//! instance into envelope text and `loads` turns the text back into an
//! instance of whichever registered type the envelope names.
//!
//! ```text
//! dumps: instance → (NAME, to_structured_data) → ["NAME", payload]
//! loads: text → parse → shape check → resolve NAME → from_structured_data
//! ```
//!
//! ## Example
//!
//! ```
//! use encodable::{BoxError, Encodable, Value, serde_data};
//! use registry::Registry;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! impl Encodable for User {
//!     const NAME: &'static str = "User";
//!
//!     fn to_structured_data(&self) -> Result<Value, BoxError> {
//!         serde_data::to_data(self)
//!     }
//!
//!     fn from_structured_data(data: Value) -> Result<Self, BoxError> {
//!         serde_data::from_data(data)
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.register_type::<User>()?;
//!
//! let text = registry.dumps(&User { name: "alice".into() })?;
//! assert_eq!(r#"["User",{"name":"alice"}]"#, text);
//!
//! let user: User = registry.loads_as(&text)?;
//! assert_eq!("alice", user.name);
//! # Ok::<(), registry::error::Error>(())
//! ```
//!
//! A registry is an ordinary value: construct one per process (or per test)
//! and share it by reference or behind an `Arc`.

#![forbid(unsafe_code)]

mod codec;
mod descriptor;
pub mod error;
mod policy;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use encodable::Encodable;
use tracing::{debug, trace, warn};

pub use descriptor::TypeDescriptor;
pub use policy::CollisionPolicy;

use error::{Error, Result};

/// Mapping from declared type name to [`TypeDescriptor`].
///
/// The map only grows. All methods take `&self`; the map is guarded by a
/// read-write lock so registration may race with lookups.
#[derive(Debug, Default)]
pub struct Registry {
    types: RwLock<HashMap<&'static str, TypeDescriptor>>,
    policy: CollisionPolicy,
}

impl Registry {
    /// Creates an empty registry that rejects name collisions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collision_policy(policy: CollisionPolicy) -> Self {
        Registry {
            types: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Registers a set of types.
    ///
    /// A type that is already registered, or that appears more than once in
    /// `descriptors`, is accepted silently.
    ///
    /// # Errors
    ///
    /// With [`CollisionPolicy::Reject`], fails with [`Error::NameCollision`] if
    /// two different types share a name, either within `descriptors` or
    /// against the registry. Nothing from the call is registered in that case.
    pub fn register<I>(&self, descriptors: I) -> Result<()>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let descriptors: Vec<TypeDescriptor> = descriptors.into_iter().collect();
        let mut types = self.write();

        if self.policy == CollisionPolicy::Reject {
            let mut staged: HashMap<&'static str, TypeDescriptor> = HashMap::new();
            for descriptor in &descriptors {
                let existing = staged
                    .get(descriptor.name())
                    .or_else(|| types.get(descriptor.name()));
                if let Some(existing) = existing {
                    if existing != descriptor {
                        warn!(
                            type_name = descriptor.name(),
                            existing = existing.rust_type(),
                            incoming = descriptor.rust_type(),
                            "rejected type name collision"
                        );
                        return Err(Error::NameCollision {
                            name: descriptor.name().to_string(),
                            existing: existing.rust_type(),
                            incoming: descriptor.rust_type(),
                        });
                    }
                }
                staged.insert(descriptor.name(), *descriptor);
            }
        }

        for descriptor in descriptors {
            match types.insert(descriptor.name(), descriptor) {
                None => debug!(
                    type_name = descriptor.name(),
                    rust_type = descriptor.rust_type(),
                    "registered encodable type"
                ),
                Some(previous) if previous == descriptor => {
                    trace!(type_name = descriptor.name(), "type already registered")
                }
                Some(previous) => warn!(
                    type_name = descriptor.name(),
                    previous = previous.rust_type(),
                    rust_type = descriptor.rust_type(),
                    "replaced registered type"
                ),
            }
        }

        Ok(())
    }

    /// Registers a single type. Same as `register([TypeDescriptor::of::<T>()])`.
    pub fn register_type<T: Encodable>(&self) -> Result<()> {
        self.register([TypeDescriptor::of::<T>()])
    }

    /// Looks up the type registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<TypeDescriptor> {
        self.read()
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotRegistered(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Returns `true` if `T` itself is registered under `T::NAME`.
    pub fn contains_type<T: Encodable>(&self) -> bool {
        self.read()
            .get(T::NAME)
            .is_some_and(|descriptor| descriptor.describes::<T>())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.read().keys().copied().collect();
        names.sort_unstable();
        names
    }

    // Entries are inserted whole, so a map left behind by a panicking
    // writer is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<&'static str, TypeDescriptor>> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<&'static str, TypeDescriptor>> {
        self.types.write().unwrap_or_else(PoisonError::into_inner)
    }
}
