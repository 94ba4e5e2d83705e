use std::any::TypeId;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use encodable::{AnyEncodable, BoxError, Encodable, Value};

type Reconstruct = fn(Value) -> Result<Box<dyn AnyEncodable>, BoxError>;

/// Registry record for one [`Encodable`] type.
///
/// Holds the declared name and a function that rebuilds an instance from a
/// payload. Two descriptors are equal when they describe the same Rust type.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    rust_type: &'static str,
    reconstruct: Reconstruct,
}

impl TypeDescriptor {
    pub fn of<T: Encodable>() -> Self {
        TypeDescriptor {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            rust_type: std::any::type_name::<T>(),
            reconstruct: reconstruct::<T>,
        }
    }

    /// Declared name, the envelope tag.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type path, for diagnostics only.
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    pub fn describes<T: Encodable>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Rebuilds an instance of the described type from `data`.
    pub fn reconstruct(&self, data: Value) -> Result<Box<dyn AnyEncodable>, BoxError> {
        (self.reconstruct)(data)
    }
}

fn reconstruct<T: Encodable>(data: Value) -> Result<Box<dyn AnyEncodable>, BoxError> {
    let obj = T::from_structured_data(data)?;
    Ok(Box::new(obj))
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl Debug for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("rust_type", &self.rust_type)
            .finish_non_exhaustive()
    }
}
