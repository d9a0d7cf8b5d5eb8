//! Capability Registry
//!
//! Single source of truth for "can implementation X do operation Y". Each
//! implementation registers typed function values for construction and for
//! the access styles it supports; the registry erases the concrete container
//! type so the runner can drive every implementation the same way.
//!
//! Activation is two-phase: [`Registry::iter`] enumerates everything known,
//! [`Registry::activate`] keeps the implementations whose availability probe
//! succeeds. Whether an implementation is active and whether it supports an
//! operation are independent questions.

use crate::document::NestedDocument;
use crate::measurement::Operation;
use std::any::{Any, type_name};
use std::fmt;
use std::hint::black_box;
use thiserror::Error;

/// Errors raised by container operations.
///
/// These never escape a benchmark run: the timing primitive turns them into
/// unavailable cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Key lookup failed
    #[error("key `{0}` not found")]
    MissingKey(String),
    /// Attribute lookup failed
    #[error("no attribute `{0}`")]
    MissingAttribute(String),
    /// Traversal reached a leaf where a mapping was expected
    #[error("`{0}` is not a mapping")]
    NotAMapping(String),
    /// Traversal reached a mapping where an integer was expected
    #[error("`{0}` is not an integer")]
    NotAnInteger(String),
    /// The erased instance does not hold the expected container type
    #[error("instance holds `{found}`, expected `{expected}`")]
    InstanceType {
        /// Type the operation was registered for
        expected: &'static str,
        /// Type actually stored
        found: &'static str,
    },
    /// The implementation does not provide this operation
    #[error("{0} is not supported")]
    Unsupported(Operation),
    /// The constructor rejected the document
    #[error("construction failed: {0}")]
    Construction(String),
    /// The backing container is not compiled into this build
    #[error("implementation unavailable in this build")]
    Unavailable,
}

/// Registry defects. These are programming errors, not runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two implementations share a display name
    #[error("implementation `{0}` registered twice")]
    DuplicateName(String),
    /// A name was looked up that was never registered
    #[error("implementation `{0}` is not registered")]
    Unregistered(String),
}

/// Static description of an implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplementationDescriptor {
    /// Unique display name
    pub name: &'static str,
    /// Source expression shown for the constructor
    pub constructor: &'static str,
    /// Supports key-style access
    pub supports_key: bool,
    /// Supports dot-style access
    pub supports_dot: bool,
}

impl ImplementationDescriptor {
    /// Whether this implementation declares the capability `op` needs.
    pub fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::Init => true,
            Operation::ReadKey | Operation::WriteKey => self.supports_key,
            Operation::ReadDot | Operation::WriteDot => self.supports_dot,
        }
    }
}

/// A live, type-erased container instance
pub struct Instance {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl Instance {
    fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the concrete container type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the concrete container
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, AccessError> {
        self.value
            .downcast_ref::<T>()
            .ok_or(AccessError::InstanceType {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Mutably borrow the concrete container
    pub fn downcast_mut<T: Any>(&mut self) -> Result<&mut T, AccessError> {
        let found = self.type_name;
        self.value
            .downcast_mut::<T>()
            .ok_or(AccessError::InstanceType {
                expected: type_name::<T>(),
                found,
            })
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Typed constructor
pub type ConstructOp<T> = fn(&NestedDocument) -> Result<T, AccessError>;
/// Typed nested read
pub type ReadOp<T> = fn(&T) -> Result<i64, AccessError>;
/// Typed nested write
pub type WriteOp<T> = fn(&mut T, i64) -> Result<(), AccessError>;

type InitFn = Box<dyn Fn(&NestedDocument) -> Result<(), AccessError> + Send + Sync>;
type BuildFn = Box<dyn Fn(&NestedDocument) -> Result<Instance, AccessError> + Send + Sync>;
type ReadFn = Box<dyn Fn(&Instance) -> Result<i64, AccessError> + Send + Sync>;
type WriteFn = Box<dyn Fn(&mut Instance, i64) -> Result<(), AccessError> + Send + Sync>;

struct Accessors {
    read: ReadFn,
    write: WriteFn,
}

impl Accessors {
    fn erase<T: Any>(read: ReadOp<T>, write: WriteOp<T>) -> Self {
        Self {
            read: Box::new(move |instance| read(instance.downcast_ref::<T>()?)),
            write: Box::new(move |instance, value| write(instance.downcast_mut::<T>()?, value)),
        }
    }
}

/// A registered implementation: descriptor, availability probe and operations
pub struct Implementation {
    descriptor: ImplementationDescriptor,
    probe: fn() -> bool,
    init: InitFn,
    build: BuildFn,
    key: Option<Accessors>,
    dot: Option<Accessors>,
}

impl Implementation {
    /// Start registering a container type `T`.
    pub fn builder<T: Any>(
        name: &'static str,
        constructor: &'static str,
        construct: ConstructOp<T>,
    ) -> ImplementationBuilder<T> {
        ImplementationBuilder {
            name,
            constructor,
            construct,
            probe: || true,
            key: None,
            dot: None,
        }
    }

    /// Placeholder for a container that is known but not compiled in.
    ///
    /// It keeps its declared capabilities, fails its availability probe and
    /// errors on every operation.
    pub fn unavailable(
        name: &'static str,
        constructor: &'static str,
        supports_key: bool,
        supports_dot: bool,
    ) -> Self {
        let mut builder = Self::builder::<()>(name, constructor, |_| Err(AccessError::Unavailable))
            .probe(|| false);
        if supports_key {
            builder = builder.key_access(
                |_| Err(AccessError::Unavailable),
                |_, _| Err(AccessError::Unavailable),
            );
        }
        if supports_dot {
            builder = builder.dot_access(
                |_| Err(AccessError::Unavailable),
                |_, _| Err(AccessError::Unavailable),
            );
        }
        builder.build()
    }

    /// Static description
    pub fn descriptor(&self) -> &ImplementationDescriptor {
        &self.descriptor
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Whether the backing container is present in this build
    pub fn is_available(&self) -> bool {
        (self.probe)()
    }

    /// Construct and immediately drop a container (the timed Init body)
    pub fn initialize(&self, document: &NestedDocument) -> Result<(), AccessError> {
        (self.init)(document)
    }

    /// Construct a long-lived container
    pub fn construct(&self, document: &NestedDocument) -> Result<Instance, AccessError> {
        (self.build)(document)
    }

    /// `instance["level1"]["level2"]["level3"]`
    pub fn read_key(&self, instance: &Instance) -> Result<i64, AccessError> {
        let accessors = self
            .key
            .as_ref()
            .ok_or(AccessError::Unsupported(Operation::ReadKey))?;
        (accessors.read)(instance)
    }

    /// `instance["level1"]["level2"]["level3"] = value`
    pub fn write_key(&self, instance: &mut Instance, value: i64) -> Result<(), AccessError> {
        let accessors = self
            .key
            .as_ref()
            .ok_or(AccessError::Unsupported(Operation::WriteKey))?;
        (accessors.write)(instance, value)
    }

    /// `instance.level1.level2.level3`
    pub fn read_dot(&self, instance: &Instance) -> Result<i64, AccessError> {
        let accessors = self
            .dot
            .as_ref()
            .ok_or(AccessError::Unsupported(Operation::ReadDot))?;
        (accessors.read)(instance)
    }

    /// `instance.level1.level2.level3 = value`
    pub fn write_dot(&self, instance: &mut Instance, value: i64) -> Result<(), AccessError> {
        let accessors = self
            .dot
            .as_ref()
            .ok_or(AccessError::Unsupported(Operation::WriteDot))?;
        (accessors.write)(instance, value)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`Implementation::builder`]
pub struct ImplementationBuilder<T> {
    name: &'static str,
    constructor: &'static str,
    construct: ConstructOp<T>,
    probe: fn() -> bool,
    key: Option<(ReadOp<T>, WriteOp<T>)>,
    dot: Option<(ReadOp<T>, WriteOp<T>)>,
}

impl<T: Any> ImplementationBuilder<T> {
    /// Declare key-style access
    pub fn key_access(mut self, read: ReadOp<T>, write: WriteOp<T>) -> Self {
        self.key = Some((read, write));
        self
    }

    /// Declare dot-style access
    pub fn dot_access(mut self, read: ReadOp<T>, write: WriteOp<T>) -> Self {
        self.dot = Some((read, write));
        self
    }

    /// Override the availability probe (defaults to always available)
    pub fn probe(mut self, probe: fn() -> bool) -> Self {
        self.probe = probe;
        self
    }

    /// Erase the container type and finish registration
    pub fn build(self) -> Implementation {
        let construct = self.construct;
        Implementation {
            descriptor: ImplementationDescriptor {
                name: self.name,
                constructor: self.constructor,
                supports_key: self.key.is_some(),
                supports_dot: self.dot.is_some(),
            },
            probe: self.probe,
            init: Box::new(move |document| {
                construct(document).map(|value| {
                    black_box(value);
                })
            }),
            build: Box::new(move |document| construct(document).map(Instance::new)),
            key: self.key.map(|(read, write)| Accessors::erase(read, write)),
            dot: self.dot.map(|(read, write)| Accessors::erase(read, write)),
        }
    }
}

/// Ordered collection of implementations
#[derive(Debug, Default)]
pub struct Registry {
    implementations: Vec<Implementation>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an implementation; names must be unique
    pub fn register(&mut self, implementation: Implementation) -> Result<(), RegistryError> {
        if self.implementations.iter().any(|i| i.name() == implementation.name()) {
            return Err(RegistryError::DuplicateName(implementation.name().to_string()));
        }
        tracing::trace!(name = implementation.name(), "registered implementation");
        self.implementations.push(implementation);
        Ok(())
    }

    /// Look up an implementation by name
    pub fn get(&self, name: &str) -> Result<&Implementation, RegistryError> {
        self.implementations
            .iter()
            .find(|i| i.name() == name)
            .ok_or_else(|| RegistryError::Unregistered(name.to_string()))
    }

    /// Capabilities of a registered implementation
    pub fn capabilities(&self, name: &str) -> Result<&ImplementationDescriptor, RegistryError> {
        self.get(name).map(Implementation::descriptor)
    }

    /// All known implementations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Implementation> {
        self.implementations.iter()
    }

    /// Number of known implementations
    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }

    /// Implementations whose availability probe succeeds, in registration order
    pub fn activate(&self) -> Vec<&Implementation> {
        self.implementations
            .iter()
            .filter(|implementation| {
                let available = implementation.is_available();
                if !available {
                    tracing::info!(
                        name = implementation.name(),
                        "skipping implementation: not available in this build"
                    );
                }
                available
            })
            .collect()
    }
}
