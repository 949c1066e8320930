//! LODESTONE Engine - Property Processors
//!
//! The validate/transform pipeline for issue properties. One value
//! processor and one update processor per property type, dispatched through
//! an immutable registry keyed by type tag.
//!
//! The engine is purely functional: every operation is a function from
//! `(definition, input)` to a result or an instruction set, with no I/O and
//! no shared mutable state. Storage atomicity (full-replace pairs in one
//! transaction, append positions assigned under a lock) is the consuming
//! executor's responsibility.

pub mod registry;
pub mod update;
pub mod value;

pub use registry::{registry, ProcessorRegistry};
pub use update::{
    MultiValueUpdateProcessor, SingleValueUpdateProcessor, UpdateOperation, UpdateProcessor,
};
pub use value::{
    MinersValueProcessor, MultiSelectValueProcessor, RichTextValueProcessor, SelectValueProcessor,
    TextValueProcessor, UserValueProcessor, ValueProcessor,
};
