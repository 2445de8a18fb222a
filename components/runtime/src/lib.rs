//! Runtime - values, scopes, objects and built-ins of the script engine
//!
//! This component provides:
//! - Value kinds, payloads and handles rooted in lexical scopes
//! - One stateless type descriptor per kind for conversions and operators
//! - The [`Context`]: factories, property access, calls and construction
//! - Prototype-based objects, arrays, integrity levels and private fields
//! - Script, native and generator functions behind an [`Evaluator`] boundary
//! - The built-in constructor bootstrap
//!
//! # Examples
//!
//! ```
//! use runtime::{Context, ContextConfig, Intrinsic, ValueKind};
//!
//! let mut ctx = Context::new(ContextConfig::default()).unwrap();
//!
//! let number = ctx.get_intrinsic(Intrinsic::Number).unwrap();
//! let five = ctx.create_number(5.0);
//! let boxed = ctx.construct(number, &[five]).unwrap();
//! assert_eq!(ctx.kind(boxed), ValueKind::Object);
//!
//! let sum = ctx.add(boxed, five).unwrap();
//! assert_eq!(ctx.to_string(sum).unwrap(), "10");
//!
//! let square = ctx
//!     .create_native_function("square", |ctx, _this, args| ctx.mul(args[0], args[0]))
//!     .unwrap();
//! let undefined = ctx.create_undefined();
//! let result = ctx.call(square, undefined, &[five]).unwrap();
//! assert_eq!(ctx.as_f64(result), Some(25.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod builtins;
pub mod call_frame;
pub mod callable;
pub mod config;
mod context;
pub mod error;
pub mod evaluator;
pub mod number;
pub mod object;
pub mod payload;
pub mod scope;
pub mod types;
pub mod value;

pub use builtins::Intrinsic;
pub use call_frame::CallStack;
pub use callable::{Callable, GeneratorState, JsFunction, JsGenerator, NativeFn, NativeFunction};
pub use config::ContextConfig;
pub use context::{Context, GeneratorResume};
pub use error::{Exception, JsResult, RuntimeError};
pub use evaluator::{Completion, EvalFrame, Evaluator, ProgramId, Resume};
pub use object::{PropertyDescriptor, PropertyKey, SymbolId};
pub use payload::{ExceptionRecord, Payload};
pub use scope::{Scope, ScopeId};
pub use types::{descriptor, BinaryOp, Relation, TypeDescriptor, UnaryOp};
pub use value::{Value, ValueKind};
