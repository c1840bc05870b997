//! TypeScript binding generation for the program IDL.
//!
//! The pipeline mirrors the shape of the IDL document: one emission context
//! per output file accumulates import requirements and source fragments while
//! the emitters walk the schema, then the composer turns each context into
//! final text. Every stage is a pure transform, so a given document always
//! generates byte-identical files.

mod compose;
mod context;
mod emit;
mod emitter;
mod resolve;
mod utils;

pub use emitter::{GeneratedFile, generate};
