//! In-memory model of the program's IDL document.

mod spec;

pub use spec::{
    Idl, IdlErrorDef, IdlField, IdlInstruction, IdlInstructionAccount, IdlType, IdlTypeDef,
    IdlTypeKind, IdlTypeSpec, SchemaError,
};
