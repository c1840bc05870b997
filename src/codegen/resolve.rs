//! Maps schema field types to their TypeScript renderings.
//!
//! Resolution is total over the closed [`IdlType`] set; malformed shapes
//! cannot reach this layer because the schema model rejects them at parse
//! time. Renderings that need an import register it on the emission context,
//! where duplicate registrations collapse.

use super::context::{BIGNUM_MODULE, EmissionContext, ImportKind, TYPES_MODULE, WEB3_MODULE};
use crate::idl::{IdlField, IdlType};

/// Largest integer width rendered as a plain JavaScript number. Anything
/// wider can exceed the 53-bit float mantissa and goes through the bignum
/// type instead.
const NATIVE_NUMBER_MAX_BITS: u16 = 32;

/// Resolve a field type to the TypeScript source text naming it.
pub fn resolve_type(ctx: &mut EmissionContext, ty: &IdlType) -> String {
    match ty {
        IdlType::Bool => "boolean".to_string(),
        IdlType::Bytes => "Uint8Array".to_string(),
        IdlType::Str => "string".to_string(),
        IdlType::PublicKey => {
            ctx.register_external(WEB3_MODULE, ImportKind::Named, "PublicKey");
            "PublicKey".to_string()
        }
        IdlType::Int { width, .. } if *width <= NATIVE_NUMBER_MAX_BITS => "number".to_string(),
        IdlType::Int { .. } => {
            ctx.register_external(BIGNUM_MODULE, ImportKind::Default, "BN");
            "BN".to_string()
        }
        IdlType::Defined(name) => {
            ctx.register_internal(TYPES_MODULE, name);
            name.clone()
        }
        IdlType::Vec(elem) | IdlType::Array(elem, _) => {
            let elem = resolve_type(ctx, elem);
            // Parenthesize unions so the list suffix binds to the whole type.
            if elem.contains(" | ") {
                format!("({elem})[]")
            } else {
                format!("{elem}[]")
            }
        }
        IdlType::Option(elem) | IdlType::COption(elem) => {
            format!("{} | null", resolve_type(ctx, elem))
        }
    }
}

/// Resolve a field, covering the absent-type case used by zero-payload enum
/// variants.
pub fn resolve_field_type(ctx: &mut EmissionContext, field: &IdlField) -> String {
    match &field.ty {
        Some(ty) => resolve_type(ctx, ty),
        None => "Record<string, never>".to_string(),
    }
}
