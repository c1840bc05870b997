//! Drives one generation run: schema document in, source files out.

use super::compose::compose_file;
use super::context::{ANCHOR_MODULE, EmissionContext, ImportKind, TYPES_MODULE, WEB3_MODULE};
use super::emit::{emit_account_parser, emit_composite, emit_instruction};
use crate::idl::{Idl, SchemaError};

const TYPES_FILE: &str = "types.ts";
const ACCOUNTS_FILE: &str = "state-accounts.ts";
const INSTRUCTIONS_FILE: &str = "instructions.ts";

/// One file produced by a generation run, named relative to the output
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

/// Binding type name derived from the program name: first letter upper-cased,
/// the rest lower-cased, suffixed `IDL` (`surf` becomes `SurfIDL`).
fn idl_type_name(program_name: &str) -> Result<String, SchemaError> {
    let mut chars = program_name.chars();
    let first = chars.next().ok_or(SchemaError::EmptyProgramName)?;
    Ok(format!(
        "{}{}IDL",
        first.to_uppercase(),
        chars.as_str().to_lowercase()
    ))
}

/// Generate the TypeScript binding files for an IDL document.
///
/// Files come back in a fixed order: composite types, account layouts with
/// their parsers, instruction builders, then the IDL passthrough module.
/// Categories with nothing to declare produce no file; the passthrough is
/// always present so the generated `Program<...>` type parameter resolves.
/// Output depends only on the document text, never on run state, so repeated
/// runs over the same document are byte-identical.
pub fn generate(idl_json: &str) -> Result<Vec<GeneratedFile>, SchemaError> {
    let idl = Idl::from_json(idl_json)?;
    let idl_type_name = idl_type_name(&idl.name)?;
    let idl_module = format!("./{}-idl.js", idl.name);

    let mut files = Vec::new();

    let mut types_ctx = EmissionContext::new();
    for type_def in &idl.types {
        let fragment = emit_composite(&mut types_ctx, &type_def.name, type_def.ty.members());
        types_ctx.push_fragment(fragment);
    }
    if !types_ctx.fragments().is_empty() {
        files.push(GeneratedFile {
            name: TYPES_FILE.to_string(),
            contents: compose_file(&types_ctx, true),
        });
    }

    let mut accounts_ctx = EmissionContext::new();
    // Seeded first so the web3 import stays ahead of the anchor one no matter
    // which account field first resolves a PublicKey.
    accounts_ctx.seed_external(WEB3_MODULE, ImportKind::Named);
    accounts_ctx.register_external(ANCHOR_MODULE, ImportKind::Named, "Program");
    accounts_ctx.seed_internal(TYPES_MODULE);
    accounts_ctx.register_internal(&idl_module, &idl_type_name);
    for account in &idl.accounts {
        let composite_name = format!("{}Account", account.name);
        let fragment = emit_composite(&mut accounts_ctx, &composite_name, &account.ty.fields);
        accounts_ctx.push_fragment(fragment);
        accounts_ctx.push_fragment(emit_account_parser(
            &account.name,
            &composite_name,
            &idl_type_name,
        ));
    }
    if !accounts_ctx.fragments().is_empty() {
        files.push(GeneratedFile {
            name: ACCOUNTS_FILE.to_string(),
            contents: compose_file(&accounts_ctx, false),
        });
    }

    let mut instructions_ctx = EmissionContext::new();
    // Accounts records type every member as PublicKey without going through
    // the resolver, so the symbol is registered up front.
    instructions_ctx.register_external(WEB3_MODULE, ImportKind::Named, "PublicKey");
    instructions_ctx.register_external(ANCHOR_MODULE, ImportKind::Named, "Program");
    instructions_ctx.seed_internal(TYPES_MODULE);
    instructions_ctx.register_internal(&idl_module, &idl_type_name);
    for instruction in &idl.instructions {
        let fragment = emit_instruction(&mut instructions_ctx, instruction, &idl_type_name);
        instructions_ctx.push_fragment(fragment);
    }
    if !instructions_ctx.fragments().is_empty() {
        files.push(GeneratedFile {
            name: INSTRUCTIONS_FILE.to_string(),
            contents: compose_file(&instructions_ctx, false),
        });
    }

    files.push(GeneratedFile {
        name: format!("{}-idl.ts", idl.name),
        contents: format!("export type {idl_type_name} = {idl_json}"),
    });

    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_idl_type_name_derivation() {
        assert_eq!(idl_type_name("surf").unwrap(), "SurfIDL");
        assert_eq!(idl_type_name("SURF").unwrap(), "SurfIDL");
        assert_eq!(idl_type_name("Whirlpool").unwrap(), "WhirlpoolIDL");
    }

    #[test]
    fn test_empty_program_name_is_rejected() {
        assert!(matches!(
            idl_type_name(""),
            Err(SchemaError::EmptyProgramName)
        ));
        let result = generate(r#"{"version": "0.1.0", "name": "", "instructions": []}"#);
        assert!(matches!(result, Err(SchemaError::EmptyProgramName)));
    }

    #[test]
    fn test_empty_document_produces_only_the_passthrough() {
        let idl_json = r#"{"version": "0.1.0", "name": "surf", "instructions": []}"#;
        let files = generate(idl_json).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "surf-idl.ts");
        assert_eq!(
            files[0].contents,
            format!("export type SurfIDL = {idl_json}")
        );
    }

    #[test]
    fn test_single_type_produces_the_types_file() {
        let idl_json = r#"{
            "version": "0.1.0",
            "name": "surf",
            "instructions": [],
            "types": [
                {
                    "name": "Fees",
                    "type": {
                        "kind": "struct",
                        "fields": [{ "name": "amount", "type": "u64" }]
                    }
                }
            ]
        }"#;
        let files = generate(idl_json).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "types.ts");
        assert_eq!(
            files[0].contents,
            "/* eslint-disable no-use-before-define */\n\
             import BN from 'bn.js'\n\
             \n\
             export type Fees = {\n\tamount: BN\n}\n"
        );
    }

    #[test]
    fn test_account_file_header_and_declarations() {
        let idl_json = r#"{
            "version": "0.1.0",
            "name": "surf",
            "instructions": [],
            "accounts": [
                {
                    "name": "AdminConfig",
                    "type": {
                        "kind": "struct",
                        "fields": [
                            { "name": "adminKey", "type": "publicKey" },
                            { "name": "bump", "type": "u8" }
                        ]
                    }
                }
            ]
        }"#;
        let files = generate(idl_json).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "state-accounts.ts");
        let contents = &files[0].contents;
        assert!(contents.starts_with(
            "import { PublicKey } from '@solana/web3.js'\n\
             import { Program } from '@coral-xyz/anchor'\n\
             \n\
             import { SurfIDL } from './surf-idl.js'\n\
             \n"
        ));
        assert!(contents.contains(
            "export type AdminConfigAccount = {\n\tadminKey: PublicKey\n\tbump: number\n}\n"
        ));
        assert!(contents.contains(
            "export const parseAdminConfigAccount = (program: Program<SurfIDL>, data: Buffer | null) => {"
        ));
    }

    #[test]
    fn test_account_without_key_fields_skips_the_web3_import() {
        let idl_json = r#"{
            "version": "0.1.0",
            "name": "surf",
            "instructions": [],
            "accounts": [
                {
                    "name": "Counter",
                    "type": {
                        "kind": "struct",
                        "fields": [{ "name": "count", "type": "u32" }]
                    }
                }
            ]
        }"#;
        let files = generate(idl_json).unwrap();
        assert!(
            files[0]
                .contents
                .starts_with("import { Program } from '@coral-xyz/anchor'\n")
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let idl_json = r#"{
            "version": "0.1.0",
            "name": "surf",
            "instructions": [
                {
                    "name": "collectFees",
                    "accounts": [{ "name": "payer", "isMut": true, "isSigner": true }],
                    "args": [{ "name": "amount", "type": "u64" }]
                }
            ]
        }"#;
        assert_eq!(generate(idl_json).unwrap(), generate(idl_json).unwrap());
    }
}
