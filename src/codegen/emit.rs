//! Text builders for the generated TypeScript declarations.
//!
//! Every builder is a pure transform from a schema node (plus the shared
//! context for import side effects) to source text. The output uses tab
//! indentation and no trailing semicolons, matching the SDK's lint setup;
//! byte stability of this text is what makes regeneration diffable.

use super::context::EmissionContext;
use super::resolve::resolve_field_type;
use super::utils::capitalize_first;
use crate::idl::{IdlField, IdlInstruction};

/// Section separator between declarations of one file.
pub fn separator(name: &str) -> String {
    format!("// ----------\n// {name}\n// ----------\n")
}

/// Emit a structural record type, one property per field in declaration
/// order. Order is significant: it mirrors the schema, not an alphabet.
pub fn emit_composite(ctx: &mut EmissionContext, name: &str, fields: &[IdlField]) -> String {
    let props: Vec<String> = fields
        .iter()
        .map(|field| format!("{}: {}", field.name, resolve_field_type(ctx, field)))
        .collect();
    format!("export type {name} = {{\n\t{}\n}}\n", props.join("\n\t"))
}

/// Emit the guarded decode function for one account.
///
/// The generated parser keeps the historical contract: absent data and
/// failed decodes both surface as `null`, with failures logged. The Rust
/// decode layer in [`crate::state`] is the strict counterpart.
pub fn emit_account_parser(account_name: &str, type_name: &str, idl_type_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "export const parse{type_name} = (program: Program<{idl_type_name}>, data: Buffer | null) => {{\n"
    ));
    out.push_str("\tif (!data) {\n");
    out.push_str("\t\treturn null\n");
    out.push_str("\t}\n");
    out.push_str("\ttry {\n");
    out.push_str(&format!(
        "\t\treturn program.coder.accounts.decode('{account_name}', data) as {type_name}\n"
    ));
    out.push_str("\t} catch {\n");
    out.push_str(&format!(
        "\t\tconsole.error('Account {account_name} could not be parsed')\n"
    ));
    out.push_str("\t\treturn null\n");
    out.push_str("\t}\n");
    out.push_str("}\n");
    out
}

/// Emit the full bundle for one instruction: the accounts record (when the
/// instruction touches accounts), the args record (when it takes arguments),
/// the combined params record, and the builder function.
///
/// The builder passes arguments positionally in schema order; the on-chain
/// program binds them by position, so reordering here is a correctness bug.
pub fn emit_instruction(
    ctx: &mut EmissionContext,
    instruction: &IdlInstruction,
    idl_type_name: &str,
) -> String {
    let capitalized = capitalize_first(&instruction.name);
    let accounts_type_name = format!("{capitalized}IxAccounts");
    let args_type_name = format!("{capitalized}IxArgs");
    let params_type_name = format!("{capitalized}IxParams");
    let has_accounts = !instruction.accounts.is_empty();
    let has_args = !instruction.args.is_empty();

    let mut out = separator(&instruction.name);

    if has_accounts {
        out.push_str(&format!("\nexport type {accounts_type_name} = {{\n"));
        for account in &instruction.accounts {
            out.push_str(&format!("\t{}: PublicKey\n", account.name));
        }
        out.push_str("}\n");
    }

    if has_args {
        out.push_str(&format!("\nexport type {args_type_name} = {{\n"));
        for arg in &instruction.args {
            out.push_str(&format!(
                "\t{}: {}\n",
                arg.name,
                resolve_field_type(ctx, arg)
            ));
        }
        out.push_str("}\n");
    }

    if has_accounts || has_args {
        out.push_str(&format!("\nexport type {params_type_name} = {{\n"));
        if has_accounts {
            out.push_str(&format!("\taccounts: {accounts_type_name}\n"));
        }
        if has_args {
            out.push_str(&format!("\targs: {args_type_name}\n"));
        }
        out.push_str("}\n");
    }

    let params = match (has_accounts, has_args) {
        (true, true) => format!(", {{ accounts, args }}: {params_type_name}"),
        (true, false) => format!(", {{ accounts }}: {params_type_name}"),
        (false, true) => format!(", {{ args }}: {params_type_name}"),
        (false, false) => String::new(),
    };
    out.push_str(&format!(
        "\nexport const build{capitalized}Ix = async (program: Program<{idl_type_name}>{params}) => {{\n"
    ));
    out.push_str(&format!(
        "\tconst ix = await program.methods\n\t\t.{}(",
        instruction.name
    ));
    if has_args {
        out.push('\n');
        for arg in &instruction.args {
            out.push_str(&format!("\t\t\targs.{},\n", arg.name));
        }
        out.push_str("\t\t");
    }
    out.push_str(")\n");
    if has_accounts {
        out.push_str("\t\t.accountsStrict(accounts)\n");
    }
    out.push_str("\t\t.instruction()\n");
    out.push_str("\treturn ix\n");
    out.push_str("}\n");
    out
}
