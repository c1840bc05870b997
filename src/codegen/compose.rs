//! Assembles one output file from an emission context.

use super::context::{EmissionContext, ImportKind, ModuleImports};

/// Marker prepended to the types file instead of self-imports: declarations
/// there may reference types declared later in the same file.
const FORWARD_REFERENCE_MARKER: &str = "/* eslint-disable no-use-before-define */\n";

fn compose_imports(imports: &[ModuleImports]) -> String {
    let statements: Vec<String> = imports
        .iter()
        .filter_map(|entry| {
            let first = entry.symbols.first()?;
            Some(match entry.kind {
                ImportKind::Default => format!("import {first} from '{}'", entry.module),
                ImportKind::Named => format!(
                    "import {{ {} }} from '{}'",
                    entry.symbols.join(", "),
                    entry.module
                ),
            })
        })
        .collect();
    if statements.is_empty() {
        return String::new();
    }
    format!("{}\n\n", statements.join("\n"))
}

/// Compose the final source text: external imports, internal imports (except
/// for the self-referential types file), then the fragments in registration
/// order separated by blank lines. No part of this depends on anything but
/// the context, so identical schemas compose to identical bytes.
pub fn compose_file(ctx: &EmissionContext, is_types_file: bool) -> String {
    let mut output = String::new();
    if is_types_file {
        output.push_str(FORWARD_REFERENCE_MARKER);
    }
    output.push_str(&compose_imports(ctx.external_imports()));
    if !is_types_file {
        output.push_str(&compose_imports(ctx.internal_imports()));
    }
    output.push_str(&ctx.fragments().join("\n"));
    output
}
