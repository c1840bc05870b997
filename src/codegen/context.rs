//! Per-category emission state: import tables and emitted fragments.

/// Module specifier of the web3 package the generated files import from.
pub const WEB3_MODULE: &str = "@solana/web3.js";
/// Module specifier of the anchor client package.
pub const ANCHOR_MODULE: &str = "@coral-xyz/anchor";
/// Module specifier of the bignum package; imported as a default export.
pub const BIGNUM_MODULE: &str = "bn.js";
/// Internal module the defined-type imports point at.
pub const TYPES_MODULE: &str = "./types.js";

/// How a module's symbols are imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import { a, b } from 'm'`
    Named,
    /// `import a from 'm'` — a single default-export symbol.
    Default,
}

/// Symbols one module contributes to a file's import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImports {
    pub module: String,
    pub kind: ImportKind,
    pub symbols: Vec<String>,
}

/// State accumulated while emitting one output category.
///
/// Owned by a single generation run: the resolver and emitters register
/// imports and push fragments, the composer consumes the result exactly once.
/// Both import tables preserve insertion order and deduplicate symbols, so
/// output is stable for a given schema.
#[derive(Debug, Default)]
pub struct EmissionContext {
    external: Vec<ModuleImports>,
    internal: Vec<ModuleImports>,
    fragments: Vec<String>,
}

impl EmissionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create an external entry so the import block keeps a fixed module
    /// order no matter which field registers a symbol first. Entries that
    /// stay empty are dropped at composition.
    pub fn seed_external(&mut self, module: &str, kind: ImportKind) {
        if !self.external.iter().any(|entry| entry.module == module) {
            self.external.push(ModuleImports {
                module: module.to_string(),
                kind,
                symbols: Vec::new(),
            });
        }
    }

    /// Internal-table counterpart of [`Self::seed_external`].
    pub fn seed_internal(&mut self, module: &str) {
        if !self.internal.iter().any(|entry| entry.module == module) {
            self.internal.push(ModuleImports {
                module: module.to_string(),
                kind: ImportKind::Named,
                symbols: Vec::new(),
            });
        }
    }

    /// Record that the emitted code needs `symbol` from an external module.
    /// Registering the same symbol twice keeps a single entry. The kind of
    /// an already-present module is left untouched.
    pub fn register_external(&mut self, module: &str, kind: ImportKind, symbol: &str) {
        Self::register(&mut self.external, module, kind, symbol);
    }

    /// Record a symbol from an internal (sibling-file) module.
    pub fn register_internal(&mut self, module: &str, symbol: &str) {
        Self::register(&mut self.internal, module, ImportKind::Named, symbol);
    }

    fn register(table: &mut Vec<ModuleImports>, module: &str, kind: ImportKind, symbol: &str) {
        let index = match table.iter().position(|entry| entry.module == module) {
            Some(index) => index,
            None => {
                table.push(ModuleImports {
                    module: module.to_string(),
                    kind,
                    symbols: Vec::new(),
                });
                table.len() - 1
            }
        };
        let entry = &mut table[index];
        if !entry.symbols.iter().any(|existing| existing == symbol) {
            entry.symbols.push(symbol.to_string());
        }
    }

    /// Append an emitted source fragment in declaration order.
    pub fn push_fragment(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    pub fn external_imports(&self) -> &[ModuleImports] {
        &self.external
    }

    pub fn internal_imports(&self) -> &[ModuleImports] {
        &self.internal
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}
