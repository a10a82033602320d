//! The ambient per-invocation state every public entry point takes
//! explicitly: no global mutable state, the language version, option
//! flags, and typedef registry are bundled into a `Session` value
//! threaded through every call. There is exactly one of these per running
//! `cdecl` instance (or per test), constructed once and passed by shared
//! reference into composition, checking and rendering.

use crate::lang::LangVersion;
use crate::typedef::TypedefRegistry;

/// Renderer/checker-visible option flags, each corresponding to one of the
/// `--east-const`/`--explicit-int`/`--alt-tokens`/`--digraphs`/`--trigraphs`
/// CLI switches — the switches themselves are the external front-end's
/// concern, but the flags they set are real inputs to this crate's
/// checker and gibberish renderer, not CLI-only decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Render `const`/`volatile` after the base type (`int const`) rather
    /// than before it (`const int`).
    pub east_const: bool,
    /// Always render `int` explicitly even when implied by a modifier
    /// (`unsigned int` rather than bare `unsigned`).
    pub explicit_int: bool,
    /// Render operators using alternative tokens (`and` for `&&`, etc.).
    pub alt_tokens: bool,
    /// Render using digraphs (`<:` for `[`, etc.) where applicable.
    pub digraphs: bool,
    /// Accept (and, where relevant, render) trigraphs.
    pub trigraphs: bool,
}

/// Bundles everything composition, checking, and rendering need to know
/// about the current session besides the tree itself.
#[derive(Debug)]
pub struct Session {
    pub lang: LangVersion,
    pub options: Options,
    pub typedefs: TypedefRegistry,
}

impl Session {
    pub fn new(lang: LangVersion) -> Self {
        Self {
            lang,
            options: Options::default(),
            typedefs: TypedefRegistry::with_predefined(lang),
        }
    }

    pub fn with_options(lang: LangVersion, options: Options) -> Self {
        Self {
            lang,
            options,
            typedefs: TypedefRegistry::with_predefined(lang),
        }
    }
}
