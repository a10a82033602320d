//! # cdecl
//!
//! The declaration-modeling engine behind `cdecl`, the C/C++ gibberish
//! translator: a typed declaration tree, the composition algebra that
//! assembles it during parsing, a semantic checker gated on language
//! version, and the English/gibberish pretty-printers that render a
//! validated tree.
//!
//! This crate is the engine, not the CLI: it has no tokenizer, no
//! grammar, no config-file reader, and no terminal color output. A
//! grammar driver constructs nodes via [`ast::Arena`]'s `new_*_node`
//! methods, assembles them with [`compose`] and [`patch`], validates the
//! result with [`check::check`], and renders it with
//! [`render::english::render_english`] or
//! [`render::gibberish::render_gibberish`] — all against one
//! [`session::Session`] that bundles the language version, option flags,
//! and the typedef registry.
//!
//! ```
//! use cdecl::ast::Arena;
//! use cdecl::diagnostic::SourceSpan;
//! use cdecl::lang::LangVersion;
//! use cdecl::session::Session;
//! use cdecl::types::TypeBits;
//!
//! let mut arena = Arena::new();
//! let ptr = arena.new_pointer(SourceSpan::default(), 0);
//! let int_leaf = arena.new_builtin(TypeBits::INT, SourceSpan::default(), 0);
//! arena.set_parent(int_leaf, ptr);
//!
//! let session = Session::new(LangVersion::C17);
//! assert!(cdecl::check::check(&arena, ptr, session.lang).is_empty());
//!
//! let mut out = String::new();
//! cdecl::render::gibberish::render_gibberish(&session, &arena, ptr, Some("x"), &mut out).unwrap();
//! assert_eq!(out, "int *x");
//! ```

pub mod ast;
pub mod check;
pub mod compose;
pub mod diagnostic;
pub mod dump;
pub mod error;
pub mod lang;
pub mod patch;
pub mod render;
pub mod session;
pub mod sname;
pub mod typedef;
pub mod types;

pub use error::{CdeclError, Result};
