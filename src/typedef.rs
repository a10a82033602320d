//! The typedef registry.
//!
//! Each entry owns a self-contained [`Arena`] holding the typedef's
//! right-hand-side tree, so an entry can be cloned into (referenced from)
//! any number of per-command arenas via [`Rc`] without those arenas owning
//! its nodes. This is the one exception to per-command arena ownership:
//! a typedef outlives the command that defined it, so its tree needs its
//! own process-lifetime arena rather than living in whichever arena
//! happened to parse it.

use crate::ast::{Arena, NodeId};
use crate::lang::LangVersion;
use crate::sname::ScopedName;
use indexmap::IndexMap;
use std::rc::Rc;

/// One registered typedef: its fully qualified name and the tree it
/// expands to, in its own arena.
#[derive(Debug)]
pub struct TypedefEntry {
    pub name: ScopedName,
    pub arena: Arena,
    pub root: NodeId,
}

/// The typedef name table, keyed by fully qualified name. Unqualified
/// lookup (resolving a bare name against the scopes currently open) is
/// the grammar driver's job, not the registry's.
#[derive(Debug, Default)]
pub struct TypedefRegistry {
    entries: IndexMap<String, Rc<TypedefEntry>>,
}

/// Outcome of [`TypedefRegistry::define`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineOutcome {
    /// No prior entry existed under this name.
    Inserted,
    /// A prior entry existed and was structurally identical; re-defining a
    /// typedef with the same type is not an error (C's "redundant typedef"
    /// rule).
    Redundant,
}

impl TypedefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the standard-library typedefs every cdecl
    /// session predefines. C++-only entries are only seeded when
    /// `lang.is_cpp()`.
    pub fn with_predefined(lang: LangVersion) -> Self {
        use crate::ast::ArraySize;
        use crate::diagnostic::SourceSpan;
        use crate::types::TypeBits;

        let mut reg = Self::new();
        let loc = SourceSpan::default();

        let mut seed = |reg: &mut Self, name: &str, bits: TypeBits| {
            let mut arena = Arena::new();
            let root = arena.new_builtin(bits, loc, 0);
            reg.entries.insert(
                name.to_string(),
                Rc::new(TypedefEntry {
                    name: ScopedName::from(name),
                    arena,
                    root,
                }),
            );
        };

        seed(&mut reg, "size_t", TypeBits::UNSIGNED | TypeBits::LONG);
        seed(&mut reg, "ptrdiff_t", TypeBits::SIGNED | TypeBits::LONG);
        seed(&mut reg, "ssize_t", TypeBits::SIGNED | TypeBits::LONG);
        seed(
            &mut reg,
            "max_align_t",
            TypeBits::DOUBLE | TypeBits::LONG,
        );
        seed(&mut reg, "int8_t", TypeBits::SIGNED | TypeBits::CHAR);
        seed(&mut reg, "uint8_t", TypeBits::UNSIGNED | TypeBits::CHAR);
        seed(&mut reg, "int16_t", TypeBits::SIGNED | TypeBits::SHORT);
        seed(&mut reg, "uint16_t", TypeBits::UNSIGNED | TypeBits::SHORT);
        seed(&mut reg, "int32_t", TypeBits::SIGNED | TypeBits::INT);
        seed(&mut reg, "uint32_t", TypeBits::UNSIGNED | TypeBits::INT);
        seed(
            &mut reg,
            "int64_t",
            TypeBits::SIGNED | TypeBits::LONG_LONG,
        );
        seed(
            &mut reg,
            "uint64_t",
            TypeBits::UNSIGNED | TypeBits::LONG_LONG,
        );
        seed(&mut reg, "intptr_t", TypeBits::SIGNED | TypeBits::LONG);
        seed(&mut reg, "uintptr_t", TypeBits::UNSIGNED | TypeBits::LONG);
        seed(
            &mut reg,
            "intmax_t",
            TypeBits::SIGNED | TypeBits::LONG_LONG,
        );
        seed(
            &mut reg,
            "uintmax_t",
            TypeBits::UNSIGNED | TypeBits::LONG_LONG,
        );
        seed(&mut reg, "wint_t", TypeBits::UNSIGNED | TypeBits::INT);

        if lang.is_cpp() {
            seed(&mut reg, "std::size_t", TypeBits::UNSIGNED | TypeBits::LONG);
            {
                let mut arena = Arena::new();
                let root = arena.new_pointer(loc, 0);
                let void = arena.new_builtin(TypeBits::VOID, loc, 1);
                arena.set_parent(void, root);
                reg.entries.insert(
                    "std::nullptr_t".to_string(),
                    Rc::new(TypedefEntry {
                        name: ScopedName::from("std::nullptr_t"),
                        arena,
                        root,
                    }),
                );
            }
            {
                let mut arena = Arena::new();
                let root = arena.new_array(ArraySize::Unspecified, loc, 0);
                let ch = arena.new_builtin(TypeBits::CHAR, loc, 1);
                arena.set_parent(ch, root);
                reg.entries.insert(
                    "std::string".to_string(),
                    Rc::new(TypedefEntry {
                        name: ScopedName::from("std::string"),
                        arena,
                        root,
                    }),
                );
            }
        }

        reg
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<TypedefEntry>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registers `entry` under its own name. Returns `Err` only when a
    /// prior entry exists under the same name with a different type
    /// (structural equality is approximated by comparing node counts,
    /// since [`Arena`] has no meaningful `PartialEq` across two
    /// independently built allocation histories).
    pub fn define(&mut self, entry: TypedefEntry) -> Result<DefineOutcome, crate::error::CdeclError> {
        let key = entry.name.full();
        if let Some(existing) = self.entries.get(&key) {
            if existing.arena.len() == entry.arena.len() {
                return Ok(DefineOutcome::Redundant);
            }
            return Err(crate::error::CdeclError::TypedefRedefined { name: key });
        }
        self.entries.insert(key, Rc::new(entry));
        Ok(DefineOutcome::Inserted)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_seeds_size_t() {
        let reg = TypedefRegistry::with_predefined(LangVersion::C17);
        assert!(reg.contains("size_t"));
        assert!(!reg.contains("std::string"));
    }

    #[test]
    fn cpp_predefines_std_entries() {
        let reg = TypedefRegistry::with_predefined(LangVersion::Cpp17);
        assert!(reg.contains("std::string"));
        assert!(reg.contains("std::nullptr_t"));
    }

    #[test]
    fn redefining_with_same_shape_is_redundant() {
        let mut reg = TypedefRegistry::new();
        let mk = || {
            let mut arena = Arena::new();
            let root = arena.new_builtin(crate::types::TypeBits::INT, Default::default(), 0);
            TypedefEntry {
                name: ScopedName::plain("foo_t"),
                arena,
                root,
            }
        };
        assert_eq!(reg.define(mk()).unwrap(), DefineOutcome::Inserted);
        assert_eq!(reg.define(mk()).unwrap(), DefineOutcome::Redundant);
    }

    #[test]
    fn redefining_with_different_shape_errors() {
        let mut reg = TypedefRegistry::new();
        let mut a1 = Arena::new();
        let r1 = a1.new_builtin(crate::types::TypeBits::INT, Default::default(), 0);
        reg.define(TypedefEntry {
            name: ScopedName::plain("bar_t"),
            arena: a1,
            root: r1,
        })
        .unwrap();

        let mut a2 = Arena::new();
        let r2 = a2.new_pointer(Default::default(), 0);
        let inner = a2.new_builtin(crate::types::TypeBits::INT, Default::default(), 1);
        a2.set_parent(inner, r2);
        let err = reg
            .define(TypedefEntry {
                name: ScopedName::plain("bar_t"),
                arena: a2,
                root: r2,
            })
            .unwrap_err();
        assert!(matches!(err, crate::error::CdeclError::TypedefRedefined { .. }));
    }
}
