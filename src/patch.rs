//! Patching the base type into a declarator's placeholder leaf.
//!
//! By the time the grammar has parsed `int *x`, it holds two separate
//! subtrees: the base type (`int`) and the declarator (`*x`, whose leaf is
//! a [`Kind::Placeholder`] waiting for a type). `patch` grafts the first
//! onto the second. The depth comparison below is strict (`<`, not `<=`):
//! see `DESIGN.md` for why equal depth is treated as the already-fine
//! steady state rather than another case to splice.

use crate::ast::visit::{find_kind, take_name, Direction, KindMask};
use crate::ast::{Arena, Kind, NodeId};

/// Splices `type_ast` in as the base type of `decl_ast`'s placeholder leaf,
/// or, when `type_ast` turns out to be the deeper (or equally deep) of the
/// two, discards `decl_ast`'s placeholder and returns `type_ast` instead.
///
/// Only considers splicing at all when `type_ast` is still a root (no
/// parent of its own) and `decl_ast` actually has a placeholder leaf to
/// receive it. Within that gate, the two subtrees' parenthesization depths
/// decide which one ends up as the root: `type.depth < decl.depth` grafts
/// `type_ast` under the placeholder and returns `decl_ast`; `type.depth >=
/// decl.depth` means `type_ast` was never shallower than the declarator
/// it's patching into, so `type_ast` itself becomes the result and the
/// placeholder is simply abandoned. Whichever node ends up as the result,
/// if it has no name of its own the other side's name is transferred onto
/// it, so a name attached to either subtree survives the patch.
pub fn patch(arena: &mut Arena, type_ast: NodeId, decl_ast: Option<NodeId>) -> NodeId {
    let Some(decl_ast) = decl_ast else {
        return type_ast;
    };

    let type_has_parent = arena.get(type_ast).parent().is_some();

    if !type_has_parent {
        if let Some(placeholder) = find_kind(
            arena,
            decl_ast,
            Direction::Down,
            KindMask::of(&Kind::Placeholder),
        ) {
            let type_depth = arena.get(type_ast).depth;
            let decl_depth = arena.get(decl_ast).depth;

            if type_depth >= decl_depth {
                if arena.get(type_ast).sname.is_empty() {
                    let name = take_name(arena, decl_ast);
                    arena.get_mut(type_ast).sname = name;
                }
                return type_ast;
            }

            let placeholder_parent = arena.get(placeholder).parent();
            let type_root = root_of(arena, type_ast);
            arena.set_parent_opt(type_root, placeholder_parent);
        }
    }

    if arena.get(decl_ast).sname.is_empty() {
        let name = take_name(arena, type_ast);
        arena.get_mut(decl_ast).sname = name;
    }

    decl_ast
}

/// Walks to the root of the chain containing `n`, following `parent` links.
fn root_of(arena: &Arena, n: NodeId) -> NodeId {
    let mut cur = n;
    while let Some(parent) = arena.get(cur).parent() {
        cur = parent;
    }
    cur
}
