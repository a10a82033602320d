//! The composition algebra.
//!
//! The grammar builds a declarator bottom-up, one production at a time;
//! these functions are where two partially-built subtrees get spliced
//! together. The `depth` attribute (parenthesization nesting, set once
//! at node creation and never recomputed) is what lets these functions
//! tell `int *a[3]` (array of pointer, depth 0 throughout) apart from
//! `int (*a)[3]` (pointer to array, the parenthesized pointer at depth 1).

use crate::ast::visit::{find_kind, take_name, take_storage, Direction, KindMask};
use crate::ast::{Arena, Kind, NodeId};
use tracing::trace;

/// Splices `array` into the declarator chain rooted at `ast`, returning
/// the node that is now the production's result (which may be `array`
/// itself, may still be `ast`, or may be `ast`'s former parent, depending
/// on where in the chain `array` needed to land).
///
/// `ast` is `None` the first time a production calls this (an empty
/// declarator so far); `array.kind` must already be [`Kind::Array`] with
/// an unfilled `of` slot.
pub fn add_array(arena: &mut Arena, ast: Option<NodeId>, array: NodeId) -> NodeId {
    debug_assert!(matches!(arena.get(array).kind, Kind::Array { .. }));
    let rv = add_array_impl(arena, ast, array);
    let of = match &arena.get(array).kind {
        Kind::Array { of, .. } => *of,
        _ => unreachable!(),
    };
    if let Some(of) = of {
        let storage = take_storage(arena, of);
        arena.get_mut(array).ty |= storage;
    }
    rv
}

fn add_array_impl(arena: &mut Arena, ast: Option<NodeId>, array: NodeId) -> NodeId {
    let ast = match ast {
        None => {
            trace!(?array, "add_array: null ast, array becomes the root");
            return array;
        }
        Some(ast) => ast,
    };
    let array_depth = arena.get(array).depth;
    let ast_depth = arena.get(ast).depth;
    let ast_parent = arena.get(ast).parent();

    match &arena.get(ast).kind {
        Kind::Array { .. } => {
            trace!(?ast, ?array, "add_array: chaining onto an existing array");
            append_array(arena, ast, array)
        }

        Kind::Placeholder => {
            trace!(?ast, ?array, "add_array: splicing array in at the placeholder");
            arena.set_parent_opt(array, ast_parent);
            arena.set_parent(ast, array);
            ast_parent.unwrap_or(array)
        }

        Kind::Pointer { .. } if ast_depth > array_depth => {
            trace!(?ast, ?array, "add_array: pointer is deeper, falling through it");
            let to = match &arena.get(ast).kind {
                Kind::Pointer { to } => *to,
                _ => unreachable!(),
            };
            if let Some(to) = to {
                add_array_impl(arena, Some(to), array);
            }
            ast
        }

        _ if ast_depth > array_depth => {
            trace!(?ast, ?array, "add_array: inserting array below ast");
            if arena.get(ast).kind.is_parent() {
                if let Some(child) = arena.get(ast).kind.spine_slot() {
                    arena.set_parent(child, array);
                }
            }
            arena.set_parent(array, ast);
            ast
        }

        _ => {
            trace!(?ast, ?array, "add_array: inserting array above ast");
            if let Some(parent) = ast_parent {
                if arena.get(parent).kind.is_parent() {
                    arena.set_parent(array, parent);
                }
            }
            arena.set_parent(ast, array);
            array
        }
    }
}

/// If `ast` is not an array, makes `array` an array of `ast`. If `ast` is
/// an array (possibly with intervening pointers, e.g. `array 3 of pointer
/// to array 5 of int`), appends `array` to the end of the array chain.
fn append_array(arena: &mut Arena, ast: NodeId, array: NodeId) -> NodeId {
    let array_depth = arena.get(array).depth;
    let ast_depth = arena.get(ast).depth;

    let recurse_through = match &arena.get(ast).kind {
        Kind::Pointer { to } => {
            if array_depth >= ast_depth {
                None
            } else {
                *to
            }
        }
        Kind::Array { of, .. } => *of,
        _ => None,
    };

    if let Some(child) = recurse_through {
        let temp = append_array(arena, child, array);
        arena.set_parent(temp, ast);
        return ast;
    }

    debug_assert!(matches!(arena.get(array).kind, Kind::Array { .. }));
    arena.set_parent(ast, array);
    array
}

/// Splices `func` (a [`Kind::Function`] or [`Kind::Block`] with an unfilled
/// return-type slot) into the declarator chain rooted at `ast`, where
/// `ret_type_ast` is the node the grammar has tentatively been treating as
/// the return type up to this point.
pub fn add_function(
    arena: &mut Arena,
    ast: NodeId,
    ret_type_ast: NodeId,
    func: NodeId,
) -> NodeId {
    debug_assert!(matches!(
        arena.get(func).kind,
        Kind::Block { .. } | Kind::Function { .. }
    ));
    let rv = add_function_impl(arena, ast, ret_type_ast, func);
    if arena.get(func).sname.is_empty() {
        let name = take_name(arena, ast);
        arena.get_mut(func).sname = name;
    }
    let ret = match &arena.get(func).kind {
        Kind::Block { ret, .. } | Kind::Function { ret, .. } => *ret,
        _ => unreachable!(),
    };
    if let Some(ret) = ret {
        let storage = take_storage(arena, ret);
        arena.get_mut(func).ty |= storage;
    }
    rv
}

fn add_function_impl(
    arena: &mut Arena,
    ast: NodeId,
    ret_type_ast: NodeId,
    func: NodeId,
) -> NodeId {
    let to = match &arena.get(ast).kind {
        Kind::Array { of, .. } => *of,
        Kind::Pointer { to }
        | Kind::PointerToMember { to, .. }
        | Kind::Reference { to }
        | Kind::RValueReference { to } => *to,
        _ => None,
    };

    let is_ptr_ref_like = matches!(
        arena.get(ast).kind,
        Kind::Array { .. }
            | Kind::Pointer { .. }
            | Kind::PointerToMember { .. }
            | Kind::Reference { .. }
            | Kind::RValueReference { .. }
    );

    if is_ptr_ref_like {
        match to {
            Some(to_node)
                if matches!(
                    arena.get(to_node).kind,
                    Kind::Array { .. }
                        | Kind::Pointer { .. }
                        | Kind::PointerToMember { .. }
                        | Kind::Reference { .. }
                        | Kind::RValueReference { .. }
                ) =>
            {
                trace!(?ast, ?to_node, "add_function: pointer depth fall-through");
                add_function_impl(arena, to_node, ret_type_ast, func);
                return ast;
            }
            Some(to_node) if matches!(arena.get(to_node).kind, Kind::Placeholder) => {
                if ret_type_ast != ast {
                    trace!(?ast, ?func, "add_function: insert-below the placeholder");
                    arena.set_parent(func, ast);
                    arena.set_parent(ret_type_ast, func);
                    return ast;
                }
                // ret_type_ast == ast: falls through to the bottom case.
            }
            Some(to_node) if matches!(arena.get(to_node).kind, Kind::Block { .. }) => {
                trace!(?ast, ?func, "add_function: insert-below an existing block");
                arena.set_parent(ret_type_ast, func);
                return ast;
            }
            _ => {}
        }
    }

    trace!(?ast, ?func, "add_function: insert-above, func becomes the root");
    arena.set_parent(ret_type_ast, func);
    func
}

/// Finds `ast`'s builtin leaf by searching down its spine, used by callers
/// outside [`add_array`]/[`add_function`] that need the same "steal the
/// storage class" move explicitly (e.g. `declare f as static function...`).
pub fn steal_builtin_storage(arena: &mut Arena, ast: NodeId) -> crate::types::TypeBits {
    if let Some(found) = find_kind(arena, ast, Direction::Down, KindMask::of(&Kind::Builtin)) {
        take_storage(arena, found)
    } else {
        crate::types::TypeBits::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::SourceSpan;
    use crate::types::TypeBits;

    fn loc() -> SourceSpan {
        SourceSpan::default()
    }

    /// `int a[3]`: plain placeholder becomes array of int.
    #[test]
    fn add_array_to_placeholder() {
        let mut a = Arena::new();
        let ph = a.new_placeholder(loc(), 0);
        let arr = a.new_array(crate::ast::ArraySize::Fixed(3), loc(), 0);
        let rv = add_array(&mut a, Some(ph), arr);
        assert_eq!(rv, arr);
        assert_eq!(a.get(arr).kind.spine_slot(), Some(ph));
    }

    /// `int a[3][5]`: two arrays of equal depth append into one chain.
    #[test]
    fn append_array_chains_equal_depth_arrays() {
        let mut a = Arena::new();
        let ph = a.new_placeholder(loc(), 0);
        let arr3 = a.new_array(crate::ast::ArraySize::Fixed(3), loc(), 0);
        let rv1 = add_array(&mut a, Some(ph), arr3);
        assert_eq!(rv1, arr3);

        let arr5 = a.new_array(crate::ast::ArraySize::Fixed(5), loc(), 0);
        let rv2 = add_array(&mut a, Some(rv1), arr5);
        assert_eq!(rv2, arr3);
        assert_eq!(a.get(arr3).kind.spine_slot(), Some(arr5));
        assert_eq!(a.get(arr5).kind.spine_slot(), Some(ph));
    }

    /// `int (*x)[5]`: pointer at a deeper parenthesization level than the
    /// array recurses through instead of wrapping.
    #[test]
    fn add_array_recurses_through_deeper_pointer() {
        let mut a = Arena::new();
        // (*x) is depth 1, parenthesized; the array subscript is depth 0.
        let ph = a.new_placeholder(loc(), 1);
        let ptr = a.new_pointer(loc(), 1);
        a.set_parent(ph, ptr);

        let arr = a.new_array(crate::ast::ArraySize::Fixed(5), loc(), 0);
        let rv = add_array(&mut a, Some(ptr), arr);
        assert_eq!(rv, ptr);
        assert_eq!(a.get(ptr).kind.spine_slot(), Some(arr));
        assert_eq!(a.get(arr).kind.spine_slot(), Some(ph));
    }

    /// `static int f()`: the function steals `static` away from the
    /// return type's builtin leaf.
    #[test]
    fn add_function_steals_storage_from_return_type() {
        let mut a = Arena::new();
        let ret = a.new_builtin(TypeBits::STATIC | TypeBits::INT, loc(), 0);
        let func = a.new_function(crate::ast::MemberFlag::Unspecified, loc(), 0);
        let rv = add_function(&mut a, ret, ret, func);
        assert_eq!(rv, func);
        assert_eq!(a.get(func).kind.spine_slot(), Some(ret));
        assert!(a.get(func).ty.contains(TypeBits::STATIC));
        assert!(!a.get(ret).ty.contains(TypeBits::STATIC));
    }
}
