//! Prints a validated tree as C/C++ source syntax.
//!
//! Implemented as a single recursive pass that threads a "what comes
//! after me" continuation string outward from the leaf, which is the
//! usual way a declarator pretty-printer avoids a true two-pass
//! left/right split: the base type is emitted once, at the bottom of the
//! recursion, and every call up the spine wraps the accumulated
//! declarator text in exactly the decoration (and parens, where
//! precedence demands it) its own kind contributes.

use super::{precedence_of, Precedence};
use crate::ast::{Arena, Kind, NodeId};
use crate::session::Session;
use crate::types::TypeBits;
use std::fmt;

/// Renders `root` as a C/C++ declaration into `w`, e.g. `int *a[3]`.
pub fn render_gibberish(
    session: &Session,
    arena: &Arena,
    root: NodeId,
    name: Option<&str>,
    w: &mut impl fmt::Write,
) -> fmt::Result {
    let (base, declarator) = split(session, arena, root, name.unwrap_or(""));
    if declarator.is_empty() {
        write!(w, "{base}")
    } else if declarator.starts_with(' ') {
        write!(w, "{base}{declarator}")
    } else {
        write!(w, "{base} {declarator}")
    }
}

/// Renders the `cast EXPR into TYPE` form as C/C++ cast syntax, e.g.
/// `(void (*)())x` for `cast x into pointer to function returning void`.
/// Unlike [`render_gibberish`], the abstract type is always parenthesized
/// as a whole, regardless of its own precedence, since a cast's `(type)`
/// is fixed C syntax rather than a declarator needing disambiguation.
pub fn render_gibberish_cast(
    session: &Session,
    arena: &Arena,
    root: NodeId,
    expr: &str,
    w: &mut impl fmt::Write,
) -> fmt::Result {
    let ty = render_to_string(session, arena, root, "");
    write!(w, "({ty}){expr}")
}

/// Returns `(base_type_text, declarator_text)`, the inside-out and
/// outside-in passes' outputs respectively; the caller joins them with a
/// single space (unless the declarator already supplies leading spacing,
/// e.g. a leading `*`).
fn split(session: &Session, arena: &Arena, n: NodeId, name: &str) -> (String, String) {
    let node = arena.get(n);

    match &node.kind {
        Kind::Placeholder => (String::new(), name.to_string()),
        Kind::Builtin => (qualified_base(node.ty), name.to_string()),
        Kind::Name => (String::new(), name.to_string()),
        Kind::EnumClassStructUnion => {
            (format!("{} {}", node.ty.canonical_name(), node.sname), name.to_string())
        }
        Kind::Typedef(entry) => (entry.name.to_string(), name.to_string()),
        Kind::Variadic => (String::new(), "...".to_string()),

        Kind::Array { of, size } => {
            use crate::ast::ArraySize::*;
            let size_text = match size {
                Unspecified => String::new(),
                Variable => "*".to_string(),
                Fixed(n) => n.to_string(),
            };
            let decl = format!("{name}[{size_text}]");
            recurse_child(session, arena, *of, n, decl)
        }

        Kind::Pointer { to } => {
            let decl = format!("*{name}");
            recurse_child(session, arena, *to, n, decl)
        }

        Kind::PointerToMember { to, class } => {
            let decl = format!("{class}::*{name}");
            recurse_child(session, arena, *to, n, decl)
        }

        Kind::Reference { to } => {
            let decl = format!("&{name}");
            recurse_child(session, arena, *to, n, decl)
        }

        Kind::RValueReference { to } => {
            let decl = format!("&&{name}");
            recurse_child(session, arena, *to, n, decl)
        }

        Kind::Block { ret, params } => {
            let decl = format!("(^{name})({})", param_list(session, arena, params));
            recurse_child(session, arena, *ret, n, decl)
        }

        Kind::Function { ret, params, .. } => {
            let decl = format!("{name}({})", param_list(session, arena, params));
            recurse_child(session, arena, *ret, n, decl)
        }

        Kind::Constructor { params } => (String::new(), format!("{name}({})", param_list(session, arena, params))),

        Kind::Destructor => (String::new(), format!("~{name}()")),

        Kind::Operator { ret, params, op, .. } => {
            let decl = format!(
                "operator{}({})",
                op.token(),
                param_list(session, arena, params)
            );
            recurse_child(session, arena, *ret, n, decl)
        }

        Kind::UserDefConversion { to, params } => {
            let inner = to.map(|t| render_to_string(session, arena, t, "")).unwrap_or_default();
            (
                String::new(),
                format!("operator {inner}({})", param_list(session, arena, params)),
            )
        }

        Kind::UserDefLiteral { ret, params } => {
            let decl = format!(
                "operator\"\"{name}({})",
                param_list(session, arena, params)
            );
            recurse_child(session, arena, *ret, n, decl)
        }
    }
}

fn recurse_child(
    session: &Session,
    arena: &Arena,
    child: Option<NodeId>,
    parent: NodeId,
    decl_so_far: String,
) -> (String, String) {
    let Some(child) = child else {
        return (String::new(), decl_so_far);
    };
    let decl_so_far = parenthesize_if_needed(arena, parent, child, decl_so_far);
    split(session, arena, child, &decl_so_far)
}

/// Wraps `decl` in parens when the parent's precedence is lower than the
/// child's, e.g. pointer-to-array needs `(*x)[3]`, not `*x[3]`.
fn parenthesize_if_needed(arena: &Arena, parent: NodeId, child: NodeId, decl: String) -> String {
    let parent_prec = precedence_of(&arena.get(parent).kind);
    let child_prec = precedence_of(&arena.get(child).kind);
    if parent_prec < child_prec {
        format!("({decl})")
    } else {
        decl
    }
}

fn param_list(session: &Session, arena: &Arena, params: &[NodeId]) -> String {
    params
        .iter()
        .map(|&p| {
            let node = arena.get(p);
            let name = if node.sname.is_empty() {
                String::new()
            } else {
                node.sname.to_string()
            };
            render_to_string(session, arena, p, &name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_to_string(session: &Session, arena: &Arena, n: NodeId, name: &str) -> String {
    let (base, decl) = split(session, arena, n, name);
    if decl.is_empty() {
        base
    } else if decl.starts_with('*') || decl.starts_with('&') || decl.starts_with('[') {
        format!("{base}{decl}")
    } else {
        format!("{base} {decl}").trim_start().to_string()
    }
}

fn qualified_base(ty: TypeBits) -> String {
    ty.canonical_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::MemberFlag;
    use crate::diagnostic::SourceSpan;
    use crate::lang::LangVersion;

    fn loc() -> SourceSpan {
        SourceSpan::default()
    }

    /// `declare a as array 3 of pointer to int` -> `int (*a)[3]`
    /// `declare a as pointer to array 3 of int` -> `int (*a)[3]`: the
    /// pointer (lower precedence) is parent of the array (higher
    /// precedence), so the array's declarator text gets parenthesized.
    #[test]
    fn pointer_to_array_needs_parens() {
        let mut a = Arena::new();
        let ptr = a.new_pointer(loc(), 0);
        let arr = a.new_array(crate::ast::ArraySize::Fixed(3), loc(), 0);
        a.set_parent(arr, ptr);
        let int_leaf = a.new_builtin(TypeBits::INT, loc(), 0);
        a.set_parent(int_leaf, arr);

        let session = Session::new(LangVersion::C17);
        let mut out = String::new();
        render_gibberish(&session, &a, ptr, Some("a"), &mut out).unwrap();
        assert_eq!(out, "int (*a)[3]");
    }

    /// `declare a as array 3 of pointer to int` -> `int *a[3]`: the array
    /// (higher precedence) is parent of the pointer (lower precedence),
    /// so no parens are needed — `[]` already binds tighter than `*`.
    #[test]
    fn array_of_pointer_has_no_parens() {
        let mut a = Arena::new();
        let arr = a.new_array(crate::ast::ArraySize::Fixed(3), loc(), 0);
        let ptr = a.new_pointer(loc(), 0);
        a.set_parent(ptr, arr);
        let int_leaf = a.new_builtin(TypeBits::INT, loc(), 0);
        a.set_parent(int_leaf, ptr);

        let session = Session::new(LangVersion::C17);
        let mut out = String::new();
        render_gibberish(&session, &a, arr, Some("a"), &mut out).unwrap();
        assert_eq!(out, "int *a[3]");
    }

    /// `declare f as pointer to function (char) returning int` -> `int (*f)(char)`
    #[test]
    fn pointer_to_function_needs_parens() {
        let mut a = Arena::new();
        let ptr = a.new_pointer(loc(), 1);
        let func = a.new_function(MemberFlag::Unspecified, loc(), 1);
        a.set_parent(func, ptr);
        let ch = a.new_builtin(TypeBits::CHAR, loc(), 1);
        a.push_param(func, ch);
        let int_ret = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(int_ret, func);

        let session = Session::new(LangVersion::C17);
        let mut out = String::new();
        render_gibberish(&session, &a, ptr, Some("f"), &mut out).unwrap();
        assert_eq!(out, "int (*f)(char)");
    }
}
