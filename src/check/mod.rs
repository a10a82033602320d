//! The semantic checker.
//!
//! Six rule categories walk the tree bottom-up (checking a node's own
//! shape) then top-down (checking a node against the context it sits in),
//! split into one function per category so each has an independent,
//! targeted set of tests. `check` runs all six and collects every
//! failure rather than stopping at the first, since a CLI wants to
//! report more than one mistake per command where it can.

pub mod operator;

use crate::ast::{Arena, Kind, MemberFlag, NodeId};
use crate::diagnostic::Diagnostic;
use crate::lang::LangVersion;
use crate::types::TypeBits;
use operator::rule as operator_rule;

/// Runs every check category against `root` and returns every diagnostic
/// produced (both errors and warnings), in the order the categories ran.
/// An empty vector means the declaration is semantically sound for `lang`.
pub fn check(arena: &Arena, root: NodeId, lang: LangVersion) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    check_kind_legality(arena, root, lang, &mut out);
    check_type_bits(arena, root, lang, &mut out);
    check_arity_and_placement(arena, root, &mut out);
    check_recursive_composition(arena, root, &mut out);
    check_auto_and_placeholder(arena, root, &mut out);
    check_udl_udc_shape(arena, root, &mut out);
    out
}

fn is_cpp_only_kind(kind: &Kind) -> bool {
    matches!(
        kind,
        Kind::PointerToMember { .. }
            | Kind::Reference { .. }
            | Kind::RValueReference { .. }
            | Kind::Constructor { .. }
            | Kind::Destructor
            | Kind::Operator { .. }
            | Kind::UserDefConversion { .. }
            | Kind::UserDefLiteral { .. }
    )
}

/// Category 1: kind legality — a C++-only kind (reference,
/// pointer-to-member, constructor/destructor, operator overload, UDC/UDL)
/// used while `lang` names a C standard.
fn check_kind_legality(arena: &Arena, root: NodeId, lang: LangVersion, out: &mut Vec<Diagnostic>) {
    walk(arena, root, &mut |n| {
        let node = arena.get(n);
        if lang.is_c() && is_cpp_only_kind(&node.kind) {
            out.push(Diagnostic::error(
                node.loc,
                format!("'{}' is a C++ feature, not legal in {lang}", node.kind.name()),
            ));
        }
    });
}

/// Category 2: type-bit legality — conflicting storage classes, a
/// reference qualifier on anything but a member function, `const`
/// directly on a reference itself (a reference is inherently non-rebindable,
/// so `int& const x` qualifies nothing), and an empty base type — implicit
/// `int` is only legal through C95, and is an error in every later C
/// standard and in C++ (which never had the "implicit int" rule).
fn check_type_bits(arena: &Arena, root: NodeId, lang: LangVersion, out: &mut Vec<Diagnostic>) {
    walk(arena, root, &mut |n| {
        let node = arena.get(n);
        if node.ty.has_conflicting_storage() {
            out.push(Diagnostic::error(
                node.loc,
                format!(
                    "'{}' has conflicting storage classes",
                    node.ty.canonical_name()
                ),
            ));
        }
        let ref_qualified = node.ty.intersects(TypeBits::REF_QUALIFIERS);
        if ref_qualified && !matches!(node.kind, Kind::Function { .. } | Kind::Operator { .. }) {
            out.push(Diagnostic::error(
                node.loc,
                "a reference qualifier is only legal on a member function",
            ));
        }
        if matches!(node.kind, Kind::Reference { .. } | Kind::RValueReference { .. })
            && node.ty.contains(TypeBits::CONST)
        {
            out.push(Diagnostic::error(node.loc, "reference is always const"));
        }
        if matches!(node.kind, Kind::Builtin)
            && node.ty.base_type().is_empty()
            && lang > LangVersion::C95
        {
            out.push(Diagnostic::error(
                node.loc,
                "a declaration must name a base type",
            ));
        }
    });
}

/// Category 3: arity and placement — function-like nodes' parameter
/// counts against [`operator::TABLE`] for operator overloads, variadic
/// (`...`) only ever legal as the last parameter, and the "only one
/// function-like kind may be the outermost kind" shape.
fn check_arity_and_placement(arena: &Arena, root: NodeId, out: &mut Vec<Diagnostic>) {
    walk(arena, root, &mut |n| {
        let node = arena.get(n);
        if let Some(params) = node.kind.params() {
            for (i, &p) in params.iter().enumerate() {
                let is_last = i + 1 == params.len();
                if matches!(arena.get(p).kind, Kind::Variadic) && !is_last {
                    out.push(Diagnostic::error(
                        arena.get(p).loc,
                        "'...' must be the last parameter",
                    ));
                }
            }
        }
        if let Kind::Operator { op, params, flags, .. } = &node.kind {
            let r = operator_rule(*op);
            if !r.overloadable {
                out.push(Diagnostic::error(
                    node.loc,
                    format!("'operator{}' is not overloadable", op.token()),
                ));
                return;
            }
            let implicit_this = matches!(flags, MemberFlag::Member);
            let n_args = params.len() as u8 + if implicit_this { 1 } else { 0 };
            if n_args < r.args_min || n_args > r.args_max {
                out.push(Diagnostic::error(
                    node.loc,
                    format!(
                        "'operator{}' takes between {} and {} argument(s)",
                        op.token(),
                        r.args_min,
                        r.args_max
                    ),
                ));
            }
        }
    });
}

/// Category 4: recursive composition legality — a function can't return an
/// array (`K_FUNCTION` returning `K_ARRAY` is not in `K_FUNCTION_LIKE`'s
/// legal result kinds); an array can't hold a function or another
/// unsized array as an element type.
fn check_recursive_composition(arena: &Arena, root: NodeId, out: &mut Vec<Diagnostic>) {
    walk(arena, root, &mut |n| {
        let node = arena.get(n);
        match &node.kind {
            Kind::Function { ret, .. } | Kind::Block { ret, .. } | Kind::Operator { ret, .. } => {
                if let Some(ret) = ret {
                    if matches!(arena.get(*ret).kind, Kind::Array { .. }) {
                        out.push(Diagnostic::error(
                            node.loc,
                            "a function cannot return an array; return a pointer instead",
                        ));
                    }
                }
            }
            Kind::Array { of, .. } => {
                if let Some(of) = of {
                    if node.kind.is_function_like()
                        || matches!(arena.get(*of).kind, Kind::Function { .. } | Kind::Block { .. })
                    {
                        out.push(Diagnostic::error(
                            node.loc,
                            "an array cannot hold functions; use an array of function pointers",
                        ));
                    }
                }
            }
            _ => {}
        }
    });
}

/// Category 5: `auto`/placeholder semantics — a leftover
/// [`Kind::Placeholder`] after composition means the declarator grammar
/// never patched a base type in; `auto` (the C++11 type-bit, not
/// `Kind::Placeholder`) is only legal as a sole base type, never combined
/// with another base-type bit.
fn check_auto_and_placeholder(arena: &Arena, root: NodeId, out: &mut Vec<Diagnostic>) {
    walk(arena, root, &mut |n| {
        let node = arena.get(n);
        if matches!(node.kind, Kind::Placeholder) {
            out.push(Diagnostic::error(
                node.loc,
                "declaration is missing a base type",
            ));
        }
        if node.ty.contains(TypeBits::AUTO_TYPE)
            && node.ty.base_type() != TypeBits::AUTO_TYPE
        {
            out.push(Diagnostic::error(
                node.loc,
                "'auto' cannot be combined with another base type",
            ));
        }
    });
}

/// Category 6: user-defined conversion/literal signature shape — a UDC
/// takes no parameters and names the target type as its `to`; a UDL's
/// first parameter must be one of the standard literal-operator parameter
/// shapes (here relaxed to: exactly one or two parameters, the usual
/// `operator""_x(unsigned long long)` / `(const char*, size_t)` shapes).
fn check_udl_udc_shape(arena: &Arena, root: NodeId, out: &mut Vec<Diagnostic>) {
    walk(arena, root, &mut |n| {
        let node = arena.get(n);
        match &node.kind {
            Kind::UserDefConversion { to, params } => {
                if to.is_none() {
                    out.push(Diagnostic::error(
                        node.loc,
                        "user-defined conversion must name a target type",
                    ));
                }
                if !params.is_empty() {
                    out.push(Diagnostic::error(
                        node.loc,
                        "user-defined conversion takes no parameters",
                    ));
                }
            }
            Kind::UserDefLiteral { params, .. } => {
                if params.is_empty() || params.len() > 2 {
                    out.push(Diagnostic::error(
                        node.loc,
                        "user-defined literal takes one or two parameters",
                    ));
                }
            }
            _ => {}
        }
    });
}

/// A simple bottom-up-then-top-down full traversal: every node reachable
/// via the spine and every parameter subtree, visited once. Since this
/// crate's checks are local (each node's own shape, or its immediate
/// spine child), one full pass in either order satisfies all six
/// categories; there is no check here that depends on visiting children
/// before parents or vice versa.
fn walk(arena: &Arena, root: NodeId, f: &mut impl FnMut(NodeId)) {
    f(root);
    let node = arena.get(root);
    if let Some(child) = node.kind.spine_slot() {
        walk(arena, child, f);
    }
    if let Some(params) = node.kind.params() {
        for &p in params {
            walk(arena, p, f);
        }
    }
    if let Kind::PointerToMember { to: Some(to), .. } = &node.kind {
        walk(arena, *to, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::SourceSpan;

    fn loc() -> SourceSpan {
        SourceSpan::default()
    }

    #[test]
    fn reference_in_c_is_rejected() {
        let mut a = Arena::new();
        let r = a.new_reference(loc(), 0);
        let leaf = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(leaf, r);
        let diags = check(&a, r, LangVersion::C17);
        assert!(diags.iter().any(|d| d.message.contains("C++ feature")));
    }

    #[test]
    fn reference_in_cpp_is_accepted() {
        let mut a = Arena::new();
        let r = a.new_reference(loc(), 0);
        let leaf = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(leaf, r);
        let diags = check(&a, r, LangVersion::Cpp17);
        assert!(diags.is_empty());
    }

    #[test]
    fn function_returning_array_is_rejected() {
        let mut a = Arena::new();
        let func = a.new_function(MemberFlag::Unspecified, loc(), 0);
        let arr = a.new_array(crate::ast::ArraySize::Fixed(3), loc(), 1);
        a.set_parent(arr, func);
        let diags = check(&a, func, LangVersion::Cpp17);
        assert!(diags.iter().any(|d| d.message.contains("cannot return an array")));
    }

    #[test]
    fn leftover_placeholder_is_rejected() {
        let mut a = Arena::new();
        let ph = a.new_placeholder(loc(), 0);
        let diags = check(&a, ph, LangVersion::C17);
        assert!(diags.iter().any(|d| d.message.contains("missing a base type")));
    }

    #[test]
    fn const_qualified_reference_is_rejected() {
        let mut a = Arena::new();
        let r = a.new_reference(loc(), 0);
        a.get_mut(r).ty |= TypeBits::CONST;
        let leaf = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(leaf, r);
        let diags = check(&a, r, LangVersion::Cpp17);
        assert!(diags.iter().any(|d| d.message.contains("reference is always const")));
    }

    #[test]
    fn ambiguous_operator_with_too_many_args_is_rejected() {
        let mut a = Arena::new();
        let op = a.new_operator(
            crate::ast::OperatorId::Plus,
            MemberFlag::NonMember,
            loc(),
            0,
        );
        for _ in 0..3 {
            let p = a.new_builtin(TypeBits::INT, loc(), 1);
            a.push_param(op, p);
        }
        let ret = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(ret, op);
        let diags = check(&a, op, LangVersion::Cpp17);
        assert!(diags.iter().any(|d| d.message.contains("argument")));
    }

    #[test]
    fn variadic_before_last_param_is_rejected() {
        let mut a = Arena::new();
        let func = a.new_function(MemberFlag::Unspecified, loc(), 0);
        let variadic = a.new_variadic(loc(), 1);
        a.push_param(func, variadic);
        let int_param = a.new_builtin(TypeBits::INT, loc(), 1);
        a.push_param(func, int_param);
        let ret = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(ret, func);
        let diags = check(&a, func, LangVersion::C17);
        assert!(diags
            .iter()
            .any(|d| d.message.contains("must be the last parameter")));
    }

    #[test]
    fn variadic_as_last_param_is_accepted() {
        let mut a = Arena::new();
        let func = a.new_function(MemberFlag::Unspecified, loc(), 0);
        let int_param = a.new_builtin(TypeBits::INT, loc(), 1);
        a.push_param(func, int_param);
        let variadic = a.new_variadic(loc(), 1);
        a.push_param(func, variadic);
        let ret = a.new_builtin(TypeBits::INT, loc(), 1);
        a.set_parent(ret, func);
        let diags = check(&a, func, LangVersion::C17);
        assert!(!diags.iter().any(|d| d.message.contains("last parameter")));
    }

    #[test]
    fn empty_base_type_is_accepted_through_c95() {
        let mut a = Arena::new();
        let leaf = a.new_builtin(TypeBits::empty(), loc(), 0);
        let diags = check(&a, leaf, LangVersion::C95);
        assert!(diags.is_empty());
    }

    #[test]
    fn empty_base_type_is_rejected_in_later_c() {
        let mut a = Arena::new();
        let leaf = a.new_builtin(TypeBits::empty(), loc(), 0);
        let diags = check(&a, leaf, LangVersion::C99);
        assert!(diags.iter().any(|d| d.message.contains("base type")));
    }

    #[test]
    fn empty_base_type_is_rejected_in_cpp() {
        let mut a = Arena::new();
        let leaf = a.new_builtin(TypeBits::empty(), loc(), 0);
        let diags = check(&a, leaf, LangVersion::Cpp17);
        assert!(diags.iter().any(|d| d.message.contains("base type")));
    }
}
