//! The English renderer: "declare NAME as STORAGE KIND of/to/returning …".

use crate::ast::{Arena, Kind, MemberFlag, NodeId};
use crate::session::Session;
use crate::types::TypeBits;
use std::fmt;

/// Renders `root` as an English declaration sentence into `w`.
///
/// `name` is the identifier being declared (the grammar already pulled it
/// out of the tree via [`crate::ast::visit::take_name`] by the time a
/// command reaches rendering); pass `None` for an anonymous `cast` form,
/// which emits `cast into ...` instead of `declare ... as ...`.
pub fn render_english(
    session: &Session,
    arena: &Arena,
    root: NodeId,
    name: Option<&str>,
    w: &mut impl fmt::Write,
) -> fmt::Result {
    match name {
        Some(name) => write!(w, "declare {name} as ")?,
        None => write!(w, "cast into ")?,
    }
    render_chain(session, arena, root, w)
}

fn render_chain(session: &Session, arena: &Arena, n: NodeId, w: &mut impl fmt::Write) -> fmt::Result {
    let node = arena.get(n);
    write_qualifiers(node.ty, w)?;

    match &node.kind {
        Kind::Placeholder => write!(w, "<incomplete>"),
        Kind::Builtin => write!(w, "{}", node.ty.base_type().canonical_name()),
        Kind::Name => write!(w, "{}", node.sname),
        Kind::EnumClassStructUnion => write!(w, "{} {}", node.ty.canonical_name(), node.sname),
        Kind::Typedef(entry) => write!(w, "{}", entry.name),
        Kind::Variadic => write!(w, "..."),
        Kind::Array { of, size } => {
            use crate::ast::ArraySize::*;
            match size {
                Unspecified => write!(w, "array of ")?,
                Variable => write!(w, "variable length array of ")?,
                Fixed(n) => write!(w, "array {n} of ")?,
            }
            render_opt_child(session, arena, *of, w)
        }
        Kind::Pointer { to } => {
            write!(w, "pointer to ")?;
            render_opt_child(session, arena, *to, w)
        }
        Kind::PointerToMember { to, class } => {
            write!(w, "pointer to member of class {class} ")?;
            render_opt_child(session, arena, *to, w)
        }
        Kind::Reference { to } => {
            write!(w, "reference to ")?;
            render_opt_child(session, arena, *to, w)
        }
        Kind::RValueReference { to } => {
            write!(w, "rvalue reference to ")?;
            render_opt_child(session, arena, *to, w)
        }
        Kind::Block { ret, params } => {
            write!(w, "block (")?;
            render_params(session, arena, params, w)?;
            write!(w, ") returning ")?;
            render_opt_child(session, arena, *ret, w)
        }
        Kind::Function { ret, params, flags } => {
            write_member_flag(*flags, w)?;
            write!(w, "function (")?;
            render_params(session, arena, params, w)?;
            write!(w, ") returning ")?;
            render_opt_child(session, arena, *ret, w)
        }
        Kind::Constructor { params } => {
            write!(w, "constructor (")?;
            render_params(session, arena, params, w)?;
            write!(w, ")")
        }
        Kind::Destructor => write!(w, "destructor ()"),
        Kind::Operator { ret, params, op, flags } => {
            write_member_flag(*flags, w)?;
            write!(w, "operator {} (", op.token())?;
            render_params(session, arena, params, w)?;
            write!(w, ") returning ")?;
            render_opt_child(session, arena, *ret, w)
        }
        Kind::UserDefConversion { to, params } => {
            write!(w, "user-defined conversion (")?;
            render_params(session, arena, params, w)?;
            write!(w, ") returning ")?;
            render_opt_child(session, arena, *to, w)
        }
        Kind::UserDefLiteral { ret, params } => {
            write!(w, "user-defined literal (")?;
            render_params(session, arena, params, w)?;
            write!(w, ") returning ")?;
            render_opt_child(session, arena, *ret, w)
        }
    }
}

fn render_opt_child(
    session: &Session,
    arena: &Arena,
    child: Option<NodeId>,
    w: &mut impl fmt::Write,
) -> fmt::Result {
    match child {
        Some(child) => render_chain(session, arena, child, w),
        None => write!(w, "<incomplete>"),
    }
}

fn render_params(
    session: &Session,
    arena: &Arena,
    params: &[NodeId],
    w: &mut impl fmt::Write,
) -> fmt::Result {
    for (i, &p) in params.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        let node = arena.get(p);
        if node.sname.is_empty() {
            render_chain(session, arena, p, w)?;
        } else {
            write!(w, "{} as ", node.sname)?;
            render_chain(session, arena, p, w)?;
        }
    }
    Ok(())
}

/// Qualifier order fixed as: storage, cv-qualifiers, ref-qualifier, then
/// kind-noun.
fn write_qualifiers(ty: TypeBits, w: &mut impl fmt::Write) -> fmt::Result {
    let storage = ty.storage().canonical_name();
    if !storage.is_empty() {
        write!(w, "{storage} ")?;
    }
    if ty.contains(TypeBits::CONST) {
        write!(w, "const ")?;
    }
    if ty.contains(TypeBits::VOLATILE) {
        write!(w, "volatile ")?;
    }
    if ty.contains(TypeBits::REF_LVALUE) {
        write!(w, "lvalue-ref-qualified ")?;
    }
    if ty.contains(TypeBits::REF_RVALUE) {
        write!(w, "rvalue-ref-qualified ")?;
    }
    Ok(())
}

fn write_member_flag(flags: MemberFlag, w: &mut impl fmt::Write) -> fmt::Result {
    match flags {
        MemberFlag::Member => write!(w, "member "),
        MemberFlag::NonMember => write!(w, "non-member "),
        MemberFlag::Unspecified => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::SourceSpan;
    use crate::lang::LangVersion;

    fn loc() -> SourceSpan {
        SourceSpan::default()
    }

    /// `declare f as pointer to function (char) returning int`
    #[test]
    fn pointer_to_function_returning_int() {
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
        render_english(&session, &a, ptr, Some("f"), &mut out).unwrap();
        assert_eq!(
            out,
            "declare f as pointer to function (char) returning int"
        );
    }

    /// `declare a as array 3 of pointer to int`
    #[test]
    fn array_of_pointer_to_int() {
        let mut a = Arena::new();
        let arr = a.new_array(crate::ast::ArraySize::Fixed(3), loc(), 0);
        let ptr = a.new_pointer(loc(), 0);
        a.set_parent(ptr, arr);
        let int_leaf = a.new_builtin(TypeBits::INT, loc(), 0);
        a.set_parent(int_leaf, ptr);

        let session = Session::new(LangVersion::C17);
        let mut out = String::new();
        render_english(&session, &a, arr, Some("a"), &mut out).unwrap();
        assert_eq!(out, "declare a as array 3 of pointer to int");
    }
}
