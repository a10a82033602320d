//! Structured debug dump.
//!
//! Prints a node and its subtree as indented, JSON5-flavored key/value
//! pairs — for debugging the tree shape, never for programmatic
//! consumption. Takes `impl fmt::Write` to match the rest of this
//! crate's renderer surface.

use crate::ast::{Arena, Kind, NodeId};
use std::fmt;

const INDENT_WIDTH: usize = 2;

/// Dumps `root` and everything reachable from it (spine child, params,
/// pointer-to-member class) as an indented JSON5 object.
pub fn dump(arena: &Arena, root: NodeId, w: &mut impl fmt::Write) -> fmt::Result {
    dump_node(arena, root, 0, w)
}

fn indent(level: usize, w: &mut impl fmt::Write) -> fmt::Result {
    write!(w, "{:width$}", "", width = level * INDENT_WIDTH)
}

fn dump_node(arena: &Arena, n: NodeId, level: usize, w: &mut impl fmt::Write) -> fmt::Result {
    let node = arena.get(n);
    writeln!(w, "{{")?;
    indent(level + 1, w)?;
    writeln!(w, "id: {},", node.id())?;
    indent(level + 1, w)?;
    writeln!(w, "kind: \"{}\",", node.kind.name())?;
    indent(level + 1, w)?;
    writeln!(w, "depth: {},", node.depth)?;
    indent(level + 1, w)?;
    if node.sname.is_empty() {
        writeln!(w, "name: null,")?;
    } else {
        writeln!(w, "name: \"{}\",", node.sname)?;
    }
    indent(level + 1, w)?;
    writeln!(w, "type: \"{}\",", node.ty)?;

    indent(level + 1, w)?;
    match &node.kind {
        Kind::Array { of, size } => {
            use crate::ast::ArraySize::*;
            let size_text = match size {
                Unspecified => "unspecified".to_string(),
                Variable => "variable".to_string(),
                Fixed(n) => n.to_string(),
            };
            writeln!(w, "size: {size_text},")?;
            indent(level + 1, w)?;
            dump_child_field(arena, "of", *of, level, w)?;
        }
        Kind::Pointer { to } | Kind::Reference { to } | Kind::RValueReference { to } => {
            dump_child_field(arena, "to", *to, level, w)?;
        }
        Kind::PointerToMember { to, class } => {
            writeln!(w, "class: \"{class}\",")?;
            indent(level + 1, w)?;
            dump_child_field(arena, "to", *to, level, w)?;
        }
        Kind::Block { ret, params } | Kind::Function { ret, params, .. } => {
            dump_params(arena, params, level, w)?;
            indent(level + 1, w)?;
            dump_child_field(arena, "ret", *ret, level, w)?;
        }
        Kind::Constructor { params } => {
            dump_params(arena, params, level, w)?;
        }
        Kind::Operator { ret, params, op, .. } => {
            writeln!(w, "operator: \"{}\",", op.token())?;
            indent(level + 1, w)?;
            dump_params(arena, params, level, w)?;
            indent(level + 1, w)?;
            dump_child_field(arena, "ret", *ret, level, w)?;
        }
        Kind::UserDefConversion { to, params } => {
            dump_params(arena, params, level, w)?;
            indent(level + 1, w)?;
            dump_child_field(arena, "to", *to, level, w)?;
        }
        Kind::UserDefLiteral { ret, params } => {
            dump_params(arena, params, level, w)?;
            indent(level + 1, w)?;
            dump_child_field(arena, "ret", *ret, level, w)?;
        }
        _ => {
            writeln!(w, "leaf: true,")?;
        }
    }

    indent(level, w)?;
    write!(w, "}}")
}

fn dump_child_field(
    arena: &Arena,
    key: &str,
    child: Option<NodeId>,
    level: usize,
    w: &mut impl fmt::Write,
) -> fmt::Result {
    write!(w, "{key}: ")?;
    match child {
        Some(child) => {
            dump_node(arena, child, level + 1, w)?;
            writeln!(w, ",")
        }
        None => writeln!(w, "null,"),
    }
}

fn dump_params(
    arena: &Arena,
    params: &[NodeId],
    level: usize,
    w: &mut impl fmt::Write,
) -> fmt::Result {
    writeln!(w, "params: [")?;
    for &p in params {
        indent(level + 2, w)?;
        dump_node(arena, p, level + 2, w)?;
        writeln!(w, ",")?;
    }
    indent(level + 1, w)?;
    writeln!(w, "],")
}
