//! The declaration tree.
//!
//! A node is exactly one [`Kind`] (a sum type, never a combination). Nodes
//! live in an [`Arena`] and are referred to by the `Copy` [`NodeId`]
//! newtype, a safe pool-and-index pattern: no per-node allocation, no
//! lifetimes to thread through the rest of the crate. One `Arena` is a
//! per-command pool — dropping it frees every node in one step.

pub mod visit;

use crate::diagnostic::SourceSpan;
use crate::sname::ScopedName;
use crate::typedef::TypedefEntry;
use crate::types::TypeBits;
use std::fmt;
use std::rc::Rc;

/// A node reference within one [`Arena`]. `NodeId`s from different arenas
/// must never be mixed; nothing in the public API hands one arena's
/// `NodeId` a reason to be used against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The size of an [`Kind::Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArraySize {
    /// `int a[]`
    Unspecified,
    /// `int a[*]` (C99 variable-length array in a parameter).
    Variable,
    /// `int a[3]`
    Fixed(u32),
}

/// Whether a function-like node is known to be a class member, known to be
/// a non-member (free) function, or the grammar simply didn't say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberFlag {
    Unspecified,
    Member,
    NonMember,
}

/// C/C++ overloadable (and a few non-overloadable, for symmetric parsing)
/// operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum OperatorId {
    Not,
    NotEq,
    Percent,
    PercentEq,
    Amp,
    AmpAmp,
    AmpEq,
    Call,
    Star,
    StarEq,
    Plus,
    PlusPlus,
    PlusEq,
    Comma,
    Minus,
    MinusMinus,
    MinusEq,
    Arrow,
    ArrowStar,
    Dot,
    DotStar,
    Slash,
    SlashEq,
    ColonColon,
    Less,
    Shl,
    ShlEq,
    LessEq,
    Spaceship,
    Assign,
    Eq,
    Greater,
    GreaterEq,
    Shr,
    ShrEq,
    Conditional,
    Subscript,
    Caret,
    CaretEq,
    Pipe,
    PipeEq,
    PipePipe,
    Tilde,
}

impl OperatorId {
    /// The source token, e.g. `"+="`.
    pub fn token(self) -> &'static str {
        use OperatorId::*;
        match self {
            Not => "!",
            NotEq => "!=",
            Percent => "%",
            PercentEq => "%=",
            Amp => "&",
            AmpAmp => "&&",
            AmpEq => "&=",
            Call => "()",
            Star => "*",
            StarEq => "*=",
            Plus => "+",
            PlusPlus => "++",
            PlusEq => "+=",
            Comma => ",",
            Minus => "-",
            MinusMinus => "--",
            MinusEq => "-=",
            Arrow => "->",
            ArrowStar => "->*",
            Dot => ".",
            DotStar => ".*",
            Slash => "/",
            SlashEq => "/=",
            ColonColon => "::",
            Less => "<",
            Shl => "<<",
            ShlEq => "<<=",
            LessEq => "<=",
            Spaceship => "<=>",
            Assign => "=",
            Eq => "==",
            Greater => ">",
            GreaterEq => ">=",
            Shr => ">>",
            ShrEq => ">>=",
            Conditional => "?:",
            Subscript => "[]",
            Caret => "^",
            CaretEq => "^=",
            Pipe => "|",
            PipeEq => "|=",
            PipePipe => "||",
            Tilde => "~",
        }
    }
}

/// A tagged-variant declaration-tree node kind.
/// Every variant that has a "spine" child (`of`/`to`/`ret`) stores it as
/// `Option<NodeId>`; the option is only ever `None` for a freshly
/// constructed node whose spine slot the grammar hasn't filled in yet (a
/// momentary state during construction, never true of a checker-ready
/// tree except at a [`Kind::Placeholder`] leaf).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Sentinel leaf the declarator grammar inserts where the base type
    /// will later be patched in by [`crate::patch::patch`].
    Placeholder,
    /// `void`, `char`, `int`, ... — the type bits on the node carry which.
    Builtin,
    /// A bare, typeless K&R-style argument name.
    Name,
    /// An elaborated `enum`/`class`/`struct`/`union` tag type. The tag name
    /// is the node's `sname`.
    EnumClassStructUnion,
    /// A reference to a registry entry; `untypedef` strips these.
    Typedef(Rc<TypedefEntry>),
    /// The `...` function-parameter sentinel.
    Variadic,
    Array {
        of: Option<NodeId>,
        size: ArraySize,
    },
    Pointer {
        to: Option<NodeId>,
    },
    PointerToMember {
        to: Option<NodeId>,
        class: ScopedName,
    },
    Reference {
        to: Option<NodeId>,
    },
    RValueReference {
        to: Option<NodeId>,
    },
    Block {
        ret: Option<NodeId>,
        params: Vec<NodeId>,
    },
    Function {
        ret: Option<NodeId>,
        params: Vec<NodeId>,
        flags: MemberFlag,
    },
    Constructor {
        params: Vec<NodeId>,
    },
    Destructor,
    Operator {
        ret: Option<NodeId>,
        params: Vec<NodeId>,
        op: OperatorId,
        flags: MemberFlag,
    },
    UserDefConversion {
        to: Option<NodeId>,
        params: Vec<NodeId>,
    },
    UserDefLiteral {
        ret: Option<NodeId>,
        params: Vec<NodeId>,
    },
}

impl Kind {
    /// A short, human-readable kind name, used by the English renderer and
    /// by diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Placeholder => "placeholder",
            Kind::Builtin => "builtin",
            Kind::Name => "name",
            Kind::EnumClassStructUnion => "enum/class/struct/union",
            Kind::Typedef(_) => "typedef",
            Kind::Variadic => "variadic",
            Kind::Array { .. } => "array",
            Kind::Pointer { .. } => "pointer",
            Kind::PointerToMember { .. } => "pointer-to-member",
            Kind::Reference { .. } => "reference",
            Kind::RValueReference { .. } => "rvalue reference",
            Kind::Block { .. } => "block",
            Kind::Function { .. } => "function",
            Kind::Constructor { .. } => "constructor",
            Kind::Destructor => "destructor",
            Kind::Operator { .. } => "operator",
            Kind::UserDefConversion { .. } => "user-defined conversion",
            Kind::UserDefLiteral { .. } => "user-defined literal",
        }
    }

    /// Whether this kind is one of the "function-like" kinds (takes a
    /// parameter list: functions, blocks, constructors, operators, ...).
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            Kind::Block { .. }
                | Kind::Function { .. }
                | Kind::Constructor { .. }
                | Kind::Destructor
                | Kind::Operator { .. }
                | Kind::UserDefConversion { .. }
                | Kind::UserDefLiteral { .. }
        )
    }

    /// Whether this kind has any children at all — either a "spine" child
    /// or (for `Constructor`/`Destructor`) only a parameter list.
    pub fn is_parent(&self) -> bool {
        self.spine_slot().is_some() || matches!(self, Kind::Constructor { .. } | Kind::Destructor)
    }

    /// The node's single "spine" child slot (`of`/`to`/`ret`), if this kind
    /// has one. `Constructor` and `Destructor` have no spine child even
    /// though they are function-like — only their parameter list is a
    /// child.
    pub fn spine_slot(&self) -> Option<NodeId> {
        self.spine_slot_ref().copied().flatten()
    }

    fn spine_slot_ref(&self) -> Option<&Option<NodeId>> {
        match self {
            Kind::Array { of, .. } => Some(of),
            Kind::Pointer { to } => Some(to),
            Kind::PointerToMember { to, .. } => Some(to),
            Kind::Reference { to } => Some(to),
            Kind::RValueReference { to } => Some(to),
            Kind::Block { ret, .. } => Some(ret),
            Kind::Function { ret, .. } => Some(ret),
            Kind::Operator { ret, .. } => Some(ret),
            Kind::UserDefConversion { to, .. } => Some(to),
            Kind::UserDefLiteral { ret, .. } => Some(ret),
            _ => None,
        }
    }

    pub(crate) fn spine_slot_mut(&mut self) -> Option<&mut Option<NodeId>> {
        match self {
            Kind::Array { of, .. } => Some(of),
            Kind::Pointer { to } => Some(to),
            Kind::PointerToMember { to, .. } => Some(to),
            Kind::Reference { to } => Some(to),
            Kind::RValueReference { to } => Some(to),
            Kind::Block { ret, .. } => Some(ret),
            Kind::Function { ret, .. } => Some(ret),
            Kind::Operator { ret, .. } => Some(ret),
            Kind::UserDefConversion { to, .. } => Some(to),
            Kind::UserDefLiteral { ret, .. } => Some(ret),
            _ => None,
        }
    }

    /// The parameter list, for every kind that has one.
    pub fn params(&self) -> Option<&[NodeId]> {
        match self {
            Kind::Block { params, .. }
            | Kind::Function { params, .. }
            | Kind::Constructor { params }
            | Kind::Operator { params, .. }
            | Kind::UserDefConversion { params, .. }
            | Kind::UserDefLiteral { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn params_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Kind::Block { params, .. }
            | Kind::Function { params, .. }
            | Kind::Constructor { params }
            | Kind::Operator { params, .. }
            | Kind::UserDefConversion { params, .. }
            | Kind::UserDefLiteral { params, .. } => Some(params),
            _ => None,
        }
    }
}

/// One node's full attribute set.
#[derive(Debug, Clone)]
pub struct NodeData {
    id: NodeId,
    pub kind: Kind,
    pub sname: ScopedName,
    pub ty: TypeBits,
    pub loc: SourceSpan,
    pub depth: u16,
    parent: Option<NodeId>,
}

impl NodeData {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Owns every node constructed for one top-level command (or for one
/// typedef registry entry). Dropping the arena drops every node in one
/// step.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    /// Allocates a new node with a stable, monotonically increasing id.
    /// `depth` is set here and never recomputed.
    pub fn alloc(&mut self, kind: Kind, ty: TypeBits, loc: SourceSpan, depth: u16) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            id,
            kind,
            sname: ScopedName::new(),
            ty,
            loc,
            depth,
            parent: None,
        });
        id
    }

    /// Writes the `child -> parent` link and, in parallel, the parent's
    /// spine child slot, unlinking any previous owner of `child` first.
    ///
    /// A `None` spine slot on `parent` (e.g. `parent` is a `Builtin`) is a
    /// caller bug: such kinds have no slot to link into, so `child`'s
    /// `parent` field alone is updated and the orphaned node has no
    /// reachable owner. Callers of this crate's public composition
    /// functions never do this; it is not reachable from
    /// [`crate::compose`]/[`crate::patch`].
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.set_parent_opt(child, Some(parent));
    }

    /// As [`Arena::set_parent`], but `parent: None` detaches `child`
    /// (clears its previous owner's spine slot, if any, and records no new
    /// owner) — the composition algebra's "becomes the new root" case,
    /// e.g. taking over `ast->parent` from a node being spliced out.
    pub fn set_parent_opt(&mut self, child: NodeId, parent: Option<NodeId>) {
        if let Some(old_parent) = self.nodes[child.index()].parent {
            if let Some(slot) = self.nodes[old_parent.index()].kind.spine_slot_mut() {
                if *slot == Some(child) {
                    *slot = None;
                }
            }
        }
        self.nodes[child.index()].parent = parent;
        if let Some(parent) = parent {
            if let Some(slot) = self.nodes[parent.index()].kind.spine_slot_mut() {
                *slot = Some(child);
            }
        }
    }

    /// Appends `param` to `func`'s parameter list and sets `param`'s parent
    /// to `func`. Parameter lists are assembled incrementally by the
    /// grammar (one parameter production at a time) rather than through
    /// [`Arena::set_parent`]'s single-slot mechanism, since a function-like
    /// node's parameters are a list, not a spine.
    pub fn push_param(&mut self, func: NodeId, param: NodeId) {
        self.nodes[param.index()].parent = Some(func);
        if let Some(params) = self.nodes[func.index()].kind.params_mut() {
            params.push(param);
        }
    }

    // ---- new_<kind>_node constructors: one per Kind variant ----

    pub fn new_placeholder(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Placeholder, TypeBits::empty(), loc, depth)
    }

    pub fn new_builtin(&mut self, ty: TypeBits, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Builtin, ty, loc, depth)
    }

    pub fn new_name(&mut self, name: ScopedName, loc: SourceSpan, depth: u16) -> NodeId {
        let id = self.alloc(Kind::Name, TypeBits::empty(), loc, depth);
        self.get_mut(id).sname = name;
        id
    }

    pub fn new_ecsu(&mut self, tag: ScopedName, loc: SourceSpan, depth: u16) -> NodeId {
        let id = self.alloc(Kind::EnumClassStructUnion, TypeBits::empty(), loc, depth);
        self.get_mut(id).sname = tag;
        id
    }

    pub fn new_typedef(&mut self, entry: Rc<TypedefEntry>, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::Typedef(entry),
            TypeBits::TYPEDEF,
            loc,
            depth,
        )
    }

    pub fn new_variadic(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Variadic, TypeBits::empty(), loc, depth)
    }

    pub fn new_array(&mut self, size: ArraySize, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Array { of: None, size }, TypeBits::empty(), loc, depth)
    }

    pub fn new_pointer(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Pointer { to: None }, TypeBits::empty(), loc, depth)
    }

    pub fn new_pointer_to_member(
        &mut self,
        class: ScopedName,
        loc: SourceSpan,
        depth: u16,
    ) -> NodeId {
        self.alloc(
            Kind::PointerToMember { to: None, class },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_reference(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Reference { to: None }, TypeBits::empty(), loc, depth)
    }

    pub fn new_rvalue_reference(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::RValueReference { to: None },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_block(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::Block {
                ret: None,
                params: Vec::new(),
            },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_function(&mut self, flags: MemberFlag, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::Function {
                ret: None,
                params: Vec::new(),
                flags,
            },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_constructor(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::Constructor {
                params: Vec::new(),
            },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_destructor(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(Kind::Destructor, TypeBits::empty(), loc, depth)
    }

    pub fn new_operator(
        &mut self,
        op: OperatorId,
        flags: MemberFlag,
        loc: SourceSpan,
        depth: u16,
    ) -> NodeId {
        self.alloc(
            Kind::Operator {
                ret: None,
                params: Vec::new(),
                op,
                flags,
            },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_user_def_conversion(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::UserDefConversion {
                to: None,
                params: Vec::new(),
            },
            TypeBits::empty(),
            loc,
            depth,
        )
    }

    pub fn new_user_def_literal(&mut self, loc: SourceSpan, depth: u16) -> NodeId {
        self.alloc(
            Kind::UserDefLiteral {
                ret: None,
                params: Vec::new(),
            },
            TypeBits::empty(),
            loc,
            depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceSpan {
        SourceSpan::new(0, 0)
    }

    #[test]
    fn set_parent_writes_both_links() {
        let mut a = Arena::new();
        let ptr = a.new_pointer(loc(), 0);
        let leaf = a.new_placeholder(loc(), 0);
        a.set_parent(leaf, ptr);
        assert_eq!(a.get(leaf).parent(), Some(ptr));
        assert_eq!(a.get(ptr).kind.spine_slot(), Some(leaf));
    }

    #[test]
    fn set_parent_unlinks_previous_owner() {
        let mut a = Arena::new();
        let ptr1 = a.new_pointer(loc(), 0);
        let ptr2 = a.new_pointer(loc(), 0);
        let leaf = a.new_placeholder(loc(), 0);
        a.set_parent(leaf, ptr1);
        a.set_parent(leaf, ptr2);
        assert_eq!(a.get(ptr1).kind.spine_slot(), None);
        assert_eq!(a.get(ptr2).kind.spine_slot(), Some(leaf));
        assert_eq!(a.get(leaf).parent(), Some(ptr2));
    }

    #[test]
    fn node_ids_are_monotonic() {
        let mut a = Arena::new();
        let n0 = a.new_placeholder(loc(), 0);
        let n1 = a.new_placeholder(loc(), 0);
        assert!(n0.0 < n1.0);
    }
}
