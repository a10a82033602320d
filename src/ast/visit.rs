//! Tree traversal and the small family of "find me the nearest X"
//! helpers the checker and renderers both need.

use super::{Arena, Kind, NodeId};
use crate::sname::ScopedName;
use crate::types::TypeBits;

/// Which way a search walks the tree relative to its starting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the root, following `parent` links.
    Up,
    /// Toward the leaves, following the spine child (and, for function-like
    /// kinds, `params` too).
    Down,
}

/// A bit-set of [`Kind`] discriminants, used by [`find_kind`]. Bits are
/// assigned in declaration order of [`Kind`]'s variants; callers build one
/// with the `kind_mask!` macro rather than naming bits directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindMask(u32);

macro_rules! kind_bit {
    ($kind:expr) => {
        1u32
            << match $kind {
                Kind::Placeholder => 0,
                Kind::Builtin => 1,
                Kind::Name => 2,
                Kind::EnumClassStructUnion => 3,
                Kind::Typedef(_) => 4,
                Kind::Variadic => 5,
                Kind::Array { .. } => 6,
                Kind::Pointer { .. } => 7,
                Kind::PointerToMember { .. } => 8,
                Kind::Reference { .. } => 9,
                Kind::RValueReference { .. } => 10,
                Kind::Block { .. } => 11,
                Kind::Function { .. } => 12,
                Kind::Constructor { .. } => 13,
                Kind::Destructor => 14,
                Kind::Operator { .. } => 15,
                Kind::UserDefConversion { .. } => 16,
                Kind::UserDefLiteral { .. } => 17,
            }
    };
}

impl KindMask {
    pub const POINTER: KindMask = KindMask(1 << 7);
    pub const REFERENCE: KindMask =
        KindMask((1 << 9) | (1 << 10));
    pub const ARRAY: KindMask = KindMask(1 << 6);
    pub const FUNCTION_LIKE: KindMask = KindMask(
        (1 << 11) | (1 << 12) | (1 << 13) | (1 << 14) | (1 << 15) | (1 << 16) | (1 << 17),
    );

    pub fn of(kind: &Kind) -> KindMask {
        KindMask(kind_bit!(kind))
    }

    pub fn union(self, other: KindMask) -> KindMask {
        KindMask(self.0 | other.0)
    }

    pub fn matches(self, kind: &Kind) -> bool {
        self.0 & kind_bit!(kind) != 0
    }
}

impl std::ops::BitOr for KindMask {
    type Output = KindMask;
    fn bitor(self, rhs: KindMask) -> KindMask {
        self.union(rhs)
    }
}

/// Walks from `start` in direction `dir`, returning the first node
/// (including `start` itself) for which `pred` holds.
///
/// Downward walks only ever follow the single spine child — a function's
/// `params` are siblings of the return type in the tree's data-flow sense,
/// not part of the declarator chain this search walks; parameter subtrees
/// are walked separately by the checker, not by this search.
pub fn visit(arena: &Arena, start: NodeId, dir: Direction, pred: impl Fn(&super::NodeData) -> bool) -> Option<NodeId> {
    let mut cur = Some(start);
    while let Some(id) = cur {
        let node = arena.get(id);
        if pred(node) {
            return Some(id);
        }
        cur = match dir {
            Direction::Up => node.parent(),
            Direction::Down => node.kind.spine_slot(),
        };
    }
    None
}

pub fn find_kind(arena: &Arena, start: NodeId, dir: Direction, mask: KindMask) -> Option<NodeId> {
    visit(arena, start, dir, |n| mask.matches(&n.kind))
}

pub fn find_type(arena: &Arena, start: NodeId, dir: Direction, mask: TypeBits) -> Option<NodeId> {
    visit(arena, start, dir, |n| n.ty.intersects(mask))
}

pub fn find_name(arena: &Arena, start: NodeId, dir: Direction) -> Option<NodeId> {
    visit(arena, start, dir, |n| !n.sname.is_empty())
}

/// If `n` (after stripping any [`Kind::Typedef`] layers) is a
/// [`Kind::Pointer`], the node it points to (itself stripped of any
/// further typedef layers); `None` otherwise (including when the
/// pointer's spine slot hasn't been filled yet).
pub fn unpointer(arena: &Arena, n: NodeId) -> Option<NodeId> {
    let (arena, n) = untypedef_owner(arena, n);
    match &arena.get(n).kind {
        Kind::Pointer { to } => to.map(|t| untypedef_owner(arena, t).1),
        _ => None,
    }
}

/// If `n` (after stripping any [`Kind::Typedef`] layers) is a
/// [`Kind::Reference`], the node it refers to, chaining through any
/// further `Reference` layers (stripping typedefs between hops) until a
/// non-`Reference` node is reached. A [`Kind::RValueReference`] is
/// unwrapped once but never chained through further — reference collapsing
/// only folds lvalue references into each other, never rvalue ones.
pub fn unreference(arena: &Arena, n: NodeId) -> Option<NodeId> {
    let (arena, start) = untypedef_owner(arena, n);
    match &arena.get(start).kind {
        Kind::RValueReference { to } => return to.map(|t| untypedef_owner(arena, t).1),
        Kind::Reference { .. } => {}
        _ => return None,
    }

    let mut cur_arena = arena;
    let mut cur = start;
    loop {
        let to = match &cur_arena.get(cur).kind {
            Kind::Reference { to } => (*to)?,
            _ => return Some(cur),
        };
        let (next_arena, next) = untypedef_owner(cur_arena, to);
        cur_arena = next_arena;
        cur = next;
    }
}

/// Strips any chain of [`Kind::Typedef`] wrappers, returning the arena that
/// owns the final non-typedef node along with its id — crossing into a
/// typedef registry entry's own arena changes which `Arena` the returned
/// id indexes into, so this tracks that explicitly rather than silently
/// handing back an id that may not belong to the arena passed in.
fn untypedef_owner(arena: &Arena, n: NodeId) -> (&Arena, NodeId) {
    let mut cur = n;
    let mut cur_arena = arena;
    loop {
        match &cur_arena.get(cur).kind {
            Kind::Typedef(entry) => {
                cur = entry.root;
                cur_arena = &entry.arena;
            }
            _ => return (cur_arena, cur),
        }
    }
}

/// Strips any chain of [`Kind::Typedef`] wrappers, returning the first
/// non-typedef node reached — by following into the typedef's own arena,
/// one typedef can in principle refer to another, so this follows the
/// chain to a fixed point rather than unwrapping once.
///
/// The returned `NodeId` belongs to whichever arena (the caller's or a
/// typedef entry's own) the final non-typedef node lives in; callers that
/// need to know which must use [`unpointer`]/[`unreference`] (which track
/// this internally via `untypedef_owner`) rather than calling this
/// directly across a typedef boundary.
pub fn untypedef(arena: &Arena, n: NodeId) -> NodeId {
    untypedef_owner(arena, n).1
}

/// Moves `n`'s name out, leaving it empty.
pub fn take_name(arena: &mut Arena, n: NodeId) -> ScopedName {
    arena.get_mut(n).sname.take()
}

/// Moves `n`'s storage-class bits out, clearing them on the node.
pub fn take_storage(arena: &mut Arena, n: NodeId) -> TypeBits {
    let node = arena.get_mut(n);
    let storage = node.ty.storage();
    node.ty -= storage;
    storage
}

/// Whether `n` carries the `typedef` storage-class bit, clearing it as a
/// side effect — the grammar calls this once per declaration to decide
/// "is this a typedef declaration" and consume the marker in one step.
pub fn take_typedef(arena: &mut Arena, n: NodeId) -> bool {
    let node = arena.get_mut(n);
    if node.ty.contains(TypeBits::TYPEDEF) {
        node.ty -= TypeBits::TYPEDEF;
        true
    } else {
        false
    }
}
