//! The type lattice.
//!
//! Storage class, cv-qualifiers, attributes and base types all pack into
//! one bitwise-or'd value (so union/intersection/difference/membership
//! remain O(1)), exposed as a `bitflags` type rather than raw integers,
//! with the bit layout kept private.

use std::fmt;

bitflags::bitflags! {
    /// A bitwise-or of storage-class, qualifier, attribute and base-type
    /// bits. A given node's [`TypeBits`] only ever uses bits valid for its
    /// [`crate::ast::Kind`]; this type does not by itself enforce that —
    /// [`crate::check`] does.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeBits: u64 {
        // Storage classes and storage-adjacent specifiers.
        const AUTO          = 1 << 0;
        const REGISTER       = 1 << 1;
        const STATIC         = 1 << 2;
        const EXTERN         = 1 << 3;
        const THREAD_LOCAL   = 1 << 4;
        const TYPEDEF        = 1 << 5;
        const FRIEND         = 1 << 6;
        const VIRTUAL        = 1 << 7;
        const EXPLICIT       = 1 << 8;
        const CONSTEXPR      = 1 << 9;
        const CONSTEVAL      = 1 << 10;
        const CONSTINIT      = 1 << 11;
        const MUTABLE        = 1 << 12;
        const DEFAULT        = 1 << 13;
        const DELETE         = 1 << 14;
        const FINAL          = 1 << 15;
        const OVERRIDE       = 1 << 16;
        const INLINE         = 1 << 17;

        // Qualifiers.
        const CONST          = 1 << 20;
        const VOLATILE       = 1 << 21;
        const RESTRICT       = 1 << 22;
        const ATOMIC_Q       = 1 << 23;

        // Reference-qualifiers (member functions only).
        const REF_LVALUE     = 1 << 26;
        const REF_RVALUE     = 1 << 27;

        // Base types.
        const VOID           = 1 << 30;
        const AUTO_TYPE       = 1 << 31;
        const BOOL           = 1 << 32;
        const CHAR           = 1 << 33;
        const CHAR8_T        = 1 << 34;
        const CHAR16_T       = 1 << 35;
        const CHAR32_T       = 1 << 36;
        const WCHAR_T        = 1 << 37;
        const SHORT          = 1 << 38;
        const INT            = 1 << 39;
        const LONG           = 1 << 40;
        const LONG_LONG      = 1 << 41;
        const SIGNED         = 1 << 42;
        const UNSIGNED       = 1 << 43;
        const FLOAT          = 1 << 44;
        const DOUBLE         = 1 << 45;
        const COMPLEX        = 1 << 46;

        // Attributes.
        const NORETURN       = 1 << 50;
        const CARRIES_DEP    = 1 << 51;
        const MAYBE_UNUSED   = 1 << 52;
        const NODISCARD      = 1 << 53;
        const DEPRECATED     = 1 << 54;
        const NO_UNIQUE_ADDR = 1 << 55;
    }
}

impl TypeBits {
    pub const STORAGE: TypeBits = TypeBits::from_bits_truncate(
        Self::AUTO.bits()
            | Self::REGISTER.bits()
            | Self::STATIC.bits()
            | Self::EXTERN.bits()
            | Self::THREAD_LOCAL.bits()
            | Self::TYPEDEF.bits()
            | Self::FRIEND.bits()
            | Self::VIRTUAL.bits()
            | Self::EXPLICIT.bits()
            | Self::CONSTEXPR.bits()
            | Self::CONSTEVAL.bits()
            | Self::CONSTINIT.bits()
            | Self::MUTABLE.bits()
            | Self::DEFAULT.bits()
            | Self::DELETE.bits()
            | Self::FINAL.bits()
            | Self::OVERRIDE.bits()
            | Self::INLINE.bits(),
    );

    pub const QUALIFIERS: TypeBits = TypeBits::from_bits_truncate(
        Self::CONST.bits() | Self::VOLATILE.bits() | Self::RESTRICT.bits() | Self::ATOMIC_Q.bits(),
    );

    pub const REF_QUALIFIERS: TypeBits =
        TypeBits::from_bits_truncate(Self::REF_LVALUE.bits() | Self::REF_RVALUE.bits());

    pub const BASE_TYPES: TypeBits = TypeBits::from_bits_truncate(
        Self::VOID.bits()
            | Self::AUTO_TYPE.bits()
            | Self::BOOL.bits()
            | Self::CHAR.bits()
            | Self::CHAR8_T.bits()
            | Self::CHAR16_T.bits()
            | Self::CHAR32_T.bits()
            | Self::WCHAR_T.bits()
            | Self::SHORT.bits()
            | Self::INT.bits()
            | Self::LONG.bits()
            | Self::LONG_LONG.bits()
            | Self::SIGNED.bits()
            | Self::UNSIGNED.bits()
            | Self::FLOAT.bits()
            | Self::DOUBLE.bits()
            | Self::COMPLEX.bits(),
    );

    pub const ATTRIBUTES: TypeBits = TypeBits::from_bits_truncate(
        Self::NORETURN.bits()
            | Self::CARRIES_DEP.bits()
            | Self::MAYBE_UNUSED.bits()
            | Self::NODISCARD.bits()
            | Self::DEPRECATED.bits()
            | Self::NO_UNIQUE_ADDR.bits(),
    );

    /// The part of `self` that is a storage-class or storage-adjacent bit.
    pub fn storage(self) -> TypeBits {
        self & Self::STORAGE
    }

    /// The part of `self` that is a cv/ref qualifier bit.
    pub fn qualifiers(self) -> TypeBits {
        self & (Self::QUALIFIERS | Self::REF_QUALIFIERS)
    }

    /// The part of `self` that names a base type.
    pub fn base_type(self) -> TypeBits {
        self & Self::BASE_TYPES
    }

    /// Whether any storage-class bit conflicts with another in `self`
    /// (e.g. `static extern`). Mutually-exclusive storage classes are
    /// `auto`, `register`, `static`, `extern`, `thread_local` — at most one
    /// of those five may be set at a time (C11 6.7.1p2 and C++ equivalent).
    pub fn has_conflicting_storage(self) -> bool {
        let exclusive = self
            & (Self::AUTO | Self::REGISTER | Self::STATIC | Self::EXTERN | Self::THREAD_LOCAL);
        exclusive.bits().count_ones() > 1
    }

    /// Canonical name rendering, storage first, then qualifiers, then base
    /// type name, matching the order English/gibberish renderers expect.
    pub fn canonical_name(self) -> String {
        let mut words = Vec::new();
        macro_rules! push_if {
            ($bit:expr, $name:expr) => {
                if self.contains($bit) {
                    words.push($name);
                }
            };
        }
        push_if!(Self::STATIC, "static");
        push_if!(Self::EXTERN, "extern");
        push_if!(Self::REGISTER, "register");
        push_if!(Self::THREAD_LOCAL, "thread_local");
        push_if!(Self::CONSTEXPR, "constexpr");
        push_if!(Self::CONST, "const");
        push_if!(Self::VOLATILE, "volatile");
        push_if!(Self::RESTRICT, "restrict");
        push_if!(Self::UNSIGNED, "unsigned");
        push_if!(Self::SIGNED, "signed");
        push_if!(Self::LONG_LONG, "long long");
        push_if!(Self::LONG, "long");
        push_if!(Self::SHORT, "short");
        push_if!(Self::VOID, "void");
        push_if!(Self::BOOL, "bool");
        push_if!(Self::CHAR, "char");
        push_if!(Self::WCHAR_T, "wchar_t");
        push_if!(Self::INT, "int");
        push_if!(Self::FLOAT, "float");
        push_if!(Self::DOUBLE, "double");
        words.join(" ")
    }
}

impl fmt::Display for TypeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_intersection_difference() {
        let a = TypeBits::CONST | TypeBits::INT;
        let b = TypeBits::CONST | TypeBits::STATIC;
        assert_eq!(a | b, TypeBits::CONST | TypeBits::INT | TypeBits::STATIC);
        assert_eq!(a & b, TypeBits::CONST);
        assert_eq!(a - b, TypeBits::INT);
    }

    #[test]
    fn storage_and_qualifiers_split() {
        let t = TypeBits::STATIC | TypeBits::CONST | TypeBits::INT;
        assert_eq!(t.storage(), TypeBits::STATIC);
        assert_eq!(t.qualifiers(), TypeBits::CONST);
        assert_eq!(t.base_type(), TypeBits::INT);
    }

    #[test]
    fn conflicting_storage_detected() {
        assert!((TypeBits::STATIC | TypeBits::EXTERN).has_conflicting_storage());
        assert!(!(TypeBits::STATIC | TypeBits::CONST).has_conflicting_storage());
    }

    #[test]
    fn canonical_name_orders_storage_before_base() {
        let t = TypeBits::STATIC | TypeBits::CONST | TypeBits::INT;
        assert_eq!(t.canonical_name(), "static const int");
    }
}
