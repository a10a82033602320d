//! The operator arity/overloadability table, keyed by [`OperatorId`] and
//! carrying a name, an argument-count range, and the language versions it
//! is valid in.
//!
//! `args_min`/`args_max` are the union across member and non-member
//! overloads: a member `operator+` takes 1 argument (the other operand;
//! `this` is implicit), a non-member `operator+` takes 2. Checking
//! `(args_min..=args_max).contains(&n)` without knowing which overload
//! kind is in play is exactly what `op_is_ambiguous` (below) names: the
//! five-or-so operators whose `args_min == 0 && args_max == 2` can't be
//! told apart as member-vs-non-member from arity alone.

use crate::ast::OperatorId;
use crate::lang::LangVersion;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One operator's overload arity window and the minimum language it's
/// available from.
#[derive(Debug, Clone, Copy)]
pub struct OperatorRule {
    pub overloadable: bool,
    pub args_min: u8,
    pub args_max: u8,
    pub since: LangVersion,
}

impl OperatorRule {
    /// `op_is_ambiguous`: true for operators that could be either a member
    /// taking 1 argument or a non-member taking 1, with cdecl unable to
    /// tell which from arity alone.
    pub fn is_ambiguous(&self) -> bool {
        self.args_min == 0 && self.args_max == 2
    }
}

const UNLIMITED: u8 = u8::MAX;

macro_rules! rule {
    ($overloadable:expr, $min:expr, $max:expr, $since:expr) => {
        OperatorRule {
            overloadable: $overloadable,
            args_min: $min,
            args_max: $max,
            since: $since,
        }
    };
}

pub static TABLE: Lazy<HashMap<OperatorId, OperatorRule>> = Lazy::new(|| {
    use LangVersion::Cpp98 as CPP;
    use LangVersion::Cpp20;
    use OperatorId::*;

    let mut m = HashMap::new();
    // Ambiguous: unary-or-binary, member takes 0, non-member takes 2.
    for (op, since) in [
        (Amp, CPP),
        (Star, CPP),
        (Plus, CPP),
        (PlusPlus, CPP),
        (Minus, CPP),
        (MinusMinus, CPP),
    ] {
        m.insert(op, rule!(true, 0, 2, since));
    }
    // Unary only.
    m.insert(Not, rule!(true, 0, 1, CPP));
    m.insert(Tilde, rule!(true, 0, 1, CPP));
    // Binary only, overloadable, member takes 1 / non-member takes 2.
    for op in [
        NotEq, Percent, PercentEq, AmpAmp, AmpEq, StarEq, PlusEq, Comma, MinusEq, SlashEq, Less,
        Shl, ShlEq, LessEq, Assign, Eq, Greater, GreaterEq, Shr, ShrEq, Caret, CaretEq, Pipe,
        PipeEq, PipePipe, Slash,
    ] {
        m.insert(op, rule!(true, 1, 2, CPP));
    }
    // C++20 three-way comparison.
    m.insert(Spaceship, rule!(true, 1, 2, Cpp20));
    // Special call-like forms.
    m.insert(Call, rule!(true, 0, UNLIMITED, CPP));
    m.insert(Subscript, rule!(true, 1, 1, CPP));
    m.insert(Arrow, rule!(true, 0, 0, CPP));
    m.insert(ArrowStar, rule!(true, 1, 1, CPP));
    // Not overloadable at all.
    for op in [ColonColon, Dot, DotStar, Conditional] {
        m.insert(op, rule!(false, 0, 0, CPP));
    }
    m
});

pub fn rule(op: OperatorId) -> &'static OperatorRule {
    TABLE
        .get(&op)
        .unwrap_or_else(|| panic!("operator table missing entry for {:?}", op))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_id_has_a_rule() {
        let all = [
            OperatorId::Not,
            OperatorId::NotEq,
            OperatorId::Percent,
            OperatorId::PercentEq,
            OperatorId::Amp,
            OperatorId::AmpAmp,
            OperatorId::AmpEq,
            OperatorId::Call,
            OperatorId::Star,
            OperatorId::StarEq,
            OperatorId::Plus,
            OperatorId::PlusPlus,
            OperatorId::PlusEq,
            OperatorId::Comma,
            OperatorId::Minus,
            OperatorId::MinusMinus,
            OperatorId::MinusEq,
            OperatorId::Arrow,
            OperatorId::ArrowStar,
            OperatorId::Dot,
            OperatorId::DotStar,
            OperatorId::Slash,
            OperatorId::SlashEq,
            OperatorId::ColonColon,
            OperatorId::Less,
            OperatorId::Shl,
            OperatorId::ShlEq,
            OperatorId::LessEq,
            OperatorId::Spaceship,
            OperatorId::Assign,
            OperatorId::Eq,
            OperatorId::Greater,
            OperatorId::GreaterEq,
            OperatorId::Shr,
            OperatorId::ShrEq,
            OperatorId::Conditional,
            OperatorId::Subscript,
            OperatorId::Caret,
            OperatorId::CaretEq,
            OperatorId::Pipe,
            OperatorId::PipeEq,
            OperatorId::PipePipe,
            OperatorId::Tilde,
        ];
        for op in all {
            assert!(TABLE.contains_key(&op), "missing rule for {op:?}");
        }
    }

    #[test]
    fn ambiguous_operators_are_flagged() {
        assert!(rule(OperatorId::Plus).is_ambiguous());
        assert!(!rule(OperatorId::Call).is_ambiguous());
    }

    #[test]
    fn colon_colon_is_not_overloadable() {
        assert!(!rule(OperatorId::ColonColon).overloadable);
    }
}
