//! Language-version ordering used to gate kinds, type-bit combinations, and
//! checker rules. `LangVersion` is a plain totally-ordered enum, `C89 <
//! C95 < ... < CPP20`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum LangVersion {
    C89,
    C95,
    C99,
    C11,
    C17,
    C23,
    Cpp98,
    Cpp03,
    Cpp11,
    Cpp14,
    Cpp17,
    Cpp20,
}

impl LangVersion {
    pub const ALL: [LangVersion; 12] = [
        LangVersion::C89,
        LangVersion::C95,
        LangVersion::C99,
        LangVersion::C11,
        LangVersion::C17,
        LangVersion::C23,
        LangVersion::Cpp98,
        LangVersion::Cpp03,
        LangVersion::Cpp11,
        LangVersion::Cpp14,
        LangVersion::Cpp17,
        LangVersion::Cpp20,
    ];

    pub fn is_cpp(self) -> bool {
        self >= LangVersion::Cpp98
    }

    pub fn is_c(self) -> bool {
        !self.is_cpp()
    }

    /// Parses one of the CLI's recognized `--language` values. Parsing
    /// itself is the external front-end's job; this is exposed so a
    /// grammar driver can map flag text to a `LangVersion` without
    /// duplicating the version list.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "c89" | "c90" | "k&r" => LangVersion::C89,
            "c95" => LangVersion::C95,
            "c99" => LangVersion::C99,
            "c11" => LangVersion::C11,
            "c17" | "c18" => LangVersion::C17,
            "c23" => LangVersion::C23,
            "c++98" => LangVersion::Cpp98,
            "c++03" => LangVersion::Cpp03,
            "c++11" => LangVersion::Cpp11,
            "c++14" => LangVersion::Cpp14,
            "c++17" => LangVersion::Cpp17,
            "c++20" => LangVersion::Cpp20,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LangVersion::C89 => "c89",
            LangVersion::C95 => "c95",
            LangVersion::C99 => "c99",
            LangVersion::C11 => "c11",
            LangVersion::C17 => "c17",
            LangVersion::C23 => "c23",
            LangVersion::Cpp98 => "c++98",
            LangVersion::Cpp03 => "c++03",
            LangVersion::Cpp11 => "c++11",
            LangVersion::Cpp14 => "c++14",
            LangVersion::Cpp17 => "c++17",
            LangVersion::Cpp20 => "c++20",
        }
    }
}

impl fmt::Display for LangVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for LangVersion {
    /// `cdecl`'s own default; `cppdecl`/`cxxdecl` invocation overrides this
    /// to `Cpp17` at the CLI boundary, not here.
    fn default() -> Self {
        LangVersion::C17
    }
}
