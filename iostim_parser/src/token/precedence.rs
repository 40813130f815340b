//! Operator precedence and associativity definitions
//!
//! Levels follow the usual C/Python ordering for integer expressions:
//! `|` < `^` < `&` < shifts < additive < multiplicative < prefix < `**`.

use super::Token;

/// Operator precedence levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum Precedence {
    /// Lowest precedence (entry point)
    Lowest = 0,
    /// Conditional: ? :
    Conditional = 1,
    /// Lazy or: ||
    LazyOr = 2,
    /// Lazy and: &&
    LazyAnd = 3,
    /// Comparison: <, >, ==, etc.
    Comparison = 4,
    /// Bitwise or: |
    BitOr = 5,
    /// Bitwise xor: ^
    BitXor = 6,
    /// Bitwise and: &
    BitAnd = 7,
    /// Bitshift: <<, >>
    Bitshift = 8,
    /// Additive: +, -
    Plus = 9,
    /// Multiplicative: *, /, //, %
    Times = 10,
    /// Prefix (unary)
    Prefix = 11,
    /// Power: **
    Power = 12,
}

impl TryFrom<i8> for Precedence {
    type Error = ();

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Precedence::Lowest),
            1 => Ok(Precedence::Conditional),
            2 => Ok(Precedence::LazyOr),
            3 => Ok(Precedence::LazyAnd),
            4 => Ok(Precedence::Comparison),
            5 => Ok(Precedence::BitOr),
            6 => Ok(Precedence::BitXor),
            7 => Ok(Precedence::BitAnd),
            8 => Ok(Precedence::Bitshift),
            9 => Ok(Precedence::Plus),
            10 => Ok(Precedence::Times),
            11 => Ok(Precedence::Prefix),
            12 => Ok(Precedence::Power),
            _ => Err(()),
        }
    }
}

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl Token {
    /// Get the precedence and associativity of a binary operator
    pub fn binary_precedence(&self) -> Option<(Precedence, Associativity)> {
        use Associativity::{Left, Right};
        use Precedence::*;

        Some(match self {
            Token::OrOr => (LazyOr, Left),
            Token::AndAnd => (LazyAnd, Left),

            Token::Lt | Token::Gt | Token::LtEq | Token::GtEq | Token::EqEq | Token::NotEq => {
                (Comparison, Left)
            }

            Token::Pipe => (BitOr, Left),
            Token::Caret => (BitXor, Left),
            Token::Amp => (BitAnd, Left),

            Token::LtLt | Token::GtGt => (Bitshift, Left),

            Token::Plus | Token::Minus => (Plus, Left),

            Token::Star | Token::Slash | Token::SlashSlash | Token::Percent => (Times, Left),

            Token::StarStar => (Power, Right),

            _ => return None,
        })
    }

    /// Get the precedence of a unary operator
    pub fn unary_precedence(&self) -> Option<Precedence> {
        match self {
            Token::Plus | Token::Minus | Token::Tilde | Token::Bang => Some(Precedence::Prefix),
            _ => None,
        }
    }
}
