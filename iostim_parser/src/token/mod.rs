//! Token definitions for the stimulus expression lexer
//!
//! The token set is deliberately wider than what the evaluator accepts:
//! calls, comparisons, collections and non-integer literals all lex and
//! parse so that lowering can reject them by name.

mod precedence;


use logos::Logos;

pub use precedence::{Associativity, Precedence};

/// Expression tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // ==================== Arithmetic Operators ====================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("%")]
    Percent,

    // ==================== Bitwise Operators ====================
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // ==================== Logical Operators ====================
    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    // ==================== Comparison Operators ====================
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    // ==================== Assignment ====================
    #[token("=")]
    Eq,

    // ==================== Literals ====================
    #[regex(r"0[bB][01]([01]|_[01])*")]
    BinaryLiteral,
    #[regex(r"0[oO][0-7]([0-7]|_[0-7])*")]
    OctalLiteral,
    #[regex(r"0[xX][0-9a-fA-F]([0-9a-fA-F]|_[0-9a-fA-F])*")]
    HexLiteral,
    #[regex(r"[0-9]([0-9]|_[0-9])*")]
    DecimalLiteral,
    #[regex(r"[0-9]([0-9]|_[0-9])*\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]([0-9]|_[0-9])*[eE][+-]?[0-9]+")]
    FloatLiteral,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    // ==================== Identifiers ====================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}

impl Token {
    /// Check if this token is an integer literal in any radix
    pub fn is_integer_literal(&self) -> bool {
        matches!(
            self,
            Token::BinaryLiteral | Token::OctalLiteral | Token::HexLiteral | Token::DecimalLiteral
        )
    }

    /// Human-readable description used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::Comma => "','",
            Token::Semicolon => "';'",
            Token::Question => "'?'",
            Token::Colon => "':'",
            Token::Dot => "'.'",
            Token::Identifier => "identifier",
            t if t.is_integer_literal() => "integer literal",
            Token::FloatLiteral => "float literal",
            Token::StringLiteral => "string literal",
            _ => "operator",
        }
    }
}
