use logos::Logos;

#[derive(PartialEq, Debug, Clone, PartialOrd, Logos)]
pub enum TokenKind {
    // Keywords.
    #[token("Register")]
    Register,
    #[token("Program")]
    Program,

    // Single-character tokens.
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // Literals.
    #[regex("[ABC]", |lex| lex.slice().chars().next())]
    RegisterName(char),
    #[regex("[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Number(u64),

    #[token("\n")]
    Newline,

    #[error]
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Error,
}
