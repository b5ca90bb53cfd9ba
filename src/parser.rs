use logos::{Lexer, Logos};
use tracing::warn;

use crate::{
    error::{parser::*, program::ProgramError},
    runtime::Registers,
    scanner::TokenKind,
    Image, Program,
};

macro_rules! parse_error {
    ($err:expr) => {{
        let err = $err;
        warn!(%err, "rejected input");
        return Err(err);
    }};
}

/// Reads the textual machine description:
///
/// ```text
/// Register A: 729
/// Register B: 0
/// Register C: 0
///
/// Program: 0,1,5,4,3,0
/// ```
pub struct Parser<'src> {
    pub lexer: Lexer<'src, TokenKind>,
    pub current: Option<TokenKind>,
    pub line: usize,
    registers: [Option<u64>; 3],
    program: Option<Program>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: TokenKind::lexer(source),
            current: None,
            line: 1,
            registers: [None; 3],
            program: None,
        }
    }

    pub fn parse(mut self) -> ParseResult<Image> {
        while let Some(token) = self.next() {
            match token {
                TokenKind::Newline => {}
                TokenKind::Register => self.register_line()?,
                TokenKind::Program => self.program_line()?,
                other => parse_error!(self.unexpected(
                    "Expected 'Register' or 'Program' at start of line",
                    None,
                    Some(other)
                )),
            }
        }

        let mut values = [0u64; 3];
        for (idx, name) in ['A', 'B', 'C'].into_iter().enumerate() {
            values[idx] = match self.registers[idx] {
                Some(v) => v,
                None => parse_error!(ParseError::RegisterError(RegisterError::Missing(name))),
            };
        }
        let program = match self.program {
            Some(p) => p,
            None => parse_error!(ParseError::MissingProgram),
        };
        Ok(Image {
            registers: Registers::new(values[0], values[1], values[2]),
            program,
        })
    }

    /// Wrapper around [Lexer::next] that keeps the line count
    fn next(&mut self) -> Option<TokenKind> {
        self.current = self.lexer.next();
        if self.current == Some(TokenKind::Newline) {
            self.line += 1;
        }
        self.current.clone()
    }

    /// Get the next token without advancing
    fn peek(&self) -> Option<TokenKind> {
        self.lexer.clone().next()
    }

    /// Consume the next token only if it is `expected`
    fn tag(&mut self, expected: &TokenKind) -> bool {
        if self.peek().as_ref() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, why: &'static str) -> ParseResult<()> {
        match self.next() {
            Some(k) if k == kind => Ok(()),
            received => parse_error!(self.unexpected(why, Some(kind), received)),
        }
    }

    fn number(&mut self, why: &'static str) -> ParseResult<u64> {
        match self.next() {
            Some(TokenKind::Number(n)) => Ok(n),
            received => parse_error!(self.unexpected(why, Some(TokenKind::Number(0)), received)),
        }
    }

    fn end_of_line(&mut self) -> ParseResult<()> {
        match self.next() {
            None | Some(TokenKind::Newline) => Ok(()),
            received => parse_error!(self.unexpected(
                "Expected end of line",
                Some(TokenKind::Newline),
                received
            )),
        }
    }

    fn unexpected(
        &self,
        reason: &'static str,
        expected: Option<TokenKind>,
        received: Option<TokenKind>,
    ) -> ParseError {
        if received.is_none() {
            return ParseError::TokenError(TokenError::EarlyEof);
        }
        ParseError::TokenError(TokenError::ExpectedToken {
            reason,
            expected,
            received,
            line: self.line,
        })
    }

    /// `Register <name>: <value>`
    fn register_line(&mut self) -> ParseResult<()> {
        let name = match self.next() {
            Some(TokenKind::RegisterName(c)) => c,
            received => parse_error!(self.unexpected(
                "Expected register name after 'Register'",
                Some(TokenKind::RegisterName('A')),
                received
            )),
        };
        self.consume(TokenKind::Colon, "Expected ':' after register name")?;
        let value = self.number("Expected register value")?;

        let slot = &mut self.registers[(name as u8 - b'A') as usize];
        if slot.is_some() {
            parse_error!(ParseError::RegisterError(RegisterError::Duplicate(name)))
        }
        *slot = Some(value);
        self.end_of_line()
    }

    /// `Program: <digit>(,<digit>)*`
    fn program_line(&mut self) -> ParseResult<()> {
        if self.program.is_some() {
            parse_error!(ParseError::DuplicateProgram)
        }
        self.consume(TokenKind::Colon, "Expected ':' after 'Program'")?;

        let mut digits = vec![];
        loop {
            let n = self.number("Expected program digit")?;
            if n > 7 {
                parse_error!(ParseError::InvalidProgram(ProgramError::ValueOutOfRange {
                    index: digits.len(),
                    value: n
                }))
            }
            digits.push(n as u8);
            if !self.tag(&TokenKind::Comma) {
                break;
            }
        }
        self.program = Some(Program::new(digits)?);
        self.end_of_line()
    }
}

pub fn parse_image(source: &str) -> ParseResult<Image> {
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EXAMPLE: &str = "Register A: 729\nRegister B: 0\nRegister C: 0\n\nProgram: 0,1,5,4,3,0\n";

    #[test]
    fn parse_example() {
        let image = parse_image(EXAMPLE).unwrap();
        assert_eq!(image.registers, Registers::new(729, 0, 0));
        assert_eq!(image.program.len(), 6);
        assert_eq!(image.program.as_slice()[0], 0);
        assert_eq!(image.program.as_slice()[2], 5);
    }

    #[test]
    fn registers_in_any_order_without_trailing_newline() {
        let image = parse_image("Register C: 3\nRegister A: 1\nRegister B: 2\nProgram: 2,6").unwrap();
        assert_eq!(image.registers, Registers::new(1, 2, 3));
    }

    #[test]
    fn missing_register() {
        assert_eq!(
            parse_image("Register A: 1\nRegister C: 2\nProgram: 2,6"),
            Err(ParseError::RegisterError(RegisterError::Missing('B')))
        );
    }

    #[test]
    fn duplicate_register() {
        assert_eq!(
            parse_image("Register A: 1\nRegister A: 2\n"),
            Err(ParseError::RegisterError(RegisterError::Duplicate('A')))
        );
    }

    #[test]
    fn missing_program() {
        assert_eq!(
            parse_image("Register A: 1\nRegister B: 0\nRegister C: 0\n"),
            Err(ParseError::MissingProgram)
        );
    }

    #[test]
    fn bad_digit() {
        assert_eq!(
            parse_image("Register A: 1\nRegister B: 0\nRegister C: 0\nProgram: 0,12"),
            Err(ParseError::InvalidProgram(ProgramError::ValueOutOfRange { index: 1, value: 12 }))
        );
    }

    #[test]
    fn odd_program() {
        assert_eq!(
            parse_image("Register A: 1\nRegister B: 0\nRegister C: 0\nProgram: 0,1,5"),
            Err(ParseError::InvalidProgram(ProgramError::OddLength(3)))
        );
    }

    #[test]
    fn token_errors_carry_line() {
        let err = parse_image("Register A: 1\nRegister B 0\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::TokenError(TokenError::ExpectedToken {
                reason: "Expected ':' after register name",
                expected: Some(TokenKind::Colon),
                received: Some(TokenKind::Number(0)),
                line: 2,
            })
        );
        assert_eq!(
            parse_image("Register A:"),
            Err(ParseError::TokenError(TokenError::EarlyEof))
        );
    }
}
