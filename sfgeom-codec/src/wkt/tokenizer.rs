use crate::error::CodecError;

/// Class and text of a token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Keyword or identifier: a letter followed by letters and digits.
    Word(&'a str),
    /// Numeric literal, not validated until it is parsed.
    Number(&'a str),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
}

/// A token of the text input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Class and text.
    pub kind: TokenKind<'a>,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Text of the token as it appears in the input.
    pub fn text(&self) -> &'a str {
        match self.kind {
            TokenKind::Word(text) | TokenKind::Number(text) => text,
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Comma => ",",
        }
    }

    /// Whether the token is the given keyword, ignoring case.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Word(text) if text.eq_ignore_ascii_case(word))
    }

    /// Numeric value of the token. Besides number literals this accepts the words `nan`, `inf` and
    /// `infinity` in any case.
    pub fn number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Word(text) | TokenKind::Number(text) => text.parse().ok(),
            _ => None,
        }
    }
}

/// Lazy token stream over a text with a single token of lookahead. Whitespace is skipped.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    text: &'a str,
    position: usize,
    peeked: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a stream at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            peeked: None,
        }
    }

    /// Offset of the next token, or the length of the text at the end of input.
    pub fn offset(&mut self) -> Result<usize, CodecError> {
        Ok(self.peek()?.map_or(self.text.len(), |token| token.offset))
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<Token<'a>>, CodecError> {
        if self.peeked.is_none() {
            self.peeked = self.scan()?;
        }

        Ok(self.peeked)
    }

    /// Consumes the next token. Returns `None` at the end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, CodecError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.scan(),
        }
    }

    fn scan(&mut self) -> Result<Option<Token<'a>>, CodecError> {
        let rest = &self.text[self.position..];
        let trimmed = rest.trim_start();
        let offset = self.position + (rest.len() - trimmed.len());

        let Some(first) = trimmed.chars().next() else {
            self.position = self.text.len();
            return Ok(None);
        };

        let (kind, len) = match first {
            '(' => (TokenKind::LeftParen, 1),
            ')' => (TokenKind::RightParen, 1),
            ',' => (TokenKind::Comma, 1),
            c if c.is_ascii_alphabetic() => {
                let len = run_length(trimmed, |c| c.is_ascii_alphanumeric());
                (TokenKind::Word(&trimmed[..len]), len)
            }
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => {
                let len = run_length(trimmed, |c| {
                    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
                });
                (TokenKind::Number(&trimmed[..len]), len)
            }
            c => {
                return Err(CodecError::MalformedToken {
                    offset,
                    expected: "token".into(),
                    found: c.to_string(),
                })
            }
        };

        self.position = offset + len;
        Ok(Some(Token { kind, offset }))
    }
}

fn run_length(text: &str, accept: impl Fn(char) -> bool) -> usize {
    text.find(|c| !accept(c)).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(text: &str) -> Vec<TokenKind<'_>> {
        let mut tokenizer = Tokenizer::new(text);
        let mut kinds = vec![];
        while let Some(token) = tokenizer.next_token().unwrap() {
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn token_classes() {
        assert_eq!(
            kinds("POINT Z(1.5 -2e-3,\t+.5)"),
            vec![
                TokenKind::Word("POINT"),
                TokenKind::Word("Z"),
                TokenKind::LeftParen,
                TokenKind::Number("1.5"),
                TokenKind::Number("-2e-3"),
                TokenKind::Comma,
                TokenKind::Number("+.5"),
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn glued_suffix_is_one_word() {
        assert_eq!(kinds("pointzm"), vec![TokenKind::Word("pointzm")]);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new("  EMPTY ");
        let peeked = tokenizer.peek().unwrap();
        assert_eq!(peeked.map(|t| t.offset), Some(2));
        assert_eq!(tokenizer.next_token().unwrap(), peeked);
        assert_eq!(tokenizer.next_token().unwrap(), None);
        assert_eq!(tokenizer.offset().unwrap(), 8);
    }

    #[test]
    fn non_finite_numbers() {
        let mut tokenizer = Tokenizer::new("NaN -inf Infinity EMPTY");
        let values: Vec<Option<f64>> = std::iter::from_fn(|| tokenizer.next_token().unwrap())
            .map(|t| t.number())
            .collect();
        assert!(values[0].unwrap().is_nan());
        assert_eq!(values[1], Some(f64::NEG_INFINITY));
        assert_eq!(values[2], Some(f64::INFINITY));
        assert_eq!(values[3], None);
    }

    #[test]
    fn unexpected_character() {
        let mut tokenizer = Tokenizer::new("POINT [");
        tokenizer.next_token().unwrap();
        assert_matches!(
            tokenizer.next_token(),
            Err(CodecError::MalformedToken { offset: 6, found, .. }) if found == "["
        );
    }
}
