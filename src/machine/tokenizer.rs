/// A piece of program text: either a word or the end of a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    LineBreak,
}

impl Token {
    pub fn word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            Token::LineBreak => None,
        }
    }
}

/// Split program text into upper-cased words, with a line break after each
/// non-empty line. `#` and `;` start a comment.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.split(['#', ';']).next().unwrap_or(line);
        let before = out.len();
        out.extend(
            line.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|w| !w.is_empty())
                .map(|w| Token::Word(w.to_uppercase())),
        );
        if out.len() > before {
            out.push(Token::LineBreak);
        }
    }
    out
}

/// The words of a stream, line breaks dropped.
pub fn words(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|t| t.word().map(str::to_string))
        .collect()
}
