//! Word tokenizer using logos
//!
//! Splits text the way the Penn Treebank tokenizer does for the command
//! sentences we care about: punctuation becomes its own token, clitics and
//! `n't` are split from their host word, and numbers keep their decimal
//! point and thousands separators.

use logos::Logos;

/// Raw lexemes
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Lexeme {
    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Integer(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().to_string())]
    Decimal(String),

    #[regex(r"[0-9]{1,3}(,[0-9]{3})+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Grouped(String),

    // Words, with internal hyphens ("semi-detached")
    #[regex(r"\p{L}+(-\p{L}+)*", |lex| lex.slice().to_string())]
    Word(String),

    // "don't" -> "do" + "n't"
    #[regex(r"[A-Za-z]+[nN]'[tT]", |lex| lex.slice().to_string())]
    Negated(String),

    // "building's" -> "building" + "'s"; a quote not attached to a word is
    // punctuation
    #[regex(r"\p{L}+(-\p{L}+)*'([sSdDmM]|re|RE|ve|VE|ll|LL)", |lex| lex.slice().to_string())]
    Clitic(String),

    #[regex(r"[^\s\p{L}0-9]", |lex| lex.slice().to_string())]
    Punct(String),
}

impl Lexeme {
    /// Check if this lexeme is a word (including split contractions)
    pub fn is_word(&self) -> bool {
        matches!(self, Lexeme::Word(_) | Lexeme::Negated(_) | Lexeme::Clitic(_))
    }

    /// Check if this lexeme is a numeric literal
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Lexeme::Integer(_) | Lexeme::Decimal(_) | Lexeme::Grouped(_)
        )
    }

    /// Surface tokens this lexeme contributes
    fn push_surface(self, out: &mut Vec<String>) {
        match self {
            Lexeme::Negated(s) => {
                let split = s.len() - 3;
                out.push(s[..split].to_string());
                out.push(s[split..].to_string());
            }
            Lexeme::Clitic(s) => {
                let split = s.rfind('\'').unwrap_or(s.len());
                out.push(s[..split].to_string());
                out.push(s[split..].to_string());
            }
            Lexeme::Integer(s)
            | Lexeme::Decimal(s)
            | Lexeme::Grouped(s)
            | Lexeme::Word(s)
            | Lexeme::Punct(s) => out.push(s),
        }
    }
}

/// Tokenize a command string into surface tokens
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for lexeme in Lexeme::lexer(input).filter_map(|r| r.ok()) {
        lexeme.push_surface(&mut tokens);
    }
    tokens
}
