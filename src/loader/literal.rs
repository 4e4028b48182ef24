//! Parser for the JavaScript array literals the generator emits.
//!
//! Accepts the subset the index scripts use: arrays, single- or double-quoted
//! strings, numbers, `null`, `true` and `false`, with trailing commas and
//! comments allowed. The result is a [`serde_json::Value`] so the record
//! normalization can work on the same tree whether the input was JSON or JS.

use crate::error::LoadError;
use serde_json::{Number, Value};

/// Deepest array nesting accepted. Generator output nests four levels.
const MAX_DEPTH: usize = 128;

/// Parses a single literal spanning all of `src`.
///
/// `base` is added to every reported offset so errors point into the original
/// payload when `src` is a slice of it.
pub(crate) fn parse_literal(src: &str, base: usize) -> Result<Value, LoadError> {
    let mut parser = Parser {
        src,
        pos: 0,
        base,
        depth: 0,
    };
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.peek() == Some(';') {
        parser.pos += 1;
        parser.skip_trivia()?;
    }
    if parser.pos < src.len() {
        return Err(parser.error("unexpected content after literal"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    base: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> LoadError {
        LoadError::Syntax {
            offset: self.base + self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<(), LoadError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                match trimmed.find('\n') {
                    Some(end) => self.pos += end + 1,
                    None => self.pos = self.src.len(),
                }
            } else if trimmed.starts_with("/*") {
                match trimmed[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => return Err(self.error("unterminated block comment")),
                }
            } else {
                return Ok(());
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, LoadError> {
        match self.peek() {
            Some('[') => self.parse_array(),
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                self.parse_string(quote).map(Value::String)
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() => self.parse_keyword(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, LoadError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let array = self.parse_array_items();
        self.depth -= 1;
        array
    }

    fn parse_array_items(&mut self) -> Result<Value, LoadError> {
        // Opening bracket
        self.pos += 1;
        let mut items = vec![];

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);
            self.skip_trivia()?;

            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Value::Array(items)),
                Some(c) => {
                    self.pos -= c.len_utf8();
                    return Err(self.error(format!("expected ',' or ']', found '{}'", c)));
                }
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LoadError> {
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error("unterminated string"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\\' => self.parse_escape(&mut out)?,
                '\n' => return Err(self.error("newline in string literal")),
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), LoadError> {
        let Some(c) = self.bump() else {
            return Err(self.error("unterminated escape sequence"));
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            'x' => {
                let code = self.parse_hex(2)?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => {
                let c = self.parse_unicode_escape()?;
                out.push(c);
            }
            // \\ \' \" \/ and any other character escape to themselves
            other => out.push(other),
        }
        Ok(())
    }

    fn parse_unicode_escape(&mut self) -> Result<char, LoadError> {
        if self.peek() == Some('{') {
            self.pos += 1;
            let end = self
                .rest()
                .find('}')
                .ok_or_else(|| self.error("unterminated unicode escape"))?;
            let digits = &self.rest()[..end];
            let code = u32::from_str_radix(digits, 16)
                .map_err(|_| self.error("invalid unicode escape"))?;
            self.pos += end + 1;
            return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        let high = self.parse_hex(4)?;
        if !(0xD800..0xDC00).contains(&high) {
            return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        // High surrogate, expect a `\uXXXX` low surrogate to follow
        if self.rest().starts_with("\\u") {
            let saved = self.pos;
            self.pos += 2;
            let low = self.parse_hex(4)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.pos = saved;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn parse_hex(&mut self, len: usize) -> Result<u32, LoadError> {
        let digits = self
            .rest()
            .get(..len)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid hex escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid hex escape"))?;
        self.pos += len;
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value, LoadError> {
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
            .unwrap_or(self.rest().len());
        let text = &self.rest()[..len];

        let number = if let Ok(int) = text.parse::<i64>() {
            Number::from(int)
        } else {
            text.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .ok_or_else(|| self.error(format!("invalid number '{}'", text)))?
        };
        self.pos = start + len;
        Ok(Value::Number(number))
    }

    fn parse_keyword(&mut self) -> Result<Value, LoadError> {
        let len = self
            .rest()
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(self.rest().len());
        let value = match &self.rest()[..len] {
            "null" | "undefined" => Value::Null,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => return Err(self.error(format!("unexpected identifier '{}'", other))),
        };
        self.pos += len;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_search_data_record() {
        let value = parse_literal(
            "[['p_908',['P',['../a.html#x',1,'libff::bn128_ate_G1_precomp']]]]",
            0,
        )
        .unwrap();
        check!(value == json!([["p_908", ["P", ["../a.html#x", 1, "libff::bn128_ate_G1_precomp"]]]]));
    }

    #[rstest]
    #[case(r#""double""#, json!("double"))]
    #[case(r"'it\'s'", json!("it's"))]
    #[case(r"'a\\b'", json!("a\\b"))]
    #[case(r"'\x41B\u{43}'", json!("ABC"))]
    #[case(r"'🦀'", json!("🦀"))]
    #[case(r"'\uD83E'", json!("\u{FFFD}"))]
    #[case("'tab\\tnew\\n'", json!("tab\tnew\n"))]
    #[case("[1, -2, 3.5, null, true, false]", json!([1, -2, 3.5, null, true, false]))]
    #[case("[1, 2, ]", json!([1, 2]))]
    #[case("[ ]", json!([]))]
    #[case("[1 /* one */, // two\n 2];", json!([1, 2]))]
    fn test_parse_values(#[case] input: &str, #[case] expected: Value) {
        check!(parse_literal(input, 0).unwrap() == expected);
    }

    #[rstest]
    #[case("['open'", 7)]
    #[case("['unterminated]", 15)]
    #[case("[1 2]", 3)]
    #[case("[1] extra", 4)]
    #[case("{}", 0)]
    #[case("[nope]", 1)]
    #[case("", 0)]
    fn test_syntax_errors(#[case] input: &str, #[case] offset: usize) {
        let_assert!(Err(LoadError::Syntax { offset: actual, .. }) = parse_literal(input, 0));
        check!(actual == offset);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let input = "[".repeat(100_000);
        let_assert!(Err(LoadError::Syntax { offset, message }) = parse_literal(&input, 0));
        check!(offset == MAX_DEPTH);
        check!(message == "nesting too deep");
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let input = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        check!(parse_literal(&input, 0).is_ok());
    }

    #[test]
    fn test_offset_includes_base() {
        let_assert!(Err(LoadError::Syntax { offset, .. }) = parse_literal("[1 2]", 100));
        check!(offset == 103);
    }

    #[test]
    fn test_unicode_passthrough() {
        check!(parse_literal("['Москва', '日本']", 0).unwrap() == json!(["Москва", "日本"]));
    }
}
