//! Recursive-descent parser for the regex surface syntax (§4.1).
//!
//! ```
//! use regexc::parser::parse;
//! use regexc::tree::Definitions;
//!
//! let defs = Definitions::new();
//! let tree = parse("[0-9]+", &defs).unwrap();
//! format!("{tree:?}");
//! ```

use crate::bytes::ByteMask;
use crate::error::{CompileError, CompileResult};
use crate::input::{is_end, Cursor, EOF};
use crate::tree::{Definitions, ExprTree};
use std::rc::Rc;

const MAX_REF_NAME_LEN: usize = 1024;

/// Bytes that carry syntactic meaning and must be backslash-escaped to be used literally
/// outside of a character class.
fn is_reserved(b: u8) -> bool {
    matches!(
        b,
        b'[' | b']' | b'(' | b')' | b'.' | b'-' | b'^' | b'|' | b'*' | b'+' | b'?' | b'\\'
    )
}

fn is_ref_name_byte(c: i32) -> bool {
    matches!(c, 0x30..=0x39 | 0x41..=0x5A | 0x61..=0x7A) || c == b'_' as i32
}

struct Parser<'a> {
    cur: Cursor<'a>,
    defs: &'a Definitions,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> i32 {
        self.cur.peek()
    }

    fn consume(&mut self) -> i32 {
        self.cur.consume()
    }

    fn err(&self, production: &'static str, msg: impl Into<String>) -> CompileError {
        CompileError::syntactic(self.cur.pos(), production, msg)
    }

    fn lex_err(&self, msg: impl Into<String>) -> CompileError {
        CompileError::lexical(self.cur.pos(), msg)
    }

    /// `regex ::= or_expr END`
    fn parse_regex(&mut self) -> CompileResult<ExprTree> {
        let tree = self.parse_or_expr()?;
        if !is_end(self.peek()) {
            return Err(self.err(
                "regex",
                format!(
                    "unexpected char after expression: {} (expected a terminator)",
                    crate::bytes::print_byte(self.peek())
                ),
            ));
        }
        Ok(tree)
    }

    /// `or_expr ::= and_expr ('|' and_expr)*`
    fn parse_or_expr(&mut self) -> CompileResult<ExprTree> {
        let mut children = vec![Rc::new(self.parse_and_expr()?)];
        while self.peek() == b'|' as i32 {
            self.consume();
            children.push(Rc::new(self.parse_and_expr()?));
        }
        Ok(fold_singleton(children, ExprTree::Alt))
    }

    /// `and_expr ::= modifier+` (concatenation, left-associative)
    fn parse_and_expr(&mut self) -> CompileResult<ExprTree> {
        let mut children = Vec::new();
        loop {
            children.push(Rc::new(self.parse_modifier()?));
            match self.peek() {
                c if matches!(c, 0x5D | 0x7D | 0x2D | 0x5E | 0x2A | 0x2B | 0x3F) => {
                    // `] } - ^ * + ?` can never directly follow a completed single/modifier
                    return Err(self.err(
                        "and_expr",
                        format!("unexpected char: {}", crate::bytes::print_byte(c)),
                    ));
                }
                c if c == b')' as i32 || c == b'|' as i32 || is_end(c) => {
                    return Ok(fold_singleton(children, ExprTree::Concat));
                }
                _ => {}
            }
        }
    }

    /// `modifier ::= single ('*' | '+' | '?')?`
    fn parse_modifier(&mut self) -> CompileResult<ExprTree> {
        let inner = self.parse_single()?;
        match self.peek() {
            c if c == b'*' as i32 => {
                self.consume();
                Ok(ExprTree::Star(Rc::new(inner)))
            }
            c if c == b'+' as i32 => {
                self.consume();
                Ok(ExprTree::Plus(Rc::new(inner)))
            }
            c if c == b'?' as i32 => {
                self.consume();
                Ok(ExprTree::Opt(Rc::new(inner)))
            }
            _ => Ok(inner),
        }
    }

    /// `single ::= class | ref | group | wildcard | char`
    fn parse_single(&mut self) -> CompileResult<ExprTree> {
        match self.peek() {
            c if c == b'{' as i32 => self.parse_ref(),
            c if c == b'[' as i32 => self.parse_class(),
            c if c == b'(' as i32 => self.parse_group(),
            c if c == b'.' as i32 => {
                self.consume();
                Ok(ExprTree::Wildcard)
            }
            c if matches!(c, 0x5D | 0x29 | 0x2D | 0x5E | 0x7C | 0x2A | 0x2B | 0x3F) || c == EOF => {
                Err(self.err(
                    "single",
                    format!("unexpected char: {}", crate::bytes::print_byte(c)),
                ))
            }
            _ => self.parse_char().map(ExprTree::Char),
        }
    }

    /// `group ::= '(' or_expr ')'`
    fn parse_group(&mut self) -> CompileResult<ExprTree> {
        self.consume(); // '('
        let inner = self.parse_or_expr()?;
        if self.peek() != b')' as i32 {
            return Err(self.err("group", "missing closing ')'"));
        }
        self.consume();
        Ok(inner)
    }

    /// `class ::= '[' '^'? item+ ']'`, `item ::= char ('-' char)?`
    fn parse_class(&mut self) -> CompileResult<ExprTree> {
        self.consume(); // '['
        let inverted = if self.peek() == b'^' as i32 {
            self.consume();
            true
        } else {
            false
        };
        let mut mask = ByteMask::empty();
        loop {
            self.parse_item(&mut mask)?;
            match self.peek() {
                c if matches!(c, 0x5B | 0x28 | 0x29 | 0x2E | 0x2D | 0x5E | 0x7C | 0x2A | 0x2B | 0x3F)
                    || c == EOF =>
                {
                    return Err(self.err(
                        "class",
                        format!("unexpected char: {}", crate::bytes::print_byte(c)),
                    ));
                }
                c if c == b']' as i32 => {
                    self.consume();
                    break;
                }
                _ => {}
            }
        }
        Ok(if inverted {
            ExprTree::InvClass(mask)
        } else {
            ExprTree::Class(mask)
        })
    }

    fn parse_item(&mut self, mask: &mut ByteMask) -> CompileResult<()> {
        let lo = self.parse_char()?;
        if self.peek() == b'-' as i32 {
            self.consume();
            let hi = self.parse_char()?;
            if hi <= lo {
                return Err(self.err("class", "range start is not lower than end"));
            }
            mask.set_range(lo, hi);
        } else {
            mask.set(lo);
        }
        Ok(())
    }

    /// `ref ::= '{' [A-Za-z0-9_]{1,1024} '}'`
    fn parse_ref(&mut self) -> CompileResult<ExprTree> {
        self.consume(); // '{'
        let mut name = String::new();
        loop {
            match self.peek() {
                c if is_ref_name_byte(c) => {
                    if name.len() >= MAX_REF_NAME_LEN {
                        return Err(self.err(
                            "ref",
                            format!("name cannot be longer than {MAX_REF_NAME_LEN} chars"),
                        ));
                    }
                    name.push(self.consume() as u8 as char);
                }
                c if c == b'}' as i32 => {
                    self.consume();
                    break;
                }
                c => {
                    return Err(self.err(
                        "ref",
                        format!("unexpected char: {}", crate::bytes::print_byte(c)),
                    ));
                }
            }
        }
        if name.is_empty() {
            return Err(self.err("ref", "reference name must not be empty"));
        }
        match self.defs.get(&name) {
            Some(target) => Ok(ExprTree::Ref(target)),
            None => Err(self.err(
                "ref",
                format!("regular definition with name does not exist: '{name}'"),
            )),
        }
    }

    /// `char ::= <printable byte excluding regex-specials> | '\\' <escape>`
    fn parse_char(&mut self) -> CompileResult<u8> {
        if self.peek() == b'\\' as i32 {
            self.consume();
            return self.parse_escape();
        }
        match self.peek() {
            c if is_reserved(c as u8) && (0..256).contains(&c) => Err(self.err(
                "char",
                format!("unescaped special char: {}", crate::bytes::print_byte(c)),
            )),
            0x21..=0x7E => Ok(self.consume() as u8),
            c => Err(self.lex_err(format!(
                "unexpected char: {}",
                crate::bytes::print_byte(c)
            ))),
        }
    }

    /// `escape ::= one of [ ] ( ) . - ^ | * + ? \\ | '0'|'t'|'n'|'s'|'r' | 'x' hex hex`
    fn parse_escape(&mut self) -> CompileResult<u8> {
        match self.peek() {
            c if (0..256).contains(&c) && is_reserved(c as u8) => Ok(self.consume() as u8),
            c if c == b'0' as i32 => {
                self.consume();
                Ok(0x00)
            }
            c if c == b't' as i32 => {
                self.consume();
                Ok(0x09)
            }
            c if c == b'n' as i32 => {
                self.consume();
                Ok(0x0A)
            }
            c if c == b's' as i32 => {
                self.consume();
                Ok(0x20)
            }
            c if c == b'r' as i32 => {
                self.consume();
                Ok(0x0D)
            }
            c if c == b'x' as i32 => {
                self.consume();
                // High nibble first, then low — the source parses these the other way
                // around; that's a bug, not the intended semantics (§9).
                let hi = self.parse_hex_digit()?;
                let lo = self.parse_hex_digit()?;
                Ok(hi * 16 + lo)
            }
            c => Err(self.lex_err(format!(
                "unexpected char after '\\': {}",
                crate::bytes::print_byte(c)
            ))),
        }
    }

    fn parse_hex_digit(&mut self) -> CompileResult<u8> {
        match self.peek() {
            c @ 0x30..=0x39 => {
                self.consume();
                Ok((c - 0x30) as u8)
            }
            c @ 0x61..=0x66 => {
                self.consume();
                Ok((c - 0x61 + 10) as u8)
            }
            c @ 0x41..=0x46 => {
                self.consume();
                Ok((c - 0x41 + 10) as u8)
            }
            c => Err(self.lex_err(format!(
                "escaped hex char: unexpected char: {}",
                crate::bytes::print_byte(c)
            ))),
        }
    }
}

fn fold_singleton(mut children: Vec<Rc<ExprTree>>, wrap: fn(Vec<Rc<ExprTree>>) -> ExprTree) -> ExprTree {
    if children.len() == 1 {
        Rc::try_unwrap(children.pop().unwrap()).unwrap_or_else(|rc| (*rc).clone())
    } else {
        wrap(children)
    }
}

/// Parses `src` as a regex, resolving `{name}` references against `defs`.
pub fn parse(src: &str, defs: &Definitions) -> CompileResult<ExprTree> {
    let mut parser = Parser {
        cur: Cursor::new(src.as_bytes()),
        defs,
    };
    parser.parse_regex()
}
