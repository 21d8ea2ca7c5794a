//! Matching for the small CSS subset the selector resolver emits.
//!
//! Supported: type and universal selectors, `.class`, `[attr="v"]`,
//! `[attr$="v"]`, `:nth-of-type(n)`, descendant and child combinators.
//! Anything else is a parse error so callers can treat it as "no match".

use thiserror::Error;

use crate::dom::dom_model::{ElementRef, NodeId, PageDocument};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorParseError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{found}' at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("unterminated {0}")]
    Unterminated(&'static str),
    #[error("unsupported pseudo-class ':{0}'")]
    UnsupportedPseudo(String),
    #[error("invalid nth-of-type argument '{0}'")]
    InvalidNth(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Equals,
    EndsWith,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Class(String),
    Attribute { name: String, op: AttrOp, value: String },
    NthOfType(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    conditions: Vec<Condition>,
}

/// A parsed complex selector. `parts[i].0` is the combinator linking part
/// `i` to part `i - 1`; the first combinator is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelector {
    parts: Vec<(Combinator, Compound)>,
}

impl CompiledSelector {
    pub fn parse(input: &str) -> Result<Self, SelectorParseError> {
        Parser::new(input).parse()
    }

    pub fn matches(&self, el: ElementRef<'_>) -> bool {
        match self.parts.len() {
            0 => false,
            n => matches_from(el, &self.parts, n - 1),
        }
    }
}

fn matches_from(el: ElementRef<'_>, parts: &[(Combinator, Compound)], i: usize) -> bool {
    let (combinator, compound) = &parts[i];
    if !compound_matches(el, compound) {
        return false;
    }
    if i == 0 {
        return true;
    }
    match combinator {
        Combinator::Child => el
            .parent_element()
            .is_some_and(|p| matches_from(p, parts, i - 1)),
        Combinator::Descendant => {
            let mut cursor = el.parent_element();
            while let Some(ancestor) = cursor {
                if matches_from(ancestor, parts, i - 1) {
                    return true;
                }
                cursor = ancestor.parent_element();
            }
            false
        }
    }
}

fn compound_matches(el: ElementRef<'_>, compound: &Compound) -> bool {
    if let Some(tag) = &compound.tag {
        if !tag.eq_ignore_ascii_case(el.tag_name()) {
            return false;
        }
    }
    compound.conditions.iter().all(|c| match c {
        Condition::Class(name) => el.class_list().contains(&name.as_str()),
        Condition::Attribute { name, op, value } => match (el.attribute(name), op) {
            (Some(actual), AttrOp::Equals) => actual == value.as_str(),
            (Some(actual), AttrOp::EndsWith) => {
                !value.is_empty() && actual.ends_with(value.as_str())
            }
            (None, _) => false,
        },
        Condition::NthOfType(n) => el.type_position().0 == *n,
    })
}

impl PageDocument {
    /// Every connected element matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorParseError> {
        let compiled = CompiledSelector::parse(selector)?;
        Ok(self
            .elements()
            .into_iter()
            .filter(|el| compiled.matches(*el))
            .map(|el| el.id())
            .collect())
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Parser {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self) -> SelectorParseError {
        match self.peek() {
            Some(found) => SelectorParseError::Unexpected {
                found,
                offset: self.pos,
            },
            None => SelectorParseError::Unterminated("selector"),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse(mut self) -> Result<CompiledSelector, SelectorParseError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorParseError::Empty);
        }

        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;
        loop {
            let compound = self.compound()?;
            parts.push((combinator, compound));

            let had_space = self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinator = Combinator::Child;
                }
                Some(_) if had_space => combinator = Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            }
        }

        Ok(CompiledSelector { parts })
    }

    fn compound(&mut self) -> Result<Compound, SelectorParseError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                universal = true;
            }
            Some(c) if is_ident_char(c) => compound.tag = Some(self.ident()?),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.conditions.push(Condition::Class(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    compound.conditions.push(self.attribute()?);
                }
                Some(':') => {
                    self.pos += 1;
                    compound.conditions.push(self.pseudo()?);
                }
                _ => break,
            }
        }

        if !universal && compound.tag.is_none() && compound.conditions.is_empty() {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String, SelectorParseError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.unexpected());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<Condition, SelectorParseError> {
        let name = self.ident()?;
        let op = match (self.peek(), self.chars.get(self.pos + 1).copied()) {
            (Some('='), _) => {
                self.pos += 1;
                AttrOp::Equals
            }
            (Some('$'), Some('=')) => {
                self.pos += 2;
                AttrOp::EndsWith
            }
            _ => return Err(self.unexpected()),
        };
        if self.peek() != Some('"') {
            return Err(self.unexpected());
        }
        self.pos += 1;
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(SelectorParseError::Unterminated("attribute value")),
                Some('\\') => return Err(self.unexpected()),
                Some('"') => break,
                Some(_) => self.pos += 1,
            }
        }
        let value: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1;
        if self.peek() != Some(']') {
            return Err(SelectorParseError::Unterminated("attribute selector"));
        }
        self.pos += 1;
        Ok(Condition::Attribute {
            name: name.to_ascii_lowercase(),
            op,
            value,
        })
    }

    fn pseudo(&mut self) -> Result<Condition, SelectorParseError> {
        let name = self.ident()?;
        if name != "nth-of-type" {
            return Err(SelectorParseError::UnsupportedPseudo(name));
        }
        if self.peek() != Some('(') {
            return Err(self.unexpected());
        }
        self.pos += 1;
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.pos += 1;
        }
        if self.peek().is_none() {
            return Err(SelectorParseError::Unterminated("nth-of-type"));
        }
        let arg: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1;
        match arg.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Condition::NthOfType(n)),
            _ => Err(SelectorParseError::InvalidNth(arg)),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
