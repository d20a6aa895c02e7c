//! Path elements, path normalization, and the compact textual path form.
//!
//! # Textual form
//!
//! - `name` -- member `name`
//! - `a.b` -- member `b` inside member `a`
//! - `items[2]` -- second element of `items` (indices are 1-based)
//! - `items[first]`, `items[last]` -- head and tail of `items`
//! - `items[new]` -- prepend to `items` (last segment of a set path only)
//! - `items[kind=event]` -- elements of `items` whose member `kind` is `"event"`
//!
//! Selector values are read as JSON literals when they are one (`[id=42]`,
//! `[done=true]`, `[id="42"]`) and as text otherwise. A backslash escapes the
//! next character, so `a\.b` is the single member `a.b`.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use crate::error::{JselError, Result};
use crate::family::Family;
use crate::value::Value;

/// Array position. `At` is 1-based; `At(0)` never exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    First,
    Last,
    At(usize),
}

impl Index {
    /// Zero-based position in an array of `len` elements, if it exists.
    pub fn position(self, len: usize) -> Option<usize> {
        match self {
            Index::First => (len > 0).then_some(0),
            Index::Last => len.checked_sub(1),
            Index::At(n) => (n >= 1 && n <= len).then(|| n - 1),
        }
    }

    /// Whether writing at this index grows an array of `len` by one element.
    pub(crate) fn extends(self, len: usize) -> bool {
        match self {
            Index::First | Index::Last => len == 0,
            Index::At(n) => n == len + 1,
        }
    }
}

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    /// Select an object member by name; broadcast across arrays.
    Member(String),
    /// Select one array element.
    Index(Index),
    /// Select the array elements that are objects whose member equals the value.
    Selector(String, Value),
    /// Prepend to an array, creating it if absent.
    New,
}

impl PathElement {
    /// Build a selector. Raw-byte names are converted to UTF-8 text.
    pub fn select(name: impl AsRef<[u8]>, value: impl Into<Value>) -> Self {
        PathElement::Selector(text(name.as_ref()), value.into())
    }

    pub fn is_new(&self) -> bool {
        matches!(self, PathElement::New)
    }

    /// Whether this is a selector whose value holds objects.
    fn has_composite_selector(&self) -> bool {
        matches!(self, PathElement::Selector(_, Value::Object(_) | Value::Array(_)))
    }

    /// Re-encode a selector value's objects in `family`.
    pub fn into_family(self, family: Family) -> Self {
        match self {
            PathElement::Selector(name, value) => PathElement::Selector(name, value.into_family(family)),
            other => other,
        }
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl From<&str> for PathElement {
    fn from(name: &str) -> Self {
        PathElement::Member(name.to_owned())
    }
}

impl From<String> for PathElement {
    fn from(name: String) -> Self {
        PathElement::Member(name)
    }
}

impl From<&String> for PathElement {
    fn from(name: &String) -> Self {
        PathElement::Member(name.clone())
    }
}

impl From<&[u8]> for PathElement {
    fn from(name: &[u8]) -> Self {
        PathElement::Member(text(name))
    }
}

impl From<Vec<u8>> for PathElement {
    fn from(name: Vec<u8>) -> Self {
        PathElement::Member(String::from_utf8(name).unwrap_or_else(|err| text(err.as_bytes())))
    }
}

impl From<usize> for PathElement {
    fn from(n: usize) -> Self {
        PathElement::Index(Index::At(n))
    }
}

impl From<u32> for PathElement {
    fn from(n: u32) -> Self {
        PathElement::Index(Index::At(n as usize))
    }
}

impl From<Index> for PathElement {
    fn from(index: Index) -> Self {
        PathElement::Index(index)
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Member(name) => write_escaped(f, name),
            PathElement::Index(Index::First) => f.write_str("[first]"),
            PathElement::Index(Index::Last) => f.write_str("[last]"),
            PathElement::Index(Index::At(n)) => write!(f, "[{n}]"),
            PathElement::New => f.write_str("[new]"),
            PathElement::Selector(name, value) => {
                f.write_char('[')?;
                write_escaped(f, name)?;
                f.write_char('=')?;
                let rendered = match value {
                    Value::Text(s) if json_scalar(s).is_some() => {
                        serde_json::Value::String(s.clone()).to_string()
                    }
                    Value::Text(s) => s.clone(),
                    other => other.to_string(),
                };
                write_escaped(f, &rendered)?;
                f.write_char(']')
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for c in s.chars() {
        if matches!(c, '.' | '[' | ']' | '=' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

fn json_scalar(raw: &str) -> Option<serde_json::Value> {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .filter(|json| !json.is_array() && !json.is_object())
}

/// An ordered sequence of [`PathElement`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Normalize caller-supplied elements into a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsel_core::{Index, Path, PathElement};
    ///
    /// let path = Path::new([
    ///     PathElement::from("items"),
    ///     PathElement::select("kind", "event"),
    ///     PathElement::from(Index::First),
    /// ]);
    /// assert_eq!(path.to_string(), "items[kind=event][first]");
    /// ```
    pub fn new<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<PathElement>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the textual path form described in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`JselError::Parse`] with the byte offset of the problem.
    pub fn parse(src: &str) -> Result<Self> {
        PathParser::new(src).parse()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }

    pub fn push(&mut self, element: impl Into<PathElement>) {
        self.elements.push(element.into());
    }

    /// This path with every selector value encoded in `family`, so selectors
    /// compare against and seed objects of the tree they run on. Borrowed
    /// when no selector value can hold an object.
    pub fn in_family(&self, family: Family) -> Cow<'_, Path> {
        if !self.elements.iter().any(PathElement::has_composite_selector) {
            return Cow::Borrowed(self);
        }
        Cow::Owned(
            self.elements
                .iter()
                .cloned()
                .map(|element| element.into_family(family))
                .collect(),
        )
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl FromStr for Path {
    type Err = JselError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 && matches!(element, PathElement::Member(_)) {
                f.write_char('.')?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

/// Build a [`Path`] from heterogeneous elements.
///
/// ```
/// use jsel_core::{path, Index, PathElement};
///
/// let p = path!["items", PathElement::select("id", 7), Index::Last];
/// assert_eq!(p.to_string(), "items[id=7][last]");
/// ```
#[macro_export]
macro_rules! path {
    ($($element:expr),* $(,)?) => {
        $crate::Path::from(vec![$($crate::PathElement::from($element)),*])
    };
}

/// Hand-written scanner for the textual form: segments separated by `.`,
/// each a (possibly empty) member name followed by bracket suffixes.
struct PathParser<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> PathParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(pos, _)| pos)
    }

    fn parse(mut self) -> Result<Path> {
        let mut elements = Vec::new();
        if self.src.is_empty() {
            return Ok(Path { elements });
        }

        loop {
            let start = self.offset();
            let name = self.name()?;
            let has_name = !name.is_empty();
            if has_name {
                elements.push(PathElement::Member(name));
            }

            let mut brackets = 0;
            while let Some(&(open, '[')) = self.chars.peek() {
                self.chars.next();
                elements.push(self.bracket(open)?);
                brackets += 1;
            }

            if !has_name && brackets == 0 {
                return Err(JselError::parse(start, "empty path segment"));
            }

            match self.chars.next() {
                None => break,
                Some((_, '.')) => continue,
                Some((pos, c)) => {
                    return Err(JselError::parse(pos, format!("unexpected character `{c}`")))
                }
            }
        }

        Ok(Path { elements })
    }

    fn name(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(&(pos, c)) = self.chars.peek() {
            match c {
                '.' | '[' => break,
                ']' => return Err(JselError::parse(pos, "unmatched `]`")),
                '\\' => {
                    self.chars.next();
                    name.push(self.escaped(pos)?);
                }
                _ => {
                    self.chars.next();
                    name.push(c);
                }
            }
        }
        Ok(name)
    }

    fn escaped(&mut self, backslash: usize) -> Result<char> {
        self.chars
            .next()
            .map(|(_, c)| c)
            .ok_or_else(|| JselError::parse(backslash, "dangling escape"))
    }

    /// Parse a bracket body after its opening `[` at byte `open`.
    fn bracket(&mut self, open: usize) -> Result<PathElement> {
        let mut key = String::new();
        let mut value: Option<String> = None;

        loop {
            let (pos, c) = self
                .chars
                .next()
                .ok_or_else(|| JselError::parse(open, "unterminated `[`"))?;
            let c = match c {
                ']' => break,
                '=' if value.is_none() => {
                    value = Some(String::new());
                    continue;
                }
                '\\' => self.escaped(pos)?,
                c => c,
            };
            match value.as_mut() {
                Some(v) => v.push(c),
                None => key.push(c),
            }
        }

        if let Some(raw) = value {
            return Ok(PathElement::Selector(key, selector_value(&raw)));
        }

        match key.as_str() {
            "first" => Ok(PathElement::Index(Index::First)),
            "last" => Ok(PathElement::Index(Index::Last)),
            "new" => Ok(PathElement::New),
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits
                .parse::<usize>()
                .map(|n| PathElement::Index(Index::At(n)))
                .map_err(|_| JselError::parse(open, format!("index `{digits}` is too large"))),
            other => Err(JselError::parse(
                open,
                format!("expected an index, `first`, `last`, `new`, or `name=value`, got `{other}`"),
            )),
        }
    }
}

fn selector_value(raw: &str) -> Value {
    match json_scalar(raw) {
        Some(json) => Value::from_json(json, Family::default()),
        None => Value::Text(raw.to_owned()),
    }
}
