// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! A small text substitution engine for page templates.
//!
//! Templates are plain text (usually HTML) with `{{ ... }}` tags:
//!
//! - `{{ path }}` writes a value, HTML escaped. `{{ raw path }}` skips escaping.
//! - `{{ each path |item| }} ... {{ /each }}` iterates an array, or an object
//!   (binding `item.key` and `item.value`). `loop.index`, `loop.first` and
//!   `loop.last` are available in the body.
//! - `{{ if path }} ... {{ else }} ... {{ /if }}`, and `{{ if not path }}`.
//! - `\{{` writes a literal `{{`; `\\{{` writes a backslash and keeps the tag.
//!
//! Paths are dot separated. A `[var]` segment looks a key up using the value
//! of `var`, e.g. `nades.[map].[side]`.
use crate::error::NadeError;
use serde::Serialize;
use serde_json::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Value {
        path: Path,
        escape: bool,
    },
    Each {
        path: Path,
        var: String,
        body: Vec<Node>,
    },
    If {
        path: Path,
        negate: bool,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Path {
    text: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Lookup(Path),
}

#[derive(Debug, Clone, PartialEq)]
enum Tag {
    Value(Path, bool),
    Each(Path, String),
    EndEach,
    If(Path, bool),
    Else,
    EndIf,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Tag(Tag),
}

impl Template {
    /// Parses `source`. `name` is only used in error messages.
    pub fn parse(name: &str, source: &str) -> Result<Self, NadeError> {
        let tokens = tokenize(source).map_err(|message| NadeError::template(name, message))?;
        let mut tokens = tokens.into_iter();
        let (nodes, closing) =
            parse_block(&mut tokens).map_err(|message| NadeError::template(name, message))?;
        if let Some(closing) = closing {
            return Err(NadeError::template(
                name,
                format!("unexpected {{{{ {} }}}}", closing_name(&closing)),
            ));
        }
        Ok(Self {
            name: name.to_owned(),
            nodes,
        })
    }

    /// Renders the template against anything serialisable as a JSON object.
    pub fn render(&self, context: &impl Serialize) -> Result<String, NadeError> {
        let root = serde_json::to_value(context)
            .map_err(|e| NadeError::template(&self.name, e.to_string()))?;
        self.render_value(&root)
    }

    pub fn render_value(&self, root: &Value) -> Result<String, NadeError> {
        let mut renderer = Renderer {
            root,
            scopes: Vec::new(),
            output: String::new(),
        };
        renderer
            .render_nodes(&self.nodes)
            .map_err(|message| NadeError::template(&self.name, message))?;
        Ok(renderer.output)
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(start) = rest.find(OPEN) {
        let before = &rest[..start];
        if before.ends_with("\\\\") {
            // `\\{{` is a literal backslash followed by a real tag.
            text.push_str(&before[..start - 1]);
        } else if before.ends_with('\\') {
            text.push_str(&before[..start - 1]);
            text.push_str(OPEN);
            rest = &rest[start + OPEN.len()..];
            continue;
        } else {
            text.push_str(before);
        }
        let after_open = &rest[start + OPEN.len()..];
        let end = after_open.find(CLOSE).ok_or_else(|| {
            let offset = source.len() - rest.len() + start;
            format!(
                "unclosed tag on line {}",
                source[..offset].matches('\n').count() + 1
            )
        })?;
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut text)));
        }
        tokens.push(Token::Tag(parse_tag(after_open[..end].trim())?));
        rest = &after_open[end + CLOSE.len()..];
    }
    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}

fn parse_tag(content: &str) -> Result<Tag, String> {
    let mut words = content.split_whitespace();
    let tag = match words.next() {
        None => return Err("empty tag".to_owned()),
        Some("/each") => Tag::EndEach,
        Some("/if") => Tag::EndIf,
        Some("else") => Tag::Else,
        Some("each") => {
            let path = words.next().ok_or("'each' needs a path")?;
            let var = words
                .next()
                .and_then(|v| v.strip_prefix('|'))
                .and_then(|v| v.strip_suffix('|'))
                .filter(|v| is_identifier(v))
                .ok_or_else(|| format!("'each {path}' needs a |name| binding"))?;
            Tag::Each(parse_path(path)?, var.to_owned())
        }
        Some("if") => match words.next() {
            Some("not") => Tag::If(parse_path(words.next().ok_or("'if not' needs a path")?)?, true),
            Some(path) => Tag::If(parse_path(path)?, false),
            None => return Err("'if' needs a path".to_owned()),
        },
        Some("raw") => Tag::Value(parse_path(words.next().ok_or("'raw' needs a path")?)?, false),
        Some(path) => Tag::Value(parse_path(path)?, true),
    };
    match words.next() {
        Some(extra) => Err(format!("unexpected '{extra}' in {{{{ {content} }}}}")),
        None => Ok(tag),
    }
}

fn parse_path(text: &str) -> Result<Path, String> {
    let mut segments = Vec::new();
    let mut rest = text;
    loop {
        if let Some(inner) = rest.strip_prefix('[') {
            let end = matching_bracket(inner).ok_or_else(|| format!("unclosed '[' in '{text}'"))?;
            segments.push(Segment::Lookup(parse_path(&inner[..end])?));
            rest = &inner[end + 1..];
        } else {
            let end = rest.find('.').unwrap_or(rest.len());
            let key = &rest[..end];
            if !is_identifier(key) {
                return Err(format!("invalid path '{text}'"));
            }
            segments.push(Segment::Key(key.to_owned()));
            rest = &rest[end..];
        }
        match rest.strip_prefix('.') {
            Some(next) => rest = next,
            None if rest.is_empty() => break,
            None => return Err(format!("invalid path '{text}'")),
        }
    }
    if matches!(segments.first(), Some(Segment::Lookup(_))) {
        return Err(format!("path '{text}' must start with a name"));
    }
    Ok(Path {
        text: text.to_owned(),
        segments,
    })
}

/// Byte offset of the `]` closing a `[` that has already been consumed.
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return Some(i),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn closing_name(tag: &Tag) -> &'static str {
    match tag {
        Tag::EndEach => "/each",
        Tag::EndIf => "/if",
        _ => "else",
    }
}

/// Collects nodes until a closing tag (returned) or the end of input.
fn parse_block(tokens: &mut impl Iterator<Item = Token>) -> Result<(Vec<Node>, Option<Tag>), String> {
    let mut nodes = Vec::new();
    while let Some(token) = tokens.next() {
        let tag = match token {
            Token::Text(text) => {
                nodes.push(Node::Text(text));
                continue;
            }
            Token::Tag(tag) => tag,
        };
        match tag {
            Tag::Value(path, escape) => nodes.push(Node::Value { path, escape }),
            Tag::Each(path, var) => {
                let (body, closing) = parse_block(tokens)?;
                if closing != Some(Tag::EndEach) {
                    return Err(format!("{{{{ each {} }}}} is not closed by {{{{ /each }}}}", path.text));
                }
                nodes.push(Node::Each { path, var, body });
            }
            Tag::If(path, negate) => {
                let (then, mut closing) = parse_block(tokens)?;
                let mut otherwise = Vec::new();
                if closing == Some(Tag::Else) {
                    (otherwise, closing) = parse_block(tokens)?;
                }
                if closing != Some(Tag::EndIf) {
                    return Err(format!("{{{{ if {} }}}} is not closed by {{{{ /if }}}}", path.text));
                }
                nodes.push(Node::If {
                    path,
                    negate,
                    then,
                    otherwise,
                });
            }
            closing @ (Tag::EndEach | Tag::Else | Tag::EndIf) => return Ok((nodes, Some(closing))),
        }
    }
    Ok((nodes, None))
}

struct Renderer<'a> {
    root: &'a Value,
    scopes: Vec<(String, Value)>,
    output: String,
}

impl Renderer<'_> {
    fn render_nodes(&mut self, nodes: &[Node]) -> Result<(), String> {
        for node in nodes {
            match node {
                Node::Text(text) => self.output.push_str(text),
                Node::Value { path, escape } => {
                    let text = display_value(path, self.resolve(path)?)?;
                    if *escape {
                        push_escaped(&mut self.output, &text);
                    } else {
                        self.output.push_str(&text);
                    }
                }
                Node::Each { path, var, body } => {
                    let items: Vec<Value> = match self.resolve(path)? {
                        Value::Array(items) => items.clone(),
                        Value::Object(fields) => fields
                            .iter()
                            .map(|(key, value)| serde_json::json!({ "key": key, "value": value }))
                            .collect(),
                        other => {
                            return Err(format!(
                                "cannot iterate '{}': it is {}",
                                path.text,
                                kind_of(other)
                            ));
                        }
                    };
                    let count = items.len();
                    for (index, item) in items.into_iter().enumerate() {
                        let state = serde_json::json!({
                            "index": index,
                            "first": index == 0,
                            "last": index + 1 == count,
                        });
                        self.scopes.push(("loop".to_owned(), state));
                        self.scopes.push((var.clone(), item));
                        let result = self.render_nodes(body);
                        self.scopes.truncate(self.scopes.len() - 2);
                        result?;
                    }
                }
                Node::If {
                    path,
                    negate,
                    then,
                    otherwise,
                } => {
                    let branch = if is_truthy(self.resolve(path)?) != *negate {
                        then
                    } else {
                        otherwise
                    };
                    self.render_nodes(branch)?;
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> Result<&Value, String> {
        let mut segments = path.segments.iter();
        let Some(Segment::Key(first)) = segments.next() else {
            return Err(format!("invalid path '{}'", path.text));
        };
        let mut current = self
            .scopes
            .iter()
            .rev()
            .find(|(name, _)| name == first)
            .map(|(_, value)| value)
            .or_else(|| self.root.get(first))
            .ok_or_else(|| format!("'{first}' is not defined"))?;

        for segment in segments {
            let key = match segment {
                Segment::Key(key) => key.clone(),
                Segment::Lookup(inner) => match self.resolve(inner)? {
                    Value::String(key) => key.clone(),
                    Value::Number(n) => n.to_string(),
                    other => {
                        return Err(format!(
                            "'{}' cannot be used as a key: it is {}",
                            inner.text,
                            kind_of(other)
                        ));
                    }
                },
            };
            current = match current {
                Value::Object(fields) => fields.get(&key),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(|| format!("'{}' has no field '{key}'", path.text))?;
        }
        Ok(current)
    }
}

fn display_value(path: &Path, value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!(
            "cannot write '{}' as text: it is {}",
            path.text,
            kind_of(other)
        )),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn push_escaped(output: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
}
