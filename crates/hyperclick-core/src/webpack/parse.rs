//! Declarative reading of webpack config files.
//!
//! The file is never executed. The exported object literal is located and
//! parsed as a JSON5-like structure (unquoted keys, single quotes, trailing
//! commas). A handful of expressions common in webpack configs are evaluated:
//!
//! ```js
//! const path = require('path');
//! module.exports = {
//!   context: __dirname,
//!   resolve: { modules: [path.resolve(__dirname, 'src'), 'node_modules'] },
//!   plugins: [new HtmlWebpackPlugin()], // skipped, read as null
//! };
//! ```

use hyperclick_util::path::normalize;
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};

/// Parse the exported object of a webpack config.
///
/// `config_dir` stands in for `__dirname` and anchors relative `path.resolve`
/// calls.
pub fn parse_config_source(source: &str, config_dir: &Path) -> Result<Value, String> {
    let stripped = strip_comments(source);
    let start = find_exported_object(&stripped)
        .ok_or_else(|| "No exported object literal found in config file".to_string())?;

    let mut parser = JsObjectParser::new(&stripped[start..], config_dir);
    parser.parse_primary()
}

/// Byte offset of the `{` that starts the exported object.
///
/// Handles `module.exports = { ... }`, `export default { ... }`, and either
/// form naming a `const`/`let`/`var` declared earlier in the file.
fn find_exported_object(source: &str) -> Option<usize> {
    let after = exported_expression(source)?;
    let rest = source[after..].trim_start();
    let offset = source.len() - rest.len();

    if rest.starts_with('{') {
        return Some(offset);
    }

    let ident: String = rest
        .chars()
        .take_while(|c| is_ident_char(*c) && *c != '.')
        .collect();
    if ident.is_empty() {
        return None;
    }
    find_declaration(source, &ident)
}

/// Offset just past `module.exports =` or `export default`.
fn exported_expression(source: &str) -> Option<usize> {
    if let Some(idx) = source.find("module.exports") {
        let after = idx + "module.exports".len();
        let rest = source[after..].trim_start();
        let rest = rest.strip_prefix('=')?;
        return Some(source.len() - rest.len());
    }

    let marker = "export default";
    source.find(marker).map(|idx| idx + marker.len())
}

/// Offset of the object literal assigned in `const|let|var <ident> = {`.
fn find_declaration(source: &str, ident: &str) -> Option<usize> {
    for keyword in ["const", "let", "var"] {
        let mut search_from = 0;
        while let Some(found) = source[search_from..].find(keyword) {
            let idx = search_from + found;
            search_from = idx + keyword.len();

            let rest = source[search_from..].trim_start();
            let Some(rest) = rest.strip_prefix(ident) else {
                continue;
            };
            if rest.chars().next().is_some_and(is_ident_char) {
                continue;
            }
            let Some(rest) = rest.trim_start().strip_prefix('=') else {
                continue;
            };
            let rest = rest.trim_start();
            if rest.starts_with('{') {
                return Some(source.len() - rest.len());
            }
        }
    }
    None
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '.'
}

/// Strip single-line (//) and multi-line (/* */) comments from JS source.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    while i < len {
        if let Some(quote) = in_string {
            result.push(chars[i]);
            if escaped {
                escaped = false;
            } else if chars[i] == '\\' {
                escaped = true;
            } else if chars[i] == quote {
                in_string = None;
            }
            i += 1;
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '/' {
            while i < len && chars[i] != '\n' {
                i += 1;
            }
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '*' {
            i += 2;
            while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                if chars[i] == '\n' {
                    result.push('\n');
                }
                i += 1;
            }
            i += 2;
        } else {
            if chars[i] == '"' || chars[i] == '\'' || chars[i] == '`' {
                in_string = Some(chars[i]);
            }
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}

struct JsObjectParser<'a> {
    chars: Vec<char>,
    pos: usize,
    config_dir: &'a Path,
}

impl<'a> JsObjectParser<'a> {
    fn new(input: &str, config_dir: &'a Path) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            config_dir,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut expected = s.chars();
        let mut i = self.pos;
        loop {
            match expected.next() {
                None => return true,
                Some(ch) if self.chars.get(i) == Some(&ch) => i += 1,
                Some(_) => return false,
            }
        }
    }

    /// A value inside an object or array.
    ///
    /// Anything trailing the primary (`a || b`, `x ? y : z`, `s + t`) turns the
    /// whole expression into null.
    fn parse_value(&mut self) -> Result<Value, String> {
        let value = self.parse_primary()?;
        self.skip_whitespace();
        match self.peek() {
            None | Some(',' | '}' | ']' | ')') => Ok(value),
            Some(_) => self.skip_expression(),
        }
    }

    fn parse_primary(&mut self) -> Result<Value, String> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"' | '\'' | '`') => self.parse_string(),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if is_ident_char(ch) => self.parse_identifier(),
            Some(_) => self.skip_expression(),
            None => Err("Unexpected end of input".to_string()),
        }
    }

    fn parse_object(&mut self) -> Result<Value, String> {
        self.advance(); // skip '{'
        let mut map = Map::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.advance();
                    return Ok(Value::Object(map));
                }
                None => return Err("Unterminated object".to_string()),
                _ => {}
            }

            if self.starts_with("...") {
                self.skip_expression()?;
            } else {
                let key = self.parse_key()?;
                self.skip_whitespace();

                // Shorthand properties and methods carry no static value.
                let value = if self.peek() == Some(':') {
                    self.advance();
                    self.parse_value()?
                } else {
                    self.skip_expression()?
                };
                map.insert(key, value);
            }

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {}
                None => return Err("Unterminated object".to_string()),
                Some(ch) => return Err(format!("Expected ',' or '}}' in object, got '{ch}'")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, String> {
        self.advance(); // skip '['
        let mut arr = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.advance();
                    return Ok(Value::Array(arr));
                }
                None => return Err("Unterminated array".to_string()),
                _ => {}
            }

            arr.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {}
                None => return Err("Unterminated array".to_string()),
                Some(ch) => return Err(format!("Expected ',' or ']' in array, got '{ch}'")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        match self.peek() {
            Some('"' | '\'') => {
                if let Value::String(s) = self.parse_string()? {
                    Ok(s)
                } else {
                    Err("Expected string key".to_string())
                }
            }
            Some('[') => {
                // Computed key: keep the raw text, it never matches a field we read.
                let start = self.pos;
                self.skip_balanced('[', ']')?;
                Ok(self.chars[start..self.pos].iter().collect())
            }
            Some(ch) if is_ident_char(ch) => Ok(self.read_identifier()),
            other => Err(format!("Expected object key, got {other:?}")),
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if is_ident_char(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    fn parse_identifier(&mut self) -> Result<Value, String> {
        let start = self.pos;
        let ident = self.read_identifier();

        match ident.as_str() {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "null" | "undefined" => return Ok(Value::Null),
            "__dirname" => {
                return Ok(Value::String(
                    self.config_dir.to_string_lossy().into_owned(),
                ))
            }
            _ => {}
        }

        self.skip_whitespace();
        if self.peek() == Some('(') {
            match ident.as_str() {
                "path.resolve" => {
                    let args = self.parse_call_args()?;
                    return Ok(self.eval_path_resolve(&args));
                }
                "path.join" => {
                    let args = self.parse_call_args()?;
                    return Ok(eval_path_join(&args));
                }
                _ => {}
            }
        }

        self.pos = start;
        self.skip_expression()
    }

    fn parse_call_args(&mut self) -> Result<Vec<Value>, String> {
        self.advance(); // skip '('
        let mut args = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(')') => {
                    self.advance();
                    return Ok(args);
                }
                None => return Err("Unterminated call".to_string()),
                _ => {}
            }

            args.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {}
                None => return Err("Unterminated call".to_string()),
                Some(ch) => return Err(format!("Expected ',' or ')' in call, got '{ch}'")),
            }
        }
    }

    /// `path.resolve`: later absolute segments restart the path, and a result
    /// that is still relative is anchored at the config directory.
    fn eval_path_resolve(&self, args: &[Value]) -> Value {
        let Some(segments) = string_args(args) else {
            return Value::Null;
        };

        let mut out = PathBuf::new();
        for segment in segments.iter().filter(|s| !s.is_empty()) {
            out.push(segment);
        }
        if !out.is_absolute() {
            out = self.config_dir.join(out);
        }
        Value::String(normalize(&out).to_string_lossy().into_owned())
    }

    fn parse_string(&mut self) -> Result<Value, String> {
        let Some(quote) = self.advance() else {
            return Err("Unexpected end of input".to_string());
        };
        let mut s = String::new();

        loop {
            match self.advance() {
                Some(ch) if ch == quote => {
                    if quote == '`' && s.contains("${") {
                        return Ok(Value::Null);
                    }
                    return Ok(Value::String(s));
                }
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('\\') => s.push('\\'),
                    Some(ch) if ch == quote => s.push(ch),
                    Some(ch) => {
                        s.push('\\');
                        s.push(ch);
                    }
                    None => return Err("Unterminated string escape".to_string()),
                },
                Some(ch) => s.push(ch),
                None => return Err("Unterminated string".to_string()),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, String> {
        let mut num_str = String::new();
        let mut has_dot = false;

        if self.peek() == Some('-') {
            num_str.push('-');
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if has_dot {
            num_str
                .parse::<f64>()
                .map(|n| Number::from_f64(n).map_or(Value::Null, Value::Number))
                .map_err(|e| format!("Invalid number '{num_str}': {e}"))
        } else {
            // Integers past i64 fall back to f64 like JS numbers do.
            match num_str.parse::<i64>() {
                Ok(n) => Ok(Value::Number(n.into())),
                Err(_) => num_str
                    .parse::<f64>()
                    .map(|n| Number::from_f64(n).map_or(Value::Null, Value::Number))
                    .map_err(|e| format!("Invalid number '{num_str}': {e}")),
            }
        }
    }

    /// Skip an expression we do not evaluate, stopping before the `,` or
    /// closing bracket that ends it. Always yields null.
    fn skip_expression(&mut self) -> Result<Value, String> {
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            match ch {
                '"' | '\'' | '`' => {
                    self.parse_string()?;
                    continue;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                ',' | ';' if depth == 0 => break,
                _ => {}
            }
            self.advance();
        }

        if depth == 0 {
            Ok(Value::Null)
        } else {
            Err("Unterminated expression".to_string())
        }
    }

    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), String> {
        let mut depth = 0usize;
        while let Some(ch) = self.advance() {
            if ch == open {
                depth += 1;
            } else if ch == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(format!("Unterminated '{open}'"))
    }
}

/// `path.join`: segments are concatenated, never restarted.
fn eval_path_join(args: &[Value]) -> Value {
    let Some(segments) = string_args(args) else {
        return Value::Null;
    };
    let joined = segments
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("/");
    Value::String(normalize(Path::new(&joined)).to_string_lossy().into_owned())
}

fn string_args(args: &[Value]) -> Option<Vec<String>> {
    args.iter()
        .map(|a| a.as_str().map(str::to_string))
        .collect()
}
