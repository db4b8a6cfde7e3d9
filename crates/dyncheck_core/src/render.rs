//! Debug rendering of values for diagnostics.
//!
//! The rendered form is what failure messages embed, so it must make the tag of a scalar visible:
//! `1` is an int, `1.0` a float, `'1'` a string.

use std::fmt::{self, Write as _};

use crate::numeric::{float_to_string, int_to_string};
use crate::value::{MapKey, Value};

impl Value {
    /// Render this value in its canonical debug form.
    ///
    /// ## Examples
    /// ```rust
    /// use dyncheck_core::Value;
    ///
    /// assert_eq!(Value::from("it's").render(), r"'it\'s'");
    /// assert_eq!(Value::from(1.0).render(), "1.0");
    /// assert_eq!(Value::map([("x", 1), ("3", 2)]).render(), "['x' => 1, 3 => 2]");
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}

fn write_value(out: &mut impl fmt::Write, value: &Value) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.write_str(&int_to_string(*n)),
        Value::Float(x) => out.write_str(&float_repr(*x)),
        Value::String(s) => write_quoted(out, s),
        Value::List(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Value::Map(entries) => {
            out.write_char('[')?;
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                match key {
                    MapKey::Int(n) => write!(out, "{n}")?,
                    MapKey::Str(s) => write_quoted(out, s)?,
                }
                out.write_str(" => ")?;
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Value::Object(obj) => write!(out, "{}#{}", obj.class(), obj.id().0),
    }
}

/// Float rendering that always looks like a float (`1` → `1.0`).
fn float_repr(x: f64) -> String {
    let mut s = float_to_string(x);
    if s.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        s.push_str(".0");
    }
    s
}

fn write_quoted(out: &mut impl fmt::Write, s: &str) -> fmt::Result {
    out.write_char('\'')?;
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    out.write_char('\'')
}
