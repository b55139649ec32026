use std::fmt::Write;

use crate::runtime::{error::RtResult, heap::ValueRef, value::Value};

use super::Runtime;

/// Nesting depth past which `display` prints `...`.
const MAX_DISPLAY_DEPTH: usize = 64;

impl Runtime {
    /// Renders `v` the way the language prints it.
    ///
    /// Strings are written raw, also inside containers. Floats use the
    /// shortest of fixed and scientific notation with six significant
    /// digits.
    ///
    /// Arrays, records and refs are mutable and can be made to contain
    /// themselves. A value met again while it is still being rendered
    /// prints as `...`.
    pub fn display(&self, v: ValueRef) -> RtResult<String> {
        let mut out = String::new();
        let mut path = Vec::new();
        self.render(v, &mut path, &mut out)?;
        Ok(out)
    }

    fn render(&self, v: ValueRef, path: &mut Vec<ValueRef>, out: &mut String) -> RtResult<()> {
        if path.len() > MAX_DISPLAY_DEPTH || path.contains(&v) {
            out.push_str("...");
            return Ok(());
        }
        path.push(v);
        let rendered = self.render_value(v, path, out);
        path.pop();
        rendered
    }

    fn render_value(&self, v: ValueRef, path: &mut Vec<ValueRef>, out: &mut String) -> RtResult<()> {
        match self.value(v)? {
            Value::Int(n) => {
                let _ = write!(out, "{}", n);
            }
            Value::Float(f) => out.push_str(&format_float(*f)),
            Value::String(s) => out.push_str(s),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Unit => out.push_str("()"),
            Value::List(items) => {
                out.push('[');
                self.render_items(items, path, out)?;
                out.push(']');
            }
            Value::Array(items) => {
                out.push_str("[|");
                self.render_items(items, path, out)?;
                out.push_str("|]");
            }
            Value::Record(fields) => {
                out.push_str("{ ");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    let _ = write!(out, "{} = ", field.name);
                    self.render(field.value, path, out)?;
                }
                out.push_str(" }");
            }
            Value::Ref(content) => {
                out.push_str("ref(");
                self.render(*content, path, out)?;
                out.push(')');
            }
            Value::Function(function) => {
                let _ = write!(
                    out,
                    "<function:{}>",
                    function.name.as_deref().unwrap_or("anonymous")
                );
            }
            Value::Constructor(constructor) => {
                out.push_str(&constructor.name);
                if !matches!(self.value(constructor.payload)?, Value::Unit) {
                    out.push('(');
                    self.render(constructor.payload, path, out)?;
                    out.push(')');
                }
            }
            Value::Class(class) => {
                let _ = write!(out, "<类 {}>", class.name);
            }
            Value::Object(object) => {
                let _ = write!(out, "<{} 对象>", object.class_name);
            }
        }
        Ok(())
    }

    fn render_items(
        &self,
        items: &[ValueRef],
        path: &mut Vec<ValueRef>,
        out: &mut String,
    ) -> RtResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            self.render(*item, path, out)?;
        }
        Ok(())
    }
}

/// `printf("%g")`: six significant digits, trailing zeros dropped,
/// scientific notation below 1e-4 and from 1e6 on.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.5e}", f);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let precision = (5 - exponent) as usize;
        trim_fraction(&format!("{:.*}", precision, f)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
