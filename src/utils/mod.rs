//! Helpers for producing Java source text.
//!
//! Literal values pulled from a class file (constant values, names) end up inside generated
//! Java code, so they need Java's escaping and Java's number spelling.

/// Escape a string for use inside a Java string literal.
///
/// Escapes `"`, `'`, `\`, newline and carriage return; other characters pass through.
///
/// # Examples
///
/// ```rust
/// use jvmscope::utils::escape_java_string;
///
/// assert_eq!(escape_java_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
/// ```
#[must_use]
pub fn escape_java_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Quote and escape a string as a Java string literal.
#[must_use]
pub fn quote_java_string(value: &str) -> String {
    format!("\"{}\"", escape_java_string(value))
}

/// Spell a `double` the way `Double.toString` does (`1.0`, `1.5E-5`, `NaN`).
#[must_use]
pub fn java_double_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e7).contains(&magnitude) {
        plain_decimal(format!("{value}"))
    } else {
        scientific(format!("{value:e}"))
    }
}

/// Spell a `float` the way `Float.toString` does.
#[must_use]
pub fn java_float_to_string(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e7).contains(&magnitude) {
        plain_decimal(format!("{value}"))
    } else {
        scientific(format!("{value:e}"))
    }
}

fn plain_decimal(mut text: String) -> String {
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Turns Rust's `1.5e-5` / `1e10` into Java's `1.5E-5` / `1.0E10`.
fn scientific(text: String) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            format!("{}E{}", plain_decimal(mantissa.to_string()), exponent)
        }
        None => plain_decimal(text),
    }
}
