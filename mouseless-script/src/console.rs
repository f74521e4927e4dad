//! `console` object forwarding to `tracing`

use std::fmt::Write;

use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object, Value};

#[derive(Clone, Copy)]
enum Level {
    Info,
    Warn,
    Error,
}

/// Install `console` into the global object
pub(crate) fn install_console(ctx: &Ctx<'_>) -> rquickjs::Result<()> {
    let console = Object::new(ctx.clone())?;
    for (name, level) in [
        ("log", Level::Info),
        ("info", Level::Info),
        ("warn", Level::Warn),
        ("error", Level::Error),
    ] {
        console.set(
            name,
            Function::new(ctx.clone(), move |args: Rest<Value<'_>>| {
                log(level, &args.0);
            })?,
        )?;
    }
    ctx.globals().set("console", console)?;
    Ok(())
}

fn log(level: Level, values: &[Value<'_>]) {
    let mut line = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        format_value(&mut line, value);
    }
    match level {
        Level::Info => tracing::info!(target: "mouseless::page", "{line}"),
        Level::Warn => tracing::warn!(target: "mouseless::page", "{line}"),
        Level::Error => tracing::error!(target: "mouseless::page", "{line}"),
    }
}

fn format_value(out: &mut String, value: &Value<'_>) {
    if value.is_undefined() {
        out.push_str("undefined");
    } else if value.is_null() {
        out.push_str("null");
    } else if let Some(b) = value.as_bool() {
        let _ = write!(out, "{b}");
    } else if let Some(n) = value.as_int() {
        let _ = write!(out, "{n}");
    } else if let Some(n) = value.as_float() {
        let _ = write!(out, "{n}");
    } else if let Some(s) = value.as_string() {
        if let Ok(s) = s.to_string() {
            out.push_str(&s);
        }
    } else if value.is_array() {
        out.push_str("[Array]");
    } else if value.is_function() {
        out.push_str("[Function]");
    } else {
        out.push_str("[Object]");
    }
}
