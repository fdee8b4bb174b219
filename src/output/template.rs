//! The test stub template
//!
//! The template is a fixed asset compiled into the binary and parsed once,
//! on first use, into a list of segments. It understands two constructs:
//!
//! - `{{field}}` substitutes a value from the render context;
//! - `{{#handlers}} ... {{/handlers}}` repeats its body once per handler.
//!
//! A newline directly after a section tag is consumed so that tags can sit on
//! their own line. Fields valid at file level are `source`, `package`,
//! `accessor`, `handler_names`, `route_variables` and `handler_count`; inside
//! the handlers section they are `name`, `route_variables` and `index`.
//!
//! The generated tests inject route variables with gorilla/mux's
//! `SetURLVars`. The configured accessor is only named in the header, so
//! stubs for other routers need their setup adjusted by hand.

use std::io::{self, Write};
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::types::HandlerDescriptor;

const SECTION_OPEN: &str = "#handlers";
const SECTION_CLOSE: &str = "/handlers";

/// Go test file emitted for every source file with at least one handler.
pub const STUB_TEMPLATE: &str = r#"// Code generated by handlerstub from {{source}}. DO NOT EDIT.
// Regenerating overwrites this file.
// Route variables are read through {{accessor}} and injected with mux.SetURLVars.

package {{package}}

import (
	"net/http"
	"net/http/httptest"
	"testing"

	"github.com/gorilla/mux"
)

// Handlers found in {{source}} ({{handler_count}}).
var generatedHandlers = {{handler_names}}

// Route variables read by the last handler in the file.
var generatedRouteVariables = {{route_variables}}
{{#handlers}}

func Test{{name}}(t *testing.T) {
	vars := map[string]string{}
	for _, name := range {{route_variables}} {
		vars[name] = "test-" + name
	}

	req := httptest.NewRequest(http.MethodGet, "/", nil)
	req = mux.SetURLVars(req, vars)
	rec := httptest.NewRecorder()

	{{name}}(rec, req)

	if rec.Code != http.StatusOK {
		t.Errorf("{{name}}: got status %d, want %d", rec.Code, http.StatusOK)
	}
}
{{/handlers}}
"#;

static PARSED_STUB: LazyLock<std::result::Result<Template<'static>, String>> =
    LazyLock::new(|| parse_segments(STUB_TEMPLATE).map(|segments| Template { segments }));

/// The parsed stub template, shared for the lifetime of the process.
pub fn stub_template() -> Result<&'static Template<'static>> {
    PARSED_STUB
        .as_ref()
        .map_err(|message| Error::Template(message.clone()))
}

/// Values available to the template for one source file.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub source: String,
    pub package: &'a str,
    /// Accessor the route variables were read through, as `module.Func`
    pub accessor: String,
    pub handler_names: Vec<&'a str>,
    pub route_variables: Vec<&'a str>,
    pub handlers: &'a [HandlerDescriptor],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Source,
    Package,
    Accessor,
    HandlerNames,
    HandlerCount,
    RouteVariables,
    Name,
    Index,
}

impl Field {
    fn parse(name: &str, in_section: bool) -> Option<Self> {
        let field = match name {
            "source" => Field::Source,
            "package" => Field::Package,
            "accessor" => Field::Accessor,
            "handler_names" => Field::HandlerNames,
            "handler_count" => Field::HandlerCount,
            "route_variables" => Field::RouteVariables,
            "name" => Field::Name,
            "index" => Field::Index,
            _ => return None,
        };
        let valid = match field {
            Field::RouteVariables => true,
            Field::Name | Field::Index => in_section,
            _ => !in_section,
        };
        valid.then_some(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'t> {
    Text(&'t str),
    Field(Field),
    Handlers(Vec<Segment<'t>>),
}

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template<'t> {
    segments: Vec<Segment<'t>>,
}

impl<'t> Template<'t> {
    pub fn parse(text: &'t str) -> Result<Self> {
        parse_segments(text)
            .map(|segments| Self { segments })
            .map_err(Error::Template)
    }

    /// Render into `out`. Output depends only on `ctx`.
    pub fn render<W: Write>(&self, ctx: &RenderContext<'_>, out: &mut W) -> io::Result<()> {
        render_segments(&self.segments, ctx, None, out)
    }

    pub fn render_to_string(&self, ctx: &RenderContext<'_>) -> io::Result<String> {
        let mut buf = Vec::new();
        self.render(ctx, &mut buf)?;
        String::from_utf8(buf).map_err(io::Error::other)
    }
}

fn render_segments<W: Write>(
    segments: &[Segment<'_>],
    ctx: &RenderContext<'_>,
    current: Option<(usize, &HandlerDescriptor)>,
    out: &mut W,
) -> io::Result<()> {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.write_all(text.as_bytes())?,
            Segment::Field(field) => write_field(*field, ctx, current, out)?,
            Segment::Handlers(body) => {
                for (index, handler) in ctx.handlers.iter().enumerate() {
                    render_segments(body, ctx, Some((index, handler)), out)?;
                }
            }
        }
    }
    Ok(())
}

fn write_field<W: Write>(
    field: Field,
    ctx: &RenderContext<'_>,
    current: Option<(usize, &HandlerDescriptor)>,
    out: &mut W,
) -> io::Result<()> {
    match (field, current) {
        (Field::Source, _) => out.write_all(ctx.source.as_bytes()),
        (Field::Package, _) => out.write_all(ctx.package.as_bytes()),
        (Field::Accessor, _) => out.write_all(ctx.accessor.as_bytes()),
        (Field::HandlerNames, _) => write_string_slice(&ctx.handler_names, out),
        (Field::HandlerCount, _) => write!(out, "{}", ctx.handlers.len()),
        (Field::RouteVariables, Some((_, handler))) => {
            let vars: Vec<&str> = handler.route_variables.iter().map(String::as_str).collect();
            write_string_slice(&vars, out)
        }
        (Field::RouteVariables, None) => write_string_slice(&ctx.route_variables, out),
        (Field::Name, Some((_, handler))) => out.write_all(handler.name.as_bytes()),
        (Field::Index, Some((index, _))) => write!(out, "{}", index),
        // Parsing rejects section fields outside the section
        (Field::Name | Field::Index, None) => Ok(()),
    }
}

/// Write a Go `[]string{...}` literal.
fn write_string_slice<W: Write>(items: &[&str], out: &mut W) -> io::Result<()> {
    out.write_all(b"[]string{")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_all(b", ")?;
        }
        out.write_all(go_quote(item).as_bytes())?;
    }
    out.write_all(b"}")
}

/// Quote `s` as a Go interpreted string literal.
fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn parse_segments(text: &str) -> std::result::Result<Vec<Segment<'_>>, String> {
    let mut root: Vec<Segment> = Vec::new();
    let mut section: Option<Vec<Segment>> = None;
    let mut rest = text;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        let in_section = section.is_some();
        let target = section.as_mut().unwrap_or(&mut root);
        if start > 0 {
            target.push(Segment::Text(&rest[..start]));
        }
        let after_open = &rest[start + 2..];
        let end = after_open
            .find("}}")
            .ok_or_else(|| format!("unclosed tag at byte {}", offset + start))?;
        let tag = after_open[..end].trim();
        let mut consumed = start + 2 + end + 2;

        match tag {
            SECTION_OPEN => {
                if in_section {
                    return Err(format!("nested section at byte {}", offset + start));
                }
                section = Some(Vec::new());
                if rest[consumed..].starts_with('\n') {
                    consumed += 1;
                }
            }
            SECTION_CLOSE => {
                let body = section
                    .take()
                    .ok_or_else(|| format!("unmatched section close at byte {}", offset + start))?;
                root.push(Segment::Handlers(body));
                if rest[consumed..].starts_with('\n') {
                    consumed += 1;
                }
            }
            name => {
                let field = Field::parse(name, in_section).ok_or_else(|| {
                    format!("unknown field '{}' at byte {}", name, offset + start)
                })?;
                target.push(Segment::Field(field));
            }
        }

        rest = &rest[consumed..];
        offset += consumed;
    }

    if section.is_some() {
        return Err("unclosed handlers section".to_string());
    }
    if !rest.is_empty() {
        root.push(Segment::Text(rest));
    }
    Ok(root)
}
