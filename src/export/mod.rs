//! Identity-preserving XML rendering of the entity model.
//!
//! Serialization happens in two steps. First an id-assignment pass walks the whole graph —
//! main assemblies in analysis order, then the reference assembly — handing every assembly,
//! type, and method a stable string id (`a0…`, `t0…`, `m0…`). Then the writer emits the
//! document, serializing each entity exactly once under its owner and rendering every other
//! edge (a call's declaring assembly and method, its resolved target) as an id reference.
//! An entity reachable from two places is therefore never duplicated.
//!
//! Try, throw, and catch records all serialize under the shared `methodException` tag with a
//! `kind` attribute; the declared exception type itself is a nested `exception` element.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::analysis::AnalysisContext;
use crate::metadata::assembly::AssemblyRc;
use crate::metadata::method::{CallTarget, ExceptionType, MethodCall, MethodRc};
use crate::metadata::types::TypeRc;
use crate::Result;

/// Stable ids for every entity reachable from the context, assigned before emission.
struct IdTable {
    assemblies: HashMap<usize, String>,
    types: HashMap<usize, String>,
    methods: HashMap<usize, String>,
}

impl IdTable {
    fn assign(ctx: &AnalysisContext) -> Self {
        let mut table = Self {
            assemblies: HashMap::new(),
            types: HashMap::new(),
            methods: HashMap::new(),
        };

        for assembly in ctx.assemblies().iter().chain(std::iter::once(ctx.reference())) {
            let id = format!("a{}", table.assemblies.len());
            table.assemblies.insert(Arc::as_ptr(assembly) as usize, id);

            for ty in assembly.types().iter() {
                let id = format!("t{}", table.types.len());
                table.types.insert(Arc::as_ptr(ty.value()) as usize, id);

                for method in ty.value().methods().iter() {
                    let id = format!("m{}", table.methods.len());
                    table.methods.insert(Arc::as_ptr(method.value()) as usize, id);
                }
            }
        }

        table
    }

    fn assembly_id(&self, assembly: &AssemblyRc) -> Option<&str> {
        self.assemblies
            .get(&(Arc::as_ptr(assembly) as usize))
            .map(String::as_str)
    }

    fn type_id(&self, ty: &TypeRc) -> Option<&str> {
        self.types
            .get(&(Arc::as_ptr(ty) as usize))
            .map(String::as_str)
    }

    fn method_id(&self, method: &MethodRc) -> Option<&str> {
        self.methods
            .get(&(Arc::as_ptr(method) as usize))
            .map(String::as_str)
    }
}

/// Render the full model — main assemblies, then the reference assembly — to `out`.
///
/// # Errors
///
/// Any write failure is surfaced; partial output is never considered valid.
pub fn write_document<W: Write>(ctx: &AnalysisContext, out: W) -> Result<()> {
    let ids = IdTable::assign(ctx);
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("model")))?;

    for assembly in ctx.assemblies() {
        write_assembly(&mut writer, &ids, assembly)?;
    }
    write_assembly(&mut writer, &ids, ctx.reference())?;

    writer.write_event(Event::End(BytesEnd::new("model")))?;
    Ok(())
}

/// Render the model to a file, flushing before returning.
///
/// The handle is closed on every exit path; a failed write propagates as an error rather
/// than leaving a silently truncated document behind.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] for I/O failures and [`crate::Error::XmlError`] for
/// emission failures.
pub fn export_to_file(ctx: &AnalysisContext, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_document(ctx, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_assembly<W: Write>(
    writer: &mut Writer<W>,
    ids: &IdTable,
    assembly: &AssemblyRc,
) -> Result<()> {
    let created = assembly.created.to_rfc3339();
    let mut el = BytesStart::new("assembly");
    if let Some(id) = ids.assembly_id(assembly) {
        el.push_attribute(("id", id));
    }
    el.push_attribute(("name", assembly.name.as_str()));
    el.push_attribute(("version", assembly.version.as_str()));
    el.push_attribute(("created", created.as_str()));
    el.push_attribute(("source", assembly.source_kind.to_string().as_str()));
    el.push_attribute(("main", if assembly.is_main { "true" } else { "false" }));
    writer.write_event(Event::Start(el))?;

    for ty in assembly.types().iter() {
        write_type(writer, ids, ty.value())?;
    }

    writer.write_event(Event::End(BytesEnd::new("assembly")))?;
    Ok(())
}

fn write_type<W: Write>(writer: &mut Writer<W>, ids: &IdTable, ty: &TypeRc) -> Result<()> {
    let mut el = BytesStart::new("type");
    if let Some(id) = ids.type_id(ty) {
        el.push_attribute(("id", id));
    }
    el.push_attribute(("name", ty.name.as_str()));
    el.push_attribute(("kind", ty.kind.label().as_str()));
    writer.write_event(Event::Start(el))?;

    for method in ty.methods().iter() {
        write_method(writer, ids, method.value())?;
    }

    writer.write_event(Event::End(BytesEnd::new("type")))?;
    Ok(())
}

fn write_method<W: Write>(writer: &mut Writer<W>, ids: &IdTable, method: &MethodRc) -> Result<()> {
    let mut el = BytesStart::new("method");
    if let Some(id) = ids.method_id(method) {
        el.push_attribute(("id", id));
    }
    el.push_attribute(("name", method.name.as_str()));
    el.push_attribute(("signature", method.signature.as_str()));
    el.push_attribute(("visibility", method.visibility.to_string().as_str()));
    el.push_attribute(("finallyCount", method.finally_count().to_string().as_str()));
    writer.write_event(Event::Start(el))?;

    for (_, call) in method.calls().iter() {
        write_call(writer, ids, call)?;
    }
    for (_, region) in method.tries().iter() {
        let mut el = BytesStart::new("methodException");
        el.push_attribute(("kind", "try"));
        el.push_attribute(("begin", region.begin.to_string().as_str()));
        el.push_attribute(("end", region.end.to_string().as_str()));
        writer.write_event(Event::Empty(el))?;
    }
    for (_, clause) in method.catches().iter() {
        let mut el = BytesStart::new("methodException");
        el.push_attribute(("kind", "catch"));
        el.push_attribute(("begin", clause.begin.to_string().as_str()));
        el.push_attribute(("end", clause.end.to_string().as_str()));
        writer.write_event(Event::Start(el))?;
        write_exception(writer, &clause.exception)?;
        writer.write_event(Event::End(BytesEnd::new("methodException")))?;
    }
    for (_, throw) in method.throws().iter() {
        let mut el = BytesStart::new("methodException");
        el.push_attribute(("kind", "throw"));
        if let Some(position) = throw.position {
            el.push_attribute(("position", position.to_string().as_str()));
        }
        writer.write_event(Event::Start(el))?;
        write_exception(writer, &throw.exception)?;
        writer.write_event(Event::End(BytesEnd::new("methodException")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("method")))?;
    Ok(())
}

fn write_call<W: Write>(writer: &mut Writer<W>, ids: &IdTable, call: &MethodCall) -> Result<()> {
    let mut el = BytesStart::new("methodCall");
    el.push_attribute(("position", call.position.to_string().as_str()));
    if let Some(id) = call.assembly().upgrade().as_ref().and_then(|a| ids.assembly_id(a)) {
        el.push_attribute(("assembly", id));
    }
    if let Some(id) = call
        .declaring_method()
        .upgrade()
        .as_ref()
        .and_then(|m| ids.method_id(m))
    {
        el.push_attribute(("method", id));
    }
    el.push_attribute(("declaringType", call.fake().declaring_type.as_str()));
    el.push_attribute(("signature", call.fake().signature.as_str()));
    if let CallTarget::Resolved(target) = call.target() {
        if let Some(id) = ids.method_id(&target) {
            el.push_attribute(("target", id));
        }
    }
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

fn write_exception<W: Write>(writer: &mut Writer<W>, exception: &ExceptionType) -> Result<()> {
    let mut el = BytesStart::new("exception");
    el.push_attribute(("name", exception.name.as_str()));
    el.push_attribute(("superclass", exception.superclass.as_str()));
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisContext;

    #[test]
    fn test_empty_context_document() {
        let ctx = AnalysisContext::new();
        let mut out = Vec::new();
        write_document(&ctx, &mut out).unwrap();

        let xml = String::from_utf8(out).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<assembly id=\"a0\" name=\"reference\""));
        assert!(xml.contains("main=\"false\""));
    }
}
