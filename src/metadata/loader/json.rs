//! Unit-dump loader: classes serialized as JSON, one file per class.
//!
//! The dump format is the frontend's rendering of exactly what the analysis consumes: per
//! method, the ordered unit sequence and the raw exception table. A file that is not valid
//! JSON, or whose kind flags are unknown, aborts [`JsonSource::open`]; a method whose body the
//! frontend could not produce is marked with `body_error` and surfaces through
//! [`MethodInfo::body`] as a skippable error instead.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::metadata::loader::{BytecodeSource, ClassInfo, MethodInfo};
use crate::metadata::method::Visibility;
use crate::metadata::types::TypeKind;
use crate::metadata::units::MethodBody;
use crate::Result;

#[derive(Debug, Deserialize)]
struct ClassDump {
    name: String,
    #[serde(default)]
    kind: Vec<String>,
    #[serde(default)]
    methods: Vec<MethodDump>,
}

#[derive(Debug, Deserialize)]
struct MethodDump {
    name: String,
    signature: String,
    #[serde(default)]
    visibility: String,
    #[serde(default)]
    body: Option<MethodBody>,
    #[serde(default)]
    body_error: Option<String>,
}

/// A [`BytecodeSource`] over directories of per-class JSON unit dumps.
#[derive(Debug)]
pub struct JsonSource {
    classes: Vec<ClassInfo>,
}

impl JsonSource {
    /// Recursively collect and decode every `*.json` dump under the given directories.
    ///
    /// Classes are sorted by name so the resulting scan order (and everything downstream of
    /// it) is deterministic regardless of filesystem enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] for I/O failures and
    /// [`crate::Error::Malformed`] for dumps that fail to decode.
    pub fn open<P: AsRef<Path>>(dirs: &[P]) -> Result<Self> {
        let mut classes = Vec::new();

        for dir in dirs {
            for entry in WalkDir::new(dir.as_ref()) {
                let entry = entry.map_err(io::Error::from)?;
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().map_or(true, |ext| ext != "json")
                {
                    continue;
                }

                let text = fs::read_to_string(path)?;
                let dump: ClassDump = serde_json::from_str(&text)
                    .map_err(|err| malformed_error!("{}: {}", path.display(), err))?;
                classes.push(convert(dump, path)?);
            }
        }

        classes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { classes })
    }
}

impl BytecodeSource for JsonSource {
    fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }
}

fn convert(dump: ClassDump, path: &Path) -> Result<ClassInfo> {
    let mut kind = TypeKind::empty();
    for name in &dump.kind {
        let flag = TypeKind::from_kind_name(name)
            .ok_or_else(|| malformed_error!("{}: unknown type kind `{}`", path.display(), name))?;
        kind |= flag;
    }
    if kind.is_empty() {
        kind = TypeKind::CLASS;
    }

    let methods = dump
        .methods
        .into_iter()
        .map(|method| {
            let visibility = method
                .visibility
                .parse::<Visibility>()
                .unwrap_or(Visibility::Unknown);
            match (method.body, method.body_error) {
                (Some(body), None) => {
                    MethodInfo::new(&method.name, &method.signature, visibility, body)
                }
                (_, Some(reason)) => {
                    MethodInfo::without_body(&method.name, &method.signature, visibility, reason)
                }
                (None, None) => MethodInfo::without_body(
                    &method.name,
                    &method.signature,
                    visibility,
                    "no body in dump",
                ),
            }
        })
        .collect();

    Ok(ClassInfo {
        name: dump.name,
        kind,
        methods,
    })
}
