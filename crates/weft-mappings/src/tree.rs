use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap};

use crate::error::{MappingError, Result};
use crate::namespace::NamespaceId;
use crate::visitor::{MappedElementKind, MappingSource, MappingVisitor};

/// Mapping tree held entirely in memory.
///
/// Populated by visiting it (possibly several times; destination namespaces of later visits are
/// merged into the existing columns as long as the source namespace matches) and replayed via
/// [`MappingSource::accept`]. Classes and members keep the order they were first visited in.
#[derive(Debug, Default)]
pub struct MemoryMappingTree {
    src_namespace: Option<String>,
    dst_namespaces: Vec<String>,
    classes: IndexMap<String, ClassMapping>,
    cursor: Cursor,
}

#[derive(Debug, Default)]
struct Cursor {
    /// Maps the destination indices of the current visit onto this tree's columns.
    namespaces: Vec<usize>,
    class: Option<usize>,
    member: Option<Member>,
    local: Option<Local>,
}

#[derive(Debug, Clone, Copy)]
enum Member {
    Field(usize),
    Method(usize),
}

#[derive(Debug, Clone, Copy)]
enum Local {
    Arg(usize),
    Var(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Names {
    dst: Vec<Option<String>>,
    comment: Option<String>,
}

impl Names {
    fn get(&self, namespace: usize) -> Option<&str> {
        self.dst.get(namespace).and_then(|name| name.as_deref())
    }

    fn set(&mut self, namespace: usize, name: &str) {
        if self.dst.len() <= namespace {
            self.dst.resize(namespace + 1, None);
        }
        self.dst[namespace] = Some(name.to_string());
    }

    fn replay(&self, kind: MappedElementKind, visitor: &mut dyn MappingVisitor) -> Result<()> {
        for (namespace, name) in self.dst.iter().enumerate() {
            if let Some(name) = name {
                visitor.visit_dst_name(kind, namespace, name)?;
            }
        }
        if let Some(comment) = &self.comment {
            visitor.visit_comment(kind, comment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemberKey {
    name: String,
    desc: String,
}

impl Hash for MemberKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        MemberRef {
            name: &self.name,
            desc: &self.desc,
        }
        .hash(state);
    }
}

#[derive(Hash)]
struct MemberRef<'a> {
    name: &'a str,
    desc: &'a str,
}

impl Equivalent<MemberKey> for MemberRef<'_> {
    fn equivalent(&self, key: &MemberKey) -> bool {
        self.name == key.name && self.desc == key.desc
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    src_name: String,
    names: Names,
    fields: IndexMap<MemberKey, FieldMapping>,
    methods: IndexMap<MemberKey, MethodMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    src_name: String,
    src_desc: String,
    names: Names,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMapping {
    src_name: String,
    src_desc: String,
    names: Names,
    args: Vec<MethodArgMapping>,
    vars: Vec<MethodVarMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArgMapping {
    arg_position: i32,
    lv_index: i32,
    src_name: Option<String>,
    names: Names,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodVarMapping {
    lvt_row_index: i32,
    lv_index: i32,
    start_op_idx: i32,
    end_op_idx: i32,
    src_name: Option<String>,
    names: Names,
}

impl ClassMapping {
    pub fn src_name(&self) -> &str {
        &self.src_name
    }

    pub fn dst_name(&self, namespace: NamespaceId) -> Option<&str> {
        match namespace {
            NamespaceId::Source => Some(&self.src_name),
            NamespaceId::Destination(ns) => self.names.get(ns),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.names.comment.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodMapping> {
        self.methods.values()
    }

    pub fn method(&self, name: &str, desc: &str) -> Option<&MethodMapping> {
        self.methods.get(&MemberRef { name, desc })
    }

    fn replay(&self, visitor: &mut dyn MappingVisitor) -> Result<()> {
        if !visitor.visit_class(&self.src_name)? {
            return Ok(());
        }
        self.names.replay(MappedElementKind::Class, visitor)?;
        for field in self.fields.values() {
            if visitor.visit_field(&field.src_name, &field.src_desc)? {
                field.names.replay(MappedElementKind::Field, visitor)?;
            }
        }
        for method in self.methods.values() {
            method.replay(visitor)?;
        }
        visitor.visit_end()
    }
}

impl FieldMapping {
    pub fn src_name(&self) -> &str {
        &self.src_name
    }

    pub fn src_desc(&self) -> &str {
        &self.src_desc
    }

    pub fn dst_name(&self, namespace: NamespaceId) -> Option<&str> {
        match namespace {
            NamespaceId::Source => Some(&self.src_name),
            NamespaceId::Destination(ns) => self.names.get(ns),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.names.comment.as_deref()
    }
}

impl MethodMapping {
    pub fn src_name(&self) -> &str {
        &self.src_name
    }

    pub fn src_desc(&self) -> &str {
        &self.src_desc
    }

    pub fn dst_name(&self, namespace: NamespaceId) -> Option<&str> {
        match namespace {
            NamespaceId::Source => Some(&self.src_name),
            NamespaceId::Destination(ns) => self.names.get(ns),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.names.comment.as_deref()
    }

    /// Arguments in the order they were first visited.
    pub fn args(&self) -> &[MethodArgMapping] {
        &self.args
    }

    pub fn vars(&self) -> &[MethodVarMapping] {
        &self.vars
    }

    fn replay(&self, visitor: &mut dyn MappingVisitor) -> Result<()> {
        if !visitor.visit_method(&self.src_name, &self.src_desc)? {
            return Ok(());
        }
        self.names.replay(MappedElementKind::Method, visitor)?;
        for arg in &self.args {
            if visitor.visit_method_arg(arg.arg_position, arg.lv_index, arg.src_name.as_deref())? {
                arg.names.replay(MappedElementKind::MethodArg, visitor)?;
            }
        }
        for var in &self.vars {
            if visitor.visit_method_var(
                var.lvt_row_index,
                var.lv_index,
                var.start_op_idx,
                var.end_op_idx,
                var.src_name.as_deref(),
            )? {
                var.names.replay(MappedElementKind::MethodVar, visitor)?;
            }
        }
        Ok(())
    }
}

impl MethodArgMapping {
    pub fn arg_position(&self) -> i32 {
        self.arg_position
    }

    pub fn lv_index(&self) -> i32 {
        self.lv_index
    }

    pub fn dst_name(&self, namespace: NamespaceId) -> Option<&str> {
        match namespace {
            NamespaceId::Source => self.src_name.as_deref(),
            NamespaceId::Destination(ns) => self.names.get(ns),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.names.comment.as_deref()
    }
}

impl MethodVarMapping {
    pub fn lvt_row_index(&self) -> i32 {
        self.lvt_row_index
    }

    pub fn lv_index(&self) -> i32 {
        self.lv_index
    }

    pub fn start_op_idx(&self) -> i32 {
        self.start_op_idx
    }

    pub fn end_op_idx(&self) -> i32 {
        self.end_op_idx
    }

    pub fn dst_name(&self, namespace: NamespaceId) -> Option<&str> {
        match namespace {
            NamespaceId::Source => self.src_name.as_deref(),
            NamespaceId::Destination(ns) => self.names.get(ns),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.names.comment.as_deref()
    }
}

impl MemoryMappingTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_namespace(&self) -> Option<&str> {
        self.src_namespace.as_deref()
    }

    pub fn dst_namespaces(&self) -> &[String] {
        &self.dst_namespaces
    }

    pub fn namespace_id(&self, name: &str) -> Option<NamespaceId> {
        if self.src_namespace.as_deref() == Some(name) {
            return Some(NamespaceId::Source);
        }
        self.dst_namespaces
            .iter()
            .position(|ns| ns == name)
            .map(NamespaceId::Destination)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassMapping> {
        self.classes.values()
    }

    pub fn class(&self, src_name: &str) -> Option<&ClassMapping> {
        self.classes.get(src_name)
    }

    /// Rewrites the class names in `desc` (a source-namespace descriptor) into `namespace`.
    /// Classes this tree does not name in `namespace` keep their source name.
    pub fn map_desc(&self, desc: &str, namespace: NamespaceId) -> Result<String> {
        Ok(weft_classfile::remap_descriptor(desc, |name| {
            self.class(name).and_then(|class| class.dst_name(namespace))
        })?)
    }

    fn current_class(&mut self, kind: MappedElementKind) -> Result<&mut ClassMapping> {
        self.cursor
            .class
            .and_then(|idx| self.classes.get_index_mut(idx))
            .map(|(_, class)| class)
            .ok_or(MappingError::NoElement(kind))
    }

    fn current_method(&mut self, kind: MappedElementKind) -> Result<&mut MethodMapping> {
        let Some(Member::Method(idx)) = self.cursor.member else {
            return Err(MappingError::NoElement(kind));
        };
        self.current_class(kind)?
            .methods
            .get_index_mut(idx)
            .map(|(_, method)| method)
            .ok_or(MappingError::NoElement(kind))
    }

    fn current_names(&mut self, kind: MappedElementKind) -> Result<&mut Names> {
        let member = self.cursor.member;
        let local = self.cursor.local;
        match kind {
            MappedElementKind::Class => Ok(&mut self.current_class(kind)?.names),
            MappedElementKind::Field => match member {
                Some(Member::Field(idx)) => self
                    .current_class(kind)?
                    .fields
                    .get_index_mut(idx)
                    .map(|(_, field)| &mut field.names)
                    .ok_or(MappingError::NoElement(kind)),
                _ => Err(MappingError::NoElement(kind)),
            },
            MappedElementKind::Method => Ok(&mut self.current_method(kind)?.names),
            MappedElementKind::MethodArg => match local {
                Some(Local::Arg(idx)) => self
                    .current_method(kind)?
                    .args
                    .get_mut(idx)
                    .map(|arg| &mut arg.names)
                    .ok_or(MappingError::NoElement(kind)),
                _ => Err(MappingError::NoElement(kind)),
            },
            MappedElementKind::MethodVar => match local {
                Some(Local::Var(idx)) => self
                    .current_method(kind)?
                    .vars
                    .get_mut(idx)
                    .map(|var| &mut var.names)
                    .ok_or(MappingError::NoElement(kind)),
                _ => Err(MappingError::NoElement(kind)),
            },
        }
    }
}

impl MappingVisitor for MemoryMappingTree {
    fn visit_namespaces(&mut self, src_namespace: &str, dst_namespaces: &[String]) -> Result<()> {
        match &self.src_namespace {
            Some(existing) if existing != src_namespace => {
                return Err(MappingError::NamespaceMismatch {
                    expected: existing.clone(),
                    found: src_namespace.to_string(),
                });
            }
            Some(_) => {}
            None => self.src_namespace = Some(src_namespace.to_string()),
        }

        self.cursor = Cursor::default();
        for ns in dst_namespaces {
            let idx = match self.dst_namespaces.iter().position(|known| known == ns) {
                Some(idx) => idx,
                None => {
                    self.dst_namespaces.push(ns.clone());
                    self.dst_namespaces.len() - 1
                }
            };
            self.cursor.namespaces.push(idx);
        }
        Ok(())
    }

    fn visit_class(&mut self, src_name: &str) -> Result<bool> {
        if self.src_namespace.is_none() {
            return Err(MappingError::NamespacesNotDeclared);
        }
        let entry = self.classes.entry(src_name.to_string());
        let idx = entry.index();
        entry.or_insert_with(|| ClassMapping {
            src_name: src_name.to_string(),
            names: Names::default(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        });
        self.cursor.class = Some(idx);
        self.cursor.member = None;
        self.cursor.local = None;
        Ok(true)
    }

    fn visit_field(&mut self, src_name: &str, src_desc: &str) -> Result<bool> {
        let class = self.current_class(MappedElementKind::Field)?;
        let entry = class.fields.entry(MemberKey {
            name: src_name.to_string(),
            desc: src_desc.to_string(),
        });
        let idx = entry.index();
        entry.or_insert_with(|| FieldMapping {
            src_name: src_name.to_string(),
            src_desc: src_desc.to_string(),
            names: Names::default(),
        });
        self.cursor.member = Some(Member::Field(idx));
        self.cursor.local = None;
        Ok(true)
    }

    fn visit_method(&mut self, src_name: &str, src_desc: &str) -> Result<bool> {
        let class = self.current_class(MappedElementKind::Method)?;
        let entry = class.methods.entry(MemberKey {
            name: src_name.to_string(),
            desc: src_desc.to_string(),
        });
        let idx = entry.index();
        entry.or_insert_with(|| MethodMapping {
            src_name: src_name.to_string(),
            src_desc: src_desc.to_string(),
            names: Names::default(),
            args: Vec::new(),
            vars: Vec::new(),
        });
        self.cursor.member = Some(Member::Method(idx));
        self.cursor.local = None;
        Ok(true)
    }

    fn visit_method_arg(
        &mut self,
        arg_position: i32,
        lv_index: i32,
        src_name: Option<&str>,
    ) -> Result<bool> {
        let method = self.current_method(MappedElementKind::MethodArg)?;
        let existing = method.args.iter().position(|arg| {
            if lv_index >= 0 && arg.lv_index >= 0 {
                arg.lv_index == lv_index
            } else {
                arg_position >= 0 && arg.arg_position == arg_position
            }
        });
        let idx = match existing {
            Some(idx) => {
                let arg = &mut method.args[idx];
                if arg.arg_position < 0 {
                    arg.arg_position = arg_position;
                }
                if arg.lv_index < 0 {
                    arg.lv_index = lv_index;
                }
                if let Some(src_name) = src_name {
                    arg.src_name = Some(src_name.to_string());
                }
                idx
            }
            None => {
                method.args.push(MethodArgMapping {
                    arg_position,
                    lv_index,
                    src_name: src_name.map(str::to_string),
                    names: Names::default(),
                });
                method.args.len() - 1
            }
        };
        self.cursor.local = Some(Local::Arg(idx));
        Ok(true)
    }

    fn visit_method_var(
        &mut self,
        lvt_row_index: i32,
        lv_index: i32,
        start_op_idx: i32,
        end_op_idx: i32,
        src_name: Option<&str>,
    ) -> Result<bool> {
        let method = self.current_method(MappedElementKind::MethodVar)?;
        let existing = method.vars.iter().position(|var| {
            if lvt_row_index >= 0 && var.lvt_row_index >= 0 {
                var.lvt_row_index == lvt_row_index
            } else {
                var.lv_index == lv_index && var.start_op_idx == start_op_idx
            }
        });
        let idx = match existing {
            Some(idx) => {
                let var = &mut method.vars[idx];
                if var.lvt_row_index < 0 {
                    var.lvt_row_index = lvt_row_index;
                }
                if var.end_op_idx < 0 {
                    var.end_op_idx = end_op_idx;
                }
                if let Some(src_name) = src_name {
                    var.src_name = Some(src_name.to_string());
                }
                idx
            }
            None => {
                method.vars.push(MethodVarMapping {
                    lvt_row_index,
                    lv_index,
                    start_op_idx,
                    end_op_idx,
                    src_name: src_name.map(str::to_string),
                    names: Names::default(),
                });
                method.vars.len() - 1
            }
        };
        self.cursor.local = Some(Local::Var(idx));
        Ok(true)
    }

    fn visit_dst_name(
        &mut self,
        kind: MappedElementKind,
        namespace: usize,
        name: &str,
    ) -> Result<()> {
        let column = *self
            .cursor
            .namespaces
            .get(namespace)
            .ok_or(MappingError::UnknownNamespace(namespace))?;
        self.current_names(kind)?.set(column, name);
        Ok(())
    }

    fn visit_comment(&mut self, kind: MappedElementKind, comment: &str) -> Result<()> {
        self.current_names(kind)?.comment = Some(comment.to_string());
        Ok(())
    }

    fn visit_end(&mut self) -> Result<()> {
        self.cursor.class = None;
        self.cursor.member = None;
        self.cursor.local = None;
        Ok(())
    }
}

impl MappingSource for MemoryMappingTree {
    fn accept(&self, visitor: &mut dyn MappingVisitor) -> Result<()> {
        let Some(src_namespace) = &self.src_namespace else {
            tracing::debug!(target: "weft.mappings", "replaying an empty mapping tree");
            return Ok(());
        };
        visitor.visit_namespaces(src_namespace, &self.dst_namespaces)?;
        for class in self.classes.values() {
            class.replay(visitor)?;
        }
        Ok(())
    }
}
