use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappedElementKind {
    Class,
    Field,
    Method,
    MethodArg,
    MethodVar,
}

/// Push-style consumer of mapping data.
///
/// A visit starts with [`visit_namespaces`](MappingVisitor::visit_namespaces), followed by one
/// sequence per class: the class itself, its destination names and comment, then its members
/// (each followed by their own names, comments and locals), closed by
/// [`visit_end`](MappingVisitor::visit_end).
///
/// Element-opening calls return `Ok(false)` to ask the caller to skip that element's
/// children. A class skipped this way is not closed with `visit_end`.
pub trait MappingVisitor {
    fn visit_namespaces(&mut self, src_namespace: &str, dst_namespaces: &[String]) -> Result<()>;

    fn visit_class(&mut self, src_name: &str) -> Result<bool>;

    fn visit_field(&mut self, src_name: &str, src_desc: &str) -> Result<bool>;

    fn visit_method(&mut self, src_name: &str, src_desc: &str) -> Result<bool>;

    fn visit_method_arg(
        &mut self,
        arg_position: i32,
        lv_index: i32,
        src_name: Option<&str>,
    ) -> Result<bool>;

    fn visit_method_var(
        &mut self,
        lvt_row_index: i32,
        lv_index: i32,
        start_op_idx: i32,
        end_op_idx: i32,
        src_name: Option<&str>,
    ) -> Result<bool>;

    /// Names the element most recently opened for `kind` in destination namespace `namespace`
    /// (an index into the `dst_namespaces` of the last namespace declaration).
    fn visit_dst_name(&mut self, kind: MappedElementKind, namespace: usize, name: &str)
        -> Result<()>;

    fn visit_comment(&mut self, _kind: MappedElementKind, _comment: &str) -> Result<()> {
        Ok(())
    }

    /// Closes the current class.
    fn visit_end(&mut self) -> Result<()>;
}

/// Something that can replay mapping data into a [`MappingVisitor`].
pub trait MappingSource {
    fn accept(&self, visitor: &mut dyn MappingVisitor) -> Result<()>;
}

impl<T: MappingSource + ?Sized> MappingSource for &T {
    fn accept(&self, visitor: &mut dyn MappingVisitor) -> Result<()> {
        (**self).accept(visitor)
    }
}
