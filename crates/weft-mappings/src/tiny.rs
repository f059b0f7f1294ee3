use std::io::Write;

use crate::error::{MappingError, Result};
use crate::visitor::{MappedElementKind, MappingVisitor};

/// Writes mappings in the tab separated "tiny v2" text format.
///
/// Rows are written once all destination names of an element are known, so the writer holds
/// at most one pending row. Call [`finish`](TinyV2Writer::finish) to flush it.
pub struct TinyV2Writer<W: Write> {
    out: W,
    namespaces: Option<(String, Vec<String>)>,
    pending: Option<PendingRow>,
}

struct PendingRow {
    kind: MappedElementKind,
    /// Tab separated columns preceding the destination names.
    prefix: String,
    dst: Vec<Option<String>>,
}

fn depth(kind: MappedElementKind) -> usize {
    match kind {
        MappedElementKind::Class => 0,
        MappedElementKind::Field | MappedElementKind::Method => 1,
        MappedElementKind::MethodArg | MappedElementKind::MethodVar => 2,
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out
}

impl<W: Write> TinyV2Writer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            namespaces: None,
            pending: None,
        }
    }

    /// Flushes the pending row and returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush_pending()?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn dst_count(&self) -> Result<usize> {
        self.namespaces
            .as_ref()
            .map(|(_, dst)| dst.len())
            .ok_or(MappingError::NamespacesNotDeclared)
    }

    fn flush_pending(&mut self) -> Result<()> {
        let Some(row) = self.pending.take() else {
            return Ok(());
        };
        let mut line = String::new();
        for _ in 0..depth(row.kind) {
            line.push('\t');
        }
        line.push_str(&row.prefix);
        for name in &row.dst {
            line.push('\t');
            if let Some(name) = name {
                line.push_str(name);
            }
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn begin(&mut self, kind: MappedElementKind, prefix: String) -> Result<bool> {
        let dst_count = self.dst_count()?;
        self.flush_pending()?;
        self.pending = Some(PendingRow {
            kind,
            prefix,
            dst: vec![None; dst_count],
        });
        Ok(true)
    }
}

impl<W: Write> MappingVisitor for TinyV2Writer<W> {
    fn visit_namespaces(&mut self, src_namespace: &str, dst_namespaces: &[String]) -> Result<()> {
        self.flush_pending()?;
        match &self.namespaces {
            Some((src, dst)) => {
                if src != src_namespace || dst.as_slice() != dst_namespaces {
                    return Err(MappingError::NamespaceMismatch {
                        expected: format!("{src} -> {}", dst.join(", ")),
                        found: format!("{src_namespace} -> {}", dst_namespaces.join(", ")),
                    });
                }
            }
            None => {
                write!(self.out, "tiny\t2\t0\t{src_namespace}")?;
                for ns in dst_namespaces {
                    write!(self.out, "\t{ns}")?;
                }
                writeln!(self.out)?;
                self.namespaces = Some((src_namespace.to_string(), dst_namespaces.to_vec()));
            }
        }
        Ok(())
    }

    fn visit_class(&mut self, src_name: &str) -> Result<bool> {
        self.begin(MappedElementKind::Class, format!("c\t{src_name}"))
    }

    fn visit_field(&mut self, src_name: &str, src_desc: &str) -> Result<bool> {
        self.begin(MappedElementKind::Field, format!("f\t{src_desc}\t{src_name}"))
    }

    fn visit_method(&mut self, src_name: &str, src_desc: &str) -> Result<bool> {
        self.begin(MappedElementKind::Method, format!("m\t{src_desc}\t{src_name}"))
    }

    fn visit_method_arg(
        &mut self,
        _arg_position: i32,
        lv_index: i32,
        src_name: Option<&str>,
    ) -> Result<bool> {
        self.begin(
            MappedElementKind::MethodArg,
            format!("p\t{lv_index}\t{}", src_name.unwrap_or_default()),
        )
    }

    fn visit_method_var(
        &mut self,
        lvt_row_index: i32,
        lv_index: i32,
        start_op_idx: i32,
        _end_op_idx: i32,
        src_name: Option<&str>,
    ) -> Result<bool> {
        let lvt_row = if lvt_row_index >= 0 {
            lvt_row_index.to_string()
        } else {
            String::new()
        };
        self.begin(
            MappedElementKind::MethodVar,
            format!(
                "v\t{lv_index}\t{start_op_idx}\t{lvt_row}\t{}",
                src_name.unwrap_or_default()
            ),
        )
    }

    fn visit_dst_name(
        &mut self,
        kind: MappedElementKind,
        namespace: usize,
        name: &str,
    ) -> Result<()> {
        let row = self
            .pending
            .as_mut()
            .filter(|row| row.kind == kind)
            .ok_or(MappingError::NoElement(kind))?;
        let slot = row
            .dst
            .get_mut(namespace)
            .ok_or(MappingError::UnknownNamespace(namespace))?;
        *slot = Some(name.to_string());
        Ok(())
    }

    fn visit_comment(&mut self, kind: MappedElementKind, comment: &str) -> Result<()> {
        if self.pending.as_ref().is_some_and(|row| row.kind == kind) {
            self.flush_pending()?;
        }
        let mut line = String::new();
        for _ in 0..=depth(kind) {
            line.push('\t');
        }
        line.push_str("c\t");
        line.push_str(&escape(comment));
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn visit_end(&mut self) -> Result<()> {
        self.flush_pending()
    }
}
