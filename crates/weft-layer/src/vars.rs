use weft_mappings::{MappedElementKind, MappingVisitor, MethodMapping, NamespaceId, Result};

use crate::layer::CorrelationStats;
use crate::names::{strip_numeric_suffix, NameTable};

/// Copies the community local variable names of `method`.
///
/// There is no type information for locals, so names are only stripped of their numeric
/// suffix and deduplicated against `names`, which already holds the argument names.
pub(crate) fn copy_variables(
    out: &mut dyn MappingVisitor,
    method: &MethodMapping,
    named: NamespaceId,
    copy_comments: bool,
    names: &mut NameTable,
    stats: &mut CorrelationStats,
) -> Result<()> {
    for var in method.vars() {
        let Some(var_name) = var.dst_name(named) else {
            continue;
        };
        let name = names.claim(strip_numeric_suffix(var_name));
        stats.variables += 1;
        if out.visit_method_var(
            var.lvt_row_index(),
            var.lv_index(),
            var.start_op_idx(),
            var.end_op_idx(),
            None,
        )? {
            out.visit_dst_name(MappedElementKind::MethodVar, 0, &name)?;
            if let Some(comment) = var.comment().filter(|_| copy_comments) {
                out.visit_comment(MappedElementKind::MethodVar, comment)?;
            }
        }
    }
    Ok(())
}
