use std::collections::HashSet;

use weft_classfile::{parse_param_types, simple_class_name};
use weft_config::LayerConfig;
use weft_mappings::{
    MappedElementKind, MappingVisitor, MethodArgMapping, MethodMapping, NamespaceId, Result,
};

use crate::layer::CorrelationStats;
use crate::names::{eq_ignore_case, lower_camel_case, split_words, strip_numeric_suffix, NameTable};
use crate::xref::ClassCrossReference;

/// How argument records line up with the parameter types of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// One record per parameter: the n-th record (by LVT index) is the n-th parameter.
    Positional,
    /// Parameter index is `lv_index - offset`.
    Offset(i64),
}

impl Alignment {
    /// `args` must be sorted by LVT index.
    pub(crate) fn of(args: &[&MethodArgMapping], param_count: usize) -> Self {
        if args.len() == param_count {
            return Alignment::Positional;
        }
        // LVT indices come from the input; widen so the offset cannot overflow.
        let count = i64::try_from(param_count).unwrap_or(i64::MAX);
        match args.last().map(|last| i64::from(last.lv_index())) {
            // Wide primitives take two slots and instance methods reserve slot 0.
            Some(last) if last >= count => Alignment::Offset(last - count + 1),
            _ => Alignment::Offset(0),
        }
    }

    pub(crate) fn param_index(
        self,
        position: usize,
        lv_index: i32,
        param_count: usize,
    ) -> Option<usize> {
        match self {
            Alignment::Positional => Some(position).filter(|&idx| idx < param_count),
            Alignment::Offset(offset) => i64::from(lv_index)
                .checked_sub(offset)
                .and_then(|idx| usize::try_from(idx).ok())
                .filter(|&idx| idx < param_count),
        }
    }
}

/// Picks the final name of every community argument of a method.
pub(crate) struct ArgumentRemapper<'a> {
    pub(crate) config: &'a LayerConfig,
    pub(crate) xref: &'a ClassCrossReference,
    /// Community names of every class the community mappings know.
    pub(crate) known_types: &'a HashSet<&'a str>,
    pub(crate) named: NamespaceId,
}

impl ArgumentRemapper<'_> {
    /// Emits the arguments of `method` (a community method) whose community descriptor is
    /// `desc`. Names are claimed from `names`.
    ///
    /// If an argument cannot be lined up with the descriptor, it and every later argument of
    /// the method are left out.
    pub(crate) fn map_arguments(
        &self,
        out: &mut dyn MappingVisitor,
        method: &MethodMapping,
        desc: &str,
        names: &mut NameTable,
        stats: &mut CorrelationStats,
    ) -> Result<()> {
        let params = parse_param_types(desc)?;
        let mut args: Vec<&MethodArgMapping> = method.args().iter().collect();
        args.sort_by_key(|arg| arg.lv_index());
        let alignment = Alignment::of(&args, params.len());

        for (position, arg) in args.iter().enumerate() {
            let Some(arg_name) = arg.dst_name(self.named) else {
                continue;
            };
            let Some(param) = alignment.param_index(position, arg.lv_index(), params.len()) else {
                tracing::debug!(
                    target: "weft.layer",
                    method = method.dst_name(self.named).unwrap_or(method.src_name()),
                    desc,
                    lv_index = arg.lv_index(),
                    "skipping arguments of method (LVT offset mismatch)"
                );
                stats.skipped += 1;
                break;
            };

            let name = match params[param] {
                Some(ty) if self.config.remap_arguments && self.known_types.contains(ty) => {
                    let type_name = simple_class_name(ty);
                    match self.xref.get(type_name) {
                        Some(replacement) => self.try_remap(type_name, arg_name, replacement),
                        None => Some(arg_name.to_string()),
                    }
                }
                _ => Some(arg_name.to_string()),
            };
            let Some(name) = name else {
                continue;
            };

            let name = names.claim(&name);
            stats.arguments += 1;
            if out.visit_method_arg(arg.arg_position(), arg.lv_index(), None)? {
                out.visit_dst_name(MappedElementKind::MethodArg, 0, &name)?;
                if let Some(comment) = arg.comment().filter(|_| self.config.copy_comments) {
                    out.visit_comment(MappedElementKind::MethodArg, comment)?;
                }
            }
        }
        Ok(())
    }

    /// Decides the name of an argument of community type `type_name`, whose official
    /// counterpart suggests `replacement`. `None` drops the argument name.
    pub(crate) fn try_remap(
        &self,
        type_name: &str,
        arg_name: &str,
        replacement: &str,
    ) -> Option<String> {
        let arg_name = if type_name.ends_with(|ch: char| ch.is_ascii_digit()) {
            arg_name
        } else {
            strip_numeric_suffix(arg_name)
        };

        if eq_ignore_case(arg_name, type_name) {
            return Some(replacement.to_string());
        }

        if self.config.partial_match {
            let type_words = split_words(type_name);
            let replacement_words = split_words(replacement);
            if type_words.len() == replacement_words.len() {
                if let Some(idx) = type_words
                    .iter()
                    .position(|word| eq_ignore_case(word, arg_name))
                {
                    return Some(lower_camel_case(replacement_words[idx]));
                }
            }
        }

        if self.config.skip_different {
            None
        } else {
            Some(arg_name.to_string())
        }
    }
}
