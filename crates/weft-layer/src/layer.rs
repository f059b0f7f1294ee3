use std::collections::HashSet;
use std::time::Instant;

use weft_config::LayerConfig;
use weft_mappings::{
    MappedElementKind, MappingError, MappingSource, MappingVisitor, MemoryMappingTree,
    NamespaceId, Result, INTERMEDIARY, NAMED, OFFICIAL,
};

use crate::args::ArgumentRemapper;
use crate::names::NameTable;
use crate::vars::copy_variables;
use crate::xref::ClassCrossReference;

/// Counters of one correlation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationStats {
    /// Classes known to both the official and the community mappings.
    pub classes: usize,
    pub methods: usize,
    pub arguments: usize,
    pub variables: usize,
    /// Methods whose arguments could not be lined up with their descriptor.
    pub skipped: usize,
    /// The community enrichment did not run (CI bypass).
    pub bypassed: bool,
}

/// Mapping layer on top of the official mappings that adds community argument and local
/// variable names.
///
/// Sources are expected to declare these namespaces:
///
/// - intermediary: `official -> intermediary`
/// - official: `official -> named`
/// - community: `intermediary -> named`
///
/// The output always starts with a replay of the official mappings, followed (unless bypassed)
/// by an `official -> named` pass carrying the argument and variable names.
pub struct CorrelationLayer<I, O, C> {
    intermediary: I,
    official: O,
    community: C,
    config: LayerConfig,
}

impl<I, O, C> CorrelationLayer<I, O, C>
where
    I: MappingSource,
    O: MappingSource,
    C: MappingSource,
{
    pub fn new(intermediary: I, official: O, community: C, config: LayerConfig) -> Self {
        Self {
            intermediary,
            official,
            community,
            config,
        }
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Runs the correlation pass into `out`.
    pub fn run(&self, out: &mut dyn MappingVisitor) -> Result<CorrelationStats> {
        let start = Instant::now();

        self.official.accept(out)?;

        if self.config.bypassed() {
            tracing::info!(
                target: "weft.layer",
                "skipping mapping layer generation for CI build"
            );
            return Ok(CorrelationStats {
                bypassed: true,
                ..CorrelationStats::default()
            });
        }

        let mut official_tree = MemoryMappingTree::new();
        self.intermediary.accept(&mut official_tree)?;
        self.official.accept(&mut official_tree)?;

        let mut community_tree = MemoryMappingTree::new();
        self.community.accept(&mut community_tree)?;

        let stats = Correlation::new(&official_tree, &community_tree, &self.config)?.emit(out)?;

        tracing::info!(
            target: "weft.layer",
            skipped = stats.skipped,
            "failed to map the arguments of {} methods due to LVT mismatch",
            stats.skipped
        );
        tracing::info!(
            target: "weft.layer",
            classes = stats.classes,
            methods = stats.methods,
            arguments = stats.arguments,
            variables = stats.variables,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "mapping layer generated"
        );
        Ok(stats)
    }
}

impl<I, O, C> MappingSource for CorrelationLayer<I, O, C>
where
    I: MappingSource,
    O: MappingSource,
    C: MappingSource,
{
    fn accept(&self, visitor: &mut dyn MappingVisitor) -> Result<()> {
        self.run(visitor).map(|_| ())
    }
}

/// State of the emit pass over the two populated trees.
struct Correlation<'a> {
    official: &'a MemoryMappingTree,
    community: &'a MemoryMappingTree,
    config: &'a LayerConfig,
    /// Intermediary column of the official tree.
    intermediary: NamespaceId,
    /// Community naming column of the community tree.
    named: NamespaceId,
    xref: ClassCrossReference,
    known_types: HashSet<&'a str>,
}

fn require_namespace(
    tree: &MemoryMappingTree,
    tree_name: &'static str,
    namespace: &'static str,
) -> Result<NamespaceId> {
    tree.namespace_id(namespace)
        .ok_or(MappingError::MissingNamespace {
            tree: tree_name,
            namespace,
        })
}

impl<'a> Correlation<'a> {
    fn new(
        official: &'a MemoryMappingTree,
        community: &'a MemoryMappingTree,
        config: &'a LayerConfig,
    ) -> Result<Self> {
        let intermediary = require_namespace(official, "official", INTERMEDIARY)?;
        let official_named = require_namespace(official, "official", NAMED)?;
        let named = require_namespace(community, "community", NAMED)?;
        // Community classes are looked up by their intermediary name.
        if require_namespace(community, "community", INTERMEDIARY)? != NamespaceId::Source {
            return Err(MappingError::NamespaceMismatch {
                expected: INTERMEDIARY.to_string(),
                found: community.src_namespace().unwrap_or_default().to_string(),
            });
        }

        let xref =
            ClassCrossReference::build(official, intermediary, official_named, community, named);
        let known_types = community
            .classes()
            .filter_map(|class| class.dst_name(named))
            .collect();

        Ok(Self {
            official,
            community,
            config,
            intermediary,
            named,
            xref,
            known_types,
        })
    }

    fn emit(&self, out: &mut dyn MappingVisitor) -> Result<CorrelationStats> {
        let mut stats = CorrelationStats::default();
        let mut names = NameTable::default();
        let remapper = ArgumentRemapper {
            config: self.config,
            xref: &self.xref,
            known_types: &self.known_types,
            named: self.named,
        };

        out.visit_namespaces(OFFICIAL, &[NAMED.to_string()])?;

        for class in self.official.classes() {
            let Some(community_class) = class
                .dst_name(self.intermediary)
                .and_then(|name| self.community.class(name))
            else {
                continue;
            };
            if !out.visit_class(class.src_name())? {
                continue;
            }
            stats.classes += 1;
            self.copy_comment(out, MappedElementKind::Class, community_class.comment())?;

            for method in class.methods() {
                let Some(intermediary_name) = method.dst_name(self.intermediary) else {
                    continue;
                };
                let intermediary_desc = self.official.map_desc(method.src_desc(), self.intermediary)?;
                let Some(community_method) =
                    community_class.method(intermediary_name, &intermediary_desc)
                else {
                    continue;
                };
                let community_desc = self
                    .community
                    .map_desc(community_method.src_desc(), self.named)?;

                if !out.visit_method(method.src_name(), method.src_desc())? {
                    continue;
                }
                stats.methods += 1;
                self.copy_comment(out, MappedElementKind::Method, community_method.comment())?;

                names.clear();
                remapper.map_arguments(
                    out,
                    community_method,
                    &community_desc,
                    &mut names,
                    &mut stats,
                )?;
                if self.config.map_variables {
                    copy_variables(
                        out,
                        community_method,
                        self.named,
                        self.config.copy_comments,
                        &mut names,
                        &mut stats,
                    )?;
                }
            }
            out.visit_end()?;
        }
        Ok(stats)
    }

    fn copy_comment(
        &self,
        out: &mut dyn MappingVisitor,
        kind: MappedElementKind,
        comment: Option<&str>,
    ) -> Result<()> {
        match comment {
            Some(comment) if self.config.copy_comments => out.visit_comment(kind, comment),
            _ => Ok(()),
        }
    }
}
