use weft_layer::{CorrelationLayer, CorrelationStats, LayerConfig};
use weft_mappings::{
    MappedElementKind, MappingVisitor, MemoryMappingTree, MethodArgMapping, MethodVarMapping,
    NamespaceId,
};

/// Populates a [`MemoryMappingTree`] through its visitor interface.
pub struct TreeBuilder {
    tree: MemoryMappingTree,
}

impl TreeBuilder {
    pub fn new(src: &str, dst: &[&str]) -> Self {
        let mut tree = MemoryMappingTree::new();
        let dst: Vec<String> = dst.iter().map(|ns| ns.to_string()).collect();
        tree.visit_namespaces(src, &dst).unwrap();
        Self { tree }
    }

    fn names(mut self, kind: MappedElementKind, names: &[&str]) -> Self {
        for (ns, name) in names.iter().enumerate() {
            self.tree.visit_dst_name(kind, ns, name).unwrap();
        }
        self
    }

    pub fn class(mut self, src: &str, dst: &[&str]) -> Self {
        self.tree.visit_class(src).unwrap();
        self.names(MappedElementKind::Class, dst)
    }

    pub fn field(mut self, src: &str, desc: &str, dst: &[&str]) -> Self {
        self.tree.visit_field(src, desc).unwrap();
        self.names(MappedElementKind::Field, dst)
    }

    pub fn method(mut self, src: &str, desc: &str, dst: &[&str]) -> Self {
        self.tree.visit_method(src, desc).unwrap();
        self.names(MappedElementKind::Method, dst)
    }

    pub fn arg(self, position: i32, lv_index: i32, name: &str) -> Self {
        self.arg_with(position, lv_index, Some(name))
    }

    /// Argument record that may lack a community name.
    pub fn arg_with(mut self, position: i32, lv_index: i32, name: Option<&str>) -> Self {
        self.tree.visit_method_arg(position, lv_index, None).unwrap();
        match name {
            Some(name) => self.names(MappedElementKind::MethodArg, &[name]),
            None => self,
        }
    }

    pub fn var(mut self, row: i32, lv_index: i32, start: i32, end: i32, name: &str) -> Self {
        self.tree
            .visit_method_var(row, lv_index, start, end, None)
            .unwrap();
        self.names(MappedElementKind::MethodVar, &[name])
    }

    pub fn comment(mut self, kind: MappedElementKind, comment: &str) -> Self {
        self.tree.visit_comment(kind, comment).unwrap();
        self
    }

    pub fn build(mut self) -> MemoryMappingTree {
        self.tree.visit_end().unwrap();
        self.tree
    }
}

pub struct Fixture {
    pub intermediary: MemoryMappingTree,
    pub official: MemoryMappingTree,
    pub community: MemoryMappingTree,
}

/// A small game-like mapping set.
///
/// Official class names differ from the community ones for `Player` (`PlayerEntity`),
/// `ItemInstance` (`ItemStack`) and `Level` (`World`); `Entity` is named identically.
pub fn fixture() -> Fixture {
    let intermediary = TreeBuilder::new("official", &["intermediary"])
        .class("a", &["net/minecraft/class_1297"])
        .field("a", "I", &["field_6011"])
        .class("b", &["net/minecraft/class_1657"])
        .method("a", "(Lc;I)V", &["method_7270"])
        .method("b", "(Lb;Lb;)V", &["method_7271"])
        .method("c", "(Ld;JLa;)Z", &["method_7272"])
        .method("d", "(Lc;)V", &["method_7273"])
        .method("e", "(Ld;JLa;)Z", &["method_7274"])
        .method("f", "(JLb;)V", &["method_7275"])
        .class("c", &["net/minecraft/class_1799"])
        .class("d", &["net/minecraft/class_1937"])
        .class("e", &["net/minecraft/class_9999"])
        .build();

    let official = TreeBuilder::new("official", &["named"])
        .class("a", &["net/minecraft/world/entity/Entity"])
        .field("a", "I", &["id"])
        .class("b", &["net/minecraft/world/entity/player/Player"])
        .method("a", "(Lc;I)V", &["addItem"])
        .method("b", "(Lb;Lb;)V", &["swap"])
        .method("c", "(Ld;JLa;)Z", &["teleport"])
        .method("d", "(Lc;)V", &["drop"])
        .method("e", "(Ld;JLa;)Z", &["teleportLater"])
        .method("f", "(JLb;)V", &["follow"])
        .class("c", &["net/minecraft/world/item/ItemInstance"])
        .class("d", &["net/minecraft/world/level/Level"])
        .class("e", &["net/minecraft/Unmatched"])
        .build();

    let community = TreeBuilder::new("intermediary", &["named"])
        .class("net/minecraft/class_1297", &["net/minecraft/entity/Entity"])
        .class(
            "net/minecraft/class_1657",
            &["net/minecraft/entity/player/PlayerEntity"],
        )
        .comment(MappedElementKind::Class, "A player.")
        .method(
            "method_7270",
            "(Lnet/minecraft/class_1799;I)V",
            &["giveItemStack"],
        )
        .comment(MappedElementKind::Method, "Gives an item.")
        .arg(0, 1, "stack")
        .arg(1, 2, "count2")
        .var(0, 3, 5, 20, "instance1")
        .var(1, 4, 7, 20, "var2")
        .method(
            "method_7271",
            "(Lnet/minecraft/class_1657;Lnet/minecraft/class_1657;)V",
            &["swapWith"],
        )
        .arg(0, 1, "playerEntity")
        .arg(1, 2, "playerEntity2")
        .method(
            "method_7272",
            "(Lnet/minecraft/class_1937;JLnet/minecraft/class_1297;)Z",
            &["teleport"],
        )
        .arg(2, 4, "entity")
        .arg(0, 1, "world")
        .arg(1, 2, "ticks")
        .method(
            "method_7274",
            "(Lnet/minecraft/class_1937;JLnet/minecraft/class_1297;)Z",
            &["teleportLater"],
        )
        .arg(0, 1, "world")
        .arg(2, 4, "target")
        .method(
            "method_7275",
            "(JLnet/minecraft/class_1657;)V",
            &["follow"],
        )
        .arg(1, 3, "playerEntity")
        .class("net/minecraft/class_1799", &["net/minecraft/item/ItemStack"])
        .class("net/minecraft/class_1937", &["net/minecraft/world/World"])
        .build();

    Fixture {
        intermediary,
        official,
        community,
    }
}

impl Fixture {
    pub fn layer(
        &self,
        config: LayerConfig,
    ) -> CorrelationLayer<&MemoryMappingTree, &MemoryMappingTree, &MemoryMappingTree> {
        CorrelationLayer::new(&self.intermediary, &self.official, &self.community, config)
    }

    /// Runs the layer into a fresh tree.
    pub fn merge(&self, config: LayerConfig) -> (MemoryMappingTree, CorrelationStats) {
        let mut out = MemoryMappingTree::new();
        let stats = self.layer(config).run(&mut out).unwrap();
        (out, stats)
    }
}

fn named(tree: &MemoryMappingTree) -> NamespaceId {
    tree.namespace_id("named").unwrap()
}

fn args<'a>(tree: &'a MemoryMappingTree, class: &str, method: &str, desc: &str) -> &'a [MethodArgMapping] {
    tree.class(class)
        .and_then(|class| class.method(method, desc))
        .map(|method| method.args())
        .unwrap_or_default()
}

fn vars<'a>(tree: &'a MemoryMappingTree, class: &str, method: &str, desc: &str) -> &'a [MethodVarMapping] {
    tree.class(class)
        .and_then(|class| class.method(method, desc))
        .map(|method| method.vars())
        .unwrap_or_default()
}

/// `(lv_index, name)` of every argument named in the merged tree.
pub fn arg_names(
    tree: &MemoryMappingTree,
    class: &str,
    method: &str,
    desc: &str,
) -> Vec<(i32, String)> {
    let named = named(tree);
    args(tree, class, method, desc)
        .iter()
        .filter_map(|arg| Some((arg.lv_index(), arg.dst_name(named)?.to_string())))
        .collect()
}

/// `(lv_index, name)` of every variable named in the merged tree.
pub fn var_names(
    tree: &MemoryMappingTree,
    class: &str,
    method: &str,
    desc: &str,
) -> Vec<(i32, String)> {
    let named = named(tree);
    vars(tree, class, method, desc)
        .iter()
        .filter_map(|var| Some((var.lv_index(), var.dst_name(named)?.to_string())))
        .collect()
}

pub fn pairs(expected: &[(i32, &str)]) -> Vec<(i32, String)> {
    expected
        .iter()
        .map(|(lv, name)| (*lv, name.to_string()))
        .collect()
}
