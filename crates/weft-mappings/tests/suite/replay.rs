use weft_mappings::{
    MappedElementKind, MappingEvent, MappingSource, MappingVisitor, MemoryMappingTree,
    RecordingVisitor, TinyV2Writer,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn sample() -> MemoryMappingTree {
    let mut tree = MemoryMappingTree::new();
    tree.visit_namespaces("official", &strings(&["intermediary", "named"]))
        .unwrap();
    tree.visit_class("a").unwrap();
    tree.visit_dst_name(MappedElementKind::Class, 0, "net/minecraft/class_1297")
        .unwrap();
    tree.visit_dst_name(MappedElementKind::Class, 1, "net/minecraft/world/entity/Entity")
        .unwrap();
    tree.visit_comment(MappedElementKind::Class, "Base of all entities.")
        .unwrap();
    tree.visit_field("b", "I").unwrap();
    tree.visit_dst_name(MappedElementKind::Field, 0, "field_6011")
        .unwrap();
    tree.visit_method("c", "(La;D)V").unwrap();
    tree.visit_dst_name(MappedElementKind::Method, 1, "push").unwrap();
    tree.visit_method_arg(-1, 1, None).unwrap();
    tree.visit_dst_name(MappedElementKind::MethodArg, 1, "entity")
        .unwrap();
    tree.visit_method_var(-1, 4, 2, 9, None).unwrap();
    tree.visit_dst_name(MappedElementKind::MethodVar, 1, "speed")
        .unwrap();
    tree.visit_end().unwrap();
    tree
}

#[test]
fn replaying_into_a_fresh_tree_preserves_every_event() {
    let original = sample();
    let mut copy = MemoryMappingTree::new();
    original.accept(&mut copy).unwrap();

    let mut expected = RecordingVisitor::new();
    original.accept(&mut expected).unwrap();
    let mut actual = RecordingVisitor::new();
    copy.accept(&mut actual).unwrap();
    assert_eq!(actual, expected);

    let events = expected.into_events();
    assert_eq!(
        events.first(),
        Some(&MappingEvent::Namespaces {
            src: "official".to_string(),
            dst: strings(&["intermediary", "named"]),
        })
    );
    assert_eq!(events.last(), Some(&MappingEvent::End));
}

#[test]
fn replaying_a_partial_source_merges_columns() {
    let mut tree = sample();
    let mut extra = MemoryMappingTree::new();
    extra
        .visit_namespaces("official", &strings(&["named"]))
        .unwrap();
    extra.visit_class("a").unwrap();
    extra.visit_field("b", "I").unwrap();
    extra.visit_dst_name(MappedElementKind::Field, 0, "id").unwrap();
    extra.visit_end().unwrap();

    extra.accept(&mut tree).unwrap();

    let named = tree.namespace_id("named").unwrap();
    let intermediary = tree.namespace_id("intermediary").unwrap();
    let field = tree.class("a").unwrap().fields().next().unwrap();
    assert_eq!(field.dst_name(named), Some("id"));
    assert_eq!(field.dst_name(intermediary), Some("field_6011"));
    assert_eq!(tree.dst_namespaces(), strings(&["intermediary", "named"]).as_slice());
}

#[test]
fn tree_replays_into_tiny_v2() {
    let mut writer = TinyV2Writer::new(Vec::new());
    sample().accept(&mut writer).unwrap();
    let text = String::from_utf8(writer.finish().unwrap()).unwrap();

    assert_eq!(
        text,
        "tiny\t2\t0\tofficial\tintermediary\tnamed\n\
         c\ta\tnet/minecraft/class_1297\tnet/minecraft/world/entity/Entity\n\
         \tc\tBase of all entities.\n\
         \tf\tI\tb\tfield_6011\t\n\
         \tm\t(La;D)V\tc\t\tpush\n\
         \t\tp\t1\t\t\tentity\n\
         \t\tv\t4\t2\t\t\t\tspeed\n"
    );
}

#[test]
fn map_desc_uses_the_requested_column() {
    let tree = sample();
    let named = tree.namespace_id("named").unwrap();
    assert_eq!(
        tree.map_desc("(La;Lb;)La;", named).unwrap(),
        "(Lnet/minecraft/world/entity/Entity;Lb;)Lnet/minecraft/world/entity/Entity;"
    );
}
