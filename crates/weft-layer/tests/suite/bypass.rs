use weft_layer::LayerConfig;
use weft_mappings::{MappingEvent, MappingSource, RecordingVisitor};

use super::support::fixture;

#[test]
fn ci_bypass_emits_only_the_official_mappings() {
    let fixture = fixture();

    let mut bypassed = RecordingVisitor::new();
    let stats = fixture
        .layer(LayerConfig {
            ci: true,
            ..LayerConfig::default()
        })
        .run(&mut bypassed)
        .unwrap();
    assert!(stats.bypassed);
    assert_eq!(stats.methods, 0);

    let mut official = RecordingVisitor::new();
    fixture.official.accept(&mut official).unwrap();
    assert_eq!(bypassed, official);

    let namespaces: Vec<&MappingEvent> = bypassed
        .events
        .iter()
        .filter(|event| matches!(event, MappingEvent::Namespaces { .. }))
        .collect();
    assert_eq!(
        namespaces,
        vec![&MappingEvent::Namespaces {
            src: "official".to_string(),
            dst: vec!["named".to_string()],
        }]
    );
}

#[test]
fn ci_flag_is_ignored_without_skip_ci() {
    let (_, stats) = fixture().merge(LayerConfig {
        ci: true,
        skip_ci: false,
        ..LayerConfig::default()
    });
    assert!(!stats.bypassed);
    assert_eq!(stats.classes, 4);
}
