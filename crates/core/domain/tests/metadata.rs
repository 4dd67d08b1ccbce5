use domain::{ItemMetadata, MetadataDocument, MetadataField, Signal, Timespan};

#[test]
fn whole_item_span_skips_timed_spans() {
    let timed = Timespan {
        start: "100@PAL".to_string(),
        end: "200@PAL".to_string(),
        fields: vec![MetadataField::new("title", "timed")],
    };
    let doc = MetadataDocument::new(vec![
        timed,
        Timespan::whole_item(vec![MetadataField::new("title", "whole")]),
    ]);

    let span = doc.whole_item_span().expect("whole item span");
    assert_eq!(span.fields[0].first_value(), Some("whole"));
}

#[test]
fn item_metadata_lookup_by_name() {
    let metadata = ItemMetadata::new(vec![
        MetadataField::new("title", "Old title"),
        MetadataField {
            name: "empty".to_string(),
            values: Vec::new(),
        },
    ]);

    assert_eq!(
        metadata.field_by_name("title").and_then(|f| f.first_value()),
        Some("Old title")
    );
    assert_eq!(
        metadata.field_by_name("empty").and_then(|f| f.first_value()),
        None
    );
    assert!(metadata.field_by_name("missing").is_none());
}

#[test]
fn signal_types_are_stable() {
    let visited = Signal::item_visited("VX-1");
    assert_eq!(visited.signal_type(), "item.visited");
    assert_eq!(visited.item_id(), "VX-1");
    assert!(Signal::KNOWN_TYPES.contains(&Signal::PRE_MODIFY));
}
