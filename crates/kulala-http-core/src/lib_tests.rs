use crate::*;

const SAMPLE_JSON: &str = r#"[
    {
        "type": "document",
        "named": true,
        "root": true,
        "children": {
            "multiple": true,
            "required": false,
            "types": [{"type": "section", "named": true}]
        }
    },
    {
        "type": "header",
        "named": true,
        "fields": {
            "name": {
                "multiple": false,
                "required": true,
                "types": [{"type": "header_entity", "named": true}]
            },
            "value": {
                "multiple": false,
                "required": false,
                "types": [{"type": "value", "named": true}]
            }
        }
    },
    {
        "type": "comment",
        "named": true,
        "extra": true
    },
    {
        "type": "header_entity",
        "named": true
    },
    {
        "type": "value",
        "named": true
    },
    {
        "type": "section",
        "named": true
    },
    {
        "type": ":",
        "named": false
    }
]"#;

fn node_id(name: &str, named: bool) -> Option<NodeTypeId> {
    let ids = [
        ("document", true),
        ("section", true),
        ("header", true),
        ("header_entity", true),
        ("value", true),
        ("comment", true),
        (":", false),
    ];
    ids.iter()
        .position(|&(n, is_named)| n == name && is_named == named)
        .map(|i| i as NodeTypeId)
}

fn field_id(name: &str) -> Option<NodeFieldId> {
    match name {
        "name" => NodeFieldId::new(1),
        "value" => NodeFieldId::new(2),
        _ => None,
    }
}

#[test]
fn parse_raw_nodes() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    assert_eq!(nodes.len(), 7);

    let header = nodes.iter().find(|n| n.type_name == "header").unwrap();
    assert!(header.named);
    assert_eq!(header.fields.len(), 2);
    assert!(header.fields["name"].required);
    assert!(!header.fields["value"].required);

    let colon = nodes.iter().find(|n| n.type_name == ":").unwrap();
    assert!(!colon.named);
    assert!(colon.fields.is_empty());
    assert!(colon.children.is_none());
}

#[test]
fn field_order_is_preserved() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    let header = nodes.iter().find(|n| n.type_name == "header").unwrap();
    let names: Vec<_> = header.fields.keys().map(String::as_str).collect();
    assert_eq!(names, ["name", "value"]);
}

#[test]
fn json_skips_default_flags() {
    let nodes = vec![RawNode {
        type_name: "value".into(),
        named: true,
        root: false,
        extra: false,
        fields: IndexMap::new(),
        children: None,
    }];
    let json = node_types_to_json(&nodes, false).unwrap();
    assert_eq!(json, r#"[{"type":"value","named":true}]"#);
}

#[test]
fn json_round_trips_through_parser() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    let json = node_types_to_json(&nodes, true).unwrap();
    assert_eq!(parse_node_types(&json).unwrap(), nodes);
}

#[test]
fn build_table() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    let types = NodeTypeTable::build(&nodes, node_id, field_id);

    assert_eq!(types.len(), 7);
    assert!(!types.is_empty());
    assert_eq!(types.root(), node_id("document", true));

    let comment = node_id("comment", true).unwrap();
    assert!(types.is_extra(comment));
    assert_eq!(types.extras(), &[comment]);

    let header = node_id("header", true).unwrap();
    let name = field_id("name").unwrap();
    let value = field_id("value").unwrap();
    assert!(types.has_field(header, name));
    assert_eq!(
        types.field_cardinality(header, value),
        Some(Cardinality {
            multiple: false,
            required: false
        })
    );

    let entity = node_id("header_entity", true).unwrap();
    assert!(types.is_valid_field_type(header, name, entity));
    assert!(!types.is_valid_field_type(header, value, entity));

    let entry = types.entry(header);
    assert_eq!(entry.name, "header");
    let order: Vec<_> = entry.fields.iter().map(|(id, _)| *id).collect();
    assert_eq!(order, [name, value]);
}

#[test]
fn children_lookup() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    let types = NodeTypeTable::build(&nodes, node_id, field_id);

    let document = node_id("document", true).unwrap();
    let section = node_id("section", true).unwrap();
    let card = types.children_cardinality(document).unwrap();
    assert!(card.multiple);
    assert!(!card.required);
    assert_eq!(types.valid_child_types(document), &[section]);

    let value = node_id("value", true).unwrap();
    assert!(types.children_cardinality(value).is_none());
    assert!(types.valid_child_types(value).is_empty());
}

#[test]
fn unresolved_entries_are_skipped() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    let types = NodeTypeTable::build(&nodes, |name, named| {
        if name == "comment" { None } else { node_id(name, named) }
    }, field_id);

    assert_eq!(types.len(), 6);
    assert!(types.extras().is_empty());
}

#[test]
fn ids_skip_holes() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    // Shift every id by one so that id 0 has no entry
    let types = NodeTypeTable::build(&nodes, |name, named| node_id(name, named).map(|id| id + 1), field_id);

    let ids: Vec<_> = types.ids().collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 6, 7]);
    assert!(types.get(0).is_none());
}

#[test]
#[should_panic(expected = "node type 42 has no entry")]
fn entry_for_unknown_id_panics() {
    let types = NodeTypeTable::default();
    assert!(types.is_empty());
    types.entry(42);
}

#[test]
fn palette_toggle() {
    assert!(Palette::new(true).is_colored());
    assert!(!Palette::new(false).is_colored());
    assert_eq!(Palette::default(), Palette::PLAIN);
}
