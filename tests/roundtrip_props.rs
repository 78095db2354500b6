//! Property-based round-trip tests: decode(encode(v)) == v

use binson::{Decoder, Encoder, Value, ValueType};
use proptest::prelude::*;

/// Tree sederhana khusus untuk test
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Node::Bool),
        any::<i64>().prop_map(Node::Int),
        // NaN != NaN
        any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(Node::Double),
        ".{0,40}".prop_map(Node::Str),
        prop::collection::vec(any::<u8>(), 0..300).prop_map(Node::Bytes),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Node::Array),
            prop::collection::vec(("[a-z]{0,6}", inner), 0..8).prop_map(Node::Object),
        ]
    })
}

fn write_node(e: &mut Encoder<'_>, node: &Node) {
    match node {
        Node::Bool(v) => {
            e.bool(*v);
        }
        Node::Int(v) => {
            e.integer(*v);
        }
        Node::Double(v) => {
            e.double(*v);
        }
        Node::Str(v) => {
            e.string(v);
        }
        Node::Bytes(v) => {
            e.bytes(v);
        }
        Node::Array(items) => {
            e.begin_array();
            for item in items {
                write_node(e, item);
            }
            e.end_array();
        }
        Node::Object(fields) => {
            e.begin();
            for (name, value) in fields {
                e.name(name);
                write_node(e, value);
            }
            e.end();
        }
    }
}

/// Baca value terakhir dari decoder; masuk ke container jika perlu.
/// `in_array` menentukan ke mana decoder naik setelah container selesai.
fn read_node(d: &mut Decoder<'_>, in_array: bool) -> Node {
    match d.value() {
        Value::Boolean(v) => Node::Bool(v),
        Value::Integer(v) => Node::Int(v),
        Value::Double(v) => Node::Double(v),
        Value::String(v) => Node::Str(String::from_utf8(v.to_vec()).unwrap()),
        Value::Bytes(v) => Node::Bytes(v.to_vec()),
        Value::Array => {
            d.go_into_array().unwrap();
            let mut items = Vec::new();
            while d.next_array_value() {
                items.push(read_node(d, true));
            }
            go_up(d, in_array);
            Node::Array(items)
        }
        Value::Object => {
            d.go_into_object().unwrap();
            let fields = read_fields(d);
            go_up(d, in_array);
            Node::Object(fields)
        }
    }
}

fn go_up(d: &mut Decoder<'_>, in_array: bool) {
    if in_array {
        d.go_up_to_array().unwrap();
    } else {
        d.go_up_to_object().unwrap();
    }
}

fn read_fields(d: &mut Decoder<'_>) -> Vec<(String, Node)> {
    let mut fields = Vec::new();
    while d.next_field() {
        let name = d.name_str().unwrap().to_owned();
        fields.push((name, read_node(d, false)));
    }
    fields
}

fn encode_document(fields: &[(String, Node)], buf: &mut [u8]) -> usize {
    let mut e = Encoder::new(buf);
    write_node(&mut e, &Node::Object(fields.to_vec()));
    let len = e.finish().unwrap().len();
    len
}

proptest! {
    #[test]
    fn document_roundtrip(fields in prop::collection::vec(("[a-z]{0,6}", arb_node()), 0..8)) {
        let mut buf = vec![0u8; 1 << 20];
        let len = encode_document(&fields, &mut buf);

        let mut d = Decoder::new(&buf[..len]);
        let decoded = read_fields(&mut d);

        prop_assert!(d.error().is_none());
        prop_assert_eq!(d.offset(), len);
        prop_assert_eq!(decoded, fields);
    }

    #[test]
    fn integer_roundtrip(v in any::<i64>()) {
        let mut buf = [0u8; 16];
        let mut e = Encoder::new(&mut buf);
        e.begin().name("v").integer(v).end();
        let len = e.finish().unwrap().len();

        // tag + name + tag + payload + end
        let width = if (-128..128).contains(&v) {
            1
        } else if (-32768..32768).contains(&v) {
            2
        } else if (i32::MIN as i64..=i32::MAX as i64).contains(&v) {
            4
        } else {
            8
        };
        prop_assert_eq!(len, 1 + 3 + 1 + width + 1);

        let mut d = Decoder::new(&buf[..len]);
        prop_assert!(d.field("v"));
        prop_assert_eq!(d.value_type(), ValueType::Integer);
        prop_assert_eq!(d.integer(), Some(v));
    }

    #[test]
    fn field_scan_finds_last(fields in prop::collection::vec(("[a-y]{1,4}", arb_node()), 0..6), tail in any::<i64>()) {
        let mut all = fields;
        all.push(("z".to_owned(), Node::Int(tail)));

        let mut buf = vec![0u8; 1 << 20];
        let len = encode_document(&all, &mut buf);

        let mut d = Decoder::new(&buf[..len]);
        prop_assert!(d.field("z"));
        prop_assert_eq!(d.integer(), Some(tail));
        prop_assert!(!d.next_field());
        prop_assert!(d.error().is_none());
    }
}
