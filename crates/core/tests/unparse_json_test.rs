use insta::assert_snapshot;
use quire_core::{Document, Object, PdfError};

fn unparsed(obj: &Object) -> String {
    String::from_utf8(obj.unparse(false).unwrap()).unwrap()
}

#[test]
fn test_unparse_scalars() {
    assert_eq!(unparsed(&Object::null()), "null");
    assert_eq!(unparsed(&Object::boolean(false)), "false");
    assert_eq!(unparsed(&Object::integer(-42)), "-42");
    // Reals keep their source text.
    assert_eq!(unparsed(&Object::real("-.50").unwrap()), "-.50");
    assert_eq!(unparsed(&Object::name("/A B").unwrap()), "/A#20B");
    assert_eq!(unparsed(&Object::operator("Tj")), "Tj");
    assert_eq!(
        Object::inline_image(&b"\x00\x01"[..]).unparse(false).unwrap(),
        b"\x00\x01"
    );
}

#[test]
fn test_unparse_strings() {
    assert_eq!(unparsed(&Object::string(&b"(x)"[..])), r"(\(x\))");
    assert_eq!(unparsed(&Object::string(&b"\xff\xfe\x00"[..])), "<fffe00>");
    assert_eq!(
        String::from_utf8(Object::string(&b"abc"[..]).unparse_binary().unwrap()).unwrap(),
        "<616263>"
    );
}

#[test]
fn test_unparse_containers() {
    let obj = Object::parse(b"<< /Type /Page /Kids [ 1 (two) [ ] ] /Empty << >> >>").unwrap();
    assert_snapshot!(unparsed(&obj), @"<< /Empty << >> /Kids [ 1 (two) [ ] ] /Type /Page >>");
}

#[test]
fn test_unparse_round_trips_through_parse() {
    let source = b"[ /F1 12.0 (a\\)b) <00ff> true null << /K -3 >> ]";
    let obj = Object::parse(source).unwrap();
    let again = Object::parse(&obj.unparse(false).unwrap()).unwrap();
    assert_eq!(obj, again);
}

#[test]
fn test_unparse_indirect() {
    let doc = Document::new();
    let inner = doc.make_indirect(Object::integer(7)).unwrap();
    let outer = doc
        .make_indirect(Object::array(vec![inner.clone(), Object::integer(8)]))
        .unwrap();

    // Top level is written by value, nested objects by reference.
    assert_eq!(unparsed(&outer), "[ 1 0 R 8 ]");
    assert_eq!(
        String::from_utf8(outer.unparse(true).unwrap()).unwrap(),
        "[ 7 8 ]"
    );
}

#[test]
fn test_unparse_streams_as_references() {
    let doc = Document::new();
    let stream = doc.new_stream(&b"q Q"[..]).unwrap();
    let holder = Object::array(vec![stream.clone()]);
    assert_eq!(unparsed(&stream), "1 0 R");
    assert_eq!(
        String::from_utf8(holder.unparse(true).unwrap()).unwrap(),
        "[ 1 0 R ]"
    );
}

#[test]
fn test_unparse_resolved_cycle() {
    let doc = Document::new();
    let mut arr = doc.make_indirect(Object::array(vec![])).unwrap();
    arr.append(arr.clone()).unwrap();

    assert_eq!(unparsed(&arr), "[ 1 0 R ]");
    assert!(matches!(arr.unparse(true), Err(PdfError::InvalidValue(_))));
}

#[test]
fn test_unparse_uninitialized_fails() {
    assert!(Object::uninitialized().unparse(false).is_err());
    assert!(Object::array(vec![Object::uninitialized()]).unparse(false).is_err());
}

#[test]
fn test_json_scalars() {
    assert_eq!(Object::null().to_json(false).unwrap(), "null");
    assert_eq!(Object::boolean(true).to_json(false).unwrap(), "true");
    assert_eq!(Object::integer(3).to_json(false).unwrap(), "3");
    assert_eq!(Object::real(".5").unwrap().to_json(false).unwrap(), "0.5");
    assert_eq!(Object::real("1.50").unwrap().to_json(false).unwrap(), "1.50");
    assert_eq!(Object::name("/Type").unwrap().to_json(false).unwrap(), r#""/Type""#);
    assert_eq!(Object::operator("Tj").to_json(false).unwrap(), "null");
}

#[test]
fn test_json_strings_are_ascii() {
    assert_eq!(
        Object::text_string("caf\u{e9}").to_json(false).unwrap(),
        r#""caf\u00e9""#
    );
    assert_eq!(
        Object::string(&b"\xfe\xff\x4e\x2d"[..]).to_json(false).unwrap(),
        r#""\u4e2d""#
    );
}

#[test]
fn test_json_references() {
    let doc = Document::new();
    let font = doc
        .make_indirect(Object::dictionary_from([("/Type", Object::name("/Font").unwrap())]).unwrap())
        .unwrap();
    let page = doc
        .make_indirect(
            Object::dictionary_from([
                ("/Font", font.clone()),
                ("/Rotate", Object::integer(90)),
            ])
            .unwrap(),
        )
        .unwrap();

    assert_eq!(page.to_json(false).unwrap(), r#""2 0 R""#);
    assert_snapshot!(page.to_json(true).unwrap(), @r#"{"/Font":"1 0 R","/Rotate":90}"#);
}

#[test]
fn test_json_stream_dictionary() {
    let doc = Document::new();
    let mut stream = doc.new_stream(&b"abc"[..]).unwrap();
    stream
        .set_key("/Subtype", Object::name("/Form").unwrap())
        .unwrap();
    assert_snapshot!(stream.to_json(true).unwrap(), @r#"{"/Length":3,"/Subtype":"/Form"}"#);
}

#[test]
fn test_json_value_structure() {
    let obj = Object::parse(b"[ 1 /N (s) [ ] ]").unwrap();
    let value = obj.to_json_value(false).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
    assert_eq!(value[1], serde_json::json!("/N"));
    assert_eq!(value[3], serde_json::json!([]));
}
