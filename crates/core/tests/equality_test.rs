use quire_core::{Dictionary, Document, Object, PdfError};

fn all_pairs() -> Vec<Object> {
    vec![
        Object::null(),
        Object::boolean(true),
        Object::boolean(false),
        Object::integer(1),
        Object::integer(0),
        Object::real("1.0").unwrap(),
        Object::real(".0").unwrap(),
        Object::name("/1").unwrap(),
        Object::text_string("abc"),
        Object::operator("Tj"),
        Object::array(vec![Object::integer(1)]),
        Object::dictionary(Dictionary::new()),
    ]
}

#[test]
fn test_equality_is_symmetric() {
    let objects = all_pairs();
    for a in &objects {
        for b in &objects {
            assert_eq!(
                a.try_eq(b).unwrap(),
                b.try_eq(a).unwrap(),
                "{a:?} vs {b:?}"
            );
        }
    }
}

#[test]
fn test_numeric_cross_type_equality() {
    let one = Object::integer(1);
    let real = Object::real("1.0").unwrap();
    let t = Object::boolean(true);

    assert_eq!(one, real);
    assert_eq!(real, t);
    assert_eq!(one, t);
    assert_ne!(one, Object::name("/1").unwrap());
    assert_eq!(Object::integer(0), Object::boolean(false));
    assert_ne!(Object::real("0.1").unwrap(), Object::real("0.10000001").unwrap());
}

#[test]
fn test_exact_decimal_comparison() {
    // 0.1 + 0.2 style drift cannot happen: values compare exactly.
    let a = Object::real("0.30000000000000000001").unwrap();
    let b = Object::real("0.3").unwrap();
    assert_ne!(a, b);
    assert_eq!(Object::real("12.500").unwrap(), Object::real("12.5").unwrap());
}

#[test]
fn test_string_encoding_insensitive() {
    let utf16 = Object::string(&b"\xfe\xff\x00a\x00b\x00c"[..]);
    let plain = Object::string("abc".as_bytes());
    assert_eq!(utf16, plain);
    assert_ne!(plain, Object::string("abd".as_bytes()));
}

#[test]
fn test_names_and_operators_compare_exactly() {
    assert_eq!(Object::name("/A").unwrap(), Object::name("/A").unwrap());
    assert_ne!(Object::name("/A").unwrap(), Object::name("/a").unwrap());
    assert_eq!(Object::operator("Tj"), Object::operator("Tj"));
    assert_ne!(Object::operator("Tj"), Object::name("/Tj").unwrap());
}

#[test]
fn test_uninitialized_is_never_equal() {
    assert_ne!(Object::uninitialized(), Object::uninitialized());
}

#[test]
fn test_dictionary_order_irrelevant() {
    let a = Object::dictionary_from([("/A", Object::integer(1)), ("/B", Object::integer(2))]).unwrap();
    let b = Object::dictionary_from([("/B", Object::integer(2)), ("/A", Object::integer(1))]).unwrap();
    assert_eq!(a, b);
    let c = Object::dictionary_from([("/A", Object::integer(1))]).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_same_document_compares_by_objgen() {
    let doc = Document::new();
    let a = doc.make_indirect(Object::integer(1)).unwrap();
    let b = doc.make_indirect(Object::integer(1)).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn test_indirect_and_direct_compare_structurally() {
    let doc = Document::new();
    let a = doc.make_indirect(Object::integer(1)).unwrap();
    assert_eq!(a, Object::integer(1));

    let other = Document::new();
    let b = other.make_indirect(Object::integer(1)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_cycles_terminate() {
    let doc = Document::new();
    let mut arr = doc.make_indirect(Object::array(vec![])).unwrap();
    let dict = doc
        .make_indirect(Object::dictionary_from([("/Back", arr.clone())]).unwrap())
        .unwrap();
    arr.append(dict.clone()).unwrap();

    let direct = arr.shallow_copy().unwrap();
    assert_eq!(direct, arr);
    assert!(arr.contains_item(&dict).unwrap());
}

#[test]
fn test_cross_document_cycles_terminate() {
    let build = || {
        let doc = Document::new();
        let mut arr = doc.make_indirect(Object::array(vec![])).unwrap();
        arr.append(arr.clone()).unwrap();
        (doc, arr)
    };
    let (_doc_a, a) = build();
    let (_doc_b, b) = build();
    assert!(a.try_eq(&b).unwrap());
}

#[test]
fn test_deep_nesting_fails_bounded() {
    let mut nested = Object::integer(0);
    for _ in 0..20 {
        nested = Object::array(vec![nested]);
    }
    let copy = nested.clone();
    assert!(nested.try_eq_with_depth(&copy, 100).unwrap());
    assert!(matches!(
        nested.try_eq_with_depth(&copy, 10),
        Err(PdfError::StructureTooDeep { limit: 10 })
    ));
}

fn nested_arrays(levels: usize) -> Object {
    let mut nested = Object::integer(0);
    for _ in 0..levels {
        nested = Object::array(vec![nested]);
    }
    nested
}

#[test]
fn test_very_deep_direct_nesting_is_safe() {
    let nested = nested_arrays(100_000);
    assert!(matches!(
        nested.try_eq(&nested),
        Err(PdfError::StructureTooDeep { .. })
    ));
    assert!(!nested.eq(&nested));
    assert!(matches!(
        nested.unparse(false),
        Err(PdfError::StructureTooDeep { .. })
    ));
    assert!(matches!(
        nested.to_json(false),
        Err(PdfError::StructureTooDeep { .. })
    ));

    let copy = nested.clone();
    let shallow = nested.shallow_copy().unwrap();
    assert_eq!(shallow.len().unwrap(), 1);
    drop(nested);
    drop(shallow);

    let doc = Document::new();
    let indirect = doc.make_indirect(copy).unwrap();
    assert!(indirect.is_array());
    drop(doc);
}

#[test]
fn test_deep_clone_keeps_structure() {
    let mut dict = Dictionary::new();
    dict.insert(
        quire_core::Name::new("/Kids").unwrap(),
        nested_arrays(3),
    );
    let original = Object::array(vec![Object::dictionary(dict), Object::integer(7)]);
    let copy = original.clone();
    assert!(copy.try_eq(&original).unwrap());
    assert_eq!(
        copy.unparse(false).unwrap(),
        b"[ << /Kids [ [ [ 0 ] ] ] >> 7 ]"
    );
}

#[test]
fn test_deeply_nested_parse_fails_bounded() {
    let mut data = vec![b'['; 100_000];
    data.extend(std::iter::repeat_n(b']', 100_000));
    assert!(matches!(
        Object::parse(&data),
        Err(PdfError::StructureTooDeep { .. })
    ));
}

#[test]
fn test_names_compare_by_bytes() {
    let utf8 = Object::parse(b"/#C3#A9").unwrap();
    let latin1 = Object::parse(b"/#E9").unwrap();
    assert!(!utf8.try_eq(&latin1).unwrap());
    assert_ne!(utf8.try_hash().unwrap(), latin1.try_hash().unwrap());
    assert!(latin1.eq_bytes(b"/\xe9"));
    assert_eq!(latin1.to_bytes().unwrap(), b"/\xe9");
    assert_eq!(latin1.unparse(false).unwrap(), b"/#e9");
    assert_eq!(
        Object::parse(&latin1.unparse(false).unwrap()).unwrap().as_name().unwrap(),
        latin1.as_name().unwrap()
    );
}

#[test]
fn test_hash_consistent_with_equality() {
    let objects = all_pairs();
    for a in &objects {
        for b in &objects {
            let (Ok(ha), Ok(hb)) = (a.try_hash(), b.try_hash()) else {
                continue;
            };
            if a == b {
                assert_eq!(ha, hb, "{a:?} vs {b:?}");
            }
        }
    }
    assert_eq!(
        Object::integer(1).try_hash().unwrap(),
        Object::real("1.000").unwrap().try_hash().unwrap()
    );
    assert_eq!(
        Object::string(&b"\xfe\xff\x00x"[..]).try_hash().unwrap(),
        Object::text_string("x").try_hash().unwrap()
    );
}

#[test]
fn test_aggregates_are_unhashable() {
    let doc = Document::new();
    let stream = doc.new_stream(&b""[..]).unwrap();
    for obj in [
        Object::array(vec![]),
        Object::dictionary(Dictionary::new()),
        stream,
        Object::inline_image(&b"\x00"[..]),
    ] {
        assert!(matches!(obj.try_hash(), Err(PdfError::Unhashable(_))));
    }
    let err = Object::array(vec![]).try_hash().unwrap_err();
    assert_eq!(err.to_string(), "can't hash array object");
}

#[test]
fn test_streams_equal_only_by_identity() {
    let doc = Document::new();
    let a = doc.new_stream(&b"x"[..]).unwrap();
    let b = doc.new_stream(&b"x"[..]).unwrap();
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}
