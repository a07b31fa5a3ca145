use bytes::Bytes;
use quire_core::PdfError;
use quire_core::model::{Name, PdfString};
use quire_core::parser::{ContentLexer, ContentToken, Token};

fn collect_tokens(data: &[u8]) -> Vec<Token> {
    ContentLexer::new(data).map(|t| t.unwrap()).collect()
}

fn kinds(data: &[u8]) -> Vec<ContentToken> {
    collect_tokens(data).into_iter().map(|t| t.kind).collect()
}

fn name(text: &str) -> ContentToken {
    ContentToken::Name(Name::new(text).unwrap())
}

fn string(bytes: &[u8]) -> ContentToken {
    ContentToken::String(PdfString::from_bytes(bytes))
}

#[test]
fn test_content_lexer_basic_tokens() {
    assert_eq!(
        kinds(b"BT /F1 12 Tf (Hello) Tj ET"),
        vec![
            ContentToken::Operator("BT".into()),
            name("/F1"),
            ContentToken::Integer(12),
            ContentToken::Operator("Tf".into()),
            string(b"Hello"),
            ContentToken::Operator("Tj".into()),
            ContentToken::Operator("ET".into()),
        ]
    );
}

#[test]
fn test_content_lexer_offsets() {
    let data = b"  /F1 12 Tf";
    let tokens = collect_tokens(data);
    let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.offset, t.length)).collect();
    assert_eq!(spans, vec![(2, 3), (6, 2), (9, 2)]);
    for token in &tokens {
        assert!(token.offset + token.length <= data.len());
    }
}

#[test]
fn test_content_lexer_hex_string_whitespace() {
    assert_eq!(
        kinds(b"<48 65 6C 6C 6F> Tj"),
        vec![string(b"Hello"), ContentToken::Operator("Tj".into())]
    );
}

#[test]
fn test_content_lexer_hex_string_odd_digits() {
    assert_eq!(kinds(b"<4F3>"), vec![string(&[0x4f, 0x30])]);
}

#[test]
fn test_content_lexer_literal_string_escapes() {
    assert_eq!(
        kinds(br"(a\(b\)c \n\t\\ \101\7 nested (ok))"),
        vec![string(b"a(b)c \n\t\\ A\x07 nested (ok)")]
    );
    assert_eq!(kinds(b"(line\\\ncontinued)"), vec![string(b"linecontinued")]);
    assert_eq!(kinds(b"(cr\r\nlf)"), vec![string(b"cr\nlf")]);
}

#[test]
fn test_content_lexer_numbers() {
    let tokens = kinds(b"1 -2 +3 .5 -.25 4. 0.000");
    assert_eq!(tokens[0], ContentToken::Integer(1));
    assert_eq!(tokens[1], ContentToken::Integer(-2));
    assert_eq!(tokens[2], ContentToken::Integer(3));
    let reals: Vec<&str> = tokens[3..]
        .iter()
        .map(|t| match t {
            ContentToken::Real(r) => r.text(),
            other => panic!("expected real, got {other:?}"),
        })
        .collect();
    assert_eq!(reals, vec![".5", "-.25", "4.", "0.000"]);
}

#[test]
fn test_content_lexer_names_with_escapes() {
    assert_eq!(kinds(b"/A#20B /C#"), vec![name("/A B"), name("/C#")]);
}

#[test]
fn test_content_lexer_delimiters() {
    assert_eq!(
        kinds(b"[1]<</K 2>>"),
        vec![
            ContentToken::ArrayStart,
            ContentToken::Integer(1),
            ContentToken::ArrayEnd,
            ContentToken::DictStart,
            name("/K"),
            ContentToken::Integer(2),
            ContentToken::DictEnd,
        ]
    );
}

#[test]
fn test_content_lexer_comments_skipped() {
    assert_eq!(
        kinds(b"q % save state\nQ"),
        vec![
            ContentToken::Operator("q".into()),
            ContentToken::Operator("Q".into()),
        ]
    );
}

#[test]
fn test_content_lexer_inline_image() {
    let data = b"BI /W 2 /H 1 ID \x00\xffEI\x01 EI Q";
    assert_eq!(
        kinds(data),
        vec![
            ContentToken::BeginInlineImage,
            name("/W"),
            ContentToken::Integer(2),
            name("/H"),
            ContentToken::Integer(1),
            ContentToken::InlineImageData(Bytes::from_static(b"\x00\xffEI\x01")),
            ContentToken::EndInlineImage,
            ContentToken::Operator("Q".into()),
        ]
    );
}

#[test]
fn test_content_lexer_inline_image_data_span() {
    let data = b"BI ID \x01\x02\nEI";
    let tokens = collect_tokens(data);
    let image = &tokens[1];
    assert_eq!(
        image.kind,
        ContentToken::InlineImageData(Bytes::from_static(b"\x01\x02"))
    );
    assert_eq!(&data[image.offset..image.offset + 2], b"ID");
}

#[test]
fn test_content_lexer_errors() {
    let mut lexer = ContentLexer::new(b"(unterminated");
    assert!(matches!(
        lexer.next_token(),
        Some(Err(PdfError::MalformedContent { pos: 0, .. }))
    ));

    let mut lexer = ContentLexer::new(b"q ) Q");
    assert!(matches!(lexer.next_token(), Some(Ok(_))));
    assert!(matches!(
        lexer.next_token(),
        Some(Err(PdfError::MalformedContent { pos: 2, .. }))
    ));

    assert!(matches!(
        ContentLexer::new(b"<4G>").next_token(),
        Some(Err(PdfError::MalformedContent { .. }))
    ));
}

#[test]
fn test_content_lexer_empty() {
    assert!(kinds(b"").is_empty());
    assert!(kinds(b"  \n% only a comment").is_empty());
}
