use quire_core::codec::lzw::lzwdecode;
use quire_core::codec::{
    PredictorParams, ascii85decode, asciihexdecode, flatedecode, lzwdecode_with_earlychange,
    rldecode,
};
use quire_core::{Dictionary, Name, Object, PdfError};

// === ascii85 ===

#[test]
fn test_ascii85decode_wikipedia() {
    assert_eq!(
        ascii85decode(b"9jqo^BlbD-BleB1DJ+*+F(f,q").unwrap(),
        b"Man is distinguished"
    );
}

#[test]
fn test_ascii85decode_end_markers() {
    for input in [
        &b"E,9)oF*2M7/c~>"[..],
        b"E,9)oF*2M7/c",
        b"E,9)oF*2M7/c~",
        b"<~E,9)oF*2M7/c~",
        b"<~E,9)oF*2M7/c~\n>",
    ] {
        assert_eq!(ascii85decode(input).unwrap(), b"pleasure.");
    }
}

#[test]
fn test_ascii85decode_z_group() {
    assert_eq!(
        ascii85decode(b"zE,9)oF*2M7/c~>").unwrap(),
        b"\0\0\0\0pleasure."
    );
}

#[test]
fn test_ascii85decode_whitespace() {
    assert_eq!(
        ascii85decode(b"<~<^BVT:K:=9<E)\npd;BS_1:/aSV;ag~>").unwrap(),
        b"VARIOUS UTTER NONSENSE"
    );
}

#[test]
fn test_ascii85decode_errors() {
    assert!(matches!(
        ascii85decode(b"9jqo{"),
        Err(PdfError::DecodeFailure { .. })
    ));
    // A final group of one character encodes no bytes.
    assert!(ascii85decode(b"9jqo^B~>").is_err());
}

// === asciihex ===

#[test]
fn test_asciihexdecode() {
    assert_eq!(asciihexdecode(b"61 62 2e6364   65").unwrap(), b"ab.cde");
    assert_eq!(asciihexdecode(b"61 62 2e6364   657>").unwrap(), b"ab.cdep");
    assert_eq!(asciihexdecode(b"7>").unwrap(), b"p");
    assert_eq!(asciihexdecode(b"4A4b>ignored").unwrap(), b"JK");
}

#[test]
fn test_asciihexdecode_invalid() {
    assert!(matches!(
        asciihexdecode(b"6G"),
        Err(PdfError::DecodeFailure { .. })
    ));
}

// === lzw ===

#[test]
fn test_lzwdecode() {
    let input = hex::decode("800b6050220c0c8501").unwrap();
    assert_eq!(lzwdecode(&input).unwrap(), b"-----A---B");
    assert_eq!(
        lzwdecode_with_earlychange(&input, 0).unwrap(),
        b"-----A---B"
    );
}

// === runlength ===

#[test]
fn test_rldecode() {
    let input = [4, b'h', b'e', b'l', b'l', b'o', 0xfe, b'!', 128, b'x'];
    assert_eq!(rldecode(&input).unwrap(), b"hello!!!");
    assert_eq!(rldecode(&[]).unwrap(), b"");
}

#[test]
fn test_rldecode_truncated() {
    assert!(rldecode(&[5, b'a']).is_err());
    assert!(rldecode(&[0xfe]).is_err());
}

// === flate ===

#[test]
fn test_flatedecode() {
    // zlib stream for "hello"
    let input = hex::decode("789ccb48cdc9c90700062c0215").unwrap();
    assert_eq!(flatedecode(&input).unwrap(), b"hello");
    assert!(flatedecode(b"not zlib").is_err());
}

// === predictors ===

fn parms(entries: &[(&str, i64)]) -> Dictionary {
    entries
        .iter()
        .map(|(k, v)| (Name::new(k).unwrap(), Object::integer(*v)))
        .collect()
}

#[test]
fn test_predictor_defaults() {
    assert_eq!(PredictorParams::from_dict(None).unwrap(), PredictorParams::default());
    let data = vec![1, 2, 3];
    assert_eq!(PredictorParams::default().apply(data.clone()).unwrap(), data);
}

#[test]
fn test_predictor_rejects_bad_parms() {
    assert!(PredictorParams::from_dict(Some(&parms(&[("/Columns", 0)]))).is_err());
    assert!(PredictorParams::from_dict(Some(&parms(&[("/BitsPerComponent", 3)]))).is_err());
    let unknown = PredictorParams::from_dict(Some(&parms(&[("/Predictor", 5)]))).unwrap();
    assert!(unknown.apply(vec![0]).is_err());
}

#[test]
fn test_png_average_and_paeth() {
    let params = PredictorParams::from_dict(Some(&parms(&[
        ("/Predictor", 15),
        ("/Columns", 2),
    ])))
    .unwrap();
    assert_eq!(
        params.apply(vec![0, 10, 20, 3, 1, 1]).unwrap(),
        vec![10, 20, 6, 14]
    );
    assert_eq!(
        params.apply(vec![0, 10, 20, 4, 1, 1]).unwrap(),
        vec![10, 20, 11, 21]
    );
}

#[test]
fn test_png_partial_row_dropped() {
    let params = PredictorParams::from_dict(Some(&parms(&[
        ("/Predictor", 10),
        ("/Columns", 2),
    ])))
    .unwrap();
    assert_eq!(params.apply(vec![0, 1, 2, 0, 3]).unwrap(), vec![1, 2]);
}

#[test]
fn test_tiff_predictor_multi_color() {
    let params = PredictorParams::from_dict(Some(&parms(&[
        ("/Predictor", 2),
        ("/Colors", 3),
        ("/Columns", 2),
    ])))
    .unwrap();
    assert_eq!(
        params.apply(vec![10, 20, 30, 1, 2, 3]).unwrap(),
        vec![10, 20, 30, 11, 22, 33]
    );
}
