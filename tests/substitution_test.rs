use archetyper::mapping::Mapping;
use archetyper::pattern::Pattern;
use archetyper::substitution::{SubstitutingReader, Substitution};
use proptest::prelude::*;
use std::fs;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/substitution").join(name)
}

fn read_in_chunks(mut reader: impl Read, chunk: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            return out;
        }
        out.extend_from_slice(&buf[..n]);
    }
}

#[test]
fn test_file_matches_expected_fixture() {
    let mappings = vec![
        Mapping::new("${a}", "AAA").unwrap(),
        Mapping::new("Hello", "Hallo").unwrap(),
        Mapping::new("world", "Welt").unwrap(),
    ];
    let txt = Pattern::new(r".*\.(txt)").unwrap();
    let source = fixture("original.txt");

    let mut reader =
        SubstitutingReader::open(&source, Path::new("original.txt"), &mappings, Some(&txt)).unwrap();
    let mut actual = String::new();
    reader.read_to_string(&mut actual).unwrap();

    assert_eq!(actual, fs::read_to_string(fixture("expected.txt")).unwrap());
}

#[test]
fn test_default_pattern_not_matching_is_passthrough() {
    let mappings = vec![Mapping::new("${a}", "AAA").unwrap()];
    let java = Pattern::new(r".*\.(java)").unwrap();
    let source = fixture("original.txt");

    let mut reader =
        SubstitutingReader::open(&source, Path::new("original.txt"), &mappings, Some(&java)).unwrap();
    let mut actual = String::new();
    reader.read_to_string(&mut actual).unwrap();

    assert_eq!(actual, fs::read_to_string(&source).unwrap());
}

#[test]
fn test_escaped_newline_in_search() {
    let mapping: Mapping = serde_json::from_str(
        r#"{"search": "*/\\npackage", "replace": "*/\\n// generated\\npackage"}"#,
    )
    .unwrap();
    let substitution = Substitution::new([(mapping.search(), mapping.replace())]);
    let text = "/* license */\npackage org.acme;\n";

    let out = read_in_chunks(substitution.reader(Cursor::new(text)), 3);

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "/* license */\n// generated\npackage org.acme;\n"
    );
}

proptest! {
    #[test]
    fn prop_streaming_equals_whole_string_replace(
        search in "[abc]{1,5}",
        replace in "[xyzé]{1,5}",
        text in "[abcd\n]{0,80}",
        capacity in 1usize..16,
        chunk in 1usize..9,
    ) {
        let substitution = Substitution::new([(search.as_str(), replace.as_str())]);
        let reader = substitution.reader(BufReader::with_capacity(capacity, Cursor::new(text.as_bytes())));

        let out = read_in_chunks(reader, chunk);

        prop_assert_eq!(String::from_utf8(out).unwrap(), text.replace(&search, &replace));
    }
}
