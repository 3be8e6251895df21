use xmltag::{Diagnostic, Document, Parser, ParserConfig};

const SRC: &str = include_str!("good.xml");
const CMP: &str = include_str!("good.xml.parsed");

#[test]
fn test_good() {
    let mut diagnostics: Vec<Diagnostic> = vec![];
    let document = Document::parse_with(SRC, &ParserConfig::default(), &mut diagnostics);
    if let Some(diagnostic) = diagnostics.first() {
        panic!("{diagnostic}");
    }

    let str = document.to_xml(None).unwrap();
    //    std::fs::write("tests/good.xml.parsed", &str).unwrap();
    if str != CMP {
        let mut src_lines = str.lines();
        for (i, line) in CMP.lines().enumerate() {
            match src_lines.next() {
                None => {
                    panic!(
                        "Diff at line {}: Not enough rows in parsed document!",
                        i + 1
                    );
                }

                Some(l) => {
                    if line == l {
                        continue;
                    } else {
                        eprintln!("Diff at line {}", i + 1);

                        eprintln!("Expected: {line}");
                        eprintln!("Got: {l}");
                        break;
                    }
                }
            }
        }

        panic!("Parsed document does not match expected output");
    }
}

#[test]
fn test_reparse() {
    let document = Document::parse_str(SRC);
    let reparsed = Document::parse_str(CMP);
    assert_eq!(document, reparsed);
    assert_eq!(reparsed.to_xml(None).unwrap(), CMP);
}

#[test]
fn test_free_count() {
    let mut diagnostics: Vec<Diagnostic> = vec![];
    let mut parser = Parser::new(SRC, ParserConfig::default(), &mut diagnostics);
    let document = parser.parse_document();
    let allocated = parser.allocated();

    // 3 declaration attributes, 17 tags, 7 tag attributes
    assert_eq!(allocated, 27);
    assert_eq!(document.node_count(), allocated);
    assert_eq!(document.free(), allocated);
}
