use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tripod::detect::{guess_format, parse_string, parse_string_as, RdfFormat, StringParseError};
use tripod::handler::StatementCollector;
use tripod::parser::RdfParser;
use tripod::{GZipNTriplesParser, GZipParser, NTriplesParser, TriXParser};

const NTRIPLES_DATA: &str =
    "<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n\
     <http://example.com/s> <http://example.com/p> \"hello\"@en .\n";

fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn gzip_input_is_decompressed() {
    let compressed = gzip(NTRIPLES_DATA);
    let mut collector = StatementCollector::new();
    GZipNTriplesParser::new(NTriplesParser::default())
        .load(&mut collector, compressed.as_slice())
        .unwrap();
    assert_eq!(2, collector.triples.len());
}

#[test]
fn plain_input_passes_through() {
    let mut collector = StatementCollector::new();
    GZipNTriplesParser::new(NTriplesParser::default())
        .load(&mut collector, NTRIPLES_DATA.as_bytes())
        .unwrap();
    assert_eq!(2, collector.triples.len());
}

#[test]
fn gzip_trix_is_decompressed() {
    let compressed = gzip(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    );
    let mut collector = StatementCollector::new();
    GZipParser::new(TriXParser::new())
        .load(&mut collector, compressed.as_slice())
        .unwrap();
    assert_eq!(1, collector.quads.len());
}

#[test]
fn format_guesses() {
    assert_eq!(RdfFormat::NTriples, guess_format(NTRIPLES_DATA));
    assert_eq!(
        RdfFormat::NQuads,
        guess_format(
            "<http://example.com/s> <http://example.com/p> <http://example.com/o> <http://example.com/g> ."
        )
    );
    assert_eq!(
        RdfFormat::Turtle,
        guess_format("@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .")
    );
    assert_eq!(
        RdfFormat::Notation3,
        guess_format("@prefix ex: <http://example.com/> .\n@forAll :x .")
    );
    assert_eq!(
        RdfFormat::TriX,
        guess_format("<?xml version=\"1.0\"?>\n<TriX xmlns=\"http://www.w3.org/2004/03/trix/trix-1/\"/>")
    );
    assert_eq!(
        RdfFormat::RdfXml,
        guess_format("<?xml version=\"1.0\"?>\n<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>")
    );
}

#[test]
fn parse_string_routes_to_the_right_parser() {
    let mut collector = StatementCollector::new();
    assert_eq!(
        RdfFormat::NTriples,
        parse_string(&mut collector, NTRIPLES_DATA).unwrap()
    );
    assert_eq!(2, collector.triples.len());

    let mut collector = StatementCollector::new();
    assert_eq!(
        RdfFormat::NQuads,
        parse_string(
            &mut collector,
            "<http://example.com/s> <http://example.com/p> <http://example.com/o> <http://example.com/g> ."
        )
        .unwrap()
    );
    assert_eq!(1, collector.quads.len());
}

#[test]
fn explicit_format_bypasses_detection() {
    // this would be guessed as N-Triples, force the N-Quads parser instead
    let data = "<http://example.com/s> <http://example.com/p> <http://example.com/o> .";
    let mut collector = StatementCollector::new();
    assert_eq!(
        RdfFormat::NQuads,
        parse_string_as(&mut collector, data, RdfFormat::NQuads).unwrap()
    );
    assert_eq!(1, collector.quads.len());
    assert!(collector.triples.is_empty());
    assert_eq!("application/n-quads", RdfFormat::NQuads.media_type());
}

#[test]
fn unsupported_formats_are_reported() {
    let mut collector = StatementCollector::new();
    match parse_string(&mut collector, "@prefix ex: <http://example.com/> .") {
        Err(StringParseError::UnsupportedFormat(RdfFormat::Turtle)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}
