use tripod_api::handler::StatementCollector;
use tripod_api::model::{Literal, Term};
use tripod_api::parser::RdfParser;
use tripod_api::profile::ParserProfile;
use tripod_trix::{TriXError, TriXParser};

fn parse(input: &str) -> Result<StatementCollector, TriXError> {
    let mut collector = StatementCollector::new();
    TriXParser::new().load(&mut collector, input.as_bytes())?;
    Ok(collector)
}

fn parse_with_warnings(input: &str) -> (Result<StatementCollector, TriXError>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut sink = |message: String| warnings.push(message);
    let profile = ParserProfile::new().with_warning_sink(&mut sink);
    let mut collector = StatementCollector::new();
    let result = TriXParser::new()
        .load_with_profile(&mut collector, input.as_bytes(), profile)
        .map(|_| collector);
    (result, warnings)
}

#[test]
fn named_and_unnamed_graphs() {
    let collector = parse(
        r#"<?xml version="1.0"?>
<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <uri>http://example.com/g</uri>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <plainLiteral>hello</plainLiteral>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap();
    assert_eq!(2, collector.quads.len());
    assert_eq!(
        Some(Term::NamedNode {
            iri: "http://example.com/g".to_owned()
        }),
        collector.quads[0].graph_name
    );
    assert_eq!(None, collector.quads[1].graph_name);
    assert_eq!(Some(true), collector.outcome());
}

#[test]
fn blank_node_graph_name_matches_blank_node_terms() {
    let collector = parse(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <id>g</id>
  <triple>
   <id>g</id>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap();
    assert_eq!(
        Some(collector.quads[0].subject.clone()),
        collector.quads[0].graph_name
    );
}

#[test]
fn literals_with_language_and_datatype() {
    let collector = parse(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <plainLiteral xml:lang="en-GB">hello</plainLiteral>
  </triple>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <typedLiteral datatype="http://www.w3.org/2001/XMLSchema#integer"><![CDATA[42]]></typedLiteral>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap();
    assert_eq!(
        Term::from(Literal::LanguageTaggedString {
            value: "hello".to_owned(),
            language: "en-GB".to_owned()
        }),
        collector.quads[0].object
    );
    assert_eq!(
        Term::from(Literal::Typed {
            value: "42".to_owned(),
            datatype: "http://www.w3.org/2001/XMLSchema#integer".to_owned()
        }),
        collector.quads[1].object
    );
}

#[test]
fn unasserted_graph_is_skipped_with_one_warning() {
    let (result, warnings) = parse_with_warnings(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph asserted="false">
  <uri>http://example.com/g</uri>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
 <graph>
  <triple>
   <uri>http://example.com/s2</uri>
   <uri>http://example.com/p2</uri>
   <uri>http://example.com/o2</uri>
  </triple>
 </graph>
</TriX>"#,
    );
    let collector = result.unwrap();
    assert_eq!(1, collector.quads.len());
    assert_eq!(
        Term::NamedNode {
            iri: "http://example.com/s2".to_owned()
        },
        collector.quads[0].subject
    );
    assert_eq!(1, warnings.len());
    assert!(warnings[0].contains("not asserted"), "{}", warnings[0]);
}

#[test]
fn missing_namespace_is_rejected() {
    let error = parse(
        r#"<TriX>
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("namespace"), "{}", error);
}

#[test]
fn prefixed_namespace_declaration_does_not_count() {
    let error = parse(
        r#"<t:TriX xmlns:t="http://www.w3.org/2004/03/trix/trix-1/">
 <t:graph>
  <t:triple>
   <t:uri>http://example.com/s</t:uri>
   <t:uri>http://example.com/p</t:uri>
   <t:uri>http://example.com/o</t:uri>
  </t:triple>
 </t:graph>
</t:TriX>"#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("namespace"), "{}", error);
}

#[test]
fn wrong_default_namespace_is_rejected() {
    let error = parse(
        r#"<TriX xmlns="http://example.com/not-trix#">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("default namespace"), "{}", error);
}

#[test]
fn wrong_term_count_is_rejected() {
    let error = parse(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap_err();
    assert!(
        error.to_string().contains("exactly three terms"),
        "{}",
        error
    );
}

#[test]
fn literal_subject_is_rejected() {
    let error = parse(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <plainLiteral>nope</plainLiteral>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap_err();
    assert!(
        error.to_string().contains("object position"),
        "{}",
        error
    );
}

#[test]
fn blank_node_predicate_is_rejected() {
    let error = parse(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <id>p</id>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("predicate"), "{}", error);
}

#[test]
fn graph_name_after_triples_is_rejected() {
    let error = parse(
        r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
  <uri>http://example.com/g</uri>
 </graph>
</TriX>"#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("before"), "{}", error);
}

#[test]
fn failure_reports_end_rdf_false() {
    let mut collector = StatementCollector::new();
    let result = TriXParser::new().load(&mut collector, b"<TriX>".as_ref());
    assert!(result.is_err());
    assert_eq!(Some(false), collector.outcome());
}

#[test]
fn stylesheet_instruction_warns() {
    let (result, warnings) = parse_with_warnings(
        r#"<?xml version="1.0"?>
<?xml-stylesheet href="style.xsl" type="text/xsl"?>
<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/s</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#,
    );
    assert_eq!(1, result.unwrap().quads.len());
    assert_eq!(1, warnings.len());
    assert!(warnings[0].contains("xml-stylesheet"), "{}", warnings[0]);
}

#[test]
fn handler_stop_aborts_cleanly() {
    use tripod_api::handler::{Continuation, RdfHandler};
    use tripod_api::model::{Quad, Triple};

    struct FirstQuadOnly {
        seen: usize,
    }
    impl RdfHandler for FirstQuadOnly {
        type Node = Term;
        fn create_blank_node(&mut self) -> Term {
            Term::BlankNode { id: String::new() }
        }
        fn create_labeled_blank_node(&mut self, id: &str) -> Term {
            Term::BlankNode { id: id.to_owned() }
        }
        fn create_uri_node(&mut self, iri: &str) -> Term {
            Term::NamedNode {
                iri: iri.to_owned(),
            }
        }
        fn create_literal(&mut self, value: &str) -> Term {
            Term::from(Literal::Simple {
                value: value.to_owned(),
            })
        }
        fn create_language_literal(&mut self, value: &str, language: &str) -> Term {
            Term::from(Literal::LanguageTaggedString {
                value: value.to_owned(),
                language: language.to_owned(),
            })
        }
        fn create_typed_literal(&mut self, value: &str, datatype: &str) -> Term {
            Term::from(Literal::Typed {
                value: value.to_owned(),
                datatype: datatype.to_owned(),
            })
        }
        fn handle_triple(&mut self, _: Triple<Term>) -> Continuation {
            Continuation::Stop
        }
        fn handle_quad(&mut self, _: Quad<Term>) -> Continuation {
            self.seen += 1;
            Continuation::Stop
        }
    }

    let mut handler = FirstQuadOnly { seen: 0 };
    TriXParser::new()
        .load(
            &mut handler,
            r#"<TriX xmlns="http://www.w3.org/2004/03/trix/trix-1/">
 <graph>
  <triple>
   <uri>http://example.com/a</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
  <triple>
   <uri>http://example.com/b</uri>
   <uri>http://example.com/p</uri>
   <uri>http://example.com/o</uri>
  </triple>
 </graph>
</TriX>"#
                .as_bytes(),
        )
        .unwrap();
    assert_eq!(1, handler.seen);
}
