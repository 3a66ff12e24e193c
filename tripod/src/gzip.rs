//! Transparent gzip decompression for any parser.

use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader};
use tripod_api::handler::RdfHandler;
use tripod_api::parser::RdfParser;
use tripod_api::profile::ParserProfile;
use tripod_nt::{NQuadsParser, NTriplesParser};
use tripod_trix::TriXParser;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decorates another parser with gzip decompression.
///
/// The input is sniffed for the gzip magic bytes. Compressed input is routed
/// through a [`MultiGzDecoder`], anything else is handed to the inner parser
/// untouched, so the decorated parser also accepts plain files.
///
/// ```
/// use tripod::{GZipParser, NTriplesParser, NTriplesSyntax};
/// use tripod::handler::StatementCollector;
/// use tripod::parser::RdfParser;
///
/// let file = b"<http://example.com/s> <http://example.com/p> <http://example.com/o> .";
///
/// let parser = GZipParser::new(NTriplesParser::new(NTriplesSyntax::Rdf11));
/// let mut collector = StatementCollector::new();
/// parser.load(&mut collector, file.as_ref())?;
/// assert_eq!(1, collector.triples.len());
/// # Result::<_, tripod::NtError>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GZipParser<P> {
    inner: P,
}

impl<P: RdfParser> GZipParser<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: RdfParser> RdfParser for GZipParser<P> {
    type Error = P::Error;

    fn load_with_profile<H: RdfHandler, R: BufRead>(
        &self,
        handler: &mut H,
        mut input: R,
        profile: ParserProfile<'_>,
    ) -> Result<(), P::Error> {
        let compressed = match input.fill_buf() {
            Ok(buffer) => buffer.starts_with(&GZIP_MAGIC),
            Err(error) => {
                handler.start_rdf();
                handler.end_rdf(false);
                return Err(P::Error::from(error));
            }
        };
        if compressed {
            self.inner.load_with_profile(
                handler,
                BufReader::new(MultiGzDecoder::new(input)),
                profile,
            )
        } else {
            self.inner.load_with_profile(handler, input, profile)
        }
    }
}

/// A gzip-aware N-Triples parser.
pub type GZipNTriplesParser = GZipParser<NTriplesParser>;
/// A gzip-aware N-Quads parser.
pub type GZipNQuadsParser = GZipParser<NQuadsParser>;
/// A gzip-aware TriX parser.
pub type GZipTriXParser = GZipParser<TriXParser>;
