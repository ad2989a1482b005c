use crate::error::{RdfXmlParseError, RdfXmlSyntaxError, TextPosition};
use crate::utils::*;
use oxilangtag::LanguageTag;
use oxiri::{Iri, IriParseError};
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term};
use quick_xml::escape::unescape_with;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::*;
use quick_xml::name::{LocalName, QName, ResolveResult};
use quick_xml::{Error, NsReader, Writer};
use std::collections::{HashMap, HashSet};
use std::io::{BufReader, Read};
use std::str;
#[cfg(feature = "async-tokio")]
use tokio::io::{AsyncRead, BufReader as AsyncBufReader};

/// A [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
///
/// It reads the file in streaming.
/// It does not keep data in memory except a stack for handling nested XML tags, and a set of all
/// seen `rdf:ID`s to detect duplicate ids and fail according to the specification (unless
/// [`with_allow_duplicate_rdf_ids`](Self::with_allow_duplicate_rdf_ids) is set).
///
/// Count the number of people:
/// ```
/// use oxrdf::vocab::rdf;
/// use oxrdf::NamedNodeRef;
/// use rdfxml::RdfXmlParser;
///
/// let file = br#"<?xml version="1.0"?>
/// <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
///  <rdf:Description rdf:about="http://example.com/foo">
///    <rdf:type rdf:resource="http://schema.org/Person" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
/// </rdf:RDF>"#;
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for quad in RdfXmlParser::new().parse_read(file.as_ref()) {
///     let quad = quad?;
///     if quad.predicate == rdf::TYPE && quad.object == schema_person.into() {
///         count += 1;
///     }
/// }
/// assert_eq!(2, count);
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default)]
#[must_use]
pub struct RdfXmlParser {
    unchecked: bool,
    base: Option<Iri<String>>,
    graph_name: GraphName,
    track_position: bool,
    allow_duplicate_rdf_ids: bool,
}

impl RdfXmlParser {
    /// Builds a new [`RdfXmlParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assumes the file is valid to make parsing faster.
    ///
    /// It will skip some validations (IRI syntax, NCName syntax, language tag syntax).
    ///
    /// Note that if the file is actually not valid, then broken RDF might be emitted by the parser.
    #[inline]
    pub fn unchecked(mut self) -> Self {
        self.unchecked = true;
        self
    }

    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.base = Some(Iri::parse(base_iri.into())?);
        Ok(self)
    }

    /// Sets the graph name used for every quad this parser emits.
    ///
    /// Defaults to [`GraphName::DefaultGraph`].
    #[inline]
    pub fn with_default_graph_name(mut self, graph_name: impl Into<GraphName>) -> Self {
        self.graph_name = graph_name.into();
        self
    }

    /// Makes every emitted [`RdfXmlSyntaxError`](crate::RdfXmlSyntaxError) carry the
    /// line/column/offset at which the offending construct began.
    #[inline]
    pub fn with_track_position(mut self, track_position: bool) -> Self {
        self.track_position = track_position;
        self
    }

    /// Disables the uniqueness check on `rdf:ID` values.
    #[inline]
    pub fn with_allow_duplicate_rdf_ids(mut self, allow: bool) -> Self {
        self.allow_duplicate_rdf_ids = allow;
        self
    }

    /// Parses a RDF/XML file from a [`Read`] implementation.
    ///
    /// Count the number of people:
    /// ```
    /// use oxrdf::vocab::rdf;
    /// use oxrdf::NamedNodeRef;
    /// use rdfxml::RdfXmlParser;
    ///
    /// let file = br#"<?xml version="1.0"?>
    /// <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
    ///  <rdf:Description rdf:about="http://example.com/foo">
    ///    <rdf:type rdf:resource="http://schema.org/Person" />
    ///    <schema:name>Foo</schema:name>
    ///  </rdf:Description>
    ///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
    /// </rdf:RDF>"#;
    ///
    /// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
    /// let mut count = 0;
    /// for quad in RdfXmlParser::new().parse_read(file.as_ref()) {
    ///     let quad = quad?;
    ///     if quad.predicate == rdf::TYPE && quad.object == schema_person.into() {
    ///         count += 1;
    ///     }
    /// }
    /// assert_eq!(2, count);
    /// # Result::<_,Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn parse_read<R: Read>(self, read: R) -> FromReadRdfXmlReader<R> {
        FromReadRdfXmlReader {
            results: Vec::new(),
            reader: self.parse(BufReader::new(read)),
            reader_buffer: Vec::default(),
        }
    }

    /// Parses a RDF/XML file from a [`AsyncRead`] implementation.
    #[cfg(feature = "async-tokio")]
    pub fn parse_tokio_async_read<R: AsyncRead + Unpin>(
        self,
        read: R,
    ) -> FromTokioAsyncReadRdfXmlReader<R> {
        FromTokioAsyncReadRdfXmlReader {
            results: Vec::new(),
            reader: self.parse(AsyncBufReader::new(read)),
            reader_buffer: Vec::default(),
        }
    }

    fn parse<T>(&self, reader: T) -> RdfXmlReader<T> {
        let mut reader = NsReader::from_reader(reader);
        reader.expand_empty_elements(true);
        RdfXmlReader {
            reader,
            state: vec![RdfXmlState::Doc {
                base_iri: self.base.clone(),
            }],
            custom_entities: HashMap::default(),
            in_literal_depth: 0,
            known_rdf_id: HashSet::default(),
            is_end: false,
            unchecked: self.unchecked,
            graph_name: self.graph_name.clone(),
            track_position: self.track_position,
            allow_duplicate_rdf_ids: self.allow_duplicate_rdf_ids,
            position: PositionTracker::default(),
        }
    }
}

/// Parses a RDF/XML file from a [`Read`] implementation. Can be built using [`RdfXmlParser::parse_read`].
#[must_use]
pub struct FromReadRdfXmlReader<R: Read> {
    results: Vec<Quad>,
    reader: RdfXmlReader<BufReader<R>>,
    reader_buffer: Vec<u8>,
}

impl<R: Read> Iterator for FromReadRdfXmlReader<R> {
    type Item = Result<Quad, RdfXmlParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(quad) = self.results.pop() {
                return Some(Ok(quad));
            } else if self.reader.is_end {
                return None;
            }
            if let Err(e) = self.parse_step() {
                return Some(Err(e));
            }
        }
    }
}

impl<R: Read> FromReadRdfXmlReader<R> {
    /// The current byte position in the input data.
    pub fn buffer_position(&self) -> usize {
        self.reader.reader.buffer_position()
    }

    fn parse_step(&mut self) -> Result<(), RdfXmlParseError> {
        self.reader_buffer.clear();
        let event = self
            .reader
            .reader
            .read_event_into(&mut self.reader_buffer)?;
        let start = self.reader.position.position();
        let result = self.reader.parse_event(event, &mut self.results);
        self.reader.position.advance(&self.reader_buffer);
        result.map_err(|e| self.reader.attach_position(e, start))
    }
}

/// Parses a RDF/XML file from a [`AsyncRead`] implementation. Can be built using [`RdfXmlParser::parse_tokio_async_read`].
#[cfg(feature = "async-tokio")]
#[must_use]
pub struct FromTokioAsyncReadRdfXmlReader<R: AsyncRead + Unpin> {
    results: Vec<Quad>,
    reader: RdfXmlReader<AsyncBufReader<R>>,
    reader_buffer: Vec<u8>,
}

#[cfg(feature = "async-tokio")]
impl<R: AsyncRead + Unpin> FromTokioAsyncReadRdfXmlReader<R> {
    /// Reads the next quad or returns `None` if the file is finished.
    pub async fn next(&mut self) -> Option<Result<Quad, RdfXmlParseError>> {
        loop {
            if let Some(quad) = self.results.pop() {
                return Some(Ok(quad));
            } else if self.reader.is_end {
                return None;
            }
            if let Err(e) = self.parse_step().await {
                return Some(Err(e));
            }
        }
    }

    /// The current byte position in the input data.
    pub fn buffer_position(&self) -> usize {
        self.reader.reader.buffer_position()
    }

    async fn parse_step(&mut self) -> Result<(), RdfXmlParseError> {
        self.reader_buffer.clear();
        let event = self
            .reader
            .reader
            .read_event_into_async(&mut self.reader_buffer)
            .await?;
        let start = self.reader.position.position();
        let result = self.reader.parse_event(event, &mut self.results);
        self.reader.position.advance(&self.reader_buffer);
        result.map_err(|e| self.reader.attach_position(e, start))
    }
}

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";

const RESERVED_RDF_ELEMENTS: [&str; 11] = [
    RDF_ABOUT,
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_BAG_ID,
    RDF_DATATYPE,
    RDF_ID,
    RDF_LI,
    RDF_NODE_ID,
    RDF_PARSE_TYPE,
    RDF_RDF,
    RDF_RESOURCE,
];
const RESERVED_RDF_ATTRIBUTES: [&str; 4] = [RDF_ABOUT_EACH, RDF_ABOUT_EACH_PREFIX, RDF_LI, RDF_RDF];

#[derive(Clone, Debug)]
enum NodeOrText {
    Node(Subject),
    Text(String),
}

enum RdfXmlState {
    Doc {
        base_iri: Option<Iri<String>>,
    },
    Rdf {
        base_iri: Option<Iri<String>>,
        language: Option<String>,
    },
    NodeElt {
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        li_counter: u64,
    },
    PropertyElt {
        // Resource, Literal or Empty property element
        iri: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        object: Option<NodeOrText>,
        id_attr: Option<NamedNode>,
        datatype_attr: Option<NamedNode>,
    },
    ParseTypeCollectionPropertyElt {
        iri: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        objects: Vec<Subject>,
        id_attr: Option<NamedNode>,
    },
    ParseTypeLiteralPropertyElt {
        iri: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        writer: Writer<Vec<u8>>,
        id_attr: Option<NamedNode>,
    },
}

impl RdfXmlState {
    fn base_iri(&self) -> Option<&Iri<String>> {
        match self {
            Self::Doc { base_iri, .. }
            | Self::Rdf { base_iri, .. }
            | Self::NodeElt { base_iri, .. }
            | Self::PropertyElt { base_iri, .. }
            | Self::ParseTypeCollectionPropertyElt { base_iri, .. }
            | Self::ParseTypeLiteralPropertyElt { base_iri, .. } => base_iri.as_ref(),
        }
    }

    fn language(&self) -> Option<&String> {
        match self {
            Self::Doc { .. } => None,
            Self::Rdf { language, .. }
            | Self::NodeElt { language, .. }
            | Self::PropertyElt { language, .. }
            | Self::ParseTypeCollectionPropertyElt { language, .. }
            | Self::ParseTypeLiteralPropertyElt { language, .. } => language.as_ref(),
        }
    }
}

struct RdfXmlReader<R> {
    reader: NsReader<R>,
    state: Vec<RdfXmlState>,
    custom_entities: HashMap<String, String>,
    in_literal_depth: usize,
    known_rdf_id: HashSet<String>,
    is_end: bool,
    unchecked: bool,
    graph_name: GraphName,
    track_position: bool,
    allow_duplicate_rdf_ids: bool,
    position: PositionTracker,
}

impl<R> RdfXmlReader<R> {
    fn attach_position(&self, error: RdfXmlParseError, start: TextPosition) -> RdfXmlParseError {
        if !self.track_position {
            return error;
        }
        match error {
            RdfXmlParseError::Syntax(e) => {
                RdfXmlParseError::Syntax(e.with_position(start..self.position.position()))
            }
            other => other,
        }
    }

    fn parse_event(
        &mut self,
        event: Event<'_>,
        results: &mut Vec<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        match event {
            Event::Start(event) => self.parse_start_event(&event, results),
            Event::End(event) => self.parse_end_event(&event, results),
            Event::Empty(_) => Err(RdfXmlSyntaxError::msg(
                "The expand_empty_elements option must be enabled",
            )
            .into()),
            Event::Text(event) => self.parse_text_event(&event),
            Event::CData(event) => self.parse_text_event(&event.escape()?),
            Event::Comment(_) | Event::PI(_) => Ok(()),
            Event::Decl(decl) => {
                if let Some(encoding) = decl.encoding() {
                    if !is_utf8(&encoding?) {
                        return Err(RdfXmlSyntaxError::msg(
                            "Only UTF-8 is supported by the RDF/XML parser",
                        )
                        .into());
                    }
                }
                Ok(())
            }
            Event::DocType(dt) => self.parse_doctype(&dt),
            Event::Eof => {
                self.is_end = true;
                Ok(())
            }
        }
    }

    fn parse_doctype(&mut self, dt: &BytesText<'_>) -> Result<(), RdfXmlParseError> {
        // we extract entities
        for input in self
            .reader
            .decoder()
            .decode(dt.as_ref())?
            .split('<')
            .skip(1)
        {
            if let Some(input) = input.strip_prefix("!ENTITY") {
                let input = input.trim_start().strip_prefix('%').unwrap_or(input);
                let (entity_name, input) = input.trim_start().split_once(|c: char| c.is_ascii_whitespace()).ok_or_else(|| {
                    RdfXmlSyntaxError::msg(
                        "<!ENTITY declarations should contain both an entity name and an entity value",
                    )
                })?;
                let input = input.trim_start().strip_prefix('\"').ok_or_else(|| {
                    RdfXmlSyntaxError::msg("<!ENTITY values should be enclosed in double quotes")
                })?;
                let (entity_value, input) = input.split_once('"').ok_or_else(|| {
                    RdfXmlSyntaxError::msg(
                        "<!ENTITY declarations values should be enclosed in double quotes",
                    )
                })?;
                input.trim_start().strip_prefix('>').ok_or_else(|| {
                    RdfXmlSyntaxError::msg("<!ENTITY declarations values should end with >")
                })?;

                // Resolves custom entities within the current entity definition.
                let entity_value = unescape_with(entity_value, |e| self.resolve_entity(e))
                    .map_err(quick_xml::Error::from)?;
                self.custom_entities
                    .insert(entity_name.to_owned(), entity_value.to_string());
            }
        }
        Ok(())
    }

    fn parse_start_event(
        &mut self,
        event: &BytesStart<'_>,
        results: &mut Vec<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        #[derive(PartialEq, Eq)]
        enum RdfXmlParseType {
            Default,
            Collection,
            Literal,
            Resource,
        }

        #[derive(PartialEq, Eq)]
        enum RdfXmlNextProduction {
            Rdf,
            NodeElt,
            PropertyElt { subject: Subject },
        }

        // Literal case
        if let Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) =
            self.state.last_mut()
        {
            let mut clean_event = BytesStart::new(
                self.reader
                    .decoder()
                    .decode(event.name().as_ref())?
                    .to_string(),
            );
            for attr in event.attributes() {
                clean_event.push_attribute(attr.map_err(Error::InvalidAttr)?);
            }
            writer.write_event(Event::Start(clean_event))?;
            self.in_literal_depth += 1;
            return Ok(());
        }

        let tag_name = self.resolve_tag_name(event.name())?;

        // We read attributes
        let (mut language, mut base_iri) = if let Some(current_state) = self.state.last() {
            (
                current_state.language().cloned(),
                current_state.base_iri().cloned(),
            )
        } else {
            (None, None)
        };

        let mut id_attr = None;
        let mut node_id_attr = None;
        let mut about_attr = None;
        let mut property_attrs = Vec::default();
        let mut resource_attr = None;
        let mut datatype_attr = None;
        let mut parse_type = RdfXmlParseType::Default;
        let mut type_attr = None;

        for attribute in event.attributes() {
            let attribute = attribute.map_err(Error::InvalidAttr)?;
            if attribute.key.as_ref().starts_with(b"xml") {
                if attribute.key.as_ref() == b"xml:lang" {
                    let tag = self.convert_attribute(&attribute)?;
                    language = if tag.is_empty() {
                        // An empty xml:lang clears any inherited language, per the
                        // xml:lang attribute's own semantics (XML 1.0 section 2.12).
                        None
                    } else {
                        let tag = tag.to_ascii_lowercase();
                        Some(if self.unchecked {
                            tag
                        } else {
                            LanguageTag::parse(tag.to_ascii_lowercase())
                                .map_err(|error| {
                                    RdfXmlSyntaxError::invalid_language_tag(tag, error)
                                })?
                                .into_inner()
                        })
                    };
                } else if attribute.key.as_ref() == b"xml:base" {
                    let iri = self.convert_attribute(&attribute)?;
                    base_iri = Some(
                        if self.unchecked {
                            Iri::parse_unchecked(iri.clone())
                        } else {
                            Iri::parse(iri.clone())
                        }
                        .map_err(|error| RdfXmlSyntaxError::invalid_iri(iri, error))?,
                    )
                } else {
                    // We ignore other xml attributes
                }
            } else {
                let attribute_url = self.resolve_attribute_name(attribute.key)?;
                if *attribute_url == *RDF_ID {
                    let mut id = self.convert_attribute(&attribute)?;
                    if !self.unchecked && !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name("rdf:ID", id).into());
                    }
                    id.insert(0, '#');
                    id_attr = Some(id);
                } else if *attribute_url == *RDF_BAG_ID {
                    // rdf:bagID was withdrawn from the RDF/XML specification: its mere
                    // presence is fatal, regardless of whether its value is a valid NCName.
                    return Err(RdfXmlSyntaxError::unsupported_feature("rdf:bagID").into());
                } else if *attribute_url == *RDF_NODE_ID {
                    let id = self.convert_attribute(&attribute)?;
                    if !self.unchecked && !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name("rdf:nodeID", id).into());
                    }
                    node_id_attr = Some(BlankNode::new_unchecked(id));
                } else if *attribute_url == *RDF_ABOUT {
                    about_attr = Some(attribute);
                } else if *attribute_url == *RDF_RESOURCE {
                    resource_attr = Some(attribute);
                } else if *attribute_url == *RDF_DATATYPE {
                    datatype_attr = Some(attribute);
                } else if *attribute_url == *RDF_PARSE_TYPE {
                    parse_type = match attribute.value.as_ref() {
                        b"Collection" => RdfXmlParseType::Collection,
                        b"Literal" => RdfXmlParseType::Literal,
                        b"Resource" => RdfXmlParseType::Resource,
                        other => {
                            // Any other value (including "Default" and unknown extensions)
                            // falls back to the default regime: children are processed as
                            // ordinary node/property elements rather than swallowed as XML.
                            tracing::debug!(
                                value = %String::from_utf8_lossy(other),
                                "unrecognized rdf:parseType value, treating as default"
                            );
                            RdfXmlParseType::Default
                        }
                    };
                } else if attribute_url == rdf::TYPE.as_str() {
                    type_attr = Some(attribute);
                } else if *attribute_url == *RDF_LI {
                    return Err(
                        RdfXmlSyntaxError::unsupported_feature("rdf:li as an attribute").into(),
                    );
                } else if *attribute_url == *RDF_ABOUT_EACH {
                    return Err(RdfXmlSyntaxError::unsupported_feature("rdf:aboutEach").into());
                } else if *attribute_url == *RDF_ABOUT_EACH_PREFIX {
                    return Err(
                        RdfXmlSyntaxError::unsupported_feature("rdf:aboutEachPrefix").into(),
                    );
                } else if RESERVED_RDF_ATTRIBUTES.contains(&&*attribute_url) {
                    return Err(RdfXmlSyntaxError::forbidden_name(attribute_url, "attribute").into());
                } else {
                    property_attrs.push((
                        self.parse_iri(attribute_url)?,
                        self.convert_attribute(&attribute)?,
                    ));
                }
            }
        }

        // Parsing with the base URI
        let id_attr = match id_attr {
            Some(iri) => {
                let iri = self.resolve_iri(&base_iri, iri)?;
                if !self.allow_duplicate_rdf_ids {
                    if self.known_rdf_id.contains(iri.as_str()) {
                        return Err(RdfXmlSyntaxError::duplicate_id(iri.as_str()).into());
                    }
                    self.known_rdf_id.insert(iri.as_str().into());
                }
                Some(iri)
            }
            None => None,
        };
        let about_attr = match about_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let resource_attr = match resource_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let datatype_attr = match datatype_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let type_attr = match type_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };

        let expected_production = match self.state.last() {
            Some(RdfXmlState::Doc { .. }) => RdfXmlNextProduction::Rdf,
            Some(
                RdfXmlState::Rdf { .. }
                | RdfXmlState::PropertyElt { .. }
                | RdfXmlState::ParseTypeCollectionPropertyElt { .. },
            ) => RdfXmlNextProduction::NodeElt,
            Some(RdfXmlState::NodeElt { subject, .. }) => RdfXmlNextProduction::PropertyElt {
                subject: subject.clone(),
            },
            Some(RdfXmlState::ParseTypeLiteralPropertyElt { .. }) => {
                return Err(
                    RdfXmlSyntaxError::msg("ParseTypeLiteralPropertyElt production children should never be considered as a RDF/XML content").into()
                );
            }
            None => {
                return Err(RdfXmlSyntaxError::msg(
                    "No state in the stack: the XML is not balanced",
                )
                .into());
            }
        };

        let new_state = match expected_production {
            RdfXmlNextProduction::Rdf => {
                if *tag_name == *RDF_RDF {
                    RdfXmlState::Rdf { base_iri, language }
                } else if RESERVED_RDF_ELEMENTS.contains(&&*tag_name) {
                    return Err(RdfXmlSyntaxError::forbidden_name(tag_name, "node element").into());
                } else {
                    self.build_node_elt(
                        self.parse_iri(tag_name)?,
                        base_iri,
                        language,
                        id_attr,
                        node_id_attr,
                        about_attr,
                        type_attr,
                        property_attrs,
                        results,
                    )?
                }
            }
            RdfXmlNextProduction::NodeElt => {
                if RESERVED_RDF_ELEMENTS.contains(&&*tag_name) {
                    return Err(RdfXmlSyntaxError::forbidden_name(tag_name, "node element").into());
                }
                self.build_node_elt(
                    self.parse_iri(tag_name)?,
                    base_iri,
                    language,
                    id_attr,
                    node_id_attr,
                    about_attr,
                    type_attr,
                    property_attrs,
                    results,
                )?
            }
            RdfXmlNextProduction::PropertyElt { subject } => {
                let iri = if *tag_name == *RDF_LI {
                    let Some(RdfXmlState::NodeElt { li_counter, .. }) = self.state.last_mut()
                    else {
                        return Err(
                            RdfXmlSyntaxError::forbidden_name(tag_name, "property element").into(),
                        );
                    };
                    *li_counter += 1;
                    NamedNode::new_unchecked(format!(
                        "http://www.w3.org/1999/02/22-rdf-syntax-ns#_{li_counter}"
                    ))
                } else if RESERVED_RDF_ELEMENTS.contains(&&*tag_name) || *tag_name == *RDF_DESCRIPTION
                {
                    return Err(
                        RdfXmlSyntaxError::forbidden_name(tag_name, "property element").into(),
                    );
                } else {
                    self.parse_iri(tag_name)?
                };

                // Validate mutually exclusive attribute combinations. The W3C `propertyElt`
                // empty-element production does allow `(resourceAttr | nodeIdAttr)?
                // propertyAttr*` together, so that combination is not a conflict.
                if parse_type != RdfXmlParseType::Default {
                    if datatype_attr.is_some() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType cannot be combined with rdf:datatype",
                        )
                        .into());
                    }
                    if resource_attr.is_some() || node_id_attr.is_some() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType cannot be combined with rdf:resource or rdf:nodeID",
                        )
                        .into());
                    }
                    if !property_attrs.is_empty() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType cannot be combined with property attributes",
                        )
                        .into());
                    }
                }
                if resource_attr.is_some() && node_id_attr.is_some() {
                    return Err(RdfXmlSyntaxError::conflicting_attributes(
                        "rdf:resource and rdf:nodeID cannot be set at the same time",
                    )
                    .into());
                }
                if datatype_attr.is_some() && (resource_attr.is_some() || node_id_attr.is_some()) {
                    return Err(RdfXmlSyntaxError::conflicting_attributes(
                        "rdf:datatype cannot be combined with rdf:resource or rdf:nodeID",
                    )
                    .into());
                }

                match parse_type {
                    RdfXmlParseType::Default => {
                        if resource_attr.is_some()
                            || node_id_attr.is_some()
                            || !property_attrs.is_empty()
                        {
                            let object = match (resource_attr, node_id_attr) {
                                (Some(resource_attr), None) => Subject::from(resource_attr),
                                (None, Some(node_id_attr)) => node_id_attr.into(),
                                (None, None) => BlankNode::default().into(),
                                (Some(_), Some(_)) => unreachable!("checked above"),
                            };
                            Self::emit_property_attrs(
                                &object,
                                property_attrs,
                                &language,
                                &self.graph_name,
                                results,
                            );
                            if let Some(type_attr) = type_attr {
                                results.push(Quad::new(
                                    object.clone(),
                                    rdf::TYPE,
                                    type_attr,
                                    self.graph_name.clone(),
                                ));
                            }
                            RdfXmlState::PropertyElt {
                                iri,
                                base_iri,
                                language,
                                subject,
                                object: Some(NodeOrText::Node(object)),
                                id_attr,
                                datatype_attr,
                            }
                        } else {
                            RdfXmlState::PropertyElt {
                                iri,
                                base_iri,
                                language,
                                subject,
                                object: None,
                                id_attr,
                                datatype_attr,
                            }
                        }
                    }
                    RdfXmlParseType::Literal => RdfXmlState::ParseTypeLiteralPropertyElt {
                        iri,
                        base_iri,
                        language,
                        subject,
                        writer: Writer::new(Vec::default()),
                        id_attr,
                    },
                    RdfXmlParseType::Resource => self.build_parse_type_resource_property_elt(
                        iri, base_iri, language, subject, id_attr, results,
                    ),
                    RdfXmlParseType::Collection => RdfXmlState::ParseTypeCollectionPropertyElt {
                        iri,
                        base_iri,
                        language,
                        subject,
                        objects: Vec::default(),
                        id_attr,
                    },
                }
            }
        };
        self.state.push(new_state);
        Ok(())
    }

    fn parse_end_event(
        &mut self,
        event: &BytesEnd<'_>,
        results: &mut Vec<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        // Literal case
        if self.in_literal_depth > 0 {
            if let Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) =
                self.state.last_mut()
            {
                writer.write_event(Event::End(BytesEnd::new(
                    self.reader.decoder().decode(event.name().as_ref())?,
                )))?;
                self.in_literal_depth -= 1;
                return Ok(());
            }
        }

        if let Some(current_state) = self.state.pop() {
            self.end_state(current_state, results)?;
        }
        Ok(())
    }

    fn parse_text_event(&mut self, event: &BytesText<'_>) -> Result<(), RdfXmlParseError> {
        let text = event.unescape_with(|e| self.resolve_entity(e))?.to_string();
        match self.state.last_mut() {
            Some(RdfXmlState::PropertyElt { object, .. }) => {
                if !event.iter().copied().all(is_whitespace) {
                    // Text content is concatenated across multiple text events (e.g. split
                    // around an entity reference) rather than overwritten, so a literal
                    // reassembles the whole character content of the element.
                    match object {
                        Some(NodeOrText::Text(existing)) => existing.push_str(&text),
                        _ => *object = Some(NodeOrText::Text(text)),
                    }
                }
                Ok(())
            }
            Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) => {
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                Ok(())
            }
            _ => {
                if event.iter().copied().all(is_whitespace) {
                    Ok(())
                } else {
                    Err(RdfXmlSyntaxError::msg(format!("Unexpected text event: '{text}'")).into())
                }
            }
        }
    }

    fn resolve_tag_name(&self, qname: QName<'_>) -> Result<String, RdfXmlParseError> {
        let (namespace, local_name) = self.reader.resolve_element(qname);
        self.resolve_ns_name(namespace, local_name)
    }

    fn resolve_attribute_name(&self, qname: QName<'_>) -> Result<String, RdfXmlParseError> {
        let (namespace, local_name) = self.reader.resolve_attribute(qname);
        self.resolve_ns_name(namespace, local_name)
    }

    fn resolve_ns_name(
        &self,
        namespace: ResolveResult<'_>,
        local_name: LocalName<'_>,
    ) -> Result<String, RdfXmlParseError> {
        match namespace {
            ResolveResult::Bound(ns) => {
                let mut value = Vec::with_capacity(ns.as_ref().len() + local_name.as_ref().len());
                value.extend_from_slice(ns.as_ref());
                value.extend_from_slice(local_name.as_ref());
                Ok(unescape_with(&self.reader.decoder().decode(&value)?, |e| {
                    self.resolve_entity(e)
                })
                .map_err(quick_xml::Error::from)?
                .to_string())
            }
            ResolveResult::Unbound => {
                Err(RdfXmlSyntaxError::unbound_prefix("(no default namespace)").into())
            }
            ResolveResult::Unknown(v) => Err(RdfXmlSyntaxError::unbound_prefix(
                self.reader.decoder().decode(&v)?.into_owned(),
            )
            .into()),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_node_elt(
        &self,
        iri: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        id_attr: Option<NamedNode>,
        node_id_attr: Option<BlankNode>,
        about_attr: Option<NamedNode>,
        type_attr: Option<NamedNode>,
        property_attrs: Vec<(NamedNode, String)>,
        results: &mut Vec<Quad>,
    ) -> Result<RdfXmlState, RdfXmlSyntaxError> {
        let subject = match (id_attr, node_id_attr, about_attr) {
            (Some(id_attr), None, None) => Subject::from(id_attr),
            (None, Some(node_id_attr), None) => node_id_attr.into(),
            (None, None, Some(about_attr)) => about_attr.into(),
            (None, None, None) => BlankNode::default().into(),
            (Some(_), Some(_), _) | (_, Some(_), Some(_)) | (Some(_), _, Some(_)) => {
                return Err(RdfXmlSyntaxError::conflicting_attributes(
                    "only one of rdf:ID, rdf:nodeID and rdf:about can be set on a node element",
                ))
            }
        };

        Self::emit_property_attrs(&subject, property_attrs, &language, &self.graph_name, results);

        if let Some(type_attr) = type_attr {
            results.push(Quad::new(
                subject.clone(),
                rdf::TYPE,
                type_attr,
                self.graph_name.clone(),
            ));
        }

        if iri != *RDF_DESCRIPTION {
            results.push(Quad::new(
                subject.clone(),
                rdf::TYPE,
                iri,
                self.graph_name.clone(),
            ));
        }
        Ok(RdfXmlState::NodeElt {
            base_iri,
            language,
            subject,
            li_counter: 0,
        })
    }

    fn build_parse_type_resource_property_elt(
        &self,
        iri: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        id_attr: Option<NamedNode>,
        results: &mut Vec<Quad>,
    ) -> RdfXmlState {
        let object = BlankNode::default();
        let quad = Quad::new(subject, iri, object.clone(), self.graph_name.clone());
        if let Some(id_attr) = id_attr {
            self.reify(&quad, id_attr, results);
        }
        results.push(quad);
        RdfXmlState::NodeElt {
            base_iri,
            language,
            subject: object.into(),
            li_counter: 0,
        }
    }

    fn end_state(
        &mut self,
        state: RdfXmlState,
        results: &mut Vec<Quad>,
    ) -> Result<(), RdfXmlSyntaxError> {
        match state {
            RdfXmlState::PropertyElt {
                iri,
                language,
                subject,
                id_attr,
                datatype_attr,
                object,
                ..
            } => {
                let object = match object {
                    Some(NodeOrText::Node(node)) => Term::from(node),
                    Some(NodeOrText::Text(text)) => {
                        Self::new_literal(text, language, datatype_attr).into()
                    }
                    None => Self::new_literal(String::new(), language, datatype_attr).into(),
                };
                let quad = Quad::new(subject, iri, object, self.graph_name.clone());
                if let Some(id_attr) = id_attr {
                    self.reify(&quad, id_attr, results);
                }
                results.push(quad);
            }
            RdfXmlState::ParseTypeCollectionPropertyElt {
                iri,
                subject,
                id_attr,
                objects,
                ..
            } => {
                let mut current_node = Subject::from(rdf::NIL);
                for object in objects.into_iter().rev() {
                    let subject = Subject::from(BlankNode::default());
                    results.push(Quad::new(
                        subject.clone(),
                        rdf::FIRST,
                        object,
                        self.graph_name.clone(),
                    ));
                    results.push(Quad::new(
                        subject.clone(),
                        rdf::REST,
                        current_node,
                        self.graph_name.clone(),
                    ));
                    current_node = subject;
                }
                let quad = Quad::new(subject, iri, current_node, self.graph_name.clone());
                if let Some(id_attr) = id_attr {
                    self.reify(&quad, id_attr, results);
                }
                results.push(quad);
            }
            RdfXmlState::ParseTypeLiteralPropertyElt {
                iri,
                subject,
                id_attr,
                writer,
                ..
            } => {
                let object = writer.into_inner();
                if object.is_empty() {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "No value found for rdf:XMLLiteral value of property {iri}"
                    )));
                }
                let quad = Quad::new(
                    subject,
                    iri,
                    Literal::new_typed_literal(
                        str::from_utf8(&object).map_err(|_| {
                            RdfXmlSyntaxError::msg(
                                "The XML literal is not in valid UTF-8".to_owned(),
                            )
                        })?,
                        rdf::XML_LITERAL,
                    ),
                    self.graph_name.clone(),
                );
                if let Some(id_attr) = id_attr {
                    self.reify(&quad, id_attr, results);
                }
                results.push(quad);
            }
            RdfXmlState::NodeElt { subject, .. } => match self.state.last_mut() {
                Some(RdfXmlState::PropertyElt { object, .. }) => {
                    *object = Some(NodeOrText::Node(subject))
                }
                Some(RdfXmlState::ParseTypeCollectionPropertyElt { objects, .. }) => {
                    objects.push(subject)
                }
                _ => (),
            },
            _ => (),
        }
        Ok(())
    }

    fn new_literal(
        value: String,
        language: Option<String>,
        datatype: Option<NamedNode>,
    ) -> Literal {
        if let Some(datatype) = datatype {
            Literal::new_typed_literal(value, datatype)
        } else if let Some(language) = language {
            Literal::new_language_tagged_literal_unchecked(value, language)
        } else {
            Literal::new_simple_literal(value)
        }
    }

    fn reify(&self, quad: &Quad, statement_id: NamedNode, results: &mut Vec<Quad>) {
        let graph_name = self.graph_name.clone();
        results.push(Quad::new(
            statement_id.clone(),
            rdf::TYPE,
            rdf::STATEMENT,
            graph_name.clone(),
        ));
        results.push(Quad::new(
            statement_id.clone(),
            rdf::SUBJECT,
            quad.subject.clone(),
            graph_name.clone(),
        ));
        results.push(Quad::new(
            statement_id.clone(),
            rdf::PREDICATE,
            quad.predicate.clone(),
            graph_name.clone(),
        ));
        results.push(Quad::new(statement_id, rdf::OBJECT, quad.object.clone(), graph_name));
    }

    fn emit_property_attrs(
        subject: &Subject,
        literal_attributes: Vec<(NamedNode, String)>,
        language: &Option<String>,
        graph_name: &GraphName,
        results: &mut Vec<Quad>,
    ) {
        for (literal_predicate, literal_value) in literal_attributes {
            results.push(Quad::new(
                subject.clone(),
                literal_predicate,
                if let Some(language) = language.clone() {
                    Literal::new_language_tagged_literal_unchecked(literal_value, language)
                } else {
                    Literal::new_simple_literal(literal_value)
                },
                graph_name.clone(),
            ));
        }
    }

    fn convert_attribute(&self, attribute: &Attribute<'_>) -> Result<String, RdfXmlParseError> {
        Ok(attribute
            .decode_and_unescape_value_with(&self.reader, |e| self.resolve_entity(e))?
            .into_owned())
    }

    fn convert_iri_attribute(
        &self,
        base_iri: &Option<Iri<String>>,
        attribute: &Attribute<'_>,
    ) -> Result<NamedNode, RdfXmlParseError> {
        Ok(self.resolve_iri(base_iri, self.convert_attribute(attribute)?)?)
    }

    fn resolve_iri(
        &self,
        base_iri: &Option<Iri<String>>,
        relative_iri: String,
    ) -> Result<NamedNode, RdfXmlSyntaxError> {
        if let Some(base_iri) = base_iri {
            Ok(NamedNode::new_unchecked(
                if self.unchecked {
                    base_iri.resolve_unchecked(&relative_iri)
                } else {
                    base_iri.resolve(&relative_iri)
                }
                .map_err(|error| RdfXmlSyntaxError::invalid_iri(relative_iri, error))?
                .into_inner(),
            ))
        } else {
            self.parse_iri(relative_iri)
        }
    }

    fn parse_iri(&self, relative_iri: String) -> Result<NamedNode, RdfXmlSyntaxError> {
        Ok(NamedNode::new_unchecked(if self.unchecked {
            relative_iri
        } else {
            Iri::parse(relative_iri.clone())
                .map_err(|error| RdfXmlSyntaxError::invalid_iri(relative_iri, error))?
                .into_inner()
        }))
    }

    fn resolve_entity(&self, e: &str) -> Option<&str> {
        self.custom_entities.get(e).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{GraphNameRef, NamedNodeRef};

    fn parse(xml: &str) -> Result<Vec<Quad>, RdfXmlParseError> {
        RdfXmlParser::new().parse_read(xml.as_bytes()).collect()
    }

    #[test]
    fn minimal_typed_node() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <ex:Thing rdf:about="http://e/a"/>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(
            quads,
            vec![Quad::new(
                NamedNodeRef::new("http://e/a").unwrap(),
                rdf::TYPE,
                NamedNodeRef::new("http://e/Thing").unwrap(),
                GraphNameRef::DefaultGraph,
            )]
        );
    }

    #[test]
    fn property_with_literal_and_language() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description rdf:about="http://e/a">
                    <ex:name xml:lang="en">Alice</ex:name>
                </rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(
            quads,
            vec![Quad::new(
                NamedNodeRef::new("http://e/a").unwrap(),
                NamedNodeRef::new("http://e/name").unwrap(),
                Literal::new_language_tagged_literal_unchecked("Alice", "en"),
                GraphNameRef::DefaultGraph,
            )]
        );
    }

    #[test]
    fn parse_type_collection() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description rdf:about="http://e/s">
                    <ex:items rdf:parseType="Collection">
                        <ex:item rdf:about="http://e/1"/>
                        <ex:item rdf:about="http://e/2"/>
                    </ex:items>
                </rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        // 2 rdf:type quads for the items + 1 items triple + 2 first/rest pairs (4 quads).
        assert_eq!(quads.len(), 7);
        assert!(quads.iter().any(|q| q.predicate == rdf::FIRST
            && q.object == NamedNodeRef::new("http://e/1").unwrap().into()));
        assert!(quads.iter().any(|q| q.object == rdf::NIL.into()));
    }

    #[test]
    fn parse_type_literal() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description rdf:about="http://e/s">
                    <ex:xml rdf:parseType="Literal"><b>hi</b></ex:xml>
                </rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(
            quads[0].object,
            Literal::new_typed_literal("<b>hi</b>", rdf::XML_LITERAL).into()
        );
    }

    #[test]
    fn rdf_id_reification() {
        let quads = RdfXmlParser::new()
            .with_base_iri("http://b/")
            .unwrap()
            .parse_read(
                r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                    <rdf:Description rdf:about="http://e/s">
                        <ex:p rdf:ID="r1">v</ex:p>
                    </rdf:Description>
                </rdf:RDF>"#
                    .as_bytes(),
            )
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(quads.len(), 5);
        let reified = NamedNodeRef::new("http://b/#r1").unwrap();
        assert!(quads
            .iter()
            .any(|q| q.subject == reified.into() && q.predicate == rdf::TYPE));
        assert!(quads
            .iter()
            .any(|q| q.subject == reified.into() && q.predicate == rdf::SUBJECT));
        assert!(quads
            .iter()
            .any(|q| q.subject == reified.into() && q.predicate == rdf::PREDICATE));
        assert!(quads
            .iter()
            .any(|q| q.subject == reified.into() && q.predicate == rdf::OBJECT));
    }

    #[test]
    fn rdf_li_rewriting() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
                <rdf:Bag rdf:about="http://e/b">
                    <rdf:li>x</rdf:li>
                    <rdf:li>y</rdf:li>
                </rdf:Bag>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert!(quads.iter().any(|q| q.predicate.as_str()
            == "http://www.w3.org/1999/02/22-rdf-syntax-ns#_1"
            && q.object == Literal::new_simple_literal("x").into()));
        assert!(quads.iter().any(|q| q.predicate.as_str()
            == "http://www.w3.org/1999/02/22-rdf-syntax-ns#_2"
            && q.object == Literal::new_simple_literal("y").into()));
    }

    #[test]
    fn duplicate_rdf_id_errors_unless_allowed() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
            <rdf:Description rdf:about="http://e/a"><ex:p rdf:ID="same">1</ex:p></rdf:Description>
            <rdf:Description rdf:about="http://e/b"><ex:p rdf:ID="same">2</ex:p></rdf:Description>
        </rdf:RDF>"#;
        assert!(parse(xml).is_err());
        let quads = RdfXmlParser::new()
            .with_allow_duplicate_rdf_ids(true)
            .parse_read(xml.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(!quads.is_empty());
    }

    #[test]
    fn bag_id_always_rejected() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
            <ex:Thing rdf:about="http://e/a" rdf:bagID="validNCName"/>
        </rdf:RDF>"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn parse_type_resource_nesting() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description rdf:about="http://e/a">
                    <ex:p rdf:parseType="Resource">
                        <ex:q rdf:resource="http://e/b"/>
                    </ex:p>
                </rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(quads.len(), 2);
        assert!(quads.iter().any(|q| q.predicate.as_str() == "http://e/p"));
        assert!(quads.iter().any(|q| q.predicate.as_str() == "http://e/q"
            && q.object == NamedNodeRef::new("http://e/b").unwrap().into()));
    }

    #[test]
    fn split_text_events_concatenate() {
        // The entity reference splits the character content of the property element into two
        // `Text` events; the resulting literal must be the full concatenation, not just the
        // last chunk.
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description rdf:about="http://e/a"><ex:p>foo&amp;bar</ex:p></rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].object, Literal::new_simple_literal("foo&bar").into());
    }

    #[test]
    fn unrecognized_parse_type_falls_back_to_default() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description rdf:about="http://e/a">
                    <ex:p rdf:parseType="Other">
                        <ex:q rdf:resource="http://e/b"/>
                    </ex:p>
                </rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        // Must be processed exactly like an absent parseType: a blank node object for ex:p,
        // plus the nested ex:q triple, not silently dropped.
        assert_eq!(quads.len(), 2);
        assert!(quads.iter().any(|q| q.predicate.as_str() == "http://e/q"
            && q.object == NamedNodeRef::new("http://e/b").unwrap().into()));
    }

    #[test]
    fn about_each_and_about_each_prefix_are_unsupported() {
        let xml_each = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
            <ex:Thing rdf:aboutEach="http://e/a"/>
        </rdf:RDF>"#;
        let xml_prefix = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
            <ex:Thing rdf:aboutEachPrefix="http://e/"/>
        </rdf:RDF>"#;
        assert!(matches!(
            parse(xml_each).unwrap_err(),
            RdfXmlParseError::Syntax(_)
        ));
        assert!(matches!(
            parse(xml_prefix).unwrap_err(),
            RdfXmlParseError::Syntax(_)
        ));
    }

    #[test]
    fn unprefixed_element_without_default_namespace_errors() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
            <Thing about="http://e/a"/>
        </rdf:RDF>"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn unchecked_skips_nc_name_validation() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
            <rdf:Description rdf:about="http://e/s">
                <ex:p rdf:ID="not a valid NCName">v</ex:p>
            </rdf:Description>
        </rdf:RDF>"#;
        assert!(parse(xml).is_err());
        let quads = RdfXmlParser::new()
            .unchecked()
            .parse_read(xml.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(!quads.is_empty());
    }

    #[test]
    fn empty_xml_lang_clears_language() {
        let quads = parse(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                <rdf:Description xml:lang="en" rdf:about="http://e/a">
                    <ex:name xml:lang="">Alice</ex:name>
                </rdf:Description>
            </rdf:RDF>"#,
        )
        .unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].object, Literal::new_simple_literal("Alice").into());
    }

    #[test]
    fn default_graph_name_override() {
        let g = NamedNode::new("http://e/g").unwrap();
        let quads = RdfXmlParser::new()
            .with_default_graph_name(g.clone())
            .parse_read(
                r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://e/">
                    <ex:Thing rdf:about="http://e/a"/>
                </rdf:RDF>"#
                    .as_bytes(),
            )
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(quads[0].graph_name, GraphName::from(g));
    }
}
