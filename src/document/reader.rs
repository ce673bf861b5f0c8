/*!
 * XML row reader.
 *
 * Drives a `RowAccumulator` from a `quick-xml` event stream and yields the
 * rows of a localization document lazily, in document order.
 */

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::app_config::DocumentConfig;
use crate::errors::DocumentError;

use super::accumulator::{DocumentEvent, RowAccumulator};
use super::row::{ChannelMap, RowRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Root,
    Row,
    Channel,
    Other,
}

#[derive(Debug)]
struct OpenElement {
    name: String,
    kind: ElementKind,
}

enum Step {
    Row(RowRecord),
    Continue,
    Finished,
}

/// Streaming reader turning a localization document into `RowRecord`s
///
/// Iterating yields `Ok(row)` per row element. The first error is yielded
/// once and ends the iteration, so no row after a parse failure is exposed.
pub struct RowReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    layout: DocumentConfig,
    accumulator: RowAccumulator,
    open_elements: Vec<OpenElement>,
    document_class: Option<String>,
    rows_read: usize,
    finished: bool,
}

impl<'a> RowReader<&'a [u8]> {
    /// Read rows from an in-memory document
    pub fn from_text(text: &'a str, layout: DocumentConfig, channels: ChannelMap) -> Self {
        Self::new(text.as_bytes(), layout, channels)
    }
}

impl RowReader<BufReader<File>> {
    /// Open a document file for reading
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        layout: DocumentConfig,
        channels: ChannelMap,
    ) -> Result<Self, DocumentError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), layout, channels))
    }
}

impl<R: BufRead> RowReader<R> {
    pub fn new(source: R, layout: DocumentConfig, channels: ChannelMap) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(false);
        reader.check_end_names(true);

        Self {
            reader,
            buf: Vec::new(),
            layout,
            accumulator: RowAccumulator::new(channels),
            open_elements: Vec::new(),
            document_class: None,
            rows_read: 0,
            finished: false,
        }
    }

    /// Value of the document-type attribute of the root element, once read
    pub fn document_class(&self) -> Option<&str> {
        self.document_class.as_deref()
    }

    /// Number of rows yielded so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Read until the next complete row or the end of the document
    ///
    /// Once an error or the end of the document was returned, every further
    /// call returns `Ok(None)`.
    pub fn next_row(&mut self) -> Result<Option<RowRecord>, DocumentError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let mut buf = std::mem::take(&mut self.buf);
            buf.clear();
            let step = self.step(&mut buf);
            self.buf = buf;

            match step {
                Ok(Step::Row(row)) => {
                    self.rows_read += 1;
                    trace!("Read row '{}'", row.id);
                    return Ok(Some(row));
                }
                Ok(Step::Continue) => {}
                Ok(Step::Finished) => {
                    self.finished = true;
                    return Ok(None);
                }
                Err(e) => {
                    self.finished = true;
                    return Err(e);
                }
            }
        }
    }

    fn step(&mut self, buf: &mut Vec<u8>) -> Result<Step, DocumentError> {
        let event = self
            .reader
            .read_event_into(buf)
            .map_err(|e| self.malformed(e))?;

        let finished_row = match event {
            Event::Start(start) => {
                self.open_element(&start)?;
                None
            }
            Event::Empty(start) => {
                self.open_element(&start)?;
                self.close_element()?
            }
            Event::End(_) => self.close_element()?,
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| self.malformed(e))?;
                self.accumulator.handle(DocumentEvent::Text(&text))?
            }
            Event::CData(cdata) => {
                let text = self
                    .reader
                    .decoder()
                    .decode(&cdata)
                    .map_err(|e| self.malformed(e))?;
                self.accumulator.handle(DocumentEvent::Text(&text))?
            }
            Event::Eof => {
                if let Some(open) = self.open_elements.last() {
                    return Err(DocumentError::UnexpectedEof(open.name.clone()));
                }
                debug!("Finished reading document: {} rows", self.rows_read);
                return Ok(Step::Finished);
            }
            // Declarations, comments, processing instructions and doctypes
            _ => None,
        };

        Ok(finished_row.map_or(Step::Continue, Step::Row))
    }

    fn classify(&self, name: &str) -> ElementKind {
        if name == self.layout.row_element {
            ElementKind::Row
        } else if name == self.layout.channel_element {
            ElementKind::Channel
        } else if name == self.layout.root_element && self.open_elements.is_empty() {
            ElementKind::Root
        } else {
            ElementKind::Other
        }
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<(), DocumentError> {
        let name = self
            .reader
            .decoder()
            .decode(start.name().as_ref())
            .map_err(|e| self.malformed(e))?
            .into_owned();
        let kind = self.classify(&name);

        match kind {
            ElementKind::Root => {
                self.document_class = self.attribute(start, &self.layout.class_attribute)?;
                debug!(
                    "Document class: {}",
                    self.document_class.as_deref().unwrap_or("<none>")
                );
            }
            ElementKind::Row => {
                let id = self.required_attribute(start, &name, &self.layout.row_id_attribute)?;
                self.accumulator.handle(DocumentEvent::RowStart { id: &id })?;
            }
            ElementKind::Channel => {
                let language =
                    self.required_attribute(start, &name, &self.layout.language_attribute)?;
                self.accumulator
                    .handle(DocumentEvent::ChannelStart { language: &language })?;
            }
            ElementKind::Other => {}
        }

        self.open_elements.push(OpenElement { name, kind });
        Ok(())
    }

    fn close_element(&mut self) -> Result<Option<RowRecord>, DocumentError> {
        let open = self
            .open_elements
            .pop()
            .ok_or_else(|| DocumentError::UnexpectedElement {
                element: "end tag".to_string(),
                reason: "closing tag without a matching opening tag".to_string(),
            })?;

        match open.kind {
            ElementKind::Row => self.accumulator.handle(DocumentEvent::RowEnd),
            ElementKind::Channel => self.accumulator.handle(DocumentEvent::ChannelEnd),
            ElementKind::Root | ElementKind::Other => Ok(None),
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &str) -> Result<Option<String>, DocumentError> {
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| self.malformed(e))?;
            if attribute.key.as_ref() == key.as_bytes() {
                let value = attribute
                    .decode_and_unescape_value(&self.reader)
                    .map_err(|e| self.malformed(e))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn required_attribute(
        &self,
        start: &BytesStart<'_>,
        element: &str,
        key: &str,
    ) -> Result<String, DocumentError> {
        self.attribute(start, key)?
            .ok_or_else(|| DocumentError::MissingAttribute {
                element: element.to_string(),
                attribute: key.to_string(),
            })
    }

    fn malformed(&self, error: impl std::fmt::Display) -> DocumentError {
        DocumentError::Malformed {
            position: self.reader.buffer_position(),
            message: error.to_string(),
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<RowRecord, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
