use crate::error::{DumpError, Result};
use crate::page::RawPage;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Streams `<page>` elements out of a MediaWiki XML export.
///
/// Only pages that are direct children of the root element are yielded.
/// Element names are matched on their local part, so the export schema
/// version (and its namespace) does not matter.
pub struct DumpReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    stack: Vec<Vec<u8>>,
    page: Option<PageBuilder>,
    saw_root: bool,
    finished: bool,
    pages_read: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Id,
    Text,
}

#[derive(Default)]
struct PageBuilder {
    page: RawPage,
    field: Option<Field>,
    value: String,
    revisions: usize,
}

/// Owned view of a reader event, so the read buffer can be reused before
/// the event is applied.
enum Step {
    Open(Vec<u8>),
    Close,
    Empty(Vec<u8>),
    Content(String),
    Eof,
    Skip,
}

impl DumpReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| DumpError::Open {
            path: path.display().to_string(),
            source,
        })?;
        info!("Reading dump {}", path.display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            stack: Vec::new(),
            page: None,
            saw_root: false,
            finished: false,
            pages_read: 0,
        }
    }

    /// Number of pages yielded so far.
    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    fn capturing(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.field.is_some())
    }

    fn read_step(&mut self) -> Result<Step> {
        let capturing = self.capturing();
        self.buf.clear();
        let event = self
            .reader
            .read_event_into(&mut self.buf)
            .map_err(|e| DumpError::Xml {
                position: self.reader.buffer_position() as u64,
                message: e.to_string(),
            })?;

        let step = match event {
            Event::Start(e) => Step::Open(e.local_name().as_ref().to_vec()),
            Event::End(_) => Step::Close,
            Event::Empty(e) => Step::Empty(e.local_name().as_ref().to_vec()),
            Event::Text(t) if capturing => match t.unescape() {
                Ok(text) => Step::Content(text.into_owned()),
                Err(e) => {
                    debug!("Keeping raw text after unescape failure: {}", e);
                    Step::Content(String::from_utf8_lossy(&t).into_owned())
                }
            },
            Event::CData(c) if capturing => Step::Content(String::from_utf8_lossy(&c).into_owned()),
            Event::Eof => Step::Eof,
            _ => Step::Skip,
        };
        Ok(step)
    }

    /// Field captured by an element opened at the current depth, if any.
    fn field_for(&self, name: &[u8]) -> Option<Field> {
        let page = self.page.as_ref()?;
        match (self.stack.len(), name) {
            (2, b"title") => Some(Field::Title),
            (2, b"id") => Some(Field::Id),
            (3, b"text") if self.stack[2] == b"revision" && page.revisions == 1 => Some(Field::Text),
            _ => None,
        }
    }

    fn open_element(&mut self, name: Vec<u8>) {
        match self.stack.len() {
            0 => {
                if !self.saw_root {
                    info!("Root element tag: {}", String::from_utf8_lossy(&name));
                }
                self.saw_root = true;
            }
            1 if name == b"page" => self.page = Some(PageBuilder::default()),
            2 if name == b"revision" => {
                if let Some(page) = self.page.as_mut() {
                    page.revisions += 1;
                }
            }
            _ => {}
        }

        let field = self.field_for(&name);
        if let Some(page) = self.page.as_mut()
            && field.is_some()
        {
            page.field = field;
            page.value.clear();
        }
        self.stack.push(name);
    }

    /// Returns the finished page when the closing tag ends a `<page>`.
    fn close_element(&mut self) -> Option<RawPage> {
        self.stack.pop();

        let page = self.page.as_mut()?;
        if let Some(field) = page.field.take() {
            let value = std::mem::take(&mut page.value);
            match field {
                Field::Title => page.page.title = value,
                Field::Id => page.page.id = Some(value),
                Field::Text if value.is_empty() => page.page.text = None,
                Field::Text => page.page.text = Some(value),
            }
            return None;
        }

        if self.stack.len() == 1 {
            return self.page.take().map(|builder| builder.page);
        }
        None
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<RawPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let step = match self.read_step() {
                Ok(step) => step,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };

            match step {
                Step::Open(name) => self.open_element(name),
                Step::Close => {
                    if let Some(page) = self.close_element() {
                        self.pages_read += 1;
                        debug!("Read page {}", page);
                        return Some(Ok(page));
                    }
                }
                Step::Empty(name) => {
                    // Self-closing elements carry no text; only an empty page matters.
                    if self.stack.len() == 1 && name == b"page" {
                        self.pages_read += 1;
                        return Some(Ok(RawPage::default()));
                    }
                }
                Step::Content(text) => {
                    if let Some(page) = self.page.as_mut() {
                        page.value.push_str(&text);
                    }
                }
                Step::Eof => {
                    self.finished = true;
                    if !self.saw_root {
                        return Some(Err(DumpError::MissingRoot));
                    }
                    if let Some(builder) = self.page.take() {
                        warn!("Dump ended inside page '{}'; dropping it", builder.page.title);
                    }
                    info!("Finished reading dump: {} pages", self.pages_read);
                    return None;
                }
                Step::Skip => {}
            }
        }
    }
}
