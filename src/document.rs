//! In-memory PDF document.
//!
//! Stat sheet PDFs come out of many different exporters, and a fair share of
//! them carry broken cross-reference tables. Rather than trusting `startxref`,
//! [`PdfDocument`] scans the whole file for `N G obj` headers, parses every
//! object it finds and expands object streams. A later definition of the same
//! object number replaces an earlier one, which is how incremental updates
//! are meant to be read.

use crate::error::{Error, Result};
use crate::object::{Dict, Object, ObjectRef};
use crate::objstm::parse_object_stream;
use crate::parser::parse_object;
use std::collections::{HashMap, HashSet};
use std::path::Path;

lazy_static::lazy_static! {
    static ref RE_OBJ_HEADER: regex::bytes::Regex =
        regex::bytes::Regex::new(r"(?-u)\b(\d{1,10})\s+(\d{1,5})\s+obj\b").unwrap();
    static ref RE_TRAILER: regex::bytes::Regex =
        regex::bytes::Regex::new(r"(?-u)trailer\s*<<").unwrap();
}

/// How far into the file the `%PDF-` marker may appear.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Maximum length of a reference chain followed by [`PdfDocument::resolve`].
const MAX_REFERENCE_CHAIN: usize = 16;

/// Maximum page tree depth.
const MAX_PAGE_TREE_DEPTH: u32 = 64;

/// A page leaf with its effective resources.
#[derive(Debug, Clone)]
pub struct Page {
    /// Object number of the page, when it is an indirect object
    pub id: Option<ObjectRef>,
    /// Page dictionary
    pub dict: Dict,
    /// `/Resources`, inherited from the nearest ancestor when absent
    pub resources: Dict,
}

/// A parsed PDF document held entirely in memory.
#[derive(Debug)]
pub struct PdfDocument {
    version: (u8, u8),
    objects: HashMap<u32, Object>,
    trailer: Dict,
}

impl PdfDocument {
    /// Open a PDF file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a PDF from bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHeader`] when no `%PDF-` marker appears near the start
    /// - [`Error::InvalidPdf`] when no objects can be found
    /// - [`Error::Encrypted`] when the trailer names an `/Encrypt` dictionary
    ///
    /// # Examples
    ///
    /// ```
    /// use statsheet::document::PdfDocument;
    ///
    /// let pdf = b"%PDF-1.4\n1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
    ///             2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n\
    ///             3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
    ///             trailer << /Root 1 0 R >>\n%%EOF";
    /// let doc = PdfDocument::from_bytes(pdf).unwrap();
    /// assert_eq!(doc.version(), (1, 4));
    /// assert_eq!(doc.pages().len(), 1);
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let version = parse_header(data)?;
        let mut objects = scan_objects(data);
        if objects.is_empty() {
            return Err(Error::InvalidPdf("no objects found".to_string()));
        }
        expand_object_streams(&mut objects);

        let trailer = find_trailer(data, &objects);
        let doc = Self {
            version,
            objects,
            trailer,
        };
        if doc.trailer.contains_key("Encrypt") {
            return Err(Error::Encrypted);
        }

        log::debug!("PDF {}.{} with {} objects", version.0, version.1, doc.objects.len());
        Ok(doc)
    }

    /// PDF version from the header.
    pub fn version(&self) -> (u8, u8) {
        self.version
    }

    /// The trailer dictionary (or the dictionary of the last XRef stream).
    pub fn trailer(&self) -> &Dict {
        &self.trailer
    }

    /// Number of objects found.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up an indirect object. The generation number is not checked,
    /// since only the latest definition of each object number is kept.
    pub fn get(&self, obj_ref: ObjectRef) -> Option<&Object> {
        self.objects.get(&obj_ref.id)
    }

    /// Follow references until a direct object is reached.
    ///
    /// Returns `None` for dangling references and for chains longer than a
    /// small limit.
    pub fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_CHAIN {
            match current {
                Object::Reference(r) => current = self.get(*r)?,
                other => return Some(other),
            }
        }
        log::warn!("reference chain longer than {} links", MAX_REFERENCE_CHAIN);
        None
    }

    /// Resolve `obj` and view it as a dictionary (streams included).
    pub fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dict> {
        self.resolve(obj).and_then(Object::as_dict)
    }

    /// The document catalog.
    ///
    /// Looked up through the trailer `/Root`, falling back to the first
    /// `/Type /Catalog` object in object-number order.
    pub fn catalog(&self) -> Option<&Dict> {
        if let Some(root) = self.trailer.get("Root").and_then(|r| self.resolve_dict(r)) {
            return Some(root);
        }
        let mut ids: Vec<&u32> = self.objects.keys().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.objects.get(id))
            .find(|o| o.dict_type() == Some("Catalog"))
            .and_then(Object::as_dict)
    }

    /// All page leaves in document order.
    ///
    /// The page tree is walked from the catalog. When there is no usable
    /// tree, every `/Type /Page` object is returned in object-number order.
    pub fn pages(&self) -> Vec<Page> {
        let mut pages = Vec::new();
        if let Some(root) = self.catalog().and_then(|c| c.get("Pages")) {
            let mut visited = HashSet::new();
            if let Err(e) = self.collect_pages(root, &Dict::new(), 0, &mut visited, &mut pages) {
                log::warn!("page tree walk stopped early: {}", e);
            }
        }

        if pages.is_empty() {
            log::debug!("no pages from the page tree, falling back to a /Type /Page scan");
            let mut ids: Vec<u32> = self
                .objects
                .iter()
                .filter(|(_, o)| o.dict_type() == Some("Page"))
                .map(|(id, _)| *id)
                .collect();
            ids.sort_unstable();
            for id in ids {
                if let Some(dict) = self.objects.get(&id).and_then(Object::as_dict) {
                    let resources = self.inherited_resources(dict);
                    pages.push(Page {
                        id: Some(ObjectRef::new(id, 0)),
                        dict: dict.clone(),
                        resources,
                    });
                }
            }
        }

        pages
    }

    fn collect_pages(
        &self,
        node: &Object,
        inherited: &Dict,
        depth: u32,
        visited: &mut HashSet<u32>,
        out: &mut Vec<Page>,
    ) -> Result<()> {
        if depth > MAX_PAGE_TREE_DEPTH {
            return Err(Error::RecursionLimitExceeded(MAX_PAGE_TREE_DEPTH));
        }
        let id = node.as_reference();
        if let Some(r) = id {
            if !visited.insert(r.id) {
                log::warn!("page tree cycle at {}", r);
                return Ok(());
            }
        }
        let Some(dict) = self.resolve_dict(node) else {
            return Ok(());
        };

        let resources = dict
            .get("Resources")
            .and_then(|r| self.resolve_dict(r))
            .cloned()
            .unwrap_or_else(|| inherited.clone());

        match dict.get("Kids").and_then(|k| self.resolve(k)).and_then(Object::as_array) {
            Some(kids) => {
                for kid in kids {
                    self.collect_pages(kid, &resources, depth + 1, visited, out)?;
                }
            },
            None if node_is_page(dict) => out.push(Page {
                id,
                dict: dict.clone(),
                resources,
            }),
            None => log::debug!("page tree node without /Kids ignored"),
        }
        Ok(())
    }

    /// Resources of a page found outside the tree walk: its own, else the
    /// nearest `/Parent` that has some.
    fn inherited_resources(&self, page: &Dict) -> Dict {
        let mut current = page;
        for _ in 0..MAX_PAGE_TREE_DEPTH {
            if let Some(res) = current.get("Resources").and_then(|r| self.resolve_dict(r)) {
                return res.clone();
            }
            match current.get("Parent").and_then(|p| self.resolve_dict(p)) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Dict::new()
    }

    /// Decoded page content: every `/Contents` stream concatenated with a
    /// newline between them. Streams that fail to decode are skipped.
    pub fn page_content(&self, page: &Page) -> Vec<u8> {
        let Some(contents) = page.dict.get("Contents").and_then(|c| self.resolve(c)) else {
            return Vec::new();
        };

        let streams: Vec<&Object> = match contents {
            Object::Array(items) => items.iter().filter_map(|i| self.resolve(i)).collect(),
            other => vec![other],
        };

        let mut combined = Vec::new();
        for stream in streams {
            match stream.decode_stream_data() {
                Ok(data) => {
                    combined.extend_from_slice(&data);
                    combined.push(b'\n');
                },
                Err(e) => log::warn!("skipping page content stream: {}", e),
            }
        }
        combined
    }
}

fn node_is_page(dict: &Dict) -> bool {
    match dict.get("Type").and_then(Object::as_name) {
        Some("Page") => true,
        Some(_) => false,
        // Some exporters omit /Type on leaves.
        None => dict.contains_key("Contents"),
    }
}

/// Parse `%PDF-M.m` near the start of the file.
pub fn parse_header(data: &[u8]) -> Result<(u8, u8)> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let pos = window
        .windows(5)
        .position(|w| w == b"%PDF-")
        .ok_or_else(|| {
            Error::InvalidHeader(String::from_utf8_lossy(&data[..data.len().min(8)]).into_owned())
        })?;

    let version = &data[pos + 5..];
    match version {
        [major, b'.', minor, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok((major - b'0', minor - b'0'))
        },
        _ => {
            log::warn!("unreadable PDF version, assuming 1.4");
            Ok((1, 4))
        },
    }
}

fn scan_objects(data: &[u8]) -> HashMap<u32, Object> {
    let mut objects = HashMap::new();
    // End of the last object parsed; headers found inside it are stream
    // payload, not real objects.
    let mut consumed_until = 0;

    for caps in RE_OBJ_HEADER.captures_iter(data) {
        let (Some(whole), Some(num)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() < consumed_until {
            continue;
        }
        let Some(obj_num) = std::str::from_utf8(num.as_bytes())
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        else {
            continue;
        };

        let input = &data[whole.end()..];
        match parse_object(input) {
            Ok((rest, obj)) => {
                consumed_until = data.len() - rest.len();
                if objects.insert(obj_num, obj).is_some() {
                    log::debug!("object {} redefined at byte {}", obj_num, whole.start());
                }
            },
            Err(_) => log::debug!("unparseable object {} at byte {}", obj_num, whole.start()),
        }
    }

    objects
}

fn expand_object_streams(objects: &mut HashMap<u32, Object>) {
    let mut stream_ids: Vec<u32> = objects
        .iter()
        .filter(|(_, o)| o.dict_type() == Some("ObjStm"))
        .map(|(id, _)| *id)
        .collect();
    stream_ids.sort_unstable();

    let mut found = Vec::new();
    for id in stream_ids {
        let Some(stream) = objects.get(&id) else {
            continue;
        };
        match parse_object_stream(stream) {
            Ok(contained) => found.extend(contained),
            Err(e) => log::warn!("object stream {} unreadable: {}", id, e),
        }
    }

    for (obj_num, obj) in found {
        // A direct definition is newer than the compressed one unless the
        // compressed copy is all there is.
        objects.entry(obj_num).or_insert(obj);
    }
}

fn find_trailer(data: &[u8], objects: &HashMap<u32, Object>) -> Dict {
    let mut trailer = Dict::new();

    // Walk classic trailers from first to last so later updates win.
    for m in RE_TRAILER.find_iter(data) {
        let input = &data[m.start() + "trailer".len()..];
        if let Ok((_, Object::Dictionary(dict))) = parse_object(input) {
            trailer.extend(dict);
        }
    }

    if !trailer.contains_key("Root") {
        let mut ids: Vec<&u32> = objects
            .iter()
            .filter(|(_, o)| o.dict_type() == Some("XRef"))
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        for id in ids {
            if let Some(dict) = objects.get(id).and_then(Object::as_dict) {
                for key in ["Root", "Encrypt", "Info"] {
                    if let Some(v) = dict.get(key) {
                        trailer.insert(key.to_string(), v.clone());
                    }
                }
            }
        }
    }

    trailer
}
