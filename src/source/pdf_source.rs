//! lopdf-backed span source.
//!
//! Walks each page's content stream, tracking the text matrix and current
//! font, and emits one [`RawSpan`] per text-showing operation. Only the
//! operators relevant to text placement are interpreted; graphics state is
//! ignored.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::BBox;

use super::{decode_text_simple, PageGeometry, RawSpan, SpanSource};

/// PDF span source backed by lopdf.
pub struct PdfSpanSource {
    doc: LopdfDocument,
    /// Page object ids in page-number order
    page_ids: Vec<ObjectId>,
}

impl PdfSpanSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        crate::detect::detect_format_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Self {
        // get_pages keys are 1-based page numbers in document order
        let page_ids = doc.get_pages().into_values().collect();
        Self { doc, page_ids }
    }

    fn page_id(&self, page_index: u32) -> Result<ObjectId> {
        self.page_ids
            .get(page_index as usize)
            .copied()
            .ok_or_else(|| Error::PageOutOfRange(page_index, self.page_ids.len() as u32))
    }

    /// Concatenated, decompressed content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(obj) => obj,
            // A page without Contents is legal and simply empty.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Walk a content stream and emit raw spans.
    fn parse_content(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        page_height: f32,
    ) -> Result<Vec<RawSpan>> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font = String::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            current_font = fonts
                                .get(font_name.as_slice())
                                .and_then(|f| f.get(b"BaseFont").ok())
                                .and_then(|o| o.as_name().ok())
                                .map(|n| String::from_utf8_lossy(n).to_string())
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(font_name.as_slice()).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }

                    let encoding = fonts
                        .get(&current_font_name)
                        .and_then(|f| f.get_font_encoding(&self.doc).ok());
                    let decode = |bytes: &[u8]| {
                        if let Some(ref enc) = encoding {
                            LopdfDocument::decode_text(enc, bytes).unwrap_or_default()
                        } else {
                            decode_text_simple(bytes)
                        }
                    };

                    let text = match op.operator.as_str() {
                        "TJ" => {
                            if let Some(Object::Array(arr)) = op.operands.first() {
                                decode_tj_array(arr, &decode)
                            } else {
                                String::new()
                            }
                        }
                        "\"" => decode_string_operand(op.operands.get(2), &decode),
                        _ => decode_string_operand(op.operands.first(), &decode),
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        let size = current_font_size * matrix.scale();
                        spans.push(make_raw_span(
                            text,
                            x,
                            y,
                            size,
                            current_font.clone(),
                            page_height,
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }
}

impl SpanSource for PdfSpanSource {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn page_geometry(&self, page_index: u32) -> Result<PageGeometry> {
        let page_id = self.page_id(page_index)?;
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let media_box = page_dict
            .get(b"MediaBox")
            .ok()
            .and_then(|obj| match obj {
                Object::Array(arr) => Some(arr.clone()),
                Object::Reference(r) => match self.doc.get_object(*r) {
                    Ok(Object::Array(arr)) => Some(arr.clone()),
                    _ => None,
                },
                _ => None,
            })
            .unwrap_or_default();

        if media_box.len() == 4 {
            let nums: Vec<f32> = media_box.iter().filter_map(get_number).collect();
            if nums.len() == 4 {
                return Ok(PageGeometry {
                    width: nums[2] - nums[0],
                    height: nums[3] - nums[1],
                });
            }
        }

        log::debug!("Page {} has no usable MediaBox, assuming Letter", page_index);
        Ok(PageGeometry::LETTER)
    }

    fn page_spans(&self, page_index: u32) -> Result<Vec<RawSpan>> {
        let page_id = self.page_id(page_index)?;
        let geometry = self.page_geometry(page_index)?;

        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();
        let content = self.page_content(page_id)?;
        self.parse_content(&content, &fonts, geometry.height)
    }

    fn document_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok()?,
            Object::Dictionary(d) => d,
            _ => return None,
        };
        match dict.get(b"Title").ok()? {
            Object::String(bytes, _) => {
                let title = decode_text_simple(bytes).trim().to_string();
                if title.is_empty() {
                    None
                } else {
                    Some(title)
                }
            }
            _ => None,
        }
    }
}

/// Convert a baseline position into a top-origin bounding box.
///
/// Width is estimated from character count; lopdf does not expose glyph
/// advance widths without full font metrics.
fn make_raw_span(
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    font_name: String,
    page_height: f32,
) -> RawSpan {
    let char_count = text.chars().count() as f32;
    let est_width = char_count * font_size * 0.5;
    // Approximate ascender/descender from font size
    let top = page_height - (y + font_size * 0.8);
    let bottom = page_height - (y - font_size * 0.2);

    RawSpan {
        text,
        font_size,
        font_name,
        bold_flag: None,
        bbox: BBox::new(x, top, x + est_width, bottom),
    }
}

fn decode_string_operand(operand: Option<&Object>, decode: &dyn Fn(&[u8]) -> String) -> String {
    if let Some(Object::String(bytes, _)) = operand {
        decode(bytes)
    } else {
        String::new()
    }
}

/// Decode a TJ array, turning large kerning adjustments into word spaces.
fn decode_tj_array(arr: &[Object], decode: &dyn Fn(&[u8]) -> String) -> String {
    // Adjustments are in 1/1000 text-space units; values beyond this
    // threshold usually stand in for an actual space character.
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in arr {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode(bytes));
            }
            Object::Integer(n) => {
                if -(*n as f32) > SPACE_THRESHOLD && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
            Object::Real(n) => {
                if -n > SPACE_THRESHOLD && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Text matrix tracking for content stream interpretation.
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default line leading; a TL-aware interpreter could refine this
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
