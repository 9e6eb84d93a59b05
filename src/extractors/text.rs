//! Text state interpreter.
//!
//! Runs a page's content stream through the text operators and emits one
//! [`PositionedToken`] per show operation. A token's position is the text
//! space origin at the start of the run mapped through `Tm × CTM`; its width
//! is the summed glyph advance in user space.
//!
//! A TJ array is split into separate tokens wherever a kerning offset opens a
//! gap of at least [`TJ_SPLIT_GAP`], since exporters use such gaps to lay out
//! adjacent table cells with a single operator.

use crate::content::{
    parse_content_stream, GraphicsState, GraphicsStateStack, Matrix, Operator, TextElement,
};
use crate::document::{Page, PdfDocument};
use crate::fonts::FontInfo;
use crate::layout::PositionedToken;
use crate::object::{Dict, Object};
use std::collections::HashMap;

/// Maximum nesting of Form XObjects.
pub const MAX_FORM_DEPTH: u32 = 8;

/// Rightward TJ offset, in thousandths of an em, that ends a token.
pub const TJ_SPLIT_GAP: f32 = 1000.0;

/// Extract positioned tokens from one page, in drawing order.
pub fn extract_page_tokens(doc: &PdfDocument, page: &Page) -> Vec<PositionedToken> {
    let content = doc.page_content(page);
    let mut interpreter = Interpreter::new(doc);
    interpreter.run(&content, &page.resources, 0);
    interpreter.tokens
}

struct Interpreter<'d> {
    doc: &'d PdfDocument,
    state: GraphicsStateStack,
    text_matrix: Matrix,
    line_matrix: Matrix,
    tokens: Vec<PositionedToken>,
}

/// Text being accumulated for the current token.
#[derive(Default)]
struct PendingRun {
    text: String,
    start: Option<(f32, f32)>,
}

impl<'d> Interpreter<'d> {
    fn new(doc: &'d PdfDocument) -> Self {
        Self {
            doc,
            state: GraphicsStateStack::new(GraphicsState::default()),
            text_matrix: Matrix::identity(),
            line_matrix: Matrix::identity(),
            tokens: Vec::new(),
        }
    }

    fn run(&mut self, content: &[u8], resources: &Dict, depth: u32) {
        let fallback = FontInfo::default();
        let mut fonts: HashMap<String, FontInfo> = HashMap::new();

        for op in parse_content_stream(content) {
            match op {
                Operator::BeginText => {
                    self.text_matrix = Matrix::identity();
                    self.line_matrix = Matrix::identity();
                },
                Operator::EndText | Operator::Other { .. } => {},
                Operator::Td { tx, ty } => self.move_line(tx, ty),
                Operator::TD { tx, ty } => {
                    self.state.current_mut().leading = -ty;
                    self.move_line(tx, ty);
                },
                Operator::Tm { m } => {
                    self.line_matrix = Matrix::from_array(m);
                    self.text_matrix = self.line_matrix;
                },
                Operator::TStar => self.next_line(),
                Operator::Tc { char_space } => self.state.current_mut().char_space = char_space,
                Operator::Tw { word_space } => self.state.current_mut().word_space = word_space,
                Operator::Tz { scale } => self.state.current_mut().horizontal_scaling = scale,
                Operator::TL { leading } => self.state.current_mut().leading = leading,
                Operator::Ts { rise } => self.state.current_mut().text_rise = rise,
                Operator::Tf { font, size } => {
                    let gs = self.state.current_mut();
                    gs.font_name = Some(font);
                    gs.font_size = size;
                },
                Operator::SaveState => self.state.save(),
                Operator::RestoreState => self.state.restore(),
                Operator::Cm { m } => {
                    let gs = self.state.current_mut();
                    gs.ctm = Matrix::from_array(m).multiply(&gs.ctm);
                },
                Operator::Tj { text } => {
                    let font = current_font(self.doc, &self.state, resources, &mut fonts, &fallback);
                    self.show(font, &[TextElement::String(text)]);
                },
                Operator::TJ { array } => {
                    let font = current_font(self.doc, &self.state, resources, &mut fonts, &fallback);
                    self.show(font, &array);
                },
                Operator::Quote { text } => {
                    self.next_line();
                    let font = current_font(self.doc, &self.state, resources, &mut fonts, &fallback);
                    self.show(font, &[TextElement::String(text)]);
                },
                Operator::DoubleQuote {
                    word_space,
                    char_space,
                    text,
                } => {
                    let gs = self.state.current_mut();
                    gs.word_space = word_space;
                    gs.char_space = char_space;
                    self.next_line();
                    let font = current_font(self.doc, &self.state, resources, &mut fonts, &fallback);
                    self.show(font, &[TextElement::String(text)]);
                },
                Operator::Do { name } => self.paint_xobject(&name, resources, depth),
            }
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.current().leading;
        self.move_line(0.0, -leading);
    }

    fn origin(&self) -> (f32, f32) {
        let gs = self.state.current();
        self.text_matrix
            .multiply(&gs.ctm)
            .transform_point(0.0, gs.text_rise)
    }

    fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    fn show(&mut self, font: &FontInfo, elements: &[TextElement]) {
        let gs = self.state.current().clone();
        let scale = gs.horizontal_scaling / 100.0;
        let mut run = PendingRun::default();

        for element in elements {
            match element {
                TextElement::String(bytes) => {
                    for code in font.char_codes(bytes) {
                        if run.start.is_none() {
                            run.start = Some(self.origin());
                        }
                        run.text.push_str(&font.decode_char(code));

                        let mut tx = font.glyph_width(code) / 1000.0 * gs.font_size + gs.char_space;
                        if code == 32 && !font.is_composite() {
                            tx += gs.word_space;
                        }
                        self.advance(tx * scale);
                    }
                },
                TextElement::Offset(offset) => {
                    if -offset >= TJ_SPLIT_GAP {
                        self.flush(&mut run);
                    }
                    self.advance(-offset / 1000.0 * gs.font_size * scale);
                },
            }
        }
        self.flush(&mut run);
    }

    fn flush(&mut self, run: &mut PendingRun) {
        let pending = std::mem::take(run);
        let Some((x, y)) = pending.start else {
            return;
        };
        let text = pending.text.trim();
        if text.is_empty() {
            return;
        }
        let (end_x, _) = self.origin();
        self.tokens.push(PositionedToken::new(text, x, y, (end_x - x).max(0.0)));
    }

    fn paint_xobject(&mut self, name: &str, resources: &Dict, depth: u32) {
        let doc = self.doc;
        let Some(xobject) = resources
            .get("XObject")
            .and_then(|x| doc.resolve_dict(x))
            .and_then(|x| x.get(name))
            .and_then(|x| doc.resolve(x))
        else {
            log::debug!("XObject /{} not found", name);
            return;
        };
        let Some(dict) = xobject.as_dict() else {
            return;
        };
        if dict.get("Subtype").and_then(Object::as_name) != Some("Form") {
            return;
        }
        if depth >= MAX_FORM_DEPTH {
            log::warn!("form XObject /{} nested deeper than {}, skipped", name, MAX_FORM_DEPTH);
            return;
        }

        let content = match xobject.decode_stream_data() {
            Ok(data) => data,
            Err(e) => {
                log::warn!("form XObject /{} unreadable: {}", name, e);
                return;
            },
        };
        let form_resources = dict
            .get("Resources")
            .and_then(|r| doc.resolve_dict(r))
            .unwrap_or(resources);

        let saved_text = (self.text_matrix, self.line_matrix);
        self.state.save();
        if let Some(m) = dict.get("Matrix").and_then(|m| doc.resolve(m)).and_then(Object::as_array) {
            let values: Vec<f32> = m.iter().filter_map(|v| v.as_number()).map(|v| v as f32).collect();
            if let Ok(arr) = <[f32; 6]>::try_from(values.as_slice()) {
                let gs = self.state.current_mut();
                gs.ctm = Matrix::from_array(arr).multiply(&gs.ctm);
            }
        }
        self.run(&content, form_resources, depth + 1);
        self.state.restore();
        (self.text_matrix, self.line_matrix) = saved_text;
    }
}

/// Font selected by the last `Tf`, loaded on first use.
fn current_font<'f>(
    doc: &PdfDocument,
    state: &GraphicsStateStack,
    resources: &Dict,
    fonts: &'f mut HashMap<String, FontInfo>,
    fallback: &'f FontInfo,
) -> &'f FontInfo {
    let Some(name) = state.current().font_name.as_deref() else {
        return fallback;
    };
    if !fonts.contains_key(name) {
        let info = resources
            .get("Font")
            .and_then(|f| doc.resolve_dict(f))
            .and_then(|f| f.get(name))
            .and_then(|f| doc.resolve_dict(f))
            .map(|f| FontInfo::from_dict(f, doc))
            .unwrap_or_else(|| {
                log::debug!("font /{} not in resources, using defaults", name);
                FontInfo::default()
            });
        fonts.insert(name.to_string(), info);
    }
    fonts.get(name).unwrap_or(fallback)
}
