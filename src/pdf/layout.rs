//! Flowing cell layout on A4 pages.
//!
//! Positions are in millimetres from the top-left corner and converted to
//! PDF user space (points, origin bottom-left) only when operators are
//! emitted. A cell that would cross the bottom margin starts a new page.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use super::fonts::{Face, encode_win_ansi};
use super::logo::Logo;
use crate::core::PageLayout;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Points per millimetre.
const K: f32 = 72.0 / 25.4;
/// Horizontal padding inside a cell.
const CELL_PADDING_MM: f32 = 1.0;
const LINE_WIDTH_MM: f32 = 0.2;
const LOGO_RESOURCE: &str = "Im1";
const LOGO_GAP_MM: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A cell to place at the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    /// Width in mm; `0.0` extends to the right margin.
    pub width: f32,
    pub height: f32,
    pub text: &'a str,
    pub border: bool,
    pub align: Align,
    /// Move to the start of the next line afterwards instead of to the right.
    pub line_break: bool,
}

impl<'a> Cell<'a> {
    pub fn new(width: f32, height: f32, text: &'a str) -> Self {
        Self {
            width,
            height,
            text,
            border: false,
            align: Align::Left,
            line_break: false,
        }
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn ln(mut self) -> Self {
        self.line_break = true;
        self
    }
}

/// Accumulates drawing operations page by page.
pub struct PageWriter {
    layout: PageLayout,
    pages: Vec<Vec<Operation>>,
    x: f32,
    y: f32,
    face: Face,
    size_pt: f32,
    logo: Option<Logo>,
}

impl PageWriter {
    pub fn new(layout: PageLayout) -> Self {
        let mut writer = Self {
            layout,
            pages: Vec::new(),
            x: layout.margin_mm,
            y: layout.margin_mm,
            face: Face::Regular,
            size_pt: 12.0,
            logo: None,
        };
        writer.add_page();
        writer
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Current vertical position in mm from the top edge.
    #[cfg(test)]
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_font(&mut self, face: Face, size_pt: f32) {
        self.face = face;
        self.size_pt = size_pt;
    }

    pub fn add_page(&mut self) {
        self.pages.push(vec![Operation::new(
            "w",
            vec![real(LINE_WIDTH_MM * K)],
        )]);
        self.x = self.layout.margin_mm;
        self.y = self.layout.margin_mm;
    }

    /// Y coordinate past which nothing is placed on the current page.
    fn break_at(&self) -> f32 {
        PAGE_HEIGHT_MM - self.layout.bottom_margin_mm
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `new` always pushes the first page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Place a cell at the cursor, breaking to a new page first if it would
    /// cross the bottom margin.
    pub fn cell(&mut self, cell: Cell<'_>) {
        if self.y + cell.height > self.break_at() && self.y > self.layout.margin_mm {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let width = if cell.width > 0.0 {
            cell.width
        } else {
            PAGE_WIDTH_MM - self.layout.margin_mm - self.x
        };
        let (x, y, h) = (self.x, self.y, cell.height);

        if cell.border {
            let rect = Operation::new(
                "re",
                vec![
                    real(x * K),
                    real((PAGE_HEIGHT_MM - y - h) * K),
                    real(width * K),
                    real(h * K),
                ],
            );
            let ops = self.ops();
            ops.push(rect);
            ops.push(Operation::new("S", vec![]));
        }

        if !cell.text.is_empty() {
            let encoded = encode_win_ansi(cell.text);
            let text_width = self.face.width_pt(&encoded, self.size_pt) / K;
            let dx = match cell.align {
                Align::Left => CELL_PADDING_MM,
                Align::Center => (width - text_width) / 2.0,
                Align::Right => width - CELL_PADDING_MM - text_width,
            };
            let baseline = y + 0.5 * h + 0.3 * (self.size_pt / K);
            let (face, size) = (self.face, self.size_pt);
            let ops = self.ops();
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![face.resource_name().into(), real(size)],
            ));
            ops.push(Operation::new(
                "Td",
                vec![real((x + dx) * K), real((PAGE_HEIGHT_MM - baseline) * K)],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(encoded, StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }

        if cell.line_break {
            self.x = self.layout.margin_mm;
            self.y += h;
        } else {
            self.x += width;
        }
    }

    /// Start a new line `h` mm below the current one.
    pub fn ln(&mut self, h: f32) {
        self.x = self.layout.margin_mm;
        self.y += h;
    }

    /// Draw the logo with its top-left corner at (`x`, `y`) mm.
    /// The cursor moves below the image so following cells never overlap it.
    pub fn logo(&mut self, logo: Logo, x: f32, y: f32, width: f32) {
        let height = logo.height_for(width);
        self.logo = Some(logo);
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                real(width * K),
                real(0.0),
                real(0.0),
                real(height * K),
                real(x * K),
                real((PAGE_HEIGHT_MM - y - height) * K),
            ],
        ));
        ops.push(Operation::new("Do", vec![LOGO_RESOURCE.into()]));
        ops.push(Operation::new("Q", vec![]));
        self.x = self.layout.margin_mm;
        self.y = self.y.max(y + height + LOGO_GAP_MM);
    }

    /// Assemble the pages into a document.
    pub fn finish(self, title: &str) -> Result<Document, lopdf::Error> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [Face::Regular, Face::Bold] {
            let id = doc.add_object(face.font_dictionary());
            fonts.set(face.resource_name(), Object::Reference(id));
        }
        let mut resources = dictionary! { "Font" => fonts };
        if let Some(logo) = &self.logo {
            let id = doc.add_object(logo.to_xobject());
            resources.set(
                "XObject",
                dictionary! { LOGO_RESOURCE => Object::Reference(id) },
            );
        }
        let resources_id = doc.add_object(resources);

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }.encode()?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    real(PAGE_WIDTH_MM * K),
                    real(PAGE_HEIGHT_MM * K),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Producer" => Object::string_literal(concat!("quittung ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));
        Ok(doc)
    }
}

fn real(v: f32) -> Object {
    Object::from(v)
}
