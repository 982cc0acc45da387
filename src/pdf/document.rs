//! Single-page PDF 1.4 writer with the two base Helvetica faces.

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: i32 = 50;
const VALUE_COLUMN: i32 = 210;

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Heading(String),
    Subheading(String),
    Text(String),
    Field(String, String),
    Blank,
}

impl Line {
    fn height(&self) -> i32 {
        match self {
            Line::Heading(_) => 30,
            Line::Subheading(_) => 22,
            Line::Text(_) | Line::Field(..) => 16,
            Line::Blank => 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PdfDocument {
    lines: Vec<Line>,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.lines.push(Line::Heading(text.to_string()));
        self
    }

    pub fn subheading(&mut self, text: &str) -> &mut Self {
        self.lines.push(Line::Subheading(text.to_string()));
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.lines.push(Line::Text(text.to_string()));
        self
    }

    pub fn field(&mut self, label: &str, value: &str) -> &mut Self {
        self.lines
            .push(Line::Field(label.to_string(), value.to_string()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(Line::Blank);
        self
    }

    /// Lines that run past the bottom margin are dropped.
    fn content_stream(&self) -> String {
        let mut out = String::new();
        let mut y = PAGE_HEIGHT as i32 - MARGIN;

        for line in &self.lines {
            y -= line.height();
            if y < MARGIN {
                break;
            }
            match line {
                Line::Heading(text) => push_text(&mut out, "F2", 18, MARGIN, y, text),
                Line::Subheading(text) => push_text(&mut out, "F2", 13, MARGIN, y, text),
                Line::Text(text) => push_text(&mut out, "F1", 11, MARGIN, y, text),
                Line::Field(label, value) => {
                    push_text(&mut out, "F2", 11, MARGIN, y, &format!("{label}:"));
                    push_text(&mut out, "F1", 11, VALUE_COLUMN, y, value);
                }
                Line::Blank => {}
            }
        }

        out
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let content = self.content_stream();

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>"
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ),
        ];

        let mut buf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(buf.len());
            buf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref_offset = buf.len();
        buf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
        buf.push_str("0000000000 65535 f \n");
        for offset in offsets {
            buf.push_str(&format!("{offset:010} 00000 n \n"));
        }
        buf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));

        buf.into_bytes()
    }
}

fn push_text(out: &mut String, font: &str, size: u32, x: i32, y: i32, text: &str) {
    out.push_str(&format!(
        "BT /{font} {size} Tf {x} {y} Td ({}) Tj ET\n",
        escape(text)
    ));
}

/// Base fonts only cover ASCII; anything else is replaced.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => out.push(' '),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
