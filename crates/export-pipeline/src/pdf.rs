use crate::artifact::ExportContext;
use crate::source::ExportSource;
use crate::spec_sheet::SpecSheet;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 56;
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 14;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Specification sheet as a PDF 1.4 document.
///
/// Text only, set in the built-in Helvetica font, paginated as needed.
pub fn write_pdf(source: &ExportSource, ctx: &ExportContext) -> Vec<u8> {
    let lines = SpecSheet::build(source, ctx).lines();
    let created = ctx.generated_at.format("D:%Y%m%d%H%M%SZ").to_string();
    text_document(&lines, "Packaging Specification Sheet", &created)
}

/// Lay out plain lines of text over as many pages as needed.
pub fn text_document(lines: &[String], title: &str, created: &str) -> Vec<u8> {
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    // Object numbers: 1 catalog, 2 page tree, 3 font, 4 info,
    // then a (page, content) pair per page.
    let page_obj = |i: usize| 5 + 2 * i;
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", page_obj(i)))
        .collect();

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        format!(
            "<< /Title ({}) /Producer (packaging-configurator) /CreationDate ({}) >>",
            escape(title),
            escape(created)
        )
        .into_bytes(),
    ];

    for (i, page_lines) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_obj(i) + 1
            )
            .into_bytes(),
        );

        let mut stream = format!(
            "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n",
            FONT_SIZE,
            LEADING,
            MARGIN,
            PAGE_HEIGHT - MARGIN
        );
        for line in page_lines.iter() {
            stream.push_str(&format!("({}) Tj T*\n", escape(line)));
        }
        stream.push_str("ET");

        let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        content.extend_from_slice(stream.as_bytes());
        content.extend_from_slice(b"\nendstream");
        objects.push(content);
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    // Each xref entry is exactly 20 bytes including the two-byte line end.
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info 4 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    out
}

/// Escape a PDF literal string for the WinAnsi-encoded font.
///
/// Latin-1 letters (`U+00A0..=U+00FF`) share their WinAnsi code and are written as
/// `\ddd` octal escapes. Anything else outside printable ASCII becomes `?`.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{A0}'..='\u{FF}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn escapes_delimiters_and_non_ascii() {
        assert_eq!(escape("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape("Größe"), "Gr\\366\\337e");
        assert_eq!(escape("20 × 30 cm"), "20 \\327 30 cm");
        assert_eq!(escape("box → lid"), "box ? lid");
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let lines: Vec<String> = (0..5).map(|i| format!("line {}", i)).collect();
        let pdf = text_document(&lines, "t", "D:20240101000000Z");
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));

        let xref_at = find(&pdf, b"xref\n").unwrap();
        let table = std::str::from_utf8(&pdf[xref_at..]).unwrap();
        let entries: Vec<&str> = table.lines().skip(3).take_while(|l| l.ends_with(" n ")).collect();
        assert_eq!(entries.len(), 6);
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(pdf[offset..].starts_with(expected.as_bytes()), "object {}", i + 1);
        }

        let startxref = find(&pdf, b"startxref\n").unwrap() + "startxref\n".len();
        let tail = std::str::from_utf8(&pdf[startxref..]).unwrap();
        let declared: usize = tail.lines().next().unwrap().parse().unwrap();
        assert_eq!(declared, xref_at);
    }

    #[test]
    fn long_documents_paginate() {
        let lines: Vec<String> = (0..(LINES_PER_PAGE * 2 + 1))
            .map(|i| format!("line {}", i))
            .collect();
        let pdf = text_document(&lines, "t", "D:20240101000000Z");
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Count 3"));
        assert_eq!(text.matches("/Type /Page ").count(), 3);
    }
}
