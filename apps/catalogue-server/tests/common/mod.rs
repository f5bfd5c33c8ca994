//! Shared fixtures: small, valid PDFs built in memory
//!
//! Each page gets one text object per line, stacked top to bottom, in the
//! standard Helvetica font so no font program has to be embedded.

#![allow(dead_code)]

/// Native page size in points
pub const PAGE_WIDTH: u32 = 300;
pub const PAGE_HEIGHT: u32 = 200;

/// Build a PDF with one page per entry of `pages`, each holding the given lines
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();

    // 1: catalog, 2: page tree, 3: font, then (page, content) pairs
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, lines) in pages.iter().enumerate() {
        let content_id = 5 + i * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT, content_id
        ));

        let mut stream = String::new();
        for (n, line) in lines.iter().enumerate() {
            let y = PAGE_HEIGHT as usize - 30 - n * 20;
            stream.push_str(&format!(
                "BT /F1 12 Tf 20 {} Td ({}) Tj ET\n",
                y,
                escape_pdf_string(line)
            ));
        }
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

/// The three-page widget catalogue: page 3 repeats page 1's reference
pub fn widget_catalogue() -> Vec<u8> {
    build_pdf(&[
        &["WIDGET-001", "Ref-12345 Widget"],
        &["WIDGET-002"],
        &["WIDGET-001", "Gadget-7"],
    ])
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
