// src/core/html.rs
//! Just enough tag scanning to pull inline `<script>` bodies out of a page.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Iterator over the contents of inline scripts (no `src=` attribute).
/// Tag matching is case-insensitive; the document is lowercased once.
pub struct InlineScripts<'a> {
    doc: &'a str,
    lc: String,
    pos: usize,
}

impl<'a> InlineScripts<'a> {
    pub fn new(doc: &'a str) -> Self {
        // ASCII-only lowering keeps byte offsets aligned with `doc`
        Self { doc, lc: to_lower(doc), pos: 0 }
    }
}

impl<'a> Iterator for InlineScripts<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let start = self.lc.get(self.pos..)?.find("<script")? + self.pos;
            let open_end = self.lc[start..].find('>')? + start + 1;
            let close = self.lc[open_end..].find("</script")? + open_end;
            self.pos = close + "</script".len();

            let opener = &self.lc[start..open_end];
            if has_src_attr(opener) {
                continue;
            }
            let body = &self.doc[open_end..close];
            if body.trim().is_empty() {
                continue;
            }
            return Some(body);
        }
    }
}

/// `<script src=...>`; ignores e.g. `data-src`.
fn has_src_attr(opener_lc: &str) -> bool {
    let b = opener_lc.as_bytes();
    let mut from = 0;
    while let Some(rel) = opener_lc[from..].find("src") {
        let i = from + rel;
        let before_ok = i > 0 && b[i - 1].is_ascii_whitespace();
        let after = opener_lc[i + 3..].trim_start();
        if before_ok && after.starts_with('=') {
            return true;
        }
        from = i + 3;
    }
    false
}

/// Convenience: collect all inline script bodies.
pub fn inline_scripts(doc: &str) -> Vec<&str> {
    InlineScripts::new(doc).collect()
}
