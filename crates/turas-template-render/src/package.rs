//! Cell edits inside an existing XLSX package
//!
//! The package is read part by part and written back in the same order.
//! Only the edited worksheet part changes, and within it only the edited
//! `<c>` elements; styles, shared strings, merges and every other sheet are
//! copied byte for byte.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use thiserror::Error;
use turas_template_core::{CellValue, RenderError};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::ZipArchive;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// Failures while reading or editing the package
#[derive(Debug, Error)]
pub(crate) enum PackageError {
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing package part '{0}'")]
    MissingPart(String),

    #[error("no worksheet part for sheet '{0}'")]
    MissingSheet(String),

    #[error("row {0} not found in worksheet")]
    MissingRow(u32),

    #[error("element <{0}> is never closed")]
    Unclosed(String),
}

impl PackageError {
    pub(crate) fn at(self, path: &Path) -> RenderError {
        RenderError::Read {
            path: path.to_path_buf(),
            message: self.to_string(),
        }
    }
}

/// Every part of an XLSX archive, in archive order
#[derive(Debug)]
pub(crate) struct XlsxPackage {
    parts: Vec<(String, Vec<u8>)>,
}

impl XlsxPackage {
    pub(crate) fn open(path: &Path) -> Result<Self, PackageError> {
        Self::read(File::open(path)?)
    }

    fn read<R: Read + Seek>(reader: R) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            parts.push((entry.name().to_string(), data));
        }
        Ok(Self { parts })
    }

    pub(crate) fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Part name of the worksheet shown as `sheet_name`
    pub(crate) fn worksheet_part(&self, sheet_name: &str) -> Result<String, PackageError> {
        let workbook = self
            .part(WORKBOOK_PART)
            .ok_or_else(|| PackageError::MissingPart(WORKBOOK_PART.to_string()))?;
        let rels = self
            .part(WORKBOOK_RELS_PART)
            .ok_or_else(|| PackageError::MissingPart(WORKBOOK_RELS_PART.to_string()))?;

        let missing = || PackageError::MissingSheet(sheet_name.to_string());
        let id = sheet_relationship(workbook, sheet_name)?.ok_or_else(missing)?;
        let target = relationship_target(rels, &id)?.ok_or_else(missing)?;

        Ok(match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        })
    }

    /// Replace the value of one cell (zero-based row and column)
    pub(crate) fn set_cell(
        &mut self,
        part: &str,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> Result<(), PackageError> {
        let entry = self
            .parts
            .iter_mut()
            .find(|(n, _)| n == part)
            .ok_or_else(|| PackageError::MissingPart(part.to_string()))?;
        entry.1 = rewrite_cell(&entry.1, row + 1, col, value)?;
        Ok(())
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, data) in &self.parts {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(data)?;
        }
        Ok(writer.finish()?.into_inner())
    }
}

fn sheet_relationship(xml: &[u8], sheet_name: &str) -> Result<Option<String>, PackageError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut id = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    match attr.key.local_name().as_ref() {
                        b"name" => {
                            name = Some(attr.unescape_value()?.into_owned());
                        }
                        b"id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        _ => {}
                    }
                }
                if name.as_deref() == Some(sheet_name) {
                    return Ok(id);
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn relationship_target(xml: &[u8], id: &str) -> Result<Option<String>, PackageError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel_id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    match attr.key.as_ref() {
                        b"Id" => rel_id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"Target" => {
                            target = Some(attr.unescape_value()?.into_owned());
                        }
                        _ => {}
                    }
                }
                if rel_id.as_deref() == Some(id) {
                    return Ok(target);
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// An element boundary seen while scanning a worksheet
enum Token {
    Open {
        qname: String,
        local: Vec<u8>,
        reference: Option<String>,
        style: Option<String>,
        empty: bool,
    },
    Close(Vec<u8>),
    Eof,
    Other,
}

impl Token {
    fn open(e: &BytesStart<'_>, empty: bool) -> Result<Self, PackageError> {
        let mut reference = None;
        let mut style = None;
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            match attr.key.as_ref() {
                b"r" => reference = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                b"s" => style = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                _ => {}
            }
        }
        Ok(Self::Open {
            qname: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            local: e.local_name().as_ref().to_vec(),
            reference,
            style,
            empty,
        })
    }
}

fn next_token(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> Result<Token, PackageError> {
    let token = match reader.read_event_into(buf)? {
        Event::Start(e) => Token::open(&e, false)?,
        Event::Empty(e) => Token::open(&e, true)?,
        Event::End(e) => Token::Close(e.local_name().as_ref().to_vec()),
        Event::Eof => Token::Eof,
        _ => Token::Other,
    };
    buf.clear();
    Ok(token)
}

/// Rewrite the cell at 1-based `row` and 0-based `col` of a worksheet part.
///
/// An existing `<c>` keeps its style index; a missing one is inserted in
/// column order.
fn rewrite_cell(
    xml: &[u8],
    row: u32,
    col: u16,
    value: &CellValue,
) -> Result<Vec<u8>, PackageError> {
    let reference = cell_reference(row, col);
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut last_row = 0;
    let mut in_target = false;
    let mut prefix = String::new();
    let mut next_col: u16 = 0;

    loop {
        let start = reader.buffer_position();
        let token = next_token(&mut reader, &mut buf)?;
        let end = reader.buffer_position();

        match token {
            Token::Open {
                qname,
                local,
                reference: r,
                empty,
                ..
            } if local == b"row" => {
                let number = r.and_then(|r| r.parse().ok()).unwrap_or(last_row + 1);
                last_row = number;
                if number > row {
                    return Err(PackageError::MissingRow(row));
                }
                if number != row {
                    continue;
                }

                prefix = qname.strip_suffix("row").unwrap_or_default().to_string();
                if empty {
                    let open = String::from_utf8_lossy(&xml[start..end]);
                    let open = open.trim_end().trim_end_matches("/>").trim_end();
                    let cell = cell_xml(&prefix, &reference, None, value);
                    return Ok(splice(xml, start, end, &format!("{open}>{cell}</{qname}>")));
                }
                in_target = true;
                next_col = 0;
            }
            Token::Open {
                local,
                reference: r,
                style,
                empty,
                ..
            } if in_target && local == b"c" => {
                let current = r.as_deref().and_then(column_index).unwrap_or(next_col);
                next_col = current.saturating_add(1);

                if current > col {
                    let cell = cell_xml(&prefix, &reference, None, value);
                    return Ok(splice(xml, start, start, &cell));
                }
                if current == col {
                    let end = if empty {
                        end
                    } else {
                        skip_to_close(&mut reader, &mut buf, b"c")?
                    };
                    let cell = cell_xml(&prefix, &reference, style.as_deref(), value);
                    return Ok(splice(xml, start, end, &cell));
                }
            }
            Token::Close(local) if in_target && local == b"row" => {
                let cell = cell_xml(&prefix, &reference, None, value);
                return Ok(splice(xml, start, start, &cell));
            }
            Token::Eof => return Err(PackageError::MissingRow(row)),
            _ => {}
        }
    }
}

fn skip_to_close(
    reader: &mut Reader<&[u8]>,
    buf: &mut Vec<u8>,
    name: &[u8],
) -> Result<usize, PackageError> {
    loop {
        match next_token(reader, buf)? {
            Token::Close(local) if local == name => return Ok(reader.buffer_position()),
            Token::Eof => {
                let name = String::from_utf8_lossy(name).into_owned();
                return Err(PackageError::Unclosed(name));
            }
            _ => {}
        }
    }
}

fn splice(xml: &[u8], start: usize, end: usize, replacement: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(xml.len() + replacement.len());
    out.extend_from_slice(&xml[..start]);
    out.extend_from_slice(replacement.as_bytes());
    out.extend_from_slice(&xml[end..]);
    out
}

fn cell_xml(prefix: &str, reference: &str, style: Option<&str>, value: &CellValue) -> String {
    let style = style.map(|s| format!(r#" s="{s}""#)).unwrap_or_default();
    match value {
        CellValue::Number(n) => {
            format!(r#"<{prefix}c r="{reference}"{style}><{prefix}v>{n}</{prefix}v></{prefix}c>"#)
        }
        CellValue::Text(text) if text.is_empty() => {
            format!(r#"<{prefix}c r="{reference}"{style}/>"#)
        }
        CellValue::Text(text) => format!(
            r#"<{prefix}c r="{reference}"{style} t="inlineStr"><{prefix}is><{prefix}t xml:space="preserve">{}</{prefix}t></{prefix}is></{prefix}c>"#,
            quick_xml::escape::escape(text.as_str())
        ),
    }
}

/// `A1`-style reference for a 1-based row and 0-based column
fn cell_reference(row: u32, col: u16) -> String {
    let mut letters = Vec::new();
    let mut n = u32::from(col) + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &row.to_string()
}

/// Zero-based column of an `A1`-style reference
fn column_index(reference: &str) -> Option<u16> {
    let letters: String = reference
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    if letters.is_empty() {
        return None;
    }
    let number = letters.chars().try_fold(0u32, |acc, c| {
        let digit = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })?;
    u16::try_from(number - 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHEET: &str = concat!(
        r#"<worksheet><sheetData>"#,
        r#"<row r="1"><c r="A1" s="1" t="s"><v>0</v></c><c r="B1" s="1" t="s"><v>1</v></c></row>"#,
        r#"<row r="2"><c r="A2" s="2" t="s"><v>2</v></c><c r="B2" s="3" t="s"><v>3</v></c></row>"#,
        r#"<row r="3"><c r="A3" s="2" t="s"><v>4</v></c><c r="C3" s="2"><v>7</v></c></row>"#,
        r#"<row r="4" spans="1:2"/>"#,
        r#"</sheetData><mergeCells count="1"><mergeCell ref="A5:C5"/></mergeCells></worksheet>"#
    );

    fn rewrite(row: u32, col: u16, value: &CellValue) -> String {
        String::from_utf8(rewrite_cell(SHEET.as_bytes(), row, col, value).unwrap()).unwrap()
    }

    #[test]
    fn references_round_trip() {
        assert_eq!(cell_reference(5, 1), "B5");
        assert_eq!(cell_reference(12, 27), "AB12");
        assert_eq!(column_index("B5"), Some(1));
        assert_eq!(column_index("AB12"), Some(27));
        assert_eq!(column_index("12"), None);
    }

    #[test]
    fn existing_cell_keeps_its_style() {
        let xml = rewrite(2, 1, &CellValue::from("data/new & improved.csv"));
        assert!(xml.contains(
            r#"<c r="B2" s="3" t="inlineStr"><is><t xml:space="preserve">data/new &amp; improved.csv</t></is></c></row>"#
        ));
        assert!(xml.contains(r#"<c r="A2" s="2" t="s"><v>2</v></c>"#));
        assert!(xml.contains(r#"<mergeCell ref="A5:C5"/>"#));
    }

    #[test]
    fn missing_cell_is_inserted_in_column_order() {
        let xml = rewrite(3, 1, &CellValue::Number(0.95));
        assert!(xml.contains(
            r#"<c r="A3" s="2" t="s"><v>4</v></c><c r="B3"><v>0.95</v></c><c r="C3" s="2"><v>7</v></c>"#
        ));
    }

    #[test]
    fn missing_cell_at_row_end_is_appended() {
        let xml = rewrite(1, 2, &CellValue::from("Notes"));
        assert!(xml.contains(r#"<c r="C1" t="inlineStr"><is><t xml:space="preserve">Notes</t></is></c></row>"#));
    }

    #[test]
    fn self_closing_row_is_opened() {
        let xml = rewrite(4, 1, &CellValue::Number(3.0));
        assert!(xml.contains(r#"<row r="4" spans="1:2"><c r="B4"><v>3</v></c></row>"#));
    }

    #[test]
    fn absent_row_is_an_error() {
        let err = rewrite_cell(SHEET.as_bytes(), 9, 1, &CellValue::from("x")).unwrap_err();
        assert!(matches!(err, PackageError::MissingRow(9)));
    }

    #[test]
    fn untouched_bytes_are_identical() {
        let xml = rewrite(2, 1, &CellValue::from("x"));
        let prefix = SHEET.find(r#"<c r="B2""#).unwrap();
        assert_eq!(&xml[..prefix], &SHEET[..prefix]);
        let suffix = SHEET.find("</row><row r=\"3\"").unwrap();
        assert!(xml.ends_with(&SHEET[suffix..]));
    }
}
