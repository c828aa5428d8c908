use crate::utils::error::{EtlError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

pub const WORKBOOK_PART: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
pub const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Raw worksheet XML plus the string table its cells refer to.
#[derive(Debug, Clone)]
pub struct SheetPart {
    pub path: String,
    pub shared_strings: Vec<String>,
    pub xml: Vec<u8>,
}

/// An `.xlsx` package opened as a zip archive.
pub struct WorkbookPackage<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl WorkbookPackage<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> WorkbookPackage<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        tracing::debug!("Opened workbook archive with {} entries", archive.len());
        Ok(Self { archive })
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Bytes of a package part, or `None` when the archive has no such entry.
    pub fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.archive.by_name(name) {
            Ok(mut file) => {
                let mut data = Vec::with_capacity(file.size() as usize);
                file.read_to_end(&mut data)?;
                Ok(Some(data))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn require_part(&mut self, name: &str) -> Result<Vec<u8>> {
        self.read_part(name)?.ok_or_else(|| EtlError::MissingPart {
            part: name.to_string(),
        })
    }

    /// Shared string table; empty when the workbook has none.
    pub fn shared_strings(&mut self) -> Result<Vec<String>> {
        match self.read_part(SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml),
            None => {
                tracing::debug!("No {} in workbook", SHARED_STRINGS_PART);
                Ok(Vec::new())
            }
        }
    }

    /// Path of the first worksheet, falling back to `xl/worksheets/sheet1.xml`.
    pub fn resolve_sheet_path(&mut self) -> Result<String> {
        match self.sheet_path_from_relationships() {
            Ok(path) => Ok(path),
            Err(e) if self.has_part(DEFAULT_SHEET_PART) => {
                tracing::debug!(
                    "Sheet relationship lookup failed ({}); using {}",
                    e,
                    DEFAULT_SHEET_PART
                );
                Ok(DEFAULT_SHEET_PART.to_string())
            }
            Err(e) => Err(e),
        }
    }

    fn sheet_path_from_relationships(&mut self) -> Result<String> {
        let workbook = self.require_part(WORKBOOK_PART)?;
        let rel_id = first_sheet_rel_id(&workbook)?.ok_or_else(|| EtlError::MissingWorksheet {
            message: format!("no worksheet declared in {}", WORKBOOK_PART),
        })?;

        let rels = self.require_part(WORKBOOK_RELS_PART)?;
        let target = relationship_target(&rels, &rel_id)?.ok_or_else(|| {
            EtlError::MissingWorksheet {
                message: format!("relationship {} not found in {}", rel_id, WORKBOOK_RELS_PART),
            }
        })?;

        Ok(package_path(&target))
    }

    pub fn load_first_sheet(&mut self) -> Result<SheetPart> {
        let shared_strings = self.shared_strings()?;
        let path = self.resolve_sheet_path()?;
        let xml = self.require_part(&path)?;

        tracing::debug!(
            "Loaded worksheet {} ({} bytes, {} shared strings)",
            path,
            xml.len(),
            shared_strings.len()
        );
        Ok(SheetPart {
            path,
            shared_strings,
            xml,
        })
    }
}

/// Relationship targets are relative to `xl/` unless already rooted.
fn package_path(target: &str) -> String {
    let target = target.trim_start_matches('/');
    if target.starts_with("xl/") {
        target.to_string()
    } else {
        format!("xl/{}", target)
    }
}

pub fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => in_phonetic = true,
                b"t" if current.is_some() && !in_phonetic => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(e) if in_text => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) if in_text => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                b"si" => {
                    if let Some(s) = current.take() {
                        strings.push(s);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// `r:id` of the first `<sheet>` that declares one.
fn first_sheet_rel_id(workbook_xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(workbook_xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"id" {
                        let id = attr.unescape_value()?;
                        if !id.is_empty() {
                            return Ok(Some(id.into_owned()));
                        }
                    }
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

fn relationship_target(rels_xml: &[u8], rel_id: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(rels_xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if id.as_deref() == Some(rel_id) {
                    if let Some(target) = target {
                        return Ok(Some(target));
                    }
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="ABDC" sheetId="1" r:id="rId3"/><sheet name="Notes" sheetId="2" r:id="rId1"/></sheets></workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet7.xml"/>
</Relationships>"#;

    fn package(parts: &[(&str, &str)]) -> WorkbookPackage<Cursor<Vec<u8>>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file::<_, ()>(*name, FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        let bytes = zip.finish().unwrap().into_inner();
        WorkbookPackage::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_shared_strings_concatenate_runs() {
        let xml = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
<si><t>Journal Title</t></si>
<si><r><rPr><b/></rPr><t xml:space="preserve">Journal </t></r><r><t>of Things</t></r></si>
<si/>
<si><t>漢字</t><rPh sb="0" eb="2"><t>カンジ</t></rPh></si>
</sst>"#;
        let strings = parse_shared_strings(xml.as_bytes()).unwrap();

        assert_eq!(strings, ["Journal Title", "Journal of Things", "", "漢字"]);
    }

    #[test]
    fn test_missing_shared_strings_is_empty() {
        let mut pkg = package(&[("xl/worksheets/sheet1.xml", "<worksheet/>")]);
        assert!(pkg.shared_strings().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_through_relationships() {
        let mut pkg = package(&[
            (WORKBOOK_PART, WORKBOOK),
            (WORKBOOK_RELS_PART, RELS),
            ("xl/worksheets/sheet7.xml", "<worksheet/>"),
        ]);
        assert_eq!(pkg.resolve_sheet_path().unwrap(), "xl/worksheets/sheet7.xml");

        let sheet = pkg.load_first_sheet().unwrap();
        assert_eq!(sheet.path, "xl/worksheets/sheet7.xml");
        assert_eq!(sheet.xml, b"<worksheet/>");
    }

    #[test]
    fn test_package_path() {
        assert_eq!(package_path("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(package_path("xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(package_path("/xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
    }

    #[test]
    fn test_default_sheet_when_metadata_missing() {
        let mut pkg = package(&[("xl/worksheets/sheet1.xml", "<worksheet/>")]);
        assert_eq!(pkg.resolve_sheet_path().unwrap(), DEFAULT_SHEET_PART);
    }

    #[test]
    fn test_no_sheet_declared() {
        let mut pkg = package(&[(
            WORKBOOK_PART,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheets/></workbook>"#,
        )]);
        let err = pkg.resolve_sheet_path().unwrap_err();
        assert!(matches!(err, EtlError::MissingWorksheet { .. }));
    }

    #[test]
    fn test_unknown_relationship() {
        let mut pkg = package(&[
            (WORKBOOK_PART, WORKBOOK),
            (
                WORKBOOK_RELS_PART,
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#,
            ),
        ]);
        let err = pkg.resolve_sheet_path().unwrap_err();
        assert!(err.to_string().contains("rId3"));
    }

    #[test]
    fn test_missing_target_part() {
        let mut pkg = package(&[(WORKBOOK_PART, WORKBOOK), (WORKBOOK_RELS_PART, RELS)]);
        let err = pkg.load_first_sheet().unwrap_err();
        assert!(matches!(err, EtlError::MissingPart { ref part } if part == "xl/worksheets/sheet7.xml"));
    }

    #[test]
    fn test_not_a_zip() {
        let result = WorkbookPackage::from_bytes(b"definitely not a zip".to_vec());
        assert!(matches!(result, Err(EtlError::ZipError(_))));
    }
}
