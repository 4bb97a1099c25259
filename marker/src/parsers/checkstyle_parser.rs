//! Style Report Parser
//!
//! Reads the XML the style checker prints with `-f xml` into a flat list of
//! [`CheckstyleWarning`]s.
//!
//! ```xml
//! <checkstyle version="8.33">
//!   <file name="/abs/path/Hello.java">
//!     <error line="3" column="5" severity="warning" message="..." source="..."/>
//!   </file>
//! </checkstyle>
//! ```
//!
//! Warnings come out in document order. Each carries the base name of its
//! enclosing `file`; `line`, `column`, `severity` and `source` are optional.

use crate::parsers::xml::{attribute, element_name, malformed, numeric_attribute, required_attribute};
use crate::traits::report_parser::ReportParser;
use crate::types::CheckstyleWarning;
use common::CheckError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parser for the style checker's XML output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckstyleXmlParser;

/// Parses raw style checker output.
pub fn read_checkstyle_xml(raw: &str) -> Result<Vec<CheckstyleWarning>, CheckError> {
    CheckstyleXmlParser.parse(raw)
}

/// Last path component, splitting on both separator styles.
fn base_name(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

fn warning(e: &BytesStart<'_>, filename: Option<&str>) -> Result<CheckstyleWarning, CheckError> {
    Ok(CheckstyleWarning {
        message: required_attribute(e, "message")?,
        filename: filename.map(str::to_string),
        line: numeric_attribute(e, "line")?,
        column: numeric_attribute(e, "column")?,
        severity: attribute(e, "severity")?,
        source: attribute(e, "source")?,
    })
}

impl ReportParser<Vec<CheckstyleWarning>> for CheckstyleXmlParser {
    fn parse(&self, raw: &str) -> Result<Vec<CheckstyleWarning>, CheckError> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);

        let mut warnings = Vec::new();
        let mut current_file: Option<String> = None;
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(reader.buffer_position(), e))?;

            match event {
                Event::Start(e) => {
                    depth += 1;
                    match (depth, element_name(&e).as_str()) {
                        (1, _) => saw_root = true,
                        (2, "file") => current_file = Some(base_name(&required_attribute(&e, "name")?)),
                        (3, "error") => warnings.push(warning(&e, current_file.as_deref())?),
                        _ => {}
                    }
                }
                Event::Empty(e) => match (depth + 1, element_name(&e).as_str()) {
                    (1, _) => {
                        saw_root = true;
                        break;
                    }
                    (2, "file") => {
                        required_attribute(&e, "name")?;
                    }
                    (3, "error") => warnings.push(warning(&e, current_file.as_deref())?),
                    _ => {}
                },
                Event::End(_) => {
                    if depth == 2 {
                        current_file = None;
                    }
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                Event::Eof if depth > 0 => {
                    return Err(CheckError::ReportParse(
                        "style report ends before its root element is closed".to_string(),
                    ));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(CheckError::ReportParse(
                "style report has no root element".to_string(),
            ));
        }

        Ok(warnings)
    }
}
