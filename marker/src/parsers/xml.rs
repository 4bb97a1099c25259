//! Attribute helpers shared by the XML report parsers.

use common::CheckError;
use quick_xml::events::BytesStart;
use std::str::FromStr;

pub(crate) fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Unescaped value of `name`, if the element carries it.
pub(crate) fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, CheckError> {
    let attr = e.try_get_attribute(name).map_err(|err| {
        CheckError::ReportParse(format!("bad attributes on <{}>: {err}", element_name(e)))
    })?;

    attr.map(|a| {
        a.unescape_value().map(|v| v.into_owned()).map_err(|err| {
            CheckError::ReportParse(format!(
                "bad value for '{name}' on <{}>: {err}",
                element_name(e)
            ))
        })
    })
    .transpose()
}

pub(crate) fn required_attribute(e: &BytesStart<'_>, name: &str) -> Result<String, CheckError> {
    attribute(e, name)?.ok_or_else(|| {
        CheckError::ReportParse(format!(
            "<{}> is missing the '{name}' attribute",
            element_name(e)
        ))
    })
}

pub(crate) fn numeric_attribute<T: FromStr>(
    e: &BytesStart<'_>,
    name: &str,
) -> Result<Option<T>, CheckError> {
    attribute(e, name)?
        .map(|raw| {
            raw.trim().parse().map_err(|_| {
                CheckError::ReportParse(format!(
                    "'{name}' on <{}> is not a number: {raw:?}",
                    element_name(e)
                ))
            })
        })
        .transpose()
}

pub(crate) fn required_numeric_attribute<T: FromStr>(
    e: &BytesStart<'_>,
    name: &str,
) -> Result<T, CheckError> {
    numeric_attribute(e, name)?.ok_or_else(|| {
        CheckError::ReportParse(format!(
            "<{}> is missing the '{name}' attribute",
            element_name(e)
        ))
    })
}

pub(crate) fn malformed(position: impl std::fmt::Display, err: impl std::fmt::Display) -> CheckError {
    CheckError::ReportParse(format!("malformed XML at byte {position}: {err}"))
}
