use quick_xml::de::DeError;
use quick_xml::events::Event;
use serde::de::DeserializeOwned;

use crate::report::error::Error;
use crate::report::{normalize, TestSuite, TestSuites};

/// Decodes a report document that is either a `<testsuites>` collection or a
/// bare `<testsuite>`. The multi-suite shape is tried first; on any failure
/// the buffer is re-read as a single suite and wrapped into a one-suite
/// report. Only the second failure is reported to the caller.
pub fn from_xml(data: &str) -> Result<TestSuites, Error> {
    let mut report = match decode::<TestSuites>(data, "testsuites") {
        Ok(report) => report,
        Err(_) => {
            let suite = decode::<TestSuite>(data, "testsuite").map_err(Error::Parse)?;
            TestSuites {
                suites: vec![suite],
            }
        }
    };
    normalize(&mut report);
    Ok(report)
}

// Serde decoding alone never inspects the root element name, so a bare
// `<testsuite>` would silently decode as an empty `<testsuites>` collection.
// The root tag is checked up front to make the schema mismatch observable.
fn decode<T: DeserializeOwned>(data: &str, root: &str) -> Result<T, DeError> {
    match root_element(data) {
        Some(name) if name == root => quick_xml::de::from_str(data),
        Some(name) => Err(DeError::Custom(format!(
            "expected root element <{}>, found <{}>",
            root, name
        ))),
        None => Err(DeError::Custom("document has no root element".to_owned())),
    }
}

fn root_element(data: &str) -> Option<String> {
    let mut reader = quick_xml::Reader::from_str(data);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                return Some(String::from_utf8_lossy(element.name().as_ref()).into_owned())
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Outcome;

    const MULTI_SUITE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
    <testsuite tests="2" failures="1" time="0.130" name="pkg/alpha">
        <properties>
            <property name="go.version" value="go1.14"/>
        </properties>
        <testcase classname="alpha" name="TestOne" time="0.020">
            <failure message="Failed" type="">assertion mismatch</failure>
        </testcase>
        <testcase classname="alpha" name="TestTwo" time="0.110"/>
    </testsuite>
    <testsuite tests="1" failures="0" time="0.050" name="pkg/beta">
        <testcase classname="beta" name="TestThree" time="0.050">
            <skipped message="not implemented"/>
        </testcase>
    </testsuite>
</testsuites>"#;

    const SINGLE_SUITE: &str = r#"<testsuite tests="2" failures="1" time="0.200" name="pkg/foo">
    <testcase classname="foo" name="TestX" time="0.100">
        <failure message="Failed" type="">expected 1, got 2</failure>
    </testcase>
    <testcase classname="foo" name="TestY" time="0.100"/>
</testsuite>"#;

    #[test]
    fn test_decoding_multi_suite_document() {
        let report = from_xml(MULTI_SUITE).unwrap();

        assert_eq!(report.suites.len(), 2);
        assert_eq!(report.suites[0].name, "pkg/alpha");
        assert_eq!(report.suites[0].tests, 2);
        assert_eq!(report.suites[0].failures, 1);
        let properties = report.suites[0].properties.as_ref().unwrap();
        assert_eq!(properties.property[0].name, "go.version");
        assert_eq!(properties.property[0].value, "go1.14");
    }

    #[test]
    fn test_decoding_assigns_ids_and_outcomes() {
        let report = from_xml(MULTI_SUITE).unwrap();

        let alpha = &report.suites[0];
        assert_eq!(alpha.cases[0].id, "id_0_0");
        assert_eq!(alpha.cases[0].outcome, Outcome::Failed);
        assert_eq!(alpha.cases[0].failure.as_ref().unwrap().contents, "assertion mismatch");
        assert_eq!(alpha.cases[1].id, "id_0_1");
        assert_eq!(alpha.cases[1].outcome, Outcome::Success);

        let beta = &report.suites[1];
        assert_eq!(beta.cases[0].id, "id_1_0");
        assert_eq!(beta.cases[0].outcome, Outcome::Skipped);
        assert_eq!(beta.cases[0].skipped.as_ref().unwrap().message, "not implemented");
    }

    #[test]
    fn test_single_suite_document_is_wrapped() {
        let report = from_xml(SINGLE_SUITE).unwrap();

        assert_eq!(report.suites.len(), 1);
        let suite = &report.suites[0];
        assert_eq!(suite.name, "pkg/foo");
        assert_eq!(suite.tests, 2);
        assert_eq!(suite.failures, 1);
        assert_eq!(suite.cases[0].name, "TestX");
        assert_eq!(suite.cases[0].outcome, Outcome::Failed);
        assert!(!suite.cases[0].failure.as_ref().unwrap().contents.is_empty());
        assert_eq!(suite.cases[1].name, "TestY");
        assert_eq!(suite.cases[1].outcome, Outcome::Success);
    }

    #[test]
    fn test_unrecognized_document_fails_with_parse_error() {
        let result = from_xml("<html><body>not a report</body></html>");
        match result {
            Err(Error::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other.map(|r| r.suites.len())),
        }
    }

    #[test]
    fn test_empty_buffer_fails() {
        assert!(from_xml("").is_err());
    }

    #[test]
    fn test_repeated_normalization_is_stable() {
        let mut report = from_xml(MULTI_SUITE).unwrap();
        let first = format!("{:?}", report);
        normalize(&mut report);
        normalize(&mut report);
        let second = format!("{:?}", report);

        assert_eq!(first, second);
    }
}
