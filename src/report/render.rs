use liquid::model::Value;
use liquid::Object;

use crate::report::error::Error;
use crate::report::TestSuites;

const REPORT_TEMPLATE: &str = include_str!("../../templates/report.html");
const STYLE_SHEET: &str = include_str!("../../templates/style.css");

/// Renders a canonical report into a self-contained HTML document. The
/// stylesheet is inlined into the template before parsing so the output
/// needs no companion files.
pub struct Renderer {
    template: liquid::Template,
}

impl Renderer {
    pub fn new() -> Result<Self, Error> {
        let html = REPORT_TEMPLATE.replace("{{style.css}}", STYLE_SHEET);
        let template = liquid::ParserBuilder::with_stdlib()
            .build()?
            .parse(&html)?;
        Ok(Self { template })
    }

    /// `refresh` is the value of the meta-refresh directive in seconds; a
    /// live report passes a small value while the run is ongoing and an
    /// effectively-infinite one once it is done.
    pub fn render(&self, report: &TestSuites, title: &str, refresh: &str) -> Result<Vec<u8>, Error> {
        let mut globals = Object::new();
        globals.insert("report".into(), liquid::model::to_value(report)?);
        globals.insert("title".into(), Value::scalar(title.to_owned()));
        globals.insert("refresh".into(), Value::scalar(refresh.to_owned()));

        let html = self.template.render(&globals)?;
        Ok(html.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ingest::from_xml;

    const DOCUMENT: &str = r#"<testsuite tests="2" failures="1" time="0.200" name="pkg/foo">
    <testcase classname="foo" name="TestX" time="0.100">
        <failure message="Failed" type="">expected 1, got 2</failure>
    </testcase>
    <testcase classname="foo" name="TestY" time="0.100"/>
</testsuite>"#;

    #[test]
    fn test_rendering_contains_suite_and_case_details() {
        let report = from_xml(DOCUMENT).unwrap();
        let renderer = Renderer::new().unwrap();
        let html = renderer.render(&report, "Test Done", "99999999").unwrap();
        let html = String::from_utf8(html).unwrap();

        assert!(html.contains("<title>Test Done</title>"));
        assert!(html.contains("pkg/foo"));
        assert!(html.contains("id_0_0"));
        assert!(html.contains("TestX"));
        assert!(html.contains("FAILED"));
        assert!(html.contains("expected 1, got 2"));
        assert!(html.contains("content=\"99999999\""));
    }

    #[test]
    fn test_rendering_empty_report_succeeds() {
        let report = TestSuites::default();
        let renderer = Renderer::new().unwrap();
        let html = renderer.render(&report, "Test Ongoing", "3").unwrap();

        assert!(!html.is_empty());
    }

    #[test]
    fn test_stylesheet_is_inlined() {
        let report = TestSuites::default();
        let renderer = Renderer::new().unwrap();
        let html = renderer.render(&report, "Test Ongoing", "3").unwrap();
        let html = String::from_utf8(html).unwrap();

        assert!(!html.contains("{{style.css}}"));
        assert!(html.contains("font-family"));
    }
}
