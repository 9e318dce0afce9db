//! Document rendering boundary.
//!
//! The assembler has no knowledge of rendering format; this module turns a
//! finished [`ReportDocument`] into printable, styled HTML markup and owns
//! the download filename convention. Conversion of the markup to final PDF
//! bytes is delegated to the serving layer's print pipeline.

use crate::resolve::slugify;
use crate::types::ReportDocument;
use std::fmt::Write;

const STYLE: &str = "body{font-family:Georgia,serif;margin:2.5rem auto;max-width:48rem;color:#1a1a1a}\
h1{border-bottom:2px solid #1a1a1a;padding-bottom:.3rem}\
h2{margin-top:1.6rem;color:#333}\
table.facts td{padding:.15rem .6rem .15rem 0;vertical-align:top}\
table.facts td:first-child{font-weight:bold;white-space:nowrap}\
.sources{font-size:.8rem;color:#666}\
img.logo{max-height:4rem;float:right}";

/// Download filename: `{slug}.pdf`, falling back to a slugified selected
/// title when the assembled document carries no slug.
pub fn download_filename(report: &ReportDocument, selected_title: &str) -> String {
    let slug = report
        .slug
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(selected_title));
    format!("{slug}.pdf")
}

/// Render the document model into self-contained printable HTML.
pub fn report_html(report: &ReportDocument) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape(&report.title)
    );

    if let Some(logo) = &report.logo_url {
        let _ = write!(html, "<img class=\"logo\" src=\"{}\" alt=\"logo\">", escape(logo));
    }
    let _ = write!(html, "<h1>{}</h1>", escape(&report.title));

    html.push_str("<table class=\"facts\">");
    for (label, value) in [
        ("Industry", &report.industry),
        ("Headquarters", &report.location),
        ("Founded", &report.founded),
        ("Employees", &report.employees),
        ("Website", &report.website),
        ("Revenue", &report.revenue),
    ] {
        if let Some(value) = value {
            let _ = write!(
                html,
                "<tr><td>{label}</td><td>{}</td></tr>",
                escape(value)
            );
        }
    }
    if !report.leaders.is_empty() {
        let _ = write!(
            html,
            "<tr><td>Key people</td><td>{}</td></tr>",
            escape(&report.leaders.join(", "))
        );
    }
    html.push_str("</table>");

    for section in &report.sections {
        let _ = write!(
            html,
            "<h2>{}</h2><p>{}</p>",
            escape(&section.title),
            escape(&section.content).replace('\n', "<br>")
        );
    }

    if !report.references.is_empty() {
        html.push_str("<h2>References</h2><ul class=\"sources\">");
        for reference in &report.references {
            let _ = write!(html, "<li>{}</li>", escape(reference));
        }
        html.push_str("</ul>");
    }

    html.push_str("</body></html>");
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportSection;

    #[test]
    fn filename_uses_document_slug() {
        let report = ReportDocument {
            title: "Acme Corporation".to_string(),
            slug: Some("acme-corporation".to_string()),
            ..Default::default()
        };
        assert_eq!(download_filename(&report, "whatever"), "acme-corporation.pdf");
    }

    #[test]
    fn filename_falls_back_to_slugified_selected_title() {
        let report = ReportDocument::default();
        assert_eq!(download_filename(&report, "Acme, Corp!"), "acme-corp.pdf");
    }

    #[test]
    fn html_contains_sections_and_escapes_content() {
        let report = ReportDocument {
            title: "Acme <Corp>".to_string(),
            sections: vec![ReportSection {
                title: "Brief History".to_string(),
                content: "Founded & funded.".to_string(),
                sources: vec![],
            }],
            references: vec!["https://example.com".to_string()],
            ..Default::default()
        };

        let html = report_html(&report);
        assert!(html.contains("Acme &lt;Corp&gt;"));
        assert!(html.contains("<h2>Brief History</h2>"));
        assert!(html.contains("Founded &amp; funded."));
        assert!(html.contains("<li>https://example.com</li>"));
    }
}
