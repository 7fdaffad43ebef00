//! Askama templates for the HTML report.

use askama::Template;

use super::view::Report;

/// Full HTML page with the event table.
#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate<'a> {
    pub report: &'a Report,
}
