//! HTML report generator.

use super::escape::{escape_html, tag};
use super::{ReportFormat, ReportGenerator};
use crate::defects::{DefectInfo, SummaryReport};
use crate::diff::{ContainerDiff, MemberDiff, NamedListDiff, ParameterAnnotationDiff, PropertyDiff};
use crate::error::Result;
use crate::model::EntityKind;
use crate::pipeline::ArchiveReport;
use std::fmt::{self, Write};

/// Stylesheet shared by every generated page.
pub const REPORT_CSS: &str = "
table, th, td {
    border: 1px solid black;
    border-collapse: collapse;
    padding: 2px;
}
th {
    background-color: #B0B0B0;
}
td {
    background-color: #EFEFB0;
}
";

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Leave the `<style>` block out, for embedding in another page.
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn open(&self, out: &mut String, title: &str) -> fmt::Result {
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<title>{}</title>", escape_html(title))?;
        if self.include_styles {
            writeln!(out, "<style>{REPORT_CSS}</style>")?;
        }
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")
    }

    fn close(out: &mut String) -> fmt::Result {
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate_archive_report(&self, report: &ArchiveReport) -> Result<String> {
        let mut out = String::new();
        self.open(&mut out, &report.header)?;
        write_archive(&mut out, report)?;
        Self::close(&mut out)?;
        Ok(out)
    }

    fn generate_summary_report(&self, summary: &SummaryReport) -> Result<String> {
        let mut out = String::new();
        self.open(&mut out, "Summary")?;
        write_summary(&mut out, summary)?;
        Self::close(&mut out)?;
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

fn write_archive(out: &mut String, report: &ArchiveReport) -> fmt::Result {
    writeln!(out, "{}", tag("h1", &escape_html(&report.header)))?;
    info_paragraph(out, &report.header1, &escape_html(&report.archive1))?;
    info_paragraph(out, &report.header2, &escape_html(&report.archive2))?;

    for class in &report.class_diffs {
        write_class(out, &report.header1, &report.header2, class)?;
    }

    write_missing(out, &report.archive1, &report.missing_in_1)?;
    write_missing(out, &report.archive2, &report.missing_in_2)?;

    if !report.failures.is_empty() {
        writeln!(
            out,
            "<p>Entries that could not be compared: <b>{}</b></p>",
            report.failures.len()
        )?;
        writeln!(out, "<ul>")?;
        for failure in &report.failures {
            writeln!(
                out,
                "<li><code>{}</code>: {}</li>",
                escape_html(&failure.entry),
                escape_html(&failure.reason)
            )?;
        }
        writeln!(out, "</ul>")?;
    }

    writeln!(out, "<p>Total diffs: <b>{}</b></p>", report.total_diffs)
}

/// `flags` must already be escaped.
fn info_paragraph(out: &mut String, header: &str, flags: &str) -> fmt::Result {
    writeln!(out, "<p><b>{}</b>: {flags}</p>", escape_html(header))
}

fn write_missing(out: &mut String, archive: &str, missing: &[String]) -> fmt::Result {
    if missing.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "<p>Classes missing in {}: <b>{}</b></p>",
        escape_html(archive),
        missing.len()
    )?;
    writeln!(out, "<ul>")?;
    for line in missing {
        writeln!(out, "{}", tag("li", &escape_html(line)))?;
    }
    writeln!(out, "</ul>")
}

fn write_class(out: &mut String, header1: &str, header2: &str, class: &ContainerDiff) -> fmt::Result {
    writeln!(out, "{}", tag("h1", &format!("CLASS {}", escape_html(&class.name))))?;
    info_paragraph(out, header1, &escape_html(&class.info1))?;
    info_paragraph(out, header2, &escape_html(&class.info2))?;

    property_table(out, header1, header2, &class.property_diffs)?;
    annotation_table(out, header1, header2, &class.annotation_diffs, &[])?;

    // Inner classes and methods come before method sections, fields after.
    for list in &class.structure_diffs {
        if list.name.ends_with(".fields") {
            continue;
        }
        list_table(out, header1, header2, list)?;
    }
    for member in class.members_of(EntityKind::Method) {
        write_member(out, header1, header2, member)?;
    }
    for list in class.structure_diffs.iter().filter(|l| l.name.ends_with(".fields")) {
        list_table(out, header1, header2, list)?;
    }
    for member in class.members_of(EntityKind::Field) {
        write_member(out, header1, header2, member)?;
    }
    Ok(())
}

fn write_member(out: &mut String, header1: &str, header2: &str, member: &MemberDiff) -> fmt::Result {
    if member.is_empty() {
        return Ok(());
    }
    let label = match member.kind {
        EntityKind::Field => "FIELD",
        _ => "METHOD",
    };
    writeln!(
        out,
        "{}",
        tag("h2", &format!("&gt; {label} {}", escape_html(&member.id)))
    )?;
    info_paragraph(out, header1, &escape_html(&member.info1))?;
    info_paragraph(out, header2, &escape_html(&member.info2))?;
    property_table(out, header1, header2, &member.property_diffs)?;
    annotation_table(
        out,
        header1,
        header2,
        &member.annotation_diffs,
        &member.parameter_annotation_diffs,
    )
}

fn table_header(out: &mut String, columns: &[&str]) -> fmt::Result {
    write!(out, "<tr>")?;
    for column in columns {
        write!(out, "<th>{}</th>", escape_html(column))?;
    }
    writeln!(out, "</tr>")
}

/// Cells must already be escaped.
fn table_row(out: &mut String, cells: &[&str]) -> fmt::Result {
    write!(out, "<tr>")?;
    for cell in cells {
        write!(out, "<td>{cell}</td>")?;
    }
    writeln!(out, "</tr>")
}

fn end_table(out: &mut String) -> fmt::Result {
    writeln!(out, "</table>")?;
    writeln!(out, "&nbsp;")
}

/// Property values are pre-rendered by their property and are not escaped again.
fn property_table(out: &mut String, header1: &str, header2: &str, diffs: &[PropertyDiff]) -> fmt::Result {
    if diffs.is_empty() {
        return Ok(());
    }
    writeln!(out, "<table>")?;
    table_header(out, &["Property", header1, header2])?;
    for diff in diffs {
        table_row(
            out,
            &[
                &escape_html(&diff.property),
                &tag("code", &escape_html(&diff.value1)),
                &tag("code", &escape_html(&diff.value2)),
            ],
        )?;
    }
    end_table(out)
}

fn annotation_table(
    out: &mut String,
    header1: &str,
    header2: &str,
    lists: &[NamedListDiff],
    parameters: &[ParameterAnnotationDiff],
) -> fmt::Result {
    if lists.is_empty() && parameters.is_empty() {
        return Ok(());
    }
    writeln!(out, "<table>")?;
    table_header(out, &["Annotation", header1, header2])?;
    for list in lists {
        annotation_rows(out, &escape_html(&list.name), list.diff.rows())?;
    }
    for param in parameters {
        let name = escape_html(&format!("p{}: {}", param.index, param.name));
        annotation_rows(out, &name, param.diff.rows())?;
    }
    end_table(out)
}

fn annotation_rows<'a>(
    out: &mut String,
    name: &str,
    rows: impl Iterator<Item = (&'a str, &'a str)>,
) -> fmt::Result {
    for (left, right) in rows {
        table_row(
            out,
            &[
                name,
                &tag("code", &escape_html(left)),
                &tag("code", &escape_html(right)),
            ],
        )?;
    }
    Ok(())
}

fn list_table(out: &mut String, header1: &str, header2: &str, list: &NamedListDiff) -> fmt::Result {
    if list.diff.is_empty() {
        return Ok(());
    }
    writeln!(out, "<table>")?;
    table_header(out, &[header1, header2])?;
    for (left, right) in list.diff.rows() {
        table_row(
            out,
            &[&tag("code", &escape_html(left)), &tag("code", &escape_html(right))],
        )?;
    }
    end_table(out)
}

fn write_summary(out: &mut String, summary: &SummaryReport) -> fmt::Result {
    writeln!(out, "{}", tag("h1", "Summary"))?;
    writeln!(
        out,
        "<p>Total defects: <b>{}</b>, unique: <b>{}</b></p>",
        summary.total_defects(),
        summary.total_unique_defects()
    )?;

    for entry in summary.summarize() {
        write_defect_info(out, &entry.info)?;
        writeln!(out, "<ul>")?;
        for location in &entry.locations {
            writeln!(out, "{}", tag("li", &escape_html(&location.report_string())))?;
        }
        writeln!(out, "</ul>")?;
    }

    let failed = summary.failed_jobs();
    if !failed.is_empty() {
        writeln!(out, "<p>Archives not compared: <b>{}</b></p>", failed.len())?;
        writeln!(out, "<ul>")?;
        for job in failed {
            writeln!(
                out,
                "<li><code>{}</code>: {}</li>",
                escape_html(&job.name),
                escape_html(&job.reason)
            )?;
        }
        writeln!(out, "</ul>")?;
    }
    Ok(())
}

fn write_defect_info(out: &mut String, info: &DefectInfo) -> fmt::Result {
    writeln!(out, "<p><code>{}</code></p>", escape_html(&info.message()))?;
    writeln!(out, "<table>")?;
    table_row(out, &["type", &escape_html(info.defect_type().id())])?;
    for (attr, value) in info.attributes() {
        table_row(out, &[attr.html_id(), &tag("code", &escape_html(value))])?;
    }
    writeln!(out, "</table>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defects::{AttributeKind, DefectType, Location};
    use crate::diff::ListDiff;
    use crate::pipeline::EntryFailure;

    fn archive_report() -> ArchiveReport {
        ArchiveReport {
            header: "lib".to_string(),
            header1: "old".to_string(),
            header2: "new".to_string(),
            archive1: "v1/lib.jar".to_string(),
            archive2: "v2/lib.jar".to_string(),
            class_diffs: vec![ContainerDiff {
                name: "a/Foo".to_string(),
                info1: "public".to_string(),
                info2: "public final".to_string(),
                property_diffs: vec![PropertyDiff {
                    property: "access".to_string(),
                    value1: "1 public".to_string(),
                    value2: "10001 public final".to_string(),
                }],
                annotation_diffs: Vec::new(),
                structure_diffs: vec![NamedListDiff {
                    name: "class.methods".to_string(),
                    diff: ListDiff {
                        left: vec!["<init>()V public".to_string()],
                        right: vec!["---".to_string()],
                    },
                }],
                member_diffs: Vec::new(),
            }],
            missing_in_1: Vec::new(),
            missing_in_2: vec!["a/Gone.class.json public".to_string()],
            failures: vec![EntryFailure {
                entry: "a/Bad.class.json".to_string(),
                reason: "Empty entry".to_string(),
            }],
            defects: crate::defects::DefectReport::new(),
            total_diffs: 2,
        }
    }

    #[test]
    fn test_archive_report_sections() {
        let html = HtmlReporter::new()
            .generate_archive_report(&archive_report())
            .expect("render");
        assert!(html.contains("<h1>CLASS a/Foo</h1>"));
        assert!(html.contains("<p><b>old</b>: public</p>"));
        assert!(html.contains("<th>Property</th><th>old</th><th>new</th>"));
        assert!(html.contains("<td><code>&lt;init&gt;()V public</code></td><td><code>---</code></td>"));
        assert!(html.contains("Classes missing in v2/lib.jar: <b>1</b>"));
        assert!(html.contains("Total diffs: <b>2</b>"));
        assert!(html.contains("a/Bad.class.json"));
        assert!(html.contains("border-collapse: collapse"));
    }

    #[test]
    fn test_property_values_escaped() {
        let mut report = archive_report();
        report.class_diffs[0].property_diffs = vec![PropertyDiff {
            property: "signature".to_string(),
            value1: "<T:Ljava/lang/Object;>".to_string(),
            value2: "<T:Ljava/lang/Number;>".to_string(),
        }];
        let html = HtmlReporter::new()
            .generate_archive_report(&report)
            .expect("render");
        assert!(html.contains(
            "<td>signature</td><td><code>&lt;T:Ljava/lang/Object;&gt;</code></td><td><code>&lt;T:Ljava/lang/Number;&gt;</code></td>"
        ));
    }

    #[test]
    fn test_without_styles() {
        let html = HtmlReporter::new()
            .without_styles()
            .generate_archive_report(&archive_report())
            .expect("render");
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_summary_report() {
        let defect = DefectType::new(
            "method.access",
            "Values mismatch: [VALUE1] != [VALUE2]",
            &[AttributeKind::Value1, AttributeKind::Value2],
        );
        let info = defect
            .info([
                (AttributeKind::Value1, "<a>".to_string()),
                (AttributeKind::Value2, "b".to_string()),
            ])
            .expect("info");
        let mut summary = SummaryReport::new();
        summary.record(info.clone(), Location::class("x.jar", "a/A"));
        summary.record(info, Location::class("x.jar", "a/B"));
        summary.add_failed_job("y.jar", "no counterpart");

        let html = HtmlReporter::new().generate_summary_report(&summary).expect("render");
        assert!(html.contains("<p><code>[method.access] Values mismatch: &lt;a&gt; != b</code></p>"));
        assert!(html.contains("<td>type</td><td>method.access</td>"));
        assert!(html.contains("<td>value #1</td><td><code>&lt;a&gt;</code></td>"));
        assert!(html.contains("Total defects: <b>2</b>, unique: <b>1</b>"));
        assert!(html.contains("Archives not compared: <b>1</b>"));
    }
}
