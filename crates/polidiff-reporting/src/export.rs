use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use polidiff_core::{ComparisonRecord, Metrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
    Text,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(format!(
                "unknown format '{}' (expected json, csv, markdown, or text)",
                other
            )),
        }
    }
}

impl ExportFormat {
    /// Infer the format from a file extension; `Text` when unrecognized.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
            .unwrap_or(ExportFormat::Text)
    }
}

/// Render the comparison table and its summary in the given format.
pub fn render(records: &[ComparisonRecord], metrics: &Metrics, format: ExportFormat) -> String {
    match format {
        ExportFormat::Json => render_json(records, metrics),
        ExportFormat::Csv => render_csv(records),
        ExportFormat::Markdown => render_markdown(records, metrics),
        ExportFormat::Text => render_text(records, metrics),
    }
}

/// Render and write to `path`.
pub fn export_results(
    records: &[ComparisonRecord],
    metrics: &Metrics,
    format: ExportFormat,
    path: &Path,
) -> Result<(), String> {
    let content = render(records, metrics, format);
    let mut file =
        std::fs::File::create(path).map_err(|e| format!("Failed to create file: {}", e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write: {}", e))?;
    Ok(())
}

fn render_json(records: &[ComparisonRecord], metrics: &Metrics) -> String {
    let value = serde_json::json!({
        "summary": metrics,
        "records": records,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

fn similarity_cell(record: &ComparisonRecord) -> String {
    match record.similarity {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => String::new(),
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_csv(records: &[ComparisonRecord]) -> String {
    let mut out = String::from("topico,atual,proposta,observacao,similaridade\n");
    for record in records {
        let row = [
            record.title.as_str(),
            record.current_label(),
            record.proposed_label(),
            record.remark.label(),
            &similarity_cell(record),
        ];
        let line: Vec<String> = row.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn render_markdown(records: &[ComparisonRecord], metrics: &Metrics) -> String {
    let mut out = String::from("# Comparativo de política de investimentos\n\n");
    out.push_str(&format!(
        "{} tópicos, {} com possível alteração ({:.1}%)\n\n",
        metrics.total_topics, metrics.changed, metrics.changed_pct
    ));
    out.push_str("| Tópico | Atual | Proposta | Observação | Similaridade |\n");
    out.push_str("|---|---|---|---|---|\n");
    for record in records {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            record.title,
            record.current_label(),
            record.proposed_label(),
            record.remark.label(),
            similarity_cell(record),
        ));
    }
    out
}

fn render_text(records: &[ComparisonRecord], metrics: &Metrics) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{}: atual={} | proposta={} | {}",
            record.title,
            record.current_label(),
            record.proposed_label(),
            record.remark.label(),
        ));
        if let Some(s) = record.similarity {
            out.push_str(&format!(" (similaridade {:.1}%)", s * 100.0));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "\nTotal: {} tópicos, {} mantidos, {} com possível alteração\n",
        metrics.total_topics, metrics.unchanged, metrics.changed
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use polidiff_core::compare;

    fn sample() -> (Vec<ComparisonRecord>, Metrics) {
        let topics = vec!["meta atuarial".to_string(), "liquidez".to_string()];
        let records = compare(
            "a meta atuarial é 6%",
            "a meta atuarial é 5% e a liquidez aumentou",
            &topics,
        );
        let metrics = Metrics::from_records(&records);
        (records, metrics)
    }

    #[test]
    fn format_parsing() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(
            ExportFormat::from_path(Path::new("out.csv")),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.log")),
            ExportFormat::Text
        );
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let (records, metrics) = sample();
        let csv = render(&records, &metrics, ExportFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + records.len());
        assert!(lines[0].starts_with("topico,"));
        assert!(lines[1].starts_with("Meta atuarial,meta atuarial,meta atuarial,mantido"));
        assert!(lines[2].contains("não encontrado,liquidez,possível alteração"));
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_carries_summary_and_records() {
        let (records, metrics) = sample();
        let json = render(&records, &metrics, ExportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_topics"], 2);
        assert_eq!(value["records"][0]["title"], "Meta atuarial");
        assert_eq!(value["records"][0]["remark"], "unchanged");
        assert_eq!(value["records"][1]["remark"], "possible_change");
    }

    #[test]
    fn markdown_table_shape() {
        let (records, metrics) = sample();
        let md = render(&records, &metrics, ExportFormat::Markdown);
        assert!(md.contains("| Tópico | Atual | Proposta | Observação | Similaridade |"));
        assert_eq!(md.matches("\n| ").count(), records.len() + 1);
    }
}
