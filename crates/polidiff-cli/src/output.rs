use std::io::Write;

use owo_colors::OwoColorize;
use polidiff_core::{ComparisonRecord, DocumentText, Metrics, Remark, TopicPresence};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the document pair being compared.
pub fn print_header(
    w: &mut dyn Write,
    current: Option<&DocumentText>,
    proposed: Option<&DocumentText>,
    color: ColorMode,
) -> std::io::Result<()> {
    let describe = |doc: Option<&DocumentText>| match doc {
        Some(d) => format!("{} ({} páginas, {} caracteres)", d.source, d.pages, d.chars),
        None => "—".to_string(),
    };
    let title = "Comparativo de política de investimentos";
    if color.enabled() {
        writeln!(w, "{}", title.bold())?;
    } else {
        writeln!(w, "{}", title)?;
    }
    writeln!(w, "  Atual:    {}", describe(current))?;
    writeln!(w, "  Proposta: {}", describe(proposed))?;
    writeln!(w)?;
    Ok(())
}

fn presence_cell(presence: TopicPresence, topic: &str, color: ColorMode) -> String {
    match presence {
        TopicPresence::Found => topic.to_string(),
        TopicPresence::NotFound => {
            if color.enabled() {
                presence.label(topic).dimmed().to_string()
            } else {
                presence.label(topic).to_string()
            }
        }
    }
}

/// Print one line per comparison record, optionally followed by excerpts.
pub fn print_records(
    w: &mut dyn Write,
    records: &[ComparisonRecord],
    excerpts: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    if records.is_empty() {
        writeln!(w, "Nenhum tópico corresponde ao filtro.")?;
        return Ok(());
    }

    for record in records {
        let remark = match record.remark {
            Remark::Unchanged => {
                if color.enabled() {
                    "MANTIDO".green().to_string()
                } else {
                    "MANTIDO".to_string()
                }
            }
            Remark::PossibleChange => {
                if color.enabled() {
                    "POSSÍVEL ALTERAÇÃO".yellow().to_string()
                } else {
                    "POSSÍVEL ALTERAÇÃO".to_string()
                }
            }
        };

        writeln!(
            w,
            "{} -> {} | atual: {} | proposta: {}",
            record.title,
            remark,
            presence_cell(record.current, &record.topic, color),
            presence_cell(record.proposed, &record.topic, color),
        )?;

        if let (Some(similarity), Some(level)) = (record.similarity, record.change_level) {
            let line = format!(
                "    similaridade dos trechos: {:.1}% ({})",
                similarity * 100.0,
                level.label()
            );
            if color.enabled() {
                writeln!(w, "{}", line.dimmed())?;
            } else {
                writeln!(w, "{}", line)?;
            }
        }

        if excerpts {
            if let Some(ref excerpt) = record.current_excerpt {
                writeln!(w, "    [atual] {}", excerpt)?;
            }
            if let Some(ref excerpt) = record.proposed_excerpt {
                writeln!(w, "    [proposta] {}", excerpt)?;
            }
        }
    }
    Ok(())
}

/// Print the closing summary block.
pub fn print_summary(
    w: &mut dyn Write,
    metrics: &Metrics,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", "RESUMO".bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "RESUMO")?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Tópicos analisados: {}", metrics.total_topics)?;
    writeln!(w, "  Mantidos: {}", metrics.unchanged)?;
    let changed_line = format!(
        "  Com possível alteração: {} ({:.1}%)",
        metrics.changed, metrics.changed_pct
    );
    if color.enabled() && metrics.changed > 0 {
        writeln!(w, "{}", changed_line.yellow())?;
    } else {
        writeln!(w, "{}", changed_line)?;
    }
    if let Some(mean) = metrics.mean_similarity {
        writeln!(w, "  Similaridade média: {:.1}%", mean * 100.0)?;
    }
    Ok(())
}
