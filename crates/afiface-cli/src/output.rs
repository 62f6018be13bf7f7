use crate::config::{OutputFormat, OutputSettings};
use crate::error::Result;
use afiface::core::io::model_data::ModelSummary;
use afiface::workflows::interface_plddt::InterfaceReport;
use afiface::workflows::pair_pae::PaeReport;
use afiface::workflows::summary::CollectedScores;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

fn join_chains(chains: &[char]) -> String {
    chains
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(":")
}

#[derive(Serialize)]
struct PaeCsvRow<'a> {
    model: &'a str,
    ch_pae_median: f64,
    ch_pae_mean: f64,
    ich_pae_median: f64,
    ich_pae_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ptm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iptm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plddt_median: Option<f64>,
    query_chains: String,
    target_chains: String,
}

impl<'a> From<&'a PaeReport> for PaeCsvRow<'a> {
    fn from(r: &'a PaeReport) -> Self {
        Self {
            model: &r.model,
            ch_pae_median: r.ch_pae_median,
            ch_pae_mean: r.ch_pae_mean,
            ich_pae_median: r.ich_pae_median,
            ich_pae_mean: r.ich_pae_mean,
            ptm: r.ptm,
            iptm: r.iptm,
            plddt_median: r.plddt_median,
            query_chains: join_chains(&r.query_chains),
            target_chains: join_chains(&r.target_chains),
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

fn write_csv_rows<W: Write, T: Serialize>(
    writer: W,
    rows: impl IntoIterator<Item = T>,
    header: bool,
    delimiter: u8,
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(header)
        .delimiter(delimiter)
        .from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_pae_report<W: Write>(
    mut writer: W,
    report: &PaeReport,
    settings: OutputSettings,
) -> Result<()> {
    match settings.format {
        OutputFormat::Json => write_json(&mut writer, report),
        OutputFormat::Csv => write_csv_rows(
            writer,
            [PaeCsvRow::from(report)],
            settings.header,
            b',',
        ),
    }
}

pub fn write_interface_report<W: Write>(
    mut writer: W,
    report: &InterfaceReport,
    settings: OutputSettings,
) -> Result<()> {
    match settings.format {
        OutputFormat::Json => write_json(&mut writer, report),
        OutputFormat::Csv => write_csv_rows(writer, [report], settings.header, b','),
    }
}

/// Writes summaries in the score-file text form, one block per model.
pub fn write_summaries<W: Write>(mut writer: W, summaries: &[ModelSummary], json: bool) -> Result<()> {
    if json {
        return write_json(&mut writer, summaries);
    }
    for summary in summaries {
        writeln!(writer, "# {}", summary.name)?;
        writeln!(writer, "{}", summary)?;
    }
    Ok(())
}

/// Writes collected scores as a tab-separated table with a header row.
pub fn write_collected_scores<W: Write>(writer: W, rows: &[CollectedScores]) -> Result<()> {
    write_csv_rows(writer, rows, true, b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pae_report(gather_all: bool) -> PaeReport {
        PaeReport {
            model: "model_1".to_string(),
            ch_pae_median: 2.0,
            ch_pae_mean: 2.5,
            ich_pae_median: 4.5,
            ich_pae_mean: 4.25,
            ptm: gather_all.then_some(0.8),
            iptm: gather_all.then_some(0.7),
            plddt_median: gather_all.then_some(88.0),
            query_chains: vec!['A', 'B'],
            target_chains: vec!['C'],
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    const CSV: OutputSettings = OutputSettings {
        format: OutputFormat::Csv,
        header: true,
    };

    #[test]
    fn pae_csv_joins_chain_labels_with_colons() {
        let text = render(|w| write_pae_report(w, &pae_report(true), CSV));
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "model,ch_pae_median,ch_pae_mean,ich_pae_median,ich_pae_mean,ptm,iptm,plddt_median,query_chains,target_chains"
            )
        );
        assert_eq!(lines.next(), Some("model_1,2.0,2.5,4.5,4.25,0.8,0.7,88.0,A:B,C"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn pae_csv_without_header_and_model_scores() {
        let settings = OutputSettings {
            format: OutputFormat::Csv,
            header: false,
        };
        let text = render(|w| write_pae_report(w, &pae_report(false), settings));
        assert_eq!(text, "model_1,2.0,2.5,4.5,4.25,A:B,C\n");
    }

    #[test]
    fn pae_json_is_a_single_line_object() {
        let settings = OutputSettings {
            format: OutputFormat::Json,
            header: true,
        };
        let text = render(|w| write_pae_report(w, &pae_report(false), settings));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ich_pae_median"], 4.5);
        assert_eq!(value["query_chains"], serde_json::json!(["A", "B"]));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn interface_csv_has_one_row() {
        let report = InterfaceReport {
            model: "m".to_string(),
            interface_plddt: 80.0,
            weighted_interface_plddt: 82.5,
            global_plddt: 75.0,
            interface_residues: 12,
            total_area: 410.5,
        };
        let text = render(|w| write_interface_report(w, &report, CSV));
        assert_eq!(
            text,
            "model,interface_plddt,weighted_interface_plddt,global_plddt,interface_residues,total_area\nm,80.0,82.5,75.0,12,410.5\n"
        );
    }

    #[test]
    fn summaries_use_score_file_text_form() {
        let summaries = [ModelSummary {
            name: "ranked_0".to_string(),
            plddt: 90.5,
            ptm: Some(0.85),
            iptm: None,
        }];
        let text = render(|w| write_summaries(w, &summaries, false));
        assert_eq!(text, "# ranked_0\npLDDT 90.5\npTM 0.85\nipTM NA\n");
    }

    #[test]
    fn collected_scores_are_tab_separated_with_empty_missing_values() {
        let rows = [CollectedScores {
            protein: "P1".to_string(),
            model: 1,
            plddt: 81.0,
            ptm: Some(0.5),
            iptm: None,
            voromqa: "0.41".to_string(),
            voromqa_energy: Some("-701".to_string()),
        }];
        let text = render(|w| write_collected_scores(w, &rows));
        assert_eq!(
            text,
            "protein\tmodel\tplddt\tptm\tiptm\tvoromqa\tvoromqa_energy\nP1\t1\t81.0\t0.5\t\t0.41\t-701\n"
        );
    }
}
