use clap::Args;
use contact_clean::config::{parse_delimiter, AppConfig, TextEncoding};
use contact_clean::error::AppError;
use contact_clean::telemetry;
use contact_clean::workflows::contacts::{
    self, Civility, CleaningSummary, NameSplitter, ReferenceNameSet, SplitResult,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct CleanArgs {
    /// Contact export to clean (overrides CONTACTS_INPUT_PATH)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Reference first-name list (overrides CONTACTS_FIRST_NAMES_PATH)
    #[arg(long)]
    pub(crate) first_names: Option<PathBuf>,
    /// Destination of the cleaned CSV (overrides CONTACTS_OUTPUT_PATH)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Field delimiter of the contact export, e.g. ',' or ';'
    #[arg(long, value_parser = parse_delimiter_arg)]
    pub(crate) input_delimiter: Option<u8>,
    /// Character encoding of the contact export: 'utf8' or 'latin1'
    #[arg(long, value_parser = parse_encoding_arg)]
    pub(crate) input_encoding: Option<TextEncoding>,
    /// Print the run summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SplitArgs {
    /// Interlocutor strings to split, e.g. "Mme DUPONT Marie"
    #[arg(required = true)]
    pub(crate) interlocutors: Vec<String>,
    /// Reference first-name list (overrides CONTACTS_FIRST_NAMES_PATH)
    #[arg(long)]
    pub(crate) first_names: Option<PathBuf>,
}

fn parse_delimiter_arg(raw: &str) -> Result<u8, String> {
    parse_delimiter(raw).ok_or_else(|| format!("'{raw}' is not a single ASCII character"))
}

fn parse_encoding_arg(raw: &str) -> Result<TextEncoding, String> {
    TextEncoding::parse(raw).ok_or_else(|| format!("'{raw}' is not 'utf8' or 'latin1'"))
}

pub(crate) fn run_clean(args: CleanArgs) -> Result<(), AppError> {
    let CleanArgs {
        input,
        first_names,
        output,
        input_delimiter,
        input_encoding,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(input) = input {
        config.pipeline.input_path = input;
    }
    if let Some(first_names) = first_names {
        config.pipeline.first_names_path = first_names;
    }
    if let Some(output) = output {
        config.pipeline.output_path = output;
    }
    if let Some(delimiter) = input_delimiter {
        config.pipeline.input_delimiter = delimiter;
    }
    if let Some(encoding) = input_encoding {
        config.pipeline.input_encoding = encoding;
    }

    info!(environment = ?config.environment, "starting contact cleaning");
    let summary = contacts::run(&config.pipeline)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary, &config.pipeline.output_path));
    }

    Ok(())
}

pub(crate) fn run_split(args: SplitArgs) -> Result<(), AppError> {
    let SplitArgs {
        interlocutors,
        first_names,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let path = first_names.unwrap_or(config.pipeline.first_names_path);
    let names = ReferenceNameSet::from_path(&path, config.pipeline.first_names_encoding)?;
    info!(names = names.len(), path = %path.display(), "reference first names loaded");

    let splitter = NameSplitter::new(&names);
    for interlocutor in interlocutors.iter().map(String::as_str) {
        let civility = Civility::detect(Some(interlocutor));
        let split = splitter.split(Some(interlocutor));
        println!("{}", render_split(interlocutor, civility, &split));
    }

    Ok(())
}

fn render_summary(summary: &CleaningSummary, output: &std::path::Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Contact cleaning summary");
    let _ = writeln!(
        out,
        "- {} rows cleaned | {} flagged for review",
        summary.total_rows, summary.flagged_rows
    );
    let _ = writeln!(
        out,
        "- {} of {} first names recognised ({:.1}%) against {} reference names",
        summary.recognised_first_names,
        summary.total_rows,
        summary.recognition_rate * 100.0,
        summary.reference_names
    );

    if !summary.split_methods.is_empty() {
        let _ = writeln!(out, "Split methods:");
        for entry in &summary.split_methods {
            let _ = writeln!(out, "  - {}: {}", entry.method.label(), entry.rows);
        }
    }

    if !summary.missing_fields.is_empty() {
        let _ = writeln!(out, "Missing fields:");
        for entry in &summary.missing_fields {
            let _ = writeln!(out, "  - {}: {}", entry.reason, entry.rows);
        }
    }

    if !summary.unrecognised_samples.is_empty() {
        let _ = writeln!(out, "Unrecognised first names (sample):");
        for sample in &summary.unrecognised_samples {
            let _ = writeln!(
                out,
                "  - {} -> {}",
                sample.interlocutor.as_deref().unwrap_or("-"),
                sample.first_name.as_deref().unwrap_or("-")
            );
        }
    }

    let _ = writeln!(out, "Output written to {}", output.display());
    out
}

fn render_split(interlocutor: &str, civility: Option<Civility>, split: &SplitResult) -> String {
    let gender = civility.and_then(Civility::gender);
    format!(
        "{interlocutor} => civility: {} | gender: {} | first: {} | last: {} | method: {}",
        civility.map(Civility::label).unwrap_or("-"),
        gender.map(|gender| gender.label()).unwrap_or("-"),
        split.first_name.as_deref().unwrap_or("-"),
        split.last_name.as_deref().unwrap_or("-"),
        split.method.label()
    )
}
