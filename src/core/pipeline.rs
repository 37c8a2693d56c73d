use crate::core::expression::evaluate_detailed;
use crate::core::{BatchRecord, BatchReport, ConfigProvider, ExpressionLine, Pipeline, Result, Storage};
use crate::domain::model::{OutputFormat, Outcome};
use crate::utils::error::CalcError;
use chrono::Utc;

const HEADER: [&str; 6] = ["line", "expression", "status", "result", "steps", "error"];

/// Evaluates one expression per input line and writes a report per output format.
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Splits input text into expression lines, skipping blank lines and `#` comments.
pub fn parse_input(content: &str) -> Vec<ExpressionLine> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                None
            } else {
                Some(ExpressionLine {
                    line: idx + 1,
                    text: text.to_string(),
                })
            }
        })
        .collect()
}

fn row(record: &BatchRecord) -> [String; 6] {
    let (status, result, steps, error) = match &record.outcome {
        Outcome::Ok(evaluation) => (
            "ok",
            evaluation.result.to_string(),
            evaluation.steps(),
            String::new(),
        ),
        Outcome::Error { message } => ("error", String::new(), String::new(), message.clone()),
    };
    [
        record.line.to_string(),
        record.expression.clone(),
        status.to_string(),
        result,
        steps,
        error,
    ]
}

fn render_delimited(report: &BatchReport, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in &report.records {
        writer.write_record(row(record))?;
    }

    writer
        .into_inner()
        .map_err(|e| CalcError::IoError(e.into_error()))
}

pub fn render(report: &BatchReport, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_delimited(report, b','),
        OutputFormat::Tsv => render_delimited(report, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    fn extract(&self) -> Result<Vec<ExpressionLine>> {
        tracing::debug!("Reading expressions from: {}", self.config.input_path());
        let content = self.storage.read_to_string(self.config.input_path())?;
        Ok(parse_input(&content))
    }

    fn transform(&self, lines: Vec<ExpressionLine>) -> Result<BatchReport> {
        let records = lines
            .into_iter()
            .map(|line| {
                let outcome = match evaluate_detailed(&line.text) {
                    Ok(evaluation) => Outcome::Ok(evaluation),
                    Err(e) => {
                        tracing::warn!("Line {}: {}", line.line, e);
                        Outcome::Error {
                            message: e.user_friendly_message(),
                        }
                    }
                };
                BatchRecord {
                    line: line.line,
                    expression: line.text,
                    outcome,
                }
            })
            .collect();

        Ok(BatchReport {
            name: self.config.batch_name().to_string(),
            generated_at: Utc::now(),
            records,
        })
    }

    fn load(&self, report: BatchReport) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for format in self.config.output_formats() {
            let filename = format!("{}.{}", self.config.output_stem(), format.extension());
            let data = render(&report, format)?;
            tracing::debug!("Writing {} ({} bytes)", filename, data.len());
            self.storage.write_file(&filename, &data)?;
            written.push(filename);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .unwrap()
                .insert(path.to_string(), content.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .map(|data| String::from_utf8(data.clone()).unwrap())
        }
    }

    impl Storage for MockStorage {
        fn read_to_string(&self, path: &str) -> Result<String> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
                .ok_or_else(|| {
                    CalcError::IoError(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ))
                })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        formats: Vec<OutputFormat>,
    }

    impl ConfigProvider for MockConfig {
        fn batch_name(&self) -> &str {
            "mock"
        }

        fn input_path(&self) -> &str {
            "input.txt"
        }

        fn output_formats(&self) -> Vec<OutputFormat> {
            self.formats.clone()
        }

        fn output_stem(&self) -> &str {
            "report"
        }
    }

    fn pipeline(input: &str, formats: Vec<OutputFormat>) -> BatchPipeline<MockStorage, MockConfig> {
        BatchPipeline::new(
            MockStorage::with_file("input.txt", input),
            MockConfig { formats },
        )
    }

    #[test]
    fn test_parse_input_skips_blank_and_comments() {
        let lines = parse_input("# header\nC(10,3)\n\n   \n  P(5,2)  \n#C(1,1)\n");
        assert_eq!(
            lines,
            vec![
                ExpressionLine {
                    line: 2,
                    text: "C(10,3)".to_string()
                },
                ExpressionLine {
                    line: 5,
                    text: "P(5,2)".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_extract_missing_input() {
        let p = BatchPipeline::new(
            MockStorage::default(),
            MockConfig {
                formats: vec![OutputFormat::Csv],
            },
        );
        assert!(matches!(p.extract(), Err(CalcError::IoError(_))));
    }

    #[test]
    fn test_transform_keeps_failures() {
        let p = pipeline("C(10,3)\nnonsense\nC(4,2) and P(3,1)\n", vec![]);
        let lines = p.extract().unwrap();
        let report = p.transform(lines).unwrap();

        assert_eq!(report.name, "mock");
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);

        match &report.records[2].outcome {
            Outcome::Ok(evaluation) => assert_eq!(evaluation.result, 18),
            other => panic!("unexpected outcome: {:?}", other),
        }
        match &report.records[1].outcome {
            Outcome::Error { message } => assert!(message.contains("C(10,3)")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_load_writes_each_format() {
        let p = pipeline(
            "C(10,3)\nbad\n",
            vec![OutputFormat::Csv, OutputFormat::Tsv, OutputFormat::Json],
        );
        let report = p.transform(p.extract().unwrap()).unwrap();
        let written = p.load(report).unwrap();
        assert_eq!(written, vec!["report.csv", "report.tsv", "report.json"]);

        let csv = p.storage.get_file("report.csv").unwrap();
        let csv_lines: Vec<&str> = csv.lines().collect();
        assert_eq!(csv_lines[0], "line,expression,status,result,steps,error");
        assert_eq!(csv_lines[1], "1,\"C(10,3)\",ok,120,\"C(10,3)=120\",");
        assert!(csv_lines[2].starts_with("2,bad,error,,,"));

        let tsv = p.storage.get_file("report.tsv").unwrap();
        assert!(tsv.lines().nth(1).unwrap().starts_with("1\tC(10,3)\tok\t120"));

        let json: serde_json::Value =
            serde_json::from_str(&p.storage.get_file("report.json").unwrap()).unwrap();
        assert_eq!(json["name"], "mock");
        assert_eq!(json["records"][0]["status"], "ok");
        assert_eq!(json["records"][0]["result"], 120);
        assert_eq!(json["records"][1]["status"], "error");
    }
}
