use std::io::{self, Read};

use crate::api::models::UploadedFile;
use crate::cli::AnalyzeArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::triage::{Draft, EmailRecord, SubmissionController, TriageStore};

pub async fn run(ctx: &AppContext, args: AnalyzeArgs) -> AppResult<()> {
    let draft = read_draft(args)?;
    let mut controller = SubmissionController::with_draft(draft);
    let mut store = TriageStore::new();

    let id = controller.submit(&ctx.classifier, &mut store).await?;
    let record = store
        .find(id)
        .ok_or_else(|| AppError::Invariant(format!("email {id} missing after ingest")))?;

    ctx.output.emit_lines(&format_record(record), record)
}

fn read_draft(args: AnalyzeArgs) -> AppResult<Draft> {
    if let Some(path) = args.file {
        return Ok(Draft {
            text: String::new(),
            file: Some(UploadedFile::load(&path)?),
        });
    }

    let text = if args.stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.text.unwrap_or_default()
    };

    Ok(Draft { text, file: None })
}

fn format_record(record: &EmailRecord) -> Vec<String> {
    let mut lines = vec![
        format!("{} [{}]", record.subject(), record.category()),
        String::new(),
    ];

    match record.original_file_name() {
        Some(name) => lines.push(format!(
            "file: {name} ({})",
            record.original_file_type().unwrap_or("unknown")
        )),
        None => {
            lines.push("original:".to_string());
            lines.extend(record.body().lines().map(|line| format!("   {line}")));
        }
    }

    lines.push(String::new());
    lines.push("suggested response:".to_string());
    if record.suggested_response().trim().is_empty() {
        lines.push("   (none)".to_string());
    } else {
        lines.extend(
            record
                .suggested_response()
                .lines()
                .map(|line| format!("   {line}")),
        );
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{Category, OriginalSubmission};

    fn record(file: bool, reply: &str) -> EmailRecord {
        let original = OriginalSubmission {
            subject: "Status do chamado...".to_string(),
            body: "Status do chamado\n12345?".to_string(),
            original_file_name: file.then(|| "pedido.pdf".to_string()),
            original_file_type: file.then(|| "application/pdf".to_string()),
        };
        EmailRecord::new(original, Category::Productive, reply)
    }

    #[test]
    fn formats_text_record_with_indented_body() {
        let lines = format_record(&record(false, "Verificando..."));
        assert_eq!(lines[0], "Status do chamado... [productive]");
        assert!(lines.contains(&"   12345?".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("   Verificando..."));
    }

    #[test]
    fn formats_file_record_and_empty_reply() {
        let lines = format_record(&record(true, ""));
        assert!(lines.contains(&"file: pedido.pdf (application/pdf)".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("   (none)"));
    }

    #[test]
    fn text_flag_becomes_text_draft() {
        let draft = read_draft(AnalyzeArgs {
            text: Some("hello".to_string()),
            file: None,
            stdin: false,
        })
        .expect("draft");
        assert_eq!(draft.text, "hello");
        assert!(draft.file.is_none());
    }

    #[test]
    fn rejects_unsupported_file_extension() {
        let result = read_draft(AnalyzeArgs {
            text: None,
            file: Some("notes.docx".into()),
            stdin: false,
        });
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
