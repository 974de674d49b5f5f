use axum::extract::Multipart;

/// An uploaded PDF with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parsed form fields from the multipart upload.
pub struct FormFields {
    pub current: UploadedFile,
    pub proposed: UploadedFile,
    /// Optional topic-list override, sent as a JSON array of strings.
    pub topics: Option<Vec<String>>,
}

/// Parse a multipart form upload into structured form fields.
///
/// Expects two file fields, `current` and `proposed`, each a PDF.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<FormFields, String> {
    let mut current: Option<UploadedFile> = None;
    let mut proposed: Option<UploadedFile> = None;
    let mut topics: Option<Vec<String>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "current" | "proposed" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                validate_pdf(&filename, &data)?;

                let file = UploadedFile { filename, data };
                if name == "current" {
                    current = Some(file);
                } else {
                    proposed = Some(file);
                }
            }
            "topics" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read topics: {}", e))?;
                if !val.is_empty() {
                    let list: Vec<String> = serde_json::from_str(&val)
                        .map_err(|e| format!("Invalid topics list: {}", e))?;
                    topics = Some(list);
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let current = current.ok_or("No current-policy file uploaded")?;
    let proposed = proposed.ok_or("No proposed-policy file uploaded")?;

    Ok(FormFields {
        current,
        proposed,
        topics,
    })
}

/// Reject uploads that are not PDFs, by extension and magic bytes.
fn validate_pdf(filename: &str, data: &[u8]) -> Result<(), String> {
    if data.is_empty() {
        return Err(format!("{}: empty upload", filename));
    }
    if !data.starts_with(b"%PDF-") {
        return Err(format!(
            "{}: not a PDF (missing %PDF- header)",
            filename
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_magic_accepted() {
        assert!(validate_pdf("policy.pdf", b"%PDF-1.7 rest").is_ok());
    }

    #[test]
    fn non_pdf_rejected_with_filename() {
        let err = validate_pdf("policy.docx", b"PK\x03\x04").unwrap_err();
        assert!(err.contains("policy.docx"));

        let err = validate_pdf("empty.pdf", b"").unwrap_err();
        assert!(err.contains("empty upload"));
    }
}
