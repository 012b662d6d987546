// Document Loader
// Reads meeting notes from plain text or .docx files

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse .docx: {0}")]
    Docx(String),
    #[error("{path} is not valid UTF-8 text")]
    Encoding { path: PathBuf },
}

/// Text of one body paragraph. Runs are concatenated; shapes and drawings
/// anchored inside a run (text boxes, images) are not part of the line.
fn paragraph_text(para: &Paragraph) -> String {
    let mut line = String::new();
    for child in &para.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for rc in &run.children {
            match rc {
                RunChild::Text(t) => line.push_str(&t.text),
                RunChild::Tab(_) => line.push('\t'),
                RunChild::Break(_) => line.push('\n'),
                _ => {}
            }
        }
    }
    line
}

/// Extract paragraph text from a .docx archive, one line per body paragraph
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, LoadError> {
    let docx = read_docx(bytes).map_err(|e| LoadError::Docx(format!("{:?}", e)))?;

    let lines: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    debug!(paragraphs = lines.len(), "docx.extracted");
    Ok(lines.join("\n"))
}

/// Load notes from `path`. `.docx` is unpacked; anything else is read as UTF-8.
pub fn load_notes(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_docx = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("docx"))
        .unwrap_or(false);

    if is_docx {
        return extract_docx_text(&bytes);
    }

    String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use std::io::{Cursor, Read, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn sample_docx() -> Vec<u8> {
        pack(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Weekly sync")))
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text("We decided to ship"))
                        .add_run(Run::new().add_text(" on Friday.")),
                )
                .add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text("Q&A: who owns \"billing\"?")),
                )
                .add_paragraph(Paragraph::new())
                .add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text("Owner").add_tab().add_text("Sam")),
                ),
        )
    }

    /// Copy a packed document, swapping in a hand-written word/document.xml
    fn with_document_xml(bytes: &[u8], document_xml: &str) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let name = entry.name().to_string();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            writer.start_file(name.as_str(), SimpleFileOptions::default()).unwrap();
            if name == "word/document.xml" {
                writer.write_all(document_xml.as_bytes()).unwrap();
            } else {
                writer.write_all(&content).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_docx_paragraphs() {
        let text = extract_docx_text(&sample_docx()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Weekly sync",
                "We decided to ship on Friday.",
                "Q&A: who owns \"billing\"?",
                "",
                "Owner\tSam",
            ]
        );
    }

    #[test]
    fn test_text_box_inside_paragraph_keeps_trailing_runs() {
        let document_xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body><w:p><w:r><w:t>We decided to ship on Friday</w:t></w:r><w:r><w:pict><v:shape id="box1" style="width:120pt;height:40pt"><v:textbox><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></v:textbox></v:shape></w:pict></w:r><w:r><w:t>. Owner: Sam.</w:t></w:r></w:p><w:p><w:r><w:t>Who signs the contract?</w:t></w:r></w:p></w:body></w:document>"#;
        let bytes = with_document_xml(&sample_docx(), document_xml);

        let text = extract_docx_text(&bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("We decided to ship on Friday"), "{:?}", lines);
        assert!(lines[0].ends_with(". Owner: Sam."), "{:?}", lines);
        assert_eq!(lines.last(), Some(&"Who signs the contract?"));
    }

    #[test]
    fn test_not_a_docx() {
        assert!(matches!(extract_docx_text(b"plain text"), Err(LoadError::Docx(_))));
    }

    #[test]
    fn test_load_notes_by_extension() {
        let dir = TempDir::new().unwrap();

        let txt = dir.path().join("notes.txt");
        fs::write(&txt, "Action: update the wiki.\n").unwrap();
        assert_eq!(load_notes(&txt).unwrap(), "Action: update the wiki.\n");

        let docx = dir.path().join("notes.DOCX");
        fs::write(&docx, sample_docx()).unwrap();
        assert!(load_notes(&docx).unwrap().starts_with("Weekly sync\n"));
    }

    #[test]
    fn test_load_notes_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.txt");
        assert!(matches!(load_notes(&missing), Err(LoadError::Io { .. })));

        let binary = dir.path().join("blob.txt");
        fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(load_notes(&binary), Err(LoadError::Encoding { .. })));
    }
}
