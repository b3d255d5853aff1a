//! Final assembly: join the collected entries and write `extracted_text.txt`.

use crate::error::ExtractError;
use crate::output::{OutputEntry, SavedFigure};
use std::fs;
use std::path::Path;
use tracing::info;

/// Build one page's output entries: every saved figure becomes a placeholder
/// first, then every recognised string follows, each group in detector order.
///
/// The pipeline routes all page assembly through here so the
/// figures-before-text contract has a single owner.
pub fn page_entries(figures: &[SavedFigure], texts: Vec<String>) -> Vec<OutputEntry> {
    let mut entries = Vec::with_capacity(figures.len() + texts.len());
    for fig in figures {
        entries.push(OutputEntry::Figure(fig.filename.clone()));
    }
    entries.extend(texts.into_iter().map(OutputEntry::Text));
    entries
}

/// Join all entries with newlines, in collection order.
pub fn assemble(entries: &[OutputEntry]) -> String {
    entries
        .iter()
        .map(OutputEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the assembled text to `path` in one shot.
///
/// Written to a sibling temp file first and renamed into place, so an
/// interrupted run never leaves a truncated output file behind. Any
/// existing file at `path` is replaced.
pub fn write_text(text: &str, path: &Path) -> Result<(), ExtractError> {
    let output_err = |source| ExtractError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let tmp = path.with_extension("txt.tmp");
    fs::write(&tmp, text).map_err(output_err)?;
    fs::rename(&tmp, path).map_err(output_err)?;

    info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn saved(page: usize, index: usize) -> SavedFigure {
        let filename = SavedFigure::filename_for(page, index);
        SavedFigure {
            page,
            index,
            path: PathBuf::from(&filename),
            filename,
        }
    }

    #[test]
    fn page_entries_put_every_figure_before_every_text() {
        let figures = vec![saved(2, 1), saved(2, 2)];
        let texts = vec!["First block.".to_string(), String::new()];

        let entries = page_entries(&figures, texts);
        assert_eq!(
            entries,
            vec![
                OutputEntry::Figure("page_2_image_1.png".to_string()),
                OutputEntry::Figure("page_2_image_2.png".to_string()),
                OutputEntry::Text("First block.".to_string()),
                OutputEntry::Text(String::new()),
            ]
        );

        // Once a text entry appears, no figure may follow on this page.
        let first_text = entries.iter().position(|e| !e.is_figure()).unwrap();
        assert!(entries[first_text..].iter().all(|e| !e.is_figure()));
    }

    #[test]
    fn page_entries_with_one_empty_group() {
        let only_text = page_entries(&[], vec!["body".to_string()]);
        assert_eq!(only_text, vec![OutputEntry::Text("body".to_string())]);

        let only_figures = page_entries(&[saved(1, 1)], Vec::new());
        assert_eq!(
            only_figures,
            vec![OutputEntry::Figure("page_1_image_1.png".to_string())]
        );
    }

    #[test]
    fn entries_join_with_newlines() {
        let entries = vec![
            OutputEntry::Figure("page_1_image_1.png".to_string()),
            OutputEntry::Text("First paragraph.".to_string()),
            OutputEntry::Text(String::new()),
            OutputEntry::Text("Second paragraph.".to_string()),
        ];
        assert_eq!(
            assemble(&entries),
            "[Image: page_1_image_1.png]\nFirst paragraph.\n\nSecond paragraph."
        );
    }

    #[test]
    fn no_entries_assemble_to_empty_string() {
        assert_eq!(assemble(&[]), "");
    }

    #[test]
    fn write_creates_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_text.txt");

        write_text("hello\nworld", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld");
        assert!(!path.with_extension("txt.tmp").exists());
    }

    #[test]
    fn write_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_text.txt");

        write_text("old contents", &path).unwrap();
        write_text("new", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("extracted_text.txt");
        let err = write_text("x", &path).unwrap_err();
        assert!(matches!(err, ExtractError::OutputWrite { .. }));
    }
}
