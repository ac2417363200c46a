use crate::models::files::FileMetadata;

const HEADERS: [&str; 3] = ["NAME", "SIZE", "CONTENT TYPE"];

/// Render the file table: one row per cached entry, in cache order.
pub fn render_table(files: &[FileMetadata]) -> String {
    if files.is_empty() {
        return "No files uploaded yet.".to_string();
    }

    let rows: Vec<[String; 3]> = files
        .iter()
        .map(|file| {
            [
                file.name.clone(),
                file.size.to_string(),
                file.content_type.clone(),
            ]
        })
        .collect();

    let mut widths = [HEADERS[0].len(), HEADERS[1].len(), HEADERS[2].len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = format_row(&HEADERS.map(str::to_string), &widths);
    for row in &rows {
        output.push('\n');
        output.push_str(&format_row(row, &widths));
    }
    output
}

fn format_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    format!(
        "{:<name$}  {:>size$}  {:<ct$}",
        cells[0],
        cells[1],
        cells[2],
        name = widths[0],
        size = widths[1],
        ct = widths[2],
    )
    .trim_end()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(id: &str, name: &str, size: u64, content_type: &str) -> FileMetadata {
        FileMetadata {
            id: id.into(),
            name: name.into(),
            size,
            content_type: content_type.into(),
            is_indexed: None,
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_table(&[]), "No files uploaded yet.");
    }

    #[test]
    fn rows_follow_cache_order() {
        let files = vec![
            metadata("a", "x.txt", 10, "text/plain"),
            metadata("b", "y.txt", 20, "text/plain"),
        ];
        let rendered = render_table(&files);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("x.txt"));
        assert!(lines[2].starts_with("y.txt"));
    }

    #[test]
    fn columns_align_to_longest_cell() {
        let files = vec![
            metadata("a", "a-very-long-name.tar", 1048576, "application/x-tar"),
            metadata("b", "b.txt", 1, "text/plain"),
        ];
        let rendered = render_table(&files);
        let lines: Vec<_> = rendered.lines().collect();
        let type_column = lines[0].find("CONTENT TYPE").unwrap();
        assert_eq!(lines[1].find("application/x-tar"), Some(type_column));
        assert_eq!(lines[2].find("text/plain"), Some(type_column));
    }
}
