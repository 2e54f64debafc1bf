//! Plain-text rendering of result pages and option lists.

use alumni_client::api::search::{SearchController, SearchState};
use alumni_common::{alumni_record::AlumniRecord, pagination::render_window, select_option::SelectOption};

const COLUMNS: [&str; 6] = ["Name", "Roll No", "Entry", "Program", "Organization", "LinkedIn"];

fn row_cells(record: &AlumniRecord) -> [String; 6] {
    [
        record.name.clone(),
        record.roll_number.clone(),
        record.year_of_entry.map(|year| year.to_string()).unwrap_or_else(|| "-".to_string()),
        record.program_name.clone().unwrap_or_default(),
        record.last_organization.clone().unwrap_or_default(),
        record.linkedin_url(),
    ]
}

pub fn render_table(rows: &[AlumniRecord]) -> String {
    let cells = rows.iter().map(row_cells).collect::<Vec<_>>();
    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |values: Vec<&str>| {
        values
            .iter()
            .zip(widths.iter())
            .map(|(value, width)| format!("{value:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(COLUMNS.to_vec())];
    lines.push(widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>().join("  "));
    for row in &cells {
        lines.push(format_line(row.iter().map(|cell| cell.as_str()).collect()));
    }
    lines.join("\n")
}

/// Everything shown after a search: the table, a summary line, and the page window.
pub fn render_search(controller: &SearchController) -> String {
    match controller.state() {
        SearchState::Idle => "No search performed.".to_string(),
        SearchState::Loading { page } => format!("Loading page {page}..."),
        SearchState::EmptyResults { .. } => "No alumni found matching your filters.".to_string(),
        SearchState::Failed { message, .. } => message.clone(),
        SearchState::Populated(page) => {
            let window = render_window(&controller.pagination_window(), controller.current_page());
            format!(
                "{}\n\n{} alumni found, {} shown on page {}\nPages: {}",
                render_table(&page.rows),
                page.total_count,
                page.rows.len(),
                page.page,
                window
            )
        }
    }
}

pub fn render_options(options: &[SelectOption]) -> String {
    options
        .iter()
        .map(|option| if option.value == option.label { option.label.clone() } else { format!("{:<4} {}", option.value, option.label) })
        .collect::<Vec<_>>()
        .join("\n")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_columns_are_aligned() {
        let rows = vec![
            AlumniRecord { name: "Asha Rao".into(), roll_number: "R1".into(), year_of_entry: Some(2005), ..Default::default() },
            AlumniRecord { name: "Li".into(), roll_number: "2010BCS-100".into(), linked_in: Some("linkedin.com/in/li".into()), ..Default::default() },
        ];
        let table = render_table(&rows);
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name      Roll No"));
        assert!(lines[2].starts_with("Asha Rao  R1           2005"));
        assert!(lines[3].ends_with("https://linkedin.com/in/li"));
    }

    #[test]
    fn options_show_code_when_it_differs() {
        let text = render_options(&[SelectOption::new("IN", "India"), SelectOption::same("Gwalior")]);
        assert_eq!(text, "IN   India\nGwalior");
    }
}
