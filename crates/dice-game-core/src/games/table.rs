//! Text rendering of the win-probability matrix shown on help.

use super::dice::DiceSet;
use super::win::win_matrix;

const CORNER: &str = "User dice v";

/// Render a table whose cell at (row, column) is the chance that the row
/// die beats the column die. The diagonal is marked with a dash.
pub fn probability_table(set: &DiceSet) -> String {
    let labels: Vec<String> = set.iter().map(|(_, d)| d.to_string()).collect();
    let matrix = win_matrix(set);

    let cells: Vec<Vec<String>> = matrix
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, chance)| {
                    if r == c {
                        format!("- ({chance})")
                    } else {
                        chance.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let first_width = labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(CORNER.len()))
        .max()
        .unwrap_or(CORNER.len());
    let widths: Vec<usize> = (0..labels.len())
        .map(|c| {
            cells
                .iter()
                .map(|row| row[c].len())
                .chain(std::iter::once(labels[c].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = {
        let mut line = format!("+{}", "-".repeat(first_width + 2));
        for w in &widths {
            line.push_str(&format!("+{}", "-".repeat(w + 2)));
        }
        line.push('+');
        line
    };

    let row_line = |first: &str, rest: &[String]| {
        let mut line = format!("| {first:<first_width$} ");
        for (value, w) in rest.iter().zip(&widths) {
            line.push_str(&format!("| {value:<w$} "));
        }
        line.push('|');
        line
    };

    let mut out = vec![
        "Probability of the win for the user:".to_string(),
        separator.clone(),
        row_line(CORNER, &labels),
        separator.clone(),
    ];
    for (label, row) in labels.iter().zip(&cells) {
        out.push(row_line(label, row));
    }
    out.push(separator);
    out.join("\n")
}
