use std::io::{self, Write};

/// Writes a board as a table with 1-based row numbers and a column ruler.
///
/// ```text
///  |123|
/// -|---|
/// 1|.*.|
/// 2|/1.|
/// -|---|
/// ```
///
/// Columns past the ninth are labelled by their last digit so every cell
/// stays one character wide.
pub fn write_table<W: Write>(out: &mut W, rows: &[String]) -> io::Result<()> {
    let cols = rows.first().map_or(0, |row| row.chars().count());
    let width = rows.len().to_string().len();

    let header: String = (1..=cols)
        .map(|col| char::from(b'0' + (col % 10) as u8))
        .collect();
    let rule = format!("{}|{}|", "-".repeat(width), "-".repeat(cols));

    writeln!(out)?;
    writeln!(out, "{:width$}|{}|", "", header)?;
    writeln!(out, "{rule}")?;
    for (number, row) in rows.iter().enumerate() {
        writeln!(out, "{:>width$}|{}|", number + 1, row)?;
    }
    writeln!(out, "{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&str]) -> String {
        let rows: Vec<String> = rows.iter().map(|row| row.to_string()).collect();
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn small_board() {
        assert_eq!(
            table(&[".*.", "/1."]),
            "\n |123|\n-|---|\n1|.*.|\n2|/1.|\n-|---|\n"
        );
    }

    #[test]
    fn row_numbers_are_right_aligned() {
        let rows = vec![".."; 10];
        let out = table(&rows);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[1], "  |12|");
        assert_eq!(lines[2], "--|--|");
        assert_eq!(lines[3], " 1|..|");
        assert_eq!(lines[12], "10|..|");
    }

    #[test]
    fn wide_boards_wrap_column_labels() {
        let out = table(&["............"]);
        assert_eq!(out.lines().nth(1), Some(" |123456789012|"));
    }
}
