// src/output.rs
//! Text and CSV forms of path matrices and pricing summaries
//!
//! Matrix text form:
//! ```text
//! <rows> <columns>
//! a00 a01 ... a0c
//! ...
//! ```
//! Row fields may be separated by whitespace or commas.

use crate::error::{McError, McResult};
use crate::linalg::{Element, Matrix};
use crate::mc::stats::PricingResult;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Header line followed by one space-separated row per line
pub fn write_matrix_text<T, W>(out: &mut W, matrix: &Matrix<T>) -> McResult<()>
where
    T: Element + Display,
    W: Write,
{
    writeln!(out, "{} {}", matrix.rows(), matrix.columns())?;
    write!(out, "{}", matrix)?;
    Ok(())
}

/// Parse the text form written by [`write_matrix_text`]
pub fn read_matrix_text<T, R>(input: R) -> McResult<Matrix<T>>
where
    T: Element + FromStr,
    T::Err: Display,
    R: BufRead,
{
    let mut lines = input.lines().enumerate();

    let (_, header) = lines.next().ok_or_else(|| McError::Parse {
        line: 1,
        reason: "missing header".to_string(),
    })?;
    let header = header?;
    let dims: Vec<usize> = split_fields(&header)
        .map(|f| {
            f.parse::<usize>().map_err(|e| McError::Parse {
                line: 1,
                reason: format!("bad dimension '{}': {}", f, e),
            })
        })
        .collect::<McResult<_>>()?;
    let (rows, columns) = match dims.as_slice() {
        [rows, columns] => (*rows, *columns),
        _ => {
            return Err(McError::Parse {
                line: 1,
                reason: format!("expected 'rows columns', got '{}'", header),
            })
        }
    };

    if rows.checked_mul(columns).is_none() {
        return Err(McError::Parse {
            line: 1,
            reason: format!("{} x {} elements overflow", rows, columns),
        });
    }

    // grown per parsed row; the header alone does not size the buffer
    let mut values = Vec::new();
    for (idx, line) in lines.take(rows) {
        let line = line?;
        let before = values.len();
        for field in split_fields(&line) {
            let value = field.parse::<T>().map_err(|e| McError::Parse {
                line: idx + 1,
                reason: format!("bad value '{}': {}", field, e),
            })?;
            values.push(value);
        }
        if values.len() - before != columns {
            return Err(McError::dimension_mismatch(
                "matrix text row",
                columns,
                values.len() - before,
            ));
        }
    }

    Matrix::from_row_major(rows, columns, &values)
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
}

/// Comma-separated rows, one path per line, no header
pub fn write_matrix_csv<T, W>(out: &mut W, matrix: &Matrix<T>) -> McResult<()>
where
    T: Element + Display,
    W: Write,
{
    for row in matrix.row_iter() {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", fields.join(","))?;
    }
    Ok(())
}

pub fn write_paths_to_csv<T>(filename: impl AsRef<Path>, matrix: &Matrix<T>) -> McResult<()>
where
    T: Element + Display,
{
    let mut file = BufWriter::new(File::create(filename)?);
    write_matrix_csv(&mut file, matrix)?;
    file.flush()?;
    Ok(())
}

pub fn read_matrix_file<T>(filename: impl AsRef<Path>) -> McResult<Matrix<T>>
where
    T: Element + FromStr,
    T::Err: Display,
{
    read_matrix_text(BufReader::new(File::open(filename)?))
}

/// `key,value` lines describing one pricing run
pub fn write_summary<W: Write>(
    out: &mut W,
    label: &str,
    result: &PricingResult,
    generated_at: DateTime<Utc>,
) -> io::Result<()> {
    writeln!(out, "key,value")?;
    writeln!(out, "option,{}", label)?;
    writeln!(out, "generated_at,{}", generated_at.to_rfc3339())?;
    writeln!(out, "n_sim,{}", result.n_sim)?;
    writeln!(out, "confidence,{}", result.confidence)?;
    for (name, value) in result.to_map() {
        writeln!(out, "{},{}", name, value)?;
    }
    Ok(())
}

pub fn write_summary_to_csv(
    filename: impl AsRef<Path>,
    label: &str,
    result: &PricingResult,
) -> McResult<()> {
    let mut file = File::create(filename)?;
    write_summary(&mut file, label, result, Utc::now())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Vector;
    use chrono::TimeZone;

    #[test]
    fn test_text_round_trip() {
        let m = Matrix::from_row_major(2, 3, &[1.5, 2.0, 3.0, 4.0, 5.0, 6.25]).unwrap();
        let mut buf = Vec::new();
        write_matrix_text(&mut buf, &m).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "2 3\n1.5 2 3\n4 5 6.25\n");

        let back: Matrix<f64> = read_matrix_text(buf.as_slice()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_read_comma_separated() {
        let text = "2 2\n1,2\n3, 4\n";
        let m: Matrix<i32> = read_matrix_text(text.as_bytes()).unwrap();
        assert_eq!(m.row(1).unwrap().to_vec(), vec![3, 4]);
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            read_matrix_text::<f64, _>("".as_bytes()),
            Err(McError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            read_matrix_text::<f64, _>("2\n".as_bytes()),
            Err(McError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            read_matrix_text::<f64, _>("1 2\n1 x\n".as_bytes()),
            Err(McError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            read_matrix_text::<f64, _>("1 3\n1 2\n".as_bytes()),
            Err(McError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            read_matrix_text::<f64, _>("18446744073709551615 2\n1 2\n".as_bytes()),
            Err(McError::Parse { line: 1, .. })
        ));
        // huge but representable header, input runs out early
        assert!(matches!(
            read_matrix_text::<f64, _>("1000000000 2\n1 2\n".as_bytes()),
            Err(McError::DimensionMismatch { .. })
        ));
        // fewer rows than announced
        assert!(matches!(
            read_matrix_text::<f64, _>("2 1\n1\n".as_bytes()),
            Err(McError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_csv() {
        let m = Matrix::from_row_major(2, 2, &[1.0, 2.5, 3.0, 4.0]).unwrap();
        let mut buf = Vec::new();
        write_matrix_csv(&mut buf, &m).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1,2.5\n3,4\n");
    }

    #[test]
    fn test_summary() {
        let result = PricingResult::from_payoffs(&Vector::from(vec![1.0, 3.0])).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut buf = Vec::new();
        write_summary(&mut buf, "European Call", &result, at).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("key,value\noption,European Call\n"));
        assert!(text.contains("generated_at,2024-01-02T03:04:05+00:00"));
        assert!(text.contains("mean,2\n"));
        assert!(text.contains("n_sim,2\n"));
    }
}
