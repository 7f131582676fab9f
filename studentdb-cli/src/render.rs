//! Plain-text tables for the console

use std::io::{self, Write};

use studentdb_core::models::{Student, DATE_FORMAT};

const RULE_WIDTH: usize = 80;

pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Write the student table, or a placeholder line when there are none.
pub fn write_students(out: &mut impl Write, students: &[Student]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule('=', RULE_WIDTH))?;
    writeln!(out, "ALL STUDENTS")?;
    writeln!(out, "{}", rule('=', RULE_WIDTH))?;
    writeln!(
        out,
        "{:<5} {:<15} {:<15} {:<30} {:<15}",
        "ID", "First Name", "Last Name", "Email", "Enrollment Date"
    )?;
    writeln!(out, "{}", rule('-', RULE_WIDTH))?;

    if students.is_empty() {
        writeln!(out, "No students found in the database.")?;
    } else {
        for student in students {
            let enrolled = student
                .enrollment_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "{:<5} {:<15} {:<15} {:<30} {}",
                student.student_id, student.first_name, student.last_name, student.email, enrolled
            )?;
        }
        writeln!(out)?;
        writeln!(out, "Total students: {}", students.len())?;
    }

    writeln!(out, "{}", rule('=', RULE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn render(students: &[Student]) -> String {
        let mut buf = Vec::new();
        write_students(&mut buf, students).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_table() {
        let text = render(&[]);
        assert!(text.contains("No students found in the database."));
        assert!(!text.contains("Total students"));
    }

    #[test]
    fn rows_and_total() {
        let students = vec![
            Student {
                student_id: 1,
                first_name: "Alice".into(),
                last_name: "Johnson".into(),
                email: "alice@x.com".into(),
                enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            },
            Student {
                student_id: 2,
                first_name: "Bob".into(),
                last_name: "Smith".into(),
                email: "bob@x.com".into(),
                enrollment_date: None,
            },
        ];
        let text = render(&students);

        let alice = text.lines().find(|l| l.starts_with("1 ")).unwrap();
        assert!(alice.contains("Alice"));
        assert!(alice.ends_with("2024-01-15"));

        let bob = text.lines().find(|l| l.starts_with("2 ")).unwrap();
        assert!(bob.ends_with(" -"));

        assert!(text.contains("Total students: 2"));
    }
}
