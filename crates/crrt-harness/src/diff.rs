//! Diff rendering for fixture comparison.

/// Render a line diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");

    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    let rows = expected_lines.len().max(actual_lines.len());
    for i in 0..rows {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e == a {
            continue;
        }
        out.push_str(&format!("@@ line {} @@\n", i + 1));
        if let Some(e) = e {
            out.push_str(&format!("-{}\n", e.escape_debug()));
        }
        if let Some(a) = a {
            out.push_str(&format!("+{}\n", a.escape_debug()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs() {
        assert_eq!(render_diff("abc", "abc"), "[identical]");
    }

    #[test]
    fn reports_changed_line() {
        let diff = render_diff("a=7", "a=8");
        assert!(diff.contains("@@ line 1 @@"));
        assert!(diff.contains("-a=7"));
        assert!(diff.contains("+a=8"));
    }

    #[test]
    fn reports_extra_trailing_line() {
        let diff = render_diff("x", "x\ny");
        assert!(diff.contains("@@ line 2 @@"));
        assert!(diff.contains("+y"));
        assert!(!diff.contains("@@ line 1 @@"));
    }

    #[test]
    fn control_bytes_are_escaped() {
        let diff = render_diff("a\tb", "a b");
        assert!(diff.contains("-a\\tb"));
    }
}
