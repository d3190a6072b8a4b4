// src/formatting/grouping.rs
//! Blank-line normalization around list runs.
//!
//! Consecutive list items of one kind stay adjacent; switching kinds (or
//! entering/leaving a list) forces a visual break. The pass is a pure
//! formatting fix and idempotent: running it on its own output changes
//! nothing.

/// Line classification by leading token, after stripping indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Checkbox,
    Bullet,
    Numbered,
    Plain,
}

fn classify(line: &str) -> LineClass {
    let stripped = line.trim_start_matches('\t').trim_start();
    if stripped.starts_with("- [ ]") || stripped.starts_with("- [x]") {
        LineClass::Checkbox
    } else if stripped.starts_with("* ") {
        LineClass::Bullet
    } else if stripped.starts_with("1. ") {
        LineClass::Numbered
    } else {
        LineClass::Plain
    }
}

/// Regroups list-like lines and collapses blank-line runs.
pub fn group_list_lines(markdown: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut prev = LineClass::Plain;

    for line in markdown.lines() {
        // Blanks inside a list run are dropped so the items stay adjacent.
        if prev != LineClass::Plain && line.is_empty() {
            continue;
        }

        let class = classify(line);
        if class != prev && out.last().is_some_and(|last| !last.is_empty()) {
            out.push("");
        }

        out.push(line);
        prev = class;
    }

    let mut grouped = out.join("\n");
    while grouped.contains("\n\n\n") {
        grouped = grouped.replace("\n\n\n", "\n\n");
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_kind_items_stay_adjacent() {
        let input = "* one\n\n* two\n\n* three\n";
        assert_eq!(group_list_lines(input), "* one\n* two\n* three");
    }

    #[test]
    fn switching_list_kind_forces_a_break() {
        let input = "* bullet\n\n1. numbered\n\n- [x] done\n";
        assert_eq!(
            group_list_lines(input),
            "* bullet\n\n1. numbered\n\n- [x] done"
        );
    }

    #[test]
    fn plain_text_separates_from_lists() {
        let input = "intro\n* a\n* b\noutro\n";
        assert_eq!(group_list_lines(input), "intro\n\n* a\n* b\n\noutro");
    }

    #[test]
    fn indented_items_classify_by_stripped_prefix() {
        let input = "* outer\n\n\t* inner\n\n\t\t* deepest\n";
        assert_eq!(group_list_lines(input), "* outer\n\t* inner\n\t\t* deepest");
    }

    #[test]
    fn triple_blank_runs_collapse() {
        let input = "a\n\n\n\n\nb";
        assert_eq!(group_list_lines(input), "a\n\nb");
    }

    #[test]
    fn grouping_is_idempotent() {
        let cases = [
            "* one\n\n* two\n\nplain\n",
            "- [ ] a\n- [x] b\ntext\n* c\n",
            "* a\nx\n",
            "a\n\n* b\n",
            "intro\n\n\n* a\n\n1. b\n",
            "",
            "\n\n* leading blank\n",
        ];
        for case in cases {
            let once = group_list_lines(case);
            let twice = group_list_lines(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", case);
        }
    }
}
