//! 変換前後のコード比較

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiffLineKind {
    Context,
    Added,
    Removed,
}

impl DiffLineKind {
    pub fn marker(&self) -> char {
        match self {
            DiffLineKind::Context => ' ',
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiffLineKind::Context => "context",
            DiffLineKind::Added => "added",
            DiffLineKind::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// 末尾の改行は含まない
    pub text: String,
}

/// 行単位の差分
pub fn line_diff(old: &str, new: &str) -> Vec<DiffLine> {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .map(|change| {
            let kind = match change.tag() {
                ChangeTag::Equal => DiffLineKind::Context,
                ChangeTag::Insert => DiffLineKind::Added,
                ChangeTag::Delete => DiffLineKind::Removed,
            };
            DiffLine {
                kind,
                text: change.value().trim_end_matches(&['\r', '\n'][..]).to_string(),
            }
        })
        .collect()
}

/// (追加行数, 削除行数)
pub fn change_counts(lines: &[DiffLine]) -> (usize, usize) {
    lines.iter().fold((0, 0), |(added, removed), line| match line.kind {
        DiffLineKind::Added => (added + 1, removed),
        DiffLineKind::Removed => (added, removed + 1),
        DiffLineKind::Context => (added, removed),
    })
}
