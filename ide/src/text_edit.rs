use crate::commit::CommitEdit;

/// Applies a commit edit to the snapshot it was synthesized against,
/// returning the updated text and the caret offset.
///
/// Returns `None` when the edit range is out of bounds or cuts a UTF-8
/// boundary; callers treat that as a failed commit, not a partial one.
pub fn apply_commit(source: &str, edit: &CommitEdit) -> Option<(String, u32)> {
    let start = usize::try_from(edit.range.start).ok()?;
    let end = usize::try_from(edit.range.end).ok()?;
    if start > end || end > source.len() {
        return None;
    }
    if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
        return None;
    }

    let mut updated =
        String::with_capacity(source.len() - (end - start) + edit.new_text.len());
    updated.push_str(&source[..start]);
    updated.push_str(&edit.new_text);
    updated.push_str(&source[end..]);

    if (edit.caret as usize) > updated.len() {
        return None;
    }
    Some((updated, edit.caret))
}
