use crate::HostError;
use crate::host::{ShiftDirection, TextDocument, TextViewer};

/// Indent or outdent `line_count` model lines starting at `line`.
///
/// Selects the lines, then runs the native shift `amount.abs()` times in the
/// direction of the sign of `amount`. Callers wrap this in one undo change.
pub fn shift_lines<H>(
    host: &mut H,
    line: usize,
    line_count: usize,
    amount: i32,
) -> Result<(), HostError>
where
    H: TextDocument + TextViewer + ?Sized,
{
    if amount == 0 || line_count == 0 {
        return Ok(());
    }
    let first = host.line_region(line)?;
    let last = host.line_region(line + line_count - 1)?;
    host.select_model_range(first.offset, last.end() - first.offset);

    let direction = if amount < 0 {
        ShiftDirection::Left
    } else {
        ShiftDirection::Right
    };
    for _ in 0..amount.unsigned_abs() {
        host.shift(direction)?;
    }
    Ok(())
}
