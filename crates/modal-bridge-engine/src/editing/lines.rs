use crate::editing::Translator;
use crate::host::{TextDocument, TextViewer};
use crate::models::LineInformation;
use crate::{HostError, Space};

/// Resolve a line in `space`.
///
/// In view space the line number is translated to the model before the
/// document is queried, and the resulting region is translated back last.
pub fn line_information<H>(
    host: &H,
    space: Space,
    line: usize,
) -> Result<LineInformation, HostError>
where
    H: TextDocument + TextViewer + ?Sized,
{
    let translator = Translator::new(host.projection());
    let model_line = match space {
        Space::Model => line,
        Space::View => translator.to_model_line(line),
    };
    let region = host.line_region(model_line)?;
    Ok(match space {
        Space::Model => LineInformation::new(model_line, region.offset, region.length),
        Space::View => LineInformation::new(
            translator.to_view_line(model_line),
            translator.to_view_offset(region.offset),
            region.length,
        ),
    })
}

/// Resolve the line containing `offset`, both given in `space`
pub fn line_information_of_offset<H>(
    host: &H,
    space: Space,
    offset: usize,
) -> Result<LineInformation, HostError>
where
    H: TextDocument + TextViewer + ?Sized,
{
    let line = match space {
        Space::Model => host.line_of_offset(offset)?,
        Space::View => host.view_line_at_offset(offset),
    };
    line_information(host, space, line)
}

pub fn line_count<H>(host: &H, space: Space) -> usize
where
    H: TextDocument + TextViewer + ?Sized,
{
    match space {
        Space::Model => host.line_count(),
        Space::View => host.view_line_count(),
    }
}

pub fn text_length<H>(host: &H, space: Space) -> usize
where
    H: TextDocument + TextViewer + ?Sized,
{
    match space {
        Space::Model => host.len(),
        Space::View => host.view_len(),
    }
}

pub fn text<H>(host: &H, space: Space, offset: usize, length: usize) -> Result<String, HostError>
where
    H: TextDocument + TextViewer + ?Sized,
{
    match space {
        Space::Model => host.get(offset, length),
        Space::View => host.view_text(offset, length),
    }
}
