//! Static widget tree of the main window. Pure data; `render` walks it.

use super::constants::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    LineInput { hint: &'static str },
    PathDisplay,
    Button,
    Choice,
    ProgressBar,
    Image,
    Field,
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSpec {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub caption: &'static str,
}

const fn widget(id: WidgetId, kind: WidgetKind, caption: &'static str) -> WidgetSpec {
    WidgetSpec { id, kind, caption }
}

/// Input form, one inner slice per horizontal row.
pub const FORM_ROWS: &[&[WidgetSpec]] = &[
    &[widget(
        WidgetId::UrlInput,
        WidgetKind::LineInput {
            hint: "https://www.youtube.com/watch?v=...",
        },
        "Video URL:",
    )],
    &[
        widget(WidgetId::OutputDir, WidgetKind::PathDisplay, "Save to:"),
        widget(WidgetId::BrowseButton, WidgetKind::Button, "Browse…"),
    ],
    &[
        widget(WidgetId::FormatSelector, WidgetKind::Choice, "Format:"),
        widget(
            WidgetId::FilenameInput,
            WidgetKind::LineInput {
                hint: "optional, defaults to the video title",
            },
            "File name:",
        ),
    ],
    &[
        widget(WidgetId::PreviewButton, WidgetKind::Button, "Confirm"),
        widget(WidgetId::DownloadButton, WidgetKind::Button, "Download"),
    ],
    &[widget(WidgetId::ProgressBar, WidgetKind::ProgressBar, "")],
];

/// Results panel, top to bottom.
pub const RESULT_FIELDS: &[WidgetSpec] = &[
    widget(WidgetId::Thumbnail, WidgetKind::Image, ""),
    widget(WidgetId::Title, WidgetKind::Field, "Title:"),
    widget(WidgetId::Duration, WidgetKind::Field, "Duration:"),
    widget(WidgetId::Uploader, WidgetKind::Field, "Uploader:"),
    widget(WidgetId::UploadDate, WidgetKind::Field, "Upload date:"),
    widget(WidgetId::Description, WidgetKind::Paragraph, "Description:"),
];

#[cfg(test)]
fn all_widgets() -> impl Iterator<Item = &'static WidgetSpec> {
    FORM_ROWS
        .iter()
        .flat_map(|row| row.iter())
        .chain(RESULT_FIELDS.iter())
}
