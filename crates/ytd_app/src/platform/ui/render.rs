use eframe::egui;
use ytd_core::{AppViewModel, DownloadFormat, Msg, ThumbnailView};

use super::constants::WidgetId;
use super::layout::{WidgetKind, WidgetSpec, FORM_ROWS, RESULT_FIELDS};

/// GPU texture for the current thumbnail, rebuilt when the generation changes.
#[derive(Default)]
pub struct ThumbnailCache {
    generation: Option<u64>,
    texture: Option<egui::TextureHandle>,
}

impl ThumbnailCache {
    fn texture(
        &mut self,
        ctx: &egui::Context,
        view: Option<&ThumbnailView>,
    ) -> Option<&egui::TextureHandle> {
        let Some(thumb) = view else {
            self.generation = None;
            self.texture = None;
            return None;
        };
        if self.generation != Some(thumb.generation) {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [thumb.image.width as usize, thumb.image.height as usize],
                &thumb.image.rgba,
            );
            self.texture = Some(ctx.load_texture(
                format!("thumbnail-{}", thumb.generation),
                image,
                egui::TextureOptions::default(),
            ));
            self.generation = Some(thumb.generation);
        }
        self.texture.as_ref()
    }
}

/// Draws the window from the view model and returns the user's input as messages.
pub fn render(
    ctx: &egui::Context,
    view: &AppViewModel,
    thumbnails: &mut ThumbnailCache,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::top("form").show(ctx, |ui| {
        ui.add_space(6.0);
        for row in FORM_ROWS {
            if row.iter().all(|entry| !is_visible(entry.id, view)) {
                continue;
            }
            ui.horizontal(|ui| {
                for entry in row.iter() {
                    render_form_widget(ui, entry, view, &mut msgs);
                }
            });
        }
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in RESULT_FIELDS {
                render_result_widget(ctx, ui, entry, view, thumbnails);
            }
        });
    });

    msgs
}

pub fn is_visible(id: WidgetId, view: &AppViewModel) -> bool {
    match id {
        WidgetId::ProgressBar => view.progress.is_some(),
        _ => true,
    }
}

fn render_form_widget(
    ui: &mut egui::Ui,
    entry: &WidgetSpec,
    view: &AppViewModel,
    msgs: &mut Vec<Msg>,
) {
    if !is_visible(entry.id, view) {
        return;
    }
    if !entry.caption.is_empty() && entry.kind != WidgetKind::Button {
        ui.label(entry.caption);
    }
    let enabled = view.controls_enabled;

    match (entry.kind, entry.id) {
        (WidgetKind::LineInput { hint }, WidgetId::UrlInput) => {
            let mut text = view.url_input.clone();
            let edit = egui::TextEdit::singleline(&mut text)
                .hint_text(hint)
                .desired_width(f32::INFINITY);
            if ui.add_enabled(enabled, edit).changed() {
                msgs.push(Msg::UrlChanged(text));
            }
        }
        (WidgetKind::LineInput { hint }, WidgetId::FilenameInput) => {
            let mut text = view.filename_input.clone();
            let edit = egui::TextEdit::singleline(&mut text).hint_text(hint);
            if ui.add_enabled(enabled, edit).changed() {
                msgs.push(Msg::FilenameChanged(text));
            }
        }
        (WidgetKind::PathDisplay, _) => {
            let shown = if view.output_dir.is_empty() {
                "(current directory)"
            } else {
                view.output_dir.as_str()
            };
            ui.monospace(shown);
        }
        (WidgetKind::Choice, _) => {
            let mut selected = view.format;
            ui.add_enabled_ui(enabled, |ui| {
                egui::ComboBox::from_id_source(entry.caption)
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for format in DownloadFormat::ALL {
                            ui.selectable_value(&mut selected, format, format.label());
                        }
                    });
            });
            if selected != view.format {
                msgs.push(Msg::FormatSelected(selected));
            }
        }
        (WidgetKind::Button, id) => {
            if ui.add_enabled(enabled, egui::Button::new(entry.caption)).clicked() {
                match id {
                    WidgetId::BrowseButton => msgs.push(Msg::BrowseClicked),
                    WidgetId::PreviewButton => msgs.push(Msg::PreviewClicked),
                    WidgetId::DownloadButton => msgs.push(Msg::DownloadClicked),
                    _ => {}
                }
            }
        }
        (WidgetKind::ProgressBar, _) => {
            let value = view.progress.unwrap_or(0);
            ui.add(egui::ProgressBar::new(f32::from(value) / 100.0).show_percentage());
        }
        _ => {}
    }
}

fn render_result_widget(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    entry: &WidgetSpec,
    view: &AppViewModel,
    thumbnails: &mut ThumbnailCache,
) {
    match entry.kind {
        WidgetKind::Image => {
            if let Some(texture) = thumbnails.texture(ctx, view.thumbnail.as_ref()) {
                ui.image(texture);
                ui.add_space(6.0);
            }
        }
        WidgetKind::Field => {
            ui.horizontal(|ui| {
                ui.strong(entry.caption);
                ui.label(field_text(entry.id, view));
            });
        }
        WidgetKind::Paragraph => {
            ui.strong(entry.caption);
            let mut text = field_text(entry.id, view);
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            );
        }
        _ => {}
    }
}

fn field_text(id: WidgetId, view: &AppViewModel) -> &str {
    let details = &view.details;
    match id {
        WidgetId::Title => &details.title,
        WidgetId::Duration => &details.duration,
        WidgetId::Uploader => &details.uploader,
        WidgetId::UploadDate => &details.upload_date,
        WidgetId::Description => &details.description,
        _ => "",
    }
}
