/// Detect page
///
/// Renders the upload section (with drag-over highlight), the live camera
/// view, the selection preview, and the prediction outcome. All result
/// fields are optional and rendered defensively: whatever the backend
/// omits simply shows as "N/A" or not at all.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Element, Length, Theme};

use crate::api::predict::{Confidence, PredictionResult, Severity};
use crate::i18n::Strings;
use crate::state::workflow::{DetectionWorkflow, Notice, WorkflowStatus};
use crate::Message;

/// Displayed width of the preview and camera feed
const FEED_WIDTH: f32 = 420.0;

pub fn view<'a>(
    workflow: &'a DetectionWorkflow,
    strings: &'static Strings,
    compact: bool,
    preview: Option<&'a Handle>,
    camera_feed: Option<&'a Handle>,
) -> Element<'a, Message> {
    let mut content = column![text(strings.detect_title).size(36)]
        .push(upload_section(workflow, strings, compact))
        .spacing(24)
        .padding(40)
        .align_x(Alignment::Center);

    if workflow.camera_active() {
        content = content.push(camera_section(camera_feed, strings));
    }

    if let Some(handle) = preview {
        content = content.push(preview_section(handle, strings));
    }

    if workflow.status() == WorkflowStatus::Loading {
        content = content.push(text(strings.analyzing_long).style(text::secondary));
    }

    if let Some(notice) = workflow.notice() {
        content = content.push(text(notice_text(notice, strings)).style(text::danger));
    }

    if workflow.status() == WorkflowStatus::Failed {
        content = content.push(text(strings.error_network).style(text::danger));
    }

    if let Some(result) = workflow.result() {
        content = content.push(result_section(result, strings));
    }

    container(content)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

/// File picker, camera entry point and submit control, highlighted while a
/// drag hovers over the window
fn upload_section<'a>(
    workflow: &'a DetectionWorkflow,
    strings: &'static Strings,
    compact: bool,
) -> Element<'a, Message> {
    let choose_label = if workflow.selection().is_some() {
        strings.change_image
    } else {
        strings.choose_image
    };

    let mut controls = row![button(choose_label).on_press(Message::BrowseImage).padding(10)]
        .spacing(12)
        .align_y(Alignment::Center);

    // Camera capture is only offered on the compact (mobile-style) layout
    if compact && !workflow.camera_active() {
        controls = controls.push(
            button(strings.take_photo)
                .on_press(Message::OpenCamera)
                .style(button::secondary)
                .padding(10),
        );
    }

    let submit_label = if workflow.status() == WorkflowStatus::Loading {
        strings.analyzing
    } else {
        strings.detect
    };
    let submit = button(submit_label)
        .on_press_maybe(workflow.can_submit().then_some(Message::Submit))
        .style(button::success)
        .padding(12);

    let mut section = column![text(strings.upload_prompt).size(18), controls]
        .spacing(16)
        .align_x(Alignment::Center);

    if let Some(selection) = workflow.selection() {
        section = section.push(text(&selection.file_name).size(14).style(text::secondary));
    }
    section = section.push(submit);

    let drag_active = workflow.drag_active();
    container(section)
        .padding(30)
        .width(Length::Fixed(520.0))
        .style(move |theme: &Theme| {
            let mut style = container::bordered_box(theme);
            if drag_active {
                style.border.width = 2.0;
                style.border.color = theme.palette().primary;
            }
            style
        })
        .into()
}

/// Live feed with capture and cancel controls
fn camera_section<'a>(feed: Option<&'a Handle>, strings: &'static Strings) -> Element<'a, Message> {
    let viewport: Element<'a, Message> = match feed {
        Some(handle) => image(handle.clone()).width(Length::Fixed(FEED_WIDTH)).into(),
        None => text(strings.camera_starting).style(text::secondary).into(),
    };

    column![
        viewport,
        row![
            button(strings.capture).on_press(Message::CapturePhoto).padding(10),
            button(strings.cancel)
                .on_press(Message::CancelCamera)
                .style(button::danger)
                .padding(10),
        ]
        .spacing(12),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}

/// The selected image, decoded and downscaled
fn preview_section<'a>(handle: &'a Handle, strings: &'static Strings) -> Element<'a, Message> {
    column![
        text(strings.uploaded_image).size(20),
        image(handle.clone()).width(Length::Fixed(FEED_WIDTH)),
    ]
    .spacing(10)
    .align_x(Alignment::Center)
    .into()
}

/// Parsed diagnosis, rendered field by field
fn result_section<'a>(
    result: &'a PredictionResult,
    strings: &'static Strings,
) -> Element<'a, Message> {
    let mut section: Column<'a, Message> = column![text(strings.detection_results).size(24)]
        .spacing(8)
        .align_x(Alignment::Start);

    if let Some(disease) = &result.disease {
        section = section.push(text(format!("{}: {disease}", strings.disease)));
    }

    section = section.push(text(format!(
        "{}: {}",
        strings.confidence,
        format_confidence(result.confidence.as_ref(), strings)
    )));

    if let Some(severity) = &result.severity {
        section = section.push(severity_section(severity, strings));
    }

    container(section)
        .padding(24)
        .width(Length::Fixed(520.0))
        .style(container::rounded_box)
        .into()
}

fn severity_section<'a>(severity: &'a Severity, strings: &'static Strings) -> Element<'a, Message> {
    let mut section: Column<'a, Message> = column![text(strings.severity_heading).size(18)]
        .spacing(6)
        .align_x(Alignment::Start);

    section = section.push(text(format!(
        "{}: {}",
        strings.severity_level,
        severity_level_text(severity, strings)
    )));

    if let Some(description) = &severity.description {
        section = section.push(text(format!("{}: {description}", strings.description)));
    }

    if let Some(area) = &severity.affected_area_percent {
        section = section.push(text(format!("{}: {area}%", strings.affected_area)));
    }

    if let Some(metrics) = &severity.color_metrics {
        section = section.push(
            column![
                text(strings.color_analysis).size(16),
                text(format!("{}: {}", strings.hue, metric_text(metrics.mean_hue.as_ref(), strings))),
                text(format!(
                    "{}: {}",
                    strings.saturation,
                    metric_text(metrics.mean_saturation.as_ref(), strings)
                )),
                text(format!(
                    "{}: {}",
                    strings.value,
                    metric_text(metrics.mean_value.as_ref(), strings)
                )),
            ]
            .spacing(4),
        );
    }

    section.into()
}

fn notice_text(notice: Notice, strings: &'static Strings) -> &'static str {
    match notice {
        Notice::NotAnImage => strings.warn_not_image,
        Notice::NoImageSelected => strings.warn_no_image,
        Notice::CameraUnavailable => strings.warn_camera,
        Notice::FileUnreadable => strings.warn_unreadable,
    }
}

/// Numeric confidence is shown as a percentage with two decimals; string
/// confidence is shown verbatim; anything else is "N/A".
pub fn format_confidence(confidence: Option<&Confidence>, strings: &Strings) -> String {
    match confidence {
        Some(Confidence::Number(value)) => format!("{value:.2}%"),
        Some(Confidence::Text(raw)) => raw.clone(),
        None => strings.not_available.to_string(),
    }
}

/// "3/5 (Moderate)" when both score and stage are present, "3/5" with the
/// stage omitted, "N/A" without a score.
pub fn severity_level_text(severity: &Severity, strings: &Strings) -> String {
    match (&severity.severity_score, &severity.stage) {
        (Some(score), Some(stage)) => format!("{score}/5 ({stage})"),
        (Some(score), None) => format!("{score}/5"),
        (None, _) => strings.not_available.to_string(),
    }
}

fn metric_text(value: Option<&serde_json::Number>, strings: &Strings) -> String {
    match value {
        Some(number) => number.to_string(),
        None => strings.not_available.to_string(),
    }
}
