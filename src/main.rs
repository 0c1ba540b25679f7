use std::path::PathBuf;
use std::time::Duration;

use iced::widget::image::Handle;
use iced::widget::{button, horizontal_space, row, scrollable, text, Column};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use log::info;
use rfd::FileDialog;

// Declare the application modules
mod api;
mod capture;
mod i18n;
mod state;
mod ui;

use api::predict::{self, PredictError, PredictionResult};
use capture::session::CameraSession;
use capture::types::{CameraFacing, CameraFrame, CaptureError};
use i18n::Language;
use state::data::{image_mime_for_path, LoadedFile, PreviewImage};
use state::workflow::DetectionWorkflow;

/// Window widths at or below this use the compact (mobile-style) layout,
/// the only layout that offers camera capture
const COMPACT_LAYOUT_MAX_WIDTH: f32 = 768.0;

/// Longest edge of the decoded selection preview
const PREVIEW_MAX_DIM: u32 = 640;

/// File extensions offered by the picker dialog
const PICKER_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// How often the live camera feed refreshes (~15 fps)
const CAMERA_FEED_INTERVAL: Duration = Duration::from_millis(66);

/// The application's pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    GetStarted,
    Detect,
    About,
    Contact,
}

/// Main application state
struct LeafScan {
    page: Page,
    language: Language,
    window_width: f32,
    /// All detect-page state; torn down when the user navigates away
    workflow: DetectionWorkflow,
    /// Cached texture of the decoded selection preview
    preview_handle: Option<Handle>,
    /// Cached texture of the most recent live camera frame
    camera_handle: Option<Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Page),
    ToggleLanguage,
    WindowResized(f32),
    /// User clicked the choose/change image button
    BrowseImage,
    DragEntered,
    DragLeft,
    FileDropped(PathBuf),
    /// A picked or dropped path finished reading
    FileLoaded(Result<LoadedFile, String>),
    /// Preview decode finished for the given selection generation
    PreviewReady(u64, Result<PreviewImage, String>),
    OpenCamera,
    CameraOpened(Result<CameraSession, CaptureError>),
    CameraTick,
    CapturePhoto,
    CancelCamera,
    Submit,
    PredictionFinished(Result<PredictionResult, PredictError>),
}

impl LeafScan {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        info!("🌿 LeafScan started");
        (
            LeafScan {
                page: Page::Home,
                language: Language::default(),
                window_width: 1024.0,
                workflow: DetectionWorkflow::new(),
                preview_handle: None,
                camera_handle: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(page) => {
                if self.page == Page::Detect && page != Page::Detect {
                    // Leaving the detect view releases the camera and all
                    // workflow state, like the original component unmount
                    self.workflow.teardown();
                    self.preview_handle = None;
                    self.camera_handle = None;
                }
                self.page = page;
                Task::none()
            }
            Message::ToggleLanguage => {
                self.language = self.language.toggled();
                Task::none()
            }
            Message::WindowResized(width) => {
                self.window_width = width;
                Task::none()
            }
            Message::BrowseImage => {
                let picked = FileDialog::new()
                    .set_title(self.language.strings().upload_prompt)
                    .add_filter("Images", &PICKER_EXTENSIONS)
                    .pick_file();

                match picked {
                    Some(path) => Task::perform(load_image_file(path), Message::FileLoaded),
                    None => Task::none(),
                }
            }
            Message::DragEntered => {
                self.workflow.set_drag_active(true);
                Task::none()
            }
            Message::DragLeft => {
                self.workflow.set_drag_active(false);
                Task::none()
            }
            Message::FileDropped(path) => {
                self.workflow.set_drag_active(false);
                if self.page == Page::Detect {
                    Task::perform(load_image_file(path), Message::FileLoaded)
                } else {
                    Task::none()
                }
            }
            Message::FileLoaded(Ok(file)) => self.ingest(file),
            Message::FileLoaded(Err(detail)) => {
                self.workflow.file_unreadable(&detail);
                Task::none()
            }
            Message::PreviewReady(generation, Ok(preview)) => {
                self.workflow.attach_preview(generation, preview);
                self.preview_handle = self.workflow.preview().map(preview_to_handle);
                Task::none()
            }
            Message::PreviewReady(generation, Err(detail)) => {
                self.workflow.preview_failed(generation, &detail);
                Task::none()
            }
            Message::OpenCamera => Task::perform(open_camera(), Message::CameraOpened),
            Message::CameraOpened(Ok(session)) => {
                self.workflow.camera_opened(session);
                self.camera_handle = None;
                Task::none()
            }
            Message::CameraOpened(Err(err)) => {
                self.workflow.camera_failed(&err);
                Task::none()
            }
            Message::CameraTick => {
                self.camera_handle = self
                    .workflow
                    .camera()
                    .and_then(CameraSession::latest_frame)
                    .map(frame_to_handle);
                Task::none()
            }
            Message::CapturePhoto => {
                self.camera_handle = None;
                match self.workflow.capture_photo() {
                    Some(generation) => {
                        self.preview_handle = None;
                        self.schedule_preview(generation)
                    }
                    None => Task::none(),
                }
            }
            Message::CancelCamera => {
                self.workflow.cancel_camera();
                self.camera_handle = None;
                Task::none()
            }
            Message::Submit => match self.workflow.begin_submission() {
                Ok(selection) => {
                    Task::perform(predict::submit_image(selection), Message::PredictionFinished)
                }
                // The workflow already raised the notice
                Err(_) => Task::none(),
            },
            Message::PredictionFinished(outcome) => {
                self.workflow.finish_submission(outcome);
                Task::none()
            }
        }
    }

    /// Run an incoming file through normalization and, if accepted,
    /// schedule its preview decode
    fn ingest(&mut self, file: LoadedFile) -> Task<Message> {
        match self.workflow.accept_file(file) {
            Some(generation) => {
                self.preview_handle = None;
                self.schedule_preview(generation)
            }
            None => Task::none(),
        }
    }

    fn schedule_preview(&self, generation: u64) -> Task<Message> {
        let bytes = match self.workflow.selection() {
            Some(selection) => selection.bytes.clone(),
            None => return Task::none(),
        };
        Task::perform(decode_preview(bytes), move |outcome| {
            Message::PreviewReady(generation, outcome)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let strings = self.language.strings();
        let compact = self.window_width <= COMPACT_LAYOUT_MAX_WIDTH;

        let page = match self.page {
            Page::Home => ui::pages::home(strings),
            Page::GetStarted => ui::pages::get_started(strings),
            Page::About => ui::pages::about(strings),
            Page::Contact => ui::pages::contact(strings),
            Page::Detect => ui::detect::view(
                &self.workflow,
                strings,
                compact,
                self.preview_handle.as_ref(),
                self.camera_handle.as_ref(),
            ),
        };

        let mut layout = Column::new();
        // The onboarding page stands alone, without the navbar
        if self.page != Page::GetStarted {
            layout = layout.push(self.navbar());
        }
        layout.push(scrollable(page).height(Length::Fill)).into()
    }

    fn navbar(&self) -> Element<Message> {
        let strings = self.language.strings();

        let nav_link = |label: &'static str, page: Page| {
            button(label)
                .on_press(Message::Navigate(page))
                .style(button::text)
        };

        row![
            button(text("PlantDisease").size(20))
                .on_press(Message::Navigate(Page::Home))
                .style(button::text),
            horizontal_space(),
            nav_link(strings.home, Page::Home),
            nav_link(strings.detect, Page::Detect),
            nav_link(strings.about, Page::About),
            nav_link(strings.contact, Page::Contact),
            button(self.language.toggle_label()).on_press(Message::ToggleLanguage),
        ]
        .spacing(8)
        .padding(12)
        .align_y(Alignment::Center)
        .into()
    }

    /// Window events feed resize tracking and drag-and-drop; the camera
    /// feed ticks only while a session is live
    fn subscription(&self) -> Subscription<Message> {
        let events = iced::event::listen_with(handle_event);

        if self.workflow.camera_active() {
            Subscription::batch([
                events,
                iced::time::every(CAMERA_FEED_INTERVAL).map(|_| Message::CameraTick),
            ])
        } else {
            events
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn handle_event(event: Event, _status: iced::event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size.width)),
        Event::Window(window::Event::FileHovered(_)) => Some(Message::DragEntered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::DragLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("LeafScan", LeafScan::update, LeafScan::view)
        .subscription(LeafScan::subscription)
        .theme(LeafScan::theme)
        .centered()
        .run_with(LeafScan::new)
}

/// Read a picked or dropped path into memory.
/// The content type is derived from the extension; normalization decides
/// whether it is acceptable.
async fn load_image_file(path: PathBuf) -> Result<LoadedFile, String> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let mime = image_mime_for_path(&path)
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|err| format!("{}: {err}", path.display()))?;

    Ok(LoadedFile {
        file_name,
        mime,
        bytes,
    })
}

/// Decode the selected image and downscale it for display.
/// Runs on a blocking thread because decoding is CPU-intensive.
async fn decode_preview(bytes: Vec<u8>) -> Result<PreviewImage, String> {
    tokio::task::spawn_blocking(move || {
        let decoded =
            image::load_from_memory(&bytes).map_err(|err| format!("failed to decode image: {err}"))?;

        let scaled = if decoded.width() > PREVIEW_MAX_DIM || decoded.height() > PREVIEW_MAX_DIM {
            decoded.resize(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM, image::imageops::FilterType::Lanczos3)
        } else {
            decoded
        };

        let rgba = scaled.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(PreviewImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    })
    .await
    .map_err(|err| format!("task join error: {err}"))?
}

/// Open the environment-facing camera off the UI thread; device probing
/// can block for a noticeable moment
async fn open_camera() -> Result<CameraSession, CaptureError> {
    tokio::task::spawn_blocking(|| CameraSession::open(CameraFacing::Environment))
        .await
        .map_err(|err| CaptureError::Open(format!("task join error: {err}")))?
}

fn preview_to_handle(preview: &PreviewImage) -> Handle {
    Handle::from_rgba(preview.width, preview.height, preview.rgba.clone())
}

fn frame_to_handle(frame: CameraFrame) -> Handle {
    Handle::from_rgba(frame.width, frame.height, frame.rgba)
}
