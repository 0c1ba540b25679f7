/// Capture-and-submit workflow state machine
///
/// The authoritative contract for one detection attempt, independent of
/// the UI binding: event handlers call explicit transition functions here
/// and render whatever the accessors expose afterwards.
///
/// Status lifecycle: Idle -> Loading -> Succeeded/Failed, with any newly
/// accepted image resetting the machine toward Idle. The machine is
/// reusable indefinitely within one page session.

use log::{debug, error, info, warn};

use crate::api::predict::{PredictError, PredictionResult};
use crate::capture::session::CameraSession;
use crate::capture::types::CaptureError;
use crate::state::data::{ImageSelection, LoadedFile, PreviewImage};

/// File name given to camera captures, mirroring the browser client
const CAPTURE_FILE_NAME: &str = "camera-capture.jpg";

/// Lifecycle of one detection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Non-fatal, user-visible feedback raised by workflow transitions.
/// Views localize these; the workflow itself never touches display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NotAnImage,
    NoImageSelected,
    CameraUnavailable,
    FileUnreadable,
}

/// Why a submit request was refused before any network activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("no image selected")]
    NoSelection,
    #[error("a submission is already in flight")]
    AlreadyLoading,
}

/// All state owned by the detect view for its lifetime.
///
/// Nothing here is shared outside the workflow or persisted across runs.
#[derive(Debug, Default)]
pub struct DetectionWorkflow {
    status: WorkflowStatus,
    selection: Option<ImageSelection>,
    preview: Option<PreviewImage>,
    /// Bumped on every accepted image; stale async work is keyed on it
    generation: u64,
    /// Generation the in-flight submission belongs to, if any
    submitted_generation: Option<u64>,
    result: Option<PredictionResult>,
    /// Technical detail of the last failure; logged, never rendered
    failure: Option<PredictError>,
    notice: Option<Notice>,
    drag_active: bool,
    camera: Option<CameraSession>,
}

impl DetectionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn selection(&self) -> Option<&ImageSelection> {
        self.selection.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&PredictError> {
        self.failure.as_ref()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn camera(&self) -> Option<&CameraSession> {
        self.camera.as_ref()
    }

    pub fn camera_active(&self) -> bool {
        self.camera.as_ref().is_some_and(CameraSession::is_active)
    }

    /// Submission is offered only with a selection and no request in flight
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && self.status != WorkflowStatus::Loading
    }

    // ========== Ingestion ==========

    /// Normalize an incoming file from any path (picker, drop, capture).
    ///
    /// Non-image content is turned away with a notice and no state change.
    /// An accepted image replaces the selection, clears any previous
    /// result or error, and resets the status toward Idle. Returns the new
    /// preview generation so the caller can schedule an async decode.
    pub fn accept_file(&mut self, file: LoadedFile) -> Option<u64> {
        if !file.mime.starts_with("image/") {
            warn!("rejected non-image input \"{}\" ({})", file.file_name, file.mime);
            self.notice = Some(Notice::NotAnImage);
            return None;
        }

        info!("🌿 Selected image \"{}\" ({} bytes)", file.file_name, file.bytes.len());

        self.selection = Some(ImageSelection {
            file_name: file.file_name,
            mime: file.mime,
            bytes: file.bytes,
        });
        self.preview = None;
        self.generation += 1;
        self.result = None;
        self.failure = None;
        self.notice = None;
        self.status = WorkflowStatus::Idle;

        Some(self.generation)
    }

    /// Record that a picker/drop path could not be read at all
    pub fn file_unreadable(&mut self, detail: &str) {
        error!("could not read selected file: {detail}");
        self.notice = Some(Notice::FileUnreadable);
    }

    /// Attach an asynchronously decoded preview. A preview for a
    /// superseded selection is dropped on the floor.
    pub fn attach_preview(&mut self, generation: u64, preview: PreviewImage) {
        if generation == self.generation {
            self.preview = Some(preview);
        } else {
            debug!("dropping stale preview for generation {generation} (now {})", self.generation);
        }
    }

    /// A preview decode failed; the selection itself stays valid and the
    /// image can still be submitted.
    pub fn preview_failed(&mut self, generation: u64, detail: &str) {
        if generation == self.generation {
            warn!("preview decode failed: {detail}");
        }
    }

    /// Cosmetic flag while a drag hovers over the window
    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    // ========== Camera ==========

    /// Install a freshly opened session, replacing (and releasing) any
    /// prior one so at most one stream is ever open.
    pub fn camera_opened(&mut self, session: CameraSession) {
        if let Some(previous) = self.camera.take() {
            previous.close();
        }
        self.camera = Some(session);
        self.notice = None;
    }

    /// Stream acquisition failed; no session exists
    pub fn camera_failed(&mut self, err: &CaptureError) {
        warn!("camera unavailable: {err}");
        self.notice = Some(Notice::CameraUnavailable);
    }

    /// Stop the stream and discard the session without producing an image
    pub fn cancel_camera(&mut self) {
        if let Some(session) = self.camera.take() {
            session.close();
        }
    }

    /// Freeze the current video frame into a still and make it the new
    /// selection. The session is torn down whether or not the capture
    /// succeeds in becoming a selection.
    pub fn capture_photo(&mut self) -> Option<u64> {
        let session = self.camera.as_ref()?;

        match session.capture_still() {
            Ok(still) => {
                self.cancel_camera();
                self.accept_file(LoadedFile {
                    file_name: CAPTURE_FILE_NAME.to_string(),
                    mime: "image/jpeg".to_string(),
                    bytes: still.jpeg,
                })
            }
            Err(err) => {
                warn!("could not capture photo: {err}");
                self.cancel_camera();
                self.notice = Some(Notice::CameraUnavailable);
                None
            }
        }
    }

    // ========== Submission ==========

    /// Gate and enter Loading. On success the caller receives the
    /// selection to post; on refusal nothing changes except a notice when
    /// no image is selected.
    pub fn begin_submission(&mut self) -> Result<ImageSelection, SubmitError> {
        if self.status == WorkflowStatus::Loading {
            return Err(SubmitError::AlreadyLoading);
        }
        let Some(selection) = self.selection.clone() else {
            self.notice = Some(Notice::NoImageSelected);
            return Err(SubmitError::NoSelection);
        };

        self.status = WorkflowStatus::Loading;
        self.submitted_generation = Some(self.generation);
        self.result = None;
        self.failure = None;
        self.notice = None;

        Ok(selection)
    }

    /// Complete a submission cycle. A response for a superseded selection
    /// (user picked a new image while the request was in flight) is
    /// ignored; the stale request is simply allowed to finish.
    pub fn finish_submission(&mut self, outcome: Result<PredictionResult, PredictError>) {
        if self.submitted_generation != Some(self.generation) {
            debug!("ignoring prediction response for a superseded selection");
            return;
        }
        self.submitted_generation = None;

        match outcome {
            Ok(result) => {
                info!("✅ Prediction received: {:?}", result.disease);
                self.result = Some(result);
                self.status = WorkflowStatus::Succeeded;
            }
            Err(err) => {
                error!("prediction request failed: {err}");
                self.failure = Some(err);
                self.status = WorkflowStatus::Failed;
            }
        }
    }

    // ========== Teardown ==========

    /// Release everything the workflow holds. Called when the owning view
    /// goes away; the camera stream must not outlive it.
    pub fn teardown(&mut self) {
        self.cancel_camera();
        *self = Self::default();
    }
}

impl Drop for DetectionWorkflow {
    fn drop(&mut self) {
        self.cancel_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::testing::FakeDevice;
    use std::sync::atomic::Ordering;
    use std::thread;
    use std::time::{Duration, Instant};

    fn image_file(name: &str) -> LoadedFile {
        LoadedFile {
            file_name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3, 4],
        }
    }

    fn preview() -> PreviewImage {
        PreviewImage {
            width: 2,
            height: 2,
            rgba: vec![0; 16],
        }
    }

    fn streaming_session() -> (CameraSession, std::sync::Arc<std::sync::atomic::AtomicBool>) {
        let (device, released) = FakeDevice::new();
        let session = CameraSession::start(Box::new(device));
        let deadline = Instant::now() + Duration::from_secs(2);
        while session.latest_frame().is_none() {
            assert!(Instant::now() < deadline, "no frame arrived in time");
            thread::sleep(Duration::from_millis(5));
        }
        (session, released)
    }

    #[test]
    fn test_non_image_input_changes_nothing() {
        let mut workflow = DetectionWorkflow::new();
        let accepted = workflow.accept_file(image_file("leaf.png"));
        assert!(accepted.is_some());

        let rejected = workflow.accept_file(LoadedFile {
            file_name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            bytes: vec![9, 9],
        });

        assert!(rejected.is_none());
        assert_eq!(workflow.notice(), Some(Notice::NotAnImage));
        // Prior selection and status are untouched
        assert_eq!(workflow.selection().unwrap().file_name, "leaf.png");
        assert_eq!(workflow.status(), WorkflowStatus::Idle);
    }

    #[test]
    fn test_accepting_an_image_stores_blob_and_resets() {
        let mut workflow = DetectionWorkflow::new();
        workflow.accept_file(image_file("a.png"));
        workflow.begin_submission().unwrap();
        workflow.finish_submission(Ok(PredictionResult::default()));
        assert_eq!(workflow.status(), WorkflowStatus::Succeeded);
        assert!(workflow.result().is_some());

        let file = image_file("b.png");
        let expected = file.bytes.clone();
        workflow.accept_file(file);

        assert_eq!(workflow.selection().unwrap().bytes, expected);
        assert!(workflow.result().is_none());
        assert!(workflow.failure().is_none());
        assert_eq!(workflow.status(), WorkflowStatus::Idle);
    }

    #[test]
    fn test_submit_without_selection_is_refused() {
        let mut workflow = DetectionWorkflow::new();
        let refused = workflow.begin_submission();

        assert_eq!(refused, Err(SubmitError::NoSelection));
        assert_eq!(workflow.notice(), Some(Notice::NoImageSelected));
        assert_eq!(workflow.status(), WorkflowStatus::Idle);
    }

    #[test]
    fn test_submission_gates_while_loading() {
        let mut workflow = DetectionWorkflow::new();
        workflow.accept_file(image_file("leaf.png"));

        assert!(workflow.can_submit());
        workflow.begin_submission().unwrap();
        assert_eq!(workflow.status(), WorkflowStatus::Loading);
        assert!(!workflow.can_submit());

        assert_eq!(workflow.begin_submission(), Err(SubmitError::AlreadyLoading));
    }

    #[test]
    fn test_success_response_reaches_succeeded() {
        let mut workflow = DetectionWorkflow::new();
        workflow.accept_file(image_file("leaf.png"));
        workflow.begin_submission().unwrap();

        let result = PredictionResult {
            disease: Some("Leaf Blight".to_string()),
            ..PredictionResult::default()
        };
        workflow.finish_submission(Ok(result));

        assert_eq!(workflow.status(), WorkflowStatus::Succeeded);
        assert_eq!(workflow.result().unwrap().disease.as_deref(), Some("Leaf Blight"));
        assert!(workflow.can_submit());
    }

    #[test]
    fn test_failed_response_reaches_failed_without_result() {
        let mut workflow = DetectionWorkflow::new();
        workflow.accept_file(image_file("leaf.png"));
        workflow.begin_submission().unwrap();

        workflow.finish_submission(Err(PredictError::Status { status: 500 }));

        assert_eq!(workflow.status(), WorkflowStatus::Failed);
        assert!(workflow.result().is_none());
        assert_eq!(workflow.failure(), Some(&PredictError::Status { status: 500 }));
        // The machine stays usable
        assert!(workflow.can_submit());
    }

    #[test]
    fn test_response_for_superseded_selection_is_ignored() {
        let mut workflow = DetectionWorkflow::new();
        workflow.accept_file(image_file("a.png"));
        workflow.begin_submission().unwrap();

        // User picks a new image while the request is still in flight
        workflow.accept_file(image_file("b.png"));
        assert_eq!(workflow.status(), WorkflowStatus::Idle);

        workflow.finish_submission(Ok(PredictionResult {
            disease: Some("stale".to_string()),
            ..PredictionResult::default()
        }));

        assert_eq!(workflow.status(), WorkflowStatus::Idle);
        assert!(workflow.result().is_none());
    }

    #[test]
    fn test_stale_preview_is_dropped() {
        let mut workflow = DetectionWorkflow::new();
        let first = workflow.accept_file(image_file("a.png")).unwrap();
        let second = workflow.accept_file(image_file("b.png")).unwrap();
        assert_ne!(first, second);

        workflow.attach_preview(first, preview());
        assert!(workflow.preview().is_none());

        workflow.attach_preview(second, preview());
        assert!(workflow.preview().is_some());
    }

    #[test]
    fn test_cancel_camera_releases_stream() {
        let mut workflow = DetectionWorkflow::new();
        let (session, released) = streaming_session();
        workflow.camera_opened(session);
        assert!(workflow.camera_active());

        workflow.cancel_camera();

        assert!(workflow.camera().is_none());
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_capture_photo_tears_down_and_selects() {
        let mut workflow = DetectionWorkflow::new();
        let (session, released) = streaming_session();
        workflow.camera_opened(session);

        let generation = workflow.capture_photo();

        assert!(generation.is_some());
        assert!(workflow.camera().is_none());
        assert!(released.load(Ordering::SeqCst));

        let selection = workflow.selection().unwrap();
        assert_eq!(selection.file_name, "camera-capture.jpg");
        assert_eq!(selection.mime, "image/jpeg");
        assert!(!selection.bytes.is_empty());
        assert_eq!(workflow.status(), WorkflowStatus::Idle);
    }

    #[test]
    fn test_replacing_camera_session_releases_the_old_one() {
        let mut workflow = DetectionWorkflow::new();
        let (first, first_released) = streaming_session();
        let (second, second_released) = streaming_session();

        workflow.camera_opened(first);
        workflow.camera_opened(second);

        assert!(first_released.load(Ordering::SeqCst));
        assert!(!second_released.load(Ordering::SeqCst));
        workflow.teardown();
        assert!(second_released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_camera_failure_leaves_no_session() {
        let mut workflow = DetectionWorkflow::new();
        workflow.camera_failed(&CaptureError::NoDevice);

        assert!(workflow.camera().is_none());
        assert_eq!(workflow.notice(), Some(Notice::CameraUnavailable));
    }

    #[test]
    fn test_teardown_resets_everything() {
        let mut workflow = DetectionWorkflow::new();
        workflow.accept_file(image_file("leaf.png"));
        let (session, released) = streaming_session();
        workflow.camera_opened(session);

        workflow.teardown();

        assert!(released.load(Ordering::SeqCst));
        assert!(workflow.selection().is_none());
        assert!(workflow.camera().is_none());
        assert_eq!(workflow.status(), WorkflowStatus::Idle);
    }
}
