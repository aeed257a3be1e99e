pub mod gesture;
pub mod presenter;
pub mod record;
pub mod store;
pub mod submission;
pub mod viewport;

pub use gesture::{GestureOutcome, GesturePhase, GestureTracker, Point};
pub use presenter::{DetailPanePresenter, PaneMotion, RenderDecision};
pub use record::{Category, EmailId, EmailRecord, OriginalSubmission};
pub use store::{ActiveView, TriageStore};
pub use submission::{Draft, PreparedRequest, Resolution, SubmissionController, Ticket};
pub use viewport::{ViewportClass, ViewportClassifier};
