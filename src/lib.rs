//! StudyFlow - step through a study plan one section at a time
//!
//! A study plan (summary, concept map, objectives, worked examples and a short
//! quiz) is presented as an ordered sequence of sections. Navigation, quiz
//! grading and completion live in a pure state machine; the terminal UI and
//! the HTML renderer are presentation layers over it.

pub mod app;
pub mod config;
pub mod flow;
pub mod plan;
pub mod theme;
pub mod transition;
pub mod ui;
pub mod view;

pub use app::App;
pub use config::Config;
pub use flow::StudyFlow;
pub use plan::StudyPlan;
pub use theme::Theme;
