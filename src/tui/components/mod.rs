//! # TUI Components
//!
//! The three stacked regions of the Bobacom screen:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ TitleBar        (3 rows)     │  device + baud rate, rule
//! ├──────────────────────────────┤
//! │ TranscriptView  (remaining)  │  scrollable transcript
//! ├──────────────────────────────┤
//! │ InputBox        (3 rows)     │  line being composed
//! └──────────────────────────────┘
//! ```
//!
//! All three are stateless, props-based components: they borrow what they
//! need from `App` and are rebuilt every frame.

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::InputBox;
pub mod transcript_view;
pub use transcript_view::TranscriptView;
