pub mod flow;
pub mod style;
pub mod widgets;

pub use flow::{compute_flow_layout, row_count, FlowCell};
pub use style::{StyleTokens, LAYOUT_TOKENS};
pub use widgets::{prompt_button, section_label, PromptActivation};
