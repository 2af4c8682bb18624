/// Compile-time layout tokens, not user-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub control_radius: u16,
    pub border_width: u16,
    pub window_min_width: i32,
    pub window_min_height: i32,
    pub editor_panel_width: i32,
    pub prompt_button_max_chars: i32,
    pub content_min_height: i32,
    pub command_poll_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    control_radius: 8,
    border_width: 1,
    window_min_width: 420,
    window_min_height: 320,
    editor_panel_width: 360,
    prompt_button_max_chars: 32,
    content_min_height: 160,
    command_poll_ms: 50,
};
