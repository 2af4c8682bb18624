use crate::ui::StyleTokens;
use gtk4::CssProvider;

fn runtime_css(tokens: StyleTokens) -> String {
    format!(
        "
.prompt-manager-root .section-title {{
  font-weight: 600;
  margin-bottom: {spacing_4}px;
}}
.prompt-manager-root .prompt-content {{
  border-radius: {control_radius}px;
  border: {border_width}px solid alpha(currentColor, 0.18);
}}
.prompt-manager-root .prompt-content textview {{
  padding: {spacing_4}px;
}}
button.prompt-button {{
  border-radius: {control_radius}px;
  padding: {spacing_4}px {spacing_12}px;
}}
.prompt-manager-root .status-line {{
  font-size: smaller;
  opacity: 0.8;
  padding-top: {spacing_4}px;
}}
dialog.dialog-warning .dialog-vbox label,
dialog.dialog-error .dialog-vbox label {{
  padding: {spacing_8}px 0;
}}
dialog.dialog-error .dialog-vbox label {{
  color: @error_color;
}}
",
        spacing_4 = tokens.spacing_4,
        spacing_8 = tokens.spacing_8,
        spacing_12 = tokens.spacing_12,
        control_radius = tokens.control_radius,
        border_width = tokens.border_width,
    )
}

pub(super) fn install_runtime_css(tokens: StyleTokens) {
    let provider = CssProvider::new();
    provider.load_from_data(&runtime_css(tokens));
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no display available; runtime css not installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::LAYOUT_TOKENS;

    #[test]
    fn css_uses_layout_tokens() {
        let css = runtime_css(LAYOUT_TOKENS);
        assert!(css.contains("border-radius: 8px;"));
        assert!(css.contains("padding: 4px 12px;"));
        assert!(!css.contains("{spacing"));
    }
}
