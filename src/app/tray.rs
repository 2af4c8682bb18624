use std::sync::mpsc;

use ksni::blocking::{Handle, TrayMethods};
use ksni::menu::{StandardItem, SubMenu};
use ksni::{Icon, MenuItem, Tray};

use super::FALLBACK_ICON_NAME;

const TRAY_ID: &str = "prompt-manager";
const TRAY_TITLE: &str = "Prompt Manager";
const RESTORE_LABEL: &str = "Restore Window";
const PROMPTS_LABEL: &str = "Saved Prompts";
const EMPTY_PROMPTS_LABEL: &str = "No Prompts Saved";
const QUIT_LABEL: &str = "Quit Application";

/// Requests raised on the tray thread and handled on the GTK main thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TrayCommand {
    Restore,
    CopyPrompt(String),
    Quit,
}

/// Toolkit-free description of the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TrayMenuEntry {
    Item {
        label: String,
        command: Option<TrayCommand>,
    },
    Submenu {
        label: String,
        entries: Vec<TrayMenuEntry>,
    },
    Separator,
}

impl TrayMenuEntry {
    fn item(label: impl Into<String>, command: TrayCommand) -> Self {
        Self::Item {
            label: label.into(),
            command: Some(command),
        }
    }

    fn disabled(label: impl Into<String>) -> Self {
        Self::Item {
            label: label.into(),
            command: None,
        }
    }
}

pub(super) fn tray_menu_model(titles: &[String]) -> Vec<TrayMenuEntry> {
    let prompt_entries = if titles.is_empty() {
        vec![TrayMenuEntry::disabled(EMPTY_PROMPTS_LABEL)]
    } else {
        titles
            .iter()
            .map(|title| {
                TrayMenuEntry::item(menu_label(title), TrayCommand::CopyPrompt(title.clone()))
            })
            .collect()
    };

    vec![
        TrayMenuEntry::item(RESTORE_LABEL, TrayCommand::Restore),
        TrayMenuEntry::Separator,
        TrayMenuEntry::Submenu {
            label: PROMPTS_LABEL.to_string(),
            entries: prompt_entries,
        },
        TrayMenuEntry::Separator,
        TrayMenuEntry::item(QUIT_LABEL, TrayCommand::Quit),
    ]
}

/// Menu hosts read `_` as a mnemonic marker; doubling keeps it literal.
fn menu_label(title: &str) -> String {
    title.replace('_', "__")
}

pub(super) struct PromptTray {
    titles: Vec<String>,
    icon: Option<Icon>,
    commands: mpsc::Sender<TrayCommand>,
}

impl PromptTray {
    pub(super) fn new(
        titles: Vec<String>,
        icon: Option<Icon>,
        commands: mpsc::Sender<TrayCommand>,
    ) -> Self {
        Self {
            titles,
            icon,
            commands,
        }
    }

    fn send(&self, command: TrayCommand) {
        if let Err(err) = self.commands.send(command) {
            tracing::warn!(command = ?err.0, "main loop is gone; dropping tray command");
        }
    }
}

fn to_ksni_item(entry: TrayMenuEntry) -> MenuItem<PromptTray> {
    match entry {
        TrayMenuEntry::Item {
            label,
            command: Some(command),
        } => StandardItem {
            label,
            activate: Box::new(move |tray: &mut PromptTray| tray.send(command.clone())),
            ..Default::default()
        }
        .into(),
        TrayMenuEntry::Item {
            label,
            command: None,
        } => StandardItem {
            label,
            enabled: false,
            ..Default::default()
        }
        .into(),
        TrayMenuEntry::Submenu { label, entries } => SubMenu {
            label,
            submenu: entries.into_iter().map(to_ksni_item).collect(),
            ..Default::default()
        }
        .into(),
        TrayMenuEntry::Separator => MenuItem::Separator,
    }
}

impl Tray for PromptTray {
    fn id(&self) -> String {
        TRAY_ID.into()
    }

    fn title(&self) -> String {
        TRAY_TITLE.into()
    }

    fn icon_name(&self) -> String {
        if self.icon.is_some() {
            String::new()
        } else {
            FALLBACK_ICON_NAME.into()
        }
    }

    fn icon_pixmap(&self) -> Vec<Icon> {
        self.icon.iter().cloned().collect()
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        self.send(TrayCommand::Restore);
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        tray_menu_model(&self.titles)
            .into_iter()
            .map(to_ksni_item)
            .collect()
    }
}

/// Owns the running status notifier item, if the session has a tray host.
pub(super) struct TrayController {
    handle: Option<Handle<PromptTray>>,
}

impl TrayController {
    pub(super) fn spawn(tray: PromptTray) -> Self {
        let handle = match tray.spawn() {
            Ok(handle) => {
                tracing::info!("tray icon registered");
                Some(handle)
            }
            Err(err) => {
                tracing::warn!(?err, "tray unavailable; window close will quit");
                None
            }
        };
        Self { handle }
    }

    pub(super) fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Pushes a fresh title snapshot so the submenu matches the collection.
    pub(super) fn refresh(&self, titles: Vec<String>) {
        let Some(handle) = &self.handle else {
            return;
        };
        let count = titles.len();
        if handle.update(move |tray| tray.titles = titles).is_none() {
            tracing::warn!("tray service stopped; menu not refreshed");
        } else {
            tracing::debug!(count, "refreshed tray prompt menu");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submenu_entries(model: &[TrayMenuEntry]) -> &[TrayMenuEntry] {
        model
            .iter()
            .find_map(|entry| match entry {
                TrayMenuEntry::Submenu { entries, .. } => Some(entries.as_slice()),
                _ => None,
            })
            .expect("prompts submenu")
    }

    #[test]
    fn menu_layout_has_restore_prompts_and_quit() {
        let model = tray_menu_model(&[]);
        assert_eq!(model.len(), 5);
        assert_eq!(
            model[0],
            TrayMenuEntry::item(RESTORE_LABEL, TrayCommand::Restore)
        );
        assert_eq!(model[1], TrayMenuEntry::Separator);
        assert_eq!(model[3], TrayMenuEntry::Separator);
        assert_eq!(model[4], TrayMenuEntry::item(QUIT_LABEL, TrayCommand::Quit));
    }

    #[test]
    fn empty_collection_shows_disabled_placeholder() {
        let model = tray_menu_model(&[]);
        assert_eq!(
            submenu_entries(&model),
            &[TrayMenuEntry::disabled(EMPTY_PROMPTS_LABEL)]
        );
    }

    #[test]
    fn prompt_entries_follow_collection_order() {
        let titles = vec!["Zeta".to_string(), "Alpha".to_string()];
        let model = tray_menu_model(&titles);
        assert_eq!(
            submenu_entries(&model),
            &[
                TrayMenuEntry::item("Zeta", TrayCommand::CopyPrompt("Zeta".into())),
                TrayMenuEntry::item("Alpha", TrayCommand::CopyPrompt("Alpha".into())),
            ]
        );
    }

    #[test]
    fn underscores_stay_literal_but_command_keeps_real_title() {
        let titles = vec!["snake_case".to_string()];
        let model = tray_menu_model(&titles);
        assert_eq!(
            submenu_entries(&model),
            &[TrayMenuEntry::item(
                "snake__case",
                TrayCommand::CopyPrompt("snake_case".into())
            )]
        );
    }

    #[test]
    fn activation_and_menu_items_send_commands() {
        let (tx, rx) = mpsc::channel();
        let mut tray = PromptTray::new(vec!["Greeting".into()], None, tx);

        tray.activate(0, 0);
        tray.send(TrayCommand::CopyPrompt("Greeting".into()));

        assert_eq!(rx.try_recv().expect("restore"), TrayCommand::Restore);
        assert_eq!(
            rx.try_recv().expect("copy"),
            TrayCommand::CopyPrompt("Greeting".into())
        );
    }

    #[test]
    fn icon_name_is_fallback_only_without_pixmap() {
        let (tx, _rx) = mpsc::channel();
        let tray = PromptTray::new(Vec::new(), None, tx.clone());
        assert_eq!(tray.icon_name(), FALLBACK_ICON_NAME);
        assert!(tray.icon_pixmap().is_empty());

        let icon = Icon {
            width: 1,
            height: 1,
            data: vec![255, 0, 0, 0],
        };
        let tray = PromptTray::new(Vec::new(), Some(icon), tx);
        assert!(tray.icon_name().is_empty());
        assert_eq!(tray.icon_pixmap().len(), 1);
    }
}
