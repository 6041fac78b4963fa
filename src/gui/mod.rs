mod app;
mod message;
mod widgets;

pub use app::VoidViewer;
pub use message::Message;

use std::ffi::OsString;

use crate::models::VoidAnalysis;

/// Environment variables that point a windowing client at a display server.
const DISPLAY_VARS: [&str; 3] = ["DISPLAY", "WAYLAND_DISPLAY", "WAYLAND_SOCKET"];

/// Whether a window can be opened in the current environment.
pub fn display_available() -> bool {
    has_display(|name| std::env::var_os(name))
}

/// X11 and Wayland need one of [`DISPLAY_VARS`] set to something non-empty.
/// Other platforms always have a desktop session.
pub fn has_display(lookup: impl Fn(&str) -> Option<OsString>) -> bool {
    if cfg!(all(unix, not(target_os = "macos"))) {
        DISPLAY_VARS
            .iter()
            .any(|name| lookup(name).is_some_and(|value| !value.is_empty()))
    } else {
        true
    }
}

/// Open the three-panel result window and block until it is closed.
pub fn show(analysis: &VoidAnalysis) -> iced::Result {
    let viewer = VoidViewer::new(analysis);

    iced::application(move || viewer.clone(), VoidViewer::update, VoidViewer::view)
        .title(VoidViewer::title)
        .window_size((1500.0, 560.0))
        .run()
}

#[cfg(all(test, unix, not(target_os = "macos")))]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            vars.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| OsString::from(v))
        }
    }

    #[test]
    fn headless_without_display_vars() {
        assert!(!has_display(env(&[])));
        assert!(!has_display(env(&[("HOME", "/root")])));
    }

    #[test]
    fn empty_display_var_does_not_count() {
        assert!(!has_display(env(&[("DISPLAY", "")])));
    }

    #[test]
    fn any_display_var_is_enough() {
        assert!(has_display(env(&[("DISPLAY", ":0")])));
        assert!(has_display(env(&[("WAYLAND_DISPLAY", "wayland-0")])));
        assert!(has_display(env(&[("WAYLAND_SOCKET", "3")])));
    }
}
