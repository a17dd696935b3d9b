//! File operation callbacks.
//!
//! Handles: folder selection through the native picker, and the explicit
//! save triggered by Ctrl+S or the Save button.

use crate::callbacks::ImageLoader;
use crate::config::AppConfig;
use crate::state::Session;
use crate::AppWindow;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Sets up all file operation callbacks on the UI.
pub fn setup_file_callbacks(
    ui: &AppWindow,
    loader: ImageLoader,
    session: Rc<RefCell<Option<Session>>>,
    config: Rc<AppConfig>,
) {
    setup_open_folder(ui, loader, session.clone(), config);
    setup_save_annotations(ui, session);
}

fn setup_open_folder(
    ui: &AppWindow,
    loader: ImageLoader,
    session: Rc<RefCell<Option<Session>>>,
    config: Rc<AppConfig>,
) {
    let ui_weak = ui.as_weak();
    ui.on_open_folder(move || {
        let folder = rfd::FileDialog::new()
            .set_title("Select Image Folder")
            .pick_folder();
        let Some(folder) = folder else { return };

        match Session::open(&folder, &config) {
            Ok(new_session) => {
                let count = new_session.len();
                *session.borrow_mut() = Some(new_session);

                loader(0);

                if let Some(ui) = ui_weak.upgrade() {
                    ui.set_status_text(
                        format!("Opened {} ({count} images)", folder.display()).into(),
                    );
                }
            }
            // Keep whatever session was active; an empty or unreadable
            // folder must not tear down the one being worked on.
            Err(e) => {
                if let Some(ui) = ui_weak.upgrade() {
                    ui.set_status_text(format!("{}: {e}", folder.display()).into());
                }
            }
        }
    });
}

fn setup_save_annotations(ui: &AppWindow, session: Rc<RefCell<Option<Session>>>) {
    let ui_weak = ui.as_weak();
    ui.on_save_annotations(move || {
        if let (Ok(guard), Some(ui)) = (session.try_borrow(), ui_weak.upgrade()) {
            if let Some(sess) = guard.as_ref() {
                match sess.export() {
                    Ok(()) => ui.set_status_text(
                        format!("Saved to {}", sess.output_path().display()).into(),
                    ),
                    Err(e) => ui.set_status_text(format!("Save failed: {e}").into()),
                }
            }
        }
    });
}
