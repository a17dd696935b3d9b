//! Labeling callbacks.
//!
//! Digit keys 1-9 and the class buttons both arrive as `label-image` with a
//! zero-based class index. A successful label auto-advances, so the loader
//! runs afterwards to show the next image.

use crate::callbacks::ImageLoader;
use crate::state::{LabelError, Session};
use crate::AppWindow;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Sets up the labeling callback on the UI.
pub fn setup_annotation_callbacks(
    ui: &AppWindow,
    loader: ImageLoader,
    session: Rc<RefCell<Option<Session>>>,
) {
    let ui_weak = ui.as_weak();
    ui.on_label_image(move |class_index| {
        if class_index < 0 {
            return;
        }
        let class_index = class_index as usize;

        let (next_index, status) = {
            let mut guard = session.borrow_mut();
            let Some(sess) = guard.as_mut() else { return };
            let filename = sess.current().filename.clone();

            match sess.label(class_index) {
                Ok(()) => {
                    let class_name = sess.classes()[class_index].clone();
                    (
                        Some(sess.current_index()),
                        Some(format!("{filename} -> {class_name}")),
                    )
                }
                // A digit beyond the configured classes is not an event
                // worth reporting; nothing was written.
                Err(LabelError::InvalidClass(_)) => (None, None),
                Err(err) => (None, Some(err.to_string())),
            }
        };

        if let Some(index) = next_index {
            loader(index);
        }
        if let (Some(message), Some(ui)) = (status, ui_weak.upgrade()) {
            ui.set_status_text(message.into());
        }
    });
}
