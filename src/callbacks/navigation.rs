//! Navigation callbacks for image traversal.
//!
//! Arrow keys and the prev/next buttons land here. The cursor move happens
//! inside the session borrow; the borrow is dropped before the loader runs,
//! since the loader borrows the session itself.

use crate::callbacks::ImageLoader;
use crate::state::Session;
use crate::AppWindow;
use std::cell::RefCell;
use std::rc::Rc;

/// Sets up all navigation-related callbacks on the UI.
pub fn setup_navigation_callbacks(
    ui: &AppWindow,
    loader: ImageLoader,
    session: Rc<RefCell<Option<Session>>>,
) {
    setup_next_image(ui, loader.clone(), session.clone());
    setup_prev_image(ui, loader, session);
}

fn setup_next_image(
    ui: &AppWindow,
    loader: ImageLoader,
    session: Rc<RefCell<Option<Session>>>,
) {
    ui.on_next_image(move || {
        let next_idx = {
            let mut guard = session.borrow_mut();
            let Some(sess) = guard.as_mut() else { return };
            sess.advance();
            sess.current_index()
        };

        loader(next_idx);
    });
}

fn setup_prev_image(
    ui: &AppWindow,
    loader: ImageLoader,
    session: Rc<RefCell<Option<Session>>>,
) {
    ui.on_prev_image(move || {
        let prev_idx = {
            let mut guard = session.borrow_mut();
            let Some(sess) = guard.as_mut() else { return };
            sess.retreat();
            sess.current_index()
        };

        loader(prev_idx);
    });
}
