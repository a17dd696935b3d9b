slint::include_modules!();

mod callbacks;
mod config;
mod export;
mod state;
mod utils;

use slint::{ModelRc, VecModel};
use state::Session;
use std::cell::RefCell;
use std::rc::Rc;

/// Build the class panel model: one entry per configured class, captioned
/// with its digit shortcut, with the current image's recorded class marked
/// and the per-class annotation counts alongside.
fn class_options(session: Option<&Session>, config: &config::AppConfig) -> Vec<ClassOption> {
    let classes: &[String] = session
        .map(|s| s.classes())
        .unwrap_or(config.classes.as_slice());
    let counts = session
        .map(|s| s.class_counts())
        .unwrap_or_else(|| vec![0; classes.len()]);
    let recorded = session
        .and_then(|s| s.current_annotation())
        .map(|r| r.class_index);

    classes
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let marker = if recorded == Some(i) { "  *" } else { "" };
            ClassOption {
                index: i as i32,
                label: format!("{}. {}{}", i + 1, name, marker).into(),
                count_label: format!("{}: {}", name, counts[i]).into(),
            }
        })
        .collect()
}

fn main() -> Result<(), slint::PlatformError> {
    let config = Rc::new(config::load_config());
    let ui = AppWindow::new()?;

    ui.set_display_width(config.display_width as f32);
    ui.set_display_height(config.display_height as f32);
    ui.set_output_path(config.output_path().display().to_string().into());
    ui.set_shortcut_hint(format!("1-{}: Assign class", config.classes.len()).into());
    ui.set_class_options(ModelRc::new(VecModel::from(class_options(None, &config))));

    let placeholder = utils::placeholder_image();
    ui.set_image_source(placeholder.clone());
    ui.set_status_text("No folder selected. Open an image folder to begin.".into());

    // Populated when a folder is opened; replaced wholesale on reopen.
    let session: Rc<RefCell<Option<Session>>> = Rc::new(RefCell::new(None));

    // Shared loader: display the image at the given index and refresh every
    // session-derived property (filename, progress, class panel).
    let loader: callbacks::ImageLoader = {
        let ui_handle = ui.as_weak();
        let session = session.clone();
        let config = config.clone();
        let placeholder = placeholder.clone();
        Rc::new(move |index: usize| {
            let mut guard = session.borrow_mut();
            let Some(sess) = guard.as_mut() else { return };
            sess.seek(index);

            let entry = sess.current().clone();
            let (image, status_msg, dims) = match slint::Image::load_from_path(&entry.path) {
                Ok(img) => {
                    let size = img.size();
                    (
                        img,
                        format!("Loaded {}", entry.path.display()),
                        Some((size.width, size.height)),
                    )
                }
                Err(_) => (
                    placeholder.clone(),
                    format!("Cannot load image: {}", entry.path.display()),
                    None,
                ),
            };

            let image_name = match dims {
                Some((w, h)) => format!("{} - {}x{}px", entry.filename, w, h),
                None => entry.filename.clone(),
            };
            let progress = format!(
                "Image {} / {} ({} annotated)",
                sess.current_index() + 1,
                sess.len(),
                sess.annotated_count()
            );
            let options = class_options(Some(&*sess), &config);

            if let Some(ui) = ui_handle.upgrade() {
                ui.set_image_source(image);
                ui.set_image_name(image_name.into());
                ui.set_progress_text(progress.into());
                ui.set_status_text(status_msg.into());
                ui.set_class_options(ModelRc::new(VecModel::from(options)));
            }
        })
    };

    callbacks::file_ops::setup_file_callbacks(&ui, loader.clone(), session.clone(), config.clone());
    callbacks::navigation::setup_navigation_callbacks(&ui, loader.clone(), session.clone());
    callbacks::annotation::setup_annotation_callbacks(&ui, loader, session);

    ui.run()
}
