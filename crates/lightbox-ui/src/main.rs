mod app;
mod helpers;
mod input;
mod settings;

use std::path::Path;

use walkdir::WalkDir;

use crate::settings::Settings;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

fn main() -> eframe::Result {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if args.is_empty() { vec![".".to_owned()] } else { args };
    let images = gather_images(&inputs);
    if images.is_empty() {
        eprintln!("lightbox: no images found in the given paths");
        std::process::exit(1);
    }
    lightbox_log!("[scan] {} images from {} inputs", images.len(), inputs.len());

    let settings_path = settings::default_path();
    let settings = match settings_path.as_deref().map(Settings::load_or_create) {
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            eprintln!("[settings] {e:#} - using defaults for this session");
            Settings::default()
        }
        None => Settings::default(),
    };

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("Lightbox")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lightbox",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::LightboxApp::new(cc, images, settings, settings_path)))
        }),
    )
}

/// Expand the command-line inputs into an ordered list of image paths.
///
/// Directories contribute their image files (one level deep, sorted per
/// directory); explicit files are taken as given, extension or not — if the
/// user names it, we try to decode it. Input order is preserved across
/// batches so `lightbox a/ b/` shows all of `a` before `b`.
fn gather_images(inputs: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let mut batch: Vec<String> = WalkDir::new(path)
                .max_depth(1)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file() && has_image_extension(e.path()))
                .map(|e| e.path().to_string_lossy().into_owned())
                .collect();
            batch.sort();
            out.extend(batch);
        } else if path.is_file() {
            out.push(input.clone());
        } else {
            eprintln!("[scan] skipping {input}: not a file or directory");
        }
    }
    out
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn directories_contribute_sorted_image_files_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png"));
        touch(&dir.path().join("a.JPG"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub").join("deep.png"));

        let input = dir.path().to_string_lossy().into_owned();
        let images = gather_images(&[input]);

        let names: Vec<_> = images
            .iter()
            .map(|p| Path::new(p).file_name().unwrap().to_str().unwrap())
            .collect();
        // Sorted, case-insensitive extension match, one level deep only.
        assert_eq!(names, vec!["a.JPG", "b.png"]);
    }

    #[test]
    fn explicit_files_are_kept_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("2.png");
        let first = dir.path().join("1.png");
        touch(&second);
        touch(&first);

        let images = gather_images(&[
            second.to_string_lossy().into_owned(),
            first.to_string_lossy().into_owned(),
        ]);
        assert_eq!(images.len(), 2);
        assert!(images[0].ends_with("2.png"));
        assert!(images[1].ends_with("1.png"));
    }

    #[test]
    fn missing_inputs_are_skipped() {
        let images = gather_images(&["/no/such/path".to_owned()]);
        assert!(images.is_empty());
    }
}
