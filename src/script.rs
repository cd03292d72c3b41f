//! Batch-command interpreter
//!
//! Reads whitespace-separated commands (`load in.png blur mosaic 500 save
//! out.png quit`) and drives an [`ImageModel`], reporting progress through a
//! [`View`]. A failing command is reported and the script carries on.

use std::io::{self, Write};
use std::path::Path;

use log::warn;

use crate::error::FilterError;
use crate::filters::parse_filter_str;
use crate::grid::Rgb24Image;
use crate::model::{ImageModel, ModelError};
use crate::rng::SeedSource;

/// Where the interpreter reports what it is doing.
pub trait View {
    /// Show a one-line message.
    fn show_message(&mut self, message: &str) -> io::Result<()>;

    /// Ask for an image to be loaded.
    fn prompt_for_image(&mut self) -> io::Result<()>;

    /// Show the current image and wait for the next command.
    fn update(&mut self, image: &Rgb24Image) -> io::Result<()>;
}

/// A [`View`] that writes plain text lines.
pub struct TextView<W: Write> {
    out: W,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the view and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> View for TextView<W> {
    fn show_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    fn prompt_for_image(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Please load an image by typing 'load', then followed by the image name to begin."
        )
    }

    fn update(&mut self, image: &Rgb24Image) -> io::Result<()> {
        writeln!(
            self.out,
            "Current image: {}x{}. Waiting for a command:",
            image.width(),
            image.height()
        )
    }
}

/// What happened during a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Commands read, including failed and unrecognized ones
    pub commands: usize,
    /// Commands that reported an error
    pub errors: usize,
    /// True if the script ended with `quit` or `exit`
    pub quit: bool,
}

/// Outcome of one command.
enum Step {
    Done,
    Failed,
    Quit,
}

/// Run every command in `script` against `model`.
///
/// Only a failure to write to `view` aborts the run.
pub fn run_script<R: SeedSource, V: View>(
    script: &str,
    model: &mut ImageModel<R>,
    view: &mut V,
) -> io::Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();
    let mut tokens = script.split_whitespace();

    view.show_message("Program has started.")?;
    view.prompt_for_image()?;

    while let Some(command) = tokens.next() {
        summary.commands += 1;

        match run_command(command, &mut tokens, model, view)? {
            Step::Done => {}
            Step::Failed => summary.errors += 1,
            Step::Quit => {
                summary.quit = true;
                return Ok(summary);
            }
        }

        match model.image() {
            Some(image) => view.update(image)?,
            None => view.prompt_for_image()?,
        }
    }

    Ok(summary)
}

fn run_command<'a, R: SeedSource, V: View>(
    command: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
    model: &mut ImageModel<R>,
    view: &mut V,
) -> io::Result<Step> {
    let name = command.to_lowercase();
    match name.as_str() {
        "load" => {
            view.show_message("Load the image:")?;
            let Some(path) = tokens.next() else {
                return missing_argument(view, "load");
            };
            view.show_message(&format!("Loading {}", path))?;
            let result = model.load_image(Path::new(path));
            report(view, result, &format!("Loaded {}", path))
        }
        "save" => {
            view.show_message("Save the image:")?;
            let Some(path) = tokens.next() else {
                return missing_argument(view, "save");
            };
            view.show_message(&format!("Saving {}", path))?;
            let result = model.save_image(Path::new(path));
            report(view, result, &format!("Image saved as: {}", path))
        }
        "mosaic" => {
            let Some(arg) = tokens.next() else {
                return missing_argument(view, "mosaic");
            };
            let Ok(seeds) = arg.parse::<i64>() else {
                view.show_message(&format!("Error applying Mosaic, \"{}\" not a integer.", arg))?;
                return Ok(Step::Failed);
            };
            if seeds <= 0 {
                view.show_message(&FilterError::InvalidSeedCount(seeds).to_string())?;
                return Ok(Step::Failed);
            }
            view.show_message(&format!(
                "Applying a mosaic with {} seeds. (this might take a while)",
                seeds
            ))?;
            let result = model.apply_mosaic(seeds as usize);
            report(view, result, &format!("Mosaic applied: {} seeds", seeds))
        }
        "crop" => {
            let mut bounds = [0usize; 4];
            for bound in bounds.iter_mut() {
                let Some(arg) = tokens.next() else {
                    return missing_argument(view, "crop");
                };
                let Ok(value) = arg.parse::<usize>() else {
                    let message = format!("Error applying crop, \"{}\" not a valid index.", arg);
                    view.show_message(&message)?;
                    return Ok(Step::Failed);
                };
                *bound = value;
            }
            let [start_x, start_y, end_x, end_y] = bounds;
            view.show_message("Applying crop.")?;
            let result = model.crop(start_x, start_y, end_x, end_y);
            report(view, result, "Applied crop.")
        }
        "quit" | "exit" => {
            view.show_message("Exiting program.")?;
            Ok(Step::Quit)
        }
        other => match parse_filter_str(other) {
            Ok(filter) => {
                let label = filter.label();
                view.show_message(&format!("Applying {}.", label))?;
                let result = model.apply(&filter);
                report(view, result, &format!("Applied {}.", label))
            }
            Err(_) => {
                view.show_message(&format!("Command not recognized: {}", command))?;
                Ok(Step::Failed)
            }
        },
    }
}

fn report<V: View>(
    view: &mut V,
    result: Result<(), ModelError>,
    success: &str,
) -> io::Result<Step> {
    match result {
        Ok(()) => {
            view.show_message(success)?;
            Ok(Step::Done)
        }
        Err(err) => {
            warn!("{}", err);
            view.show_message(&err.to_string())?;
            Ok(Step::Failed)
        }
    }
}

fn missing_argument<V: View>(view: &mut V, command: &str) -> io::Result<Step> {
    view.show_message(&format!("Missing argument for {}.", command))?;
    Ok(Step::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Filter;
    use crate::grid::RgbGrid;
    use crate::io::save_image;
    use tempfile::TempDir;

    /// Records every call so tests can compare the exact sequence.
    #[derive(Default)]
    struct RecordingView {
        log: Vec<String>,
    }

    impl View for RecordingView {
        fn show_message(&mut self, message: &str) -> io::Result<()> {
            self.log.push(format!("show message: {}", message));
            Ok(())
        }

        fn prompt_for_image(&mut self) -> io::Result<()> {
            self.log.push("Prompting for an image.".to_string());
            Ok(())
        }

        fn update(&mut self, _image: &Rgb24Image) -> io::Result<()> {
            self.log.push("Prompting for input.".to_string());
            Ok(())
        }
    }

    fn write_png(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        let grid = RgbGrid::from_fn(8, 6, |r, c| [(r * 30) as i32, (c * 30) as i32, 77]);
        save_image(&Rgb24Image::new(grid), &path).unwrap();
        path.display().to_string()
    }

    fn run(script: &str) -> (RecordingView, ScriptSummary, ImageModel) {
        let mut model = ImageModel::new();
        let mut view = RecordingView::default();
        let summary = run_script(script, &mut model, &mut view).unwrap();
        (view, summary, model)
    }

    #[test]
    fn test_full_script() {
        let dir = TempDir::new().unwrap();
        let input = write_png(&dir, "in.png");
        let output = dir.path().join("out.png").display().to_string();

        let script = format!("load {} blur sharpen grayscale sepia dither mosaic 4 save {} quit", input, output);
        let (view, summary, _) = run(&script);

        let expected = vec![
            "show message: Program has started.".to_string(),
            "Prompting for an image.".to_string(),
            "show message: Load the image:".to_string(),
            format!("show message: Loading {}", input),
            format!("show message: Loaded {}", input),
            "Prompting for input.".to_string(),
            "show message: Applying blur.".to_string(),
            "show message: Applied blur.".to_string(),
            "Prompting for input.".to_string(),
            "show message: Applying sharpen.".to_string(),
            "show message: Applied sharpen.".to_string(),
            "Prompting for input.".to_string(),
            "show message: Applying greyscale.".to_string(),
            "show message: Applied greyscale.".to_string(),
            "Prompting for input.".to_string(),
            "show message: Applying sepia.".to_string(),
            "show message: Applied sepia.".to_string(),
            "Prompting for input.".to_string(),
            "show message: Applying dithering.".to_string(),
            "show message: Applied dithering.".to_string(),
            "Prompting for input.".to_string(),
            "show message: Applying a mosaic with 4 seeds. (this might take a while)".to_string(),
            "show message: Mosaic applied: 4 seeds".to_string(),
            "Prompting for input.".to_string(),
            "show message: Save the image:".to_string(),
            format!("show message: Saving {}", output),
            format!("show message: Image saved as: {}", output),
            "Prompting for input.".to_string(),
            "show message: Exiting program.".to_string(),
        ];
        assert_eq!(view.log, expected);
        assert_eq!(summary, ScriptSummary { commands: 9, errors: 0, quit: true });
        assert!(dir.path().join("out.png").exists());
    }

    #[test]
    fn test_filter_before_load_is_reported() {
        let (view, summary, model) = run("blur");
        assert_eq!(
            view.log,
            vec![
                "show message: Program has started.",
                "Prompting for an image.",
                "show message: Applying blur.",
                "show message: Image must be loaded before applying blur.",
                "Prompting for an image.",
            ]
        );
        assert_eq!(summary.errors, 1);
        assert!(!summary.quit);
        assert!(!model.is_loaded());
    }

    #[test]
    fn test_bad_mosaic_arguments() {
        let dir = TempDir::new().unwrap();
        let input = write_png(&dir, "in.png");
        let (view, summary, _) = run(&format!("load {} mosaic many mosaic -3 mosaic 0", input));

        assert!(view.log.contains(&"show message: Error applying Mosaic, \"many\" not a integer.".to_string()));
        assert!(view.log.contains(&"show message: Number of mosaic seeds must be positive, got -3".to_string()));
        assert!(view.log.contains(&"show message: Number of mosaic seeds must be positive, got 0".to_string()));
        assert_eq!(summary.errors, 3);
    }

    #[test]
    fn test_unknown_command_and_case_insensitivity() {
        let (view, summary, _) = run("Emboss QUIT");
        assert!(view.log.contains(&"show message: Command not recognized: Emboss".to_string()));
        assert_eq!(view.log.last().unwrap(), "show message: Exiting program.");
        assert_eq!(summary, ScriptSummary { commands: 2, errors: 1, quit: true });
    }

    #[test]
    fn test_filter_commands_use_filter_labels() {
        let dir = TempDir::new().unwrap();
        let input = write_png(&dir, "in.png");
        let (view, summary, _) = run(&format!("load {} GrayScale EdgeDetection HistogramEqualization", input));

        for filter in [Filter::Greyscale, Filter::EdgeDetection, Filter::HistogramEqualization] {
            assert!(view.log.contains(&format!("show message: Applying {}.", filter.label())));
            assert!(view.log.contains(&format!("show message: Applied {}.", filter.label())));
        }
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn test_commands_after_quit_are_ignored() {
        let (_, summary, _) = run("exit blur blur");
        assert_eq!(summary.commands, 1);
        assert!(summary.quit);
    }

    #[test]
    fn test_missing_load_argument() {
        let (view, summary, _) = run("load");
        assert!(view.log.contains(&"show message: Missing argument for load.".to_string()));
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_load_failure_keeps_prompting() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png").display().to_string();
        let (view, summary, model) = run(&format!("load {}", missing));

        assert_eq!(summary.errors, 1);
        assert!(!model.is_loaded());
        assert_eq!(view.log.last().unwrap(), "Prompting for an image.");
    }

    #[test]
    fn test_crop_command() {
        let dir = TempDir::new().unwrap();
        let input = write_png(&dir, "in.png");
        let (_, summary, model) = run(&format!("load {} crop 1 2 5 6 crop 0 0 9 9", input));

        assert_eq!(summary.errors, 1);
        let grid = model.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 4));
    }

    #[test]
    fn test_crop_with_bad_index() {
        let (view, summary, _) = run("crop 0 z");
        assert!(view.log.contains(&"show message: Error applying crop, \"z\" not a valid index.".to_string()));
        assert_eq!(summary, ScriptSummary { commands: 1, errors: 1, quit: false });
    }

    #[test]
    fn test_text_view_output() {
        let mut model = ImageModel::new();
        let mut view = TextView::new(Vec::new());
        run_script("hello", &mut model, &mut view).unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.starts_with("Program has started.\nPlease load an image"));
        assert!(text.contains("Command not recognized: hello\n"));
    }
}
