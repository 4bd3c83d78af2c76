use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{FrameRenderer, Palette};
use crate::application::FrameSink;
use crate::domain::Frame;
use crate::error::{LifeError, Result};

/// Streams rendered frames into one looping animated PNG.
///
/// Frames are encoded as they arrive into a `.partial` file beside the target,
/// which is renamed into place only once every expected frame has been
/// written. A failed or abandoned export removes the partial file.
pub struct AnimationExporter {
    target: PathBuf,
    partial: PathBuf,
    renderer: FrameRenderer,
    palette: Palette,
    interval_ms: u16,
    expected_frames: usize,
    written: usize,
    size: Option<(u32, u32)>,
    writer: Option<png::Writer<File>>,
}

impl AnimationExporter {
    /// `expected_frames` is written into the animation header up front, so it
    /// must match the number of frames the run will emit.
    pub fn new(
        target: impl Into<PathBuf>,
        renderer: FrameRenderer,
        palette: Palette,
        interval_ms: u16,
        expected_frames: usize,
    ) -> Self {
        let target = target.into();
        Self {
            partial: partial_path(&target),
            target,
            renderer,
            palette,
            interval_ms,
            expected_frames,
            written: 0,
            size: None,
            writer: None,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn frame_count(&self) -> usize {
        self.written
    }

    /// Close the animation and move it onto the target path
    pub fn finish(mut self) -> Result<PathBuf> {
        let Some(writer) = self.writer.take() else {
            return Err(LifeError::EmptyAnimation(self.target.clone()));
        };

        if self.written != self.expected_frames {
            drop(writer);
            self.remove_partial();
            return Err(LifeError::IncompleteAnimation {
                written: self.written,
                expected: self.expected_frames,
            });
        }

        if let Err(e) = writer.finish() {
            self.remove_partial();
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&self.partial, &self.target) {
            self.remove_partial();
            return Err(LifeError::io(&self.target, e));
        }

        let (width, height) = self.size.unwrap_or_default();
        info!(
            "Wrote {} frames ({}x{} px) to {}",
            self.written,
            width,
            height,
            self.target.display()
        );
        Ok(self.target.clone())
    }

    /// Open the partial file and write the animation header
    fn start(&self, width: u32, height: u32) -> Result<png::Writer<File>> {
        if let Some(parent) = self.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LifeError::io(parent, e))?;
        }
        let file = File::create(&self.partial).map_err(|e| LifeError::io(&self.partial, e))?;

        let mut encoder = png::Encoder::new(file, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(self.palette.to_plte());
        // 0 plays means loop forever
        encoder.set_animated(self.expected_frames as u32, 0)?;
        encoder.set_frame_delay(self.interval_ms, 1000)?;
        Ok(encoder.write_header()?)
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let size = self.renderer.image_size(frame);
        if self.writer.is_none() {
            self.size = Some(size);
            self.writer = Some(self.start(size.0, size.1)?);
        }
        debug_assert_eq!(self.size, Some(size), "frame size changed mid-run");

        if self.written == self.expected_frames {
            return Err(LifeError::IncompleteAnimation {
                written: self.written + 1,
                expected: self.expected_frames,
            });
        }
        let pixels = self.renderer.render(frame);
        if let Some(writer) = self.writer.as_mut() {
            writer.write_image_data(&pixels)?;
        }
        self.written += 1;
        Ok(())
    }

    fn remove_partial(&self) {
        if let Err(e) = fs::remove_file(&self.partial) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Could not remove {}: {e}", self.partial.display());
            }
        }
    }
}

impl FrameSink for AnimationExporter {
    fn on_frame(&mut self, frame: Frame, generation: u64) -> Result<()> {
        if let Err(e) = self.write_frame(&frame) {
            self.writer = None;
            self.remove_partial();
            return Err(e);
        }
        debug!("Encoded generation {generation} ({} live cells)", frame.population());
        Ok(())
    }
}

impl Drop for AnimationExporter {
    fn drop(&mut self) {
        // Still open means the export was never finished
        if self.writer.take().is_some() {
            self.remove_partial();
        }
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grid;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("life_frames_{tag}_{}_{nanos}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn blinker_frames() -> Vec<Frame> {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.seed(&[(2, 1), (2, 2), (2, 3)]);
        let mut vertical = Grid::new(5, 5).unwrap();
        vertical.seed(&[(1, 2), (2, 2), (3, 2)]);
        vec![grid.snapshot(), vertical.snapshot(), grid.snapshot()]
    }

    fn exporter(target: &Path, expected_frames: usize) -> AnimationExporter {
        AnimationExporter::new(target, FrameRenderer::new(3), Palette::default(), 88, expected_frames)
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(partial_path(Path::new("img/brain.png")), PathBuf::from("img/brain.png.partial"));
    }

    #[test]
    fn test_writes_animated_png() {
        let dir = scratch_dir("apng");
        let target = dir.join("nested").join("blinker.png");
        let mut exporter = exporter(&target, 3);

        for (generation, frame) in blinker_frames().into_iter().enumerate() {
            exporter.on_frame(frame, generation as u64).unwrap();
        }
        assert_eq!(exporter.frame_count(), 3);
        assert!(partial_path(&target).exists());
        assert!(!target.exists());

        let written = exporter.finish().unwrap();
        assert_eq!(written, target);
        assert!(!partial_path(&target).exists());

        let decoder = png::Decoder::new(File::open(&target).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (15, 15));
        assert_eq!(info.color_type, png::ColorType::Indexed);
        let control = info.animation_control.expect("acTL chunk");
        assert_eq!(control.num_frames, 3);
        assert_eq!(control.num_plays, 0);
        let first = info.frame_control.expect("fcTL chunk");
        assert_eq!((first.delay_num, first.delay_den), (88, 1000));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_animation_is_an_error() {
        let dir = scratch_dir("empty");
        let target = dir.join("none.png");

        let err = exporter(&target, 0).finish().unwrap_err();
        assert!(matches!(err, LifeError::EmptyAnimation(_)));
        assert!(!target.exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_failed_write_leaves_no_artifact() {
        let dir = scratch_dir("blocked");
        // A regular file where the output directory should be
        let blocker = dir.join("img");
        fs::write(&blocker, b"not a directory").unwrap();
        let target = blocker.join("out.png");

        let mut exporter = exporter(&target, 1);
        let err = exporter.on_frame(blinker_frames().remove(0), 0).unwrap_err();
        assert!(matches!(err, LifeError::Io { .. }));
        assert!(!target.exists());
        assert!(!partial_path(&target).exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_short_run_is_not_published() {
        let dir = scratch_dir("short");
        let target = dir.join("short.png");
        let mut exporter = exporter(&target, 3);
        exporter.on_frame(blinker_frames().remove(0), 1).unwrap();

        let err = exporter.finish().unwrap_err();
        assert!(matches!(err, LifeError::IncompleteAnimation { written: 1, expected: 3 }));
        assert!(!target.exists());
        assert!(!partial_path(&target).exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_extra_frame_is_rejected() {
        let dir = scratch_dir("extra");
        let target = dir.join("extra.png");
        let mut exporter = exporter(&target, 1);
        let mut frames = blinker_frames();
        exporter.on_frame(frames.remove(0), 1).unwrap();

        let err = exporter.on_frame(frames.remove(0), 2).unwrap_err();
        assert!(matches!(err, LifeError::IncompleteAnimation { written: 2, expected: 1 }));
        assert!(!partial_path(&target).exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_dropping_unfinished_export_cleans_up() {
        let dir = scratch_dir("dropped");
        let target = dir.join("dropped.png");
        {
            let mut exporter = exporter(&target, 3);
            exporter.on_frame(blinker_frames().remove(0), 1).unwrap();
            assert!(partial_path(&target).exists());
        }
        assert!(!partial_path(&target).exists());
        assert!(!target.exists());

        fs::remove_dir_all(dir).unwrap();
    }
}
