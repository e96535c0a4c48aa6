use std::fs::File;
use std::io::{ BufWriter, Write };
use std::path::{ Path, PathBuf };

use gif::{ Encoder, Repeat };
use glow::HasContext;
use image::RgbaImage;
use tracing::{ error, info, warn };

use crate::engine::config::CaptureSettings;
use crate::engine::error::AppError;

/// Appends rendered frames to an animated GIF.
pub struct FrameCapture {
    encoder: Option<Encoder<BufWriter<File>>>,
    path: PathBuf,
    width: u16,
    height: u16,
    every_nth_frame: u32,
    speed: i32,
    // GIF delays count hundredths of a second.
    delay_centis: u16,
    frames_seen: u64,
    frames_written: u64,
}

impl FrameCapture {
    pub fn create(settings: &CaptureSettings, width: u32, height: u32) -> Result<Self, AppError> {
        let (Ok(gif_width), Ok(gif_height)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(AppError::FrameDimensions { width, height });
        };

        let path = settings.output_path.clone();
        let file = File::create(&path).map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;

        let mut encoder = Encoder::new(BufWriter::new(file), gif_width, gif_height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        info!("Recording {}x{} frames to {}", width, height, path.display());

        Ok(Self {
            encoder: Some(encoder),
            path,
            width: gif_width,
            height: gif_height,
            every_nth_frame: settings.every_nth_frame.max(1),
            speed: settings.encoder_speed.clamp(1, 30),
            delay_centis: u16::try_from(settings.frame_delay_ms / 10).unwrap_or(u16::MAX),
            frames_seen: 0,
            frames_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn frame_len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * 4
    }

    /// Read back the current framebuffer and append it.
    pub fn capture(&mut self, gl: &glow::Context) -> Result<(), AppError> {
        if !self.wants_next_frame() {
            return Ok(());
        }

        let mut pixels = vec![0u8; self.frame_len()];
        unsafe {
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
            gl.read_pixels(
                0,
                0,
                i32::from(self.width),
                i32::from(self.height),
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(Some(pixels.as_mut_slice()))
            );
        }
        self.write_frame(pixels)
    }

    /// Append a bottom-up RGBA frame, as GL hands it back, subject to the
    /// `every_nth_frame` sampling.
    pub fn push_frame(&mut self, pixels: Vec<u8>) -> Result<(), AppError> {
        if !self.wants_next_frame() {
            return Ok(());
        }
        self.write_frame(pixels)
    }

    fn wants_next_frame(&mut self) -> bool {
        let index = self.frames_seen;
        self.frames_seen += 1;
        index % u64::from(self.every_nth_frame) == 0
    }

    fn write_frame(&mut self, pixels: Vec<u8>) -> Result<(), AppError> {
        let expected = self.frame_len();
        if pixels.len() != expected {
            return Err(AppError::FrameSize { expected, actual: pixels.len() });
        }
        let Some(encoder) = self.encoder.as_mut() else {
            warn!("Frame dropped, capture already finished");
            return Ok(());
        };

        let mut image = RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), pixels)
            .ok_or(AppError::FrameSize { expected, actual: 0 })?;
        image::imageops::flip_vertical_in_place(&mut image);

        let mut pixels = image.into_raw();
        let mut frame = gif::Frame::from_rgba_speed(self.width, self.height, &mut pixels, self.speed);
        frame.delay = self.delay_centis;
        encoder.write_frame(&frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Write the trailer and flush the file. A capture that never received
    /// a frame removes its file instead. Later calls return the same count.
    pub fn finish(&mut self) -> Result<u64, AppError> {
        let Some(encoder) = self.encoder.take() else {
            return Ok(self.frames_written);
        };
        let io_error = |source| AppError::Io { path: self.path.clone(), source };

        let mut writer = encoder.into_inner().map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        drop(writer);

        if self.frames_written == 0 {
            std::fs::remove_file(&self.path).map_err(io_error)?;
            info!("No frames captured, removed {}", self.path.display());
        } else {
            info!("Wrote {} frames to {}", self.frames_written, self.path.display());
        }
        Ok(self.frames_written)
    }
}

impl Drop for FrameCapture {
    fn drop(&mut self) {
        if let Err(err) = self.finish() {
            error!("Failed to finish {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use pretty_assertions::assert_eq;

    fn settings(path: PathBuf, every_nth_frame: u32) -> CaptureSettings {
        CaptureSettings {
            enabled: true,
            output_path: path,
            frame_delay_ms: 20,
            every_nth_frame,
            encoder_speed: 30,
        }
    }

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((width * height) as usize)
    }

    fn decoded_frames(path: &Path) -> Vec<image::Frame> {
        let file = File::open(path).expect("gif exists");
        let decoder = GifDecoder::new(std::io::BufReader::new(file)).expect("valid gif");
        decoder.into_frames().collect_frames().expect("decodable frames")
    }

    fn assert_color_near(actual: &image::Rgba<u8>, expected: [u8; 4]) {
        for (a, e) in actual.0.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 8, "{:?} != {:?}", actual.0, expected);
        }
    }

    #[test]
    fn writes_every_pushed_frame() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("walk.gif");
        let mut capture = FrameCapture::create(&settings(path.clone(), 1), 4, 2).expect("create gif");

        capture.push_frame(solid(4, 2, [255, 0, 0, 255])).expect("frame 1");
        capture.push_frame(solid(4, 2, [0, 0, 255, 255])).expect("frame 2");
        assert_eq!(capture.finish().expect("finish"), 2);

        let frames = decoded_frames(&path);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].delay().numer_denom_ms(), (20, 1));
    }

    #[test]
    fn bottom_up_rows_are_stored_top_down() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("flip.gif");
        let mut capture = FrameCapture::create(&settings(path.clone(), 1), 1, 2).expect("create gif");

        // GL order: first row is the bottom of the screen.
        let mut pixels = vec![255, 0, 0, 255];
        pixels.extend([0, 0, 255, 255]);
        capture.push_frame(pixels).expect("frame");
        capture.finish().expect("finish");

        let frames = decoded_frames(&path);
        let buffer = frames[0].buffer();
        assert_color_near(buffer.get_pixel(0, 0), [0, 0, 255, 255]);
        assert_color_near(buffer.get_pixel(0, 1), [255, 0, 0, 255]);
    }

    #[test]
    fn subsamples_frames() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sparse.gif");
        let mut capture = FrameCapture::create(&settings(path.clone(), 3), 2, 2).expect("create gif");

        for _ in 0..7 {
            capture.push_frame(solid(2, 2, [0, 255, 0, 255])).expect("frame");
        }
        // Frames 0, 3 and 6 are kept.
        assert_eq!(capture.finish().expect("finish"), 3);
        assert_eq!(decoded_frames(&path).len(), 3);
    }

    #[test]
    fn rejects_wrongly_sized_frames() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut capture = FrameCapture::create(&settings(dir.path().join("bad.gif"), 1), 4, 4)
            .expect("create gif");

        let err = capture.push_frame(vec![0; 10]).expect_err("size mismatch");
        assert!(matches!(err, AppError::FrameSize { expected: 64, actual: 10 }));
        assert_eq!(capture.frames_written(), 0);
    }

    #[test]
    fn rejects_dimensions_a_gif_cannot_hold() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = FrameCapture::create(&settings(dir.path().join("huge.gif"), 1), 70_000, 2);
        assert!(matches!(result, Err(AppError::FrameDimensions { width: 70_000, height: 2 })));
    }

    #[test]
    fn frames_after_finish_are_dropped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut capture = FrameCapture::create(&settings(dir.path().join("done.gif"), 1), 1, 1)
            .expect("create gif");
        capture.push_frame(vec![0; 4]).expect("frame");
        assert_eq!(capture.finish().expect("finish"), 1);

        capture.push_frame(vec![0; 4]).expect("dropped silently");
        assert_eq!(capture.frames_written(), 1);
        assert_eq!(capture.finish().expect("second finish"), 1);
    }

    #[test]
    fn empty_capture_removes_its_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.gif");
        let mut capture = FrameCapture::create(&settings(path.clone(), 1), 2, 2).expect("create gif");
        assert!(path.exists());

        assert_eq!(capture.finish().expect("finish"), 0);
        assert!(!path.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_final_flush_is_reported() {
        let path = PathBuf::from("/dev/full");
        let mut capture = FrameCapture::create(&settings(path, 1), 2, 2).expect("open /dev/full");
        capture.push_frame(solid(2, 2, [10, 20, 30, 255])).expect("buffered frame");

        let err = capture.finish().expect_err("disk full");
        assert!(matches!(err, AppError::Io { ref path, .. } if path.as_path() == Path::new("/dev/full")));
    }
}
