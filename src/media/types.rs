use image::{imageops, GrayImage, ImageBuffer};

/// A single decoded video frame, grayscale
///
/// This is a thin wrapper around a luma buffer that provides the pixel
/// accessors the extractors and scene detectors need. Color is irrelevant to
/// every analysis pass, so frames arrive already converted.
#[derive(Clone, Debug)]
pub struct Frame {
    buffer: GrayImage,
}

impl Frame {
    /// Create a new frame from a grayscale buffer
    pub fn new(buffer: GrayImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with black
    pub fn new_black(width: u32, height: u32) -> Self {
        Self {
            buffer: ImageBuffer::new(width, height),
        }
    }

    /// Create a new frame filled with a uniform luma value
    pub fn new_filled(width: u32, height: u32, luma: u8) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, image::Luma([luma])),
        }
    }

    /// Get the width of the frame
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the frame
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        (self.buffer.width() * self.buffer.height()) as usize
    }

    /// Get the luma value at the given coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> u8 {
        self.buffer.get_pixel(x, y)[0]
    }

    /// Set the luma value at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, luma: u8) {
        self.buffer.put_pixel(x, y, image::Luma([luma]));
    }

    /// Raw luma bytes, row-major
    pub fn as_luma_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &GrayImage {
        &self.buffer
    }

    /// Gaussian-blurred copy, used to suppress sensor noise before differencing
    pub fn blurred(&self, sigma: f32) -> Self {
        Self {
            buffer: imageops::blur(&self.buffer, sigma),
        }
    }
}

/// One video's decoded media, shared read-only across extractors
///
/// Produced once per invocation by the decoding collaborator; every extractor
/// consumes this same pass rather than re-decoding the file.
#[derive(Debug, Clone)]
pub struct DecodedMedia {
    /// Decoded grayscale frames at native frame rate
    pub frames: Vec<Frame>,

    /// Native frame rate (frames per second)
    pub fps: f64,

    /// Mono waveform samples, full scale [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Waveform sample rate in Hz
    pub sample_rate: u32,

    /// Total duration in seconds
    pub duration: f64,
}

impl DecodedMedia {
    /// Timestamp of a frame index in seconds
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 / self.fps
    }

    /// Whether any video frames are present
    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Whether any audio samples are present
    pub fn has_audio(&self) -> bool {
        !self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_pixel_access() {
        let mut frame = Frame::new_black(4, 4);
        assert_eq!(frame.get_pixel(0, 0), 0);

        frame.set_pixel(2, 3, 200);
        assert_eq!(frame.get_pixel(2, 3), 200);
        assert_eq!(frame.pixel_count(), 16);
    }

    #[test]
    fn test_uniform_frame() {
        let frame = Frame::new_filled(8, 8, 128);
        assert!(frame.as_luma_bytes().iter().all(|&p| p == 128));
    }

    #[test]
    fn test_frame_time() {
        let media = DecodedMedia {
            frames: vec![],
            fps: 25.0,
            samples: vec![],
            sample_rate: 44100,
            duration: 10.0,
        };
        assert_eq!(media.frame_time(50), 2.0);
        assert!(!media.has_frames());
        assert!(!media.has_audio());
    }
}
