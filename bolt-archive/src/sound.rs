//! Sound resources (type 7)
//!
//! A sound is headerless unsigned 8-bit mono PCM at 22050 Hz. Playback code
//! is expected to map each sample to `value / 255 * 2 - 1`, i.e. -1.0..=1.0
//! with 128 just above silence.

/// Sample rate of every sound resource
pub const SOUND_SAMPLE_RATE: u32 = 22050;

/// Sound resource borrowing its decoded bytes
#[derive(Debug, Clone, Copy)]
pub struct Sound<'a> {
    samples: &'a [u8],
}

impl<'a> Sound<'a> {
    pub fn new(samples: &'a [u8]) -> Self {
        Self { samples }
    }

    /// Raw unsigned 8-bit samples
    pub fn samples(&self) -> &'a [u8] {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        SOUND_SAMPLE_RATE
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / SOUND_SAMPLE_RATE as f64
    }

    /// Samples as floats in -1.0..=1.0
    pub fn normalized(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| (s as f32 / 255.0) * 2.0 - 1.0)
            .collect()
    }

    /// Samples as signed 16-bit PCM
    pub fn to_i16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| ((s as i16) - 128) << 8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_range() {
        let sound = Sound::new(&[0, 255, 128]);
        let n = sound.normalized();
        assert_eq!(n[0], -1.0);
        assert_eq!(n[1], 1.0);
        assert!(n[2] > 0.0 && n[2] < 0.01);
    }

    #[test]
    fn test_duration() {
        let data = vec![128u8; 22050];
        let sound = Sound::new(&data);
        assert_eq!(sound.len(), 22050);
        assert!((sound.duration_secs() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_i16() {
        assert_eq!(Sound::new(&[0, 128, 255]).to_i16(), vec![-32768, 0, 32512]);
    }
}
