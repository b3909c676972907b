// Per-frame spectrum snapshot and the adapter that refreshes it.

/// Anything that can report current frequency-bin magnitudes as bytes.
pub trait SpectrumSource {
    fn bin_count(&self) -> usize;
    /// Overwrite `out` with the current magnitudes (0 = silent, 255 = loudest).
    fn read_bins(&self, out: &mut [u8]);
}

/// Current magnitudes, overwritten in place every tick. No history.
#[derive(Clone, Debug)]
pub struct SpectrumSnapshot {
    bins: Vec<u8>,
}

impl SpectrumSnapshot {
    /// Snapshot sized for a transform of `fft_size` samples (half as many bins).
    pub fn new(fft_size: usize) -> Self {
        Self {
            bins: vec![0; fft_size / 2],
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bins
    }
}

/// Binds a source to a fixed-size snapshot; `sample` is called once per tick.
pub struct SpectrumAnalyzer<S> {
    source: S,
    snapshot: SpectrumSnapshot,
}

impl<S: SpectrumSource> SpectrumAnalyzer<S> {
    pub fn new(source: S, fft_size: usize) -> Self {
        Self {
            source,
            snapshot: SpectrumSnapshot::new(fft_size),
        }
    }

    /// Pull the source's current magnitudes into the snapshot.
    pub fn sample(&mut self) -> &SpectrumSnapshot {
        let n = self.source.bin_count().min(self.snapshot.bins.len());
        self.source.read_bins(&mut self.snapshot.bins[..n]);
        &self.snapshot
    }

    pub fn snapshot(&self) -> &SpectrumSnapshot {
        &self.snapshot
    }
}
