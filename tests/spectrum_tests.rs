// Host-side tests for the spectrum snapshot.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod noel {
    pub mod spectrum {
        include!("../src/core/spectrum.rs");
    }
}

use noel::spectrum::*;
use std::cell::Cell;

struct FakeSource {
    bins: Vec<u8>,
    reads: Cell<usize>,
}

impl FakeSource {
    fn new(bins: Vec<u8>) -> Self {
        Self {
            bins,
            reads: Cell::new(0),
        }
    }
}

impl SpectrumSource for FakeSource {
    fn bin_count(&self) -> usize {
        self.bins.len()
    }

    fn read_bins(&self, out: &mut [u8]) {
        self.reads.set(self.reads.get() + 1);
        let n = out.len().min(self.bins.len());
        out[..n].copy_from_slice(&self.bins[..n]);
    }
}

#[test]
fn snapshot_starts_silent() {
    let snap = SpectrumSnapshot::new(2048);
    assert_eq!(snap.len(), 1024);
    assert!(!snap.is_empty());
    assert!(snap.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn sample_copies_current_magnitudes() {
    let bins: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();
    let mut analyzer = SpectrumAnalyzer::new(FakeSource::new(bins.clone()), 2048);
    let snap = analyzer.sample();
    assert_eq!(snap.as_slice(), bins.as_slice());
    assert_eq!(analyzer.snapshot().len(), 1024);
}

#[test]
fn sample_overwrites_in_place() {
    let mut analyzer = SpectrumAnalyzer::new(FakeSource::new(vec![200; 8]), 16);
    analyzer.sample();
    assert_eq!(analyzer.snapshot().as_slice(), &[200; 8]);
    analyzer.sample();
    assert_eq!(analyzer.snapshot().as_slice(), &[200; 8]);
}

impl SpectrumSource for &FakeSource {
    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }

    fn read_bins(&self, out: &mut [u8]) {
        (**self).read_bins(out)
    }
}

#[test]
fn each_sample_reads_source_once() {
    let source = FakeSource::new(vec![1; 4]);
    let mut analyzer = SpectrumAnalyzer::new(&source, 8);
    for _ in 0..3 {
        analyzer.sample();
    }
    assert_eq!(source.reads.get(), 3);
    assert_eq!(analyzer.snapshot().as_slice(), &[1, 1, 1, 1]);
}

#[test]
fn smaller_source_fills_a_prefix() {
    let mut analyzer = SpectrumAnalyzer::new(FakeSource::new(vec![9; 3]), 16);
    let snap = analyzer.sample();
    assert_eq!(&snap.as_slice()[..3], &[9, 9, 9]);
    assert!(snap.as_slice()[3..].iter().all(|&b| b == 0));
    assert_eq!(snap.len(), 8);
}

#[test]
fn larger_source_is_capped() {
    let mut analyzer = SpectrumAnalyzer::new(FakeSource::new(vec![7; 64]), 8);
    let snap = analyzer.sample();
    assert_eq!(snap.as_slice(), &[7, 7, 7, 7]);
}
