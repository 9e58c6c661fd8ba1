//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::convert::Infallible;

use gfx::{ByteStore, Color, PixelSink};

/// One call received by a [`Recorder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plot(i16, i16, Color),
    HRun(i16, i16, i16, Color),
    VRun(i16, i16, i16, Color),
}

/// `PixelSink` that keeps every call for later inspection
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pixel in call order, runs expanded
    pub fn pixels(&self) -> Vec<(i16, i16, Color)> {
        let mut out = Vec::new();
        for op in &self.ops {
            match *op {
                Op::Plot(x, y, c) => out.push((x, y, c)),
                Op::HRun(x, y, len, c) => out.extend((0..len).map(|i| (x + i, y, c))),
                Op::VRun(x, y, len, c) => out.extend((0..len).map(|i| (x, y + i, c))),
            }
        }
        out
    }

    pub fn points(&self) -> Vec<(i16, i16)> {
        self.pixels().into_iter().map(|(x, y, _)| (x, y)).collect()
    }

    pub fn point_set(&self) -> BTreeSet<(i16, i16)> {
        self.points().into_iter().collect()
    }

    pub fn pixel_set(&self) -> BTreeSet<(i16, i16, u16)> {
        self.pixels()
            .into_iter()
            .map(|(x, y, c)| (x, y, c.raw()))
            .collect()
    }
}

impl PixelSink for Recorder {
    fn plot(&mut self, x: i16, y: i16, color: Color) {
        self.ops.push(Op::Plot(x, y, color));
    }

    fn hrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        if len > 0 {
            self.ops.push(Op::HRun(x, y, len, color));
        }
    }

    fn vrun(&mut self, x: i16, y: i16, len: i16, color: Color) {
        if len > 0 {
            self.ops.push(Op::VRun(x, y, len, color));
        }
    }
}

/// In-memory `ByteStore` that logs every seek and block request
#[derive(Debug)]
pub struct MemoryStore {
    pub data: Vec<u8>,
    pub block: u8,
    pub seeks: Vec<u16>,
    /// `(address, count)` of each request
    pub requests: Vec<(u16, u8)>,
    position: usize,
    pending: u8,
}

impl MemoryStore {
    pub fn new(data: Vec<u8>, block: u8) -> Self {
        Self {
            data,
            block,
            seeks: Vec::new(),
            requests: Vec::new(),
            position: 0,
            pending: 0,
        }
    }

    /// `len` zero bytes with `payload` copied in at `address`
    pub fn with_payload(len: usize, address: usize, payload: &[u8], block: u8) -> Self {
        let mut data = vec![0; len];
        data[address..address + payload.len()].copy_from_slice(payload);
        Self::new(data, block)
    }

    /// Bytes handed out so far
    pub fn consumed(&self) -> usize {
        let requested: usize = self.requests.iter().map(|&(_, n)| usize::from(n)).sum();
        requested - usize::from(self.pending)
    }
}

impl ByteStore for MemoryStore {
    type Error = Infallible;

    fn block_size(&self) -> u8 {
        self.block
    }

    fn seek(&mut self, address: u16) -> Result<(), Infallible> {
        self.seeks.push(address);
        self.position = usize::from(address);
        self.pending = 0;
        Ok(())
    }

    fn request_block(&mut self, count: u8) -> Result<(), Infallible> {
        self.requests.push((self.position as u16, count));
        self.pending = count;
        Ok(())
    }

    fn read_next(&mut self) -> Option<u8> {
        if self.pending == 0 {
            return None;
        }
        let byte = *self.data.get(self.position)?;
        self.position += 1;
        self.pending -= 1;
        Some(byte)
    }
}
