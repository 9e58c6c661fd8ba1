//! Call-recording sink for unit tests

use shared::Color;

use crate::sink::PixelSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plot(i16, i16, Color),
    HRun(i16, i16, i16, Color),
    VRun(i16, i16, i16, Color),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lit pixel in emission order, runs expanded
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

    pub fn sorted_points(&self) -> Vec<(i16, i16)> {
        let mut points = self.points();
        points.sort_unstable();
        points
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
}

impl crate::stream::ByteStore for MemoryStore {
    type Error = core::convert::Infallible;

    fn block_size(&self) -> u8 {
        self.block
    }

    fn seek(&mut self, address: u16) -> Result<(), Self::Error> {
        self.seeks.push(address);
        self.position = usize::from(address);
        self.pending = 0;
        Ok(())
    }

    fn request_block(&mut self, count: u8) -> Result<(), Self::Error> {
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
