use super::Chunk;
use std::{
    collections::{vec_deque, VecDeque},
    slice,
};

/// An iterator over the bytes of a [`Payload`](super::Payload).
#[derive(Debug, Clone)]
pub struct PayloadBytes<'a> {
    chunks: vec_deque::Iter<'a, Chunk>,
    current: slice::Iter<'a, u8>,
}

impl<'a> PayloadBytes<'a> {
    pub(super) fn new(chunks: &'a VecDeque<Chunk>) -> Self {
        Self {
            chunks: chunks.iter(),
            current: [].iter(),
        }
    }
}

impl<'a> Iterator for PayloadBytes<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(byte) = self.current.next() {
                return Some(*byte);
            }
            self.current = self.chunks.next()?.as_slice().iter();
        }
    }
}
