use crate::UserAction;
use bevy_ecs::component::Component;
use bevy_reflect::Reflect;
use core::fmt::{Formatter, Write};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use stickwire_core::tick::Tick;

/// The state of the input for a given tick, as stored in the [`InputBuffer`].
///
/// `SameAsPrecedent` keeps the buffer cheap when the input does not change
/// between ticks; it is resolved back to the nearest concrete value on reads.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub enum InputData<A> {
    #[default]
    Absent,
    SameAsPrecedent,
    Input(A),
}

/// Buffer that maps a [`Tick`] to the input that was (or will be) used for
/// that tick.
///
/// On the locally-controlled instance the buffer is filled by the runner's
/// per-tick poll; on other instances it is filled with the authoritative
/// inputs delivered by the runner. Simulation code reads it through
/// [`get`](InputBuffer::get), which is a total read: ticks without a concrete
/// value resolve to the nearest precedent, or `None`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
pub struct InputBuffer<A> {
    /// Tick of the first element in the buffer, if any.
    pub start_tick: Option<Tick>,
    /// Values for consecutive ticks starting at `start_tick`.
    pub buffer: VecDeque<InputData<A>>,
}

impl<A> Default for InputBuffer<A> {
    fn default() -> Self {
        Self {
            start_tick: None,
            buffer: VecDeque::new(),
        }
    }
}

impl<A: UserAction> InputBuffer<A> {
    /// Number of ticks currently covered by the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Tick of the last element in the buffer, if any.
    pub fn end_tick(&self) -> Option<Tick> {
        self.start_tick
            .map(|start| start + (self.buffer.len() as u16 - 1))
    }

    /// Store the input for the given tick, overwriting any existing value.
    ///
    /// Gaps between the previous end of the buffer and `tick` are filled with
    /// `SameAsPrecedent`. Writes older than the start of the buffer are
    /// dropped.
    pub fn set(&mut self, tick: Tick, value: A) {
        self.set_raw(tick, InputData::Input(value));
    }

    pub fn set_raw(&mut self, tick: Tick, value: InputData<A>) {
        let Some(start_tick) = self.start_tick else {
            self.start_tick = Some(tick);
            self.buffer.push_back(value);
            return;
        };
        let end_tick = start_tick + (self.buffer.len() as u16 - 1);
        if tick > end_tick {
            let gap = (tick - end_tick) as u16;
            for _ in 0..gap - 1 {
                self.buffer.push_back(InputData::SameAsPrecedent);
            }
            self.buffer.push_back(value);
            return;
        }
        if tick < start_tick {
            return;
        }
        let idx = (tick - start_tick) as usize;
        self.buffer[idx] = value;
    }

    /// Get the input for the given tick, resolving `SameAsPrecedent` back to
    /// the nearest concrete value. Returns `None` outside the buffered range
    /// or when the input was explicitly absent.
    pub fn get(&self, tick: Tick) -> Option<&A> {
        let start_tick = self.start_tick?;
        if self.buffer.is_empty() {
            return None;
        }
        let end_tick = start_tick + (self.buffer.len() as u16 - 1);
        if tick < start_tick || tick > end_tick {
            return None;
        }
        let idx = (tick - start_tick) as usize;
        for i in (0..=idx).rev() {
            match &self.buffer[i] {
                InputData::Input(value) => return Some(value),
                InputData::SameAsPrecedent => continue,
                InputData::Absent => return None,
            }
        }
        None
    }

    /// Get the most recent buffered input, if any.
    pub fn get_last(&self) -> Option<&A> {
        self.end_tick().and_then(|tick| self.get(tick))
    }

    /// Remove all values up to and including `tick`, and return the value
    /// that was in effect at `tick`.
    pub fn pop(&mut self, tick: Tick) -> Option<A> {
        let start_tick = self.start_tick?;
        if tick < start_tick {
            return None;
        }
        let end_tick = start_tick + (self.buffer.len() as u16 - 1);
        if tick >= end_tick {
            let value = self.get_last().cloned();
            self.buffer.clear();
            self.start_tick = None;
            return value;
        }
        let value = self.get(tick).cloned();
        for _ in 0..=(tick - start_tick) as u16 {
            self.buffer.pop_front();
        }
        self.start_tick = Some(tick + 1u16);
        // the new front must not refer to a precedent we just dropped
        if let Some(front) = self.buffer.front_mut()
            && matches!(front, InputData::SameAsPrecedent)
        {
            *front = value
                .clone()
                .map_or(InputData::Absent, InputData::Input);
        }
        value
    }
}

impl<A: UserAction> core::fmt::Display for InputBuffer<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let ty = core::any::type_name::<A>();
        let Some(start_tick) = self.start_tick else {
            return write!(f, "EmptyInputBuffer<{ty:?}>");
        };
        let mut str = String::new();
        for (i, input) in self.buffer.iter().enumerate() {
            let tick = start_tick + i as u16;
            let _ = writeln!(&mut str, "Tick: {:?}, Input: {:?}", tick, input);
        }
        write!(f, "InputBuffer<{ty:?}>:\n{str}")
    }
}
