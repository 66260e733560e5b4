/*! # Stickwire Tests

Integration tests for the stickwire input crates, driven by a manual-time
stepper app.
*/

pub mod stepper;

#[cfg(test)]
mod callbacks;

#[cfg(test)]
mod input;
