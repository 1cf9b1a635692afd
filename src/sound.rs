use std::{
    io::{self, Write},
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, warn};

/// Plays the pickup chime on a background thread. Nothing is shared with the
/// game; the threads are only joined when the player shuts down.
pub struct Chime {
    enabled: bool,
    duration: Duration,
    playing: Vec<JoinHandle<()>>,
}

impl Chime {
    pub fn new(enabled: bool, duration: Duration) -> Self {
        Chime { enabled, duration, playing: vec![] }
    }

    pub fn play(&mut self) {
        if !self.enabled {
            return;
        }

        self.playing.retain(|handle| !handle.is_finished());

        let duration = self.duration;
        let spawned = thread::Builder::new()
            .name("chime".into())
            .spawn(move || ring(duration));

        match spawned {
            Ok(handle) => self.playing.push(handle),
            Err(e) => warn!("Could not start chime: {}", e),
        }
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.playing.len()
    }

    /// Waits for every chime still playing.
    pub fn shutdown(&mut self) {
        debug!("Joining {} chime(s)", self.playing.len());
        for handle in self.playing.drain(..) {
            if handle.join().is_err() {
                warn!("A chime thread panicked");
            }
        }
    }
}

impl Drop for Chime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// The bell goes to stderr so it never lands in the middle of a half-queued frame on stdout.
fn ring(duration: Duration) {
    let mut stderr = io::stderr();
    if stderr.write_all(b"\x07").and_then(|_| stderr.flush()).is_err() {
        return;
    }
    thread::sleep(duration);
}
